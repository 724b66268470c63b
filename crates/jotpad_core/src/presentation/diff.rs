//! Minimal list edit scripts between two entry snapshots.
//!
//! Items are matched by id; matched items whose title or body differ get
//! a [`ListUpdate::Changed`]. The script is ordered so that applying it
//! front to back to a list showing `old` leaves it showing `new`:
//!
//! 1. removals of ids absent from `new`, back to front;
//! 2. moves of surviving ids that fall outside the longest common
//!    subsequence (Myers) of the two orders;
//! 3. insertions of ids absent from `old`, front to back;
//! 4. content changes, at their final positions.

use crate::model::entry::{Entry, EntryId};
use similar::{capture_diff_slices, Algorithm, DiffOp};
use std::collections::{HashMap, HashSet};

/// One granular list redraw instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListUpdate {
    /// `entries` now occupy `position..position + entries.len()`.
    Inserted { position: usize, entries: Vec<Entry> },
    /// `count` items starting at `position` are gone.
    Removed { position: usize, count: usize },
    /// The item at `from` is taken out and reinserted so it ends up at `to`.
    Moved { from: usize, to: usize },
    /// The item at `position` keeps its identity but shows new content.
    Changed { position: usize, entry: Entry },
}

// Unsaved entries never match anything, not even each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum ItemKey {
    Stored(EntryId),
    OldUnsaved(usize),
    NewUnsaved(usize),
}

fn keys(entries: &[Entry], unsaved: fn(usize) -> ItemKey) -> Vec<ItemKey> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| match entry.id {
            Some(id) if entry.is_persisted() => ItemKey::Stored(id),
            _ => unsaved(index),
        })
        .collect()
}

/// Computes the edit script turning `old` into `new`.
///
/// Ids are expected to be unique within each snapshot, as they are in
/// anything read from the store. Repeated ids are treated as one item, so
/// the script still comes back but may not reproduce `new` exactly.
pub fn compute_updates(old: &[Entry], new: &[Entry]) -> Vec<ListUpdate> {
    let old_keys = keys(old, ItemKey::OldUnsaved);
    let new_keys = keys(new, ItemKey::NewUnsaved);
    let old_set: HashSet<ItemKey> = old_keys.iter().copied().collect();
    let new_set: HashSet<ItemKey> = new_keys.iter().copied().collect();

    let mut updates = Vec::new();
    let mut view = old_keys.clone();

    // Back to front so earlier positions stay valid.
    let mut index = view.len();
    while index > 0 {
        index -= 1;
        if new_set.contains(&view[index]) {
            continue;
        }
        let end = index + 1;
        while index > 0 && !new_set.contains(&view[index - 1]) {
            index -= 1;
        }
        view.drain(index..end);
        updates.push(ListUpdate::Removed {
            position: index,
            count: end - index,
        });
    }

    let target: Vec<ItemKey> = new_keys
        .iter()
        .copied()
        .filter(|key| old_set.contains(key))
        .collect();
    let stable = longest_common_keys(&view, &target);
    for (target_index, key) in target.iter().enumerate() {
        if stable.contains(key) {
            continue;
        }
        let Some(from) = view.iter().position(|candidate| candidate == key) else {
            continue;
        };
        view.remove(from);
        // Right after its predecessor in the new order, which is already
        // in place: either stable, or a moved item handled earlier.
        let to = match target_index.checked_sub(1) {
            Some(previous) => view
                .iter()
                .position(|candidate| *candidate == target[previous])
                .map_or(0, |position| position + 1),
            None => 0,
        };
        view.insert(to, *key);
        if from != to {
            updates.push(ListUpdate::Moved { from, to });
        }
    }

    let mut position = 0;
    while position < new.len() {
        if old_set.contains(&new_keys[position]) {
            position += 1;
            continue;
        }
        let start = position;
        while position < new.len() && !old_set.contains(&new_keys[position]) {
            position += 1;
        }
        updates.push(ListUpdate::Inserted {
            position: start,
            entries: new[start..position].to_vec(),
        });
    }

    let old_by_key: HashMap<ItemKey, &Entry> = old_keys.iter().copied().zip(old).collect();
    for (position, (key, entry)) in new_keys.iter().zip(new).enumerate() {
        if let Some(previous) = old_by_key.get(key) {
            if !previous.same_content(entry) {
                updates.push(ListUpdate::Changed {
                    position,
                    entry: entry.clone(),
                });
            }
        }
    }

    updates
}

fn longest_common_keys(current: &[ItemKey], target: &[ItemKey]) -> HashSet<ItemKey> {
    capture_diff_slices(Algorithm::Myers, current, target)
        .into_iter()
        .filter_map(|op| match op {
            DiffOp::Equal { old_index, len, .. } => Some(&current[old_index..old_index + len]),
            _ => None,
        })
        .flatten()
        .copied()
        .collect()
}

/// Applies `updates` in order to a list of entries.
pub fn apply_updates(list: &mut Vec<Entry>, updates: &[ListUpdate]) {
    for update in updates {
        match update {
            ListUpdate::Inserted { position, entries } => {
                let tail = list.split_off(*position);
                list.extend(entries.iter().cloned());
                list.extend(tail);
            }
            ListUpdate::Removed { position, count } => {
                list.drain(*position..*position + *count);
            }
            ListUpdate::Moved { from, to } => {
                let entry = list.remove(*from);
                list.insert(*to, entry);
            }
            ListUpdate::Changed { position, entry } => {
                list[*position] = entry.clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{apply_updates, compute_updates, ListUpdate};
    use crate::model::entry::Entry;

    fn entries(ids: &[i64]) -> Vec<Entry> {
        ids.iter()
            .map(|id| Entry::with_id(*id, format!("t{id}"), format!("b{id}")))
            .collect()
    }

    #[test]
    fn single_rotation_is_one_move() {
        let old = entries(&[1, 2, 3, 4]);
        let new = entries(&[2, 3, 4, 1]);
        let updates = compute_updates(&old, &new);
        assert_eq!(updates, vec![ListUpdate::Moved { from: 0, to: 3 }]);
    }

    #[test]
    fn contiguous_removals_are_coalesced() {
        let updates = compute_updates(&entries(&[1, 2, 3, 4]), &entries(&[1, 4]));
        assert_eq!(
            updates,
            vec![ListUpdate::Removed {
                position: 1,
                count: 2
            }]
        );
    }

    #[test]
    fn repeated_ids_still_produce_a_script() {
        let old = entries(&[1, 2, 2, 3]);
        let new = entries(&[3, 2, 1, 1]);
        let updates = compute_updates(&old, &new);
        assert!(!updates.is_empty());
    }

    #[test]
    fn unsaved_entries_are_replaced_not_matched() {
        let old = vec![Entry::new("draft", "x")];
        let new = vec![Entry::new("draft", "x")];
        let mut list = old.clone();
        let updates = compute_updates(&old, &new);
        assert_eq!(updates.len(), 2);
        apply_updates(&mut list, &updates);
        assert_eq!(list, new);
    }
}
