//! List adapter: owns the rendered snapshot and feeds the view diffs.

use super::diff::compute_updates;
use super::view::ListView;
use crate::model::entry::Entry;
use log::debug;

pub struct EntryListAdapter<V: ListView> {
    rendered: Vec<Entry>,
    view: V,
}

impl<V: ListView> EntryListAdapter<V> {
    /// Attaches `view` and draws `initial` in full.
    pub fn new(initial: &[Entry], mut view: V) -> Self {
        view.reload(initial);
        Self {
            rendered: initial.to_vec(),
            view,
        }
    }

    /// Diffs `snapshot` against what is on screen, dispatches the updates,
    /// then keeps a private copy of `snapshot`. Returns the number of
    /// updates dispatched.
    pub fn apply_new_snapshot(&mut self, snapshot: &[Entry]) -> usize {
        let updates = compute_updates(&self.rendered, snapshot);
        for update in &updates {
            self.view.dispatch(update);
        }
        self.rendered = snapshot.to_vec();
        debug!(
            "event=list_diff module=presentation status=ok updates={} items={}",
            updates.len(),
            self.rendered.len()
        );
        updates.len()
    }

    pub fn rendered(&self) -> &[Entry] {
        &self.rendered
    }

    pub fn item_count(&self) -> usize {
        self.rendered.len()
    }

    pub fn entry_at(&self, position: usize) -> Option<&Entry> {
        self.rendered.get(position)
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }
}
