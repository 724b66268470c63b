//! Modal create and edit forms.
//!
//! Forms hold raw input only. On submit they package it and call the
//! [`EntryCommands`] handle they are given; they never touch the store.

use super::commands::{EditTarget, EntryCommands, EntryFields};
use crate::model::entry::{Entry, EntryId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateForm {
    pub title: String,
    pub body: String,
}

impl CreateForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = title.into();
        self
    }

    pub fn set_body(&mut self, body: impl Into<String>) -> &mut Self {
        self.body = body.into();
        self
    }

    /// Creates an unsaved entry from the input and hands it to `commands`.
    pub fn submit<C: EntryCommands + ?Sized>(self, commands: &mut C) -> Option<EntryId> {
        commands.create(Entry::new(self.title, self.body))
    }
}

/// Edit form, prefilled from the entry it was opened for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditForm {
    target: EditTarget,
    pub title: String,
    pub body: String,
}

impl EditForm {
    /// Prefills from `entry`, shown at `position`. Targets the entry's id;
    /// falls back to the position only for an entry without one.
    pub fn prefilled(entry: &Entry, position: usize) -> Self {
        Self {
            target: entry
                .id
                .map_or(EditTarget::Position(position), EditTarget::Id),
            title: entry.title.clone(),
            body: entry.body.clone(),
        }
    }

    pub fn target(&self) -> EditTarget {
        self.target
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = title.into();
        self
    }

    pub fn set_body(&mut self, body: impl Into<String>) -> &mut Self {
        self.body = body.into();
        self
    }

    pub fn submit<C: EntryCommands + ?Sized>(self, commands: &mut C) -> bool {
        commands.update(EntryFields {
            title: self.title,
            body: self.body,
            target: self.target,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        created: Vec<Entry>,
        updated: Vec<EntryFields>,
    }

    impl EntryCommands for Recorder {
        fn create(&mut self, entry: Entry) -> Option<EntryId> {
            self.created.push(entry);
            Some(self.created.len() as EntryId)
        }

        fn update(&mut self, fields: EntryFields) -> bool {
            self.updated.push(fields);
            true
        }

        fn delete(&mut self, _entry: Entry) -> bool {
            false
        }
    }

    #[test]
    fn create_form_hands_over_unsaved_entry() {
        let mut recorder = Recorder::default();
        let mut form = CreateForm::new();
        form.set_title("A").set_body("1");

        assert_eq!(form.submit(&mut recorder), Some(1));
        assert_eq!(recorder.created, vec![Entry::new("A", "1")]);
    }

    #[test]
    fn edit_form_targets_stable_id() {
        let mut recorder = Recorder::default();
        let mut form = EditForm::prefilled(&Entry::with_id(9, "old", "text"), 3);
        assert_eq!(form.title, "old");
        form.set_title("new");

        assert!(form.submit(&mut recorder));
        assert_eq!(
            recorder.updated,
            vec![EntryFields {
                title: "new".to_string(),
                body: "text".to_string(),
                target: EditTarget::Id(9),
            }]
        );
    }

    #[test]
    fn edit_form_for_unsaved_entry_falls_back_to_position() {
        let form = EditForm::prefilled(&Entry::new("draft", ""), 2);
        assert_eq!(form.target(), EditTarget::Position(2));
    }
}
