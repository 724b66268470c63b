use jotpad_core::{to_entry, to_row, Entry, UNSET_ID};

#[test]
fn new_entry_is_unsaved() {
    let entry = Entry::new("title", "body");
    assert_eq!(entry.id, None);
    assert!(!entry.is_persisted());
    assert!(Entry::with_id(3, "title", "body").is_persisted());
    assert!(!Entry::with_id(UNSET_ID, "title", "body").is_persisted());
}

#[test]
fn identity_and_content_are_separate_questions() {
    let stored = Entry::with_id(5, "a", "b");
    let edited = Entry::with_id(5, "a", "changed");

    assert!(stored.same_item(&edited));
    assert!(!stored.same_content(&edited));
    assert!(!Entry::new("a", "b").same_item(&Entry::new("a", "b")));
}

#[test]
fn entry_serialization_uses_expected_wire_fields() {
    let entry = Entry::with_id(12, "Shopping", "- milk\n- bread");

    let json = serde_json::to_value(&entry).unwrap();
    assert_eq!(json["id"], 12);
    assert_eq!(json["title"], "Shopping");
    assert_eq!(json["body"], "- milk\n- bread");

    let decoded: Entry = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, entry);
}

#[test]
fn entry_survives_row_conversion() {
    for entry in [Entry::with_id(1, "t", "b"), Entry::new("", "unsaved")] {
        assert_eq!(to_entry(&to_row(&entry)).unwrap(), entry);
    }
}
