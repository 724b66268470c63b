use jotpad_core::db::open_db_in_memory;
use jotpad_core::{result_set_to_entries, Entry, EntryRepository, SqliteEntryRepository};

fn repo() -> SqliteEntryRepository {
    SqliteEntryRepository::new(open_db_in_memory().unwrap())
}

fn all(repo: &SqliteEntryRepository) -> Vec<Entry> {
    result_set_to_entries(repo.get_all().unwrap()).unwrap()
}

#[test]
fn insert_assigns_increasing_ids() {
    let repo = repo();
    let first = repo.insert(&Entry::new("X", "first")).unwrap();
    let second = repo.insert(&Entry::new("Y", "second")).unwrap();

    assert_eq!(first, 1);
    assert!(first < second);
    assert_eq!(
        all(&repo),
        vec![
            Entry::with_id(first, "X", "first"),
            Entry::with_id(second, "Y", "second"),
        ]
    );
}

#[test]
fn ids_are_not_reused_after_delete() {
    let repo = repo();
    let first = repo.insert(&Entry::new("a", "")).unwrap();
    assert_eq!(repo.delete_by_id(first).unwrap(), 1);

    let second = repo.insert(&Entry::new("b", "")).unwrap();
    assert!(second > first);
}

#[test]
fn insert_with_existing_id_replaces_row() {
    let repo = repo();
    let id = repo.insert(&Entry::new("old", "text")).unwrap();

    let again = repo.insert(&Entry::with_id(id, "new", "text")).unwrap();
    assert_eq!(again, id);
    assert_eq!(all(&repo), vec![Entry::with_id(id, "new", "text")]);
}

#[test]
fn update_reports_replaced_rows() {
    let repo = repo();
    let id = repo.insert(&Entry::new("A", "1")).unwrap();

    assert_eq!(repo.update(&Entry::with_id(id, "B", "2")).unwrap(), 1);
    assert_eq!(repo.update(&Entry::with_id(id + 100, "C", "3")).unwrap(), 0);
    assert_eq!(all(&repo), vec![Entry::with_id(id, "B", "2")]);
}

#[test]
fn empty_text_is_stored_as_is() {
    let repo = repo();
    let id = repo.insert(&Entry::new("", "")).unwrap();
    assert_eq!(all(&repo), vec![Entry::with_id(id, "", "")]);
}
