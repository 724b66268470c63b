use jotpad_core::{
    result_set_to_entries, to_row, ChangeKind, ContentGateway, ContentUri, Entry, EntryService,
    FieldRow, GatewayError, JotpadConfig, UNSET_ID,
};
use std::sync::mpsc;
use std::sync::Arc;

fn gateway() -> ContentGateway {
    let config = JotpadConfig::default();
    let (tx, _rx) = mpsc::channel();
    let service = EntryService::open(&config, tx).unwrap();
    ContentGateway::new(&config, Arc::new(service))
}

#[test]
fn insert_ignores_trailing_id_and_returns_assigned_one() {
    let gateway = gateway();
    let placeholder = gateway.item_uri(0);

    let inserted = gateway
        .insert(&placeholder, &to_row(&Entry::new("A", "1")))
        .unwrap();
    assert_eq!(inserted.to_string(), "content://jotpad/entries/1");
    assert_eq!(inserted.last_path_segment(), "1");

    let second = gateway
        .insert(&gateway.collection_uri(), &to_row(&Entry::new("B", "2")))
        .unwrap();
    assert_eq!(second.id(), Some(2));
}

#[test]
fn insert_of_entry_with_unset_id_is_numbered_by_the_store() {
    let gateway = gateway();
    let unset = to_row(&Entry::with_id(UNSET_ID, "A", "1"));

    let first = gateway.insert(&gateway.collection_uri(), &unset).unwrap();
    let second = gateway.insert(&gateway.collection_uri(), &unset).unwrap();
    assert_eq!(first.to_string(), "content://jotpad/entries/1");
    assert_eq!(second.id(), Some(2));

    let stored = result_set_to_entries(gateway.query(&gateway.collection_uri()).unwrap()).unwrap();
    assert_eq!(
        stored,
        vec![Entry::with_id(1, "A", "1"), Entry::with_id(2, "A", "1")]
    );
}

#[test]
fn writes_are_published_to_subscribers() {
    let gateway = gateway();
    let changes = gateway.subscribe();

    let uri = gateway
        .insert(&gateway.collection_uri(), &to_row(&Entry::new("A", "1")))
        .unwrap();
    assert_eq!(gateway.update(&uri, &to_row(&Entry::new("B", "2"))), 1);
    assert_eq!(gateway.delete(&uri), 1);

    let seen: Vec<_> = changes
        .drain()
        .into_iter()
        .map(|event| (event.kind, event.uri))
        .collect();
    assert_eq!(
        seen,
        vec![
            (ChangeKind::Inserted, uri.clone()),
            (ChangeKind::Updated, uri.clone()),
            (ChangeKind::Deleted, uri),
        ]
    );
}

#[test]
fn writes_that_touch_nothing_are_not_published() {
    let gateway = gateway();
    let changes = gateway.subscribe();

    let missing = gateway.item_uri(41);
    assert_eq!(gateway.update(&missing, &to_row(&Entry::new("x", "y"))), 0);
    assert_eq!(gateway.delete(&missing), 0);
    assert!(changes.try_next().is_none());
}

#[test]
fn update_takes_id_from_address() {
    let gateway = gateway();
    let uri = gateway
        .insert(&gateway.collection_uri(), &to_row(&Entry::new("A", "1")))
        .unwrap();

    let stray = to_row(&Entry::with_id(999, "B", "2"));
    assert_eq!(gateway.update(&uri, &stray), 1);

    let rows = gateway.query(&gateway.collection_uri()).unwrap();
    assert_eq!(
        result_set_to_entries(rows).unwrap(),
        vec![Entry::with_id(1, "B", "2")]
    );
}

#[test]
fn unroutable_requests_are_rejected() {
    let gateway = gateway();
    let foreign = ContentUri::collection("elsewhere", "entries");
    let wrong_table = ContentUri::item("jotpad", "notes", 1);

    assert!(gateway.query(&foreign).is_none());
    assert!(matches!(
        gateway.try_query(&foreign),
        Err(GatewayError::UnknownUri(_))
    ));
    assert_eq!(gateway.delete(&wrong_table), 0);
    assert!(matches!(
        gateway.try_delete(&gateway.collection_uri()),
        Err(GatewayError::MissingId(_))
    ));
    assert!(matches!(
        gateway.try_insert(&gateway.collection_uri(), &FieldRow::new()),
        Err(GatewayError::InvalidValues(_))
    ));
}

#[test]
fn parsed_addresses_route_like_built_ones() {
    let gateway = gateway();
    let uri: ContentUri = "content://jotpad/entries".parse().unwrap();
    let inserted = gateway.insert(&uri, &to_row(&Entry::new("A", ""))).unwrap();

    let parsed: ContentUri = inserted.to_string().parse().unwrap();
    assert_eq!(gateway.delete(&parsed), 1);
}
