use rolodex_core::db::{open_db, open_db_in_memory};
use rolodex_core::repo::local_user_repo::LOCAL_USERS_SLOT;
use rolodex_core::{LocalUserRepository, NewUser, SqliteLocalUserRepository, StoreError, UserRecord};
use rusqlite::params;

#[test]
fn load_returns_empty_list_when_slot_is_absent() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteLocalUserRepository::new(&conn);

    assert_eq!(store.load().unwrap(), Vec::new());
}

#[test]
fn save_then_load_roundtrips_the_list_in_order() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteLocalUserRepository::new(&conn);

    let users = vec![
        local_user(1_700_000_000_100, "Jane Doe", "jane@example.com"),
        local_user(1_700_000_000_200, "Omar Haddad", "omar@example.com"),
    ];
    store.save(&users).unwrap();

    assert_eq!(store.load().unwrap(), users);
}

#[test]
fn save_replaces_the_previous_payload_wholesale() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteLocalUserRepository::new(&conn);

    let first = vec![local_user(1, "First", "first@example.com")];
    let second = vec![
        local_user(2, "Second", "second@example.com"),
        local_user(3, "Third", "third@example.com"),
    ];
    store.save(&first).unwrap();
    store.save(&second).unwrap();

    assert_eq!(store.load().unwrap(), second);

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM slots;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn saving_an_empty_list_is_distinct_from_an_absent_slot() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteLocalUserRepository::new(&conn);

    store.save(&[]).unwrap();

    assert_eq!(store.load().unwrap(), Vec::new());
    let payload: String = conn
        .query_row(
            "SELECT payload FROM slots WHERE slot = ?1;",
            params![LOCAL_USERS_SLOT],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(payload, "[]");
}

#[test]
fn corrupt_payload_surfaces_a_decode_error() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO slots (slot, payload, updated_at) VALUES (?1, ?2, 0);",
        params![LOCAL_USERS_SLOT, "{not json"],
    )
    .unwrap();

    let store = SqliteLocalUserRepository::new(&conn);
    let err = store.load().unwrap_err();
    assert!(matches!(err, StoreError::Decode { .. }));
    assert!(err.to_string().contains(LOCAL_USERS_SLOT));
}

#[test]
fn payload_survives_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rolodex.db");

    let users = vec![local_user(1_700_000_000_300, "Priya Nair", "priya@example.com")];
    {
        let conn = open_db(&path).unwrap();
        let store = SqliteLocalUserRepository::new(&conn);
        store.save(&users).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let store = SqliteLocalUserRepository::new(&conn);
    assert_eq!(store.load().unwrap(), users);
}

#[test]
fn foreign_slots_are_left_untouched() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO slots (slot, payload, updated_at) VALUES ('other', 'keep me', 0);",
        [],
    )
    .unwrap();

    let store = SqliteLocalUserRepository::new(&conn);
    store
        .save(&[local_user(5, "Jane Doe", "jane@example.com")])
        .unwrap();

    let other: String = conn
        .query_row(
            "SELECT payload FROM slots WHERE slot = 'other';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(other, "keep me");
    assert_eq!(store.load().unwrap().len(), 1);
}

fn local_user(id: i64, name: &str, email: &str) -> UserRecord {
    UserRecord::new_local(
        id,
        &NewUser {
            name: name.to_string(),
            email: email.to_string(),
            phone: None,
        },
    )
}
