use hymnal_core::db::migrations::latest_version;
use hymnal_core::db::{open_db, open_db_in_memory};
use hymnal_core::{Hymn, HymnBook, HymnalDatabase, HymnalType, HymnsDao, SchemaState, DB_NAME};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_creates_schema() {
    let (conn, state) = open_db_in_memory().unwrap();

    assert_eq!(state, SchemaState::Created);
    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "hymnbooks");
}

#[test]
fn reopening_same_file_keeps_data() {
    let dir = tempfile::tempdir().unwrap();

    let first = HymnalDatabase::open(dir.path(), DB_NAME).unwrap();
    assert_eq!(first.schema_state(), SchemaState::Created);
    first.hymns_dao().insert(&english_book()).unwrap();
    drop(first);

    let second = HymnalDatabase::open(dir.path(), DB_NAME).unwrap();
    assert_eq!(second.schema_state(), SchemaState::Opened);
    assert_eq!(
        second.path(),
        Some(dir.path().join(DB_NAME).as_path())
    );
    let stored = second
        .hymns_dao()
        .get_by_type(HymnalType::English)
        .unwrap()
        .unwrap();
    assert_eq!(stored, english_book());
}

#[test]
fn open_creates_missing_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("app").join("databases");

    let database = HymnalDatabase::open(&nested, "custom.db").unwrap();

    assert!(nested.join("custom.db").exists());
    assert_eq!(database.schema_state(), SchemaState::Created);
}

#[test]
fn newer_schema_version_is_destroyed_and_recreated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE hymnbooks (type INTEGER PRIMARY KEY, title TEXT);
         INSERT INTO hymnbooks (type, title) VALUES (1, 'legacy');
         CREATE TABLE favorites (number INTEGER);
         PRAGMA user_version = 999;",
    )
    .unwrap();
    drop(conn);

    let (conn, state) = open_db(&path).unwrap();

    assert_eq!(state, SchemaState::Recreated { from_version: 999 });
    assert_eq!(schema_version(&conn), latest_version());
    assert_table_missing(&conn, "favorites");
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM hymnbooks;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 0);
}

#[test]
fn unversioned_store_with_tables_is_recreated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("CREATE TABLE hymnbooks (type INTEGER PRIMARY KEY, hymns BLOB);")
        .unwrap();
    drop(conn);

    let (conn, state) = open_db(&path).unwrap();

    assert_eq!(state, SchemaState::Recreated { from_version: 0 });
    assert!(state.is_fresh());
    conn.execute(
        "INSERT INTO hymnbooks (type, name, language, hymns) VALUES (1, 'n', 'l', '[]');",
        [],
    )
    .unwrap();
}

#[test]
fn current_version_with_incompatible_layout_is_recreated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(DB_NAME);

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(&format!(
        "CREATE TABLE hymnbooks (type INTEGER PRIMARY KEY NOT NULL, name TEXT NOT NULL, hymns TEXT NOT NULL);
         INSERT INTO hymnbooks (type, name, hymns) VALUES (1, 'legacy', '[]');
         PRAGMA user_version = {};",
        latest_version()
    ))
    .unwrap();
    drop(conn);

    let database = HymnalDatabase::open(dir.path(), DB_NAME).unwrap();

    assert_eq!(
        database.schema_state(),
        SchemaState::Recreated {
            from_version: latest_version()
        }
    );
    assert!(database.hymns_dao().get_all_books().unwrap().is_empty());
    database.hymns_dao().insert(&english_book()).unwrap();
    drop(database);

    let reopened = HymnalDatabase::open(dir.path(), DB_NAME).unwrap();
    assert_eq!(reopened.schema_state(), SchemaState::Opened);
    assert_eq!(reopened.hymns_dao().get_all_books().unwrap(), vec![english_book()]);
}

#[test]
fn negative_schema_version_is_recreated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(DB_NAME);

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE hymnbooks (type INTEGER PRIMARY KEY, title TEXT);
         PRAGMA user_version = -1;",
    )
    .unwrap();
    drop(conn);

    let database = HymnalDatabase::open(dir.path(), DB_NAME).unwrap();

    assert_eq!(
        database.schema_state(),
        SchemaState::Recreated { from_version: -1 }
    );
    assert!(database.hymns_dao().get_all_books().unwrap().is_empty());

    let conn = Connection::open(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
}

#[test]
fn open_fails_with_storage_error_when_path_is_a_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join(DB_NAME)).unwrap();

    assert!(HymnalDatabase::open(dir.path(), DB_NAME).is_err());
}

fn english_book() -> HymnBook {
    HymnBook::new(
        HymnalType::English,
        "SDA Hymnal",
        vec![Hymn::new(1, "Praise to the Lord", "Praise to the Lord, the Almighty")],
    )
}

fn schema_version(conn: &Connection) -> i64 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn table_exists(conn: &Connection, table_name: &str) -> bool {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    exists == 1
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    assert!(table_exists(conn, table_name), "table {table_name} does not exist");
}

fn assert_table_missing(conn: &Connection, table_name: &str) {
    assert!(!table_exists(conn, table_name), "table {table_name} still exists");
}
