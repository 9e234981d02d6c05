//! Config-to-pragma tests
//!
//! The durability knob and busy timeout must be observable on the live
//! connection through the corresponding PRAGMAs.

use crate::common::*;

fn pragma_value(handle: &Handle, pragma: &str) -> Value {
    let cursor = handle
        .execute(&format!("PRAGMA {}", pragma), [])
        .expect("pragma query");
    cursor.rows()[0].get(0).cloned().expect("pragma row")
}

#[test]
fn standard_durability_sets_normal_synchronous() {
    init_logging();
    let dir = temp_dir();
    let handle = Handle::new(store_path(&dir, "test.db"));
    handle.connect().expect("connect");

    // synchronous: 1 = NORMAL
    assert_eq!(pragma_value(&handle, "synchronous"), Value::Integer(1));
}

#[test]
fn always_durability_sets_full_synchronous() {
    init_logging();
    let dir = temp_dir();
    let config = HandleConfig {
        durability: "always".to_string(),
        ..HandleConfig::default()
    };
    let handle = Handle::with_config(store_path(&dir, "test.db"), config);
    handle.connect().expect("connect");

    // synchronous: 2 = FULL
    assert_eq!(pragma_value(&handle, "synchronous"), Value::Integer(2));
}

#[test]
fn journal_mode_is_wal() {
    init_logging();
    let dir = temp_dir();
    let handle = Handle::new(store_path(&dir, "test.db"));
    handle.connect().expect("connect");

    assert_eq!(
        pragma_value(&handle, "journal_mode"),
        Value::Text("wal".to_string())
    );
}

#[test]
fn busy_timeout_is_applied() {
    init_logging();
    let dir = temp_dir();
    let config = HandleConfig {
        busy_timeout_ms: 250,
        ..HandleConfig::default()
    };
    let handle = Handle::with_config(store_path(&dir, "test.db"), config);
    handle.connect().expect("connect");

    assert_eq!(pragma_value(&handle, "busy_timeout"), Value::Integer(250));
}

#[test]
fn config_file_drives_the_handle() {
    init_logging();
    let dir = temp_dir();
    let config_path = dir.path().join(solodb::CONFIG_FILE_NAME);
    std::fs::write(&config_path, "durability = \"always\"\nbusy_timeout_ms = 100\n")
        .expect("write config");

    let config = HandleConfig::from_file(&config_path).expect("load config");
    let handle = Handle::with_config(store_path(&dir, "test.db"), config);
    handle.connect().expect("connect");

    assert_eq!(pragma_value(&handle, "synchronous"), Value::Integer(2));
    assert_eq!(pragma_value(&handle, "busy_timeout"), Value::Integer(100));
}
