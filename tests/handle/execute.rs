//! Statement execution and cursor tests
//!
//! Parameter binding, row materialization, affected-row counts. All on
//! directly-constructed handles.

use crate::common::*;

// ============================================================================
// Round trips
// ============================================================================

#[test]
fn insert_then_select_round_trip() {
    let dir = temp_dir();
    let handle = connected_handle(&dir);

    handle
        .execute(
            "INSERT INTO users (name, score) VALUES (?1, ?2)",
            params!["alice", 9.5],
        )
        .expect("insert");

    let cursor = handle
        .execute("SELECT name, score FROM users", [])
        .expect("select");

    assert_eq!(cursor.len(), 1);
    assert_eq!(cursor.rows()[0].get(0), Some(&Value::Text("alice".to_string())));
    assert_eq!(cursor.rows()[0].get(1), Some(&Value::Real(9.5)));
}

#[test]
fn bound_parameters_of_mixed_types() {
    let dir = temp_dir();
    let handle = connected_handle(&dir);

    handle
        .execute(
            "INSERT INTO users (id, name, score) VALUES (?1, ?2, ?3)",
            params![5, Option::<String>::None, 0.25],
        )
        .expect("insert with null");

    let cursor = handle
        .execute("SELECT id, name, score FROM users WHERE id = ?1", params![5])
        .expect("select");

    assert_eq!(
        cursor.rows()[0].values(),
        &[Value::Integer(5), Value::Null, Value::Real(0.25)]
    );
}

#[test]
fn select_on_empty_table_returns_empty_cursor() {
    let dir = temp_dir();
    let handle = connected_handle(&dir);

    let cursor = handle.execute("SELECT * FROM users", []).expect("select");
    assert!(cursor.is_empty());
    assert_eq!(cursor.len(), 0);
    // Column names are present even with no rows
    assert_eq!(cursor.columns(), &["id", "name", "score"]);
}

// ============================================================================
// Cursor surface
// ============================================================================

#[test]
fn cursor_reports_column_names_in_statement_order() {
    let dir = temp_dir();
    let handle = connected_handle(&dir);

    let cursor = handle
        .execute("SELECT score, id FROM users", [])
        .expect("select");
    assert_eq!(cursor.columns(), &["score", "id"]);
}

#[test]
fn cursor_named_value_access() {
    let dir = temp_dir();
    let handle = connected_handle(&dir);

    handle
        .execute(
            "INSERT INTO users (name, score) VALUES (?1, ?2)",
            params!["carol", 3.0],
        )
        .expect("insert");

    let cursor = handle
        .execute("SELECT name, score FROM users", [])
        .expect("select");

    assert_eq!(cursor.value(0, "name"), Some(&Value::Text("carol".to_string())));
    assert_eq!(cursor.value(0, "score"), Some(&Value::Real(3.0)));
    assert_eq!(cursor.value(0, "absent"), None);
}

#[test]
fn cursor_iteration_follows_order_by() {
    let dir = temp_dir();
    let handle = connected_handle(&dir);

    for (name, score) in [("a", 3.0), ("b", 1.0), ("c", 2.0)] {
        handle
            .execute(
                "INSERT INTO users (name, score) VALUES (?1, ?2)",
                params![name, score],
            )
            .expect("insert");
    }

    let cursor = handle
        .execute("SELECT name FROM users ORDER BY score", [])
        .expect("select");

    let names: Vec<Value> = cursor
        .into_iter()
        .map(|row| row.get(0).cloned().unwrap())
        .collect();
    assert_eq!(
        names,
        vec![
            Value::Text("b".to_string()),
            Value::Text("c".to_string()),
            Value::Text("a".to_string()),
        ]
    );
}

// ============================================================================
// Affected-row counts
// ============================================================================

#[test]
fn write_statements_report_changes() {
    let dir = temp_dir();
    let handle = connected_handle(&dir);

    let inserted = handle
        .execute(
            "INSERT INTO users (name, score) VALUES ('x', 1.0), ('y', 2.0)",
            [],
        )
        .expect("insert");
    assert_eq!(inserted.changes(), 2);

    let updated = handle
        .execute("UPDATE users SET score = score + 1", [])
        .expect("update");
    assert_eq!(updated.changes(), 2);

    let deleted = handle
        .execute("DELETE FROM users WHERE name = 'x'", [])
        .expect("delete");
    assert_eq!(deleted.changes(), 1);
}

#[test]
fn returning_clause_yields_rows() {
    let dir = temp_dir();
    let handle = connected_handle(&dir);

    let cursor = handle
        .execute(
            "INSERT INTO users (name, score) VALUES (?1, ?2) RETURNING id",
            params!["dave", 7.0],
        )
        .expect("insert returning");

    assert_eq!(cursor.len(), 1);
    assert_eq!(cursor.columns(), &["id"]);
    assert!(matches!(cursor.rows()[0].get(0), Some(&Value::Integer(_))));
}

// ============================================================================
// Failure propagation
// ============================================================================

#[test]
fn statement_errors_propagate() {
    let dir = temp_dir();
    let handle = connected_handle(&dir);

    let err = handle
        .execute("SELECT * FROM no_such_table", [])
        .unwrap_err();
    assert!(matches!(err, Error::Sqlite(_)));

    // The connection survives a failed statement
    assert!(handle.is_connected());
    handle.execute("SELECT 1", []).expect("still usable");
}
