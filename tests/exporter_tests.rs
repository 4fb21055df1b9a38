// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;
use spendlens::{auth, cli, commands, db};

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    auth::register(&conn, "ana").unwrap();
    auth::login(&conn, "ana").unwrap();
    conn.execute(
        "INSERT INTO expenses(user_id, date, category, amount, description)
         VALUES (1, '2025-01-02', 'Food', '10.50', 'lunch'),
                (1, '2025-01-03', 'Rent', '800', NULL)",
        [],
    )
    .unwrap();
    conn
}

fn run_export(conn: &Connection, format: &str, out: &str) {
    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "spendlens", "expense", "export", "--format", format, "--out", out,
    ]);
    if let Some(("expense", m)) = matches.subcommand() {
        commands::expenses::handle(conn, m).unwrap();
    } else {
        panic!("no expense subcommand");
    }
}

#[test]
fn exports_csv_with_header_and_all_rows() {
    let conn = setup();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("expenses.csv");
    run_export(&conn, "csv", out.to_str().unwrap());

    let text = std::fs::read_to_string(&out).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next().unwrap(), "date,category,amount,description");
    assert_eq!(lines.next().unwrap(), "2025-01-02,Food,10.50,lunch");
    assert_eq!(lines.next().unwrap(), "2025-01-03,Rent,800,");
}

#[test]
fn exports_json_array() {
    let conn = setup();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("expenses.json");
    run_export(&conn, "json", out.to_str().unwrap());

    let text = std::fs::read_to_string(&out).unwrap();
    let val: serde_json::Value = serde_json::from_str(&text).unwrap();
    let arr = val.as_array().unwrap();
    assert_eq!(arr.len(), 2);
    assert_eq!(arr[0]["category"], "Food");
    assert_eq!(arr[1]["description"], serde_json::Value::Null);
}
