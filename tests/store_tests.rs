// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::Connection;
use spendlens::store::{self, ListFilter};
use spendlens::validate::ValidRecord;
use spendlens::db;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn.execute("INSERT INTO users(name) VALUES ('ana')", [])
        .unwrap();
    conn
}

fn rec(date: &str, category: &str, amount: &str, description: Option<&str>) -> ValidRecord {
    ValidRecord {
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        category: category.to_string(),
        amount: amount.parse().unwrap(),
        description: description.map(|s| s.to_string()),
    }
}

#[test]
fn insert_assigns_unique_increasing_ids() {
    let conn = setup();
    let a = store::insert(&conn, 1, &rec("2025-01-01", "Food", "1", None)).unwrap();
    let b = store::insert(&conn, 1, &rec("2025-01-02", "Food", "2", None)).unwrap();
    assert!(b.id > a.id);
}

#[test]
fn list_returns_insertion_order() {
    let conn = setup();
    store::insert(&conn, 1, &rec("2025-03-01", "Food", "1", None)).unwrap();
    store::insert(&conn, 1, &rec("2025-01-01", "Food", "2", None)).unwrap();
    store::insert(&conn, 1, &rec("2025-02-01", "Food", "3", None)).unwrap();
    let dates: Vec<String> = store::list(&conn, 1)
        .unwrap()
        .iter()
        .map(|e| e.date.to_string())
        .collect();
    assert_eq!(dates, vec!["2025-03-01", "2025-01-01", "2025-02-01"]);
}

#[test]
fn description_round_trips() {
    let conn = setup();
    store::insert(&conn, 1, &rec("2025-01-01", "Food", "1", Some("team lunch"))).unwrap();
    store::insert(&conn, 1, &rec("2025-01-02", "Food", "2", None)).unwrap();
    let listed = store::list(&conn, 1).unwrap();
    assert_eq!(listed[0].description.as_deref(), Some("team lunch"));
    assert_eq!(listed[1].description, None);
}

#[test]
fn list_recent_is_newest_first_and_filters() {
    let conn = setup();
    store::insert(&conn, 1, &rec("2025-01-05", "Food", "1", None)).unwrap();
    store::insert(&conn, 1, &rec("2025-02-05", "Rent", "2", None)).unwrap();
    store::insert(&conn, 1, &rec("2025-02-10", "Food", "3", None)).unwrap();

    let all = store::list_recent(&conn, 1, &ListFilter::default()).unwrap();
    let dates: Vec<String> = all.iter().map(|e| e.date.to_string()).collect();
    assert_eq!(dates, vec!["2025-02-10", "2025-02-05", "2025-01-05"]);

    let feb = store::list_recent(
        &conn,
        1,
        &ListFilter {
            month: Some("2025-02".to_string()),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(feb.len(), 2);

    let food = store::list_recent(
        &conn,
        1,
        &ListFilter {
            category: Some("Food".to_string()),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(food.len(), 2);

    let limited = store::list_recent(
        &conn,
        1,
        &ListFilter {
            limit: Some(1),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(limited.len(), 1);
    assert_eq!(limited[0].date.to_string(), "2025-02-10");
}
