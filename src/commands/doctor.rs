// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection) -> Result<()> {
    let mut rows = Vec::new();

    // 1) Expenses whose owner no longer exists
    let mut stmt = conn.prepare(
        "SELECT e.id, e.user_id FROM expenses e
         LEFT JOIN users u ON e.user_id=u.id WHERE u.id IS NULL",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let uid: i64 = r.get(1)?;
        rows.push(vec![
            "expense_without_owner".into(),
            format!("expense {} -> user {}", id, uid),
        ]);
    }

    // 2) Stored values the engine would refuse today
    let mut stmt2 = conn.prepare("SELECT id, date, amount FROM expenses ORDER BY id")?;
    let mut cur2 = stmt2.query([])?;
    while let Some(r) = cur2.next()? {
        let id: i64 = r.get(0)?;
        let d: String = r.get(1)?;
        let a: String = r.get(2)?;
        if chrono::NaiveDate::parse_from_str(&d, "%Y-%m-%d").is_err() {
            rows.push(vec!["bad_date".into(), format!("expense {}: '{}'", id, d)]);
        }
        match a.parse::<Decimal>() {
            Ok(v) if v < Decimal::ZERO => {
                rows.push(vec![
                    "negative_amount".into(),
                    format!("expense {}: '{}'", id, a),
                ]);
            }
            Ok(_) => {}
            Err(_) => {
                rows.push(vec!["bad_amount".into(), format!("expense {}: '{}'", id, a)]);
            }
        }
    }

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
