// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Expense;
use crate::validate::ValidRecord;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};
use rust_decimal::Decimal;

/// Append one validated record for the owner. The id comes from SQLite and
/// is never reused, even across interleaved writers.
pub fn insert(conn: &Connection, user_id: i64, rec: &ValidRecord) -> Result<Expense> {
    conn.execute(
        "INSERT INTO expenses(user_id, date, category, amount, description)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            user_id,
            rec.date.to_string(),
            rec.category,
            rec.amount.to_string(),
            rec.description.as_deref()
        ],
    )
    .context("Insert expense")?;
    Ok(Expense {
        id: conn.last_insert_rowid(),
        user_id,
        date: rec.date,
        category: rec.category.clone(),
        amount: rec.amount,
        description: rec.description.clone(),
    })
}

fn expense_from_row(row: &Row) -> rusqlite::Result<(i64, i64, String, String, String, Option<String>)> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
    ))
}

fn decode(raw: (i64, i64, String, String, String, Option<String>)) -> Result<Expense> {
    let (id, user_id, date_s, category, amount_s, description) = raw;
    let date = NaiveDate::parse_from_str(&date_s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}' stored on expense {}", date_s, id))?;
    let amount = amount_s
        .parse::<Decimal>()
        .with_context(|| format!("Invalid amount '{}' stored on expense {}", amount_s, id))?;
    Ok(Expense {
        id,
        user_id,
        date,
        category,
        amount,
        description,
    })
}

/// All of one owner's expenses in insertion order. The aggregate views are
/// computed over exactly this sequence.
pub fn list(conn: &Connection, user_id: i64) -> Result<Vec<Expense>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, date, category, amount, description
         FROM expenses WHERE user_id=?1 ORDER BY id",
    )?;
    let rows = stmt.query_map(params![user_id], expense_from_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(decode(row?)?);
    }
    Ok(out)
}

#[derive(Debug, Default, Clone)]
pub struct ListFilter {
    pub month: Option<String>,
    pub category: Option<String>,
    pub limit: Option<usize>,
}

/// Display-ordered listing, newest first. Sorting is a read-time concern,
/// not a store invariant.
pub fn list_recent(conn: &Connection, user_id: i64, filter: &ListFilter) -> Result<Vec<Expense>> {
    let mut sql = String::from(
        "SELECT id, user_id, date, category, amount, description
         FROM expenses WHERE user_id=?",
    );
    let mut params_vec: Vec<String> = vec![user_id.to_string()];

    if let Some(month) = &filter.month {
        sql.push_str(" AND substr(date,1,7)=?");
        params_vec.push(month.clone());
    }
    if let Some(cat) = &filter.category {
        sql.push_str(" AND category=?");
        params_vec.push(cat.clone());
    }
    sql.push_str(" ORDER BY date DESC, id DESC");
    if let Some(limit) = filter.limit {
        sql.push_str(" LIMIT ?");
        params_vec.push(limit.to_string());
    }

    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn rusqlite::ToSql> = params_vec
        .iter()
        .map(|s| s as &dyn rusqlite::ToSql)
        .collect();
    let rows = stmt.query_map(rusqlite::params_from_iter(params), expense_from_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(decode(row?)?);
    }
    Ok(out)
}
