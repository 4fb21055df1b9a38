// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::{self, ApiError};
use crate::models::User;
use crate::store::{self, ListFilter};
use crate::utils::{maybe_print_json, parse_month, pretty_table};
use crate::{auth, validate::Candidate};
use anyhow::{anyhow, Context, Result};
use rusqlite::Connection;
use std::fs::File;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let user = auth::current_user(conn)?;
    match m.subcommand() {
        Some(("add", sub)) => add(conn, &user, sub),
        Some(("list", sub)) => list(conn, &user, sub),
        Some(("import", sub)) => import(conn, &user, sub),
        Some(("export", sub)) => export(conn, &user, sub),
        _ => Ok(()),
    }
}

fn add(conn: &Connection, user: &User, sub: &clap::ArgMatches) -> Result<()> {
    let candidate = Candidate {
        date: sub.get_one::<String>("date").cloned(),
        category: sub.get_one::<String>("category").cloned(),
        amount: sub.get_one::<String>("amount").cloned(),
        description: sub
            .get_one::<String>("description")
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string()),
    };

    match api::add_expense(conn, user.id, &candidate) {
        Ok(e) => {
            println!(
                "Recorded expense #{}: {} for '{}' on {}",
                e.id, e.amount, e.category, e.date
            );
            Ok(())
        }
        Err(ApiError::Invalid(invalid)) => {
            for err in &invalid.errors {
                eprintln!("  {}: {}", err.field(), err);
            }
            Err(anyhow!("expense rejected"))
        }
        Err(e) => Err(e.into()),
    }
}

fn list(conn: &Connection, user: &User, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let filter = ListFilter {
        month: sub
            .get_one::<String>("month")
            .map(|s| parse_month(s))
            .transpose()?,
        category: sub.get_one::<String>("category").cloned(),
        limit: sub.get_one::<usize>("limit").copied(),
    };
    let data = store::list_recent(conn, user.id, &filter)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|e| {
                vec![
                    e.date.to_string(),
                    e.category.clone(),
                    format!("{:.2}", e.amount),
                    e.description.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Category", "Amount", "Description"], rows)
        );
    }
    Ok(())
}

fn import(conn: &Connection, user: &User, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let path = sub.get_one::<String>("path").unwrap().trim();
    let file = File::open(path).with_context(|| format!("Open CSV {}", path))?;

    let report = api::import_csv(conn, user.id, file)?;
    if maybe_print_json(json_flag, jsonl_flag, &report)? {
        return Ok(());
    }

    println!(
        "{} expense(s) imported, {} row(s) failed.",
        report.accepted,
        report.failures.len()
    );
    if !report.failures.is_empty() {
        let rows: Vec<Vec<String>> = report
            .failures
            .iter()
            .map(|f| vec![f.row.to_string(), f.error.clone(), f.detail.clone()])
            .collect();
        println!("{}", pretty_table(&["Row", "Error", "Detail"], rows));
    }
    Ok(())
}

fn export(conn: &Connection, user: &User, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let data = store::list(conn, user.id)?;
    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["date", "category", "amount", "description"])?;
            for e in &data {
                wtr.write_record([
                    e.date.to_string(),
                    e.category.clone(),
                    e.amount.to_string(),
                    e.description.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&data)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
            return Ok(());
        }
    }
    println!("Exported {} expense(s) to {}", data.len(), out);
    Ok(())
}
