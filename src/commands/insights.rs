// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{self, maybe_print_json, pretty_table};
use crate::{api, auth};
use anyhow::Result;
use rusqlite::Connection;
use std::collections::BTreeMap;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("set-window", sub)) = m.subcommand() {
        let window = *sub.get_one::<usize>("window").unwrap();
        utils::set_forecast_window(conn, window)?;
        println!("Forecast window set to {} month(s)", window);
        return Ok(());
    }

    let user = auth::current_user(conn)?;
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, user.id, sub),
        Some(("by-category", sub)) => by_category(conn, user.id, sub),
        Some(("monthly", sub)) => monthly(conn, user.id, sub),
        Some(("predict", sub)) => predict(conn, user.id, sub),
        _ => Ok(()),
    }
}

fn summary(conn: &Connection, user_id: i64, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let s = api::summary(conn, user_id)?;
    if !maybe_print_json(json_flag, jsonl_flag, &s)? {
        let rows = vec![vec![
            s.count.to_string(),
            format!("{:.2}", s.total_spending),
            format!("{:.2}", s.average_transaction),
        ]];
        println!("{}", pretty_table(&["Count", "Total", "Avg Txn"], rows));
    }
    Ok(())
}

fn by_category(conn: &Connection, user_id: i64, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let breakdown = api::spending_by_category(conn, user_id)?;
    if json_flag || jsonl_flag {
        // deterministic key order for machine consumers
        let ordered: BTreeMap<_, _> = breakdown.into_iter().collect();
        maybe_print_json(json_flag, jsonl_flag, &ordered)?;
        return Ok(());
    }
    let mut items: Vec<_> = breakdown.into_iter().collect();
    items.sort_by(|a, b| b.1.cmp(&a.1));
    let rows: Vec<Vec<String>> = items
        .into_iter()
        .map(|(cat, amt)| vec![cat, format!("{:.2}", amt)])
        .collect();
    println!("{}", pretty_table(&["Category", "Spent"], rows));
    Ok(())
}

fn monthly(conn: &Connection, user_id: i64, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let breakdown = api::monthly_spending(conn, user_id)?;
    // month keys become YYYY-MM only here, at the boundary
    let formatted: BTreeMap<String, _> = breakdown
        .into_iter()
        .map(|(month, amt)| (month.to_string(), amt))
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &formatted)? {
        let rows: Vec<Vec<String>> = formatted
            .into_iter()
            .map(|(month, amt)| vec![month, format!("{:.2}", amt)])
            .collect();
        println!("{}", pretty_table(&["Month", "Spent"], rows));
    }
    Ok(())
}

fn predict(conn: &Connection, user_id: i64, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let window = sub.get_one::<usize>("window").copied();
    let forecast = api::predict_next_month(conn, user_id, window)?;
    if !maybe_print_json(json_flag, jsonl_flag, &forecast)? {
        println!("Predicted next-month spend: {:.2}", forecast.prediction);
        println!("{}", forecast.message);
    }
    Ok(())
}
