// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ingest::{BatchError, CsvBatch};
use crate::models::{AggregateSummary, Expense, Forecast, MonthKey};
use crate::validate::{self, Candidate, InvalidRecord};
use crate::{forecast, insights, store, utils};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::io::Read;
use thiserror::Error;

// The analytics facade. Callers resolve the owner via auth::current_user
// first; everything here is scoped to the user_id it is handed.

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Invalid(#[from] InvalidRecord),
    #[error(transparent)]
    Batch(#[from] BatchError),
    #[error("expense store unavailable: {0}")]
    Storage(#[source] anyhow::Error),
}

#[derive(Debug, Clone, Serialize)]
pub struct RowFailure {
    pub row: u64,
    /// Stable code: MissingColumn, MalformedRow, InvalidDate,
    /// InvalidCategory, or InvalidAmount.
    pub error: String,
    pub detail: String,
}

#[derive(Debug, Serialize)]
pub struct CsvImportReport {
    pub accepted: usize,
    pub failures: Vec<RowFailure>,
}

pub fn add_expense(
    conn: &Connection,
    user_id: i64,
    candidate: &Candidate,
) -> Result<Expense, ApiError> {
    let rec = validate::validate(candidate)?;
    store::insert(conn, user_id, &rec).map_err(ApiError::Storage)
}

/// Commit every well-formed, valid row; collect the rest. Rows already
/// committed stay committed even if a later row fails. The report carries
/// the accepted count and every per-row failure.
pub fn import_csv<R: Read>(
    conn: &Connection,
    user_id: i64,
    reader: R,
) -> Result<CsvImportReport, ApiError> {
    let batch = CsvBatch::from_reader(reader)?;
    let mut accepted = 0usize;
    let mut failures = Vec::new();

    for (row, item) in batch {
        match item {
            Ok(candidate) => match validate::validate(&candidate) {
                Ok(rec) => {
                    store::insert(conn, user_id, &rec).map_err(ApiError::Storage)?;
                    accepted += 1;
                }
                Err(invalid) => {
                    for e in &invalid.errors {
                        failures.push(RowFailure {
                            row,
                            error: e.code().to_string(),
                            detail: e.to_string(),
                        });
                    }
                }
            },
            Err(e) => failures.push(RowFailure {
                row,
                error: e.code().to_string(),
                detail: e.to_string(),
            }),
        }
    }

    Ok(CsvImportReport { accepted, failures })
}

/// Owner's expenses in display order (newest first).
pub fn list_expenses(conn: &Connection, user_id: i64) -> Result<Vec<Expense>, ApiError> {
    store::list_recent(conn, user_id, &store::ListFilter::default()).map_err(ApiError::Storage)
}

pub fn summary(conn: &Connection, user_id: i64) -> Result<AggregateSummary, ApiError> {
    let expenses = store::list(conn, user_id).map_err(ApiError::Storage)?;
    Ok(insights::summary(&expenses))
}

pub fn spending_by_category(
    conn: &Connection,
    user_id: i64,
) -> Result<HashMap<String, Decimal>, ApiError> {
    let expenses = store::list(conn, user_id).map_err(ApiError::Storage)?;
    Ok(insights::by_category(&expenses))
}

pub fn monthly_spending(
    conn: &Connection,
    user_id: i64,
) -> Result<BTreeMap<MonthKey, Decimal>, ApiError> {
    let expenses = store::list(conn, user_id).map_err(ApiError::Storage)?;
    Ok(insights::by_month(&expenses))
}

/// Forecast next month's spend. `window` overrides the stored
/// forecast_window setting for this call only.
pub fn predict_next_month(
    conn: &Connection,
    user_id: i64,
    window: Option<usize>,
) -> Result<Forecast, ApiError> {
    let window = match window {
        Some(w) => w,
        None => utils::get_forecast_window(conn).map_err(ApiError::Storage)?,
    };
    let monthly = monthly_spending(conn, user_id)?;
    Ok(forecast::predict_next_month(&monthly, window))
}
