// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::validate::Candidate;
use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter};
use std::io::Read;
use thiserror::Error;

// Bank exports rarely agree on header names; match case-insensitively
// against the spellings seen in the wild. Category must be present by name.
const DATE_ALIASES: &[&str] = &["date", "transaction date", "posting date"];
const AMOUNT_ALIASES: &[&str] = &["amount", "debit", "value", "expense"];
const DESCRIPTION_ALIASES: &[&str] = &[
    "description",
    "narrative",
    "details",
    "transaction details",
    "memo",
];

/// Whole-batch failures: nothing row-level can be salvaged from these.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("CSV input is empty or has no parsable header")]
    EmptyInput,
    #[error("missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// Per-row failures. One bad row never aborts the rest of the batch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowError {
    #[error("row has no value for column '{column}'")]
    MissingColumn { column: &'static str },
    #[error("malformed row: {detail}")]
    MalformedRow { detail: String },
}

impl RowError {
    pub fn code(&self) -> &'static str {
        match self {
            RowError::MissingColumn { .. } => "MissingColumn",
            RowError::MalformedRow { .. } => "MalformedRow",
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Columns {
    date: usize,
    category: usize,
    amount: usize,
    description: Option<usize>,
}

fn resolve_columns(headers: &StringRecord) -> Result<Columns, BatchError> {
    let names: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();
    let find = |aliases: &[&str]| {
        aliases
            .iter()
            .find_map(|a| names.iter().position(|n| n == a))
    };

    let date = find(DATE_ALIASES);
    let category = names.iter().position(|n| n == "category");
    let amount = find(AMOUNT_ALIASES);
    let description = find(DESCRIPTION_ALIASES);

    match (date, category, amount) {
        (Some(date), Some(category), Some(amount)) => Ok(Columns {
            date,
            category,
            amount,
            description,
        }),
        _ => {
            let mut missing = Vec::new();
            if date.is_none() {
                missing.push("date".to_string());
            }
            if category.is_none() {
                missing.push("category".to_string());
            }
            if amount.is_none() {
                missing.push("amount".to_string());
            }
            Err(BatchError::MissingColumns(missing))
        }
    }
}

/// Lazy stream of per-row outcomes over one CSV upload. Rows are numbered
/// from 1, header excluded, so failures can be reported back against the
/// file the caller uploaded.
pub struct CsvBatch<R: Read> {
    records: StringRecordsIntoIter<R>,
    cols: Columns,
    row: u64,
}

impl<R: Read> std::fmt::Debug for CsvBatch<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsvBatch")
            .field("cols", &self.cols)
            .field("row", &self.row)
            .finish_non_exhaustive()
    }
}

impl<R: Read> CsvBatch<R> {
    pub fn from_reader(reader: R) -> Result<Self, BatchError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        let headers = rdr.headers()?.clone();
        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(BatchError::EmptyInput);
        }
        let cols = resolve_columns(&headers)?;
        Ok(CsvBatch {
            records: rdr.into_records(),
            cols,
            row: 0,
        })
    }

    fn candidate(&self, rec: &StringRecord) -> Result<Candidate, RowError> {
        let get = |idx: usize, column: &'static str| {
            rec.get(idx)
                .map(|s| s.trim().to_string())
                .ok_or(RowError::MissingColumn { column })
        };
        let date = get(self.cols.date, "date")?;
        let category = get(self.cols.category, "category")?;
        let amount = get(self.cols.amount, "amount")?;
        let description = self
            .cols
            .description
            .and_then(|i| rec.get(i))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        Ok(Candidate {
            date: Some(date),
            category: Some(category),
            amount: Some(amount),
            description,
        })
    }
}

impl<R: Read> Iterator for CsvBatch<R> {
    type Item = (u64, Result<Candidate, RowError>);

    fn next(&mut self) -> Option<Self::Item> {
        let rec = self.records.next()?;
        self.row += 1;
        let out = match rec {
            Ok(rec) => self.candidate(&rec),
            Err(e) => Err(RowError::MalformedRow {
                detail: e.to_string(),
            }),
        };
        Some((self.row, out))
    }
}
