// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fmt;
use thiserror::Error;

/// Unvalidated input that may or may not become an expense. Field values
/// arrive as raw text from the CLI or a CSV row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Candidate {
    pub date: Option<String>,
    pub category: Option<String>,
    pub amount: Option<String>,
    pub description: Option<String>,
}

/// A candidate that passed validation, pending id and owner assignment by
/// the store.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidRecord {
    pub date: NaiveDate,
    pub category: String,
    pub amount: Decimal,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("date '{got}' is not a valid calendar date, expected YYYY-MM-DD")]
    InvalidDate { got: String },
    #[error("category must be a non-empty label")]
    InvalidCategory,
    #[error("amount '{got}' must be a non-negative number")]
    InvalidAmount { got: String },
}

impl ValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::InvalidDate { .. } => "date",
            ValidationError::InvalidCategory => "category",
            ValidationError::InvalidAmount { .. } => "amount",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::InvalidDate { .. } => "InvalidDate",
            ValidationError::InvalidCategory => "InvalidCategory",
            ValidationError::InvalidAmount { .. } => "InvalidAmount",
        }
    }
}

/// Every field violation found in one candidate. Batch callers need the full
/// list per row, not just the first failure.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidRecord {
    pub errors: Vec<ValidationError>,
}

impl fmt::Display for InvalidRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msgs: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", msgs.join("; "))
    }
}

impl std::error::Error for InvalidRecord {}

/// Pure check of one candidate record. No side effects, no trimming beyond
/// what is needed to decide validity; description passes through unmodified.
pub fn validate(c: &Candidate) -> Result<ValidRecord, InvalidRecord> {
    let mut errors = Vec::new();

    let date = match c.date.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            Ok(d) => Some(d),
            Err(_) => {
                errors.push(ValidationError::InvalidDate { got: s.to_string() });
                None
            }
        },
        other => {
            errors.push(ValidationError::InvalidDate {
                got: other.unwrap_or_default().to_string(),
            });
            None
        }
    };

    let category = match c.category.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => Some(s.to_string()),
        _ => {
            errors.push(ValidationError::InvalidCategory);
            None
        }
    };

    let amount = match c.amount.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => match s.parse::<Decimal>() {
            Ok(d) if d >= Decimal::ZERO => Some(d),
            _ => {
                errors.push(ValidationError::InvalidAmount { got: s.to_string() });
                None
            }
        },
        other => {
            errors.push(ValidationError::InvalidAmount {
                got: other.unwrap_or_default().to_string(),
            });
            None
        }
    };

    match (date, category, amount) {
        (Some(date), Some(category), Some(amount)) => Ok(ValidRecord {
            date,
            category,
            amount,
            description: c.description.clone(),
        }),
        _ => Err(InvalidRecord { errors }),
    }
}
