// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use spendlens::validate::{validate, Candidate, ValidationError};

fn candidate(date: &str, category: &str, amount: &str) -> Candidate {
    Candidate {
        date: Some(date.to_string()),
        category: Some(category.to_string()),
        amount: Some(amount.to_string()),
        description: None,
    }
}

#[test]
fn accepts_valid_candidate() {
    let rec = validate(&candidate("2025-03-14", "Groceries", "42.50")).unwrap();
    assert_eq!(rec.date.to_string(), "2025-03-14");
    assert_eq!(rec.category, "Groceries");
    assert_eq!(rec.amount, "42.50".parse::<Decimal>().unwrap());
    assert_eq!(rec.description, None);
}

#[test]
fn accepts_zero_amount() {
    let rec = validate(&candidate("2025-03-14", "Refund", "0")).unwrap();
    assert_eq!(rec.amount, Decimal::ZERO);
}

#[test]
fn passes_description_through_unmodified() {
    let mut c = candidate("2025-03-14", "Dining", "12");
    c.description = Some("  team lunch  ".to_string());
    let rec = validate(&c).unwrap();
    assert_eq!(rec.description.as_deref(), Some("  team lunch  "));
}

#[test]
fn preserves_category_case_and_trims_edges() {
    let rec = validate(&candidate("2025-03-14", "  CoFFee  ", "3")).unwrap();
    assert_eq!(rec.category, "CoFFee");
}

#[test]
fn rejects_unparsable_date() {
    let err = validate(&candidate("2025-13-40", "Groceries", "10")).unwrap_err();
    assert_eq!(err.errors.len(), 1);
    assert_eq!(err.errors[0].code(), "InvalidDate");
    assert_eq!(err.errors[0].field(), "date");
}

#[test]
fn rejects_missing_date() {
    let mut c = candidate("", "Groceries", "10");
    c.date = None;
    let err = validate(&c).unwrap_err();
    assert!(matches!(
        err.errors[0],
        ValidationError::InvalidDate { .. }
    ));
}

#[test]
fn rejects_empty_category() {
    let err = validate(&candidate("2025-03-14", "   ", "10")).unwrap_err();
    assert_eq!(err.errors, vec![ValidationError::InvalidCategory]);
}

#[test]
fn rejects_negative_amount() {
    let err = validate(&candidate("2025-03-14", "Groceries", "-5.00")).unwrap_err();
    assert_eq!(err.errors.len(), 1);
    assert_eq!(err.errors[0].code(), "InvalidAmount");
}

#[test]
fn rejects_non_numeric_amount() {
    let err = validate(&candidate("2025-03-14", "Groceries", "abc")).unwrap_err();
    assert_eq!(err.errors[0].code(), "InvalidAmount");
}

#[test]
fn collects_every_field_violation() {
    let err = validate(&candidate("not-a-date", "", "minus five")).unwrap_err();
    let codes: Vec<&str> = err.errors.iter().map(|e| e.code()).collect();
    assert_eq!(codes, vec!["InvalidDate", "InvalidCategory", "InvalidAmount"]);
    // one message naming all three fields
    let msg = err.to_string();
    assert!(msg.contains("calendar date"));
    assert!(msg.contains("non-empty label"));
    assert!(msg.contains("non-negative number"));
}
