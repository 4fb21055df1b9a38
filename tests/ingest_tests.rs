// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use spendlens::ingest::{BatchError, CsvBatch, RowError};

#[test]
fn maps_plain_headers() {
    let csv = "date,category,amount,description\n2025-01-02,Food,10.00,lunch\n";
    let batch = CsvBatch::from_reader(csv.as_bytes()).unwrap();
    let rows: Vec<_> = batch.collect();
    assert_eq!(rows.len(), 1);
    let (row, item) = &rows[0];
    assert_eq!(*row, 1);
    let c = item.as_ref().unwrap();
    assert_eq!(c.date.as_deref(), Some("2025-01-02"));
    assert_eq!(c.category.as_deref(), Some("Food"));
    assert_eq!(c.amount.as_deref(), Some("10.00"));
    assert_eq!(c.description.as_deref(), Some("lunch"));
}

#[test]
fn maps_bank_style_header_aliases_case_insensitively() {
    let csv = "Posting Date,Category,Debit,Memo\n2025-01-02,Travel,99.10,taxi\n";
    let batch = CsvBatch::from_reader(csv.as_bytes()).unwrap();
    let (_, item) = batch.into_iter().next().unwrap();
    let c = item.unwrap();
    assert_eq!(c.date.as_deref(), Some("2025-01-02"));
    assert_eq!(c.amount.as_deref(), Some("99.10"));
    assert_eq!(c.description.as_deref(), Some("taxi"));
}

#[test]
fn reports_missing_required_columns() {
    let csv = "date,description\n2025-01-02,whoops\n";
    let err = CsvBatch::from_reader(csv.as_bytes()).unwrap_err();
    match err {
        BatchError::MissingColumns(cols) => {
            assert_eq!(cols, vec!["category".to_string(), "amount".to_string()]);
        }
        other => panic!("expected MissingColumns, got {:?}", other),
    }
}

#[test]
fn rejects_empty_input() {
    let err = CsvBatch::from_reader("".as_bytes()).unwrap_err();
    assert!(matches!(err, BatchError::EmptyInput));
}

#[test]
fn short_row_fails_alone_without_aborting_the_batch() {
    let csv = "date,category,amount\n2025-01-02,Food,10\n2025-01-03,Food\n2025-01-04,Rent,800\n";
    let batch = CsvBatch::from_reader(csv.as_bytes()).unwrap();
    let rows: Vec<_> = batch.collect();
    assert_eq!(rows.len(), 3);
    assert!(rows[0].1.is_ok());
    assert_eq!(
        rows[1].1,
        Err(RowError::MissingColumn { column: "amount" })
    );
    assert!(rows[2].1.is_ok());
    // 1-based data-row numbers, header excluded
    assert_eq!(rows[1].0, 2);
    assert_eq!(rows[2].0, 3);
}

#[test]
fn empty_description_becomes_none() {
    let csv = "date,category,amount,description\n2025-01-02,Food,10.00,   \n";
    let batch = CsvBatch::from_reader(csv.as_bytes()).unwrap();
    let (_, item) = batch.into_iter().next().unwrap();
    assert_eq!(item.unwrap().description, None);
}

#[test]
fn missing_description_column_is_fine() {
    let csv = "date,category,amount\n2025-01-02,Food,10.00\n";
    let batch = CsvBatch::from_reader(csv.as_bytes()).unwrap();
    let (_, item) = batch.into_iter().next().unwrap();
    assert_eq!(item.unwrap().description, None);
}

#[test]
fn field_values_are_trimmed() {
    let csv = "date,category,amount\n 2025-01-02 , Food , 10.00 \n";
    let batch = CsvBatch::from_reader(csv.as_bytes()).unwrap();
    let (_, item) = batch.into_iter().next().unwrap();
    let c = item.unwrap();
    assert_eq!(c.date.as_deref(), Some("2025-01-02"));
    assert_eq!(c.category.as_deref(), Some("Food"));
    assert_eq!(c.amount.as_deref(), Some("10.00"));
}
