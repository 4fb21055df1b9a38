// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{AggregateSummary, Expense, MonthKey};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

/// Count, total, and mean transaction size. Pure over whatever snapshot of
/// the store the caller passes in.
pub fn summary(expenses: &[Expense]) -> AggregateSummary {
    let count = expenses.len();
    let total: Decimal = expenses.iter().map(|e| e.amount).sum();
    let average = if count == 0 {
        Decimal::ZERO
    } else {
        (total / Decimal::from(count as u64)).round_dp(2)
    };
    AggregateSummary {
        count,
        total_spending: total,
        average_transaction: average,
    }
}

/// Sum per exact category string; keys are the distinct categories present.
pub fn by_category(expenses: &[Expense]) -> HashMap<String, Decimal> {
    let mut totals = HashMap::new();
    for e in expenses {
        *totals.entry(e.category.clone()).or_insert(Decimal::ZERO) += e.amount;
    }
    totals
}

/// Sum per calendar month; the BTreeMap keeps months in chronological order
/// for the forecast's "most recent N" selection.
pub fn by_month(expenses: &[Expense]) -> BTreeMap<MonthKey, Decimal> {
    let mut totals = BTreeMap::new();
    for e in expenses {
        *totals.entry(MonthKey::from(e.date)).or_insert(Decimal::ZERO) += e.amount;
    }
    totals
}
