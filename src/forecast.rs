// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Forecast, MonthKey};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Next-month spending estimate: the mean of the most recent `window` months
/// of history, falling back to a low-confidence answer when there is not
/// enough of it. Never errors.
pub fn predict_next_month(monthly: &BTreeMap<MonthKey, Decimal>, window: usize) -> Forecast {
    let window = window.max(1);
    match monthly.len() {
        0 => Forecast {
            prediction: Decimal::ZERO,
            message: "No expense history yet; forecast has low confidence until more months are recorded.".to_string(),
        },
        1 => {
            let total: Decimal = monthly.values().copied().sum();
            Forecast {
                prediction: total.round_dp(2),
                message: "Only one month of history; using that month's total as a low-confidence estimate.".to_string(),
            }
        }
        n => {
            let used = window.min(n);
            let sum: Decimal = monthly.values().rev().take(used).copied().sum();
            let prediction = (sum / Decimal::from(used as u64)).round_dp(2);
            Forecast {
                prediction,
                message: format!(
                    "Moving average of the most recent {} of {} recorded months.",
                    used, n
                ),
            }
        }
    }
}
