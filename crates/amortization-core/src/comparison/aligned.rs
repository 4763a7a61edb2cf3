use serde::{Deserialize, Serialize};

use crate::schedule::LedgerRow;
use crate::types::{Money, Period};

/// Baseline and accelerated ledgers side by side for one period.
///
/// A schedule that has already paid off contributes zeros.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub period: Period,
    pub baseline_balance: Money,
    pub actual_balance: Money,
    pub baseline_cumulative_interest: Money,
    pub actual_cumulative_interest: Money,
    pub baseline_total_paid: Money,
    pub actual_total_paid: Money,
    pub actual_installment: Money,
    pub actual_extra_principal: Money,
}

/// Join two ledgers on period, covering every period either one reaches.
pub fn align_schedules(baseline: &[LedgerRow], actual: &[LedgerRow]) -> Vec<ComparisonRow> {
    let last_period = baseline
        .iter()
        .chain(actual)
        .map(|r| r.period)
        .max()
        .unwrap_or(0);

    let mut base_iter = baseline.iter().peekable();
    let mut actual_iter = actual.iter().peekable();
    let mut rows = Vec::with_capacity(last_period as usize);

    for period in 1..=last_period {
        let mut row = ComparisonRow {
            period,
            ..ComparisonRow::default()
        };

        if let Some(b) = base_iter.next_if(|r| r.period == period) {
            row.baseline_balance = b.balance_after;
            row.baseline_cumulative_interest = b.cumulative_interest;
            row.baseline_total_paid = b.total_paid;
        }
        if let Some(a) = actual_iter.next_if(|r| r.period == period) {
            row.actual_balance = a.balance_after;
            row.actual_cumulative_interest = a.cumulative_interest;
            row.actual_total_paid = a.total_paid;
            row.actual_installment = a.installment;
            row.actual_extra_principal = a.extra_principal;
        }

        rows.push(row);
    }

    rows
}
