use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::aligned::{align_schedules, ComparisonRow};
use crate::schedule::builder::schedule_warnings;
use crate::schedule::{summarize, ExtraPayments, ScheduleInput, ScheduleSummary};
use crate::types::*;
use crate::AmortizationResult;

/// Baseline vs accelerated schedule for the same loan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonOutput {
    pub standard_installment: Money,
    pub baseline: ScheduleSummary,
    pub actual: ScheduleSummary,
    pub total_paid_saved: Money,
    pub interest_saved: Money,
    /// Periods to payoff avoided relative to the baseline
    pub periods_saved: u32,
    pub rows: Vec<ComparisonRow>,
}

/// Run the loan with and without its extra payments and report the savings.
pub fn compare_schedules(
    input: &ScheduleInput,
) -> AmortizationResult<ComputationOutput<ComparisonOutput>> {
    let start = Instant::now();

    let terms = input.loan_terms()?;
    let baseline_rows = terms.schedule(&ExtraPayments::new())?;
    let actual_rows = terms.schedule(&input.extra_payments)?;

    let baseline = summarize(terms.principal, &baseline_rows);
    let actual = summarize(terms.principal, &actual_rows);
    let warnings = schedule_warnings(&terms, &input.extra_payments, &actual_rows, &actual);

    let output = ComparisonOutput {
        standard_installment: terms.standard_installment,
        total_paid_saved: baseline.total_paid - actual.total_paid,
        interest_saved: baseline.total_interest - actual.total_interest,
        periods_saved: baseline.periods_elapsed.saturating_sub(actual.periods_elapsed),
        rows: align_schedules(&baseline_rows, &actual_rows),
        baseline,
        actual,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Baseline vs extra-payment amortization comparison",
        &input.assumptions(),
        warnings,
        elapsed,
        output,
    ))
}
