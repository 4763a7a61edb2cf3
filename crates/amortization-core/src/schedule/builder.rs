use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::engine::LedgerRow;
use super::extra_payments::ExtraPayments;
use super::loan::{summarize, LoanTerms, ScheduleSummary};
use crate::error::AmortizationError;
use crate::types::*;
use crate::AmortizationResult;

/// Input for a single amortization schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleInput {
    pub principal: Money,
    pub periodic_rate: Rate,
    pub term_periods: u32,
    /// Overrides the annuity installment when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installment: Option<Money>,
    #[serde(default)]
    pub extra_payments: ExtraPayments,
}

impl ScheduleInput {
    /// Validate the input and resolve the loan terms it describes.
    pub fn loan_terms(&self) -> AmortizationResult<LoanTerms> {
        validate_extra_payments(&self.extra_payments)?;
        match self.installment {
            Some(installment) => LoanTerms::with_installment(
                self.principal,
                self.periodic_rate,
                self.term_periods,
                installment,
            ),
            None => LoanTerms::new(self.principal, self.periodic_rate, self.term_periods),
        }
    }

    pub(crate) fn assumptions(&self) -> serde_json::Value {
        serde_json::json!({
            "principal": self.principal.to_string(),
            "periodic_rate": self.periodic_rate.to_string(),
            "term_periods": self.term_periods,
            "installment_source": if self.installment.is_some() { "caller" } else { "annuity" },
            "extra_payment_count": self.extra_payments.len(),
        })
    }
}

/// Schedule plus its totals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleOutput {
    pub standard_installment: Money,
    pub summary: ScheduleSummary,
    pub rows: Vec<LedgerRow>,
}

/// Input for quoting the level installment of a loan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallmentInput {
    pub principal: Money,
    pub periodic_rate: Rate,
    pub term_periods: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallmentOutput {
    pub standard_installment: Money,
    /// Sum of every installment over the full term, final period clamped
    pub total_of_installments: Money,
    pub total_interest: Money,
}

/// Quote the level installment for a loan without extra payments.
pub fn quote_installment(
    input: &InstallmentInput,
) -> AmortizationResult<ComputationOutput<InstallmentOutput>> {
    let start = Instant::now();

    let terms = LoanTerms::new(input.principal, input.periodic_rate, input.term_periods)?;
    let rows = terms.schedule(&ExtraPayments::new())?;
    let summary = summarize(terms.principal, &rows);

    let output = InstallmentOutput {
        standard_installment: terms.standard_installment,
        total_of_installments: summary.total_paid,
        total_interest: summary.total_interest,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Level annuity installment",
        &serde_json::json!({
            "principal": input.principal.to_string(),
            "periodic_rate": input.periodic_rate.to_string(),
            "term_periods": input.term_periods,
        }),
        Vec::new(),
        elapsed,
        output,
    ))
}

/// Build the period-by-period schedule for a loan with optional extra payments.
pub fn build_schedule(
    input: &ScheduleInput,
) -> AmortizationResult<ComputationOutput<ScheduleOutput>> {
    let start = Instant::now();

    let terms = input.loan_terms()?;
    let rows = terms.schedule(&input.extra_payments)?;
    let summary = summarize(terms.principal, &rows);
    let warnings = schedule_warnings(&terms, &input.extra_payments, &rows, &summary);

    let output = ScheduleOutput {
        standard_installment: terms.standard_installment,
        summary,
        rows,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Level-installment amortization with extra principal payments",
        &input.assumptions(),
        warnings,
        elapsed,
        output,
    ))
}

pub(crate) fn validate_extra_payments(extra_payments: &ExtraPayments) -> AmortizationResult<()> {
    for (period, amount) in extra_payments.iter() {
        if period == 0 {
            return Err(AmortizationError::invalid(
                "extra_payments",
                "Periods are numbered from 1",
            ));
        }
        if amount < Decimal::ZERO {
            return Err(AmortizationError::invalid(
                "extra_payments",
                format!("Extra payment for period {period} must be non-negative"),
            ));
        }
    }
    Ok(())
}

/// Non-fatal conditions worth surfacing alongside a schedule.
pub(crate) fn schedule_warnings(
    terms: &LoanTerms,
    extra_payments: &ExtraPayments,
    rows: &[LedgerRow],
    summary: &ScheduleSummary,
) -> Vec<String> {
    let mut warnings = Vec::new();

    if terms.principal > PAYOFF_EPSILON
        && terms.standard_installment <= terms.first_period_interest()
    {
        warnings.push(format!(
            "Installment {} does not cover first-period interest {}; the balance will not decrease",
            terms.standard_installment,
            terms.first_period_interest()
        ));
    }

    for row in rows {
        let requested = extra_payments.get(row.period);
        if row.extra_principal < requested {
            warnings.push(format!(
                "Period {}: extra payment reduced from {} to {} to avoid overpaying",
                row.period, requested, row.extra_principal
            ));
        }
    }

    for (period, amount) in extra_payments.iter() {
        if amount.is_zero() {
            continue;
        }
        if period > terms.term_periods {
            warnings.push(format!(
                "Extra payment for period {period} is beyond the {}-period term and was ignored",
                terms.term_periods
            ));
        } else if period > summary.periods_elapsed && summary.paid_off {
            warnings.push(format!(
                "Extra payment for period {period} falls after payoff in period {} and was not applied",
                summary.periods_elapsed
            ));
        }
    }

    if !summary.paid_off {
        warnings.push(format!(
            "Installment does not amortize the loan within {} periods; residual balance {}",
            terms.term_periods, summary.final_balance
        ));
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn zero_rate_input() -> ScheduleInput {
        ScheduleInput {
            principal: dec!(1200),
            periodic_rate: Decimal::ZERO,
            term_periods: 12,
            installment: None,
            extra_payments: ExtraPayments::new(),
        }
    }

    #[test]
    fn test_build_schedule_baseline() {
        let result = build_schedule(&zero_rate_input()).unwrap();
        let sched = &result.result;
        assert_eq!(sched.standard_installment, dec!(100));
        assert_eq!(sched.rows.len(), 12);
        assert!(sched.summary.paid_off);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_clamped_extra_is_warned() {
        let mut input = zero_rate_input();
        input.extra_payments.insert(1, dec!(1200));
        let result = build_schedule(&input).unwrap();
        assert_eq!(result.result.rows.len(), 1);
        assert!(result.warnings.iter().any(|w| w.contains("reduced from 1200 to 1100")));
    }

    #[test]
    fn test_extra_after_payoff_is_warned() {
        let mut input = zero_rate_input();
        input.extra_payments.insert(1, dec!(1100));
        input.extra_payments.insert(5, dec!(50));
        let result = build_schedule(&input).unwrap();
        assert_eq!(result.result.summary.periods_elapsed, 1);
        assert!(result.warnings.iter().any(|w| w.contains("period 5 falls after payoff")));
    }

    #[test]
    fn test_extra_beyond_term_is_warned() {
        let mut input = zero_rate_input();
        input.extra_payments.insert(13, dec!(50));
        let result = build_schedule(&input).unwrap();
        assert_eq!(result.result.rows.len(), 12);
        assert!(result.warnings.iter().any(|w| w.contains("beyond the 12-period term")));
    }

    #[test]
    fn test_residual_balance_is_warned() {
        let mut input = zero_rate_input();
        input.installment = Some(dec!(90));
        let result = build_schedule(&input).unwrap();
        assert_eq!(result.result.summary.final_balance, dec!(120));
        assert!(!result.result.summary.paid_off);
        assert!(result.warnings.iter().any(|w| w.contains("residual balance 120")));
    }

    #[test]
    fn test_installment_below_interest_is_warned() {
        let input = ScheduleInput {
            principal: dec!(1000),
            periodic_rate: dec!(0.10),
            term_periods: 3,
            installment: Some(dec!(50)),
            extra_payments: ExtraPayments::new(),
        };
        let result = build_schedule(&input).unwrap();
        assert!(result.warnings.iter().any(|w| w.contains("does not cover first-period interest")));
    }

    #[test]
    fn test_period_zero_extra_rejected() {
        let mut input = zero_rate_input();
        input.extra_payments.insert(0, dec!(10));
        assert!(matches!(
            build_schedule(&input),
            Err(AmortizationError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_negative_extra_rejected() {
        let mut input = zero_rate_input();
        input.extra_payments.insert(3, dec!(-10));
        assert!(build_schedule(&input).is_err());
    }

    #[test]
    fn test_quote_installment() {
        let input = InstallmentInput {
            principal: dec!(1200),
            periodic_rate: Decimal::ZERO,
            term_periods: 12,
        };
        let result = quote_installment(&input).unwrap();
        assert_eq!(result.result.standard_installment, dec!(100));
        assert_eq!(result.result.total_of_installments, dec!(1200));
        assert_eq!(result.result.total_interest, Decimal::ZERO);
    }

    #[test]
    fn test_input_deserializes_without_optional_fields() {
        let input: ScheduleInput = serde_json::from_str(
            r#"{"principal": "50000", "periodic_rate": "0.015", "term_periods": 48}"#,
        )
        .unwrap();
        assert!(input.installment.is_none());
        assert!(input.extra_payments.is_empty());
    }
}
