use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::AmortizationError;
use crate::types::{Money, Rate};
use crate::AmortizationResult;

/// Convert a percentage as typed by a user (1.5) into a fractional rate (0.015).
pub fn rate_from_percent(percent: Decimal) -> Rate {
    percent / dec!(100)
}

/// Compounding factor `(1 + rate)^periods`.
pub fn compound_factor(rate: Rate, periods: u32) -> AmortizationResult<Decimal> {
    (Decimal::ONE + rate)
        .checked_powi(i64::from(periods))
        .ok_or_else(|| AmortizationError::Overflow {
            context: format!("compound factor (1 + {rate})^{periods}"),
        })
}

/// Reject loans the annuity formula is not defined for.
pub(crate) fn check_loan_inputs(principal: Money, rate: Rate, term: u32) -> AmortizationResult<()> {
    if principal < Decimal::ZERO {
        return Err(AmortizationError::invalid(
            "principal",
            "Principal must be non-negative",
        ));
    }
    if rate < Decimal::ZERO {
        return Err(AmortizationError::invalid(
            "periodic_rate",
            "Periodic rate must be non-negative",
        ));
    }
    if term == 0 {
        return Err(AmortizationError::invalid(
            "term_periods",
            "Term must be at least 1 period",
        ));
    }
    Ok(())
}

/// Level installment that fully repays `principal` over `term` periods.
///
/// Uses the annuity formula `P * r * (1+r)^n / ((1+r)^n - 1)` when the rate is
/// positive and straight-line `P / n` when it is zero.
pub fn standard_installment(principal: Money, rate: Rate, term: u32) -> AmortizationResult<Money> {
    check_loan_inputs(principal, rate, term)?;

    if rate.is_zero() {
        return Ok(principal / Decimal::from(term));
    }

    let factor = compound_factor(rate, term)?;
    let denominator = factor - Decimal::ONE;
    if denominator.is_zero() {
        return Err(AmortizationError::DivisionByZero {
            context: "annuity factor".into(),
        });
    }

    principal
        .checked_mul(rate)
        .and_then(|v| v.checked_mul(factor))
        .map(|v| v / denominator)
        .ok_or_else(|| AmortizationError::Overflow {
            context: "standard installment".into(),
        })
}
