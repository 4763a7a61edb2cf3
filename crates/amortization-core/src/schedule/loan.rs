use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::engine::{try_compute_schedule, LedgerRow};
use super::extra_payments::ExtraPayments;
use crate::error::AmortizationError;
use crate::time_value::{check_loan_inputs, standard_installment};
use crate::types::{Money, Rate, PAYOFF_EPSILON};
use crate::AmortizationResult;

/// Validated terms of a single loan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    pub periodic_rate: Rate,
    pub term_periods: u32,
    /// Level installment held constant across the schedule.
    pub standard_installment: Money,
}

impl LoanTerms {
    /// Terms with the installment from the annuity formula.
    pub fn new(principal: Money, periodic_rate: Rate, term_periods: u32) -> AmortizationResult<Self> {
        let installment = standard_installment(principal, periodic_rate, term_periods)?;
        Ok(LoanTerms {
            principal,
            periodic_rate,
            term_periods,
            standard_installment: installment,
        })
    }

    /// Terms with a caller-chosen installment.
    ///
    /// The installment is not checked against the annuity formula; one that is
    /// too small leaves a residual balance at the end of the term.
    pub fn with_installment(
        principal: Money,
        periodic_rate: Rate,
        term_periods: u32,
        installment: Money,
    ) -> AmortizationResult<Self> {
        check_loan_inputs(principal, periodic_rate, term_periods)?;
        if installment < Decimal::ZERO {
            return Err(AmortizationError::invalid(
                "installment",
                "Installment must be non-negative",
            ));
        }
        Ok(LoanTerms {
            principal,
            periodic_rate,
            term_periods,
            standard_installment: installment,
        })
    }

    /// Ledger for these terms; overflow of a growing balance is an error.
    pub fn schedule(&self, extra_payments: &ExtraPayments) -> AmortizationResult<Vec<LedgerRow>> {
        try_compute_schedule(
            self.principal,
            self.periodic_rate,
            self.standard_installment,
            self.term_periods,
            extra_payments,
        )
    }

    /// Interest accrued in the first period.
    pub fn first_period_interest(&self) -> Money {
        self.principal * self.periodic_rate
    }
}

/// Totals over a ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub periods_elapsed: u32,
    pub total_paid: Money,
    pub total_interest: Money,
    pub total_regular_principal: Money,
    pub total_extra_principal: Money,
    pub final_balance: Money,
    pub paid_off: bool,
}

/// Summarise a ledger produced from a loan of `principal`.
///
/// An empty ledger means nothing was owed, so the final balance is whatever
/// was passed in and the loan counts as paid off when that is within a cent.
pub fn summarize(principal: Money, rows: &[LedgerRow]) -> ScheduleSummary {
    let final_balance = rows.last().map_or(principal, |r| r.balance_after);
    let mut summary = ScheduleSummary {
        periods_elapsed: rows.last().map_or(0, |r| r.period),
        final_balance,
        paid_off: final_balance <= PAYOFF_EPSILON,
        ..ScheduleSummary::default()
    };

    for row in rows {
        summary.total_paid += row.total_paid;
        summary.total_interest += row.interest;
        summary.total_regular_principal += row.regular_principal;
        summary.total_extra_principal += row.extra_principal;
    }

    summary
}
