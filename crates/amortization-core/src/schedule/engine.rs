use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::extra_payments::ExtraPayments;
use crate::error::AmortizationError;
use crate::types::{Money, Period, Rate, PAYOFF_EPSILON};
use crate::AmortizationResult;

/// One elapsed period of an amortization schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRow {
    pub period: Period,
    /// Amount billed this period; only differs from the level installment on
    /// the payoff period.
    pub installment: Money,
    pub interest: Money,
    pub regular_principal: Money,
    /// Extra principal actually applied, after clamping to the balance.
    pub extra_principal: Money,
    pub total_paid: Money,
    pub balance_after: Money,
    pub cumulative_interest: Money,
}

impl LedgerRow {
    /// Balance outstanding when the period opened.
    pub fn balance_before(&self) -> Money {
        self.balance_after + self.regular_principal + self.extra_principal
    }

    pub fn principal_paid(&self) -> Money {
        self.regular_principal + self.extra_principal
    }
}

/// Run the amortization recurrence.
///
/// Each period accrues `balance * rate`, applies `installment - interest` as
/// regular principal and then the extra payment scheduled for that period.
/// On the payoff period the installment shrinks to what is owed, and extra
/// payments are capped at the balance left after the regular principal; any
/// requested excess is dropped. Iteration stops once the balance is at or
/// below [`PAYOFF_EPSILON`] or after `term` periods, whichever comes first.
///
/// No validation happens here: an installment too small to amortize the loan
/// leaves a residual balance after `term` periods. If the balance grows past
/// what a `Decimal` can hold, the ledger ends before the overflowing period;
/// use [`try_compute_schedule`] to have that reported as an error.
pub fn compute_schedule(
    principal: Money,
    rate: Rate,
    installment: Money,
    term: u32,
    extra_payments: &ExtraPayments,
) -> Vec<LedgerRow> {
    match run(principal, rate, installment, term, extra_payments) {
        Ok(rows) => rows,
        Err((rows, _)) => rows,
    }
}

/// [`compute_schedule`] with arithmetic overflow reported as
/// [`AmortizationError::Overflow`] naming the period it happened in.
pub fn try_compute_schedule(
    principal: Money,
    rate: Rate,
    installment: Money,
    term: u32,
    extra_payments: &ExtraPayments,
) -> AmortizationResult<Vec<LedgerRow>> {
    run(principal, rate, installment, term, extra_payments).map_err(|(_, period)| {
        AmortizationError::Overflow {
            context: format!("schedule period {period}"),
        }
    })
}

/// Ledger so far plus the overflowing period on failure.
type PartialLedger = (Vec<LedgerRow>, Period);

fn run(
    principal: Money,
    rate: Rate,
    installment: Money,
    term: u32,
    extra_payments: &ExtraPayments,
) -> Result<Vec<LedgerRow>, PartialLedger> {
    let mut rows = Vec::new();
    let mut balance = principal;
    let mut cumulative_interest = Decimal::ZERO;

    for period in 1..=term {
        if balance <= PAYOFF_EPSILON {
            break;
        }

        let row = next_row(
            period,
            balance,
            cumulative_interest,
            rate,
            installment,
            extra_payments.get(period),
        );
        match row {
            Some((row, unclamped_balance)) => {
                balance = unclamped_balance;
                cumulative_interest = row.cumulative_interest;
                rows.push(row);
            }
            None => return Err((rows, period)),
        }
    }

    Ok(rows)
}

/// One period of the recurrence; None when any step overflows.
fn next_row(
    period: Period,
    balance: Money,
    cumulative_interest: Money,
    rate: Rate,
    installment: Money,
    requested_extra: Money,
) -> Option<(LedgerRow, Money)> {
    let interest = balance.checked_mul(rate)?;
    let mut billed = installment;
    let mut regular_principal = installment.checked_sub(interest)?;

    // Payoff period: bill only what is left
    if regular_principal > balance {
        regular_principal = balance;
        billed = regular_principal.checked_add(interest)?;
    }

    let mut extra = requested_extra;
    if regular_principal.checked_add(extra)? > balance {
        extra = balance.checked_sub(regular_principal)?;
    }

    let remaining = balance.checked_sub(regular_principal.checked_add(extra)?)?;

    let row = LedgerRow {
        period,
        installment: billed,
        interest,
        regular_principal,
        extra_principal: extra,
        total_paid: billed.checked_add(extra)?,
        balance_after: remaining.max(Decimal::ZERO),
        cumulative_interest: cumulative_interest.checked_add(interest)?,
    };
    Some((row, remaining))
}
