//! Loan amortization with optional extra principal payments.
//!
//! The heart of the crate is [`schedule::compute_schedule`], a pure function
//! turning principal, periodic rate, level installment, term and a sparse
//! map of extra payments into a period-by-period ledger. The rest wraps it:
//! annuity installment, validated inputs, summaries and a baseline comparison.

pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "schedule")]
pub mod schedule;

#[cfg(feature = "comparison")]
pub mod comparison;

pub use error::AmortizationError;
pub use types::*;

/// Standard result type for all amortization operations
pub type AmortizationResult<T> = Result<T, AmortizationError>;
