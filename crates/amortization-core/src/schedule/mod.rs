pub mod builder;
pub mod engine;
pub mod extra_payments;
pub mod loan;

pub use builder::{
    build_schedule, quote_installment, InstallmentInput, InstallmentOutput, ScheduleInput,
    ScheduleOutput,
};
pub use engine::{compute_schedule, try_compute_schedule, LedgerRow};
pub use extra_payments::ExtraPayments;
pub use loan::{summarize, LoanTerms, ScheduleSummary};
