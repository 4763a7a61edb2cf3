pub mod aligned;
pub mod savings;

pub use aligned::{align_schedules, ComparisonRow};
pub use savings::{compare_schedules, ComparisonOutput};
