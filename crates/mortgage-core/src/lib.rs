pub mod amortization;
pub mod error;
pub mod memo;
pub mod time_value;
pub mod types;

pub use amortization::{
    generate_schedule, AmortizationSchedule, LoanParameters, LoanSummary, PeriodRecord,
};
pub use error::MortgageError;
pub use memo::ScheduleMemo;
pub use types::*;

/// Standard result type for all mortgage operations
pub type MortgageResult<T> = Result<T, MortgageError>;
