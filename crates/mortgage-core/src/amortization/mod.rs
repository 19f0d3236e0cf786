//! Fixed-rate amortization: the month-by-month schedule generator, the
//! downsampling applied for display, and the derived loan summary.

pub mod sampling;
pub mod schedule;
pub mod summary;

pub use sampling::{sample_every, yearly_sample};
pub use schedule::{
    generate_schedule, AmortizationSchedule, LoanParameters, PeriodRecord, STANDARD_TERMS_YEARS,
};
pub use summary::LoanSummary;
