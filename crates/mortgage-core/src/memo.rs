//! Caller-side memoization of the most recent schedule.
//!
//! A schedule is a pure function of its three inputs, so a caller that
//! recomputes on every parameter change only needs to remember the last
//! input and its result. Changing any input replaces the entry.

use log::trace;
use std::sync::Arc;

use crate::amortization::schedule::{generate_schedule, AmortizationSchedule, LoanParameters};
use crate::types::ComputationOutput;
use crate::MortgageResult;

pub type SharedSchedule = Arc<ComputationOutput<AmortizationSchedule>>;

#[derive(Debug, Default)]
pub struct ScheduleMemo {
    last: Option<(LoanParameters, SharedSchedule)>,
    hits: u64,
    misses: u64,
}

impl ScheduleMemo {
    pub const fn new() -> Self {
        Self {
            last: None,
            hits: 0,
            misses: 0,
        }
    }

    /// Return the cached schedule when `params` equals the last input,
    /// otherwise generate and cache a new one. Failed generations leave the
    /// previous entry untouched.
    pub fn get_or_generate(&mut self, params: &LoanParameters) -> MortgageResult<SharedSchedule> {
        if let Some((cached_params, schedule)) = &self.last {
            if cached_params == params {
                self.hits += 1;
                trace!("schedule memo hit for {params:?}");
                return Ok(Arc::clone(schedule));
            }
        }

        self.misses += 1;
        trace!("schedule memo miss for {params:?}");
        let schedule = Arc::new(generate_schedule(params)?);
        self.last = Some((params.clone(), Arc::clone(&schedule)));
        Ok(schedule)
    }

    /// Input of the cached schedule, if any.
    pub fn cached_params(&self) -> Option<&LoanParameters> {
        self.last.as_ref().map(|(p, _)| p)
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn clear(&mut self) {
        self.last = None;
    }
}
