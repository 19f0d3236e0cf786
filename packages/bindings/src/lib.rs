use std::sync::Mutex;

use mortgage_core::amortization::LoanParameters;
use mortgage_core::memo::{ScheduleMemo, SharedSchedule};
use napi::Result as NapiResult;
use napi_derive::napi;

/// Most recent schedule, so a UI re-rendering with unchanged inputs does not
/// recompute it.
static SCHEDULE_MEMO: Mutex<ScheduleMemo> = Mutex::new(ScheduleMemo::new());

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn schedule_for(input_json: &str) -> NapiResult<SharedSchedule> {
    let params: LoanParameters = serde_json::from_str(input_json).map_err(to_napi_error)?;
    let mut memo = SCHEDULE_MEMO.lock().map_err(to_napi_error)?;
    memo.get_or_generate(&params).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Amortization
// ---------------------------------------------------------------------------

#[napi]
pub fn generate_schedule(input_json: String) -> NapiResult<String> {
    let output = schedule_for(&input_json)?;
    serde_json::to_string(&*output).map_err(to_napi_error)
}

#[napi]
pub fn yearly_schedule(input_json: String) -> NapiResult<String> {
    let output = schedule_for(&input_json)?;
    serde_json::to_string(&output.result.yearly).map_err(to_napi_error)
}

#[napi]
pub fn loan_summary(input_json: String) -> NapiResult<String> {
    let output = schedule_for(&input_json)?;
    serde_json::to_string(&output.result.summary).map_err(to_napi_error)
}
