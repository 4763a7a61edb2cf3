use napi::Result as NapiResult;
use napi_derive::napi;

use amortization_core::comparison;
use amortization_core::schedule::{self, InstallmentInput, ScheduleInput};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

#[napi]
pub fn standard_installment(input_json: String) -> NapiResult<String> {
    let input: InstallmentInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = schedule::quote_installment(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn build_schedule(input_json: String) -> NapiResult<String> {
    let input: ScheduleInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = schedule::build_schedule(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn compare_schedules(input_json: String) -> NapiResult<String> {
    let input: ScheduleInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = comparison::compare_schedules(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
