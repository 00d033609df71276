use napi::Result as NapiResult;
use napi_derive::napi;

use buyrent_core::buy_vs_rent::{self, BuyVsRentInput};
use buyrent_core::mortgage::{self, MortgageInput};
use buyrent_core::scenarios::{self, BuyVsRentSensitivityInput};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Full comparison wrapped in the computation envelope.
/// Missing fields in the input JSON take the reference-scenario defaults.
#[napi]
pub fn analyze_buy_vs_rent(input_json: String) -> NapiResult<String> {
    let input: BuyVsRentInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = buy_vs_rent::analyze_buy_vs_rent(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Bare result with no envelope metadata; identical inputs give identical output.
#[napi]
pub fn compute_buy_vs_rent(input_json: String) -> NapiResult<String> {
    let input: BuyVsRentInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = buy_vs_rent::compute_buy_vs_rent(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let input: MortgageInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = mortgage::build_amortization_schedule(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn buy_vs_rent_sensitivity(input_json: String) -> NapiResult<String> {
    let input: BuyVsRentSensitivityInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = scenarios::run_sensitivity(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
