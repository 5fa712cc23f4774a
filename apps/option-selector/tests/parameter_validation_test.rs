//! Parameter validation tables.
//!
//! Malformed parameters are errors, never clamped; well-formed calls that
//! match nothing are `NotFound`.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::str::FromStr;

use chrono::NaiveDate;
use option_selector::config::load_config_from_string;
use option_selector::{
    ChainFilter, ChainSnapshot, ContractSelector, ErrorCode, NotFoundReason, OptionRight,
    SelectionError, WheelParams,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use test_case::test_case;

fn now() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
}

fn empty_chain() -> ChainSnapshot {
    ChainSnapshot::empty("SPY", dec!(500), now())
}

fn rejected_parameter<T: std::fmt::Debug>(result: Result<T, SelectionError>) -> &'static str {
    match result {
        Err(SelectionError::InvalidParameter { name, .. }) => name,
        other => panic!("expected InvalidParameter, got {other:?}"),
    }
}

#[test_case(dec!(-0.01), 30, "target_delta" ; "negative delta")]
#[test_case(dec!(1.01), 30, "target_delta" ; "delta above one")]
#[test_case(dec!(0.30), -1, "target_dte" ; "negative dte")]
fn select_by_delta_rejects(target_delta: Decimal, target_dte: i64, name: &str) {
    let chain = empty_chain();
    let result =
        ContractSelector::select_by_delta(&chain, now(), OptionRight::Call, target_delta, target_dte);
    assert_eq!(rejected_parameter(result), name);
}

#[test_case(dec!(0) ; "zero delta")]
#[test_case(dec!(1) ; "unit delta")]
fn select_by_delta_accepts_bounds(target_delta: Decimal) {
    let chain = empty_chain();
    let selection =
        ContractSelector::select_by_delta(&chain, now(), OptionRight::Put, target_delta, 0).unwrap();
    assert_eq!(selection.not_found_reason(), Some(&NotFoundReason::EmptyChain));
}

#[test_case(dec!(0), 30, "target_strike" ; "zero strike")]
#[test_case(dec!(-5), 30, "target_strike" ; "negative strike")]
#[test_case(dec!(450), -3, "min_dte" ; "negative min dte")]
fn select_by_strike_threshold_rejects(target_strike: Decimal, min_dte: i64, name: &str) {
    let chain = empty_chain();
    let result = ContractSelector::select_by_strike_threshold(
        &chain,
        now(),
        OptionRight::Put,
        target_strike,
        min_dte,
    );
    assert_eq!(rejected_parameter(result), name);
}

#[test_case(0, 55, 65, "strike_window_count" ; "zero window")]
#[test_case(30, -1, 65, "min_dte" ; "negative min dte")]
#[test_case(30, 66, 65, "max_dte" ; "inverted range")]
fn chain_filter_rejects(window: u32, min_dte: i64, max_dte: i64, name: &str) {
    assert_eq!(rejected_parameter(ChainFilter::new(window, min_dte, max_dte)), name);
}

#[test_case(30, 0, 0 ; "zero width range")]
#[test_case(1, 55, 65 ; "single strike each side")]
fn chain_filter_accepts(window: u32, min_dte: i64, max_dte: i64) {
    let filter = ChainFilter::new(window, min_dte, max_dte).unwrap();
    assert_eq!(filter.dte_range(), (min_dte, max_dte));
}

#[test_case("CALL", OptionRight::Call)]
#[test_case("call", OptionRight::Call)]
#[test_case("C", OptionRight::Call)]
#[test_case("Put", OptionRight::Put)]
#[test_case("p", OptionRight::Put)]
fn option_right_parses(input: &str, expected: OptionRight) {
    assert_eq!(OptionRight::from_str(input).unwrap(), expected);
}

#[test_case("" ; "empty")]
#[test_case("straddle" ; "unknown word")]
#[test_case("X" ; "unknown letter")]
fn option_right_rejects(input: &str) {
    let err = OptionRight::from_str(input).unwrap_err();
    assert!(matches!(err, SelectionError::UnknownRight { .. }));
    assert_eq!(err.code(), ErrorCode::UnknownRight);
}

#[test_case(dec!(0), 30, dec!(0.2), "otm_threshold" ; "zero threshold")]
#[test_case(dec!(1), 30, dec!(0.2), "otm_threshold" ; "threshold of one")]
#[test_case(dec!(0.05), 30, dec!(0), "put_allocation" ; "zero allocation")]
#[test_case(dec!(0.05), 30, dec!(1.5), "put_allocation" ; "allocation above one")]
#[test_case(dec!(0.05), -1, dec!(0.2), "min_dte" ; "negative min dte")]
fn wheel_params_reject(otm_threshold: Decimal, min_dte: i64, put_allocation: Decimal, name: &str) {
    let params = WheelParams {
        otm_threshold,
        min_dte,
        put_allocation,
    };
    assert_eq!(rejected_parameter(params.validate()), name);
}

#[test_case("selection: { put_delta: 100 }", "selection.put_delta" ; "put delta of 100")]
#[test_case("selection: { call_dte: -5 }", "selection.call_dte" ; "negative call dte")]
#[test_case("filter: { strike_window_count: 0 }", "strike_window_count" ; "zero window")]
#[test_case("wheel: { put_allocation: 0 }", "put_allocation" ; "zero allocation")]
#[test_case("strategy: { underlyings: [SPY240419P00500000] }", "equity" ; "option as underlying")]
fn config_rejects(yaml: &str, needle: &str) {
    let err = load_config_from_string(yaml).unwrap_err();
    assert_eq!(err.code(), ErrorCode::ConfigInvalid);
    assert!(err.to_string().contains(needle), "{err} should mention {needle}");
}
