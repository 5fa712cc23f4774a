//! Contract Selector Service
//!
//! Picks the single best contract from a chain snapshot.
//!
//! Two searches are provided:
//!
//! - [`ContractSelector::select_by_delta`]: expiry closest to `now + target_dte`
//!   first, then `| |delta| - target |` within that expiry. Expiry proximity
//!   strictly dominates delta proximity; the two are never blended.
//! - [`ContractSelector::select_by_strike_threshold`]: earliest expiry strictly
//!   after `now + min_dte`, then the strike closest to the target on the
//!   out-of-the-money side.
//!
//! Ties never depend on feed order: equally close expiries resolve to the
//! earliest date, equally close deltas to the lowest strike, and anything
//! still tied to the lowest symbol.

use std::cmp::Ordering;

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use tracing::debug;

use crate::domain::option_chain::{
    ChainSnapshot, NotFoundReason, OptionContract, OptionRight, Selection, SelectionError,
};

/// Stateless contract selection over a borrowed snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContractSelector;

impl ContractSelector {
    /// Select the contract whose expiry is closest to `now + target_dte` and,
    /// within that expiry, whose `|delta|` is closest to `target_delta`.
    ///
    /// Contracts without a delta are kept as candidates but rank behind
    /// every priced contract.
    ///
    /// # Errors
    ///
    /// Returns `SelectionError::InvalidParameter` if `target_dte` is negative
    /// or `target_delta` is outside `[0, 1]`.
    pub fn select_by_delta(
        chain: &ChainSnapshot,
        now: NaiveDate,
        right: OptionRight,
        target_delta: Decimal,
        target_dte: i64,
    ) -> Result<Selection<'_>, SelectionError> {
        validate_delta(target_delta)?;
        let target_expiry = offset_date(now, target_dte, "target_dte")?;

        if chain.is_empty() {
            return Ok(Selection::NotFound(NotFoundReason::EmptyChain));
        }

        let candidates: Vec<&OptionContract> = chain.of_right(right).collect();

        let Some(expiry) = candidates
            .iter()
            .map(|c| c.expiry())
            .min_by_key(|expiry| ((*expiry - target_expiry).num_days().abs(), *expiry))
        else {
            return Ok(Selection::NotFound(NotFoundReason::NoContractsOfRight {
                right,
            }));
        };

        let best = candidates
            .into_iter()
            .filter(|c| c.expiry() == expiry)
            .min_by(|a, b| compare_delta_fit(a, b, target_delta));

        debug!(
            underlying = %chain.underlying(),
            %right,
            %target_expiry,
            %expiry,
            selected = ?best.map(|c| c.symbol().as_str()),
            "Delta-targeted selection"
        );

        Ok(best.map_or(
            Selection::NotFound(NotFoundReason::NoContractsOfRight { right }),
            Selection::Found,
        ))
    }

    /// Select from the earliest expiry strictly later than `now + min_dte`
    /// the contract closest to `target_strike` on the OTM-safe side:
    /// the highest put strike `<= target_strike`, or the lowest call
    /// strike `>= target_strike`.
    ///
    /// The expiry is chosen across the whole snapshot before the right and
    /// strike constraints are applied.
    ///
    /// # Errors
    ///
    /// Returns `SelectionError::InvalidParameter` if `min_dte` is negative or
    /// `target_strike` is not positive.
    pub fn select_by_strike_threshold(
        chain: &ChainSnapshot,
        now: NaiveDate,
        right: OptionRight,
        target_strike: Decimal,
        min_dte: i64,
    ) -> Result<Selection<'_>, SelectionError> {
        if target_strike <= Decimal::ZERO {
            return Err(SelectionError::invalid_parameter(
                "target_strike",
                format!("must be > 0, got {target_strike}"),
            ));
        }
        let bound = offset_date(now, min_dte, "min_dte")?;

        if chain.is_empty() {
            return Ok(Selection::NotFound(NotFoundReason::EmptyChain));
        }

        let Some(expiry) = chain
            .contracts()
            .iter()
            .map(OptionContract::expiry)
            .filter(|expiry| *expiry > bound)
            .min()
        else {
            return Ok(Selection::NotFound(NotFoundReason::NoQualifyingExpiry {
                after: bound,
            }));
        };

        let best = chain
            .of_right(right)
            .filter(|c| c.expiry() == expiry)
            .filter(|c| match right {
                OptionRight::Put => c.strike() <= target_strike,
                OptionRight::Call => c.strike() >= target_strike,
            })
            .min_by(|a, b| {
                let by_strike = match right {
                    OptionRight::Put => b.strike().cmp(&a.strike()),
                    OptionRight::Call => a.strike().cmp(&b.strike()),
                };
                by_strike.then_with(|| a.symbol().cmp(b.symbol()))
            });

        debug!(
            underlying = %chain.underlying(),
            %right,
            %target_strike,
            %expiry,
            selected = ?best.map(|c| c.symbol().as_str()),
            "Strike-targeted selection"
        );

        Ok(best.map_or(
            Selection::NotFound(NotFoundReason::NoStrikeBeyondThreshold {
                right,
                target_strike,
                expiry,
            }),
            Selection::Found,
        ))
    }
}

/// Distance between a contract's `|delta|` and the target; `None` when unpriced.
fn delta_distance(contract: &OptionContract, target_delta: Decimal) -> Option<Decimal> {
    contract
        .delta()
        .map(|delta| (delta.abs() - target_delta).abs())
}

/// Order by delta distance (unpriced last), then strike, then symbol.
fn compare_delta_fit(a: &OptionContract, b: &OptionContract, target_delta: Decimal) -> Ordering {
    let by_distance = match (delta_distance(a, target_delta), delta_distance(b, target_delta)) {
        (Some(da), Some(db)) => da.cmp(&db),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };

    by_distance
        .then_with(|| a.strike().cmp(&b.strike()))
        .then_with(|| a.symbol().cmp(b.symbol()))
}

fn validate_delta(target_delta: Decimal) -> Result<(), SelectionError> {
    if target_delta < Decimal::ZERO || target_delta > Decimal::ONE {
        return Err(SelectionError::invalid_parameter(
            "target_delta",
            format!("must be within [0, 1], got {target_delta}"),
        ));
    }
    Ok(())
}

fn offset_date(now: NaiveDate, days: i64, name: &'static str) -> Result<NaiveDate, SelectionError> {
    if days < 0 {
        return Err(SelectionError::invalid_parameter(
            name,
            format!("must be >= 0, got {days}"),
        ));
    }
    Duration::try_days(days)
        .and_then(|offset| now.checked_add_signed(offset))
        .ok_or_else(|| SelectionError::invalid_parameter(name, format!("{days} days is out of range")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn now() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 18).unwrap()
    }

    fn contract(right: OptionRight, days: i64, strike: Decimal, delta: Option<Decimal>) -> OptionContract {
        let expiry = now() + Duration::days(days);
        let symbol = format!(
            "SPY{}{}{:08}",
            expiry.format("%y%m%d"),
            right.occ_code(),
            (strike * dec!(1000)).trunc().mantissa()
        );
        let contract = OptionContract::new(symbol, "SPY", right, expiry, strike);
        match delta {
            Some(delta) => contract.with_delta(delta),
            None => contract,
        }
    }

    fn chain(contracts: Vec<OptionContract>) -> ChainSnapshot {
        ChainSnapshot::new("SPY", dec!(100), now(), contracts)
    }

    #[test]
    fn select_by_delta_worked_example() {
        let snapshot = chain(vec![
            contract(OptionRight::Put, 28, dec!(90), Some(dec!(-0.15))),
            contract(OptionRight::Put, 28, dec!(95), Some(dec!(-0.30))),
            contract(OptionRight::Put, 35, dec!(90), Some(dec!(-0.20))),
        ]);

        let selection =
            ContractSelector::select_by_delta(&snapshot, now(), OptionRight::Put, dec!(0.20), 30)
                .unwrap();

        let selected = selection.contract().unwrap();
        assert_eq!(selected.strike(), dec!(90));
        assert_eq!(selected.days_to_expiry(now()), 28);
    }

    #[test]
    fn select_by_delta_expiry_dominates_delta() {
        let snapshot = chain(vec![
            contract(OptionRight::Call, 33, dec!(120), Some(dec!(0.01))),
            contract(OptionRight::Call, 40, dec!(105), Some(dec!(0.30))),
        ]);

        let selection =
            ContractSelector::select_by_delta(&snapshot, now(), OptionRight::Call, dec!(0.30), 30)
                .unwrap();

        assert_eq!(selection.contract().unwrap().strike(), dec!(120));
    }

    #[test]
    fn select_by_delta_equidistant_expiries_take_earliest() {
        let snapshot = chain(vec![
            contract(OptionRight::Call, 35, dec!(100), Some(dec!(0.30))),
            contract(OptionRight::Call, 25, dec!(110), Some(dec!(0.10))),
        ]);

        let selection =
            ContractSelector::select_by_delta(&snapshot, now(), OptionRight::Call, dec!(0.30), 30)
                .unwrap();

        assert_eq!(selection.contract().unwrap().days_to_expiry(now()), 25);
    }

    #[test]
    fn select_by_delta_tie_prefers_lower_strike() {
        let higher = contract(OptionRight::Put, 30, dec!(95), Some(dec!(-0.25)));
        let lower = contract(OptionRight::Put, 30, dec!(85), Some(dec!(-0.15)));
        let snapshot = chain(vec![higher, lower]);

        for _ in 0..3 {
            let selection =
                ContractSelector::select_by_delta(&snapshot, now(), OptionRight::Put, dec!(0.20), 30)
                    .unwrap();
            assert_eq!(selection.contract().unwrap().strike(), dec!(85));
        }
    }

    #[test]
    fn select_by_delta_missing_greeks_rank_last() {
        let snapshot = chain(vec![
            contract(OptionRight::Call, 30, dec!(100), None),
            contract(OptionRight::Call, 30, dec!(130), Some(dec!(0.02))),
        ]);

        let selection =
            ContractSelector::select_by_delta(&snapshot, now(), OptionRight::Call, dec!(0.50), 30)
                .unwrap();
        assert_eq!(selection.contract().unwrap().strike(), dec!(130));
    }

    #[test]
    fn select_by_delta_all_unpriced_still_selects() {
        let snapshot = chain(vec![
            contract(OptionRight::Call, 30, dec!(110), None),
            contract(OptionRight::Call, 30, dec!(100), None),
        ]);

        let selection =
            ContractSelector::select_by_delta(&snapshot, now(), OptionRight::Call, dec!(0.50), 30)
                .unwrap();
        assert_eq!(selection.contract().unwrap().strike(), dec!(100));
    }

    #[test]
    fn select_by_delta_zero_delta_is_a_candidate() {
        let snapshot = chain(vec![contract(OptionRight::Call, 30, dec!(200), Some(Decimal::ZERO))]);

        let selection =
            ContractSelector::select_by_delta(&snapshot, now(), OptionRight::Call, dec!(0.30), 30)
                .unwrap();
        assert!(selection.is_found());
    }

    #[test]
    fn select_by_delta_missing_right_is_not_found() {
        let snapshot = chain(vec![contract(OptionRight::Call, 30, dec!(100), Some(dec!(0.5)))]);

        let selection =
            ContractSelector::select_by_delta(&snapshot, now(), OptionRight::Put, dec!(0.20), 30)
                .unwrap();
        assert_eq!(
            selection,
            Selection::NotFound(NotFoundReason::NoContractsOfRight {
                right: OptionRight::Put
            })
        );
    }

    #[test]
    fn select_by_delta_empty_chain() {
        let snapshot = chain(Vec::new());
        let selection =
            ContractSelector::select_by_delta(&snapshot, now(), OptionRight::Put, dec!(0.20), 30)
                .unwrap();
        assert_eq!(selection, Selection::NotFound(NotFoundReason::EmptyChain));
    }

    #[test]
    fn select_by_delta_rejects_bad_parameters() {
        let snapshot = chain(Vec::new());
        assert!(matches!(
            ContractSelector::select_by_delta(&snapshot, now(), OptionRight::Put, dec!(1.2), 30),
            Err(SelectionError::InvalidParameter { name: "target_delta", .. })
        ));
        assert!(matches!(
            ContractSelector::select_by_delta(&snapshot, now(), OptionRight::Put, dec!(0.2), -1),
            Err(SelectionError::InvalidParameter { name: "target_dte", .. })
        ));
    }

    #[test]
    fn select_by_strike_threshold_put_takes_highest_below_target() {
        let snapshot = chain(vec![
            contract(OptionRight::Put, 45, dec!(94), None),
            contract(OptionRight::Put, 45, dec!(90), None),
            contract(OptionRight::Put, 45, dec!(96), None),
            contract(OptionRight::Put, 45, dec!(95), None),
        ]);

        let selection = ContractSelector::select_by_strike_threshold(
            &snapshot,
            now(),
            OptionRight::Put,
            dec!(94.9),
            30,
        )
        .unwrap();
        assert_eq!(selection.contract().unwrap().strike(), dec!(94));
    }

    #[test]
    fn select_by_strike_threshold_call_takes_lowest_above_target() {
        let snapshot = chain(vec![
            contract(OptionRight::Call, 45, dec!(110), None),
            contract(OptionRight::Call, 45, dec!(104), None),
            contract(OptionRight::Call, 45, dec!(106), None),
        ]);

        let selection = ContractSelector::select_by_strike_threshold(
            &snapshot,
            now(),
            OptionRight::Call,
            dec!(105.1),
            30,
        )
        .unwrap();
        assert_eq!(selection.contract().unwrap().strike(), dec!(106));
    }

    #[test]
    fn select_by_strike_threshold_uses_earliest_expiry_after_bound() {
        let snapshot = chain(vec![
            contract(OptionRight::Put, 30, dec!(95), None),
            contract(OptionRight::Put, 31, dec!(90), None),
            contract(OptionRight::Put, 32, dec!(95), None),
        ]);

        let selection = ContractSelector::select_by_strike_threshold(
            &snapshot,
            now(),
            OptionRight::Put,
            dec!(95),
            30,
        )
        .unwrap();
        let selected = selection.contract().unwrap();
        assert_eq!(selected.days_to_expiry(now()), 31);
        assert_eq!(selected.strike(), dec!(90));
    }

    #[test]
    fn select_by_strike_threshold_no_qualifying_expiry() {
        let snapshot = chain(vec![contract(OptionRight::Put, 30, dec!(95), None)]);

        let selection = ContractSelector::select_by_strike_threshold(
            &snapshot,
            now(),
            OptionRight::Put,
            dec!(95),
            30,
        )
        .unwrap();
        assert_eq!(
            selection,
            Selection::NotFound(NotFoundReason::NoQualifyingExpiry {
                after: now() + Duration::days(30)
            })
        );
    }

    #[test]
    fn select_by_strike_threshold_nothing_on_safe_side() {
        let snapshot = chain(vec![contract(OptionRight::Call, 40, dec!(100), None)]);

        let selection = ContractSelector::select_by_strike_threshold(
            &snapshot,
            now(),
            OptionRight::Call,
            dec!(105),
            30,
        )
        .unwrap();
        assert!(matches!(
            selection.not_found_reason(),
            Some(NotFoundReason::NoStrikeBeyondThreshold { .. })
        ));
    }

    #[test]
    fn select_by_strike_threshold_expiry_chosen_across_rights() {
        // The earliest qualifying expiry only lists calls, so no put is found.
        let snapshot = chain(vec![
            contract(OptionRight::Call, 35, dec!(100), None),
            contract(OptionRight::Put, 42, dec!(90), None),
        ]);

        let selection = ContractSelector::select_by_strike_threshold(
            &snapshot,
            now(),
            OptionRight::Put,
            dec!(95),
            30,
        )
        .unwrap();
        assert!(!selection.is_found());
    }

    #[test]
    fn select_by_strike_threshold_rejects_bad_parameters() {
        let snapshot = chain(Vec::new());
        assert!(
            ContractSelector::select_by_strike_threshold(
                &snapshot,
                now(),
                OptionRight::Put,
                Decimal::ZERO,
                30
            )
            .is_err()
        );
        assert!(
            ContractSelector::select_by_strike_threshold(
                &snapshot,
                now(),
                OptionRight::Put,
                dec!(95),
                -5
            )
            .is_err()
        );
    }
}
