//! Chain Filter Service
//!
//! Shapes the subscribed option universe so the host only streams contracts
//! near the money and inside an expiration window.

use std::collections::BTreeSet;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::option_chain::{ChainSnapshot, OptionContract, SelectionError};

/// Standard monthly options expire on the third Friday of the month, or on
/// the Thursday before it when that Friday is an exchange holiday.
#[must_use]
pub fn is_standard_monthly_expiry(date: NaiveDate) -> bool {
    match date.weekday() {
        Weekday::Fri => is_third_friday(date) && !is_exchange_holiday(date),
        Weekday::Thu => date
            .succ_opt()
            .is_some_and(|friday| is_third_friday(friday) && is_exchange_holiday(friday)),
        _ => false,
    }
}

fn is_third_friday(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Fri && (15..=21).contains(&date.day())
}

/// Only Good Friday and Juneteenth can land on a third Friday; every other
/// full-day exchange holiday is pinned to a Monday, Thursday or a date outside 15..=21.
fn is_exchange_holiday(date: NaiveDate) -> bool {
    good_friday(date.year()) == Some(date) || is_juneteenth_observed(date)
}

fn is_juneteenth_observed(date: NaiveDate) -> bool {
    // Observed on Friday the 18th when the 19th is a Saturday.
    date.year() >= 2022
        && date.month() == 6
        && date.weekday() == Weekday::Fri
        && matches!(date.day(), 18 | 19)
}

fn good_friday(year: i32) -> Option<NaiveDate> {
    easter_sunday(year)?.checked_sub_days(Days::new(2))
}

/// Gregorian Easter (anonymous computus).
fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year.rem_euclid(19);
    let b = year.div_euclid(100);
    let c = year.rem_euclid(100);
    let h = (19 * a + b - b / 4 - (b - (b + 8) / 25 + 1) / 3 + 15).rem_euclid(30);
    let l = (32 + 2 * (b % 4) + 2 * (c / 4) - h - c % 4).rem_euclid(7);
    let m = (a + 11 * h + 22 * l) / 451;
    let month = u32::try_from((h + l - 7 * m + 114) / 31).ok()?;
    let day = u32::try_from((h + l - 7 * m + 114) % 31 + 1).ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Strike-window and expiration-window filter for an option universe.
///
/// The expiration window is applied first and the strike window is ranked
/// over the strikes that survive it, which makes the filter idempotent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainFilter {
    /// Strikes kept on each side of the at-the-money strike.
    strike_window_count: u32,
    /// Inclusive lower bound on days to expiration.
    min_dte: i64,
    /// Inclusive upper bound on days to expiration.
    max_dte: i64,
    /// Keep non-monthly (weekly) expirations.
    include_weeklys: bool,
}

impl ChainFilter {
    /// Create a filter that keeps weekly expirations.
    ///
    /// # Errors
    ///
    /// Returns `SelectionError::InvalidParameter` if the window is empty or
    /// the DTE bounds are negative or inverted.
    pub fn new(strike_window_count: u32, min_dte: i64, max_dte: i64) -> Result<Self, SelectionError> {
        if strike_window_count == 0 {
            return Err(SelectionError::invalid_parameter(
                "strike_window_count",
                "must be >= 1",
            ));
        }
        if min_dte < 0 {
            return Err(SelectionError::invalid_parameter(
                "min_dte",
                format!("must be >= 0, got {min_dte}"),
            ));
        }
        if max_dte < min_dte {
            return Err(SelectionError::invalid_parameter(
                "max_dte",
                format!("must be >= min_dte ({min_dte}), got {max_dte}"),
            ));
        }

        Ok(Self {
            strike_window_count,
            min_dte,
            max_dte,
            include_weeklys: true,
        })
    }

    /// Keep or drop weekly expirations.
    #[must_use]
    pub const fn include_weeklys(mut self, include: bool) -> Self {
        self.include_weeklys = include;
        self
    }

    /// Strikes kept on each side of the at-the-money strike.
    #[must_use]
    pub const fn strike_window_count(&self) -> u32 {
        self.strike_window_count
    }

    /// Inclusive DTE bounds.
    #[must_use]
    pub const fn dte_range(&self) -> (i64, i64) {
        (self.min_dte, self.max_dte)
    }

    /// Filter a raw universe. Output keeps input order; an empty result is valid.
    #[must_use]
    pub fn filter<'a>(
        &self,
        universe: &'a [OptionContract],
        spot: Decimal,
        as_of: NaiveDate,
    ) -> Vec<&'a OptionContract> {
        let in_window: Vec<&OptionContract> = universe
            .iter()
            .filter(|c| self.accepts_expiry(c.expiry(), as_of))
            .collect();

        let strikes: Vec<Decimal> = in_window
            .iter()
            .map(|c| c.strike())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let Some((low, high)) = self.strike_bounds(&strikes, spot) else {
            return Vec::new();
        };

        in_window
            .into_iter()
            .filter(|c| c.strike() >= low && c.strike() <= high)
            .collect()
    }

    /// Filter a snapshot against its own spot price and date.
    #[must_use]
    pub fn apply(&self, snapshot: &ChainSnapshot) -> ChainSnapshot {
        let kept = self
            .filter(
                snapshot.contracts(),
                snapshot.underlying_price(),
                snapshot.as_of(),
            )
            .into_iter()
            .cloned()
            .collect();
        snapshot.with_contracts(kept)
    }

    fn accepts_expiry(&self, expiry: NaiveDate, as_of: NaiveDate) -> bool {
        let dte = (expiry - as_of).num_days();
        (self.min_dte..=self.max_dte).contains(&dte)
            && (self.include_weeklys || is_standard_monthly_expiry(expiry))
    }

    /// Lowest and highest strike of the window around the at-the-money strike.
    ///
    /// `strikes` must be ascending and distinct. Equidistant strikes resolve
    /// to the lower one.
    fn strike_bounds(&self, strikes: &[Decimal], spot: Decimal) -> Option<(Decimal, Decimal)> {
        let (atm, _) = strikes
            .iter()
            .enumerate()
            .min_by_key(|(_, strike)| (**strike - spot).abs())?;

        let n = self.strike_window_count as usize;
        let low = atm.saturating_sub(n);
        let high = atm.saturating_add(n).min(strikes.len() - 1);
        Some((strikes[low], strikes[high]))
    }
}
