//! Option Contract Value Object

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::OptionRight;
use crate::domain::shared::{DomainError, Symbol};

const fn default_multiplier() -> u32 {
    100
}

/// One option instrument as published in a chain snapshot.
///
/// `delta` is attached by the external pricing model before the snapshot
/// reaches the selector; it is absent for contracts the model has not priced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionContract {
    /// OCC symbol used to place orders.
    symbol: Symbol,
    /// Underlying symbol.
    underlying: Symbol,
    /// Call or put.
    right: OptionRight,
    /// Expiration date.
    expiry: NaiveDate,
    /// Strike price.
    strike: Decimal,
    /// Signed delta (negative for puts), when priced.
    #[serde(default)]
    delta: Option<Decimal>,
    /// Contract multiplier (typically 100 for equity options).
    #[serde(default = "default_multiplier")]
    multiplier: u32,
}

impl OptionContract {
    /// Create a new option contract without greeks.
    #[must_use]
    pub fn new(
        symbol: impl Into<Symbol>,
        underlying: impl Into<Symbol>,
        right: OptionRight,
        expiry: NaiveDate,
        strike: Decimal,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            underlying: underlying.into(),
            right,
            expiry,
            strike,
            delta: None,
            multiplier: default_multiplier(),
        }
    }

    /// Create a call option contract.
    #[must_use]
    pub fn call(
        symbol: impl Into<Symbol>,
        underlying: impl Into<Symbol>,
        expiry: NaiveDate,
        strike: Decimal,
    ) -> Self {
        Self::new(symbol, underlying, OptionRight::Call, expiry, strike)
    }

    /// Create a put option contract.
    #[must_use]
    pub fn put(
        symbol: impl Into<Symbol>,
        underlying: impl Into<Symbol>,
        expiry: NaiveDate,
        strike: Decimal,
    ) -> Self {
        Self::new(symbol, underlying, OptionRight::Put, expiry, strike)
    }

    /// Build a contract from its OCC symbol alone (no greeks).
    ///
    /// Contract listings without market data carry only the symbol; the
    /// right, expiry and strike are all encoded in it.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidValue` if the symbol is not OCC formatted.
    pub fn from_occ_symbol(symbol: impl Into<Symbol>) -> Result<Self, DomainError> {
        let symbol: Symbol = symbol.into();
        let Some(suffix) = symbol.occ_suffix() else {
            return Err(DomainError::invalid_value(
                "symbol",
                format!("{symbol} is not an OCC option symbol"),
            ));
        };

        let (date_part, rest) = suffix.split_at(6);
        let expiry = NaiveDate::parse_from_str(&format!("20{date_part}"), "%Y%m%d")
            .map_err(|e| {
                DomainError::invalid_value("expiry", format!("{symbol}: bad date {date_part}: {e}"))
            })?;

        let mut chars = rest.chars();
        let right = chars
            .next()
            .and_then(OptionRight::from_occ_code)
            .ok_or_else(|| DomainError::invalid_value("right", format!("{symbol}: bad right")))?;

        let strike_thousandths: i64 = chars.as_str().parse().map_err(|e| {
            DomainError::invalid_value("strike", format!("{symbol}: bad strike: {e}"))
        })?;
        let strike = Decimal::new(strike_thousandths, 3).normalize();

        let underlying = symbol.underlying();
        Ok(Self::new(symbol, underlying, right, expiry, strike))
    }

    /// Attach a delta from the pricing model.
    #[must_use]
    pub const fn with_delta(mut self, delta: Decimal) -> Self {
        self.delta = Some(delta);
        self
    }

    /// Set a custom multiplier.
    #[must_use]
    pub const fn with_multiplier(mut self, multiplier: u32) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Get the OCC symbol.
    #[must_use]
    pub const fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Get the underlying symbol.
    #[must_use]
    pub const fn underlying(&self) -> &Symbol {
        &self.underlying
    }

    /// Get the option right.
    #[must_use]
    pub const fn right(&self) -> OptionRight {
        self.right
    }

    /// Get the expiration date.
    #[must_use]
    pub const fn expiry(&self) -> NaiveDate {
        self.expiry
    }

    /// Get the strike price.
    #[must_use]
    pub const fn strike(&self) -> Decimal {
        self.strike
    }

    /// Get the signed delta, if priced.
    #[must_use]
    pub const fn delta(&self) -> Option<Decimal> {
        self.delta
    }

    /// Get the contract multiplier.
    #[must_use]
    pub const fn multiplier(&self) -> u32 {
        self.multiplier
    }

    /// Check if this is a call option.
    #[must_use]
    pub const fn is_call(&self) -> bool {
        matches!(self.right, OptionRight::Call)
    }

    /// Check if this is a put option.
    #[must_use]
    pub const fn is_put(&self) -> bool {
        matches!(self.right, OptionRight::Put)
    }

    /// Whole calendar days from `as_of` to expiry (negative once expired).
    #[must_use]
    pub fn days_to_expiry(&self, as_of: NaiveDate) -> i64 {
        (self.expiry - as_of).num_days()
    }
}
