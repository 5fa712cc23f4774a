//! Wheel Use Case
//!
//! Rotates between cash-secured puts and covered calls:
//!
//! 1. Flat: sell an OTM put a fixed percentage below spot.
//! 2. Assigned (holding only the shares): sell OTM calls a fixed percentage
//!    above spot against the shares.
//! 3. Holding options: wait for expiry or assignment.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::outcome::{SkipReason, TickOutcome, UseCaseError};
use crate::application::ports::{
    ChainProviderError, ChainProviderPort, OrderInstruction, OrderPlacementPort, OrderQuantity,
};
use crate::domain::option_chain::{
    ContractSelector, NotFoundReason, OptionContract, OptionRight, Selection, SelectionError,
};
use crate::domain::shared::Symbol;

/// Wheel parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WheelParams {
    /// Fractional distance from spot for the target strike (0.051 = 5.1%).
    pub otm_threshold: Decimal,
    /// Expiries must be strictly later than this many days out.
    pub min_dte: i64,
    /// Portfolio weight to short when selling puts.
    pub put_allocation: Decimal,
}

impl Default for WheelParams {
    fn default() -> Self {
        Self {
            otm_threshold: dec!(0.051),
            min_dte: 30,
            put_allocation: dec!(0.2),
        }
    }
}

impl WheelParams {
    /// Check parameter ranges.
    ///
    /// # Errors
    ///
    /// Returns `SelectionError::InvalidParameter` for an out-of-range value.
    pub fn validate(&self) -> Result<(), SelectionError> {
        if self.otm_threshold <= Decimal::ZERO || self.otm_threshold >= Decimal::ONE {
            return Err(SelectionError::invalid_parameter(
                "otm_threshold",
                format!("must be within (0, 1), got {}", self.otm_threshold),
            ));
        }
        if self.put_allocation <= Decimal::ZERO || self.put_allocation > Decimal::ONE {
            return Err(SelectionError::invalid_parameter(
                "put_allocation",
                format!("must be within (0, 1], got {}", self.put_allocation),
            ));
        }
        if self.min_dte < 0 {
            return Err(SelectionError::invalid_parameter(
                "min_dte",
                format!("must be >= 0, got {}", self.min_dte),
            ));
        }
        Ok(())
    }
}

/// What the portfolio holds for the wheel's underlying.
///
/// Supplied by the host's portfolio accounting each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelHoldings {
    /// Shares of the underlying held (negative when short).
    pub underlying_shares: Decimal,
    /// Open option contracts on the underlying (absolute count).
    pub option_contracts: u32,
}

impl WheelHoldings {
    /// Nothing held.
    #[must_use]
    pub fn is_flat(&self) -> bool {
        self.underlying_shares.is_zero() && self.option_contracts == 0
    }

    /// Only the underlying is held (the put was assigned).
    #[must_use]
    pub fn holds_only_underlying(&self) -> bool {
        !self.underlying_shares.is_zero() && self.option_contracts == 0
    }
}

/// Use case for the wheel rotation.
pub struct WheelUseCase<C, O>
where
    C: ChainProviderPort,
    O: OrderPlacementPort,
{
    chain_provider: Arc<C>,
    order_port: Arc<O>,
    params: WheelParams,
}

impl<C, O> WheelUseCase<C, O>
where
    C: ChainProviderPort,
    O: OrderPlacementPort,
{
    /// Create a new `WheelUseCase`.
    ///
    /// # Errors
    ///
    /// Returns `SelectionError::InvalidParameter` if `params` are out of range.
    pub fn new(
        chain_provider: Arc<C>,
        order_port: Arc<O>,
        params: WheelParams,
    ) -> Result<Self, SelectionError> {
        params.validate()?;
        Ok(Self {
            chain_provider,
            order_port,
            params,
        })
    }

    /// Run one wheel decision.
    pub async fn on_tick(
        &self,
        underlying: &Symbol,
        holdings: WheelHoldings,
        market_open: bool,
        now: DateTime<Utc>,
    ) -> Result<TickOutcome, UseCaseError> {
        if holdings.is_flat() {
            if !market_open {
                debug!(underlying = %underlying, "Market closed, wheel idle");
                return Ok(TickOutcome::Skipped(SkipReason::MarketClosed));
            }
            return self.sell_put(underlying, now).await;
        }

        if holdings.holds_only_underlying() {
            return self
                .sell_covered_call(underlying, holdings.underlying_shares, now)
                .await;
        }

        debug!(
            underlying = %underlying,
            option_contracts = holdings.option_contracts,
            "Option position open, wheel idle"
        );
        Ok(TickOutcome::Skipped(SkipReason::HoldingPosition))
    }

    async fn sell_put(
        &self,
        underlying: &Symbol,
        now: DateTime<Utc>,
    ) -> Result<TickOutcome, UseCaseError> {
        let today = now.date_naive();
        let Some(chain) = self.chain_provider.option_chain(underlying, today).await? else {
            warn!(underlying = %underlying, "Option chain not found, skipping tick");
            return Ok(TickOutcome::Skipped(SkipReason::ChainUnavailable));
        };

        let spot = chain.underlying_price();
        let target_strike = spot * (Decimal::ONE - self.params.otm_threshold);
        let selection = ContractSelector::select_by_strike_threshold(
            &chain,
            today,
            OptionRight::Put,
            target_strike,
            self.params.min_dte,
        )?;

        let contract = match selection {
            Selection::Found(contract) => contract,
            Selection::NotFound(reason) => return Ok(skip_not_found(underlying, reason)),
        };

        let quantity = OrderQuantity::PortfolioTarget(-self.params.put_allocation);
        self.submit(contract, quantity, spot, now).await
    }

    async fn sell_covered_call(
        &self,
        underlying: &Symbol,
        shares: Decimal,
        now: DateTime<Utc>,
    ) -> Result<TickOutcome, UseCaseError> {
        let today = now.date_naive();
        let Some(chain) = self.chain_provider.option_chain(underlying, today).await? else {
            warn!(underlying = %underlying, "Option chain not found, skipping tick");
            return Ok(TickOutcome::Skipped(SkipReason::ChainUnavailable));
        };

        let spot = chain.underlying_price();
        let target_strike = spot * (Decimal::ONE + self.params.otm_threshold);
        let selection = ContractSelector::select_by_strike_threshold(
            &chain,
            today,
            OptionRight::Call,
            target_strike,
            self.params.min_dte,
        )?;

        let contract = match selection {
            Selection::Found(contract) => contract,
            Selection::NotFound(reason) => return Ok(skip_not_found(underlying, reason)),
        };

        let Some(lots) = shares.checked_div(Decimal::from(contract.multiplier())) else {
            warn!(
                underlying = %underlying,
                symbol = %contract.symbol(),
                "Contract multiplier is zero, cannot size covered call"
            );
            return Err(ChainProviderError::Malformed {
                underlying: underlying.to_string(),
                message: format!("contract {} has multiplier 0", contract.symbol()),
            }
            .into());
        };
        let contracts = lots.floor().to_i64().unwrap_or(0);
        if contracts <= 0 {
            warn!(
                underlying = %underlying,
                shares = %shares,
                multiplier = contract.multiplier(),
                "Not enough shares to cover a call"
            );
            return Ok(TickOutcome::Skipped(SkipReason::InsufficientShares));
        }

        self.submit(contract, OrderQuantity::Contracts(-contracts), spot, now)
            .await
    }

    async fn submit(
        &self,
        contract: &OptionContract,
        quantity: OrderQuantity,
        spot: Decimal,
        now: DateTime<Utc>,
    ) -> Result<TickOutcome, UseCaseError> {
        contract.symbol().validate()?;

        let label = format!(
            "Stock @ ${spot} | Sell {} ({} {} strike)",
            contract.symbol(),
            contract.right(),
            contract.strike()
        );
        let instruction = OrderInstruction::new(contract.symbol().clone(), quantity, &label, now);

        info!(
            instruction_id = %instruction.id,
            symbol = %instruction.symbol,
            quantity = ?instruction.quantity,
            "{label}"
        );
        self.order_port.place_order(instruction.clone()).await?;

        Ok(TickOutcome::Submitted(instruction))
    }
}

fn skip_not_found(underlying: &Symbol, reason: NotFoundReason) -> TickOutcome {
    warn!(underlying = %underlying, %reason, "No wheel contract matched, skipping tick");
    TickOutcome::Skipped(SkipReason::NotFound { reason })
}
