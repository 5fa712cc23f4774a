//! OTM Entry Use Case
//!
//! Buys an out-of-the-money call or sells an out-of-the-money put chosen by
//! target delta and target days to expiration.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::outcome::{SkipReason, TickOutcome, UseCaseError};
use crate::application::ports::{
    ChainProviderPort, OrderInstruction, OrderPlacementPort, OrderQuantity,
};
use crate::domain::option_chain::{
    ChainSnapshot, ContractSelector, OptionContract, OptionRight, Selection, SelectionError,
};
use crate::domain::shared::Symbol;

/// Delta and DTE targets for OTM entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtmEntryParams {
    /// Target |delta| for calls (0-1).
    pub call_delta: Decimal,
    /// Target DTE for calls.
    pub call_dte: i64,
    /// Target |delta| for puts (0-1).
    pub put_delta: Decimal,
    /// Target DTE for puts.
    pub put_dte: i64,
}

impl OtmEntryParams {
    /// Build from whole-percent deltas (`20` means `0.20`).
    ///
    /// # Errors
    ///
    /// Returns `SelectionError::InvalidParameter` if a percentage is above 100.
    pub fn from_percent(
        call_delta_pct: u32,
        call_dte: i64,
        put_delta_pct: u32,
        put_dte: i64,
    ) -> Result<Self, SelectionError> {
        Ok(Self {
            call_delta: percent_to_delta("call_delta", call_delta_pct)?,
            call_dte,
            put_delta: percent_to_delta("put_delta", put_delta_pct)?,
            put_dte,
        })
    }
}

fn percent_to_delta(name: &'static str, pct: u32) -> Result<Decimal, SelectionError> {
    if pct > 100 {
        return Err(SelectionError::invalid_parameter(
            name,
            format!("must be a percentage in 0..=100, got {pct}"),
        ));
    }
    Ok(Decimal::new(i64::from(pct), 2))
}

/// Use case for delta-targeted single-leg entries.
pub struct OtmEntryUseCase<C, O>
where
    C: ChainProviderPort,
    O: OrderPlacementPort,
{
    chain_provider: Arc<C>,
    order_port: Arc<O>,
    params: OtmEntryParams,
}

impl<C, O> OtmEntryUseCase<C, O>
where
    C: ChainProviderPort,
    O: OrderPlacementPort,
{
    /// Create a new `OtmEntryUseCase`.
    pub const fn new(chain_provider: Arc<C>, order_port: Arc<O>, params: OtmEntryParams) -> Self {
        Self {
            chain_provider,
            order_port,
            params,
        }
    }

    /// Buy one OTM call at the configured delta and DTE.
    pub async fn buy_otm_call(
        &self,
        underlying: &Symbol,
        now: DateTime<Utc>,
    ) -> Result<TickOutcome, UseCaseError> {
        self.enter(
            underlying,
            now,
            OptionRight::Call,
            self.params.call_delta,
            self.params.call_dte,
        )
        .await
    }

    /// Sell one OTM put at the configured delta and DTE.
    pub async fn sell_otm_put(
        &self,
        underlying: &Symbol,
        now: DateTime<Utc>,
    ) -> Result<TickOutcome, UseCaseError> {
        self.enter(
            underlying,
            now,
            OptionRight::Put,
            self.params.put_delta,
            self.params.put_dte,
        )
        .await
    }

    async fn enter(
        &self,
        underlying: &Symbol,
        now: DateTime<Utc>,
        right: OptionRight,
        target_delta: Decimal,
        target_dte: i64,
    ) -> Result<TickOutcome, UseCaseError> {
        let today = now.date_naive();

        let Some(chain) = self.chain_provider.option_chain(underlying, today).await? else {
            warn!(underlying = %underlying, "Option chain not found, skipping tick");
            return Ok(TickOutcome::Skipped(SkipReason::ChainUnavailable));
        };

        let contract = match ContractSelector::select_by_delta(
            &chain,
            today,
            right,
            target_delta,
            target_dte,
        )? {
            Selection::Found(contract) => contract,
            Selection::NotFound(reason) => {
                warn!(
                    underlying = %underlying,
                    %right,
                    %reason,
                    "No contract matched, skipping tick"
                );
                return Ok(TickOutcome::Skipped(SkipReason::NotFound { reason }));
            }
        };
        contract.symbol().validate()?;

        let quantity = match right {
            OptionRight::Call => OrderQuantity::Contracts(1),
            OptionRight::Put => OrderQuantity::Contracts(-1),
        };
        let label = entry_label(&chain, contract, quantity);
        let instruction = OrderInstruction::new(contract.symbol().clone(), quantity, &label, now);

        info!(
            instruction_id = %instruction.id,
            symbol = %instruction.symbol,
            "{label}"
        );
        self.order_port.place_order(instruction.clone()).await?;

        Ok(TickOutcome::Submitted(instruction))
    }
}

/// Order tag: `Stock @ $<spot> | Buy <symbol> (<delta> Delta)`.
fn entry_label(chain: &ChainSnapshot, contract: &OptionContract, quantity: OrderQuantity) -> String {
    let side = if quantity.is_sell() { "Sell" } else { "Buy" };
    let delta = contract
        .delta()
        .map_or_else(|| "n/a".to_string(), |d| d.round_dp(2).to_string());
    format!(
        "Stock @ ${} | {side} {} ({delta} Delta)",
        chain.underlying_price(),
        contract.symbol()
    )
}
