//! RAM, CPU and NET price calculations
//!
//! The `compute_*` functions are pure and work on snapshots the caller already
//! holds. The `fetch_and_compute_*` wrappers pull a fresh snapshot through a
//! [`ChainApi`] first and surface fetch failures as
//! [`PricingError::UpstreamUnavailable`].

use crate::core::asset::Asset;
use crate::core::chain::{AccountResources, ChainApi, RamMarketTable, ResourceLimit};
use crate::core::error::PricingError;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;
use tracing::{debug, instrument};

pub const RAM_SYMBOL: &str = "RAM";
pub const CORE_SYMBOL: &str = "EOS";

const RAM_RATIO_DECIMALS: u32 = 8;
const BYTES_PER_KB: u64 = 1024;
const MICROSECONDS_PER_MS: u64 = 1000;

/// All three prices for one account, as shown by the `all` command.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourcePrices {
    pub account: String,
    pub ram_price_kb: Decimal,
    pub cpu_price_ms: Decimal,
    pub net_price_kb: Decimal,
}

fn parse_amount(
    value: &str,
    field: &'static str,
    symbol: &'static str,
) -> Result<Decimal, PricingError> {
    Asset::from_str(value)
        .and_then(|asset| asset.expect_symbol(symbol))
        .map_err(|source| PricingError::MalformedAmount { field, source })
}

fn checked_div(lhs: Decimal, rhs: Decimal, what: &str) -> Result<Decimal, PricingError> {
    if rhs.is_zero() {
        return Err(PricingError::invalid(format!("{what} is zero")));
    }
    lhs.checked_div(rhs)
        .ok_or_else(|| PricingError::invalid(format!("{what} out of range")))
}

/// Price of 1 KB of RAM in EOS.
///
/// The per-byte ratio is rounded to 8 decimals before scaling to kilobytes,
/// so the result may carry more than 8 fractional digits.
pub fn compute_ram_price_kb(market: &RamMarketTable) -> Result<Decimal, PricingError> {
    let row = market
        .rows
        .first()
        .ok_or_else(|| PricingError::invalid("table eosio eosio rammarket is missing rows"))?;

    let base_balance = parse_amount(&row.base.balance, "rows[0].base.balance", RAM_SYMBOL)?;
    let quote_balance = parse_amount(&row.quote.balance, "rows[0].quote.balance", CORE_SYMBOL)?;

    let price_byte = checked_div(quote_balance, base_balance, "RAM base balance")?
        .round_dp_with_strategy(RAM_RATIO_DECIMALS, RoundingStrategy::MidpointAwayFromZero);
    let price_kb = price_byte
        .checked_mul(Decimal::from(BYTES_PER_KB))
        .ok_or_else(|| PricingError::invalid("RAM price out of range"))?;

    debug!(%base_balance, %quote_balance, %price_kb, "Computed RAM price");
    Ok(price_kb)
}

fn limit_per_weight(
    account: &AccountResources,
    limit: Option<&ResourceLimit>,
    weight: Option<&str>,
    resource: &'static str,
    weight_field: &'static str,
) -> Result<Decimal, PricingError> {
    let weight = weight.ok_or_else(|| {
        PricingError::invalid(format!(
            "account {} is missing total_resources",
            account.account_name
        ))
    })?;
    let limit = limit.ok_or_else(|| {
        PricingError::invalid(format!(
            "account {} is missing {resource}_limit",
            account.account_name
        ))
    })?;
    if limit.max < 0 {
        return Err(PricingError::invalid(format!(
            "account {} has an unlimited {resource} allowance",
            account.account_name
        )));
    }

    let weight = parse_amount(weight, weight_field, CORE_SYMBOL)?;
    checked_div(
        Decimal::from(limit.max),
        weight,
        &format!("{resource} weight"),
    )
}

/// Price of 1 ms of CPU per staked EOS.
pub fn compute_cpu_price_ms(account: &AccountResources) -> Result<Decimal, PricingError> {
    let per_weight = limit_per_weight(
        account,
        account.cpu_limit.as_ref(),
        account
            .total_resources
            .as_ref()
            .map(|r| r.cpu_weight.as_str()),
        "cpu",
        "total_resources.cpu_weight",
    )?;
    let price_ms = per_weight / Decimal::from(MICROSECONDS_PER_MS);

    debug!(account = %account.account_name, %price_ms, "Computed CPU price");
    Ok(price_ms)
}

/// Price of 1 KB of NET bandwidth per staked EOS.
pub fn compute_net_price_kb(account: &AccountResources) -> Result<Decimal, PricingError> {
    let per_weight = limit_per_weight(
        account,
        account.net_limit.as_ref(),
        account
            .total_resources
            .as_ref()
            .map(|r| r.net_weight.as_str()),
        "net",
        "total_resources.net_weight",
    )?;
    let price_kb = per_weight / Decimal::from(BYTES_PER_KB);

    debug!(account = %account.account_name, %price_kb, "Computed NET price");
    Ok(price_kb)
}

#[instrument(name = "RamPrice", skip(api))]
pub async fn fetch_and_compute_ram_price_kb(api: &dyn ChainApi) -> Result<Decimal, PricingError> {
    let market = api.fetch_ram_market().await?;
    compute_ram_price_kb(&market)
}

#[instrument(name = "CpuPrice", skip(api))]
pub async fn fetch_and_compute_cpu_price_ms(
    api: &dyn ChainApi,
    account_name: &str,
) -> Result<Decimal, PricingError> {
    let account = api.fetch_account(account_name).await?;
    compute_cpu_price_ms(&account)
}

#[instrument(name = "NetPrice", skip(api))]
pub async fn fetch_and_compute_net_price_kb(
    api: &dyn ChainApi,
    account_name: &str,
) -> Result<Decimal, PricingError> {
    let account = api.fetch_account(account_name).await?;
    compute_net_price_kb(&account)
}

/// Fetches the RAM market and the account concurrently and prices all three resources.
pub async fn fetch_all_prices(
    api: &dyn ChainApi,
    account_name: &str,
) -> Result<ResourcePrices, PricingError> {
    let (market, account) =
        futures::try_join!(api.fetch_ram_market(), api.fetch_account(account_name))?;

    Ok(ResourcePrices {
        account: account.account_name.clone(),
        ram_price_kb: compute_ram_price_kb(&market)?,
        cpu_price_ms: compute_cpu_price_ms(&account)?,
        net_price_kb: compute_net_price_kb(&account)?,
    })
}
