use super::ui;
use crate::core::ChainApi;
use crate::pricing::{self, CORE_SYMBOL, ResourcePrices};
use anyhow::{Context, Result};
use comfy_table::Cell;
use rust_decimal::Decimal;

/// A single resource price ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceLine {
    pub resource: &'static str,
    pub unit: &'static str,
    pub price: Decimal,
}

impl PriceLine {
    fn ram(price: Decimal) -> Self {
        PriceLine {
            resource: "RAM",
            unit: "KB",
            price,
        }
    }

    fn cpu(price: Decimal) -> Self {
        PriceLine {
            resource: "CPU",
            unit: "ms",
            price,
        }
    }

    fn net(price: Decimal) -> Self {
        PriceLine {
            resource: "NET",
            unit: "KB",
            price,
        }
    }
}

pub fn display_as_table(title: &str, lines: &[PriceLine]) -> String {
    let staked = lines.iter().any(|line| line.resource != "RAM");

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Resource"),
        ui::header_cell("Unit"),
        ui::header_cell(&format!("Price ({CORE_SYMBOL})")),
    ]);

    for line in lines {
        table.add_row(vec![
            Cell::new(line.resource),
            Cell::new(format!("1 {}", line.unit)),
            ui::price_cell(line.price),
        ]);
    }

    let mut output = format!(
        "{}\n\n{}",
        ui::style_text(title, ui::StyleType::Title),
        table
    );
    if staked {
        output.push_str(&format!(
            "\n{}",
            ui::style_text(
                &format!("CPU and NET prices are per staked {CORE_SYMBOL}"),
                ui::StyleType::Subtle
            )
        ));
    }
    output
}

impl ResourcePrices {
    pub fn display_as_table(&self) -> String {
        display_as_table(
            &format!("Resource prices for {}", self.account),
            &[
                PriceLine::ram(self.ram_price_kb),
                PriceLine::cpu(self.cpu_price_ms),
                PriceLine::net(self.net_price_kb),
            ],
        )
    }
}

pub async fn ram_price(api: &dyn ChainApi) -> Result<String> {
    let spinner = ui::new_spinner("Fetching RAM market...");
    let result = pricing::fetch_and_compute_ram_price_kb(api).await;
    spinner.finish_and_clear();

    let price = result.context("Failed to compute RAM price")?;
    Ok(display_as_table("RAM market", &[PriceLine::ram(price)]))
}

pub async fn cpu_price(api: &dyn ChainApi, account: &str) -> Result<String> {
    let spinner = ui::new_spinner(&format!("Fetching account {account}..."));
    let result = pricing::fetch_and_compute_cpu_price_ms(api, account).await;
    spinner.finish_and_clear();

    let price = result.with_context(|| format!("Failed to compute CPU price for {account}"))?;
    Ok(display_as_table(
        &format!("CPU price for {account}"),
        &[PriceLine::cpu(price)],
    ))
}

pub async fn net_price(api: &dyn ChainApi, account: &str) -> Result<String> {
    let spinner = ui::new_spinner(&format!("Fetching account {account}..."));
    let result = pricing::fetch_and_compute_net_price_kb(api, account).await;
    spinner.finish_and_clear();

    let price = result.with_context(|| format!("Failed to compute NET price for {account}"))?;
    Ok(display_as_table(
        &format!("NET price for {account}"),
        &[PriceLine::net(price)],
    ))
}

pub async fn all_prices(api: &dyn ChainApi, account: &str) -> Result<String> {
    let spinner = ui::new_spinner(&format!("Fetching RAM market and account {account}..."));
    let result = pricing::fetch_all_prices(api, account).await;
    spinner.finish_and_clear();

    let prices = result.with_context(|| format!("Failed to compute resource prices for {account}"))?;
    Ok(prices.display_as_table())
}
