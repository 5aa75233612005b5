pub mod cli;
pub mod core;
pub mod pricing;
pub mod providers;

use crate::core::config::AppConfig;
use crate::providers::eos_rpc::EosRpcProvider;
use anyhow::{Context, Result};
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    Ram,
    Cpu(Option<String>),
    Net(Option<String>),
    All(Option<String>),
}

/// Loads the config, applies the endpoint override and renders the command's output.
pub async fn execute_command(
    command: AppCommand,
    config_path: Option<&str>,
    endpoint: Option<&str>,
) -> Result<String> {
    let mut config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    if let Some(endpoint) = endpoint {
        config.endpoint = endpoint.to_string();
    }
    debug!("Loaded config: {config:#?}");

    let provider = EosRpcProvider::new(&config.endpoint, &config.user_agent)
        .context("Failed to build HTTP client")?;
    info!(endpoint = %provider.base_url(), ?command, "Running command");

    let account = |name: Option<String>| name.unwrap_or_else(|| config.account.clone());
    let work = async {
        match command {
            AppCommand::Ram => cli::prices::ram_price(&provider).await,
            AppCommand::Cpu(name) => cli::prices::cpu_price(&provider, &account(name)).await,
            AppCommand::Net(name) => cli::prices::net_price(&provider, &account(name)).await,
            AppCommand::All(name) => cli::prices::all_prices(&provider, &account(name)).await,
        }
    };

    match config.timeout_secs {
        Some(secs) => tokio::time::timeout(Duration::from_secs(secs), work)
            .await
            .with_context(|| format!("Timed out after {secs}s waiting on {}", config.endpoint))?,
        None => work.await,
    }
}

pub async fn run_command(
    command: AppCommand,
    config_path: Option<&str>,
    endpoint: Option<&str>,
) -> Result<()> {
    let output = execute_command(command, config_path, endpoint).await?;
    println!("{output}");
    Ok(())
}
