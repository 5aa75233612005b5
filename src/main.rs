use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use eos_market_info::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Chain API base URL, overrides the configured endpoint
    #[arg(short, long, global = true)]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for eos_market_info::AppCommand {
    fn from(cmd: Commands) -> eos_market_info::AppCommand {
        match cmd {
            Commands::Ram => eos_market_info::AppCommand::Ram,
            Commands::Cpu { account } => eos_market_info::AppCommand::Cpu(account),
            Commands::Net { account } => eos_market_info::AppCommand::Net(account),
            Commands::All { account } => eos_market_info::AppCommand::All(account),
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Price of 1 KB of RAM
    Ram,
    /// Price of 1 ms of CPU per staked EOS
    Cpu {
        /// Account to price, defaults to the configured account
        account: Option<String>,
    },
    /// Price of 1 KB of NET bandwidth per staked EOS
    Net {
        /// Account to price, defaults to the configured account
        account: Option<String>,
    },
    /// RAM, CPU and NET prices together
    All {
        /// Account to price, defaults to the configured account
        account: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => eos_market_info::cli::setup::setup(),
        Some(cmd) => {
            eos_market_info::run_command(
                cmd.into(),
                cli.config_path.as_deref(),
                cli.endpoint.as_deref(),
            )
            .await
        }
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
