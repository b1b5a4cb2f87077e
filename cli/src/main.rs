//! `crispy`: predict deployment addresses and dry-run a genesis.

use anyhow::Context;
use clap::Parser;
use crispy_chain::Chain;
use crispy_genesis::{deploy_governance, predict_contract_address, Deployment, GenesisConfig};
use crispy_governor::GovernorContract;
use crispy_ledger::LedgerMsg;
use crispy_types::Address;
use crispy_utils::{format_duration, init_logging, LogFormat};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "crispy", about = "Crispy governance tooling")]
struct Cli {
    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, default_value = "info", env = "CRISPY_LOG_LEVEL", global = true)]
    log_level: String,

    /// Log format: "human" or "json".
    #[arg(long, default_value_t = LogFormat::Human, env = "CRISPY_LOG_FORMAT", global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Print the address a deployer's deployment at `nonce` will occupy.
    PredictAddress {
        #[arg(long)]
        deployer: Address,

        #[arg(long)]
        nonce: u64,
    },

    /// Run the genesis bootstrap on an in-memory chain and print a JSON summary.
    Simulate {
        /// Genesis TOML file. Built-in defaults when omitted.
        #[arg(long, env = "CRISPY_GENESIS_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Print the built-in genesis configuration as TOML.
    DefaultConfig,
}

/// What `simulate` reports. Amounts are decimal strings of base units.
#[derive(Debug, Serialize)]
struct Summary {
    deployment: Deployment,
    total_supply: String,
    treasury_tokens: String,
    treasury_native: String,
    activation_tax: String,
    finish_reward: String,
    vote_period: String,
}

fn load_config(path: Option<&Path>) -> anyhow::Result<GenesisConfig> {
    match path {
        Some(path) => GenesisConfig::from_toml_file(path)
            .with_context(|| format!("loading genesis config {}", path.display())),
        None => Ok(GenesisConfig::default()),
    }
}

fn simulate(config: &GenesisConfig) -> anyhow::Result<Summary> {
    let mut chain = Chain::with_system_clock();
    let deployment = deploy_governance(&mut chain, config).context("genesis bootstrap failed")?;

    let total_supply: u128 = chain.query_msg(deployment.ledger, &LedgerMsg::TotalSupply)?;
    let treasury_tokens: u128 = chain.query_msg(
        deployment.ledger,
        &LedgerMsg::BalanceOf {
            account: deployment.treasury,
        },
    )?;
    let governor = chain
        .contract::<GovernorContract>(&deployment.governor)
        .context("no governor at the deployed address")?;
    let split = governor.tax_split();
    let vote_period = format_duration(governor.params().vote_period_secs);

    Ok(Summary {
        deployment,
        total_supply: total_supply.to_string(),
        treasury_tokens: treasury_tokens.to_string(),
        treasury_native: chain.native_balance(&deployment.treasury).to_string(),
        activation_tax: split.total_tax.to_string(),
        finish_reward: split.finish_reward.to_string(),
        vote_period,
    })
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_format, &cli.log_level).context("installing log subscriber")?;

    match cli.command {
        Command::PredictAddress { deployer, nonce } => {
            println!("{}", predict_contract_address(&deployer, nonce));
        }
        Command::Simulate { config } => {
            let config = load_config(config.as_deref())?;
            let summary = simulate(&config)?;
            tracing::info!(governor = %summary.deployment.governor, "simulation complete");
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::DefaultConfig => {
            print!("{}", GenesisConfig::default().to_toml_string()?);
        }
    }
    Ok(())
}
