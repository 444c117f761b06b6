use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rust_tenure::accumulator::HoldingAccumulator;
use rust_tenure::cli::{Cli, Commands};
use rust_tenure::config::TenureConfig;
use rust_tenure::error::TenureError;
use rust_tenure::storage::Storage;

fn main() -> Result<(), TenureError> {
    let cli = Cli::parse();
    let config = TenureConfig::load_or_default(&cli.config);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.node.log_level.clone()))
        .init();

    let storage = Arc::new(Storage::open(&config.node.db_path)?);
    let mut accumulator = HoldingAccumulator::with_storage(storage)?;

    // The ledger hands us wall-clock seconds; sled keeps the records.
    let now = chrono::Utc::now().timestamp() as u64;

    match cli.command {
        Commands::Update { account, balance } => {
            accumulator.update(&account, balance, now)?;
            info!("Recorded balance {} for '{}'", balance, account);
        }
        Commands::Power { account } => {
            println!("{}", accumulator.voting_power_of(&account, now));
        }
        Commands::List => {
            let mut entries = accumulator.accounts();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            for (account, record) in entries {
                println!(
                    "{:<24} balance={:<40} power={}",
                    account,
                    record.balance(),
                    accumulator.voting_power_of(account, now)
                );
            }
        }
    }

    Ok(())
}
