use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tenure", about = "Holding-time weighted voting power tracker")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "tenure.toml")]
    pub config: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record an account's balance after a ledger event (mint/burn/transfer)
    Update {
        account: String,
        /// Resulting balance in smallest token units
        balance: u128,
    },
    /// Show an account's current voting power
    Power { account: String },
    /// List all tracked accounts
    List,
}
