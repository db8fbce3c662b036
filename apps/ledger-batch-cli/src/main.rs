use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod error;
mod logging;

use config::CliConfig;
use error::CliResult;

#[derive(Parser)]
#[command(name = "ledger-batch")]
#[command(about = "Ledger Batch CLI - Send grouped Solana transfers from one fee payer")]
#[command(version)]
struct Cli {
    /// Settings file (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Solana RPC URL
    #[arg(short, long, global = true)]
    rpc_url: Option<String>,

    /// Fee payer keypair file
    #[arg(short, long, global = true)]
    keypair: Option<PathBuf>,

    /// Fee payer secret (base58 or JSON byte array)
    #[arg(long, global = true, env = "LEDGER_BATCH_SECRET", hide_env_values = true)]
    secret: Option<String>,

    /// Append-only log file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Default log level when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a batch of transfers, grouped into sequential transactions
    Transfer {
        /// Number of transfers to queue
        #[arg(short = 'n', long, default_value = "23")]
        count: usize,

        /// Lamports per transfer
        #[arg(short, long, default_value_t = commands::transfer::DEFAULT_TRANSFER_LAMPORTS)]
        lamports: u64,

        /// Recipient public key (repeatable; recipients are cycled)
        #[arg(long = "to", required = true)]
        recipients: Vec<String>,
    },

    /// Show the fee payer's balance
    Balance,

    /// Show how a batch would be grouped, without sending anything
    Plan {
        /// Number of instructions to plan for
        #[arg(short = 'n', long)]
        count: usize,
    },
}

#[tokio::main]
async fn main() -> CliResult<()> {
    let cli = Cli::parse();

    let mut settings = CliConfig::load(cli.config.as_deref())?;
    if let Some(rpc_url) = cli.rpc_url {
        settings.rpc_url = rpc_url;
    }
    if let Some(keypair) = cli.keypair {
        settings.keypair_path = Some(keypair);
    }
    if let Some(log_file) = cli.log_file {
        settings.log_file = log_file;
    }

    logging::init(&cli.log_level, &settings.log_file)?;
    tracing::debug!("Loaded settings: {:?}", settings);

    match cli.command {
        Commands::Transfer {
            count,
            lamports,
            recipients,
        } => {
            commands::transfer::execute(&settings, cli.secret.as_deref(), count, lamports, recipients)
                .await
        }

        Commands::Balance => commands::balance::execute(&settings, cli.secret.as_deref()).await,

        Commands::Plan { count } => commands::plan::execute(&settings, count),
    }
}
