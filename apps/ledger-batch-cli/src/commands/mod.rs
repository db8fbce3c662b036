pub mod balance;
pub mod plan;
pub mod transfer;

use crate::{config::CliConfig, error::CliResult};
use ledger_batch_tx::{keys, BatchTxClient, Keypair, SolanaLedger};
use tracing::info;

/// Pick the fee payer: an inline secret wins over a keypair file
pub fn resolve_signer(settings: &CliConfig, secret: Option<&str>) -> CliResult<Option<Keypair>> {
    if let Some(secret) = secret {
        info!("Using fee payer from inline secret");
        return Ok(Some(keys::load_from_encoded(secret)?));
    }
    match &settings.keypair_path {
        Some(path) => {
            info!("Using fee payer keypair {}", path.display());
            Ok(Some(keys::load_from_file(path)?))
        }
        None => Ok(None),
    }
}

/// Batch client connected to the configured RPC endpoint
pub fn connect(settings: &CliConfig, signer: Option<Keypair>) -> CliResult<BatchTxClient> {
    let config = settings.batch_config()?;
    let ledger = SolanaLedger::from_url(settings.rpc_url.clone(), &config);
    info!("Using Solana RPC {}", settings.rpc_url);
    Ok(BatchTxClient::with_config(ledger, signer, config))
}
