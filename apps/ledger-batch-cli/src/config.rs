use crate::error::{CliError, CliResult};
use ledger_batch_tx::TxBatchConfig;
use serde::Deserialize;
use solana_sdk::commitment_config::CommitmentConfig;
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};

/// Settings file structure (YAML)
///
/// Every field is optional; command-line flags take precedence.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Solana RPC URL
    pub rpc_url: String,

    /// Path to the fee payer keypair file
    pub keypair_path: Option<PathBuf>,

    /// Maximum instructions per transaction
    pub max_instructions_per_tx: usize,

    /// Lamports reserved per transaction for fees
    pub fee_reserve_lamports: u64,

    /// Confirmation commitment: processed, confirmed or finalized
    pub commitment: String,

    /// Skip preflight simulation when broadcasting
    pub skip_preflight: bool,

    /// Seconds to wait for each transaction to confirm
    pub confirm_timeout_secs: u64,

    /// Append-only log file
    pub log_file: PathBuf,
}

impl Default for CliConfig {
    fn default() -> Self {
        let batch = TxBatchConfig::default();
        Self {
            rpc_url: default_rpc_url(),
            keypair_path: None,
            max_instructions_per_tx: batch.max_instructions_per_tx,
            fee_reserve_lamports: batch.fee_reserve_lamports,
            commitment: "confirmed".to_string(),
            skip_preflight: batch.skip_preflight,
            confirm_timeout_secs: batch.confirm_timeout.as_secs(),
            log_file: PathBuf::from("ledger-batch.log"),
        }
    }
}

impl CliConfig {
    /// Read settings from `path`, or use defaults when no file is given
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => {
                let contents = fs::read_to_string(path)?;
                Self::from_yaml(&contents)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_yaml(contents: &str) -> CliResult<Self> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Library configuration derived from these settings
    pub fn batch_config(&self) -> CliResult<TxBatchConfig> {
        let confirmation_commitment = CommitmentConfig::from_str(&self.commitment)
            .map_err(|_| {
                CliError::InvalidConfig(format!("unknown commitment {:?}", self.commitment))
            })?;

        let config = TxBatchConfig {
            max_instructions_per_tx: self.max_instructions_per_tx,
            fee_reserve_lamports: self.fee_reserve_lamports,
            confirmation_commitment,
            skip_preflight: self.skip_preflight,
            confirm_timeout: Duration::from_secs(self.confirm_timeout_secs),
            ..Default::default()
        };
        config.validate()?;
        Ok(config)
    }
}

fn default_rpc_url() -> String {
    "https://api.devnet.solana.com".to_string()
}
