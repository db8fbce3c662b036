use ledger_batch_tx::{KeyError, TxBatchError};
use thiserror::Error;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Batch error: {0}")]
    Batch(#[from] TxBatchError),

    #[error("Keypair error: {0}")]
    Key(#[from] KeyError),

    #[error("Invalid public key: {0}")]
    InvalidPubkey(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}
