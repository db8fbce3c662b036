use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a batch operation before anything is broadcast
#[derive(Error, Debug)]
pub enum TxBatchError {
    #[error("Invalid instruction request: {0}")]
    InvalidRequest(String),

    #[error("Batch is empty")]
    EmptyBatch,

    #[error("No signer configured")]
    NoSigner,

    #[error("No transaction groups to submit")]
    EmptyGroups,

    #[error("Insufficient funds: need {required} lamports, have {available}")]
    InsufficientFunds { required: u64, available: u64 },

    #[error("Configuration error: {0}")]
    InvalidConfig(String),

    #[error("Ledger RPC error: {0}")]
    Rpc(#[from] LedgerError),
}

/// Errors reported by a [`crate::LedgerRpc`] implementation
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("RPC client error: {0}")]
    Client(#[from] solana_client::client_error::ClientError),

    #[error("Transaction rejected: {0}")]
    Rejected(String),

    #[error("Timed out waiting for confirmation")]
    Timeout,

    #[error("Ledger error: {0}")]
    Other(String),
}

/// Why a single transaction group could not be confirmed
///
/// These never abort a submission pass; they are reported in the slot of the
/// group that failed.
#[derive(Error, Debug)]
pub enum SubmissionFailure {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("Transaction too large: {size} bytes (max: {max})")]
    TransactionTooLarge { size: usize, max: usize },

    #[error("Failed to sign transaction: {0}")]
    Signing(String),
}

/// Errors raised while loading a signing keypair
#[derive(Error, Debug)]
pub enum KeyError {
    #[error("Failed to read keypair file {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("Failed to decode keypair secret: {0}")]
    Decode(String),
}
