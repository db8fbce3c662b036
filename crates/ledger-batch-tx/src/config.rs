use crate::TxBatchError;
use solana_sdk::{commitment_config::CommitmentConfig, packet::PACKET_DATA_SIZE};
use std::time::Duration;

/// Base fee charged per signature, used as the default per-transaction reserve
pub const DEFAULT_FEE_RESERVE_LAMPORTS: u64 = 5_000;

/// Configuration for batch transaction operations
#[derive(Debug, Clone)]
pub struct TxBatchConfig {
    /// Maximum number of instructions to pack into a single transaction
    pub max_instructions_per_tx: usize,

    /// Lamports the payer must hold per transaction before a pass starts
    pub fee_reserve_lamports: u64,

    /// Commitment level for transaction confirmation
    pub confirmation_commitment: CommitmentConfig,

    /// Whether to skip preflight checks (simulation before sending)
    pub skip_preflight: bool,

    /// Maximum serialized transaction size in bytes
    pub max_transaction_size_bytes: usize,

    /// How long a single broadcast may wait for confirmation
    pub confirm_timeout: Duration,
}

impl TxBatchConfig {
    /// Reject settings that would make grouping or submission impossible
    pub fn validate(&self) -> Result<(), TxBatchError> {
        if self.max_instructions_per_tx == 0 {
            return Err(TxBatchError::InvalidConfig(
                "max_instructions_per_tx must be at least 1".to_string(),
            ));
        }
        if self.max_transaction_size_bytes == 0
            || self.max_transaction_size_bytes > PACKET_DATA_SIZE
        {
            return Err(TxBatchError::InvalidConfig(format!(
                "max_transaction_size_bytes must be between 1 and {}",
                PACKET_DATA_SIZE
            )));
        }
        if self.confirm_timeout.is_zero() {
            return Err(TxBatchError::InvalidConfig(
                "confirm_timeout must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Lamports required to cover `transaction_count` transactions
    ///
    /// Returns `None` on overflow.
    pub fn required_reserve(&self, transaction_count: usize) -> Option<u64> {
        u64::try_from(transaction_count)
            .ok()
            .and_then(|count| self.fee_reserve_lamports.checked_mul(count))
    }
}

impl Default for TxBatchConfig {
    fn default() -> Self {
        Self {
            max_instructions_per_tx: 10, // Conservative default
            fee_reserve_lamports: DEFAULT_FEE_RESERVE_LAMPORTS,
            confirmation_commitment: CommitmentConfig::confirmed(),
            skip_preflight: false,
            max_transaction_size_bytes: PACKET_DATA_SIZE, // 1232
            confirm_timeout: Duration::from_secs(90),
        }
    }
}
