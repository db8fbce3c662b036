use crate::{LedgerError, TxBatchConfig};
use async_trait::async_trait;
use solana_client::{nonblocking::rpc_client::RpcClient, rpc_config::RpcSendTransactionConfig};
use solana_sdk::{
    commitment_config::CommitmentConfig, hash::Hash, pubkey::Pubkey, signature::Signature,
    transaction::Transaction,
};
use std::{future::Future, sync::Arc, time::Duration};

/// Remote ledger operations the submitter depends on
#[async_trait]
pub trait LedgerRpc: Send + Sync {
    /// Spendable balance of `pubkey` in lamports
    async fn get_balance(&self, pubkey: &Pubkey) -> Result<u64, LedgerError>;

    /// Blockhash to stamp the next transaction with
    async fn get_latest_blockhash(&self) -> Result<Hash, LedgerError>;

    /// Broadcast a signed transaction and wait until it is confirmed
    async fn broadcast_and_confirm(
        &self,
        transaction: &Transaction,
    ) -> Result<Signature, LedgerError>;
}

/// [`LedgerRpc`] backed by a Solana JSON-RPC endpoint
pub struct SolanaLedger {
    rpc_client: Arc<RpcClient>,
    commitment: CommitmentConfig,
    skip_preflight: bool,
    confirm_timeout: Duration,
}

impl SolanaLedger {
    pub fn new(rpc_client: Arc<RpcClient>) -> Self {
        Self::with_config(rpc_client, &TxBatchConfig::default())
    }

    pub fn with_config(rpc_client: Arc<RpcClient>, config: &TxBatchConfig) -> Self {
        Self {
            rpc_client,
            commitment: config.confirmation_commitment,
            skip_preflight: config.skip_preflight,
            confirm_timeout: config.confirm_timeout,
        }
    }

    /// Connect to `rpc_url` using the commitment from `config`
    pub fn from_url(rpc_url: impl Into<String>, config: &TxBatchConfig) -> Self {
        let rpc_client =
            RpcClient::new_with_commitment(rpc_url.into(), config.confirmation_commitment);
        Self::with_config(Arc::new(rpc_client), config)
    }

    pub fn rpc_client(&self) -> &Arc<RpcClient> {
        &self.rpc_client
    }
}

#[async_trait]
impl LedgerRpc for SolanaLedger {
    async fn get_balance(&self, pubkey: &Pubkey) -> Result<u64, LedgerError> {
        Ok(self.rpc_client.get_balance(pubkey).await?)
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, LedgerError> {
        Ok(self.rpc_client.get_latest_blockhash().await?)
    }

    async fn broadcast_and_confirm(
        &self,
        transaction: &Transaction,
    ) -> Result<Signature, LedgerError> {
        let config = RpcSendTransactionConfig {
            skip_preflight: self.skip_preflight,
            preflight_commitment: Some(self.commitment.commitment),
            ..Default::default()
        };
        let confirmation = self
            .rpc_client
            .send_and_confirm_transaction_with_spinner_and_config(
                transaction,
                self.commitment,
                config,
            );
        Ok(within_timeout(self.confirm_timeout, confirmation).await??)
    }
}

async fn within_timeout<T>(
    limit: Duration,
    future: impl Future<Output = T>,
) -> Result<T, LedgerError> {
    tokio::time::timeout(limit, future)
        .await
        .map_err(|_| LedgerError::Timeout)
}
