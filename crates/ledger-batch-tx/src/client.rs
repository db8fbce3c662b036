use crate::{
    build, submit, BatchAccumulator, InstructionRequest, LedgerRpc, SolanaLedger,
    SubmissionReport, TransactionGroup, TxBatchConfig, TxBatchError,
};
use solana_sdk::{pubkey::Pubkey, signature::Keypair, signer::Signer};
use tracing::{debug, info};

/// Cost estimation for a batch of instructions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostEstimate {
    /// Lamports the payer must hold before the pass starts
    pub total_fee_reserve_lamports: u64,
    /// Number of transactions that will be created
    pub transaction_count: usize,
    /// Instruction count of each transaction, in send order
    pub instructions_per_tx: Vec<usize>,
}

impl CostEstimate {
    /// Estimate for `instruction_count` queued instructions under `config`
    pub fn for_instruction_count(
        instruction_count: usize,
        config: &TxBatchConfig,
    ) -> Result<Self, TxBatchError> {
        config.validate()?;
        let per_tx = config.max_instructions_per_tx;
        let transaction_count = instruction_count.div_ceil(per_tx);

        let instructions_per_tx = (0..transaction_count)
            .map(|i| per_tx.min(instruction_count - i * per_tx))
            .collect();

        let total_fee_reserve_lamports =
            config.required_reserve(transaction_count).ok_or_else(|| {
                TxBatchError::InvalidConfig("fee reserve overflows u64".to_string())
            })?;

        Ok(Self {
            total_fee_reserve_lamports,
            transaction_count,
            instructions_per_tx,
        })
    }
}

/// Accumulates instructions and sends them as sequential grouped transactions
pub struct BatchTxClient<R: LedgerRpc = SolanaLedger> {
    rpc: R,
    payer: Option<Keypair>,
    config: TxBatchConfig,
    batch: BatchAccumulator,
}

impl<R: LedgerRpc> BatchTxClient<R> {
    /// Create a new client with default configuration
    pub fn new(rpc: R, payer: Keypair) -> Self {
        Self::with_config(rpc, Some(payer), TxBatchConfig::default())
    }

    /// Create a new client with custom configuration and an optional payer
    pub fn with_config(rpc: R, payer: Option<Keypair>, config: TxBatchConfig) -> Self {
        Self {
            rpc,
            payer,
            config,
            batch: BatchAccumulator::new(),
        }
    }

    /// Get the payer's public key
    pub fn payer_pubkey(&self) -> Option<Pubkey> {
        self.payer.as_ref().map(|payer| payer.pubkey())
    }

    pub fn set_payer(&mut self, payer: Keypair) {
        self.payer = Some(payer);
    }

    pub fn config(&self) -> &TxBatchConfig {
        &self.config
    }

    pub fn rpc(&self) -> &R {
        &self.rpc
    }

    /// Instructions waiting for the next flush
    pub fn pending(&self) -> &[InstructionRequest] {
        self.batch.requests()
    }

    /// Queue a single instruction
    pub fn add(&mut self, request: InstructionRequest) -> Result<(), TxBatchError> {
        self.batch.add(request)
    }

    /// Queue several instructions; nothing is queued if any is invalid
    pub fn extend<I>(&mut self, requests: I) -> Result<(), TxBatchError>
    where
        I: IntoIterator<Item = InstructionRequest>,
    {
        self.batch.extend(requests)
    }

    /// Group the pending instructions without sending or clearing them
    pub fn build(&self) -> Result<Vec<TransactionGroup>, TxBatchError> {
        self.config.validate()?;
        let payer = self.payer_pubkey();
        build(
            self.batch.requests(),
            self.config.max_instructions_per_tx,
            payer.as_ref(),
        )
    }

    /// Send every pending instruction, one transaction at a time
    ///
    /// The pending batch is cleared once the pass has run, even if some
    /// transactions failed; their instructions are available through
    /// [`SubmissionReport::failed_requests`]. Errors returned from here leave
    /// the batch untouched.
    pub async fn flush(&mut self) -> Result<SubmissionReport, TxBatchError> {
        let groups = self.build()?;
        debug!(
            "Packed {} instructions into {} transactions",
            self.batch.len(),
            groups.len()
        );

        let results = submit(&groups, self.payer.as_ref(), &self.rpc, &self.config).await?;
        self.batch.clear();

        let report = SubmissionReport { groups, results };
        info!(
            "Flushed batch: {} of {} transactions confirmed",
            report.confirmed_count(),
            report.results.len()
        );
        Ok(report)
    }

    /// Current balance of the payer account
    pub async fn payer_balance(&self) -> Result<u64, TxBatchError> {
        let payer = self.payer_pubkey().ok_or(TxBatchError::NoSigner)?;
        Ok(self.rpc.get_balance(&payer).await?)
    }

    /// Estimate what flushing the pending batch would need, without sending
    pub fn estimate_cost(&self) -> Result<CostEstimate, TxBatchError> {
        CostEstimate::for_instruction_count(self.batch.len(), &self.config)
    }
}
