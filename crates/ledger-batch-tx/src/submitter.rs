use crate::{
    InstructionRequest, LedgerRpc, SubmissionFailure, TransactionGroup, TxBatchConfig,
    TxBatchError,
};
use solana_sdk::{
    signature::{Keypair, Signature},
    signer::Signer,
    transaction::Transaction,
};
use tracing::{debug, info, warn};

/// Outcome of submitting one transaction group
#[derive(Debug)]
pub enum SubmissionResult {
    Confirmed { signature: Signature },
    Failed { error: SubmissionFailure },
}

impl SubmissionResult {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, SubmissionResult::Confirmed { .. })
    }

    pub fn signature(&self) -> Option<&Signature> {
        match self {
            SubmissionResult::Confirmed { signature } => Some(signature),
            SubmissionResult::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&SubmissionFailure> {
        match self {
            SubmissionResult::Confirmed { .. } => None,
            SubmissionResult::Failed { error } => Some(error),
        }
    }
}

/// Groups submitted in one pass, paired with their results
#[derive(Debug)]
pub struct SubmissionReport {
    pub groups: Vec<TransactionGroup>,
    pub results: Vec<SubmissionResult>,
}

impl SubmissionReport {
    pub fn confirmed_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_confirmed()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.results.len() - self.confirmed_count()
    }

    pub fn signatures(&self) -> Vec<Signature> {
        self.results.iter().filter_map(|r| r.signature()).copied().collect()
    }

    /// Requests from groups that did not confirm, in their original order
    pub fn failed_requests(&self) -> Vec<InstructionRequest> {
        self.groups
            .iter()
            .zip(&self.results)
            .filter(|(_, result)| !result.is_confirmed())
            .flat_map(|(group, _)| group.requests().iter().cloned())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TransactionGroup, &SubmissionResult)> {
        self.groups.iter().zip(&self.results)
    }
}

/// Submit `groups` one after another, signing each with `signer`
///
/// Fails before touching the network if there is no signer, nothing to send,
/// or the signer cannot cover `fee_reserve_lamports` per group. Once
/// broadcasting starts, a failed group is recorded in its slot and the pass
/// moves on to the next one.
pub async fn submit<R>(
    groups: &[TransactionGroup],
    signer: Option<&Keypair>,
    rpc: &R,
    config: &TxBatchConfig,
) -> Result<Vec<SubmissionResult>, TxBatchError>
where
    R: LedgerRpc + ?Sized,
{
    let signer = signer.ok_or(TxBatchError::NoSigner)?;
    if groups.is_empty() {
        return Err(TxBatchError::EmptyGroups);
    }

    verify_payer_balance(groups.len(), signer, rpc, config).await?;

    let total = groups.len();
    let mut results = Vec::with_capacity(total);

    // Strictly one at a time: every group shares the payer account.
    for (index, group) in groups.iter().enumerate() {
        info!(
            "Sending transaction {} of {} ({} instructions)",
            index + 1,
            total,
            group.len()
        );

        let result = match send_group(group, signer, rpc, config).await {
            Ok(signature) => {
                info!("Transaction {} confirmed: {}", index + 1, signature);
                SubmissionResult::Confirmed { signature }
            }
            Err(error) => {
                warn!(
                    "Transaction {} failed ({}): {}",
                    index + 1,
                    group.labels().join(", "),
                    error
                );
                SubmissionResult::Failed { error }
            }
        };
        results.push(result);
    }

    let confirmed = results.iter().filter(|r| r.is_confirmed()).count();
    info!(
        "Submission pass finished: {} confirmed, {} failed",
        confirmed,
        total - confirmed
    );
    Ok(results)
}

async fn verify_payer_balance<R>(
    transaction_count: usize,
    signer: &Keypair,
    rpc: &R,
    config: &TxBatchConfig,
) -> Result<(), TxBatchError>
where
    R: LedgerRpc + ?Sized,
{
    let balance = rpc.get_balance(&signer.pubkey()).await?;
    let required = config.required_reserve(transaction_count);

    match required {
        Some(required) if balance >= required => {
            debug!(
                "Balance check passed: {} lamports available, {} required",
                balance, required
            );
            Ok(())
        }
        required => Err(TxBatchError::InsufficientFunds {
            required: required.unwrap_or(u64::MAX),
            available: balance,
        }),
    }
}

async fn send_group<R>(
    group: &TransactionGroup,
    signer: &Keypair,
    rpc: &R,
    config: &TxBatchConfig,
) -> Result<Signature, SubmissionFailure>
where
    R: LedgerRpc + ?Sized,
{
    let recent_blockhash = rpc.get_latest_blockhash().await?;
    let message = group.to_message(&recent_blockhash);

    let size = serialized_size(&message);
    if size > config.max_transaction_size_bytes {
        return Err(SubmissionFailure::TransactionTooLarge {
            size,
            max: config.max_transaction_size_bytes,
        });
    }

    let mut transaction = Transaction::new_unsigned(message);
    transaction
        .try_sign(&[signer], recent_blockhash)
        .map_err(|e| SubmissionFailure::Signing(e.to_string()))?;

    Ok(rpc.broadcast_and_confirm(&transaction).await?)
}

/// Wire size of a transaction carrying `message` once fully signed
fn serialized_size(message: &solana_sdk::message::Message) -> usize {
    let signature_count = usize::from(message.header.num_required_signatures);
    short_vec_len(signature_count)
        + signature_count * std::mem::size_of::<Signature>()
        + message.serialize().len()
}

fn short_vec_len(mut value: usize) -> usize {
    let mut len = 1;
    while value >= 0x80 {
        value >>= 7;
        len += 1;
    }
    len
}
