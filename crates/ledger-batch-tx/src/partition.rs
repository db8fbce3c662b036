use crate::{InstructionRequest, TxBatchError};
use solana_sdk::{hash::Hash, instruction::Instruction, message::Message, pubkey::Pubkey};

/// Requests that will be sent together as one atomic transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionGroup {
    fee_payer: Pubkey,
    requests: Vec<InstructionRequest>,
}

impl TransactionGroup {
    pub fn fee_payer(&self) -> &Pubkey {
        &self.fee_payer
    }

    pub fn requests(&self) -> &[InstructionRequest] {
        &self.requests
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.requests.iter().map(|r| r.label()).collect()
    }

    /// Compile the group into a message paid for by the group's fee payer
    pub fn to_message(&self, recent_blockhash: &Hash) -> Message {
        let instructions: Vec<Instruction> = self
            .requests
            .iter()
            .map(|r| r.instruction().clone())
            .collect();
        Message::new_with_blockhash(&instructions, Some(&self.fee_payer), recent_blockhash)
    }
}

/// Split `requests` into consecutive chunks of at most `max_group_size`
///
/// Group `i` holds `requests[i * k..min((i + 1) * k, n)]`.
pub fn partition(
    requests: &[InstructionRequest],
    max_group_size: usize,
) -> Result<Vec<Vec<InstructionRequest>>, TxBatchError> {
    if max_group_size == 0 {
        return Err(TxBatchError::InvalidConfig(
            "max group size must be at least 1".to_string(),
        ));
    }
    Ok(requests
        .chunks(max_group_size)
        .map(|chunk| chunk.to_vec())
        .collect())
}

/// Partition a batch into groups paid for by `signer`
///
/// The batch itself is left untouched.
pub fn build(
    batch: &[InstructionRequest],
    max_group_size: usize,
    signer: Option<&Pubkey>,
) -> Result<Vec<TransactionGroup>, TxBatchError> {
    if batch.is_empty() {
        return Err(TxBatchError::EmptyBatch);
    }
    let fee_payer = *signer.ok_or(TxBatchError::NoSigner)?;

    Ok(partition(batch, max_group_size)?
        .into_iter()
        .map(|requests| TransactionGroup {
            fee_payer,
            requests,
        })
        .collect())
}
