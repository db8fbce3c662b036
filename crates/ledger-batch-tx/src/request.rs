use crate::TxBatchError;
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    packet::PACKET_DATA_SIZE,
    pubkey::Pubkey,
    system_instruction,
};
use std::str::FromStr;

/// Upper bound on account references a single instruction may carry
pub const MAX_ACCOUNTS_PER_INSTRUCTION: usize = 64;

/// A labelled instruction waiting to be grouped into a transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionRequest {
    label: String,
    instruction: Instruction,
}

impl InstructionRequest {
    pub fn new(label: impl Into<String>, instruction: Instruction) -> Self {
        Self {
            label: label.into(),
            instruction,
        }
    }

    /// Build a request from a base58 program id, account metas and raw data
    pub fn from_parts(
        label: impl Into<String>,
        program_id: &str,
        accounts: Vec<AccountMeta>,
        data: Vec<u8>,
    ) -> Result<Self, TxBatchError> {
        let program_id = Pubkey::from_str(program_id).map_err(|e| {
            TxBatchError::InvalidRequest(format!("invalid program id {:?}: {}", program_id, e))
        })?;
        Ok(Self::new(
            label,
            Instruction {
                program_id,
                accounts,
                data,
            },
        ))
    }

    /// System program transfer of `lamports` from `from` to `to`
    pub fn transfer(label: impl Into<String>, from: &Pubkey, to: &Pubkey, lamports: u64) -> Self {
        Self::new(label, system_instruction::transfer(from, to, lamports))
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn instruction(&self) -> &Instruction {
        &self.instruction
    }

    pub fn into_instruction(self) -> Instruction {
        self.instruction
    }

    /// Check that the request has a shape a transaction can carry
    pub fn validate(&self) -> Result<(), TxBatchError> {
        if self.label.trim().is_empty() {
            return Err(TxBatchError::InvalidRequest(
                "request label must not be blank".to_string(),
            ));
        }

        let ix = &self.instruction;
        if ix.accounts.is_empty() && ix.data.is_empty() {
            return Err(TxBatchError::InvalidRequest(format!(
                "{}: instruction has neither accounts nor data",
                self.label
            )));
        }
        if ix.accounts.len() > MAX_ACCOUNTS_PER_INSTRUCTION {
            return Err(TxBatchError::InvalidRequest(format!(
                "{}: {} accounts (max: {})",
                self.label,
                ix.accounts.len(),
                MAX_ACCOUNTS_PER_INSTRUCTION
            )));
        }
        if ix.data.len() > PACKET_DATA_SIZE {
            return Err(TxBatchError::InvalidRequest(format!(
                "{}: {} bytes of instruction data (max: {})",
                self.label,
                ix.data.len(),
                PACKET_DATA_SIZE
            )));
        }
        Ok(())
    }
}
