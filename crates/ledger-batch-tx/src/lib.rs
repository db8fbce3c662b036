/*!
# Ledger Batch Transaction Client

Groups Solana instructions into transactions of bounded size and submits them
one after another from a single fee payer, recording a signature or a failure
for every transaction instead of aborting on the first error.

## Quick Start

```rust
use ledger_batch_tx::{BatchTxClient, InstructionRequest, SolanaLedger, TxBatchConfig};
use solana_sdk::{pubkey::Pubkey, signature::Keypair, signer::Signer};

# async fn example() -> Result<(), Box<dyn std::error::Error>> {
let config = TxBatchConfig::default();
let ledger = SolanaLedger::from_url("https://api.devnet.solana.com", &config);
let payer = Keypair::new();
let from = payer.pubkey();
let mut client = BatchTxClient::with_config(ledger, Some(payer), config);

for i in 0..23 {
    client.add(InstructionRequest::transfer(
        format!("payout #{}", i),
        &from,
        &Pubkey::new_unique(),
        1_000,
    ))?;
}

// 23 transfers go out as three transactions: 10, 10 and 3 instructions
let report = client.flush().await?;
println!(
    "{} confirmed, {} failed",
    report.confirmed_count(),
    report.failed_count()
);

// Failed transactions are not retried; queue their instructions again if needed
client.extend(report.failed_requests())?;
# Ok(())
# }
```

## Building Blocks

The client is a thin layer over free functions that can be used directly:

```rust
use ledger_batch_tx::{build, partition, InstructionRequest};
use solana_sdk::pubkey::Pubkey;

let from = Pubkey::new_unique();
let batch: Vec<_> = (0..5)
    .map(|i| InstructionRequest::transfer(format!("t{}", i), &from, &Pubkey::new_unique(), 1))
    .collect();

assert_eq!(partition(&batch, 2).unwrap().len(), 3);

let groups = build(&batch, 2, Some(&from)).unwrap();
assert!(groups.iter().all(|g| g.fee_payer() == &from));
```

[`submit`] takes any [`LedgerRpc`] implementation, which makes it possible to
drive a submission pass against an in-memory ledger in tests.
*/

mod accumulator;
mod client;
mod config;
mod error;
pub mod keys;
mod ledger;
mod partition;
mod request;
mod submitter;

pub use accumulator::BatchAccumulator;
pub use client::{BatchTxClient, CostEstimate};
pub use config::{TxBatchConfig, DEFAULT_FEE_RESERVE_LAMPORTS};
pub use error::{KeyError, LedgerError, SubmissionFailure, TxBatchError};
pub use ledger::{LedgerRpc, SolanaLedger};
pub use partition::{build, partition, TransactionGroup};
pub use request::{InstructionRequest, MAX_ACCOUNTS_PER_INSTRUCTION};
pub use submitter::{submit, SubmissionReport, SubmissionResult};

// Re-export key Solana types for convenience
pub use solana_client::nonblocking::rpc_client::RpcClient;
pub use solana_sdk::{
    hash::Hash,
    instruction::Instruction,
    message::Message,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    transaction::Transaction,
};
