use async_trait::async_trait;
use ledger_batch_tx::{
    BatchTxClient, Hash, InstructionRequest, Keypair, LedgerError, LedgerRpc, Pubkey, Signature,
    SubmissionFailure, Transaction, TxBatchConfig, TxBatchError,
};
use solana_sdk::signer::Signer;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};

/// In-memory ledger with scripted balance, blockhash and broadcast failures
struct ScriptedLedger {
    balance: u64,
    balance_unavailable: bool,
    failing_broadcasts: Vec<usize>,
    failing_blockhash_fetches: Vec<usize>,
    balance_queries: AtomicUsize,
    blockhash_fetches: AtomicUsize,
    sent: Mutex<Vec<Transaction>>,
}

impl ScriptedLedger {
    fn funded(balance: u64) -> Self {
        Self {
            balance,
            balance_unavailable: false,
            failing_broadcasts: vec![],
            failing_blockhash_fetches: vec![],
            balance_queries: AtomicUsize::new(0),
            blockhash_fetches: AtomicUsize::new(0),
            sent: Mutex::new(vec![]),
        }
    }

    fn without_balance() -> Self {
        Self {
            balance_unavailable: true,
            ..Self::funded(0)
        }
    }

    fn losing_blockhashes(mut self, fetches: &[usize]) -> Self {
        self.failing_blockhash_fetches = fetches.to_vec();
        self
    }

    fn failing(mut self, broadcasts: &[usize]) -> Self {
        self.failing_broadcasts = broadcasts.to_vec();
        self
    }

    fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl LedgerRpc for ScriptedLedger {
    async fn get_balance(&self, _pubkey: &Pubkey) -> Result<u64, LedgerError> {
        self.balance_queries.fetch_add(1, Ordering::SeqCst);
        if self.balance_unavailable {
            return Err(LedgerError::Other("connection reset".to_string()));
        }
        Ok(self.balance)
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, LedgerError> {
        let fetch = self.blockhash_fetches.fetch_add(1, Ordering::SeqCst);
        if self.failing_blockhash_fetches.contains(&fetch) {
            return Err(LedgerError::Timeout);
        }
        Ok(Hash::new_unique())
    }

    async fn broadcast_and_confirm(
        &self,
        transaction: &Transaction,
    ) -> Result<Signature, LedgerError> {
        let mut sent = self.sent.lock().unwrap();
        let index = sent.len();
        sent.push(transaction.clone());
        if self.failing_broadcasts.contains(&index) {
            Err(LedgerError::Rejected("blockhash not found".to_string()))
        } else {
            Ok(transaction.signatures[0])
        }
    }
}

fn queue_transfers(client: &mut BatchTxClient<ScriptedLedger>, from: &Pubkey, count: usize) {
    for i in 0..count {
        client
            .add(InstructionRequest::transfer(
                format!("transfer-{}", i),
                from,
                &Pubkey::new_unique(),
                1_000 + i as u64,
            ))
            .unwrap();
    }
}

fn pending_labels(client: &BatchTxClient<ScriptedLedger>) -> Vec<String> {
    client
        .pending()
        .iter()
        .map(|r| r.label().to_string())
        .collect()
}

#[tokio::test]
async fn test_partial_failure_reports_every_group_and_clears_batch() {
    let payer = Keypair::new();
    let from = payer.pubkey();
    let ledger = ScriptedLedger::funded(1_000_000).failing(&[1]);
    let mut client = BatchTxClient::new(ledger, payer);
    queue_transfers(&mut client, &from, 23);

    let report = client.flush().await.unwrap();

    assert_eq!(report.results.len(), 3);
    assert!(report.results[0].is_confirmed());
    assert!(!report.results[1].is_confirmed());
    assert!(report.results[2].is_confirmed());
    assert!(matches!(
        report.results[1].error(),
        Some(SubmissionFailure::Ledger(LedgerError::Rejected(_)))
    ));
    assert_eq!(report.confirmed_count(), 2);
    assert_eq!(report.failed_count(), 1);
    assert_eq!(report.signatures().len(), 2);

    assert!(client.pending().is_empty());
    assert_eq!(client.rpc().sent_count(), 3);

    let failed: Vec<_> = report
        .failed_requests()
        .iter()
        .map(|r| r.label().to_string())
        .collect();
    let expected: Vec<_> = (10..20).map(|i| format!("transfer-{}", i)).collect();
    assert_eq!(failed, expected);
}

#[tokio::test]
async fn test_failed_requests_can_be_queued_again() {
    let payer = Keypair::new();
    let from = payer.pubkey();
    let ledger = ScriptedLedger::funded(1_000_000).failing(&[0]);
    let mut client = BatchTxClient::new(ledger, payer);
    queue_transfers(&mut client, &from, 4);

    let first = client.flush().await.unwrap();
    assert_eq!(first.failed_count(), 1);

    client.extend(first.failed_requests()).unwrap();
    assert_eq!(client.pending().len(), 4);

    let second = client.flush().await.unwrap();
    assert_eq!(second.confirmed_count(), 1);
    assert_eq!(client.rpc().sent_count(), 2);
}

#[tokio::test]
async fn test_insufficient_funds_leaves_batch_intact() {
    let payer = Keypair::new();
    let from = payer.pubkey();
    let mut client = BatchTxClient::new(ScriptedLedger::funded(9_999), payer);
    queue_transfers(&mut client, &from, 11);
    let before = pending_labels(&client);

    let result = client.flush().await;

    assert!(matches!(
        result,
        Err(TxBatchError::InsufficientFunds {
            required: 10_000,
            available: 9_999
        })
    ));
    assert_eq!(client.rpc().sent_count(), 0);
    assert_eq!(pending_labels(&client), before);
}

#[tokio::test]
async fn test_missing_signer_leaves_batch_intact_for_retry() {
    let payer = Keypair::new();
    let from = payer.pubkey();
    let mut client = BatchTxClient::with_config(
        ScriptedLedger::funded(1_000_000),
        None,
        TxBatchConfig::default(),
    );
    queue_transfers(&mut client, &from, 5);
    let before = pending_labels(&client);

    assert!(matches!(client.flush().await, Err(TxBatchError::NoSigner)));
    assert_eq!(pending_labels(&client), before);
    assert_eq!(client.rpc().balance_queries.load(Ordering::SeqCst), 0);

    client.set_payer(payer);
    let report = client.flush().await.unwrap();
    assert_eq!(report.confirmed_count(), 1);
    assert!(client.pending().is_empty());
}

#[tokio::test]
async fn test_empty_batch_never_touches_ledger() {
    let mut client = BatchTxClient::new(ScriptedLedger::funded(1_000_000), Keypair::new());

    assert!(matches!(client.flush().await, Err(TxBatchError::EmptyBatch)));
    assert_eq!(client.rpc().balance_queries.load(Ordering::SeqCst), 0);
    assert_eq!(client.rpc().sent_count(), 0);
}

#[tokio::test]
async fn test_custom_group_size() {
    let payer = Keypair::new();
    let from = payer.pubkey();
    let config = TxBatchConfig {
        max_instructions_per_tx: 4,
        fee_reserve_lamports: 1,
        ..Default::default()
    };
    let mut client =
        BatchTxClient::with_config(ScriptedLedger::funded(3), Some(payer), config);
    queue_transfers(&mut client, &from, 9);

    let report = client.flush().await.unwrap();

    let sizes: Vec<_> = report.groups.iter().map(|g| g.len()).collect();
    assert_eq!(sizes, vec![4, 4, 1]);
    assert_eq!(report.confirmed_count(), 3);

    let sent = client.rpc().sent.lock().unwrap();
    let sent_sizes: Vec<_> = sent.iter().map(|tx| tx.message.instructions.len()).collect();
    assert_eq!(sent_sizes, vec![4, 4, 1]);
}

#[tokio::test]
async fn test_balance_query_error_keeps_batch_and_sends_nothing() {
    let payer = Keypair::new();
    let from = payer.pubkey();
    let mut client = BatchTxClient::new(ScriptedLedger::without_balance(), payer);
    queue_transfers(&mut client, &from, 12);
    let before = pending_labels(&client);

    let result = client.flush().await;

    assert!(matches!(
        result,
        Err(TxBatchError::Rpc(LedgerError::Other(_)))
    ));
    assert_eq!(client.rpc().balance_queries.load(Ordering::SeqCst), 1);
    assert_eq!(client.rpc().blockhash_fetches.load(Ordering::SeqCst), 0);
    assert_eq!(client.rpc().sent_count(), 0);
    assert_eq!(pending_labels(&client), before);
}

#[tokio::test]
async fn test_blockhash_failure_fails_only_that_group() {
    let payer = Keypair::new();
    let from = payer.pubkey();
    let ledger = ScriptedLedger::funded(1_000_000).losing_blockhashes(&[0]);
    let mut client = BatchTxClient::new(ledger, payer);
    queue_transfers(&mut client, &from, 23);

    let report = client.flush().await.unwrap();

    assert!(matches!(
        report.results[0].error(),
        Some(SubmissionFailure::Ledger(LedgerError::Timeout))
    ));
    assert!(report.results[1].is_confirmed());
    assert!(report.results[2].is_confirmed());
    assert_eq!(client.rpc().blockhash_fetches.load(Ordering::SeqCst), 3);
    assert_eq!(client.rpc().sent_count(), 2);
    assert_eq!(report.failed_requests().len(), 10);
    assert!(client.pending().is_empty());
}

#[tokio::test]
async fn test_overflowing_fee_reserve_is_insufficient_funds() {
    let payer = Keypair::new();
    let from = payer.pubkey();
    let config = TxBatchConfig {
        fee_reserve_lamports: u64::MAX,
        ..Default::default()
    };
    let mut client =
        BatchTxClient::with_config(ScriptedLedger::funded(u64::MAX), Some(payer), config);
    queue_transfers(&mut client, &from, 11);

    let result = client.flush().await;

    assert!(matches!(
        result,
        Err(TxBatchError::InsufficientFunds {
            required: u64::MAX,
            available: u64::MAX
        })
    ));
    assert_eq!(client.rpc().sent_count(), 0);
    assert_eq!(client.pending().len(), 11);
}
