use crate::{
    commands::{connect, resolve_signer},
    config::CliConfig,
    error::{CliError, CliResult},
};
use ledger_batch_tx::{InstructionRequest, Pubkey, SubmissionResult};
use solana_sdk::rent::Rent;
use std::str::FromStr;
use tracing::{info, warn};

/// Enough to open a plain system account at the default rent rate
pub const DEFAULT_TRANSFER_LAMPORTS: u64 = 1_000_000;

pub async fn execute(
    settings: &CliConfig,
    secret: Option<&str>,
    count: usize,
    lamports: u64,
    recipients: Vec<String>,
) -> CliResult<()> {
    println!("💸 Sending {} transfers of {} lamports...", count, lamports);

    let recipients = parse_recipients(&recipients)?;
    if recipients.is_empty() {
        return Err(CliError::InvalidConfig(
            "at least one recipient is required".to_string(),
        ));
    }
    if below_rent_exemption(lamports) {
        warn!(
            "{} lamports is below the rent-exempt minimum of {}; transfers to new accounts will fail",
            lamports,
            Rent::default().minimum_balance(0)
        );
    }
    let signer = resolve_signer(settings, secret)?;
    let mut client = connect(settings, signer)?;

    // A missing signer is reported by the flush below, after the batch is built
    let from = client.payer_pubkey().unwrap_or_default();
    for request in transfer_requests(&from, &recipients, count, lamports) {
        client.add(request)?;
    }

    let estimate = client.estimate_cost()?;
    println!(
        "📦 {} transfers packed into {} transactions (fee reserve: {} lamports)",
        count, estimate.transaction_count, estimate.total_fee_reserve_lamports
    );

    let report = client.flush().await?;

    println!("\n📊 Results:");
    for (index, (group, result)) in report.iter().enumerate() {
        match result {
            SubmissionResult::Confirmed { signature } => {
                println!("  ✅ tx {} ({} transfers): {}", index + 1, group.len(), signature);
            }
            SubmissionResult::Failed { error } => {
                println!("  ❌ tx {} ({} transfers): {}", index + 1, group.len(), error);
            }
        }
    }

    info!(
        "Transfer batch done: {} confirmed, {} failed",
        report.confirmed_count(),
        report.failed_count()
    );
    if report.failed_count() > 0 {
        warn!(
            "{} transfers were not confirmed and must be resent",
            report.failed_requests().len()
        );
    }

    println!(
        "\n🎉 {} of {} transactions confirmed",
        report.confirmed_count(),
        report.results.len()
    );
    Ok(())
}

fn parse_recipients(recipients: &[String]) -> CliResult<Vec<Pubkey>> {
    recipients
        .iter()
        .map(|s| Pubkey::from_str(s).map_err(|e| CliError::InvalidPubkey(format!("{}: {}", s, e))))
        .collect()
}

fn below_rent_exemption(lamports: u64) -> bool {
    lamports < Rent::default().minimum_balance(0)
}

/// `count` transfers cycling through the non-empty `recipients`
fn transfer_requests(
    from: &Pubkey,
    recipients: &[Pubkey],
    count: usize,
    lamports: u64,
) -> Vec<InstructionRequest> {
    (0..count)
        .map(|i| {
            let to = recipients[i % recipients.len()];
            InstructionRequest::transfer(format!("transfer #{} to {}", i + 1, to), from, &to, lamports)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipients_are_cycled() {
        let from = Pubkey::new_unique();
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        let requests = transfer_requests(&from, &[a, b], 5, 42);

        assert_eq!(requests.len(), 5);
        let targets: Vec<_> = requests
            .iter()
            .map(|r| r.instruction().accounts[1].pubkey)
            .collect();
        assert_eq!(targets, vec![a, b, a, b, a]);
        assert!(requests.iter().all(|r| r.validate().is_ok()));
        assert_eq!(requests[0].label(), format!("transfer #1 to {}", a));
    }

    #[test]
    fn test_default_amount_opens_new_accounts() {
        assert!(!below_rent_exemption(DEFAULT_TRANSFER_LAMPORTS));
        assert!(below_rent_exemption(1_000));
    }

    #[tokio::test]
    async fn test_no_recipients_rejected() {
        let result = execute(&CliConfig::default(), None, 3, DEFAULT_TRANSFER_LAMPORTS, vec![]).await;
        assert!(matches!(result, Err(CliError::InvalidConfig(_))));
    }

    #[test]
    fn test_bad_recipient() {
        let result = parse_recipients(&["definitely not base58!".to_string()]);
        assert!(matches!(result, Err(CliError::InvalidPubkey(_))));
    }
}
