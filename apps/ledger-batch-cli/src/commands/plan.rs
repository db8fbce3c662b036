use crate::{config::CliConfig, error::CliResult};
use ledger_batch_tx::CostEstimate;

pub fn execute(settings: &CliConfig, count: usize) -> CliResult<()> {
    let config = settings.batch_config()?;
    let estimate = CostEstimate::for_instruction_count(count, &config)?;

    println!(
        "📋 {} instructions, at most {} per transaction",
        count, config.max_instructions_per_tx
    );
    for (index, size) in estimate.instructions_per_tx.iter().enumerate() {
        println!("  - tx {}: {} instructions", index + 1, size);
    }
    println!(
        "💰 {} transactions, fee reserve {} lamports",
        estimate.transaction_count, estimate.total_fee_reserve_lamports
    );
    Ok(())
}
