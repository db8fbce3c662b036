use crate::{
    commands::{connect, resolve_signer},
    config::CliConfig,
    error::CliResult,
};
use solana_sdk::native_token::LAMPORTS_PER_SOL;

pub async fn execute(settings: &CliConfig, secret: Option<&str>) -> CliResult<()> {
    let signer = resolve_signer(settings, secret)?;
    let client = connect(settings, signer)?;

    let balance = client.payer_balance().await?;
    if let Some(payer) = client.payer_pubkey() {
        println!("🔑 Fee payer: {}", payer);
    }
    println!(
        "💰 Balance: {} lamports ({:.9} SOL)",
        balance,
        balance as f64 / LAMPORTS_PER_SOL as f64
    );
    Ok(())
}
