//! Currency exchange example: rate resolution and in-wallet conversion

use bigdecimal::BigDecimal;
use wallet_core::utils::MemoryStore;
use wallet_core::{Currency, PaymentOrchestrator, RateTable, WalletError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("💱 Wallet Core - Currency Exchange Example\n");

    println!("🌍 Supported currencies:");
    for currency in Currency::ALL {
        println!(
            "  {} {} ({})",
            currency.code(),
            currency.display_name(),
            currency.symbol()
        );
    }
    println!();

    let rates = RateTable::with_demo_rates();

    // 1. Rate resolution: direct, reciprocal, and pivot paths
    println!("📊 Resolved rates:");
    let pairs = [
        (Currency::USD, Currency::EUR), // direct entry
        (Currency::JPY, Currency::USD), // reciprocal of USD->JPY
        (Currency::JPY, Currency::CAD), // two hops through USD
    ];
    for (from, to) in pairs {
        println!("  {} -> {} = {}", from, to, rates.rate(from, to)?);
    }
    println!();

    // 2. Exchange inside a wallet
    let store = MemoryStore::with_demo_wallets();
    let mut payments = PaymentOrchestrator::new(store, rates);

    println!("💰 Exchanging 50 USD for EUR...");
    let receipt = payments
        .convert(
            "john@example.com",
            BigDecimal::from(50),
            Currency::USD,
            Currency::EUR,
        )
        .await?;
    println!(
        "  ✓ Credited {} at rate {}",
        Currency::EUR.format(&receipt.converted_amount),
        receipt.rate
    );
    println!(
        "  ✓ Balances now {} / {}",
        Currency::USD.format(&receipt.from_balance),
        Currency::EUR.format(&receipt.to_balance)
    );
    println!();

    // 3. Exchanging a currency for itself is rejected up front
    println!("🚫 Trying to exchange USD for USD...");
    match payments
        .convert(
            "john@example.com",
            BigDecimal::from(10),
            Currency::USD,
            Currency::USD,
        )
        .await
    {
        Err(WalletError::SameCurrency(currency)) => {
            println!("  ✓ Rejected: cannot exchange {} for itself", currency);
        }
        other => println!("  unexpected result: {:?}", other.map(|r| r.record.id)),
    }

    Ok(())
}
