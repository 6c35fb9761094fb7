//! Basic wallet usage example

use bigdecimal::BigDecimal;
use wallet_core::utils::MemoryStore;
use wallet_core::{Currency, PaymentOrchestrator, RateTable};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("💸 Wallet Core - Basic Wallet Example\n");

    // Create the orchestrator over the seeded demo wallets
    let store = MemoryStore::with_demo_wallets();
    let mut payments = PaymentOrchestrator::new(store, RateTable::with_demo_rates());

    // 1. Show the starting balances
    println!("📊 Starting balances...");
    for account in ["john@example.com", "jane@example.com"] {
        let balances = payments.balances(account).await?;
        let mut currencies: Vec<_> = balances.into_iter().collect();
        currencies.sort_by_key(|(currency, _)| currency.code());
        for (currency, balance) in currencies {
            println!("  {} holds {}", account, currency.format(&balance));
        }
    }
    println!();

    // 2. Send a payment
    println!("💰 Sending a payment...\n");
    let receipt = payments
        .pay(
            "john@example.com",
            "jane@example.com",
            BigDecimal::from(250),
            Currency::USD,
            Some("Rent share".to_string()),
        )
        .await?;
    println!(
        "  ✓ Sent {} (operation {})",
        Currency::USD.format(&receipt.record.amount),
        receipt.operation_id
    );
    println!(
        "  ✓ John now holds {}, Jane {}",
        Currency::USD.format(&receipt.sender_balance),
        Currency::USD.format(&receipt.recipient_balance)
    );
    println!();

    // 3. Send a couple more and inspect the history
    payments
        .pay(
            "jane@example.com",
            "john@example.com",
            BigDecimal::from(40),
            Currency::USD,
            Some("Movie tickets".to_string()),
        )
        .await?;
    payments
        .pay(
            "john@example.com",
            "jane@example.com",
            BigDecimal::from(15),
            Currency::GBP,
            None,
        )
        .await?;

    println!("🧾 John's history, newest first...");
    for record in payments.history("john@example.com").await? {
        println!(
            "  #{} {:?} {} {}",
            record.id,
            record.kind,
            record.currency.format(&record.amount),
            record.description.as_deref().unwrap_or("-")
        );
    }
    println!();

    // 4. Aggregates over the full log
    let stats = payments.stats("john@example.com").await?;
    println!("📈 John's totals:");
    println!("  sent     {}", stats.total_sent);
    println!("  received {}", stats.total_received);
    println!("  exchanges {}", stats.total_exchanges);

    Ok(())
}
