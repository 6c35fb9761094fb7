//! # Wallet Core
//!
//! The wallet and ledger core of a personal payment application: multi-currency
//! balances, peer-to-peer transfers, currency exchange, and an append-only
//! transaction log.
//!
//! ## Features
//!
//! - **Multi-currency wallets**: per-account balances across a fixed currency set
//! - **Transfers**: atomic peer-to-peer movement with non-negative balances guaranteed
//! - **Currency exchange**: static rate table with reciprocal and USD-pivot fallback
//! - **Transaction log**: immutable, queryable history with per-account aggregates
//! - **Orchestration**: ledger mutation and journaling succeed or fail as one unit
//! - **Storage abstraction**: database-agnostic design with trait-based storage
//!
//! ## Quick Start
//!
//! ```rust
//! use bigdecimal::BigDecimal;
//! use wallet_core::utils::MemoryStore;
//! use wallet_core::{Currency, PaymentOrchestrator, RateTable};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), wallet_core::WalletError> {
//! let store = MemoryStore::with_demo_wallets();
//! let mut payments = PaymentOrchestrator::new(store, RateTable::with_demo_rates());
//!
//! let receipt = payments
//!     .pay(
//!         "john@example.com",
//!         "jane@example.com",
//!         BigDecimal::from(25),
//!         Currency::USD,
//!         Some("Dinner payment".to_string()),
//!     )
//!     .await?;
//! assert_eq!(receipt.sender_balance, BigDecimal::from(4975));
//! # Ok(())
//! # }
//! ```

pub mod fx;
pub mod traits;
pub mod types;
pub mod utils;
pub mod wallet;

// Re-export commonly used types
pub use fx::*;
pub use traits::*;
pub use types::*;
pub use wallet::*;
