//! Traits for storage abstraction and extensibility

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::*;

/// A single signed balance delta within an atomic batch
///
/// Negative deltas are debits, positive deltas are credits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceChange {
    /// Account whose balance changes
    pub account: String,
    /// Currency the change applies to
    pub currency: Currency,
    /// Signed amount added to the balance
    pub delta: BigDecimal,
}

impl BalanceChange {
    /// Create a debit (negative delta)
    pub fn debit(account: impl Into<String>, currency: Currency, amount: BigDecimal) -> Self {
        Self {
            account: account.into(),
            currency,
            delta: -amount,
        }
    }

    /// Create a credit (positive delta)
    pub fn credit(account: impl Into<String>, currency: Currency, amount: BigDecimal) -> Self {
        Self {
            account: account.into(),
            currency,
            delta: amount,
        }
    }

    /// The change that undoes this one
    pub fn inverted(&self) -> Self {
        Self {
            account: self.account.clone(),
            currency: self.currency,
            delta: -self.delta.clone(),
        }
    }
}

/// Storage abstraction for account balances
///
/// This trait allows the wallet core to work with any storage backend
/// (PostgreSQL, SQLite, in-memory, etc.) by implementing these methods.
/// Every successful mutation must be persisted before the call returns, and
/// no partial-write state may be observable to subsequent reads.
#[async_trait]
pub trait BalanceStore: Send + Sync {
    /// Get the balance for an account/currency pair
    ///
    /// Returns zero when no entry exists; never fails for unknown accounts.
    async fn balance(&self, account: &str, currency: Currency) -> WalletResult<BigDecimal>;

    /// Get every balance an account holds
    async fn balances(&self, account: &str) -> WalletResult<HashMap<Currency, BigDecimal>>;

    /// Overwrite a balance
    ///
    /// Fails with [`WalletError::InvalidAmount`] when the amount is negative.
    async fn set_balance(
        &mut self,
        account: &str,
        currency: Currency,
        amount: BigDecimal,
    ) -> WalletResult<()>;

    /// Atomically add a delta to a balance, returning the new balance
    ///
    /// Fails with [`WalletError::InsufficientFunds`] when the result would be
    /// negative, leaving the balance untouched.
    async fn adjust_balance(
        &mut self,
        account: &str,
        currency: Currency,
        delta: &BigDecimal,
    ) -> WalletResult<BigDecimal>;

    /// Apply a batch of deltas as a single atomic unit
    ///
    /// Every resulting balance is validated non-negative before any change is
    /// committed; on failure nothing is written. Readers must never observe a
    /// partially applied batch. Returns the new balances in batch order.
    async fn apply(&mut self, changes: &[BalanceChange]) -> WalletResult<Vec<BigDecimal>>;
}

/// Storage abstraction for the append-only transaction log
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Append a record, assigning the next id and the append timestamp
    ///
    /// Never rejects a well-formed draft and never mutates a previously
    /// appended record.
    async fn append_record(&mut self, draft: NewTransaction) -> WalletResult<TransactionRecord>;

    /// Every record the account participated in, newest first
    ///
    /// Ordered by timestamp descending; ties broken by insertion order with
    /// the later insertion first.
    async fn records_for_account(&self, account: &str) -> WalletResult<Vec<TransactionRecord>>;

    /// Look up a single record by id
    async fn record_by_id(&self, id: u64) -> WalletResult<Option<TransactionRecord>>;
}

/// Trait for implementing custom payment validation rules
pub trait PaymentValidator: Send + Sync {
    /// Validate the caller's identity before any ledger mutation is attempted
    fn validate_caller(&self, account: &str) -> WalletResult<()>;

    /// Validate a non-caller party (e.g. a transfer recipient)
    fn validate_party(&self, account: &str) -> WalletResult<()>;

    /// Validate an operation amount
    fn validate_amount(&self, amount: &BigDecimal) -> WalletResult<()>;

    /// Validate an optional free-text description
    fn validate_description(&self, description: Option<&str>) -> WalletResult<()>;
}

/// Default payment validator with basic rules
pub struct DefaultPaymentValidator;

impl PaymentValidator for DefaultPaymentValidator {
    fn validate_caller(&self, account: &str) -> WalletResult<()> {
        if account.trim().is_empty() {
            return Err(WalletError::NotAuthenticated);
        }
        Ok(())
    }

    fn validate_party(&self, account: &str) -> WalletResult<()> {
        if account.trim().is_empty() {
            return Err(WalletError::Validation(
                "Account ID cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    fn validate_amount(&self, amount: &BigDecimal) -> WalletResult<()> {
        if *amount <= BigDecimal::from(0) {
            return Err(WalletError::InvalidAmount(format!(
                "amount must be positive, got {}",
                amount
            )));
        }
        Ok(())
    }

    fn validate_description(&self, _description: Option<&str>) -> WalletResult<()> {
        Ok(())
    }
}
