//! Payment orchestration across the wallet service and the transaction journal
//!
//! Each request moves through validated, applied, and recorded stages before
//! it completes; any failure rejects the request with no durable effect. When
//! the journal append fails after the ledger mutation succeeded, the mutation
//! is reversed before the error returns, so callers only ever observe a fully
//! completed or fully rejected operation.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::fx::RateTable;
use crate::traits::*;
use crate::types::*;
use crate::wallet::{TransactionJournal, WalletService};

/// Receipt for a completed payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    /// Correlation id for this operation
    pub operation_id: Uuid,
    /// The journal record the payment produced
    pub record: TransactionRecord,
    /// Sender's balance after the payment
    pub sender_balance: BigDecimal,
    /// Recipient's balance after the payment
    pub recipient_balance: BigDecimal,
}

/// Receipt for a completed currency exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeReceipt {
    /// Correlation id for this operation
    pub operation_id: Uuid,
    /// The journal record the exchange produced
    pub record: TransactionRecord,
    /// Amount credited in the target currency
    pub converted_amount: BigDecimal,
    /// Rate the conversion used
    pub rate: BigDecimal,
    /// Balance in the source currency after the exchange
    pub from_balance: BigDecimal,
    /// Balance in the target currency after the exchange
    pub to_balance: BigDecimal,
}

/// Orchestrator tying wallet mutations and journaling into one logical unit
pub struct PaymentOrchestrator<S: BalanceStore + TransactionStore> {
    wallets: WalletService<S>,
    journal: TransactionJournal<S>,
    validator: Box<dyn PaymentValidator>,
}

impl<S: BalanceStore + TransactionStore + Clone> PaymentOrchestrator<S> {
    /// Create a new orchestrator over the given store and rate table
    pub fn new(store: S, rates: RateTable) -> Self {
        Self {
            wallets: WalletService::new(store.clone(), rates),
            journal: TransactionJournal::new(store),
            validator: Box::new(DefaultPaymentValidator),
        }
    }

    /// Create a new orchestrator with a custom validator
    pub fn with_validator(
        store: S,
        rates: RateTable,
        validator: Box<dyn PaymentValidator>,
    ) -> Self {
        Self {
            wallets: WalletService::new(store.clone(), rates),
            journal: TransactionJournal::new(store),
            validator,
        }
    }

    /// Send a payment from `sender` to `recipient`
    ///
    /// Wallet service failures propagate unchanged; no retries.
    pub async fn pay(
        &mut self,
        sender: &str,
        recipient: &str,
        amount: BigDecimal,
        currency: Currency,
        description: Option<String>,
    ) -> WalletResult<PaymentReceipt> {
        let operation_id = Uuid::new_v4();

        self.validator.validate_caller(sender)?;
        self.validator.validate_party(recipient)?;
        self.validator.validate_amount(&amount)?;
        self.validator.validate_description(description.as_deref())?;
        debug!(%operation_id, sender, recipient, %currency, "payment validated");

        let outcome = self
            .wallets
            .transfer(sender, recipient, currency, amount)
            .await?;
        debug!(%operation_id, "payment applied");

        let draft = NewTransaction::transfer(&outcome, description);
        let record = match self.journal.append(draft).await {
            Ok(record) => record,
            Err(append_err) => {
                warn!(%operation_id, error = %append_err, "journal append failed, reversing transfer");
                self.roll_back_transfer(&outcome).await?;
                return Err(append_err);
            }
        };
        debug!(%operation_id, record_id = record.id, "payment recorded");

        Ok(PaymentReceipt {
            operation_id,
            record,
            sender_balance: outcome.sender_balance,
            recipient_balance: outcome.recipient_balance,
        })
    }

    /// Exchange an amount between two currencies within `account`
    ///
    /// Wallet service and rate table failures propagate unchanged; no retries.
    pub async fn convert(
        &mut self,
        account: &str,
        amount: BigDecimal,
        from: Currency,
        to: Currency,
    ) -> WalletResult<ExchangeReceipt> {
        let operation_id = Uuid::new_v4();

        self.validator.validate_caller(account)?;
        self.validator.validate_amount(&amount)?;
        debug!(%operation_id, account, %from, %to, "exchange validated");

        let outcome = self.wallets.exchange(account, from, to, amount).await?;
        debug!(%operation_id, "exchange applied");

        let draft = NewTransaction::exchange(&outcome);
        let record = match self.journal.append(draft).await {
            Ok(record) => record,
            Err(append_err) => {
                warn!(%operation_id, error = %append_err, "journal append failed, reversing exchange");
                self.roll_back_exchange(&outcome).await?;
                return Err(append_err);
            }
        };
        debug!(%operation_id, record_id = record.id, "exchange recorded");

        Ok(ExchangeReceipt {
            operation_id,
            record,
            converted_amount: outcome.converted_amount,
            rate: outcome.rate,
            from_balance: outcome.from_balance,
            to_balance: outcome.to_balance,
        })
    }

    // Balance operations
    /// Balance for an account/currency pair
    pub async fn balance(&self, account: &str, currency: Currency) -> WalletResult<BigDecimal> {
        self.wallets.balance(account, currency).await
    }

    /// Every balance an account holds
    pub async fn balances(&self, account: &str) -> WalletResult<HashMap<Currency, BigDecimal>> {
        self.wallets.balances(account).await
    }

    /// Overwrite a balance, e.g. when provisioning a wallet
    pub async fn set_balance(
        &mut self,
        account: &str,
        currency: Currency,
        amount: BigDecimal,
    ) -> WalletResult<()> {
        self.wallets.set_balance(account, currency, amount).await
    }

    // Journal queries
    /// Full history for an account, newest first
    pub async fn history(&self, account: &str) -> WalletResult<Vec<TransactionRecord>> {
        self.journal.for_account(account).await
    }

    /// The `limit` most recent records for an account
    pub async fn recent(
        &self,
        account: &str,
        limit: usize,
    ) -> WalletResult<Vec<TransactionRecord>> {
        self.journal.recent(account, limit).await
    }

    /// Look up a single record by id
    pub async fn record(&self, id: u64) -> WalletResult<Option<TransactionRecord>> {
        self.journal.record(id).await
    }

    /// Aggregate totals for an account
    pub async fn stats(&self, account: &str) -> WalletResult<AccountStats> {
        self.journal.stats(account).await
    }

    async fn roll_back_transfer(&mut self, outcome: &TransferOutcome) -> WalletResult<()> {
        let changes = [
            BalanceChange::credit(outcome.sender.clone(), outcome.currency, outcome.amount.clone()),
            BalanceChange::debit(
                outcome.recipient.clone(),
                outcome.currency,
                outcome.amount.clone(),
            ),
        ];
        self.wallets.store.apply(&changes).await.map(|_| ())
    }

    async fn roll_back_exchange(&mut self, outcome: &ExchangeOutcome) -> WalletResult<()> {
        let changes = [
            BalanceChange::credit(
                outcome.account.clone(),
                outcome.from_currency,
                outcome.amount.clone(),
            ),
            BalanceChange::debit(
                outcome.account.clone(),
                outcome.to_currency,
                outcome.converted_amount.clone(),
            ),
        ];
        self.wallets.store.apply(&changes).await.map(|_| ())
    }
}
