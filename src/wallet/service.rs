//! Balance queries, peer-to-peer transfer, and currency exchange

use bigdecimal::BigDecimal;
use std::collections::HashMap;
use tracing::debug;

use crate::fx::RateTable;
use crate::traits::{BalanceChange, BalanceStore};
use crate::types::*;

/// Wallet service for balance operations
///
/// Owns the ledger side of every operation: all mutations go through the
/// store's atomic batch so concurrent readers see either the pre- or
/// post-state of an operation, never an intermediate one.
pub struct WalletService<S: BalanceStore> {
    pub(crate) store: S,
    rates: RateTable,
}

impl<S: BalanceStore> WalletService<S> {
    /// Create a new wallet service over the given store and rate table
    pub fn new(store: S, rates: RateTable) -> Self {
        Self { store, rates }
    }

    /// The rate table this service converts with
    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    /// Balance for an account/currency pair, zero when absent
    pub async fn balance(&self, account: &str, currency: Currency) -> WalletResult<BigDecimal> {
        self.store.balance(account, currency).await
    }

    /// Every balance an account holds
    pub async fn balances(&self, account: &str) -> WalletResult<HashMap<Currency, BigDecimal>> {
        self.store.balances(account).await
    }

    /// Overwrite a balance, e.g. when provisioning a demo wallet
    pub async fn set_balance(
        &mut self,
        account: &str,
        currency: Currency,
        amount: BigDecimal,
    ) -> WalletResult<()> {
        self.store.set_balance(account, currency, amount).await
    }

    /// Move an amount of one currency from `sender` to `recipient`
    ///
    /// The debit and credit are applied as one atomic batch; the recipient's
    /// balance entry is created at zero when absent. Fails with
    /// [`WalletError::InvalidAmount`] for non-positive amounts and
    /// [`WalletError::InsufficientFunds`] when the sender's balance is short.
    pub async fn transfer(
        &mut self,
        sender: &str,
        recipient: &str,
        currency: Currency,
        amount: BigDecimal,
    ) -> WalletResult<TransferOutcome> {
        if amount <= BigDecimal::from(0) {
            return Err(WalletError::InvalidAmount(format!(
                "transfer amount must be positive, got {}",
                amount
            )));
        }

        let available = self.store.balance(sender, currency).await?;
        if available < amount {
            return Err(WalletError::InsufficientFunds {
                account: sender.to_string(),
                currency,
            });
        }

        let changes = [
            BalanceChange::debit(sender, currency, amount.clone()),
            BalanceChange::credit(recipient, currency, amount.clone()),
        ];
        let [sender_balance, recipient_balance]: [BigDecimal; 2] = self
            .store
            .apply(&changes)
            .await?
            .try_into()
            .map_err(|_| WalletError::Storage("store returned a short balance batch".to_string()))?;

        debug!(sender, recipient, %currency, %amount, "transfer applied");

        Ok(TransferOutcome {
            sender: sender.to_string(),
            recipient: recipient.to_string(),
            currency,
            amount,
            sender_balance,
            recipient_balance,
        })
    }

    /// Convert an amount between two currencies within one account
    ///
    /// The converted credit is rounded half-up to the target currency's minor
    /// units, once, after applying the rate. Debit and credit land as one
    /// atomic batch.
    pub async fn exchange(
        &mut self,
        account: &str,
        from: Currency,
        to: Currency,
        amount: BigDecimal,
    ) -> WalletResult<ExchangeOutcome> {
        if amount <= BigDecimal::from(0) {
            return Err(WalletError::InvalidAmount(format!(
                "exchange amount must be positive, got {}",
                amount
            )));
        }
        if from == to {
            return Err(WalletError::SameCurrency(from));
        }

        let available = self.store.balance(account, from).await?;
        if available < amount {
            return Err(WalletError::InsufficientFunds {
                account: account.to_string(),
                currency: from,
            });
        }

        let (converted, rate) = self.rates.convert(&amount, from, to)?;

        let changes = [
            BalanceChange::debit(account, from, amount.clone()),
            BalanceChange::credit(account, to, converted.clone()),
        ];
        let [from_balance, to_balance]: [BigDecimal; 2] = self
            .store
            .apply(&changes)
            .await?
            .try_into()
            .map_err(|_| WalletError::Storage("store returned a short balance batch".to_string()))?;

        debug!(account, %from, %to, %amount, %converted, %rate, "exchange applied");

        Ok(ExchangeOutcome {
            account: account.to_string(),
            from_currency: from,
            to_currency: to,
            amount,
            converted_amount: converted,
            rate,
            from_balance,
            to_balance,
        })
    }
}
