//! In-memory storage implementation for testing and development

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::traits::*;
use crate::types::*;

/// In-memory store implementing both the balance and transaction stores
///
/// Clones share the underlying state, so one store can back the wallet
/// service and the journal at the same time. Batches commit under a single
/// write lock, which is what makes [`BalanceStore::apply`] atomic here.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    balances: Arc<RwLock<HashMap<String, HashMap<Currency, BigDecimal>>>>,
    log: Arc<RwLock<RecordLog>>,
}

#[derive(Debug, Default)]
struct RecordLog {
    next_id: u64,
    records: Vec<TransactionRecord>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            balances: Arc::new(RwLock::new(HashMap::new())),
            log: Arc::new(RwLock::new(RecordLog::default())),
        }
    }

    /// Create a store seeded with the demo application's wallets
    pub fn with_demo_wallets() -> Self {
        let store = Self::new();
        {
            let mut balances = store.balances.write().unwrap();

            let john = balances.entry("john@example.com".to_string()).or_default();
            john.insert(Currency::USD, BigDecimal::from(5000));
            john.insert(Currency::EUR, BigDecimal::from(2000));
            john.insert(Currency::GBP, BigDecimal::from(1500));
            john.insert(Currency::JPY, BigDecimal::from(100000));

            let jane = balances.entry("jane@example.com".to_string()).or_default();
            jane.insert(Currency::USD, BigDecimal::from(3000));
            jane.insert(Currency::EUR, BigDecimal::from(1500));
            jane.insert(Currency::GBP, BigDecimal::from(1000));
            jane.insert(Currency::JPY, BigDecimal::from(75000));
        }
        store
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) {
        self.balances.write().unwrap().clear();
        let mut log = self.log.write().unwrap();
        log.next_id = 0;
        log.records.clear();
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BalanceStore for MemoryStore {
    async fn balance(&self, account: &str, currency: Currency) -> WalletResult<BigDecimal> {
        Ok(self
            .balances
            .read()
            .unwrap()
            .get(account)
            .and_then(|wallet| wallet.get(&currency))
            .cloned()
            .unwrap_or_else(|| BigDecimal::from(0)))
    }

    async fn balances(&self, account: &str) -> WalletResult<HashMap<Currency, BigDecimal>> {
        Ok(self
            .balances
            .read()
            .unwrap()
            .get(account)
            .cloned()
            .unwrap_or_default())
    }

    async fn set_balance(
        &mut self,
        account: &str,
        currency: Currency,
        amount: BigDecimal,
    ) -> WalletResult<()> {
        if amount < BigDecimal::from(0) {
            return Err(WalletError::InvalidAmount(format!(
                "balance cannot be set negative, got {}",
                amount
            )));
        }
        self.balances
            .write()
            .unwrap()
            .entry(account.to_string())
            .or_default()
            .insert(currency, amount);
        Ok(())
    }

    async fn adjust_balance(
        &mut self,
        account: &str,
        currency: Currency,
        delta: &BigDecimal,
    ) -> WalletResult<BigDecimal> {
        let mut balances = self.balances.write().unwrap();
        let wallet = balances.entry(account.to_string()).or_default();
        let current = wallet
            .get(&currency)
            .cloned()
            .unwrap_or_else(|| BigDecimal::from(0));

        let next = &current + delta;
        if next < BigDecimal::from(0) {
            return Err(WalletError::InsufficientFunds {
                account: account.to_string(),
                currency,
            });
        }

        wallet.insert(currency, next.clone());
        Ok(next)
    }

    async fn apply(&mut self, changes: &[BalanceChange]) -> WalletResult<Vec<BigDecimal>> {
        let mut balances = self.balances.write().unwrap();

        // Stage every resulting balance first; commit only when all are valid.
        let mut staged: Vec<(String, Currency, BigDecimal)> = Vec::with_capacity(changes.len());
        for change in changes {
            let current = staged
                .iter()
                .rev()
                .find(|(account, currency, _)| {
                    account == &change.account && *currency == change.currency
                })
                .map(|(_, _, balance)| balance.clone())
                .unwrap_or_else(|| {
                    balances
                        .get(&change.account)
                        .and_then(|wallet| wallet.get(&change.currency))
                        .cloned()
                        .unwrap_or_else(|| BigDecimal::from(0))
                });

            let next = &current + &change.delta;
            if next < BigDecimal::from(0) {
                return Err(WalletError::InsufficientFunds {
                    account: change.account.clone(),
                    currency: change.currency,
                });
            }
            staged.push((change.account.clone(), change.currency, next));
        }

        let results: Vec<BigDecimal> = staged
            .iter()
            .map(|(_, _, balance)| balance.clone())
            .collect();
        for (account, currency, next) in staged {
            balances.entry(account).or_default().insert(currency, next);
        }

        Ok(results)
    }
}

#[async_trait]
impl TransactionStore for MemoryStore {
    async fn append_record(&mut self, draft: NewTransaction) -> WalletResult<TransactionRecord> {
        let mut log = self.log.write().unwrap();
        log.next_id += 1;
        let record =
            TransactionRecord::from_draft(log.next_id, chrono::Utc::now().naive_utc(), draft);
        log.records.push(record.clone());
        Ok(record)
    }

    async fn records_for_account(&self, account: &str) -> WalletResult<Vec<TransactionRecord>> {
        let log = self.log.read().unwrap();
        let mut records: Vec<TransactionRecord> = log
            .records
            .iter()
            .filter(|record| record.involves(account))
            .cloned()
            .collect();

        // Newest first; equal timestamps fall back to later-insertion-first.
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        Ok(records)
    }

    async fn record_by_id(&self, id: u64) -> WalletResult<Option<TransactionRecord>> {
        let log = self.log.read().unwrap();
        Ok(log.records.iter().find(|record| record.id == id).cloned())
    }
}
