//! Append-only journal of completed operations

use bigdecimal::BigDecimal;

use crate::traits::TransactionStore;
use crate::types::*;

/// Transaction journal over an append-only record store
///
/// Records enter the journal only as the result of a successfully completed
/// wallet operation and are never mutated or deleted afterward.
pub struct TransactionJournal<S: TransactionStore> {
    store: S,
}

impl<S: TransactionStore> TransactionJournal<S> {
    /// Create a new journal over the given store
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Append a record, receiving back its assigned id and timestamp
    pub async fn append(&mut self, draft: NewTransaction) -> WalletResult<TransactionRecord> {
        self.store.append_record(draft).await
    }

    /// Every record the account participated in, newest first
    pub async fn for_account(&self, account: &str) -> WalletResult<Vec<TransactionRecord>> {
        self.store.records_for_account(account).await
    }

    /// The `limit` most recent records for an account
    pub async fn recent(
        &self,
        account: &str,
        limit: usize,
    ) -> WalletResult<Vec<TransactionRecord>> {
        let mut records = self.for_account(account).await?;
        records.truncate(limit);
        Ok(records)
    }

    /// Look up a single record by id
    pub async fn record(&self, id: u64) -> WalletResult<Option<TransactionRecord>> {
        self.store.record_by_id(id).await
    }

    /// Aggregate totals for an account, computed by a full scan of its records
    pub async fn stats(&self, account: &str) -> WalletResult<AccountStats> {
        let records = self.for_account(account).await?;

        let mut stats = AccountStats {
            total_sent: BigDecimal::from(0),
            total_received: BigDecimal::from(0),
            total_exchanges: 0,
        };

        for record in &records {
            match record.kind {
                TransactionKind::Transfer => {
                    if record.account == account {
                        stats.total_sent += &record.amount;
                    }
                    if record.counterparty.as_deref() == Some(account) {
                        stats.total_received += &record.amount;
                    }
                }
                TransactionKind::Exchange => {
                    stats.total_exchanges += 1;
                }
            }
        }

        Ok(stats)
    }
}
