//! Core types and data structures for the wallet system

use bigdecimal::rounding::RoundingMode;
use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Currencies supported by the wallet
///
/// The set is closed and fixed at compile time. Every currency is tracked to
/// two minor-unit decimal places, including JPY, matching how the payment UI
/// formats amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    /// US Dollar
    USD,
    /// Euro
    EUR,
    /// British Pound
    GBP,
    /// Japanese Yen
    JPY,
    /// Canadian Dollar
    CAD,
    /// Australian Dollar
    AUD,
}

impl Currency {
    /// All supported currencies, in display order
    pub const ALL: [Currency; 6] = [
        Currency::USD,
        Currency::EUR,
        Currency::GBP,
        Currency::JPY,
        Currency::CAD,
        Currency::AUD,
    ];

    /// ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
            Currency::CAD => "CAD",
            Currency::AUD => "AUD",
        }
    }

    /// Human-readable currency name
    pub fn display_name(&self) -> &'static str {
        match self {
            Currency::USD => "US Dollar",
            Currency::EUR => "Euro",
            Currency::GBP => "British Pound",
            Currency::JPY => "Japanese Yen",
            Currency::CAD => "Canadian Dollar",
            Currency::AUD => "Australian Dollar",
        }
    }

    /// Display symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
            Currency::JPY => "¥",
            Currency::CAD => "C$",
            Currency::AUD => "A$",
        }
    }

    /// Parse a currency from its ISO code
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "JPY" => Some(Currency::JPY),
            "CAD" => Some(Currency::CAD),
            "AUD" => Some(Currency::AUD),
            _ => None,
        }
    }

    /// Number of minor-unit decimal places amounts are tracked to
    pub fn minor_units(&self) -> i64 {
        2
    }

    /// Round an amount to this currency's minor units, half-up
    pub fn round(&self, amount: &BigDecimal) -> BigDecimal {
        amount.with_scale_round(self.minor_units(), RoundingMode::HalfUp)
    }

    /// Format an amount with the currency symbol
    ///
    /// EUR places its symbol after the amount, everything else before it.
    pub fn format(&self, amount: &BigDecimal) -> String {
        let rounded = self.round(amount);
        match self {
            Currency::EUR => format!("{}{}", rounded, self.symbol()),
            _ => format!("{}{}", self.symbol(), rounded),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Kind of a completed wallet operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Movement of one currency between two accounts
    Transfer,
    /// Conversion between two currencies within one account
    Exchange,
}

/// Result of a completed transfer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferOutcome {
    /// Account that was debited
    pub sender: String,
    /// Account that was credited
    pub recipient: String,
    /// Currency the transfer was made in
    pub currency: Currency,
    /// Amount moved
    pub amount: BigDecimal,
    /// Sender's balance after the transfer
    pub sender_balance: BigDecimal,
    /// Recipient's balance after the transfer
    pub recipient_balance: BigDecimal,
}

/// Result of a completed currency exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeOutcome {
    /// Account the exchange was performed on
    pub account: String,
    /// Currency that was debited
    pub from_currency: Currency,
    /// Currency that was credited
    pub to_currency: Currency,
    /// Amount debited, in `from_currency`
    pub amount: BigDecimal,
    /// Amount credited, in `to_currency`, rounded to minor units
    pub converted_amount: BigDecimal,
    /// Rate the conversion used
    pub rate: BigDecimal,
    /// Balance in `from_currency` after the exchange
    pub from_balance: BigDecimal,
    /// Balance in `to_currency` after the exchange
    pub to_balance: BigDecimal,
}

/// A completed operation waiting to be appended to the transaction log
///
/// The log assigns the id and timestamp at append time; everything else is
/// captured here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    /// Kind of operation
    pub kind: TransactionKind,
    /// Sender (transfers) or the exchanging account (exchanges)
    pub account: String,
    /// Transfer recipient; absent for exchanges
    pub counterparty: Option<String>,
    /// Amount debited
    pub amount: BigDecimal,
    /// Currency debited
    pub currency: Currency,
    /// Amount credited for exchanges; absent for transfers
    pub counter_amount: Option<BigDecimal>,
    /// Currency credited for exchanges; absent for transfers
    pub counter_currency: Option<Currency>,
    /// Rate used for exchanges; absent for transfers
    pub rate: Option<BigDecimal>,
    /// Optional free-text description
    pub description: Option<String>,
    /// Post-operation balance of `account` in `currency`
    pub account_balance_after: BigDecimal,
    /// Post-operation balance of the other side: the recipient's balance for
    /// transfers, the account's `counter_currency` balance for exchanges
    pub counter_balance_after: BigDecimal,
}

impl NewTransaction {
    /// Build a transfer draft from a completed transfer
    pub fn transfer(outcome: &TransferOutcome, description: Option<String>) -> Self {
        Self {
            kind: TransactionKind::Transfer,
            account: outcome.sender.clone(),
            counterparty: Some(outcome.recipient.clone()),
            amount: outcome.amount.clone(),
            currency: outcome.currency,
            counter_amount: None,
            counter_currency: None,
            rate: None,
            description,
            account_balance_after: outcome.sender_balance.clone(),
            counter_balance_after: outcome.recipient_balance.clone(),
        }
    }

    /// Build an exchange draft from a completed exchange
    pub fn exchange(outcome: &ExchangeOutcome) -> Self {
        Self {
            kind: TransactionKind::Exchange,
            account: outcome.account.clone(),
            counterparty: None,
            amount: outcome.amount.clone(),
            currency: outcome.from_currency,
            counter_amount: Some(outcome.converted_amount.clone()),
            counter_currency: Some(outcome.to_currency),
            rate: Some(outcome.rate.clone()),
            description: None,
            account_balance_after: outcome.from_balance.clone(),
            counter_balance_after: outcome.to_balance.clone(),
        }
    }
}

/// Immutable record of a completed operation
///
/// Records are append-only: once written they are never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Unique id, monotonically increasing in append order
    pub id: u64,
    /// When the record was appended (UTC)
    pub timestamp: NaiveDateTime,
    /// Kind of operation
    pub kind: TransactionKind,
    /// Sender (transfers) or the exchanging account (exchanges)
    pub account: String,
    /// Transfer recipient; absent for exchanges
    pub counterparty: Option<String>,
    /// Amount debited
    pub amount: BigDecimal,
    /// Currency debited
    pub currency: Currency,
    /// Amount credited for exchanges
    pub counter_amount: Option<BigDecimal>,
    /// Currency credited for exchanges
    pub counter_currency: Option<Currency>,
    /// Rate used for exchanges
    pub rate: Option<BigDecimal>,
    /// Optional free-text description
    pub description: Option<String>,
    /// Post-operation balance of `account` in `currency`
    pub account_balance_after: BigDecimal,
    /// Post-operation balance of the other side of the operation
    pub counter_balance_after: BigDecimal,
}

impl TransactionRecord {
    /// Materialize a draft with its assigned id and append timestamp
    pub fn from_draft(id: u64, timestamp: NaiveDateTime, draft: NewTransaction) -> Self {
        Self {
            id,
            timestamp,
            kind: draft.kind,
            account: draft.account,
            counterparty: draft.counterparty,
            amount: draft.amount,
            currency: draft.currency,
            counter_amount: draft.counter_amount,
            counter_currency: draft.counter_currency,
            rate: draft.rate,
            description: draft.description,
            account_balance_after: draft.account_balance_after,
            counter_balance_after: draft.counter_balance_after,
        }
    }

    /// Whether the given account took part in this operation
    pub fn involves(&self, account: &str) -> bool {
        self.account == account || self.counterparty.as_deref() == Some(account)
    }
}

/// Per-account aggregates over the transaction log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountStats {
    /// Sum of transfer amounts where the account was the sender
    pub total_sent: BigDecimal,
    /// Sum of transfer amounts where the account was the recipient
    pub total_received: BigDecimal,
    /// Number of exchanges the account performed
    pub total_exchanges: u64,
}

/// Errors that can occur in the wallet system
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Insufficient {currency} funds in account '{account}'")]
    InsufficientFunds { account: String, currency: Currency },
    #[error("Cannot exchange {0} for itself")]
    SameCurrency(Currency),
    #[error("No exchange rate available from {0} to {1}")]
    RateUnavailable(Currency, Currency),
    #[error("Account not found: {0}")]
    AccountNotFound(String),
    #[error("Caller is not authenticated")]
    NotAuthenticated,
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type for wallet operations
pub type WalletResult<T> = Result<T, WalletError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_codes_round_trip() {
        for currency in Currency::ALL {
            assert_eq!(Currency::from_code(currency.code()), Some(currency));
        }
        assert_eq!(Currency::from_code("CHF"), None);
    }

    #[test]
    fn test_currency_formatting() {
        let amount = BigDecimal::new(123450.into(), 3); // 123.450
        assert_eq!(Currency::USD.format(&amount), "$123.45");
        assert_eq!(Currency::EUR.format(&amount), "123.45€");
        assert_eq!(Currency::JPY.format(&amount), "¥123.45");
    }

    #[test]
    fn test_round_half_up() {
        let amount = BigDecimal::new(46125.into(), 3); // 46.125
        assert_eq!(
            Currency::USD.round(&amount),
            BigDecimal::new(4613.into(), 2)
        );
        let amount = BigDecimal::new(46124.into(), 3); // 46.124
        assert_eq!(
            Currency::USD.round(&amount),
            BigDecimal::new(4612.into(), 2)
        );
    }

    #[test]
    fn test_record_involvement() {
        let outcome = TransferOutcome {
            sender: "john@example.com".to_string(),
            recipient: "jane@example.com".to_string(),
            currency: Currency::USD,
            amount: BigDecimal::from(40),
            sender_balance: BigDecimal::from(60),
            recipient_balance: BigDecimal::from(40),
        };
        let draft = NewTransaction::transfer(&outcome, Some("Dinner".to_string()));
        let record = TransactionRecord::from_draft(1, chrono::Utc::now().naive_utc(), draft);

        assert!(record.involves("john@example.com"));
        assert!(record.involves("jane@example.com"));
        assert!(!record.involves("nobody@example.com"));
    }
}
