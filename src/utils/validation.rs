//! Validation utilities

use bigdecimal::BigDecimal;

use crate::traits::PaymentValidator;
use crate::types::*;

/// Validate that an amount is positive
pub fn validate_positive_amount(amount: &BigDecimal) -> WalletResult<()> {
    if *amount <= BigDecimal::from(0) {
        Err(WalletError::InvalidAmount(format!(
            "amount must be positive, got {}",
            amount
        )))
    } else {
        Ok(())
    }
}

/// Validate that an account ID is well-formed
///
/// Account IDs are opaque, email-shaped strings in the demo data, so the
/// character set is wider than a typical ledger code.
pub fn validate_account_id(account_id: &str) -> WalletResult<()> {
    if account_id.trim().is_empty() {
        return Err(WalletError::Validation(
            "Account ID cannot be empty".to_string(),
        ));
    }

    if account_id.len() > 100 {
        return Err(WalletError::Validation(
            "Account ID cannot exceed 100 characters".to_string(),
        ));
    }

    if !account_id
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
    {
        return Err(WalletError::Validation(
            "Account ID can only contain alphanumeric characters, '@', '.', '+', '-', and '_'"
                .to_string(),
        ));
    }

    Ok(())
}

/// Validate an optional payment description
pub fn validate_description(description: &str) -> WalletResult<()> {
    if description.len() > 500 {
        return Err(WalletError::Validation(
            "Description cannot exceed 500 characters".to_string(),
        ));
    }

    Ok(())
}

/// Strict payment validator with detailed checks
pub struct StrictPaymentValidator;

impl PaymentValidator for StrictPaymentValidator {
    fn validate_caller(&self, account: &str) -> WalletResult<()> {
        if account.trim().is_empty() {
            return Err(WalletError::NotAuthenticated);
        }
        validate_account_id(account)
    }

    fn validate_party(&self, account: &str) -> WalletResult<()> {
        validate_account_id(account)
    }

    fn validate_amount(&self, amount: &BigDecimal) -> WalletResult<()> {
        validate_positive_amount(amount)
    }

    fn validate_description(&self, description: Option<&str>) -> WalletResult<()> {
        match description {
            Some(text) => validate_description(text),
            None => Ok(()),
        }
    }
}
