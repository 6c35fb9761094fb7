//! Static exchange rate table with reciprocal and pivot fallback

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::{Currency, WalletError, WalletResult};

/// A single directed rate entry for [`RateTableConfig`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatePair {
    /// Currency being sold
    pub from: Currency,
    /// Currency being bought
    pub to: Currency,
    /// Multiplicative rate: one unit of `from` buys `rate` units of `to`
    pub rate: BigDecimal,
}

/// Serializable rate table configuration, loaded once at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTableConfig {
    /// Pivot currency used when no direct or reverse entry exists
    pub base: Currency,
    /// Directed rate entries; not every pair needs one
    pub pairs: Vec<RatePair>,
}

/// Exchange rate table
///
/// Rates are static configuration: there is no live refresh. A requested pair
/// resolves through the first of identity, direct entry, reciprocal of the
/// reverse entry, or a two-hop pivot through the base currency.
#[derive(Debug, Clone)]
pub struct RateTable {
    /// Pivot currency for two-hop resolution
    base: Currency,
    /// Directed (from, to) entries
    rates: HashMap<(Currency, Currency), BigDecimal>,
}

impl RateTable {
    /// Create an empty table with the given pivot currency
    pub fn new(base: Currency) -> Self {
        Self {
            base,
            rates: HashMap::new(),
        }
    }

    /// Create a table seeded with the demo application's rates
    ///
    /// USD pivot, with directed entries out of USD, EUR, and GBP.
    pub fn with_demo_rates() -> Self {
        let mut table = Self::new(Currency::USD);

        table.seed(Currency::USD, Currency::EUR, 92);
        table.seed(Currency::USD, Currency::GBP, 79);
        table.seed(Currency::USD, Currency::JPY, 14850);
        table.seed(Currency::USD, Currency::CAD, 135);
        table.seed(Currency::USD, Currency::AUD, 152);

        table.seed(Currency::EUR, Currency::USD, 109);
        table.seed(Currency::EUR, Currency::GBP, 86);
        table.seed(Currency::EUR, Currency::JPY, 16184);
        table.seed(Currency::EUR, Currency::CAD, 147);
        table.seed(Currency::EUR, Currency::AUD, 166);

        table.seed(Currency::GBP, Currency::USD, 127);
        table.seed(Currency::GBP, Currency::EUR, 116);
        table.seed(Currency::GBP, Currency::JPY, 18819);
        table.seed(Currency::GBP, Currency::CAD, 171);
        table.seed(Currency::GBP, Currency::AUD, 193);

        table
    }

    /// Build a table from configuration, rejecting non-positive rates
    pub fn from_config(config: RateTableConfig) -> WalletResult<Self> {
        let mut table = Self::new(config.base);
        for pair in config.pairs {
            table.insert(pair.from, pair.to, pair.rate)?;
        }
        Ok(table)
    }

    /// Add a directed rate entry
    pub fn insert(&mut self, from: Currency, to: Currency, rate: BigDecimal) -> WalletResult<()> {
        if from == to {
            return Err(WalletError::Validation(format!(
                "Rate entry for {} against itself is not allowed",
                from
            )));
        }
        if rate <= BigDecimal::from(0) {
            return Err(WalletError::Validation(format!(
                "Rate for {}->{} must be positive, got {}",
                from, to, rate
            )));
        }
        self.rates.insert((from, to), rate);
        Ok(())
    }

    /// The pivot currency
    pub fn base(&self) -> Currency {
        self.base
    }

    /// Resolve the rate for a currency pair
    ///
    /// `from == to` always resolves to 1. Otherwise: direct entry, then the
    /// reciprocal of the reverse entry, then `from -> base -> to` where each
    /// leg itself resolves direct-or-reverse. Fails with
    /// [`WalletError::RateUnavailable`] when no path exists.
    pub fn rate(&self, from: Currency, to: Currency) -> WalletResult<BigDecimal> {
        if from == to {
            return Ok(BigDecimal::from(1));
        }

        if let Some(rate) = self.direct_or_reverse(from, to) {
            return Ok(rate);
        }

        if from != self.base && to != self.base {
            if let (Some(first), Some(second)) = (
                self.direct_or_reverse(from, self.base),
                self.direct_or_reverse(self.base, to),
            ) {
                return Ok(first * second);
            }
        }

        Err(WalletError::RateUnavailable(from, to))
    }

    /// Convert an amount between currencies
    ///
    /// Returns the converted amount rounded half-up to the target currency's
    /// minor units, together with the rate used. Rounding happens once, here,
    /// never at intermediate steps.
    pub fn convert(
        &self,
        amount: &BigDecimal,
        from: Currency,
        to: Currency,
    ) -> WalletResult<(BigDecimal, BigDecimal)> {
        let rate = self.rate(from, to)?;
        let converted = to.round(&(amount * &rate));
        Ok((converted, rate))
    }

    fn direct_or_reverse(&self, from: Currency, to: Currency) -> Option<BigDecimal> {
        if let Some(rate) = self.rates.get(&(from, to)) {
            return Some(rate.clone());
        }
        self.rates
            .get(&(to, from))
            .map(|rate| BigDecimal::from(1) / rate)
    }

    // Demo entries all carry two decimal places.
    fn seed(&mut self, from: Currency, to: Currency, mantissa: i64) {
        self.rates.insert((from, to), BigDecimal::new(mantissa.into(), 2));
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::with_demo_rates()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(mantissa: i64, scale: i64) -> BigDecimal {
        BigDecimal::new(mantissa.into(), scale)
    }

    #[test]
    fn test_identity_rate() {
        let table = RateTable::new(Currency::USD);
        assert_eq!(table.rate(Currency::JPY, Currency::JPY).unwrap(), BigDecimal::from(1));
    }

    #[test]
    fn test_direct_rate() {
        let table = RateTable::with_demo_rates();
        assert_eq!(table.rate(Currency::USD, Currency::EUR).unwrap(), dec(92, 2));
    }

    #[test]
    fn test_reverse_rate_is_reciprocal() {
        let mut table = RateTable::new(Currency::USD);
        table.insert(Currency::USD, Currency::CAD, dec(135, 2)).unwrap();

        let reverse = table.rate(Currency::CAD, Currency::USD).unwrap();
        let product = reverse * dec(135, 2);
        let tolerance = dec(1, 6);
        assert!((product - BigDecimal::from(1)).abs() < tolerance);
    }

    #[test]
    fn test_pivot_through_base() {
        // Only USD rows available: GBP->JPY must go GBP->USD->JPY.
        let mut table = RateTable::new(Currency::USD);
        table.insert(Currency::USD, Currency::GBP, dec(79, 2)).unwrap();
        table.insert(Currency::USD, Currency::JPY, dec(14850, 2)).unwrap();

        let rate = table.rate(Currency::GBP, Currency::JPY).unwrap();
        let expected = (BigDecimal::from(1) / dec(79, 2)) * dec(14850, 2);
        assert_eq!(rate, expected);
    }

    #[test]
    fn test_rate_unavailable() {
        let mut table = RateTable::new(Currency::USD);
        table.insert(Currency::USD, Currency::EUR, dec(92, 2)).unwrap();

        // No JPY leg from the base, so no path.
        assert!(matches!(
            table.rate(Currency::EUR, Currency::JPY),
            Err(WalletError::RateUnavailable(Currency::EUR, Currency::JPY))
        ));
        assert!(matches!(
            table.rate(Currency::USD, Currency::JPY),
            Err(WalletError::RateUnavailable(Currency::USD, Currency::JPY))
        ));
    }

    #[test]
    fn test_round_trip_rates_near_one() {
        let table = RateTable::with_demo_rates();
        let tolerance = dec(2, 1); // demo rates are not exact reciprocals

        for from in Currency::ALL {
            for to in Currency::ALL {
                let forward = table.rate(from, to).unwrap();
                let backward = table.rate(to, from).unwrap();
                let product = forward * backward;
                assert!(
                    (product.clone() - BigDecimal::from(1)).abs() < tolerance,
                    "{}->{} round trip drifted to {}",
                    from,
                    to,
                    product
                );
            }
        }
    }

    #[test]
    fn test_convert_rounds_half_up_once() {
        let mut table = RateTable::new(Currency::USD);
        table.insert(Currency::USD, Currency::EUR, dec(125, 3)).unwrap(); // 0.125

        let (converted, rate) = table
            .convert(&BigDecimal::from(1), Currency::USD, Currency::EUR)
            .unwrap();
        assert_eq!(rate, dec(125, 3));
        // 0.125 rounds up to 0.13, not banker's 0.12.
        assert_eq!(converted, dec(13, 2));
    }

    #[test]
    fn test_insert_rejects_bad_entries() {
        let mut table = RateTable::new(Currency::USD);
        assert!(table.insert(Currency::USD, Currency::USD, dec(1, 0)).is_err());
        assert!(table.insert(Currency::USD, Currency::EUR, BigDecimal::from(0)).is_err());
        assert!(table.insert(Currency::USD, Currency::EUR, dec(-92, 2)).is_err());
    }

    #[test]
    fn test_config_round_trip() {
        let config = RateTableConfig {
            base: Currency::USD,
            pairs: vec![RatePair {
                from: Currency::USD,
                to: Currency::EUR,
                rate: dec(92, 2),
            }],
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: RateTableConfig = serde_json::from_str(&json).unwrap();
        let table = RateTable::from_config(parsed).unwrap();
        assert_eq!(table.rate(Currency::USD, Currency::EUR).unwrap(), dec(92, 2));
    }
}
