//! Exchange rate abstractions.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;

/// All rates are expressed relative to this currency.
pub const REFERENCE_CURRENCY: &str = "USD";

/// A snapshot of exchange rates relative to [`REFERENCE_CURRENCY`].
#[derive(Debug, Clone, Default)]
pub struct ExchangeRateTable {
    rates: HashMap<String, f64>,
}

impl ExchangeRateTable {
    pub fn new(rates: HashMap<String, f64>) -> Self {
        ExchangeRateTable { rates }
    }

    /// Returns the rate for `currency`, or `None` when the table has no
    /// entry. Entries that are not positive finite numbers violate the
    /// table invariant and are reported as missing so they degrade to
    /// the parity default instead of feeding garbage into arithmetic.
    pub fn rate_for(&self, currency: &str) -> Option<f64> {
        self.rates
            .get(currency)
            .copied()
            .filter(|rate| rate.is_finite() && *rate > 0.0)
    }
}

#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn fetch_rates(&self) -> Result<ExchangeRateTable>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_lookup() {
        let table = ExchangeRateTable::new(HashMap::from([
            ("USD".to_string(), 1.0),
            ("EUR".to_string(), 0.92),
        ]));
        assert_eq!(table.rate_for("EUR"), Some(0.92));
        assert_eq!(table.rate_for("XYZ"), None);
    }

    #[test]
    fn test_invalid_rates_are_reported_as_missing() {
        let table = ExchangeRateTable::new(HashMap::from([
            ("NAN".to_string(), f64::NAN),
            ("INF".to_string(), f64::INFINITY),
            ("ZERO".to_string(), 0.0),
            ("NEG".to_string(), -0.5),
        ]));
        assert_eq!(table.rate_for("NAN"), None);
        assert_eq!(table.rate_for("INF"), None);
        assert_eq!(table.rate_for("ZERO"), None);
        assert_eq!(table.rate_for("NEG"), None);
    }
}
