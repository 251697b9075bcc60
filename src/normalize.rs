//! Price normalization to the reference currency.

use crate::rates::{RateProvider, REFERENCE_CURRENCY};
use tracing::debug;

/// An amount of money in a named currency.
#[derive(Debug, Clone, PartialEq)]
pub struct MonetaryAmount {
    pub amount: f64,
    pub currency: String,
}

impl MonetaryAmount {
    pub fn new(amount: f64, currency: &str) -> Self {
        MonetaryAmount {
            amount,
            currency: currency.to_string(),
        }
    }
}

/// Converts `price` to [`REFERENCE_CURRENCY`] using rates fetched from
/// `provider`.
///
/// The caller never observes an error. Failure handling is fail-open by
/// contract:
/// - a failed fetch returns the original amount unchanged, in its
///   original currency;
/// - a currency with no usable rate in the fetched table is assumed to
///   be at parity (rate 1) with the reference currency.
pub async fn to_reference_currency(
    price: &MonetaryAmount,
    provider: &dyn RateProvider,
) -> MonetaryAmount {
    let table = match provider.fetch_rates().await {
        Ok(table) => table,
        Err(e) => {
            debug!("Rate fetch failed, keeping {} {}: {e}", price.amount, price.currency);
            return price.clone();
        }
    };

    let rate = table.rate_for(&price.currency).unwrap_or(1.0);
    MonetaryAmount {
        amount: price.amount / rate,
        currency: REFERENCE_CURRENCY.to_string(),
    }
}
