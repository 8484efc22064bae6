//! USD to INR currency conversion
//!
//! eBay listings are priced in dollars; before they go into a report
//! their prices are converted using a live exchange rate. The rate is
//! fetched fresh once per extraction pass and never cached across
//! queries.

use std::collections::HashMap;

use reqwest::Client;
use serde::Deserialize;
use tracing::{error, warn};

use crate::error::ScrapeError;

/// Exchange-rate lookup service, USD base.
pub const DEFAULT_RATE_ENDPOINT: &str = "https://api.exchangerate-api.com/v4/latest/USD";

#[derive(Debug, Deserialize)]
struct RateResponse {
    rates: HashMap<String, f64>,
}

/// Fetches the USD→INR exchange rate from a configurable endpoint.
#[derive(Debug, Clone)]
pub struct CurrencyConverter {
    client: Client,
    endpoint: String,
}

impl CurrencyConverter {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Fetch the current USD→INR rate.
    ///
    /// Network failure, a non-2xx response, or a body without an INR
    /// entry all resolve to `RateUnavailable` so the caller can skip
    /// conversion-dependent extraction instead of crashing.
    pub async fn fetch_rate(&self) -> Result<f64, ScrapeError> {
        let response = self.client.get(&self.endpoint).send().await.map_err(|e| {
            error!("error fetching exchange rates: {e}");
            ScrapeError::RateUnavailable
        })?;

        let status = response.status();
        if !status.is_success() {
            error!(%status, "exchange rate service returned an error status");
            return Err(ScrapeError::RateUnavailable);
        }

        let body: RateResponse = response.json().await.map_err(|e| {
            error!("could not decode exchange rate response: {e}");
            ScrapeError::RateUnavailable
        })?;

        body.rates.get("INR").copied().ok_or_else(|| {
            error!("INR missing from exchange rate response");
            ScrapeError::RateUnavailable
        })
    }
}

/// Convert a `$`-prefixed price string using the given rate, rounding
/// to 2 decimals (half away from zero).
///
/// Price ranges ("$10.00 to $20.00") use the lower bound as the
/// representative price. That is a deliberate simplification, not a
/// bug; callers wanting both bounds need a different policy.
pub fn convert(price_text: &str, rate: f64) -> Result<f64, ScrapeError> {
    let lower_bound = match price_text.split_once(" to ") {
        Some((lower, _)) => lower,
        None => price_text,
    };

    let cleaned = lower_bound.replace(['$', ','], "");
    let amount: f64 = cleaned.trim().parse().map_err(|_| {
        warn!(price = %price_text, "could not parse price text");
        ScrapeError::MalformedPrice(price_text.to_string())
    })?;

    Ok((amount * rate * 100.0).round() / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_and_rounds_to_two_decimals() {
        assert_eq!(convert("$10.00", 80.0).unwrap(), 800.0);
        assert_eq!(convert("$19.99", 83.25).unwrap(), 1664.17);
    }

    #[test]
    fn range_uses_the_lower_bound() {
        assert_eq!(convert("$10 to $20", 80.0).unwrap(), 800.0);
        assert_eq!(convert("$12.50 to $30.00", 2.0).unwrap(), 25.0);
    }

    #[test]
    fn strips_thousands_separators() {
        assert_eq!(convert("$1,234.56", 1.0).unwrap(), 1234.56);
    }

    #[test]
    fn rounds_half_away_from_zero() {
        // 0.25 * 0.5 = 0.125 exactly in binary; half-to-even would
        // give 0.12 here.
        assert_eq!(convert("$0.25", 0.5).unwrap(), 0.13);
    }

    #[test]
    fn monotonic_in_rate() {
        let low = convert("$10.00", 80.0).unwrap();
        let high = convert("$10.00", 81.0).unwrap();
        assert!(low < high);
    }

    #[test]
    fn rejects_non_numeric_price() {
        let err = convert("Free shipping", 80.0).unwrap_err();
        assert!(matches!(err, ScrapeError::MalformedPrice(text) if text == "Free shipping"));
    }
}
