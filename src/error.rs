//! Error types for scraping and query validation

use thiserror::Error;

/// Scraping-side failures.
///
/// Every variant degrades to fewer or zero listings for the affected
/// marketplace; none of them terminate a query. Each is logged where it
/// is resolved, with the URL, status, or offending text that caused it.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected HTTP status: {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error("anti-bot challenge detected in response body")]
    AntiBotDetected,

    #[error("exchange rate unavailable")]
    RateUnavailable,

    #[error("malformed price text: {0:?}")]
    MalformedPrice(String),
}

/// Request validation failures raised at the orchestrator boundary,
/// before any network activity begins. The only errors a caller sees.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("product name is required")]
    MissingProductName,
}
