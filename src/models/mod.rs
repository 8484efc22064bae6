//! Data models for scraped listings and aggregated query results

use serde::{Deserialize, Serialize};

/// One product search result scraped from a marketplace page.
///
/// `price` stays a human-readable, currency-symbol-prefixed string;
/// parsing it into a number only happens transiently during currency
/// conversion. `name` and `price` are always non-empty; `link` is
/// best-effort and may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub name: String,
    pub price: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Listings from both marketplaces for one query.
///
/// Each list follows page-scan order; no deduplication or cross-site
/// sorting is applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceReport {
    pub amazon: Vec<Listing>,
    pub ebay: Vec<Listing>,
}
