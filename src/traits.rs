//! Traits and interfaces for marketplace-agnostic scraping

use async_trait::async_trait;

use crate::models::Listing;

/// Configuration for a marketplace scraper
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Display name for the marketplace
    pub name: String,
    /// Base URL, used to resolve relative listing links
    pub base_url: String,
    /// Search URL pattern with {query} placeholder
    pub search_url_pattern: String,
    /// CSS selectors for extracting data
    pub selectors: SiteSelectors,
}

/// CSS selectors for different parts of a search result listing
#[derive(Debug, Clone)]
pub struct SiteSelectors {
    /// Container selector for individual listings
    pub item_container: String,
    /// Title selector within the container
    pub title: String,
    /// Price selector within the container
    pub price: String,
    /// Listing link selector within the container
    pub link: String,
}

/// Trait for marketplace-specific scrapers
#[async_trait]
pub trait Marketplace: Send + Sync {
    /// Get the configuration for this scraper
    fn config(&self) -> &ScraperConfig;

    /// Search the marketplace for listings matching the query.
    ///
    /// Every scraping-side failure (network error, HTTP error status,
    /// anti-bot challenge, unavailable exchange rate) is logged and
    /// resolved to fewer or zero listings; this never fails outright.
    ///
    /// # Arguments
    /// * `product_name` - The product being searched for
    /// * `query_token` - Already-joined "+"-delimited query terms, may be empty
    async fn search(&self, product_name: &str, query_token: &str) -> Vec<Listing>;

    /// Build the complete search URL for a query.
    ///
    /// Each "+"-separated segment is percent-encoded individually so
    /// the delimiter survives embedding in the URL.
    fn build_search_url(&self, product_name: &str, query_token: &str) -> String {
        let query = if query_token.is_empty() {
            product_name.to_string()
        } else {
            format!("{product_name}+{query_token}")
        };

        let encoded = query
            .split('+')
            .map(|term| urlencoding::encode(term).into_owned())
            .collect::<Vec<_>>()
            .join("+");

        self.config().search_url_pattern.replace("{query}", &encoded)
    }
}
