//! eBay search page scraper
//!
//! eBay listings are priced in USD, so this scraper carries a
//! `CurrencyConverter` and rewrites dollar prices into rupees before
//! emitting them. The exchange rate is fetched once per extraction
//! pass; if it cannot be fetched the whole pass is skipped and the
//! site contributes no listings. Fail-closed: no exchange rate means
//! no eBay results at all, never untranslated dollar prices.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use tracing::{error, info, warn};

use crate::currency::{self, CurrencyConverter, DEFAULT_RATE_ENDPOINT};
use crate::error::ScrapeError;
use crate::headers::HeaderPool;
use crate::models::Listing;
use crate::scrapers::{extract_items, fetch_page};
use crate::traits::{Marketplace, ScraperConfig, SiteSelectors};

const DEFAULT_BASE_URL: &str = "https://www.ebay.in";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Environment override for the exchange-rate endpoint.
pub const RATE_API_ENV: &str = "COST_COMPASS_RATE_API";

#[derive(Clone)]
pub struct EbayScraper {
    client: Client,
    headers: HeaderPool,
    config: ScraperConfig,
    converter: CurrencyConverter,
}

impl EbayScraper {
    pub fn new() -> Result<Self> {
        let rate_endpoint =
            std::env::var(RATE_API_ENV).unwrap_or_else(|_| DEFAULT_RATE_ENDPOINT.to_string());
        Self::with_endpoints(DEFAULT_BASE_URL, &rate_endpoint)
    }

    /// Point the scraper at a different origin and rate service. Tests
    /// use this to substitute local servers.
    pub fn with_endpoints(base_url: &str, rate_endpoint: &str) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        let config = ScraperConfig {
            name: "eBay".to_string(),
            base_url: base_url.to_string(),
            search_url_pattern: format!("{base_url}/sch/i.html?_nkw={{query}}"),
            selectors: SiteSelectors {
                item_container: ".s-item".to_string(),
                title: ".s-item__title".to_string(),
                price: ".s-item__price".to_string(),
                link: ".s-item__link".to_string(),
            },
        };

        let converter = CurrencyConverter::new(client.clone(), rate_endpoint);

        Ok(Self {
            client,
            headers: HeaderPool,
            config,
            converter,
        })
    }

    /// Rewrite a dollar price into rupees. A price that fails to parse
    /// after the `$` check is emitted as "N/A" with the literal logged;
    /// non-dollar prices pass through untouched.
    fn translate_price(&self, price: String, rate: f64) -> String {
        if !price.contains('$') {
            return price;
        }

        match currency::convert(&price, rate) {
            Ok(rupees) => format!("₹{rupees:.2}"),
            Err(_) => "N/A".to_string(),
        }
    }
}

#[async_trait]
impl Marketplace for EbayScraper {
    fn config(&self) -> &ScraperConfig {
        &self.config
    }

    async fn search(&self, product_name: &str, query_token: &str) -> Vec<Listing> {
        let url = self.build_search_url(product_name, query_token);
        info!(site = %self.config.name, %url, "scraping search page");

        // One rate fetch per extraction pass, not per item.
        let rate = match self.converter.fetch_rate().await {
            Ok(rate) => rate,
            Err(e) => {
                warn!(site = %self.config.name, "unable to fetch exchange rate, skipping extraction: {e}");
                return Vec::new();
            }
        };

        let body = match fetch_page(&self.client, self.headers.next_headers(), &url).await {
            Ok(body) => body,
            Err(ScrapeError::AntiBotDetected) => {
                warn!(site = %self.config.name, %url, "anti-bot challenge encountered, aborting extraction");
                return Vec::new();
            }
            Err(e) => {
                error!(site = %self.config.name, %url, "failed to fetch search page: {e}");
                return Vec::new();
            }
        };

        let listings: Vec<Listing> = extract_items(&body, &self.config.selectors)
            .into_iter()
            .map(|item| Listing {
                name: item.title,
                price: self.translate_price(item.price, rate),
                link: item.link,
            })
            .collect();

        if listings.is_empty() {
            info!(site = %self.config.name, "no products found for the given query");
        }

        listings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_search_url_with_joined_token() {
        let ebay = EbayScraper::with_endpoints("https://www.ebay.in", DEFAULT_RATE_ENDPOINT).unwrap();
        assert_eq!(
            ebay.build_search_url("laptop", "Dell+XPS13"),
            "https://www.ebay.in/sch/i.html?_nkw=laptop+Dell+XPS13"
        );
    }

    #[test]
    fn dollar_prices_translate_and_others_pass_through() {
        let ebay = EbayScraper::with_endpoints("https://www.ebay.in", DEFAULT_RATE_ENDPOINT).unwrap();
        assert_eq!(ebay.translate_price("$10.00".to_string(), 80.0), "₹800.00");
        assert_eq!(ebay.translate_price("₹45,000".to_string(), 80.0), "₹45,000");
        assert_eq!(ebay.translate_price("$oops".to_string(), 80.0), "N/A");
    }
}
