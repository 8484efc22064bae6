//! Amazon search page scraper

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use tracing::{error, info, warn};

use crate::error::ScrapeError;
use crate::headers::HeaderPool;
use crate::models::Listing;
use crate::scrapers::{extract_items, fetch_page, resolve_link};
use crate::traits::{Marketplace, ScraperConfig, SiteSelectors};

const DEFAULT_BASE_URL: &str = "https://www.amazon.in";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Scraper for Amazon search results. Listing links on the page are
/// relative and get resolved against the site's base origin.
#[derive(Clone)]
pub struct AmazonScraper {
    client: Client,
    headers: HeaderPool,
    config: ScraperConfig,
}

impl AmazonScraper {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Point the scraper at a different origin. Tests use this to
    /// substitute a local server.
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        let config = ScraperConfig {
            name: "Amazon".to_string(),
            base_url: base_url.to_string(),
            search_url_pattern: format!("{base_url}/s?k={{query}}"),
            selectors: SiteSelectors {
                item_container: ".s-main-slot .s-result-item".to_string(),
                title: "h2 a span".to_string(),
                price: ".a-price .a-offscreen".to_string(),
                link: "h2 a".to_string(),
            },
        };

        Ok(Self {
            client,
            headers: HeaderPool,
            config,
        })
    }
}

#[async_trait]
impl Marketplace for AmazonScraper {
    fn config(&self) -> &ScraperConfig {
        &self.config
    }

    async fn search(&self, product_name: &str, query_token: &str) -> Vec<Listing> {
        let url = self.build_search_url(product_name, query_token);
        info!(site = %self.config.name, %url, "scraping search page");

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
                price: item.price,
                link: item
                    .link
                    .map(|href| resolve_link(&self.config.base_url, &href)),
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
        let amazon = AmazonScraper::new().unwrap();
        assert_eq!(
            amazon.build_search_url("laptop", "Dell+XPS13"),
            "https://www.amazon.in/s?k=laptop+Dell+XPS13"
        );
    }

    #[test]
    fn encodes_each_term_without_losing_the_delimiter() {
        let amazon = AmazonScraper::new().unwrap();
        assert_eq!(
            amazon.build_search_url("coffee maker", "1.5L+stainless steel"),
            "https://www.amazon.in/s?k=coffee%20maker+1.5L+stainless%20steel"
        );
    }

    #[test]
    fn empty_token_searches_the_name_alone() {
        let amazon = AmazonScraper::new().unwrap();
        assert_eq!(
            amazon.build_search_url("laptop", ""),
            "https://www.amazon.in/s?k=laptop"
        );
    }
}
