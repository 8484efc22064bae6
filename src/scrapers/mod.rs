//! Marketplace-specific scraper implementations and shared extraction plumbing

use reqwest::Client;
use reqwest::header::HeaderMap;
use scraper::{Html, Selector};
use tracing::error;

use crate::error::ScrapeError;
use crate::traits::SiteSelectors;

pub mod amazon;
pub mod ebay;

pub use amazon::AmazonScraper;
pub use ebay::EbayScraper;

/// Case-insensitive marker for an anti-bot interstitial.
const ANTI_BOT_MARKER: &str = "captcha";

/// Title/price/link fragments pulled from one item container, before
/// any site-specific post-processing.
pub(crate) struct RawItem {
    pub title: String,
    pub price: String,
    pub link: Option<String>,
}

/// Fetch a search page body.
///
/// Non-2xx statuses and network-level failures surface as typed errors
/// for the caller to log and resolve to an empty result. A body that
/// contains the anti-bot marker is reported as `AntiBotDetected` even
/// when the rest of it would parse.
pub(crate) async fn fetch_page(
    client: &Client,
    headers: HeaderMap,
    url: &str,
) -> Result<String, ScrapeError> {
    let response = client.get(url).headers(headers).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::HttpStatus(status));
    }

    let body = response.text().await?;

    if body.to_lowercase().contains(ANTI_BOT_MARKER) {
        return Err(ScrapeError::AntiBotDetected);
    }

    Ok(body)
}

/// Walk the item containers in a search page and pull out raw
/// title/price/link triples.
///
/// A container missing either title or price is skipped entirely;
/// partial records are never emitted. Links are returned as found in
/// the page, relative or absolute.
pub(crate) fn extract_items(html: &str, selectors: &SiteSelectors) -> Vec<RawItem> {
    let Ok(item_selector) = Selector::parse(&selectors.item_container) else {
        error!(selector = %selectors.item_container, "invalid item container selector");
        return Vec::new();
    };
    let Ok(title_selector) = Selector::parse(&selectors.title) else {
        error!(selector = %selectors.title, "invalid title selector");
        return Vec::new();
    };
    let Ok(price_selector) = Selector::parse(&selectors.price) else {
        error!(selector = %selectors.price, "invalid price selector");
        return Vec::new();
    };
    let Ok(link_selector) = Selector::parse(&selectors.link) else {
        error!(selector = %selectors.link, "invalid link selector");
        return Vec::new();
    };

    let document = Html::parse_document(html);
    let mut items = Vec::new();

    for container in document.select(&item_selector) {
        let title = container
            .select(&title_selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string());
        let price = container
            .select(&price_selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string());

        let (Some(title), Some(price)) = (title, price) else {
            continue;
        };
        if title.is_empty() || price.is_empty() {
            continue;
        }

        let link = container
            .select(&link_selector)
            .next()
            .and_then(|el| el.value().attr("href"))
            .map(str::to_string);

        items.push(RawItem { title, price, link });
    }

    items
}

/// Resolve a possibly-relative href against the site's base origin.
pub(crate) fn resolve_link(base_url: &str, href: &str) -> String {
    if href.starts_with("http") {
        href.to_string()
    } else {
        format!("{base_url}{href}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selectors() -> SiteSelectors {
        SiteSelectors {
            item_container: ".result".to_string(),
            title: ".title".to_string(),
            price: ".price".to_string(),
            link: "a".to_string(),
        }
    }

    #[test]
    fn skips_containers_missing_title_or_price() {
        let html = r#"
            <div class="result">
                <span class="title">Laptop Stand</span>
                <span class="price">$25.00</span>
                <a href="/item/1">view</a>
            </div>
            <div class="result">
                <span class="title">No price here</span>
            </div>
            <div class="result">
                <span class="price">$5.00</span>
            </div>
        "#;

        let items = extract_items(html, &selectors());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Laptop Stand");
        assert_eq!(items[0].price, "$25.00");
        assert_eq!(items[0].link.as_deref(), Some("/item/1"));
    }

    #[test]
    fn whitespace_only_fields_do_not_produce_items() {
        let html = r#"
            <div class="result">
                <span class="title">   </span>
                <span class="price">$9.99</span>
            </div>
        "#;

        assert!(extract_items(html, &selectors()).is_empty());
    }

    #[test]
    fn link_is_optional() {
        let html = r#"
            <div class="result">
                <span class="title">Keyboard</span>
                <span class="price">$49.00</span>
            </div>
        "#;

        let items = extract_items(html, &selectors());
        assert_eq!(items.len(), 1);
        assert!(items[0].link.is_none());
    }

    #[test]
    fn resolves_relative_links_only() {
        assert_eq!(
            resolve_link("https://example.in", "/item/42"),
            "https://example.in/item/42"
        );
        assert_eq!(
            resolve_link("https://example.in", "https://other.example/item"),
            "https://other.example/item"
        );
    }
}
