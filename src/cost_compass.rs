//! Query orchestration: fan one logical query out to both
//! marketplaces and merge the results.

use anyhow::Result;
use tracing::info;

use crate::error::QueryError;
use crate::models::PriceReport;
use crate::scrapers::{AmazonScraper, EbayScraper};
use crate::traits::Marketplace;

#[derive(Clone)]
pub struct CostCompass {
    amazon: AmazonScraper,
    ebay: EbayScraper,
}

impl CostCompass {
    pub fn new() -> Result<Self> {
        Ok(Self {
            amazon: AmazonScraper::new()?,
            ebay: EbayScraper::new()?,
        })
    }

    /// Build an orchestrator over pre-configured scrapers. Tests use
    /// this to point both sites at local servers.
    pub fn with_scrapers(amazon: AmazonScraper, ebay: EbayScraper) -> Self {
        Self { amazon, ebay }
    }

    /// Compare prices for a product identified by make and model.
    ///
    /// Make and model may each carry several terms; they collapse into
    /// one "+"-delimited query token before URL embedding.
    pub async fn query_by_make_model(
        &self,
        product_name: &str,
        make: &[String],
        model: &[String],
    ) -> Result<PriceReport, QueryError> {
        let terms: Vec<String> = make.iter().chain(model.iter()).cloned().collect();
        let token = join_terms(&terms);
        self.run_query(product_name, &token).await
    }

    /// Compare prices for a product identified by a specification list.
    ///
    /// An empty list degrades to searching on the product name alone.
    pub async fn query_by_specifications(
        &self,
        product_name: &str,
        specifications: &[String],
    ) -> Result<PriceReport, QueryError> {
        let token = join_terms(specifications);
        self.run_query(product_name, &token).await
    }

    async fn run_query(&self, product_name: &str, token: &str) -> Result<PriceReport, QueryError> {
        let product_name = product_name.trim();
        if product_name.is_empty() {
            return Err(QueryError::MissingProductName);
        }

        info!(product = product_name, query = token, "running price comparison query");

        // Independent requests, so both sites run concurrently; each
        // is bounded by its own client timeout.
        let (amazon, ebay) = tokio::join!(
            self.amazon.search(product_name, token),
            self.ebay.search(product_name, token),
        );

        info!(
            amazon = amazon.len(),
            ebay = ebay.len(),
            "price comparison query finished"
        );

        Ok(PriceReport { amazon, ebay })
    }
}

/// Join multi-valued query terms into a single "+"-delimited token,
/// dropping blank entries.
fn join_terms(terms: &[String]) -> String {
    terms
        .iter()
        .map(|term| term.trim())
        .filter(|term| !term.is_empty())
        .collect::<Vec<_>>()
        .join("+")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(terms: &[&str]) -> Vec<String> {
        terms.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn multi_valued_terms_collapse_to_one_token() {
        let terms = strings(&["V8", "Turbo", "2020"]);
        assert_eq!(join_terms(&terms), "V8+Turbo+2020");
    }

    #[test]
    fn empty_term_list_joins_to_nothing() {
        assert_eq!(join_terms(&[]), "");
    }

    #[test]
    fn blank_terms_are_dropped() {
        let terms = strings(&["Dell", "  ", "XPS13"]);
        assert_eq!(join_terms(&terms), "Dell+XPS13");
    }

    #[tokio::test]
    async fn blank_product_name_is_rejected_before_any_request() {
        let compass = CostCompass::new().unwrap();
        let err = compass
            .query_by_specifications("   ", &strings(&["16GB"]))
            .await
            .unwrap_err();
        assert_eq!(err, QueryError::MissingProductName);
    }
}
