//! Cost Compass scraping core
//!
//! Given a product name plus either a make/model pair or a list of
//! specifications, this crate queries Amazon and eBay search pages,
//! extracts title/price/link listings, converts eBay's dollar prices
//! to rupees, and returns the merged results. Scraping-side failures
//! never surface to the caller; they degrade to fewer or zero listings
//! with a log trail. The web-API layer, user accounts, and query
//! history live elsewhere and consume this crate through
//! [`CostCompass`].

pub mod cost_compass;
pub mod currency;
pub mod error;
pub mod headers;
pub mod models;
pub mod scrapers;
pub mod traits;

pub use cost_compass::CostCompass;
pub use error::{QueryError, ScrapeError};
pub use models::{Listing, PriceReport};
