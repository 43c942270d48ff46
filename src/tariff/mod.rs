//! Tariff memory module: price patches, operational notes and quoting.
//!
//! The selection/application engine lives in `calculators` and is pure; the
//! rest of the module is storage and HTTP plumbing around it.

pub mod calculators;
pub mod models;
pub mod queries;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use calculators::{round_money, DEFAULT_BASE_PRICE, PRICE_FIELD};
pub use routes::router;
pub use services::{compute_quote, QuoteBreakdown};
