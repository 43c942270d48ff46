//! Tariff memory service.
//!
//! Stores freight-tariff price patches, operational route notes and scanned
//! delivery notes, and answers pricing queries by folding the stored patches
//! into a base price.

pub mod cache;
pub mod config;
pub mod db;
pub mod delivery;
pub mod error;
pub mod tariff;

use sqlx::PgPool;

use crate::cache::AppCache;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub cache: AppCache,
}
