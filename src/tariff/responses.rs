//! Response DTOs for the tariff API.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::models::{OperationalNote, TariffPatch};

/// Response for a pricing query.
///
/// `applied_patches` lists the patches that actually changed the price, in
/// application order - not every stored candidate - so callers can audit the
/// computation.
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub base_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub final_price: Decimal,
    pub applied_patches: Vec<AppliedPatch>,
    pub notes: Vec<RouteNote>,
}

/// One applied patch as reported to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct AppliedPatch {
    pub target_field: String,
    pub operation: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub value: Decimal,
    pub note: Option<String>,
    pub author: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&TariffPatch> for AppliedPatch {
    fn from(patch: &TariffPatch) -> Self {
        Self {
            target_field: patch.target_field.clone(),
            operation: patch.operation.clone(),
            value: patch.value,
            note: patch.note.clone(),
            author: patch.author.clone(),
            created_at: patch.created_at,
        }
    }
}

/// Advisory note surfaced alongside a quote.
#[derive(Debug, Clone, Serialize)]
pub struct RouteNote {
    pub company: Option<String>,
    pub category: String,
    pub severity: String,
    pub note: String,
    pub date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl From<&OperationalNote> for RouteNote {
    fn from(note: &OperationalNote) -> Self {
        Self {
            company: note.company.clone(),
            category: note.category.clone(),
            severity: note.severity.clone(),
            note: note.note.clone(),
            date: note.noted_on,
            created_at: note.created_at,
        }
    }
}

/// Acknowledgement for append-only inserts.
#[derive(Debug, Serialize)]
pub struct AckResponse {
    pub ok: bool,
}
