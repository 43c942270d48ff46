//! Request DTOs for the tariff API.
//!
//! Enums are validated here by serde, so an unknown service type or
//! operation is rejected with a 4xx before anything touches the database.
//! Decimal amounts travel as JSON strings.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::models::{NoteCategory, NoteSeverity, PatchOperation, ServiceType};

/// Request to price a route.
#[derive(Debug, Deserialize)]
pub struct QuoteTariffRequest {
    pub origin: String,
    pub destination: String,
    pub service_type: ServiceType,
    pub weight: f64,
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub base_price: Option<Decimal>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub chosen_carrier: Option<String>,
}

/// Inclusive weight range of a patch.
#[derive(Debug, Deserialize)]
pub struct WeightRange {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

/// Request to store a tariff patch.
///
/// The `route_from`/`route_to` aliases match the upstream tool-call schema.
#[derive(Debug, Deserialize)]
pub struct CreatePatchRequest {
    #[serde(alias = "route_from")]
    pub origin: String,
    #[serde(alias = "route_to")]
    pub destination: String,
    pub service_type: ServiceType,
    #[serde(default)]
    pub weight_range: Option<WeightRange>,
    pub target_field: String,
    pub operation: PatchOperation,
    #[serde(with = "rust_decimal::serde::str")]
    pub value: Decimal,
    #[serde(default)]
    pub effective_from: Option<NaiveDate>,
    #[serde(default)]
    pub effective_to: Option<NaiveDate>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default = "default_author")]
    pub author: String,
}

/// Request to store an operational note for a route.
#[derive(Debug, Deserialize)]
pub struct AddNoteRequest {
    pub origin: String,
    pub destination: String,
    #[serde(default)]
    pub company: Option<String>,
    pub category: NoteCategory,
    pub severity: NoteSeverity,
    pub note: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default = "default_author")]
    pub author: String,
}

fn default_author() -> String {
    "gpt".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_patch_request_route_aliases() {
        let req: CreatePatchRequest = serde_json::from_str(
            r#"{
                "route_from": "Valencia",
                "route_to": "Milano",
                "service_type": "groupage",
                "target_field": "precio",
                "operation": "percent_up",
                "value": "7.5"
            }"#,
        )
        .unwrap();

        assert_eq!(req.origin, "Valencia");
        assert_eq!(req.destination, "Milano");
        assert_eq!(req.operation, PatchOperation::PercentUp);
        assert_eq!(req.value, dec!(7.5));
        assert_eq!(req.author, "gpt");
        assert!(req.weight_range.is_none());
    }

    #[test]
    fn test_patch_request_rejects_unknown_operation() {
        let err = serde_json::from_str::<CreatePatchRequest>(
            r#"{
                "origin": "Valencia",
                "destination": "Milano",
                "service_type": "groupage",
                "target_field": "precio",
                "operation": "multiply",
                "value": "2"
            }"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_quote_request_defaults() {
        let req: QuoteTariffRequest = serde_json::from_str(
            r#"{
                "origin": "Valencia",
                "destination": "Milano",
                "service_type": "FTL",
                "weight": 850.0
            }"#,
        )
        .unwrap();

        assert!(req.reference_date.is_none());
        assert!(req.base_price.is_none());
        assert!(req.session_id.is_none());

        let req: QuoteTariffRequest = serde_json::from_str(
            r#"{
                "origin": "Valencia",
                "destination": "Milano",
                "service_type": "FTL",
                "weight": 850.0,
                "reference_date": "2024-06-15",
                "base_price": "1200.50"
            }"#,
        )
        .unwrap();

        assert_eq!(
            req.reference_date,
            Some(chrono::NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
        );
        assert_eq!(req.base_price, Some(dec!(1200.50)));
    }
}
