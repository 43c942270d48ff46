//! Database models for the tariff memory.
//!
//! Row structs use sqlx's FromRow derive for direct database
//! deserialization. Closed vocabularies (service type, patch operation, note
//! category/severity) are enums validated by serde at the API boundary;
//! rows keep the stored text and expose typed accessors.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Transport service a patch or query refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceType {
    #[serde(rename = "groupage")]
    Groupage,
    #[serde(rename = "FTL")]
    Ftl,
    #[serde(rename = "LTL")]
    Ltl,
    #[serde(rename = "other", alias = "otro")]
    Other,
}

impl ServiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::Groupage => "groupage",
            ServiceType::Ftl => "FTL",
            ServiceType::Ltl => "LTL",
            ServiceType::Other => "other",
        }
    }
}

/// Arithmetic operation a patch performs on its target field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatchOperation {
    Set,
    PercentUp,
    PercentDown,
    Add,
    Subtract,
}

impl PatchOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatchOperation::Set => "set",
            PatchOperation::PercentUp => "percent_up",
            PatchOperation::PercentDown => "percent_down",
            PatchOperation::Add => "add",
            PatchOperation::Subtract => "subtract",
        }
    }

    /// Stored rows may predate boundary validation; unknown text yields None.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "set" => Some(PatchOperation::Set),
            "percent_up" => Some(PatchOperation::PercentUp),
            "percent_down" => Some(PatchOperation::PercentDown),
            "add" => Some(PatchOperation::Add),
            "subtract" => Some(PatchOperation::Subtract),
            _ => None,
        }
    }
}

/// Category of an operational note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteCategory {
    Incident,
    Preference,
    Veto,
    #[serde(rename = "SLA")]
    Sla,
    Other,
}

impl NoteCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoteCategory::Incident => "incident",
            NoteCategory::Preference => "preference",
            NoteCategory::Veto => "veto",
            NoteCategory::Sla => "SLA",
            NoteCategory::Other => "other",
        }
    }
}

/// Severity of an operational note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteSeverity {
    Low,
    Medium,
    High,
}

impl NoteSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoteSeverity::Low => "low",
            NoteSeverity::Medium => "medium",
            NoteSeverity::High => "high",
        }
    }
}

/// Conditional price modifier from tariff_patches. Append-only.
#[derive(Debug, Clone, FromRow)]
pub struct TariffPatch {
    pub id: i64,
    pub origin: String,
    pub destination: String,
    pub service_type: String,
    pub weight_min: Option<f64>,
    pub weight_max: Option<f64>,
    pub target_field: String,
    pub operation: String,
    pub value: Decimal,
    pub effective_from: Option<NaiveDate>,
    pub effective_to: Option<NaiveDate>,
    pub note: Option<String>,
    pub author: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TariffPatch {
    pub fn operation(&self) -> Option<PatchOperation> {
        PatchOperation::parse(&self.operation)
    }

    /// Whether this patch applies to the given query.
    ///
    /// Route and service type must match exactly; weight and reference date
    /// must fall inside the patch's bounds, both ends inclusive. A missing
    /// bound is unconstrained.
    pub fn matches(&self, ctx: &QueryContext) -> bool {
        if self.origin != ctx.origin || self.destination != ctx.destination {
            return false;
        }
        if self.service_type != ctx.service_type.as_str() {
            return false;
        }
        if let Some(min) = self.weight_min {
            if ctx.weight < min {
                return false;
            }
        }
        if let Some(max) = self.weight_max {
            if ctx.weight > max {
                return false;
            }
        }
        if let Some(from) = self.effective_from {
            if ctx.reference_date < from {
                return false;
            }
        }
        if let Some(to) = self.effective_to {
            if ctx.reference_date > to {
                return false;
            }
        }
        true
    }
}

/// Advisory note for a route from operational_notes. Append-only.
#[derive(Debug, Clone, FromRow)]
pub struct OperationalNote {
    pub id: i64,
    pub origin: String,
    pub destination: String,
    pub company: Option<String>,
    pub category: String,
    pub severity: String,
    pub note: String,
    pub noted_on: Option<NaiveDate>,
    pub author: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Inputs a pricing query is evaluated against. Defaults (today, base price)
/// are resolved before this is built, so the engine never reads the clock.
#[derive(Debug, Clone)]
pub struct QueryContext {
    pub origin: String,
    pub destination: String,
    pub service_type: ServiceType,
    pub weight: f64,
    pub reference_date: NaiveDate,
}

/// Audit record of one pricing query. Written once, never read back.
#[derive(Debug, Clone)]
pub struct QueryLogEntry {
    pub origin: String,
    pub destination: String,
    pub service_type: ServiceType,
    pub weight: f64,
    pub chosen_carrier: Option<String>,
    pub final_price: Decimal,
    pub duration_ms: i64,
    pub session_id: Option<String>,
    pub username: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_operation_parse_roundtrip() {
        for op in [
            PatchOperation::Set,
            PatchOperation::PercentUp,
            PatchOperation::PercentDown,
            PatchOperation::Add,
            PatchOperation::Subtract,
        ] {
            assert_eq!(PatchOperation::parse(op.as_str()), Some(op));
        }
        assert_eq!(PatchOperation::parse("discount"), None);
        assert_eq!(PatchOperation::parse(""), None);
    }

    #[test]
    fn test_service_type_json_names() {
        let ftl: ServiceType = serde_json::from_str("\"FTL\"").unwrap();
        assert_eq!(ftl, ServiceType::Ftl);
        assert_eq!(serde_json::to_string(&ftl).unwrap(), "\"FTL\"");

        // Legacy Spanish spelling still accepted for "other".
        let other: ServiceType = serde_json::from_str("\"otro\"").unwrap();
        assert_eq!(other, ServiceType::Other);

        assert!(serde_json::from_str::<ServiceType>("\"parcel\"").is_err());
    }

    #[test]
    fn test_note_category_sla_casing() {
        let sla: NoteCategory = serde_json::from_str("\"SLA\"").unwrap();
        assert_eq!(sla, NoteCategory::Sla);
        assert_eq!(sla.as_str(), "SLA");
    }
}
