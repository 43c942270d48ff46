//! Payload DTOs for delivery-note ingestion.
//!
//! Documents arrive as JSON extracted from scanned delivery notes, so every
//! field is optional raw text or a number as the extractor produced it. The
//! Spanish aliases match the extractor's original key names. Structure is
//! validated as a whole before anything is written: a payload without a
//! `header` object or a `lines` array fails to parse.

use serde::Deserialize;

/// One scanned delivery-note document: a header plus its line items.
#[derive(Debug, Deserialize)]
pub struct DeliveryNotePayload {
    pub header: DeliveryHeader,
    #[serde(alias = "lineas")]
    pub lines: Vec<DeliveryLine>,
}

/// Document-level fields of a delivery note.
#[derive(Debug, Deserialize)]
pub struct DeliveryHeader {
    #[serde(default, alias = "hoja_ruta_num")]
    pub route_sheet_number: Option<String>,
    /// Raw document date, stored as written.
    #[serde(default, alias = "fecha")]
    pub issued_on: Option<String>,
    #[serde(default, alias = "transportista_redactado")]
    pub carrier_name: Option<String>,
    #[serde(default, alias = "matricula")]
    pub plate_number: Option<String>,
    #[serde(default, alias = "cif")]
    pub tax_id: Option<String>,
    #[serde(default, alias = "booking")]
    pub booking_ref: Option<String>,
    #[serde(default, alias = "bruto_total")]
    pub gross_weight_total: Option<f64>,
    #[serde(default, alias = "bultos_total")]
    pub package_count_total: Option<i64>,
}

/// One line item of a delivery note.
#[derive(Debug, Deserialize)]
pub struct DeliveryLine {
    #[serde(default, alias = "albaran_num", alias = "albaran")]
    pub document_number: Option<String>,
    #[serde(default, alias = "cliente_proveedor")]
    pub counterparty: Option<String>,
    #[serde(default, alias = "direccion_ciudad_raw")]
    pub raw_address: Option<String>,
    #[serde(default, alias = "cp")]
    pub postal_code: Option<String>,
    #[serde(default, alias = "pais")]
    pub country: Option<String>,
    #[serde(default, alias = "bultos")]
    pub package_count: Option<i64>,
    #[serde(default, alias = "peso_bruto")]
    pub gross_weight: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_parses_with_spanish_aliases() {
        let payload: DeliveryNotePayload = serde_json::from_str(
            r#"{
                "header": {
                    "hoja_ruta_num": "HR-2024-118",
                    "fecha": "12/06/2024",
                    "transportista_redactado": "Transportes Serrano SL",
                    "matricula": "1234-KLM",
                    "bruto_total": 1840.5,
                    "bultos_total": 12
                },
                "lineas": [
                    {
                        "albaran": "ALB-9921",
                        "cliente_proveedor": "Muebles Soria",
                        "cp": "42003",
                        "pais": "ES",
                        "bultos": 4,
                        "peso_bruto": 610.0
                    }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(payload.header.route_sheet_number.as_deref(), Some("HR-2024-118"));
        assert_eq!(payload.header.package_count_total, Some(12));
        assert_eq!(payload.lines.len(), 1);
        assert_eq!(payload.lines[0].document_number.as_deref(), Some("ALB-9921"));
        assert_eq!(payload.lines[0].package_count, Some(4));
    }

    #[test]
    fn test_payload_requires_header_and_lines() {
        assert!(serde_json::from_str::<DeliveryNotePayload>(r#"{"lines": []}"#).is_err());
        assert!(serde_json::from_str::<DeliveryNotePayload>(r#"{"header": {}}"#).is_err());
        assert!(
            serde_json::from_str::<DeliveryNotePayload>(r#"{"header": 5, "lines": []}"#).is_err()
        );
        assert!(serde_json::from_str::<DeliveryNotePayload>(
            r#"{"header": {}, "lines": ["not an object"]}"#
        )
        .is_err());
    }

    #[test]
    fn test_empty_header_and_lines_are_valid() {
        let payload: DeliveryNotePayload =
            serde_json::from_str(r#"{"header": {}, "lines": []}"#).unwrap();
        assert!(payload.header.route_sheet_number.is_none());
        assert!(payload.lines.is_empty());
    }
}
