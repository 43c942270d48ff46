//! Response DTOs for delivery-note ingestion.

use serde::Serialize;

/// Acknowledgement carrying the generated parent id.
#[derive(Debug, Serialize)]
pub struct DeliveryAckResponse {
    pub ok: bool,
    pub delivery_note_id: i64,
}
