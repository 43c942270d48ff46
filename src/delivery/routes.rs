//! HTTP handler for delivery-note ingestion.

use axum::body::Bytes;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};

use crate::error::{AppError, Result};
use crate::AppState;

use super::queries;
use super::requests::DeliveryNotePayload;
use super::responses::DeliveryAckResponse;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/delivery-notes", post(ingest))
}

/// Ingest one scanned delivery note (header + lines).
///
/// The raw body is the uploaded document JSON. It is validated as a whole
/// before any write, so a malformed payload never leaves a partial document
/// behind.
async fn ingest(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<DeliveryAckResponse>> {
    let payload: DeliveryNotePayload = serde_json::from_slice(&body)
        .map_err(|e| AppError::Validation(format!("invalid delivery note JSON: {e}")))?;

    let id = queries::insert_delivery_note(&state.db, &payload).await?;
    tracing::info!(
        delivery_note_id = id,
        lines = payload.lines.len(),
        "delivery note ingested"
    );

    Ok(Json(DeliveryAckResponse {
        ok: true,
        delivery_note_id: id,
    }))
}
