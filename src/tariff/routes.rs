//! HTTP handlers for the tariff API.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};

use crate::error::Result;
use crate::AppState;

use super::requests::{AddNoteRequest, CreatePatchRequest, QuoteTariffRequest};
use super::responses::{AckResponse, QuoteResponse};
use super::{queries, services};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/tariff/quote", post(quote))
        .route("/api/tariff/patches", post(create_patch))
        .route("/api/notes", post(add_note))
}

/// Price a route by folding stored patches into the base price.
async fn quote(
    State(state): State<AppState>,
    Json(req): Json<QuoteTariffRequest>,
) -> Result<Json<QuoteResponse>> {
    let response = services::quote_tariff(&state.db, &state.cache, req).await?;
    Ok(Json(response))
}

/// Store a new tariff patch.
async fn create_patch(
    State(state): State<AppState>,
    Json(req): Json<CreatePatchRequest>,
) -> Result<Json<AckResponse>> {
    let id = queries::insert_patch(&state.db, &req).await?;
    tracing::info!(
        patch_id = id,
        origin = %req.origin,
        destination = %req.destination,
        operation = req.operation.as_str(),
        "tariff patch stored"
    );
    Ok(Json(AckResponse { ok: true }))
}

/// Store a new operational note for a route.
async fn add_note(
    State(state): State<AppState>,
    Json(req): Json<AddNoteRequest>,
) -> Result<Json<AckResponse>> {
    let id = queries::insert_note(&state.db, &req).await?;
    state
        .cache
        .invalidate_route(&req.origin, &req.destination)
        .await;
    tracing::info!(
        note_id = id,
        origin = %req.origin,
        destination = %req.destination,
        severity = req.severity.as_str(),
        "operational note stored"
    );
    Ok(Json(AckResponse { ok: true }))
}
