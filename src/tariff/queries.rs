//! Database queries for the tariff memory.
//!
//! All append-only inserts and candidate reads; there are no updates or
//! deletes anywhere in this module.

use chrono::Utc;
use sqlx::PgPool;

use crate::error::Result;

use super::models::{OperationalNote, QueryContext, QueryLogEntry, TariffPatch};
use super::requests::{AddNoteRequest, CreatePatchRequest};

/// Candidate patches for a query, earliest first.
///
/// Bounds are inclusive on both ends; a NULL bound is unconstrained. This is
/// the same predicate the engine re-checks in `calculators`.
pub async fn find_candidate_patches(
    pool: &PgPool,
    ctx: &QueryContext,
) -> Result<Vec<TariffPatch>> {
    let patches = sqlx::query_as::<_, TariffPatch>(
        r#"
        SELECT
            id, origin, destination, service_type,
            weight_min, weight_max, target_field, operation, value,
            effective_from, effective_to, note, author, created_at
        FROM tariff_patches
        WHERE origin = $1
          AND destination = $2
          AND service_type = $3
          AND (weight_min IS NULL OR weight_min <= $4)
          AND (weight_max IS NULL OR weight_max >= $4)
          AND (effective_from IS NULL OR effective_from <= $5)
          AND (effective_to IS NULL OR effective_to >= $5)
        ORDER BY created_at ASC, id ASC
        "#,
    )
    .bind(&ctx.origin)
    .bind(&ctx.destination)
    .bind(ctx.service_type.as_str())
    .bind(ctx.weight)
    .bind(ctx.reference_date)
    .fetch_all(pool)
    .await?;

    Ok(patches)
}

/// Append a new tariff patch, returning its id.
pub async fn insert_patch(pool: &PgPool, req: &CreatePatchRequest) -> Result<i64> {
    let (weight_min, weight_max) = match &req.weight_range {
        Some(range) => (range.min, range.max),
        None => (None, None),
    };

    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO tariff_patches (
            origin, destination, service_type, weight_min, weight_max,
            target_field, operation, value, effective_from, effective_to,
            note, author, created_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        RETURNING id
        "#,
    )
    .bind(&req.origin)
    .bind(&req.destination)
    .bind(req.service_type.as_str())
    .bind(weight_min)
    .bind(weight_max)
    .bind(&req.target_field)
    .bind(req.operation.as_str())
    .bind(req.value)
    .bind(req.effective_from)
    .bind(req.effective_to)
    .bind(&req.note)
    .bind(&req.author)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// The most recent notes for a route, newest first.
pub async fn find_recent_notes(
    pool: &PgPool,
    origin: &str,
    destination: &str,
    limit: i64,
) -> Result<Vec<OperationalNote>> {
    let notes = sqlx::query_as::<_, OperationalNote>(
        r#"
        SELECT
            id, origin, destination, company, category, severity,
            note, noted_on, author, created_at
        FROM operational_notes
        WHERE origin = $1 AND destination = $2
        ORDER BY created_at DESC, id DESC
        LIMIT $3
        "#,
    )
    .bind(origin)
    .bind(destination)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(notes)
}

/// Append a new operational note, returning its id.
pub async fn insert_note(pool: &PgPool, req: &AddNoteRequest) -> Result<i64> {
    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO operational_notes (
            origin, destination, company, category, severity,
            note, noted_on, author, created_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING id
        "#,
    )
    .bind(&req.origin)
    .bind(&req.destination)
    .bind(&req.company)
    .bind(req.category.as_str())
    .bind(req.severity.as_str())
    .bind(&req.note)
    .bind(req.date)
    .bind(&req.author)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Append the audit record of one pricing query.
pub async fn insert_query_log(pool: &PgPool, entry: &QueryLogEntry) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO query_log (
            origin, destination, service_type, weight, chosen_carrier,
            final_price, duration_ms, session_id, username, created_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        "#,
    )
    .bind(&entry.origin)
    .bind(&entry.destination)
    .bind(entry.service_type.as_str())
    .bind(entry.weight)
    .bind(&entry.chosen_carrier)
    .bind(entry.final_price)
    .bind(entry.duration_ms)
    .bind(&entry.session_id)
    .bind(&entry.username)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(())
}
