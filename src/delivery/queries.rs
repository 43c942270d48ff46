//! Database queries for delivery-note ingestion.

use chrono::Utc;
use sqlx::PgPool;

use crate::error::Result;

use super::requests::DeliveryNotePayload;

/// Persist one delivery note as a parent/child pair, returning the generated
/// parent id.
///
/// Header and lines are one document, so they go in a single transaction; a
/// failure on any line leaves nothing behind.
pub async fn insert_delivery_note(pool: &PgPool, payload: &DeliveryNotePayload) -> Result<i64> {
    let mut tx = pool.begin().await?;

    let header = &payload.header;
    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO delivery_notes (
            route_sheet_number, issued_on, carrier_name, plate_number,
            tax_id, booking_ref, gross_weight_total, package_count_total,
            created_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING id
        "#,
    )
    .bind(&header.route_sheet_number)
    .bind(&header.issued_on)
    .bind(&header.carrier_name)
    .bind(&header.plate_number)
    .bind(&header.tax_id)
    .bind(&header.booking_ref)
    .bind(header.gross_weight_total)
    .bind(header.package_count_total)
    .bind(Utc::now())
    .fetch_one(&mut *tx)
    .await?;

    for line in &payload.lines {
        sqlx::query(
            r#"
            INSERT INTO delivery_note_lines (
                delivery_note_id, document_number, counterparty, raw_address,
                postal_code, country, package_count, gross_weight
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(id)
        .bind(&line.document_number)
        .bind(&line.counterparty)
        .bind(&line.raw_address)
        .bind(&line.postal_code)
        .bind(&line.country)
        .bind(line.package_count)
        .bind(line.gross_weight)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(id)
}
