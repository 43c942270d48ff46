//! Quote orchestration: storage reads, the pure engine, audit logging.
//!
//! The engine functions in `calculators` take data, not a connection; this
//! module is the only place that wires them to the database and the clock.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::debug;

use crate::cache::AppCache;
use crate::error::Result;

use super::calculators::{self, round_money, DEFAULT_BASE_PRICE, PRICE_FIELD};
use super::models::{OperationalNote, QueryContext, QueryLogEntry, TariffPatch};
use super::queries;
use super::requests::QuoteTariffRequest;
use super::responses::{AppliedPatch, QuoteResponse, RouteNote};

/// Notes surfaced with each quote.
const NOTES_LIMIT: i64 = 5;

/// Result of the pure quote computation.
#[derive(Debug, Clone)]
pub struct QuoteBreakdown {
    pub base_price: Decimal,
    pub final_price: Decimal,
    /// Patches that were applied, in application order.
    pub applied: Vec<TariffPatch>,
}

/// Select and apply every matching price patch to `base_price`.
///
/// Pure over already-fetched candidates, so it can be tested without a
/// database. Candidates targeting fields other than the price are carried
/// along by storage but never change the result.
pub fn compute_quote(
    base_price: Decimal,
    candidates: &[TariffPatch],
    ctx: &QueryContext,
) -> QuoteBreakdown {
    let selected = calculators::select_applicable(candidates, ctx, PRICE_FIELD);
    let final_price = calculators::apply_patches(base_price, &selected);

    QuoteBreakdown {
        base_price: round_money(base_price, 2),
        final_price,
        applied: selected.into_iter().cloned().collect(),
    }
}

/// Answer one pricing query end to end.
///
/// Defaults ("today", base price) are resolved here so the engine itself
/// stays deterministic. The audit row is written after the computation and
/// records exactly the price the caller gets back.
pub async fn quote_tariff(
    pool: &PgPool,
    cache: &AppCache,
    req: QuoteTariffRequest,
) -> Result<QuoteResponse> {
    let started = Instant::now();

    let ctx = QueryContext {
        origin: req.origin,
        destination: req.destination,
        service_type: req.service_type,
        weight: req.weight,
        reference_date: req.reference_date.unwrap_or_else(|| Utc::now().date_naive()),
    };
    let base_price = req.base_price.unwrap_or(DEFAULT_BASE_PRICE);

    let candidates = queries::find_candidate_patches(pool, &ctx).await?;
    let breakdown = compute_quote(base_price, &candidates, &ctx);
    let duration_ms = started.elapsed().as_millis() as i64;

    queries::insert_query_log(
        pool,
        &QueryLogEntry {
            origin: ctx.origin.clone(),
            destination: ctx.destination.clone(),
            service_type: ctx.service_type,
            weight: ctx.weight,
            chosen_carrier: req.chosen_carrier,
            final_price: breakdown.final_price,
            duration_ms,
            session_id: req.session_id,
            username: req.user,
        },
    )
    .await?;

    let notes = recent_notes(pool, cache, &ctx.origin, &ctx.destination).await?;

    Ok(QuoteResponse {
        base_price: breakdown.base_price,
        final_price: breakdown.final_price,
        applied_patches: breakdown.applied.iter().map(AppliedPatch::from).collect(),
        notes: notes.iter().map(RouteNote::from).collect(),
    })
}

/// Cache-aside lookup of the most recent notes for a route.
async fn recent_notes(
    pool: &PgPool,
    cache: &AppCache,
    origin: &str,
    destination: &str,
) -> Result<Arc<Vec<OperationalNote>>> {
    let key = AppCache::route_key(origin, destination);

    if let Some(cached) = cache.notes.get(&key).await {
        debug!("Cache HIT for route notes: {}", key);
        return Ok(cached);
    }

    debug!("Cache MISS for route notes: {}", key);
    let notes = Arc::new(queries::find_recent_notes(pool, origin, destination, NOTES_LIMIT).await?);
    cache.notes.insert(key, notes.clone()).await;
    Ok(notes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use rust_decimal_macros::dec;

    use crate::tariff::models::ServiceType;

    fn ctx() -> QueryContext {
        QueryContext {
            origin: "Barcelona".to_string(),
            destination: "Lyon".to_string(),
            service_type: ServiceType::Ltl,
            weight: 300.0,
            reference_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        }
    }

    fn patch(id: i64, target_field: &str, operation: &str, value: Decimal) -> TariffPatch {
        TariffPatch {
            id,
            origin: "Barcelona".to_string(),
            destination: "Lyon".to_string(),
            service_type: "LTL".to_string(),
            weight_min: None,
            weight_max: None,
            target_field: target_field.to_string(),
            operation: operation.to_string(),
            value,
            effective_from: None,
            effective_to: None,
            note: None,
            author: Some("gpt".to_string()),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
                + chrono::Duration::hours(id),
        }
    }

    #[test]
    fn test_compute_quote_no_candidates() {
        let breakdown = compute_quote(dec!(1000), &[], &ctx());
        assert_eq!(breakdown.base_price, dec!(1000.00));
        assert_eq!(breakdown.final_price, dec!(1000.00));
        assert!(breakdown.applied.is_empty());
    }

    #[test]
    fn test_compute_quote_reports_only_applied_patches() {
        let candidates = vec![
            patch(1, "precio", "percent_up", dec!(10)),
            patch(2, "transit_time", "add", dec!(24)),
            patch(3, "precio", "subtract", dec!(50)),
        ];

        let breakdown = compute_quote(dec!(1000), &candidates, &ctx());
        assert_eq!(breakdown.final_price, dec!(1050.00));

        let ids: Vec<i64> = breakdown.applied.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_compute_quote_rounds_base_price() {
        let breakdown = compute_quote(dec!(999.999), &[], &ctx());
        assert_eq!(breakdown.base_price, dec!(1000.00));
    }

    #[test]
    fn test_compute_quote_is_deterministic() {
        let candidates = vec![
            patch(1, "precio", "percent_down", dec!(5)),
            patch(2, "precio", "add", dec!(12.34)),
        ];

        let first = compute_quote(dec!(700), &candidates, &ctx());
        let second = compute_quote(dec!(700), &candidates, &ctx());
        assert_eq!(first.final_price, second.final_price);
        assert_eq!(first.final_price, dec!(677.34));
    }
}
