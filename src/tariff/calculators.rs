//! Core patch selection and application.
//!
//! Pure functions for the pricing math - no database access. The storage
//! layer pre-filters candidates with the same predicate in SQL; the functions
//! here re-check it, so the result never depends on how storage filtered.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::warn;

use super::models::{PatchOperation, QueryContext, TariffPatch};

/// Field consumed by price quoting. Patches targeting any other field are
/// selectable in principle but never affect a price.
pub const PRICE_FIELD: &str = "precio";

/// Base price used when the caller does not supply one.
pub const DEFAULT_BASE_PRICE: Decimal = dec!(1000);

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Banker's rounding rounds to the nearest even number when the value is exactly
/// halfway between two possibilities. This reduces cumulative rounding bias.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use tariff_memory::tariff::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Select the patches that apply to `ctx` and target `target_field`,
/// earliest first.
///
/// Ordering by `(created_at, id)` is part of the contract: creation order
/// decides application order, not just presentation. An empty result is a
/// valid outcome, not an error.
pub fn select_applicable<'a>(
    patches: &'a [TariffPatch],
    ctx: &QueryContext,
    target_field: &str,
) -> Vec<&'a TariffPatch> {
    let mut selected: Vec<&TariffPatch> = patches
        .iter()
        .filter(|p| p.target_field == target_field && p.matches(ctx))
        .collect();
    selected.sort_by_key(|p| (p.created_at, p.id));
    selected
}

/// Fold `base_price` through `patches` in order and round the result to
/// 2 decimal places.
///
/// Strictly sequential: each patch sees the effect of the previous ones, and
/// when two patches conflict the last one applied wins. A stored operation
/// that fails to parse (rows predating boundary validation) is skipped with
/// a warning. Total over any finite inputs; negative prices pass through.
pub fn apply_patches(base_price: Decimal, patches: &[&TariffPatch]) -> Decimal {
    let mut price = base_price;
    for patch in patches {
        let Some(op) = patch.operation() else {
            warn!(
                patch_id = patch.id,
                operation = %patch.operation,
                "skipping patch with unknown operation"
            );
            continue;
        };
        price = match op {
            PatchOperation::Set => patch.value,
            PatchOperation::PercentUp => price * (Decimal::ONE + patch.value / dec!(100)),
            PatchOperation::PercentDown => price * (Decimal::ONE - patch.value / dec!(100)),
            PatchOperation::Add => price + patch.value,
            PatchOperation::Subtract => price - patch.value,
        };
    }
    round_money(price, 2)
}
