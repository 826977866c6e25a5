//! Final price calculation.

use crate::models::PriceView;

/// Currency of every price in the catalog.
pub const CURRENCY: &str = "EUR";

/// Applies a discount fraction to a price in minor units.
///
/// The product is computed in `f64` and truncated toward zero, so
/// `89000 * (1 - 0.3)` yields `62299`, not `62300`.
pub fn price_view(original: i64, discount: f64) -> PriceView {
    if discount > 0.0 {
        PriceView {
            original,
            final_price: (original as f64 * (1.0 - discount)) as i64,
            discount_percentage: Some(format!("{}%", discount * 100.0)),
            currency: CURRENCY.to_string(),
        }
    } else {
        PriceView {
            original,
            final_price: original,
            discount_percentage: None,
            currency: CURRENCY.to_string(),
        }
    }
}
