//! Profit/margin derivation.
//!
//! This is the only place in the workspace where profit and margin are
//! computed. Everything else (form preview, in-memory repository, product
//! recomputation) calls [`derive`].

use serde::{Deserialize, Serialize};

use margin_core::ValueObject;

/// Derived profitability of a single cost/selling price pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Derivation {
    pub profit: f64,
    /// Profit as a percentage of cost price.
    pub margin: f64,
}

impl ValueObject for Derivation {}

impl Derivation {
    /// Whether the profit is non-negative (display hint).
    pub fn is_profitable(&self) -> bool {
        self.profit >= 0.0
    }
}

/// Derive profit and margin from a cost and a selling price.
///
/// Total and pure. Profit is not clamped; margin is `0` when cost is `0`.
pub fn derive(cost_price: f64, selling_price: f64) -> Derivation {
    let profit = selling_price - cost_price;
    let margin = if cost_price == 0.0 {
        0.0
    } else {
        (profit / cost_price) * 100.0
    };

    Derivation { profit, margin }
}

/// Parse a raw decimal form value.
///
/// Surrounding whitespace is ignored. Returns `None` for empty, malformed or
/// non-finite input.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a raw decimal for preview purposes: anything unparseable counts as `0`.
pub fn parse_or_zero(raw: &str) -> f64 {
    parse_decimal(raw).unwrap_or(0.0)
}
