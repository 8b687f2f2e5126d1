//! Portfolio-wide statistics.

use serde::{Deserialize, Serialize};

use crate::product::Product;

/// Aggregate profitability across a product collection.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_profit: f64,
    pub avg_margin: f64,
}

/// Sum stored profits and average stored margins.
///
/// Uses the values the products carry (missing counts as `0`), not a fresh
/// derivation. An empty collection yields zeros.
pub fn aggregate<'a>(products: impl IntoIterator<Item = &'a Product>) -> DashboardStats {
    let mut count = 0usize;
    let mut total_profit = 0.0;
    let mut total_margin = 0.0;

    for product in products {
        count += 1;
        total_profit += product.stored_profit();
        total_margin += product.stored_margin();
    }

    let avg_margin = if count == 0 {
        0.0
    } else {
        total_margin / count as f64
    };

    DashboardStats {
        total_profit,
        avg_margin,
    }
}
