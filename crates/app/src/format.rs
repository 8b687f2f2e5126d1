//! Display formatting for money, percentages and list rows.

use serde::Serialize;

use margin_core::ProductId;
use margin_products::{Derivation, Product};

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// US-dollar amount with thousands separators, e.g. `$1,234.50` or `-$5.00`.
pub fn format_currency(value: f64) -> String {
    let value = finite_or_zero(value);
    let cents = (value.abs() * 100.0).round() as u64;
    let dollars = (cents / 100).to_string();

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, ch) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{:02}", cents % 100)
}

/// Percentage with two decimals, e.g. `30.00%`.
pub fn format_percentage(value: f64) -> String {
    let value = finite_or_zero(value);
    // Avoid printing "-0.00%".
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{value:.2}%")
}

/// One table row of the product list.
///
/// Profit and margin are the stored values, as the backend reported them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRow {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub cost_price: String,
    pub selling_price: String,
    pub profit: String,
    pub margin: String,
    pub profitable: bool,
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        let stored = Derivation {
            profit: product.stored_profit(),
            margin: product.stored_margin(),
        };
        Self {
            id: product.id,
            name: product.product_name.clone(),
            description: product.description.clone().filter(|d| !d.is_empty()),
            category: product.category_label().map(str::to_string),
            cost_price: format_currency(product.cost_price),
            selling_price: format_currency(product.selling_price),
            profit: format_currency(stored.profit),
            margin: format_percentage(stored.margin),
            profitable: stored.is_profitable(),
        }
    }
}
