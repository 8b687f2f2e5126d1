use serde::{Deserialize, Serialize};

use margin_core::{Entity, ProductId};

use crate::derivation::{Derivation, derive};

/// A persisted catalog product, as the backend returns it.
///
/// `profit` and `margin` are whatever the backend stored; they may be missing
/// or stale. Use [`Product::derivation`] for values recomputed from the prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub product_name: String,
    pub cost_price: f64,
    pub selling_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<f64>,
}

impl Product {
    /// Build a product from a payload and a repository-assigned id.
    ///
    /// Derived fields are filled in from the prices.
    pub fn from_payload(id: ProductId, payload: ProductPayload) -> Self {
        let d = derive(payload.cost_price, payload.selling_price);
        Self {
            id,
            product_name: payload.product_name,
            cost_price: payload.cost_price,
            selling_price: payload.selling_price,
            category: Some(payload.category),
            description: Some(payload.description),
            profit: Some(d.profit),
            margin: Some(d.margin),
        }
    }

    /// Profit and margin recomputed from the current prices.
    pub fn derivation(&self) -> Derivation {
        derive(self.cost_price, self.selling_price)
    }

    /// Stored profit, missing treated as `0`.
    pub fn stored_profit(&self) -> f64 {
        self.profit.unwrap_or(0.0)
    }

    /// Stored margin, missing treated as `0`.
    pub fn stored_margin(&self) -> f64 {
        self.margin.unwrap_or(0.0)
    }

    /// Category, if present and non-empty.
    pub fn category_label(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Create/update request body.
///
/// Never carries an id: on create the repository assigns one, on update it is
/// part of the request address. Category and description are sent exactly as
/// typed, including empty strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub product_name: String,
    pub cost_price: f64,
    pub selling_price: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
}
