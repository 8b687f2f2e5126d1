//! Raw form input, field-level validation and payload normalization.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use margin_core::{DomainError, DomainResult};

use crate::derivation::{Derivation, derive, parse_decimal, parse_or_zero};
use crate::product::{Product, ProductPayload};

pub const PRODUCT_NAME_REQUIRED: &str = "Product name is required";
pub const COST_PRICE_REQUIRED: &str = "Valid cost price is required";
pub const SELLING_PRICE_REQUIRED: &str = "Valid selling price is required";

/// Editable product form fields.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    ProductName,
    CostPrice,
    SellingPrice,
    Category,
    Description,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::ProductName,
        Field::CostPrice,
        Field::SellingPrice,
        Field::Category,
        Field::Description,
    ];

    /// Wire/form name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::ProductName => "productName",
            Field::CostPrice => "costPrice",
            Field::SellingPrice => "sellingPrice",
            Field::Category => "category",
            Field::Description => "description",
        }
    }
}

impl core::fmt::Display for Field {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown field: {s}")))
    }
}

/// Raw, string-typed form values exactly as the user typed them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFields {
    pub product_name: String,
    pub cost_price: String,
    pub selling_price: String,
    pub category: String,
    pub description: String,
}

impl ProductFields {
    /// Populate the fields verbatim from an existing product.
    pub fn from_product(product: &Product) -> Self {
        Self {
            product_name: product.product_name.clone(),
            cost_price: product.cost_price.to_string(),
            selling_price: product.selling_price.to_string(),
            category: product.category.clone().unwrap_or_default(),
            description: product.description.clone().unwrap_or_default(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::ProductName => &self.product_name,
            Field::CostPrice => &self.cost_price,
            Field::SellingPrice => &self.selling_price,
            Field::Category => &self.category,
            Field::Description => &self.description,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::ProductName => &mut self.product_name,
            Field::CostPrice => &mut self.cost_price,
            Field::SellingPrice => &mut self.selling_price,
            Field::Category => &mut self.category,
            Field::Description => &mut self.description,
        };
        *slot = value.into();
    }

    /// Live profit/margin preview. Unparseable prices count as `0` here only.
    pub fn preview(&self) -> Derivation {
        derive(parse_or_zero(&self.cost_price), parse_or_zero(&self.selling_price))
    }

    /// Build the normalized create/update payload.
    ///
    /// Fails with [`DomainError::Validation`] if the fields do not validate.
    /// The name is sent as typed; category and description pass through as-is.
    pub fn to_payload(&self) -> DomainResult<ProductPayload> {
        let errors = validate(self);
        if !errors.is_empty() {
            return Err(DomainError::validation(errors.to_string()));
        }

        let (Some(cost_price), Some(selling_price)) =
            (parse_decimal(&self.cost_price), parse_decimal(&self.selling_price))
        else {
            return Err(DomainError::validation("prices must be numeric"));
        };

        Ok(ProductPayload {
            product_name: self.product_name.clone(),
            cost_price,
            selling_price,
            category: self.category.clone(),
            description: self.description.clone(),
        })
    }
}

/// Field-level validation errors. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<Field, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    /// Clear a single field's error. Returns whether there was one.
    pub fn clear(&mut self, field: Field) -> bool {
        self.0.remove(&field).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

impl core::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

fn is_valid_price(raw: &str) -> bool {
    parse_decimal(raw).is_some_and(|v| v >= 0.0)
}

/// Validate raw form fields.
///
/// Every rule runs regardless of earlier failures. Never fails: problems are
/// returned as data.
pub fn validate(fields: &ProductFields) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if fields.product_name.trim().is_empty() {
        errors.insert(Field::ProductName, PRODUCT_NAME_REQUIRED);
    }

    if !is_valid_price(&fields.cost_price) {
        errors.insert(Field::CostPrice, COST_PRICE_REQUIRED);
    }

    if !is_valid_price(&fields.selling_price) {
        errors.insert(Field::SellingPrice, SELLING_PRICE_REQUIRED);
    }

    errors
}
