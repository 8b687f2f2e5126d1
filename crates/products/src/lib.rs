//! Products domain module.
//!
//! This crate contains the business rules for the product catalog, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage):
//! derivation of profit/margin, form validation, payload normalization and the
//! portfolio-wide statistics.

pub mod derivation;
pub mod product;
pub mod stats;
pub mod validation;

pub use derivation::{Derivation, derive, parse_decimal, parse_or_zero};
pub use product::{Product, ProductPayload};
pub use stats::{DashboardStats, aggregate};
pub use validation::{Field, ProductFields, ValidationErrors, validate};
