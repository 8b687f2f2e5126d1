//! `margin-core`: domain building blocks shared by every crate.
//!
//! This crate contains **pure domain** primitives (no IO, no transport concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::ProductId;
pub use value_object::ValueObject;
