//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**; they are defined entirely by their
//! attribute values. A product's profit/margin pair is the canonical example:
//! two derivations of the same prices are interchangeable.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// compute a new one.
///
/// ## Value Object vs Entity
///
/// - **Value Object**: no identity (a `Derivation { profit: 5.0, margin: 50.0 }`)
/// - **Entity**: has identity (a `Product` with `ProductId(12)`)
///
/// The trait requires `Clone`, `PartialEq` and `Debug`. It does not require
/// `Eq`, since monetary values here are floating point.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
