//! Entities: records the backend identifies by id.

/// Something with a backend-assigned identity that outlives edits to its fields.
///
/// Two entities with the same id are the same record even when their other
/// fields differ (a product before and after an update).
pub trait Entity {
    /// Identifier type, cheap to copy and printable for logs.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug + core::fmt::Display;

    fn id(&self) -> &Self::Id;

    /// Whether `other` refers to the same record.
    fn same_entity(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
