//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Inventory rows are entities keyed by where the stock sits, not by a generated
/// identifier: two rows with the same key describe the same shelf.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + Ord + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}
