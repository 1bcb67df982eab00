use crate::math::Point2;

slotmap::new_key_type! {
    /// Unique identifier for a point on a drafting surface.
    pub struct PointId;
}

/// Lifetime scope of a point.
///
/// Offset runs create many intermediate points that must not pollute the
/// caller's namespace; those are tagged [`Scope::Scratch`] and reclaimed
/// by [`crate::surface::Surface::purge_scratch`]. Points that survive into
/// a result path are promoted to [`Scope::Durable`] before the purge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Durable,
    Scratch,
}

/// Data associated with a drafting point.
#[derive(Debug, Clone)]
pub struct PointData {
    /// The 2D position of the point (y grows downward).
    pub pos: Point2,
    /// Optional human-readable description.
    pub description: Option<String>,
    /// Lifetime scope.
    pub scope: Scope,
}

impl PointData {
    /// Creates a new durable point at the given position.
    #[must_use]
    pub fn new(pos: Point2) -> Self {
        Self {
            pos,
            description: None,
            scope: Scope::Durable,
        }
    }

    /// Creates a new scratch point at the given position.
    #[must_use]
    pub fn scratch(pos: Point2) -> Self {
        Self {
            pos,
            description: None,
            scope: Scope::Scratch,
        }
    }
}
