pub mod path;
pub mod point;
pub mod queries;

pub use path::{Command, Path, Segment};
pub use point::{PointData, PointId, Scope};

use std::collections::{BTreeMap, HashMap};

use slotmap::SlotMap;

use crate::error::{PathError, PointError, Result};
use crate::math::Point2;

/// A named path stored on a surface, with its presentation metadata.
#[derive(Debug, Clone)]
pub struct PathEntry {
    pub path: Path,
    /// Whether the surrounding application should draw this path.
    pub render: bool,
    /// Free-form style attributes, passed through untouched.
    pub attributes: BTreeMap<String, String>,
}

impl PathEntry {
    #[must_use]
    pub fn new(path: Path) -> Self {
        Self {
            path,
            render: true,
            attributes: BTreeMap::new(),
        }
    }
}

/// A drafting surface: the arena that owns all points and paths of one
/// pattern piece.
///
/// Points live in a generational arena and are referenced by typed IDs,
/// with a name table on top for the caller-facing string keys. Paths
/// reference points by ID, so renaming never dangles. Each surface is an
/// isolated namespace; nothing is shared between surfaces.
#[derive(Debug, Default)]
pub struct Surface {
    points: SlotMap<PointId, PointData>,
    names: HashMap<String, PointId>,
    paths: HashMap<String, PathEntry>,
}

impl Surface {
    /// Creates a new, empty drafting surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Point operations ---

    /// Inserts a durable named point and returns its ID.
    ///
    /// Re-using a name binds it to a fresh point; last write wins. The
    /// previous point stays in the arena, so paths built against the old
    /// binding keep their geometry.
    pub fn add_point(&mut self, name: impl Into<String>, pos: Point2) -> PointId {
        let id = self.points.insert(PointData::new(pos));
        self.names.insert(name.into(), id);
        id
    }

    /// Whether a point name is currently bound.
    #[must_use]
    pub fn contains_point(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// Binds `dst` to a fresh point with the same position as `src`.
    ///
    /// # Errors
    ///
    /// Returns [`PointError::UnknownPoint`] when `src` is absent.
    pub fn clone_point(&mut self, src: &str, dst: impl Into<String>) -> Result<PointId> {
        let pos = self.pos_of(src)?;
        Ok(self.add_point(dst, pos))
    }

    /// Inserts an anonymous scratch point and returns its ID.
    ///
    /// Scratch points are reclaimed by [`Self::purge_scratch`] unless
    /// promoted first.
    pub fn scratch_point(&mut self, pos: Point2) -> PointId {
        self.points.insert(PointData::scratch(pos))
    }

    /// Gives an existing point a name, promoting it to durable scope.
    ///
    /// # Errors
    ///
    /// Returns [`PointError::Expired`] when the ID is stale.
    pub fn alias(&mut self, name: impl Into<String>, id: PointId) -> Result<()> {
        self.promote(id)?;
        self.names.insert(name.into(), id);
        Ok(())
    }

    /// Resolves a point name to its ID.
    ///
    /// # Errors
    ///
    /// Returns [`PointError::UnknownPoint`] when the name is absent.
    pub fn named(&self, name: &str) -> Result<PointId> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| PointError::UnknownPoint(name.into()).into())
    }

    /// Returns a reference to a point's data.
    ///
    /// # Errors
    ///
    /// Returns [`PointError::Expired`] when the ID is stale.
    pub fn point(&self, id: PointId) -> Result<&PointData> {
        self.points.get(id).ok_or_else(|| PointError::Expired.into())
    }

    /// Returns a point's position.
    ///
    /// # Errors
    ///
    /// Returns [`PointError::Expired`] when the ID is stale.
    pub fn pos(&self, id: PointId) -> Result<Point2> {
        Ok(self.point(id)?.pos)
    }

    /// Returns a named point's position.
    ///
    /// # Errors
    ///
    /// Returns [`PointError::UnknownPoint`] when the name is absent.
    pub fn pos_of(&self, name: &str) -> Result<Point2> {
        self.pos(self.named(name)?)
    }

    /// Attaches a description to a named point.
    ///
    /// # Errors
    ///
    /// Returns [`PointError::UnknownPoint`] when the name is absent.
    pub fn describe(&mut self, name: &str, description: impl Into<String>) -> Result<()> {
        let id = self.named(name)?;
        if let Some(data) = self.points.get_mut(id) {
            data.description = Some(description.into());
        }
        Ok(())
    }

    /// Promotes a scratch point to durable scope.
    ///
    /// # Errors
    ///
    /// Returns [`PointError::Expired`] when the ID is stale.
    pub fn promote(&mut self, id: PointId) -> Result<()> {
        let data = self.points.get_mut(id).ok_or(PointError::Expired)?;
        data.scope = Scope::Durable;
        Ok(())
    }

    /// Drops every remaining scratch point. IDs of purged points become
    /// stale; looking them up afterwards yields [`PointError::Expired`].
    pub fn purge_scratch(&mut self) {
        self.points.retain(|_, data| data.scope == Scope::Durable);
    }

    /// Number of live points, scratch included.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    // --- Path operations ---

    /// Stores a path under a name, replacing any previous entry.
    pub fn add_path(&mut self, name: impl Into<String>, path: Path) {
        self.paths.insert(name.into(), PathEntry::new(path));
    }

    /// Parses a path string and stores the result under a name.
    ///
    /// # Errors
    ///
    /// Propagates parse and point-resolution failures.
    pub fn add_path_str(&mut self, name: impl Into<String>, input: &str) -> Result<()> {
        let path = Path::parse(self, input)?;
        self.add_path(name, path);
        Ok(())
    }

    /// Looks up a stored path.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::UnknownPath`] when the name is absent.
    pub fn path(&self, name: &str) -> Result<&PathEntry> {
        self.paths
            .get(name)
            .ok_or_else(|| PathError::UnknownPath(name.into()).into())
    }

    /// Returns a mutable reference to a stored path entry.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::UnknownPath`] when the name is absent.
    pub fn path_mut(&mut self, name: &str) -> Result<&mut PathEntry> {
        self.paths
            .get_mut(name)
            .ok_or_else(|| PathError::UnknownPath(name.into()).into())
    }

    /// Iterates over all stored paths in arbitrary order.
    pub fn paths(&self) -> impl Iterator<Item = (&str, &PathEntry)> {
        self.paths.iter().map(|(k, v)| (k.as_str(), v))
    }
}
