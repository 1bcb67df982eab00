use crate::error::Result;
use crate::surface::{Segment, Surface};

/// Computes the total length of a stored path.
///
/// Curve lengths use the sampled arc-length approximation; a closed
/// path's implicit closer counts toward the total.
pub struct PathLen {
    path: String,
}

impl PathLen {
    /// Creates a new length query.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::PathError::UnknownPath`] when the path is
    /// absent.
    pub fn execute(&self, surface: &Surface) -> Result<f64> {
        let path = surface.path(&self.path)?.path.clone();
        let mut total = 0.0;
        for segment in path.segments(surface)? {
            total += match segment {
                Segment::Line { from, to } => (to - from).norm(),
                Segment::Curve(c) => c.length(),
            };
        }
        Ok(total)
    }
}
