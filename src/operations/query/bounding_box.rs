use crate::error::{GeometryError, Result};
use crate::math::bezier::EdgeSide;
use crate::math::Point2;
use crate::surface::{Segment, Surface};

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Point2,
    pub max: Point2,
}

impl Aabb {
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

/// Computes the boundary of one or more stored paths.
///
/// Derived on demand, never cached: curve extents are found by sampling,
/// so the box is as approximate as the rest of the kernel.
pub struct BoundingBox {
    paths: Vec<String>,
    margin: f64,
}

impl BoundingBox {
    /// Creates a new bounding-box query over the named paths.
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
            margin: 0.0,
        }
    }

    /// Pads the box on all sides.
    #[must_use]
    pub fn margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::PathError::UnknownPath`] for missing paths
    /// and [`GeometryError::Degenerate`] when there is nothing to bound.
    pub fn execute(&self, surface: &Surface) -> Result<Aabb> {
        let mut min = Point2::new(f64::INFINITY, f64::INFINITY);
        let mut max = Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        let mut include = |p: Point2| {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        };

        for name in &self.paths {
            let path = surface.path(name)?.path.clone();
            for segment in path.segments(surface)? {
                match segment {
                    Segment::Line { from, to } => {
                        include(from);
                        include(to);
                    }
                    Segment::Curve(c) => {
                        include(c.edge(EdgeSide::Left));
                        include(c.edge(EdgeSide::Right));
                        include(c.edge(EdgeSide::Top));
                        include(c.edge(EdgeSide::Bottom));
                    }
                }
            }
        }

        if min.x > max.x {
            return Err(GeometryError::Degenerate("no geometry to bound".into()).into());
        }
        Ok(Aabb {
            min: Point2::new(min.x - self.margin, min.y - self.margin),
            max: Point2::new(max.x + self.margin, max.y + self.margin),
        })
    }
}
