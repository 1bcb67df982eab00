use crate::error::Result;
use crate::math::bezier::CubicBezier;
use crate::math::Point2;
use crate::surface::{PointId, Segment, Surface};

/// One offset step awaiting gap filling and trimming.
///
/// Offset geometry lives in the surface as scratch points, so trimming
/// replaces point IDs rather than copying coordinates around. Curve steps
/// keep the original segment they were derived from, which trimming needs
/// to split in step with the offset.
#[derive(Debug, Clone)]
pub enum Step {
    Line {
        /// Offset `[from, to]`.
        offset: [PointId; 2],
    },
    Curve {
        original: CubicBezier,
        /// Offset `[from, cp1, cp2, to]`.
        offset: [PointId; 4],
    },
}

impl Step {
    /// ID of the step's starting offset point.
    #[must_use]
    pub fn start_id(&self) -> PointId {
        match self {
            Step::Line { offset } => offset[0],
            Step::Curve { offset, .. } => offset[0],
        }
    }

    /// ID of the step's final offset point.
    #[must_use]
    pub fn end_id(&self) -> PointId {
        match self {
            Step::Line { offset } => offset[1],
            Step::Curve { offset, .. } => offset[3],
        }
    }

    /// Position of the step's starting offset point.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::PointError::Expired`] for stale IDs.
    pub fn start(&self, surface: &Surface) -> Result<Point2> {
        surface.pos(self.start_id())
    }

    /// Position of the step's final offset point.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::PointError::Expired`] for stale IDs.
    pub fn end(&self, surface: &Surface) -> Result<Point2> {
        surface.pos(self.end_id())
    }

    /// Resolves the step's offset geometry to raw coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::PointError::Expired`] for stale IDs.
    pub fn resolve(&self, surface: &Surface) -> Result<Segment> {
        match self {
            Step::Line { offset } => Ok(Segment::Line {
                from: surface.pos(offset[0])?,
                to: surface.pos(offset[1])?,
            }),
            Step::Curve { offset, .. } => Ok(Segment::Curve(CubicBezier::new(
                surface.pos(offset[0])?,
                surface.pos(offset[1])?,
                surface.pos(offset[2])?,
                surface.pos(offset[3])?,
            ))),
        }
    }
}

/// Ordered list of offset steps between decomposition and reassembly.
#[derive(Debug, Default)]
pub struct Stack {
    pub steps: Vec<Step>,
}

impl Stack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
