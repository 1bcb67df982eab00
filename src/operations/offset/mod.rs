//! Parallel path offsetting.
//!
//! The pipeline: decompose the source path into atomic segments, offset
//! each in isolation (adaptively subdividing curves until the offset is
//! within tolerance), reconnect the joints, trim self-crossing loops, and
//! reassemble the surviving stack into a new path on the surface.

mod gaps;
pub mod stack;
mod trim;

pub use stack::{Stack, Step};

use std::collections::BTreeMap;

use crate::error::{PathError, Result};
use crate::log::debug;
use crate::math::bezier::CubicBezier;
use crate::math::{is_same_point, left_normal, MIN_CURVE_LEN, TOLERANCE};
use crate::surface::{Command, Path, Segment, Surface};

/// Parameters at which a curve's offset deviation is scored.
const SAMPLE_PARAMS: [f64; 4] = [0.2, 0.4, 0.6, 0.8];

/// Offsets a stored path by a signed distance.
///
/// Positive distances move the path to its screen-left (y grows
/// downward); walking a closed path clockwise on screen, that is
/// outward. The result is stored under `new_key`, and the resolved start
/// and end points are aliased as `{new_key}-start` and `{new_key}-end`.
///
/// ```no_run
/// # use seamline::surface::Surface;
/// # use seamline::operations::OffsetPath;
/// # fn demo(surface: &mut Surface) -> seamline::Result<()> {
/// OffsetPath::new("seam", 2.0, "cut")
///     .tolerance(2.5)
///     .render(false)
///     .execute(surface)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct OffsetPath {
    source: String,
    distance: f64,
    new_key: String,
    tolerance: f64,
    render: bool,
    attributes: BTreeMap<String, String>,
}

impl OffsetPath {
    /// Worst acceptable deviation, in percent of the offset distance.
    pub const DEFAULT_TOLERANCE: f64 = 5.0;

    /// Creates a new offset operation.
    #[must_use]
    pub fn new(source: impl Into<String>, distance: f64, new_key: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            distance,
            new_key: new_key.into(),
            tolerance: Self::DEFAULT_TOLERANCE,
            render: true,
            attributes: BTreeMap::new(),
        }
    }

    /// Sets the subdivision tolerance, in percent of the offset distance.
    #[must_use]
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets whether the result path should be drawn.
    #[must_use]
    pub fn render(mut self, render: bool) -> Self {
        self.render = render;
        self
    }

    /// Adds a style attribute to the result path.
    #[must_use]
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Runs the offset pipeline against a surface.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::UnknownPath`] when the source path is absent
    /// and [`PathError::InvalidPath`] when it decomposes into zero usable
    /// segments. Point-resolution failures propagate unchanged.
    pub fn execute(&self, surface: &mut Surface) -> Result<()> {
        let entry = surface.path(&self.source)?;
        let closed = entry.path.is_closed();
        let source = entry.path.clone();

        let usable: Vec<Segment> = source
            .segments(surface)?
            .into_iter()
            .filter(|segment| match segment {
                Segment::Line { from, to } => !is_same_point(from, to),
                Segment::Curve(_) => true,
            })
            .collect();
        if usable.is_empty() {
            return Err(PathError::InvalidPath(format!(
                "'{}' has no usable segments to offset",
                self.source
            ))
            .into());
        }
        debug!(
            source = %self.source,
            segments = usable.len(),
            distance = self.distance,
            "offsetting path"
        );

        let mut stack = build_stack(surface, &usable, self.distance, self.tolerance);
        gaps::fill_gaps(surface, &mut stack, closed)?;
        trim::trim(surface, &mut stack)?;
        let path = reassemble(surface, &stack, closed)?;

        for cmd in path.commands() {
            match *cmd {
                Command::MoveTo(id) | Command::LineTo(id) => surface.promote(id)?,
                Command::CurveTo { cp1, cp2, to } => {
                    surface.promote(cp1)?;
                    surface.promote(cp2)?;
                    surface.promote(to)?;
                }
                Command::Close => {}
            }
        }
        surface.alias(format!("{}-start", self.new_key), path.start())?;
        surface.alias(format!("{}-end", self.new_key), path.end())?;
        surface.purge_scratch();

        surface.add_path(self.new_key.clone(), path);
        let entry = surface.path_mut(&self.new_key)?;
        entry.render = self.render;
        entry.attributes = self.attributes.clone();
        Ok(())
    }
}

/// Registers `path_string` as a hidden source path under `{new_key}-src`
/// and offsets it. Convenience for callers that draft a path only to
/// offset it.
///
/// # Errors
///
/// Propagates parse failures and everything [`OffsetPath::execute`] can
/// return.
pub fn offset_path_string(
    surface: &mut Surface,
    new_key: &str,
    path_string: &str,
    distance: f64,
) -> Result<()> {
    let source_key = format!("{new_key}-src");
    let path = Path::parse(surface, path_string)?;
    surface.add_path(source_key.clone(), path);
    surface.path_mut(&source_key)?.render = false;
    OffsetPath::new(source_key, distance, new_key).execute(surface)
}

/// Offsets every usable segment in isolation, subdividing curves until
/// each piece's naive offset is within tolerance.
fn build_stack(surface: &mut Surface, segments: &[Segment], distance: f64, tolerance: f64) -> Stack {
    let mut stack = Stack::new();
    for segment in segments {
        match segment {
            Segment::Line { from, to } => {
                let dir = to - from;
                let normal = left_normal(&(dir / dir.norm()));
                let a = surface.scratch_point(from + distance * normal);
                let b = surface.scratch_point(to + distance * normal);
                stack.push(Step::Line { offset: [a, b] });
            }
            Segment::Curve(curve) => offset_curve(surface, &mut stack, *curve, distance, tolerance),
        }
    }
    stack
}

/// Offsets one curve, splitting it wherever the naive offset deviates too
/// far. The worklist is drained depth-first in parameter order, so pieces
/// land on the stack in path order.
fn offset_curve(
    surface: &mut Surface,
    stack: &mut Stack,
    curve: CubicBezier,
    distance: f64,
    tolerance: f64,
) {
    let mut work = vec![curve];
    while let Some(current) = work.pop() {
        let naive = naive_offset(&current, distance);
        if let Some(worst_t) = excessive_deviation(&current, &naive, distance, tolerance) {
            if current.length() > MIN_CURVE_LEN {
                let (first, second) = current.split(worst_t);
                work.push(second);
                work.push(first);
                continue;
            }
        }
        let offset = [
            surface.scratch_point(naive.from),
            surface.scratch_point(naive.cp1),
            surface.scratch_point(naive.cp2),
            surface.scratch_point(naive.to),
        ];
        stack.push(Step::Curve {
            original: current,
            offset,
        });
    }
}

/// Offsets a curve by translating its handle lines along the endpoint
/// normals. A control point coincident with its endpoint moves with that
/// endpoint, keeping the quadratic-as-cubic shape.
fn naive_offset(curve: &CubicBezier, distance: f64) -> CubicBezier {
    let start_normal = left_normal(&curve.start_tangent());
    let end_normal = left_normal(&curve.end_tangent());
    CubicBezier::new(
        curve.from + distance * start_normal,
        curve.cp1 + distance * start_normal,
        curve.cp2 + distance * end_normal,
        curve.to + distance * end_normal,
    )
}

/// Scores the naive offset against the ideal offset at the sample
/// parameters. Returns the worst parameter when the deviation (in percent
/// of the offset distance) exceeds the tolerance, `None` when acceptable.
fn excessive_deviation(
    original: &CubicBezier,
    naive: &CubicBezier,
    distance: f64,
    tolerance: f64,
) -> Option<f64> {
    let magnitude = distance.abs();
    let mut worst_t = 0.0;
    let mut worst = 0.0;
    let mut prev = original.from;
    for &t in &SAMPLE_PARAMS {
        let sample = original.point_at(t);
        let tangent = sample - prev;
        prev = sample;
        if tangent.norm() < TOLERANCE {
            continue;
        }
        let ideal = sample + distance * left_normal(&(tangent / tangent.norm()));
        let actual = (naive.point_at(t) - ideal).norm();
        let score = ((actual + magnitude) / (magnitude / 100.0) - 100.0).abs();
        if score > worst {
            worst = score;
            worst_t = t;
        }
    }
    (worst > tolerance).then_some(worst_t)
}

/// Concatenates the stack into a single path, restoring the source's
/// closed-ness. A trailing straight step that already lands back on the
/// start collapses into the implicit closer.
fn reassemble(surface: &Surface, stack: &Stack, closed: bool) -> Result<Path> {
    let first = stack
        .steps
        .first()
        .ok_or_else(|| PathError::InvalidPath("offset produced an empty stack".into()))?;
    let mut commands = vec![Command::MoveTo(first.start_id())];
    for step in &stack.steps {
        match step {
            Step::Line { offset } => commands.push(Command::LineTo(offset[1])),
            Step::Curve { offset, .. } => commands.push(Command::CurveTo {
                cp1: offset[1],
                cp2: offset[2],
                to: offset[3],
            }),
        }
    }
    if closed {
        let start = surface.pos(first.start_id())?;
        let redundant_closer = match stack.steps.last() {
            Some(Step::Line { offset }) => is_same_point(&surface.pos(offset[1])?, &start),
            _ => false,
        };
        if redundant_closer {
            commands.pop();
        }
        commands.push(Command::Close);
    }
    Path::new(commands)
}
