use crate::error::Result;
use crate::log::debug;
use crate::math::bezier::CubicBezier;
use crate::math::{intersect_2d, is_same_point, Point2, MIN_CURVE_LEN};
use crate::surface::{PointId, Segment, Surface};

use super::stack::{Stack, Step};

/// Upper bound on trim passes. Pattern geometry resolves in one or two;
/// the bound only guards against pathological float cycling.
const MAX_PASSES: usize = 64;

/// Removes self-crossing loops from the offset stack.
///
/// Offsetting past the curvature radius on the inside of a turn folds the
/// stack over itself. Each crossing is resolved by keeping step `i` up to
/// the crossing, step `j` from the crossing onward, and dropping every
/// step strictly between them. The scan re-runs until no interior
/// crossings remain, since a trim can bring previously separated steps
/// into contact.
pub fn trim(surface: &mut Surface, stack: &mut Stack) -> Result<()> {
    let mut passes = 0;
    while let Some((i, j, crossing)) = find_crossing(surface, stack)? {
        if passes == MAX_PASSES {
            debug!("trim pass cap reached, keeping current stack");
            return Ok(());
        }
        passes += 1;
        let head = trimmed_head(surface, &stack.steps[i], &crossing)?;
        let tail = trimmed_tail(surface, &stack.steps[j], &crossing)?;
        stack.steps.splice(i..=j, [head, tail]);
    }
    debug!(passes, "offset stack trimmed");
    Ok(())
}

/// First interior crossing over ordered step pairs, in scan order.
fn find_crossing(surface: &Surface, stack: &Stack) -> Result<Option<(usize, usize, Point2)>> {
    for i in 0..stack.len() {
        let a = stack.steps[i].resolve(surface)?;
        for j in (i + 1)..stack.len() {
            let b = stack.steps[j].resolve(surface)?;
            if let Some(pt) = interior_crossing(&a, &b) {
                return Ok(Some((i, j, pt)));
            }
        }
    }
    Ok(None)
}

/// Crossing between two resolved segments, ignoring endpoint touches.
/// Curves at or below the degeneracy length are skipped outright.
fn interior_crossing(a: &Segment, b: &Segment) -> Option<Point2> {
    let candidates: Vec<Point2> = match (a, b) {
        (Segment::Line { from: a0, to: a1 }, Segment::Line { from: b0, to: b1 }) => {
            intersect_2d::segment_segment(a0, a1, b0, b1)
                .into_iter()
                .collect()
        }
        (Segment::Line { from, to }, Segment::Curve(c))
        | (Segment::Curve(c), Segment::Line { from, to }) => {
            if degenerate(c) {
                return None;
            }
            intersect_2d::segment_curve(from, to, c)
        }
        (Segment::Curve(ca), Segment::Curve(cb)) => {
            if degenerate(ca) || degenerate(cb) {
                return None;
            }
            intersect_2d::curve_curve(ca, cb)
        }
    };
    candidates
        .into_iter()
        .find(|pt| !touches_endpoint(pt, a) && !touches_endpoint(pt, b))
}

fn degenerate(c: &CubicBezier) -> bool {
    c.length() <= MIN_CURVE_LEN
}

fn touches_endpoint(pt: &Point2, segment: &Segment) -> bool {
    is_same_point(pt, &segment.start()) || is_same_point(pt, &segment.end())
}

/// The part of a step up to the crossing.
fn trimmed_head(surface: &mut Surface, step: &Step, crossing: &Point2) -> Result<Step> {
    match step {
        Step::Line { offset } => {
            let end = surface.scratch_point(*crossing);
            Ok(Step::Line {
                offset: [offset[0], end],
            })
        }
        Step::Curve { original, offset } => {
            let (t, offset_curve) = crossing_parameter(surface, offset, crossing)?;
            let (off_head, _) = offset_curve.split(t);
            let (orig_head, _) = original.split(t);
            Ok(Step::Curve {
                original: orig_head,
                offset: [
                    offset[0],
                    surface.scratch_point(off_head.cp1),
                    surface.scratch_point(off_head.cp2),
                    surface.scratch_point(off_head.to),
                ],
            })
        }
    }
}

/// The part of a step from the crossing onward.
fn trimmed_tail(surface: &mut Surface, step: &Step, crossing: &Point2) -> Result<Step> {
    match step {
        Step::Line { offset } => {
            let start = surface.scratch_point(*crossing);
            Ok(Step::Line {
                offset: [start, offset[1]],
            })
        }
        Step::Curve { original, offset } => {
            let (t, offset_curve) = crossing_parameter(surface, offset, crossing)?;
            let (_, off_tail) = offset_curve.split(t);
            let (_, orig_tail) = original.split(t);
            Ok(Step::Curve {
                original: orig_tail,
                offset: [
                    surface.scratch_point(off_tail.from),
                    surface.scratch_point(off_tail.cp1),
                    surface.scratch_point(off_tail.cp2),
                    offset[3],
                ],
            })
        }
    }
}

fn crossing_parameter(
    surface: &Surface,
    offset: &[PointId; 4],
    crossing: &Point2,
) -> Result<(f64, CubicBezier)> {
    let curve = CubicBezier::new(
        surface.pos(offset[0])?,
        surface.pos(offset[1])?,
        surface.pos(offset[2])?,
        surface.pos(offset[3])?,
    );
    Ok((curve.t_at_point(crossing), curve))
}
