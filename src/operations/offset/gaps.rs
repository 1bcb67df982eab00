use crate::error::Result;
use crate::math::{intersect_2d, is_same_point, Vector2, TOLERANCE};
use crate::surface::{Segment, Surface};

use super::stack::{Stack, Step};

/// Connects consecutive steps whose offset endpoints drifted apart.
///
/// Each segment was offset in isolation, so at every joint the incoming
/// step's end and the outgoing step's start generally no longer coincide.
/// The joint vertex is the beam intersection of the incoming terminal
/// tangent and the outgoing initial tangent; two straight steps route the
/// path through it. Parallel tangents get a single direct connector.
///
/// With a closed source the last step wraps around to the first.
pub fn fill_gaps(surface: &mut Surface, stack: &mut Stack, closed: bool) -> Result<()> {
    let count = stack.len();
    let mut filled = Vec::with_capacity(count);

    for i in 0..count {
        let step = stack.steps[i].clone();
        filled.push(step.clone());

        let next = if i + 1 < count {
            &stack.steps[i + 1]
        } else if closed {
            &stack.steps[0]
        } else {
            break;
        };

        let end = step.end(surface)?;
        let start = next.start(surface)?;
        if is_same_point(&end, &start) {
            continue;
        }

        let out_dir = terminal_tangent(&step.resolve(surface)?);
        let in_dir = initial_tangent(&next.resolve(surface)?);
        let vertex = intersect_2d::beam_beam(&end, &(end + out_dir), &(start - in_dir), &start);

        match vertex {
            Some(v) => {
                let vid = surface.scratch_point(v);
                filled.push(Step::Line {
                    offset: [step.end_id(), vid],
                });
                filled.push(Step::Line {
                    offset: [vid, next.start_id()],
                });
            }
            None => {
                filled.push(Step::Line {
                    offset: [step.end_id(), next.start_id()],
                });
            }
        }
    }

    stack.steps = filled;
    Ok(())
}

/// Walking direction at the end of a resolved step. A zero vector (never
/// produced by usable geometry) falls through to the parallel-beam
/// connector in the caller.
fn terminal_tangent(segment: &Segment) -> Vector2 {
    match segment {
        Segment::Line { from, to } => unit_or_zero(to - from),
        Segment::Curve(c) => c.end_tangent(),
    }
}

/// Walking direction at the start of a resolved step.
fn initial_tangent(segment: &Segment) -> Vector2 {
    match segment {
        Segment::Line { from, to } => unit_or_zero(to - from),
        Segment::Curve(c) => c.start_tangent(),
    }
}

fn unit_or_zero(v: Vector2) -> Vector2 {
    let norm = v.norm();
    if norm < TOLERANCE {
        Vector2::zeros()
    } else {
        v / norm
    }
}
