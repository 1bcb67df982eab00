use crate::error::{GeometryError, Result};
use crate::math::{Point2, Vector2, COINCIDENCE, TOLERANCE};

/// Number of uniform samples used for arc-length walks and nearest-parameter
/// sweeps. The whole kernel is tolerance-based, so a sampling approximation
/// is consistent with the rest of the math.
pub const CURVE_STEPS: usize = 1000;

/// Returns the control-handle length that approximates a circular arc of the
/// given radius with a single cubic Bezier (≈ 0.5523 · radius).
#[must_use]
pub fn circle_handle_length(radius: f64) -> f64 {
    radius * 4.0 * (2.0_f64.sqrt() - 1.0) / 3.0
}

/// Which extreme of a curve to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeSide {
    Left,
    Right,
    Top,
    Bottom,
}

/// A cubic Bezier curve by value.
///
/// This is the raw-coordinate companion to the point-keyed path model: the
/// drafting surface resolves point keys and hands the coordinates over to
/// this type for the actual curve math.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub from: Point2,
    pub cp1: Point2,
    pub cp2: Point2,
    pub to: Point2,
}

impl CubicBezier {
    /// Creates a new cubic Bezier curve.
    #[must_use]
    pub fn new(from: Point2, cp1: Point2, cp2: Point2, to: Point2) -> Self {
        Self { from, cp1, cp2, to }
    }

    /// Evaluates the curve at parameter `t` (standard cubic formula).
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point2 {
        let mt = 1.0 - t;
        let a = mt * mt * mt;
        let b = 3.0 * mt * mt * t;
        let c = 3.0 * mt * t * t;
        let d = t * t * t;
        Point2::new(
            a * self.from.x + b * self.cp1.x + c * self.cp2.x + d * self.to.x,
            a * self.from.y + b * self.cp1.y + c * self.cp2.y + d * self.to.y,
        )
    }

    /// Approximates the arc length by summing chord lengths over
    /// [`CURVE_STEPS`] uniform samples.
    ///
    /// Monotonically non-decreasing in the sample count, so the
    /// approximation only ever falls short of the true length.
    #[must_use]
    pub fn length(&self) -> f64 {
        let mut length = 0.0;
        let mut prev = self.from;
        for i in 1..=CURVE_STEPS {
            #[allow(clippy::cast_precision_loss)]
            let t = i as f64 / CURVE_STEPS as f64;
            let p = self.point_at(t);
            length += (p - prev).norm();
            prev = p;
        }
        length
    }

    /// Finds the parameter whose evaluated point lies closest to `target`,
    /// by the same uniform sampling sweep as [`Self::length`].
    #[must_use]
    pub fn t_at_point(&self, target: &Point2) -> f64 {
        let mut best_t = 0.0;
        let mut best_d = f64::INFINITY;
        for i in 0..=CURVE_STEPS {
            #[allow(clippy::cast_precision_loss)]
            let t = i as f64 / CURVE_STEPS as f64;
            let d = (self.point_at(t) - target).norm_squared();
            if d < best_d {
                best_d = d;
                best_t = t;
            }
        }
        best_t
    }

    /// Splits the curve at parameter `t` by De Casteljau subdivision.
    ///
    /// Both halves are exact cubic Beziers whose concatenation reproduces
    /// the original up to floating point.
    #[must_use]
    pub fn split(&self, t: f64) -> (CubicBezier, CubicBezier) {
        let lerp = |a: &Point2, b: &Point2| -> Point2 {
            Point2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
        };
        let p01 = lerp(&self.from, &self.cp1);
        let p12 = lerp(&self.cp1, &self.cp2);
        let p23 = lerp(&self.cp2, &self.to);
        let p012 = lerp(&p01, &p12);
        let p123 = lerp(&p12, &p23);
        let split = lerp(&p012, &p123);
        (
            CubicBezier::new(self.from, p01, p012, split),
            CubicBezier::new(split, p123, p23, self.to),
        )
    }

    /// Walks the sampled arc length until `distance` is covered and returns
    /// the point reached.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::OutOfRange`] when `distance` exceeds the
    /// curve's total length.
    pub fn point_along(&self, distance: f64) -> Result<Point2> {
        let mut length = 0.0;
        let mut prev = self.from;
        for i in 1..=CURVE_STEPS {
            #[allow(clippy::cast_precision_loss)]
            let t = i as f64 / CURVE_STEPS as f64;
            let p = self.point_at(t);
            length += (p - prev).norm();
            if length > distance {
                return Ok(p);
            }
            prev = p;
        }
        Err(GeometryError::OutOfRange {
            requested: distance,
            length,
        }
        .into())
    }

    /// Returns the same curve walked in the opposite direction.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self::new(self.to, self.cp2, self.cp1, self.from)
    }

    /// Unit tangent direction at the start of the curve.
    ///
    /// When the first control point coincides with the start (a
    /// quadratic-as-cubic curve), the tangent is undefined at `t = 0`;
    /// a point sampled 0.5 units along the curve substitutes for the
    /// control point, falling back to the chord for very short curves.
    #[must_use]
    pub fn start_tangent(&self) -> Vector2 {
        let handle = self.cp1 - self.from;
        if handle.norm() >= COINCIDENCE {
            return handle / handle.norm();
        }
        if let Ok(sample) = self.point_along(0.5) {
            let dir = sample - self.from;
            if dir.norm() >= TOLERANCE {
                return dir / dir.norm();
            }
        }
        let chord = self.to - self.from;
        if chord.norm() < TOLERANCE {
            return Vector2::new(1.0, 0.0);
        }
        chord / chord.norm()
    }

    /// Unit tangent direction at the end of the curve, pointing in the
    /// walking direction. Mirrors [`Self::start_tangent`] for the
    /// quadratic-as-cubic case.
    #[must_use]
    pub fn end_tangent(&self) -> Vector2 {
        let handle = self.to - self.cp2;
        if handle.norm() >= COINCIDENCE {
            return handle / handle.norm();
        }
        if let Ok(sample) = self.reversed().point_along(0.5) {
            let dir = self.to - sample;
            if dir.norm() >= TOLERANCE {
                return dir / dir.norm();
            }
        }
        let chord = self.to - self.from;
        if chord.norm() < TOLERANCE {
            return Vector2::new(1.0, 0.0);
        }
        chord / chord.norm()
    }

    /// Finds the extreme point of the curve in the given direction by the
    /// uniform sampling sweep.
    #[must_use]
    pub fn edge(&self, side: EdgeSide) -> Point2 {
        let mut best = self.from;
        for i in 1..=CURVE_STEPS {
            #[allow(clippy::cast_precision_loss)]
            let t = i as f64 / CURVE_STEPS as f64;
            let p = self.point_at(t);
            let better = match side {
                EdgeSide::Left => p.x < best.x,
                EdgeSide::Right => p.x > best.x,
                EdgeSide::Top => p.y < best.y,
                EdgeSide::Bottom => p.y > best.y,
            };
            if better {
                best = p;
            }
        }
        best
    }

    /// Intersections with the vertical line `x = target`.
    #[must_use]
    pub fn crosses_x(&self, target: f64) -> Vec<Point2> {
        let a = Point2::new(target, -10_000.0);
        let b = Point2::new(target, 10_000.0);
        super::intersect_2d::line_curve(&a, &b, self)
    }

    /// Intersections with the horizontal line `y = target`.
    #[must_use]
    pub fn crosses_y(&self, target: f64) -> Vec<Point2> {
        let a = Point2::new(-10_000.0, target);
        let b = Point2::new(10_000.0, target);
        super::intersect_2d::line_curve(&a, &b, self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::SeamlineError;
    use approx::assert_relative_eq;

    fn quarter_arc() -> CubicBezier {
        // Unit quarter circle from (1, 0) to (0, 1) using the circle constant.
        let k = circle_handle_length(1.0);
        CubicBezier::new(
            Point2::new(1.0, 0.0),
            Point2::new(1.0, k),
            Point2::new(k, 1.0),
            Point2::new(0.0, 1.0),
        )
    }

    #[test]
    fn point_at_endpoints_and_midpoint() {
        let c = CubicBezier::new(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(3.0, 0.0),
        );
        assert_relative_eq!(c.point_at(0.0).x, 0.0);
        assert_relative_eq!(c.point_at(1.0).x, 3.0);
        // Collinear control points: the curve is the straight segment.
        assert_relative_eq!(c.point_at(0.5).x, 1.5, epsilon = 1e-12);
        assert_relative_eq!(c.point_at(0.5).y, 0.0);
    }

    #[test]
    fn length_of_straight_curve_is_chord() {
        let c = CubicBezier::new(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(2.0, 2.0),
            Point2::new(3.0, 3.0),
        );
        assert_relative_eq!(c.length(), 18.0_f64.sqrt(), epsilon = 1e-6);
    }

    #[test]
    fn quarter_circle_length_close_to_half_pi() {
        // The circle-constant approximation is good to ~0.03%.
        let c = quarter_arc();
        assert_relative_eq!(c.length(), std::f64::consts::FRAC_PI_2, epsilon = 2e-3);
    }

    #[test]
    fn split_halves_reproduce_original() {
        let c = quarter_arc();
        let (a, b) = c.split(0.3);
        assert_relative_eq!(a.to.x, b.from.x);
        assert_relative_eq!(a.to.y, b.from.y);
        // Sample both sides against the original parameterization.
        for i in 0..=10 {
            let t = f64::from(i) / 10.0;
            let on_a = a.point_at(t);
            let orig = c.point_at(t * 0.3);
            assert_relative_eq!(on_a.x, orig.x, epsilon = 1e-12);
            assert_relative_eq!(on_a.y, orig.y, epsilon = 1e-12);
            let on_b = b.point_at(t);
            let orig = c.point_at(0.3 + t * 0.7);
            assert_relative_eq!(on_b.x, orig.x, epsilon = 1e-12);
            assert_relative_eq!(on_b.y, orig.y, epsilon = 1e-12);
        }
    }

    #[test]
    fn t_at_point_finds_midpoint() {
        let c = quarter_arc();
        let mid = c.point_at(0.5);
        assert_relative_eq!(c.t_at_point(&mid), 0.5, epsilon = 1e-3);
    }

    #[test]
    fn point_along_walks_the_arc() {
        let c = CubicBezier::new(
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(20.0, 0.0),
            Point2::new(30.0, 0.0),
        );
        let p = c.point_along(15.0).unwrap();
        assert_relative_eq!(p.x, 15.0, epsilon = 0.1);
        assert_relative_eq!(p.y, 0.0);
    }

    #[test]
    fn point_along_past_end_is_out_of_range() {
        let c = quarter_arc();
        let err = c.point_along(10.0).unwrap_err();
        assert!(matches!(
            err,
            SeamlineError::Geometry(GeometryError::OutOfRange { .. })
        ));
    }

    #[test]
    fn tangents_of_quarter_arc() {
        let c = quarter_arc();
        let start = c.start_tangent();
        assert_relative_eq!(start.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(start.y, 1.0, epsilon = 1e-9);
        let end = c.end_tangent();
        assert_relative_eq!(end.x, -1.0, epsilon = 1e-9);
        assert_relative_eq!(end.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn quadratic_as_cubic_start_tangent_uses_curve_sample() {
        // cp1 on the start point: tangent comes from walking the curve.
        let c = CubicBezier::new(
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
        );
        let t = c.start_tangent();
        assert!(t.x > 0.9, "tangent should point along the curve, got {t:?}");
    }

    #[test]
    fn edge_of_quarter_arc() {
        let c = quarter_arc();
        let right = c.edge(EdgeSide::Right);
        assert_relative_eq!(right.x, 1.0, epsilon = 1e-6);
        let bottom = c.edge(EdgeSide::Bottom);
        assert_relative_eq!(bottom.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn circle_constant_value() {
        assert_relative_eq!(circle_handle_length(1.0), 0.552_284, epsilon = 1e-6);
        assert_relative_eq!(circle_handle_length(2.0), 2.0 * 0.552_284, epsilon = 1e-5);
    }

    #[test]
    fn crosses_y_of_quarter_arc() {
        let hits = quarter_arc().crosses_y(0.5);
        assert_eq!(hits.len(), 1);
        // On a unit circle y = 0.5 gives x = √3/2; the single-cubic
        // approximation is close.
        assert_relative_eq!(hits[0].x, (3.0_f64).sqrt() / 2.0, epsilon = 1e-2);
    }
}
