use super::bezier::CubicBezier;
use super::{Point2, COINCIDENCE, TOLERANCE};

/// Slack for the sub-distance-sum segment containment check, matching the
/// drafting-scale rounding of the rest of the kernel.
const SEGMENT_SLACK: f64 = 0.05;

/// Recursion cutoff for the curve-curve subdivision search: boxes smaller
/// than this are reported as a single intersection candidate.
const SUBDIVISION_LIMIT: f64 = 1e-4;

/// Intersection of two infinite lines ("beams") through `a0→a1` and
/// `b0→b1`, via the cross-product method.
///
/// Returns `None` when the beams are parallel.
#[must_use]
pub fn beam_beam(a0: &Point2, a1: &Point2, b0: &Point2, b1: &Point2) -> Option<Point2> {
    let da = a1 - a0;
    let db = b1 - b0;
    let cross = da.x * db.y - da.y * db.x;
    if cross.abs() < TOLERANCE {
        return None;
    }
    let dx = b0.x - a0.x;
    let dy = b0.y - a0.y;
    let t = (dx * db.y - dy * db.x) / cross;
    Some(Point2::new(a0.x + da.x * t, a0.y + da.y * t))
}

/// Intersection of two finite segments.
///
/// The beam intersection is accepted only when the sum of sub-distances
/// from the candidate to each segment's endpoints equals the segment
/// length, within rounding.
#[must_use]
pub fn segment_segment(a0: &Point2, a1: &Point2, b0: &Point2, b1: &Point2) -> Option<Point2> {
    let pt = beam_beam(a0, a1, b0, b1)?;
    if on_segment(&pt, a0, a1) && on_segment(&pt, b0, b1) {
        Some(pt)
    } else {
        None
    }
}

/// Checks that `pt` lies within the finite segment `s0→s1`.
fn on_segment(pt: &Point2, s0: &Point2, s1: &Point2) -> bool {
    let len = (s1 - s0).norm();
    let via = (pt - s0).norm() + (s1 - pt).norm();
    (via - len).abs() < SEGMENT_SLACK
}

/// Intersections of an infinite line through `l0→l1` with a cubic curve.
///
/// The curve's parametric polynomial is substituted into the line equation
/// and the resulting cubic is root-solved for `t ∈ [0, 1]`, mapping the
/// valid roots back to coordinates.
#[must_use]
pub fn line_curve(l0: &Point2, l1: &Point2, curve: &CubicBezier) -> Vec<Point2> {
    // Line in normal form: n · (x, y) + c = 0.
    let nx = l0.y - l1.y;
    let ny = l1.x - l0.x;
    let c = l0.x * l1.y - l1.x * l0.y;

    // Power-basis coefficients of the curve, per axis.
    let (ax3, ax2, ax1, ax0) = power_basis(curve.from.x, curve.cp1.x, curve.cp2.x, curve.to.x);
    let (ay3, ay2, ay1, ay0) = power_basis(curve.from.y, curve.cp1.y, curve.cp2.y, curve.to.y);

    let roots = cubic_roots(
        nx * ax3 + ny * ay3,
        nx * ax2 + ny * ay2,
        nx * ax1 + ny * ay1,
        nx * ax0 + ny * ay0 + c,
    );

    let mut hits = Vec::new();
    let eps = 1e-9;
    for t in roots {
        if (-eps..=1.0 + eps).contains(&t) {
            push_unique(&mut hits, curve.point_at(t.clamp(0.0, 1.0)));
        }
    }
    hits
}

/// Intersections of a finite segment with a cubic curve: the line-curve
/// hits restricted to the segment's extent.
#[must_use]
pub fn segment_curve(s0: &Point2, s1: &Point2, curve: &CubicBezier) -> Vec<Point2> {
    line_curve(s0, s1, curve)
        .into_iter()
        .filter(|pt| on_segment(pt, s0, s1))
        .collect()
}

/// Intersections of two cubic curves by recursive De Casteljau subdivision
/// with bounding-box rejection.
#[must_use]
pub fn curve_curve(a: &CubicBezier, b: &CubicBezier) -> Vec<Point2> {
    let mut hits = Vec::new();
    subdivide(a, b, 0, &mut hits);
    hits
}

fn subdivide(a: &CubicBezier, b: &CubicBezier, depth: u32, hits: &mut Vec<Point2>) {
    let (a_min, a_max) = control_box(a);
    let (b_min, b_max) = control_box(b);
    if a_min.x > b_max.x || b_min.x > a_max.x || a_min.y > b_max.y || b_min.y > a_max.y {
        return;
    }

    let a_size = (a_max.x - a_min.x).max(a_max.y - a_min.y);
    let b_size = (b_max.x - b_min.x).max(b_max.y - b_min.y);
    if depth >= 40 || (a_size < SUBDIVISION_LIMIT && b_size < SUBDIVISION_LIMIT) {
        push_unique(
            hits,
            Point2::new(
                (a_min.x + a_max.x + b_min.x + b_max.x) / 4.0,
                (a_min.y + a_max.y + b_min.y + b_max.y) / 4.0,
            ),
        );
        return;
    }

    let (a1, a2) = a.split(0.5);
    let (b1, b2) = b.split(0.5);
    subdivide(&a1, &b1, depth + 1, hits);
    subdivide(&a1, &b2, depth + 1, hits);
    subdivide(&a2, &b1, depth + 1, hits);
    subdivide(&a2, &b2, depth + 1, hits);
}

/// Bounding box of a curve's control polygon (contains the curve by the
/// convex hull property).
fn control_box(c: &CubicBezier) -> (Point2, Point2) {
    let min = Point2::new(
        c.from.x.min(c.cp1.x).min(c.cp2.x).min(c.to.x),
        c.from.y.min(c.cp1.y).min(c.cp2.y).min(c.to.y),
    );
    let max = Point2::new(
        c.from.x.max(c.cp1.x).max(c.cp2.x).max(c.to.x),
        c.from.y.max(c.cp1.y).max(c.cp2.y).max(c.to.y),
    );
    (min, max)
}

fn push_unique(hits: &mut Vec<Point2>, candidate: Point2) {
    if !hits
        .iter()
        .any(|p| super::is_same_point(p, &candidate))
    {
        hits.push(candidate);
    }
}

/// Power-basis coefficients `(t³, t², t, 1)` for one axis of a cubic.
fn power_basis(p0: f64, p1: f64, p2: f64, p3: f64) -> (f64, f64, f64, f64) {
    (
        -p0 + 3.0 * p1 - 3.0 * p2 + p3,
        3.0 * p0 - 6.0 * p1 + 3.0 * p2,
        -3.0 * p0 + 3.0 * p1,
        p0,
    )
}

/// Real roots of `c3·t³ + c2·t² + c1·t + c0 = 0`, degrading gracefully to
/// the quadratic and linear cases.
fn cubic_roots(c3: f64, c2: f64, c1: f64, c0: f64) -> Vec<f64> {
    if c3.abs() < TOLERANCE {
        return quadratic_roots(c2, c1, c0);
    }

    // Depressed cubic t = s - a/3: s³ + p·s + q = 0.
    let a = c2 / c3;
    let b = c1 / c3;
    let c = c0 / c3;
    let p = b - a * a / 3.0;
    let q = 2.0 * a * a * a / 27.0 - a * b / 3.0 + c;
    let shift = -a / 3.0;
    let disc = q * q / 4.0 + p * p * p / 27.0;

    if disc > TOLERANCE {
        let root = (-q / 2.0 + disc.sqrt()).cbrt() + (-q / 2.0 - disc.sqrt()).cbrt();
        vec![root + shift]
    } else if disc < -TOLERANCE {
        // Three distinct real roots (trigonometric form).
        let r = (-p * p * p / 27.0).sqrt();
        let phi = (-q / (2.0 * r)).clamp(-1.0, 1.0).acos();
        let m = 2.0 * (-p / 3.0).sqrt();
        (0..3)
            .map(|k| m * ((phi + 2.0 * std::f64::consts::PI * f64::from(k)) / 3.0).cos() + shift)
            .collect()
    } else {
        // Repeated roots.
        let u = (-q / 2.0).cbrt();
        vec![2.0 * u + shift, -u + shift]
    }
}

fn quadratic_roots(c2: f64, c1: f64, c0: f64) -> Vec<f64> {
    if c2.abs() < TOLERANCE {
        if c1.abs() < TOLERANCE {
            return Vec::new();
        }
        return vec![-c0 / c1];
    }
    let disc = c1 * c1 - 4.0 * c2 * c0;
    if disc < -TOLERANCE {
        return Vec::new();
    }
    if disc.abs() <= TOLERANCE {
        return vec![-c1 / (2.0 * c2)];
    }
    let s = disc.sqrt();
    vec![(-c1 + s) / (2.0 * c2), (-c1 - s) / (2.0 * c2)]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn beams_cross_at_origin() {
        let pt = beam_beam(
            &Point2::new(-1.0, -1.0),
            &Point2::new(1.0, 1.0),
            &Point2::new(-1.0, 1.0),
            &Point2::new(1.0, -1.0),
        )
        .unwrap();
        assert_relative_eq!(pt.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(pt.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn beams_cross_outside_segments() {
        // Beams of disjoint segments still cross.
        let pt = beam_beam(
            &Point2::new(0.0, 0.0),
            &Point2::new(1.0, 0.0),
            &Point2::new(5.0, -1.0),
            &Point2::new(5.0, 1.0),
        )
        .unwrap();
        assert_relative_eq!(pt.x, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn parallel_beams_return_none() {
        assert!(beam_beam(
            &Point2::new(0.0, 0.0),
            &Point2::new(1.0, 0.0),
            &Point2::new(0.0, 1.0),
            &Point2::new(1.0, 1.0),
        )
        .is_none());
    }

    #[test]
    fn segments_cross_within_bounds_only() {
        let a0 = Point2::new(0.0, 0.0);
        let a1 = Point2::new(2.0, 2.0);
        let b0 = Point2::new(0.0, 2.0);
        let b1 = Point2::new(2.0, 0.0);
        let pt = segment_segment(&a0, &a1, &b0, &b1).unwrap();
        assert_relative_eq!(pt.x, 1.0, epsilon = 1e-12);

        // Same beams, segments too short to reach each other.
        let b0 = Point2::new(10.0, 12.0);
        let b1 = Point2::new(12.0, 10.0);
        assert!(segment_segment(&a0, &a1, &b0, &b1).is_none());
    }

    #[test]
    fn diagonal_crosses_arc_once() {
        // Quarter circle from (10, 0) to (0, 10); the diagonal beam meets
        // the full circle twice but the quarter only once.
        let k = super::super::bezier::circle_handle_length(10.0);
        let arc = CubicBezier::new(
            Point2::new(10.0, 0.0),
            Point2::new(10.0, k),
            Point2::new(k, 10.0),
            Point2::new(0.0, 10.0),
        );
        let hits = line_curve(&Point2::new(0.0, 0.0), &Point2::new(10.0, 10.0), &arc);
        assert_eq!(hits.len(), 1);
        assert_relative_eq!(hits[0].x, hits[0].y, epsilon = 1e-6);
        assert_relative_eq!(hits[0].x, 10.0 / 2.0_f64.sqrt(), epsilon = 0.05);
    }

    #[test]
    fn line_misses_curve() {
        let c = CubicBezier::new(
            Point2::new(0.0, 0.0),
            Point2::new(3.0, 5.0),
            Point2::new(7.0, 5.0),
            Point2::new(10.0, 0.0),
        );
        let hits = line_curve(&Point2::new(0.0, 20.0), &Point2::new(10.0, 20.0), &c);
        assert!(hits.is_empty());
    }

    #[test]
    fn segment_curve_respects_segment_extent() {
        let c = CubicBezier::new(
            Point2::new(0.0, 0.0),
            Point2::new(3.0, 5.0),
            Point2::new(7.0, 5.0),
            Point2::new(10.0, 0.0),
        );
        // Infinite horizontal line at y=2 crosses twice.
        let all = line_curve(&Point2::new(-100.0, 2.0), &Point2::new(100.0, 2.0), &c);
        assert_eq!(all.len(), 2);
        // A short segment on the left only sees one crossing.
        let some = segment_curve(&Point2::new(-1.0, 2.0), &Point2::new(3.0, 2.0), &c);
        assert_eq!(some.len(), 1);
        assert!(some[0].x < 3.0);
    }

    #[test]
    fn curves_cross_once() {
        // Two arches mirrored through y = 5 cross twice.
        let a = CubicBezier::new(
            Point2::new(0.0, 0.0),
            Point2::new(3.0, 10.0),
            Point2::new(7.0, 10.0),
            Point2::new(10.0, 0.0),
        );
        let b = CubicBezier::new(
            Point2::new(0.0, 10.0),
            Point2::new(3.0, 0.0),
            Point2::new(7.0, 0.0),
            Point2::new(10.0, 10.0),
        );
        let hits = curve_curve(&a, &b);
        assert_eq!(hits.len(), 2, "hits={hits:?}");
        for pt in &hits {
            assert_relative_eq!(pt.y, 5.0, epsilon = 0.05);
        }
    }

    #[test]
    fn disjoint_curves_do_not_cross() {
        let a = CubicBezier::new(
            Point2::new(0.0, 0.0),
            Point2::new(3.0, 1.0),
            Point2::new(7.0, 1.0),
            Point2::new(10.0, 0.0),
        );
        let b = CubicBezier::new(
            Point2::new(0.0, 10.0),
            Point2::new(3.0, 11.0),
            Point2::new(7.0, 11.0),
            Point2::new(10.0, 10.0),
        );
        assert!(curve_curve(&a, &b).is_empty());
    }

    #[test]
    fn cubic_roots_three_real() {
        // (t-1)(t-2)(t-3) = t³ - 6t² + 11t - 6.
        let mut roots = cubic_roots(1.0, -6.0, 11.0, -6.0);
        roots.sort_by(f64::total_cmp);
        assert_eq!(roots.len(), 3);
        assert_relative_eq!(roots[0], 1.0, epsilon = 1e-9);
        assert_relative_eq!(roots[1], 2.0, epsilon = 1e-9);
        assert_relative_eq!(roots[2], 3.0, epsilon = 1e-9);
    }

    #[test]
    fn cubic_roots_single_real() {
        // t³ + t + 1 has one real root near -0.6823.
        let roots = cubic_roots(1.0, 0.0, 1.0, 1.0);
        assert_eq!(roots.len(), 1);
        assert_relative_eq!(roots[0], -0.682_327_8, epsilon = 1e-6);
    }

    #[test]
    fn cubic_degrades_to_quadratic() {
        // 0·t³ + t² - 1 = 0 → ±1.
        let mut roots = cubic_roots(0.0, 1.0, 0.0, -1.0);
        roots.sort_by(f64::total_cmp);
        assert_eq!(roots.len(), 2);
        assert_relative_eq!(roots[0], -1.0, epsilon = 1e-9);
        assert_relative_eq!(roots[1], 1.0, epsilon = 1e-9);
    }
}
