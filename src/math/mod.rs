pub mod bezier;
pub mod intersect_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Two points closer than this on both axes are the same drafting point
/// (0.01 mm at pattern scale).
pub const COINCIDENCE: f64 = 0.01;

/// Curves shorter than this are too ill-conditioned for intersection and
/// tolerance scoring; they are accepted as-is.
pub const MIN_CURVE_LEN: f64 = 10.0;

/// Returns the left-pointing normal of a direction vector under y-down
/// drafting coordinates.
///
/// Offsetting by a positive distance moves a segment to its screen-left.
#[must_use]
pub fn left_normal(dir: &Vector2) -> Vector2 {
    Vector2::new(dir.y, -dir.x)
}

/// Checks whether two points are close enough to count as the same
/// drafting point.
#[must_use]
pub fn is_same_point(a: &Point2, b: &Point2) -> bool {
    (a.x - b.x).abs() < COINCIDENCE && (a.y - b.y).abs() < COINCIDENCE
}
