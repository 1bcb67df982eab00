//! Point and curve queries for pattern-drafting consumers.
//!
//! Angles are in degrees under the drafting convention: y grows downward,
//! 0° points right, 90° points up on screen. The round trip
//! `shift(a, angle(a, b), distance(a, b)) == b` holds for any two points.

use crate::error::Result;
use crate::math::bezier::{CubicBezier, EdgeSide};
use crate::math::{intersect_2d, Point2};
use crate::surface::Surface;

/// Direction from `from` to `to` in degrees, normalized to `[0, 360)`.
#[must_use]
pub fn angle_of(from: &Point2, to: &Point2) -> f64 {
    let degrees = (-(to.y - from.y)).atan2(to.x - from.x).to_degrees();
    degrees.rem_euclid(360.0)
}

/// Point reached by moving `distance` from `pos` in the direction
/// `angle` (degrees).
#[must_use]
pub fn shift_point(pos: &Point2, angle: f64, distance: f64) -> Point2 {
    let radians = angle.to_radians();
    Point2::new(
        pos.x + distance * radians.cos(),
        pos.y - distance * radians.sin(),
    )
}

impl Surface {
    /// X coordinate of a named point.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::PointError::UnknownPoint`] when the name is
    /// absent. All queries below share this behavior for every name they
    /// resolve.
    pub fn x(&self, name: &str) -> Result<f64> {
        Ok(self.pos_of(name)?.x)
    }

    /// Y coordinate of a named point.
    pub fn y(&self, name: &str) -> Result<f64> {
        Ok(self.pos_of(name)?.y)
    }

    /// Distance between two named points.
    pub fn distance(&self, a: &str, b: &str) -> Result<f64> {
        Ok((self.pos_of(b)? - self.pos_of(a)?).norm())
    }

    /// Difference in x from `a` to `b`.
    pub fn delta_x(&self, a: &str, b: &str) -> Result<f64> {
        Ok(self.x(b)? - self.x(a)?)
    }

    /// Difference in y from `a` to `b`.
    pub fn delta_y(&self, a: &str, b: &str) -> Result<f64> {
        Ok(self.y(b)? - self.y(a)?)
    }

    /// Direction from `a` to `b` in degrees, normalized to `[0, 360)`.
    pub fn angle(&self, a: &str, b: &str) -> Result<f64> {
        Ok(angle_of(&self.pos_of(a)?, &self.pos_of(b)?))
    }

    /// Shifts a named point by angle (degrees) and distance.
    pub fn shift(&self, name: &str, angle: f64, distance: f64) -> Result<Point2> {
        Ok(shift_point(&self.pos_of(name)?, angle, distance))
    }

    /// Shifts `a` towards `b` by `distance`. Overshooting past `b` is
    /// allowed.
    pub fn shift_towards(&self, a: &str, b: &str, distance: f64) -> Result<Point2> {
        let angle = self.angle(a, b)?;
        self.shift(a, angle, distance)
    }

    /// Shifts `b` away from `a` by `distance`, extending the line `a → b`.
    pub fn shift_outwards(&self, a: &str, b: &str, distance: f64) -> Result<Point2> {
        let angle = self.angle(a, b)?;
        self.shift(b, angle, distance)
    }

    /// Walks `distance` along the named curve from its start.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::GeometryError::OutOfRange`] when `distance`
    /// exceeds the curve's length.
    pub fn shift_along(&self, curve: [&str; 4], distance: f64) -> Result<Point2> {
        self.curve(curve)?.point_along(distance)
    }

    /// Rotates a named point around a named pivot by `angle` degrees
    /// (counterclockwise on screen).
    pub fn rotate(&self, name: &str, pivot: &str, angle: f64) -> Result<Point2> {
        let heading = self.angle(pivot, name)? + angle;
        let radius = self.distance(pivot, name)?;
        self.shift(pivot, heading, radius)
    }

    /// Mirrors a named point across the vertical line `x = anchor_x`.
    pub fn flip_x(&self, name: &str, anchor_x: f64) -> Result<Point2> {
        let pos = self.pos_of(name)?;
        Ok(Point2::new(2.0 * anchor_x - pos.x, pos.y))
    }

    /// Mirrors a named point across the horizontal line `y = anchor_y`.
    pub fn flip_y(&self, name: &str, anchor_y: f64) -> Result<Point2> {
        let pos = self.pos_of(name)?;
        Ok(Point2::new(pos.x, 2.0 * anchor_y - pos.y))
    }

    /// Intersection of the finite segments `a0 → a1` and `b0 → b1`, if any.
    pub fn lines_cross(&self, a0: &str, a1: &str, b0: &str, b1: &str) -> Result<Option<Point2>> {
        Ok(intersect_2d::segment_segment(
            &self.pos_of(a0)?,
            &self.pos_of(a1)?,
            &self.pos_of(b0)?,
            &self.pos_of(b1)?,
        ))
    }

    /// Intersection of the infinite lines through `a0 → a1` and `b0 → b1`.
    /// `None` when the beams are parallel.
    pub fn beams_cross(&self, a0: &str, a1: &str, b0: &str, b1: &str) -> Result<Option<Point2>> {
        Ok(intersect_2d::beam_beam(
            &self.pos_of(a0)?,
            &self.pos_of(a1)?,
            &self.pos_of(b0)?,
            &self.pos_of(b1)?,
        ))
    }

    /// Resolves four point names `[from, cp1, cp2, to]` into a curve.
    pub fn curve(&self, names: [&str; 4]) -> Result<CubicBezier> {
        Ok(CubicBezier::new(
            self.pos_of(names[0])?,
            self.pos_of(names[1])?,
            self.pos_of(names[2])?,
            self.pos_of(names[3])?,
        ))
    }

    /// Approximate arc length of the named curve.
    pub fn curve_len(&self, curve: [&str; 4]) -> Result<f64> {
        Ok(self.curve(curve)?.length())
    }

    /// Intersections of the named curve with the infinite line through two
    /// named points.
    pub fn curve_crosses_line(
        &self,
        curve: [&str; 4],
        l0: &str,
        l1: &str,
    ) -> Result<Vec<Point2>> {
        Ok(intersect_2d::line_curve(
            &self.pos_of(l0)?,
            &self.pos_of(l1)?,
            &self.curve(curve)?,
        ))
    }

    /// Intersections of the named curve with the vertical line `x = target`.
    pub fn curve_crosses_x(&self, curve: [&str; 4], target: f64) -> Result<Vec<Point2>> {
        Ok(self.curve(curve)?.crosses_x(target))
    }

    /// Intersections of the named curve with the horizontal line
    /// `y = target`.
    pub fn curve_crosses_y(&self, curve: [&str; 4], target: f64) -> Result<Vec<Point2>> {
        Ok(self.curve(curve)?.crosses_y(target))
    }

    /// Intersections of two named curves.
    pub fn curves_cross(&self, a: [&str; 4], b: [&str; 4]) -> Result<Vec<Point2>> {
        Ok(intersect_2d::curve_curve(&self.curve(a)?, &self.curve(b)?))
    }

    /// Splits the named curve at parameter `t`.
    pub fn split_curve_at(&self, curve: [&str; 4], t: f64) -> Result<(CubicBezier, CubicBezier)> {
        Ok(self.curve(curve)?.split(t))
    }

    /// Splits the named curve at the parameter closest to a named point.
    pub fn split_curve_at_point(
        &self,
        curve: [&str; 4],
        name: &str,
    ) -> Result<(CubicBezier, CubicBezier)> {
        let curve = self.curve(curve)?;
        let t = curve.t_at_point(&self.pos_of(name)?);
        Ok(curve.split(t))
    }

    /// Extreme point of the named curve on the given side.
    pub fn curve_edge(&self, curve: [&str; 4], side: EdgeSide) -> Result<Point2> {
        Ok(self.curve(curve)?.edge(side))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{GeometryError, SeamlineError};
    use crate::math::bezier::circle_handle_length;
    use approx::assert_relative_eq;

    fn surface() -> Surface {
        let mut s = Surface::new();
        s.add_point("origin", Point2::new(0.0, 0.0));
        s.add_point("right", Point2::new(10.0, 0.0));
        s.add_point("below", Point2::new(0.0, 10.0));
        s.add_point("diag", Point2::new(10.0, 10.0));
        s
    }

    #[test]
    fn angle_is_screen_oriented() {
        let s = surface();
        assert_relative_eq!(s.angle("origin", "right").unwrap(), 0.0);
        // y grows downward, so "below" lies at 270°.
        assert_relative_eq!(s.angle("origin", "below").unwrap(), 270.0);
        assert_relative_eq!(s.angle("origin", "diag").unwrap(), 315.0);
    }

    #[test]
    fn shift_inverts_angle_and_distance() {
        let s = surface();
        let angle = s.angle("origin", "diag").unwrap();
        let dist = s.distance("origin", "diag").unwrap();
        let p = s.shift("origin", angle, dist).unwrap();
        assert_relative_eq!(p.x, 10.0, epsilon = 1e-9);
        assert_relative_eq!(p.y, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn shift_towards_and_outwards() {
        let s = surface();
        let towards = s.shift_towards("origin", "right", 4.0).unwrap();
        assert_relative_eq!(towards.x, 4.0, epsilon = 1e-9);
        let outwards = s.shift_outwards("origin", "right", 4.0).unwrap();
        assert_relative_eq!(outwards.x, 14.0, epsilon = 1e-9);
    }

    #[test]
    fn rotate_quarter_turn() {
        let s = surface();
        // Counterclockwise on screen: "right" rotates to above the origin.
        let p = s.rotate("right", "origin", 90.0).unwrap();
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(p.y, -10.0, epsilon = 1e-9);
    }

    #[test]
    fn flips_mirror_around_anchor() {
        let s = surface();
        let fx = s.flip_x("diag", 0.0).unwrap();
        assert_relative_eq!(fx.x, -10.0);
        assert_relative_eq!(fx.y, 10.0);
        let fy = s.flip_y("diag", 2.0).unwrap();
        assert_relative_eq!(fy.y, -6.0);
    }

    #[test]
    fn delta_components() {
        let s = surface();
        assert_relative_eq!(s.delta_x("origin", "diag").unwrap(), 10.0);
        assert_relative_eq!(s.delta_y("diag", "right").unwrap(), -10.0);
    }

    #[test]
    fn lines_cross_only_within_segments() {
        let mut s = surface();
        s.add_point("up", Point2::new(10.0, -10.0));
        let hit = s.lines_cross("origin", "diag", "below", "up").unwrap();
        let hit = hit.unwrap();
        // y = x meets y = 10 - 2x at x = 10/3.
        assert_relative_eq!(hit.x, 10.0 / 3.0, epsilon = 1e-9);
        assert_relative_eq!(hit.y, hit.x, epsilon = 1e-9);
        // Parallel beams never cross.
        assert!(s.beams_cross("origin", "right", "below", "diag").unwrap().is_none());
    }

    #[test]
    fn curve_queries_resolve_names() {
        let mut s = Surface::new();
        let k = circle_handle_length(10.0);
        s.add_point("start", Point2::new(10.0, 0.0));
        s.add_point("cp1", Point2::new(10.0, k));
        s.add_point("cp2", Point2::new(k, 10.0));
        s.add_point("end", Point2::new(0.0, 10.0));
        let names = ["start", "cp1", "cp2", "end"];
        let len = s.curve_len(names).unwrap();
        assert_relative_eq!(len, 10.0 * std::f64::consts::FRAC_PI_2, epsilon = 0.02);
        let hits = s.curve_crosses_x(names, 5.0).unwrap();
        assert_eq!(hits.len(), 1);
        let edge = s.curve_edge(names, EdgeSide::Right).unwrap();
        assert_relative_eq!(edge.x, 10.0, epsilon = 1e-6);
    }

    #[test]
    fn shift_along_walks_and_bounds() {
        let mut s = Surface::new();
        s.add_point("a", Point2::new(0.0, 0.0));
        s.add_point("b", Point2::new(10.0, 0.0));
        s.add_point("c", Point2::new(20.0, 0.0));
        s.add_point("d", Point2::new(30.0, 0.0));
        let names = ["a", "b", "c", "d"];
        let p = s.shift_along(names, 15.0).unwrap();
        assert_relative_eq!(p.x, 15.0, epsilon = 0.1);
        let err = s.shift_along(names, 31.0).unwrap_err();
        assert!(matches!(
            err,
            SeamlineError::Geometry(GeometryError::OutOfRange { .. })
        ));
    }
}
