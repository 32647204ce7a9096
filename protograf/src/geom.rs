//! Coordinate geometry shared by grids, layouts and tracks.
//!
//! Page space is y-down, but angles follow the drafting convention: degrees,
//! zero pointing east and increasing counter-clockwise *as seen on the page*.

use kurbo::{BezPath, Point, Vec2};

use crate::error::ensure_positive;
use crate::Error;

/// Distances closer than this are treated as equal when walking paths.
pub const EPSILON: f64 = 1e-9;

/// The square root of three.
pub const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// The vertices of a regular polygon.
///
/// Vertex `i` lies at `rotation + i * 360 / sides` degrees, so vertices run
/// counter-clockwise on the page starting from `rotation`.
pub fn polygon_vertices(
    sides: usize,
    radius: f64,
    center: Point,
    rotation: f64,
) -> Result<Vec<Point>, Error> {
    if sides < 3 {
        return Err(Error::TooFewSides(sides));
    }
    ensure_positive("radius", radius)?;
    let step = 360.0 / sides as f64;
    Ok((0..sides)
        .map(|i| point_on_circle(center, radius, rotation + i as f64 * step))
        .collect())
}

/// The point at `angle` degrees on a circle.
pub fn point_on_circle(center: Point, radius: f64, angle: f64) -> Point {
    let th = angle.to_radians();
    Point::new(center.x + radius * th.cos(), center.y - radius * th.sin())
}

/// The page angle, in degrees in `[0, 360)`, of the vector from `from` to `to`.
pub fn angle_between(from: Point, to: Point) -> f64 {
    vector_angle(to - from)
}

/// The page angle, in degrees in `[0, 360)`, of a vector in page space.
pub fn vector_angle(v: Vec2) -> f64 {
    normalize_angle((-v.y).atan2(v.x).to_degrees())
}

/// Bring an angle into `[0, 360)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if a >= 360.0 {
        0.0
    } else {
        a
    }
}

/// Rotate `p` about `center` by `angle` degrees, counter-clockwise on the page.
pub fn rotate_point(p: Point, center: Point, angle: f64) -> Point {
    let (sin, cos) = angle.to_radians().sin_cos();
    let d = p - center;
    // y is flipped on the page, so a page-CCW rotation is a math-CW one here.
    Point::new(
        center.x + d.x * cos + d.y * sin,
        center.y - d.x * sin + d.y * cos,
    )
}

/// The average of a set of vertices.
pub fn centroid(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(Vec2::ZERO, |acc, p| acc + p.to_vec2());
    Some((sum / points.len() as f64).to_point())
}

/// The length of a chain of line segments, closing it back to the start if asked.
pub fn polyline_length(points: &[Point], closed: bool) -> f64 {
    segments(points, closed).map(|(a, b)| a.distance(b)).sum()
}

/// Iterate over the segments of a chain of points.
pub fn segments(points: &[Point], closed: bool) -> impl Iterator<Item = (Point, Point)> + '_ {
    let closing = if closed && points.len() > 2 {
        Some((points[points.len() - 1], points[0]))
    } else {
        None
    };
    points.windows(2).map(|w| (w[0], w[1])).chain(closing)
}

/// Find the point at an accumulated `distance` along a chain of segments.
///
/// Returns the point and the unit tangent of the segment it falls on; a point
/// exactly on a corner takes the tangent of the segment leaving it. Distances
/// outside `[0, length]` give `None`, apart from a tiny tolerance at the end.
pub fn point_along(points: &[Point], closed: bool, distance: f64) -> Option<(Point, Vec2)> {
    if points.len() < 2 || distance < -EPSILON {
        return None;
    }
    let mut walked = 0.0;
    let mut last = None;
    for (a, b) in segments(points, closed) {
        let len = a.distance(b);
        if len <= EPSILON {
            continue;
        }
        let tangent = (b - a) / len;
        if distance < walked + len {
            let t = ((distance - walked) / len).clamp(0.0, 1.0);
            return Some((a.lerp(b, t), tangent));
        }
        walked += len;
        last = Some((b, tangent));
    }
    match last {
        Some(end) if distance - walked <= EPSILON => Some(end),
        _ => None,
    }
}

/// Twice the signed area of a polygon, positive when its vertices run
/// clockwise on the (y-down) page.
pub fn signed_area2(points: &[Point]) -> f64 {
    segments(points, true)
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum()
}

/// Whether the vertices run clockwise as seen on the page.
pub fn is_clockwise(points: &[Point]) -> bool {
    signed_area2(points) > 0.0
}

/// A closed path through the given vertices.
pub fn polygon_path(points: &[Point]) -> BezPath {
    let mut path = polyline_path(points);
    if points.len() > 2 {
        path.close_path();
    }
    path
}

/// An open path through the given vertices.
pub fn polyline_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let mut iter = points.iter();
    if let Some(first) = iter.next() {
        path.move_to(*first);
        for p in iter {
            path.line_to(*p);
        }
    }
    path
}

/// The side length of a regular polygon with the given circumradius.
pub fn polygon_side(sides: usize, radius: f64) -> f64 {
    2.0 * radius * (std::f64::consts::PI / sides as f64).sin()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_near(a: Point, b: Point) {
        assert!(a.distance(b) < 1e-9, "{:?} != {:?}", a, b);
    }

    #[test]
    fn hexagon_vertices_are_equidistant() {
        let center = Point::new(10.0, 20.0);
        let pts = polygon_vertices(6, 5.0, center, 0.0).unwrap();
        assert_eq!(pts.len(), 6);
        for p in &pts {
            assert!((p.distance(center) - 5.0).abs() < 1e-9);
        }
        assert_near(pts[0], Point::new(15.0, 20.0));
        // counter-clockwise on the page means the second vertex is above the first
        assert!(pts[1].y < center.y);
        let side = pts[0].distance(pts[1]);
        assert!((side - polygon_side(6, 5.0)).abs() < 1e-9);
    }

    #[test]
    fn polygon_needs_three_sides() {
        assert!(matches!(
            polygon_vertices(2, 1.0, Point::ORIGIN, 0.0),
            Err(Error::TooFewSides(2))
        ));
        assert!(polygon_vertices(4, 0.0, Point::ORIGIN, 0.0).is_err());
    }

    #[test]
    fn angles_use_page_convention() {
        let o = Point::ORIGIN;
        assert!((angle_between(o, Point::new(1.0, 0.0)) - 0.0).abs() < 1e-9);
        assert!((angle_between(o, Point::new(0.0, -1.0)) - 90.0).abs() < 1e-9);
        assert!((angle_between(o, Point::new(-1.0, 0.0)) - 180.0).abs() < 1e-9);
        assert!((angle_between(o, Point::new(0.0, 1.0)) - 270.0).abs() < 1e-9);
        assert_eq!(normalize_angle(-90.0), 270.0);
        assert_eq!(normalize_angle(720.0), 0.0);
    }

    #[test]
    fn rotation_matches_circle() {
        let c = Point::new(3.0, 4.0);
        let p = point_on_circle(c, 2.0, 30.0);
        assert_near(rotate_point(p, c, 60.0), point_on_circle(c, 2.0, 90.0));
    }

    #[test]
    fn walk_along_polyline() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
        ];
        assert_eq!(polyline_length(&pts, false), 20.0);
        let (p, t) = point_along(&pts, false, 15.0).unwrap();
        assert_near(p, Point::new(10.0, 5.0));
        assert_eq!(t, Vec2::new(0.0, 1.0));
        let (end, _) = point_along(&pts, false, 20.0 + 1e-12).unwrap();
        assert_near(end, Point::new(10.0, 10.0));
        assert!(point_along(&pts, false, 21.0).is_none());
        assert!(point_along(&pts[..1], false, 0.0).is_none());
    }

    #[test]
    fn closed_walk_returns_home() {
        let square = [
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 4.0),
            Point::new(0.0, 4.0),
        ];
        assert_eq!(polyline_length(&square, true), 16.0);
        let (p, _) = point_along(&square, true, 14.0).unwrap();
        assert_near(p, Point::new(0.0, 2.0));
        assert!(is_clockwise(&square));
        let mut reversed = square.to_vec();
        reversed.reverse();
        assert!(!is_clockwise(&reversed));
    }

    #[test]
    fn centroid_of_square() {
        let square = [
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 4.0),
            Point::new(0.0, 4.0),
        ];
        assert_eq!(centroid(&square), Some(Point::new(2.0, 2.0)));
        assert_eq!(centroid(&[]), None);
    }
}
