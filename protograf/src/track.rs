//! Tracks: placing pieces around the edge of a shape.
//!
//! A [`Track`] walks a polygon, polyline or circle and yields the points at
//! which a piece should be drawn, with a rotation chosen by a
//! [`RotationStyle`].

use kurbo::{BezPath, Circle, Point, Rect, Shape, Vec2};

use crate::error::ensure_positive;
use crate::geom::{
    angle_between, centroid, is_clockwise, normalize_angle, point_along, point_on_circle,
    polygon_path, polygon_vertices, polyline_length, polyline_path, segments, vector_angle,
    EPSILON,
};
use crate::hex::HexGeometry;
use crate::{Error, Piece, RenderContext};

/// The path a track follows.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrackPath {
    /// A closed outline through the given vertices.
    Polygon(Vec<Point>),
    /// An open chain of segments, walked from its first point.
    Polyline(Vec<Point>),
    Circle { center: Point, radius: f64 },
}

impl TrackPath {
    /// The outline of a rectangle, starting at its top-left corner.
    pub fn rect(rect: Rect) -> TrackPath {
        TrackPath::Polygon(vec![
            Point::new(rect.x0, rect.y0),
            Point::new(rect.x1, rect.y0),
            Point::new(rect.x1, rect.y1),
            Point::new(rect.x0, rect.y1),
        ])
    }

    pub fn regular_polygon(
        sides: usize,
        radius: f64,
        center: Point,
        rotation: f64,
    ) -> Result<TrackPath, Error> {
        Ok(TrackPath::Polygon(polygon_vertices(
            sides, radius, center, rotation,
        )?))
    }

    pub fn hexagon(geometry: &HexGeometry, center: Point) -> TrackPath {
        TrackPath::Polygon(geometry.vertices(center).to_vec())
    }

    pub fn circle(center: Point, radius: f64) -> TrackPath {
        TrackPath::Circle { center, radius }
    }

    pub fn is_closed(&self) -> bool {
        !matches!(self, TrackPath::Polyline(_))
    }

    /// The point that inward and outward rotations refer to.
    pub fn centre(&self) -> Option<Point> {
        match self {
            TrackPath::Polygon(points) | TrackPath::Polyline(points) => centroid(points),
            TrackPath::Circle { center, .. } => Some(*center),
        }
    }

    pub fn length(&self) -> f64 {
        match self {
            TrackPath::Polygon(points) => polyline_length(points, true),
            TrackPath::Polyline(points) => polyline_length(points, false),
            TrackPath::Circle { radius, .. } => std::f64::consts::TAU * radius,
        }
    }

    /// The track itself, for drawing.
    pub fn outline(&self) -> BezPath {
        match self {
            TrackPath::Polygon(points) => polygon_path(points),
            TrackPath::Polyline(points) => polyline_path(points),
            TrackPath::Circle { center, radius } => Circle::new(*center, *radius).to_path(0.1),
        }
    }

    fn validate(&self) -> Result<(), Error> {
        match self {
            TrackPath::Polygon(points) if points.len() < 3 => Err(Error::TooFewSides(points.len())),
            TrackPath::Polyline(points) if points.len() < 2 => Err(Error::InvalidSpacing(
                "a polyline track needs at least two points",
            )),
            TrackPath::Circle { radius, .. } => ensure_positive("track radius", *radius).map(|_| ()),
            _ => Ok(()),
        }
    }
}

/// Where along the track pieces are placed.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Spacing {
    /// At every vertex of a polygon or polyline.
    Vertices,
    /// This many points, equally spaced along the whole track.
    Count(usize),
    /// A point every so many units of distance from the start.
    Interval(f64),
    /// At the given angles around a circle.
    Angles(Vec<f64>),
}

/// How pieces are turned as they follow the track.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RotationStyle {
    /// Pieces stay upright.
    #[default]
    None,
    /// The top of each piece faces the centre of the track.
    Inwards,
    /// The top of each piece faces away from the centre.
    Outwards,
    /// The top of each piece faces the direction of travel.
    Along,
}

/// A point produced by a [`Track`].
#[derive(Clone, Debug, PartialEq)]
pub struct TrackPoint {
    /// Position along the track before any selection, counting from 1.
    pub index: usize,
    pub point: Point,
    /// Degrees, counter-clockwise on the page.
    pub rotation: f64,
    /// Distance walked from the start of the track.
    pub distance: f64,
}

/// Pieces placed along a path.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Track {
    pub path: TrackPath,
    pub spacing: Spacing,
    /// First vertex of a polygon track.
    pub start: usize,
    /// Where a circle track begins, in degrees.
    pub start_angle: f64,
    /// Walk closed tracks clockwise on the page.
    pub clockwise: bool,
    pub rotation: RotationStyle,
    /// Only keep these positions (counting from 1).
    pub sequence: Option<Vec<usize>>,
    /// Keep at most this many points.
    pub stop: Option<usize>,
}

impl Track {
    pub fn new(path: TrackPath) -> Track {
        Track {
            path,
            spacing: Spacing::Vertices,
            start: 0,
            start_angle: 90.0,
            clockwise: true,
            rotation: RotationStyle::None,
            sequence: None,
            stop: None,
        }
    }

    pub fn spacing(mut self, spacing: Spacing) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn start(mut self, start: usize) -> Self {
        self.start = start;
        self
    }

    pub fn start_angle(mut self, angle: f64) -> Self {
        self.start_angle = angle;
        self
    }

    pub fn clockwise(mut self, clockwise: bool) -> Self {
        self.clockwise = clockwise;
        self
    }

    pub fn rotation(mut self, rotation: RotationStyle) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn sequence(mut self, sequence: Vec<usize>) -> Self {
        self.sequence = Some(sequence);
        self
    }

    pub fn stop(mut self, stop: usize) -> Self {
        self.stop = Some(stop);
        self
    }

    /// The points at which pieces are drawn, in walking order.
    pub fn points(&self) -> Result<Vec<TrackPoint>, Error> {
        self.path.validate()?;
        let walked = match &self.path {
            TrackPath::Polygon(points) => self.walk_chain(&self.polygon_order(points), true)?,
            TrackPath::Polyline(points) => {
                if self.start != 0 {
                    log::warn!("start vertex {} ignored on an open track", self.start);
                }
                self.walk_chain(points, false)?
            }
            TrackPath::Circle { center, radius } => {
                if self.start != 0 {
                    log::warn!(
                        "start vertex {} ignored on a circle track; use start_angle",
                        self.start
                    );
                }
                self.walk_circle(*center, *radius)?
            }
        };
        let centre = self.path.centre();
        let mut out: Vec<TrackPoint> = walked
            .into_iter()
            .enumerate()
            .map(|(i, (point, tangent, distance))| TrackPoint {
                index: i + 1,
                point,
                rotation: self.rotation_at(point, tangent, centre),
                distance,
            })
            .collect();

        if let Some(sequence) = &self.sequence {
            for n in sequence.iter().filter(|&&n| n == 0 || n > out.len()) {
                log::warn!("track position {} is outside 1..={}", n, out.len());
            }
            out = sequence
                .iter()
                .filter_map(|&n| n.checked_sub(1).and_then(|i| out.get(i)).cloned())
                .collect();
        }
        if let Some(stop) = self.stop {
            out.truncate(stop);
        }
        Ok(out)
    }

    /// Draw `piece` at every point of the track.
    pub fn draw<R: RenderContext, P: Piece>(&self, ctx: &mut R, piece: &P) -> Result<(), Error> {
        for p in self.points()? {
            piece.draw(ctx, p.point, p.rotation)?;
        }
        Ok(())
    }

    /// Polygon vertices starting at `start`, walking the requested way round.
    ///
    /// Vertex indices always refer to the polygon as given.
    fn polygon_order(&self, points: &[Point]) -> Vec<Point> {
        let mut verts = points.to_vec();
        let n = verts.len();
        verts.rotate_left(self.start % n);
        if is_clockwise(points) != self.clockwise {
            verts[1..].reverse();
        }
        verts
    }

    fn walk_chain(&self, points: &[Point], closed: bool) -> Result<Vec<(Point, Vec2, f64)>, Error> {
        let length = polyline_length(points, closed);
        let distances: Vec<f64> = match &self.spacing {
            Spacing::Vertices => {
                let mut walked = 0.0;
                let mut distances = vec![0.0];
                for (a, b) in segments(points, closed).take(points.len() - 1) {
                    walked += a.distance(b);
                    distances.push(walked);
                }
                distances
            }
            Spacing::Count(0) => return Err(Error::InvalidSpacing("a track needs at least one point")),
            Spacing::Count(n) => {
                let n = *n;
                let step = match (closed, n) {
                    (_, 1) => 0.0,
                    (true, _) => length / n as f64,
                    (false, _) => length / (n - 1) as f64,
                };
                (0..n).map(|i| i as f64 * step).collect()
            }
            Spacing::Interval(d) => {
                let d = ensure_positive("track interval", *d)?;
                let limit = if closed { length - EPSILON } else { length + EPSILON };
                (0..)
                    .map(|i| i as f64 * d)
                    .take_while(|&x| x < limit || x == 0.0)
                    .collect()
            }
            Spacing::Angles(_) => {
                return Err(Error::InvalidSpacing("angles can only be used on a circle"))
            }
        };
        Ok(distances
            .into_iter()
            .filter_map(|d| point_along(points, closed, d).map(|(p, t)| (p, t, d)))
            .collect())
    }

    fn walk_circle(&self, center: Point, radius: f64) -> Result<Vec<(Point, Vec2, f64)>, Error> {
        let sign = if self.clockwise { -1.0 } else { 1.0 };
        let angles: Vec<f64> = match &self.spacing {
            Spacing::Vertices => return Err(Error::InvalidSpacing("a circle has no vertices")),
            Spacing::Count(0) => return Err(Error::InvalidSpacing("a track needs at least one point")),
            Spacing::Count(n) => {
                let step = 360.0 / *n as f64;
                (0..*n)
                    .map(|i| self.start_angle + sign * i as f64 * step)
                    .collect()
            }
            Spacing::Interval(d) => {
                let d = ensure_positive("track interval", *d)?;
                let step = (d / radius).to_degrees();
                (0..)
                    .map(|i| i as f64 * step)
                    .take_while(|&a| a < 360.0 - EPSILON)
                    .map(|a| self.start_angle + sign * a)
                    .collect()
            }
            Spacing::Angles(angles) => angles.clone(),
        };
        Ok(angles
            .into_iter()
            .map(|a| {
                let point = point_on_circle(center, radius, a);
                let heading = normalize_angle(a + sign * 90.0).to_radians();
                let tangent = Vec2::new(heading.cos(), -heading.sin());
                let swept = normalize_angle(sign * (a - self.start_angle));
                (point, tangent, swept.to_radians() * radius)
            })
            .collect())
    }

    fn rotation_at(&self, point: Point, tangent: Vec2, centre: Option<Point>) -> f64 {
        let away = centre
            .filter(|c| c.distance(point) > EPSILON)
            .map(|c| angle_between(c, point));
        let angle = match (self.rotation, away) {
            (RotationStyle::None, _) => return 0.0,
            (RotationStyle::Outwards, Some(a)) => a,
            (RotationStyle::Inwards, Some(a)) => a + 180.0,
            (RotationStyle::Along, _) => vector_angle(tangent),
            (_, None) => return 0.0,
        };
        // an upright piece already faces 90 degrees
        normalize_angle(angle - 90.0)
    }
}
