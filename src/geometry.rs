use std::f64::{EPSILON, INFINITY, NEG_INFINITY};
use std::fmt;

use ordered_float::{FloatIsNan, NotNan};

/// Basic Point type for usage in the Voronoi lib.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64
}

impl Point {
    pub fn new(x: f64, y: f64) -> Point {
        Point { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn distance(&self, other: Point) -> f64 {
        (LineSegment { from: *self, to: other }).length()
    }

    pub fn midpoint(&self, other: Point) -> Point {
        (LineSegment { from: *self, to: other }).midpoint()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Totally ordered form of a point, compared by `x` first and then by `y`.
///
/// This is the order the sweepline meets sites in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct PointKey {
    x: NotNan<f64>,
    y: NotNan<f64>
}

impl PointKey {
    /// Returns Err(FloatIsNan) if either coordinate is NaN.
    pub(crate) fn new(point: Point) -> Result<PointKey, FloatIsNan> {
        match (NotNan::new(point.x), NotNan::new(point.y)) {
            (Ok(x), Ok(y)) => Ok(PointKey { x, y }),
            (Err(nan), _) | (_, Err(nan)) => Err(nan)
        }
    }

    /// Returns `None` unless both coordinates are finite.
    pub(crate) fn finite(point: Point) -> Option<PointKey> {
        if !point.is_finite() {
            return None;
        }

        PointKey::new(point).ok()
    }

    pub(crate) fn x(&self) -> f64 {
        self.x.into_inner()
    }

    pub(crate) fn point(&self) -> Point {
        Point { x: self.x.into_inner(), y: self.y.into_inner() }
    }
}

/// A finished Voronoi edge.
///
/// Equality ignores direction.
#[derive(Clone, Copy, Debug)]
pub struct LineSegment {
    pub from: Point,
    pub to: Point
}

impl LineSegment {
    pub fn length(&self) -> f64 {
        (self.dx().powi(2) + self.dy().powi(2)).sqrt()
    }

    pub fn midpoint(&self) -> Point {
        Point {
            x: (self.from.x + self.to.x) / 2f64,
            y: (self.from.y + self.to.y) / 2f64
        }
    }

    pub fn dx(&self) -> f64 {
        self.to.x - self.from.x
    }

    pub fn dy(&self) -> f64 {
        self.to.y - self.from.y
    }

    pub fn is_finite(&self) -> bool {
        self.from.is_finite() && self.to.is_finite()
    }
}

impl PartialEq for LineSegment {
    fn eq(&self, other: &LineSegment) -> bool {
        (self.from == other.from && self.to == other.to)
        || (self.from == other.to && self.to == other.from)
    }
}

impl fmt::Display for LineSegment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "\\{{{} -> {}}}", self.from, self.to)
    }
}

/// A circle through three sites, kept around for the largest empty circle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64
}

impl Circle {
    /// Where the sweepline is when it touches the right side of the circle.
    ///
    /// At that sweep location the middle arc of the triple that produced the
    /// circle has shrunk to a point.
    pub fn rightmost_x(&self) -> f64 {
        self.center.x + self.radius
    }

    /// Whether the point is strictly inside the circle.
    ///
    /// Points within a relative tolerance of the boundary count as outside so
    /// the three sites defining the circle never contain themselves.
    pub fn contains_point(&self, point: Point) -> bool {
        let tolerance = self.radius.abs().max(1f64) * 1e-9;
        self.center.distance(point) < self.radius - tolerance
    }
}

impl fmt::Display for Circle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "○{{{}, r = {}}}", self.center, self.radius)
    }
}

/// Smallest sine of the turn at the first vertex that `converging_circle`
/// takes for a real clockwise turn.
const ORIENTATION_TOLERANCE: f64 = 1e-12;

/// Which direction the Triangle points are going in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriangleOrientation {
    /// Points go around like a clock.
    Clockwise,
    /// Points go around opposite of a clock.
    Counterclockwise,
    /// Points coincide on a line.
    Collinear
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle(pub Point, pub Point, pub Point);

impl Triangle {
    /// Find the orientation of the triangle with the y axis pointing up.
    pub fn orientation(&self) -> TriangleOrientation {
        use self::TriangleOrientation::*;

        let cross = ((self.1.x - self.0.x) * (self.2.y - self.0.y)) - ((self.2.x - self.0.x) * (self.1.y - self.0.y));
        if cross > 0f64 { Counterclockwise } else if cross < 0f64 { Clockwise } else { Collinear }
    }

    /// The unique circle through all three vertexes.
    ///
    /// Returns `None` for degenerate (collinear) triangles.
    pub fn circumcircle(&self) -> Option<Circle> {
        let Triangle(a, b, c) = *self;

        let ab_x = b.x - a.x;
        let ab_y = b.y - a.y;
        let ac_x = c.x - a.x;
        let ac_y = c.y - a.y;
        let e = ab_x * (a.x + b.x) + ab_y * (a.y + b.y);
        let f = ac_x * (a.x + c.x) + ac_y * (a.y + c.y);
        let determinant = 2f64 * (ab_x * (c.y - b.y) - ab_y * (c.x - b.x));

        if determinant == 0f64 {
            return None;
        }

        let center = Point {
            x: (ac_y * e - ab_y * f) / determinant,
            y: (ab_x * f - ac_x * e) / determinant
        };

        if !center.is_finite() {
            return None;
        }

        Some(Circle { center, radius: center.distance(a) })
    }

    /// The circumcircle of three consecutive arc sites, if the middle arc is
    /// shrinking.
    ///
    /// With the sweepline moving towards positive `x` and the beachline
    /// ordered by increasing `y`, the middle arc only shrinks when the sites
    /// make a clockwise turn.
    ///
    /// Nearly collinear sites whose turn is lost in rounding count as
    /// collinear.
    pub fn converging_circle(&self) -> Option<Circle> {
        let Triangle(a, b, c) = *self;
        let cross = ((b.x - a.x) * (c.y - a.y)) - ((c.x - a.x) * (b.y - a.y));

        if cross >= -ORIENTATION_TOLERANCE * a.distance(b) * a.distance(c) {
            return None;
        }

        self.circumcircle()
    }
}

impl fmt::Display for Triangle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "△{{{}, {}, {}}}", self.0, self.1, self.2)
    }
}

/// Axis aligned box around everything the sweep has seen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: Point,
    pub max: Point
}

impl Bounds {
    pub fn empty() -> Bounds {
        Bounds {
            min: Point { x: INFINITY, y: INFINITY },
            max: Point { x: NEG_INFINITY, y: NEG_INFINITY }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Grow the box to contain the point. Non-finite points are ignored.
    pub fn include(&mut self, point: Point) {
        if !point.is_finite() {
            return;
        }

        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
    }

    pub fn width(&self) -> f64 {
        if self.is_empty() { 0f64 } else { self.max.x - self.min.x }
    }

    pub fn height(&self) -> f64 {
        if self.is_empty() { 0f64 } else { self.max.y - self.min.y }
    }
}

impl Default for Bounds {
    fn default() -> Bounds {
        Bounds::empty()
    }
}

/// Whether two sweep coordinates are close enough to treat as the same.
pub(crate) fn nearly_equal(a: f64, b: f64) -> bool {
    (a - b).abs() <= EPSILON * a.abs().max(b.abs()).max(1f64)
}

#[cfg(test)]
mod test {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
    }

    #[test]
    fn orientation() {
        let origin = Point::new(0.0, 0.0);
        let x_hat = Point::new(1.0, 0.0);
        let y_hat = Point::new(0.0, 1.0);

        assert_eq!(Triangle(origin, x_hat, y_hat).orientation(), TriangleOrientation::Counterclockwise);
        assert_eq!(Triangle(origin, y_hat, x_hat).orientation(), TriangleOrientation::Clockwise);
        assert_eq!(Triangle(origin, x_hat, Point::new(2.0, 0.0)).orientation(), TriangleOrientation::Collinear);
    }

    #[test]
    fn circumcircle_of_isosceles_triangle() {
        let circle = Triangle(Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(5.0, 10.0))
            .circumcircle()
            .unwrap();

        assert_close(circle.center.x, 5.0);
        assert_close(circle.center.y, 3.75);
        assert_close(circle.radius, 6.25);
        assert_close(circle.rightmost_x(), 11.25);
    }

    #[test]
    fn circumcircle_is_none_when_collinear() {
        let triangle = Triangle(Point::new(0.0, 0.0), Point::new(5.0, 0.0), Point::new(10.0, 0.0));
        assert_eq!(triangle.circumcircle(), None);
        assert_eq!(triangle.converging_circle(), None);
    }

    #[test]
    fn converging_circle_requires_clockwise_turn() {
        let a = Point::new(10.0, 0.0);
        let b = Point::new(0.0, 0.0);
        let c = Point::new(5.0, 10.0);

        assert!(Triangle(a, b, c).converging_circle().is_some());
        assert!(Triangle(c, b, a).converging_circle().is_none());
    }

    #[test]
    fn converging_circle_ignores_rounding_turns() {
        let triangle = Triangle(Point::new(0.0, 0.0), Point::new(1e6, 0.0), Point::new(2e6, -1e-9));

        assert_eq!(triangle.orientation(), TriangleOrientation::Clockwise);
        assert_eq!(triangle.converging_circle(), None);
    }

    #[test]
    fn circle_contains_point() {
        let circle = Triangle(Point::new(-1.0, -1.0), Point::new(-1.0, 3.0), Point::new(3.0, -1.0))
            .circumcircle()
            .unwrap();

        assert!(circle.contains_point(Point::new(0.0, 0.0)));
        assert!(!circle.contains_point(Point::new(-1.0, 3.0)));
        assert!(!circle.contains_point(Point::new(4.0, 4.0)));
    }

    #[test]
    fn line_segment_equality() {
        let origin = Point::new(0.0, 0.0);
        let x_hat = Point::new(1.0, 0.0);

        assert!(LineSegment { from: origin, to: x_hat } == LineSegment { from: x_hat, to: origin });
        assert!(LineSegment { from: origin, to: x_hat } == LineSegment { from: origin, to: x_hat });
    }

    #[test]
    fn point_key_orders_by_x_then_y() {
        let a = PointKey::new(Point::new(0.0, 5.0)).unwrap();
        let b = PointKey::new(Point::new(1.0, 0.0)).unwrap();
        let c = PointKey::new(Point::new(1.0, 2.0)).unwrap();

        assert!(a < b && b < c);
        assert!(PointKey::new(Point::new(std::f64::NAN, 0.0)).is_err());
    }

    #[test]
    fn finite_point_key() {
        assert!(PointKey::finite(Point::new(1.0, 2.0)).is_some());
        assert!(PointKey::finite(Point::new(std::f64::NAN, 2.0)).is_none());
        assert!(PointKey::finite(Point::new(1.0, NEG_INFINITY)).is_none());
    }

    #[test]
    fn bounds() {
        let mut bounds = Bounds::empty();
        assert!(bounds.is_empty());
        assert_eq!(bounds.width(), 0.0);

        bounds.include(Point::new(1.0, -2.0));
        bounds.include(Point::new(-3.0, 4.0));
        bounds.include(Point::new(INFINITY, 0.0));

        assert_eq!(bounds.width(), 4.0);
        assert_eq!(bounds.height(), 6.0);
    }
}
