use ggez::mint::{Point2, Vector2};
use lyon_geom::euclid::default::{Point2D, Vector2D};
use std::ops::{Div, Mul};

/// A more convenient version of mint::Point2<f32>
#[derive(Copy, Clone, Debug, Default, PartialEq, Add, AddAssign, Sub, SubAssign)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl From<Point> for Point2<f32> {
    fn from(Point { x, y }: Point) -> Self {
        Point2 { x, y }
    }
}

impl From<Point2<f32>> for Point {
    fn from(Point2 { x, y }: Point2<f32>) -> Self {
        Self { x, y }
    }
}

/// Scale factors and other non-positional pairs
impl From<Point> for Vector2<f32> {
    fn from(Point { x, y }: Point) -> Self {
        Vector2 { x, y }
    }
}

impl From<Point2D<f32>> for Point {
    fn from(point: Point2D<f32>) -> Self {
        Self { x: point.x, y: point.y }
    }
}

impl From<Point> for Point2D<f32> {
    fn from(Point { x, y }: Point) -> Self {
        lyon_geom::point(x, y)
    }
}

impl From<Point> for Vector2D<f32> {
    fn from(Point { x, y }: Point) -> Self {
        lyon_geom::vector(x, y)
    }
}

impl Mul<f32> for Point {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self::Output {
        Self { x: self.x * rhs, y: self.y * rhs }
    }
}

impl Mul<Point> for f32 {
    type Output = Point;

    fn mul(self, rhs: Point) -> Self::Output {
        rhs * self
    }
}

impl Div<f32> for Point {
    type Output = Self;

    fn div(self, rhs: f32) -> Self::Output {
        Self { x: self.x / rhs, y: self.y / rhs }
    }
}

impl Point {
    pub const ZERO: Self = Self { x: 0., y: 0. };

    /// Equal x and y
    pub fn square(side: f32) -> Self {
        Self { x: side, y: side }
    }

    #[must_use]
    pub fn rotate_clockwise(mut self, origin: Self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        self -= origin;
        self = Point {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        };
        self + origin
    }

    #[must_use]
    pub fn magnitude(self) -> f32 {
        (self.x.powi(2) + self.y.powi(2)).sqrt()
    }

    /// Angle of the vector in degrees, measured clockwise from the positive
    /// x axis in screen space (y pointing down). The zero vector has no
    /// direction and yields 0.
    #[must_use]
    pub fn heading_degrees(self) -> f32 {
        if self == Self::ZERO {
            0.
        } else {
            self.y.atan2(self.x).to_degrees()
        }
    }

    /// Unit vector at the given clockwise angle (radians) from the x axis
    #[must_use]
    pub fn unit(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self { x: cos, y: sin }
    }
}

#[test]
fn test_heading_degrees() {
    for (vector, expected) in [
        (Point { x: 1., y: 0. }, 0.),
        (Point { x: 0., y: 1. }, 90.),
        (Point { x: -1., y: 0. }, 180.),
        (Point { x: 0., y: -1. }, -90.),
        (Point::ZERO, 0.),
    ] {
        let heading = vector.heading_degrees();
        assert!(
            (heading - expected).abs() < 1e-4,
            "{:?} => {} (expected {})",
            vector,
            heading,
            expected
        );
    }
}

#[test]
fn test_rotate_clockwise() {
    // screen space: a quarter turn clockwise takes +x to +y
    let origin = Point { x: 10., y: 5. };
    let rotated = Point { x: 11., y: 5. }.rotate_clockwise(origin, std::f32::consts::FRAC_PI_2);
    assert!((rotated - Point { x: 10., y: 6. }).magnitude() < 1e-5, "{:?}", rotated);
}
