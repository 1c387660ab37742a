pub use skull::Skull;
pub use vertebra::Vertebra;

use crate::basic::Point;

mod skull;
mod vertebra;

fn bounding_box_of(points: &[Point]) -> (Point, Point) {
    let first = points.first().copied().unwrap_or(Point::ZERO);
    points.iter().fold((first, first), |(min, max), p| {
        (
            Point { x: min.x.min(p.x), y: min.y.min(p.y) },
            Point { x: max.x.max(p.x), y: max.y.max(p.y) },
        )
    })
}

fn center_of(points: &[Point]) -> Point {
    let (a, b) = bounding_box_of(points);
    (a + b) / 2.
}

/// A polygon drawn within a `size.x` by `size.y` box whose
/// top-left corner is at the origin, facing the positive x axis
pub trait Shape {
    fn raw_points(size: Point) -> Vec<Point>;

    fn new(size: Point) -> ShapePoints {
        ShapePoints::from(Self::raw_points(size))
    }
}

#[derive(Clone, Debug)]
pub struct ShapePoints {
    points: Vec<Point>,
    center: Point,
}

impl From<Vec<Point>> for ShapePoints {
    fn from(points: Vec<Point>) -> Self {
        Self { center: center_of(&points), points }
    }
}

impl ShapePoints {
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn rotate_clockwise_about_center(mut self, angle: f32) -> Self {
        self.points
            .iter_mut()
            .for_each(|point| *point = point.rotate_clockwise(self.center, angle));
        self
    }

    pub fn translate(mut self, delta: Point) -> Self {
        self.points.iter_mut().for_each(|point| *point += delta);
        self.center += delta;
        self
    }
}

#[test]
fn test_rotate_about_center_keeps_center() {
    let shape = Vertebra::new(Point::square(28.)).translate(Point { x: 100., y: 50. });
    let center = shape.center();
    assert!((center - Point { x: 114., y: 64. }).magnitude() < 1e-4);

    let rotated = shape.rotate_clockwise_about_center(1.234);
    assert!((rotated.center() - center).magnitude() < 1e-4);
    for point in rotated.points() {
        // every corner of the bevelled square stays within the circumscribed circle
        assert!((*point - center).magnitude() <= 14. * 2f32.sqrt() + 1e-3);
    }
}
