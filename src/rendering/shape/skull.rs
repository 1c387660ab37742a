use crate::basic::Point;
use crate::rendering::shape::Shape;

/// Stand-in for the head sprite, snout pointing along positive x
pub struct Skull;

impl Shape for Skull {
    fn raw_points(Point { x: w, y: h }: Point) -> Vec<Point> {
        vec![
            Point { x: 0., y: h * 0.3 },
            Point { x: w * 0.25, y: 0. },
            Point { x: w * 0.7, y: h * 0.1 },
            Point { x: w, y: h * 0.4 },
            Point { x: w, y: h * 0.6 },
            Point { x: w * 0.7, y: h * 0.9 },
            Point { x: w * 0.25, y: h },
            Point { x: 0., y: h * 0.7 },
        ]
    }
}
