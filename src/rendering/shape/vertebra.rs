use crate::basic::Point;
use crate::rendering::shape::Shape;

/// A square with bevelled corners
pub struct Vertebra;

impl Vertebra {
    const BEVEL: f32 = 0.2;
}

impl Shape for Vertebra {
    fn raw_points(Point { x: w, y: h }: Point) -> Vec<Point> {
        let bx = w * Self::BEVEL;
        let by = h * Self::BEVEL;
        vec![
            Point { x: bx, y: 0. },
            Point { x: w - bx, y: 0. },
            Point { x: w, y: by },
            Point { x: w, y: h - by },
            Point { x: w - bx, y: h },
            Point { x: bx, y: h },
            Point { x: 0., y: h - by },
            Point { x: 0., y: by },
        ]
    }
}
