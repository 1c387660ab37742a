use std::iter;

use itertools::{chain, Itertools};
use lyon_geom::{Angle, Arc};

use crate::basic::Point;

/// A circular arc whose flattened form always includes
/// its exact start and end points
#[derive(Copy, Clone, Debug)]
pub struct CleanArc {
    pub center: Point,
    pub radius: f32,
    /// Clockwise, radians
    pub start_angle: f32,
    /// Negative sweeps go counterclockwise
    pub sweep_angle: f32,
}

impl CleanArc {
    /// Consecutive points closer than this are merged
    const MIN_STEP: f32 = 1e-3;

    pub fn point_at(&self, angle: f32) -> Point {
        self.center + Point::unit(angle) * self.radius
    }

    pub fn start(&self) -> Point {
        self.point_at(self.start_angle)
    }

    pub fn end(&self) -> Point {
        self.point_at(self.start_angle + self.sweep_angle)
    }

    /// Points along the arc from its start to its end
    pub fn flattened(&self, tolerance: f32) -> Vec<Point> {
        // flatten with a positive sweep, then restore the direction
        let reversed = self.sweep_angle < 0.;
        let (from, sweep) = if reversed {
            (self.start_angle + self.sweep_angle, -self.sweep_angle)
        } else {
            (self.start_angle, self.sweep_angle)
        };

        let arc = Arc {
            center: self.center.into(),
            radii: Point::square(self.radius).into(),
            start_angle: Angle { radians: from },
            sweep_angle: Angle { radians: sweep },
            x_rotation: Angle { radians: 0. },
        };

        let mut points: Vec<Point> = chain!(
            iter::once(self.point_at(from)),
            arc.flattened(tolerance).map(Into::into),
            iter::once(self.point_at(from + sweep)),
        )
        .dedup_by(|a, b| (*a - *b).magnitude() < Self::MIN_STEP)
        .collect();

        if reversed {
            points.reverse();
        }
        points
    }
}

#[test]
fn test_flattened_stays_on_circle() {
    let arc = CleanArc {
        center: Point { x: 50., y: 50. },
        radius: 30.,
        start_angle: 0.5,
        sweep_angle: -1.,
    };
    let points = arc.flattened(0.1);
    assert!(points.len() > 2);
    assert!((points[0] - arc.start()).magnitude() < 1e-3);
    assert!((*points.last().unwrap() - arc.end()).magnitude() < 1e-3);
    for point in points {
        assert!(((point - arc.center).magnitude() - 30.).abs() < 0.2);
    }
}
