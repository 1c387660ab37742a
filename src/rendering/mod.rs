pub use snake_mesh::snake_mesh;

use crate::app::prefs::Prefs;
use crate::basic::Point;
use crate::chain::{Chain, Segment};
use crate::rendering::clean_arc::CleanArc;

mod clean_arc;
pub mod shape;
mod snake_mesh;

/// Where and how a single segment gets drawn
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SegmentTransform {
    pub center: Point,
    pub size: Point,
    /// Clockwise, radians
    pub rotation: f32,
}

impl SegmentTransform {
    fn new(segment: &Segment, size: Point) -> Self {
        Self {
            center: segment.pos,
            size,
            rotation: segment.rotation.to_radians(),
        }
    }

    /// The segment's position is its center, surfaces place things by their corner
    pub fn top_left(&self) -> Point {
        self.center - self.size / 2.
    }

    /// Maps a point from the segment's own frame (origin at its center,
    /// x axis along its rotation) to window coordinates
    pub fn to_window(&self, local: Point) -> Point {
        (self.center + local).rotate_clockwise(self.center, self.rotation)
    }
}

/// Transforms of every segment, head first. The head uses the head
/// size, body segments are `segment_size` squares.
pub fn segment_transforms<'a>(
    chain: &'a Chain,
    prefs: &'a Prefs,
) -> impl Iterator<Item = SegmentTransform> + 'a {
    chain.segments().iter().enumerate().map(|(idx, segment)| {
        let size = if idx == 0 {
            prefs.head_size
        } else {
            Point::square(prefs.segment_size)
        };
        SegmentTransform::new(segment, size)
    })
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Side {
    Left,
    Right,
}

/// Angle between a rib and the spine where it leaves the segment center
const RIB_ANGLE: f32 = 80.;
/// How far a rib bends over its length, radians
const RIB_CURL: f32 = 1.;

/// One of the two decorative ribs of a body segment. A rib leaves the
/// segment center at [`RIB_ANGLE`] from the segment's axis and curls
/// toward the direction the segment faces.
pub fn rib(transform: &SegmentTransform, rib_length: f32, side: Side) -> CleanArc {
    let s = match side {
        Side::Left => -1.,
        Side::Right => 1.,
    };

    let radius = rib_length / RIB_CURL;
    // direction from the center of curvature to the segment center, local frame
    let normal = s * RIB_ANGLE.to_radians() - s * std::f32::consts::FRAC_PI_2;
    let local_center = Point::unit(normal) * radius;

    CleanArc {
        center: transform.to_window(local_center),
        radius,
        start_angle: normal + std::f32::consts::PI + transform.rotation,
        sweep_angle: -s * RIB_CURL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-3;

    fn transform_at(x: f32, y: f32, rotation_degrees: f32) -> SegmentTransform {
        SegmentTransform::new(
            &Segment { pos: Point { x, y }, rotation: rotation_degrees },
            Point::square(28.),
        )
    }

    #[test]
    fn test_transforms() {
        let prefs = Prefs::default();
        let mut chain = prefs.build_chain().unwrap();
        chain.set(1, Segment { pos: Point { x: 100., y: 50. }, rotation: 180. }).unwrap();

        let transforms: Vec<_> = segment_transforms(&chain, &prefs).collect();
        assert_eq!(transforms.len(), chain.len());

        let head = transforms[0];
        assert_eq!(head.top_left(), Point { x: 400. - 32.5, y: 300. - 25. });

        let neck = transforms[1];
        assert_eq!(neck.top_left(), Point { x: 86., y: 36. });
        assert!((neck.rotation - std::f32::consts::PI).abs() < EPSILON);
    }

    #[test]
    fn test_to_window_is_clockwise() {
        let transform = transform_at(10., 10., 90.);
        let mapped = transform.to_window(Point { x: 5., y: 0. });
        assert!((mapped - Point { x: 10., y: 15. }).magnitude() < EPSILON, "{:?}", mapped);
    }

    #[test]
    fn test_ribs_mirror_across_the_spine() {
        let transform = transform_at(200., 100., 0.);
        let left = rib(&transform, 30., Side::Left);
        let right = rib(&transform, 30., Side::Right);

        for arc in [left, right] {
            assert!((arc.start() - transform.center).magnitude() < EPSILON);
            // the rib curls toward the facing direction
            assert!(arc.end().x > transform.center.x);
        }

        let (l, r) = (left.end() - transform.center, right.end() - transform.center);
        assert!((l.x - r.x).abs() < EPSILON);
        assert!((l.y + r.y).abs() < EPSILON);
        assert!(l.y < 0. && r.y > 0.);
    }

    #[test]
    fn test_ribs_follow_rotation() {
        let straight = transform_at(0., 0., 0.);
        let turned = transform_at(0., 0., 90.);
        let a = rib(&straight, 30., Side::Right).end();
        let b = rib(&turned, 30., Side::Right).end();
        let expected = a.rotate_clockwise(Point::ZERO, std::f32::consts::FRAC_PI_2);
        assert!((b - expected).magnitude() < EPSILON, "{:?} vs {:?}", b, expected);
    }
}
