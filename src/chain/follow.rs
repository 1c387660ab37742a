use super::{Chain, ChainError};
use crate::basic::Point;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FollowParams {
    /// Fraction of the head-to-target gap closed per step, in (0, 1]
    pub damping: f32,
    /// Maximum distance between adjacent segment centers
    pub spacing: f32,
}

impl FollowParams {
    pub fn validate(self) -> Result<Self, ChainError> {
        if !(self.damping > 0. && self.damping <= 1.) {
            return Err(ChainError::Configuration {
                reason: "damping must be in (0, 1]",
            });
        }
        if !(self.spacing > 0.) || !self.spacing.is_finite() {
            return Err(ChainError::Configuration {
                reason: "spacing must be positive and finite",
            });
        }
        Ok(self)
    }
}

/// Advance the chain by one step toward `target`.
///
/// The head closes `damping` of its gap to the target and turns to face
/// the displacement it had before moving. Every body segment is then
/// visited front to back, each one reading its already updated
/// predecessor: a segment further than `spacing` away is pulled along the
/// line between them to exactly `spacing`, a closer one stays where it is.
/// Body rotations always point away from the predecessor.
pub fn step(chain: &mut Chain, target: Point, damping: f32, spacing: f32) {
    let segments = chain.segments_mut();

    let head = &mut segments[0];
    let displacement = target - head.pos;
    head.rotation = displacement.heading_degrees();
    head.pos += displacement * damping;

    for i in 1..segments.len() {
        let prev = segments[i - 1].pos;
        let cur = &mut segments[i];

        let delta = prev - cur.pos;
        let dist = delta.magnitude();
        // coincident segments (dist == 0) are never constrained
        if dist > spacing {
            cur.pos = prev - delta * (spacing / dist);
        }

        cur.rotation = (prev - cur.pos).heading_degrees() + 180.;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::Segment;
    use rand::prelude::*;

    const EPSILON: f32 = 1e-3;

    fn assert_close(actual: Point, expected: Point) {
        assert!(
            (actual - expected).magnitude() < EPSILON,
            "{:?} != {:?}",
            actual,
            expected
        );
    }

    fn chain_of(points: &[(f32, f32)], spacing: f32) -> Chain {
        let mut chain = Chain::new(points.len(), Point::ZERO, spacing).unwrap();
        for (i, &(x, y)) in points.iter().enumerate() {
            chain.set(i, Segment::at(Point { x, y })).unwrap();
        }
        chain
    }

    #[test]
    fn test_pulls_segments_in_order() {
        let mut chain = chain_of(&[(400., 300.), (370., 300.), (340., 300.)], 30.);
        step(&mut chain, Point { x: 500., y: 300. }, 0.08, 30.);

        let segments = chain.segments();
        assert_close(segments[0].pos, Point { x: 408., y: 300. });
        assert!(segments[0].rotation.abs() < EPSILON);

        // segment 2 follows the updated segment 1, not its old position
        assert_close(segments[1].pos, Point { x: 378., y: 300. });
        assert_close(segments[2].pos, Point { x: 348., y: 300. });
        for segment in &segments[1..] {
            assert!((segment.rotation - 180.).abs() < EPSILON, "{:?}", segment);
        }
    }

    #[test]
    fn test_target_on_head() {
        let mut chain = Chain::new(5, Point { x: 400., y: 300. }, 28.).unwrap();
        let before = chain.clone();
        step(&mut chain, Point { x: 400., y: 300. }, 0.08, 28.);

        assert_eq!(chain.head().rotation, 0.);
        for (after, before) in chain.segments().iter().zip(before.segments()) {
            assert_eq!(after.pos, before.pos);
        }
    }

    #[test]
    fn test_coincident_segments() {
        let mut chain = chain_of(&[(100., 100.), (100., 100.), (100., 100.)], 10.);
        // a target on the head keeps the head in place too
        step(&mut chain, Point { x: 100., y: 100. }, 0.5, 10.);

        for segment in &chain.segments()[1..] {
            assert_eq!(segment.pos, Point { x: 100., y: 100. });
            assert_eq!(segment.rotation, 180.);
            assert!(segment.rotation.is_finite());
        }
    }

    #[test]
    fn test_compressed_segments_stay() {
        // head reverses over its body, nothing is pushed apart
        let mut chain = chain_of(&[(100., 0.), (95., 0.), (90., 0.)], 30.);
        step(&mut chain, Point { x: 0., y: 0. }, 0.1, 30.);

        assert_close(chain.segments()[0].pos, Point { x: 90., y: 0. });
        assert_close(chain.segments()[1].pos, Point { x: 95., y: 0. });
        assert_close(chain.segments()[2].pos, Point { x: 90., y: 0. });
        // segment 1 is now ahead of the head, it faces away from it
        let facing = Point::unit(chain.segments()[1].rotation.to_radians());
        assert_close(facing, Point { x: 1., y: 0. });
    }

    #[test]
    fn test_body_rotation_faces_away() {
        let mut chain = chain_of(&[(0., 0.), (0., -50.)], 10.);
        step(&mut chain, Point { x: 0., y: 0. }, 1., 10.);

        // predecessor straight below (y down), segment faces up
        assert_close(chain.segments()[1].pos, Point { x: 0., y: -10. });
        assert!((chain.segments()[1].rotation - 270.).abs() < EPSILON);
    }

    #[test]
    fn test_monotone_approach() {
        let damping = 0.08;
        let target = Point { x: 700., y: 120. };
        let mut chain = Chain::new(10, Point { x: 400., y: 300. }, 28.).unwrap();

        let mut distance = (target - chain.head().pos).magnitude();
        for _ in 0..60 {
            chain.follow(target, damping);
            let new_distance = (target - chain.head().pos).magnitude();
            assert!(new_distance < distance);
            assert!(new_distance > 0.);
            let ratio = new_distance / distance;
            assert!((ratio - (1. - damping)).abs() < 1e-3, "ratio {}", ratio);
            distance = new_distance;
        }
    }

    #[test]
    fn test_invariants_under_random_targets() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let spacing = 28.;
        let mut chain = Chain::new(51, Point { x: 400., y: 300. }, spacing).unwrap();

        for _ in 0..2_000 {
            let target = Point {
                x: rng.gen_range(-200. ..1000.),
                y: rng.gen_range(-200. ..800.),
            };
            let damping = rng.gen_range(0.01..=1.);
            step(&mut chain, target, damping, spacing);

            assert_eq!(chain.len(), 51);
            for pair in chain.segments().windows(2) {
                let dist = (pair[0].pos - pair[1].pos).magnitude();
                assert!(dist <= spacing + EPSILON, "stretched to {}", dist);
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let start = Chain::new(20, Point { x: 10., y: 10. }, 5.).unwrap();
        let targets = [
            Point { x: 300., y: 40. },
            Point { x: -20., y: 90. },
            Point { x: 10., y: 10. },
        ];

        let run = || {
            let mut chain = start.clone();
            for target in targets.iter().cycle().take(30) {
                step(&mut chain, *target, 0.3, 5.);
            }
            chain
        };

        assert_eq!(run(), run());
    }

    #[test]
    fn test_validate_params() {
        let valid = FollowParams { damping: 0.08, spacing: 28. };
        assert_eq!(valid.validate(), Ok(valid));

        for params in [
            FollowParams { damping: 0., spacing: 28. },
            FollowParams { damping: 1.5, spacing: 28. },
            FollowParams { damping: f32::NAN, spacing: 28. },
            FollowParams { damping: 0.5, spacing: 0. },
        ] {
            assert!(params.validate().is_err(), "{:?}", params);
        }
    }
}
