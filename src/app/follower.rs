use crate::app::prefs::Cadence;
use crate::basic::Point;
use crate::chain::{self, Chain, FollowParams};

/// Owns the chain and decides, according to the cadence, when pointer
/// input turns into a step
pub struct Follower {
    chain: Chain,
    params: FollowParams,
    /// Last known pointer position, None until the pointer first moves
    target: Option<Point>,
}

impl Follower {
    pub fn new(chain: Chain, params: FollowParams) -> Self {
        Self { chain, params, target: None }
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    /// Returns whether the chain was advanced
    pub fn pointer_moved(&mut self, target: Point, cadence: Cadence) -> bool {
        self.target = Some(target);
        cadence == Cadence::Pointer && self.advance()
    }

    /// Returns whether the chain was advanced
    pub fn tick(&mut self, cadence: Cadence) -> bool {
        cadence == Cadence::Frame && self.advance()
    }

    /// Start over with a fresh chain, forgetting the pointer
    pub fn reset(&mut self, chain: Chain) {
        self.chain = chain;
        self.target = None;
    }

    fn advance(&mut self) -> bool {
        match self.target {
            Some(target) => {
                let FollowParams { damping, spacing } = self.params;
                chain::step(&mut self.chain, target, damping, spacing);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::prefs::Prefs;

    fn follower() -> Follower {
        let prefs = Prefs::default();
        Follower::new(prefs.build_chain().unwrap(), prefs.follow_params())
    }

    #[test]
    fn test_no_target_no_motion() {
        let mut follower = follower();
        let before = follower.chain().clone();
        assert!(!follower.tick(Cadence::Frame));
        assert_eq!(*follower.chain(), before);
    }

    #[test]
    fn test_frame_cadence_keeps_chasing() {
        let mut follower = follower();
        let target = Point { x: 600., y: 300. };
        assert!(!follower.pointer_moved(target, Cadence::Frame));

        // the pointer rests, the head still closes in on it every tick
        let mut distance = (target - follower.chain().head().pos).magnitude();
        for _ in 0..10 {
            assert!(follower.tick(Cadence::Frame));
            let new_distance = (target - follower.chain().head().pos).magnitude();
            assert!(new_distance < distance);
            distance = new_distance;
        }
    }

    #[test]
    fn test_pointer_cadence_stalls_between_moves() {
        let mut follower = follower();
        assert!(follower.pointer_moved(Point { x: 600., y: 300. }, Cadence::Pointer));
        let after_move = follower.chain().clone();

        assert!(!follower.tick(Cadence::Pointer));
        assert!(!follower.tick(Cadence::Pointer));
        assert_eq!(*follower.chain(), after_move);
    }

    #[test]
    fn test_reset_forgets_target() {
        let mut follower = follower();
        follower.pointer_moved(Point { x: 0., y: 0. }, Cadence::Pointer);
        follower.reset(Prefs::default().build_chain().unwrap());
        assert!(!follower.tick(Cadence::Frame));
        assert_eq!(follower.chain().head().pos, Point { x: 400., y: 300. });
    }
}
