use std::time::Duration;

use static_assertions::const_assert;

use crate::basic::Point;
use crate::chain::{Chain, ChainError, FollowParams};

pub const DEFAULT_BODY_SEGMENTS: usize = 50;
/// Width of a body segment, also the resting distance between segment centers
pub const DEFAULT_SEGMENT_SIZE: f32 = 28.;
pub const DEFAULT_RIB_LENGTH: f32 = 30.;
pub const DEFAULT_DAMPING: f32 = 0.08;
pub const DEFAULT_TICK_RATE: f64 = 60.;

const_assert!(DEFAULT_SEGMENT_SIZE > 0.);
const_assert!(DEFAULT_DAMPING > 0. && DEFAULT_DAMPING <= 1.);
const_assert!(DEFAULT_TICK_RATE > 0.);

/// When the chain gets advanced
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Cadence {
    /// Once per tick, chasing the last known pointer position
    Frame,
    /// Once per pointer movement, the head stalls when the pointer rests
    Pointer,
}

impl Cadence {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Cadence::Frame => Cadence::Pointer,
            Cadence::Pointer => Cadence::Frame,
        }
    }
}

pub struct Prefs {
    pub body_segments: usize,
    pub segment_size: f32,
    pub head_size: Point,
    pub rib_length: f32,
    pub damping: f32,
    pub start: Point,

    pub cadence: Cadence,
    pub tick_rate: f64,

    pub draw_ribs: bool,
    pub display_fps: bool,
    pub message_duration: Duration,
}

impl Default for Prefs {
    fn default() -> Self {
        Self {
            body_segments: DEFAULT_BODY_SEGMENTS,
            segment_size: DEFAULT_SEGMENT_SIZE,
            head_size: Point { x: 65., y: 50. },
            rib_length: DEFAULT_RIB_LENGTH,
            damping: DEFAULT_DAMPING,
            start: Point { x: 400., y: 300. },

            cadence: Cadence::Frame,
            tick_rate: DEFAULT_TICK_RATE,

            draw_ribs: true,
            display_fps: false,
            message_duration: Duration::from_secs(2),
        }
    }
}

// builder
#[allow(dead_code)]
impl Prefs {
    #[must_use]
    pub fn body_segments(mut self, body_segments: usize) -> Self {
        self.body_segments = body_segments;
        self
    }

    #[must_use]
    pub fn segment_size(mut self, segment_size: f32) -> Self {
        self.segment_size = segment_size;
        self
    }

    #[must_use]
    pub fn damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    #[must_use]
    pub fn tick_rate(mut self, tick_rate: f64) -> Self {
        self.tick_rate = tick_rate;
        self
    }
}

impl Prefs {
    pub fn follow_params(&self) -> FollowParams {
        FollowParams {
            damping: self.damping,
            spacing: self.segment_size,
        }
    }

    pub fn validate(&self) -> Result<(), ChainError> {
        self.follow_params().validate()?;
        if !(self.rib_length > 0.) {
            return Err(ChainError::Configuration {
                reason: "rib length must be positive",
            });
        }
        if !(self.head_size.x > 0. && self.head_size.y > 0.) {
            return Err(ChainError::Configuration {
                reason: "head size must be positive",
            });
        }
        if !(self.tick_rate > 0.) || !self.tick_rate.is_finite() {
            return Err(ChainError::Configuration {
                reason: "tick rate must be positive and finite",
            });
        }
        Ok(())
    }

    /// A head followed by `body_segments` segments in their resting layout
    pub fn build_chain(&self) -> Result<Chain, ChainError> {
        self.validate()?;
        Chain::new(self.body_segments + 1, self.start, self.segment_size)
    }
}

#[test]
fn test_default_chain() {
    let chain = Prefs::default().build_chain().unwrap();
    assert_eq!(chain.len(), 51);
    assert_eq!(chain.spacing(), 28.);
    assert_eq!(chain.head().pos, Point { x: 400., y: 300. });
    assert_eq!(chain.segments()[50].pos, Point { x: 400. - 50. * 28., y: 300. });
}

#[test]
fn test_head_only_chain() {
    let chain = Prefs::default().body_segments(0).build_chain().unwrap();
    assert_eq!(chain.len(), 1);
}

#[test]
fn test_invalid_prefs() {
    for prefs in [
        Prefs::default().damping(0.),
        Prefs::default().damping(1.01),
        Prefs::default().segment_size(-1.),
        Prefs::default().tick_rate(0.),
        Prefs { rib_length: 0., ..Prefs::default() },
    ] {
        assert!(matches!(
            prefs.build_chain(),
            Err(ChainError::Configuration { .. })
        ));
    }
}

#[test]
fn test_cadence_toggle() {
    assert_eq!(Cadence::Frame.toggled(), Cadence::Pointer);
    assert_eq!(Cadence::Frame.toggled().toggled(), Cadence::Frame);
}
