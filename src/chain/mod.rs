pub use follow::{step, FollowParams};

use crate::basic::Point;

mod follow;

#[derive(Debug, Display, Error, Copy, Clone, PartialEq)]
pub enum ChainError {
    #[display(fmt = "invalid chain configuration: {}", reason)]
    Configuration { reason: &'static str },
    #[display(fmt = "segment index {} out of range for a chain of length {}", index, len)]
    Index { index: usize, len: usize },
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Segment {
    pub pos: Point,
    /// Degrees, clockwise in screen space, any range
    pub rotation: f32,
}

impl Segment {
    pub fn at(pos: Point) -> Self {
        Self { pos, rotation: 0. }
    }
}

/// An ordered sequence of segments, the first one being the head.
/// The length is fixed for the lifetime of the chain.
#[derive(Clone, Debug, PartialEq)]
pub struct Chain {
    segments: Vec<Segment>,
    spacing: f32,
}

impl Chain {
    /// Lays the chain out in a straight horizontal line trailing
    /// `start` to the left, every segment `spacing` apart
    pub fn new(len: usize, start: Point, spacing: f32) -> Result<Self, ChainError> {
        if len < 1 {
            return Err(ChainError::Configuration {
                reason: "a chain needs at least a head",
            });
        }
        if !(spacing > 0.) || !spacing.is_finite() {
            return Err(ChainError::Configuration {
                reason: "spacing must be positive and finite",
            });
        }

        let segments = (0..len)
            .map(|i| Segment::at(start - Point { x: i as f32 * spacing, y: 0. }))
            .collect();

        Ok(Self { segments, spacing })
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false, a chain has at least a head
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn head(&self) -> &Segment {
        &self.segments[0]
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub(crate) fn segments_mut(&mut self) -> &mut [Segment] {
        &mut self.segments
    }

    pub fn get(&self, index: usize) -> Result<Segment, ChainError> {
        self.segments.get(index).copied().ok_or(ChainError::Index {
            index,
            len: self.len(),
        })
    }

    pub fn set(&mut self, index: usize, segment: Segment) -> Result<(), ChainError> {
        let len = self.len();
        let slot = self
            .segments
            .get_mut(index)
            .ok_or(ChainError::Index { index, len })?;
        *slot = segment;
        Ok(())
    }

    /// Advance by one step toward `target` using the chain's own spacing
    pub fn follow(&mut self, target: Point, damping: f32) {
        let spacing = self.spacing;
        step(self, target, damping, spacing)
    }
}

#[test]
fn test_initial_layout() {
    let chain = Chain::new(4, Point { x: 400., y: 300. }, 28.).unwrap();
    assert_eq!(chain.len(), 4);
    assert_eq!(chain.spacing(), 28.);
    for (i, segment) in chain.segments().iter().enumerate() {
        assert_eq!(segment.pos, Point { x: 400. - i as f32 * 28., y: 300. });
        assert_eq!(segment.rotation, 0.);
    }
    assert_eq!(chain.head().pos, Point { x: 400., y: 300. });
}

#[test]
fn test_single_segment_chain() {
    let chain = Chain::new(1, Point { x: 5., y: 5. }, 1.).unwrap();
    assert_eq!(chain.len(), 1);
    assert!(!chain.is_empty());
}

#[test]
fn test_invalid_configuration() {
    let start = Point { x: 0., y: 0. };
    for (len, spacing) in [(0, 10.), (5, 0.), (5, -3.), (5, f32::NAN), (5, f32::INFINITY)] {
        assert!(
            matches!(
                Chain::new(len, start, spacing),
                Err(ChainError::Configuration { .. })
            ),
            "len {} spacing {}",
            len,
            spacing
        );
    }
}

#[test]
fn test_index_bounds() {
    let mut chain = Chain::new(3, Point { x: 0., y: 0. }, 10.).unwrap();
    assert_eq!(chain.get(3), Err(ChainError::Index { index: 3, len: 3 }));

    let moved = Segment { pos: Point { x: 1., y: 2. }, rotation: 45. };
    assert_eq!(
        chain.set(7, moved),
        Err(ChainError::Index { index: 7, len: 3 })
    );
    chain.set(2, moved).unwrap();
    assert_eq!(chain.get(2), Ok(moved));
    assert_eq!(chain.len(), 3);
}

#[test]
fn test_error_message() {
    let err = ChainError::Index { index: 9, len: 3 };
    assert_eq!(
        err.to_string(),
        "segment index 9 out of range for a chain of length 3"
    );
}
