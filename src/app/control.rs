use std::{
    cmp::max,
    collections::VecDeque,
    time::{Duration, Instant},
};

/// Stores an instant along with the number of frames it represents
struct NFrameInstant(usize, Instant);

/// Objective measurement of framerate based on periodic calls
/// to [`FpsCounter::register_frames`], completely detached from any
/// framerate-regulation mechanism
struct FpsCounter {
    /// An `Instant` is stored every `step` frames. This isn't
    /// done every frame because calling `Instant::now()` produces
    /// a syscall which is slow.
    step: usize,
    /// Counts down from `step` to 0 to tell when the next
    /// `Instant` should be stored
    n: usize,
    buffer: VecDeque<NFrameInstant>,
}

impl FpsCounter {
    /// Number of `Instant`s to store in `buffer`
    const LEN: usize = 10;

    fn new(expected_fps: f64) -> Self {
        let mut counter = Self {
            step: 0,
            n: 0,
            buffer: VecDeque::with_capacity(Self::LEN),
        };
        counter.set_expected_fps(expected_fps);
        counter
    }

    fn set_expected_fps(&mut self, expected_fps: f64) {
        // store an instant ~every N seconds, but at most every frame
        const N: f64 = 1.;
        self.step = max(1, (expected_fps * N) as usize);
        self.reset();
    }

    fn register_frames(&mut self, num_frames: usize) {
        if self.n < num_frames {
            if self.buffer.len() >= Self::LEN {
                self.buffer.pop_front();
            }
            self.buffer.push_back(NFrameInstant(
                self.step - self.n + num_frames - 1,
                Instant::now(),
            ));
            self.n = self.step - 1;
        } else {
            self.n -= num_frames;
        }
    }

    fn reset(&mut self) {
        self.buffer.clear();
        self.n = 0;
    }

    /// The framerate is calculated as the inverse of the
    /// average frame duration
    fn fps(&self) -> f64 {
        if self.buffer.len() >= 2 {
            let first_frame = self.buffer[0].1;
            let last_frame = self.buffer[self.buffer.len() - 1].1;
            let total_buffer_duration = (last_frame - first_frame).as_secs_f64();
            let num_frames = self.buffer.iter().skip(1).map(|nfi| nfi.0).sum::<usize>() as f64;
            num_frames / total_buffer_duration
        } else {
            0.
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum State {
    Playing,
    Paused,
}

/// Fixed-rate ticking of the chain, independent of how often
/// the pointer moves or the window redraws
pub struct Control {
    tick_rate: f64,
    tick_duration: Duration,
    last_update: Instant,

    // amount of time which ticks have not yet been
    // accounted for (included next time this is done)
    remainder: f64, // ticks

    // number of ticks that still need to be performed
    // to catch up with the current time
    missed_updates: Option<usize>,

    measured_tick_rate: FpsCounter,
    measured_graphics_fps: FpsCounter,

    state: State,

    // used to store the frame fraction when paused
    frozen_frame_fraction: Option<f32>,
}

impl Control {
    /// Never catch up on more than this many ticks at once, after a
    /// long stall (window dragged, debugger) the chain just resumes
    const MAX_CATCH_UP: usize = 30;

    pub fn new(tick_rate: f64) -> Self {
        Self {
            tick_rate,
            tick_duration: Self::duration_of(tick_rate),
            last_update: Instant::now(),
            remainder: 0.,

            missed_updates: None,

            measured_tick_rate: FpsCounter::new(tick_rate),
            measured_graphics_fps: FpsCounter::new(60.),

            state: State::Playing,
            frozen_frame_fraction: None,
        }
    }

    fn duration_of(tick_rate: f64) -> Duration {
        Duration::from_nanos((1_000_000_000.0 / tick_rate) as u64)
    }

    pub fn tick_rate(&self) -> f64 {
        self.tick_rate
    }

    // adjust self.last_update to make it match the expected
    // frame fraction, this is done when resuming and when
    // changing the tick rate
    fn set_last_update_to_match_frame_fraction(&mut self, frac: f32) {
        let elapsed = (frac - self.remainder as f32) * self.tick_duration.as_secs_f32();
        let elapsed = if elapsed < 0. {
            // slight tolerance
            if elapsed < -0.01 {
                tracing::warn!(elapsed, "negative elapsed time while restoring frame fraction");
            }
            0.
        } else {
            elapsed
        };

        self.last_update = Instant::now()
            .checked_sub(Duration::from_secs_f32(elapsed))
            .unwrap_or_else(Instant::now);
    }

    pub fn set_tick_rate(&mut self, tick_rate: f64) {
        if (self.tick_rate - tick_rate).abs() < f64::EPSILON {
            return;
        }

        let frame_fraction = self.frame_fraction();

        self.tick_rate = tick_rate;
        self.tick_duration = Self::duration_of(tick_rate);
        self.measured_tick_rate.set_expected_fps(tick_rate);

        self.set_last_update_to_match_frame_fraction(frame_fraction);
    }

    /// Repeatedly called in update() as a while loop condition,
    /// yields one `true` per tick that has elapsed since the last call
    pub fn can_update(&mut self) -> bool {
        if self.state != State::Playing {
            return false;
        }

        match &mut self.missed_updates {
            Some(0) => {
                self.missed_updates = None;
                false
            }
            Some(n) => {
                *n -= 1;
                true
            }
            None => {
                let ticks = self.last_update.elapsed().as_secs_f64()
                    / self.tick_duration.as_secs_f64()
                    + self.remainder;
                let mut missed_updates = ticks as usize;

                if missed_updates > 0 {
                    self.remainder = ticks % 1.;
                    self.last_update = Instant::now();

                    if missed_updates > Self::MAX_CATCH_UP {
                        tracing::debug!(missed_updates, "dropping ticks to catch up");
                        missed_updates = Self::MAX_CATCH_UP;
                    }
                    self.missed_updates = Some(missed_updates - 1);
                    self.measured_tick_rate.register_frames(missed_updates);

                    true
                } else {
                    false
                }
            }
        }
    }

    /// Call once per draw()
    pub fn graphics_frame(&mut self) {
        self.measured_graphics_fps.register_frames(1);
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn play(&mut self) {
        self.state = State::Playing;
        self.measured_tick_rate.reset();
        if let Some(frac) = self.frozen_frame_fraction.take() {
            self.set_last_update_to_match_frame_fraction(frac)
        }
    }

    pub fn pause(&mut self) {
        self.frozen_frame_fraction = Some(self.frame_fraction());
        self.state = State::Paused;
        self.missed_updates = None;
    }

    /// Fraction of the current tick that has elapsed
    pub fn frame_fraction(&self) -> f32 {
        match self.frozen_frame_fraction {
            Some(frac) => frac,
            None => {
                let frac = self.last_update.elapsed().as_secs_f32()
                    / self.tick_duration.as_secs_f32()
                    + self.remainder as f32;
                frac.min(1.)
            }
        }
    }

    pub fn measured_tick_rate(&self) -> f64 {
        self.measured_tick_rate.fps()
    }

    pub fn measured_graphics_fps(&self) -> f64 {
        self.measured_graphics_fps.fps()
    }
}

#[test]
fn test_paused_never_updates() {
    let mut control = Control::new(1_000.);
    control.pause();
    std::thread::sleep(Duration::from_millis(20));
    assert!(!control.can_update());
    assert_eq!(control.state(), State::Paused);
}

#[test]
fn test_catches_up_on_elapsed_ticks() {
    let mut control = Control::new(1_000.);
    std::thread::sleep(Duration::from_millis(10));

    let mut ticks = 0;
    while control.can_update() {
        ticks += 1;
    }
    // at least the 10 elapsed ticks, at most the catch-up cap
    assert!((10..=Control::MAX_CATCH_UP).contains(&ticks), "{} ticks", ticks);
}

#[test]
fn test_no_tick_before_its_time() {
    let mut control = Control::new(0.5);
    assert!(!control.can_update());
}
