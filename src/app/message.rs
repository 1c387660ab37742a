use crate::basic::Point;
use crate::color::Color;
use ggez::graphics::{Canvas, DrawParam, PxScale, Text, TextAlign, TextLayout};
use ggez::Context;
use std::time::{Duration, Instant};

/// Finite number of possible messages
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum MessageID {
    /// Persistent fps view
    Fps,
    /// Temporary info when toggling cadence, pausing,
    /// or other notifications
    Notification,
}

pub enum Position {
    TopLeft,
    TopRight,
}

pub struct Message {
    pub text: String,

    pub position: Position,
    pub h_margin: f32,
    pub v_margin: f32,
    pub font_size: f32,
    pub color: Color,
    // None means unlimited duration
    pub disappear: Option<Instant>,
}

impl Message {
    pub const DEFAULT_MARGIN: f32 = 20.;
    pub const DEFAULT_FONT_SIZE: f32 = 32.;
    const FADE_OUT: Duration = Duration::from_millis(300);

    pub fn default(
        text: String,
        position: Position,
        color: Color,
        duration: Option<Duration>,
    ) -> Self {
        Self {
            text,
            position,
            h_margin: Self::DEFAULT_MARGIN,
            v_margin: Self::DEFAULT_MARGIN,
            font_size: Self::DEFAULT_FONT_SIZE,
            color,
            disappear: duration.map(|d| Instant::now() + d),
        }
    }

    /// Opacity factor for a message with `time_left` before it disappears,
    /// eased out over the last [`Message::FADE_OUT`]
    fn opacity(time_left: Duration) -> f32 {
        if time_left >= Self::FADE_OUT {
            1.
        } else {
            let linear = time_left.as_secs_f32() / Self::FADE_OUT.as_secs_f32();
            ezing::quad_out(linear)
        }
    }
}

pub struct MessageDrawable {
    pub text: Text,
    pub dest: Point,
    pub color: Color,
}

impl MessageDrawable {
    pub fn draw(&self, canvas: &mut Canvas) {
        let dp = DrawParam::default().dest(self.dest).color(*self.color);

        canvas.draw(&self.text, dp)
    }
}

impl Message {
    /// A return value of None signifies that the message has reached
    /// its end of life and should be removed
    pub fn get_drawable(&self, ctx: &Context) -> Option<MessageDrawable> {
        let (width, height) = ctx.gfx.drawable_size();

        let dest;
        let h_align;
        match self.position {
            Position::TopLeft => {
                dest = Point { x: self.h_margin, y: self.v_margin };
                h_align = TextAlign::Begin;
            }
            Position::TopRight => {
                dest = Point {
                    x: width - self.h_margin,
                    y: self.v_margin,
                };
                h_align = TextAlign::End;
            }
        }

        let mut color = self.color;
        if let Some(deadline) = self.disappear {
            // None means the message has reached its end of life
            let time_left = deadline.checked_duration_since(Instant::now())?;
            color = color.faded(Self::opacity(time_left));
        }

        let mut text = Text::new(self.text.as_str());
        text.set_scale(PxScale::from(self.font_size))
            .set_bounds([width / 2. - self.h_margin, height / 2. - self.v_margin])
            .set_layout(TextLayout { h_align, v_align: TextAlign::Begin });

        Some(MessageDrawable { text, dest, color })
    }
}

#[test]
fn test_opacity_fades_out() {
    assert_eq!(Message::opacity(Duration::from_secs(1)), 1.);
    assert_eq!(Message::opacity(Duration::ZERO), 0.);
    let half = Message::opacity(Message::FADE_OUT / 2);
    assert!(half > 0. && half < 1., "{}", half);
}
