use std::collections::HashMap;

use ggez::event::EventHandler;
use ggez::graphics::{Canvas, DrawParam, Image};
use ggez::input::keyboard::{KeyCode, KeyInput};
use ggez::Context;

use crate::app::control::Control;
use crate::app::follower::Follower;
use crate::app::message::{Message, MessageID, Position};
use crate::app::palette::Palette;
use crate::app::prefs::{Cadence, Prefs};
use crate::basic::Point;
use crate::color::Color;
use crate::error::{Error, ErrorConversion, Result};
use crate::rendering::{self, segment_transforms};

pub mod control;
mod follower;
pub mod message;
pub mod palette;
pub mod prefs;

/// Resource path of the head sprite, optional
const HEAD_IMAGE: &str = "/snake_head.png";

pub struct App {
    follower: Follower,

    control: Control,
    prefs: Prefs,
    palette: Palette,

    head_image: Option<Image>,
    messages: HashMap<MessageID, Message>,
}

impl App {
    pub fn new(prefs: Prefs, palette: Palette, ctx: &Context) -> Result<Self> {
        let chain = prefs.build_chain().map_err(Error::from).with_trace_step("App::new")?;
        let params = prefs.follow_params();

        let head_image = match Image::from_path(ctx, HEAD_IMAGE) {
            Ok(image) => Some(image),
            Err(e) => {
                tracing::info!("no head sprite ({}), drawing the fallback head", e);
                None
            }
        };

        tracing::info!(
            segments = chain.len(),
            spacing = chain.spacing(),
            damping = params.damping,
            cadence = ?prefs.cadence,
            "chain ready"
        );

        Ok(Self {
            follower: Follower::new(chain, params),
            control: Control::new(prefs.tick_rate),
            prefs,
            palette,
            head_image,
            messages: HashMap::new(),
        })
    }

    fn restart(&mut self) -> Result {
        let chain = self
            .prefs
            .build_chain()
            .map_err(Error::from)
            .with_trace_step("App::restart")?;
        self.follower.reset(chain);
        tracing::debug!("chain reset to its initial layout");
        Ok(())
    }

    fn display_notification<S: ToString>(&mut self, text: S) {
        let message = Message::default(
            text.to_string(),
            Position::TopRight,
            Color::WHITE,
            Some(self.prefs.message_duration),
        );
        self.messages.insert(MessageID::Notification, message);
    }

    fn update_fps_message(&mut self) {
        if !self.prefs.display_fps {
            return;
        }

        let text = match self.prefs.cadence {
            Cadence::Frame => format!(
                "ticks: {:.1}/{:.1}\ngraphics: {:.1}",
                self.control.measured_tick_rate(),
                self.control.tick_rate(),
                self.control.measured_graphics_fps(),
            ),
            Cadence::Pointer => format!(
                "pointer driven\ngraphics: {:.1}",
                self.control.measured_graphics_fps()
            ),
        };
        let message = Message::default(text, Position::TopLeft, Color::WHITE, None);
        self.messages.insert(MessageID::Fps, message);
    }

    fn draw_messages(&mut self, canvas: &mut Canvas, ctx: &Context) {
        let mut expired = vec![];
        for (id, message) in &self.messages {
            match message.get_drawable(ctx) {
                Some(drawable) => drawable.draw(canvas),
                None => expired.push(*id),
            }
        }
        for id in expired {
            self.messages.remove(&id);
        }
    }

    fn draw_head_image(&self, canvas: &mut Canvas) {
        let Some(image) = &self.head_image else {
            return;
        };
        let Some(head) = segment_transforms(self.follower.chain(), &self.prefs).next() else {
            return;
        };

        let scale = Point {
            x: head.size.x / image.width() as f32,
            y: head.size.y / image.height() as f32,
        };
        let dp = DrawParam::default()
            .dest(head.center)
            .offset(Point::square(0.5))
            .rotation(head.rotation)
            .scale(scale);
        canvas.draw(image, dp);
    }

    fn change_tick_rate(&mut self, faster: bool) {
        let rate = self.control.tick_rate();
        let new_rate = match (faster, rate) {
            (false, r) if r <= 5. => 1.,
            (false, r) if r <= 30. => r - 5.,
            (false, r) => r - 10.,
            (true, r) if r < 5. => 5.,
            (true, r) if r < 30. => r + 5.,
            (true, r) if r < 240. => r + 10.,
            (true, r) => r,
        };
        self.control.set_tick_rate(new_rate);
        self.display_notification(format!("tick rate: {}", new_rate));
    }
}

impl EventHandler<Error> for App {
    fn update(&mut self, _ctx: &mut Context) -> Result {
        // ticks keep being consumed under the pointer cadence too,
        // switching back must not replay them all at once
        while self.control.can_update() {
            self.follower.tick(self.prefs.cadence);
        }
        self.update_fps_message();
        Ok(())
    }

    fn draw(&mut self, ctx: &mut Context) -> Result {
        self.control.graphics_frame();

        let mut canvas = Canvas::from_frame(ctx, *self.palette.background_color);

        let draw_head = self.head_image.is_none();
        let chain = self.follower.chain();
        let mesh = rendering::snake_mesh(chain, &self.prefs, &self.palette, draw_head, ctx)
            .with_trace_step("App::draw")?;
        if let Some(mesh) = mesh {
            canvas.draw(&mesh, DrawParam::default());
        }
        self.draw_head_image(&mut canvas);
        self.draw_messages(&mut canvas, ctx);

        canvas.finish(ctx).map_err(Error::from).with_trace_step("App::draw")
    }

    fn mouse_motion_event(
        &mut self,
        _ctx: &mut Context,
        x: f32,
        y: f32,
        _dx: f32,
        _dy: f32,
    ) -> Result {
        if self.control.state() == control::State::Playing {
            self.follower.pointer_moved(Point { x, y }, self.prefs.cadence);
        }
        Ok(())
    }

    fn key_down_event(&mut self, ctx: &mut Context, input: KeyInput, repeated: bool) -> Result {
        if repeated {
            return Ok(());
        }
        let Some(key) = input.keycode else {
            return Ok(());
        };

        match key {
            KeyCode::Space => match self.control.state() {
                control::State::Playing => {
                    self.control.pause();
                    self.display_notification("Paused");
                }
                control::State::Paused => {
                    self.control.play();
                    self.display_notification("Resumed");
                }
            },
            KeyCode::C => {
                self.prefs.cadence = self.prefs.cadence.toggled();
                tracing::debug!(cadence = ?self.prefs.cadence, "cadence changed");
                let text = match self.prefs.cadence {
                    Cadence::Frame => "Cadence: every tick",
                    Cadence::Pointer => "Cadence: pointer moves",
                };
                self.display_notification(text);
            }
            KeyCode::R => {
                self.restart()?;
                self.display_notification("Restarted");
            }
            KeyCode::B => {
                self.prefs.draw_ribs = !self.prefs.draw_ribs;
                let text = if self.prefs.draw_ribs { "Ribs on" } else { "Ribs off" };
                self.display_notification(text);
            }
            KeyCode::F => {
                self.prefs.display_fps = !self.prefs.display_fps;
                if !self.prefs.display_fps {
                    self.messages.remove(&MessageID::Fps);
                }
            }
            KeyCode::LBracket => self.change_tick_rate(false),
            KeyCode::RBracket => self.change_tick_rate(true),
            KeyCode::Escape => ctx.request_quit(),
            _ => (),
        }
        Ok(())
    }
}
