use ggez::graphics;

pub mod to_color;

#[derive(Deref, DerefMut, Copy, Clone, Debug, PartialEq)]
pub struct Color(pub graphics::Color);

impl Color {
    pub const WHITE: Self = Self(graphics::Color::WHITE);

    #[inline(always)]
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(graphics::Color::from_rgb(r, g, b))
    }

    /// Same color with its alpha scaled by `factor`
    #[must_use]
    pub fn faded(mut self, factor: f32) -> Self {
        self.a *= factor.clamp(0., 1.);
        self
    }
}
