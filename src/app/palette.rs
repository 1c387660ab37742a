use hsl::HSL;

use crate::color::to_color::ToColor;
use crate::color::Color;

lazy_static! {
    static ref DEFAULT_BACKGROUND_COLOR: Color = Color::from_rgb(18, 18, 24);
    static ref DEFAULT_HEAD_COLOR: Color = Color::from_rgb(222, 214, 190);
    static ref DEFAULT_RIB_COLOR: Color = Color::from_rgb(200, 192, 170);
}

pub struct Palette {
    pub background_color: Color,
    pub head_color: Color,
    pub rib_color: Color,
    pub outline_thickness: f32,
    pub rib_thickness: f32,

    /// Body gradient from the neck to the tail, interpolated in HSL
    pub body_start: HSL,
    pub body_end: HSL,
}

impl Palette {
    pub fn bone() -> Self {
        Self {
            background_color: *DEFAULT_BACKGROUND_COLOR,
            head_color: *DEFAULT_HEAD_COLOR,
            rib_color: *DEFAULT_RIB_COLOR,
            outline_thickness: 1.5,
            rib_thickness: 2.,
            body_start: HSL { h: 45., s: 0.3, l: 0.8 },
            body_end: HSL { h: 30., s: 0.2, l: 0.35 },
        }
    }

    /// Color of body segment `seg` (1-based, the head is 0) in a chain of `len`
    pub fn body_color(&self, seg: usize, len: usize) -> Color {
        let body_len = len.saturating_sub(1);
        let tail_ratio = if body_len <= 1 {
            0.
        } else {
            seg.saturating_sub(1) as f64 / (body_len - 1) as f64
        };
        lerp_hsl(&self.body_start, &self.body_end, tail_ratio).to_color()
    }
}

fn lerp_hsl(start: &HSL, end: &HSL, t: f64) -> HSL {
    let u = 1. - t;
    HSL {
        h: u * start.h + t * end.h,
        s: u * start.s + t * end.s,
        l: u * start.l + t * end.l,
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::bone()
    }
}

#[test]
fn test_body_gradient_ends() {
    let palette = Palette::bone();
    let len = 51;
    let neck = lerp_hsl(&palette.body_start, &palette.body_end, 0.).to_color();
    let tail = lerp_hsl(&palette.body_start, &palette.body_end, 1.).to_color();
    assert_eq!(palette.body_color(1, len), neck);
    assert_eq!(palette.body_color(len - 1, len), tail);
    assert_ne!(neck, tail);
    // a single body segment takes the neck color
    assert_eq!(palette.body_color(1, 2), neck);
}
