use ggez::graphics::{DrawMode, Mesh, MeshBuilder};
use ggez::Context;
use itertools::Itertools;

use crate::app::palette::Palette;
use crate::app::prefs::Prefs;
use crate::chain::Chain;
use crate::error::{Error, ErrorConversion, Result};
use crate::rendering::shape::{Shape, Skull, Vertebra};
use crate::rendering::{rib, segment_transforms, SegmentTransform, Side};

/// Flattening tolerance for rib arcs, in pixels
const TOLERANCE: f32 = 0.2;

fn build_segment(
    builder: &mut MeshBuilder,
    transform: &SegmentTransform,
    idx: usize,
    len: usize,
    prefs: &Prefs,
    palette: &Palette,
) -> Result<usize> {
    let mut polygons = 0;

    if prefs.draw_ribs {
        for side in [Side::Left, Side::Right] {
            let points = rib(transform, prefs.rib_length, side).flattened(TOLERANCE);
            if points.len() >= 2 {
                builder.line(&points, palette.rib_thickness, *palette.rib_color)?;
                polygons += 1;
            }
        }
    }

    let outline = Vertebra::new(transform.size)
        .translate(transform.top_left())
        .rotate_clockwise_about_center(transform.rotation);
    builder.polygon(DrawMode::fill(), outline.points(), *palette.body_color(idx, len))?;
    builder.polygon(
        DrawMode::stroke(palette.outline_thickness),
        outline.points(),
        *palette.background_color,
    )?;
    polygons += 2;

    Ok(polygons)
}

/// Mesh of the whole chain, body drawn from the tail up so that segments
/// closer to the head end up on top. With `draw_head` the head is drawn
/// last as a polygon, otherwise it is left for the sprite.
/// Returns None when there is nothing to draw.
pub fn snake_mesh(
    chain: &Chain,
    prefs: &Prefs,
    palette: &Palette,
    draw_head: bool,
    ctx: &Context,
) -> Result<Option<Mesh>> {
    let mut builder = MeshBuilder::new();
    let mut polygons = 0;

    let transforms: Vec<_> = segment_transforms(chain, prefs).collect();
    let len = transforms.len();

    // spine
    for (a, b) in transforms.iter().map(|t| t.center).tuple_windows() {
        if a != b {
            builder.line(&[a, b], palette.rib_thickness, *palette.rib_color)?;
            polygons += 1;
        }
    }

    polygons += transforms
        .iter()
        .enumerate()
        .skip(1)
        .rev()
        .map(|(idx, transform)| build_segment(&mut builder, transform, idx, len, prefs, palette))
        .fold_ok(0, |total, n| total + n)
        .with_trace_step("snake_mesh body")?;

    if draw_head {
        let head = &transforms[0];
        let skull = Skull::new(head.size)
            .translate(head.top_left())
            .rotate_clockwise_about_center(head.rotation);
        builder
            .polygon(DrawMode::fill(), skull.points(), *palette.head_color)
            .map_err(Error::from)
            .with_trace_step("snake_mesh head")?;
        polygons += 1;
    }

    if polygons == 0 {
        return Ok(None);
    }

    tracing::trace!(polygons, "built snake mesh");
    Ok(Some(Mesh::from_data(ctx, builder.build())))
}
