//! Image rendering for strokes using tiny-skia
//!
//! Strokes are painted onto a transparent ink layer, which is then composited
//! over the base image. Erasing clears ink from that layer only, so an eraser
//! always reveals the base image and never punches through to transparency.

use std::io;

use image::{Rgba, RgbaImage};
use tiny_skia::{
    BlendMode, ColorU8, FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke,
    Transform,
};

use super::geometry::{self, Segment};
use crate::capture::data_url;
use crate::config::{BlendKind, ToolPolicy, ToolStyle};
use crate::domain::{Stroke as InkStroke, StrokeLog};
use crate::error::RenderError;

/// Render the base image with every stroke in `strokes` painted over it, in order
///
/// This is a pure function of its inputs: the same image, log and policy
/// always give the same pixels.
pub fn render(
    base: &RgbaImage,
    strokes: &StrokeLog,
    policy: &ToolPolicy,
) -> Result<RgbaImage, RenderError> {
    let (width, height) = base.dimensions();
    let mut ink = Pixmap::new(width, height).ok_or(RenderError::Surface { width, height })?;

    for stroke in strokes {
        draw_stroke(&mut ink, stroke, &policy.style(stroke.tool()), policy.tension);
    }

    // The base stays in straight alpha; only inked pixels are touched
    let mut canvas = base.clone();
    for (dst, src) in canvas.pixels_mut().zip(ink.pixels()) {
        if src.alpha() != 0 {
            blend_over(dst, src.demultiply());
        }
    }

    Ok(canvas)
}

/// Render and encode the result as PNG bytes
///
/// The output is a static snapshot; it no longer carries the stroke history.
pub fn flatten(
    base: &RgbaImage,
    strokes: &StrokeLog,
    policy: &ToolPolicy,
) -> Result<Vec<u8>, RenderError> {
    let rendered = render(base, strokes, policy)?;
    let mut buffer = Vec::new();
    write_png(&mut buffer, &rendered)?;
    log::debug!(
        "Flattened {} strokes onto {}x{} image ({} bytes)",
        strokes.len(),
        rendered.width(),
        rendered.height(),
        buffer.len()
    );
    Ok(buffer)
}

/// Flatten to a `data:image/png;base64,...` URL
pub fn flatten_to_data_url(
    base: &RgbaImage,
    strokes: &StrokeLog,
    policy: &ToolPolicy,
) -> Result<String, RenderError> {
    flatten(base, strokes, policy).map(|png| data_url::encode_png(&png))
}

fn write_png<W: io::Write>(w: W, image: &RgbaImage) -> Result<(), png::EncodingError> {
    let mut encoder = png::Encoder::new(w, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())
}

/// Draw one stroke onto the ink layer
fn draw_stroke(ink: &mut Pixmap, stroke: &InkStroke, style: &ToolStyle, tension: f32) {
    let points = stroke.points();
    let Some(&start) = points.first() else {
        return;
    };

    let mut paint = Paint::default();
    paint.anti_alias = true;
    match style.blend {
        BlendKind::Normal => {
            let [r, g, b, a] = style.color.to_rgba_u8();
            paint.set_color_rgba8(r, g, b, a);
            paint.blend_mode = BlendMode::SourceOver;
        }
        BlendKind::Erase => {
            // Coverage is all that matters for destination-out
            paint.set_color_rgba8(0, 0, 0, 255);
            paint.blend_mode = BlendMode::DestinationOut;
        }
    }

    if stroke.is_dot() {
        // A lone sample is a round cap with nothing between
        if let Some(dot) = PathBuilder::from_circle(start.x, start.y, style.width / 2.0) {
            ink.fill_path(&dot, &paint, FillRule::Winding, Transform::identity(), None);
        }
        return;
    }

    let mut pb = PathBuilder::new();
    pb.move_to(start.x, start.y);
    for segment in geometry::smooth_segments(points, tension) {
        match segment {
            Segment::Line(to) => pb.line_to(to.x, to.y),
            Segment::Quad { ctrl, to } => pb.quad_to(ctrl.x, ctrl.y, to.x, to.y),
            Segment::Cubic { ctrl1, ctrl2, to } => {
                pb.cubic_to(ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y)
            }
        }
    }
    let Some(path) = pb.finish() else {
        return;
    };

    let line = Stroke {
        width: style.width,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Default::default()
    };
    ink.stroke_path(&path, &paint, &line, Transform::identity(), None);
}

/// Source-over blend of straight-alpha ink onto a straight-alpha pixel
fn blend_over(dst: &mut Rgba<u8>, src: ColorU8) {
    let src_a = src.alpha();
    if src_a == 255 {
        dst.0 = [src.red(), src.green(), src.blue(), 255];
        return;
    }

    let sa = f32::from(src_a) / 255.0;
    let da = f32::from(dst.0[3]) / 255.0 * (1.0 - sa);
    let out_a = sa + da;
    let mix = |s: u8, d: u8| ((f32::from(s) * sa + f32::from(d) * da) / out_a).round() as u8;

    dst.0 = [
        mix(src.red(), dst.0[0]),
        mix(src.green(), dst.0[1]),
        mix(src.blue(), dst.0[2]),
        (out_a * 255.0).round() as u8,
    ];
}
