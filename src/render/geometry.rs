//! Shared geometry calculations for strokes
//!
//! This module contains tool constants and the curve smoothing used by
//! the image renderer. Nothing here depends on tiny-skia.

use crate::domain::Point;

/// Pen constants
pub mod pen {
    use crate::config::StrokeColor;

    /// Orange-red ink (#FF4500)
    pub const COLOR: StrokeColor = StrokeColor::rgb(1.0, 69.0 / 255.0, 0.0);
    /// Stroke width in canvas pixels
    pub const WIDTH: f32 = 4.0;
}

/// Highlighter constants
pub mod highlighter {
    use crate::config::StrokeColor;

    /// Flat yellow (#FFFF00)
    pub const COLOR: StrokeColor = StrokeColor::rgb(1.0, 1.0, 0.0);
    /// Stroke width in canvas pixels
    pub const WIDTH: f32 = 4.0;
}

/// Eraser constants
pub mod eraser {
    use crate::config::StrokeColor;

    /// Only the coverage of the eraser matters, never its color
    pub const COLOR: StrokeColor = StrokeColor::rgb(1.0, 1.0, 1.0);
    /// Stroke width in canvas pixels (5x the pen)
    pub const WIDTH: f32 = 20.0;
}

/// Curve smoothing constants
pub mod smoothing {
    /// Default spline tension between sampled points
    pub const TENSION: f32 = 0.5;
}

/// One piece of a smoothed stroke outline, continuing from the previous end point
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Segment {
    Line(Point),
    Quad { ctrl: Point, to: Point },
    Cubic { ctrl1: Point, ctrl2: Point, to: Point },
}

/// Control points around `p1` for a cardinal spline through `p0 -> p1 -> p2`
///
/// Returns `(before, after)`: the handle entering `p1` and the one leaving it.
/// Handle lengths are proportional to the adjacent segment lengths so short
/// jitter between samples does not overshoot.
pub fn control_points(p0: Point, p1: Point, p2: Point, tension: f32) -> (Point, Point) {
    let d01 = p0.distance(p1);
    let d12 = p1.distance(p2);
    let total = d01 + d12;
    if total <= f32::EPSILON {
        return (p1, p1);
    }

    let fa = tension * d01 / total;
    let fb = tension * d12 / total;
    let dx = p2.x - p0.x;
    let dy = p2.y - p0.y;

    (
        Point::new(p1.x - fa * dx, p1.y - fa * dy),
        Point::new(p1.x + fb * dx, p1.y + fb * dy),
    )
}

/// Smooth sampled points into path segments starting at `points[0]`
///
/// Two points give a straight line. With three or more, the first and last
/// segments are quadratic and the interior ones cubic. Fewer than two points
/// give no segments; the caller renders those as a dot.
pub fn smooth_segments(points: &[Point], tension: f32) -> Vec<Segment> {
    match points {
        [] | [_] => Vec::new(),
        [_, end] => vec![Segment::Line(*end)],
        _ => {
            let handles: Vec<(Point, Point)> = points
                .windows(3)
                .map(|w| control_points(w[0], w[1], w[2], tension))
                .collect();

            let last = points.len() - 1;
            let mut segments = Vec::with_capacity(last);
            segments.push(Segment::Quad {
                ctrl: handles[0].0,
                to: points[1],
            });
            for i in 1..last - 1 {
                segments.push(Segment::Cubic {
                    ctrl1: handles[i - 1].1,
                    ctrl2: handles[i].0,
                    to: points[i + 1],
                });
            }
            segments.push(Segment::Quad {
                ctrl: handles[last - 2].1,
                to: points[last],
            });
            segments
        }
    }
}
