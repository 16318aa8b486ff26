//! Wave border synthesis - the decorative frame around the preview.
//!
//! The frame replaces the plain bounding rectangle with a closed path:
//! straight top and bottom edges, and right/left edges built from runs of
//! alternating quadratic curves whose control points swing in and out by
//! the wave amplitude. One immutable command list is built and then
//! serialized through whichever coordinate projection a consumer needs -
//! absolute drawing units for the SVG stroke and clip, percentages of the
//! box for a CSS clip on a separate layer.
//!
//! ## Rust Lesson #4: Closures as parameters
//!
//! In JS you pass a formatter callback without a second thought. Rust does
//! the same thing, but the signature says exactly what the callback may
//! do: `FnMut(f64, Axis) -> String` can mutate its captures, takes a
//! coordinate plus its axis, and hands back a string. No surprises at the
//! call site.

use crate::geometry::{Point, Rect};
use lyon_geom::{point, QuadraticBezierSegment};

/// One step of a path command list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    QuadTo { ctrl: Point, to: Point },
    Close,
}

/// Which box dimension a coordinate is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Serialized wave frame: the same command list in two coordinate spaces.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveFrame {
    pub commands: Vec<PathCommand>,
    /// SVG path data in absolute drawing units.
    pub path: String,
    /// The same path with every coordinate re-expressed as a percentage of
    /// the box, for use as an independent clip description.
    pub css_clip: String,
}

/// Which way a wave run travels along its edge.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Travel {
    Down,
    Up,
}

/// Wave amplitude derived from the hole radius, kept within a band
/// relative to the frame width so thin frames don't get swamped.
pub fn wave_amplitude(hole_radius: f64, width: f64) -> f64 {
    let base = hole_radius.max(4.0).min(width * 0.08);
    clamp(base, 6.0, (width * 0.12).max(10.0))
}

/// Number of wave cycles for a frame of the given height (one cycle is an
/// out-swing plus an in-swing).
pub fn wave_cycles(height: f64) -> u32 {
    let estimate = (height.max(1.0) / 70.0).round();
    (estimate as u32).clamp(3, 14)
}

/// Build the closed frame path.
///
/// Degenerate input (non-finite or non-positive box or amplitude) yields
/// an empty list; callers fall back to a plain rectangle.
pub fn wave_frame_commands(rect: Rect, amplitude: f64, cycles: u32) -> Vec<PathCommand> {
    if rect.is_degenerate() || !amplitude.is_finite() || amplitude <= 0.0 {
        return Vec::new();
    }

    let segments = cycles.max(1) * 2;
    let right = rect.right();
    let bottom = rect.bottom();

    // Right edge descends with the swing flipped outward first; the left
    // edge ascends with the mirrored swing sign.
    let right_wave = wave_segments(right, rect.top, rect.height, amplitude, segments, -1.0, Travel::Down);
    let left_wave = wave_segments(rect.left, bottom, rect.height, amplitude, segments, 1.0, Travel::Up);

    let mut commands = Vec::with_capacity(right_wave.len() + left_wave.len() + 4);
    commands.push(PathCommand::MoveTo(Point::new(rect.left, rect.top)));
    commands.push(PathCommand::LineTo(Point::new(right, rect.top)));
    commands.extend(right_wave);
    commands.push(PathCommand::LineTo(Point::new(rect.left, bottom)));
    commands.extend(left_wave);
    commands.push(PathCommand::Close);
    commands
}

/// One vertical run of alternating quadratic segments along an edge.
fn wave_segments(
    edge_x: f64,
    start_y: f64,
    height: f64,
    amplitude: f64,
    segments: u32,
    swing_dir: f64,
    travel: Travel,
) -> Vec<PathCommand> {
    let sign = match travel {
        Travel::Down => 1.0,
        Travel::Up => -1.0,
    };
    let segment_h = height / segments as f64 * sign;
    let mut y = start_y;
    let mut commands = Vec::with_capacity(segments as usize);
    for i in 0..segments {
        let swing = amplitude * if i % 2 == 0 { 1.0 } else { -1.0 } * swing_dir;
        let ctrl = Point::new(edge_x + swing, y + segment_h / 2.0);
        y += segment_h;
        commands.push(PathCommand::QuadTo {
            ctrl,
            to: Point::new(edge_x, y),
        });
    }
    commands
}

/// Serialize a command list through a coordinate formatter.
pub fn serialize_commands<F>(commands: &[PathCommand], mut fmt: F) -> String
where
    F: FnMut(f64, Axis) -> String,
{
    let mut parts = Vec::with_capacity(commands.len());
    for command in commands {
        match command {
            PathCommand::MoveTo(p) => {
                parts.push(format!("M {} {}", fmt(p.x, Axis::X), fmt(p.y, Axis::Y)));
            }
            PathCommand::LineTo(p) => {
                parts.push(format!("L {} {}", fmt(p.x, Axis::X), fmt(p.y, Axis::Y)));
            }
            PathCommand::QuadTo { ctrl, to } => {
                parts.push(format!(
                    "Q {} {} {} {}",
                    fmt(ctrl.x, Axis::X),
                    fmt(ctrl.y, Axis::Y),
                    fmt(to.x, Axis::X),
                    fmt(to.y, Axis::Y)
                ));
            }
            PathCommand::Close => parts.push("Z".to_string()),
        }
    }
    parts.join(" ")
}

/// Build and serialize the frame in both coordinate spaces.
pub fn wave_frame(rect: Rect, amplitude: f64, cycles: u32) -> Option<WaveFrame> {
    let commands = wave_frame_commands(rect, amplitude, cycles);
    if commands.is_empty() {
        return None;
    }
    let path = serialize_commands(&commands, |value, _| format_abs(value));
    let css_clip = serialize_commands(&commands, |value, axis| format_percent(value, axis, &rect));
    Some(WaveFrame {
        commands,
        path,
        css_clip,
    })
}

/// Flatten the frame's curves into a polyline for consumers that need a
/// polygonal outline (hit testing, raster clipping).
pub fn flatten_commands(commands: &[PathCommand], tolerance: f64) -> Vec<Point> {
    let mut points = Vec::new();
    let mut current = Point::new(0.0, 0.0);
    let mut subpath_start = current;
    for command in commands {
        match command {
            PathCommand::MoveTo(p) => {
                current = *p;
                subpath_start = *p;
                points.push(*p);
            }
            PathCommand::LineTo(p) => {
                current = *p;
                points.push(*p);
            }
            PathCommand::QuadTo { ctrl, to } => {
                let curve = QuadraticBezierSegment {
                    from: point(current.x, current.y),
                    ctrl: point(ctrl.x, ctrl.y),
                    to: point(to.x, to.y),
                };
                curve.for_each_flattened(tolerance, &mut |segment| {
                    points.push(Point::new(segment.to.x, segment.to.y));
                });
                current = *to;
            }
            PathCommand::Close => points.push(subpath_start),
        }
    }
    points
}

fn format_abs(value: f64) -> String {
    if value.is_finite() {
        format!("{:.2}", value)
    } else {
        "0".to_string()
    }
}

fn format_percent(value: f64, axis: Axis, rect: &Rect) -> String {
    let (offset, denom) = match axis {
        Axis::X => (rect.left, rect.width),
        Axis::Y => (rect.top, rect.height),
    };
    let denom = if denom.is_finite() && denom != 0.0 { denom } else { 1.0 };
    let raw = if value.is_finite() { (value - offset) / denom } else { 0.0 };
    // Tolerate slight overshoot from the control points, nothing more.
    let clamped = clamp(raw, -0.1, 1.1);
    format!("{:.4}%", clamped * 100.0)
}

fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}
