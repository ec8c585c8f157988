//! Pure segment generators for overlay markers.
//!
//! Everything here works in resolved pixel space: callers turn percentages
//! into a center point and an absolute radius first. Angles are in degrees,
//! 0° on +X and increasing counter-clockwise in math convention; whether +Y
//! points up or down on screen is left to the consumer.

use glam::Vec2;
use smallvec::{smallvec, SmallVec};

use crate::constants::{
    CENTER_MARK_SIZE, CENTER_MARK_THICKNESS, CROSS_THICKNESS, MAX_DIVISIONS, OUTLINE_THICKNESS,
    SPOKE_THICKNESS, TICK_THICKNESS,
};

// Upper bound on dash runs for a single line. Only reachable with absurd
// line lengths; keeps the walk finite.
const MAX_DASH_RUNS: usize = 1 << 16;

#[inline]
fn drawable(len: f32) -> bool {
    len.is_finite() && len > 0.0
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
    pub thickness: f32,
    pub style: LineStyle,
}

impl Segment {
    #[inline]
    pub fn solid(start: Vec2, end: Vec2, thickness: f32) -> Self {
        Self {
            start,
            end,
            thickness,
            style: LineStyle::Solid,
        }
    }

    #[inline]
    pub fn dashed(start: Vec2, end: Vec2, thickness: f32) -> Self {
        Self {
            start,
            end,
            thickness,
            style: LineStyle::Dashed,
        }
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }
}

/// How far crosshair lines extend from their center.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum CrossLinesPolicy {
    /// Edge-to-edge lines through the center.
    #[default]
    FullViewport,
    /// Arms of fixed length on each side of the center.
    Bounded { arm_length: f32 },
}

#[inline]
pub fn point_on_circle(center: Vec2, radius: f32, degrees: f32) -> Vec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    center + Vec2::new(cos, sin) * radius
}

/// Angles of the `divisions` graduation marks, starting at 0° and covering
/// [0, 360) without repeating the seam. Empty when `divisions <= 1`; counts
/// above [`MAX_DIVISIONS`] are clamped to it.
pub fn division_angles(divisions: i32) -> impl Iterator<Item = f32> {
    let n = if divisions > 1 {
        divisions.min(MAX_DIVISIONS) as u32
    } else {
        0
    };
    let step = if n > 0 { 360.0 / n as f32 } else { 0.0 };
    (0..n).map(move |i| i as f32 * step)
}

/// One horizontal then one vertical line through `center`.
///
/// `viewport` is only consulted by [`CrossLinesPolicy::FullViewport`].
pub fn cross_lines(center: Vec2, policy: CrossLinesPolicy, viewport: Vec2) -> SmallVec<[Segment; 2]> {
    match policy {
        CrossLinesPolicy::FullViewport => smallvec![
            Segment::solid(
                Vec2::new(0.0, center.y),
                Vec2::new(viewport.x, center.y),
                CROSS_THICKNESS
            ),
            Segment::solid(
                Vec2::new(center.x, 0.0),
                Vec2::new(center.x, viewport.y),
                CROSS_THICKNESS
            ),
        ],
        CrossLinesPolicy::Bounded { arm_length } => {
            let arm = arm_length.max(0.0);
            smallvec![
                Segment::solid(
                    center - Vec2::new(arm, 0.0),
                    center + Vec2::new(arm, 0.0),
                    CROSS_THICKNESS
                ),
                Segment::solid(
                    center - Vec2::new(0.0, arm),
                    center + Vec2::new(0.0, arm),
                    CROSS_THICKNESS
                ),
            ]
        }
    }
}

/// Small solid cross marking a circle's center.
pub fn center_mark(center: Vec2) -> SmallVec<[Segment; 2]> {
    cross_lines(
        center,
        CrossLinesPolicy::Bounded {
            arm_length: CENTER_MARK_SIZE,
        },
        Vec2::ZERO,
    )
    .into_iter()
    .map(|s| Segment {
        thickness: CENTER_MARK_THICKNESS,
        ..s
    })
    .collect()
}

/// Circle approximated by `segment_count` chords.
///
/// Chord `i` spans `i * 360/n` to `(i + 1) * 360/n` degrees. The last chord
/// ends exactly on the first vertex, so the seam is neither doubled nor open.
pub fn circle_outline(center: Vec2, radius: f32, segment_count: u32) -> Vec<Segment> {
    if segment_count == 0 || !drawable(radius) {
        return Vec::new();
    }
    let step = 360.0 / segment_count as f32;
    let vertices: Vec<Vec2> = (0..segment_count)
        .map(|i| point_on_circle(center, radius, i as f32 * step))
        .collect();
    (0..vertices.len())
        .map(|i| {
            let next = vertices[(i + 1) % vertices.len()];
            Segment::solid(vertices[i], next, OUTLINE_THICKNESS)
        })
        .collect()
}

/// Solid graduation marks running inward from the circumference.
///
/// The inner end never passes the center when `tick_length > radius`.
pub fn radial_ticks(center: Vec2, radius: f32, divisions: i32, tick_length: f32) -> Vec<Segment> {
    if !drawable(radius) {
        return Vec::new();
    }
    let inner = (radius - tick_length.max(0.0)).max(0.0);
    division_angles(divisions)
        .map(|deg| {
            Segment::solid(
                point_on_circle(center, radius, deg),
                point_on_circle(center, inner, deg),
                TICK_THICKNESS,
            )
        })
        .collect()
}

/// Dashed lines from the center to the circumference at each division angle.
pub fn radial_spokes(center: Vec2, radius: f32, divisions: i32) -> Vec<Segment> {
    if !drawable(radius) {
        return Vec::new();
    }
    division_angles(divisions)
        .map(|deg| Segment::dashed(center, point_on_circle(center, radius, deg), SPOKE_THICKNESS))
        .collect()
}

/// Splits the line `start -> end` into dash runs separated by gaps.
///
/// Runs alternate dash/gap starting with a dash at `start`. Each run's
/// offsets are computed from its index, not accumulated, so identical input
/// always yields identical output. The final dash is clipped at `end`.
/// Non-positive or non-finite dash lengths produce nothing.
pub fn dash_pattern(start: Vec2, end: Vec2, dash_length: f32, gap_length: f32) -> Vec<(Vec2, Vec2)> {
    let total = start.distance(end);
    let gap = if gap_length.is_finite() { gap_length.max(0.0) } else { 0.0 };
    if !drawable(dash_length) || !drawable(total) {
        return Vec::new();
    }
    let period = dash_length + gap;
    let dir = (end - start) / total;
    let runs = ((total / period).ceil() as usize).min(MAX_DASH_RUNS);

    let mut out = Vec::with_capacity(runs);
    for i in 0..runs {
        let from = i as f32 * period;
        if from >= total {
            break;
        }
        let to = (from + dash_length).min(total);
        let a = start + dir * from;
        let b = if to >= total { end } else { start + dir * to };
        out.push((a, b));
    }
    out
}

/// Replaces every dashed segment with its solid dash runs, keeping order
/// and thickness. Solid segments pass through unchanged.
pub fn expand_dashes(segments: &[Segment], dash_length: f32, gap_length: f32) -> Vec<Segment> {
    let mut out = Vec::with_capacity(segments.len());
    for seg in segments {
        match seg.style {
            LineStyle::Solid => out.push(*seg),
            LineStyle::Dashed => out.extend(
                dash_pattern(seg.start, seg.end, dash_length, gap_length)
                    .into_iter()
                    .map(|(a, b)| Segment::solid(a, b, seg.thickness)),
            ),
        }
    }
    out
}
