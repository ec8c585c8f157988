//! Bridge between marker records and a line-drawing backend.
//!
//! The renderer owns the backend's line material. It is created on first
//! draw, reused for every later frame and released by [`OverlayRenderer::dispose`]
//! or on drop. If the backend cannot create it, drawing turns into a no-op
//! and the failure is logged once.

use glam::Vec2;

use crate::constants::{CIRCLE_SEGMENTS, CROSS_ARM_LENGTH, DASH_LENGTH, GAP_LENGTH, TICK_LENGTH};
use crate::geometry::{
    self, center_mark, circle_outline, cross_lines, radial_spokes, radial_ticks, CrossLinesPolicy,
    Segment,
};
use crate::logging::LogContext;
use crate::marker::{MarkerRecord, MarkerShape};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("line material unavailable: {0}")]
    MaterialUnavailable(String),
    #[error("frame submission failed: {0}")]
    Submit(String),
}

/// Current drawable area in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Percent-of-viewport position to pixels.
    #[inline]
    pub fn resolve_center(&self, position_pct: Vec2) -> Vec2 {
        self.size() * position_pct / 100.0
    }

    /// Radii are a percentage of the viewport width.
    #[inline]
    pub fn resolve_radius(&self, radius_pct: f32) -> f32 {
        self.width * radius_pct / 100.0
    }
}

/// Immediate-mode line sink, e.g. a GPU pipeline or a test recorder.
///
/// Only solid segments reach `draw_line`; dashes are expanded beforehand.
pub trait LineBackend {
    type Material;

    fn create_line_material(&mut self) -> Result<Self::Material, BackendError>;
    fn release_line_material(&mut self, material: Self::Material);

    fn begin_lines(&mut self, material: &Self::Material, viewport: Viewport);
    fn draw_line(&mut self, segment: &Segment, color: [f32; 3]);
    fn end_lines(&mut self, material: &Self::Material) -> Result<(), BackendError>;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderOptions {
    pub cross_lines: CrossLinesPolicy,
    pub circle_segments: u32,
    pub tick_length: f32,
    pub dash_length: f32,
    pub gap_length: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            cross_lines: CrossLinesPolicy::FullViewport,
            circle_segments: CIRCLE_SEGMENTS,
            tick_length: TICK_LENGTH,
            dash_length: DASH_LENGTH,
            gap_length: GAP_LENGTH,
        }
    }
}

impl RenderOptions {
    /// Fixed-length crosshair arms instead of edge-to-edge lines.
    pub fn bounded_crosshair() -> Self {
        Self {
            cross_lines: CrossLinesPolicy::Bounded {
                arm_length: CROSS_ARM_LENGTH,
            },
            ..Self::default()
        }
    }
}

/// Segments for one record at an already-resolved center and radius.
///
/// Circle output order: outline, center mark, graduation ticks, spokes.
/// Spokes are tagged dashed; everything else is solid.
pub fn marker_segments(
    record: &MarkerRecord,
    center: Vec2,
    radius_px: f32,
    viewport: Viewport,
    options: &RenderOptions,
) -> Vec<Segment> {
    match record.shape() {
        MarkerShape::CrossLines => cross_lines(center, options.cross_lines, viewport.size()).to_vec(),
        MarkerShape::Circle(params) => {
            let mut out = circle_outline(center, radius_px, options.circle_segments);
            out.extend(center_mark(center));
            out.extend(radial_ticks(center, radius_px, params.divisions, options.tick_length));
            out.extend(radial_spokes(center, radius_px, params.divisions));
            out
        }
    }
}

enum MaterialState<M> {
    Uncreated,
    Ready(M),
    Unavailable,
}

pub struct OverlayRenderer<B: LineBackend> {
    backend: B,
    material: MaterialState<B::Material>,
    options: RenderOptions,
    log: LogContext,
    submit_failed: bool,
}

impl<B: LineBackend> OverlayRenderer<B> {
    pub fn new(backend: B, options: RenderOptions, log: LogContext) -> Self {
        Self {
            backend,
            material: MaterialState::Uncreated,
            options,
            log,
            submit_failed: false,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: RenderOptions) {
        self.options = options;
    }

    pub fn set_log(&mut self, log: LogContext) {
        self.log = log;
    }

    pub fn has_material(&self) -> bool {
        matches!(self.material, MaterialState::Ready(_))
    }

    /// True once material creation has failed; drawing is then a no-op.
    pub fn is_degraded(&self) -> bool {
        matches!(self.material, MaterialState::Unavailable)
    }

    fn ensure_material(&mut self) {
        if !matches!(self.material, MaterialState::Uncreated) {
            return;
        }
        self.material = match self.backend.create_line_material() {
            Ok(material) => {
                self.log.debug(format_args!("line material created"));
                MaterialState::Ready(material)
            }
            Err(e) => {
                self.log
                    .error(format_args!("overlay drawing disabled: {e}"));
                MaterialState::Unavailable
            }
        };
    }

    /// Expands every visible record, then the optional preview on top, and
    /// submits the result. Returns the number of solid lines submitted.
    pub fn draw_markers(
        &mut self,
        markers: &[MarkerRecord],
        preview: Option<&MarkerRecord>,
        viewport: Viewport,
    ) -> usize {
        self.ensure_material();
        let MaterialState::Ready(material) = &self.material else {
            return 0;
        };

        self.backend.begin_lines(material, viewport);
        let mut submitted = 0;
        for record in markers.iter().chain(preview).filter(|m| m.visible) {
            let center = viewport.resolve_center(record.position);
            let radius = viewport.resolve_radius(record.circle.radius);
            let segments = marker_segments(record, center, radius, viewport, &self.options);
            let color = record.color.rgb();
            for seg in geometry::expand_dashes(
                &segments,
                self.options.dash_length,
                self.options.gap_length,
            ) {
                self.backend.draw_line(&seg, color);
                submitted += 1;
            }
        }

        match self.backend.end_lines(material) {
            Ok(()) => self.submit_failed = false,
            Err(e) if !self.submit_failed => {
                self.submit_failed = true;
                self.log.warn(format_args!("{e}"));
            }
            Err(e) => self.log.debug(format_args!("{e}")),
        }
        submitted
    }

    /// Releases the line material if it exists. Safe to call repeatedly and
    /// when nothing was ever created.
    pub fn dispose(&mut self) {
        match std::mem::replace(&mut self.material, MaterialState::Uncreated) {
            MaterialState::Ready(material) => {
                self.backend.release_line_material(material);
                self.log.debug(format_args!("line material released"));
            }
            // A failed backend stays failed.
            other => self.material = other,
        }
    }
}

impl<B: LineBackend> Drop for OverlayRenderer<B> {
    fn drop(&mut self) {
        self.dispose();
    }
}
