// Host-side tests for the renderer against a recording backend.

use std::cell::Cell;
use std::rc::Rc;

use draw_layer::*;
use glam::Vec2;

#[derive(Default)]
struct Recorder {
    fail_material: bool,
    fail_submit: bool,
    created: usize,
    released: usize,
    frames: usize,
    lines: Vec<(Segment, [f32; 3])>,
    // Survives the renderer, for checking release on drop.
    release_probe: Option<Rc<Cell<usize>>>,
}

struct Token;

impl LineBackend for Recorder {
    type Material = Token;

    fn create_line_material(&mut self) -> Result<Token, BackendError> {
        if self.fail_material {
            return Err(BackendError::MaterialUnavailable("no shader".into()));
        }
        self.created += 1;
        Ok(Token)
    }

    fn release_line_material(&mut self, _material: Token) {
        self.released += 1;
        if let Some(probe) = &self.release_probe {
            probe.set(probe.get() + 1);
        }
    }

    fn begin_lines(&mut self, _material: &Token, _viewport: Viewport) {
        self.lines.clear();
    }

    fn draw_line(&mut self, segment: &Segment, color: [f32; 3]) {
        self.lines.push((*segment, color));
    }

    fn end_lines(&mut self, _material: &Token) -> Result<(), BackendError> {
        self.frames += 1;
        if self.fail_submit {
            return Err(BackendError::Submit("device lost".into()));
        }
        Ok(())
    }
}

const VIEWPORT: Viewport = Viewport {
    width: 800.0,
    height: 600.0,
};

fn renderer(backend: Recorder) -> OverlayRenderer<Recorder> {
    OverlayRenderer::new(backend, RenderOptions::default(), LogContext::default())
}

fn cross(color: PaletteColor) -> MarkerRecord {
    MarkerRecord::cross_lines("c", Vec2::new(50.0, 50.0), color)
}

#[test]
fn material_is_created_lazily_once() {
    let mut r = renderer(Recorder::default());
    assert!(!r.has_material());
    assert_eq!(r.backend().created, 0);

    for _ in 0..3 {
        r.draw_markers(&[cross(PaletteColor::Red)], None, VIEWPORT);
    }
    assert!(r.has_material());
    assert_eq!(r.backend().created, 1);
    assert_eq!(r.backend().frames, 3);
}

#[test]
fn dispose_releases_once_and_is_repeatable() {
    let mut r = renderer(Recorder::default());
    r.dispose();
    assert_eq!(r.backend().released, 0);

    r.draw_markers(&[], None, VIEWPORT);
    r.dispose();
    r.dispose();
    assert_eq!(r.backend().created, 1);
    assert_eq!(r.backend().released, 1);
    assert!(!r.has_material());

    // Drawing again recreates.
    r.draw_markers(&[], None, VIEWPORT);
    assert_eq!(r.backend().created, 2);
}

#[test]
fn missing_material_degrades_to_noop() {
    let mut r = renderer(Recorder {
        fail_material: true,
        ..Recorder::default()
    });
    assert_eq!(r.draw_markers(&[cross(PaletteColor::Red)], None, VIEWPORT), 0);
    assert_eq!(r.draw_markers(&[cross(PaletteColor::Red)], None, VIEWPORT), 0);
    assert!(r.is_degraded());
    assert_eq!(r.backend().frames, 0);
    assert!(r.backend().lines.is_empty());
    r.dispose();
    assert!(r.is_degraded());
    assert_eq!(r.backend().released, 0);
}

#[test]
fn submit_failure_does_not_stop_drawing() {
    let mut r = renderer(Recorder {
        fail_submit: true,
        ..Recorder::default()
    });
    assert_eq!(r.draw_markers(&[cross(PaletteColor::Red)], None, VIEWPORT), 2);
    assert_eq!(r.draw_markers(&[cross(PaletteColor::Red)], None, VIEWPORT), 2);
    assert_eq!(r.backend().frames, 2);
    assert!(!r.is_degraded());
}

#[test]
fn invisible_markers_are_skipped() {
    let mut r = renderer(Recorder::default());
    let hidden = MarkerRecord {
        visible: false,
        ..cross(PaletteColor::Blue)
    };
    let n = r.draw_markers(&[hidden, cross(PaletteColor::Red)], None, VIEWPORT);
    assert_eq!(n, 2);
    assert!(r.backend().lines.iter().all(|(_, c)| *c == [1.0, 0.0, 0.0]));
}

#[test]
fn preview_is_drawn_last() {
    let mut r = renderer(Recorder::default());
    let preview = cross(PaletteColor::Yellow);
    r.draw_markers(&[cross(PaletteColor::Red)], Some(&preview), VIEWPORT);
    let lines = &r.backend().lines;
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0].1, PaletteColor::Red.rgb());
    assert_eq!(lines[3].1, PaletteColor::Yellow.rgb());
}

#[test]
fn cross_lines_resolve_percent_position() {
    let mut r = renderer(Recorder::default());
    let m = MarkerRecord::cross_lines("q", Vec2::new(25.0, 75.0), PaletteColor::White);
    r.draw_markers(&[m], None, VIEWPORT);
    let lines = &r.backend().lines;
    assert_eq!(lines[0].0.start, Vec2::new(0.0, 450.0));
    assert_eq!(lines[0].0.end, Vec2::new(800.0, 450.0));
    assert_eq!(lines[1].0.start, Vec2::new(200.0, 0.0));
    assert_eq!(lines[1].0.end, Vec2::new(200.0, 600.0));
}

#[test]
fn bounded_option_shortens_cross_lines() {
    let mut r = OverlayRenderer::new(
        Recorder::default(),
        RenderOptions::bounded_crosshair(),
        LogContext::default(),
    );
    r.draw_markers(&[cross(PaletteColor::White)], None, VIEWPORT);
    for (seg, _) in &r.backend().lines {
        assert!((seg.length() - 2.0 * CROSS_ARM_LENGTH).abs() < 1e-3);
    }
}

#[test]
fn circle_segment_counts() {
    let options = RenderOptions::default();
    let center = Vec2::new(400.0, 300.0);
    let circle = MarkerRecord::circle("o", Vec2::new(50.0, 50.0), 10.0, 12, PaletteColor::White);
    let segs = marker_segments(&circle, center, 80.0, VIEWPORT, &options);
    let dashed = segs.iter().filter(|s| s.style == LineStyle::Dashed).count();
    assert_eq!(segs.len(), 64 + 2 + 12 + 12);
    assert_eq!(dashed, 12);
    // Outline comes first.
    assert!(segs[..64].iter().all(|s| s.thickness == OUTLINE_THICKNESS));

    let plain = MarkerRecord::circle("o", Vec2::new(50.0, 50.0), 10.0, 1, PaletteColor::White);
    assert_eq!(marker_segments(&plain, center, 80.0, VIEWPORT, &options).len(), 64 + 2);

    let flat = MarkerRecord::circle("o", Vec2::new(50.0, 50.0), 0.0, 12, PaletteColor::White);
    assert_eq!(marker_segments(&flat, center, 0.0, VIEWPORT, &options).len(), 2);
}

#[test]
fn spokes_reach_the_backend_as_solid_dashes() {
    let mut r = renderer(Recorder::default());
    // 9.5% of 800 px = 76 px radius; each spoke is 10 dash runs, the last clipped.
    let circle = MarkerRecord::circle("o", Vec2::new(50.0, 50.0), 9.5, 4, PaletteColor::Cyan);
    let n = r.draw_markers(&[circle], None, VIEWPORT);
    assert_eq!(n, 64 + 2 + 4 + 4 * 10);

    let lines = &r.backend().lines;
    assert!(lines.iter().all(|(s, _)| s.style == LineStyle::Solid));
    let spoke_dashes: Vec<_> = lines
        .iter()
        .filter(|(s, _)| s.thickness == SPOKE_THICKNESS)
        .collect();
    assert_eq!(spoke_dashes.len(), 40);
    assert!(spoke_dashes.iter().all(|(s, _)| s.length() <= DASH_LENGTH + 1e-3));
}

#[test]
fn radius_follows_viewport_width() {
    assert_eq!(VIEWPORT.resolve_radius(10.0), 80.0);
    assert_eq!(
        VIEWPORT.resolve_center(Vec2::new(50.0, 50.0)),
        Vec2::new(400.0, 300.0)
    );
    // Positions outside 0..100 are not clamped.
    assert_eq!(
        VIEWPORT.resolve_center(Vec2::new(-10.0, 150.0)),
        Vec2::new(-80.0, 900.0)
    );
}

#[test]
fn drop_releases_material() {
    let probe = Rc::new(Cell::new(0));
    {
        let mut r = renderer(Recorder {
            release_probe: Some(probe.clone()),
            ..Recorder::default()
        });
        r.draw_markers(&[], None, VIEWPORT);
        assert_eq!(probe.get(), 0);
    }
    assert_eq!(probe.get(), 1);

    // Never drawn, nothing to release.
    drop(renderer(Recorder {
        release_probe: Some(probe.clone()),
        ..Recorder::default()
    }));
    assert_eq!(probe.get(), 1);
}
