// Host-side tests for the segment generators.

use draw_layer::geometry::*;
use draw_layer::{CIRCLE_SEGMENTS, CROSS_THICKNESS, MAX_DIVISIONS, OUTLINE_THICKNESS};
use glam::Vec2;

const EPS: f32 = 1e-3;

fn angle_deg(center: Vec2, p: Vec2) -> f32 {
    let d = p - center;
    let a = d.y.atan2(d.x).to_degrees();
    if a < -EPS {
        a + 360.0
    } else {
        a.max(0.0)
    }
}

#[test]
fn circle_outline_has_64_chords_on_the_circle() {
    let center = Vec2::new(400.0, 300.0);
    let radius = 120.0;
    let segs = circle_outline(center, radius, CIRCLE_SEGMENTS);
    assert_eq!(segs.len(), 64);
    for s in &segs {
        assert!((s.start.distance(center) - radius).abs() < EPS);
        assert!((s.end.distance(center) - radius).abs() < EPS);
        assert_eq!(s.thickness, OUTLINE_THICKNESS);
        assert_eq!(s.style, LineStyle::Solid);
    }
}

#[test]
fn circle_outline_is_closed_without_duplicate_seam() {
    let center = Vec2::ZERO;
    let segs = circle_outline(center, 50.0, 64);
    // Consecutive chords share endpoints, and the last one returns to the start.
    for pair in segs.windows(2) {
        assert_eq!(pair[0].end, pair[1].start);
    }
    assert_eq!(segs.last().unwrap().end, segs[0].start);
    // Chord i starts at i * 360/64 degrees.
    for (i, s) in segs.iter().enumerate() {
        let expected = i as f32 * 360.0 / 64.0;
        assert!(
            (angle_deg(center, s.start) - expected).abs() < 0.01,
            "chord {i} starts at {} not {expected}",
            angle_deg(center, s.start)
        );
    }
    // No two chords start at the same vertex.
    for i in 0..segs.len() {
        for j in (i + 1)..segs.len() {
            assert!(segs[i].start.distance(segs[j].start) > 1.0);
        }
    }
}

#[test]
fn degenerate_radius_yields_nothing() {
    for r in [0.0, -5.0, f32::NAN] {
        assert!(circle_outline(Vec2::ZERO, r, 64).is_empty());
        assert!(radial_ticks(Vec2::ZERO, r, 12, 20.0).is_empty());
        assert!(radial_spokes(Vec2::ZERO, r, 12).is_empty());
    }
    assert!(circle_outline(Vec2::ZERO, 10.0, 0).is_empty());
}

#[test]
fn divisions_of_one_or_less_suppress_ticks_and_spokes() {
    for n in [-3, 0, 1] {
        assert!(radial_ticks(Vec2::ZERO, 100.0, n, 20.0).is_empty());
        assert!(radial_spokes(Vec2::ZERO, 100.0, n).is_empty());
        assert_eq!(division_angles(n).count(), 0);
    }
}

#[test]
fn ticks_are_evenly_spaced_from_zero() {
    let center = Vec2::new(10.0, 20.0);
    let radius = 100.0;
    for n in [2, 4, 8, 12, 36] {
        let ticks = radial_ticks(center, radius, n, 20.0);
        assert_eq!(ticks.len(), n as usize);
        let step = 360.0 / n as f32;
        for (i, t) in ticks.iter().enumerate() {
            assert!((t.start.distance(center) - radius).abs() < EPS);
            assert!((t.end.distance(center) - 80.0).abs() < EPS);
            let a = angle_deg(center, t.start);
            assert!(
                (a - i as f32 * step).abs() < 0.01,
                "n={n} tick {i} at {a}"
            );
            assert_eq!(t.style, LineStyle::Solid);
        }
        // Last tick stays short of 360, so the 0° seam is not repeated.
        let last = angle_deg(center, ticks.last().unwrap().start);
        assert!(last < 360.0 - step / 2.0);
    }
}

#[test]
fn huge_division_counts_are_clamped() {
    let cap = MAX_DIVISIONS as usize;
    assert_eq!(division_angles(i32::MAX).count(), cap);
    assert_eq!(radial_ticks(Vec2::ZERO, 100.0, 2_000_000_000, 20.0).len(), cap);
    assert_eq!(radial_spokes(Vec2::ZERO, 100.0, 2_000_000_000).len(), cap);
    assert_eq!(radial_ticks(Vec2::ZERO, 100.0, MAX_DIVISIONS, 20.0).len(), cap);
}

#[test]
fn long_ticks_stop_at_the_center() {
    let ticks = radial_ticks(Vec2::ZERO, 10.0, 4, 25.0);
    for t in ticks {
        assert!(t.end.length() < EPS);
    }
}

#[test]
fn spokes_are_dashed_and_match_tick_angles() {
    let center = Vec2::new(50.0, 50.0);
    let spokes = radial_spokes(center, 40.0, 12);
    let ticks = radial_ticks(center, 40.0, 12, 5.0);
    assert_eq!(spokes.len(), 12);
    for (s, t) in spokes.iter().zip(&ticks) {
        assert_eq!(s.style, LineStyle::Dashed);
        assert_eq!(s.start, center);
        assert!(s.end.distance(t.start) < EPS);
    }
}

#[test]
fn full_viewport_cross_lines_span_edge_to_edge() {
    let viewport = Vec2::new(1920.0, 1080.0);
    let center = Vec2::new(960.0, 300.0);
    let segs = cross_lines(center, CrossLinesPolicy::FullViewport, viewport);
    assert_eq!(segs.len(), 2);
    assert_eq!(segs[0].start, Vec2::new(0.0, 300.0));
    assert_eq!(segs[0].end, Vec2::new(1920.0, 300.0));
    assert_eq!(segs[1].start, Vec2::new(960.0, 0.0));
    assert_eq!(segs[1].end, Vec2::new(960.0, 1080.0));
    assert!(segs.iter().all(|s| s.thickness == CROSS_THICKNESS));
}

#[test]
fn bounded_cross_lines_are_centered() {
    let center = Vec2::new(100.0, 100.0);
    let segs = cross_lines(
        center,
        CrossLinesPolicy::Bounded { arm_length: 50.0 },
        Vec2::new(1920.0, 1080.0),
    );
    assert_eq!(segs[0].start, Vec2::new(50.0, 100.0));
    assert_eq!(segs[0].end, Vec2::new(150.0, 100.0));
    assert_eq!(segs[1].start, Vec2::new(100.0, 50.0));
    assert_eq!(segs[1].end, Vec2::new(100.0, 150.0));
    for s in &segs {
        assert!(((s.start + s.end) / 2.0 - center).length() < EPS);
    }
}

#[test]
fn dash_pattern_covers_whole_dashes_and_a_short_tail() {
    let start = Vec2::ZERO;
    let end = Vec2::new(30.0, 0.0);
    let dashes = dash_pattern(start, end, 4.0, 4.0);
    // 0-4, 8-12, 16-20, 24-28 ; next run would start at 32.
    assert_eq!(dashes.len(), 4);
    assert_eq!(dashes[0], (Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0)));
    assert_eq!(dashes[3], (Vec2::new(24.0, 0.0), Vec2::new(28.0, 0.0)));

    let tail = dash_pattern(start, Vec2::new(26.0, 0.0), 4.0, 4.0);
    assert_eq!(tail.len(), 4);
    assert_eq!(tail[3], (Vec2::new(24.0, 0.0), Vec2::new(26.0, 0.0)));
}

#[test]
fn dash_pattern_total_length_is_bounded() {
    let start = Vec2::new(3.0, 7.0);
    for len in [1.0_f32, 7.5, 63.2, 100.0, 257.0] {
        let dir = Vec2::new(0.6, 0.8);
        let end = start + dir * len;
        let dashes = dash_pattern(start, end, 4.0, 4.0);
        let expected_runs = (len / 8.0).ceil() as usize;
        assert_eq!(dashes.len(), expected_runs, "len {len}");

        let total: f32 = dashes.iter().map(|(a, b)| a.distance(*b)).sum();
        assert!(total <= len + EPS, "len {len}: dashes sum to {total}");
        // All but the last dash are full length.
        for (a, b) in &dashes[..dashes.len() - 1] {
            assert!((a.distance(*b) - 4.0).abs() < EPS);
        }
        let (a, b) = dashes[dashes.len() - 1];
        assert!(a.distance(b) <= 4.0 + EPS);
        assert!(b.distance(end) <= 4.0 + EPS);
    }
}

#[test]
fn dash_pattern_is_deterministic() {
    let a = dash_pattern(Vec2::new(1.5, 2.5), Vec2::new(311.0, -97.25), 4.0, 4.0);
    let b = dash_pattern(Vec2::new(1.5, 2.5), Vec2::new(311.0, -97.25), 4.0, 4.0);
    assert_eq!(a, b);
}

#[test]
fn dash_pattern_rejects_degenerate_input() {
    assert!(dash_pattern(Vec2::ZERO, Vec2::ZERO, 4.0, 4.0).is_empty());
    assert!(dash_pattern(Vec2::ZERO, Vec2::X * 10.0, 0.0, 4.0).is_empty());
    assert!(dash_pattern(Vec2::ZERO, Vec2::X * 10.0, -1.0, 4.0).is_empty());
    // Zero gap draws back-to-back dashes.
    assert_eq!(dash_pattern(Vec2::ZERO, Vec2::X * 10.0, 4.0, 0.0).len(), 3);
}

#[test]
fn expand_dashes_keeps_solids_and_splits_dashed() {
    let solid = Segment::solid(Vec2::ZERO, Vec2::X * 10.0, 2.0);
    let dashed = Segment::dashed(Vec2::ZERO, Vec2::Y * 16.0, 1.0);
    let out = expand_dashes(&[solid, dashed], 4.0, 4.0);
    assert_eq!(out[0], solid);
    assert_eq!(out.len(), 3);
    assert!(out[1..]
        .iter()
        .all(|s| s.style == LineStyle::Solid && s.thickness == 1.0));
}

#[test]
fn center_mark_is_a_small_cross() {
    let c = Vec2::new(5.0, 5.0);
    let mark = center_mark(c);
    assert_eq!(mark.len(), 2);
    for s in &mark {
        assert!((s.length() - 16.0).abs() < EPS);
    }
}
