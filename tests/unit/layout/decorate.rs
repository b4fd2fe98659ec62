use super::*;
use crate::foundation::core::rect_xywh;

const EPS: f64 = 1e-9;

fn lane_block() -> Rect {
    rect_xywh(10.5, 40.0, 9.39, 30.0)
}

fn assert_inside(rect: Rect, lines: &[Line]) {
    for line in lines {
        for p in [line.p0, line.p1] {
            assert!(p.x >= rect.x0 - EPS && p.x <= rect.x1 + EPS, "{p:?} outside {rect:?}");
            assert!(p.y >= rect.y0 - EPS && p.y <= rect.y1 + EPS, "{p:?} outside {rect:?}");
        }
    }
}

#[test]
fn normal_blocks_have_no_overlay() {
    assert_eq!(decorate(lane_block(), ActivityKind::Normal), None);
}

#[test]
fn lane_sized_block_segment_counts() {
    let hatched = decorate(lane_block(), ActivityKind::DiagonalHatched).unwrap();
    let double = decorate(lane_block(), ActivityKind::DoubleCorner).unwrap();
    let empty = decorate(lane_block(), ActivityKind::EmptyCorner).unwrap();

    assert_eq!(hatched.lines.len(), 4);
    assert_eq!(double.lines.len(), 8);
    assert_eq!(empty.lines.len(), 18);
    assert!(hatched.lines.len() < empty.lines.len());
}

#[test]
fn strokes_are_white_with_pattern_widths() {
    let cases = [
        (ActivityKind::DiagonalHatched, 0.2),
        (ActivityKind::DoubleCorner, 0.3),
        (ActivityKind::EmptyCorner, 0.2),
    ];
    for (kind, width) in cases {
        let deco = decorate(lane_block(), kind).unwrap();
        assert_eq!(deco.stroke.color, Rgb8::WHITE);
        assert_eq!(deco.stroke.width, width);
    }
}

#[test]
fn every_segment_stays_inside_the_block() {
    for rect in [lane_block(), rect_xywh(0.0, 0.0, 40.0, 30.0), rect_xywh(5.0, 5.0, 3.0, 50.0)] {
        for kind in [
            ActivityKind::DiagonalHatched,
            ActivityKind::DoubleCorner,
            ActivityKind::EmptyCorner,
        ] {
            let deco = decorate(rect, kind).unwrap();
            assert_inside(rect, &deco.lines);
        }
    }
}

#[test]
fn hatching_grows_with_block_width() {
    let deco = decorate(rect_xywh(0.0, 0.0, 40.0, 30.0), ActivityKind::DiagonalHatched).unwrap();
    assert_eq!(deco.lines.len(), 28);

    let first = deco.lines[0];
    assert_eq!(first.p0, Point::new(3.0, 0.0));
    assert_eq!(first.p1, Point::new(0.0, 2.25));
    let second = deco.lines[1];
    assert_eq!(second.p0, Point::new(37.0, 30.0));
    assert_eq!(second.p1, Point::new(40.0, 27.75));
}

#[test]
fn corner_patterns_ignore_block_size() {
    let big = rect_xywh(0.0, 0.0, 100.0, 100.0);
    assert_eq!(decorate(big, ActivityKind::DoubleCorner).unwrap().lines.len(), 8);
    assert_eq!(decorate(big, ActivityKind::EmptyCorner).unwrap().lines.len(), 18);

    let double = decorate(big, ActivityKind::DoubleCorner).unwrap();
    assert_eq!(double.lines[0].p0, Point::new(2.0, 100.0));
    assert_eq!(double.lines[0].p1, Point::new(0.0, 98.0));
    assert_eq!(double.lines[1].p0, Point::new(98.0, 0.0));
    assert_eq!(double.lines[1].p1, Point::new(100.0, 2.0));
}

#[test]
fn cursors_leaving_the_block_emit_nothing() {
    let tiny = rect_xywh(0.0, 0.0, 1.0, 1.0);
    assert!(decorate(tiny, ActivityKind::DoubleCorner).unwrap().lines.is_empty());
    assert!(decorate(tiny, ActivityKind::EmptyCorner).unwrap().lines.is_empty());
    assert!(decorate(tiny, ActivityKind::DiagonalHatched).unwrap().lines.is_empty());
}

#[test]
fn degenerate_blocks_yield_empty_decorations() {
    for rect in [
        rect_xywh(0.0, 0.0, 0.0, 10.0),
        rect_xywh(0.0, 0.0, 10.0, 0.0),
        rect_xywh(f64::NAN, 0.0, 10.0, 10.0),
        Rect::new(0.0, 0.0, f64::INFINITY, 10.0),
    ] {
        let deco = decorate(rect, ActivityKind::DiagonalHatched).unwrap();
        assert!(deco.lines.is_empty());
    }
}
