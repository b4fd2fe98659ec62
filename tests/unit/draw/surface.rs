use super::*;
use crate::foundation::core::{Point, rect_xywh};

fn cell(text: &str) -> TextCell {
    TextCell {
        rect: rect_xywh(0.0, 0.0, 10.0, 4.0),
        text: text.to_string(),
        color: Rgb8::WHITE,
        font: FontFace::Condensed,
        size_pt: 6.5,
        align: Align::Center,
        fill: Some(Rgb8::BLACK),
    }
}

#[test]
fn draw_list_records_in_call_order() {
    let mut list = DrawList::new();
    list.draw_rect(rect_xywh(1.0, 2.0, 3.0, 4.0), Some(Rgb8::BLACK), None)
        .unwrap();
    list.draw_line(
        Line::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0)),
        Stroke::new(Rgb8::WHITE, 0.2),
    )
    .unwrap();
    list.draw_text_cell(&cell("SOCCER")).unwrap();

    assert_eq!(list.len(), 3);
    assert!(matches!(list.ops()[0], DrawOp::Rect { .. }));
    assert!(matches!(list.ops()[1], DrawOp::Line { .. }));
    assert_eq!(list.texts().map(|c| c.text.as_str()).collect::<Vec<_>>(), ["SOCCER"]);
    assert_eq!(list.lines().count(), 1);
}

#[test]
fn finish_emits_tagged_json() {
    let mut list = DrawList::new();
    list.draw_rect(rect_xywh(1.0, 2.0, 3.0, 4.0), None, Some(Stroke::new(Rgb8::BLACK, 0.2)))
        .unwrap();
    list.draw_text_cell(&cell("A")).unwrap();

    let bytes = list.finish().unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let ops = json.as_array().unwrap();
    assert_eq!(ops.len(), 2);
    assert_eq!(ops[0]["op"], "rect");
    assert!(ops[0]["fill"].is_null());
    assert_eq!(ops[0]["stroke"]["width"], 0.2);
    assert_eq!(ops[1]["op"], "text");
    assert_eq!(ops[1]["font"], "condensed");
    assert_eq!(ops[1]["align"], "center");
}

#[test]
fn replay_reproduces_the_list() {
    let mut list = DrawList::new();
    list.draw_rect(rect_xywh(0.0, 0.0, 5.0, 5.0), Some(Rgb8::LIGHT_GREY), None)
        .unwrap();
    list.draw_text_cell(&cell("X")).unwrap();

    let mut copy = DrawList::new();
    list.replay(&mut copy).unwrap();
    assert_eq!(copy.ops(), list.ops());
}
