use crate::{
    draw::measure::{FontFace, TextMeasurer},
    draw::surface::{Align, TextCell},
    foundation::core::{Rect, Rgb8, rect_xywh},
    foundation::error::TimetableResult,
    layout::geometry::Typography,
    schedule::model::ActivityEntry,
    schedule::time::minutes_to_time,
};

/// Extra height added below each measured line of the label stack.
const STACK_LEADING: f64 = 1.0;
/// Time labels sit this far outside the block edge they belong to.
const TIME_NUDGE: f64 = 1.0;

/// Upper-cased name followed by the upper-cased components.
pub fn label_lines(entry: &ActivityEntry) -> Vec<String> {
    entry
        .name()
        .into_iter()
        .chain(entry.components().iter().map(String::as_str))
        .map(str::to_uppercase)
        .collect()
}

/// Text cells for one block: the centered label stack, then the start and end times.
pub fn block_labels(
    entry: &ActivityEntry,
    block: Rect,
    color: Rgb8,
    typography: &Typography,
    measurer: &mut dyn TextMeasurer,
) -> TimetableResult<Vec<TextCell>> {
    let cell = |rect: Rect, text: String, font: FontFace, size_pt: f64, align: Align| TextCell {
        rect,
        text,
        color: Rgb8::WHITE,
        font,
        size_pt,
        align,
        fill: Some(color),
    };

    let (x, y) = (block.x0, block.y0);
    let (w, h) = (block.width(), block.height());
    let mut cells = Vec::new();

    let lines = label_lines(entry);
    if !lines.is_empty() {
        let mut measured = Vec::with_capacity(lines.len());
        for line in lines {
            let size = measurer.measure(&line, FontFace::Condensed, typography.label_pt)?;
            measured.push((line, size.height + STACK_LEADING));
        }
        let total: f64 = measured.iter().map(|(_, lh)| lh).sum();

        let mut top = y + (h - total) / 2.0;
        for (line, line_height) in measured {
            cells.push(cell(
                rect_xywh(x, top, w, line_height),
                line,
                FontFace::Condensed,
                typography.label_pt,
                Align::Center,
            ));
            top += line_height;
        }
    }

    let from = minutes_to_time(entry.from());
    let th = measurer
        .measure(&from, FontFace::Italic, typography.time_pt)?
        .height;
    cells.push(cell(
        rect_xywh(x, y - TIME_NUDGE, w / 2.0, th),
        from,
        FontFace::Italic,
        typography.time_pt,
        Align::Left,
    ));

    let to = minutes_to_time(entry.to());
    let th = measurer.measure(&to, FontFace::Italic, typography.time_pt)?.height;
    cells.push(cell(
        rect_xywh(x + w / 2.0, y + h - th + TIME_NUDGE, w / 2.0, th),
        to,
        FontFace::Italic,
        typography.time_pt,
        Align::Right,
    ));

    Ok(cells)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/labels.rs"]
mod tests;
