use crate::{
    draw::measure::{FontFace, TextMeasurer},
    draw::surface::{Align, DrawingSurface, Stroke, TextCell},
    foundation::core::{Rgb8, rect_xywh},
    foundation::error::{TimetableError, TimetableResult},
    layout::decorate::decorate,
    layout::geometry::{LayoutSettings, TableLayout, header_swatches},
    layout::labels::block_labels,
    schedule::model::{Palette, Timetable},
    schedule::time::compute_window,
};

const SWATCH_BORDER: Stroke = Stroke::new(Rgb8::BLACK, 0.1);
const TABLE_BORDER: Stroke = Stroke::new(Rgb8::BLACK, 0.2);

/// Lay out the whole page and draw it onto `surface`.
///
/// `persons` is the header order; lanes follow each day's own person order but are sized for
/// `persons.len()`, so every lane person must be listed there. Layout and palette problems are
/// reported before the first draw call.
#[tracing::instrument(
    skip_all,
    fields(days = timetable.len(), persons = persons.len(), notes = notes.len())
)]
pub fn render(
    timetable: &Timetable,
    persons: &[String],
    palette: &Palette,
    notes: &[String],
    settings: &LayoutSettings,
    measurer: &mut dyn TextMeasurer,
    surface: &mut dyn DrawingSurface,
) -> TimetableResult<()> {
    let geometry = &settings.geometry;
    let typography = &settings.typography;
    geometry.validate()?;

    let swatches = header_swatches(geometry, persons.len())?;
    let header_colors = persons
        .iter()
        .map(|p| palette.lookup(p))
        .collect::<TimetableResult<Vec<_>>>()?;

    if timetable.is_empty() {
        return Err(TimetableError::invalid_layout("timetable has no days"));
    }
    let window = compute_window(timetable);
    let table = TableLayout::compute(geometry, timetable.len(), persons.len(), window)?;
    for day in timetable.days() {
        if day.persons().len() > persons.len() {
            return Err(TimetableError::invalid_layout(format!(
                "day '{}' has {} lanes but the table has room for {}",
                day.label(),
                day.persons().len(),
                persons.len()
            )));
        }
        for lane in day.persons() {
            palette.lookup(&lane.person)?;
            if !persons.contains(&lane.person) {
                return Err(TimetableError::invalid_layout(format!(
                    "'{}' has a lane on '{}' but is not in the person list",
                    lane.person,
                    day.label()
                )));
            }
        }
    }
    tracing::debug!(
        window_from = window.from,
        window_to = window.to,
        lane_width = table.lane_width(),
        units_per_minute = table.units_per_minute(),
        "computed table layout"
    );

    for ((person, rect), color) in persons.iter().zip(&swatches).zip(&header_colors) {
        surface.draw_rect(*rect, Some(*color), Some(SWATCH_BORDER))?;
        surface.draw_text_cell(&TextCell {
            rect: *rect,
            text: person.clone(),
            color: Rgb8::WHITE,
            font: FontFace::Regular,
            size_pt: typography.heading_pt,
            align: Align::Center,
            fill: None,
        })?;
    }

    for (day, column) in timetable.days().iter().zip(table.columns()) {
        surface.draw_rect(column.header, Some(Rgb8::LIGHT_GREY), Some(TABLE_BORDER))?;
        surface.draw_text_cell(&TextCell {
            rect: column.header,
            text: day.label().to_owned(),
            color: Rgb8::BLACK,
            font: FontFace::Regular,
            size_pt: typography.heading_pt,
            align: Align::Center,
            fill: None,
        })?;
        surface.draw_rect(column.body, None, Some(TABLE_BORDER))?;

        for (lane, schedule) in day.persons().iter().enumerate() {
            let color = palette.lookup(&schedule.person)?;
            for entry in &schedule.entries {
                let block = table.block_rect(column, lane, entry);
                surface.draw_rect(block, Some(color), None)?;
                if let Some(decoration) = decorate(block, entry.kind()) {
                    for line in decoration.lines {
                        surface.draw_line(line, decoration.stroke)?;
                    }
                }
                for cell in block_labels(entry, block, color, typography, measurer)? {
                    surface.draw_text_cell(&cell)?;
                }
            }
        }
    }

    let mut y = geometry.notes_top();
    for note in notes {
        y += geometry.note_line_height;
        surface.draw_text_cell(&TextCell {
            rect: rect_xywh(geometry.margin, y, geometry.content_width(), 0.0),
            text: note.clone(),
            color: Rgb8::BLACK,
            font: FontFace::Regular,
            size_pt: typography.heading_pt,
            align: Align::Left,
            fill: None,
        })?;
    }

    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/layout/engine.rs"]
mod tests;
