use crate::{
    foundation::core::{Rect, rect_xywh},
    foundation::error::{TimetableError, TimetableResult},
    schedule::model::ActivityEntry,
    schedule::time::TimeWindow,
};

/// Horizontal space a column keeps free around its lanes.
const LANE_PADDING: f64 = 2.0;
/// Offset of the first lane from the column's left edge.
const LANE_INSET: f64 = 0.5;
/// Gap between neighbouring lanes.
const LANE_GAP: f64 = 0.5;
/// Offset of the lane area below the top of the body cell.
const BODY_INSET: f64 = 0.8;
/// Offset of both block edges below their scaled time position.
const BLOCK_INSET: f64 = 0.4;
/// Vertical space of the body cell not used by the time scale.
const SCALE_PADDING: f64 = 2.0;
/// The table overlaps its band by this much at the bottom.
const TABLE_OVERHANG: f64 = 1.0;

/// Fixed page geometry, in page units (millimetres).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PageGeometry {
    pub page_width: f64,
    pub page_height: f64,
    pub margin: f64,
    pub header_band_height: f64,
    pub notes_band_height: f64,
    pub swatch_height: f64,
    /// Absolute page y of the table's top edge.
    pub table_top: f64,
    pub day_header_height: f64,
    pub note_line_height: f64,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            page_width: 297.0,
            page_height: 210.0,
            margin: 10.0,
            header_band_height: 30.0,
            notes_band_height: 17.0,
            swatch_height: 7.0,
            table_top: 30.0,
            day_header_height: 7.0,
            note_line_height: 5.0,
        }
    }
}

impl PageGeometry {
    pub fn content_width(&self) -> f64 {
        self.page_width - 2.0 * self.margin
    }

    pub fn content_height(&self) -> f64 {
        self.page_height - 2.0 * self.margin
    }

    pub fn table_band_height(&self) -> f64 {
        self.content_height() - self.header_band_height - self.notes_band_height
    }

    /// Page y where the notes band starts.
    pub fn notes_top(&self) -> f64 {
        self.margin + self.header_band_height + self.table_band_height()
    }

    pub fn validate(&self) -> TimetableResult<()> {
        let dims = [
            ("page_width", self.page_width),
            ("page_height", self.page_height),
            ("swatch_height", self.swatch_height),
            ("day_header_height", self.day_header_height),
        ];
        for (name, v) in dims {
            if !v.is_finite() || v <= 0.0 {
                return Err(TimetableError::invalid_layout(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        if self.content_width() <= 0.0 {
            return Err(TimetableError::invalid_layout(
                "margins leave no content width",
            ));
        }
        if self.table_band_height() + TABLE_OVERHANG - self.day_header_height <= SCALE_PADDING {
            return Err(TimetableError::invalid_layout(
                "table band leaves no room for the time axis",
            ));
        }
        Ok(())
    }
}

/// Font sizes in points.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Typography {
    /// Person swatches, day headers and notes.
    pub heading_pt: f64,
    /// Activity names and components.
    pub label_pt: f64,
    /// Start and end times.
    pub time_pt: f64,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            heading_pt: 12.0,
            label_pt: 6.5,
            time_pt: 7.0,
        }
    }
}

/// Everything the layout engine needs besides the schedule itself.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub geometry: PageGeometry,
    pub typography: Typography,
}

/// One swatch per person across the content width.
pub fn header_swatches(geometry: &PageGeometry, person_count: usize) -> TimetableResult<Vec<Rect>> {
    if person_count == 0 {
        return Err(TimetableError::invalid_layout(
            "header needs at least one person",
        ));
    }
    let width = geometry.content_width() / person_count as f64;
    Ok((0..person_count)
        .map(|i| {
            rect_xywh(
                geometry.margin + width * i as f64,
                geometry.margin,
                width,
                geometry.swatch_height,
            )
        })
        .collect())
}

/// Header and body cell of one day column.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ColumnLayout {
    pub header: Rect,
    pub body: Rect,
}

/// Resolved table geometry shared by every column.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TableLayout {
    columns: Vec<ColumnLayout>,
    lane_width: f64,
    units_per_minute: f64,
    area_top: f64,
    window: TimeWindow,
}

impl TableLayout {
    /// Split the table band into `day_count` columns with lanes sized for `person_count`.
    pub fn compute(
        geometry: &PageGeometry,
        day_count: usize,
        person_count: usize,
        window: TimeWindow,
    ) -> TimetableResult<Self> {
        if day_count == 0 {
            return Err(TimetableError::invalid_layout("table needs at least one day"));
        }
        if person_count == 0 {
            return Err(TimetableError::invalid_layout(
                "table needs at least one person",
            ));
        }
        let span = window.span()?;

        let column_width = geometry.content_width() / day_count as f64;
        let lane_width = (column_width - LANE_PADDING) / person_count as f64;
        if lane_width <= 0.0 {
            return Err(TimetableError::invalid_layout(format!(
                "{day_count} days leave no room for lanes"
            )));
        }

        let table_height = geometry.table_band_height() + TABLE_OVERHANG;
        let body_top = geometry.table_top + geometry.day_header_height;
        let body_height = table_height - geometry.day_header_height;

        let columns = (0..day_count)
            .map(|i| {
                let x = geometry.margin + column_width * i as f64;
                ColumnLayout {
                    header: rect_xywh(
                        x,
                        geometry.table_top,
                        column_width,
                        geometry.day_header_height,
                    ),
                    body: rect_xywh(x, body_top, column_width, body_height),
                }
            })
            .collect();

        Ok(Self {
            columns,
            lane_width,
            units_per_minute: (body_height - SCALE_PADDING) / f64::from(span),
            area_top: body_top + BODY_INSET,
            window,
        })
    }

    pub fn columns(&self) -> &[ColumnLayout] {
        &self.columns
    }

    /// Lane width; identical for every day since it divides by the global person count.
    pub fn lane_width(&self) -> f64 {
        self.lane_width
    }

    pub fn units_per_minute(&self) -> f64 {
        self.units_per_minute
    }

    pub fn window(&self) -> TimeWindow {
        self.window
    }

    /// Left edge of lane `lane` within `column`.
    pub fn lane_x(&self, column: &ColumnLayout, lane: usize) -> f64 {
        let i = lane as f64;
        column.body.x0 + self.lane_width * i + LANE_GAP * i + LANE_INSET
    }

    /// Page y of a minutes-of-day value on the shared vertical scale.
    ///
    /// Includes [`BLOCK_INSET`] on both block edges, so a block's height is exactly
    /// `units_per_minute * duration` and its bottom sits 0.4 lower than it would if only the
    /// top were inset.
    pub fn minute_y(&self, minutes: u32) -> f64 {
        let offset = f64::from(minutes) - f64::from(self.window.from);
        self.area_top + self.units_per_minute * offset + BLOCK_INSET
    }

    /// Block of `entry` in lane `lane`; both edges come from [`Self::minute_y`].
    pub fn block_rect(&self, column: &ColumnLayout, lane: usize, entry: &ActivityEntry) -> Rect {
        let x = self.lane_x(column, lane);
        Rect::new(
            x,
            self.minute_y(entry.from()),
            x + self.lane_width,
            self.minute_y(entry.to()),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/geometry.rs"]
mod tests;
