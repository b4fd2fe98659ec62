//! Family timetable renders a weekly family activity schedule into a single-page timetable.
//!
//! # Pipeline overview
//!
//! 1. **Parse**: markdown-like source text -> [`SourceDocument`] (timetable, persons, palette, notes)
//! 2. **Lay out**: [`render`] turns the timetable into absolute page geometry: one column per
//!    day, one lane per person, time-proportional blocks with decorations and labels
//! 3. **Draw**: the layout is recorded as a [`DrawList`] and replayed onto a [`DrawingSurface`]
//!    ([`PdfSurface`], [`SvgSurface`], [`PngSurface`])
//!
//! [`render_file`] runs all three steps from a source path to a written document.
//!
//! Page coordinates are millimetres on an A4 landscape page with the origin at the top-left.
#![forbid(unsafe_code)]

mod draw;
mod foundation;
mod layout;
mod output;
mod pipeline;
mod schedule;

pub use draw::measure::{
    EstimatedMeasurer, FontFace, FontMeasurer, ShapedGlyph, ShapedRun, ShapedText, TextMeasurer,
    TextSize,
};
pub use draw::surface::{Align, DrawList, DrawOp, DrawingSurface, Stroke, TextCell};
pub use foundation::core::{Line, Point, Rect, Rgb8, UNITS_PER_PT, rect_xywh};
pub use foundation::error::{TimetableError, TimetableResult};
pub use layout::decorate::{Decoration, decorate};
pub use layout::engine::render;
pub use layout::geometry::{
    ColumnLayout, LayoutSettings, PageGeometry, TableLayout, Typography, header_swatches,
};
pub use layout::labels::{block_labels, label_lines};
pub use output::pdf::PdfSurface;
pub use output::raster::PngSurface;
pub use output::svg::{FontFamilies, SvgSurface};
pub use pipeline::document::{render_document, render_file};
pub use pipeline::settings::{FontFiles, RenderSettings};
pub use pipeline::{OutputFormat, create_measurer, create_surface};
pub use schedule::model::{
    ActivityEntry, ActivityKind, DaySchedule, Palette, PersonSchedule, Timetable,
};
pub use schedule::source::{SourceDocument, parse_entry};
pub use schedule::time::{END_OF_DAY, TimeWindow, compute_window, minutes_to_time, to_minutes};
