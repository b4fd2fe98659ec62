use crate::{
    draw::measure::FontFace,
    foundation::core::{Line, Rect, Rgb8},
    foundation::error::{TimetableError, TimetableResult},
};

/// Outline color and width in page units.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Stroke {
    pub color: Rgb8,
    pub width: f64,
}

impl Stroke {
    pub const fn new(color: Rgb8, width: f64) -> Self {
        Self { color, width }
    }
}

/// Horizontal text alignment inside a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Single line of text placed in a rectangle, optionally on a filled background.
///
/// The text is vertically centered on the cell; a zero-height cell centers on its top edge.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TextCell {
    pub rect: Rect,
    pub text: String,
    pub color: Rgb8,
    pub font: FontFace,
    pub size_pt: f64,
    pub align: Align,
    pub fill: Option<Rgb8>,
}

/// Output target for the layout engine. All coordinates are absolute page units
/// with the origin at the top-left corner of the page.
pub trait DrawingSurface {
    fn draw_rect(
        &mut self,
        rect: Rect,
        fill: Option<Rgb8>,
        stroke: Option<Stroke>,
    ) -> TimetableResult<()>;

    fn draw_line(&mut self, line: Line, stroke: Stroke) -> TimetableResult<()>;

    fn draw_text_cell(&mut self, cell: &TextCell) -> TimetableResult<()>;

    /// Serialize everything drawn so far into the surface's document format.
    fn finish(&mut self) -> TimetableResult<Vec<u8>>;
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
/// Draw command recorded by a [`DrawList`].
pub enum DrawOp {
    Rect {
        rect: Rect,
        fill: Option<Rgb8>,
        stroke: Option<Stroke>,
    },
    Line {
        line: Line,
        stroke: Stroke,
    },
    Text(TextCell),
}

/// Recording surface; `finish` yields the display list as JSON.
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    ops: Vec<DrawOp>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextCell> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text(cell) => Some(cell),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = (&Line, &Stroke)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Line { line, stroke } => Some((line, stroke)),
            _ => None,
        })
    }

    /// Replay every recorded op, in order, onto another surface.
    pub fn replay(&self, target: &mut dyn DrawingSurface) -> TimetableResult<()> {
        for op in &self.ops {
            match op {
                DrawOp::Rect { rect, fill, stroke } => target.draw_rect(*rect, *fill, *stroke)?,
                DrawOp::Line { line, stroke } => target.draw_line(*line, *stroke)?,
                DrawOp::Text(cell) => target.draw_text_cell(cell)?,
            }
        }
        Ok(())
    }
}

impl DrawingSurface for DrawList {
    fn draw_rect(
        &mut self,
        rect: Rect,
        fill: Option<Rgb8>,
        stroke: Option<Stroke>,
    ) -> TimetableResult<()> {
        self.ops.push(DrawOp::Rect { rect, fill, stroke });
        Ok(())
    }

    fn draw_line(&mut self, line: Line, stroke: Stroke) -> TimetableResult<()> {
        self.ops.push(DrawOp::Line { line, stroke });
        Ok(())
    }

    fn draw_text_cell(&mut self, cell: &TextCell) -> TimetableResult<()> {
        self.ops.push(DrawOp::Text(cell.clone()));
        Ok(())
    }

    fn finish(&mut self) -> TimetableResult<Vec<u8>> {
        serde_json::to_vec_pretty(&self.ops).map_err(|e| TimetableError::serde(e.to_string()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/draw/surface.rs"]
mod tests;
