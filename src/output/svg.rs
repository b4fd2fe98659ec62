use std::fmt::Write as _;

use anyhow::Context;

use crate::{
    draw::measure::FontFace,
    draw::surface::{Align, DrawingSurface, Stroke, TextCell},
    foundation::core::{Line, Rect, Rgb8, UNITS_PER_PT},
    foundation::error::TimetableResult,
    layout::geometry::PageGeometry,
};

/// Horizontal padding between a cell edge and left/right aligned text.
pub(crate) const CELL_PADDING: f64 = 1.0;

/// `font-family` values written for each face.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontFamilies {
    pub regular: String,
    pub condensed: String,
    pub italic: String,
}

impl Default for FontFamilies {
    fn default() -> Self {
        Self {
            regular: "sans-serif".to_owned(),
            condensed: "sans-serif".to_owned(),
            italic: "sans-serif".to_owned(),
        }
    }
}

impl FontFamilies {
    fn family(&self, font: FontFace) -> &str {
        match font {
            FontFace::Regular => &self.regular,
            FontFace::Condensed => &self.condensed,
            FontFace::Italic => &self.italic,
        }
    }
}

fn face_attrs(font: FontFace) -> &'static str {
    match font {
        FontFace::Regular => r#"font-weight="bold""#,
        FontFace::Condensed => r#"font-stretch="condensed""#,
        FontFace::Italic => r#"font-weight="bold" font-style="italic" font-stretch="condensed""#,
    }
}

pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

/// Writes a standalone SVG document in page units (millimetres).
#[derive(Clone, Debug)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    families: FontFamilies,
    body: String,
}

impl SvgSurface {
    pub fn new(geometry: &PageGeometry) -> Self {
        Self::with_families(geometry, FontFamilies::default())
    }

    pub fn with_families(geometry: &PageGeometry, families: FontFamilies) -> Self {
        Self {
            width: geometry.page_width,
            height: geometry.page_height,
            families,
            body: String::new(),
        }
    }

    pub fn page_size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Full document text drawn so far.
    pub fn document(&self) -> String {
        format!(
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}mm" height="{h}mm" viewBox="0 0 {w} {h}">"#,
                "\n{body}</svg>\n"
            ),
            w = self.width,
            h = self.height,
            body = self.body,
        )
    }

    fn stroke_attrs(stroke: Option<Stroke>) -> String {
        match stroke {
            Some(s) => format!(
                r#"stroke="{}" stroke-width="{:.3}""#,
                s.color.to_hex(),
                s.width
            ),
            None => r#"stroke="none""#.to_owned(),
        }
    }

    fn fill_attr(fill: Option<Rgb8>) -> String {
        match fill {
            Some(c) => format!(r#"fill="{}""#, c.to_hex()),
            None => r#"fill="none""#.to_owned(),
        }
    }
}

impl DrawingSurface for SvgSurface {
    fn draw_rect(
        &mut self,
        rect: Rect,
        fill: Option<Rgb8>,
        stroke: Option<Stroke>,
    ) -> TimetableResult<()> {
        writeln!(
            self.body,
            r#"<rect x="{:.3}" y="{:.3}" width="{:.3}" height="{:.3}" {} {}/>"#,
            rect.x0,
            rect.y0,
            rect.width(),
            rect.height(),
            Self::fill_attr(fill),
            Self::stroke_attrs(stroke),
        )
        .context("write svg rect")?;
        Ok(())
    }

    fn draw_line(&mut self, line: Line, stroke: Stroke) -> TimetableResult<()> {
        writeln!(
            self.body,
            r#"<line x1="{:.3}" y1="{:.3}" x2="{:.3}" y2="{:.3}" {} stroke-linecap="butt"/>"#,
            line.p0.x,
            line.p0.y,
            line.p1.x,
            line.p1.y,
            Self::stroke_attrs(Some(stroke)),
        )
        .context("write svg line")?;
        Ok(())
    }

    fn draw_text_cell(&mut self, cell: &TextCell) -> TimetableResult<()> {
        if cell.fill.is_some() {
            self.draw_rect(cell.rect, cell.fill, None)?;
        }

        let (x, anchor) = match cell.align {
            Align::Left => (cell.rect.x0 + CELL_PADDING, "start"),
            Align::Center => ((cell.rect.x0 + cell.rect.x1) / 2.0, "middle"),
            Align::Right => (cell.rect.x1 - CELL_PADDING, "end"),
        };
        let y = (cell.rect.y0 + cell.rect.y1) / 2.0;

        writeln!(
            self.body,
            r#"<text x="{:.3}" y="{:.3}" font-family="{}" {} font-size="{:.3}" text-anchor="{}" dominant-baseline="central" fill="{}">{}</text>"#,
            x,
            y,
            escape_xml(self.families.family(cell.font)),
            face_attrs(cell.font),
            cell.size_pt * UNITS_PER_PT,
            anchor,
            cell.color.to_hex(),
            escape_xml(&cell.text),
        )
        .context("write svg text")?;
        Ok(())
    }

    fn finish(&mut self) -> TimetableResult<Vec<u8>> {
        Ok(self.document().into_bytes())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/output/svg.rs"]
mod tests;
