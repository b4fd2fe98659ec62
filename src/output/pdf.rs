use std::collections::BTreeMap;

use pdf_writer::{
    Content, Name, Pdf, Rect as PdfRect, Ref, Str,
    types::{CidFontType, FontFlags, SystemInfo, UnicodeCmap},
};

use crate::{
    draw::measure::{EstimatedMeasurer, FontFace, FontMeasurer, ShapedRun},
    draw::surface::{Align, DrawingSurface, Stroke, TextCell},
    foundation::core::{Line, Rect, Rgb8, UNITS_PER_PT},
    foundation::error::{TimetableError, TimetableResult},
    layout::geometry::PageGeometry,
    output::svg::CELL_PADDING,
};

const CATALOG_ID: Ref = Ref::new(1);
const PAGES_ID: Ref = Ref::new(2);
const PAGE_ID: Ref = Ref::new(3);
const CONTENT_ID: Ref = Ref::new(4);
/// Embedded faces take five objects each, after the standard font slots.
const FIRST_EMBEDDED_ID: Ref = Ref::new(8);

/// Baseline offset below a cell's vertical center, in ems.
const BASELINE_SHIFT_EM: f32 = 0.3;

struct FontResource {
    id: Ref,
    resource: &'static [u8],
    base_font: &'static [u8],
}

const FONTS: [FontResource; 3] = [
    FontResource {
        id: Ref::new(5),
        resource: b"F1",
        base_font: b"Helvetica-Bold",
    },
    FontResource {
        id: Ref::new(6),
        resource: b"F2",
        base_font: b"Helvetica",
    },
    FontResource {
        id: Ref::new(7),
        resource: b"F3",
        base_font: b"Helvetica-BoldOblique",
    },
];

fn resource_name(face: FontFace) -> &'static [u8] {
    let idx = match face {
        FontFace::Regular => 0,
        FontFace::Condensed => 1,
        FontFace::Italic => 2,
    };
    FONTS[idx].resource
}

/// WinAnsi code for `c`, if the standard fonts can show it.
fn win_ansi_byte(c: char) -> Option<u8> {
    let code = u32::from(c);
    if matches!(code, 0x20..=0x7e | 0xa0..=0xff) {
        return u8::try_from(code).ok();
    }
    let byte = match c {
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8a,
        '‹' => 0x8b,
        'Œ' => 0x8c,
        'Ž' => 0x8e,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9a,
        '›' => 0x9b,
        'œ' => 0x9c,
        'ž' => 0x9e,
        'Ÿ' => 0x9f,
        _ => return None,
    };
    Some(byte)
}

/// Encode text for the standard fonts; anything WinAnsi cannot represent is an error.
fn win_ansi(text: &str) -> TimetableResult<Vec<u8>> {
    text.chars()
        .map(|c| {
            win_ansi_byte(c).ok_or_else(|| {
                TimetableError::validation(format!(
                    "character {c:?} in {text:?} has no WinAnsi code; \
                     configure font files to embed them in the PDF"
                ))
            })
        })
        .collect()
}

fn pt(units: f64) -> f32 {
    (units / UNITS_PER_PT) as f32
}

/// Left edge of a cell's text run given its measured width.
fn aligned_x(cell: &TextCell, width: f64) -> f64 {
    match cell.align {
        Align::Left => cell.rect.x0 + CELL_PADDING,
        Align::Center => (cell.rect.x0 + cell.rect.x1 - width) / 2.0,
        Align::Right => cell.rect.x1 - CELL_PADDING - width,
    }
}

const IDENTITY: SystemInfo<'static> = SystemInfo {
    registry: Str(b"Adobe"),
    ordering: Str(b"Identity"),
    supplement: 0,
};

/// A TrueType font that glyphs were shown from, with what it needs once embedded.
///
/// Widths and ToUnicode entries are in glyph space (1000 units per em).
struct EmbeddedFace {
    font: parley::FontData,
    resource: String,
    base_font: String,
    widths: BTreeMap<u16, f32>,
    unicode: BTreeMap<u16, String>,
    ascent: f32,
    descent: f32,
}

struct EmbeddedFonts {
    measurer: FontMeasurer,
    faces: Vec<EmbeddedFace>,
}

impl EmbeddedFonts {
    fn face_index(&mut self, run: &ShapedRun, face: FontFace) -> TimetableResult<usize> {
        let key = (run.font.data.id(), run.font.index);
        if let Some(idx) = self
            .faces
            .iter()
            .position(|f| (f.font.data.id(), f.font.index) == key)
        {
            return Ok(idx);
        }
        if run.font.index != 0 {
            return Err(TimetableError::validation(format!(
                "font #{} of a collection cannot be embedded; use a single-font file",
                run.font.index
            )));
        }

        let resource = format!("E{}", self.faces.len() + 1);
        let family: String = self
            .measurer
            .family(face)
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect();
        let scale = 1000.0 / run.size_pt;
        self.faces.push(EmbeddedFace {
            font: run.font.clone(),
            base_font: format!("{family}-{resource}"),
            resource,
            widths: BTreeMap::new(),
            unicode: BTreeMap::new(),
            ascent: run.ascent * scale,
            descent: run.descent * scale,
        });
        Ok(self.faces.len() - 1)
    }
}

enum PdfFonts {
    /// Standard Helvetica faces, WinAnsi text, estimated widths.
    Standard,
    /// TrueType faces shaped by the configured measurer and embedded as CID fonts.
    Embedded(Box<EmbeddedFonts>),
}

struct FaceIds {
    type0: Ref,
    cid: Ref,
    descriptor: Ref,
    file: Ref,
    cmap: Ref,
}

impl FaceIds {
    fn alloc(next: &mut Ref) -> Self {
        Self {
            type0: next.bump(),
            cid: next.bump(),
            descriptor: next.bump(),
            file: next.bump(),
            cmap: next.bump(),
        }
    }
}

fn write_embedded_face(pdf: &mut Pdf, face: &EmbeddedFace, ids: &FaceIds) {
    let base_font = Name(face.base_font.as_bytes());

    pdf.type0_font(ids.type0)
        .base_font(base_font)
        .encoding_predefined(Name(b"Identity-H"))
        .descendant_font(ids.cid)
        .to_unicode(ids.cmap);

    {
        let mut cid = pdf.cid_font(ids.cid);
        cid.subtype(CidFontType::Type2)
            .base_font(base_font)
            .system_info(IDENTITY)
            .font_descriptor(ids.descriptor)
            .default_width(0.0)
            .cid_to_gid_map_predefined(Name(b"Identity"));
        let mut widths = cid.widths();
        for (&id, &width) in &face.widths {
            widths.consecutive(id, [width]);
        }
    }

    let max_width = face.widths.values().copied().fold(1000.0f32, f32::max);
    pdf.font_descriptor(ids.descriptor)
        .name(base_font)
        .flags(FontFlags::NON_SYMBOLIC)
        .bbox(PdfRect::new(0.0, -face.descent, max_width, face.ascent))
        .italic_angle(0.0)
        .ascent(face.ascent)
        .descent(-face.descent)
        .cap_height(face.ascent)
        .stem_v(80.0)
        .font_file2(ids.file);

    pdf.stream(ids.file, face.font.data.data());

    let mut cmap = UnicodeCmap::new(Name(b"Custom"), IDENTITY);
    for (&id, text) in &face.unicode {
        cmap.pair_with_multiple(id, text.chars());
    }
    let cmap = cmap.finish();
    pdf.cmap(ids.cmap, &cmap);
}

/// Single-page PDF.
///
/// Without font files text is set in the standard Helvetica family and must be WinAnsi.
/// With a [`FontMeasurer`] every label is shaped with it and the faces are embedded.
/// `finish` hands out the page drawn so far and starts a new empty one.
pub struct PdfSurface {
    width: f64,
    height: f64,
    content: Content,
    fonts: PdfFonts,
}

impl std::fmt::Debug for PdfSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let embedded = match &self.fonts {
            PdfFonts::Standard => None,
            PdfFonts::Embedded(fonts) => Some(&fonts.measurer),
        };
        f.debug_struct("PdfSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("embedded", &embedded)
            .finish_non_exhaustive()
    }
}

impl PdfSurface {
    pub fn new(geometry: &PageGeometry) -> Self {
        Self {
            width: geometry.page_width,
            height: geometry.page_height,
            content: Content::new(),
            fonts: PdfFonts::Standard,
        }
    }

    /// Surface that shapes text with `measurer` and embeds the fonts it used.
    pub fn with_fonts(geometry: &PageGeometry, measurer: FontMeasurer) -> Self {
        Self {
            fonts: PdfFonts::Embedded(Box::new(EmbeddedFonts {
                measurer,
                faces: Vec::new(),
            })),
            ..Self::new(geometry)
        }
    }

    /// Page y (top-down, page units) to PDF y (bottom-up, points).
    fn flip_y(&self, y: f64) -> f32 {
        pt(self.height - y)
    }

    fn set_stroke(&mut self, stroke: Stroke) {
        let [r, g, b] = stroke.color.to_unit_f32();
        self.content.set_stroke_rgb(r, g, b);
        self.content.set_line_width(pt(stroke.width));
    }

    fn show_standard(&mut self, cell: &TextCell, baseline_y: f64) -> TimetableResult<()> {
        let bytes = win_ansi(&cell.text)?;
        let width = EstimatedMeasurer::width(&cell.text, cell.font, cell.size_pt);
        let x = pt(aligned_x(cell, width));
        let size = cell.size_pt as f32;
        let baseline = self.flip_y(baseline_y) - BASELINE_SHIFT_EM * size;
        self.content
            .begin_text()
            .set_font(Name(resource_name(cell.font)), size)
            .next_line(x, baseline)
            .show(Str(&bytes))
            .end_text();
        Ok(())
    }

    fn show_embedded(&mut self, cell: &TextCell, baseline_y: f64) -> TimetableResult<()> {
        let flipped = self.flip_y(baseline_y);
        let Self { content, fonts, .. } = self;
        let PdfFonts::Embedded(fonts) = fonts else {
            return Err(TimetableError::validation("pdf surface has no embedded fonts"));
        };

        let shaped = fonts.measurer.shape(&cell.text, cell.font, cell.size_pt)?;
        let x = pt(aligned_x(cell, shaped.width));
        let baseline = flipped - BASELINE_SHIFT_EM * cell.size_pt as f32;

        content.begin_text();
        for run in &shaped.runs {
            let idx = fonts.face_index(run, cell.font)?;
            let face = &mut fonts.faces[idx];
            let scale = 1000.0 / run.size_pt;

            if run.glyphs.iter().any(|g| g.id == 0) {
                tracing::warn!(
                    text = %cell.text,
                    font = %face.base_font,
                    "font lacks glyphs for some characters"
                );
            }

            content.set_font(Name(face.resource.as_bytes()), run.size_pt);
            content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, baseline]);
            let mut show = content.show_positioned();
            let mut items = show.items();
            let mut pen = 0.0f32;
            for glyph in &run.glyphs {
                let width = *face.widths.entry(glyph.id).or_insert(glyph.advance * scale);
                if !glyph.text.is_empty() {
                    face.unicode
                        .entry(glyph.id)
                        .or_insert_with(|| glyph.text.clone());
                }
                let gap = glyph.x - pen;
                if gap.abs() > 1e-3 {
                    items.adjust(-gap * scale);
                }
                items.show(Str(&glyph.id.to_be_bytes()));
                pen = glyph.x + width / scale;
            }
        }
        content.end_text();
        Ok(())
    }
}

impl DrawingSurface for PdfSurface {
    fn draw_rect(
        &mut self,
        rect: Rect,
        fill: Option<Rgb8>,
        stroke: Option<Stroke>,
    ) -> TimetableResult<()> {
        if fill.is_none() && stroke.is_none() {
            return Ok(());
        }
        self.content.save_state();
        if let Some(color) = fill {
            let [r, g, b] = color.to_unit_f32();
            self.content.set_fill_rgb(r, g, b);
        }
        if let Some(stroke) = stroke {
            self.set_stroke(stroke);
        }
        let y = self.flip_y(rect.y1);
        self.content
            .rect(pt(rect.x0), y, pt(rect.width()), pt(rect.height()));
        match (fill, stroke) {
            (Some(_), Some(_)) => self.content.fill_nonzero_and_stroke(),
            (Some(_), None) => self.content.fill_nonzero(),
            _ => self.content.stroke(),
        };
        self.content.restore_state();
        Ok(())
    }

    fn draw_line(&mut self, line: Line, stroke: Stroke) -> TimetableResult<()> {
        self.content.save_state();
        self.set_stroke(stroke);
        let (y0, y1) = (self.flip_y(line.p0.y), self.flip_y(line.p1.y));
        self.content.move_to(pt(line.p0.x), y0);
        self.content.line_to(pt(line.p1.x), y1);
        self.content.stroke();
        self.content.restore_state();
        Ok(())
    }

    fn draw_text_cell(&mut self, cell: &TextCell) -> TimetableResult<()> {
        if cell.fill.is_some() {
            self.draw_rect(cell.rect, cell.fill, None)?;
        }

        let center_y = (cell.rect.y0 + cell.rect.y1) / 2.0;
        let [r, g, b] = cell.color.to_unit_f32();
        self.content.save_state();
        self.content.set_fill_rgb(r, g, b);
        let shown = if matches!(self.fonts, PdfFonts::Standard) {
            self.show_standard(cell, center_y)
        } else {
            self.show_embedded(cell, center_y)
        };
        self.content.restore_state();
        shown
    }

    fn finish(&mut self) -> TimetableResult<Vec<u8>> {
        let content = std::mem::replace(&mut self.content, Content::new());
        let data = content.finish();
        let standard = matches!(self.fonts, PdfFonts::Standard);
        let faces = match &mut self.fonts {
            PdfFonts::Standard => Vec::new(),
            PdfFonts::Embedded(fonts) => std::mem::take(&mut fonts.faces),
        };

        let mut next = FIRST_EMBEDDED_ID;
        let face_ids: Vec<FaceIds> = faces.iter().map(|_| FaceIds::alloc(&mut next)).collect();

        let mut pdf = Pdf::new();
        pdf.catalog(CATALOG_ID).pages(PAGES_ID);
        pdf.pages(PAGES_ID).kids([PAGE_ID]).count(1);

        {
            let mut page = pdf.page(PAGE_ID);
            page.media_box(PdfRect::new(0.0, 0.0, pt(self.width), pt(self.height)))
                .parent(PAGES_ID)
                .contents(CONTENT_ID);
            let mut resources = page.resources();
            let mut fonts = resources.fonts();
            if standard {
                for font in &FONTS {
                    fonts.pair(Name(font.resource), font.id);
                }
            }
            for (face, ids) in faces.iter().zip(&face_ids) {
                fonts.pair(Name(face.resource.as_bytes()), ids.type0);
            }
        }

        if standard {
            for font in &FONTS {
                pdf.type1_font(font.id)
                    .base_font(Name(font.base_font))
                    .encoding_predefined(Name(b"WinAnsiEncoding"));
            }
        }
        for (face, ids) in faces.iter().zip(&face_ids) {
            write_embedded_face(&mut pdf, face, ids);
        }
        pdf.stream(CONTENT_ID, &data);

        let out = pdf.finish();
        tracing::debug!(bytes = out.len(), embedded = faces.len(), "wrote pdf page");
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/output/pdf.rs"]
mod tests;
