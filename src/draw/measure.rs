use std::{borrow::Cow, path::Path};

use anyhow::Context;

use crate::{
    foundation::core::UNITS_PER_PT,
    foundation::error::{TimetableError, TimetableResult},
};

/// The three faces the timetable uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFace {
    /// Bold face for headings, person names and notes.
    Regular,
    /// Narrow face for activity labels.
    Condensed,
    /// Emphasized narrow face for start/end times.
    Italic,
}

/// Rendered extent of a single line of text, in page units.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct TextSize {
    pub width: f64,
    pub height: f64,
}

/// Measures text before it is placed.
pub trait TextMeasurer {
    fn measure(&mut self, text: &str, font: FontFace, size_pt: f64) -> TimetableResult<TextSize>;
}

fn check_size(size_pt: f64) -> TimetableResult<()> {
    if !size_pt.is_finite() || size_pt <= 0.0 {
        return Err(TimetableError::validation(
            "font size must be finite and > 0",
        ));
    }
    Ok(())
}

/// Font-free measurer using per-glyph advance classes of a bold sans face.
///
/// Height is one em; widths are close enough for aligning cells without embedded fonts.
#[derive(Clone, Copy, Debug, Default)]
pub struct EstimatedMeasurer;

impl EstimatedMeasurer {
    /// Advance of one character in ems.
    fn advance_em(c: char) -> f64 {
        match c {
            ' ' => 0.28,
            'i' | 'j' | 'l' | '.' | ',' | ':' | ';' | '\'' | '!' | '|' | 'I' => 0.28,
            'f' | 't' | 'r' | '(' | ')' | '-' | '/' => 0.36,
            'm' | 'w' | 'M' | 'W' => 0.86,
            '0'..='9' => 0.56,
            c if c.is_uppercase() => 0.70,
            _ => 0.58,
        }
    }

    fn face_scale(font: FontFace) -> f64 {
        match font {
            FontFace::Regular => 1.0,
            FontFace::Condensed | FontFace::Italic => 0.82,
        }
    }

    pub fn width(text: &str, font: FontFace, size_pt: f64) -> f64 {
        let ems: f64 = text.chars().map(Self::advance_em).sum();
        ems * Self::face_scale(font) * size_pt * UNITS_PER_PT
    }
}

impl TextMeasurer for EstimatedMeasurer {
    fn measure(&mut self, text: &str, font: FontFace, size_pt: f64) -> TimetableResult<TextSize> {
        check_size(size_pt)?;
        Ok(TextSize {
            width: Self::width(text, font, size_pt),
            height: size_pt * UNITS_PER_PT,
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct MeasureBrush;

/// One registered font file.
struct FaceContext {
    font_ctx: parley::FontContext,
    family: String,
}

impl FaceContext {
    fn load(path: &Path) -> TimetableResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read font file '{}'", path.display()))?;

        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            TimetableError::validation(format!(
                "no font families registered from '{}'",
                path.display()
            ))
        })?;
        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| TimetableError::validation("registered font family has no name"))?
            .to_string();

        Ok(Self { font_ctx, family })
    }
}

/// Measurer that shapes text with Parley against real font files, one per face.
pub struct FontMeasurer {
    regular: FaceContext,
    condensed: FaceContext,
    italic: FaceContext,
    layout_ctx: parley::LayoutContext<MeasureBrush>,
}

impl std::fmt::Debug for FontMeasurer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontMeasurer")
            .field("regular", &self.regular.family)
            .field("condensed", &self.condensed.family)
            .field("italic", &self.italic.family)
            .finish()
    }
}

impl FontMeasurer {
    pub fn load(regular: &Path, condensed: &Path, italic: &Path) -> TimetableResult<Self> {
        let out = Self {
            regular: FaceContext::load(regular)?,
            condensed: FaceContext::load(condensed)?,
            italic: FaceContext::load(italic)?,
            layout_ctx: parley::LayoutContext::new(),
        };
        tracing::debug!(measurer = ?out, "loaded font measurer");
        Ok(out)
    }

    pub fn family(&self, font: FontFace) -> &str {
        match font {
            FontFace::Regular => &self.regular.family,
            FontFace::Condensed => &self.condensed.family,
            FontFace::Italic => &self.italic.family,
        }
    }
}

/// One glyph of shaped text, positioned relative to the start of the line (points).
#[derive(Clone, Debug, PartialEq)]
pub struct ShapedGlyph {
    pub id: u16,
    pub x: f32,
    pub advance: f32,
    /// Source text of the cluster this glyph starts; empty for the rest of a cluster.
    pub text: String,
}

/// Consecutive glyphs drawn from one font.
#[derive(Clone, Debug)]
pub struct ShapedRun {
    pub font: parley::FontData,
    pub size_pt: f32,
    pub ascent: f32,
    pub descent: f32,
    pub glyphs: Vec<ShapedGlyph>,
}

/// Single-line text shaped against the loaded fonts.
#[derive(Clone, Debug, Default)]
pub struct ShapedText {
    /// Advance of the whole line, in page units.
    pub width: f64,
    pub runs: Vec<ShapedRun>,
}

impl FontMeasurer {
    fn layout(
        &mut self,
        text: &str,
        font: FontFace,
        size_pt: f64,
    ) -> TimetableResult<parley::Layout<MeasureBrush>> {
        check_size(size_pt)?;
        let face = match font {
            FontFace::Regular => &mut self.regular,
            FontFace::Condensed => &mut self.condensed,
            FontFace::Italic => &mut self.italic,
        };

        let family = face.family.clone();

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut face.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_pt as f32));
        builder.push_default(parley::style::StyleProperty::Brush(MeasureBrush));

        let mut layout: parley::Layout<MeasureBrush> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }

    /// Shape `text` into glyph runs carrying the font data they were shaped with.
    pub fn shape(
        &mut self,
        text: &str,
        font: FontFace,
        size_pt: f64,
    ) -> TimetableResult<ShapedText> {
        let layout = self.layout(text, font, size_pt)?;

        let mut shaped = ShapedText::default();
        for line in layout.lines() {
            shaped.width = shaped.width.max(f64::from(line.metrics().advance) * UNITS_PER_PT);
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(glyph_run) = item else {
                    continue;
                };
                let run = glyph_run.run();
                let metrics = run.metrics();
                let mut out = ShapedRun {
                    font: run.font().clone(),
                    size_pt: run.font_size(),
                    ascent: metrics.ascent,
                    descent: metrics.descent,
                    glyphs: Vec::new(),
                };

                let mut pen = glyph_run.offset();
                for cluster in run.visual_clusters() {
                    let cluster_text = text.get(cluster.text_range()).unwrap_or_default();
                    for (i, glyph) in cluster.glyphs().enumerate() {
                        let id = u16::try_from(glyph.id).map_err(|_| {
                            TimetableError::validation(format!(
                                "glyph id {} does not fit a two-byte CID",
                                glyph.id
                            ))
                        })?;
                        out.glyphs.push(ShapedGlyph {
                            id,
                            x: pen + glyph.x,
                            advance: glyph.advance,
                            text: if i == 0 {
                                cluster_text.to_owned()
                            } else {
                                String::new()
                            },
                        });
                        pen += glyph.advance;
                    }
                }
                shaped.runs.push(out);
            }
        }
        Ok(shaped)
    }
}

impl TextMeasurer for FontMeasurer {
    fn measure(&mut self, text: &str, font: FontFace, size_pt: f64) -> TimetableResult<TextSize> {
        let layout = self.layout(text, font, size_pt)?;

        let mut width = 0.0f64;
        let mut height = 0.0f64;
        for line in layout.lines() {
            let m = line.metrics();
            width = width.max(f64::from(m.advance));
            height += f64::from(m.ascent + m.descent + m.leading);
        }
        if height <= 0.0 {
            height = size_pt;
        }

        Ok(TextSize {
            width: width * UNITS_PER_PT,
            height: height * UNITS_PER_PT,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/draw/measure.rs"]
mod tests;
