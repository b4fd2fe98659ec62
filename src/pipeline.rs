use std::path::Path;

use crate::{
    draw::measure::{EstimatedMeasurer, FontFace, FontMeasurer, TextMeasurer},
    draw::surface::{DrawList, DrawingSurface},
    foundation::error::{TimetableError, TimetableResult},
    output::pdf::PdfSurface,
    output::raster::PngSurface,
    output::svg::{FontFamilies, SvgSurface},
};

pub(crate) mod document;
pub(crate) mod settings;

use settings::{FontFiles, RenderSettings};

/// Document format written by the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Pdf,
    Svg,
    Png,
    /// The recorded display list, for debugging and snapshot tests.
    Json,
}

impl OutputFormat {
    /// Infer the format from a destination file extension (case-insensitive).
    pub fn from_path(path: &Path) -> TimetableResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("pdf") => Ok(Self::Pdf),
            Some("svg") => Ok(Self::Svg),
            Some("png") => Ok(Self::Png),
            Some("json") => Ok(Self::Json),
            _ => Err(TimetableError::validation(format!(
                "cannot infer output format from '{}' (expected .pdf, .svg, .png or .json)",
                path.display()
            ))),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Svg => "svg",
            Self::Png => "png",
            Self::Json => "json",
        }
    }
}

/// Text measurer for `settings`, plus the family names the vector surfaces should reference.
pub fn create_measurer(
    settings: &RenderSettings,
) -> TimetableResult<(Box<dyn TextMeasurer>, FontFamilies)> {
    match &settings.fonts {
        Some(files) => {
            let measurer = load_measurer(files)?;
            let families = FontFamilies {
                regular: measurer.family(FontFace::Regular).to_owned(),
                condensed: measurer.family(FontFace::Condensed).to_owned(),
                italic: measurer.family(FontFace::Italic).to_owned(),
            };
            Ok((Box::new(measurer), families))
        }
        None => Ok((Box::new(EstimatedMeasurer), FontFamilies::default())),
    }
}

fn load_measurer(files: &FontFiles) -> TimetableResult<FontMeasurer> {
    FontMeasurer::load(&files.regular, &files.condensed, &files.italic)
}

/// Output surface for `format`. PDF output embeds the configured font files, if any.
pub fn create_surface(
    format: OutputFormat,
    settings: &RenderSettings,
    families: FontFamilies,
) -> TimetableResult<Box<dyn DrawingSurface>> {
    let geometry = &settings.layout.geometry;
    let surface: Box<dyn DrawingSurface> = match format {
        OutputFormat::Pdf => match &settings.fonts {
            Some(files) => Box::new(PdfSurface::with_fonts(geometry, load_measurer(files)?)),
            None => Box::new(PdfSurface::new(geometry)),
        },
        OutputFormat::Svg => Box::new(SvgSurface::with_families(geometry, families)),
        OutputFormat::Png => {
            let mut surface = PngSurface::with_families(geometry, settings.dpi, families);
            for dir in settings.font_search_dirs() {
                surface = surface.with_font_dir(dir);
            }
            Box::new(surface)
        }
        OutputFormat::Json => Box::new(DrawList::new()),
    };
    Ok(surface)
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
