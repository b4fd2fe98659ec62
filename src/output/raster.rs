use std::{
    io::Cursor,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;

use crate::{
    draw::surface::{DrawingSurface, Stroke, TextCell},
    foundation::core::{Line, Rect, Rgb8},
    foundation::error::{TimetableError, TimetableResult},
    layout::geometry::PageGeometry,
    output::svg::{FontFamilies, SvgSurface},
};

const MM_PER_INCH: f64 = 25.4;
const MAX_DIM: u32 = 16_384;

/// Rasterizes the page through an SVG document and encodes it as PNG.
#[derive(Clone, Debug)]
pub struct PngSurface {
    svg: SvgSurface,
    dpi: f64,
    font_dirs: Vec<PathBuf>,
}

impl PngSurface {
    pub fn new(geometry: &PageGeometry, dpi: f64) -> Self {
        Self::with_families(geometry, dpi, FontFamilies::default())
    }

    pub fn with_families(geometry: &PageGeometry, dpi: f64, families: FontFamilies) -> Self {
        Self {
            svg: SvgSurface::with_families(geometry, families),
            dpi,
            font_dirs: Vec::new(),
        }
    }

    /// Also search `dir` for `.ttf`/`.otf`/`.ttc` files when resolving text.
    pub fn with_font_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.font_dirs.push(dir.into());
        self
    }

    /// Output size in pixels for the configured DPI.
    pub fn pixel_size(&self) -> TimetableResult<(u32, u32)> {
        let (w, h) = self.svg.page_size();
        let to_px = |mm: f64| -> TimetableResult<u32> {
            let px = (mm / MM_PER_INCH * self.dpi).round();
            if !px.is_finite() || px < 1.0 || px > f64::from(MAX_DIM) {
                return Err(TimetableError::validation(format!(
                    "raster size out of range at {} dpi (max {MAX_DIM} px)",
                    self.dpi
                )));
            }
            Ok(px as u32)
        };
        Ok((to_px(w)?, to_px(h)?))
    }

    fn fontdb(&self) -> Arc<usvg::fontdb::Database> {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        for dir in &self.font_dirs {
            load_fonts_from_dir(&mut db, dir);
        }
        Arc::new(db)
    }
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "font directory not readable");
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(err) = db.load_font_file(&path) {
            tracing::warn!(path = %path.display(), %err, "skipping font file");
        }
    }
}

impl DrawingSurface for PngSurface {
    fn draw_rect(
        &mut self,
        rect: Rect,
        fill: Option<Rgb8>,
        stroke: Option<Stroke>,
    ) -> TimetableResult<()> {
        self.svg.draw_rect(rect, fill, stroke)
    }

    fn draw_line(&mut self, line: Line, stroke: Stroke) -> TimetableResult<()> {
        self.svg.draw_line(line, stroke)
    }

    fn draw_text_cell(&mut self, cell: &TextCell) -> TimetableResult<()> {
        self.svg.draw_text_cell(cell)
    }

    #[tracing::instrument(skip(self), fields(dpi = self.dpi))]
    fn finish(&mut self) -> TimetableResult<Vec<u8>> {
        let (width, height) = self.pixel_size()?;
        let svg = self.svg.finish()?;

        let opts = usvg::Options {
            fontdb: self.fontdb(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_data(&svg, &opts).context("parse rendered svg")?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| TimetableError::validation("failed to allocate page pixmap"))?;
        // Opaque background, so the premultiplied pixels equal straight RGBA.
        pixmap.fill(resvg::tiny_skia::Color::WHITE);

        let sx = (width as f32) / tree.size().width();
        let sy = (height as f32) / tree.size().height();
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::from_scale(sx, sy),
            &mut pixmap.as_mut(),
        );

        let img = image::RgbaImage::from_raw(width, height, pixmap.take())
            .ok_or_else(|| TimetableError::validation("pixmap size does not match the image"))?;
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .context("encode png")?;
        Ok(buf)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/output/raster.rs"]
mod tests;
