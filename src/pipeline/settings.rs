use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    foundation::error::{TimetableError, TimetableResult},
    layout::geometry::LayoutSettings,
};

/// Font files used for measuring, for drawing PNG text and for embedding in PDF output.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FontFiles {
    pub regular: PathBuf,
    pub condensed: PathBuf,
    pub italic: PathBuf,
}

impl FontFiles {
    fn paths(&self) -> [&Path; 3] {
        [&self.regular, &self.condensed, &self.italic]
    }
}

/// Everything configurable about one render.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub layout: LayoutSettings,
    /// Without font files, text is measured with built-in estimates.
    pub fonts: Option<FontFiles>,
    /// Extra directories searched for fonts when rasterizing.
    pub font_dirs: Vec<PathBuf>,
    /// Raster resolution for PNG output.
    pub dpi: f64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            layout: LayoutSettings::default(),
            fonts: None,
            font_dirs: Vec::new(),
            dpi: 150.0,
        }
    }
}

impl RenderSettings {
    /// Load settings from JSON. Relative font paths are resolved against the file's directory.
    pub fn from_path(path: impl AsRef<Path>) -> TimetableResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read settings '{}'", path.display()))?;
        let mut settings = Self::from_json(&text)?;
        if let Some(base) = path.parent() {
            settings.resolve_relative_to(base);
        }
        Ok(settings)
    }

    pub fn from_json(text: &str) -> TimetableResult<Self> {
        serde_json::from_str(text).map_err(|e| TimetableError::serde(format!("settings: {e}")))
    }

    fn resolve_relative_to(&mut self, base: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        if let Some(fonts) = &mut self.fonts {
            resolve(&mut fonts.regular);
            resolve(&mut fonts.condensed);
            resolve(&mut fonts.italic);
        }
        self.font_dirs.iter_mut().for_each(resolve);
    }

    pub fn validate(&self) -> TimetableResult<()> {
        if !self.dpi.is_finite() || self.dpi <= 0.0 {
            return Err(TimetableError::validation(format!(
                "dpi must be finite and > 0, got {}",
                self.dpi
            )));
        }
        self.layout.geometry.validate()
    }

    /// Configured font directories followed by the directories of the font files.
    pub fn font_search_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = self.font_dirs.clone();
        if let Some(fonts) = &self.fonts {
            let parents = fonts
                .paths()
                .into_iter()
                .filter_map(Path::parent)
                .filter(|p| !p.as_os_str().is_empty());
            for parent in parents {
                if !dirs.iter().any(|d| d == parent) {
                    dirs.push(parent.to_path_buf());
                }
            }
        }
        dirs
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/settings.rs"]
mod tests;
