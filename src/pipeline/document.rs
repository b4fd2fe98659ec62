use std::path::Path;

use anyhow::Context;

use crate::{
    draw::surface::{DrawList, DrawingSurface},
    foundation::error::TimetableResult,
    layout::engine,
    pipeline::settings::RenderSettings,
    pipeline::{OutputFormat, create_measurer, create_surface},
    schedule::source::SourceDocument,
};

/// Lay out `doc` and encode it as `format`.
///
/// The page is recorded into a [`DrawList`] first, so a failing layout never touches the
/// output surface.
#[tracing::instrument(skip_all, fields(format = ?format))]
pub fn render_document(
    doc: &SourceDocument,
    settings: &RenderSettings,
    format: OutputFormat,
) -> TimetableResult<Vec<u8>> {
    settings.validate()?;
    let (mut measurer, families) = create_measurer(settings)?;

    let mut list = DrawList::new();
    engine::render(
        &doc.timetable,
        &doc.persons,
        &doc.palette,
        &doc.notes,
        &settings.layout,
        measurer.as_mut(),
        &mut list,
    )?;

    let mut surface = create_surface(format, settings, families)?;
    list.replay(surface.as_mut())?;
    let bytes = surface.finish()?;
    tracing::debug!(ops = list.len(), bytes = bytes.len(), "rendered document");
    Ok(bytes)
}

/// Read `source`, render it, and write the result to `destination`.
///
/// Without an explicit `format` it is inferred from the destination's extension.
#[tracing::instrument(skip(settings))]
pub fn render_file(
    source: &Path,
    destination: &Path,
    settings: &RenderSettings,
    format: Option<OutputFormat>,
) -> TimetableResult<()> {
    let format = match format {
        Some(format) => format,
        None => OutputFormat::from_path(destination)?,
    };
    let doc = SourceDocument::from_path(source)?;
    let bytes = render_document(&doc, settings, format)?;

    if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(destination, &bytes)
        .with_context(|| format!("write {} '{}'", format.extension(), destination.display()))?;
    tracing::info!(path = %destination.display(), bytes = bytes.len(), "wrote timetable");
    Ok(())
}
