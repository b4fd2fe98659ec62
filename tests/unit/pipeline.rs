use super::*;
use crate::{
    draw::surface::{Align, TextCell},
    foundation::core::{Rgb8, rect_xywh},
};

#[test]
fn format_is_inferred_from_extension() {
    for (path, format) in [
        ("out/week.pdf", OutputFormat::Pdf),
        ("week.SVG", OutputFormat::Svg),
        ("/tmp/week.png", OutputFormat::Png),
        ("list.json", OutputFormat::Json),
    ] {
        assert_eq!(OutputFormat::from_path(Path::new(path)).unwrap(), format);
        assert!(path.to_ascii_lowercase().ends_with(format.extension()));
    }
}

#[test]
fn unknown_extensions_are_rejected() {
    for path in ["week", "week.docx", "pdf"] {
        let res = OutputFormat::from_path(Path::new(path));
        assert!(matches!(res, Err(TimetableError::Validation(_))), "{path}");
    }
}

#[test]
fn default_settings_use_estimated_measurer() {
    let (mut measurer, families) = create_measurer(&RenderSettings::default()).unwrap();
    assert_eq!(families, FontFamilies::default());
    let size = measurer.measure("SOCCER", FontFace::Condensed, 6.5).unwrap();
    assert!(size.width > 0.0);
}

#[test]
fn missing_font_files_fail_to_load() {
    let settings = RenderSettings {
        fonts: Some(settings::FontFiles {
            regular: "nope/regular.ttf".into(),
            condensed: "nope/condensed.ttf".into(),
            italic: "nope/italic.ttf".into(),
        }),
        ..RenderSettings::default()
    };
    assert!(matches!(
        create_measurer(&settings),
        Err(TimetableError::Other(_))
    ));
}

#[test]
fn json_surface_records_the_display_list() {
    let settings = RenderSettings::default();
    let mut surface =
        create_surface(OutputFormat::Json, &settings, FontFamilies::default()).unwrap();
    surface
        .draw_text_cell(&TextCell {
            rect: rect_xywh(10.0, 30.0, 20.0, 7.0),
            text: "Monday".to_owned(),
            color: Rgb8::BLACK,
            font: FontFace::Regular,
            size_pt: 12.0,
            align: Align::Center,
            fill: None,
        })
        .unwrap();
    let bytes = surface.finish().unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json[0]["op"], "text");
    assert_eq!(json[0]["text"], "Monday");
}

#[test]
fn every_format_finishes_an_empty_page() {
    let settings = RenderSettings {
        dpi: 10.0,
        ..RenderSettings::default()
    };
    for (format, magic) in [
        (OutputFormat::Pdf, b"%PDF".as_slice()),
        (OutputFormat::Svg, b"<svg".as_slice()),
        (OutputFormat::Png, b"\x89PNG".as_slice()),
        (OutputFormat::Json, b"[]".as_slice()),
    ] {
        let mut surface = create_surface(format, &settings, FontFamilies::default()).unwrap();
        let bytes = surface.finish().unwrap();
        assert!(bytes.starts_with(magic), "{format:?}");
    }
}
