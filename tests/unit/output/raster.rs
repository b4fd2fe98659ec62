use super::*;
use crate::{
    draw::measure::FontFace,
    draw::surface::Align,
    foundation::core::rect_xywh,
};

#[test]
fn pixel_size_follows_dpi() {
    let g = PageGeometry::default();
    assert_eq!(PngSurface::new(&g, 25.4).pixel_size().unwrap(), (297, 210));
    assert_eq!(PngSurface::new(&g, 50.8).pixel_size().unwrap(), (594, 420));
}

#[test]
fn absurd_dpi_is_rejected() {
    let g = PageGeometry::default();
    for dpi in [0.0, -10.0, f64::NAN, 1.0e6] {
        assert!(matches!(
            PngSurface::new(&g, dpi).pixel_size(),
            Err(TimetableError::Validation(_))
        ));
    }
}

#[test]
fn renders_an_opaque_png_of_the_page_size() {
    let g = PageGeometry::default();
    let mut s = PngSurface::new(&g, 25.4);
    s.draw_rect(
        rect_xywh(0.0, 0.0, 100.0, 100.0),
        Some(Rgb8::new(255, 0, 0)),
        None,
    )
    .unwrap();
    s.draw_text_cell(&TextCell {
        rect: rect_xywh(10.0, 10.0, 50.0, 7.0),
        text: "Adam".to_owned(),
        color: Rgb8::WHITE,
        font: FontFace::Regular,
        size_pt: 12.0,
        align: Align::Center,
        fill: None,
    })
    .unwrap();
    let bytes = s.finish().unwrap();

    let img = image::load_from_memory_with_format(&bytes, image::ImageFormat::Png)
        .unwrap()
        .to_rgba8();
    assert_eq!(img.dimensions(), (297, 210));
    assert_eq!(img.get_pixel(50, 80).0, [255, 0, 0, 255]);
    assert_eq!(img.get_pixel(200, 150).0, [255, 255, 255, 255]);
}

#[test]
fn missing_font_dirs_are_skipped() {
    let g = PageGeometry::default();
    let mut s = PngSurface::new(&g, 10.0).with_font_dir("definitely/not/here");
    let bytes = s.finish().unwrap();
    assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G']));
}
