use super::*;

#[test]
fn hex_parses_with_and_without_hash() {
    assert_eq!(Rgb8::from_hex("#ff3366").unwrap(), Rgb8::new(255, 51, 102));
    assert_eq!(Rgb8::from_hex("00A0fF").unwrap(), Rgb8::new(0, 160, 255));
    assert_eq!(Rgb8::from_hex("  #000000 ").unwrap(), Rgb8::BLACK);
}

#[test]
fn hex_rejects_bad_shapes() {
    assert!(Rgb8::from_hex("#fff").is_err());
    assert!(Rgb8::from_hex("#gg0000").is_err());
    assert!(Rgb8::from_hex("#ff00ff00").is_err());
    assert!(Rgb8::from_hex("#ééé").is_err());
}

#[test]
fn hex_formats_lowercase() {
    assert_eq!(Rgb8::new(178, 178, 178).to_hex(), "#b2b2b2");
    assert_eq!(Rgb8::WHITE.to_hex(), "#ffffff");
}

#[test]
fn rect_xywh_keeps_origin_and_size() {
    let r = rect_xywh(10.0, 30.0, 277.0, 7.0);
    assert_eq!(r.x0, 10.0);
    assert_eq!(r.y0, 30.0);
    assert!((r.width() - 277.0).abs() < 1e-9);
    assert!((r.height() - 7.0).abs() < 1e-9);
}

#[test]
fn unit_f32_channels() {
    assert_eq!(Rgb8::WHITE.to_unit_f32(), [1.0, 1.0, 1.0]);
    assert_eq!(Rgb8::BLACK.to_unit_f32(), [0.0, 0.0, 0.0]);
}
