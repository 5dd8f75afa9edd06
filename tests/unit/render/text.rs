use super::*;

const FONT_PATH: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf";

#[test]
fn garbage_bytes_are_not_a_font() {
    assert!(LabelShaper::from_bytes(vec![0u8; 32]).is_err());
}

#[test]
fn missing_font_file_is_a_validation_error() {
    let err = LabelShaper::from_file(Path::new("/nonexistent/curvecast-font.ttf"))
        .err()
        .unwrap();
    assert!(err.to_string().starts_with("validation error: "));
}

#[test]
fn brush_takes_rounded_alpha() {
    let brush = TextBrush::from(Rgba::rgba(1, 2, 3, 0.5));
    assert_eq!(brush, TextBrush { r: 1, g: 2, b: 3, a: 128 });
}

#[test]
fn layout_with_local_font_if_present() {
    let Ok(bytes) = std::fs::read(FONT_PATH) else {
        return;
    };
    let mut shaper = LabelShaper::from_bytes(bytes).unwrap();
    assert!(!shaper.family().is_empty());

    let short = shaper.layout("AB", 12.0, TextBrush::default()).unwrap();
    let long = shaper.layout("ABCDEF", 12.0, TextBrush::default()).unwrap();
    assert!(short.width() > 0.0);
    assert!(long.width() > short.width() * 2.0);
    assert!(short.height() > 0.0);

    assert!(shaper.layout("AB", 0.0, TextBrush::default()).is_err());
}
