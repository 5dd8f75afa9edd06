use super::*;

#[test]
fn with_alpha_formats_like_css() {
    assert_eq!(
        with_alpha("#ffffff", 0.5).unwrap().to_string(),
        "rgba(255,255,255,0.5)"
    );
    assert_eq!(
        with_alpha("#000000", 1.0).unwrap().to_string(),
        "rgba(0,0,0,1)"
    );
    assert_eq!(
        with_alpha("#4ECDC4", 0.25).unwrap(),
        palette::TEAL.with_alpha(0.25)
    );
}

#[test]
fn malformed_hex_is_a_color_error() {
    for bad in ["fff", "#fff", "#ggg000", "teal", "", "#1234567", "#12345é"] {
        let err = parse_hex(bad).unwrap_err();
        assert!(err.to_string().contains("color error:"), "{bad}");
    }
}

#[test]
fn rgba8_rounds_and_clamps_alpha() {
    assert_eq!(Rgba::rgba(1, 2, 3, 0.5).to_rgba8(), [1, 2, 3, 128]);
    assert_eq!(Rgba::rgba(1, 2, 3, 1.7).to_rgba8(), [1, 2, 3, 255]);
    assert_eq!(Rgba::rgba(1, 2, 3, -0.2).to_rgba8(), [1, 2, 3, 0]);
    assert!(Rgba::rgba(1, 2, 3, f64::NAN).is_transparent());
}

#[test]
fn mix_blends_channels_and_alpha() {
    assert_eq!(palette::GREEN.mix(palette::PURPLE, 0.0), palette::GREEN);
    assert_eq!(palette::GREEN.mix(palette::PURPLE, 1.0), palette::PURPLE);
    // #6bcb77 -> #b07aff halfway, rounding half away from zero.
    assert_eq!(palette::GREEN.mix(palette::PURPLE, 0.5), Rgba::rgb(0x8e, 0xa3, 0xbb));
    let faded = Rgba::rgba(0, 0, 0, 0.0).mix(Rgba::rgb(200, 100, 50), 0.25);
    assert_eq!(faded, Rgba::rgba(50, 25, 13, 0.25));
}
