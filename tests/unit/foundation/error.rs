use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CurvecastError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(CurvecastError::color("x").to_string().contains("color error:"));
    assert!(
        CurvecastError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        CurvecastError::encode("x")
            .to_string()
            .contains("encode error:")
    );
    assert!(
        CurvecastError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CurvecastError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
