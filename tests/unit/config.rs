use super::*;
use crate::diagrams::lookup;
use crate::paint::color::palette;

#[test]
fn defaults_are_valid() {
    let cfg = RenderConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.backing_size(), (1440, 810));
    assert_eq!(cfg.background_color().unwrap(), palette::BG);
    assert_eq!(cfg.background_rgb().unwrap(), [0x0a, 0x0a, 0x0f]);
}

#[test]
fn empty_json_is_all_defaults() {
    assert_eq!(RenderConfig::from_json_str("{}").unwrap(), RenderConfig::default());
}

#[test]
fn json_overrides_selected_fields() {
    let cfg = RenderConfig::from_json_str(
        r#"{ "width": 320, "fps": { "num": 24000, "den": 1001 }, "font_path": "fonts/mono.ttf" }"#,
    )
    .unwrap();
    assert_eq!(cfg.width, 320.0);
    assert_eq!(cfg.height, 405.0);
    assert_eq!(cfg.fps, Fps { num: 24000, den: 1001 });
    assert_eq!(cfg.font_path.as_deref(), Some(Path::new("fonts/mono.ttf")));
}

#[test]
fn unknown_fields_are_rejected() {
    let err = RenderConfig::from_json_str(r#"{ "widht": 320 }"#).unwrap_err();
    assert!(matches!(err, CurvecastError::Serde(_)));
    assert!(err.to_string().contains("widht"));
}

#[test]
fn validation_rejects_bad_values() {
    let bad = [
        RenderConfig { width: 0.0, ..Default::default() },
        RenderConfig { height: f64::NAN, ..Default::default() },
        RenderConfig { device_pixel_ratio: -1.0, ..Default::default() },
        RenderConfig { fps: Fps { num: 30, den: 0 }, ..Default::default() },
        RenderConfig { duration_secs: Some(0.0), ..Default::default() },
        RenderConfig { start_secs: f64::INFINITY, ..Default::default() },
        RenderConfig { width: 0.2, device_pixel_ratio: 1.0, ..Default::default() },
    ];
    for cfg in bad {
        assert!(
            matches!(cfg.validate(), Err(CurvecastError::Validation(_))),
            "{cfg:?}"
        );
    }
}

#[test]
fn validation_rejects_oversized_backing_stores() {
    let cfg = RenderConfig {
        width: 40_000.0,
        device_pixel_ratio: 2.0,
        ..Default::default()
    };
    let err = cfg.validate().unwrap_err();
    assert!(err.to_string().contains("exceeds 65535x65535"));
}

#[test]
fn validation_rejects_malformed_background() {
    for bg in ["#fff", "teal", "0a0a0f", "#0a0a0g"] {
        let cfg = RenderConfig {
            background: bg.to_owned(),
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(CurvecastError::Color(_))), "{bg}");
    }
}

#[test]
fn duration_defaults_to_one_cycle() {
    let temperature = (lookup("temperature").unwrap().build)();
    let cfg = RenderConfig::default();
    assert_eq!(cfg.duration_for(temperature.as_ref()), 6.0);
    assert_eq!(cfg.frame_count(temperature.as_ref()), 180);

    let cfg = RenderConfig {
        duration_secs: Some(0.5),
        fps: Fps { num: 10, den: 1 },
        ..Default::default()
    };
    assert_eq!(cfg.frame_count(temperature.as_ref()), 5);
}

struct OneShot;

impl Diagram for OneShot {
    fn slug(&self) -> &'static str {
        "one-shot"
    }

    fn title(&self) -> &'static str {
        "One shot"
    }

    fn draw(&self, _: &mut crate::paint::context::Context2d, _: f64, _: f64, _: f64) {}
}

#[test]
fn non_looping_diagrams_use_the_default_duration() {
    let cfg = RenderConfig::default();
    assert_eq!(cfg.duration_for(&OneShot), DEFAULT_DURATION_SECS);
    assert_eq!(cfg.frame_count(&OneShot), 240);
}
