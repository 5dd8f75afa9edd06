use super::*;
use crate::foundation::core::Fps;

fn cfg(width: u32, height: u32) -> SinkConfig {
    SinkConfig {
        width,
        height,
        fps: Fps::new(24, 1).unwrap(),
    }
}

#[test]
fn odd_or_empty_dimensions_are_rejected() {
    assert!(validate_dims(&cfg(640, 360)).is_ok());
    assert!(validate_dims(&cfg(641, 360)).is_err());
    assert!(validate_dims(&cfg(640, 361)).is_err());
    assert!(validate_dims(&cfg(0, 360)).is_err());
}

#[test]
fn args_describe_raw_rgba_input_at_rational_fps() {
    let args = ffmpeg_args(&SinkConfig {
        fps: Fps::new(30000, 1001).unwrap(),
        ..cfg(4, 2)
    });
    let joined = args.join(" ");
    assert!(joined.contains("-f rawvideo -pix_fmt rgba -s 4x2"));
    assert!(joined.contains("-r 30000/1001 -i pipe:0"));
    assert!(joined.ends_with("-movflags +faststart"));
}

#[test]
fn default_background_is_the_palette_background() {
    let opts = FfmpegSinkOpts::new("out.mp4");
    assert_eq!(opts.background, [0x0a, 0x0a, 0x0f]);
    assert!(opts.overwrite);
}

#[test]
fn push_before_begin_is_an_error() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("unused.mp4"));
    let frame = FrameRGBA::transparent(2, 2);
    assert!(sink.push_frame(FrameIndex(0), &frame).is_err());
    assert!(sink.end().is_err());
}

#[test]
fn refuses_to_clobber_without_overwrite() {
    let dir = std::env::temp_dir().join(format!("curvecast-ffmpeg-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let out = dir.join("exists.mp4");
    std::fs::write(&out, b"x").unwrap();

    let mut opts = FfmpegSinkOpts::new(&out);
    opts.overwrite = false;
    let err = FfmpegSink::new(opts).begin(cfg(2, 2)).unwrap_err();
    assert!(err.to_string().contains("already exists"));
    let _ = std::fs::remove_dir_all(&dir);
}
