use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use curvecast::encode::ffmpeg::{ensure_parent_dir, is_ffmpeg_on_path};
use curvecast::encode::sink::write_png;
use curvecast::{
    DiagramEntry, FfmpegSink, FfmpegSinkOpts, Fps, PngSequenceSink, RenderConfig, RenderSession,
};

#[derive(Parser, Debug)]
#[command(name = "curvecast", version, about = "Render animated Bézier explainer diagrams")]
struct Cli {
    /// Maximum log level written to stderr.
    #[arg(long, global = true, default_value_t = tracing::Level::WARN)]
    log_level: tracing::Level,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the available diagrams.
    List,
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render a PNG sequence.
    Frames(FramesArgs),
    /// Render an MP4 video (requires `ffmpeg` on PATH).
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct RenderFlags {
    /// Diagram slug (see `curvecast list`).
    #[arg(long)]
    diagram: String,

    /// Render configuration JSON; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Logical width in pixels.
    #[arg(long)]
    width: Option<f64>,

    /// Logical height in pixels.
    #[arg(long)]
    height: Option<f64>,

    /// Device pixel ratio.
    #[arg(long)]
    dpr: Option<f64>,

    /// Frame rate, `30` or `30000/1001`.
    #[arg(long, value_parser = parse_fps)]
    fps: Option<Fps>,

    /// Render length in seconds (default: one cycle).
    #[arg(long)]
    seconds: Option<f64>,

    /// Font file for labels.
    #[arg(long)]
    font: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    flags: RenderFlags,

    /// Time in seconds.
    #[arg(long, default_value_t = 0.0)]
    time: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct FramesArgs {
    #[command(flatten)]
    flags: RenderFlags,

    /// Output directory for `frame_000000.png` files.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    flags: RenderFlags,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Fail instead of replacing an existing output file.
    #[arg(long)]
    no_overwrite: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::List => cmd_list(),
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn parse_fps(s: &str) -> Result<Fps, String> {
    let (num, den) = match s.split_once('/') {
        Some((n, d)) => (n.trim(), d.trim()),
        None => (s.trim(), "1"),
    };
    let num = num.parse::<u32>().map_err(|e| format!("fps numerator: {e}"))?;
    let den = den.parse::<u32>().map_err(|e| format!("fps denominator: {e}"))?;
    Fps::new(num, den).map_err(|e| e.to_string())
}

fn cmd_list() -> anyhow::Result<()> {
    let mut series = 0;
    let mut section = "";
    for entry in curvecast::entries() {
        if entry.series != series {
            series = entry.series;
            println!("== {} ==", curvecast::series_title(series));
        }
        if entry.section != section {
            section = entry.section;
            println!("{section}");
        }
        println!("  {:<24} {}", entry.slug, entry.title);
    }
    Ok(())
}

fn find_diagram(slug: &str) -> anyhow::Result<&'static DiagramEntry> {
    curvecast::lookup(slug).with_context(|| {
        let known: Vec<_> = curvecast::entries().iter().map(|e| e.slug).collect();
        format!("unknown diagram '{slug}' (known: {})", known.join(", "))
    })
}

fn load_config(flags: &RenderFlags) -> anyhow::Result<RenderConfig> {
    let mut cfg = match &flags.config {
        Some(path) => RenderConfig::from_json_file(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => RenderConfig::default(),
    };
    if let Some(w) = flags.width {
        cfg.width = w;
    }
    if let Some(h) = flags.height {
        cfg.height = h;
    }
    if let Some(dpr) = flags.dpr {
        cfg.device_pixel_ratio = dpr;
    }
    if let Some(fps) = flags.fps {
        cfg.fps = fps;
    }
    if let Some(secs) = flags.seconds {
        cfg.duration_secs = Some(secs);
    }
    if let Some(font) = &flags.font {
        cfg.font_path = Some(font.clone());
    }
    cfg.validate().context("invalid render configuration")?;
    Ok(cfg)
}

fn open_session(flags: &RenderFlags) -> anyhow::Result<(RenderSession, [u8; 3])> {
    let entry = find_diagram(&flags.diagram)?;
    let cfg = load_config(flags)?;
    let background = cfg.background_rgb()?;
    let session = RenderSession::new((entry.build)(), cfg)
        .with_context(|| format!("start diagram '{}'", entry.slug))?;
    if !session.has_font() {
        eprintln!("note: no font configured; labels are not drawn (use --font)");
    }
    Ok((session, background))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (mut session, background) = open_session(&args.flags)?;
    let frame = session
        .render_frame_at(args.time)
        .with_context(|| format!("render frame at {}s", args.time))?;
    ensure_parent_dir(&args.out)?;
    write_png(&args.out, &frame, Some(background))
        .with_context(|| format!("write png '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let (mut session, background) = open_session(&args.flags)?;
    let mut sink = PngSequenceSink::new(&args.out_dir).with_background(background);
    session.render_all(&mut sink).context("render png sequence")?;
    eprintln!(
        "wrote {} frames to {}",
        sink.written().len(),
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    if args.no_overwrite && args.out.exists() {
        anyhow::bail!(
            "output file '{}' already exists (drop --no-overwrite to replace it)",
            args.out.display()
        );
    }
    if !is_ffmpeg_on_path() {
        anyhow::bail!("ffmpeg is required for MP4 output but was not found on PATH");
    }
    let (mut session, background) = open_session(&args.flags)?;
    let mut sink = FfmpegSink::new(FfmpegSinkOpts {
        out_path: args.out.clone(),
        overwrite: !args.no_overwrite,
        background,
    });
    session.render_all(&mut sink).context("render mp4")?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}
