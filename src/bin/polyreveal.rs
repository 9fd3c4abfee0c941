use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use sha2::Digest as _;

#[derive(Parser, Debug)]
#[command(name = "polyreveal", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame of the reveal as a PNG.
    Frame(FrameArgs),
    /// Render every frame of the reveal as numbered PNGs.
    Frames(FramesArgs),
    /// Render the reveal as an MP4 video (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Print what the region file normalizes to.
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Input region JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Canvas width in pixels.
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Canvas height in pixels.
    #[arg(long, default_value_t = 800)]
    height: u32,

    /// Blank border kept around the drawing, in pixels.
    #[arg(long, default_value_t = 100.0)]
    margin: f64,

    /// Stroke weight of the outline being traced.
    #[arg(long, default_value_t = 2.0)]
    stroke_width: f64,

    /// Font file for error text (defaults to a system sans-serif face).
    #[arg(long)]
    font: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Frame index (0-based). Indices past the end render the final picture.
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Output directory for `frame_NNNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,

    /// Stop after this many frames.
    #[arg(long)]
    max_frames: Option<u64>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Frames per second.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Keep the finished picture on screen for this many seconds.
    #[arg(long, default_value_t = 0.0)]
    hold_secs: f64,

    /// Fail instead of overwriting an existing output file.
    #[arg(long)]
    no_overwrite: bool,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Also print which font error text would use (family/path + SHA-256 of font bytes).
    #[arg(long)]
    dump_font: bool,
}

fn main() -> anyhow::Result<()> {
    enable_tracing();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Render(args) => cmd_render(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn enable_tracing() {
    use tracing_subscriber::{EnvFilter, fmt};

    let format = fmt::format().without_time().with_target(false).compact();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .event_format(format)
        .init();
}

fn session_opts(common: &CommonArgs) -> polyreveal::SessionOpts {
    polyreveal::SessionOpts {
        style: polyreveal::FrameStyle {
            canvas: polyreveal::Canvas {
                width: common.width,
                height: common.height,
            },
            stroke_width: common.stroke_width,
            ..polyreveal::FrameStyle::default()
        },
        margin: common.margin,
        ..polyreveal::SessionOpts::default()
    }
}

fn make_backend(common: &CommonArgs) -> polyreveal::CpuBackend {
    polyreveal::CpuBackend::new(polyreveal::CpuBackendOpts {
        font_path: common.font.clone(),
    })
}

fn bg_rgba(opts: &polyreveal::SessionOpts) -> [u8; 4] {
    opts.style.background.to_rgba8()
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let opts = session_opts(&args.common);
    let bg = bg_rgba(&opts);
    let session = polyreveal::RevealSession::open(&args.common.in_path, opts);
    let mut backend = make_backend(&args.common);

    let frame = session
        .render_frame(polyreveal::FrameIndex(args.frame), &mut backend)
        .with_context(|| format!("render frame {}", args.frame))?;

    polyreveal::write_png(&args.out, &frame, bg)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    report_load_error(&session);
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let mut opts = session_opts(&args.common);
    opts.max_frames = args.max_frames;
    let bg = bg_rgba(&opts);
    let mut session = polyreveal::RevealSession::open(&args.common.in_path, opts);
    let mut backend = make_backend(&args.common);

    let mut sink = polyreveal::PngSequenceSink::new(&args.out_dir).with_background(bg);
    let stats = session.render_all(&mut backend, &mut sink)?;

    report_load_error(&session);
    eprintln!(
        "wrote {} frames to {}",
        stats.frames_total,
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut opts = session_opts(&args.common);
    opts.fps = polyreveal::Fps::new(args.fps, 1)?;
    opts.hold_frames = opts.fps.secs_to_frames_ceil(args.hold_secs);
    let bg = bg_rgba(&opts);
    let mut session = polyreveal::RevealSession::open(&args.common.in_path, opts);
    let mut backend = make_backend(&args.common);

    let mut sink = polyreveal::FfmpegSink::new(polyreveal::FfmpegSinkOpts {
        out_path: args.out.clone(),
        overwrite: !args.no_overwrite,
        bg_rgba: bg,
    });
    session.render_all(&mut backend, &mut sink)?;

    report_load_error(&session);
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let opts = session_opts(&args.common);
    let session = polyreveal::RevealSession::open(&args.common.in_path, opts);

    match session.scene() {
        Some(scene) => {
            let b = scene.bounds();
            println!("regions: {}", scene.regions().len());
            println!("points:  {}", scene.total_points());
            println!("frames:  {}", scene.total_frames());
            println!("bounds:  ({}, {}) - ({}, {})", b.x0, b.y0, b.x1, b.y1);
            println!("center:  ({}, {})", scene.center().x, scene.center().y);
            println!("scale:   {}", scene.scale());
            for r in scene.regions() {
                println!(
                    "  {}: {} points, color [{}, {}, {}]",
                    r.label,
                    r.points.len(),
                    r.color.r,
                    r.color.g,
                    r.color.b
                );
            }
        }
        None => report_load_error(&session),
    }

    if args.dump_font {
        dump_font_diagnostics(&args.common)?;
    }
    Ok(())
}

fn report_load_error(session: &polyreveal::RevealSession) {
    if let Some(err) = session.load_error() {
        eprintln!("load error (shown on canvas): {err}");
    }
}

fn dump_font_diagnostics(common: &CommonArgs) -> anyhow::Result<()> {
    let mut backend = make_backend(common);
    eprintln!("text font diagnostics:");
    match backend.font()? {
        Some(font) => {
            eprintln!("  origin: {}", font.origin);
            eprintln!("  index:  {}", font.index);
            eprintln!("  sha256: {}", sha256_hex(&font.bytes));
        }
        None => eprintln!("  no font available"),
    }
    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}

