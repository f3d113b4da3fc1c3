use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "npzreel", version, about = "Render .npz frame archives to MP4")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Defaults to `render` with its default arguments.
    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render every array of an archive into an MP4 video (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Write a Mandelbrot zoom sequence as an .npz archive.
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
struct StyleArgs {
    /// Palette applied to array values.
    #[arg(long, value_enum, default_value_t = PaletteChoice::Twilight)]
    palette: PaletteChoice,

    /// Reverse the palette.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    reverse: bool,

    /// Integer upscale of each array cell.
    #[arg(long, default_value_t = 1)]
    scale: u32,

    /// Font file for frame titles (defaults to a system sans-serif font).
    #[arg(long)]
    font: Option<PathBuf>,

    /// Print which title font was resolved (family + SHA-256 of font bytes).
    #[arg(long)]
    dump_font: bool,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input .npz archive.
    #[arg(long = "in", default_value = "output.npz")]
    in_path: PathBuf,

    /// Output MP4 path.
    #[arg(long, default_value = "animation.mp4")]
    out: PathBuf,

    /// Output frame rate; also paces the preview window.
    #[arg(long, default_value_t = 15)]
    fps: u32,

    /// Also write every frame as PNG into this directory.
    #[arg(long)]
    png_dir: Option<PathBuf>,

    /// Show the animation in a window while encoding (needs the `preview` feature).
    #[arg(long)]
    preview: bool,

    #[command(flatten)]
    style: StyleArgs,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input .npz archive.
    #[arg(long = "in", default_value = "output.npz")]
    in_path: PathBuf,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    style: StyleArgs,
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Output .npz archive.
    #[arg(long, default_value = "output.npz")]
    out: PathBuf,

    /// Number of frames.
    #[arg(long, default_value_t = 300)]
    frames: usize,

    /// Frame width in pixels.
    #[arg(long, default_value_t = 400)]
    width: usize,

    /// Frame height in pixels.
    #[arg(long, default_value_t = 400)]
    height: usize,

    /// Iteration cap per pixel.
    #[arg(long, default_value_t = 200)]
    max_iterations: u32,

    /// Zoom multiplier per frame.
    #[arg(long, default_value_t = 1.15)]
    zoom: f64,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PaletteChoice {
    Twilight,
    TwilightShifted,
    Gray,
}

impl From<PaletteChoice> for npzreel::PaletteName {
    fn from(c: PaletteChoice) -> Self {
        match c {
            PaletteChoice::Twilight => Self::Twilight,
            PaletteChoice::TwilightShifted => Self::TwilightShifted,
            PaletteChoice::Gray => Self::Gray,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cmd = cli
        .cmd
        .unwrap_or_else(|| Command::Render(RenderArgs::parse_from(["render"])));
    match cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Generate(args) => cmd_generate(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_font(style: &StyleArgs) -> anyhow::Result<Option<npzreel::TitleFont>> {
    let font = match &style.font {
        Some(path) => Some(
            npzreel::TitleFont::from_file(path)
                .with_context(|| format!("load title font '{}'", path.display()))?,
        ),
        None => npzreel::TitleFont::system_sans(),
    };

    if style.dump_font {
        match &font {
            Some(f) => {
                eprintln!("title font:");
                eprintln!("  source: {}", f.source());
                eprintln!("  family: {}", f.family());
                eprintln!("  sha256: {}", f.sha256_hex());
            }
            None => eprintln!("title font: none found (titles will not be drawn)"),
        }
    }
    Ok(font)
}

fn mp4_opts(style: &StyleArgs, fps: u32) -> anyhow::Result<npzreel::RenderToMp4Opts> {
    Ok(npzreel::RenderToMp4Opts {
        fps: npzreel::Fps::whole(fps)?,
        palette: style.palette.into(),
        reverse_palette: style.reverse,
        render: npzreel::RenderOpts {
            scale: style.scale,
            ..npzreel::RenderOpts::default()
        },
        overwrite: true,
    })
}

fn load(path: &Path) -> anyhow::Result<npzreel::FrameSequence> {
    npzreel::load_npz(path).with_context(|| format!("load frames from '{}'", path.display()))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let seq = load(&args.in_path)?;
    let font = resolve_font(&args.style)?;
    let opts = mp4_opts(&args.style, args.fps)?;

    if args.png_dir.is_none() && !args.preview {
        let stats = npzreel::render_to_mp4(&seq, &args.out, &opts, font.as_ref())?;
        eprintln!("wrote {} ({} frames)", args.out.display(), stats.frames_total);
        return Ok(());
    }

    let mut renderer =
        npzreel::FrameRenderer::new(&seq, opts.build_palette(), opts.render.clone(), font.as_ref())?;
    let mut mp4 = npzreel::FfmpegSink::new(npzreel::FfmpegSinkOpts {
        out_path: args.out.clone(),
        overwrite: opts.overwrite,
    });
    let mut png = args.png_dir.as_ref().map(npzreel::PngSequenceSink::new);
    let mut preview = make_preview(args.preview)?;

    let mut tee = npzreel::TeeSink::new().with(&mut mp4);
    if let Some(p) = png.as_mut() {
        tee = tee.with(p);
    }
    if let Some(p) = preview.as_deref_mut() {
        tee = tee.with(p);
    }

    let stats = npzreel::Animator::new(opts.fps).run(&mut renderer, &mut tee)?;
    eprintln!("wrote {} ({} frames)", args.out.display(), stats.frames_total);
    Ok(())
}

#[cfg(feature = "preview")]
fn make_preview(enabled: bool) -> anyhow::Result<Option<Box<dyn npzreel::FrameSink>>> {
    Ok(enabled.then(|| {
        Box::new(npzreel::PreviewSink::new("npzreel", true)) as Box<dyn npzreel::FrameSink>
    }))
}

#[cfg(not(feature = "preview"))]
fn make_preview(enabled: bool) -> anyhow::Result<Option<Box<dyn npzreel::FrameSink>>> {
    if enabled {
        anyhow::bail!("--preview requires npzreel to be built with the `preview` feature");
    }
    Ok(None)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let seq = load(&args.in_path)?;
    let font = resolve_font(&args.style)?;
    let opts = mp4_opts(&args.style, 15)?;

    let mut renderer =
        npzreel::FrameRenderer::new(&seq, opts.build_palette(), opts.render, font.as_ref())?;
    let state = renderer.update(npzreel::FrameIndex(args.frame))?;
    npzreel::write_png(&args.out, &state.frame)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let zoom = npzreel::MandelbrotZoom {
        width: args.width,
        height: args.height,
        frames: args.frames,
        max_iterations: args.max_iterations,
        zoom_factor: args.zoom,
        ..npzreel::MandelbrotZoom::default()
    };
    zoom.write_npz_file(&args.out)
        .with_context(|| format!("generate '{}'", args.out.display()))?;

    eprintln!("wrote {} ({} frames)", args.out.display(), args.frames);
    Ok(())
}
