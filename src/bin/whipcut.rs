use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "whipcut", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single transition step as a PNG.
    Frame(FrameArgs),
    /// Render the full transition as an MP4 (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Print per-step transition parameters as JSON.
    Params(ParamsArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Outgoing image.
    #[arg(long)]
    from: PathBuf,

    /// Incoming image.
    #[arg(long)]
    to: PathBuf,

    /// Step index (0-based).
    #[arg(long)]
    step: u64,

    /// Total steps in the run (>= 2).
    #[arg(long, default_value_t = 30)]
    steps: u64,

    /// Transition kind (dissolve, blur, whip_pan, wipe, comparison).
    #[arg(long, default_value = "dissolve")]
    kind: String,

    /// Travel direction for directional kinds (left, right, up, down).
    #[arg(long)]
    direction: Option<String>,

    /// Wipe edge softness as a share of the axis, 0..=1.
    #[arg(long)]
    soft_edge: Option<f64>,

    /// Canvas width inputs are scaled to.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Canvas height inputs are scaled to.
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Outgoing clip (video, or a still image repeated every step).
    #[arg(long)]
    from: PathBuf,

    /// Incoming clip (video, or a still image repeated every step).
    #[arg(long)]
    to: PathBuf,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Overwrite output if it already exists.
    #[arg(long, default_value_t = true)]
    overwrite: bool,

    /// Transition kind (dissolve, blur, whip_pan, wipe, comparison).
    #[arg(long, default_value = "dissolve")]
    kind: String,

    /// Travel direction for directional kinds (left, right, up, down).
    #[arg(long)]
    direction: Option<String>,

    /// Wipe edge softness as a share of the axis, 0..=1.
    #[arg(long)]
    soft_edge: Option<f64>,

    /// Total steps in the run (>= 2).
    #[arg(long, default_value_t = 30)]
    steps: u64,

    /// Output frame rate.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Canvas width inputs are scaled to.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Canvas height inputs are scaled to.
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Render chunk size (parallel mode only).
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,
}

#[derive(Parser, Debug)]
struct ParamsArgs {
    /// Transition kind (dissolve, blur, whip_pan, wipe, comparison).
    #[arg(long, default_value = "dissolve")]
    kind: String,

    /// Travel direction for directional kinds (left, right, up, down).
    #[arg(long)]
    direction: Option<String>,

    /// Wipe edge softness as a share of the axis, 0..=1.
    #[arg(long)]
    soft_edge: Option<f64>,

    /// Total steps in the run (>= 2).
    #[arg(long, default_value_t = 30)]
    steps: u64,

    /// Canvas width, used for pixel-valued parameters.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Canvas height, used for pixel-valued parameters.
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Print a single step instead of all of them.
    #[arg(long)]
    step: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => run_frame(args),
        Command::Render(args) => run_render(args),
        Command::Params(args) => run_params(args),
    }
}

fn parse_kind(
    kind: &str,
    direction: Option<&str>,
    soft_edge: Option<f64>,
) -> anyhow::Result<whipcut::TransitionKind> {
    let mut params = serde_json::Map::new();
    if let Some(dir) = direction {
        params.insert("direction".into(), serde_json::Value::from(dir));
    }
    if let Some(soft) = soft_edge {
        params.insert("soft_edge".into(), serde_json::Value::from(soft));
    }
    Ok(whipcut::parse_transition_parts(
        kind,
        &serde_json::Value::Object(params),
    )?)
}

fn build_pipeline(
    kind: whipcut::TransitionKind,
    canvas: whipcut::Canvas,
    fps: u32,
    total_steps: u64,
) -> anyhow::Result<whipcut::TransitionPipeline> {
    Ok(whipcut::TransitionPipeline::new(whipcut::PipelineConfig {
        canvas,
        fps: whipcut::Fps::new(fps, 1)?,
        total_steps,
        kind,
    })?)
}

fn open_source(
    path: &Path,
    canvas: whipcut::Canvas,
) -> anyhow::Result<Box<dyn whipcut::FrameSource>> {
    // Paths with a known image extension are treated as stills and repeated;
    // everything else goes through ffmpeg.
    if image::ImageFormat::from_path(path).is_ok() {
        let frame = whipcut::scale_to_canvas(&whipcut::load_image_rgb(path)?, canvas)?;
        return Ok(Box::new(whipcut::StillSource::new(frame)));
    }
    Ok(Box::new(whipcut::FfmpegSource::open(path, canvas)?))
}

fn run_frame(args: FrameArgs) -> anyhow::Result<()> {
    let kind = parse_kind(&args.kind, args.direction.as_deref(), args.soft_edge)?;
    let canvas = whipcut::Canvas {
        width: args.width,
        height: args.height,
    };
    let pipeline = build_pipeline(kind, canvas, 30, args.steps)?;

    let outgoing = whipcut::scale_to_canvas(&whipcut::load_image_rgb(&args.from)?, canvas)?;
    let incoming = whipcut::scale_to_canvas(&whipcut::load_image_rgb(&args.to)?, canvas)?;
    let frame = pipeline.render_step(args.step, &outgoing, &incoming)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("preparing output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        frame.data(),
        frame.width(),
        frame.height(),
        image::ColorType::Rgb8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("encoding png '{}'", args.out.display()))?;

    eprintln!("saved step {} to {}", args.step, args.out.display());
    Ok(())
}

fn run_render(args: RenderArgs) -> anyhow::Result<()> {
    let kind = parse_kind(&args.kind, args.direction.as_deref(), args.soft_edge)?;
    let canvas = whipcut::Canvas {
        width: args.width,
        height: args.height,
    };
    let pipeline = build_pipeline(kind, canvas, args.fps, args.steps)?;

    let mut outgoing = open_source(&args.from, canvas)?;
    let mut incoming = open_source(&args.to, canvas)?;
    let mut sink = whipcut::FfmpegSink::new(whipcut::FfmpegSinkOpts {
        path: args.out.clone(),
        overwrite: args.overwrite,
    });
    let threading = whipcut::RenderThreading {
        parallel: args.parallel,
        chunk_size: args.chunk_size,
        threads: args.threads,
    };

    let stats = pipeline.run(outgoing.as_mut(), incoming.as_mut(), &mut sink, &threading)?;
    if stats.truncated {
        eprintln!(
            "input ended early: wrote {} of {} frames",
            stats.frames_emitted, stats.steps_total
        );
    }

    eprintln!(
        "saved {} frames to {}",
        stats.frames_emitted,
        args.out.display()
    );
    Ok(())
}

fn run_params(args: ParamsArgs) -> anyhow::Result<()> {
    let kind = parse_kind(&args.kind, args.direction.as_deref(), args.soft_edge)?;
    let canvas = whipcut::Canvas {
        width: args.width,
        height: args.height,
    };
    let pipeline = build_pipeline(kind, canvas, 30, args.steps)?;

    match args.step {
        Some(step) => {
            let params = pipeline.step_params(step)?;
            println!("{}", serde_json::to_string_pretty(&params)?);
        }
        None => {
            let all = (0..args.steps)
                .map(|step| pipeline.step_params(step))
                .collect::<Result<Vec<_>, _>>()?;
            println!("{}", serde_json::to_string_pretty(&all)?);
        }
    }
    Ok(())
}
