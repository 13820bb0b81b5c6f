mod app;

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use tiny_raster::{Filter, Wrap};

#[derive(Parser)]
#[command(name = "tiny_raster", about = "Renders animation frames with the software rasterizer")]
struct Cli {
    /// Directory the PNG frames are written to
    #[arg(short, long, default_value = "frames")]
    output: PathBuf,

    #[arg(long, default_value_t = 512)]
    width: u32,

    #[arg(long, default_value_t = 512)]
    height: u32,

    /// Number of frames to render
    #[arg(short = 'n', long, default_value_t = 24)]
    frames: u32,

    /// Rotation between consecutive frames, in degrees
    #[arg(long, default_value_t = 15.0)]
    step: f32,

    /// Shader pipeline: flat or perspective
    #[arg(short = 's', long, default_value = "flat")]
    pipeline: String,

    /// Texture image; a checkerboard is used when absent
    #[arg(short, long)]
    texture: Option<PathBuf>,

    /// Wavefront OBJ model with texture coordinates and normals; a square is used when absent
    #[arg(short = 'p', long)]
    model: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = FilterArg::Nearest)]
    filter: FilterArg,

    #[arg(long, value_enum, default_value_t = WrapArg::Clamp)]
    wrap: WrapArg,

    /// Switch between nearest and bilinear filtering every N frames
    #[arg(long)]
    toggle_every: Option<u32>,

    /// Number of worker threads
    #[arg(short = 'j', long, default_value_t = 4)]
    workers: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum FilterArg {
    Nearest,
    Bilinear,
}

#[derive(Clone, Copy, ValueEnum)]
enum WrapArg {
    Clamp,
    Repeat,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let params = app::Params {
        width: cli.width,
        height: cli.height,
        frames: cli.frames,
        step: cli.step,
        output_dir: cli.output,
        pipeline_name: cli.pipeline,
        texture_path: cli.texture,
        model_path: cli.model,
        filter: match cli.filter {
            FilterArg::Nearest => Filter::Nearest,
            FilterArg::Bilinear => Filter::Bilinear,
        },
        wrap: match cli.wrap {
            WrapArg::Clamp => Wrap::Clamp,
            WrapArg::Repeat => Wrap::Repeat,
        },
        toggle_every: cli.toggle_every,
        workers: cli.workers,
    };

    app::run(params)?;

    return Ok(());
}
