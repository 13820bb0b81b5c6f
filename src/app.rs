use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc};
use std::time::Instant;

use anyhow::{bail, Context};
use threadpool::ThreadPool;
use tracing::{debug, info};

use tiny_raster::{Filter, Mesh, Pipeline, Scene, Texture, Wrap};

/// Execution parameters of a run, filled in from the command line.
#[derive(Debug, Clone)]
pub struct Params {
    pub width: u32,
    pub height: u32,
    pub frames: u32,
    pub step: f32,
    pub output_dir: PathBuf,
    pub pipeline_name: String,
    pub texture_path: Option<PathBuf>,
    pub model_path: Option<PathBuf>,
    pub filter: Filter,
    pub wrap: Wrap,
    pub toggle_every: Option<u32>,
    pub workers: usize,
}

/// Everything a frame needs, read-only and shared by all workers.
struct Assets {
    pipeline: Pipeline,
    mesh: Mesh,
    // The second texture has the other filter mode.
    textures: [Texture; 2],
}

/// Renders `params.frames` frames on a worker pool, each turned `params.step` degrees further
/// than the previous one, and writes them as numbered PNG files.
pub fn run(params: Params) -> anyhow::Result<()> {
    let pipeline = Pipeline::by_name(&params.pipeline_name)?;
    let mesh = match &params.model_path {
        Some(path) => Mesh::load_obj(path).with_context(|| format!("loading model {}", path.display()))?,
        None => default_quad(&pipeline, params.width, params.height)?,
    };
    if mesh.attr_dim() != pipeline.config().attr_dim {
        bail!(
            "model has {} attributes per vertex, the {} pipeline needs {}",
            mesh.attr_dim(),
            pipeline.name(),
            pipeline.config().attr_dim
        );
    }
    info!(pipeline = pipeline.name(), vertices = mesh.vert_num(), triangles = mesh.tri_num(), "mesh ready");

    let mut texture = match &params.texture_path {
        Some(path) => Texture::from_file(path).with_context(|| format!("loading texture {}", path.display()))?,
        None => checkerboard()?,
    };
    texture.set_filter(params.filter);
    texture.set_wrap(params.wrap, params.wrap);
    let mut toggled = texture.clone();
    toggled.toggle_filter();

    fs::create_dir_all(&params.output_dir)
        .with_context(|| format!("creating output directory {}", params.output_dir.display()))?;

    let assets = Arc::new(Assets { pipeline, mesh, textures: [texture, toggled] });
    let pool = ThreadPool::new(params.workers.max(1));
    let (sender, receiver) = mpsc::channel();
    let started = Instant::now();
    for frame in 0..params.frames {
        let assets = Arc::clone(&assets);
        let sender = sender.clone();
        let path = params.output_dir.join(format!("frame_{frame:04}.png"));
        let angle = frame as f32 * params.step;
        let texture_index = match params.toggle_every {
            Some(every) if every > 0 => ((frame / every) % 2) as usize,
            _ => 0,
        };
        let (width, height) = (params.width, params.height);
        pool.execute(move || {
            let result = render_frame(&assets, angle, texture_index, width, height, &path).map(|()| path);
            // The receiver only goes away once the main thread has given up on the run.
            let _ = sender.send((frame, result));
        });
    }
    drop(sender);

    for (frame, result) in receiver.iter() {
        let path = result.with_context(|| format!("rendering frame {frame}"))?;
        info!(frame, path = %path.display(), "wrote frame");
    }
    pool.join();
    info!(frames = params.frames, elapsed = ?started.elapsed(), "done");

    return Ok(());
}

fn render_frame(
    assets: &Assets,
    angle: f32,
    texture_index: usize,
    width: u32,
    height: u32,
    path: &Path,
) -> tiny_raster::Result<()> {
    let texture = &assets.textures[texture_index];
    let unif = assets.pipeline.uniforms(angle, width, height);
    let mut scene = Scene::new(width, height);
    assets.pipeline.render(&assets.mesh, &unif, &[texture], &mut scene)?;
    debug!(angle, filter = ?texture.filter(), "rendered frame");
    return scene.save_png(path);
}

/// Textured square matching the pipeline's vertex layout: `x y s t` in pixels around the origin
/// for the flat pipeline, `x y z s t nx ny nz` in model units for the perspective one.
fn default_quad(pipeline: &Pipeline, width: u32, height: u32) -> tiny_raster::Result<Mesh> {
    let corners = [[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]];
    let mut mesh = Mesh::new(pipeline.config().attr_dim, 4, 2)?;
    for (i, [x, y]) in corners.into_iter().enumerate() {
        let (s, t) = ((x + 1.0) / 2.0, (y + 1.0) / 2.0);
        match pipeline {
            Pipeline::Flat(_) => {
                let half = 0.3 * width.min(height) as f32;
                mesh.set_vertex(i, &[x * half, y * half, s, t])?;
            }
            Pipeline::Perspective(_) => {
                mesh.set_vertex(i, &[x, y, 0.0, s, t, 0.0, 0.0, 1.0])?;
            }
        }
    }
    mesh.set_triangle(0, [0, 1, 2])?;
    mesh.set_triangle(1, [0, 2, 3])?;
    return Ok(mesh);
}

/// 8x8 checkerboard, used when no texture file is given.
fn checkerboard() -> tiny_raster::Result<Texture> {
    return Texture::from_fn(8, 8, |x, y| match (x + y) % 2 {
        0 => [230, 230, 230],
        _ => [200, 40, 40],
    });
}
