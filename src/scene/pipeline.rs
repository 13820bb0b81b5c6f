//! Ready-made stage pairs, selectable by name from the command line.
//!
//! * `flat`: 2D rotation and translation in pixel space, colored by texture 0.
//! * `perspective`: 3D model through a clip space matrix with diffuse lighting, depth tested and
//!   back-face culled.

use std::f32::consts::FRAC_PI_3;

use na::{vector, Matrix4, Vector3};
use nalgebra as na;

use super::mesh::{Mesh, OBJ_ATTR_DIM};
use super::shader::{Culling, FragmentShader, Projection, Renderer, RendererConfig, VertexShader};
use super::texture::Texture;
use super::util::{angle_axis_rotation, isometry, perspective, rotation_2d, to_hom_point};
use super::Target;
use crate::error::{Error, Result};

/// Lower bound on diffuse intensity, so faces turned away from the light stay visible.
pub const AMBIENT: f32 = 0.3;

/// Rotates `(x, y)` by `unif[0]` degrees counter-clockwise, then translates by
/// `(unif[1], unif[2])`. Texture coordinates `attr[2..4]` pass through.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rotate2d;

impl VertexShader for Rotate2d {
    fn transform(&self, unif: &[f32], attr: &[f32], vary: &mut [f32]) {
        let rotated = rotation_2d(unif[0].to_radians()) * vector![attr[0], attr[1]];
        vary[0] = rotated.x + unif[1];
        vary[1] = rotated.y + unif[2];
        vary[2] = attr[2];
        vary[3] = attr[3];
    }
}

/// Texture 0 sampled at `(vary[2], vary[3])`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextureColor;

impl FragmentShader for TextureColor {
    fn color(&self, _: &[f32], tex: &[&Texture], vary: &[f32]) -> Vector3<f32> {
        return tex[0].sample(vary[2], vary[3]);
    }
}

/// Multiplies the position by the column-major matrix `unif[0..16]`. Texture coordinates and
/// the normal pass through in model space.
#[derive(Debug, Clone, Copy, Default)]
pub struct Perspective3d;

impl VertexShader for Perspective3d {
    fn transform(&self, unif: &[f32], attr: &[f32], vary: &mut [f32]) {
        let clip_from_model = Matrix4::from_column_slice(&unif[..16]);
        let clip = clip_from_model * to_hom_point(vector![attr[0], attr[1], attr[2]]);
        vary[..4].copy_from_slice(clip.as_slice());
        vary[4..9].copy_from_slice(&attr[3..8]);
    }
}

/// Texture 0 at `(vary[4], vary[5])`, scaled by the diffuse intensity of the normal
/// `vary[6..9]` towards the model space light direction `unif[16..19]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiffuseTextured;

impl FragmentShader for DiffuseTextured {
    fn color(&self, unif: &[f32], tex: &[&Texture], vary: &[f32]) -> Vector3<f32> {
        let light = vector![unif[16], unif[17], unif[18]];
        let normal = vector![vary[6], vary[7], vary[8]];
        // Interpolated normals can cancel out; such fragments only get the ambient term.
        let intensity = match (normal.try_normalize(f32::EPSILON), light.try_normalize(f32::EPSILON)) {
            (Some(n), Some(l)) => n.dot(&l).max(AMBIENT),
            _ => AMBIENT,
        };
        return tex[0].sample(vary[4], vary[5]) * intensity;
    }
}

/// One of the built-in renderers.
#[derive(Debug, Clone)]
pub enum Pipeline {
    Flat(Renderer<Rotate2d, TextureColor>),
    Perspective(Renderer<Perspective3d, DiffuseTextured>),
}

impl Pipeline {
    pub const NAMES: [&'static str; 2] = ["flat", "perspective"];

    pub fn flat() -> Result<Self> {
        let config = RendererConfig::new(4, 4, 3, 1);
        return Ok(Pipeline::Flat(Renderer::new(config, Rotate2d, TextureColor)?));
    }

    pub fn perspective() -> Result<Self> {
        let config = RendererConfig::new(OBJ_ATTR_DIM, 9, 19, 1)
            .with_projection(Projection::Clip)
            .with_culling(Culling::Back);
        return Ok(Pipeline::Perspective(Renderer::new(config, Perspective3d, DiffuseTextured)?));
    }

    pub fn by_name(name: &str) -> Result<Self> {
        return match name {
            "flat" => Self::flat(),
            "perspective" => Self::perspective(),
            _ => Err(Error::UnknownPipeline(name.to_string())),
        };
    }

    pub fn name(&self) -> &'static str {
        return match self {
            Pipeline::Flat(_) => "flat",
            Pipeline::Perspective(_) => "perspective",
        };
    }

    pub fn config(&self) -> &RendererConfig {
        return match self {
            Pipeline::Flat(renderer) => renderer.config(),
            Pipeline::Perspective(renderer) => renderer.config(),
        };
    }

    /// Uniforms showing a model turned by `angle` degrees on a `width` x `height` target. The flat
    /// pipeline spins around the target center; the perspective one turns the model about the
    /// vertical axis in front of the camera, lit from above and behind the viewer.
    pub fn uniforms(&self, angle: f32, width: u32, height: u32) -> Vec<f32> {
        let (width, height) = (width as f32, height as f32);
        return match self {
            Pipeline::Flat(_) => vec![angle, width / 2.0, height / 2.0],
            Pipeline::Perspective(_) => {
                let rotation = angle_axis_rotation(angle.to_radians(), Vector3::y());
                let view_from_model = isometry(rotation, vector![0.0, 0.0, -3.0]);
                let clip_from_model = perspective(FRAC_PI_3, width / height, 0.1, 100.0) * view_from_model;
                let toward_light: Vector3<f32> = vector![0.0, 0.5, 1.0];
                // Normals stay in model space, so the light is turned back into it.
                let light = rotation.transpose() * toward_light.normalize();
                let mut unif = clip_from_model.as_slice().to_vec();
                unif.extend_from_slice(light.as_slice());
                unif
            }
        };
    }

    /// Renders `mesh` with this pipeline's stages.
    pub fn render<T: Target + ?Sized>(&self, mesh: &Mesh, unif: &[f32], tex: &[&Texture], target: &mut T) -> Result<()> {
        return match self {
            Pipeline::Flat(renderer) => mesh.render(renderer, unif, tex, target),
            Pipeline::Perspective(renderer) => mesh.render(renderer, unif, tex, target),
        };
    }
}
