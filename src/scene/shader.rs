use na::Vector3;
use nalgebra as na;
use tracing::debug;

use super::texture::Texture;
use crate::error::{Error, Result};

/// Upper bound on the varying dimension. Varyings live in fixed-size stack buffers of this length.
pub const VARY_DIM_BOUND: usize = 16;
/// Upper bound on the attribute dimension.
pub const ATTR_DIM_BOUND: usize = 16;

/// Vertex stage: writes the varying vector of one vertex from the uniforms and its attributes.
/// `vary` holds exactly `vary_dim` components.
pub trait VertexShader {
    fn transform(&self, unif: &[f32], attr: &[f32], vary: &mut [f32]);
}

/// Fragment stage: computes the color of one pixel from the uniforms, the textures and the
/// interpolated varying vector. Channels are nominally in [0, 1].
pub trait FragmentShader {
    fn color(&self, unif: &[f32], tex: &[&Texture], vary: &[f32]) -> Vector3<f32>;
}

impl<F> VertexShader for F
where
    F: Fn(&[f32], &[f32], &mut [f32]),
{
    fn transform(&self, unif: &[f32], attr: &[f32], vary: &mut [f32]) {
        self(unif, attr, vary)
    }
}

impl<F> FragmentShader for F
where
    F: Fn(&[f32], &[&Texture], &[f32]) -> Vector3<f32>,
{
    fn color(&self, unif: &[f32], tex: &[&Texture], vary: &[f32]) -> Vector3<f32> {
        self(unif, tex, vary)
    }
}

/// How the rasterizer reads a screen position out of a varying vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// `vary[0]`, `vary[1]` are pixel coordinates and interpolation is linear in screen space.
    /// `depth` names the varying compared against the depth buffer; without one, every fragment
    /// passes and later triangles paint over earlier ones.
    Screen { depth: Option<usize> },
    /// `vary[0..4]` are clip space x, y, z, w. The viewport maps normalized device coordinates
    /// [-1, 1] onto the whole target, z / w is the depth, and interpolation is perspective-correct.
    Clip,
}

impl Projection {
    fn name(&self) -> &'static str {
        return match self {
            Projection::Screen { .. } => "screen",
            Projection::Clip => "clip",
        };
    }

    fn min_vary_dim(&self) -> usize {
        return match self {
            Projection::Screen { .. } => 2,
            Projection::Clip => 4,
        };
    }
}

/// Which screen-space winding gets discarded. Counter-clockwise is front facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Culling {
    #[default]
    None,
    Back,
}

/// Vector dimensionalities and rasterization policy of a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RendererConfig {
    pub attr_dim: usize,
    pub vary_dim: usize,
    pub unif_dim: usize,
    pub tex_num: usize,
    pub projection: Projection,
    pub culling: Culling,
}

impl RendererConfig {
    /// Screen projection without depth test or culling.
    pub fn new(attr_dim: usize, vary_dim: usize, unif_dim: usize, tex_num: usize) -> Self {
        return Self {
            attr_dim,
            vary_dim,
            unif_dim,
            tex_num,
            projection: Projection::Screen { depth: None },
            culling: Culling::None,
        };
    }

    pub fn with_projection(self, projection: Projection) -> Self {
        return Self { projection, ..self };
    }

    pub fn with_culling(self, culling: Culling) -> Self {
        return Self { culling, ..self };
    }

    /// Checks the dimensions against the fixed bounds and the projection mode.
    pub fn validate(&self) -> Result<()> {
        if self.attr_dim == 0 || self.attr_dim > ATTR_DIM_BOUND {
            return Err(Error::AttrDimBound { dim: self.attr_dim, bound: ATTR_DIM_BOUND });
        }
        if self.vary_dim > VARY_DIM_BOUND {
            return Err(Error::VaryDimBound { dim: self.vary_dim, bound: VARY_DIM_BOUND });
        }
        if self.vary_dim < self.projection.min_vary_dim() {
            return Err(Error::VaryDimTooSmall {
                dim: self.vary_dim,
                needed: self.projection.min_vary_dim(),
                projection: self.projection.name(),
            });
        }
        if let Projection::Screen { depth: Some(index) } = self.projection {
            // Components 0 and 1 are the screen position.
            if index < 2 || index >= self.vary_dim {
                return Err(Error::DepthIndex { index, dim: self.vary_dim });
            }
        }
        return Ok(());
    }
}

/// A validated descriptor together with its vertex and fragment stages.
#[derive(Debug, Clone)]
pub struct Renderer<V, F> {
    config: RendererConfig,
    pub vertex: V,
    pub fragment: F,
}

impl<V: VertexShader, F: FragmentShader> Renderer<V, F> {
    /// Fails if the descriptor is out of bounds, so no draw call ever has to.
    pub fn new(config: RendererConfig, vertex: V, fragment: F) -> Result<Self> {
        config.validate()?;
        debug!(?config, "configured renderer");
        return Ok(Self { config, vertex, fragment });
    }

    pub fn config(&self) -> &RendererConfig {
        return &self.config;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pass_through(_: &[f32], attr: &[f32], vary: &mut [f32]) {
        vary.copy_from_slice(&attr[..vary.len()]);
    }

    fn white(_: &[f32], _: &[&Texture], _: &[f32]) -> Vector3<f32> {
        return Vector3::repeat(1.0);
    }

    #[test]
    fn closures_are_stages() {
        let renderer = Renderer::new(RendererConfig::new(4, 4, 0, 0), pass_through, white).unwrap();
        let mut vary = [0.0; 4];
        renderer.vertex.transform(&[], &[1.0, 2.0, 3.0, 4.0], &mut vary);
        assert_eq!(vary, [1.0, 2.0, 3.0, 4.0]);
        assert_eq!(renderer.fragment.color(&[], &[], &vary), Vector3::repeat(1.0));
    }

    #[test]
    fn rejects_out_of_bounds_dimensions() {
        let too_wide = RendererConfig::new(4, VARY_DIM_BOUND + 1, 0, 0);
        assert!(matches!(
            Renderer::new(too_wide, pass_through, white),
            Err(Error::VaryDimBound { dim: 17, bound: 16 })
        ));
        let no_attrs = RendererConfig::new(0, 4, 0, 0);
        assert!(matches!(Renderer::new(no_attrs, pass_through, white), Err(Error::AttrDimBound { .. })));
        let many_attrs = RendererConfig::new(ATTR_DIM_BOUND + 1, 4, 0, 0);
        assert!(matches!(Renderer::new(many_attrs, pass_through, white), Err(Error::AttrDimBound { .. })));
    }

    #[test]
    fn clip_projection_needs_four_components() {
        let config = RendererConfig::new(4, 3, 0, 0).with_projection(Projection::Clip);
        assert!(matches!(
            config.validate(),
            Err(Error::VaryDimTooSmall { dim: 3, needed: 4, projection: "clip" })
        ));
        assert!(config.with_projection(Projection::Screen { depth: None }).validate().is_ok());
    }

    #[test]
    fn depth_index_must_be_a_free_component() {
        let config = RendererConfig::new(4, 4, 0, 0);
        for bad in [0, 1, 4] {
            let config = config.with_projection(Projection::Screen { depth: Some(bad) });
            assert!(matches!(config.validate(), Err(Error::DepthIndex { .. })), "depth {bad}");
        }
        assert!(config.with_projection(Projection::Screen { depth: Some(3) }).validate().is_ok());
    }
}
