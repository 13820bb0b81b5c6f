//! Programmable software rasterizer.
//!
//! A triangle is three attribute vectors. A user-supplied vertex stage turns each one into a
//! varying vector, the rasterizer scans the triangle's pixels, interpolates the varyings, runs a
//! user-supplied fragment stage and writes the resulting color into a [`scene::Scene`] subject to
//! a depth test. Meshes decompose into per-triangle draws.

pub mod error;
pub mod scene;

pub use error::{Error, Result};
pub use scene::mesh::{Mesh, OBJ_ATTR_DIM, VERT_NUM_BOUND};
pub use scene::pipeline::Pipeline;
pub use scene::shader::{
    Culling, FragmentShader, Projection, Renderer, RendererConfig, VertexShader, ATTR_DIM_BOUND,
    VARY_DIM_BOUND,
};
pub use scene::texture::{Filter, Texture, Wrap};
pub use scene::{Scene, Target};
