use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use obj::{load_obj, Obj, TexturedVertex};
use tracing::debug;

use super::raster::render_triangle;
use super::shader::{FragmentShader, Renderer, VertexShader, ATTR_DIM_BOUND};
use super::texture::Texture;
use super::Target;
use crate::error::{Error, Result};

/// Upper bound on the number of vertices of a mesh.
pub const VERT_NUM_BOUND: usize = 65_536;

/// Attribute dimension of meshes loaded from OBJ files: position, texture coordinates, normal.
pub const OBJ_ATTR_DIM: usize = 8;

/// Vertices, each an attribute vector of `attr_dim` floats, and triangles referencing them by
/// index. Every index is smaller than the vertex count.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    attr_dim: usize,
    vertices: Vec<f32>, // vert_num * attr_dim floats, vertex after vertex.
    triangles: Vec<[usize; 3]>,
}

impl Mesh {
    /// Mesh with zeroed vertices and triangles, to be filled with `set_vertex` and
    /// `set_triangle`.
    pub fn new(attr_dim: usize, vert_num: usize, tri_num: usize) -> Result<Self> {
        check_bounds(attr_dim, vert_num)?;
        if vert_num == 0 && tri_num > 0 {
            return Err(Error::VertexIndex { index: 0, count: 0 });
        }
        return Ok(Self {
            attr_dim,
            vertices: vec![0.0; attr_dim * vert_num],
            triangles: vec![[0; 3]; tri_num],
        });
    }

    /// Takes ownership of already populated storage, validating it.
    pub fn from_parts(attr_dim: usize, vertices: Vec<f32>, triangles: Vec<[usize; 3]>) -> Result<Self> {
        if attr_dim == 0 || attr_dim > ATTR_DIM_BOUND {
            return Err(Error::AttrDimBound { dim: attr_dim, bound: ATTR_DIM_BOUND });
        }
        if vertices.len() % attr_dim != 0 {
            return Err(Error::VertexData { len: vertices.len(), attr_dim });
        }
        let vert_num = vertices.len() / attr_dim;
        check_bounds(attr_dim, vert_num)?;
        for &index in triangles.iter().flatten() {
            if index >= vert_num {
                return Err(Error::VertexIndex { index, count: vert_num });
            }
        }
        return Ok(Self { attr_dim, vertices, triangles });
    }

    /// Loads a Wavefront OBJ file whose faces carry texture coordinates and normals. Each vertex
    /// becomes `x y z s t nx ny nz`.
    pub fn load_obj(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let model: Obj<TexturedVertex, u32> = load_obj(BufReader::new(File::open(path)?))?;
        let mut vertices = Vec::with_capacity(OBJ_ATTR_DIM * model.vertices.len());
        for vertex in &model.vertices {
            vertices.extend_from_slice(&vertex.position);
            vertices.extend_from_slice(&vertex.texture[..2]);
            vertices.extend_from_slice(&vertex.normal);
        }
        let triangles = model
            .indices
            .chunks_exact(3)
            .map(|tri| [tri[0] as usize, tri[1] as usize, tri[2] as usize])
            .collect();
        let mesh = Self::from_parts(OBJ_ATTR_DIM, vertices, triangles)?;
        debug!(
            path = %path.display(),
            vertices = mesh.vert_num(),
            triangles = mesh.tri_num(),
            "loaded OBJ mesh"
        );
        return Ok(mesh);
    }

    pub fn attr_dim(&self) -> usize {
        return self.attr_dim;
    }

    pub fn vert_num(&self) -> usize {
        return self.vertices.len() / self.attr_dim;
    }

    pub fn tri_num(&self) -> usize {
        return self.triangles.len();
    }

    pub fn vertex(&self, index: usize) -> Option<&[f32]> {
        if index >= self.vert_num() {
            return None;
        }
        return Some(&self.vertices[index * self.attr_dim..(index + 1) * self.attr_dim]);
    }

    pub fn triangle(&self, index: usize) -> Option<[usize; 3]> {
        return self.triangles.get(index).copied();
    }

    /// Overwrites the attribute vector of vertex `index`.
    pub fn set_vertex(&mut self, index: usize, attr: &[f32]) -> Result<()> {
        let count = self.vert_num();
        if index >= count {
            return Err(Error::VertexIndex { index, count });
        }
        if attr.len() != self.attr_dim {
            return Err(Error::AttrLength { index, got: attr.len(), expected: self.attr_dim });
        }
        self.vertices[index * self.attr_dim..(index + 1) * self.attr_dim].copy_from_slice(attr);
        return Ok(());
    }

    /// Overwrites triangle `index`; all three vertex indices must be in range.
    pub fn set_triangle(&mut self, index: usize, tri: [usize; 3]) -> Result<()> {
        let count = self.tri_num();
        if index >= count {
            return Err(Error::TriangleIndex { index, count });
        }
        let vert_num = self.vert_num();
        if let Some(&bad) = tri.iter().find(|&&i| i >= vert_num) {
            return Err(Error::VertexIndex { index: bad, count: vert_num });
        }
        self.triangles[index] = tri;
        return Ok(());
    }

    /// Rasterizes every triangle in index order. Triangles interact only through the depth
    /// buffer of `target`.
    pub fn render<V, F, T>(
        &self,
        renderer: &Renderer<V, F>,
        unif: &[f32],
        tex: &[&Texture],
        target: &mut T,
    ) -> Result<()>
    where
        V: VertexShader,
        F: FragmentShader,
        T: Target + ?Sized,
    {
        let renderer_dim = renderer.config().attr_dim;
        if renderer_dim != self.attr_dim {
            return Err(Error::AttrDimMismatch { mesh: self.attr_dim, renderer: renderer_dim });
        }
        let dim = self.attr_dim;
        let attr = |i: usize| &self.vertices[i * dim..(i + 1) * dim];
        for &[a, b, c] in &self.triangles {
            render_triangle(renderer, unif, tex, [attr(a), attr(b), attr(c)], target);
        }
        return Ok(());
    }
}

fn check_bounds(attr_dim: usize, vert_num: usize) -> Result<()> {
    if attr_dim == 0 || attr_dim > ATTR_DIM_BOUND {
        return Err(Error::AttrDimBound { dim: attr_dim, bound: ATTR_DIM_BOUND });
    }
    if vert_num > VERT_NUM_BOUND {
        return Err(Error::VertNumBound { count: vert_num, bound: VERT_NUM_BOUND });
    }
    return Ok(());
}
