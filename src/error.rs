/// Errors reported while setting up rendering: descriptor validation, mesh construction and
/// asset loading. Once a draw call starts it cannot fail.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("varying dimension {dim} exceeds bound {bound}")]
    VaryDimBound { dim: usize, bound: usize },
    #[error("attribute dimension {dim} must be in 1..={bound}")]
    AttrDimBound { dim: usize, bound: usize },
    #[error("varying dimension {dim} too small for {projection} projection, needs {needed}")]
    VaryDimTooSmall {
        dim: usize,
        needed: usize,
        projection: &'static str,
    },
    #[error("depth varying {index} is not a usable component of a {dim}-dimensional varying")]
    DepthIndex { index: usize, dim: usize },
    #[error("vertex count {count} exceeds bound {bound}")]
    VertNumBound { count: usize, bound: usize },
    #[error("vertex data of length {len} is not a multiple of attribute dimension {attr_dim}")]
    VertexData { len: usize, attr_dim: usize },
    #[error("vertex {index} out of range, mesh has {count} vertices")]
    VertexIndex { index: usize, count: usize },
    #[error("triangle {index} out of range, mesh has {count} triangles")]
    TriangleIndex { index: usize, count: usize },
    #[error("vertex {index} has {got} attributes, expected {expected}")]
    AttrLength {
        index: usize,
        got: usize,
        expected: usize,
    },
    #[error("mesh attribute dimension {mesh} does not match renderer attribute dimension {renderer}")]
    AttrDimMismatch { mesh: usize, renderer: usize },
    #[error("texture has zero size")]
    EmptyTexture,
    #[error("unknown pipeline: {0}")]
    UnknownPipeline(String),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("OBJ error: {0}")]
    Obj(#[from] obj::ObjError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
