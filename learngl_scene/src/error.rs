use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::render_loop::RenderState;
use crate::shader::ShaderStage;

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("{stage} shader failed to compile:\n{log}")]
    Compile { stage: ShaderStage, log: String },

    #[error("shader program failed to link:\n{log}")]
    Link { log: String },

    #[error("expected a {expected} stage but got a {found} stage")]
    StageMismatch { expected: ShaderStage, found: ShaderStage },
}

#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("geometry has no vertices to upload")]
    Empty,

    #[error("index {index} at position {position} is out of range for {vertex_count} vertices")]
    IndexOutOfRange { position: usize, index: u32, vertex_count: usize },

    #[error("{count} {what} is more than a single draw call can submit")]
    TooLarge { what: &'static str, count: usize },
}

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("couldn't read texture {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("couldn't decode texture {}: {source}", path.display())]
    Decode { path: PathBuf, source: image::ImageError },

    #[error("{len} bytes of pixel data don't make a {width}x{height} RGB image")]
    Dimensions { width: u32, height: u32, len: usize },
}

/// Anything that can go wrong while a scene is being set up.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error(transparent)]
    Shader(#[from] ShaderError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Texture(#[from] TextureError),

    #[error("render loop is {found:?} but needs to be {expected:?}")]
    InvalidState { expected: RenderState, found: RenderState },
}
