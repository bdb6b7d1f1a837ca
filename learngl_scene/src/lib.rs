//! Everything the demos need that doesn't touch a live GL context.
//!
//! The GPU is reached only through the [`Device`](device::Device) trait and the window only
//! through the [`Surface`](surface::Surface) trait, so geometry staging, shader building, texture
//! upload and the render loop itself can all be driven by a recording device in tests.

#[macro_use] extern crate lazy_static;

pub mod config;
pub mod device;
pub mod error;
pub mod geometry;
pub mod render_loop;
pub mod shader;
pub mod surface;
pub mod texture;
pub mod vertex;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use config::{SurfaceConfig, BACKGROUND};
pub use device::{BufferTarget, Device, Handle};
pub use error::{GeometryError, SceneError, ShaderError, TextureError};
pub use geometry::{GeometryBuilder, Mesh};
pub use render_loop::{RenderLoop, RenderState, Scene};
pub use shader::{CompiledStage, Program, ShaderStage};
pub use surface::{InputState, Key, Surface, SurfaceEvent};
pub use texture::{Texture, TextureImage, TextureParams};
pub use vertex::{ColoredVertex, TexturedVertex, Vertex, VertexAttribute, VertexLayout};
