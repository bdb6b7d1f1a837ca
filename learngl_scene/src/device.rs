//! The seam between the demos and the GPU.
//!
//! Every GL call the demos make goes through [`Device`]. The real implementation lives in the
//! binary and is a thin layer of `unsafe` calls into the `gl` crate; tests use
//! [`RecordingDevice`](crate::testing::RecordingDevice), which just writes the commands down.

use crate::shader::ShaderStage;
use crate::texture::TextureParams;
use crate::vertex::VertexAttribute;

/// Name of a GL object (shader, program, buffer, vertex array or texture).
pub type Handle = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferTarget {
    /// Vertex data
    Array,
    /// Indices into the vertex data
    Element
}

/// All methods take `&mut self`: there is exactly one context and it belongs to one thread.
pub trait Device {
    fn clear_color(&mut self, color: [f32; 4]);

    /// Clears the color buffer to the last color set with [`Device::clear_color`].
    fn clear(&mut self);

    fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32);

    fn create_shader(&mut self, stage: ShaderStage) -> Handle;

    /// Compiles `source` into `shader`. On failure, returns the driver's info log.
    fn compile_shader(&mut self, shader: Handle, source: &str) -> Result<(), String>;

    fn delete_shader(&mut self, shader: Handle);

    fn create_program(&mut self) -> Handle;

    fn attach_shader(&mut self, program: Handle, shader: Handle);

    /// Links `program`. On failure, returns the driver's info log.
    fn link_program(&mut self, program: Handle) -> Result<(), String>;

    fn use_program(&mut self, program: Handle);

    fn delete_program(&mut self, program: Handle);

    fn create_vertex_array(&mut self) -> Handle;

    fn bind_vertex_array(&mut self, vertex_array: Option<Handle>);

    fn delete_vertex_array(&mut self, vertex_array: Handle);

    fn create_buffer(&mut self) -> Handle;

    fn bind_buffer(&mut self, target: BufferTarget, buffer: Option<Handle>);

    /// Copies `data` into whatever buffer is bound to `target`, for static drawing.
    fn buffer_data(&mut self, target: BufferTarget, data: &[u8]);

    /// Describes one float attribute of the bound vertex buffer and enables it.
    fn vertex_attribute(&mut self, attribute: &VertexAttribute, stride: usize);

    fn delete_buffer(&mut self, buffer: Handle);

    /// Draws `count` vertices of the bound vertex array as triangles, starting at `first`.
    fn draw_arrays(&mut self, first: i32, count: i32);

    /// Draws `count` `u32` indices of the bound element buffer as triangles.
    fn draw_elements(&mut self, count: i32);

    fn create_texture(&mut self) -> Handle;

    /// Binds a 2D texture to texture unit 0.
    fn bind_texture(&mut self, texture: Option<Handle>);

    fn texture_parameters(&mut self, params: &TextureParams);

    /// Uploads tightly packed 8-bit RGB pixels into the bound texture's base level.
    fn texture_image_rgb(&mut self, width: u32, height: u32, pixels: &[u8]);

    fn generate_mipmap(&mut self);

    fn delete_texture(&mut self, texture: Handle);
}
