//! Stand-ins for the GPU and the window, for driving scenes and the render loop in tests.

use std::collections::{HashMap, VecDeque};

use thiserror::Error;

use crate::device::{BufferTarget, Device, Handle};
use crate::error::SceneError;
use crate::shader::ShaderStage;
use crate::surface::{InputState, Key, Surface, SurfaceEvent};
use crate::texture::TextureParams;
use crate::vertex::VertexAttribute;

/// One call made on a [`RecordingDevice`].
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    ClearColor([f32; 4]),
    Clear,
    Viewport { x: i32, y: i32, width: i32, height: i32 },
    CreateShader { id: Handle, stage: ShaderStage },
    CompileShader(Handle),
    DeleteShader(Handle),
    CreateProgram(Handle),
    AttachShader { program: Handle, shader: Handle },
    LinkProgram(Handle),
    UseProgram(Handle),
    DeleteProgram(Handle),
    CreateVertexArray(Handle),
    BindVertexArray(Option<Handle>),
    DeleteVertexArray(Handle),
    CreateBuffer(Handle),
    BindBuffer { target: BufferTarget, buffer: Option<Handle> },
    BufferData { target: BufferTarget, data: Vec<u8> },
    VertexAttribute { attribute: VertexAttribute, stride: usize },
    DeleteBuffer(Handle),
    DrawArrays { first: i32, count: i32 },
    DrawElements { count: i32 },
    CreateTexture(Handle),
    BindTexture(Option<Handle>),
    TextureParameters(TextureParams),
    TextureImage { width: u32, height: u32, len: usize },
    GenerateMipmap,
    DeleteTexture(Handle),
}

/// A [`Device`] that writes down every call instead of talking to a driver. Handles are handed
/// out from 1 upwards, like GL names.
#[derive(Debug)]
pub struct RecordingDevice {
    pub commands: Vec<Command>,
    next_handle: Handle,
    stages: HashMap<Handle, ShaderStage>,
    failing_stage: Option<ShaderStage>,
    failing_link: bool,
}

impl Default for RecordingDevice {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
            next_handle: 1,
            stages: HashMap::new(),
            failing_stage: None,
            failing_link: false
        }
    }
}

impl RecordingDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every compile of `stage` fail.
    pub fn fail_compile(mut self, stage: ShaderStage) -> Self {
        self.failing_stage = Some(stage);
        self
    }

    /// Makes every link fail.
    pub fn fail_link(mut self) -> Self {
        self.failing_link = true;
        self
    }

    pub fn draw_calls(&self) -> Vec<&Command> {
        self.commands.iter()
            .filter(|c| matches!(c, Command::DrawArrays { .. } | Command::DrawElements { .. }))
            .collect()
    }

    pub fn buffer_uploads(&self, target: BufferTarget) -> Vec<&[u8]> {
        self.commands.iter()
            .filter_map(|c| match c {
                Command::BufferData { target: t, data } if *t == target => Some(data.as_slice()),
                _ => None
            })
            .collect()
    }

    /// Every index uploaded to an element buffer, in order.
    pub fn element_indices(&self) -> Vec<u32> {
        self.buffer_uploads(BufferTarget::Element)
            .into_iter()
            .flat_map(|data| data.chunks_exact(4))
            .map(|bytes| u32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
            .collect()
    }

    pub fn created_shaders(&self) -> Vec<Handle> {
        self.commands.iter()
            .filter_map(|c| match c {
                Command::CreateShader { id, .. } => Some(*id),
                _ => None
            })
            .collect()
    }

    fn handle(&mut self) -> Handle {
        let handle = self.next_handle;
        self.next_handle += 1;
        handle
    }
}

impl Device for RecordingDevice {
    fn clear_color(&mut self, color: [f32; 4]) {
        self.commands.push(Command::ClearColor(color));
    }

    fn clear(&mut self) {
        self.commands.push(Command::Clear);
    }

    fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.commands.push(Command::Viewport { x, y, width, height });
    }

    fn create_shader(&mut self, stage: ShaderStage) -> Handle {
        let id = self.handle();
        self.stages.insert(id, stage);
        self.commands.push(Command::CreateShader { id, stage });
        id
    }

    fn compile_shader(&mut self, shader: Handle, _source: &str) -> Result<(), String> {
        self.commands.push(Command::CompileShader(shader));
        match self.stages.get(&shader) {
            Some(stage) if Some(*stage) == self.failing_stage => {
                Err(format!("0:1(1): error: {} stage rejected", stage))
            }
            _ => Ok(())
        }
    }

    fn delete_shader(&mut self, shader: Handle) {
        self.commands.push(Command::DeleteShader(shader));
    }

    fn create_program(&mut self) -> Handle {
        let id = self.handle();
        self.commands.push(Command::CreateProgram(id));
        id
    }

    fn attach_shader(&mut self, program: Handle, shader: Handle) {
        self.commands.push(Command::AttachShader { program, shader });
    }

    fn link_program(&mut self, program: Handle) -> Result<(), String> {
        self.commands.push(Command::LinkProgram(program));
        if self.failing_link {
            return Err(String::from("error: linking failed"));
        }
        Ok(())
    }

    fn use_program(&mut self, program: Handle) {
        self.commands.push(Command::UseProgram(program));
    }

    fn delete_program(&mut self, program: Handle) {
        self.commands.push(Command::DeleteProgram(program));
    }

    fn create_vertex_array(&mut self) -> Handle {
        let id = self.handle();
        self.commands.push(Command::CreateVertexArray(id));
        id
    }

    fn bind_vertex_array(&mut self, vertex_array: Option<Handle>) {
        self.commands.push(Command::BindVertexArray(vertex_array));
    }

    fn delete_vertex_array(&mut self, vertex_array: Handle) {
        self.commands.push(Command::DeleteVertexArray(vertex_array));
    }

    fn create_buffer(&mut self) -> Handle {
        let id = self.handle();
        self.commands.push(Command::CreateBuffer(id));
        id
    }

    fn bind_buffer(&mut self, target: BufferTarget, buffer: Option<Handle>) {
        self.commands.push(Command::BindBuffer { target, buffer });
    }

    fn buffer_data(&mut self, target: BufferTarget, data: &[u8]) {
        self.commands.push(Command::BufferData { target, data: data.to_vec() });
    }

    fn vertex_attribute(&mut self, attribute: &VertexAttribute, stride: usize) {
        self.commands.push(Command::VertexAttribute { attribute: *attribute, stride });
    }

    fn delete_buffer(&mut self, buffer: Handle) {
        self.commands.push(Command::DeleteBuffer(buffer));
    }

    fn draw_arrays(&mut self, first: i32, count: i32) {
        self.commands.push(Command::DrawArrays { first, count });
    }

    fn draw_elements(&mut self, count: i32) {
        self.commands.push(Command::DrawElements { count });
    }

    fn create_texture(&mut self) -> Handle {
        let id = self.handle();
        self.commands.push(Command::CreateTexture(id));
        id
    }

    fn bind_texture(&mut self, texture: Option<Handle>) {
        self.commands.push(Command::BindTexture(texture));
    }

    fn texture_parameters(&mut self, params: &TextureParams) {
        self.commands.push(Command::TextureParameters(*params));
    }

    fn texture_image_rgb(&mut self, width: u32, height: u32, pixels: &[u8]) {
        self.commands.push(Command::TextureImage { width, height, len: pixels.len() });
    }

    fn generate_mipmap(&mut self) {
        self.commands.push(Command::GenerateMipmap);
    }

    fn delete_texture(&mut self, texture: Handle) {
        self.commands.push(Command::DeleteTexture(texture));
    }
}

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error("scripted present failure")]
    Present,
}

/// A [`Surface`] that replays one batch of events per poll.
#[derive(Debug)]
pub struct ScriptedSurface {
    frames: VecDeque<Vec<SurfaceEvent>>,
    input: InputState,
    presents: usize,
    presented: usize,
    failing_present: Option<usize>,
}

impl ScriptedSurface {
    pub fn new(frames: Vec<Vec<SurfaceEvent>>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            input: InputState::new(),
            presents: 0,
            presented: 0,
            failing_present: None
        }
    }

    /// Makes the `n`th call to `present` (counting from 1) fail.
    pub fn fail_present_at(mut self, n: usize) -> Self {
        self.failing_present = Some(n);
        self
    }

    /// Number of frames successfully presented.
    pub fn presented(&self) -> usize { self.presented }
}

impl Surface for ScriptedSurface {
    type Error = ScriptError;

    fn poll_events(&mut self, events: &mut Vec<SurfaceEvent>) {
        let batch = self.frames
            .pop_front()
            .expect("surface script ran out before the loop closed");

        for event in batch {
            self.input.apply(&event);
            events.push(event);
        }
    }

    fn is_key_pressed(&self, key: Key) -> bool {
        self.input.is_pressed(key)
    }

    fn should_close(&self) -> bool {
        self.input.should_close()
    }

    fn set_should_close(&mut self, value: bool) {
        self.input.set_should_close(value);
    }

    fn present(&mut self) -> Result<(), ScriptError> {
        self.presents += 1;
        if Some(self.presents) == self.failing_present {
            return Err(ScriptError::Present);
        }

        self.presented += 1;
        Ok(())
    }
}
