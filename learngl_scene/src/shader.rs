//! Compiling GLSL stages and linking them into a program.
//!
//! Any compile or link failure is an error: a program that didn't build is deleted and never
//! handed back. Intermediate stage objects are released as soon as the link has been attempted.

use std::fmt;

use log::error;

use crate::device::{Device, Handle};
use crate::error::ShaderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment")
        }
    }
}

/// A stage that compiled successfully and hasn't been linked yet.
#[derive(Debug)]
pub struct CompiledStage {
    id: Handle,
    stage: ShaderStage,
}

impl CompiledStage {
    pub fn delete<D: Device>(self, device: &mut D) {
        device.delete_shader(self.id);
    }
}

pub fn compile_stage<D: Device>(
    device: &mut D,
    source: &str,
    stage: ShaderStage
) -> Result<CompiledStage, ShaderError> {
    let id = device.create_shader(stage);

    if let Err(log) = device.compile_shader(id, source) {
        error!("{} shader: compiling failed\n{}", stage, log);
        device.delete_shader(id);
        return Err(ShaderError::Compile { stage, log });
    }

    Ok(CompiledStage { id, stage })
}

/// Links a vertex and a fragment stage into a new program. Both stages are consumed and deleted
/// whether or not linking works.
pub fn link_program<D: Device>(
    device: &mut D,
    vertex: CompiledStage,
    fragment: CompiledStage
) -> Result<Program, ShaderError> {
    let mismatch = if vertex.stage != ShaderStage::Vertex {
        Some((ShaderStage::Vertex, vertex.stage))
    } else if fragment.stage != ShaderStage::Fragment {
        Some((ShaderStage::Fragment, fragment.stage))
    } else {
        None
    };

    if let Some((expected, found)) = mismatch {
        vertex.delete(device);
        fragment.delete(device);
        return Err(ShaderError::StageMismatch { expected, found });
    }

    let id = device.create_program();
    device.attach_shader(id, vertex.id);
    device.attach_shader(id, fragment.id);
    let linked = device.link_program(id);

    vertex.delete(device);
    fragment.delete(device);

    if let Err(log) = linked {
        error!("Program linker: linking failed\n{}", log);
        device.delete_program(id);
        return Err(ShaderError::Link { log });
    }

    Ok(Program { id })
}

/// Compiles both stages and links them.
pub fn build_program<D: Device>(
    device: &mut D,
    vertex_source: &str,
    fragment_source: &str
) -> Result<Program, ShaderError> {
    let vertex = compile_stage(device, vertex_source, ShaderStage::Vertex)?;
    let fragment = match compile_stage(device, fragment_source, ShaderStage::Fragment) {
        Ok(fragment) => fragment,
        Err(e) => {
            vertex.delete(device);
            return Err(e);
        }
    };

    link_program(device, vertex, fragment)
}

/// A linked shader program.
#[derive(Debug)]
pub struct Program {
    id: Handle,
}

impl Program {
    pub fn id(&self) -> Handle { self.id }

    pub fn bind<D: Device>(&self, device: &mut D) {
        device.use_program(self.id);
    }

    pub fn delete<D: Device>(self, device: &mut D) {
        device.delete_program(self.id);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::{Command, RecordingDevice};

    const VERT: &str = "#version 330 core\nvoid main() { gl_Position = vec4(0.0); }";
    const FRAG: &str = "#version 330 core\nout vec4 c;\nvoid main() { c = vec4(1.0); }";

    #[test]
    fn builds_a_program_and_releases_the_stages() {
        let mut device = RecordingDevice::new();

        let program = build_program(&mut device, VERT, FRAG).unwrap();

        let shaders = device.created_shaders();
        assert_eq!(shaders.len(), 2);
        for shader in shaders {
            assert!(device.commands.contains(&Command::AttachShader { program: program.id(), shader }));
            assert!(device.commands.contains(&Command::DeleteShader(shader)));
        }
        assert!(device.commands.contains(&Command::LinkProgram(program.id())));
    }

    #[test]
    fn failed_vertex_stage_is_fatal() {
        let mut device = RecordingDevice::new().fail_compile(ShaderStage::Vertex);

        match build_program(&mut device, VERT, FRAG) {
            Err(ShaderError::Compile { stage, .. }) => assert_eq!(stage, ShaderStage::Vertex),
            other => panic!("expected a compile error, got {:?}", other)
        }

        // The broken stage is released and nothing else gets built
        let shaders = device.created_shaders();
        assert_eq!(shaders.len(), 1);
        assert!(device.commands.contains(&Command::DeleteShader(shaders[0])));
        assert!(!device.commands.iter().any(|c| matches!(c, Command::CreateProgram(_))));
    }

    #[test]
    fn failed_fragment_stage_releases_the_vertex_stage_too() {
        let mut device = RecordingDevice::new().fail_compile(ShaderStage::Fragment);

        let result = build_program(&mut device, VERT, FRAG);

        assert!(matches!(result, Err(ShaderError::Compile { stage: ShaderStage::Fragment, .. })));
        for shader in device.created_shaders() {
            assert!(device.commands.contains(&Command::DeleteShader(shader)));
        }
    }

    #[test]
    fn failed_link_deletes_the_program() {
        let mut device = RecordingDevice::new().fail_link();

        let result = build_program(&mut device, VERT, FRAG);

        let program = device.commands.iter()
            .find_map(|c| match c {
                Command::CreateProgram(id) => Some(*id),
                _ => None
            })
            .unwrap();
        assert!(matches!(result, Err(ShaderError::Link { .. })));
        assert!(device.commands.contains(&Command::DeleteProgram(program)));
        assert_eq!(
            device.commands.iter().filter(|c| matches!(c, Command::DeleteShader(_))).count(),
            2
        );
    }

    #[test]
    fn stages_in_the_wrong_slots_are_rejected() {
        let mut device = RecordingDevice::new();
        let vertex = compile_stage(&mut device, VERT, ShaderStage::Vertex).unwrap();
        let fragment = compile_stage(&mut device, FRAG, ShaderStage::Fragment).unwrap();

        let result = link_program(&mut device, fragment, vertex);

        match result {
            Err(ShaderError::StageMismatch { expected, found }) => {
                assert_eq!(expected, ShaderStage::Vertex);
                assert_eq!(found, ShaderStage::Fragment);
            }
            other => panic!("expected a stage mismatch, got {:?}", other)
        }
    }

    #[test]
    fn stage_names_read_well_in_diagnostics() {
        let error = ShaderError::Compile {
            stage: ShaderStage::Fragment,
            log: String::from("0:3: syntax error")
        };

        assert_eq!(error.to_string(), "fragment shader failed to compile:\n0:3: syntax error");
    }
}
