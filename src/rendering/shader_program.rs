use std::sync::Arc;

use glow::HasContext as _;

use crate::error::{Error, ShaderStage};
use crate::math::Mat4;

/// A linked GL program.
///
/// The two stage shaders only live for the duration of [`ShaderProgram::new`]:
/// they are detached and deleted as soon as linking succeeds, and their
/// guards delete them on any earlier failure. The program itself is
/// deleted when this struct is dropped.
pub struct ShaderProgram {
    program: glow::Program,
    gl: Arc<glow::Context>,
}

impl ShaderProgram {
    /// Compiles and links a vertex/fragment pair from in-memory source.
    ///
    /// Compilation short-circuits on the first failed stage; the error
    /// carries the stage name and the full driver info log. Link status
    /// is checked as well.
    pub fn new(
        gl: Arc<glow::Context>,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self, Error> {
        let vertex = StageShader::compile(gl.clone(), ShaderStage::Vertex, vertex_source)?;
        let fragment = StageShader::compile(gl.clone(), ShaderStage::Fragment, fragment_source)?;

        unsafe {
            let program = gl.create_program().map_err(Error::Resource)?;
            gl.attach_shader(program, vertex.shader);
            gl.attach_shader(program, fragment.shader);
            gl.link_program(program);
            if !gl.get_program_link_status(program) {
                let log = gl.get_program_info_log(program);
                gl.delete_program(program);
                return Err(Error::ProgramLink { log });
            }
            gl.detach_shader(program, vertex.shader);
            gl.detach_shader(program, fragment.shader);
            // The stage guards delete the now-detached shaders on drop.
            return Ok(Self { program, gl });
        }
    }

    pub fn bind(&self) {
        unsafe {
            self.gl.use_program(Some(self.program));
        }
    }

    pub fn attrib_location(&self, name: &str) -> Option<u32> {
        unsafe {
            return self.gl.get_attrib_location(self.program, name);
        }
    }

    pub fn uniform_location(&self, name: &str) -> Option<glow::NativeUniformLocation> {
        unsafe {
            return self.gl.get_uniform_location(self.program, name);
        }
    }

    /// Uploads a column-major matrix to a previously resolved location.
    /// A `None` location is ignored, same as GL's location `-1`.
    pub fn set_mat4(&self, location: Option<&glow::NativeUniformLocation>, matrix: &Mat4) {
        unsafe {
            self.gl
                .uniform_matrix_4_f32_slice(location, false, matrix.as_slice());
        }
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_program(self.program);
        }
    }
}

/// Scope guard for a single stage's shader object. Each stage cleans up
/// only itself, so a compile failure in one stage never touches the other.
struct StageShader {
    shader: glow::NativeShader,
    gl: Arc<glow::Context>,
}

impl StageShader {
    fn compile(gl: Arc<glow::Context>, stage: ShaderStage, source: &str) -> Result<Self, Error> {
        unsafe {
            let shader = gl.create_shader(stage.gl_type()).map_err(Error::Resource)?;
            let guard = Self { shader, gl };
            guard.gl.shader_source(shader, source);
            guard.gl.compile_shader(shader);
            if !guard.gl.get_shader_compile_status(shader) {
                let log = guard.gl.get_shader_info_log(shader);
                return Err(Error::ShaderCompile { stage, log });
            }
            return Ok(guard);
        }
    }
}

impl Drop for StageShader {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_shader(self.shader);
        }
    }
}
