use std::sync::Arc;

use glow::HasContext as _;
use log::debug;

extern crate nalgebra_glm as glm;
use glm::vec3;

use super::{QuadBuffer, ShaderProgram};
use crate::error::Error;
use crate::math::{self, Mat4};
use crate::shader_source::ShaderSource;

const VERTEX_SHADER_PATH: &str = "shaders/simple.vert";
const FRAGMENT_SHADER_PATH: &str = "shaders/simple.frag";

/// Degrees per second of model spin about the z axis.
const SPIN_RATE: f32 = 10.0;

/// One quad at z = 0.5; the third float of each vertex feeds the `alpha`
/// attribute, so the quad renders half transparent.
const QUAD_VERTICES: [f32; 18] = [
    -0.5, -0.5, 0.5, //
    0.5, -0.5, 0.5, //
    0.5, 0.5, 0.5, //
    -0.5, -0.5, 0.5, //
    -0.5, 0.5, 0.5, //
    0.5, 0.5, 0.5,
];

struct SceneUniforms {
    projection: Option<glow::NativeUniformLocation>,
    model: Option<glow::NativeUniformLocation>,
    view: Option<glow::NativeUniformLocation>,
}

/// Everything needed to redraw one frame: the linked program, the quad's
/// buffers, resolved uniform locations, and the three transform matrices.
/// Owned by the top-level run loop; GL objects are released by drop order
/// before the context goes away.
pub struct Scene {
    program: ShaderProgram,
    quad: QuadBuffer,
    uniforms: SceneUniforms,
    projection: Mat4,
    view: Mat4,
    model: Mat4,
    width: u32,
    height: u32,
    gl: Arc<glow::Context>,
}

impl Scene {
    /// Reads and builds the shader pair, uploads the quad, resolves
    /// attribute and uniform locations, and sets up the initial
    /// model/view/projection transforms.
    pub fn new(gl: Arc<glow::Context>, width: u32, height: u32) -> Result<Self, Error> {
        let vertex = ShaderSource::read(VERTEX_SHADER_PATH)?;
        let fragment = ShaderSource::read(FRAGMENT_SHADER_PATH)?;
        debug!(
            "read {} ({} bytes), {} ({} bytes)",
            vertex.path().display(),
            vertex.len(),
            fragment.path().display(),
            fragment.len()
        );
        let program = ShaderProgram::new(gl.clone(), vertex.source(), fragment.source())?;

        let position = program
            .attrib_location("position")
            .ok_or(Error::MissingAttribute("position"))?;
        let alpha = program
            .attrib_location("alpha")
            .ok_or(Error::MissingAttribute("alpha"))?;
        let uniforms = SceneUniforms {
            projection: program.uniform_location("projection"),
            model: program.uniform_location("model"),
            view: program.uniform_location("view"),
        };

        let quad = QuadBuffer::new(gl.clone(), &QUAD_VERTICES, position, alpha)?;

        unsafe {
            gl.enable(glow::BLEND);
            gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
        }

        let model = math::rotate(&Mat4::IDENTITY, -45.0, &vec3(1.0, 0.0, 0.0));
        let view = math::translate(&Mat4::IDENTITY, 0.0, 0.0, -3.0);
        let projection = perspective_for(width, height);

        return Ok(Self {
            program,
            quad,
            uniforms,
            projection,
            view,
            model,
            width,
            height,
            gl,
        });
    }

    /// Advances the model spin by `dt` seconds of wall-clock time.
    pub fn advance(&mut self, dt: f32) {
        self.model = math::rotate(&self.model, SPIN_RATE * dt, &vec3(0.0, 0.0, 1.0));
    }

    /// Clears the frame, uploads the current matrices, and draws the quad.
    pub fn draw(&self) {
        let gl = &self.gl;
        unsafe {
            gl.viewport(0, 0, self.width as i32, self.height as i32);
            gl.clear_color(1.0, 0.1, 1.0, 1.0);
            gl.clear(glow::COLOR_BUFFER_BIT);
        }
        self.program.bind();
        self.program
            .set_mat4(self.uniforms.projection.as_ref(), &self.projection);
        self.program.set_mat4(self.uniforms.model.as_ref(), &self.model);
        self.program.set_mat4(self.uniforms.view.as_ref(), &self.view);
        self.quad.draw();
    }

    /// Tracks a window resize: viewport dimensions and projection aspect.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.width = width;
        self.height = height;
        self.projection = perspective_for(width, height);
    }
}

fn perspective_for(width: u32, height: u32) -> Mat4 {
    return Mat4::perspective(45.0, width as f32 / height as f32, 0.1, 100.0);
}
