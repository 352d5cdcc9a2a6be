mod quad;
mod scene;
mod shader_program;

pub use quad::QuadBuffer;
pub use scene::Scene;
pub use shader_program::ShaderProgram;
