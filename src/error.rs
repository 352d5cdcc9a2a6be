use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong between startup and the first frame.
///
/// Setup is strictly linear, so any of these aborts the run with a
/// non-zero exit code after being logged.
#[derive(Debug, Error)]
pub enum Error {
    #[error("window creation failed: {0}")]
    WindowCreation(#[from] glutin::CreationError),

    #[error("gl context error: {0}")]
    Context(#[from] glutin::ContextError),

    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("[{stage}] {log}")]
    ShaderCompile { stage: ShaderStage, log: String },

    #[error("program link failed: {log}")]
    ProgramLink { log: String },

    /// Allocation of a GL object (shader, program, buffer, vertex array)
    /// failed; the string comes straight from the GL binding.
    #[error("gl resource allocation failed: {0}")]
    Resource(String),

    #[error("shader has no attribute named {0:?}")]
    MissingAttribute(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn gl_type(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "Vertex"),
            ShaderStage::Fragment => write!(f, "Fragment"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_errors_are_tagged_with_their_stage() {
        let err = Error::ShaderCompile {
            stage: ShaderStage::Vertex,
            log: "0:1(1): error: syntax error".to_string(),
        };
        assert_eq!(format!("{}", err), "[Vertex] 0:1(1): error: syntax error");

        let err = Error::ShaderCompile {
            stage: ShaderStage::Fragment,
            log: "undeclared identifier".to_string(),
        };
        assert_eq!(format!("{}", err), "[Fragment] undeclared identifier");
    }

    #[test]
    fn stage_maps_to_the_matching_gl_enum() {
        assert_eq!(ShaderStage::Vertex.gl_type(), glow::VERTEX_SHADER);
        assert_eq!(ShaderStage::Fragment.gl_type(), glow::FRAGMENT_SHADER);
    }
}
