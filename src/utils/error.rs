use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::render::device::ShaderStage;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Resource not found: {path:?}")]
    ResourceNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Shader source parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Failed to compile {stage} shader: {log}")]
    ShaderCompile { stage: ShaderStage, log: String },

    #[error("Program linking failed: {log}")]
    ShaderLink { log: String },

    #[error("Uniform not found: {0}")]
    UniformNotFound(String),

    #[error("Failed to decode image {path:?}: {source}")]
    TextureDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Invalid configuration {path:?}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, RenderError>;

/// An error flag raised by the graphics device after a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceError {
    pub code: u32,
    pub operation: &'static str,
}

impl DeviceError {
    pub fn name(&self) -> &'static str {
        match self.code {
            gl::INVALID_ENUM => "GL_INVALID_ENUM",
            gl::INVALID_VALUE => "GL_INVALID_VALUE",
            gl::INVALID_OPERATION => "GL_INVALID_OPERATION",
            gl::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
            gl::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
            gl::STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
            gl::STACK_OVERFLOW => "GL_STACK_OVERFLOW",
            _ => "unknown error",
        }
    }
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[OpenGL error] {} (0x{:04x}) in {}",
            self.name(),
            self.code,
            self.operation
        )
    }
}

impl std::error::Error for DeviceError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_error_display() {
        let err = DeviceError {
            code: gl::INVALID_OPERATION,
            operation: "gl::UseProgram(7)",
        };
        assert_eq!(
            err.to_string(),
            "[OpenGL error] GL_INVALID_OPERATION (0x0502) in gl::UseProgram(7)"
        );
    }

    #[test]
    fn test_unknown_device_error() {
        let err = DeviceError { code: 0xdead, operation: "x" };
        assert_eq!(err.name(), "unknown error");
    }

    #[test]
    fn test_compile_error_mentions_stage() {
        let err = RenderError::ShaderCompile {
            stage: ShaderStage::Fragment,
            log: "0:1: syntax error".into(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to compile fragment shader: 0:1: syntax error"
        );
    }
}
