use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::render::MissingUniformPolicy;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub shader_path: PathBuf,
    pub texture_path: Option<PathBuf>,
    pub clear_color: [f32; 4],
    /// Fail instead of warning when a uniform is missing from the shader.
    pub strict_uniforms: bool,
    pub start_color: [f32; 3],
    pub color_step: f32,
}

impl RenderConfig {
    pub fn uniform_policy(&self) -> MissingUniformPolicy {
        if self.strict_uniforms {
            MissingUniformPolicy::Error
        } else {
            MissingUniformPolicy::Warn
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            shader_path: PathBuf::from("res/shaders/Basic.shader"),
            texture_path: Some(PathBuf::from("res/textures/logo.png")),
            clear_color: [0.0, 0.0, 0.0, 1.0],
            strict_uniforms: false,
            start_color: [0.9, 0.2, 0.5],
            color_step: 0.05,
        }
    }
}
