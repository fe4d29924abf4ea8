pub mod config;
pub mod render;
pub mod scene;
pub mod utils;

// Re-export commonly used types
pub use config::{AppConfig, RenderConfig, WindowConfig};
pub use render::{
    Device, GlDevice, IndexBuffer, Renderer, ShaderProgram, ShaderProgramSource, Texture,
    VertexArray, VertexBuffer, VertexBufferLayout,
};
pub use scene::{ColorCycle, Scene};
pub use utils::error::{DeviceError, RenderError, Result};
