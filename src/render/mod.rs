pub mod buffer;
pub mod device;
pub mod gl_device;
pub mod layout;
pub mod renderer;
pub mod shader_source;
pub mod shaders;
pub mod texture;
pub mod vertex_array;

pub use buffer::{IndexBuffer, VertexBuffer};
pub use device::{ComponentType, Device, ShaderStage};
pub use gl_device::GlDevice;
pub use layout::{VertexBufferElement, VertexBufferLayout};
pub use renderer::Renderer;
pub use shader_source::ShaderProgramSource;
pub use shaders::{MissingUniformPolicy, ShaderProgram};
pub use texture::Texture;
pub use vertex_array::VertexArray;
