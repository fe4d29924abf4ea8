use std::fmt;

/// Device-side object name, as handed out by the graphics API.
pub type ObjectId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Scalar type of one vertex attribute component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    Float32,
    UInt32,
    UInt8,
}

impl ComponentType {
    pub const fn size_in_bytes(self) -> u32 {
        match self {
            ComponentType::Float32 => 4,
            ComponentType::UInt32 => 4,
            ComponentType::UInt8 => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferTarget {
    Array,
    ElementArray,
}

/// The graphics primitives the wrapper types are built on.
///
/// Implementations are bound to a single context and only ever used from the
/// thread owning it; wrappers share the device through `Rc<dyn Device>`.
pub trait Device {
    fn version(&self) -> String;

    fn create_shader(&self, stage: ShaderStage) -> ObjectId;
    fn shader_source(&self, shader: ObjectId, source: &str);
    fn compile_shader(&self, shader: ObjectId);
    fn shader_compile_status(&self, shader: ObjectId) -> bool;
    fn shader_info_log(&self, shader: ObjectId) -> String;
    fn delete_shader(&self, shader: ObjectId);

    fn create_program(&self) -> ObjectId;
    fn attach_shader(&self, program: ObjectId, shader: ObjectId);
    fn detach_shader(&self, program: ObjectId, shader: ObjectId);
    fn link_program(&self, program: ObjectId);
    fn program_link_status(&self, program: ObjectId) -> bool;
    fn program_info_log(&self, program: ObjectId) -> String;
    fn validate_program(&self, program: ObjectId);
    fn delete_program(&self, program: ObjectId);
    fn use_program(&self, program: Option<ObjectId>);

    /// `None` when the program has no active uniform with that name.
    fn uniform_location(&self, program: ObjectId, name: &str) -> Option<i32>;
    fn uniform_1i(&self, location: i32, value: i32);
    fn uniform_1f(&self, location: i32, value: f32);
    fn uniform_4f(&self, location: i32, value: [f32; 4]);
    fn uniform_matrix_4f(&self, location: i32, value: &[f32; 16]);

    fn create_buffer(&self) -> ObjectId;
    fn bind_buffer(&self, target: BufferTarget, buffer: Option<ObjectId>);
    fn buffer_data(&self, target: BufferTarget, data: &[u8]);
    fn delete_buffer(&self, buffer: ObjectId);

    fn create_vertex_array(&self) -> ObjectId;
    fn bind_vertex_array(&self, vertex_array: Option<ObjectId>);
    fn delete_vertex_array(&self, vertex_array: ObjectId);
    fn enable_vertex_attrib_array(&self, index: u32);
    fn vertex_attrib_pointer(
        &self,
        index: u32,
        count: i32,
        component_type: ComponentType,
        normalized: bool,
        stride: i32,
        offset: usize,
    );

    fn create_texture(&self) -> ObjectId;
    fn active_texture(&self, slot: u32);
    fn bind_texture(&self, texture: Option<ObjectId>);
    /// Linear min/mag filtering and clamp-to-edge wrapping on the bound 2D texture.
    fn texture_parameters(&self);
    /// Uploads tightly packed RGBA8 texels into the bound 2D texture.
    fn texture_image_rgba8(&self, width: u32, height: u32, pixels: &[u8]);
    fn delete_texture(&self, texture: ObjectId);

    fn enable_blending(&self);
    fn clear_color(&self, color: [f32; 4]);
    fn clear(&self);
    fn viewport(&self, width: i32, height: i32);
    /// Draws `count` `u32` indices from the bound element buffer as triangles.
    fn draw_elements(&self, count: i32);
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_sizes() {
        assert_eq!(ComponentType::Float32.size_in_bytes(), 4);
        assert_eq!(ComponentType::UInt32.size_in_bytes(), 4);
        assert_eq!(ComponentType::UInt8.size_in_bytes(), 1);
    }

    #[test]
    fn test_stage_names() {
        assert_eq!(ShaderStage::Vertex.to_string(), "vertex");
        assert_eq!(ShaderStage::Fragment.to_string(), "fragment");
    }
}
