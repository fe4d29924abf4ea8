use std::ffi::{CStr, CString};
use std::ptr;

use gl::types::*;

use super::device::{BufferTarget, ComponentType, Device, ObjectId, ShaderStage};
use crate::utils::error::DeviceError;

/// Wraps one raw `gl` call. Debug builds clear the error flag first and
/// treat any error raised by the call as fatal; release builds skip both.
macro_rules! gl_call {
    ($call:expr) => {{
        clear_errors();
        let result = unsafe { $call };
        assert_no_error(stringify!($call));
        result
    }};
}

fn clear_errors() {
    if cfg!(debug_assertions) {
        while unsafe { gl::GetError() } != gl::NO_ERROR {}
    }
}

fn assert_no_error(operation: &'static str) {
    if !cfg!(debug_assertions) {
        return;
    }
    if let Err(err) = check_error(operation) {
        log::error!("{}", err);
        panic!("{}", err);
    }
}

/// Returns the first pending device error, draining the rest.
pub fn check_error(operation: &'static str) -> Result<(), DeviceError> {
    let code = unsafe { gl::GetError() };
    if code == gl::NO_ERROR {
        return Ok(());
    }
    while unsafe { gl::GetError() } != gl::NO_ERROR {}
    Err(DeviceError { code, operation })
}

fn stage_enum(stage: ShaderStage) -> GLenum {
    match stage {
        ShaderStage::Vertex => gl::VERTEX_SHADER,
        ShaderStage::Fragment => gl::FRAGMENT_SHADER,
    }
}

fn component_enum(component_type: ComponentType) -> GLenum {
    match component_type {
        ComponentType::Float32 => gl::FLOAT,
        ComponentType::UInt32 => gl::UNSIGNED_INT,
        ComponentType::UInt8 => gl::UNSIGNED_BYTE,
    }
}

fn target_enum(target: BufferTarget) -> GLenum {
    match target {
        BufferTarget::Array => gl::ARRAY_BUFFER,
        BufferTarget::ElementArray => gl::ELEMENT_ARRAY_BUFFER,
    }
}

fn gl_bool(value: bool) -> GLboolean {
    if value {
        gl::TRUE
    } else {
        gl::FALSE
    }
}

fn log_to_string(mut buffer: Vec<u8>, written: GLsizei) -> String {
    buffer.truncate(written.max(0) as usize);
    String::from_utf8_lossy(&buffer).trim_end().to_string()
}

/// [`Device`] backed by the function pointers loaded with `gl::load_with`.
///
/// Must only be created once the context is current on the calling thread.
pub struct GlDevice {
    _private: (),
}

impl GlDevice {
    /// # Safety
    ///
    /// `gl::load_with` must have been called for a context that is current on
    /// this thread and stays current for the lifetime of the device.
    pub unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl Device for GlDevice {
    fn version(&self) -> String {
        let raw = gl_call!(gl::GetString(gl::VERSION));
        if raw.is_null() {
            return String::from("unknown");
        }
        unsafe { CStr::from_ptr(raw as *const GLchar) }
            .to_string_lossy()
            .into_owned()
    }

    fn create_shader(&self, stage: ShaderStage) -> ObjectId {
        gl_call!(gl::CreateShader(stage_enum(stage)))
    }

    fn shader_source(&self, shader: ObjectId, source: &str) {
        let ptr = source.as_ptr() as *const GLchar;
        let len = source.len() as GLint;
        gl_call!(gl::ShaderSource(shader, 1, &ptr, &len));
    }

    fn compile_shader(&self, shader: ObjectId) {
        gl_call!(gl::CompileShader(shader));
    }

    fn shader_compile_status(&self, shader: ObjectId) -> bool {
        let mut success = gl::FALSE as GLint;
        gl_call!(gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success));
        success != gl::FALSE as GLint
    }

    fn shader_info_log(&self, shader: ObjectId) -> String {
        let mut len = 0;
        gl_call!(gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len));
        let mut buffer = vec![0u8; len.max(1) as usize];
        let mut written = 0;
        gl_call!(gl::GetShaderInfoLog(
            shader,
            buffer.len() as GLsizei,
            &mut written,
            buffer.as_mut_ptr() as *mut GLchar,
        ));
        log_to_string(buffer, written)
    }

    fn delete_shader(&self, shader: ObjectId) {
        gl_call!(gl::DeleteShader(shader));
    }

    fn create_program(&self) -> ObjectId {
        gl_call!(gl::CreateProgram())
    }

    fn attach_shader(&self, program: ObjectId, shader: ObjectId) {
        gl_call!(gl::AttachShader(program, shader));
    }

    fn detach_shader(&self, program: ObjectId, shader: ObjectId) {
        gl_call!(gl::DetachShader(program, shader));
    }

    fn link_program(&self, program: ObjectId) {
        gl_call!(gl::LinkProgram(program));
    }

    fn program_link_status(&self, program: ObjectId) -> bool {
        let mut success = gl::FALSE as GLint;
        gl_call!(gl::GetProgramiv(program, gl::LINK_STATUS, &mut success));
        success != gl::FALSE as GLint
    }

    fn program_info_log(&self, program: ObjectId) -> String {
        let mut len = 0;
        gl_call!(gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len));
        let mut buffer = vec![0u8; len.max(1) as usize];
        let mut written = 0;
        gl_call!(gl::GetProgramInfoLog(
            program,
            buffer.len() as GLsizei,
            &mut written,
            buffer.as_mut_ptr() as *mut GLchar,
        ));
        log_to_string(buffer, written)
    }

    fn validate_program(&self, program: ObjectId) {
        gl_call!(gl::ValidateProgram(program));
    }

    fn delete_program(&self, program: ObjectId) {
        gl_call!(gl::DeleteProgram(program));
    }

    fn use_program(&self, program: Option<ObjectId>) {
        gl_call!(gl::UseProgram(program.unwrap_or(0)));
    }

    fn uniform_location(&self, program: ObjectId, name: &str) -> Option<i32> {
        let Ok(cname) = CString::new(name) else {
            log::warn!("Uniform name {:?} contains a nul byte", name);
            return None;
        };
        let location = gl_call!(gl::GetUniformLocation(program, cname.as_ptr()));
        (location != -1).then_some(location)
    }

    fn uniform_1i(&self, location: i32, value: i32) {
        gl_call!(gl::Uniform1i(location, value));
    }

    fn uniform_1f(&self, location: i32, value: f32) {
        gl_call!(gl::Uniform1f(location, value));
    }

    fn uniform_4f(&self, location: i32, value: [f32; 4]) {
        let [x, y, z, w] = value;
        gl_call!(gl::Uniform4f(location, x, y, z, w));
    }

    fn uniform_matrix_4f(&self, location: i32, value: &[f32; 16]) {
        gl_call!(gl::UniformMatrix4fv(location, 1, gl::FALSE, value.as_ptr()));
    }

    fn create_buffer(&self) -> ObjectId {
        let mut id = 0;
        gl_call!(gl::GenBuffers(1, &mut id));
        id
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<ObjectId>) {
        gl_call!(gl::BindBuffer(target_enum(target), buffer.unwrap_or(0)));
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8]) {
        gl_call!(gl::BufferData(
            target_enum(target),
            data.len() as GLsizeiptr,
            data.as_ptr() as *const _,
            gl::STATIC_DRAW,
        ));
    }

    fn delete_buffer(&self, buffer: ObjectId) {
        gl_call!(gl::DeleteBuffers(1, &buffer));
    }

    fn create_vertex_array(&self) -> ObjectId {
        let mut id = 0;
        gl_call!(gl::GenVertexArrays(1, &mut id));
        id
    }

    fn bind_vertex_array(&self, vertex_array: Option<ObjectId>) {
        gl_call!(gl::BindVertexArray(vertex_array.unwrap_or(0)));
    }

    fn delete_vertex_array(&self, vertex_array: ObjectId) {
        gl_call!(gl::DeleteVertexArrays(1, &vertex_array));
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        gl_call!(gl::EnableVertexAttribArray(index));
    }

    fn vertex_attrib_pointer(
        &self,
        index: u32,
        count: i32,
        component_type: ComponentType,
        normalized: bool,
        stride: i32,
        offset: usize,
    ) {
        gl_call!(gl::VertexAttribPointer(
            index,
            count,
            component_enum(component_type),
            gl_bool(normalized),
            stride,
            offset as *const _,
        ));
    }

    fn create_texture(&self) -> ObjectId {
        let mut id = 0;
        gl_call!(gl::GenTextures(1, &mut id));
        id
    }

    fn active_texture(&self, slot: u32) {
        gl_call!(gl::ActiveTexture(gl::TEXTURE0 + slot));
    }

    fn bind_texture(&self, texture: Option<ObjectId>) {
        gl_call!(gl::BindTexture(gl::TEXTURE_2D, texture.unwrap_or(0)));
    }

    fn texture_parameters(&self) {
        gl_call!(gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::LINEAR as i32));
        gl_call!(gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::LINEAR as i32));
        gl_call!(gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::CLAMP_TO_EDGE as i32));
        gl_call!(gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::CLAMP_TO_EDGE as i32));
    }

    fn texture_image_rgba8(&self, width: u32, height: u32, pixels: &[u8]) {
        gl_call!(gl::TexImage2D(
            gl::TEXTURE_2D,
            0,
            gl::RGBA8 as i32,
            width as i32,
            height as i32,
            0,
            gl::RGBA,
            gl::UNSIGNED_BYTE,
            if pixels.is_empty() {
                ptr::null()
            } else {
                pixels.as_ptr() as *const _
            },
        ));
    }

    fn delete_texture(&self, texture: ObjectId) {
        gl_call!(gl::DeleteTextures(1, &texture));
    }

    fn enable_blending(&self) {
        gl_call!(gl::Enable(gl::BLEND));
        gl_call!(gl::BlendFunc(gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA));
    }

    fn clear_color(&self, color: [f32; 4]) {
        let [r, g, b, a] = color;
        gl_call!(gl::ClearColor(r, g, b, a));
    }

    fn clear(&self) {
        gl_call!(gl::Clear(gl::COLOR_BUFFER_BIT));
    }

    fn viewport(&self, width: i32, height: i32) {
        gl_call!(gl::Viewport(0, 0, width, height));
    }

    fn draw_elements(&self, count: i32) {
        gl_call!(gl::DrawElements(
            gl::TRIANGLES,
            count,
            gl::UNSIGNED_INT,
            ptr::null(),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_mapping() {
        assert_eq!(stage_enum(ShaderStage::Vertex), gl::VERTEX_SHADER);
        assert_eq!(stage_enum(ShaderStage::Fragment), gl::FRAGMENT_SHADER);
        assert_eq!(component_enum(ComponentType::Float32), gl::FLOAT);
        assert_eq!(component_enum(ComponentType::UInt32), gl::UNSIGNED_INT);
        assert_eq!(component_enum(ComponentType::UInt8), gl::UNSIGNED_BYTE);
        assert_eq!(target_enum(BufferTarget::ElementArray), gl::ELEMENT_ARRAY_BUFFER);
    }

    #[test]
    fn test_info_log_trimmed_to_written_length() {
        let buffer = b"0:3: error\n\0\0\0".to_vec();
        assert_eq!(log_to_string(buffer, 11), "0:3: error");
        assert_eq!(log_to_string(vec![0], 0), "");
    }
}
