use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

use super::device::{Device, ObjectId, ShaderStage};
use super::shader_source::ShaderProgramSource;
use crate::utils::error::{RenderError, Result};

/// What a setter does when the program has no uniform of that name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingUniformPolicy {
    /// Warn on first lookup, then ignore every set.
    #[default]
    Warn,
    /// Return [`RenderError::UniformNotFound`] from every set.
    Error,
}

/// A linked vertex + fragment program and its uniform locations.
pub struct ShaderProgram {
    device: Rc<dyn Device>,
    id: ObjectId,
    uniforms: HashMap<String, Option<i32>>,
    policy: MissingUniformPolicy,
}

impl ShaderProgram {
    /// Loads a two-stage resource file and builds the program from it.
    pub fn from_file<P: AsRef<Path>>(device: Rc<dyn Device>, path: P) -> Result<Self> {
        let source = ShaderProgramSource::load(path.as_ref())?;
        let program = Self::new_from_source(device, &source.vertex, &source.fragment)?;
        log::info!("Loaded shader program {} from {:?}", program.id, path.as_ref());
        Ok(program)
    }

    pub fn new_from_source(
        device: Rc<dyn Device>,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self> {
        let vertex_shader = Self::compile_shader(&*device, ShaderStage::Vertex, vertex_source)?;
        let fragment_shader =
            match Self::compile_shader(&*device, ShaderStage::Fragment, fragment_source) {
                Ok(shader) => shader,
                Err(err) => {
                    device.delete_shader(vertex_shader);
                    return Err(err);
                }
            };

        let program = device.create_program();
        device.attach_shader(program, vertex_shader);
        device.attach_shader(program, fragment_shader);
        device.link_program(program);

        let linked = device.program_link_status(program);
        let link_log = if linked {
            None
        } else {
            Some(device.program_info_log(program))
        };

        for shader in [vertex_shader, fragment_shader] {
            device.detach_shader(program, shader);
            device.delete_shader(shader);
        }

        if let Some(log) = link_log {
            device.delete_program(program);
            log::error!("Failed to link shader program: {}", log);
            return Err(RenderError::ShaderLink { log });
        }

        device.validate_program(program);

        Ok(Self {
            device,
            id: program,
            uniforms: HashMap::new(),
            policy: MissingUniformPolicy::default(),
        })
    }

    /// Compiles one stage, deleting the shader object again if it fails.
    fn compile_shader(device: &dyn Device, stage: ShaderStage, source: &str) -> Result<ObjectId> {
        let shader = device.create_shader(stage);
        device.shader_source(shader, source);
        device.compile_shader(shader);

        if !device.shader_compile_status(shader) {
            let log = device.shader_info_log(shader);
            device.delete_shader(shader);
            log::error!("Failed to compile {} shader: {}", stage, log);
            return Err(RenderError::ShaderCompile { stage, log });
        }

        Ok(shader)
    }

    pub fn with_policy(mut self, policy: MissingUniformPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn bind(&self) {
        self.device.use_program(Some(self.id));
    }

    pub fn unbind(&self) {
        self.device.use_program(None);
    }

    /// Resolves `name` once per program lifetime; misses are cached too.
    pub fn get_uniform_location(&mut self, name: &str) -> Option<i32> {
        if let Some(location) = self.uniforms.get(name) {
            return *location;
        }

        let location = self.device.uniform_location(self.id, name);
        if location.is_none() {
            log::warn!("Uniform '{}' not found in shader", name);
        }

        self.uniforms.insert(name.to_string(), location);
        location
    }

    fn resolve(&mut self, name: &str) -> Result<Option<i32>> {
        match (self.get_uniform_location(name), self.policy) {
            (None, MissingUniformPolicy::Error) => Err(RenderError::UniformNotFound(name.to_string())),
            (location, _) => Ok(location),
        }
    }

    // Uniform setters. The program must be bound.
    pub fn set_uniform_1i(&mut self, name: &str, value: i32) -> Result<()> {
        if let Some(location) = self.resolve(name)? {
            self.device.uniform_1i(location, value);
        }
        Ok(())
    }

    pub fn set_uniform_1f(&mut self, name: &str, value: f32) -> Result<()> {
        if let Some(location) = self.resolve(name)? {
            self.device.uniform_1f(location, value);
        }
        Ok(())
    }

    pub fn set_uniform_4f(&mut self, name: &str, v0: f32, v1: f32, v2: f32, v3: f32) -> Result<()> {
        if let Some(location) = self.resolve(name)? {
            self.device.uniform_4f(location, [v0, v1, v2, v3]);
        }
        Ok(())
    }

    pub fn set_uniform_mat4(&mut self, name: &str, matrix: &glam::Mat4) -> Result<()> {
        if let Some(location) = self.resolve(name)? {
            self.device.uniform_matrix_4f(location, &matrix.to_cols_array());
        }
        Ok(())
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        log::debug!("Deleting shader program {}", self.id);
        self.device.delete_program(self.id);
    }
}
