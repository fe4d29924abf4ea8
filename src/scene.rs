//! The demo scene: one textured quad tinted by a cycling colour.

use std::rc::Rc;

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use image::{Rgba, RgbaImage};

use crate::config::RenderConfig;
use crate::render::{
    Device, IndexBuffer, Renderer, ShaderProgram, Texture, VertexArray, VertexBuffer,
    VertexBufferLayout,
};
use crate::utils::error::Result;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 2],
    pub tex_coord: [f32; 2],
}

pub const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { position: [-0.5, -0.5], tex_coord: [0.0, 0.0] },
    QuadVertex { position: [0.5, -0.5], tex_coord: [1.0, 0.0] },
    QuadVertex { position: [0.5, 0.5], tex_coord: [1.0, 1.0] },
    QuadVertex { position: [-0.5, 0.5], tex_coord: [0.0, 1.0] },
];

pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

pub fn quad_layout() -> VertexBufferLayout {
    let mut layout = VertexBufferLayout::new();
    layout.push_f32(2).push_f32(2);
    layout
}

/// Moves all three channels by the same step, bouncing between 0 and 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorCycle {
    rgb: [f32; 3],
    step: f32,
    increment: f32,
}

impl ColorCycle {
    pub fn new(rgb: [f32; 3], step: f32) -> Self {
        let step = step.abs();
        Self {
            rgb,
            step,
            increment: step,
        }
    }

    pub fn color(&self) -> [f32; 4] {
        let [r, g, b] = self.rgb;
        [r, g, b, 1.0]
    }

    pub fn advance(&mut self) {
        let red = self.rgb[0];
        if red > 1.0 {
            self.increment = -self.step;
        } else if red < 0.0 {
            self.increment = self.step;
        }
        for channel in &mut self.rgb {
            *channel += self.increment;
        }
    }
}

impl Default for ColorCycle {
    fn default() -> Self {
        Self::new([0.9, 0.2, 0.5], 0.05)
    }
}

pub fn projection() -> Mat4 {
    Mat4::orthographic_rh_gl(-1.0, 1.0, -1.0, 1.0, -1.0, 1.0)
}

pub struct Scene {
    shader: ShaderProgram,
    texture: Texture,
    vertex_array: VertexArray,
    _vertex_buffer: VertexBuffer,
    index_buffer: IndexBuffer,
    colors: ColorCycle,
}

impl Scene {
    pub fn new(device: Rc<dyn Device>, config: &RenderConfig) -> Result<Self> {
        let vertex_array = VertexArray::new(device.clone());
        let vertex_buffer = VertexBuffer::new(device.clone(), &QUAD_VERTICES);
        vertex_array.add_buffer(&vertex_buffer, &quad_layout());
        let index_buffer = IndexBuffer::new(device.clone(), &QUAD_INDICES);

        let mut shader = ShaderProgram::from_file(device.clone(), &config.shader_path)?
            .with_policy(config.uniform_policy());

        let texture = match &config.texture_path {
            Some(path) => Texture::new(device.clone(), path)?,
            None => {
                log::info!("No texture configured, using plain white");
                let white = RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 255]));
                Texture::from_rgba(device.clone(), &white)
            }
        };

        shader.bind();
        texture.bind(0);
        shader.set_uniform_1i("u_Texture", 0)?;
        shader.set_uniform_mat4("u_MVP", &projection())?;

        vertex_array.unbind();
        shader.unbind();
        vertex_buffer.unbind();
        index_buffer.unbind();

        Ok(Self {
            shader,
            texture,
            vertex_array,
            _vertex_buffer: vertex_buffer,
            index_buffer,
            colors: ColorCycle::new(config.start_color, config.color_step),
        })
    }

    pub fn colors(&self) -> &ColorCycle {
        &self.colors
    }

    pub fn render(&mut self, renderer: &Renderer) -> Result<()> {
        renderer.clear();

        self.texture.bind(0);
        self.shader.bind();
        let [r, g, b, a] = self.colors.color();
        self.shader.set_uniform_4f("u_Color", r, g, b, a)?;
        renderer.draw(&self.vertex_array, &self.index_buffer, &self.shader);

        self.colors.advance();
        Ok(())
    }
}
