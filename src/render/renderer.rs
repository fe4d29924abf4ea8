use std::rc::Rc;

use super::buffer::IndexBuffer;
use super::device::Device;
use super::shaders::ShaderProgram;
use super::vertex_array::VertexArray;

pub struct Renderer {
    device: Rc<dyn Device>,
}

impl Renderer {
    pub fn new(device: Rc<dyn Device>) -> Self {
        device.enable_blending();
        Self { device }
    }

    pub fn device(&self) -> &Rc<dyn Device> {
        &self.device
    }

    pub fn set_clear_color(&self, color: [f32; 4]) {
        self.device.clear_color(color);
    }

    pub fn clear(&self) {
        self.device.clear();
    }

    pub fn resize(&self, width: u32, height: u32) {
        self.device.viewport(width as i32, height as i32);
    }

    pub fn draw(&self, vertex_array: &VertexArray, index_buffer: &IndexBuffer, shader: &ShaderProgram) {
        shader.bind();
        vertex_array.bind();
        index_buffer.bind();
        self.device.draw_elements(index_buffer.count() as i32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::device::fake::{Call, FakeDevice};
    use crate::render::device::BufferTarget;

    #[test]
    fn test_draw_binds_then_draws() {
        let fake = Rc::new(FakeDevice::new());
        let renderer = Renderer::new(fake.clone());
        let shader = ShaderProgram::new_from_source(fake.clone(), "VS", "FS").unwrap();
        let vertex_array = VertexArray::new(fake.clone());
        let index_buffer = IndexBuffer::new(fake.clone(), &[0, 1, 2, 2, 3, 0]);

        let before = fake.calls().len();
        renderer.clear();
        renderer.draw(&vertex_array, &index_buffer, &shader);

        let calls = fake.calls();
        assert_eq!(calls[0], Call::EnableBlending);
        assert_eq!(
            &calls[before..],
            &[
                Call::Clear,
                Call::UseProgram(Some(shader.id())),
                Call::BindVertexArray(Some(vertex_array.id())),
                Call::BindBuffer(BufferTarget::ElementArray, Some(index_buffer.id())),
                Call::DrawElements(6),
            ]
        );
    }

    #[test]
    fn test_clear_color_and_resize() {
        let fake = Rc::new(FakeDevice::new());
        let renderer = Renderer::new(fake.clone());
        renderer.set_clear_color([0.1, 0.2, 0.3, 1.0]);
        renderer.resize(640, 480);
        let calls = fake.calls();
        assert!(calls.contains(&Call::ClearColor([0.1, 0.2, 0.3, 1.0])));
        assert!(calls.contains(&Call::Viewport(640, 480)));
    }
}
