use std::rc::Rc;

use super::buffer::VertexBuffer;
use super::device::{Device, ObjectId};
use super::layout::VertexBufferLayout;

pub struct VertexArray {
    device: Rc<dyn Device>,
    id: ObjectId,
}

impl VertexArray {
    pub fn new(device: Rc<dyn Device>) -> Self {
        let id = device.create_vertex_array();
        log::debug!("Created vertex array {}", id);
        Self { device, id }
    }

    /// Registers every field of `layout` against `buffer`, slot `i` for the
    /// `i`-th field, each at the cumulative byte width of the fields before it.
    pub fn add_buffer(&self, buffer: &VertexBuffer, layout: &VertexBufferLayout) {
        self.bind();
        buffer.bind();

        let stride = layout.stride() as i32;
        for (index, (element, offset)) in layout.elements().iter().zip(layout.offsets()).enumerate() {
            let index = index as u32;
            self.device.enable_vertex_attrib_array(index);
            self.device.vertex_attrib_pointer(
                index,
                element.count as i32,
                element.component_type,
                element.normalized,
                stride,
                offset as usize,
            );
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn bind(&self) {
        self.device.bind_vertex_array(Some(self.id));
    }

    pub fn unbind(&self) {
        self.device.bind_vertex_array(None);
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        self.device.delete_vertex_array(self.id);
    }
}
