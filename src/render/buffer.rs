use std::rc::Rc;

use bytemuck::Pod;

use super::device::{BufferTarget, Device, ObjectId};

pub struct VertexBuffer {
    device: Rc<dyn Device>,
    id: ObjectId,
    size: usize,
}

impl VertexBuffer {
    pub fn new<T: Pod>(device: Rc<dyn Device>, data: &[T]) -> Self {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        let id = device.create_buffer();
        device.bind_buffer(BufferTarget::Array, Some(id));
        device.buffer_data(BufferTarget::Array, bytes);
        log::debug!("Created vertex buffer {} ({} bytes)", id, bytes.len());

        Self {
            device,
            id,
            size: bytes.len(),
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn bind(&self) {
        self.device.bind_buffer(BufferTarget::Array, Some(self.id));
    }

    pub fn unbind(&self) {
        self.device.bind_buffer(BufferTarget::Array, None);
    }
}

impl Drop for VertexBuffer {
    fn drop(&mut self) {
        self.device.delete_buffer(self.id);
    }
}

pub struct IndexBuffer {
    device: Rc<dyn Device>,
    id: ObjectId,
    count: usize,
}

impl IndexBuffer {
    pub fn new(device: Rc<dyn Device>, indices: &[u32]) -> Self {
        let id = device.create_buffer();
        device.bind_buffer(BufferTarget::ElementArray, Some(id));
        device.buffer_data(BufferTarget::ElementArray, bytemuck::cast_slice(indices));
        log::debug!("Created index buffer {} ({} indices)", id, indices.len());

        Self {
            device,
            id,
            count: indices.len(),
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn bind(&self) {
        self.device.bind_buffer(BufferTarget::ElementArray, Some(self.id));
    }

    pub fn unbind(&self) {
        self.device.bind_buffer(BufferTarget::ElementArray, None);
    }
}

impl Drop for IndexBuffer {
    fn drop(&mut self) {
        self.device.delete_buffer(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::device::fake::{Call, FakeDevice};

    #[test]
    fn test_vertex_buffer_upload_and_release() {
        let fake = Rc::new(FakeDevice::new());
        let positions: [f32; 8] = [-0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, 0.5];
        let buffer = VertexBuffer::new(fake.clone(), &positions);
        assert_eq!(buffer.size(), 32);
        assert!(fake
            .calls()
            .contains(&Call::BufferData(BufferTarget::Array, 32)));

        let id = buffer.id();
        drop(buffer);
        assert_eq!(fake.count(|c| *c == Call::DeleteBuffer(id)), 1);
        assert!(fake.live_objects().is_empty());
    }

    #[test]
    fn test_index_buffer_count() {
        let fake = Rc::new(FakeDevice::new());
        let buffer = IndexBuffer::new(fake.clone(), &[0, 1, 2, 2, 3, 0]);
        assert_eq!(buffer.count(), 6);
        assert!(fake
            .calls()
            .contains(&Call::BufferData(BufferTarget::ElementArray, 24)));
        buffer.unbind();
        assert_eq!(
            fake.calls().last(),
            Some(&Call::BindBuffer(BufferTarget::ElementArray, None))
        );
    }
}
