use super::device::ComponentType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexBufferElement {
    pub component_type: ComponentType,
    pub count: u32,
    pub normalized: bool,
}

impl VertexBufferElement {
    pub const fn size_in_bytes(&self) -> u32 {
        self.count * self.component_type.size_in_bytes()
    }
}

/// Describes one interleaved vertex record, field by field.
///
/// Fields are append-only: slot `i` of the vertex array is the `i`-th pushed
/// field, and `stride()` is always the byte width of all fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertexBufferLayout {
    elements: Vec<VertexBufferElement>,
    stride: u32,
}

impl VertexBufferLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, component_type: ComponentType, count: u32, normalized: bool) -> &mut Self {
        let element = VertexBufferElement {
            component_type,
            count,
            normalized,
        };
        self.stride += element.size_in_bytes();
        self.elements.push(element);
        self
    }

    pub fn push_f32(&mut self, count: u32) -> &mut Self {
        self.push(ComponentType::Float32, count, false)
    }

    pub fn push_u32(&mut self, count: u32) -> &mut Self {
        self.push(ComponentType::UInt32, count, false)
    }

    /// Bytes are normalized to `0.0..=1.0`, as colour channels usually are.
    pub fn push_u8(&mut self, count: u32) -> &mut Self {
        self.push(ComponentType::UInt8, count, true)
    }

    pub fn elements(&self) -> &[VertexBufferElement] {
        &self.elements
    }

    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// Byte offset of every element within the record, in push order.
    pub fn offsets(&self) -> impl Iterator<Item = u32> + '_ {
        self.elements.iter().scan(0, |offset, element| {
            let current = *offset;
            *offset += element.size_in_bytes();
            Some(current)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_and_uv() {
        let mut layout = VertexBufferLayout::new();
        layout.push_f32(2).push_f32(2);
        assert_eq!(layout.stride(), 16);
        assert_eq!(layout.offsets().collect::<Vec<_>>(), vec![0, 8]);
    }

    #[test]
    fn test_mixed_types() {
        let mut layout = VertexBufferLayout::new();
        layout.push_f32(3).push_u8(4).push_u32(1).push_f32(2);
        assert_eq!(layout.offsets().collect::<Vec<_>>(), vec![0, 12, 16, 20]);
        assert_eq!(layout.stride(), 28);
        assert!(layout.elements()[1].normalized);
        assert!(!layout.elements()[2].normalized);
    }

    #[test]
    fn test_stride_tracks_every_push() {
        let fields = [
            (ComponentType::UInt8, 3),
            (ComponentType::Float32, 1),
            (ComponentType::UInt32, 2),
            (ComponentType::UInt8, 1),
            (ComponentType::Float32, 4),
        ];
        let mut layout = VertexBufferLayout::new();
        let mut expected_stride = 0;
        for (component_type, count) in fields {
            layout.push(component_type, count, false);
            expected_stride += count * component_type.size_in_bytes();
            assert_eq!(layout.stride(), expected_stride);
        }

        let offsets: Vec<u32> = layout.offsets().collect();
        for (k, offset) in offsets.iter().enumerate() {
            let before: u32 = layout.elements()[..k].iter().map(|e| e.size_in_bytes()).sum();
            assert_eq!(*offset, before);
        }
        assert_eq!(layout.elements().len(), fields.len());
    }

    #[test]
    fn test_empty_layout() {
        let layout = VertexBufferLayout::new();
        assert_eq!(layout.stride(), 0);
        assert_eq!(layout.offsets().count(), 0);
    }
}
