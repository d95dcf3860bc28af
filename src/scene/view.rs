//! Bounds-checked views into scene buffers

use crate::error::{RenderError, RenderResult};
use glam::{Vec2, Vec3};

/// Component type of a single attribute element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentType {
    I8,
    U8,
    I16,
    U16,
    U32,
    F32,
}

impl ComponentType {
    pub fn size(&self) -> usize {
        match self {
            ComponentType::I8 | ComponentType::U8 => 1,
            ComponentType::I16 | ComponentType::U16 => 2,
            ComponentType::U32 | ComponentType::F32 => 4,
        }
    }
}

impl From<gltf::accessor::DataType> for ComponentType {
    fn from(data_type: gltf::accessor::DataType) -> Self {
        use gltf::accessor::DataType;
        match data_type {
            DataType::I8 => ComponentType::I8,
            DataType::U8 => ComponentType::U8,
            DataType::I16 => ComponentType::I16,
            DataType::U16 => ComponentType::U16,
            DataType::U32 => ComponentType::U32,
            DataType::F32 => ComponentType::F32,
        }
    }
}

/// Layout of one element in a view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementFormat {
    pub component: ComponentType,
    /// Components per element: 1 for scalars, 3 for vec3, ...
    pub dimensions: usize,
    pub normalized: bool,
}

impl ElementFormat {
    pub const VEC3_F32: Self = Self {
        component: ComponentType::F32,
        dimensions: 3,
        normalized: false,
    };

    pub fn scalar(component: ComponentType) -> Self {
        Self {
            component,
            dimensions: 1,
            normalized: false,
        }
    }

    pub fn size(&self) -> usize {
        self.component.size() * self.dimensions
    }
}

/// A typed window into one of the scene buffers
///
/// Constructing a view checks that its last element lies inside the buffer,
/// so reads never go out of bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeView {
    pub buffer: usize,
    pub offset: usize,
    pub count: usize,
    pub stride: usize,
    pub format: ElementFormat,
}

impl AttributeView {
    /// Create a view over `buffers[buffer]`; `stride` defaults to the element size
    pub fn new(
        buffers: &[Vec<u8>],
        buffer: usize,
        offset: usize,
        count: usize,
        stride: Option<usize>,
        format: ElementFormat,
    ) -> RenderResult<Self> {
        let data = buffers
            .get(buffer)
            .ok_or_else(|| RenderError::load(format!("buffer index {buffer} out of range")))?;

        let element_size = format.size();
        let stride = stride.unwrap_or(element_size);
        if stride < element_size {
            return Err(RenderError::load(format!(
                "stride {stride} is smaller than element size {element_size}"
            )));
        }

        let view = Self {
            buffer,
            offset,
            count,
            stride,
            format,
        };

        let end = view.end().ok_or_else(|| RenderError::load("view size overflows"))?;
        if end > data.len() {
            return Err(RenderError::load(format!(
                "view of {count} elements at offset {offset} ends at byte {end}, \
                 past the end of buffer {buffer} ({} bytes)",
                data.len()
            )));
        }

        Ok(view)
    }

    /// One past the last byte covered by the view
    pub fn end(&self) -> Option<usize> {
        if self.count == 0 {
            return Some(self.offset);
        }
        (self.count - 1)
            .checked_mul(self.stride)?
            .checked_add(self.format.size())?
            .checked_add(self.offset)
    }

    fn elements<'a>(&self, buffers: &'a [Vec<u8>]) -> RenderResult<impl Iterator<Item = &'a [u8]>> {
        let data = buffers
            .get(self.buffer)
            .ok_or_else(|| RenderError::load(format!("buffer index {} out of range", self.buffer)))?;
        let end = self.end().filter(|&end| end <= data.len()).ok_or_else(|| {
            RenderError::load(format!("view exceeds buffer {}", self.buffer))
        })?;

        let offset = self.offset;
        let stride = self.stride;
        let size = self.format.size();
        let bytes = &data[..end];
        Ok((0..self.count).map(move |i| {
            let start = offset + i * stride;
            &bytes[start..start + size]
        }))
    }

    /// Read vec3 f32 elements
    pub fn read_vec3(&self, buffers: &[Vec<u8>]) -> RenderResult<Vec<Vec3>> {
        if self.format != ElementFormat::VEC3_F32 {
            return Err(RenderError::load(format!(
                "expected vec3 f32 data, found {:?} x{}",
                self.format.component, self.format.dimensions
            )));
        }

        Ok(self
            .elements(buffers)?
            .map(|e| Vec3::new(read_f32(e, 0), read_f32(e, 1), read_f32(e, 2)))
            .collect())
    }

    /// Read vec2 elements stored as f32 or normalized u8/u16
    pub fn read_vec2(&self, buffers: &[Vec<u8>]) -> RenderResult<Vec<Vec2>> {
        let ElementFormat {
            component,
            dimensions,
            normalized,
        } = self.format;

        if dimensions != 2 {
            return Err(RenderError::load(format!(
                "expected vec2 data, found {dimensions} components"
            )));
        }

        let elements = self.elements(buffers)?;
        match (component, normalized) {
            (ComponentType::F32, _) => Ok(elements
                .map(|e| Vec2::new(read_f32(e, 0), read_f32(e, 1)))
                .collect()),
            (ComponentType::U8, true) => Ok(elements
                .map(|e| Vec2::new(e[0] as f32 / 255.0, e[1] as f32 / 255.0))
                .collect()),
            (ComponentType::U16, true) => Ok(elements
                .map(|e| {
                    Vec2::new(
                        read_u16(e, 0) as f32 / 65535.0,
                        read_u16(e, 1) as f32 / 65535.0,
                    )
                })
                .collect()),
            _ => Err(RenderError::load(format!(
                "unsupported vec2 component type {component:?} (normalized: {normalized})"
            ))),
        }
    }

    /// Read scalar u8, u16 or u32 indices widened to u32
    pub fn read_indices(&self, buffers: &[Vec<u8>]) -> RenderResult<Vec<u32>> {
        if self.format.dimensions != 1 {
            return Err(RenderError::load("index data must be scalar"));
        }

        let elements = self.elements(buffers)?;
        match self.format.component {
            ComponentType::U8 => Ok(elements.map(|e| e[0] as u32).collect()),
            ComponentType::U16 => Ok(elements.map(|e| read_u16(e, 0) as u32).collect()),
            ComponentType::U32 => Ok(elements
                .map(|e| u32::from_le_bytes([e[0], e[1], e[2], e[3]]))
                .collect()),
            other => Err(RenderError::load(format!(
                "unsupported index component type {other:?}"
            ))),
        }
    }
}

fn read_f32(element: &[u8], component: usize) -> f32 {
    let i = component * 4;
    f32::from_le_bytes([element[i], element[i + 1], element[i + 2], element[i + 3]])
}

fn read_u16(element: &[u8], component: usize) -> u16 {
    let i = component * 2;
    u16::from_le_bytes([element[i], element[i + 1]])
}
