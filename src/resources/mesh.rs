//! GPU-ready mesh data
//!
//! A [`PrimitiveMesh`] is one scene primitive with its attribute views
//! resolved into interleaved vertices and widened u32 indices.

use crate::backend::types::Vertex;
use crate::error::{RenderError, RenderResult};
use crate::scene::{Primitive, Scene};
use glam::Vec4;

/// An indexed triangle list ready for upload
#[derive(Debug, Clone)]
pub struct PrimitiveMesh {
    pub name: String,
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    /// Material base color
    pub color: Vec4,
}

impl PrimitiveMesh {
    /// Resolve a scene primitive for drawing
    ///
    /// Returns `Ok(None)` for primitives without an index buffer. A primitive
    /// with indices must carry POSITION, NORMAL and TEXCOORD_0 of equal length,
    /// and every index must address an existing vertex.
    pub fn from_primitive(scene: &Scene, primitive: &Primitive, name: &str) -> RenderResult<Option<Self>> {
        let Some(index_view) = &primitive.indices else {
            return Ok(None);
        };

        let missing = |attribute: &str| RenderError::load(format!("{name} has no {attribute} attribute"));
        let positions = primitive.positions.as_ref().ok_or_else(|| missing("POSITION"))?;
        let normals = primitive.normals.as_ref().ok_or_else(|| missing("NORMAL"))?;
        let texcoords = primitive.texcoords.as_ref().ok_or_else(|| missing("TEXCOORD_0"))?;

        let positions = positions.read_vec3(&scene.buffers)?;
        let normals = normals.read_vec3(&scene.buffers)?;
        let texcoords = texcoords.read_vec2(&scene.buffers)?;

        if normals.len() != positions.len() || texcoords.len() != positions.len() {
            return Err(RenderError::load(format!(
                "{name} has mismatched attribute counts: {} positions, {} normals, {} texcoords",
                positions.len(),
                normals.len(),
                texcoords.len()
            )));
        }

        let indices = index_view.read_indices(&scene.buffers)?;
        if let Some(&bad) = indices.iter().find(|&&i| i as usize >= positions.len()) {
            return Err(RenderError::load(format!(
                "{name} index {bad} is out of range for {} vertices",
                positions.len()
            )));
        }

        let vertices = positions
            .into_iter()
            .zip(normals)
            .zip(texcoords)
            .map(|((position, normal), uv)| Vertex {
                position,
                normal,
                uv,
            })
            .collect();

        Ok(Some(Self {
            name: name.to_string(),
            vertices,
            indices,
            color: scene.base_color(primitive.material),
        }))
    }

    /// Calculate vertex count
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Calculate index count
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Calculate triangle count
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Get vertex data as bytes
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Get index data as bytes
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}
