//! Scene management
//!
//! A [`Scene`] is the parsed form of one binary glTF container: meshes made
//! of primitives whose attributes are views into the owned buffers.

mod bounds;
mod camera;
mod light;
pub mod loader;
mod view;

pub use bounds::*;
pub use camera::*;
pub use light::*;
pub use loader::{load_scene, load_scene_from_slice};
pub use view::*;

use glam::Vec4;

/// Primitive topology as declared in the container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Topology {
    Points,
    Lines,
    LineLoop,
    LineStrip,
    #[default]
    Triangles,
    TriangleStrip,
    TriangleFan,
}

impl From<gltf::mesh::Mode> for Topology {
    fn from(mode: gltf::mesh::Mode) -> Self {
        use gltf::mesh::Mode;
        match mode {
            Mode::Points => Topology::Points,
            Mode::Lines => Topology::Lines,
            Mode::LineLoop => Topology::LineLoop,
            Mode::LineStrip => Topology::LineStrip,
            Mode::Triangles => Topology::Triangles,
            Mode::TriangleStrip => Topology::TriangleStrip,
            Mode::TriangleFan => Topology::TriangleFan,
        }
    }
}

/// A drawable sub-mesh
#[derive(Debug, Clone, Default)]
pub struct Primitive {
    pub positions: Option<AttributeView>,
    pub normals: Option<AttributeView>,
    pub texcoords: Option<AttributeView>,
    pub indices: Option<AttributeView>,
    pub material: Option<usize>,
    pub topology: Topology,
}

/// A named group of primitives
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub name: Option<String>,
    pub primitives: Vec<Primitive>,
}

/// Surface description; only the base color is used for shading
#[derive(Debug, Clone)]
pub struct Material {
    pub name: Option<String>,
    pub base_color: Vec4,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: None,
            base_color: Vec4::ONE,
        }
    }
}

/// The loaded scene together with its backing buffers
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub meshes: Vec<Mesh>,
    pub materials: Vec<Material>,
    pub buffers: Vec<Vec<u8>>,
}

impl Scene {
    /// Total number of primitives across all meshes
    pub fn primitive_count(&self) -> usize {
        self.meshes.iter().map(|m| m.primitives.len()).sum()
    }

    /// Base color for a primitive's material; opaque white when unset
    pub fn base_color(&self, material: Option<usize>) -> Vec4 {
        material
            .and_then(|i| self.materials.get(i))
            .map(|m| m.base_color)
            .unwrap_or(Vec4::ONE)
    }

    /// Iterate `(mesh index, primitive index, primitive)` in file order
    pub fn primitives(&self) -> impl Iterator<Item = (usize, usize, &Primitive)> {
        self.meshes.iter().enumerate().flat_map(|(mesh_idx, mesh)| {
            mesh.primitives
                .iter()
                .enumerate()
                .map(move |(prim_idx, primitive)| (mesh_idx, prim_idx, primitive))
        })
    }
}
