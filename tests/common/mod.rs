//! Common utilities for integration tests.
//!
//! Provides a small binary glTF writer so tests can build scenes in memory,
//! plus a backend that records draw calls without touching the GPU.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use glb_render::backend::{BackendResult, RenderBackend};
use glb_render::pipeline::{DrawUniforms, FrameBuffer};
use glb_render::resources::PrimitiveMesh;
use serde_json::{json, Value};

const GLB_MAGIC: u32 = 0x4654_6C67;
const CHUNK_JSON: u32 = 0x4E4F_534A;
const CHUNK_BIN: u32 = 0x004E_4942;

const TARGET_ARRAY_BUFFER: u32 = 34962;
const TARGET_ELEMENT_ARRAY_BUFFER: u32 = 34963;

const COMPONENT_U8: u32 = 5121;
const COMPONENT_U16: u32 = 5123;
const COMPONENT_U32: u32 = 5125;
const COMPONENT_F32: u32 = 5126;

// ============================================================================
// GLB Builder
// ============================================================================

/// Accessor indices for one set of vertex attributes.
#[derive(Debug, Clone, Copy)]
pub struct Attributes {
    pub position: Option<usize>,
    pub normal: Option<usize>,
    pub texcoord: Option<usize>,
}

/// In-memory binary glTF writer.
#[derive(Debug, Default)]
pub struct GlbBuilder {
    bin: Vec<u8>,
    buffer_views: Vec<Value>,
    accessors: Vec<Value>,
    materials: Vec<Value>,
    meshes: Vec<Value>,
    extensions_used: Vec<String>,
}

impl GlbBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push_view(&mut self, bytes: &[u8], target: u32) -> usize {
        while self.bin.len() % 4 != 0 {
            self.bin.push(0);
        }
        let offset = self.bin.len();
        self.bin.extend_from_slice(bytes);

        self.buffer_views.push(json!({
            "buffer": 0,
            "byteOffset": offset,
            "byteLength": bytes.len(),
            "target": target,
        }));
        self.buffer_views.len() - 1
    }

    fn push_accessor(&mut self, accessor: Value) -> usize {
        self.accessors.push(accessor);
        self.accessors.len() - 1
    }

    /// Add a VEC3 float accessor (with the min/max glTF requires for positions).
    pub fn add_vec3(&mut self, data: &[[f32; 3]]) -> usize {
        let bytes: Vec<u8> = data.iter().flatten().flat_map(|v| v.to_le_bytes()).collect();
        let view = self.push_view(&bytes, TARGET_ARRAY_BUFFER);

        let mut min = [f32::MAX; 3];
        let mut max = [f32::MIN; 3];
        for p in data {
            for axis in 0..3 {
                min[axis] = min[axis].min(p[axis]);
                max[axis] = max[axis].max(p[axis]);
            }
        }

        let mut accessor = json!({
            "bufferView": view,
            "componentType": COMPONENT_F32,
            "count": data.len(),
            "type": "VEC3",
        });
        if !data.is_empty() {
            accessor["min"] = json!(min);
            accessor["max"] = json!(max);
        }
        self.push_accessor(accessor)
    }

    /// Add a VEC2 float accessor.
    pub fn add_vec2(&mut self, data: &[[f32; 2]]) -> usize {
        let bytes: Vec<u8> = data.iter().flatten().flat_map(|v| v.to_le_bytes()).collect();
        let view = self.push_view(&bytes, TARGET_ARRAY_BUFFER);
        self.push_accessor(json!({
            "bufferView": view,
            "componentType": COMPONENT_F32,
            "count": data.len(),
            "type": "VEC2",
        }))
    }

    fn add_scalar(&mut self, bytes: &[u8], count: usize, component: u32) -> usize {
        let view = self.push_view(bytes, TARGET_ELEMENT_ARRAY_BUFFER);
        self.push_accessor(json!({
            "bufferView": view,
            "componentType": component,
            "count": count,
            "type": "SCALAR",
        }))
    }

    pub fn add_indices_u8(&mut self, data: &[u8]) -> usize {
        self.add_scalar(data, data.len(), COMPONENT_U8)
    }

    pub fn add_indices_u16(&mut self, data: &[u16]) -> usize {
        let bytes: Vec<u8> = data.iter().flat_map(|v| v.to_le_bytes()).collect();
        self.add_scalar(&bytes, data.len(), COMPONENT_U16)
    }

    pub fn add_indices_u32(&mut self, data: &[u32]) -> usize {
        let bytes: Vec<u8> = data.iter().flat_map(|v| v.to_le_bytes()).collect();
        self.add_scalar(&bytes, data.len(), COMPONENT_U32)
    }

    /// Add positions, normals and texcoords for one vertex set.
    pub fn add_geometry(
        &mut self,
        positions: &[[f32; 3]],
        normals: &[[f32; 3]],
        texcoords: &[[f32; 2]],
    ) -> Attributes {
        Attributes {
            position: Some(self.add_vec3(positions)),
            normal: Some(self.add_vec3(normals)),
            texcoord: Some(self.add_vec2(texcoords)),
        }
    }

    pub fn add_material(&mut self, base_color: [f32; 4]) -> usize {
        self.materials.push(json!({
            "pbrMetallicRoughness": { "baseColorFactor": base_color },
        }));
        self.materials.len() - 1
    }

    pub fn add_mesh(&mut self, name: Option<&str>, primitives: Vec<Value>) -> usize {
        let mut mesh = json!({ "primitives": primitives });
        if let Some(name) = name {
            mesh["name"] = json!(name);
        }
        self.meshes.push(mesh);
        self.meshes.len() - 1
    }

    pub fn use_extension(&mut self, name: &str) {
        self.extensions_used.push(name.to_string());
    }

    /// Serialize the glTF JSON document.
    pub fn document(&self) -> Value {
        let nodes: Vec<Value> = (0..self.meshes.len()).map(|i| json!({ "mesh": i })).collect();
        let node_indices: Vec<usize> = (0..nodes.len()).collect();

        let mut doc = json!({
            "asset": { "version": "2.0", "generator": "glb-render tests" },
            "scene": 0,
            "scenes": [{ "nodes": node_indices }],
            "nodes": nodes,
            "meshes": self.meshes,
            "accessors": self.accessors,
            "bufferViews": self.buffer_views,
            "buffers": [{ "byteLength": self.padded_bin().len() }],
        });
        if !self.materials.is_empty() {
            doc["materials"] = json!(self.materials);
        }
        if !self.extensions_used.is_empty() {
            doc["extensionsUsed"] = json!(self.extensions_used);
        }
        doc
    }

    /// BIN chunk contents, padded to four bytes.
    pub fn padded_bin(&self) -> Vec<u8> {
        let mut bin = self.bin.clone();
        if bin.is_empty() {
            bin.extend_from_slice(&[0; 4]);
        }
        while bin.len() % 4 != 0 {
            bin.push(0);
        }
        bin
    }

    /// Assemble the binary container.
    pub fn build(&self) -> Vec<u8> {
        encode_glb(&self.document(), &self.padded_bin())
    }

    /// Write the container to `dir/name`.
    pub fn write_to(&self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, self.build()).expect("failed to write test scene");
        path
    }
}

/// Build a GLB container from a JSON document and a BIN chunk.
pub fn encode_glb(document: &Value, bin: &[u8]) -> Vec<u8> {
    let mut json_bytes = serde_json::to_vec(document).expect("failed to serialize glTF JSON");
    while json_bytes.len() % 4 != 0 {
        json_bytes.push(b' ');
    }

    let total = 12 + 8 + json_bytes.len() + 8 + bin.len();
    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(&GLB_MAGIC.to_le_bytes());
    out.extend_from_slice(&2u32.to_le_bytes());
    out.extend_from_slice(&(total as u32).to_le_bytes());

    out.extend_from_slice(&(json_bytes.len() as u32).to_le_bytes());
    out.extend_from_slice(&CHUNK_JSON.to_le_bytes());
    out.extend_from_slice(&json_bytes);

    out.extend_from_slice(&(bin.len() as u32).to_le_bytes());
    out.extend_from_slice(&CHUNK_BIN.to_le_bytes());
    out.extend_from_slice(bin);

    out
}

/// JSON for one primitive.
pub fn primitive(attributes: Attributes, indices: Option<usize>, material: Option<usize>) -> Value {
    let mut attrs = serde_json::Map::new();
    if let Some(a) = attributes.position {
        attrs.insert("POSITION".into(), json!(a));
    }
    if let Some(a) = attributes.normal {
        attrs.insert("NORMAL".into(), json!(a));
    }
    if let Some(a) = attributes.texcoord {
        attrs.insert("TEXCOORD_0".into(), json!(a));
    }

    let mut prim = json!({ "attributes": attrs });
    if let Some(i) = indices {
        prim["indices"] = json!(i);
    }
    if let Some(m) = material {
        prim["material"] = json!(m);
    }
    prim
}

// ============================================================================
// Test Geometry
// ============================================================================

/// Quad in the z = 0 plane facing +Z, counter-clockwise.
pub const QUAD_POSITIONS: [[f32; 3]; 4] = [
    [-1.0, -1.0, 0.0],
    [1.0, -1.0, 0.0],
    [1.0, 1.0, 0.0],
    [-1.0, 1.0, 0.0],
];
pub const QUAD_NORMALS: [[f32; 3]; 4] = [[0.0, 0.0, 1.0]; 4];
pub const QUAD_TEXCOORDS: [[f32; 2]; 4] = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];
pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Two meshes: the first primitive has no index buffer, the second is an indexed quad.
pub fn unindexed_then_quad() -> GlbBuilder {
    let mut builder = GlbBuilder::new();

    let triangle = builder.add_geometry(
        &[[-2.0, -2.0, 0.0], [0.0, -2.0, 0.0], [-2.0, 0.0, 0.0]],
        &[[0.0, 0.0, 1.0]; 3],
        &[[0.0, 0.0]; 3],
    );
    builder.add_mesh(Some("loose"), vec![primitive(triangle, None, None)]);

    let quad = builder.add_geometry(&QUAD_POSITIONS, &QUAD_NORMALS, &QUAD_TEXCOORDS);
    let indices = builder.add_indices_u16(&QUAD_INDICES);
    let material = builder.add_material([1.0, 1.0, 1.0, 1.0]);
    builder.add_mesh(Some("quad"), vec![primitive(quad, Some(indices), Some(material))]);

    builder
}

/// One mesh with a single indexed quad in the given color.
pub fn colored_quad(color: [f32; 4]) -> GlbBuilder {
    let mut builder = GlbBuilder::new();
    let quad = builder.add_geometry(&QUAD_POSITIONS, &QUAD_NORMALS, &QUAD_TEXCOORDS);
    let indices = builder.add_indices_u16(&QUAD_INDICES);
    let material = builder.add_material(color);
    builder.add_mesh(None, vec![primitive(quad, Some(indices), Some(material))]);
    builder
}

// ============================================================================
// Recording Backend
// ============================================================================

/// Backend that records draws and returns a frame that is white once anything was drawn.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub clears: usize,
    pub draws: Vec<(String, usize)>,
}

impl RenderBackend for RecordingBackend {
    fn clear(&mut self, _color: [f32; 4]) {
        self.clears += 1;
    }

    fn draw_mesh(&mut self, mesh: &PrimitiveMesh, _uniforms: &DrawUniforms) -> BackendResult<()> {
        self.draws.push((mesh.name.clone(), mesh.index_count()));
        Ok(())
    }

    fn read_frame(&mut self) -> BackendResult<FrameBuffer> {
        let shade = if self.draws.is_empty() { 0 } else { 255 };
        Ok(FrameBuffer::solid(800, 600, [shade; 3]))
    }
}

/// Files currently in `dir`, sorted.
pub fn dir_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("failed to read directory")
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
