//! Binary glTF loading
//!
//! Parses a `.glb` container into a [`Scene`]. Attribute data stays in the
//! embedded binary chunk; primitives only hold validated views into it.

use super::{AttributeView, ElementFormat, Material, Mesh, Primitive, Scene, Topology};
use crate::error::{RenderError, RenderResult};
use glam::{Mat4, Vec4};
use std::path::Path;

/// Read and parse a binary glTF file
pub fn load_scene(path: impl AsRef<Path>) -> RenderResult<Scene> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .map_err(|e| RenderError::load(format!("cannot read {}: {e}", path.display())))?;

    log::info!("Loading scene from {} ({} bytes)", path.display(), bytes.len());
    load_scene_from_slice(&bytes)
}

/// Parse a binary glTF container already in memory
pub fn load_scene_from_slice(bytes: &[u8]) -> RenderResult<Scene> {
    let gltf::Gltf { document, blob } = gltf::Gltf::from_slice(bytes)?;

    for extension in document.extensions_used() {
        log::warn!("Extension '{extension}' is not supported and will be ignored");
    }

    let buffers = resolve_buffers(&document, blob)?;

    let materials = document
        .materials()
        .map(|material| Material {
            name: material.name().map(str::to_string),
            base_color: Vec4::from_array(material.pbr_metallic_roughness().base_color_factor()),
        })
        .collect();

    let mut meshes = Vec::new();
    for mesh in document.meshes() {
        let mut primitives = Vec::new();
        for (prim_idx, primitive) in mesh.primitives().enumerate() {
            let topology = Topology::from(primitive.mode());
            if topology != Topology::Triangles {
                log::warn!(
                    "Mesh {} primitive {prim_idx} uses {topology:?}; it will be drawn as a triangle list",
                    mesh.index()
                );
            }

            let positions = primitive.get(&gltf::Semantic::Positions);
            if let Some(accessor) = &positions {
                if accessor.data_type() != gltf::accessor::DataType::F32 {
                    log::warn!(
                        "Mesh {} primitive {prim_idx} stores positions as {:?}; only f32 positions can be read",
                        mesh.index(),
                        accessor.data_type()
                    );
                }
            }

            primitives.push(Primitive {
                positions: positions.map(|a| accessor_view(&a, &buffers)).transpose()?,
                normals: primitive
                    .get(&gltf::Semantic::Normals)
                    .map(|a| accessor_view(&a, &buffers))
                    .transpose()?,
                texcoords: primitive
                    .get(&gltf::Semantic::TexCoords(0))
                    .map(|a| accessor_view(&a, &buffers))
                    .transpose()?,
                indices: primitive
                    .indices()
                    .map(|a| accessor_view(&a, &buffers))
                    .transpose()?,
                material: primitive.material().index(),
                topology,
            });
        }

        meshes.push(Mesh {
            name: mesh.name().map(str::to_string),
            primitives,
        });
    }

    let transformed = document
        .nodes()
        .filter(|node| node.transform().matrix() != Mat4::IDENTITY.to_cols_array_2d())
        .count();
    if transformed > 0 {
        log::warn!("{transformed} node transform(s) ignored; geometry is drawn in mesh space");
    }

    let scene = Scene {
        meshes,
        materials,
        buffers,
    };

    log::info!(
        "Loaded {} mesh(es), {} primitive(s), {} material(s)",
        scene.meshes.len(),
        scene.primitive_count(),
        scene.materials.len()
    );

    Ok(scene)
}

/// Resolve buffer data; only the embedded binary chunk is accepted
fn resolve_buffers(document: &gltf::Document, blob: Option<Vec<u8>>) -> RenderResult<Vec<Vec<u8>>> {
    let mut buffers = Vec::new();

    for buffer in document.buffers() {
        match buffer.source() {
            gltf::buffer::Source::Bin => {
                let data = blob.as_ref().ok_or_else(|| {
                    RenderError::load("binary buffer referenced but no BIN chunk present")
                })?;
                if data.len() < buffer.length() {
                    return Err(RenderError::load(format!(
                        "BIN chunk holds {} bytes but buffer {} declares {}",
                        data.len(),
                        buffer.index(),
                        buffer.length()
                    )));
                }
                buffers.push(data.clone());
            }
            gltf::buffer::Source::Uri(uri) => {
                return Err(RenderError::load(format!(
                    "buffer {} references URI '{}'; only the embedded binary chunk is supported",
                    buffer.index(),
                    truncate_uri(uri)
                )));
            }
        }
    }

    Ok(buffers)
}

/// Build a checked view for an accessor
fn accessor_view(accessor: &gltf::Accessor, buffers: &[Vec<u8>]) -> RenderResult<AttributeView> {
    if accessor.sparse().is_some() {
        log::warn!(
            "Accessor {} is sparse; sparse substitution is ignored",
            accessor.index()
        );
    }

    let view = accessor.view().ok_or_else(|| {
        RenderError::load(format!("accessor {} has no buffer view", accessor.index()))
    })?;

    let format = ElementFormat {
        component: accessor.data_type().into(),
        dimensions: accessor.dimensions().multiplicity(),
        normalized: accessor.normalized(),
    };

    let offset = view.offset().checked_add(accessor.offset()).ok_or_else(|| {
        RenderError::load(format!("accessor {} offset overflows", accessor.index()))
    })?;
    let view_end = view.offset().checked_add(view.length()).ok_or_else(|| {
        RenderError::load(format!("buffer view {} offset overflows", view.index()))
    })?;

    let attribute = AttributeView::new(
        buffers,
        view.buffer().index(),
        offset,
        accessor.count(),
        view.stride(),
        format,
    )?;

    // The accessor must also stay inside its own buffer view
    match attribute.end() {
        Some(end) if end <= view_end => Ok(attribute),
        _ => Err(RenderError::load(format!(
            "accessor {} exceeds buffer view {}",
            accessor.index(),
            view.index()
        ))),
    }
}

fn truncate_uri(uri: &str) -> String {
    const MAX: usize = 48;
    if uri.chars().count() > MAX {
        format!("{}...", uri.chars().take(MAX).collect::<String>())
    } else {
        uri.to_string()
    }
}
