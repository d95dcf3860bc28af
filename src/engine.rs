//! Main engine orchestrator
//!
//! Runs one request end to end: load, frame, draw, capture, encode.

use crate::backend::traits::*;
use crate::backend::wgpu_backend::WgpuBackend;
use crate::error::{RenderError, RenderResult};
use crate::output;
use crate::pipeline::{DrawUniforms, FrameBuffer};
use crate::request::RenderRequest;
use crate::resources::PrimitiveMesh;
use crate::scene::{self, BoundingBox, Camera, Scene};
use crate::{BackendType, PrimitiveSelection, RenderConfig};
use std::path::PathBuf;

/// Scene-to-image renderer
pub struct Engine {
    config: RenderConfig,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}

impl Engine {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render `request.input` and write the image, returning its path
    ///
    /// Nothing is written unless every step up to encoding succeeded.
    pub fn render(&self, request: &RenderRequest) -> RenderResult<PathBuf> {
        Self::ensure_backend_supported(request.backend)?;

        let output_path = request.resolve_output_path()?;
        let scene = scene::load_scene(&request.input)?;
        let camera = self.frame_scene(&scene)?;

        let mut backend = WgpuBackend::new(self.config.width, self.config.height)?;
        let frame = self.capture(&mut backend, &scene, &camera)?;

        output::write_image(&frame, request.format, self.config.jpeg_quality, &output_path)?;
        Ok(output_path)
    }

    /// Render a loaded scene with any backend
    pub fn render_scene<B: RenderBackend>(&self, backend: &mut B, scene: &Scene) -> RenderResult<FrameBuffer> {
        let camera = self.frame_scene(scene)?;
        self.capture(backend, scene, &camera)
    }

    /// Place the camera so the whole scene is visible
    pub fn frame_scene(&self, scene: &Scene) -> RenderResult<Camera> {
        let bounds = BoundingBox::from_scene(scene)?;
        let camera = Camera::frame_bounds(&bounds, self.config.fov_y, self.config.aspect());

        log::info!(
            "Camera at {} looking at {} (near {:.4}, far {:.4})",
            camera.position,
            camera.target,
            camera.projection.near,
            camera.projection.far
        );
        Ok(camera)
    }

    fn ensure_backend_supported(backend: BackendType) -> RenderResult<()> {
        match backend {
            BackendType::Gpu => Ok(()),
            BackendType::Cpu => Err(RenderError::UnsupportedBackend(backend.to_string())),
        }
    }

    fn capture<B: RenderBackend>(
        &self,
        backend: &mut B,
        scene: &Scene,
        camera: &Camera,
    ) -> RenderResult<FrameBuffer> {
        backend.clear(self.config.clear_color);

        let drawn = self.draw_scene(backend, scene, camera)?;
        if drawn == 0 {
            log::warn!("Scene has no drawable primitive; the image only shows the clear color");
        }

        Ok(backend.read_frame()?)
    }

    /// Draw primitives according to the selection mode, returning how many were drawn
    fn draw_scene<B: RenderBackend>(
        &self,
        backend: &mut B,
        scene: &Scene,
        camera: &Camera,
    ) -> RenderResult<usize> {
        let camera_data = camera.uniform_data();
        let mut drawn = 0;

        for (mesh_idx, prim_idx, primitive) in scene.primitives() {
            let name = match &scene.meshes[mesh_idx].name {
                Some(mesh_name) => format!("mesh '{mesh_name}' primitive {prim_idx}"),
                None => format!("mesh {mesh_idx} primitive {prim_idx}"),
            };

            let Some(mesh) = PrimitiveMesh::from_primitive(scene, primitive, &name)? else {
                log::debug!("Skipping {name}: no index buffer");
                continue;
            };

            log::debug!(
                "Drawing {name}: {} vertices, {} triangles",
                mesh.vertex_count(),
                mesh.triangle_count()
            );
            let uniforms = DrawUniforms::new(&camera_data, &self.config.light, mesh.color);
            backend.draw_mesh(&mesh, &uniforms)?;
            drawn += 1;

            if self.config.selection == PrimitiveSelection::FirstDrawable {
                break;
            }
        }

        Ok(drawn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpu_backend_rejected_first() {
        let request = RenderRequest::new("/nonexistent/scene.glb", "/nonexistent/out")
            .with_backend(BackendType::Cpu);

        let err = Engine::default().render(&request).unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedBackend(_)));
    }
}
