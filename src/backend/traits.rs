//! Core backend abstraction traits
//!
//! The render engine only ever talks to a [`RenderBackend`]; the wgpu
//! implementation is the one shipped with the crate.

use crate::pipeline::capture::FrameBuffer;
use crate::pipeline::flat_pass::DrawUniforms;
use crate::resources::PrimitiveMesh;
use thiserror::Error;

/// Backend error type
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("No suitable GPU adapter found")]
    NoAdapter,
    #[error("Failed to create device: {0}")]
    DeviceCreationFailed(String),
    #[error("Failed to create pipeline: {0}")]
    PipelineCreationFailed(String),
    #[error("Failed to read back frame: {0}")]
    ReadbackFailed(String),
}

pub type BackendResult<T> = Result<T, BackendError>;

/// Offscreen rendering backend
///
/// Draws accumulate into one color target until [`RenderBackend::read_frame`]
/// copies it back to the CPU.
pub trait RenderBackend {
    /// Clear the color target to `color` and the depth target to 1.0
    fn clear(&mut self, color: [f32; 4]);

    /// Draw one primitive as an indexed triangle list
    fn draw_mesh(&mut self, mesh: &PrimitiveMesh, uniforms: &DrawUniforms) -> BackendResult<()>;

    /// Read back the color target as RGB8, row 0 at the top
    fn read_frame(&mut self) -> BackendResult<FrameBuffer>;
}
