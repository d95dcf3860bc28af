//! glb-render - Offscreen renderer for binary glTF scenes
//!
//! Loads a `.glb` file, frames the whole scene with an automatically placed
//! camera and writes a single PNG or JPEG image.
//!
//! # Pipeline
//! - Scene loading into bounds-checked attribute views
//! - Bounding box and camera placement
//! - Depth-tested, headlight-lit rasterization through wgpu (no window needed)
//! - Frame readback and image encoding
//!
//! # Example
//!
//! ```no_run
//! use glb_render::{Engine, OutputFormat, RenderConfig, RenderRequest};
//!
//! let request = RenderRequest::new("model.glb", "renders")
//!     .with_output_name("model")
//!     .with_format(OutputFormat::Png);
//! let path = Engine::new(RenderConfig::default()).render(&request)?;
//! println!("wrote {}", path.display());
//! # Ok::<(), glb_render::RenderError>(())
//! ```

pub mod backend;
pub mod engine;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod request;
pub mod resources;
pub mod scene;

pub use engine::Engine;
pub use error::{RenderError, RenderResult};
pub use output::OutputFormat;
pub use request::RenderRequest;

// Re-export wgpu backend for direct access
pub use backend::wgpu_backend::WgpuBackend;

use scene::Headlight;
use std::fmt;
use std::str::FromStr;

/// Rendering backend requested by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendType {
    /// Hardware rasterization through wgpu
    #[default]
    Gpu,
    /// Software rasterization; recognized but not available
    Cpu,
}

impl FromStr for BackendType {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gpu" => Ok(BackendType::Gpu),
            "cpu" => Ok(BackendType::Cpu),
            _ => Err(RenderError::UnsupportedBackend(s.to_string())),
        }
    }
}

impl fmt::Display for BackendType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendType::Gpu => f.write_str("gpu"),
            BackendType::Cpu => f.write_str("cpu"),
        }
    }
}

/// Which primitives end up in the image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrimitiveSelection {
    /// Stop after the first primitive that has an index buffer
    #[default]
    FirstDrawable,
    /// Draw every indexed primitive into the same frame
    All,
}

/// Configuration for the render engine
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Output image width
    pub width: u32,
    /// Output image height
    pub height: u32,
    /// Vertical field of view in degrees
    pub fov_y: f32,
    /// Background color (RGBA)
    pub clear_color: [f32; 4],
    /// Camera-fixed light used for shading
    pub light: Headlight,
    /// Which primitives get drawn
    pub selection: PrimitiveSelection,
    /// JPEG quality, 1-100
    pub jpeg_quality: u8,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            fov_y: 90.0,
            clear_color: [0.0, 0.0, 0.0, 1.0],
            light: Headlight::default(),
            selection: PrimitiveSelection::FirstDrawable,
            jpeg_quality: 90,
        }
    }
}

impl RenderConfig {
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}
