//! Offscreen rendering pipeline
//!
//! A single forward pass draws each primitive with per-vertex lighting:
//! 1. Flat pass - Depth-tested, back-face culled indexed triangle lists
//! 2. Capture - Copies the color target back as an RGB pixel grid

pub mod capture;
pub mod flat_pass;

pub use capture::FrameBuffer;
pub use flat_pass::{DrawUniforms, FlatPass};
