//! Backend abstraction layer
//!
//! Provides the trait the engine renders through and the types shared with
//! the wgpu implementation.

pub mod traits;
pub mod types;
pub mod wgpu_backend;

pub use traits::*;
pub use types::*;
