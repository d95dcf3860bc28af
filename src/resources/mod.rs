//! Resource management
//!
//! Converts scene primitives into mesh data the backend can upload.

mod mesh;

pub use mesh::*;
