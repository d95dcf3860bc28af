//! Error types for the render pipeline

use crate::backend::BackendError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a render request
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to load scene: {0}")]
    Load(String),
    #[error("Scene has no geometry to frame")]
    SceneEmpty,
    #[error("Failed to create rendering context: {0}")]
    Context(#[from] BackendError),
    #[error("Unsupported file type '{0}'. Please use 'png', 'jpg', or 'jpeg'")]
    UnsupportedFormat(String),
    #[error("Unsupported render backend '{0}'. CPU rendering is not available, use 'gpu'")]
    UnsupportedBackend(String),
    #[error("Failed to write output {}: {message}", path.display())]
    OutputWrite { path: PathBuf, message: String },
    #[error("A file named '{0}' already exists in the output folder. Please provide a unique output file name")]
    NameCollision(String),
}

pub type RenderResult<T> = Result<T, RenderError>;

impl RenderError {
    pub(crate) fn load(message: impl Into<String>) -> Self {
        RenderError::Load(message.into())
    }

    pub(crate) fn output_write(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        RenderError::OutputWrite {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

impl From<gltf::Error> for RenderError {
    fn from(e: gltf::Error) -> Self {
        RenderError::Load(e.to_string())
    }
}
