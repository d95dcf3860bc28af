//! Render requests and output path resolution

use crate::error::{RenderError, RenderResult};
use crate::output::OutputFormat;
use crate::BackendType;
use rand::Rng;
use std::path::{Path, PathBuf};

/// Length of generated output names
pub const GENERATED_NAME_LEN: usize = 32;

const NAME_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// One scene-to-image conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    /// Binary glTF scene to render
    pub input: PathBuf,
    /// Existing directory that receives the image
    pub output_dir: PathBuf,
    /// Base name without extension; generated when absent
    pub output_name: Option<String>,
    pub format: OutputFormat,
    pub backend: BackendType,
}

impl RenderRequest {
    pub fn new(input: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output_dir: output_dir.into(),
            output_name: None,
            format: OutputFormat::default(),
            backend: BackendType::default(),
        }
    }

    /// Set the output base name; an empty name counts as absent
    pub fn with_output_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.output_name = if name.is_empty() { None } else { Some(name) };
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_backend(mut self, backend: BackendType) -> Self {
        self.backend = backend;
        self
    }

    /// Resolve `<output_dir>/<name>.<ext>`
    ///
    /// The directory must exist. An explicit name collides when either
    /// `<name>` or `<name>.<ext>` is already present.
    pub fn resolve_output_path(&self) -> RenderResult<PathBuf> {
        if !self.output_dir.is_dir() {
            return Err(RenderError::output_write(
                &self.output_dir,
                "output folder does not exist or is not a directory",
            ));
        }

        let ext = self.format.extension();
        let name = match &self.output_name {
            Some(name) => {
                if name_taken(&self.output_dir, name, ext) {
                    return Err(RenderError::NameCollision(name.clone()));
                }
                name.clone()
            }
            None => generate_unique_name(&self.output_dir, ext),
        };

        Ok(self.output_dir.join(format!("{name}.{ext}")))
    }
}

fn name_taken(dir: &Path, name: &str, ext: &str) -> bool {
    dir.join(name).exists() || dir.join(format!("{name}.{ext}")).exists()
}

/// Random `[a-z0-9]` name of [`GENERATED_NAME_LEN`] characters
pub fn random_name() -> String {
    let mut rng = rand::thread_rng();
    (0..GENERATED_NAME_LEN)
        .map(|_| NAME_CHARSET[rng.gen_range(0..NAME_CHARSET.len())] as char)
        .collect()
}

/// Generate names until one is free in `dir`
pub fn generate_unique_name(dir: &Path, ext: &str) -> String {
    loop {
        let name = random_name();
        if !name_taken(dir, &name, ext) {
            log::debug!("Generated output name {name}");
            return name;
        }
    }
}
