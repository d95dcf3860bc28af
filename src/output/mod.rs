//! Image encoding and output
//!
//! Frames are encoded fully in memory; the file is only created once the
//! encoder has succeeded.

use crate::error::{RenderError, RenderResult};
use crate::pipeline::FrameBuffer;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, ImageResult};
use std::fmt;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::Path;
use std::str::FromStr;

/// Output image format
///
/// `Jpg` and `Jpeg` encode identically; they differ only in the extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Png,
    Jpg,
    Jpeg,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpg => "jpg",
            OutputFormat::Jpeg => "jpeg",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "jpg" => Ok(OutputFormat::Jpg),
            "jpeg" => Ok(OutputFormat::Jpeg),
            _ => Err(RenderError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Encode a frame to PNG or JPEG bytes
pub fn encode(frame: &FrameBuffer, format: OutputFormat, jpeg_quality: u8) -> ImageResult<Vec<u8>> {
    let mut bytes = Vec::new();

    match format {
        OutputFormat::Png => PngEncoder::new(&mut bytes).write_image(
            &frame.pixels,
            frame.width,
            frame.height,
            ColorType::Rgb8,
        )?,
        OutputFormat::Jpg | OutputFormat::Jpeg => {
            JpegEncoder::new_with_quality(&mut bytes, jpeg_quality.clamp(1, 100)).write_image(
                &frame.pixels,
                frame.width,
                frame.height,
                ColorType::Rgb8,
            )?
        }
    }

    Ok(bytes)
}

/// Encode a frame and write it to `path`
///
/// The file is created exclusively; an existing file at `path` is left
/// untouched and reported as a name collision.
pub fn write_image(
    frame: &FrameBuffer,
    format: OutputFormat,
    jpeg_quality: u8,
    path: &Path,
) -> RenderResult<()> {
    let bytes = encode(frame, format, jpeg_quality).map_err(|e| RenderError::output_write(path, e))?;

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => RenderError::NameCollision(file_name(path)),
            _ => RenderError::output_write(path, e),
        })?;

    if let Err(e) = file.write_all(&bytes).and_then(|_| file.sync_all()) {
        drop(file);
        let _ = std::fs::remove_file(path);
        return Err(RenderError::output_write(path, e));
    }

    log::info!("Wrote {} ({} bytes, {format})", path.display(), bytes.len());
    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
