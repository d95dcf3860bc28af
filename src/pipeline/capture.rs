//! Frame capture
//!
//! Turns the padded RGBA rows copied out of the color target into a tightly
//! packed RGB8 grid.

/// Row pitch of a texture-to-buffer copy, aligned for GPU transfer
pub fn padded_bytes_per_row(width: u32, bytes_per_pixel: u32) -> u32 {
    let unpadded = width * bytes_per_pixel;
    unpadded.div_ceil(wgpu::COPY_BYTES_PER_ROW_ALIGNMENT) * wgpu::COPY_BYTES_PER_ROW_ALIGNMENT
}

/// Captured RGB8 image, row-major, row 0 at the top
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl FrameBuffer {
    pub const CHANNELS: usize = 3;

    /// A frame filled with one color
    pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let pixels = rgb
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * Self::CHANNELS)
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Strip row padding and the alpha channel from mapped RGBA rows
    pub fn from_padded_rgba(data: &[u8], width: u32, height: u32, padded_row: u32) -> Self {
        let row_bytes = width as usize * 4;
        let mut pixels = Vec::with_capacity(width as usize * height as usize * Self::CHANNELS);

        for row in data.chunks(padded_row as usize).take(height as usize) {
            for texel in row[..row_bytes.min(row.len())].chunks_exact(4) {
                pixels.extend_from_slice(&texel[..3]);
            }
        }

        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * Self::CHANNELS;
        self.pixels
            .get(i..i + Self::CHANNELS)
            .map(|p| [p[0], p[1], p[2]])
    }

    /// True when every pixel is black
    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|&b| b == 0)
    }
}
