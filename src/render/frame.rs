use crate::foundation::core::Canvas;
use crate::foundation::error::{ReelError, ReelResult};

/// A rendered frame as RGBA8 pixels. Renderer output is always opaque.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// A frame of `canvas` size filled with `rgba`.
    pub fn filled(canvas: Canvas, rgba: [u8; 4]) -> Self {
        let mut data = vec![0u8; canvas.rgba8_len()];
        for px in data.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
        Self {
            width: canvas.width,
            height: canvas.height,
            data,
        }
    }

    /// Frame dimensions.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Fill every pixel with `rgba`.
    pub fn fill(&mut self, rgba: [u8; 4]) {
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
    }

    /// Pixel at `(x, y)`, or `None` when outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Mutable RGBA8 bytes of row `y`.
    pub(crate) fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let stride = (self.width as usize) * 4;
        let start = (y as usize) * stride;
        &mut self.data[start..start + stride]
    }

    /// Check that `data` matches `width * height * 4`.
    pub fn validate(&self) -> ReelResult<()> {
        if self.data.len() != self.canvas().rgba8_len() {
            return Err(ReelError::validation(format!(
                "frame data is {} bytes, expected {} for {}x{} rgba8",
                self.data.len(),
                self.canvas().rgba8_len(),
                self.width,
                self.height
            )));
        }
        Ok(())
    }
}
