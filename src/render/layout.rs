use kurbo::Rect;

use crate::foundation::core::Canvas;
use crate::foundation::error::{ReelError, ReelResult};

/// Placement of the title band and the image on the output canvas.
///
/// The canvas is `margin + cols * scale + margin` wide and `title_band + rows * scale + margin`
/// tall, rounded up to even sides for yuv420p encoding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameLayout {
    /// Output canvas.
    pub canvas: Canvas,
    /// Integer nearest-neighbour upscale factor.
    pub scale: u32,
    /// Rows of the frame-0 array.
    pub rows: u32,
    /// Columns of the frame-0 array.
    pub cols: u32,
    /// Top-left pixel of the image area.
    pub image_origin: (u32, u32),
    /// Height of the title band at the top of the canvas.
    pub title_band_px: u32,
}

impl FrameLayout {
    /// Compute the layout for a `rows x cols` array.
    pub fn new(
        rows: usize,
        cols: usize,
        scale: u32,
        title_band_px: u32,
        margin_px: u32,
    ) -> ReelResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(ReelError::validation(format!(
                "frame 0 has an empty shape ({rows}x{cols})"
            )));
        }
        if scale == 0 {
            return Err(ReelError::validation("scale must be >= 1"));
        }
        let rows = u32::try_from(rows)
            .map_err(|_| ReelError::validation("frame row count exceeds u32"))?;
        let cols = u32::try_from(cols)
            .map_err(|_| ReelError::validation("frame column count exceeds u32"))?;

        let image_w = cols
            .checked_mul(scale)
            .ok_or_else(|| ReelError::validation("scaled frame width overflows"))?;
        let image_h = rows
            .checked_mul(scale)
            .ok_or_else(|| ReelError::validation("scaled frame height overflows"))?;
        let width = image_w
            .checked_add(margin_px.saturating_mul(2))
            .ok_or_else(|| ReelError::validation("canvas width overflows"))?;
        let height = image_h
            .checked_add(title_band_px)
            .and_then(|h| h.checked_add(margin_px))
            .ok_or_else(|| ReelError::validation("canvas height overflows"))?;

        let canvas = Canvas { width, height }.padded_even();
        if canvas.width > u32::from(u16::MAX) || canvas.height > u32::from(u16::MAX) {
            return Err(ReelError::validation(format!(
                "canvas {}x{} exceeds the {}px rasterizer limit",
                canvas.width,
                canvas.height,
                u16::MAX
            )));
        }

        Ok(Self {
            canvas,
            scale,
            rows,
            cols,
            image_origin: (margin_px, title_band_px),
            title_band_px,
        })
    }

    /// Image area in canvas pixels.
    pub fn image_rect(&self) -> Rect {
        let (x, y) = self.image_origin;
        Rect::new(
            f64::from(x),
            f64::from(y),
            f64::from(x + self.cols * self.scale),
            f64::from(y + self.rows * self.scale),
        )
    }

    /// Title band in canvas pixels.
    pub fn title_rect(&self) -> Rect {
        Rect::new(
            0.0,
            0.0,
            f64::from(self.canvas.width),
            f64::from(self.title_band_px),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/layout.rs"]
mod tests;
