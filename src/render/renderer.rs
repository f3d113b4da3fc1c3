use ndarray::Array2;

use crate::data::loader::FrameSequence;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{ReelError, ReelResult};
use crate::palette::colormap::Palette;
use crate::palette::normalize::Normalize;
use crate::render::frame::FrameRGBA;
use crate::render::layout::FrameLayout;
use crate::render::text::{TitleFont, TitleRenderer};

/// Rendering options shared by every frame.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderOpts {
    /// Integer nearest-neighbour upscale of each array cell.
    pub scale: u32,
    /// Height of the title band above the image.
    pub title_band_px: u32,
    /// Margin left, right and below the image.
    pub margin_px: u32,
    /// Title font size.
    pub title_size_px: f32,
    /// Background color (RGBA8, opaque).
    pub bg_rgba: [u8; 4],
    /// Title text color (RGBA8, straight alpha).
    pub title_rgba: [u8; 4],
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            scale: 1,
            title_band_px: 32,
            margin_px: 8,
            title_size_px: 18.0,
            bg_rgba: [255, 255, 255, 255],
            title_rgba: [0, 0, 0, 255],
        }
    }
}

impl RenderOpts {
    fn validate(&self) -> ReelResult<()> {
        if self.bg_rgba[3] != 255 {
            return Err(ReelError::validation("background color must be opaque"));
        }
        Ok(())
    }
}

/// What the display currently shows.
#[derive(Clone, Debug)]
pub struct DisplayState {
    /// Index of the displayed frame.
    pub index: FrameIndex,
    /// Title text, always `"Frame {index}"`.
    pub title: String,
    /// Rendered pixels.
    pub frame: FrameRGBA,
}

/// Title text for frame `idx`.
pub fn frame_title(idx: FrameIndex) -> String {
    format!("Frame {}", idx.0)
}

/// A single display bound to a frame sequence and a palette.
///
/// The canvas size and the color scale are fixed by frame 0 at construction. Later frames with a
/// different shape are drawn from the top-left and clipped to the frame-0 area.
pub struct FrameRenderer<'a> {
    seq: &'a FrameSequence,
    palette: Palette,
    norm: Normalize,
    layout: FrameLayout,
    opts: RenderOpts,
    title: TitleRenderer,
    state: DisplayState,
}

impl<'a> FrameRenderer<'a> {
    /// Create the display and render frame 0 into it.
    pub fn new(
        seq: &'a FrameSequence,
        palette: Palette,
        opts: RenderOpts,
        font: Option<&TitleFont>,
    ) -> ReelResult<Self> {
        opts.validate()?;
        let (rows, cols) = seq.dims();
        let layout = FrameLayout::new(rows, cols, opts.scale, opts.title_band_px, opts.margin_px)?;
        let norm = Normalize::autoscale(seq.first());
        let title = TitleRenderer::new(font, opts.title_size_px, opts.title_rgba)?;
        tracing::debug!(
            width = layout.canvas.width,
            height = layout.canvas.height,
            vmin = norm.vmin(),
            vmax = norm.vmax(),
            palette = %palette.name(),
            reversed = palette.is_reversed(),
            "renderer ready"
        );

        let first = FrameIndex(0);
        let mut out = Self {
            seq,
            palette,
            norm,
            layout,
            state: DisplayState {
                index: first,
                title: frame_title(first),
                frame: FrameRGBA::filled(layout.canvas, opts.bg_rgba),
            },
            opts,
            title,
        };
        out.paint(first)?;
        Ok(out)
    }

    /// Show frame `idx` and return the updated display.
    pub fn update(&mut self, idx: FrameIndex) -> ReelResult<&DisplayState> {
        self.paint(idx)?;
        Ok(&self.state)
    }

    /// Current display contents.
    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    /// Canvas layout.
    pub fn layout(&self) -> &FrameLayout {
        &self.layout
    }

    /// Color scale fixed from frame 0.
    pub fn normalize(&self) -> Normalize {
        self.norm
    }

    /// Number of frames in the bound sequence.
    pub fn len(&self) -> usize {
        self.seq.len()
    }

    /// Always `false`; sequences are never empty.
    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    /// The bound sequence.
    pub fn sequence(&self) -> &'a FrameSequence {
        self.seq
    }

    fn paint(&mut self, idx: FrameIndex) -> ReelResult<()> {
        let seq = self.seq;
        let data = seq.get(idx).ok_or_else(|| {
            ReelError::validation(format!(
                "frame index {idx} out of range [0, {})",
                seq.len()
            ))
        })?;
        let title = frame_title(idx);
        let bg = self.opts.bg_rgba;

        self.state.frame.fill(bg);
        self.title
            .draw(&title, self.layout.title_rect(), bg, &mut self.state.frame)?;
        paint_image(
            &mut self.state.frame,
            data,
            &self.layout,
            &self.palette,
            &self.norm,
            bg,
        );

        self.state.index = idx;
        self.state.title = title;
        Ok(())
    }
}

fn paint_image(
    dst: &mut FrameRGBA,
    data: &Array2<f64>,
    layout: &FrameLayout,
    palette: &Palette,
    norm: &Normalize,
    bg: [u8; 4],
) {
    let (ox, oy) = layout.image_origin;
    let scale = layout.scale as usize;
    let rows = data.nrows().min(layout.rows as usize);
    let cols = data.ncols().min(layout.cols as usize);
    let x0 = (ox as usize) * 4;

    let mut line = Vec::with_capacity(cols * scale * 4);
    for (r, row) in data.outer_iter().take(rows).enumerate() {
        line.clear();
        for &v in row.iter().take(cols) {
            let c = palette.lookup(norm.apply(v));
            let px = if c[3] == 0 { bg } else { c };
            for _ in 0..scale {
                line.extend_from_slice(&px);
            }
        }
        for k in 0..scale {
            let y = oy + (r * scale + k) as u32;
            dst.row_mut(y)[x0..x0 + line.len()].copy_from_slice(&line);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/renderer.rs"]
mod tests;
