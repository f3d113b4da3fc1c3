use std::path::PathBuf;

use crate::data::loader::FrameSequence;
use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::Fps;
use crate::foundation::error::{ReelError, ReelResult};
use crate::palette::colormap::{Palette, PaletteName};
use crate::render::renderer::{FrameRenderer, RenderOpts};
use crate::render::text::TitleFont;

/// Counters reported by [`Animator::run`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnimateStats {
    /// Frames pushed to the sink.
    pub frames_total: u64,
}

/// Drives a [`FrameRenderer`] over its whole sequence into a [`FrameSink`].
#[derive(Clone, Copy, Debug)]
pub struct Animator {
    fps: Fps,
}

impl Animator {
    /// Animator emitting at `fps`. The same rate is handed to every sink.
    pub fn new(fps: Fps) -> Self {
        Self { fps }
    }

    /// Output frame rate.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Update the renderer for every index `0..N` in order and push each result to `sink`.
    ///
    /// Any renderer or sink error aborts the run; `end` is only called after the last frame.
    #[tracing::instrument(skip_all, fields(frames = renderer.len()))]
    pub fn run(
        &self,
        renderer: &mut FrameRenderer<'_>,
        sink: &mut dyn FrameSink,
    ) -> ReelResult<AnimateStats> {
        let canvas = renderer.layout().canvas;
        sink.begin(SinkConfig {
            width: canvas.width,
            height: canvas.height,
            fps: self.fps,
        })?;

        let range = renderer.sequence().range();
        let mut stats = AnimateStats::default();
        for idx in range.iter() {
            let state = renderer.update(idx)?;
            sink.push_frame(state.index, &state.frame)?;
            stats.frames_total += 1;
            tracing::trace!(frame = idx.0, "pushed frame");
        }
        sink.end()?;

        tracing::info!(
            frames = stats.frames_total,
            seconds = self.fps.frames_to_secs(stats.frames_total),
            "animation complete"
        );
        Ok(stats)
    }
}

/// Options for [`render_to_mp4`].
#[derive(Clone, Debug)]
pub struct RenderToMp4Opts {
    /// Output frame rate.
    pub fps: Fps,
    /// Palette to map values through.
    pub palette: PaletteName,
    /// Reverse the palette once at setup.
    pub reverse_palette: bool,
    /// Canvas and title options.
    pub render: RenderOpts,
    /// Whether to overwrite an existing output file.
    pub overwrite: bool,
}

impl Default for RenderToMp4Opts {
    fn default() -> Self {
        Self {
            fps: Fps { num: 15, den: 1 },
            palette: PaletteName::Twilight,
            reverse_palette: true,
            render: RenderOpts::default(),
            overwrite: true,
        }
    }
}

impl RenderToMp4Opts {
    /// The configured palette, reversed if requested.
    pub fn build_palette(&self) -> Palette {
        let p = Palette::named(self.palette);
        if self.reverse_palette { p.reversed() } else { p }
    }
}

/// Render `seq` to an MP4 at `out_path` through the system `ffmpeg`.
pub fn render_to_mp4(
    seq: &FrameSequence,
    out_path: impl Into<PathBuf>,
    opts: &RenderToMp4Opts,
    font: Option<&TitleFont>,
) -> ReelResult<AnimateStats> {
    let mut renderer = FrameRenderer::new(seq, opts.build_palette(), opts.render.clone(), font)?;
    let mut sink = FfmpegSink::new(FfmpegSinkOpts {
        out_path: out_path.into(),
        overwrite: opts.overwrite,
    });
    let stats = Animator::new(opts.fps).run(&mut renderer, &mut sink)?;
    if stats.frames_total != sink.frames_written() {
        return Err(ReelError::encode(format!(
            "encoded {} frames, expected {}",
            sink.frames_written(),
            stats.frames_total
        )));
    }
    Ok(stats)
}

#[cfg(test)]
#[path = "../tests/unit/animate.rs"]
mod tests;
