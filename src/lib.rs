//! npzreel turns a NumPy `.npz` archive of 2D arrays into a color-mapped MP4 movie.
//!
//! # Pipeline overview
//!
//! 1. **Load**: [`load_npz`] reads every array of the archive, in storage order, into a
//!    [`FrameSequence`].
//! 2. **Render**: a [`FrameRenderer`] binds the sequence to a [`Palette`]. The canvas size and
//!    the color scale are fixed by frame 0, and each frame is titled `"Frame {i}"`.
//! 3. **Animate**: an [`Animator`] updates the renderer for every index `0..N` and pushes the
//!    frames into a [`FrameSink`] at one configured [`Fps`].
//! 4. **Encode**: [`FfmpegSink`] streams frames to the system `ffmpeg` binary for MP4 output.
//!    [`PngSequenceSink`], [`InMemorySink`] and (with the `preview` feature) `PreviewSink` are
//!    alternative sinks; [`TeeSink`] fans out to several.
//!
//! [`MandelbrotZoom`] generates a sample archive of the kind this tool was made to inspect.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animate;
mod data;
/// Frame sinks.
pub mod encode;
mod foundation;
mod palette;
mod render;

pub use crate::animate::{AnimateStats, Animator, RenderToMp4Opts, render_to_mp4};
pub use crate::data::loader::{FrameSequence, load_npz, read_npz};
pub use crate::data::mandelbrot::{MandelbrotZoom, escape_value};
pub use crate::foundation::core::{Canvas, Fps, FrameIndex, FrameRange};
pub use crate::foundation::error::{ReelError, ReelResult};
pub use crate::palette::colormap::{LUT_SIZE, Palette, PaletteName};
pub use crate::palette::normalize::Normalize;
pub use crate::render::frame::FrameRGBA;
pub use crate::render::layout::FrameLayout;
pub use crate::render::renderer::{DisplayState, FrameRenderer, RenderOpts, frame_title};
pub use crate::render::text::{FontSource, TitleFont, TitleRenderer};

pub use crate::encode::ffmpeg::{
    FfmpegSink, FfmpegSinkOpts, ensure_parent_dir, is_ffmpeg_on_path,
};
pub use crate::encode::png::{PngSequenceSink, write_png};
#[cfg(feature = "preview")]
pub use crate::encode::preview::PreviewSink;
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig, TeeSink};
