//! Frame sinks.
//!
//! Sinks consume rendered frames in sequence order and are driven by [`crate::Animator`].

/// `ffmpeg`-based MP4 sink.
pub mod ffmpeg;
/// PNG file output.
pub mod png;
/// On-screen preview window.
#[cfg(feature = "preview")]
pub mod preview;
/// Generic frame sink trait and built-in sinks.
pub mod sink;
