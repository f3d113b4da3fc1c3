use minifb::{Key, Window, WindowOptions};

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::frame::FrameRGBA;

/// Shows frames in an on-screen window, paced at the sink fps.
///
/// Closing the window (or pressing Escape) stops the preview; later frames are ignored rather
/// than failing the run. With `hold` set, `end` keeps the last frame up until the window closes.
pub struct PreviewSink {
    title: String,
    hold: bool,
    window: Option<Window>,
    buffer: Vec<u32>,
}

impl PreviewSink {
    /// Create a preview sink with the given window title.
    pub fn new(title: impl Into<String>, hold: bool) -> Self {
        Self {
            title: title.into(),
            hold,
            window: None,
            buffer: Vec::new(),
        }
    }

    fn close_if_requested(&mut self) {
        let closed = self
            .window
            .as_ref()
            .is_some_and(|w| !w.is_open() || w.is_key_down(Key::Escape));
        if closed {
            tracing::info!("preview window closed");
            self.window = None;
        }
    }
}

impl FrameSink for PreviewSink {
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()> {
        let mut window = Window::new(
            &self.title,
            cfg.width as usize,
            cfg.height as usize,
            WindowOptions::default(),
        )
        .map_err(|e| ReelError::render(format!("failed to open preview window: {e}")))?;
        window.set_target_fps(cfg.fps.as_f64().round().max(1.0) as usize);
        self.buffer = vec![0u32; (cfg.width as usize) * (cfg.height as usize)];
        self.window = Some(window);
        Ok(())
    }

    fn push_frame(&mut self, _idx: FrameIndex, frame: &FrameRGBA) -> ReelResult<()> {
        self.close_if_requested();
        let Some(window) = self.window.as_mut() else {
            return Ok(());
        };
        if frame.data.len() != self.buffer.len() * 4 {
            return Err(ReelError::validation(
                "preview frame size does not match the window",
            ));
        }
        for (dst, px) in self.buffer.iter_mut().zip(frame.data.chunks_exact(4)) {
            *dst = (u32::from(px[0]) << 16) | (u32::from(px[1]) << 8) | u32::from(px[2]);
        }
        window
            .update_with_buffer(&self.buffer, frame.width as usize, frame.height as usize)
            .map_err(|e| ReelError::render(format!("failed to update preview window: {e}")))?;
        Ok(())
    }

    fn end(&mut self) -> ReelResult<()> {
        if self.hold {
            while let Some(window) = self.window.as_mut() {
                window.update();
                self.close_if_requested();
            }
        }
        self.window = None;
        Ok(())
    }
}
