use minifb::{Window, WindowOptions};

use crate::renderer::PresentSink;

/// Windowed presentation back-end on top of `minifb`.
///
/// minifb wants `0x00RRGGBB` scanlines, so each presented frame is
/// repacked from RGBA8 bytes into a reused `u32` scratch buffer.
pub struct WindowSink {
    window: Window,
    scratch: Vec<u32>,
}

impl WindowSink {
    pub fn new(title: &str, width: usize, height: usize) -> anyhow::Result<Self> {
        let window = Window::new(title, width, height, WindowOptions::default())?;
        Ok(Self {
            window,
            scratch: vec![0; width * height],
        })
    }

    /// Borrow the underlying window, e.g. for keyboard polling.
    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut Window {
        &mut self.window
    }
}

impl PresentSink for WindowSink {
    fn present(&mut self, frame: &[u8], width: usize, height: usize) -> anyhow::Result<()> {
        self.scratch.resize(width * height, 0);
        for (px, rgba) in self.scratch.iter_mut().zip(frame.chunks_exact(4)) {
            *px = u32::from_be_bytes([0, rgba[0], rgba[1], rgba[2]]);
        }
        self.window.update_with_buffer(&self.scratch, width, height)?;
        Ok(())
    }
}
