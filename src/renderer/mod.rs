//! Presentation abstraction layer.
//!
//! *The caster never learns where its pixels end up.*
//! It fills an RGBA8 frame buffer and loans it to a type implementing
//! [`PresentSink`] exactly once per frame.
//!
//! * You can plug multiple back-ends ([`WindowSink`], [`CaptureSink`], a
//!   GPU uploader, …) without touching the render code.
//! * A sink has one capability: accept a completed frame. Selecting a
//!   back-end is the host's construction-time choice, never a runtime
//!   branch inside the core.

pub mod caster;
mod window;

pub use caster::Raycaster;
pub use window::WindowSink;

/// Receives one finished frame per render pass.
///
/// The slice is `width * height * 4` bytes, RGBA8, row-major, top-left
/// origin. It is only valid for the duration of the call — the caster
/// clears the buffer for the next frame as soon as `present` returns, so
/// a sink that needs the pixels later must copy them.
pub trait PresentSink {
    fn present(&mut self, frame: &[u8], width: usize, height: usize) -> anyhow::Result<()>;
}

/// Headless sink that keeps a copy of the last frame.
///
/// Used by tests and benchmarks; also a reasonable base for off-screen
/// capture (screenshots, video encoding).
#[derive(Default)]
pub struct CaptureSink {
    pub frame: Vec<u8>,
    pub width: usize,
    pub height: usize,
}

impl PresentSink for CaptureSink {
    fn present(&mut self, frame: &[u8], width: usize, height: usize) -> anyhow::Result<()> {
        self.frame.clear();
        self.frame.extend_from_slice(frame);
        self.width = width;
        self.height = height;
        Ok(())
    }
}
