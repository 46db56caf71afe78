use crate::foundation::core::{Canvas, Fps, FrameIndex, FrameRgb};
use crate::foundation::error::WhipcutResult;

/// Configuration provided to a [`FrameSink`] at the start of a run.
#[derive(Clone, Copy, Debug)]
pub struct SinkConfig {
    /// Output dimensions; for comparison runs this is the doubled canvas.
    pub canvas: Canvas,
    /// Output frames-per-second.
    pub fps: Fps,
}

/// Sink contract for consuming rendered frames in step order.
///
/// Ordering contract: `push_frame` is called in strictly increasing
/// [`FrameIndex`] order. `end` is called exactly once after the last frame,
/// including on truncated runs.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> WhipcutResult<()>;
    /// Push one frame in strictly increasing step order.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRgb) -> WhipcutResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> WhipcutResult<()>;
}

/// Sink that keeps every pushed frame in memory, for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    started: Option<SinkConfig>,
    ended: bool,
    frames: Vec<(FrameIndex, FrameRgb)>,
}

impl InMemorySink {
    /// An empty sink; `begin` also resets a previously used one.
    pub fn new() -> Self {
        Self::default()
    }

    /// The configuration captured by `begin`, if a run has started.
    pub fn config(&self) -> Option<SinkConfig> {
        self.started
    }

    /// Whether `end` has run since the last `begin`.
    pub fn ended(&self) -> bool {
        self.ended
    }

    /// Captured frames in push order.
    pub fn frames(&self) -> &[(FrameIndex, FrameRgb)] {
        &self.frames
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> WhipcutResult<()> {
        *self = Self {
            started: Some(cfg),
            ..Self::default()
        };
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRgb) -> WhipcutResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> WhipcutResult<()> {
        self.ended = true;
        Ok(())
    }
}
