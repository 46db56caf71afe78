use std::collections::VecDeque;

use crate::foundation::core::FrameRgb;
use crate::foundation::error::WhipcutResult;

/// Source contract for pulling decoded frames in presentation order.
///
/// End of stream is `Ok(None)` and is sticky: once a source has returned
/// `None` it keeps returning `None`. Errors are reserved for real decode or
/// IO failures.
pub trait FrameSource: Send {
    /// Pull the next frame, or `None` when the stream has ended.
    fn next_frame(&mut self) -> WhipcutResult<Option<FrameRgb>>;
}

/// In-memory source for tests and programmatic use.
#[derive(Debug, Default)]
pub struct InMemorySource {
    frames: VecDeque<FrameRgb>,
}

impl InMemorySource {
    /// Source that yields `frames` in order, then ends.
    pub fn new(frames: Vec<FrameRgb>) -> Self {
        Self {
            frames: frames.into(),
        }
    }

    /// Frames not yet pulled.
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl FrameSource for InMemorySource {
    fn next_frame(&mut self) -> WhipcutResult<Option<FrameRgb>> {
        Ok(self.frames.pop_front())
    }
}

/// Source that repeats a single frame forever, for still-image inputs.
#[derive(Debug, Clone)]
pub struct StillSource {
    frame: FrameRgb,
}

impl StillSource {
    /// Source that yields clones of `frame` indefinitely.
    pub fn new(frame: FrameRgb) -> Self {
        Self { frame }
    }
}

impl FrameSource for StillSource {
    fn next_frame(&mut self) -> WhipcutResult<Option<FrameRgb>> {
        Ok(Some(self.frame.clone()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/decode/source.rs"]
mod tests;
