//! Encoding sinks.
//!
//! Sinks consume rendered frames in step order and are driven by
//! [`TransitionPipeline::run`](crate::TransitionPipeline::run).

/// `ffmpeg`-based sinks (MP4 output via system `ffmpeg`).
pub mod ffmpeg;
/// Generic frame sink trait and built-in sinks.
pub mod sink;
