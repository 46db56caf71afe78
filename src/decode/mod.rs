//! Frame sources feeding the transition pipeline.
//!
//! Sources deliver decoded frames in presentation order and signal end of
//! stream with `Ok(None)`; the pipeline turns early stream ends into a
//! truncated run instead of an error.

/// `ffmpeg`-based streaming video source.
pub mod ffmpeg;
/// Still-image decoding helpers.
pub mod image;
/// Generic frame source trait and built-in sources.
pub mod source;
