//! Whipcut renders frame-accurate video transitions on the CPU.
//!
//! The engine turns two frame streams into one: per step it pulls an
//! outgoing/incoming frame pair, composes the configured transition
//! (dissolve, progressive blur, whip pan, wipe, or a side-by-side
//! comparison), and pushes the result into a sink.
//!
//! Timing runs on two small curves: a half-cosine ease `(1 - cos(p*pi)) / 2`
//! for blend alpha, and the parabola `4p(1-p)` for effect intensity, so blur
//! and streaking peak mid-transition and release completely at both ends.
//!
//! # Getting started
//!
//! - Build a [`PipelineConfig`] and a [`TransitionPipeline`]
//! - Feed [`TransitionPipeline::run`] two [`FrameSource`]s and a [`FrameSink`]
//! - For MP4 in/out, enable the `media-ffmpeg` feature and use
//!   [`FfmpegSource`]/[`FfmpegSink`] (system `ffmpeg` required)
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod foundation;

/// Frame sources (video decode, still images, in-memory).
pub mod decode;
/// Per-frame pixel operations.
pub mod effects;
/// Encoding sinks.
pub mod encode;
/// Transition kinds, configuration, and the run loop.
pub mod transition;

pub use crate::animation::ease::{Ease, pulse_intensity};
pub use crate::decode::ffmpeg::FfmpegSource;
pub use crate::decode::image::{decode_image_rgb, load_image_rgb, scale_to_canvas};
pub use crate::decode::source::{FrameSource, InMemorySource, StillSource};
pub use crate::effects::blend::blend_frames;
pub use crate::effects::blur::{gaussian_blur, kernel_size_for_intensity, motion_blur};
pub use crate::effects::compare::{comparison_frame, hstack};
pub use crate::effects::shift::cyclic_shift;
pub use crate::effects::wipe::wipe_frames;
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::foundation::core::{Axis, Canvas, Fps, FrameIndex, FrameRgb};
pub use crate::foundation::error::{WhipcutError, WhipcutResult};
pub use crate::transition::kind::{
    Direction, TransitionKind, TransitionSpec, parse_transition, parse_transition_parts,
};
pub use crate::transition::pipeline::{
    PipelineConfig, RenderThreading, RunStats, StepDetail, StepParams, TransitionPipeline,
};
