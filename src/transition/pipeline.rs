//! Step-driven transition rendering.
//!
//! A [`TransitionPipeline`] owns an immutable [`PipelineConfig`] and turns a
//! pair of frame sources into rendered transition frames, streamed into a
//! [`FrameSink`] in strictly increasing step order.
//!
//! Per step `n` of `total_steps`, progress is `n / (total_steps - 1)`, so the
//! first frame sits exactly at the outgoing clip and the last exactly at the
//! incoming clip. If either source ends early the run truncates silently:
//! complete pairs already rendered are kept, the partial step is dropped, and
//! the sink is still finalized.

use rayon::prelude::*;

use crate::animation::ease::{Ease, pulse_intensity};
use crate::decode::source::FrameSource;
use crate::effects::blend::blend_frames;
use crate::effects::blur::{gaussian_blur, kernel_size_for_intensity, motion_blur};
use crate::effects::compare::comparison_frame;
use crate::effects::shift::cyclic_shift;
use crate::effects::wipe::wipe_frames;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Axis, Canvas, Fps, FrameIndex, FrameRgb};
use crate::foundation::error::{WhipcutError, WhipcutResult};
use crate::transition::kind::{Direction, TransitionKind};

/// Immutable description of one transition run.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PipelineConfig {
    /// Dimensions every source frame must match.
    pub canvas: Canvas,
    /// Output frame rate, forwarded to the sink.
    pub fps: Fps,
    /// Number of steps to render, at least 2.
    pub total_steps: u64,
    /// Transition style.
    pub kind: TransitionKind,
}

/// Threading and chunking controls for [`TransitionPipeline::run`].
#[derive(Clone, Debug)]
pub struct RenderThreading {
    /// Enable parallel step rendering when `true`.
    pub parallel: bool,
    /// Chunk size in steps for batched scheduling.
    pub chunk_size: usize,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

/// Aggregated run counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Steps the run was configured for.
    pub steps_total: u64,
    /// Frames actually pushed into the sink.
    pub frames_emitted: u64,
    /// Whether a source ended before `steps_total` pairs were read.
    pub truncated: bool,
}

/// Per-step parameters, queryable without rendering.
///
/// This carries everything a caller would overlay or log for a step: the raw
/// progress, the eased blend alpha, and kind-specific values such as kernel
/// width or pan offset.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct StepParams {
    /// Step index in `0..total_steps`.
    pub step: u64,
    /// Raw progress `step / (total_steps - 1)`.
    pub progress: f64,
    /// Cosine-eased blend alpha at this progress.
    pub eased_alpha: f64,
    /// Kind-specific values.
    pub detail: StepDetail,
}

/// Kind-specific portion of [`StepParams`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepDetail {
    /// Plain crossfade; the top-level fields say it all.
    Dissolve,
    /// Gaussian blur strength for this step.
    ProgressiveBlur {
        /// Intensity pulse `4p(1-p)`.
        intensity: f64,
        /// Odd Gaussian kernel width derived from the intensity.
        kernel_size: u32,
    },
    /// Pan and streak values for this step.
    WhipPan {
        /// Travel direction.
        direction: Direction,
        /// Intensity pulse `4p(1-p)`.
        intensity: f64,
        /// Odd motion blur kernel width derived from the intensity.
        kernel_size: u32,
        /// Signed toroidal shift applied to the outgoing frame, in pixels.
        offset: i64,
    },
    /// Reveal band for this step.
    Wipe {
        /// Edge the incoming frame enters from.
        direction: Direction,
        /// Hard-front band width in pixels along the wipe axis.
        band_px: u32,
        /// Smoothstep ramp half-width as a share of the axis.
        soft_edge: f64,
    },
    /// Side-by-side render; the left half uses `progress` as linear alpha.
    Comparison,
}

/// Renders one transition from a validated [`PipelineConfig`].
#[derive(Clone, Debug)]
pub struct TransitionPipeline {
    config: PipelineConfig,
}

impl TransitionPipeline {
    /// Validate `config` and build a pipeline.
    ///
    /// Rejects canvases with a zero dimension and runs shorter than two
    /// steps; a single-step run has no defined progress denominator.
    pub fn new(config: PipelineConfig) -> WhipcutResult<Self> {
        if config.canvas.width == 0 || config.canvas.height == 0 {
            return Err(WhipcutError::dimension_mismatch(format!(
                "canvas must be non-zero, got {}x{}",
                config.canvas.width, config.canvas.height
            )));
        }
        Fps::new(config.fps.num, config.fps.den)?;
        if config.total_steps < 2 {
            return Err(WhipcutError::invalid_step_count(format!(
                "total_steps must be >= 2, got {}",
                config.total_steps
            )));
        }
        Ok(Self { config })
    }

    /// The validated configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Canvas of emitted frames (double width for comparison runs).
    pub fn output_canvas(&self) -> Canvas {
        self.config.kind.output_canvas(self.config.canvas)
    }

    /// Raw progress for a step.
    fn progress(&self, step: u64) -> f64 {
        step as f64 / (self.config.total_steps - 1) as f64
    }

    /// Parameters the renderer will use for `step`, without rendering it.
    pub fn step_params(&self, step: u64) -> WhipcutResult<StepParams> {
        if step >= self.config.total_steps {
            return Err(WhipcutError::validation(format!(
                "step {step} out of range, run has {} steps",
                self.config.total_steps
            )));
        }

        let progress = self.progress(step);
        let eased_alpha = Ease::CosineInOut.apply(progress);
        let detail = match self.config.kind {
            TransitionKind::Dissolve => StepDetail::Dissolve,
            TransitionKind::ProgressiveBlur => {
                let intensity = pulse_intensity(progress);
                StepDetail::ProgressiveBlur {
                    intensity,
                    kernel_size: kernel_size_for_intensity(intensity),
                }
            }
            TransitionKind::WhipPan { direction } => {
                let intensity = pulse_intensity(progress);
                let extent = self.axis_extent(direction.axis());
                StepDetail::WhipPan {
                    direction,
                    intensity,
                    kernel_size: kernel_size_for_intensity(intensity),
                    offset: whip_offset(extent, progress, direction.sign()),
                }
            }
            TransitionKind::Wipe {
                direction,
                soft_edge,
            } => {
                let extent = self.axis_extent(direction.axis());
                StepDetail::Wipe {
                    direction,
                    band_px: (extent as f64 * eased_alpha) as u32,
                    soft_edge,
                }
            }
            TransitionKind::Comparison => StepDetail::Comparison,
        };

        Ok(StepParams {
            step,
            progress,
            eased_alpha,
            detail,
        })
    }

    /// Render a single step from an outgoing/incoming frame pair.
    ///
    /// Both frames must match the configured canvas. The returned frame has
    /// the run's output canvas, which differs from the input canvas only for
    /// [`TransitionKind::Comparison`].
    #[tracing::instrument(skip(self, outgoing, incoming))]
    pub fn render_step(
        &self,
        step: u64,
        outgoing: &FrameRgb,
        incoming: &FrameRgb,
    ) -> WhipcutResult<FrameRgb> {
        if step >= self.config.total_steps {
            return Err(WhipcutError::validation(format!(
                "step {step} out of range, run has {} steps",
                self.config.total_steps
            )));
        }
        self.ensure_canvas(outgoing, "outgoing")?;
        self.ensure_canvas(incoming, "incoming")?;

        let progress = self.progress(step);
        match self.config.kind {
            TransitionKind::Dissolve => {
                blend_frames(outgoing, incoming, Ease::CosineInOut.apply(progress))
            }
            TransitionKind::ProgressiveBlur => {
                let intensity = pulse_intensity(progress);
                let a = gaussian_blur(outgoing, intensity)?;
                let b = gaussian_blur(incoming, intensity)?;
                blend_frames(&a, &b, Ease::CosineInOut.apply(progress))
            }
            TransitionKind::WhipPan { direction } => {
                let intensity = pulse_intensity(progress);
                let axis = direction.axis();
                let a = motion_blur(outgoing, intensity, axis)?;
                let b = motion_blur(incoming, intensity, axis)?;

                // The incoming frame trails the outgoing one by a full axis
                // extent; on the torus the two shifts land congruent, which
                // keeps the pan seamless at every step.
                let extent = self.axis_extent(axis);
                let offset = whip_offset(extent, progress, direction.sign());
                let a = cyclic_shift(&a, offset, axis)?;
                let b = cyclic_shift(&b, offset - extent, axis)?;
                blend_frames(&a, &b, Ease::CosineInOut.apply(progress))
            }
            TransitionKind::Wipe {
                direction,
                soft_edge,
            } => wipe_frames(
                outgoing,
                incoming,
                direction,
                Ease::CosineInOut.apply(progress),
                soft_edge,
            ),
            TransitionKind::Comparison => comparison_frame(outgoing, incoming, progress),
        }
    }

    /// Pull frame pairs from two sources, render every step, and stream the
    /// results into `sink` in step order.
    ///
    /// The sink is always finalized on success, including truncated runs.
    #[tracing::instrument(skip(self, outgoing, incoming, sink, threading))]
    pub fn run(
        &self,
        outgoing: &mut dyn FrameSource,
        incoming: &mut dyn FrameSource,
        sink: &mut dyn FrameSink,
        threading: &RenderThreading,
    ) -> WhipcutResult<RunStats> {
        let total = self.config.total_steps;
        let chunk_size = normalized_chunk_size(threading.chunk_size).min(total);
        let pool = if threading.parallel {
            Some(build_thread_pool(threading.threads)?)
        } else {
            None
        };

        sink.begin(SinkConfig {
            canvas: self.output_canvas(),
            fps: self.config.fps,
        })?;

        let mut emitted = 0u64;
        let mut truncated = false;
        while emitted < total && !truncated {
            let target = (emitted + chunk_size).min(total);

            // IO phase: sources are strictly sequential, so pairs for the
            // chunk are pulled up front.
            let mut pairs = Vec::with_capacity((target - emitted) as usize);
            for _ in emitted..target {
                let Some(a) = outgoing.next_frame()? else {
                    truncated = true;
                    break;
                };
                let Some(b) = incoming.next_frame()? else {
                    truncated = true;
                    break;
                };
                self.ensure_canvas(&a, "outgoing")?;
                self.ensure_canvas(&b, "incoming")?;
                pairs.push((a, b));
            }

            let base = emitted;
            let rendered: Vec<WhipcutResult<FrameRgb>> = if let Some(pool) = pool.as_ref() {
                pool.install(|| {
                    pairs
                        .par_iter()
                        .enumerate()
                        .map(|(i, (a, b))| self.render_step(base + i as u64, a, b))
                        .collect()
                })
            } else {
                pairs
                    .iter()
                    .enumerate()
                    .map(|(i, (a, b))| self.render_step(base + i as u64, a, b))
                    .collect()
            };

            for (i, item) in rendered.into_iter().enumerate() {
                let frame = item?;
                sink.push_frame(FrameIndex(base + i as u64), &frame)?;
            }
            emitted += pairs.len() as u64;
        }

        sink.end()?;
        Ok(RunStats {
            steps_total: total,
            frames_emitted: emitted,
            truncated,
        })
    }

    fn axis_extent(&self, axis: Axis) -> i64 {
        match axis {
            Axis::Horizontal => i64::from(self.config.canvas.width),
            Axis::Vertical => i64::from(self.config.canvas.height),
        }
    }

    fn ensure_canvas(&self, frame: &FrameRgb, what: &str) -> WhipcutResult<()> {
        let c = self.config.canvas;
        if frame.width() != c.width || frame.height() != c.height {
            return Err(WhipcutError::dimension_mismatch(format!(
                "{what} frame is {}x{}, configured canvas is {}x{}",
                frame.width(),
                frame.height(),
                c.width,
                c.height
            )));
        }
        Ok(())
    }
}

/// Signed pan offset: truncated `extent * progress`, negated for travel
/// toward the origin.
fn whip_offset(extent: i64, progress: f64, sign: i64) -> i64 {
    (extent as f64 * progress) as i64 * sign
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    if chunk_size == 0 { 1 } else { chunk_size as u64 }
}

fn build_thread_pool(threads: Option<usize>) -> WhipcutResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(WhipcutError::validation(
            "threading 'threads' must be >= 1 when set",
        ));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| WhipcutError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/transition/pipeline.rs"]
mod tests;
