use super::*;

use crate::decode::source::InMemorySource;
use crate::encode::sink::InMemorySink;

fn cfg(kind: TransitionKind, total_steps: u64, width: u32, height: u32) -> PipelineConfig {
    PipelineConfig {
        canvas: Canvas { width, height },
        fps: Fps { num: 30, den: 1 },
        total_steps,
        kind,
    }
}

fn gradient(width: u32, height: u32, seed: u8) -> FrameRgb {
    let mut f = FrameRgb::new(width, height).unwrap();
    for y in 0..height {
        for x in 0..width {
            f.put_pixel(
                x,
                y,
                [
                    seed.wrapping_add(x as u8),
                    seed.wrapping_add(y as u8),
                    seed.wrapping_mul(3),
                ],
            );
        }
    }
    f
}

#[test]
fn config_rejects_short_runs_and_bad_canvases() {
    assert!(matches!(
        TransitionPipeline::new(cfg(TransitionKind::Dissolve, 1, 4, 4)),
        Err(WhipcutError::InvalidStepCount(_))
    ));
    assert!(matches!(
        TransitionPipeline::new(cfg(TransitionKind::Dissolve, 0, 4, 4)),
        Err(WhipcutError::InvalidStepCount(_))
    ));
    assert!(matches!(
        TransitionPipeline::new(cfg(TransitionKind::Dissolve, 2, 0, 4)),
        Err(WhipcutError::DimensionMismatch(_))
    ));

    let mut bad_fps = cfg(TransitionKind::Dissolve, 2, 4, 4);
    bad_fps.fps = Fps { num: 30, den: 0 };
    assert!(matches!(
        TransitionPipeline::new(bad_fps),
        Err(WhipcutError::Validation(_))
    ));

    assert!(TransitionPipeline::new(cfg(TransitionKind::Dissolve, 2, 4, 4)).is_ok());
}

#[test]
fn step_progress_spans_the_unit_interval() {
    let p = TransitionPipeline::new(cfg(TransitionKind::Dissolve, 5, 4, 4)).unwrap();
    let progress: Vec<f64> = (0..5).map(|s| p.step_params(s).unwrap().progress).collect();
    assert_eq!(progress, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
}

#[test]
fn blur_step_params_follow_the_intensity_pulse() {
    let p = TransitionPipeline::new(cfg(TransitionKind::ProgressiveBlur, 3, 8, 8)).unwrap();

    let first = p.step_params(0).unwrap();
    assert_eq!(first.eased_alpha, 0.0);
    let StepDetail::ProgressiveBlur {
        intensity,
        kernel_size,
    } = first.detail
    else {
        panic!("expected progressive blur detail");
    };
    assert_eq!(intensity, 0.0);
    assert_eq!(kernel_size, 3);

    let mid = p.step_params(1).unwrap();
    let StepDetail::ProgressiveBlur {
        intensity,
        kernel_size,
    } = mid.detail
    else {
        panic!("expected progressive blur detail");
    };
    assert_eq!(intensity, 1.0);
    assert_eq!(kernel_size, 31);
}

#[test]
fn whip_step_params_truncate_pixel_offsets() {
    let p = TransitionPipeline::new(cfg(
        TransitionKind::WhipPan {
            direction: Direction::Left,
        },
        5,
        10,
        6,
    ))
    .unwrap();

    let offsets: Vec<i64> = (0..5)
        .map(|s| match p.step_params(s).unwrap().detail {
            StepDetail::WhipPan { offset, .. } => offset,
            other => panic!("expected whip pan detail, got {other:?}"),
        })
        .collect();
    // extent * progress truncates toward zero before the sign flips it.
    assert_eq!(offsets, vec![0, -2, -5, -7, -10]);

    let down = TransitionPipeline::new(cfg(
        TransitionKind::WhipPan {
            direction: Direction::Down,
        },
        5,
        10,
        6,
    ))
    .unwrap();
    let offsets: Vec<i64> = (0..5)
        .map(|s| match down.step_params(s).unwrap().detail {
            StepDetail::WhipPan { offset, .. } => offset,
            other => panic!("expected whip pan detail, got {other:?}"),
        })
        .collect();
    assert_eq!(offsets, vec![0, 1, 3, 4, 6]);
}

#[test]
fn step_params_reject_out_of_range_steps() {
    let p = TransitionPipeline::new(cfg(TransitionKind::Dissolve, 3, 4, 4)).unwrap();
    assert!(p.step_params(2).is_ok());
    assert!(matches!(
        p.step_params(3),
        Err(WhipcutError::Validation(_))
    ));
}

#[test]
fn dissolve_black_to_white_hits_the_eased_midpoint() {
    let p = TransitionPipeline::new(cfg(TransitionKind::Dissolve, 3, 2, 2)).unwrap();
    let black = FrameRgb::filled(2, 2, [0, 0, 0]).unwrap();
    let white = FrameRgb::filled(2, 2, [255, 255, 255]).unwrap();

    assert_eq!(p.render_step(0, &black, &white).unwrap(), black);
    let mid = p.render_step(1, &black, &white).unwrap();
    assert!(mid.data().iter().all(|&v| v == 128));
    assert_eq!(p.render_step(2, &black, &white).unwrap(), white);
}

#[test]
fn whip_pan_on_solid_frames_reduces_to_the_eased_blend() {
    // Motion blur and toroidal shifts are identities on solid frames, so the
    // whip pan collapses to the dissolve ramp there.
    let p = TransitionPipeline::new(cfg(
        TransitionKind::WhipPan {
            direction: Direction::Right,
        },
        5,
        6,
        4,
    ))
    .unwrap();
    let a = FrameRgb::filled(6, 4, [200, 40, 40]).unwrap();
    let b = FrameRgb::filled(6, 4, [40, 40, 200]).unwrap();

    for step in 0..5 {
        let progress = step as f64 / 4.0;
        let expected = blend_frames(&a, &b, Ease::CosineInOut.apply(progress)).unwrap();
        assert_eq!(p.render_step(step, &a, &b).unwrap(), expected);
    }
}

#[test]
fn comparison_step_doubles_the_width() {
    let p = TransitionPipeline::new(cfg(TransitionKind::Comparison, 4, 6, 4)).unwrap();
    assert_eq!(
        p.output_canvas(),
        Canvas {
            width: 12,
            height: 4
        }
    );

    let a = gradient(6, 4, 11);
    let b = gradient(6, 4, 101);
    let out = p.render_step(2, &a, &b).unwrap();
    assert_eq!(out.width(), 12);
    assert_eq!(out.height(), 4);
}

#[test]
fn wipe_step_reveals_toward_the_travel_edge() {
    let p = TransitionPipeline::new(cfg(
        TransitionKind::Wipe {
            direction: Direction::Right,
            soft_edge: 0.0,
        },
        3,
        6,
        4,
    ))
    .unwrap();
    let a = FrameRgb::filled(6, 4, [200, 40, 40]).unwrap();
    let b = FrameRgb::filled(6, 4, [40, 40, 200]).unwrap();

    // The eased midpoint lands a hair under one half (cos(pi/2) is not exact
    // in f64), so truncation covers two of the six columns at the right edge.
    let mid = p.render_step(1, &a, &b).unwrap();
    assert_eq!(mid.pixel(3, 1), a.pixel(3, 1));
    assert_eq!(mid.pixel(4, 1), b.pixel(4, 1));
}

#[test]
fn render_step_validates_frames_and_step_index() {
    let p = TransitionPipeline::new(cfg(TransitionKind::Dissolve, 3, 4, 4)).unwrap();
    let small = FrameRgb::new(2, 2).unwrap();
    let ok = FrameRgb::new(4, 4).unwrap();

    assert!(matches!(
        p.render_step(0, &small, &ok),
        Err(WhipcutError::DimensionMismatch(_))
    ));
    assert!(matches!(
        p.render_step(0, &ok, &small),
        Err(WhipcutError::DimensionMismatch(_))
    ));
    assert!(matches!(
        p.render_step(3, &ok, &ok),
        Err(WhipcutError::Validation(_))
    ));
}

#[test]
fn run_truncates_on_a_short_source_and_keeps_order() {
    let p = TransitionPipeline::new(cfg(TransitionKind::Dissolve, 5, 4, 3)).unwrap();
    let mut outgoing =
        InMemorySource::new((0..5).map(|i| gradient(4, 3, i as u8 * 10)).collect());
    let mut incoming =
        InMemorySource::new((0..3).map(|i| gradient(4, 3, 200 + i as u8)).collect());
    let mut sink = InMemorySink::new();

    let stats = p
        .run(
            &mut outgoing,
            &mut incoming,
            &mut sink,
            &RenderThreading::default(),
        )
        .unwrap();

    assert_eq!(
        stats,
        RunStats {
            steps_total: 5,
            frames_emitted: 3,
            truncated: true,
        }
    );
    assert_eq!(sink.frames().len(), 3);
    for (i, (idx, frame)) in sink.frames().iter().enumerate() {
        assert_eq!(idx.0, i as u64);
        assert_eq!(frame.canvas(), p.config().canvas);
    }
    assert!(sink.ended());
    let sink_cfg = sink.config().unwrap();
    assert_eq!(sink_cfg.canvas, p.config().canvas);
    assert_eq!(sink_cfg.fps, p.config().fps);
}

#[test]
fn run_rejects_frames_that_miss_the_canvas() {
    let p = TransitionPipeline::new(cfg(TransitionKind::Dissolve, 3, 4, 4)).unwrap();
    let mut outgoing = InMemorySource::new(vec![FrameRgb::new(2, 2).unwrap()]);
    let mut incoming = InMemorySource::new(vec![FrameRgb::new(4, 4).unwrap()]);
    let mut sink = InMemorySink::new();

    assert!(matches!(
        p.run(
            &mut outgoing,
            &mut incoming,
            &mut sink,
            &RenderThreading::default()
        ),
        Err(WhipcutError::DimensionMismatch(_))
    ));
}

#[test]
fn threading_knobs_are_validated_and_normalized() {
    assert_eq!(normalized_chunk_size(0), 1);
    assert_eq!(normalized_chunk_size(5), 5);

    assert!(matches!(
        build_thread_pool(Some(0)),
        Err(WhipcutError::Validation(_))
    ));
    assert!(build_thread_pool(Some(2)).is_ok());

    let defaults = RenderThreading::default();
    assert!(!defaults.parallel);
    assert_eq!(defaults.chunk_size, 64);
    assert_eq!(defaults.threads, None);
}
