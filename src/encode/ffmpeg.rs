use std::io::{Read as _, Write as _};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread::JoinHandle;

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Canvas, FrameIndex, FrameRgb};
use crate::foundation::error::{WhipcutError, WhipcutResult};

/// Options for [`FfmpegSink`] MP4 output.
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    /// Destination MP4 path.
    pub path: PathBuf,
    /// Replace `path` if a file is already there.
    pub overwrite: bool,
}

impl FfmpegSinkOpts {
    /// Options that encode into `path`, replacing any existing file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            overwrite: true,
        }
    }
}

/// Sink that pipes raw RGB frames into a spawned system `ffmpeg`.
///
/// The child encodes to H.264 in an MP4 container. Nothing touches the
/// filesystem until [`FrameSink::begin`] runs.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,
    state: SinkState,
}

enum SinkState {
    Idle,
    Streaming(Encoder),
    Finished,
}

/// A live ffmpeg child accepting rawvideo on stdin.
struct Encoder {
    child: Child,
    stdin: ChildStdin,
    stderr_drain: JoinHandle<String>,
    canvas: Canvas,
    min_next: u64,
}

impl FfmpegSink {
    /// Create a sink that encodes into `opts.path` once streaming begins.
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            state: SinkState::Idle,
        }
    }
}

impl FrameSink for FfmpegSink {
    #[tracing::instrument(skip(self))]
    fn begin(&mut self, cfg: SinkConfig) -> WhipcutResult<()> {
        if !matches!(self.state, SinkState::Idle) {
            return Err(WhipcutError::io("ffmpeg sink cannot be restarted"));
        }
        check_encodable(&cfg)?;

        let dest = &self.opts.path;
        if dest.exists() && !self.opts.overwrite {
            return Err(WhipcutError::validation(format!(
                "refusing to replace existing file '{}'",
                dest.display()
            )));
        }
        if let Some(dir) = dest.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .map_err(|e| WhipcutError::io(format!("cannot create '{}': {e}", dir.display())))?;
        }
        if !is_ffmpeg_on_path() {
            return Err(WhipcutError::io(
                "MP4 encoding shells out to ffmpeg, which was not found on PATH",
            ));
        }

        let mut child = encoder_command(&self.opts, &cfg).spawn().map_err(|e| {
            WhipcutError::io(format!(
                "could not start ffmpeg for '{}': {e}",
                dest.display()
            ))
        })?;
        let (Some(stdin), Some(mut stderr)) = (child.stdin.take(), child.stderr.take()) else {
            return Err(WhipcutError::io("ffmpeg child is missing its stdio pipes"));
        };
        // Drained on a thread so a chatty child never stalls on a full pipe.
        let stderr_drain = std::thread::spawn(move || {
            let mut raw = Vec::new();
            let _ = stderr.read_to_end(&mut raw);
            String::from_utf8_lossy(&raw).into_owned()
        });

        self.state = SinkState::Streaming(Encoder {
            child,
            stdin,
            stderr_drain,
            canvas: cfg.canvas,
            min_next: 0,
        });
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRgb) -> WhipcutResult<()> {
        let SinkState::Streaming(enc) = &mut self.state else {
            return Err(WhipcutError::io("ffmpeg sink is not streaming"));
        };
        if idx.0 < enc.min_next {
            return Err(WhipcutError::io(format!(
                "frame indices must increase, got {} after {}",
                idx.0,
                enc.min_next - 1
            )));
        }
        enc.min_next = idx.0 + 1;

        if frame.canvas() != enc.canvas {
            return Err(WhipcutError::dimension_mismatch(format!(
                "sink expects {}x{} frames, got {}x{}",
                enc.canvas.width,
                enc.canvas.height,
                frame.width(),
                frame.height()
            )));
        }
        enc.stdin
            .write_all(frame.data())
            .map_err(|e| WhipcutError::io(format!("ffmpeg stopped accepting frames: {e}")))
    }

    #[tracing::instrument(skip(self))]
    fn end(&mut self) -> WhipcutResult<()> {
        let SinkState::Streaming(enc) = std::mem::replace(&mut self.state, SinkState::Finished)
        else {
            return Err(WhipcutError::io("ffmpeg sink has nothing to finalize"));
        };
        let Encoder {
            mut child,
            stdin,
            stderr_drain,
            ..
        } = enc;
        // Closing stdin is what tells ffmpeg the stream is over.
        drop(stdin);

        let status = child
            .wait()
            .map_err(|e| WhipcutError::io(format!("lost track of the ffmpeg process: {e}")))?;
        let stderr = stderr_drain
            .join()
            .map_err(|_| WhipcutError::io("ffmpeg stderr reader panicked"))?;
        if !status.success() {
            return Err(WhipcutError::io(format!(
                "ffmpeg failed ({status}): {}",
                stderr.trim()
            )));
        }
        Ok(())
    }
}

/// Reject configurations the rawvideo-to-h264 command line cannot express.
fn check_encodable(cfg: &SinkConfig) -> WhipcutResult<()> {
    let Canvas { width, height } = cfg.canvas;
    if width == 0 || height == 0 {
        return Err(WhipcutError::validation("cannot encode an empty canvas"));
    }
    if width % 2 != 0 || height % 2 != 0 {
        return Err(WhipcutError::validation(format!(
            "yuv420p mp4 output needs even dimensions, got {width}x{height}"
        )));
    }
    if cfg.fps.num == 0 || cfg.fps.den == 0 {
        return Err(WhipcutError::validation(
            "frame rate must be a positive ratio",
        ));
    }
    Ok(())
}

/// Command line for one encode: rawvideo RGB on stdin, H.264 MP4 at `opts.path`.
fn encoder_command(opts: &FfmpegSinkOpts, cfg: &SinkConfig) -> Command {
    let mut ff = Command::new("ffmpeg");
    ff.stdin(Stdio::piped());
    ff.stdout(Stdio::null());
    ff.stderr(Stdio::piped());
    ff.arg(if opts.overwrite { "-y" } else { "-n" });
    ff.args(["-loglevel", "error"]);
    // Geometry and rate describe the stdin stream, so they must precede -i.
    ff.args(["-f", "rawvideo", "-pix_fmt", "rgb24"]);
    ff.arg("-s")
        .arg(format!("{}x{}", cfg.canvas.width, cfg.canvas.height));
    ff.arg("-r").arg(format!("{}/{}", cfg.fps.num, cfg.fps.den));
    ff.args(["-i", "pipe:0", "-an"]);
    ff.args(["-c:v", "libx264", "-pix_fmt", "yuv420p", "-movflags", "+faststart"]);
    ff.arg(&opts.path);
    ff
}

/// Probe `PATH` for a runnable `ffmpeg` binary.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|status| status.success())
}
