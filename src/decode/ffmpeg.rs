use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdout};
#[cfg(feature = "media-ffmpeg")]
use std::process::{Command, Stdio};
use std::thread::JoinHandle;

use crate::decode::source::FrameSource;
use crate::foundation::core::{Canvas, FrameRgb};
use crate::foundation::error::{WhipcutError, WhipcutResult};

/// Frame source that spawns the system `ffmpeg` and streams raw RGB frames
/// from its stdout.
///
/// Frames are scaled by `ffmpeg` to the requested canvas, so consumers always
/// see canvas-sized frames regardless of the file's native resolution. The
/// child process is reaped on clean end of stream and killed on drop.
pub struct FfmpegSource {
    path: PathBuf,
    canvas: Canvas,
    frame_len: usize,
    state: SourceState,
}

enum SourceState {
    Open {
        child: Child,
        stdout: ChildStdout,
        stderr_drain: JoinHandle<String>,
    },
    Done,
}

impl FfmpegSource {
    /// Open `path` for decoding, scaling every frame to `canvas`.
    #[cfg(feature = "media-ffmpeg")]
    pub fn open(path: impl AsRef<Path>, canvas: Canvas) -> WhipcutResult<Self> {
        let path = path.as_ref().to_path_buf();
        if canvas.width == 0 || canvas.height == 0 {
            return Err(WhipcutError::dimension_mismatch(format!(
                "decode canvas must be non-zero, got {}x{}",
                canvas.width, canvas.height
            )));
        }

        let mut child = decoder_command(&path, canvas).spawn().map_err(|e| {
            WhipcutError::io(format!(
                "could not start ffmpeg for '{}': {e}",
                path.display()
            ))
        })?;
        let (Some(stdout), Some(mut stderr)) = (child.stdout.take(), child.stderr.take()) else {
            return Err(WhipcutError::io("ffmpeg child is missing its stdio pipes"));
        };
        // Drained on a thread so error spew cannot wedge the child.
        let stderr_drain = std::thread::spawn(move || {
            let mut raw = Vec::new();
            let _ = stderr.read_to_end(&mut raw);
            String::from_utf8_lossy(&raw).into_owned()
        });

        Ok(Self {
            frame_len: canvas.width as usize * canvas.height as usize * FrameRgb::CHANNELS,
            path,
            canvas,
            state: SourceState::Open {
                child,
                stdout,
                stderr_drain,
            },
        })
    }

    /// Open `path` for decoding, scaling every frame to `canvas`.
    ///
    /// Returns an error when the `media-ffmpeg` feature is disabled.
    #[cfg(not(feature = "media-ffmpeg"))]
    pub fn open(path: impl AsRef<Path>, canvas: Canvas) -> WhipcutResult<Self> {
        let _ = (path.as_ref(), canvas);
        Err(WhipcutError::validation(
            "video sources require the 'media-ffmpeg' feature",
        ))
    }

    /// Wait for a cleanly drained decoder and surface its stderr on failure.
    fn close(&mut self) -> WhipcutResult<()> {
        let SourceState::Open {
            mut child,
            stdout,
            stderr_drain,
        } = std::mem::replace(&mut self.state, SourceState::Done)
        else {
            return Ok(());
        };
        drop(stdout);

        let status = child
            .wait()
            .map_err(|e| WhipcutError::io(format!("lost track of the ffmpeg process: {e}")))?;
        let stderr = stderr_drain
            .join()
            .map_err(|_| WhipcutError::io("ffmpeg stderr reader panicked"))?;
        if !status.success() {
            return Err(WhipcutError::io(format!(
                "ffmpeg could not decode '{}' ({status}): {}",
                self.path.display(),
                stderr.trim()
            )));
        }
        Ok(())
    }

    /// Kill a decoder that can no longer be trusted to make progress.
    fn abort(&mut self) {
        if let SourceState::Open { mut child, .. } =
            std::mem::replace(&mut self.state, SourceState::Done)
        {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

impl FrameSource for FfmpegSource {
    fn next_frame(&mut self) -> WhipcutResult<Option<FrameRgb>> {
        let SourceState::Open { stdout, .. } = &mut self.state else {
            return Ok(None);
        };

        let mut buf = vec![0u8; self.frame_len];
        let filled = read_full(stdout, &mut buf)
            .map_err(|e| WhipcutError::io(format!("failed to read frame from ffmpeg: {e}")))?;

        if filled == 0 {
            self.close()?;
            return Ok(None);
        }
        if filled < self.frame_len {
            self.abort();
            return Err(WhipcutError::io(format!(
                "truncated frame from ffmpeg for '{}': got {filled} of {} bytes",
                self.path.display(),
                self.frame_len
            )));
        }

        FrameRgb::from_raw(self.canvas.width, self.canvas.height, buf).map(Some)
    }
}

impl Drop for FfmpegSource {
    fn drop(&mut self) {
        self.abort();
    }
}

/// Command line for one decode: `path` in, canvas-scaled rawvideo RGB on stdout.
#[cfg(feature = "media-ffmpeg")]
fn decoder_command(path: &Path, canvas: Canvas) -> Command {
    let mut ff = Command::new("ffmpeg");
    ff.stdin(Stdio::null());
    ff.stdout(Stdio::piped());
    ff.stderr(Stdio::piped());
    ff.args(["-loglevel", "error", "-i"]).arg(path);
    ff.args(["-an", "-f", "rawvideo", "-pix_fmt", "rgb24"]);
    ff.args(["-sws_flags", "bilinear"]);
    ff.arg("-vf")
        .arg(format!("scale={}:{}", canvas.width, canvas.height));
    ff.arg("pipe:1");
    ff
}

/// Read until `buf` is full or the stream ends; returns bytes read.
fn read_full(r: &mut impl Read, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match r.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
