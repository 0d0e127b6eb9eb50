//! Combining separate video and audio files into one container.
//!
//! The acquirer only sees the [`Muxer`] trait so tests can swap in a fake
//! instead of running ffmpeg.

use crate::config::RmfConfig;
use crate::error::{FetchError, Result};
use std::ffi::OsString;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

pub trait Muxer {
    /// Writes `output` from `video` and `audio`. `output` must not be trusted
    /// on error.
    fn mux(&self, video: &Path, audio: &Path, output: &Path) -> Result<()>;
}

impl<T: Muxer + ?Sized> Muxer for &T {
    fn mux(&self, video: &Path, audio: &Path, output: &Path) -> Result<()> {
        (**self).mux(video, audio, output)
    }
}

/// Runs ffmpeg: copy the video stream, transcode audio to AAC, MP4 container.
#[derive(Debug, Clone)]
pub struct FfmpegMuxer {
    program: PathBuf,
    timeout: Duration,
}

impl FfmpegMuxer {
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    pub fn from_config(cfg: &RmfConfig) -> Self {
        Self::new(&cfg.mux.ffmpeg_path, cfg.mux_timeout())
    }

    fn args(video: &Path, audio: &Path, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = ["-y", "-hide_banner", "-loglevel", "error", "-i"]
            .into_iter()
            .map(OsString::from)
            .collect();
        args.push(video.into());
        args.push("-i".into());
        args.push(audio.into());
        for a in ["-map", "0:v:0", "-map", "1:a:0", "-c:v", "copy", "-c:a", "aac", "-f", "mp4"] {
            args.push(a.into());
        }
        args.push(output.into());
        args
    }
}

impl Muxer for FfmpegMuxer {
    fn mux(&self, video: &Path, audio: &Path, output: &Path) -> Result<()> {
        tracing::debug!(
            video = %video.display(),
            audio = %audio.display(),
            output = %output.display(),
            "running {}",
            self.program.display()
        );
        let mut child = Command::new(&self.program)
            .args(Self::args(video, audio, output))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                FetchError::MuxFailure(format!("failed to start {}: {}", self.program.display(), e))
            })?;

        // Drain stderr on a thread so a chatty muxer cannot fill the pipe and stall.
        let stderr = child.stderr.take();
        let reader = std::thread::spawn(move || {
            let mut text = String::new();
            if let Some(mut pipe) = stderr {
                let _ = pipe.read_to_string(&mut text);
            }
            text
        });

        let status = wait_with_timeout(&mut child, self.timeout);
        let stderr_text = reader.join().unwrap_or_default();
        let status = status?;
        if !status.success() {
            let detail = stderr_text.lines().last().unwrap_or("").trim();
            return Err(FetchError::MuxFailure(format!(
                "{} exited with {}: {}",
                self.program.display(),
                status,
                detail
            )));
        }
        Ok(())
    }
}

/// Wait for a child process, killing and reaping it once `timeout` passes.
fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Result<ExitStatus> {
    let deadline = Instant::now() + timeout;
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(status),
            Ok(None) => {
                if Instant::now() >= deadline {
                    tracing::error!("muxer timed out after {}s, killing", timeout.as_secs());
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(FetchError::MuxFailure(format!(
                        "timed out after {}s",
                        timeout.as_secs()
                    )));
                }
                std::thread::sleep(Duration::from_millis(100));
            }
            Err(e) => return Err(FetchError::MuxFailure(format!("wait failed: {}", e))),
        }
    }
}
