//! ffmpeg invocation for video transcoding.
//!
//! decant runs ffmpeg exactly once per video with a fixed parameter set:
//! H.264 video at CRF 23 with the medium preset, AAC audio at 128 kbps, and
//! the faststart flag so the MP4 index lands at the front of the container
//! for progressive playback.

use crate::error::{CoreError, CoreResult};

use std::ffi::OsString;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Poll interval while waiting on the transcoder.
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// How many trailing stderr lines to keep for error reporting.
const STDERR_TAIL_LINES: usize = 15;

/// Builds the fixed ffmpeg argument list for one transcode.
///
/// `-f mp4` is passed explicitly because the output is written to a
/// temporary `.part` path whose extension would otherwise confuse muxer
/// selection.
#[must_use]
pub fn transcode_args(input: &Path, output: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = Vec::with_capacity(18);
    args.push("-i".into());
    args.push(input.as_os_str().to_os_string());
    args.push("-c:v".into());
    args.push("libx264".into());
    args.push("-preset".into());
    args.push("medium".into());
    args.push("-crf".into());
    args.push("23".into());
    args.push("-c:a".into());
    args.push("aac".into());
    args.push("-b:a".into());
    args.push("128k".into());
    args.push("-movflags".into());
    args.push("+faststart".into());
    args.push("-f".into());
    args.push("mp4".into());
    args.push("-y".into());
    args.push(output.as_os_str().to_os_string());
    args
}

/// Runs one ffmpeg transcode, blocking until it finishes or `timeout`
/// expires.
///
/// stderr is collected so a failure can carry ffmpeg's diagnostics. On
/// timeout the process is killed. The caller owns cleanup of the output
/// path.
pub fn run_transcode(input: &Path, output: &Path, timeout: Duration) -> CoreResult<()> {
    let args = transcode_args(input, output);
    log::debug!("Running: ffmpeg {args:?}");

    let mut cmd = Command::new(super::FFMPEG);
    cmd.args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped());

    let mut child = cmd.spawn().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            CoreError::DependencyMissing(super::FFMPEG.to_string())
        } else {
            CoreError::CommandStart {
                tool: super::FFMPEG.to_string(),
                source: e,
            }
        }
    })?;

    // Drain stderr on a separate thread so the child never blocks on a full
    // pipe during long transcodes.
    let stderr = child.stderr.take();
    let stderr_handle = std::thread::spawn(move || {
        let mut lines: Vec<String> = Vec::new();
        if let Some(stderr) = stderr {
            for line in BufReader::new(stderr).lines().map_while(Result::ok) {
                log::trace!("ffmpeg: {line}");
                lines.push(line);
            }
        }
        lines
    });

    let start = Instant::now();
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if start.elapsed() >= timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    let _ = stderr_handle.join();
                    return Err(CoreError::Transcode {
                        path: input.to_path_buf(),
                        detail: format!(
                            "timed out after {} seconds and was killed",
                            timeout.as_secs()
                        ),
                    });
                }
                std::thread::sleep(WAIT_POLL_INTERVAL);
            }
            Err(e) => {
                let _ = child.kill();
                let _ = stderr_handle.join();
                return Err(CoreError::Transcode {
                    path: input.to_path_buf(),
                    detail: format!("error waiting for ffmpeg: {e}"),
                });
            }
        }
    };

    let stderr_lines = stderr_handle.join().unwrap_or_default();

    if !status.success() {
        return Err(CoreError::Transcode {
            path: input.to_path_buf(),
            detail: format!(
                "ffmpeg exited with {}: {}",
                status
                    .code()
                    .map_or_else(|| "signal".to_string(), |c| format!("code {c}")),
                stderr_tail(&stderr_lines)
            ),
        });
    }

    Ok(())
}

/// Last few non-empty stderr lines, newest last.
fn stderr_tail(lines: &[String]) -> String {
    let tail: Vec<&str> = lines
        .iter()
        .map(String::as_str)
        .filter(|l| !l.trim().is_empty())
        .collect();
    let start = tail.len().saturating_sub(STDERR_TAIL_LINES);
    if tail.is_empty() {
        "no diagnostic output".to_string()
    } else {
        tail[start..].join("\n")
    }
}
