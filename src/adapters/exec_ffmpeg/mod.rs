//! FFmpeg execution adapter
//!
//! Drives the `ffmpeg` executable. A private temporary directory plays the
//! part of the engine's file system: inputs are written into it, commands
//! run inside it and outputs are read back from it.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tempfile::TempDir;
use tokio::process::Command;
use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, info};

use crate::domain::errors::*;
use crate::ports::*;

/// Flags prepended to every command
const GLOBAL_ARGS: [&str; 5] = ["-hide_banner", "-nostdin", "-loglevel", "error", "-y"];

/// How many trailing stderr lines are kept in error messages
const STDERR_TAIL_LINES: usize = 5;

/// FFmpeg-based conversion engine
pub struct FfmpegCliEngine {
    ffmpeg_path: PathBuf,
    workdir: OnceCell<TempDir>,
    jobs: Mutex<()>,
}

impl FfmpegCliEngine {
    /// Create new FFmpeg adapter
    pub fn new(ffmpeg_path: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
            workdir: OnceCell::new(),
            jobs: Mutex::new(()),
        }
    }

    fn workdir(&self) -> Result<&Path, DomainError> {
        self.workdir
            .get()
            .map(TempDir::path)
            .ok_or(DomainError::EngineNotReady)
    }

    /// Resolve `name` inside the working directory
    fn file_path(&self, name: &str) -> Result<PathBuf, DomainError> {
        let invalid = name.is_empty()
            || name.contains(|c: char| c == '/' || c == '\\')
            || name == "."
            || name == "..";
        if invalid {
            return Err(DomainError::BadArgs(format!("Invalid engine file name: {}", name)));
        }
        Ok(self.workdir()?.join(name))
    }

    async fn initialize(&self) -> Result<TempDir, DomainError> {
        let output = Command::new(&self.ffmpeg_path)
            .arg("-version")
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                DomainError::EngineFailure(format!(
                    "Failed to launch {}: {}",
                    self.ffmpeg_path.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            return Err(DomainError::EngineFailure(format!(
                "{} -version exited with {}",
                self.ffmpeg_path.display(),
                output.status
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        info!(
            version = stdout.lines().next().unwrap_or("unknown"),
            "FFmpeg available"
        );

        tempfile::Builder::new()
            .prefix("gifcut-")
            .tempdir()
            .map_err(|e| DomainError::FsFail(format!("Failed to create engine workdir: {}", e)))
    }
}

/// Last few non-empty lines of an ffmpeg stderr dump
fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join("\n")
}

#[async_trait]
impl ConversionEnginePort for FfmpegCliEngine {
    async fn load(&self) -> Result<(), DomainError> {
        self.workdir
            .get_or_try_init(|| self.initialize())
            .await
            .map(|dir| debug!(workdir = %dir.path().display(), "Engine loaded"))
    }

    async fn write_input(&self, name: &str, bytes: Vec<u8>) -> Result<(), DomainError> {
        let path = self.file_path(name)?;
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| DomainError::FsFail(format!("Failed to write {}: {}", path.display(), e)))
    }

    async fn run(&self, args: &[String]) -> Result<(), DomainError> {
        let workdir = self.workdir()?;
        debug!(?args, "Running ffmpeg");

        let output = Command::new(&self.ffmpeg_path)
            .args(GLOBAL_ARGS)
            .args(args)
            .current_dir(workdir)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| DomainError::EngineFailure(format!("Failed to launch ffmpeg: {}", e)))?;

        if output.status.success() {
            Ok(())
        } else {
            Err(DomainError::EngineFailure(format!(
                "ffmpeg exited with {}: {}",
                output.status,
                stderr_tail(&output.stderr)
            )))
        }
    }

    async fn read_output(&self, name: &str) -> Result<Vec<u8>, DomainError> {
        let path = self.file_path(name)?;
        tokio::fs::read(&path).await.map_err(|e| {
            DomainError::EngineFailure(format!("Failed to read {}: {}", path.display(), e))
        })
    }

    fn job_lock(&self) -> &Mutex<()> {
        &self.jobs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stderr_tail_keeps_last_lines() {
        let stderr = b"one\n\ntwo\nthree\nfour\nfive\nsix\n";
        assert_eq!(stderr_tail(stderr), "two\nthree\nfour\nfive\nsix");
    }

    #[tokio::test]
    async fn test_calls_before_load_are_rejected() {
        let engine = FfmpegCliEngine::new("ffmpeg");
        assert_eq!(
            engine.write_input("test.mp4", vec![]).await,
            Err(DomainError::EngineNotReady)
        );
        assert_eq!(
            engine.run(&["-version".to_string()]).await,
            Err(DomainError::EngineNotReady)
        );
    }

    #[tokio::test]
    async fn test_missing_binary_fails_load() {
        let engine = FfmpegCliEngine::new("/nonexistent/gifcut-ffmpeg");
        assert!(matches!(
            engine.load().await,
            Err(DomainError::EngineFailure(_))
        ));
    }

    /// Stand-in ffmpeg that answers `-version` and otherwise copies the
    /// input to the output slowly
    #[cfg(unix)]
    fn slow_copy_ffmpeg(dir: &Path) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let script = dir.join("fake-ffmpeg");
        std::fs::write(
            &script,
            "#!/bin/sh\n\
             case \"$*\" in *-version*) echo 'ffmpeg version fake'; exit 0;; esac\n\
             sleep 0.3\n\
             cp test.mp4 out.gif\n",
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        script
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_concurrent_jobs_do_not_interleave() {
        let dir = tempfile::TempDir::new().unwrap();
        let engine = FfmpegCliEngine::new(slow_copy_ffmpeg(dir.path()));
        engine.load().await.unwrap();

        let args: Vec<String> = ["-i", "test.mp4", "-f", "gif", "out.gif"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let first = engine.convert("test.mp4", b"AAAA".to_vec(), &args, "out.gif");
        let second = async {
            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
            engine
                .convert("test.mp4", b"BBBB".to_vec(), &args, "out.gif")
                .await
        };
        let (first, second) = tokio::join!(first, second);

        assert_eq!(first.unwrap(), b"AAAA".to_vec());
        assert_eq!(second.unwrap(), b"BBBB".to_vec());
    }

    #[test]
    fn test_file_names_cannot_escape_workdir() {
        let engine = FfmpegCliEngine::new("ffmpeg");
        for name in ["", "..", "../etc/passwd", "a/b.mp4"] {
            assert!(matches!(
                engine.file_path(name),
                Err(DomainError::BadArgs(_))
            ));
        }
    }
}
