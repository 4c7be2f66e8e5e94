//! External image tools behind an injectable seam.
//!
//! The pipeline never touches pixels itself; compression, measurement and
//! resizing are delegated to command-line tools invoked as subprocesses.
//! [`ImageTools`] is the seam, [`ShellTools`] the real implementation.

use std::env;
use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::utils::{PrepError, PrepResult};

/// Name of the JPEG compressor binary.
pub const COMPRESSOR: &str = "cjpeg";
/// Name of the image metadata reader binary.
pub const METADATA_TOOL: &str = "identify";
/// Name of the image resizer binary.
pub const RESIZE_TOOL: &str = "convert";

/// Abstraction over the external image tools.
///
/// Implementations run one operation at a time to completion; the pipeline
/// is sequential and never overlaps tool invocations.
#[async_trait]
pub trait ImageTools: Send + Sync {
    /// Compress `source` as JPEG at `quality`, writing the result to `dest`.
    async fn compress(&self, source: &Path, quality: u32, dest: &Path) -> PrepResult<()>;

    /// Read the intrinsic pixel dimensions of the image at `path`.
    async fn measure(&self, path: &Path) -> PrepResult<(u32, u32)>;

    /// Scale `source` to `width` pixels wide (height proportional), writing to `dest`.
    async fn resize(&self, source: &Path, width: u32, dest: &Path) -> PrepResult<()>;

    /// Open `path` in the platform's default image viewer.
    async fn preview(&self, path: &Path) -> PrepResult<()>;

    /// Whether the JPEG compressor is available on PATH.
    async fn has_compressor(&self) -> bool;

    /// Whether the metadata reader and resizer are both available on PATH.
    async fn has_resizer(&self) -> bool;
}

/// Subprocess-backed implementation driving cjpeg and ImageMagick.
pub struct ShellTools;

impl ShellTools {
    /// Run a command, failing with the tool's stderr if it exits non-zero.
    async fn run_checked(cmd: &mut Command, what: &str) -> PrepResult<Vec<u8>> {
        debug!("running {}", what);
        let output = cmd
            .output()
            .await
            .map_err(|e| PrepError::tool(format!("Failed to run {}: {}", what, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PrepError::tool(format!(
                "{} failed: {}",
                what,
                stderr.trim()
            )));
        }
        Ok(output.stdout)
    }

    /// Probe a tool by running it with null stdio; returns its first output
    /// line when the invocation succeeds.
    async fn probe(tool: &str, arg: &str) -> Option<String> {
        let output = Command::new(tool)
            .arg(arg)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .ok()?;

        if !output.status.success() {
            return None;
        }
        // Version banners land on stdout or stderr depending on the tool.
        let banner = if output.stdout.is_empty() {
            output.stderr
        } else {
            output.stdout
        };
        let first_line = String::from_utf8_lossy(&banner)
            .lines()
            .next()
            .unwrap_or("")
            .trim()
            .to_string();
        Some(first_line)
    }

    /// Verify the tool actually produced its output file.
    async fn verify_output(dest: &Path, what: &str) -> PrepResult<()> {
        match tokio::fs::metadata(dest).await {
            Ok(_) => Ok(()),
            Err(e) => Err(PrepError::tool(format!(
                "{} reported success but output is missing: {} ({})",
                what,
                dest.display(),
                e
            ))),
        }
    }
}

#[async_trait]
impl ImageTools for ShellTools {
    async fn compress(&self, source: &Path, quality: u32, dest: &Path) -> PrepResult<()> {
        let mut cmd = Command::new(COMPRESSOR);
        cmd.arg("-quality")
            .arg(quality.to_string())
            .arg("-outfile")
            .arg(dest)
            .arg(source);
        Self::run_checked(&mut cmd, COMPRESSOR).await?;
        Self::verify_output(dest, COMPRESSOR).await
    }

    async fn measure(&self, path: &Path) -> PrepResult<(u32, u32)> {
        let mut cmd = Command::new(METADATA_TOOL);
        cmd.arg("-format").arg("%w %h").arg(path);
        let stdout = Self::run_checked(&mut cmd, METADATA_TOOL).await?;

        let text = String::from_utf8_lossy(&stdout);
        let mut parts = text.split_whitespace();
        let width = parts.next().and_then(|w| w.parse::<u32>().ok());
        let height = parts.next().and_then(|h| h.parse::<u32>().ok());
        match (width, height) {
            (Some(w), Some(h)) => {
                debug!("{}: {}x{}", path.display(), w, h);
                Ok((w, h))
            }
            _ => Err(PrepError::tool(format!(
                "Unexpected {} output: {}",
                METADATA_TOOL,
                text.trim()
            ))),
        }
    }

    async fn resize(&self, source: &Path, width: u32, dest: &Path) -> PrepResult<()> {
        let mut cmd = Command::new(RESIZE_TOOL);
        // Width-only geometry keeps the aspect ratio.
        cmd.arg(source).arg("-resize").arg(width.to_string()).arg(dest);
        Self::run_checked(&mut cmd, RESIZE_TOOL).await?;
        Self::verify_output(dest, RESIZE_TOOL).await
    }

    async fn preview(&self, path: &Path) -> PrepResult<()> {
        let mut cmd = match env::consts::OS {
            "macos" => {
                let mut c = Command::new("open");
                c.arg(path);
                c
            }
            "windows" => {
                let mut c = Command::new("cmd");
                c.arg("/C").arg("start").arg("").arg(path);
                c
            }
            _ => {
                let mut c = Command::new("xdg-open");
                c.arg(path);
                c
            }
        };

        let status = cmd
            .status()
            .await
            .map_err(|e| PrepError::tool(format!("Failed to open previewer: {}", e)))?;
        if !status.success() {
            return Err(PrepError::tool(format!(
                "Previewer exited with status: {}",
                status
            )));
        }
        Ok(())
    }

    async fn has_compressor(&self) -> bool {
        match Self::probe(COMPRESSOR, "-version").await {
            Some(version) => {
                debug!("{} found: {}", COMPRESSOR, version);
                true
            }
            None => false,
        }
    }

    async fn has_resizer(&self) -> bool {
        let identify = Self::probe(METADATA_TOOL, "-version").await;
        let convert = Self::probe(RESIZE_TOOL, "-version").await;
        match (identify, convert) {
            (Some(iv), Some(_)) => {
                debug!("ImageMagick found: {}", iv);
                true
            }
            _ => false,
        }
    }
}
