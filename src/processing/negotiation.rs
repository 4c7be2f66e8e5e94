//! Interactive quality-negotiation loop.
//!
//! A two-state machine: NEGOTIATING compresses the source at the current
//! quality, shows the result to the human and waits for a verdict; a yes
//! moves the attempt into place and transitions to ACCEPTED, a no bumps the
//! quality by a fixed step and retries. There is no upper bound and no
//! timeout; the human ends the loop.

use std::io::{self, Write};
use std::path::Path;

use tempfile::Builder;
use tracing::info;

use crate::processing::tools::ImageTools;
use crate::utils::{PrepError, PrepResult, fs};

/// Quality increment applied after each rejection.
pub const QUALITY_STEP: u32 = 5;

/// Negotiation loop state. `Accepted` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NegotiationState {
    Negotiating,
    Accepted,
}

/// Injectable confirmation seam.
///
/// The real implementation reads the terminal; tests substitute a scripted
/// sequence of answers.
pub trait ConfirmPrompt {
    fn confirm(&mut self, message: &str) -> PrepResult<bool>;
}

/// Reads y/n answers from standard input, prompting on stderr.
pub struct TerminalPrompt;

impl ConfirmPrompt for TerminalPrompt {
    fn confirm(&mut self, message: &str) -> PrepResult<bool> {
        eprint!("{} [y/N] ", message);
        io::stderr().flush()?;

        let mut line = String::new();
        io::stdin().read_line(&mut line)?;
        Ok(is_yes(&line))
    }
}

/// Case-insensitive "y"/"yes" is a yes; anything else, including empty
/// input, is a no.
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Run the negotiation loop until the human accepts an attempt.
///
/// Each attempt is compressed into a temporary file next to `dest` so the
/// final move stays on one filesystem. Returns the accepted quality.
pub async fn negotiate<T: ImageTools, C: ConfirmPrompt>(
    tools: &T,
    confirm: &mut C,
    source: &Path,
    dest: &Path,
    start_quality: u32,
) -> PrepResult<u32> {
    let scratch_dir = dest.parent().unwrap_or(Path::new("."));
    let mut quality = start_quality;
    let mut state = NegotiationState::Negotiating;

    while state == NegotiationState::Negotiating {
        let attempt = Builder::new()
            .prefix(".imgprep-")
            .suffix(".jpg")
            .tempfile_in(scratch_dir)?;

        tools.compress(source, quality, attempt.path()).await?;
        let size = fs::get_file_size(attempt.path()).await?;
        info!(
            "quality {}: {} ({})",
            quality,
            attempt.path().display(),
            fs::human_size(size)
        );

        tools.preview(attempt.path()).await?;

        if confirm.confirm(&format!("Keep quality {}?", quality))? {
            attempt
                .persist(dest)
                .map_err(|e| PrepError::io(format!("Failed to move accepted file: {}", e)))?;
            state = NegotiationState::Accepted;
        } else {
            quality += QUALITY_STEP;
        }
    }

    let size = fs::get_file_size(dest).await?;
    info!("accepted: {} ({})", dest.display(), fs::human_size(size));
    Ok(quality)
}

/// Skip negotiation: the caller already optimized the image. Copies it into
/// the output location under the resolved name, extension preserved.
pub async fn adopt_preoptimized(supplied: &Path, dest: &Path) -> PrepResult<()> {
    tokio::fs::copy(supplied, dest).await?;
    let size = fs::get_file_size(dest).await?;
    info!(
        "pre-optimized: {} -> {} ({})",
        supplied.display(),
        dest.display(),
        fs::human_size(size)
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yes_answers_are_case_insensitive() {
        assert!(is_yes("y\n"));
        assert!(is_yes("Y"));
        assert!(is_yes("yes"));
        assert!(is_yes("YES\n"));
    }

    #[test]
    fn everything_else_is_a_no() {
        assert!(!is_yes(""));
        assert!(!is_yes("\n"));
        assert!(!is_yes("n"));
        assert!(!is_yes("yep"));
        assert!(!is_yes("no"));
    }
}
