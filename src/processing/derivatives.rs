//! Width-scaled derivative generation.
//!
//! Produces one `<base>-<width>.<ext>` file per target width narrower than
//! the source, or infers the already-generated widths from the output
//! directory in pre-resized mode.

use std::path::Path;

use regex::Regex;
use tracing::{debug, info};

use crate::processing::tools::ImageTools;
use crate::utils::PrepResult;

/// Generate derivatives for every target width strictly below the source's
/// intrinsic width.
///
/// Returns the breakpoints: the widths a file was produced for, in the same
/// relative order as `widths`. The list is never sorted; the stylesheet
/// cascade depends on input order. Widths at or above the source width are
/// skipped, the tool never upscales.
pub async fn generate<T: ImageTools>(
    tools: &T,
    optimized: &Path,
    out_dir: &Path,
    base_name: &str,
    extension: &str,
    widths: &[u32],
) -> PrepResult<Vec<u32>> {
    let (source_width, source_height) = tools.measure(optimized).await?;
    debug!("source dimensions: {}x{}", source_width, source_height);

    let mut breakpoints = Vec::new();
    for &width in widths {
        if width >= source_width {
            debug!("skipping {}px, source is only {}px wide", width, source_width);
            continue;
        }

        let dest = out_dir.join(format!("{}-{}.{}", base_name, width, extension));
        tools.resize(optimized, width, &dest).await?;
        info!("derivative {}px: {}", width, dest.display());
        breakpoints.push(width);
    }

    Ok(breakpoints)
}

/// Infer breakpoints from derivative files already on disk.
///
/// Scans `out_dir` for names shaped `<anything>-<digits>.<jpg|png>` and
/// collects the widths in whatever order the directory listing yields them.
pub fn scan_existing(out_dir: &Path) -> PrepResult<Vec<u32>> {
    let pattern = Regex::new(r"^.+-(\d+)\.(jpg|png)$").expect("derivative name pattern");

    let mut widths = Vec::new();
    for entry in std::fs::read_dir(out_dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if let Some(caps) = pattern.captures(name)
            && let Ok(width) = caps[1].parse::<u32>()
        {
            widths.push(width);
        }
    }
    debug!("inferred breakpoints from {}: {:?}", out_dir.display(), widths);

    Ok(widths)
}
