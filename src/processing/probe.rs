//! Fail-fast dependency checks.
//!
//! Runs before any file I/O, including output-directory creation: the
//! pipeline must never start prompting the human or writing files in an
//! environment that cannot finish the job.

use tracing::debug;

use crate::processing::tools::{COMPRESSOR, ImageTools, METADATA_TOOL, RESIZE_TOOL};
use crate::utils::{PrepError, PrepResult};

/// Verify the required external tools are present.
///
/// The compressor check is skipped when the caller supplied a pre-optimized
/// file; the metadata/resize pair is always required.
pub async fn check_dependencies(tools: &impl ImageTools, need_compressor: bool) -> PrepResult<()> {
    if need_compressor {
        if !tools.has_compressor().await {
            return Err(PrepError::MissingCompressor {
                tool: COMPRESSOR,
                hint: "install mozjpeg or libjpeg-turbo",
            });
        }
    } else {
        debug!("pre-optimized file supplied, skipping {} check", COMPRESSOR);
    }

    if !tools.has_resizer().await {
        return Err(PrepError::MissingResizer {
            tool: "identify/convert",
            hint: "install ImageMagick",
        });
    }
    debug!("{} and {} available", METADATA_TOOL, RESIZE_TOOL);

    Ok(())
}
