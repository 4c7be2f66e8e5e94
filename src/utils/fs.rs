use std::path::Path;
use tokio::fs;

use crate::utils::{PrepError, PrepResult};

/// Get file size in bytes
pub async fn get_file_size(path: impl AsRef<Path>) -> PrepResult<u64> {
    fs::metadata(path.as_ref())
        .await
        .map(|m| m.len())
        .map_err(|e| PrepError::io(format!("Failed to get file size: {}", e)))
}

/// Create a directory and all parents; succeeds silently if it already exists
pub async fn ensure_dir(path: impl AsRef<Path>) -> PrepResult<()> {
    fs::create_dir_all(path.as_ref())
        .await
        .map_err(|e| PrepError::io(format!("Failed to create directory: {}", e)))
}

/// Format a byte count with a human-readable unit (B, KB, MB, GB).
pub fn human_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn human_size_picks_the_right_unit() {
        assert_eq!(human_size(512), "512 B");
        assert_eq!(human_size(2048), "2.0 KB");
        assert_eq!(human_size(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(human_size(3 * 1024 * 1024 * 1024), "3.0 GB");
    }

    #[tokio::test]
    async fn ensure_dir_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b");
        ensure_dir(&nested).await.unwrap();
        ensure_dir(&nested).await.unwrap();
        assert!(nested.is_dir());
    }
}
