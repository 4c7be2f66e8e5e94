use std::path::Path;
use std::str::FromStr;

use crate::utils::UsageError;

/// Image formats this tool reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    JPEG,
    PNG,
}

impl ImageFormat {
    /// Get file extensions associated with this format
    pub fn extensions(&self) -> &[&str] {
        match self {
            Self::JPEG => &["jpg", "jpeg"],
            Self::PNG => &["png"],
        }
    }

    /// Check if the extension matches this format
    pub fn matches_extension(&self, ext: &str) -> bool {
        let ext = ext.to_lowercase();
        self.extensions().contains(&ext.as_str())
    }

    /// Get the primary extension for this format
    pub fn primary_extension(&self) -> &str {
        self.extensions()[0]
    }
}

impl FromStr for ImageFormat {
    type Err = UsageError;

    fn from_str(ext: &str) -> Result<Self, Self::Err> {
        let ext = ext.to_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Ok(Self::JPEG),
            "png" => Ok(Self::PNG),
            _ => Err(UsageError::UnsupportedFormat(ext)),
        }
    }
}

/// Get format from a path's file extension
pub fn format_from_path(path: &Path) -> Result<ImageFormat, UsageError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| {
            UsageError::UnsupportedFormat(format!("{} has no extension", path.display()))
        })?;

    ImageFormat::from_str(ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_supported_extensions() {
        assert_eq!(ImageFormat::from_str("jpg").unwrap(), ImageFormat::JPEG);
        assert_eq!(ImageFormat::from_str("JPEG").unwrap(), ImageFormat::JPEG);
        assert_eq!(ImageFormat::from_str("png").unwrap(), ImageFormat::PNG);
        assert!(ImageFormat::from_str("webp").is_err());
    }

    #[test]
    fn format_from_path_requires_an_extension() {
        assert!(format_from_path(Path::new("city.jpg")).is_ok());
        assert!(format_from_path(Path::new("city")).is_err());
    }

    #[test]
    fn jpeg_matches_both_spellings() {
        assert!(ImageFormat::JPEG.matches_extension("JPG"));
        assert!(ImageFormat::JPEG.matches_extension("jpeg"));
        assert!(!ImageFormat::PNG.matches_extension("jpg"));
        assert_eq!(ImageFormat::JPEG.primary_extension(), "jpg");
    }
}
