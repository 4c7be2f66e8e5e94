//! Core types for pipeline configuration and results.

use std::path::PathBuf;

/// Fully resolved configuration for one pipeline run.
///
/// Produced by the argument resolver; every default has already been applied
/// by the time this struct exists.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Source image path; present unless a pre-optimized file was supplied
    pub source: Option<PathBuf>,
    /// Starting quality for the negotiation loop
    pub quality: u32,
    /// Target derivative widths, order-preserving
    pub widths: Vec<u32>,
    /// Output directory for all artifacts
    pub out_dir: PathBuf,
    /// File-name stem for the optimized image and derivatives
    pub base_name: String,
    /// CSS class the emitted rules target
    pub css_class: String,
    /// Optional orientation keyword for the emitted media queries
    pub orientation: Option<String>,
    /// URL base path prefixed to image references in the stylesheet
    pub css_base_path: String,
    /// Pre-optimized file; skips the negotiation loop when set
    pub pre_optimized: Option<PathBuf>,
    /// Derivatives already exist; infer breakpoints instead of resizing
    pub pre_resized: bool,
}

impl PipelineConfig {
    /// Extension of the optimized artifact: the supplied file's own
    /// extension in pre-optimized mode, `jpg` when the loop compresses.
    pub fn extension(&self) -> String {
        match &self.pre_optimized {
            Some(path) => path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.to_lowercase())
                .unwrap_or_else(|| "jpg".to_string()),
            None => "jpg".to_string(),
        }
    }

    /// Full path of the optimized image inside the output directory.
    pub fn optimized_path(&self) -> PathBuf {
        self.out_dir
            .join(format!("{}.{}", self.base_name, self.extension()))
    }
}

/// Summary of one completed run.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// Path of the optimized full-size image
    pub optimized: PathBuf,
    /// Quality the human accepted; `None` in pre-optimized mode
    pub final_quality: Option<u32>,
    /// Widths a derivative exists for, in emission order
    pub breakpoints: Vec<u32>,
    /// Rendered CSS text
    pub stylesheet: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PipelineConfig {
        PipelineConfig {
            source: Some(PathBuf::from("city.jpg")),
            quality: 50,
            widths: vec![2048, 1440, 1024, 768],
            out_dir: PathBuf::from("img/city"),
            base_name: "city".to_string(),
            css_class: "city".to_string(),
            orientation: None,
            css_base_path: "/img/city".to_string(),
            pre_optimized: None,
            pre_resized: false,
        }
    }

    #[test]
    fn negotiated_output_is_always_jpg() {
        let cfg = config();
        assert_eq!(cfg.extension(), "jpg");
        assert_eq!(cfg.optimized_path(), PathBuf::from("img/city/city.jpg"));
    }

    #[test]
    fn preoptimized_output_keeps_the_supplied_extension() {
        let mut cfg = config();
        cfg.pre_optimized = Some(PathBuf::from("done/city.PNG"));
        assert_eq!(cfg.extension(), "png");
        assert_eq!(cfg.optimized_path(), PathBuf::from("img/city/city.png"));
    }
}
