//! Command-line argument parsing and configuration resolution.
//!
//! Parsing is clap's job; resolution applies the defaults the flags left
//! open, deriving the base name and CSS class from the source stem and the
//! CSS base path from the output directory.

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::core::PipelineConfig;
use crate::utils::{PrepResult, UsageError, format_from_path};

/// Compress an image interactively, generate width-scaled derivatives, and
/// print the matching CSS media-query rules to standard output.
#[derive(Parser, Debug)]
#[command(name = "imgprep")]
pub struct Args {
    /// Starting quality for the negotiation loop
    #[arg(short = 'q', value_name = "QUALITY", default_value_t = 50)]
    pub quality: u32,

    /// Comma-separated target widths in pixels
    #[arg(
        short = 'w',
        value_name = "WIDTHS",
        value_delimiter = ',',
        default_values_t = [2048, 1440, 1024, 768]
    )]
    pub widths: Vec<u32>,

    /// Output directory for the optimized image and derivatives
    #[arg(short = 'd', value_name = "DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// Output base file name (defaults to the source stem)
    #[arg(short = 'f', value_name = "NAME")]
    pub base_name: Option<String>,

    /// CSS class name (defaults to the source stem)
    #[arg(short = 'c', value_name = "CLASS")]
    pub css_class: Option<String>,

    /// Orientation keyword for the emitted media queries
    #[arg(short = 'o', value_name = "ORIENTATION")]
    pub orientation: Option<String>,

    /// URL base path for the stylesheet (defaults to /<output dir>)
    #[arg(short = 'p', value_name = "PATH")]
    pub css_base_path: Option<String>,

    /// Pre-optimized image; skips the negotiation loop
    #[arg(short = 'O', value_name = "FILE")]
    pub pre_optimized: Option<PathBuf>,

    /// Derivatives already exist; infer breakpoints from the output directory
    #[arg(short = 'D')]
    pub pre_resized: bool,

    /// Source image
    #[arg(value_name = "SOURCE")]
    pub source: Option<PathBuf>,
}

impl Args {
    /// Apply defaults and validation, producing the resolved configuration.
    pub fn resolve(self) -> PrepResult<PipelineConfig> {
        if self.source.is_none() && self.pre_optimized.is_none() {
            return Err(UsageError::MissingSource.into());
        }

        if let Some(source) = &self.source {
            validate_source(source)?;
        }

        // The stem drives the default base name and CSS class. With only -O
        // given, the pre-optimized file is the one name we have.
        let named = self
            .source
            .as_deref()
            .or(self.pre_optimized.as_deref())
            .ok_or(UsageError::MissingSource)?;
        let stem = named
            .file_stem()
            .and_then(|s| s.to_str())
            .map(str::to_owned)
            .ok_or_else(|| UsageError::BareName(named.to_path_buf()))?;

        let base_name = self.base_name.unwrap_or_else(|| stem.clone());
        let css_class = self.css_class.unwrap_or_else(|| stem.clone());
        let css_base_path = self
            .css_base_path
            .unwrap_or_else(|| default_css_base_path(&self.out_dir));

        Ok(PipelineConfig {
            source: self.source,
            quality: self.quality,
            widths: self.widths,
            out_dir: self.out_dir,
            base_name,
            css_class,
            orientation: self.orientation,
            css_base_path,
            pre_optimized: self.pre_optimized,
            pre_resized: self.pre_resized,
        })
    }
}

/// Derive the stylesheet URL base path from the output directory, prefixing
/// `/` when the directory is not already absolute.
fn default_css_base_path(out_dir: &Path) -> String {
    let dir = out_dir.to_string_lossy();
    if out_dir.is_absolute() {
        dir.into_owned()
    } else {
        format!("/{}", dir)
    }
}

/// The source must exist, be a regular file, and carry a supported image
/// extension.
fn validate_source(source: &Path) -> PrepResult<()> {
    if !source.exists() {
        return Err(UsageError::SourceNotFound(source.to_path_buf()).into());
    }
    if !source.is_file() {
        return Err(UsageError::NotAFile(source.to_path_buf()).into());
    }
    format_from_path(source)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::PrepError;
    use std::fs::File;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn defaults_derive_from_the_source_name() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("city.jpg");
        File::create(&source).unwrap();
        let source_arg = source.to_str().unwrap();

        let args = parse(&["imgprep", "-d", "img/city", source_arg]);
        let config = args.resolve().unwrap();

        assert_eq!(config.base_name, "city");
        assert_eq!(config.css_class, "city");
        assert_eq!(config.css_base_path, "/img/city");
        assert_eq!(config.quality, 50);
        assert_eq!(config.widths, vec![2048, 1440, 1024, 768]);
    }

    #[test]
    fn explicit_flags_override_derived_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("city.jpg");
        File::create(&source).unwrap();
        let source_arg = source.to_str().unwrap();

        let args = parse(&[
            "imgprep", "-q", "70", "-w", "1024,768", "-f", "hero", "-c", "banner", "-o",
            "landscape", "-p", "/assets", source_arg,
        ]);
        let config = args.resolve().unwrap();

        assert_eq!(config.quality, 70);
        assert_eq!(config.widths, vec![1024, 768]);
        assert_eq!(config.base_name, "hero");
        assert_eq!(config.css_class, "banner");
        assert_eq!(config.orientation.as_deref(), Some("landscape"));
        assert_eq!(config.css_base_path, "/assets");
    }

    #[test]
    fn absolute_output_directory_is_not_prefixed() {
        assert_eq!(default_css_base_path(Path::new("/var/www/img")), "/var/www/img");
        assert_eq!(default_css_base_path(Path::new("img")), "/img");
    }

    #[test]
    fn missing_source_without_preoptimized_is_exit_3() {
        let args = parse(&["imgprep"]);
        let err = args.resolve().unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn preoptimized_alone_is_enough() {
        let args = parse(&["imgprep", "-O", "done/city.png"]);
        let config = args.resolve().unwrap();
        assert!(config.source.is_none());
        assert_eq!(config.base_name, "city");
        assert_eq!(config.extension(), "png");
    }

    #[test]
    fn nonexistent_source_is_a_usage_error() {
        let args = parse(&["imgprep", "/no/such/city.jpg"]);
        let err = args.resolve().unwrap_err();
        assert!(matches!(err, PrepError::Usage(UsageError::SourceNotFound(_))));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn unsupported_source_format_is_a_usage_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("city.gif");
        File::create(&source).unwrap();

        let args = parse(&["imgprep", source.to_str().unwrap()]);
        let err = args.resolve().unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn unknown_flags_are_rejected_by_the_parser() {
        assert!(Args::try_parse_from(["imgprep", "-z", "city.jpg"]).is_err());
    }
}
