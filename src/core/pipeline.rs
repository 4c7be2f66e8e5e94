//! Stage orchestration.
//!
//! Wires the stages in fixed order: dependency probe, output directory,
//! quality negotiation (or pre-optimized adoption), derivative generation
//! (or breakpoint inference), stylesheet rendering. Data flows strictly
//! forward; the only feedback is the human approval inside negotiation.

use tracing::debug;

use crate::core::{PipelineConfig, PipelineReport};
use crate::processing::{ConfirmPrompt, ImageTools, derivatives, negotiation, probe};
use crate::stylesheet::{self, StylesheetSpec};
use crate::utils::{PrepResult, UsageError, ensure_dir};

/// One pipeline run over injected tools and confirmation seam.
pub struct Pipeline<T: ImageTools, C: ConfirmPrompt> {
    tools: T,
    confirm: C,
    config: PipelineConfig,
}

impl<T: ImageTools, C: ConfirmPrompt> Pipeline<T, C> {
    pub fn new(tools: T, confirm: C, config: PipelineConfig) -> Self {
        Self {
            tools,
            confirm,
            config,
        }
    }

    /// Run the whole pipeline and return its report.
    ///
    /// The stylesheet text is carried in the report; the caller owns stdout.
    pub async fn run(&mut self) -> PrepResult<PipelineReport> {
        // Probe before any file I/O, directory creation included.
        probe::check_dependencies(&self.tools, self.config.pre_optimized.is_none()).await?;
        ensure_dir(&self.config.out_dir).await?;

        let extension = self.config.extension();
        let optimized = self.config.optimized_path();

        let final_quality = match &self.config.pre_optimized {
            Some(supplied) => {
                negotiation::adopt_preoptimized(supplied, &optimized).await?;
                None
            }
            None => {
                let source = self
                    .config
                    .source
                    .clone()
                    .ok_or(UsageError::MissingSource)?;
                let accepted = negotiation::negotiate(
                    &self.tools,
                    &mut self.confirm,
                    &source,
                    &optimized,
                    self.config.quality,
                )
                .await?;
                Some(accepted)
            }
        };

        let breakpoints = if self.config.pre_resized {
            derivatives::scan_existing(&self.config.out_dir)?
        } else {
            derivatives::generate(
                &self.tools,
                &optimized,
                &self.config.out_dir,
                &self.config.base_name,
                &extension,
                &self.config.widths,
            )
            .await?
        };
        debug!("breakpoints: {:?}", breakpoints);

        let stylesheet = stylesheet::render(&StylesheetSpec {
            class: &self.config.css_class,
            base_path: &self.config.css_base_path,
            base_name: &self.config.base_name,
            extension: &extension,
            orientation: self.config.orientation.as_deref(),
            breakpoints: &breakpoints,
        });

        Ok(PipelineReport {
            optimized,
            final_quality,
            breakpoints,
            stylesheet,
        })
    }
}
