// Record pipeline: ingestion, then parse -> reconcile -> aggregate

pub mod ingestion;
pub mod processing;

use serde::Serialize;
use std::path::Path;
use tracing::{info, instrument};

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::types::{CleanedRecord, FormattedRecord};
use processing::aggregate::Aggregator;
use processing::parser;
use processing::reconcile::{ReconcileReport, Reconciler};

/// Everything one pipeline run produced
#[derive(Debug, Clone, Serialize)]
pub struct PipelineResult {
    pub formatted: Vec<FormattedRecord>,
    pub cleaned: Vec<CleanedRecord>,
    pub report: ReconcileReport,
}

impl PipelineResult {
    /// Aggregate queries over the cleaned records
    pub fn statistics(&self) -> Aggregator<'_> {
        Aggregator::new(&self.cleaned)
    }

    pub fn percentage_altered(&self) -> Result<f64> {
        Aggregator::percentage_altered(&self.report)
    }
}

pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Run the full batch over raw CSV text
    #[instrument(skip_all)]
    pub fn run(&self, raw_text: &str) -> PipelineResult {
        let formatted = parser::parse(raw_text);
        let outcome = Reconciler::new(&self.config).reconcile(formatted.clone());

        info!(
            "Pipeline finished: {} formatted, {} cleaned",
            formatted.len(),
            outcome.records.len()
        );

        PipelineResult {
            formatted,
            cleaned: outcome.records,
            report: outcome.report,
        }
    }

    /// Load a CSV file and run the batch over it
    pub fn run_file(&self, path: impl AsRef<Path>) -> Result<PipelineResult> {
        let raw_text = ingestion::load_csv(path)?;
        Ok(self.run(&raw_text))
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}
