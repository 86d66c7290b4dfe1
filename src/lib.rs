pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod observability;
pub mod pipeline;
pub mod types;

pub use config::{Config, PipelineConfig};
pub use error::{RecordError, Result};
pub use pipeline::processing::aggregate::Aggregator;
pub use pipeline::processing::parser::parse;
pub use pipeline::processing::reconcile::{reconcile, ReconcileOutcome, ReconcileReport, Reconciler};
pub use pipeline::{Pipeline, PipelineResult};
pub use types::{CleanedRecord, FormattedRecord};
