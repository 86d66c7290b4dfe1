// Observability: metrics emitted by the pipeline stages

pub mod metrics;

pub use metrics::{emit_counter, emit_gauge, emit_histogram, MetricName};
