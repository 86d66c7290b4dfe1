//! Metrics for the record pipeline
//!
//! Thin wrappers over the `metrics` facade. Without an installed recorder
//! every call is a no-op, so the library never requires an exporter.

use std::fmt;

/// Enum representing all metric names used in the pipeline
/// This eliminates magic strings and provides compile-time safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    // Parser metrics
    ParserRowsRead,
    ParserRowsSkipped,
    ParserRecordsFormatted,
    ParserDuration,

    // Reconcile metrics
    ReconcileBatchSize,
    ReconcileBlankDropped,
    ReconcileDuplicatesDropped,
    ReconcileEmailsSuffixed,
    ReconcileRecordsCleaned,
    ReconcileDuration,
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            // Parser metrics
            MetricName::ParserRowsRead => "records_parser_rows_read_total",
            MetricName::ParserRowsSkipped => "records_parser_rows_skipped_total",
            MetricName::ParserRecordsFormatted => "records_parser_records_formatted_total",
            MetricName::ParserDuration => "records_parser_duration_seconds",

            // Reconcile metrics
            MetricName::ReconcileBatchSize => "records_reconcile_batch_size",
            MetricName::ReconcileBlankDropped => "records_reconcile_blank_dropped_total",
            MetricName::ReconcileDuplicatesDropped => {
                "records_reconcile_duplicates_dropped_total"
            }
            MetricName::ReconcileEmailsSuffixed => "records_reconcile_emails_suffixed_total",
            MetricName::ReconcileRecordsCleaned => "records_reconcile_records_cleaned_total",
            MetricName::ReconcileDuration => "records_reconcile_duration_seconds",
        }
    }

    /// Get all metric names as an iterator
    pub fn all_metrics() -> impl Iterator<Item = MetricName> {
        use MetricName::*;
        [
            ParserRowsRead,
            ParserRowsSkipped,
            ParserRecordsFormatted,
            ParserDuration,
            ReconcileBatchSize,
            ReconcileBlankDropped,
            ReconcileDuplicatesDropped,
            ReconcileEmailsSuffixed,
            ReconcileRecordsCleaned,
            ReconcileDuration,
        ]
        .into_iter()
    }
}

pub fn emit_counter(name: MetricName, value: u64) {
    ::metrics::counter!(name.as_str()).increment(value);
}

pub fn emit_gauge(name: MetricName, value: f64) {
    ::metrics::gauge!(name.as_str()).set(value);
}

pub fn emit_histogram(name: MetricName, value: f64) {
    ::metrics::histogram!(name.as_str()).record(value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn metric_names_are_unique() {
        let names: HashSet<_> = MetricName::all_metrics().map(|m| m.as_str()).collect();
        assert_eq!(names.len(), MetricName::all_metrics().count());
    }

    #[test]
    fn emitting_without_recorder_is_a_noop() {
        emit_counter(MetricName::ParserRowsRead, 3);
        emit_gauge(MetricName::ReconcileBatchSize, 3.0);
        emit_histogram(MetricName::ParserDuration, 0.01);
    }
}
