pub mod fields;

use tracing::{debug, info, instrument};

use crate::constants::{AGE_FIELD, DOB_FIELD, EMAIL_FIELD, MIN_FIELDS, NAME_FIELD};
use crate::observability::{emit_counter, emit_histogram, MetricName};
use crate::types::{FormattedRecord, RawRow};

pub trait RecordParser {
    fn parse(&self, raw_text: &str) -> Vec<FormattedRecord>;
}

/// A wrapper that adds metrics to any parser implementation
pub struct MetricsParser<P: RecordParser> {
    inner: P,
}

impl<P: RecordParser> MetricsParser<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }
}

impl<P: RecordParser> RecordParser for MetricsParser<P> {
    fn parse(&self, raw_text: &str) -> Vec<FormattedRecord> {
        let start_time = std::time::Instant::now();
        let records = self.inner.parse(raw_text);

        emit_counter(MetricName::ParserRecordsFormatted, records.len() as u64);
        emit_histogram(MetricName::ParserDuration, start_time.elapsed().as_secs_f64());
        records
    }
}

/// Positional parser for `name,dob,age,email` rows.
///
/// Rows with fewer than four fields are skipped; extra fields are ignored.
/// Output keeps input row order.
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvRecordParser;

impl CsvRecordParser {
    pub fn new() -> Self {
        Self
    }

    /// Convert one row into a formatted record, or `None` if it is too short
    pub fn format_row(row: &RawRow<'_>) -> Option<FormattedRecord> {
        if row.len() < MIN_FIELDS {
            return None;
        }

        let name = fields::split_name(row[NAME_FIELD]);

        Some(FormattedRecord {
            title: name.title,
            first_name: name.first_name,
            middle_name: name.middle_name,
            surname: name.surname,
            date_of_birth: fields::normalize_date(row[DOB_FIELD]),
            age: fields::parse_age(row[AGE_FIELD]),
            email: fields::clean_email(row[EMAIL_FIELD]),
        })
    }
}

impl RecordParser for CsvRecordParser {
    #[instrument(skip_all, fields(bytes = raw_text.len()))]
    fn parse(&self, raw_text: &str) -> Vec<FormattedRecord> {
        let mut records = Vec::new();
        let mut rows_read = 0u64;
        let mut skipped = 0u64;

        for line in raw_text.split('\n') {
            rows_read += 1;
            let row: RawRow<'_> = line.split(',').collect();
            match Self::format_row(&row) {
                Some(record) => records.push(record),
                None => skipped += 1,
            }
        }

        emit_counter(MetricName::ParserRowsRead, rows_read);
        emit_counter(MetricName::ParserRowsSkipped, skipped);
        debug!("Skipped {} rows with fewer than {} fields", skipped, MIN_FIELDS);
        info!("Parsed {} records from {} rows", records.len(), rows_read);

        records
    }
}

/// Parse raw CSV text into formatted records
pub fn parse(raw_text: &str) -> Vec<FormattedRecord> {
    MetricsParser::new(CsvRecordParser::new()).parse(raw_text)
}
