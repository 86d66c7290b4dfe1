//! Cross-record repair of formatted records.
//!
//! A single forward pass over the batch: blank rows are dropped, titles are
//! tidied, missing names are inferred from the email, duplicates are dropped,
//! and survivors get a unique generated email and an age recomputed against
//! the reference date. All bookkeeping lives in a per-call [`ReconcileState`],
//! so separate runs never share state.

pub mod age;
pub mod email;

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info, instrument, warn};

use crate::config::PipelineConfig;
use crate::observability::{emit_counter, emit_gauge, emit_histogram, MetricName};
use crate::types::{CleanedRecord, FormattedRecord};

pub use email::EmailRegistry;

/// Composite identity used for duplicate detection.
/// Uses the age as parsed, before recomputation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityKey {
    pub title: String,
    pub first_name: String,
    pub middle_name: String,
    pub surname: String,
    pub date_of_birth: String,
    pub age: Option<i32>,
}

impl From<&FormattedRecord> for IdentityKey {
    fn from(record: &FormattedRecord) -> Self {
        Self {
            title: record.title.clone(),
            first_name: record.first_name.clone(),
            middle_name: record.middle_name.clone(),
            surname: record.surname.clone(),
            date_of_birth: record.date_of_birth.clone(),
            age: record.age,
        }
    }
}

/// Counts describing what a reconcile run did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    pub input_records: usize,
    pub dropped_blank: usize,
    pub dropped_duplicates: usize,
    /// Survivors whose cleaned form differs from their formatted form
    pub altered: usize,
    pub suffixed_emails: usize,
}

impl ReconcileReport {
    pub fn cleaned_records(&self) -> usize {
        self.input_records - self.dropped_blank - self.dropped_duplicates
    }
}

#[derive(Debug, Clone)]
pub struct ReconcileOutcome {
    pub records: Vec<CleanedRecord>,
    pub report: ReconcileReport,
}

/// Mutable bookkeeping for one reconcile run
#[derive(Debug)]
pub struct ReconcileState {
    seen: HashSet<IdentityKey>,
    emails: EmailRegistry,
}

impl ReconcileState {
    pub fn new(email_domain: &str) -> Self {
        Self {
            seen: HashSet::new(),
            emails: EmailRegistry::new(email_domain),
        }
    }
}

pub struct Reconciler {
    reference_date: NaiveDate,
    email_domain: String,
}

impl Reconciler {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            reference_date: config.reference_date,
            email_domain: config.email_domain.clone(),
        }
    }

    /// Reconcile a batch, consuming it in original order
    #[instrument(skip_all, fields(batch_size = records.len()))]
    pub fn reconcile(&self, records: Vec<FormattedRecord>) -> ReconcileOutcome {
        let start_time = std::time::Instant::now();
        emit_gauge(MetricName::ReconcileBatchSize, records.len() as f64);

        let mut state = ReconcileState::new(&self.email_domain);
        let mut report = ReconcileReport {
            input_records: records.len(),
            ..Default::default()
        };
        let mut cleaned = Vec::with_capacity(records.len());

        for (index, record) in records.into_iter().enumerate() {
            if record.is_blank() {
                debug!("Dropping blank record at index {}", index);
                report.dropped_blank += 1;
                continue;
            }

            let original = record.clone();
            let Some(result) = self.reconcile_record(record, &mut state) else {
                debug!("Dropping duplicate record at index {}", index);
                report.dropped_duplicates += 1;
                continue;
            };

            if is_altered(&original, &result) {
                report.altered += 1;
            }
            cleaned.push(result);
        }

        report.suffixed_emails = state.emails.suffixed();

        emit_counter(MetricName::ReconcileBlankDropped, report.dropped_blank as u64);
        emit_counter(
            MetricName::ReconcileDuplicatesDropped,
            report.dropped_duplicates as u64,
        );
        emit_counter(MetricName::ReconcileEmailsSuffixed, report.suffixed_emails as u64);
        emit_counter(MetricName::ReconcileRecordsCleaned, cleaned.len() as u64);
        emit_histogram(MetricName::ReconcileDuration, start_time.elapsed().as_secs_f64());

        info!(
            "Reconciled {} records: {} cleaned, {} blank, {} duplicates, {} altered",
            report.input_records,
            cleaned.len(),
            report.dropped_blank,
            report.dropped_duplicates,
            report.altered
        );

        ReconcileOutcome {
            records: cleaned,
            report,
        }
    }

    /// Repair one non-blank record. `None` means it duplicates an earlier one.
    fn reconcile_record(
        &self,
        mut record: FormattedRecord,
        state: &mut ReconcileState,
    ) -> Option<CleanedRecord> {
        if let Some(stripped) = record.title.strip_suffix('.') {
            record.title = stripped.to_string();
        }

        if record.first_name.is_empty() || record.surname.is_empty() {
            let (first_name, surname) = names_from_email(&record.email);
            record.first_name = first_name;
            record.surname = surname;
        }

        if !state.seen.insert(IdentityKey::from(&record)) {
            return None;
        }

        let email = state.emails.assign(&record.first_name, &record.surname);
        let age = self.recompute_age(&record);

        Some(CleanedRecord {
            title: record.title,
            first_name: record.first_name,
            middle_name: record.middle_name,
            surname: record.surname,
            date_of_birth: record.date_of_birth,
            age,
            email,
        })
    }

    fn recompute_age(&self, record: &FormattedRecord) -> u32 {
        match age::age_at(&record.date_of_birth, self.reference_date) {
            Some(years) => clamp_age(years),
            None => {
                warn!(
                    "Cannot compute age from date of birth '{}', keeping parsed age {:?}",
                    record.date_of_birth, record.age
                );
                clamp_age(record.age.map(i64::from).unwrap_or(0))
            }
        }
    }
}

/// First and second dot-separated segments of the email's local part.
/// Missing segments come back empty.
pub fn names_from_email(email: &str) -> (String, String) {
    let local = email.split('@').next().unwrap_or_default();
    let mut segments = local.split('.');
    let first_name = segments.next().unwrap_or_default().to_string();
    let surname = segments.next().unwrap_or_default().to_string();
    (first_name, surname)
}

fn clamp_age(years: i64) -> u32 {
    u32::try_from(years.max(0)).unwrap_or(u32::MAX)
}

fn is_altered(original: &FormattedRecord, cleaned: &CleanedRecord) -> bool {
    original.title != cleaned.title
        || original.first_name != cleaned.first_name
        || original.middle_name != cleaned.middle_name
        || original.surname != cleaned.surname
        || original.date_of_birth != cleaned.date_of_birth
        || original.email != cleaned.email
        || original.age != i32::try_from(cleaned.age).ok()
}

/// Reconcile a batch with the given configuration
pub fn reconcile(records: Vec<FormattedRecord>, config: &PipelineConfig) -> ReconcileOutcome {
    Reconciler::new(config).reconcile(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: (&str, &str, &str), dob: &str, age: Option<i32>, email: &str) -> FormattedRecord {
        FormattedRecord {
            title: name.0.to_string(),
            first_name: name.1.to_string(),
            middle_name: String::new(),
            surname: name.2.to_string(),
            date_of_birth: dob.to_string(),
            age,
            email: email.to_string(),
        }
    }

    fn run(records: Vec<FormattedRecord>) -> ReconcileOutcome {
        reconcile(records, &PipelineConfig::default())
    }

    #[test]
    fn test_names_from_email() {
        assert_eq!(
            names_from_email("jane.doe@mail.com"),
            ("jane".to_string(), "doe".to_string())
        );
        assert_eq!(names_from_email("jane@mail.com"), ("jane".to_string(), String::new()));
        assert_eq!(names_from_email(""), (String::new(), String::new()));
        assert_eq!(
            names_from_email("a.b.c@mail.com"),
            ("a".to_string(), "b".to_string())
        );
    }

    #[test]
    fn test_blank_records_are_dropped() {
        let outcome = run(vec![
            FormattedRecord::default(),
            record(("", "Ann", "Lee"), "01/01/1990", Some(34), "x@y.com"),
        ]);
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.report.dropped_blank, 1);
        assert_eq!(outcome.records[0].email, "Ann.Lee@example.com");
    }

    #[test]
    fn test_blank_names_with_age_are_kept() {
        let outcome = run(vec![record(("", "", ""), "", Some(0), "")]);
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].email, ".@example.com");
        assert_eq!(outcome.records[0].age, 0);
    }

    #[test]
    fn test_out_of_range_birth_year_keeps_batch_running() {
        let outcome = run(vec![
            record(("", "Ann", "Lee"), "1/1/-9223372036854775807", Some(30), ""),
            record(("", "Bo", "Ng"), "26/01/2000", Some(24), ""),
        ]);
        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.records[0].age, 30);
        assert_eq!(outcome.records[1].age, 24);
    }

    #[test]
    fn test_title_period_is_stripped() {
        let outcome = run(vec![record(("Dr.", "Bo", "Ng"), "03/03/1970", Some(53), "")]);
        assert_eq!(outcome.records[0].title, "Dr");
    }

    #[test]
    fn test_names_inferred_from_email() {
        let outcome = run(vec![record(
            ("Ms", "Ann", ""),
            "02/02/2002",
            Some(21),
            "annie.lee@mail.com",
        )]);
        let cleaned = &outcome.records[0];
        assert_eq!(cleaned.first_name, "annie");
        assert_eq!(cleaned.surname, "lee");
        assert_eq!(cleaned.email, "annie.lee@example.com");
    }

    #[test]
    fn test_duplicates_keep_first_occurrence() {
        let first = record(("Mr", "John", "Smith"), "01/01/1980", Some(44), "first@x.com");
        let mut second = first.clone();
        second.email = "second@x.com".to_string();

        let outcome = run(vec![first, second]);
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.report.dropped_duplicates, 1);
        assert_eq!(outcome.records[0].email, "John.Smith@example.com");
    }

    #[test]
    fn test_duplicate_key_uses_parsed_age() {
        let a = record(("Mr", "John", "Smith"), "01/01/1980", Some(44), "");
        let b = record(("Mr", "John", "Smith"), "01/01/1980", Some(43), "");

        let outcome = run(vec![a, b]);
        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.records[0].age, outcome.records[1].age);
        assert_eq!(outcome.records[1].email, "John.Smith2@example.com");
    }

    #[test]
    fn test_duplicate_detected_after_title_cleanup() {
        let a = record(("Mr.", "John", "Smith"), "01/01/1980", Some(44), "");
        let b = record(("Mr", "John", "Smith"), "01/01/1980", Some(44), "");
        assert_eq!(run(vec![a, b]).records.len(), 1);
    }

    #[test]
    fn test_duplicates_do_not_consume_emails() {
        let a = record(("", "John", "Smith"), "01/01/1980", Some(44), "");
        let b = a.clone();
        let c = record(("", "John", "Smith"), "02/02/1982", Some(41), "");

        let outcome = run(vec![a, b, c]);
        let emails: Vec<_> = outcome.records.iter().map(|r| r.email.as_str()).collect();
        assert_eq!(emails, vec!["John.Smith@example.com", "John.Smith2@example.com"]);
    }

    #[test]
    fn test_age_recomputed_from_reference_date() {
        let outcome = run(vec![
            record(("", "A", "One"), "26/01/2000", Some(99), ""),
            record(("", "B", "Two"), "27/01/2000", Some(99), ""),
        ]);
        assert_eq!(outcome.records[0].age, 24);
        assert_eq!(outcome.records[1].age, 23);
    }

    #[test]
    fn test_unparseable_dob_keeps_parsed_age() {
        let outcome = run(vec![
            record(("", "A", "One"), "", Some(31), ""),
            record(("", "B", "Two"), "sometime", Some(-4), ""),
        ]);
        assert_eq!(outcome.records[0].age, 31);
        assert_eq!(outcome.records[1].age, 0);
    }

    #[test]
    fn test_future_birth_date_clamps_to_zero() {
        let outcome = run(vec![record(("", "A", "One"), "01/01/2030", Some(1), "")]);
        assert_eq!(outcome.records[0].age, 0);
    }

    #[test]
    fn test_report_counts_alterations() {
        let unchanged = CleanedRecord {
            title: "Mr".to_string(),
            first_name: "Al".to_string(),
            middle_name: String::new(),
            surname: "Bo".to_string(),
            date_of_birth: "26/01/2000".to_string(),
            age: 24,
            email: "Al.Bo@example.com".to_string(),
        };
        let outcome = run(vec![
            FormattedRecord::from(unchanged),
            record(("Dr.", "Cy", "Do"), "26/01/2000", Some(24), "Cy.Do@example.com"),
            FormattedRecord::default(),
        ]);

        assert_eq!(outcome.report.input_records, 3);
        assert_eq!(outcome.report.altered, 1);
        assert_eq!(outcome.report.dropped_blank, 1);
        assert_eq!(outcome.report.cleaned_records(), 2);
    }

    #[test]
    fn test_runs_are_isolated() {
        let reconciler = Reconciler::new(&PipelineConfig::default());
        let batch = || vec![record(("", "John", "Smith"), "01/01/1980", Some(44), "")];

        let first = reconciler.reconcile(batch());
        let second = reconciler.reconcile(batch());
        assert_eq!(first.records, second.records);
        assert_eq!(second.records[0].email, "John.Smith@example.com");
    }
}
