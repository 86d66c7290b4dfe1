//! Read-only statistics over cleaned records.
//!
//! Every query over an empty record set returns
//! [`RecordError::EmptyDataset`] rather than a numeric default.

use std::collections::HashMap;

use crate::constants::{DOCTOR_TITLE, TITLE_ORDER};
use crate::error::{RecordError, Result};
use crate::pipeline::processing::reconcile::ReconcileReport;
use crate::types::CleanedRecord;

/// Occurrence counts that remember the order keys were first seen
#[derive(Debug, Default)]
struct OrderedCounts<'a> {
    index: HashMap<&'a str, usize>,
    entries: Vec<(&'a str, usize)>,
}

impl<'a> OrderedCounts<'a> {
    fn add(&mut self, key: &'a str) {
        match self.index.get(key) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push((key, 1));
            }
        }
    }

    fn get(&self, key: &str) -> usize {
        self.index.get(key).map_or(0, |&slot| self.entries[slot].1)
    }

    /// Keys by descending count; equal counts keep first-seen order
    fn ranked(&self) -> Vec<(&'a str, usize)> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}

pub struct Aggregator<'a> {
    records: &'a [CleanedRecord],
}

impl<'a> Aggregator<'a> {
    pub fn new(records: &'a [CleanedRecord]) -> Self {
        Self { records }
    }

    fn non_empty(&self, query: &'static str) -> Result<&'a [CleanedRecord]> {
        if self.records.is_empty() {
            Err(RecordError::EmptyDataset { query })
        } else {
            Ok(self.records)
        }
    }

    /// The two most common surnames, most frequent first.
    /// Ties keep the order surnames first appeared. Fewer than two are
    /// returned when the batch has fewer distinct surnames.
    pub fn most_common_surname(&self) -> Result<Vec<String>> {
        let records = self.non_empty("most_common_surname")?;

        let mut counts = OrderedCounts::default();
        for record in records {
            counts.add(&record.surname);
        }

        Ok(counts
            .ranked()
            .into_iter()
            .take(2)
            .map(|(surname, _)| surname.to_string())
            .collect())
    }

    /// Mean age rounded to one decimal place
    pub fn average_age(&self) -> Result<f64> {
        let records = self.non_empty("average_age")?;
        let total: u64 = records.iter().map(|r| u64::from(r.age)).sum();
        Ok(round_to_tenth(total as f64 / records.len() as f64))
    }

    /// The youngest record titled "Dr"; the earliest wins a tie
    pub fn youngest_dr(&self) -> Result<&'a CleanedRecord> {
        let records = self.non_empty("youngest_dr")?;

        records
            .iter()
            .filter(|r| r.title == DOCTOR_TITLE)
            .min_by_key(|r| r.age)
            .ok_or_else(|| RecordError::NoMatchingRecords {
                query: "youngest_dr",
                title: DOCTOR_TITLE.to_string(),
            })
    }

    /// Most frequent birth month (the second `/` segment of the date).
    /// Ties go to the month seen first; dates without a month segment are skipped.
    pub fn most_common_month(&self) -> Result<String> {
        let records = self.non_empty("most_common_month")?;

        let mut counts = OrderedCounts::default();
        for record in records {
            if let Some(month) = record.date_of_birth.split('/').nth(1) {
                counts.add(month);
            }
        }

        counts
            .ranked()
            .first()
            .map(|(month, _)| month.to_string())
            .ok_or(RecordError::EmptyDataset {
                query: "most_common_month",
            })
    }

    /// Rounded percentage of records per title, in the order
    /// Mr, Mrs, Miss, Ms, Dr, untitled. Rounded independently, so the
    /// values need not sum to 100.
    pub fn percentage_titles(&self) -> Result<[u32; 6]> {
        let records = self.non_empty("percentage_titles")?;

        let mut counts = OrderedCounts::default();
        for record in records {
            counts.add(&record.title);
        }

        let total = records.len() as f64;
        Ok(TITLE_ORDER.map(|title| (counts.get(title) as f64 / total * 100.0).round() as u32))
    }

    /// Share of input records the reconciler dropped or changed, in percent
    /// to one decimal place
    pub fn percentage_altered(report: &ReconcileReport) -> Result<f64> {
        if report.input_records == 0 {
            return Err(RecordError::EmptyDataset {
                query: "percentage_altered",
            });
        }

        let touched = report.dropped_blank + report.dropped_duplicates + report.altered;
        Ok(round_to_tenth(touched as f64 / report.input_records as f64 * 100.0))
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
