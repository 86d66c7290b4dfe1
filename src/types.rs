use serde::{Deserialize, Serialize};

/// One input line split on commas. Lives only for the duration of parsing.
pub type RawRow<'a> = Vec<&'a str>;

/// Best-effort parse of a single row, not yet reconciled against the batch
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FormattedRecord {
    /// One of Mr, Mrs, Miss, Ms, Dr (optionally with a trailing period) or empty
    pub title: String,
    pub first_name: String,
    /// Interior name parts joined with single spaces
    pub middle_name: String,
    pub surname: String,
    /// `DD/MM/YYYY` after year expansion and month-name substitution
    pub date_of_birth: String,
    /// `None` when the age field was blank (not a number)
    pub age: Option<i32>,
    pub email: String,
}

impl FormattedRecord {
    /// True when every field is empty and the age is not a number
    pub fn is_blank(&self) -> bool {
        self.title.is_empty()
            && self.first_name.is_empty()
            && self.surname.is_empty()
            && self.date_of_birth.is_empty()
            && self.email.is_empty()
            && self.age.is_none()
    }
}

/// Reconciled record: deduplicated, names inferred, unique email, recomputed age
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanedRecord {
    pub title: String,
    pub first_name: String,
    pub middle_name: String,
    pub surname: String,
    pub date_of_birth: String,
    pub age: u32,
    pub email: String,
}

impl From<CleanedRecord> for FormattedRecord {
    fn from(record: CleanedRecord) -> Self {
        Self {
            title: record.title,
            first_name: record.first_name,
            middle_name: record.middle_name,
            surname: record.surname,
            date_of_birth: record.date_of_birth,
            age: i32::try_from(record.age).ok(),
            email: record.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_requires_missing_age() {
        let mut record = FormattedRecord::default();
        assert!(record.is_blank());

        record.age = Some(0);
        assert!(!record.is_blank());
    }

    #[test]
    fn middle_name_alone_is_still_blank() {
        let record = FormattedRecord {
            middle_name: "Ann".to_string(),
            ..Default::default()
        };
        assert!(record.is_blank());
    }

    #[test]
    fn cleaned_converts_back_to_formatted() {
        let cleaned = CleanedRecord {
            title: "Dr".to_string(),
            first_name: "Jane".to_string(),
            middle_name: String::new(),
            surname: "Doe".to_string(),
            date_of_birth: "01/02/1980".to_string(),
            age: 43,
            email: "jane.doe@example.com".to_string(),
        };

        let formatted = FormattedRecord::from(cleaned);
        assert_eq!(formatted.age, Some(43));
        assert_eq!(formatted.email, "jane.doe@example.com");
    }
}
