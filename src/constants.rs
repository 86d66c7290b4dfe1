/// Vocabulary constants shared by the parser, reconciler and aggregator.
/// These define what the pipeline recognises in hand-entered rows.

// Minimum comma-separated fields for a row to become a record
pub const MIN_FIELDS: usize = 4;

// Positional field indices within a row
pub const NAME_FIELD: usize = 0;
pub const DOB_FIELD: usize = 1;
pub const AGE_FIELD: usize = 2;
pub const EMAIL_FIELD: usize = 3;

/// Title tokens accepted at the start of a full name (with and without period)
pub const TITLE_TOKENS: [&str; 10] = [
    "Mr", "Mr.", "Mrs", "Mrs.", "Miss", "Miss.", "Ms", "Ms.", "Dr", "Dr.",
];

/// Fixed title order used by the title distribution query.
/// The empty string stands for "no title".
pub const TITLE_ORDER: [&str; 6] = ["Mr", "Mrs", "Miss", "Ms", "Dr", ""];

pub const DOCTOR_TITLE: &str = "Dr";

/// English month names in calendar order
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Spelled-out number words and their values. No "hundred" or "and".
pub const NUMBER_WORDS: [(&str, i32); 27] = [
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
    ("nine", 9),
    ("ten", 10),
    ("eleven", 11),
    ("twelve", 12),
    ("thirteen", 13),
    ("fourteen", 14),
    ("fifteen", 15),
    ("sixteen", 16),
    ("seventeen", 17),
    ("eighteen", 18),
    ("nineteen", 19),
    ("twenty", 20),
    ("thirty", 30),
    ("forty", 40),
    ("fifty", 50),
    ("sixty", 60),
    ("seventy", 70),
    ("eighty", 80),
    ("ninety", 90),
];

// Two-digit years at or below this pivot belong to the 2000s
pub const CENTURY_PIVOT: i64 = 24;

pub const DEFAULT_EMAIL_DOMAIN: &str = "example.com";

/// Reference date for age computation: 2024-01-26
pub const DEFAULT_REFERENCE_DATE: (i32, u32, u32) = (2024, 1, 26);
