//! Field-level conversions applied to a single raw row.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

use crate::constants::{CENTURY_PIVOT, MONTH_NAMES, NUMBER_WORDS, TITLE_TOKENS};

static TRAILING_TWO_DIGITS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{2}$").expect("static year pattern compiles"));

static NUMBER_WORD_VALUES: Lazy<HashMap<&'static str, i32>> =
    Lazy::new(|| NUMBER_WORDS.iter().copied().collect());

/// Title and name segments split out of the full-name field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameParts {
    pub title: String,
    pub first_name: String,
    pub middle_name: String,
    pub surname: String,
}

/// Leading integer of a string, skipping leading whitespace.
/// `" 1990"` and `"90abc"` both parse; `"abc"` does not.
pub fn leading_int(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Age field: blank is not a number, numeric text keeps only its leading
/// integer (`"1e3"` is 1, `".5"` is not a number), anything else goes
/// through the spelled-number resolver.
pub fn parse_age(raw: &str) -> Option<i32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.parse::<f64>().is_ok_and(f64::is_finite) {
        return leading_int(trimmed).and_then(|n| i32::try_from(n).ok());
    }

    Some(spelled_number(&trimmed.to_lowercase()))
}

/// Sum of the recognised words in a hyphenated spelled number.
/// Unknown words contribute nothing.
pub fn spelled_number(text: &str) -> i32 {
    text.split('-')
        .filter_map(|part| NUMBER_WORD_VALUES.get(part.trim()))
        .sum()
}

/// Email field: drop one trailing carriage return, nothing else.
pub fn clean_email(raw: &str) -> String {
    raw.strip_suffix('\r').unwrap_or(raw).to_string()
}

/// Date of birth: two-digit year expansion, then month-name substitution.
pub fn normalize_date(raw: &str) -> String {
    let expanded = expand_year(raw.trim());
    substitute_month(&expanded)
}

/// Prefix a two-digit year with its century.
///
/// Triggered by the leading integer of the third `/` segment being 0-99, so a
/// zero-padded year like `0087` still gains a prefix. Only the final two
/// characters are rewritten.
pub fn expand_year(dob: &str) -> String {
    let year = dob.split('/').nth(2).and_then(leading_int);
    let century = match year {
        Some(y) if (0..=CENTURY_PIVOT).contains(&y) => "20",
        Some(y) if (CENTURY_PIVOT + 1..=99).contains(&y) => "19",
        _ => return dob.to_string(),
    };

    TRAILING_TWO_DIGITS
        .replace(dob, |caps: &regex::Captures| format!("{}{}", century, &caps[0]))
        .into_owned()
}

/// Replace the first month name (calendar order) and any separators around
/// it with `/MM/`.
pub fn substitute_month(dob: &str) -> String {
    for (index, name) in MONTH_NAMES.iter().enumerate() {
        if let Some(start) = dob.find(name) {
            let head = dob[..start].trim_end_matches(is_date_separator);
            let tail = dob[start + name.len()..].trim_start_matches(is_date_separator);
            return format!("{}/{:02}/{}", head, index + 1, tail);
        }
    }
    dob.to_string()
}

fn is_date_separator(c: char) -> bool {
    c.is_whitespace() || c == '/' || c == '-'
}

/// Split a full name on single spaces, peeling off a leading title.
pub fn split_name(full_name: &str) -> NameParts {
    let mut parts: Vec<&str> = full_name.split(' ').collect();

    let title = match parts.first() {
        Some(first) if TITLE_TOKENS.contains(first) => parts.remove(0).to_string(),
        _ => String::new(),
    };

    let (first_name, middle_name, surname) = match parts.as_slice() {
        [] => (String::new(), String::new(), String::new()),
        [first] => (first.to_string(), String::new(), String::new()),
        [first, surname] => (first.to_string(), String::new(), surname.to_string()),
        [first, middle @ .., surname] => {
            (first.to_string(), middle.join(" "), surname.to_string())
        }
    };

    NameParts {
        title,
        first_name,
        middle_name,
        surname,
    }
}
