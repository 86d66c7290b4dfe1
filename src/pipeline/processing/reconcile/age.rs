use chrono::{Datelike, NaiveDate};

use crate::pipeline::processing::parser::fields::leading_int;

/// Whole years between a `DD/MM/YYYY` birth date and the reference date.
///
/// Each component is read as a leading integer, so calendar validity is not
/// checked. Returns `None` when any component is missing or the year is too
/// far out to subtract. The result may be negative for birth dates after the
/// reference date.
pub fn age_at(date_of_birth: &str, reference: NaiveDate) -> Option<i64> {
    let mut parts = date_of_birth.split('/').map(leading_int);
    let day = parts.next()??;
    let month = parts.next()??;
    let year = parts.next()??;

    let ref_month = i64::from(reference.month());
    let ref_day = i64::from(reference.day());

    let age = i64::from(reference.year()).checked_sub(year)?;
    if ref_month < month || (ref_month == month && ref_day < day) {
        return age.checked_sub(1);
    }
    Some(age)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 26).unwrap()
    }

    #[test]
    fn birthday_on_reference_date() {
        assert_eq!(age_at("26/01/2000", reference()), Some(24));
    }

    #[test]
    fn birthday_after_reference_date() {
        assert_eq!(age_at("27/01/2000", reference()), Some(23));
        assert_eq!(age_at("01/02/2000", reference()), Some(23));
    }

    #[test]
    fn birthday_before_reference_date() {
        assert_eq!(age_at("25/01/2000", reference()), Some(24));
        assert_eq!(age_at("31/12/1999", reference()), Some(24));
    }

    #[test]
    fn future_birth_is_negative() {
        assert_eq!(age_at("01/06/2030", reference()), Some(-7));
    }

    #[test]
    fn missing_components() {
        assert_eq!(age_at("", reference()), None);
        assert_eq!(age_at("26/01", reference()), None);
        assert_eq!(age_at("5 March 90", reference()), None);
    }

    #[test]
    fn extreme_years_do_not_overflow() {
        assert_eq!(age_at("1/1/-9223372036854775807", reference()), None);
        assert_eq!(age_at("1/1/-9223372036854775808", reference()), None);
        assert_eq!(age_at("27/01/-9223372036854773785", reference()), None);
        assert_eq!(age_at("26/01/-9223372036854773783", reference()), Some(i64::MAX));
    }
}
