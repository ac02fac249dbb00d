//! Any calendar date entered through the split widget.

use chrono::NaiveDate;

use super::{check_empty_parts, DataType, REVISION_1_PARAMETERS, REVISION_2_PARAMETERS};
use crate::config::DateKind;
use crate::errors::{DateError, DateResult};
use crate::wire::{format_wire, matches_wire_pattern, parse_wire};

/// Generic message for a value that is not a date at all
pub fn not_a_valid_date(item: &str) -> String {
    format!("{} is not a valid date", item)
}

/// Split-date field holding any real calendar date.
#[derive(Debug, Clone)]
pub struct ThreePartsDate {
    name: &'static str,
    parameters: &'static [&'static str],
}

impl ThreePartsDate {
    pub fn revision_1() -> Self {
        ThreePartsDate {
            name: "ALThreePartsDateTestValidation",
            parameters: REVISION_1_PARAMETERS,
        }
    }

    pub fn revision_2() -> Self {
        ThreePartsDate {
            name: "ALThreePartsDateTestValidation2",
            parameters: REVISION_2_PARAMETERS,
        }
    }
}

/// Shared pattern-then-parse check of the split-date types. Returns the
/// parsed date for well-formed input, `None` for `""`.
pub(crate) fn validate_wire(item: &str, invalid: fn(&str) -> String) -> DateResult<Option<NaiveDate>> {
    if item.is_empty() {
        return Ok(None);
    }
    if matches_wire_pattern(item) {
        return parse_wire(item).map(Some).ok_or_else(|| {
            if day_fits_no_month(item) {
                DateError::calendar_overflow(item, not_a_valid_date(item))
            } else {
                DateError::malformed(item, not_a_valid_date(item))
            }
        });
    }
    match check_empty_parts(item, invalid) {
        Some(err) => Err(err),
        // Three parts, none empty, still not M/D/YYYY
        None => Err(DateError::malformed(item, invalid(item))),
    }
}

/// Month 1-12 and day 1-31 that still failed to parse: the day is past the
/// end of that month.
fn day_fits_no_month(item: &str) -> bool {
    let mut fields = item.split('/').map(str::parse::<u32>);
    matches!(
        (fields.next(), fields.next()),
        (Some(Ok(month)), Some(Ok(day))) if (1..=12).contains(&month) && (1..=31).contains(&day)
    )
}

/// Wire string to date, shared by the split-date types.
pub(crate) fn transform_wire(item: &str) -> DateResult<Option<NaiveDate>> {
    if item.is_empty() {
        return Ok(None);
    }
    parse_wire(item)
        .map(Some)
        .ok_or_else(|| DateError::malformed(item, not_a_valid_date(item)))
}

impl DataType for ThreePartsDate {
    fn name(&self) -> &str {
        self.name
    }

    fn jq_message(&self) -> &str {
        "Answer with a valid date"
    }

    fn parameters(&self) -> &[&'static str] {
        self.parameters
    }

    fn widget_kind(&self) -> Option<DateKind> {
        Some(DateKind::Plain)
    }

    fn validate(&self, item: &str, _today: NaiveDate) -> DateResult<()> {
        validate_wire(item, not_a_valid_date).map(|_| ())
    }

    fn transform(&self, item: &str) -> DateResult<Option<NaiveDate>> {
        transform_wire(item)
    }

    fn default_for(&self, value: Option<NaiveDate>) -> String {
        value.map(format_wire).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn error(item: &str) -> String {
        ThreePartsDate::revision_2()
            .validate(item, today())
            .unwrap_err()
            .to_string()
    }

    #[test]
    fn test_empty_is_valid() {
        assert!(ThreePartsDate::revision_2().validate("", today()).is_ok());
    }

    #[test]
    fn test_real_dates_are_valid() {
        let dt = ThreePartsDate::revision_2();
        for item in ["1/1/2000", "02/29/2024", "12/31/1999", "7/04/2100", "10/1/1066"] {
            assert!(dt.validate(item, today()).is_ok(), "{} should be valid", item);
        }
    }

    #[test]
    fn test_future_dates_are_fine_for_plain_dates() {
        assert!(ThreePartsDate::revision_1().validate("1/1/2999", today()).is_ok());
    }

    #[test]
    fn test_pattern_match_but_not_a_date() {
        assert_eq!(error("02/30/2023"), "02/30/2023 is not a valid date");
        assert_eq!(error("13/01/2023"), "13/01/2023 is not a valid date");

        let dt = ThreePartsDate::revision_2();
        assert_eq!(dt.validate("02/30/2023", today()).unwrap_err().error_code(), "CALENDAR_OVERFLOW");
        assert_eq!(dt.validate("13/01/2023", today()).unwrap_err().error_code(), "MALFORMED_DATE");
    }

    #[test]
    fn test_wrong_part_count() {
        assert_eq!(error("2023"), "2023 is not a valid date");
        assert_eq!(error("1/2"), "1/2 is not a valid date");
    }

    #[test]
    fn test_incomplete_enumeration() {
        assert_eq!(error("//"), "Enter a month, a day, and a year");
        assert_eq!(error("5//"), "Enter a day and a year");
        assert_eq!(error("/5/"), "Enter a month and a year");
        assert_eq!(error("//2000"), "Enter a month and a day");
        assert_eq!(error("/5/2000"), "Enter a month");
        assert_eq!(error("5//2000"), "Enter a day");
        assert_eq!(error("5/5/"), "Enter a year");
    }

    #[test]
    fn test_complete_but_malformed() {
        assert_eq!(error("1/2/99"), "1/2/99 is not a valid date");
        let err = ThreePartsDate::revision_2().validate("a/b/c", today()).unwrap_err();
        assert_eq!(err.error_code(), "MALFORMED_DATE");
    }

    #[test]
    fn test_transform_and_default_for() {
        let dt = ThreePartsDate::revision_2();
        let date = dt.transform("3/9/2021").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2021, 3, 9));
        assert_eq!(dt.default_for(date), "03/09/2021");
        assert_eq!(dt.transform("").unwrap(), None);
        assert_eq!(dt.default_for(None), "");
        assert!(dt.transform("3/9").is_err());
    }

    #[test]
    fn test_year_zero_is_not_a_date() {
        let dt = ThreePartsDate::revision_2();
        assert_eq!(error("01/01/0000"), "01/01/0000 is not a valid date");
        assert_eq!(error("02/29/0000"), "02/29/0000 is not a valid date");
        assert!(dt.transform("02/29/0000").is_err());
    }

    #[test]
    fn test_every_day_validates_and_round_trips() {
        let dt = ThreePartsDate::revision_2();
        let start = NaiveDate::from_ymd_opt(1999, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2004, 12, 31).unwrap();
        for date in start.iter_days().take_while(|date| *date <= end) {
            let padded = format_wire(date);
            let unpadded = format!("{}/{}/{}", date.month(), date.day(), date.year());
            for item in [padded, unpadded] {
                assert!(dt.validate(&item, today()).is_ok(), "{} should be valid", item);
                let parsed = dt.transform(&item).unwrap();
                assert_eq!(parsed, Some(date));
                assert_eq!(dt.transform(&dt.default_for(parsed)).unwrap(), parsed);
            }
        }
    }

    #[test]
    fn test_round_trip_keeps_calendar_date() {
        let dt = ThreePartsDate::revision_2();
        for item in ["1/2/2003", "11/30/1999", "02/29/2000"] {
            let date = dt.transform(item).unwrap();
            let again = dt.transform(&dt.default_for(date)).unwrap();
            assert_eq!(date, again);
        }
    }

    #[test]
    fn test_revisions_differ_in_name_and_parameters() {
        let r1 = ThreePartsDate::revision_1();
        let r2 = ThreePartsDate::revision_2();
        assert_eq!(r1.name(), "ALThreePartsDateTestValidation");
        assert_eq!(r2.input_type(), "ALThreePartsDateTestValidation2");
        assert!(r1.parameters().contains(&"almin"));
        assert!(r2.parameters().contains(&"alInvalidDayMessage"));
    }
}
