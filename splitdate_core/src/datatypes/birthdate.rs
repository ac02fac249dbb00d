//! Date of birth: a split date that may not be later than today.

use chrono::NaiveDate;

use super::three_parts::{transform_wire, validate_wire};
use super::{DataType, REVISION_1_PARAMETERS, REVISION_2_PARAMETERS};
use crate::config::DateKind;
use crate::errors::{DateError, DateResult, RangeBound};
use crate::wire::format_wire;

fn not_a_valid_birthdate(item: &str) -> String {
    format!("{} is not a valid date of birth", item)
}

/// Split-date field holding a date of birth.
#[derive(Debug, Clone)]
pub struct BirthDate {
    name: &'static str,
    parameters: &'static [&'static str],
}

impl BirthDate {
    pub fn revision_1() -> Self {
        BirthDate {
            name: "ALBirthDateTestValidation",
            parameters: REVISION_1_PARAMETERS,
        }
    }

    pub fn revision_2() -> Self {
        BirthDate {
            name: "ALBirthDateTestValidation2",
            parameters: REVISION_2_PARAMETERS,
        }
    }
}

impl DataType for BirthDate {
    fn name(&self) -> &str {
        self.name
    }

    fn jq_message(&self) -> &str {
        "Answer with a valid date of birth"
    }

    fn parameters(&self) -> &[&'static str] {
        self.parameters
    }

    fn widget_kind(&self) -> Option<DateKind> {
        Some(DateKind::Birthdate)
    }

    fn validate(&self, item: &str, today: NaiveDate) -> DateResult<()> {
        let Some(date) = validate_wire(item, not_a_valid_birthdate)? else {
            return Ok(());
        };
        if (today - date).num_days() >= 0 {
            Ok(())
        } else {
            Err(DateError::out_of_range(
                item,
                RangeBound::Today,
                format!("Answer with a date of birth ({} is in the future)", item),
            ))
        }
    }

    fn transform(&self, item: &str) -> DateResult<Option<NaiveDate>> {
        transform_wire(item)
    }

    fn default_for(&self, value: Option<NaiveDate>) -> String {
        value.map(format_wire).unwrap_or_default()
    }
}
