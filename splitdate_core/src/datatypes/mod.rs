//! # Data Types
//!
//! Server-side half of each field type: the authoritative check that runs on
//! submission whether or not the split widget ran, plus the conversions
//! between the wire string and a date.
//!
//! Each data type follows the same trio:
//!
//! - `validate(item)` - accept or reject the submitted wire string
//! - `transform(item)` - wire string to `NaiveDate` for downstream use
//! - `default_for(date)` - date back to the wire string for prefilling
//!
//! ## Available Data Types
//!
//! - [`three_parts`] - any calendar date (`ALThreePartsDateTestValidation`, `...2`)
//! - [`birthdate`] - a date on or before today (`ALBirthDateTestValidation`, `...2`)
//! - [`demo`] - single native date input with a fixed minimum (`altestvalidation`, `altestvalidationsimple`)
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use splitdate_core::datatypes::DataTypeRegistry;
//!
//! let registry = DataTypeRegistry::with_builtin();
//! let birthdate = registry.get("ALBirthDateTestValidation2").unwrap();
//! let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
//!
//! assert!(birthdate.validate("04/01/1990", today).is_ok());
//! let err = birthdate.validate("5//1990", today).unwrap_err();
//! assert_eq!(err.to_string(), "Enter a day");
//! ```

pub mod birthdate;
pub mod demo;
pub mod three_parts;

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use crate::config::DateKind;
use crate::errors::{DateError, DateResult};
use crate::parts::DatePart;

pub use birthdate::BirthDate;
pub use demo::MinDateDemo;
pub use three_parts::ThreePartsDate;

/// Attributes the first revision of the split-date types understood
pub const REVISION_1_PARAMETERS: &[&str] = &["almin", "almax", "alminmessage", "almaxmessage"];

/// Attributes the second revision of the split-date types understands
pub const REVISION_2_PARAMETERS: &[&str] = &[
    "min",
    "max",
    "alMin",
    "alMinMessage",
    "alMax",
    "alMaxMessage",
    "alInvalidDayMessage",
    "alInvalidYearMessage",
    "alDefaultMessage",
];

/// A named field type the form can ask for.
pub trait DataType: Send + Sync {
    /// Name used in the form definition's `datatype`
    fn name(&self) -> &str;

    /// Input type the field renders with
    fn input_type(&self) -> &str {
        self.name()
    }

    /// Fallback message for an invalid answer
    fn jq_message(&self) -> &str;

    /// Attribute names this type reads from the field
    fn parameters(&self) -> &[&'static str];

    /// Split widget flavour, or `None` for single-input types
    fn widget_kind(&self) -> Option<DateKind>;

    /// Accept or reject a submitted wire string. `today` is the reference
    /// date for anything relative to now.
    fn validate(&self, item: &str, today: NaiveDate) -> DateResult<()>;

    /// Convert a wire string into a date; empty input gives `None`.
    fn transform(&self, item: &str) -> DateResult<Option<NaiveDate>>;

    /// Format a date for prefilling the field; `None` gives `""`.
    fn default_for(&self, value: Option<NaiveDate>) -> String;
}

/// Diagnose a `/`-separated value that does not look like a wire date.
///
/// Returns `None` when all three parts are present (the caller decides what
/// a complete-but-malformed value means). `invalid` builds the generic
/// message from the item.
pub fn check_empty_parts(item: &str, invalid: impl Fn(&str) -> String) -> Option<DateError> {
    let pieces: Vec<&str> = item.split('/').collect();
    if pieces.len() != 3 {
        return Some(DateError::malformed(item, invalid(item)));
    }

    let missing: Vec<DatePart> = DatePart::ALL
        .into_iter()
        .zip(&pieces)
        .filter(|(_, piece)| piece.is_empty())
        .map(|(part, _)| part)
        .collect();

    let message = match missing.as_slice() {
        [] => return None,
        [DatePart::Month, DatePart::Day, DatePart::Year] => "Enter a month, a day, and a year",
        // Only one part was given
        [DatePart::Day, DatePart::Year] => "Enter a day and a year",
        [DatePart::Month, DatePart::Year] => "Enter a month and a year",
        [DatePart::Month, DatePart::Day] => "Enter a month and a day",
        // Only one part is missing
        [DatePart::Month] => "Enter a month",
        [DatePart::Day] => "Enter a day",
        [DatePart::Year] => "Enter a year",
        _ => return Some(DateError::malformed(item, invalid(item))),
    };
    Some(DateError::incomplete(missing, message))
}

/// All data types known to a form, keyed by name.
#[derive(Default, Clone)]
pub struct DataTypeRegistry {
    types: BTreeMap<String, Arc<dyn DataType>>,
}

impl DataTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding both split-date revisions, both birthdate revisions
    /// and the two demo types.
    pub fn with_builtin() -> Self {
        let mut registry = DataTypeRegistry::new();
        let builtin: Vec<Arc<dyn DataType>> = vec![
            Arc::new(ThreePartsDate::revision_1()),
            Arc::new(ThreePartsDate::revision_2()),
            Arc::new(BirthDate::revision_1()),
            Arc::new(BirthDate::revision_2()),
            Arc::new(MinDateDemo::with_custom_rule()),
            Arc::new(MinDateDemo::simple()),
        ];
        for data_type in builtin {
            let name = data_type.name().to_string();
            let registered = registry.register(data_type);
            debug_assert!(registered.is_ok(), "built-in data type {name} registered twice");
        }
        registry
    }

    /// Add a data type.
    ///
    /// # Errors
    ///
    /// `DateError::DuplicateDataType` if the name is taken.
    pub fn register(&mut self, data_type: Arc<dyn DataType>) -> DateResult<()> {
        let name = data_type.name().to_string();
        if self.types.contains_key(&name) {
            return Err(DateError::DuplicateDataType { name });
        }
        debug!(%name, "registered data type");
        self.types.insert(name, data_type);
        Ok(())
    }

    /// Look up a data type by name.
    pub fn get(&self, name: &str) -> DateResult<&Arc<dyn DataType>> {
        self.types
            .get(name)
            .ok_or_else(|| DateError::UnknownDataType { name: name.to_string() })
    }

    pub fn names(&self) -> Vec<&str> {
        self.types.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn DataType>> {
        self.types.values()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generic(item: &str) -> String {
        format!("{} is not a valid date", item)
    }

    fn message(item: &str) -> Option<String> {
        check_empty_parts(item, generic).map(|e| e.to_string())
    }

    #[test]
    fn test_wrong_part_count_is_generic() {
        assert_eq!(message("5/2000").as_deref(), Some("5/2000 is not a valid date"));
        assert_eq!(message("1/2/3/4").as_deref(), Some("1/2/3/4 is not a valid date"));
        assert_eq!(message("tomorrow").as_deref(), Some("tomorrow is not a valid date"));
    }

    #[test]
    fn test_all_empty() {
        assert_eq!(message("//").as_deref(), Some("Enter a month, a day, and a year"));
    }

    #[test]
    fn test_one_part_given() {
        assert_eq!(message("5//").as_deref(), Some("Enter a day and a year"));
        assert_eq!(message("/5/").as_deref(), Some("Enter a month and a year"));
        assert_eq!(message("//2000").as_deref(), Some("Enter a month and a day"));
    }

    #[test]
    fn test_one_part_missing() {
        assert_eq!(message("/5/2000").as_deref(), Some("Enter a month"));
        assert_eq!(message("5//2000").as_deref(), Some("Enter a day"));
        assert_eq!(message("5/5/").as_deref(), Some("Enter a year"));
    }

    #[test]
    fn test_missing_parts_recorded() {
        match check_empty_parts("5//", generic) {
            Some(DateError::Incomplete { missing, .. }) => {
                assert_eq!(missing, vec![DatePart::Day, DatePart::Year]);
            }
            other => panic!("expected Incomplete, got {:?}", other),
        }
    }

    #[test]
    fn test_complete_parts_left_to_caller() {
        assert!(check_empty_parts("ab/cd/efgh", generic).is_none());
    }

    #[test]
    fn test_builtin_registry() {
        let registry = DataTypeRegistry::with_builtin();
        assert_eq!(registry.len(), 6);
        assert!(registry.get("ALThreePartsDateTestValidation").is_ok());
        assert!(registry.get("ALThreePartsDateTestValidation2").is_ok());
        assert!(registry.get("ALBirthDateTestValidation").is_ok());
        assert!(registry.get("ALBirthDateTestValidation2").is_ok());
        assert!(registry.get("altestvalidation").is_ok());
        assert!(registry.get("altestvalidationsimple").is_ok());
    }

    #[test]
    fn test_unknown_and_duplicate() {
        let mut registry = DataTypeRegistry::with_builtin();
        let err = registry.get("nope").err().unwrap();
        assert_eq!(err.error_code(), "UNKNOWN_DATA_TYPE");

        let err = registry.register(Arc::new(ThreePartsDate::revision_2())).unwrap_err();
        assert_eq!(err.error_code(), "DUPLICATE_DATA_TYPE");
    }
}
