//! Minimal demo types: one native date input with a fixed minimum and,
//! optionally, an extra named rule. They show how rules attach to a data
//! type and nothing more.

use chrono::NaiveDate;

use super::DataType;
use crate::config::DateKind;
use crate::errors::{DateError, DateResult, RangeBound};
use crate::wire::ISO_FORMAT;

/// CSS class the demo inputs carry
pub const DEMO_INPUT_CLASS: &str = "da-ccc";

/// A named check attached to a demo type.
#[derive(Debug, Clone, Copy)]
pub struct DemoRule {
    pub name: &'static str,
    pub message: &'static str,
    pub check: fn(NaiveDate) -> bool,
}

fn accept_any(_: NaiveDate) -> bool {
    true
}

/// The placeholder rule; it accepts every date.
pub const DDD_RULE: DemoRule = DemoRule {
    name: "ddd",
    message: "ddd",
    check: accept_any,
};

/// Native (`YYYY-MM-DD`) date input that must be on or after `min`.
#[derive(Debug, Clone)]
pub struct MinDateDemo {
    name: &'static str,
    min: NaiveDate,
    rules: Vec<DemoRule>,
}

impl MinDateDemo {
    fn demo_min() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 2, 4).unwrap_or_default()
    }

    /// `altestvalidation`: minimum date plus the `ddd` rule
    pub fn with_custom_rule() -> Self {
        MinDateDemo {
            name: "altestvalidation",
            min: Self::demo_min(),
            rules: vec![DDD_RULE],
        }
    }

    /// `altestvalidationsimple`: minimum date only
    pub fn simple() -> Self {
        MinDateDemo {
            name: "altestvalidationsimple",
            min: Self::demo_min(),
            rules: Vec::new(),
        }
    }

    pub fn min(&self) -> NaiveDate {
        self.min
    }

    pub fn input_class(&self) -> &'static str {
        DEMO_INPUT_CLASS
    }

    /// Names of the attached rules, the minimum first
    pub fn rule_names(&self) -> Vec<&'static str> {
        std::iter::once("min")
            .chain(self.rules.iter().map(|rule| rule.name))
            .collect()
    }

    fn parse(item: &str) -> DateResult<NaiveDate> {
        NaiveDate::parse_from_str(item, ISO_FORMAT)
            .map_err(|_| DateError::malformed(item, format!("{} is not a valid date", item)))
    }
}

impl DataType for MinDateDemo {
    fn name(&self) -> &str {
        self.name
    }

    fn input_type(&self) -> &str {
        "date"
    }

    fn jq_message(&self) -> &str {
        "Answer with a valid date"
    }

    fn parameters(&self) -> &[&'static str] {
        &[]
    }

    fn widget_kind(&self) -> Option<DateKind> {
        None
    }

    fn validate(&self, item: &str, _today: NaiveDate) -> DateResult<()> {
        if item.is_empty() {
            return Ok(());
        }
        let date = Self::parse(item)?;
        if date < self.min {
            return Err(DateError::out_of_range(
                item,
                RangeBound::Min,
                format!(
                    "Please enter a value greater than or equal to {}.",
                    self.min.format(ISO_FORMAT)
                ),
            ));
        }
        match self.rules.iter().find(|rule| !(rule.check)(date)) {
            Some(rule) => Err(DateError::malformed(item, rule.message)),
            None => Ok(()),
        }
    }

    fn transform(&self, item: &str) -> DateResult<Option<NaiveDate>> {
        if item.is_empty() {
            return Ok(None);
        }
        Self::parse(item).map(Some)
    }

    fn default_for(&self, value: Option<NaiveDate>) -> String {
        value
            .map(|date| date.format(ISO_FORMAT).to_string())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[test]
    fn test_min_enforced() {
        let demo = MinDateDemo::with_custom_rule();
        assert!(demo.validate("2023-02-04", today()).is_ok());
        let err = demo.validate("2023-02-03", today()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please enter a value greater than or equal to 2023-02-04."
        );
    }

    #[test]
    fn test_iso_only() {
        let demo = MinDateDemo::simple();
        assert!(demo.validate("02/04/2023", today()).is_err());
        assert!(demo.validate("", today()).is_ok());
    }

    #[test]
    fn test_rule_attachment() {
        assert_eq!(MinDateDemo::with_custom_rule().rule_names(), vec!["min", "ddd"]);
        assert_eq!(MinDateDemo::simple().rule_names(), vec!["min"]);
        assert!(MinDateDemo::simple().widget_kind().is_none());
        assert_eq!(MinDateDemo::simple().input_class(), "da-ccc");
    }

    #[test]
    fn test_round_trip() {
        let demo = MinDateDemo::simple();
        let date = demo.transform("2024-05-06").unwrap();
        assert_eq!(demo.default_for(date), "2024-05-06");
    }
}
