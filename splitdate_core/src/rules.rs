//! # Split-Date Rules
//!
//! The individual checks a split-date field runs on every change. Each rule
//! closes over the field's immutable [`WidgetConfig`] and looks only at the
//! current [`DateParts`] and today's date.
//!
//! | Rule | Fires when | Placement |
//! |------|------------|-----------|
//! | [`RequiredRule`] | field is required and a sub-field is empty | the empty sub-fields |
//! | [`DayOverflowRule`] | day > 31, or the day rolls over its month | group |
//! | [`YearFormatRule`] | year is not 4 digits, or starts with `0` | group |
//! | [`MinRule`] | complete date before the minimum | group |
//! | [`MaxRule`] | complete date after the maximum (birthdates: after today) | group |
//!
//! Incomplete input only ever trips [`RequiredRule`].

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::WidgetConfig;
use crate::parts::{month_name, DatePart, DateParts};

/// Year used for the day-overflow trial date when no year is entered yet.
/// A leap year, so February 29 is accepted until the year says otherwise.
pub const TRIAL_YEAR: i32 = 2000;

/// Built-in message for an empty required sub-field
pub const REQUIRED_MESSAGE: &str = "This field is required.";

/// Built-in message for a malformed year
pub const INVALID_YEAR_MESSAGE: &str = "The year needs to be 4 digits long and cannot start with \"0\".";

/// Built-in max message for a birthdate with no explicit max
pub const BIRTHDATE_MAX_MESSAGE: &str = "A birthdate must be in the past.";

// ============================================================================
// Rule identity and results
// ============================================================================

/// Identifies a rule within a group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleId {
    Required,
    InvalidDay,
    InvalidYear,
    Min,
    Max,
    /// A rule added by the form author
    Custom(String),
}

impl RuleId {
    /// Ordering used when several rules fail at once (lower first).
    pub fn precedence(&self) -> u8 {
        match self {
            RuleId::Required => 0,
            RuleId::InvalidDay => 1,
            RuleId::InvalidYear => 2,
            RuleId::Min | RuleId::Max => 3,
            RuleId::Custom(_) => 4,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            RuleId::Required => "required",
            RuleId::InvalidDay => "_alInvalidDay",
            RuleId::InvalidYear => "_alInvalidYear",
            RuleId::Min => "alMin",
            RuleId::Max => "alMax",
            RuleId::Custom(name) => name,
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Where a failure is shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    /// The whole field group (border around all three sub-fields)
    Group,
    /// Only these sub-fields
    Parts(Vec<DatePart>),
}

/// A rule that did not pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleFailure {
    pub rule: RuleId,
    pub message: String,
    pub placement: Placement,
}

impl RuleFailure {
    pub fn group(rule: RuleId, message: impl Into<String>) -> Self {
        RuleFailure {
            rule,
            message: message.into(),
            placement: Placement::Group,
        }
    }
}

/// A single check against a split-date triple.
pub trait DateRule: Send + Sync {
    fn id(&self) -> RuleId;

    /// `None` when the parts pass.
    fn check(&self, parts: &DateParts, today: NaiveDate) -> Option<RuleFailure>;
}

// ============================================================================
// Calendar helpers
// ============================================================================

/// Parse a sub-field that must be a plain non-negative integer.
pub fn parse_number(text: &str) -> Option<u32> {
    if text.is_empty() || text.len() > 9 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// True if the day can exist.
///
/// An empty day passes. A day over 31 fails on its own. Otherwise the day is
/// tried against the entered month and year, substituting January and
/// [`TRIAL_YEAR`] for whichever is still empty, and fails if the date would
/// roll over (February 31 becoming March 3).
pub fn has_valid_day(parts: &DateParts) -> bool {
    if parts.day.is_empty() {
        return true;
    }
    let Some(day) = parse_number(&parts.day) else {
        return false;
    };
    if day > 31 {
        return false;
    }
    let month = if parts.month.is_empty() {
        1
    } else {
        match parse_number(&parts.month) {
            Some(month) => month,
            None => return false,
        }
    };
    let year = parse_number(&parts.year)
        .and_then(|year| i32::try_from(year).ok())
        .unwrap_or(TRIAL_YEAR);
    NaiveDate::from_ymd_opt(year, month, day).is_some()
}

/// True if the year is empty or four digits without a leading zero.
pub fn has_valid_year(year: &str) -> bool {
    if year.is_empty() {
        return true;
    }
    year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit()) && !year.starts_with('0')
}

/// The entered date, if it is complete and real enough to compare against
/// min/max. Partial dates, malformed years and overflowing days all give
/// `None`.
pub fn date_ready_for_range(parts: &DateParts) -> Option<NaiveDate> {
    if !parts.is_complete() || !has_valid_year(&parts.year) {
        return None;
    }
    let year = i32::try_from(parse_number(&parts.year)?).ok()?;
    let month = parse_number(&parts.month)?;
    let day = parse_number(&parts.day)?;
    NaiveDate::from_ymd_opt(year, month, day)
}

// ============================================================================
// Built-in rules
// ============================================================================

/// Every sub-field must be filled in when the field is required.
pub struct RequiredRule {
    config: Arc<WidgetConfig>,
}

impl RequiredRule {
    pub fn new(config: Arc<WidgetConfig>) -> Self {
        RequiredRule { config }
    }
}

impl DateRule for RequiredRule {
    fn id(&self) -> RuleId {
        RuleId::Required
    }

    fn check(&self, parts: &DateParts, _today: NaiveDate) -> Option<RuleFailure> {
        if !self.config.required {
            return None;
        }
        let missing = parts.empty_parts();
        if missing.is_empty() {
            return None;
        }
        let message = self
            .config
            .messages
            .required
            .clone()
            .unwrap_or_else(|| REQUIRED_MESSAGE.to_string());
        Some(RuleFailure {
            rule: RuleId::Required,
            message,
            placement: Placement::Parts(missing),
        })
    }
}

/// The day must exist in the entered (or assumed) month.
pub struct DayOverflowRule {
    config: Arc<WidgetConfig>,
}

impl DayOverflowRule {
    pub fn new(config: Arc<WidgetConfig>) -> Self {
        DayOverflowRule { config }
    }

    fn default_message(parts: &DateParts) -> String {
        match (month_name(&parts.month), parts.year.is_empty()) {
            (None, _) => format!("No month has {} days.", parts.day),
            (Some(month), true) => format!("{} doesn't have {} days.", month, parts.day),
            (Some(month), false) => {
                format!("{} {} doesn't have {} days.", month, parts.year, parts.day)
            }
        }
    }
}

impl DateRule for DayOverflowRule {
    fn id(&self) -> RuleId {
        RuleId::InvalidDay
    }

    fn check(&self, parts: &DateParts, _today: NaiveDate) -> Option<RuleFailure> {
        if has_valid_day(parts) {
            return None;
        }
        let messages = &self.config.messages;
        let message = messages.resolve(&messages.invalid_day, || Self::default_message(parts));
        Some(RuleFailure::group(RuleId::InvalidDay, message))
    }
}

/// The year must be empty or four digits without a leading zero.
pub struct YearFormatRule {
    config: Arc<WidgetConfig>,
}

impl YearFormatRule {
    pub fn new(config: Arc<WidgetConfig>) -> Self {
        YearFormatRule { config }
    }
}

impl DateRule for YearFormatRule {
    fn id(&self) -> RuleId {
        RuleId::InvalidYear
    }

    fn check(&self, parts: &DateParts, _today: NaiveDate) -> Option<RuleFailure> {
        if has_valid_year(&parts.year) {
            return None;
        }
        let messages = &self.config.messages;
        let message = messages.resolve(&messages.invalid_year, || INVALID_YEAR_MESSAGE.to_string());
        Some(RuleFailure::group(RuleId::InvalidYear, message))
    }
}

/// A complete date must not be earlier than the configured minimum.
pub struct MinRule {
    config: Arc<WidgetConfig>,
}

impl MinRule {
    pub fn new(config: Arc<WidgetConfig>) -> Self {
        MinRule { config }
    }
}

impl DateRule for MinRule {
    fn id(&self) -> RuleId {
        RuleId::Min
    }

    fn check(&self, parts: &DateParts, _today: NaiveDate) -> Option<RuleFailure> {
        let min = self.config.min.as_ref()?;
        let date = date_ready_for_range(parts)?;
        if date >= min.date {
            return None;
        }
        let messages = &self.config.messages;
        let message = messages.resolve(&messages.min, || {
            format!("The date needs to be on or after {}.", min.raw)
        });
        Some(RuleFailure::group(RuleId::Min, message))
    }
}

/// A complete date must not be later than the configured maximum. Birthdates
/// without an explicit maximum are capped at today.
pub struct MaxRule {
    config: Arc<WidgetConfig>,
}

impl MaxRule {
    pub fn new(config: Arc<WidgetConfig>) -> Self {
        MaxRule { config }
    }

    /// Effective maximum for `today`, if any.
    pub fn limit(&self, today: NaiveDate) -> Option<NaiveDate> {
        match &self.config.max {
            Some(max) => Some(max.date),
            None if self.config.is_birthdate() => Some(today),
            None => None,
        }
    }
}

impl DateRule for MaxRule {
    fn id(&self) -> RuleId {
        RuleId::Max
    }

    fn check(&self, parts: &DateParts, today: NaiveDate) -> Option<RuleFailure> {
        let limit = self.limit(today)?;
        let date = date_ready_for_range(parts)?;
        if date <= limit {
            return None;
        }
        let messages = &self.config.messages;
        let message = messages.resolve(&messages.max, || match &self.config.max {
            Some(max) => format!("The date needs to be on or before {}.", max.raw),
            None => BIRTHDATE_MAX_MESSAGE.to_string(),
        });
        Some(RuleFailure::group(RuleId::Max, message))
    }
}

/// A rule backed by a closure, for checks a form author attaches to a group.
pub struct CustomRule {
    name: String,
    check: Box<dyn Fn(&DateParts, NaiveDate) -> Option<String> + Send + Sync>,
}

impl CustomRule {
    /// `check` returns the failure message, or `None` when the parts pass.
    pub fn new(
        name: impl Into<String>,
        check: impl Fn(&DateParts, NaiveDate) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        CustomRule {
            name: name.into(),
            check: Box::new(check),
        }
    }
}

impl DateRule for CustomRule {
    fn id(&self) -> RuleId {
        RuleId::Custom(self.name.clone())
    }

    fn check(&self, parts: &DateParts, today: NaiveDate) -> Option<RuleFailure> {
        (self.check)(parts, today).map(|message| RuleFailure::group(self.id(), message))
    }
}

/// The five built-in rules for a field, in precedence order.
pub fn default_rules(config: &Arc<WidgetConfig>) -> Vec<Box<dyn DateRule>> {
    vec![
        Box::new(RequiredRule::new(Arc::clone(config))),
        Box::new(DayOverflowRule::new(Arc::clone(config))),
        Box::new(YearFormatRule::new(Arc::clone(config))),
        Box::new(MinRule::new(Arc::clone(config))),
        Box::new(MaxRule::new(Arc::clone(config))),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DateKind, FieldAttributes};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn config(kind: DateKind, attrs: FieldAttributes) -> Arc<WidgetConfig> {
        Arc::new(WidgetConfig::from_attributes("d", "d", kind, &attrs).unwrap())
    }

    fn plain() -> Arc<WidgetConfig> {
        config(DateKind::Plain, FieldAttributes::new())
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("007"), Some(7));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("-1"), None);
        assert_eq!(parse_number("1e3"), None);
    }

    #[test]
    fn test_day_over_31_fails_alone() {
        assert!(!has_valid_day(&DateParts::new("", "32", "")));
        assert!(has_valid_day(&DateParts::new("", "31", "")));
    }

    #[test]
    fn test_day_rollover_detected() {
        assert!(!has_valid_day(&DateParts::new("02", "31", "2001")));
        assert!(has_valid_day(&DateParts::new("02", "28", "2001")));
        assert!(!has_valid_day(&DateParts::new("02", "29", "2001")));
        assert!(has_valid_day(&DateParts::new("02", "29", "2004")));
        assert!(!has_valid_day(&DateParts::new("04", "31", "")));
        assert!(!has_valid_day(&DateParts::new("", "0", "")));
    }

    #[test]
    fn test_missing_year_uses_leap_trial_year() {
        assert!(has_valid_day(&DateParts::new("02", "29", "")));
        assert!(!has_valid_day(&DateParts::new("02", "30", "")));
    }

    #[test]
    fn test_year_format() {
        assert!(has_valid_year(""));
        assert!(has_valid_year("2023"));
        assert!(!has_valid_year("202"));
        assert!(!has_valid_year("0202"));
        assert!(!has_valid_year("20233"));
        assert!(!has_valid_year("20a3"));
    }

    #[test]
    fn test_range_readiness() {
        assert!(date_ready_for_range(&DateParts::new("02", "", "2001")).is_none());
        assert!(date_ready_for_range(&DateParts::new("02", "31", "2001")).is_none());
        assert!(date_ready_for_range(&DateParts::new("02", "3", "201")).is_none());
        assert_eq!(
            date_ready_for_range(&DateParts::new("02", "3", "2001")),
            NaiveDate::from_ymd_opt(2001, 2, 3)
        );
    }

    #[test]
    fn test_required_flags_only_empty_parts() {
        let cfg = Arc::new(WidgetConfig::clone(&plain()).required(true));
        let rule = RequiredRule::new(cfg);
        let failure = rule.check(&DateParts::new("03", "", ""), today()).unwrap();
        assert_eq!(failure.placement, Placement::Parts(vec![DatePart::Day, DatePart::Year]));
        assert_eq!(failure.message, REQUIRED_MESSAGE);
        assert!(rule.check(&DateParts::new("03", "1", "2000"), today()).is_none());
    }

    #[test]
    fn test_required_ignored_when_optional() {
        let rule = RequiredRule::new(plain());
        assert!(rule.check(&DateParts::default(), today()).is_none());
    }

    #[test]
    fn test_day_overflow_messages() {
        let rule = DayOverflowRule::new(plain());
        let full = rule.check(&DateParts::new("02", "31", "2001"), today()).unwrap();
        assert_eq!(full.message, "February 2001 doesn't have 31 days.");
        assert_eq!(full.placement, Placement::Group);

        let no_month = rule.check(&DateParts::new("", "40", "2001"), today()).unwrap();
        assert_eq!(no_month.message, "No month has 40 days.");

        let no_year = rule.check(&DateParts::new("04", "31", ""), today()).unwrap();
        assert_eq!(no_year.message, "April doesn't have 31 days.");
    }

    #[test]
    fn test_day_overflow_custom_message() {
        let cfg = config(
            DateKind::Plain,
            FieldAttributes::new().with("alDefaultMessage", "Check the date"),
        );
        let rule = DayOverflowRule::new(cfg);
        let failure = rule.check(&DateParts::new("02", "31", "2001"), today()).unwrap();
        assert_eq!(failure.message, "Check the date");
    }

    #[test]
    fn test_year_rule() {
        let rule = YearFormatRule::new(plain());
        assert!(rule.check(&DateParts::new("", "", "202"), today()).is_some());
        assert!(rule.check(&DateParts::new("", "", "2023"), today()).is_none());
        assert_eq!(
            rule.check(&DateParts::new("", "", "0999"), today()).unwrap().message,
            INVALID_YEAR_MESSAGE
        );
    }

    #[test]
    fn test_min_rule() {
        let cfg = config(DateKind::Plain, FieldAttributes::new().with("alMin", "2030-01-01"));
        let rule = MinRule::new(cfg);
        let failure = rule.check(&DateParts::new("06", "15", "2020"), today()).unwrap();
        assert_eq!(failure.message, "The date needs to be on or after 2030-01-01.");
        assert!(rule.check(&DateParts::new("06", "", "2020"), today()).is_none());
        assert!(rule.check(&DateParts::new("01", "1", "2030"), today()).is_none());
    }

    #[test]
    fn test_max_rule() {
        let cfg = config(
            DateKind::Plain,
            FieldAttributes::new().with("alMax", "1/1/2000").with("alMaxMessage", "Too late"),
        );
        let rule = MaxRule::new(cfg);
        assert_eq!(
            rule.check(&DateParts::new("01", "2", "2000"), today()).unwrap().message,
            "Too late"
        );
        assert!(rule.check(&DateParts::new("01", "1", "2000"), today()).is_none());
    }

    #[test]
    fn test_plain_field_without_max_never_fails_max() {
        let rule = MaxRule::new(plain());
        assert!(rule.check(&DateParts::new("01", "1", "9999"), today()).is_none());
    }

    #[test]
    fn test_birthdate_defaults_max_to_today() {
        let rule = MaxRule::new(config(DateKind::Birthdate, FieldAttributes::new()));
        assert!(rule.check(&DateParts::new("10", "18", "2026"), today()).is_none());
        let failure = rule.check(&DateParts::new("10", "19", "2026"), today()).unwrap();
        assert_eq!(failure.message, BIRTHDATE_MAX_MESSAGE);
    }

    #[test]
    fn test_birthdate_explicit_max_wins() {
        let cfg = config(DateKind::Birthdate, FieldAttributes::new().with("alMax", "2010-01-01"));
        let rule = MaxRule::new(cfg);
        let failure = rule.check(&DateParts::new("06", "1", "2015"), today()).unwrap();
        assert_eq!(failure.message, "The date needs to be on or before 2010-01-01.");
    }

    #[test]
    fn test_custom_rule() {
        let rule = CustomRule::new("no_fridays", |parts: &DateParts, _| {
            (parts.day == "13").then(|| "Pick another day".to_string())
        });
        assert_eq!(rule.id(), RuleId::Custom("no_fridays".into()));
        assert!(rule.check(&DateParts::new("01", "13", "2000"), today()).is_some());
        assert!(rule.check(&DateParts::new("01", "12", "2000"), today()).is_none());
    }

    #[test]
    fn test_precedence_order() {
        assert!(RuleId::Required.precedence() < RuleId::InvalidDay.precedence());
        assert!(RuleId::InvalidDay.precedence() < RuleId::InvalidYear.precedence());
        assert!(RuleId::InvalidYear.precedence() < RuleId::Min.precedence());
        assert_eq!(RuleId::Min.precedence(), RuleId::Max.precedence());
    }
}
