//! # Field Configuration
//!
//! Every split-date field is configured from a handful of data-* style
//! attributes (`alMin`, `alMaxMessage`, ...). They are read exactly once,
//! when the widget is built, into an immutable [`WidgetConfig`] that the
//! field's rules close over.
//!
//! ## Example
//!
//! ```rust
//! use splitdate_core::config::{DateKind, FieldAttributes, WidgetConfig};
//!
//! let attrs = FieldAttributes::new()
//!     .with("alMin", "2000-01-01")
//!     .with("alMinMessage", "Too early");
//! let config = WidgetConfig::from_attributes("start", "start_date", DateKind::Plain, &attrs).unwrap();
//!
//! assert_eq!(config.min.as_ref().unwrap().raw, "2000-01-01");
//! assert_eq!(config.messages.min.as_deref(), Some("Too early"));
//! ```

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{DateError, DateResult};
use crate::wire::parse_bound;

/// Attribute names understood by [`WidgetConfig::from_attributes`].
pub mod attr {
    pub const REQUIRED: &str = "required";
    pub const MIN: &str = "min";
    pub const AL_MIN: &str = "alMin";
    pub const MAX: &str = "max";
    pub const AL_MAX: &str = "alMax";
    pub const MIN_MESSAGE: &str = "alMinMessage";
    pub const MAX_MESSAGE: &str = "alMaxMessage";
    pub const INVALID_DAY_MESSAGE: &str = "alInvalidDayMessage";
    pub const INVALID_YEAR_MESSAGE: &str = "alInvalidYearMessage";
    pub const DEFAULT_MESSAGE: &str = "alDefaultMessage";
    pub const REQUIRED_MESSAGE: &str = "alRequiredMessage";
}

/// Which flavour of split date a field is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateKind {
    /// Any calendar date
    Plain,
    /// A date of birth; capped at today unless an explicit max is given
    Birthdate,
}

/// Case-insensitive attribute map as written on the original field.
///
/// Keys are stored lowercased, so `alMin`, `almin` and `ALMIN` are the same
/// attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct FieldAttributes {
    values: BTreeMap<String, String>,
}

impl FieldAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_ascii_lowercase(), value.into());
    }

    /// Look up an attribute. Empty values count as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(&key.to_ascii_lowercase())
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }

    /// First present attribute among `keys`
    pub fn first_of(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|key| self.get(key))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.values.iter()
    }
}

impl From<BTreeMap<String, String>> for FieldAttributes {
    fn from(map: BTreeMap<String, String>) -> Self {
        let mut attrs = FieldAttributes::new();
        for (key, value) in map {
            attrs.insert(&key, value);
        }
        attrs
    }
}

impl From<FieldAttributes> for BTreeMap<String, String> {
    fn from(attrs: FieldAttributes) -> Self {
        attrs.values
    }
}

/// A configured min or max date. `raw` is kept for messages so the user sees
/// the bound the way the form author wrote it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateBound {
    pub date: NaiveDate,
    pub raw: String,
}

impl DateBound {
    /// Parse a bound attribute, reporting the attribute name on failure.
    pub fn parse(attribute: &str, raw: &str) -> DateResult<Self> {
        let date = parse_bound(raw).ok_or_else(|| {
            DateError::invalid_config(attribute, raw, "expected YYYY-MM-DD or MM/DD/YYYY")
        })?;
        Ok(DateBound {
            date,
            raw: raw.trim().to_string(),
        })
    }
}

/// Per-rule message overrides. A specific override wins over `default`,
/// which wins over the built-in text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageOverrides {
    pub min: Option<String>,
    pub max: Option<String>,
    pub invalid_day: Option<String>,
    pub invalid_year: Option<String>,
    pub required: Option<String>,
    pub default: Option<String>,
}

impl MessageOverrides {
    /// Resolve the message for a rule: specific override, then the default
    /// override, then `fallback`.
    pub fn resolve(&self, specific: &Option<String>, fallback: impl FnOnce() -> String) -> String {
        specific
            .clone()
            .or_else(|| self.default.clone())
            .unwrap_or_else(fallback)
    }
}

/// Immutable configuration of one split-date field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Id of the original (hidden) field; also the rule group id
    pub id: String,
    /// Name the wire value is submitted under
    pub name: String,
    pub kind: DateKind,
    pub required: bool,
    pub min: Option<DateBound>,
    pub max: Option<DateBound>,
    pub messages: MessageOverrides,
}

impl WidgetConfig {
    /// Read every supported attribute once.
    ///
    /// # Errors
    ///
    /// `DateError::InvalidConfig` if a min/max attribute is not a date.
    pub fn from_attributes(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: DateKind,
        attrs: &FieldAttributes,
    ) -> DateResult<Self> {
        let min = attrs
            .get(attr::AL_MIN)
            .map(|raw| DateBound::parse(attr::AL_MIN, raw))
            .or_else(|| attrs.get(attr::MIN).map(|raw| DateBound::parse(attr::MIN, raw)))
            .transpose()?;
        let max = attrs
            .get(attr::AL_MAX)
            .map(|raw| DateBound::parse(attr::AL_MAX, raw))
            .or_else(|| attrs.get(attr::MAX).map(|raw| DateBound::parse(attr::MAX, raw)))
            .transpose()?;

        let required = attrs
            .get(attr::REQUIRED)
            .map(|value| !matches!(value.to_ascii_lowercase().as_str(), "false" | "0" | "no"))
            .unwrap_or(false);

        let owned = |key: &str| attrs.get(key).map(str::to_string);
        let messages = MessageOverrides {
            min: owned(attr::MIN_MESSAGE),
            max: owned(attr::MAX_MESSAGE),
            invalid_day: owned(attr::INVALID_DAY_MESSAGE),
            invalid_year: owned(attr::INVALID_YEAR_MESSAGE),
            required: owned(attr::REQUIRED_MESSAGE),
            default: owned(attr::DEFAULT_MESSAGE),
        };

        Ok(WidgetConfig {
            id: id.into(),
            name: name.into(),
            kind,
            required,
            min,
            max,
            messages,
        })
    }

    /// Mark the field required (the group is flagged `darequired` by the
    /// host rather than through an attribute).
    pub fn required(mut self, required: bool) -> Self {
        self.required = self.required || required;
        self
    }

    pub fn is_birthdate(&self) -> bool {
        self.kind == DateKind::Birthdate
    }

    /// Id of a sub-field
    pub fn part_id(&self, part: crate::parts::DatePart) -> String {
        format!("{}_{}", self.id, part.suffix())
    }

    /// Id of the group error container
    pub fn error_container_id(&self) -> String {
        format!("al_{}_error", self.id)
    }
}
