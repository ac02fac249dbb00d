//! # Split Date Parts
//!
//! The month/day/year triple a split-date widget holds while it is on
//! screen. The triple is rebuilt from the wire value when the widget is
//! created and collapsed back into it on every change.
//!
//! ## Example
//!
//! ```rust
//! use splitdate_core::parts::{DatePart, DateParts};
//!
//! let mut parts = DateParts::from_wire("3/7/2011");
//! assert_eq!(parts.month, "03");
//! assert_eq!(parts.day, "7");
//!
//! parts.set(DatePart::Year, "");
//! assert_eq!(parts.to_wire(), "03/7/");
//! ```

use std::fmt;

use chrono::{Datelike, Month};
use serde::{Deserialize, Serialize};

use crate::wire::parse_wire;

/// One of the three sub-fields of a split date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DatePart {
    Month,
    Day,
    Year,
}

impl DatePart {
    /// Display order of the sub-fields
    pub const ALL: [DatePart; 3] = [DatePart::Month, DatePart::Day, DatePart::Year];

    /// Label shown above the sub-field
    pub fn label(&self) -> &'static str {
        match self {
            DatePart::Month => "Month",
            DatePart::Day => "Day",
            DatePart::Year => "Year",
        }
    }

    /// Suffix appended to the original field id for the sub-field id
    pub fn suffix(&self) -> &'static str {
        match self {
            DatePart::Month => "month",
            DatePart::Day => "day",
            DatePart::Year => "year",
        }
    }
}

impl fmt::Display for DatePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The transient month/day/year triple.
///
/// `month` is either empty or a two-digit value `"01"`..`"12"` when it
/// comes from the month picker; day and year hold whatever was typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateParts {
    pub year: String,
    pub month: String,
    pub day: String,
}

impl DateParts {
    /// Build a triple from its three raw values.
    pub fn new(month: impl Into<String>, day: impl Into<String>, year: impl Into<String>) -> Self {
        DateParts {
            year: year.into(),
            month: month.into(),
            day: day.into(),
        }
    }

    /// Decompose a prior wire value.
    ///
    /// A real date fills all three parts (month zero-padded). A value that
    /// is not a real date but still has three `/`-separated parts is
    /// restored as typed so the user can fix it. Anything else is empty.
    pub fn from_wire(value: &str) -> Self {
        if value.is_empty() {
            return DateParts::default();
        }
        if let Some(date) = parse_wire(value) {
            return DateParts {
                year: date.year().to_string(),
                month: format!("{:02}", date.month()),
                day: date.day().to_string(),
            };
        }
        let pieces: Vec<&str> = value.split('/').collect();
        match pieces.as_slice() {
            [month, day, year] => DateParts::new(pad_month(month), *day, *year),
            _ => DateParts::default(),
        }
    }

    /// Collapse into the wire value: `month/day/year`, or `""` when all
    /// three parts are empty.
    pub fn to_wire(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        format!("{}/{}/{}", self.month, self.day, self.year)
    }

    /// Value of one part
    pub fn get(&self, part: DatePart) -> &str {
        match part {
            DatePart::Month => &self.month,
            DatePart::Day => &self.day,
            DatePart::Year => &self.year,
        }
    }

    /// Replace one part
    pub fn set(&mut self, part: DatePart, value: impl Into<String>) {
        let value = value.into();
        match part {
            DatePart::Month => self.month = value,
            DatePart::Day => self.day = value,
            DatePart::Year => self.year = value,
        }
    }

    /// True if every part is empty
    pub fn is_empty(&self) -> bool {
        self.year.is_empty() && self.month.is_empty() && self.day.is_empty()
    }

    /// True if every part is filled in
    pub fn is_complete(&self) -> bool {
        !self.year.is_empty() && !self.month.is_empty() && !self.day.is_empty()
    }

    /// Parts that are still empty, in display order
    pub fn empty_parts(&self) -> Vec<DatePart> {
        DatePart::ALL
            .into_iter()
            .filter(|part| self.get(*part).is_empty())
            .collect()
    }
}

fn pad_month(month: &str) -> String {
    match month.parse::<u32>() {
        Ok(m) if (1..=12).contains(&m) => format!("{:02}", m),
        _ => month.to_string(),
    }
}

/// An entry in the month picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthOption {
    /// Submitted value: `""` or `"01"`..`"12"`
    pub value: String,
    /// Text shown to the user
    pub name: String,
}

impl fmt::Display for MonthOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The month picker's options: a blank entry followed by January..December.
pub fn month_options() -> Vec<MonthOption> {
    let mut options = vec![MonthOption {
        value: String::new(),
        name: String::new(),
    }];
    options.extend((1..=12u8).filter_map(|number| {
        let month = Month::try_from(number).ok()?;
        Some(MonthOption {
            value: format!("{:02}", number),
            name: month.name().to_string(),
        })
    }));
    options
}

/// Full English name of a month given as `"1"`/`"01"`..`"12"`.
pub fn month_name(value: &str) -> Option<&'static str> {
    let number: u8 = value.parse().ok()?;
    Month::try_from(number).ok().map(|month| month.name())
}
