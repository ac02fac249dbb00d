//! # Wire Format
//!
//! Dates travel between the split widget, the form and the answer store as
//! `"MM/DD/YYYY"` strings (or `""` for no answer). Month and day may be one
//! or two digits; the year is always four.
//!
//! ## Example
//!
//! ```rust
//! use splitdate_core::wire::{format_wire, parse_wire};
//!
//! let date = parse_wire("2/9/2023").unwrap();
//! assert_eq!(format_wire(date), "02/09/2023");
//! assert!(parse_wire("2/30/2023").is_none());
//! ```

use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

/// Shape every complete wire value must have.
pub static WIRE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}$").expect("wire pattern is a valid regex"));

/// strftime pattern used when formatting a date back into the wire format
pub const WIRE_FORMAT: &str = "%m/%d/%Y";

/// ISO form accepted for configured bounds (`2023-02-04`)
pub const ISO_FORMAT: &str = "%Y-%m-%d";

/// True if `item` has the `M/D/YYYY` shape. Says nothing about whether the
/// date exists.
pub fn matches_wire_pattern(item: &str) -> bool {
    WIRE_PATTERN.is_match(item)
}

/// Parse a wire value into a calendar date.
///
/// Returns `None` for anything that does not match the pattern, names a
/// day that does not exist, or falls in year 0.
pub fn parse_wire(item: &str) -> Option<NaiveDate> {
    if !matches_wire_pattern(item) {
        return None;
    }
    let mut fields = item.split('/').map(str::parse::<u32>);
    let month = fields.next()?.ok()?;
    let day = fields.next()?.ok()?;
    let year = fields.next()?.ok()?;
    if year < 1 {
        return None;
    }
    NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)
}

/// Format a date as a zero-padded wire value.
pub fn format_wire(date: NaiveDate) -> String {
    date.format(WIRE_FORMAT).to_string()
}

/// Parse a configured min/max bound. Accepts ISO (`2023-02-04`) and wire
/// (`2/4/2023`) text, surrounding whitespace ignored.
pub fn parse_bound(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, ISO_FORMAT)
        .ok()
        .or_else(|| parse_wire(raw))
}

/// Today's date on the local clock.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
