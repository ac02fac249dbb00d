//! # Split-Date Widget
//!
//! Headless model of the three-part date control: a month picker plus day
//! and year inputs standing in for one hidden date field. Front ends render
//! it; every sub-field change goes through [`SplitDateWidget::change`],
//! which keeps the hidden wire value in sync.

use std::sync::Arc;

use tracing::trace;

use crate::config::WidgetConfig;
use crate::parts::{month_options, DatePart, DateParts, MonthOption};

/// One split-date control and the hidden value it drives.
#[derive(Debug, Clone)]
pub struct SplitDateWidget {
    config: Arc<WidgetConfig>,
    parts: DateParts,
    value: String,
}

impl SplitDateWidget {
    /// Build the control, decomposing `prior_value` into the sub-fields when
    /// the field already has an answer.
    pub fn new(config: Arc<WidgetConfig>, prior_value: Option<&str>) -> Self {
        let parts = prior_value.map(DateParts::from_wire).unwrap_or_default();
        let value = parts.to_wire();
        SplitDateWidget { config, parts, value }
    }

    /// A sub-field changed. Returns the new hidden value.
    pub fn change(&mut self, part: DatePart, value: impl Into<String>) -> &str {
        let value = value.into();
        self.parts.set(part, value.trim());
        self.value = self.parts.to_wire();
        trace!(field = %self.config.id, ?part, value = %self.value, "split date changed");
        &self.value
    }

    /// Replace all three sub-fields at once.
    pub fn set_parts(&mut self, parts: DateParts) -> &str {
        self.parts = parts;
        self.value = self.parts.to_wire();
        &self.value
    }

    pub fn config(&self) -> &Arc<WidgetConfig> {
        &self.config
    }

    pub fn id(&self) -> &str {
        &self.config.id
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn parts(&self) -> &DateParts {
        &self.parts
    }

    /// The hidden field's value, in wire format
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Options for the month picker
    pub fn month_options(&self) -> Vec<MonthOption> {
        month_options()
    }

    /// The month option matching the current month value
    pub fn selected_month(&self) -> Option<MonthOption> {
        month_options()
            .into_iter()
            .find(|option| option.value == self.parts.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DateKind, FieldAttributes};

    fn widget(prior: Option<&str>) -> SplitDateWidget {
        let config =
            WidgetConfig::from_attributes("when", "when", DateKind::Plain, &FieldAttributes::new()).unwrap();
        SplitDateWidget::new(Arc::new(config), prior)
    }

    #[test]
    fn test_prior_value_decomposed() {
        let w = widget(Some("12/25/2020"));
        assert_eq!(w.parts(), &DateParts::new("12", "25", "2020"));
        assert_eq!(w.value(), "12/25/2020");
        assert_eq!(w.selected_month().unwrap().name, "December");
    }

    #[test]
    fn test_no_prior_value() {
        let w = widget(None);
        assert!(w.parts().is_empty());
        assert_eq!(w.value(), "");
        assert_eq!(w.selected_month().unwrap().value, "");
    }

    #[test]
    fn test_change_recomputes_wire_value() {
        let mut w = widget(None);
        assert_eq!(w.change(DatePart::Month, "02"), "02//");
        assert_eq!(w.change(DatePart::Day, "28"), "02/28/");
        assert_eq!(w.change(DatePart::Year, " 2001 "), "02/28/2001");
    }

    #[test]
    fn test_clearing_every_part_empties_value() {
        let mut w = widget(Some("1/2/2003"));
        w.change(DatePart::Month, "");
        w.change(DatePart::Day, "");
        assert_eq!(w.change(DatePart::Year, ""), "");
    }

    #[test]
    fn test_set_parts() {
        let mut w = widget(None);
        assert_eq!(w.set_parts(DateParts::new("07", "4", "1976")), "07/4/1976");
    }
}
