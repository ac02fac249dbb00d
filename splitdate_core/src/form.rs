//! # Form
//!
//! A `Form` plays the host page: it owns every split-date widget, the one
//! [`Dispatcher`] that validates them, and the submission path that runs the
//! server-side data type checks as the final word.
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use splitdate_core::datatypes::DataTypeRegistry;
//! use splitdate_core::definition::FormDefinition;
//! use splitdate_core::form::Form;
//! use splitdate_core::parts::DatePart;
//!
//! let registry = DataTypeRegistry::with_builtin();
//! let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
//! let mut form = Form::from_definition(&FormDefinition::sample(), &registry, None, today).unwrap();
//!
//! form.change("birthdate", DatePart::Month, "02").unwrap();
//! form.change("birthdate", DatePart::Day, "31").unwrap();
//! let state = form.change("birthdate", DatePart::Year, "2001").unwrap();
//! assert_eq!(state.messages(), vec!["February 2001 doesn't have 31 days."]);
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::WidgetConfig;
use crate::datatypes::DataTypeRegistry;
use crate::definition::FormDefinition;
use crate::errors::{DateError, DateResult};
use crate::parts::DatePart;
use crate::registry::{Dispatcher, GroupState};
use crate::widget::SplitDateWidget;

/// Submitted answers, keyed by field name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answers {
    pub form_title: String,
    pub submitted_at: DateTime<Utc>,
    pub values: BTreeMap<String, String>,
}

impl Answers {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

/// Why a submission was refused: messages per field id.
#[derive(Error, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[error("{} field(s) need attention", .fields.len())]
pub struct FormErrors {
    pub fields: BTreeMap<String, Vec<String>>,
}

impl FormErrors {
    pub fn messages_for(&self, id: &str) -> &[String] {
        self.fields.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

struct FormField {
    widget: SplitDateWidget,
    label: String,
    datatype: String,
}

/// The live form: widgets, their rules and their validation state.
pub struct Form {
    title: String,
    fields: Vec<FormField>,
    dispatcher: Dispatcher,
    today: NaiveDate,
}

impl Form {
    pub fn new(title: impl Into<String>, today: NaiveDate) -> Self {
        Form {
            title: title.into(),
            fields: Vec::new(),
            dispatcher: Dispatcher::new(),
            today,
        }
    }

    /// Build a form from its definition, prefilling from earlier answers.
    pub fn from_definition(
        definition: &FormDefinition,
        registry: &DataTypeRegistry,
        prior: Option<&Answers>,
        today: NaiveDate,
    ) -> DateResult<Self> {
        let mut form = Form::new(definition.title.clone(), today);
        for field in &definition.fields {
            let config = field.widget_config(registry)?;
            let prior_value = prior.and_then(|answers| answers.get(field.name()));
            form.add_field(config, &field.label, &field.datatype, prior_value)?;
        }
        info!(title = %form.title, fields = form.fields.len(), "form ready");
        Ok(form)
    }

    /// Replace the original field `config.id` with a split widget and
    /// register its rules.
    pub fn add_field(
        &mut self,
        config: WidgetConfig,
        label: &str,
        datatype: &str,
        prior_value: Option<&str>,
    ) -> DateResult<()> {
        if self.position(&config.id).is_some() {
            return Err(DateError::invalid_config("id", &config.id, "field id used twice"));
        }
        if self.fields.iter().any(|field| field.widget.name() == config.name) {
            return Err(DateError::invalid_config("name", &config.name, "answer name used twice"));
        }
        let config = Arc::new(config);
        self.dispatcher.registry_mut().register_defaults(&config);
        self.fields.push(FormField {
            widget: SplitDateWidget::new(config, prior_value),
            label: label.to_string(),
            datatype: datatype.to_string(),
        });
        Ok(())
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.widget.id() == id)
    }

    fn widget_field(&self, id: &str) -> DateResult<&FormField> {
        self.position(id)
            .map(|index| &self.fields[index])
            .ok_or_else(|| DateError::invalid_config("id", id, "no such field"))
    }

    fn field_mut(&mut self, id: &str) -> DateResult<&mut FormField> {
        let index = self
            .position(id)
            .ok_or_else(|| DateError::invalid_config("id", id, "no such field"))?;
        Ok(&mut self.fields[index])
    }

    /// A sub-field changed: update the hidden value and re-validate the
    /// group.
    pub fn change(&mut self, id: &str, part: DatePart, value: &str) -> DateResult<&GroupState> {
        let today = self.today;
        let field = self.field_mut(id)?;
        field.widget.change(part, value);
        let parts = field.widget.parts().clone();
        Ok(self.dispatcher.validate(id, &parts, today))
    }

    /// Validate one group without changing it.
    pub fn validate(&mut self, id: &str) -> DateResult<&GroupState> {
        let today = self.today;
        let parts = self.field_mut(id)?.widget.parts().clone();
        Ok(self.dispatcher.validate(id, &parts, today))
    }

    /// Validate every group. True if all pass.
    pub fn validate_all(&mut self) -> bool {
        let today = self.today;
        for field in &self.fields {
            self.dispatcher
                .validate(field.widget.id(), field.widget.parts(), today);
        }
        self.dispatcher.all_valid()
    }

    /// What keeps one field from being accepted: its group's rule messages,
    /// or failing those, the data type's complaint. Reads the last group
    /// state, so validate first.
    fn field_messages(&self, field: &FormField, registry: &DataTypeRegistry) -> Vec<String> {
        let id = field.widget.id();
        let state = self.dispatcher.state(id);
        if !state.is_valid() {
            return state.messages().into_iter().map(str::to_string).collect();
        }

        let server_check = registry
            .get(&field.datatype)
            .and_then(|data_type| data_type.validate(field.widget.value(), self.today));
        match server_check {
            Ok(()) => Vec::new(),
            Err(err) => {
                debug!(field = id, code = err.error_code(), "data type rejected value");
                vec![err.to_string()]
            }
        }
    }

    /// Validate one group and then its data type, the same checks Submit
    /// makes for that field. Empty when the field would be accepted.
    pub fn check_field(&mut self, id: &str, registry: &DataTypeRegistry) -> DateResult<Vec<String>> {
        self.validate(id)?;
        let field = self.widget_field(id)?;
        Ok(self.field_messages(field, registry))
    }

    /// Run the split-widget rules, then every field's data type check.
    /// Either all answers are accepted or the per-field messages come back.
    pub fn submit(&mut self, registry: &DataTypeRegistry) -> Result<Answers, FormErrors> {
        self.validate_all();

        let mut errors = FormErrors::default();
        let mut values = BTreeMap::new();
        for field in &self.fields {
            let messages = self.field_messages(field, registry);
            if messages.is_empty() {
                values.insert(field.widget.name().to_string(), field.widget.value().to_string());
            } else {
                errors.fields.insert(field.widget.id().to_string(), messages);
            }
        }

        if !errors.is_empty() {
            info!(title = %self.title, failing = errors.fields.len(), "submission refused");
            return Err(errors);
        }
        info!(title = %self.title, answers = values.len(), "submission accepted");
        Ok(Answers {
            form_title: self.title.clone(),
            submitted_at: Utc::now(),
            values,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
    }

    pub fn widgets(&self) -> impl Iterator<Item = &SplitDateWidget> {
        self.fields.iter().map(|field| &field.widget)
    }

    pub fn widget(&self, id: &str) -> Option<&SplitDateWidget> {
        self.position(id).map(|index| &self.fields[index].widget)
    }

    /// Question text of a field
    pub fn label(&self, id: &str) -> Option<&str> {
        self.position(id).map(|index| self.fields[index].label.as_str())
    }

    /// Data type name of a field
    pub fn datatype(&self, id: &str) -> Option<&str> {
        self.position(id).map(|index| self.fields[index].datatype.as_str())
    }

    /// Last validation state of a field group
    pub fn group_state(&self, id: &str) -> GroupState {
        self.dispatcher.state(id)
    }

    pub fn dispatcher_mut(&mut self) -> &mut Dispatcher {
        &mut self.dispatcher
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DateKind, FieldAttributes};
    use crate::definition::FieldDefinition;
    use crate::parts::DateParts;
    use crate::registry::Highlight;
    use crate::rules::{CustomRule, REQUIRED_MESSAGE};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn sample_form() -> Form {
        Form::from_definition(&FormDefinition::sample(), &DataTypeRegistry::with_builtin(), None, today())
            .unwrap()
    }

    fn fill(form: &mut Form, id: &str, month: &str, day: &str, year: &str) {
        form.change(id, DatePart::Month, month).unwrap();
        form.change(id, DatePart::Day, day).unwrap();
        form.change(id, DatePart::Year, year).unwrap();
    }

    #[test]
    fn test_february_31_flags_group() {
        let mut form = sample_form();
        fill(&mut form, "hearing_date", "02", "31", "2001");
        let state = form.group_state("hearing_date");
        assert_eq!(state.highlight, Highlight::Group);
        assert_eq!(state.messages(), vec!["February 2001 doesn't have 31 days."]);

        form.change("hearing_date", DatePart::Day, "28").unwrap();
        // 2001 is before the configured minimum, the day itself is fine now
        assert_eq!(
            form.group_state("hearing_date").messages(),
            vec!["Hearings before 2020 are handled elsewhere."]
        );
    }

    #[test]
    fn test_three_digit_year_flagged() {
        let mut form = sample_form();
        let state = form.change("hearing_date", DatePart::Year, "202").unwrap();
        assert!(!state.is_valid());
        let state = form.change("hearing_date", DatePart::Year, "2023").unwrap();
        assert!(state.is_valid());
    }

    #[test]
    fn test_incomplete_date_never_checks_min() {
        let mut form = sample_form();
        form.change("hearing_date", DatePart::Month, "01").unwrap();
        let state = form.change("hearing_date", DatePart::Year, "1999").unwrap();
        assert!(state.is_valid());
    }

    #[test]
    fn test_hidden_value_tracks_changes() {
        let mut form = sample_form();
        fill(&mut form, "birthdate", "03", "14", "1990");
        assert_eq!(form.widget("birthdate").unwrap().value(), "03/14/1990");
    }

    #[test]
    fn test_submit_requires_birthdate() {
        let mut form = sample_form();
        let errors = form.submit(&DataTypeRegistry::with_builtin()).unwrap_err();
        assert_eq!(errors.messages_for("birthdate"), [REQUIRED_MESSAGE.to_string()]);
        assert!(errors.messages_for("hearing_date").is_empty());
    }

    #[test]
    fn test_submit_collects_answers() {
        let mut form = sample_form();
        fill(&mut form, "birthdate", "03", "14", "1990");
        fill(&mut form, "hearing_date", "06", "1", "2027");
        let answers = form.submit(&DataTypeRegistry::with_builtin()).unwrap();
        assert_eq!(answers.get("birthdate"), Some("03/14/1990"));
        assert_eq!(answers.get("hearing_date"), Some("06/1/2027"));
        assert_eq!(answers.form_title, "Split date sample");
    }

    #[test]
    fn test_optional_partial_date_blocked_on_submit() {
        let mut form = sample_form();
        fill(&mut form, "birthdate", "03", "14", "1990");
        form.change("hearing_date", DatePart::Month, "06").unwrap();
        let errors = form.submit(&DataTypeRegistry::with_builtin()).unwrap_err();
        assert_eq!(errors.messages_for("hearing_date"), ["Enter a day and a year".to_string()]);
    }

    #[test]
    fn test_birthdate_in_future_blocked() {
        let mut form = sample_form();
        fill(&mut form, "birthdate", "10", "19", "2026");
        let state = form.group_state("birthdate");
        assert_eq!(state.messages(), vec!["A birthdate must be in the past."]);
    }

    #[test]
    fn test_prefill_from_prior_answers() {
        let mut values = BTreeMap::new();
        values.insert("birthdate".to_string(), "07/04/1980".to_string());
        let prior = Answers {
            form_title: "Split date sample".into(),
            submitted_at: Utc::now(),
            values,
        };
        let form = Form::from_definition(
            &FormDefinition::sample(),
            &DataTypeRegistry::with_builtin(),
            Some(&prior),
            today(),
        )
        .unwrap();
        let widget = form.widget("birthdate").unwrap();
        assert_eq!(widget.parts().month, "07");
        assert_eq!(widget.parts().day, "4");
        assert_eq!(widget.parts().year, "1980");
    }

    #[test]
    fn test_duplicate_and_unknown_ids() {
        let mut form = Form::new("t", today());
        let config =
            WidgetConfig::from_attributes("a", "a", DateKind::Plain, &FieldAttributes::new()).unwrap();
        form.add_field(config.clone(), "A", "ALThreePartsDateTestValidation2", None)
            .unwrap();
        assert!(form
            .add_field(config, "A", "ALThreePartsDateTestValidation2", None)
            .is_err());
        assert!(form.change("zzz", DatePart::Day, "1").is_err());
    }

    #[test]
    fn test_duplicate_answer_name_rejected() {
        let mut form = Form::new("t", today());
        let attributes = FieldAttributes::new();
        let first = WidgetConfig::from_attributes("a", "when", DateKind::Plain, &attributes).unwrap();
        let second = WidgetConfig::from_attributes("b", "when", DateKind::Plain, &attributes).unwrap();
        form.add_field(first, "A", "ALThreePartsDateTestValidation2", None)
            .unwrap();
        let err = form
            .add_field(second, "B", "ALThreePartsDateTestValidation2", None)
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CONFIG");
        assert!(form.widget("b").is_none());
    }

    #[test]
    fn test_check_field_runs_rules_then_data_type() {
        let registry = DataTypeRegistry::with_builtin();
        let mut form = sample_form();
        form.change("hearing_date", DatePart::Month, "06").unwrap();
        assert_eq!(
            form.check_field("hearing_date", &registry).unwrap(),
            ["Enter a day and a year".to_string()]
        );

        fill(&mut form, "hearing_date", "06", "15", "2024");
        assert!(form.check_field("hearing_date", &registry).unwrap().is_empty());

        let config =
            WidgetConfig::from_attributes("odd", "odd", DateKind::Plain, &FieldAttributes::new()).unwrap();
        form.add_field(config, "Odd", "NoSuchType", None).unwrap();
        fill(&mut form, "odd", "01", "02", "2003");
        assert_eq!(
            form.check_field("odd", &registry).unwrap(),
            ["Unknown data type: NoSuchType".to_string()]
        );
        assert!(form.check_field("zzz", &registry).is_err());
    }

    #[test]
    fn test_custom_rule_added_to_group() {
        let mut form = sample_form();
        form.dispatcher_mut().registry_mut().register(
            "hearing_date",
            Box::new(CustomRule::new("weekday", |parts: &DateParts, _| {
                (parts.day == "25" && parts.month == "12").then(|| "Courts are closed".to_string())
            })),
        );
        fill(&mut form, "hearing_date", "12", "25", "2027");
        assert_eq!(form.group_state("hearing_date").messages(), vec!["Courts are closed"]);
    }

    #[test]
    fn test_unknown_datatype_in_definition() {
        let def = FormDefinition::new("bad").with_field(FieldDefinition::new("x", "X", "Nope"));
        assert!(Form::from_definition(&def, &DataTypeRegistry::with_builtin(), None, today()).is_err());
    }

}
