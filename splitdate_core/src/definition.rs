//! # Form Definitions
//!
//! A form definition lists the date fields a form asks for, which data type
//! each uses and the attributes that configure its split widget.
//! Definitions are stored as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! FormDefinition
//! ├── schema_version
//! ├── title
//! └── fields: Vec<FieldDefinition>
//!     ├── id / name / label
//!     ├── datatype (e.g. "ALBirthDateTestValidation2")
//!     ├── required
//!     └── attributes (alMin, alMaxMessage, ...)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use splitdate_core::definition::FormDefinition;
//!
//! let json = r#"{
//!     "schema_version": "0.1.0",
//!     "title": "Intake",
//!     "fields": [
//!         { "id": "dob", "label": "Date of birth",
//!           "datatype": "ALBirthDateTestValidation2", "required": true }
//!     ]
//! }"#;
//! let definition: FormDefinition = serde_json::from_str(json).unwrap();
//! assert_eq!(definition.fields[0].name(), "dob");
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{FieldAttributes, WidgetConfig};
use crate::datatypes::DataTypeRegistry;
use crate::errors::{DateError, DateResult};

/// Current schema version for form definition files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// A form made of split-date fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormDefinition {
    /// Schema version (for migration compatibility)
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    pub title: String,

    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

fn default_schema_version() -> String {
    SCHEMA_VERSION.to_string()
}

/// One field of a form definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Id of the field; also its rule group
    pub id: String,

    /// Name the answer is stored under; defaults to `id`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Question text shown above the field
    #[serde(default)]
    pub label: String,

    /// Registered data type name
    pub datatype: String,

    #[serde(default)]
    pub required: bool,

    #[serde(default, skip_serializing_if = "FieldAttributes::is_empty")]
    pub attributes: FieldAttributes,
}

impl FieldDefinition {
    pub fn new(id: impl Into<String>, label: impl Into<String>, datatype: impl Into<String>) -> Self {
        FieldDefinition {
            id: id.into(),
            name: None,
            label: label.into(),
            datatype: datatype.into(),
            required: false,
            attributes: FieldAttributes::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_attribute(mut self, key: &str, value: impl Into<String>) -> Self {
        self.attributes.insert(key, value);
        self
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    /// Build the immutable widget configuration for this field.
    ///
    /// # Errors
    ///
    /// - `DateError::UnknownDataType` if the datatype is not registered
    /// - `DateError::InvalidConfig` if the datatype has no split widget or an
    ///   attribute is malformed
    pub fn widget_config(&self, registry: &DataTypeRegistry) -> DateResult<WidgetConfig> {
        let data_type = registry.get(&self.datatype)?;
        let kind = data_type.widget_kind().ok_or_else(|| {
            DateError::invalid_config("datatype", &self.datatype, "has no split-date widget")
        })?;
        Ok(
            WidgetConfig::from_attributes(self.id.clone(), self.name(), kind, &self.attributes)?
                .required(self.required),
        )
    }
}

impl FormDefinition {
    pub fn new(title: impl Into<String>) -> Self {
        FormDefinition {
            schema_version: SCHEMA_VERSION.to_string(),
            title: title.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    pub fn field(&self, id: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|field| field.id == id)
    }

    /// A small form exercising both split-date flavours.
    pub fn sample() -> Self {
        FormDefinition::new("Split date sample")
            .with_field(
                FieldDefinition::new("birthdate", "What is your date of birth?", "ALBirthDateTestValidation2")
                    .required(),
            )
            .with_field(
                FieldDefinition::new("hearing_date", "When is your hearing?", "ALThreePartsDateTestValidation2")
                    .with_attribute("alMin", "2020-01-01")
                    .with_attribute("alMax", "2030-12-31")
                    .with_attribute("alMinMessage", "Hearings before 2020 are handled elsewhere."),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DateKind;

    #[test]
    fn test_sample_builds_configs() {
        let registry = DataTypeRegistry::with_builtin();
        let sample = FormDefinition::sample();
        let birth = sample.field("birthdate").unwrap().widget_config(&registry).unwrap();
        assert_eq!(birth.kind, DateKind::Birthdate);
        assert!(birth.required);

        let hearing = sample.field("hearing_date").unwrap().widget_config(&registry).unwrap();
        assert_eq!(hearing.kind, DateKind::Plain);
        assert_eq!(hearing.min.unwrap().raw, "2020-01-01");
    }

    #[test]
    fn test_demo_type_has_no_widget() {
        let registry = DataTypeRegistry::with_builtin();
        let field = FieldDefinition::new("x", "X", "altestvalidation");
        let err = field.widget_config(&registry).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CONFIG");
    }

    #[test]
    fn test_unknown_datatype() {
        let registry = DataTypeRegistry::with_builtin();
        let field = FieldDefinition::new("x", "X", "NotADate");
        assert_eq!(
            field.widget_config(&registry).unwrap_err().error_code(),
            "UNKNOWN_DATA_TYPE"
        );
    }

    #[test]
    fn test_json_defaults() {
        let json = r#"{"title": "T", "fields": [{"id": "a", "datatype": "ALThreePartsDateTestValidation"}]}"#;
        let def: FormDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(def.schema_version, SCHEMA_VERSION);
        assert!(!def.fields[0].required);
        assert!(def.fields[0].attributes.is_empty());
        assert_eq!(def.fields[0].name(), "a");
    }

    #[test]
    fn test_json_roundtrip() {
        let def = FormDefinition::sample();
        let json = serde_json::to_string_pretty(&def).unwrap();
        let back: FormDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(def, back);
    }
}
