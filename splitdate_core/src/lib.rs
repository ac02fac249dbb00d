//! # splitdate_core - Split Date Entry and Validation
//!
//! `splitdate_core` models a date question answered through three inputs (a
//! month picker, a day box and a year box) while keeping one `MM/DD/YYYY`
//! value in sync behind them. It also carries the server-side date data types
//! that validate, transform and pre-fill those values on submission.
//!
//! ## Design Philosophy
//!
//! - **Headless**: Widgets are plain state; front ends only render them
//! - **JSON-First**: Definitions, answers and errors implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Two layers**: Interactive rules per field group, then data type checks on submit
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use splitdate_core::{DataTypeRegistry, DatePart, Form, FormDefinition};
//!
//! let registry = DataTypeRegistry::with_builtin();
//! let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
//! let mut form = Form::from_definition(&FormDefinition::sample(), &registry, None, today).unwrap();
//!
//! form.change("birthdate", DatePart::Month, "03").unwrap();
//! form.change("birthdate", DatePart::Day, "14").unwrap();
//! form.change("birthdate", DatePart::Year, "1990").unwrap();
//!
//! let answers = form.submit(&registry).unwrap();
//! assert_eq!(answers.get("birthdate"), Some("03/14/1990"));
//! ```
//!
//! ## Modules
//!
//! - [`wire`] - The `MM/DD/YYYY` hidden value format
//! - [`parts`] - Month/day/year sub-field values
//! - [`config`] - Field attributes and immutable widget configuration
//! - [`rules`] - Interactive validation rules
//! - [`registry`] - Rule registry and the validation dispatcher
//! - [`widget`] - The headless split-date control
//! - [`form`] - Forms, submission and answers
//! - [`datatypes`] - Server-side date data types
//! - [`definition`] - JSON form definitions
//! - [`errors`] - Structured error types
//! - [`file_io`] - Definition and answer files with atomic saves

pub mod config;
pub mod datatypes;
pub mod definition;
pub mod errors;
pub mod file_io;
pub mod form;
pub mod parts;
pub mod registry;
pub mod rules;
pub mod widget;
pub mod wire;

// Re-export commonly used types at crate root for convenience
pub use config::{DateKind, FieldAttributes, WidgetConfig};
pub use datatypes::{DataType, DataTypeRegistry};
pub use definition::{FieldDefinition, FormDefinition};
pub use errors::{DateError, DateResult};
pub use file_io::{load_answers, load_form_definition, save_answers, save_form_definition};
pub use form::{Answers, Form, FormErrors};
pub use parts::{DatePart, DateParts};
pub use registry::{Dispatcher, GroupState, Highlight, RuleRegistry};
pub use widget::SplitDateWidget;
