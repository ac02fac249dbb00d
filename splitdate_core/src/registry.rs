//! # Rule Registry and Dispatcher
//!
//! Rules are registered per field group (the id of the original date field)
//! in a [`RuleRegistry`]. A single [`Dispatcher`] owns that registry and the
//! display state of every group: which messages sit in the group's error
//! container and what is highlighted.
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use chrono::NaiveDate;
//! use splitdate_core::config::{DateKind, FieldAttributes, WidgetConfig};
//! use splitdate_core::parts::DateParts;
//! use splitdate_core::registry::{Dispatcher, Highlight};
//!
//! let config = Arc::new(
//!     WidgetConfig::from_attributes("dob", "dob", DateKind::Plain, &FieldAttributes::new()).unwrap(),
//! );
//! let mut dispatcher = Dispatcher::new();
//! dispatcher.registry_mut().register_defaults(&config);
//!
//! let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
//! let state = dispatcher.validate("dob", &DateParts::new("02", "31", "2001"), today);
//! assert_eq!(state.highlight, Highlight::Group);
//! assert_eq!(state.messages(), vec!["February 2001 doesn't have 31 days."]);
//! ```

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::WidgetConfig;
use crate::parts::{DatePart, DateParts};
use crate::rules::{default_rules, DateRule, Placement, RuleFailure, RuleId};

// ============================================================================
// Registry
// ============================================================================

/// Rules keyed by field group.
#[derive(Default)]
pub struct RuleRegistry {
    groups: HashMap<String, Vec<Box<dyn DateRule>>>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one rule to a group. A rule with the same id replaces the old one.
    pub fn register(&mut self, group: impl Into<String>, rule: Box<dyn DateRule>) {
        let rules = self.groups.entry(group.into()).or_default();
        let id = rule.id();
        rules.retain(|existing| existing.id() != id);
        rules.push(rule);
    }

    /// Register the five built-in rules for a field under its id.
    pub fn register_defaults(&mut self, config: &Arc<WidgetConfig>) {
        for rule in default_rules(config) {
            self.register(config.id.clone(), rule);
        }
    }

    /// Remove one rule from a group. Returns true if it was there.
    pub fn unregister(&mut self, group: &str, id: &RuleId) -> bool {
        match self.groups.get_mut(group) {
            Some(rules) => {
                let before = rules.len();
                rules.retain(|rule| &rule.id() != id);
                rules.len() != before
            }
            None => false,
        }
    }

    /// Drop a whole group.
    pub fn remove_group(&mut self, group: &str) {
        self.groups.remove(group);
    }

    pub fn rules_for(&self, group: &str) -> &[Box<dyn DateRule>] {
        self.groups.get(group).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Ids of the rules registered for a group, in registration order.
    pub fn rule_ids(&self, group: &str) -> Vec<RuleId> {
        self.rules_for(group).iter().map(|rule| rule.id()).collect()
    }

    pub fn contains_group(&self, group: &str) -> bool {
        self.groups.contains_key(group)
    }
}

// ============================================================================
// Group state
// ============================================================================

/// What is visually marked invalid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Highlight {
    #[default]
    None,
    /// The container around all three sub-fields; sub-fields stay unmarked
    Group,
    /// Only these sub-fields (required failures on their own)
    Parts(Vec<DatePart>),
}

/// Validation outcome of one field group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupState {
    /// Failures in display order, one per distinct message
    pub errors: Vec<RuleFailure>,
    pub highlight: Highlight,
}

impl GroupState {
    fn from_failures(mut failures: Vec<RuleFailure>) -> Self {
        failures.sort_by_key(|failure| failure.rule.precedence());

        let mut seen = BTreeSet::new();
        failures.retain(|failure| seen.insert(failure.message.clone()));

        let highlight = if failures.iter().any(|f| f.placement == Placement::Group) {
            Highlight::Group
        } else {
            let parts: BTreeSet<DatePart> = failures
                .iter()
                .filter_map(|f| match &f.placement {
                    Placement::Parts(parts) => Some(parts.iter().copied()),
                    Placement::Group => None,
                })
                .flatten()
                .collect();
            if parts.is_empty() {
                Highlight::None
            } else {
                Highlight::Parts(parts.into_iter().collect())
            }
        };

        GroupState {
            errors: failures,
            highlight,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Contents of the group's error container
    pub fn messages(&self) -> Vec<&str> {
        self.errors.iter().map(|f| f.message.as_str()).collect()
    }

    /// The failure shown first
    pub fn primary(&self) -> Option<&RuleFailure> {
        self.errors.first()
    }

    /// True if this sub-field should carry an invalid marker of its own.
    pub fn part_highlighted(&self, part: DatePart) -> bool {
        matches!(&self.highlight, Highlight::Parts(parts) if parts.contains(&part))
    }
}

// ============================================================================
// Dispatcher
// ============================================================================

/// Runs a group's rules and remembers the result.
#[derive(Default)]
pub struct Dispatcher {
    registry: RuleRegistry,
    states: HashMap<String, GroupState>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(registry: RuleRegistry) -> Self {
        Dispatcher {
            registry,
            states: HashMap::new(),
        }
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut RuleRegistry {
        &mut self.registry
    }

    /// Run every rule of `group` once against `parts` and store the outcome.
    pub fn validate(&mut self, group: &str, parts: &DateParts, today: NaiveDate) -> &GroupState {
        let failures: Vec<RuleFailure> = self
            .registry
            .rules_for(group)
            .iter()
            .filter_map(|rule| rule.check(parts, today))
            .collect();

        let state = GroupState::from_failures(failures);
        debug!(
            group,
            errors = state.errors.len(),
            highlight = ?state.highlight,
            "validated split date group"
        );
        self.states.insert(group.to_string(), state);
        &self.states[group]
    }

    /// Last stored outcome for a group; groups never validated are clean.
    pub fn state(&self, group: &str) -> GroupState {
        self.states.get(group).cloned().unwrap_or_default()
    }

    /// Forget the stored outcome for a group.
    pub fn clear(&mut self, group: &str) {
        self.states.remove(group);
    }

    /// True if every validated group passed.
    pub fn all_valid(&self) -> bool {
        self.states.values().all(GroupState::is_valid)
    }
}
