//! Candidate transformation rules
//!
//! A [`Rule`] is the payload a template hands to the external trainer: change
//! `original_tag` to `replacement_tag` when every condition holds around the
//! target position. This crate only generates rules; scoring, selection, and
//! application belong to the trainer and tagger.

use std::fmt;

use crate::feature::Feature;

/// One part of a rule's trigger: a feature and the value it must extract
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    /// The feature whose extraction is being constrained
    pub feature: Feature,
    /// The value the feature must produce at one of its positions
    pub value: String,
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={:?}", self.feature, self.value)
    }
}

/// A candidate tag transformation produced by a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Id of the template that generated this rule
    pub template_id: String,
    /// Tag the rule replaces
    pub original_tag: String,
    /// Tag the rule assigns
    pub replacement_tag: String,
    /// Ordered trigger conditions, one per feature position combination
    pub conditions: Vec<Condition>,
}

impl Rule {
    /// Create a new rule
    pub fn new(
        template_id: impl Into<String>,
        original_tag: impl Into<String>,
        replacement_tag: impl Into<String>,
        conditions: Vec<Condition>,
    ) -> Self {
        Self {
            template_id: template_id.into(),
            original_tag: original_tag.into(),
            replacement_tag: replacement_tag.into(),
            conditions,
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let conditions = self
            .conditions
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" & ");
        write!(
            f,
            "{}: {} -> {} if {}",
            self.template_id, self.original_tag, self.replacement_tag, conditions
        )
    }
}
