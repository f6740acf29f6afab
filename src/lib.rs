//! Candidate-rule templates for transformation-based (Brill-style) taggers
//!
//! This library generates the candidate transformation rules a
//! transformation-based tagger trains on, and mass-produces the template
//! library that defines which shapes those rules may take. Given a tagged
//! sequence and a position whose tag is wrong, a [`Template`] enumerates
//! every minimal rule of its shape that would fix that position by
//! conditioning on properties of nearby tokens.
//!
//! Scoring and selecting rules over a corpus, applying them at inference
//! time, and persisting trained rule sets belong to the surrounding trainer;
//! this crate produces the rules and the template library they come from.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use brill_templates::feature::extractors::Tag;
//! use brill_templates::{Feature, Template, TemplateRegistry, Token};
//!
//! let mut registry = TemplateRegistry::new();
//! let template = Template::from_features(
//!     &mut registry,
//!     vec![Feature::new(Arc::new(Tag), &[-1])],
//! )
//! .unwrap();
//!
//! // "dog" is mistagged VB; the template proposes fixing it based on the
//! // preceding tag.
//! let tokens = vec![Token::new("the", "DT"), Token::new("dog", "VB")];
//! let rules = template.applicable_rules(&tokens, 1, "NN");
//! assert_eq!(rules.len(), 1);
//! assert_eq!(rules[0].conditions[0].value, "DT");
//! ```

pub mod config;
pub mod feature;
pub mod rule;
pub mod template;
pub mod token;

pub use config::{ConfigError, ExpansionConfig};
pub use feature::{Feature, FeatureError, PropertyExtractor};
pub use rule::{Condition, Rule};
pub use template::{
    Combinations, Template, TemplateError, TemplateExpansion, TemplateRegistry,
};
pub use token::Token;
