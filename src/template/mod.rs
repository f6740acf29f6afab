//! Templates - ordered feature combinations defining rule shapes
//!
//! A [`Template`] enumerates, for a mistagged position, every minimal rule of
//! its shape that would fix that position, and computes the dependency
//! neighborhood used for incremental re-scoring during training.
//! [`Template::expand`] mass-produces a template library from candidate
//! feature lists.

pub mod expand;
pub mod registry;

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::feature::{Feature, FeatureError, PropertyExtractor};
use crate::rule::{Condition, Rule};
use crate::token::Token;

pub use expand::{Combinations, TemplateExpansion};
pub use registry::TemplateRegistry;

/// Errors that can occur when constructing templates
#[derive(Debug, Error)]
pub enum TemplateError {
    /// `from_features` called with an empty feature list
    #[error("a template requires at least one feature")]
    NoFeatures,

    /// `from_ranges` called with an empty range list
    #[error("a template requires at least one position range")]
    NoRanges,

    /// A range failed feature validation
    #[error(transparent)]
    Feature(#[from] FeatureError),
}

/// An ordered combination of features defining one rule shape
///
/// Every template is registered with a [`TemplateRegistry`] at construction
/// and carries the zero-padded id the registry assigned. Feature order is
/// significant for display and identity; [`Template::expand`] always sorts
/// features into canonical order before constructing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    id: String,
    features: Vec<Feature>,
}

impl Template {
    pub(crate) fn with_id(id: String, features: Vec<Feature>) -> Self {
        Self { id, features }
    }

    /// Construct and register a template from already-built features
    pub fn from_features(
        registry: &mut TemplateRegistry,
        features: Vec<Feature>,
    ) -> Result<Template, TemplateError> {
        if features.is_empty() {
            return Err(TemplateError::NoFeatures);
        }
        Ok(registry.register(features))
    }

    /// Construct and register a template from one extractor and a list of
    /// inclusive position ranges, one feature per range
    pub fn from_ranges(
        registry: &mut TemplateRegistry,
        extractor: Arc<dyn PropertyExtractor>,
        ranges: &[(isize, isize)],
    ) -> Result<Template, TemplateError> {
        if ranges.is_empty() {
            return Err(TemplateError::NoRanges);
        }
        let features = ranges
            .iter()
            .map(|&(start, end)| Feature::from_range(Arc::clone(&extractor), start, end))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(registry.register(features))
    }

    /// The registry-assigned id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The template's features, in construction order
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Enumerate every rule of this shape that would change `tokens[index]`'s
    /// tag to `correct_tag`
    ///
    /// Returns an empty list when the tag is already correct. Each feature
    /// contributes one condition per in-bounds position; offsets falling
    /// outside the sequence are silently skipped. One rule is emitted per
    /// element of the Cartesian product of the per-feature condition lists,
    /// preserving feature order; if any feature ends up with no in-bounds
    /// positions the product is empty and no rules are emitted.
    ///
    /// # Panics
    ///
    /// Panics if `index >= tokens.len()`.
    pub fn applicable_rules(&self, tokens: &[Token], index: usize, correct_tag: &str) -> Vec<Rule> {
        if tokens[index].tag == correct_tag {
            return Vec::new();
        }
        let condition_lists = self.condition_lists(tokens, index);
        cartesian_product(&condition_lists)
            .into_iter()
            .map(|conditions| {
                Rule::new(
                    self.id.clone(),
                    tokens[index].tag.clone(),
                    correct_tag,
                    conditions,
                )
            })
            .collect()
    }

    fn condition_lists(&self, tokens: &[Token], index: usize) -> Vec<Vec<Condition>> {
        self.features
            .iter()
            .map(|feature| {
                feature
                    .positions()
                    .iter()
                    .filter_map(|&pos| {
                        let at = index as isize + pos;
                        if at < 0 || at >= tokens.len() as isize {
                            return None;
                        }
                        Some(Condition {
                            feature: feature.clone(),
                            value: feature.extract(tokens, at as usize),
                        })
                    })
                    .collect()
            })
            .collect()
    }

    /// Absolute indices whose rule applicability could depend on a tag change
    /// at `index`
    ///
    /// Always contains `index` itself. A position `p` belongs iff `index`
    /// falls within `[p + min_off, p + max_off]`, where the offsets span 0 and
    /// every position of every feature; the result is clipped to the sequence
    /// bounds. Used by trainers to limit re-scoring after a tag flip.
    pub fn neighborhood(&self, tokens: &[Token], index: usize) -> BTreeSet<usize> {
        let mut neighborhood = BTreeSet::new();
        neighborhood.insert(index);

        let mut min_off = 0isize;
        let mut max_off = 0isize;
        for feature in &self.features {
            // positions are sorted, so first/last are the extremes
            if let Some(&first) = feature.positions().first() {
                min_off = min_off.min(first);
            }
            if let Some(&last) = feature.positions().last() {
                max_off = max_off.max(last);
            }
        }

        let start = (index as isize - max_off).max(0);
        let end = (index as isize - min_off).min(tokens.len() as isize - 1);
        for p in start..=end {
            neighborhood.insert(p as usize);
        }
        neighborhood
    }
}

/// Canonical string form of a feature sequence, shared by `Display` and the
/// duplicate check in [`Template::expand`]
pub(crate) fn canonical_form(features: &[Feature]) -> String {
    let features = features
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(",");
    format!("Template({features})")
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", canonical_form(&self.features))
    }
}

fn cartesian_product(lists: &[Vec<Condition>]) -> Vec<Vec<Condition>> {
    let mut product: Vec<Vec<Condition>> = vec![Vec::new()];
    for list in lists {
        let mut extended = Vec::with_capacity(product.len() * list.len());
        for prefix in &product {
            for condition in list {
                let mut combination = prefix.clone();
                combination.push(condition.clone());
                extended.push(combination);
            }
        }
        product = extended;
    }
    product
}
