//! Features - property extractors bound to relative positions
//!
//! A [`Feature`] pairs a property-computing capability (the
//! [`PropertyExtractor`] trait) with a sorted, deduplicated list of relative
//! positions at which to apply it. Templates combine Features to define the
//! "shape" of the candidate rules they enumerate.

pub mod extractors;

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::token::Token;

/// Errors that can occur when constructing features
#[derive(Debug, Error)]
pub enum FeatureError {
    /// Inclusive range given with start after end
    #[error("illegal interval: start {start} exceeds end {end}")]
    InvalidInterval { start: isize, end: isize },

    /// Window length of zero passed to `Feature::expand`
    #[error("window lengths must be positive")]
    InvalidWindow,
}

/// A property-computing capability that a [`Feature`] applies at its positions.
///
/// Implementations extract or compute one specific property of a token, for
/// example its surface form or its tag. The extractor receives the whole
/// sequence, so a property may depend on more than `tokens[index]` (sentence
/// length, position relative to the end, and so on).
///
/// The property name identifies the variant: two Features interact (superset,
/// intersection, ordering, equality) only when their extractors report the
/// same name.
pub trait PropertyExtractor: fmt::Debug + Send + Sync {
    /// Name of the property, used for display and variant identity
    fn property_name(&self) -> &str;

    /// Short tag used when trained rule sets are persisted to text
    ///
    /// Defaults to `"!"` followed by the lowercased property name.
    fn serialization_tag(&self) -> String {
        format!("!{}", self.property_name().to_lowercase())
    }

    /// Extract the property value for the token at `index`
    ///
    /// Must be a pure function of `tokens` and `index`. Callers guarantee
    /// `index < tokens.len()`.
    fn extract(&self, tokens: &[Token], index: usize) -> String;
}

/// A property extractor bound to a set of relative positions
///
/// Positions are stored sorted and deduplicated and are immutable after
/// construction. Cloning is cheap: the extractor is shared behind an [`Arc`].
#[derive(Clone)]
pub struct Feature {
    extractor: Arc<dyn PropertyExtractor>,
    positions: Vec<isize>,
}

impl Feature {
    /// Create a feature applying `extractor` at the given relative positions
    ///
    /// Positions are normalized to sorted, deduplicated order.
    pub fn new(extractor: Arc<dyn PropertyExtractor>, positions: &[isize]) -> Self {
        let mut positions = positions.to_vec();
        positions.sort_unstable();
        positions.dedup();
        Self {
            extractor,
            positions,
        }
    }

    /// Create a feature over the inclusive contiguous range `start..=end`
    pub fn from_range(
        extractor: Arc<dyn PropertyExtractor>,
        start: isize,
        end: isize,
    ) -> Result<Self, FeatureError> {
        if start > end {
            return Err(FeatureError::InvalidInterval { start, end });
        }
        Ok(Self {
            extractor,
            positions: (start..=end).collect(),
        })
    }

    /// Generate features over sliding windows of `starts`
    ///
    /// For each window length `w` and each index into `starts` where a window
    /// of `w` consecutive entries fits, one feature is built over that slice.
    /// With `exclude_zero`, features containing position 0 are dropped
    /// (position 0 is conventionally reserved for the token being corrected).
    ///
    /// Returns the full list, possibly empty. A window length of zero is a
    /// validation error.
    pub fn expand(
        extractor: Arc<dyn PropertyExtractor>,
        starts: &[isize],
        window_lengths: &[usize],
        exclude_zero: bool,
    ) -> Result<Vec<Feature>, FeatureError> {
        if window_lengths.iter().any(|&w| w == 0) {
            return Err(FeatureError::InvalidWindow);
        }
        let mut features = Vec::new();
        for &w in window_lengths {
            if w > starts.len() {
                continue;
            }
            for window in starts.windows(w) {
                if exclude_zero && window.contains(&0) {
                    continue;
                }
                features.push(Feature::new(Arc::clone(&extractor), window));
            }
        }
        Ok(features)
    }

    /// The sorted, deduplicated relative positions
    pub fn positions(&self) -> &[isize] {
        &self.positions
    }

    /// Name of the underlying property
    pub fn property_name(&self) -> &str {
        self.extractor.property_name()
    }

    /// Serialization tag of the underlying property
    pub fn serialization_tag(&self) -> String {
        self.extractor.serialization_tag()
    }

    /// Extract the property value for the token at `index`
    ///
    /// Callers guarantee `index < tokens.len()`.
    pub fn extract(&self, tokens: &[Token], index: usize) -> String {
        self.extractor.extract(tokens, index)
    }

    /// True iff `other` is the same variant and its positions are all covered
    /// by this feature's positions
    pub fn is_superset(&self, other: &Feature) -> bool {
        self.same_variant(other)
            && other
                .positions
                .iter()
                .all(|p| self.positions.binary_search(p).is_ok())
    }

    /// True iff `other` is the same variant and shares at least one position
    pub fn intersects(&self, other: &Feature) -> bool {
        self.same_variant(other)
            && self
                .positions
                .iter()
                .any(|p| other.positions.binary_search(p).is_ok())
    }

    fn same_variant(&self, other: &Feature) -> bool {
        self.property_name() == other.property_name()
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let positions = self
            .positions
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{}([{}])", self.property_name(), positions)
    }
}

impl fmt::Debug for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Feature")
            .field("property", &self.property_name())
            .field("positions", &self.positions)
            .finish()
    }
}

impl PartialEq for Feature {
    fn eq(&self, other: &Self) -> bool {
        self.same_variant(other) && self.positions == other.positions
    }
}

impl Eq for Feature {}

impl PartialOrd for Feature {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Feature {
    /// Primary key: property name; secondary key: positions.
    ///
    /// This order is what makes a template's feature sequence canonical and
    /// therefore deduplicatable during bulk expansion.
    fn cmp(&self, other: &Self) -> Ordering {
        self.property_name()
            .cmp(other.property_name())
            .then_with(|| self.positions.cmp(&other.positions))
    }
}
