//! Expansion configuration loaded from TOML
//!
//! Describes the feature lists and expansion settings the CLI uses to
//! generate a template library:
//!
//! ```toml
//! [[features]]
//! property = "word"
//! starts = [-2, -1, 0, 1]
//! window-lengths = [1, 2]
//! exclude-zero = false
//!
//! [expand]
//! combinations = 2          # absent = all sizes; k; or [k1, k2]
//! skip-intersecting = true
//! ```

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use crate::feature::extractors::{Tag, Word};
use crate::feature::{Feature, FeatureError, PropertyExtractor};
use crate::template::Combinations;

/// Errors that can occur when loading or applying an expansion config
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Feature(#[from] FeatureError),
}

/// Top-level expansion config
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ExpansionConfig {
    /// One entry per feature slot, in order
    #[serde(default)]
    pub features: Vec<FeatureSetConfig>,
    /// Expansion settings
    #[serde(default)]
    pub expand: ExpandOptions,
}

/// One slot of candidate features, generated via [`Feature::expand`]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FeatureSetConfig {
    /// Which property to extract
    pub property: PropertyKind,
    /// Start positions for the sliding windows
    pub starts: Vec<isize>,
    /// Window lengths to slide over `starts`
    pub window_lengths: Vec<usize>,
    /// Drop windows containing position 0
    #[serde(default)]
    pub exclude_zero: bool,
}

/// Built-in property kinds selectable from a config
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    Word,
    Tag,
}

impl PropertyKind {
    /// The extractor implementing this property
    pub fn extractor(self) -> Arc<dyn PropertyExtractor> {
        match self {
            PropertyKind::Word => Arc::new(Word),
            PropertyKind::Tag => Arc::new(Tag),
        }
    }
}

/// Settings for [`crate::Template::expand`]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ExpandOptions {
    /// Slot subset sizes; absent means all sizes 1..=n
    #[serde(default)]
    pub combinations: Option<CombinationsConfig>,
    /// Reject combinations whose features share positions
    #[serde(default = "default_skip_intersecting")]
    pub skip_intersecting: bool,
}

impl Default for ExpandOptions {
    fn default() -> Self {
        Self {
            combinations: None,
            skip_intersecting: true,
        }
    }
}

fn default_skip_intersecting() -> bool {
    true
}

/// TOML surface for the combinations setting: an integer or a `[k1, k2]` pair
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum CombinationsConfig {
    Exactly(usize),
    Between(usize, usize),
}

impl ExpansionConfig {
    /// Load an expansion config from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load an expansion config from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Build the per-slot feature lists this config describes
    pub fn feature_lists(&self) -> Result<Vec<Vec<Feature>>, ConfigError> {
        self.features
            .iter()
            .map(|set| {
                Feature::expand(
                    set.property.extractor(),
                    &set.starts,
                    &set.window_lengths,
                    set.exclude_zero,
                )
                .map_err(ConfigError::from)
            })
            .collect()
    }

    /// The combinations setting as the library type
    pub fn combinations(&self) -> Combinations {
        match self.expand.combinations {
            None => Combinations::All,
            Some(CombinationsConfig::Exactly(k)) => Combinations::Exactly(k),
            Some(CombinationsConfig::Between(k1, k2)) => Combinations::Between(k1, k2),
        }
    }
}
