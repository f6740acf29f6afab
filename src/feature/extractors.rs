//! Standard property extractors for (word, tag) sequences
//!
//! These are the two extractors every transformation-based tagger needs;
//! callers with richer token representations supply their own
//! [`PropertyExtractor`] implementations.

use super::PropertyExtractor;
use crate::token::Token;

/// Extracts the surface form of a token
#[derive(Debug, Clone, Copy, Default)]
pub struct Word;

impl PropertyExtractor for Word {
    fn property_name(&self) -> &str {
        "Word"
    }

    fn extract(&self, tokens: &[Token], index: usize) -> String {
        tokens[index].word.clone()
    }
}

/// Extracts the current tag of a token
#[derive(Debug, Clone, Copy, Default)]
pub struct Tag;

impl PropertyExtractor for Tag {
    fn property_name(&self) -> &str {
        "Tag"
    }

    fn extract(&self, tokens: &[Token], index: usize) -> String {
        tokens[index].tag.clone()
    }
}
