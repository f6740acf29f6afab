//! Tagged tokens - the (word, tag) pairs a transformation-based tagger corrects

use serde::{Deserialize, Serialize};

/// A word paired with its current tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Surface form of the token
    pub word: String,
    /// Tag currently assigned to the token
    pub tag: String,
}

impl Token {
    /// Create a new tagged token
    pub fn new(word: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            tag: tag.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_construction() {
        let token = Token::new("dog", "NN");
        assert_eq!(token.word, "dog");
        assert_eq!(token.tag, "NN");
    }
}
