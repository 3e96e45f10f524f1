//! Prompt tokenizer.
//!
//! Turns free text into a normalized keyword set: lowercase, split on every
//! non-alphanumeric character, empty tokens and stopwords dropped. Item tags
//! go through the same tokenizer so "Sci-Fi" in a prompt and "sci-fi" on an
//! item produce the same tokens.

use std::collections::BTreeSet;

/// Words that carry no preference on their own.
///
/// Articles, pronouns, prepositions and the filler of a request
/// ("recommend me a movie with ...").
pub const DEFAULT_STOPWORDS: &[&str] = &[
    "a", "an", "and", "any", "are", "as", "at", "be", "but", "by", "film", "films", "for",
    "from", "give", "i", "in", "is", "it", "like", "me", "movie", "movies", "my", "of", "on",
    "or", "please", "recommend", "show", "some", "something", "that", "the", "this", "to",
    "want", "was", "with",
];

/// Splits prompts (and tags) into lowercase keywords
#[derive(Debug, Clone)]
pub struct PromptTokenizer {
    stopwords: BTreeSet<String>,
}

impl PromptTokenizer {
    /// Tokenizer with `DEFAULT_STOPWORDS`
    pub fn new() -> Self {
        Self::with_stopwords(DEFAULT_STOPWORDS.iter().copied())
    }

    /// Tokenizer with a custom stopword list (matched case-insensitively)
    pub fn with_stopwords<I, S>(stopwords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            stopwords: stopwords
                .into_iter()
                .map(|word| word.as_ref().trim().to_lowercase())
                .filter(|word| !word.is_empty())
                .collect(),
        }
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    /// Keyword set of a piece of text; empty for empty or all-stopword text
    pub fn tokenize(&self, text: &str) -> BTreeSet<String> {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|token| !token.is_empty())
            .map(str::to_lowercase)
            .filter(|token| !self.is_stopword(token))
            .collect()
    }
}

impl Default for PromptTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords(tokenizer: &PromptTokenizer, text: &str) -> Vec<String> {
        tokenizer.tokenize(text).into_iter().collect()
    }

    #[test]
    fn test_splits_on_non_alphanumeric() {
        let tokenizer = PromptTokenizer::new();
        assert_eq!(
            keywords(&tokenizer, "Sci-Fi, ACTION!! space/time"),
            vec!["action", "fi", "sci", "space", "time"]
        );
    }

    #[test]
    fn test_drops_stopwords() {
        let tokenizer = PromptTokenizer::new();
        assert_eq!(
            keywords(&tokenizer, "Recommend me a sci-fi movie with AI"),
            vec!["ai", "fi", "sci"]
        );
    }

    #[test]
    fn test_empty_and_stopword_only_prompts() {
        let tokenizer = PromptTokenizer::new();
        assert!(tokenizer.tokenize("").is_empty());
        assert!(tokenizer.tokenize("   ").is_empty());
        assert!(tokenizer.tokenize("--- !!").is_empty());
        assert!(tokenizer.tokenize("recommend me a movie").is_empty());
    }

    #[test]
    fn test_custom_stopwords() {
        let tokenizer = PromptTokenizer::with_stopwords(["Space", " "]);
        assert_eq!(keywords(&tokenizer, "a space movie"), vec!["a", "movie"]);
    }

    #[test]
    fn test_unicode_letters_are_kept() {
        let tokenizer = PromptTokenizer::new();
        assert_eq!(keywords(&tokenizer, "Amélie café"), vec!["amélie", "café"]);
    }
}
