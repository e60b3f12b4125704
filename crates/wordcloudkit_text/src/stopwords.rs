//! Stopword filtering.
//!
//! Membership is exact string equality: no case folding, no normalization.

use std::collections::HashSet;

use crate::conf::TUP_STOPWORDS_DEFAULT;

/// A set of tokens excluded from frequency counting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopwordFilter {
    stopwords: HashSet<String>,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::from_list(&TUP_STOPWORDS_DEFAULT)
    }
}

impl StopwordFilter {
    /// Create an empty filter (no filtering).
    pub fn empty() -> Self {
        Self {
            stopwords: HashSet::new(),
        }
    }

    /// Create a filter from a custom list.
    pub fn from_list<S: AsRef<str>>(words: &[S]) -> Self {
        Self {
            stopwords: words.iter().map(|w| w.as_ref().to_string()).collect(),
        }
    }

    /// Parse a plain-text stopword list: one token per line.
    ///
    /// Surrounding whitespace is trimmed; blank lines and `#` comment lines are skipped.
    pub fn from_text(text: &str) -> Self {
        Self {
            stopwords: text
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(ToString::to_string)
                .collect(),
        }
    }

    /// Add stopwords to the filter.
    pub fn add_stopwords<S: AsRef<str>>(&mut self, words: &[S]) {
        for word in words {
            self.stopwords.insert(word.as_ref().to_string());
        }
    }

    /// Remove stopwords from the filter.
    pub fn remove_stopwords<S: AsRef<str>>(&mut self, words: &[S]) {
        for word in words {
            self.stopwords.remove(word.as_ref());
        }
    }

    /// Check if a token is a stopword.
    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }

    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }

    /// Stopwords in sorted order (stable output for reports/bindings).
    pub fn to_sorted_vec(&self) -> Vec<String> {
        let mut l_words: Vec<String> = self.stopwords.iter().cloned().collect();
        l_words.sort();
        l_words
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_set_holds_particles() {
        let filter = StopwordFilter::default();

        assert!(filter.is_stopword("은"));
        assert!(filter.is_stopword("에서"));
        assert!(!filter.is_stopword("데이터"));
        assert_eq!(filter.len(), TUP_STOPWORDS_DEFAULT.len());
    }

    #[test]
    fn membership_is_exact() {
        let filter = StopwordFilter::from_list(&["The"]);

        assert!(filter.is_stopword("The"));
        assert!(!filter.is_stopword("the"));
        assert!(!filter.is_stopword("The "));
    }

    #[test]
    fn add_and_remove() {
        let mut filter = StopwordFilter::from_list(&["custom", "words"]);
        filter.add_stopwords(&["extra"]);
        filter.remove_stopwords(&["custom"]);

        assert!(filter.is_stopword("extra"));
        assert!(filter.is_stopword("words"));
        assert!(!filter.is_stopword("custom"));
        assert_eq!(filter.to_sorted_vec(), vec!["extra", "words"]);
    }

    #[test]
    fn from_text_skips_blank_and_comment_lines() {
        let filter = StopwordFilter::from_text("# particles\n은\n\n  는  \n#는다\n");

        assert_eq!(filter.to_sorted_vec(), vec!["는", "은"]);
    }

    #[test]
    fn empty_filter() {
        let filter = StopwordFilter::empty();

        assert!(filter.is_empty());
        assert!(!filter.is_stopword("은"));
    }
}
