//! Aggregation option models, ranked results and error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::conf::derive_default_freq_options;
use crate::stopwords::StopwordFilter;

////////////////////////////////////////////////////////////////////////////////
// #region EnumsInit

/// Token extraction strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnumTokenizeMode {
    /// Extract word runs from the original text; whitespace and punctuation both separate.
    #[default]
    Split,
    /// Delete all whitespace first, then extract word runs.
    ///
    /// Words separated only by whitespace are fused (`"data science"` -> `"datascience"`).
    StripWhitespace,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Options

/// Input options for [`crate::freq::aggregate_frequencies`].
#[derive(Debug, Clone)]
pub struct SpecFreqOptions {
    /// Tokens excluded from counting.
    pub stopwords: StopwordFilter,
    /// Token extraction strategy.
    pub rule_tokenize: EnumTokenizeMode,
    /// Keep only the first N ranked entries; `None` keeps all.
    pub top_n: Option<usize>,
    /// Maximum worker threads for cell tokenization; `None` derives from CPU count.
    pub num_workers_max: Option<usize>,
}

impl Default for SpecFreqOptions {
    fn default() -> Self {
        derive_default_freq_options()
    }
}

/// Serializable overlay for [`SpecFreqOptions`] (JSON config files).
///
/// Every field is optional; unset fields keep the base options untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpecFreqConfig {
    /// Replace the stopword set entirely.
    pub stopwords: Option<Vec<String>>,
    /// Add to the (possibly replaced) stopword set.
    pub stopwords_extra: Option<Vec<String>>,
    /// Token extraction strategy.
    pub rule_tokenize: Option<EnumTokenizeMode>,
    /// Ranked entries to keep.
    pub top_n: Option<usize>,
    /// Worker threads for tokenization.
    pub num_workers_max: Option<usize>,
}

impl SpecFreqConfig {
    /// Reject values no options set can hold.
    pub fn validate(&self) -> Result<(), WordFreqError> {
        if self.num_workers_max == Some(0) {
            return Err(WordFreqError::InvalidConfig(
                "num_workers_max must be >= 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Overlay this config onto `options`.
    pub fn apply_to(&self, options: &mut SpecFreqOptions) {
        if let Some(l_words) = &self.stopwords {
            options.stopwords = StopwordFilter::from_list(l_words);
        }
        if let Some(l_words) = &self.stopwords_extra {
            options.stopwords.add_stopwords(l_words);
        }
        if let Some(rule_tokenize) = self.rule_tokenize {
            options.rule_tokenize = rule_tokenize;
        }
        if let Some(n_top) = self.top_n {
            options.top_n = Some(n_top);
        }
        if let Some(n_workers) = self.num_workers_max {
            options.num_workers_max = Some(n_workers);
        }
    }

    /// Build options from defaults plus this overlay.
    pub fn into_options(self) -> SpecFreqOptions {
        let mut options = SpecFreqOptions::default();
        self.apply_to(&mut options);
        options
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Results

/// One ranked `(token, count)` entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpecWordCount {
    /// Counted token (or raw cell text for value counts).
    pub token: String,
    /// Occurrence count.
    pub count: u64,
}

/// Frequency table ranked by count descending, ties in first-occurrence order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedFrequencies {
    entries: Vec<SpecWordCount>,
}

impl RankedFrequencies {
    /// Wrap entries that are already ranked.
    pub(crate) fn from_ranked(entries: Vec<SpecWordCount>) -> Self {
        Self { entries }
    }

    /// Ranked entries.
    pub fn entries(&self) -> &[SpecWordCount] {
        &self.entries
    }

    /// Consume into ranked entries.
    pub fn into_entries(self) -> Vec<SpecWordCount> {
        self.entries
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing survived filtering ("nothing to display").
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total_count(&self) -> u64 {
        self.entries.iter().map(|spec_wc| spec_wc.count).sum()
    }

    /// Count for `token`, zero when absent.
    pub fn count_of(&self, token: &str) -> u64 {
        self.entries
            .iter()
            .find(|spec_wc| spec_wc.token == token)
            .map_or(0, |spec_wc| spec_wc.count)
    }

    /// First `n` ranked entries.
    pub fn top_n(&self, n: usize) -> RankedFrequencies {
        Self {
            entries: self.entries.iter().take(n).cloned().collect(),
        }
    }

    /// Iterate `(token, count)` pairs in rank order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries
            .iter()
            .map(|spec_wc| (spec_wc.token.as_str(), spec_wc.count))
    }
}

/// One equal-width histogram bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecHistogramBin {
    /// Inclusive lower edge.
    pub lower: f64,
    /// Upper edge; exclusive except for the last bin.
    pub upper: f64,
    /// Number of values in the bin.
    pub count: u64,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Failures of the text kernel. Tokenization and aggregation themselves are total.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WordFreqError {
    /// Option value outside its accepted range.
    #[error("Invalid option: {0}")]
    InvalidOption(String),
    /// Config payload could not be interpreted.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_ranked() -> RankedFrequencies {
        RankedFrequencies::from_ranked(vec![
            SpecWordCount {
                token: "나다".to_string(),
                count: 3,
            },
            SpecWordCount {
                token: "data".to_string(),
                count: 2,
            },
            SpecWordCount {
                token: "rust".to_string(),
                count: 2,
            },
        ])
    }

    #[test]
    fn ranked_frequencies_accessors() {
        let ranked = sample_ranked();
        assert_eq!(ranked.len(), 3);
        assert!(!ranked.is_empty());
        assert_eq!(ranked.total_count(), 7);
        assert_eq!(ranked.count_of("data"), 2);
        assert_eq!(ranked.count_of("missing"), 0);
        assert_eq!(
            ranked.iter().collect::<Vec<_>>(),
            vec![("나다", 3), ("data", 2), ("rust", 2)]
        );
    }

    #[test]
    fn top_n_never_exceeds_n_or_distinct_tokens() {
        let ranked = sample_ranked();
        assert_eq!(ranked.top_n(0).len(), 0);
        assert_eq!(ranked.top_n(2).len(), 2);
        assert_eq!(ranked.top_n(20).len(), 3);
        assert_eq!(ranked.top_n(1).entries()[0].token, "나다");
    }

    #[test]
    fn config_overlay_keeps_unset_fields() {
        let mut options = SpecFreqOptions::default();
        let cfg = SpecFreqConfig {
            stopwords_extra: Some(vec!["the".to_string()]),
            top_n: Some(5),
            ..Default::default()
        };
        cfg.apply_to(&mut options);

        assert_eq!(options.top_n, Some(5));
        assert_eq!(options.rule_tokenize, EnumTokenizeMode::Split);
        assert!(options.stopwords.is_stopword("the"));
        assert!(options.stopwords.is_stopword("은"));
    }

    #[test]
    fn config_deserializes_from_json() {
        let cfg: SpecFreqConfig = serde_json::from_str(
            r#"{"stopwords": ["a", "b"], "rule_tokenize": "strip_whitespace", "top_n": 3}"#,
        )
        .expect("parse config");
        let options = cfg.into_options();

        assert_eq!(options.rule_tokenize, EnumTokenizeMode::StripWhitespace);
        assert_eq!(options.top_n, Some(3));
        assert_eq!(options.stopwords.len(), 2);
        assert!(!options.stopwords.is_stopword("은"));
    }

    #[test]
    fn config_validation_rejects_zero_workers() {
        let cfg = SpecFreqConfig {
            num_workers_max: Some(0),
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(WordFreqError::InvalidConfig(_))));
        assert_eq!(SpecFreqConfig::default().validate(), Ok(()));
    }

    #[test]
    fn config_rejects_unknown_fields() {
        let res = serde_json::from_str::<SpecFreqConfig>(r#"{"top": 3}"#);
        assert!(res.is_err());
    }
}
