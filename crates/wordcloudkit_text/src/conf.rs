//! Pipeline constants and default preset factories.

use crate::spec::{EnumTokenizeMode, SpecFreqOptions};
use crate::stopwords::StopwordFilter;

/// Word-run pattern. `\w` is Unicode-aware (letters, marks, digits, connector punctuation).
pub const C_PATTERN_WORD: &str = r"\w+";
/// Default number of ranked entries requested by the chart view.
pub const N_TOP_DEFAULT: usize = 20;
/// Default worker count for cell tokenization (serial).
pub const N_WORKERS_DEFAULT: usize = 1;
/// Largest accepted histogram bin count (one worksheet row per bin below a header).
pub const N_BINS_MAX: usize = 1_048_575;
/// Upper bound for automatically derived worker counts.
pub const N_WORKERS_AUTO_MAX: usize = 8;
/// Built-in stopwords: standalone Korean grammatical particles and copulas.
pub const TUP_STOPWORDS_DEFAULT: [&str; 24] = [
    "이", "가", "은", "는", "을", "를", "의", "에", "에서", "에게", "께서", "와", "과", "도",
    "로", "으로", "만", "까지", "부터", "보다", "처럼", "하고", "이다", "및",
];

/// Build the default aggregation options.
pub fn derive_default_freq_options() -> SpecFreqOptions {
    SpecFreqOptions {
        stopwords: StopwordFilter::default(),
        rule_tokenize: EnumTokenizeMode::Split,
        top_n: Some(N_TOP_DEFAULT),
        num_workers_max: Some(N_WORKERS_DEFAULT),
    }
}
