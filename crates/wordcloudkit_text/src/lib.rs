//! `wordcloudkit_text` v1:
//! Text-preprocessing and frequency-aggregation kernel.
//!
//! Module layout:
//! - `conf`         : constants and default presets
//! - `spec`         : options/models/errors
//! - `stopwords`    : exact-match stopword set
//! - `tokenizer`    : word-run extraction
//! - `freq`         : column-level frequency aggregation
//! - `distribution` : raw value counts and numeric histogram bins
//! - `util`         : shared helpers
pub mod conf;
pub mod distribution;
pub mod freq;
pub mod spec;
pub mod stopwords;
pub mod tokenizer;
mod util;

pub use conf::{
    C_PATTERN_WORD, N_BINS_MAX, N_TOP_DEFAULT, N_WORKERS_DEFAULT, TUP_STOPWORDS_DEFAULT,
    derive_default_freq_options,
};
pub use distribution::{calculate_bin_count, compute_numeric_bins, compute_value_counts};
pub use freq::{aggregate_frequencies, derive_cloud_weights, join_tokens};
pub use spec::{
    EnumTokenizeMode, RankedFrequencies, SpecFreqConfig, SpecFreqOptions, SpecHistogramBin,
    SpecWordCount, WordFreqError,
};
pub use stopwords::StopwordFilter;
pub use tokenizer::{strip_whitespace, tokenize, visit_tokens};
