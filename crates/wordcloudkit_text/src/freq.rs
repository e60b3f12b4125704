//! Column-level frequency aggregation.
//!
//! Pipeline per column: drop missing cells -> tokenize each cell -> drop
//! stopwords -> count -> rank (count desc, first occurrence on ties) -> top-N.

use log::{debug, warn};
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;

use crate::spec::{RankedFrequencies, SpecFreqOptions};
use crate::tokenizer::visit_tokens;
use crate::util::{FrequencyCounter, calculate_worker_limit};

/// Count non-stopword tokens over all non-missing `cells` and rank them.
///
/// Pure function of `(cells, options)`. An empty result is a valid outcome
/// (all cells missing, or only stopwords); callers present it as "nothing to
/// display".
///
/// With `options.num_workers_max > 1` cells are tokenized on a scoped rayon
/// pool; counting stays serial in column order, so the ranking is identical
/// to the serial path.
pub fn aggregate_frequencies<S>(cells: &[Option<S>], options: &SpecFreqOptions) -> RankedFrequencies
where
    S: AsRef<str> + Sync,
{
    let mut counter = FrequencyCounter::default();
    let mut n_tokens_counted = 0u64;
    visit_filtered_tokens(cells, options, |token| {
        counter.add(token);
        n_tokens_counted += 1;
    });

    let ranked = counter.into_ranked(options.top_n);
    debug!(
        "[FREQ] cells={} tokens={} distinct_kept={} top_n={:?}",
        cells.len(),
        n_tokens_counted,
        ranked.len(),
        options.top_n
    );
    ranked
}

/// Space-join the filtered token stream in column order (word-cloud input).
///
/// `options.top_n` does not apply here: the renderer weighs tokens itself.
pub fn join_tokens<S>(cells: &[Option<S>], options: &SpecFreqOptions) -> String
where
    S: AsRef<str> + Sync,
{
    let mut c_text = String::new();
    visit_filtered_tokens(cells, options, |token| {
        if !c_text.is_empty() {
            c_text.push(' ');
        }
        c_text.push_str(token);
    });
    c_text
}

/// Relative weights `count / max_count` in rank order, for weight-driven renderers.
pub fn derive_cloud_weights(frequencies: &RankedFrequencies) -> Vec<(String, f64)> {
    let Some(n_count_max) = frequencies.entries().first().map(|spec_wc| spec_wc.count) else {
        return vec![];
    };
    frequencies
        .iter()
        .map(|(token, n_count)| (token.to_string(), n_count as f64 / n_count_max as f64))
        .collect()
}

fn visit_filtered_tokens<S, F>(cells: &[Option<S>], options: &SpecFreqOptions, mut f: F)
where
    S: AsRef<str> + Sync,
    F: FnMut(&str),
{
    let n_workers_max = calculate_worker_limit(options.num_workers_max);

    let visit_serial = |f: &mut F| {
        for c_text in cells.iter().flatten() {
            visit_tokens(c_text.as_ref(), options.rule_tokenize, |token| {
                if !options.stopwords.is_stopword(token) {
                    f(token);
                }
            });
        }
    };

    if n_workers_max <= 1 || cells.len() < 2 {
        visit_serial(&mut f);
        return;
    }

    let thread_pool = ThreadPoolBuilder::new().num_threads(n_workers_max).build();
    let Ok(thread_pool) = thread_pool else {
        warn!(
            "Failed to initialize thread pool (workers={n_workers_max}); fallback to serial tokenization."
        );
        visit_serial(&mut f);
        return;
    };

    let l_tokens_by_cell = thread_pool.install(|| {
        cells
            .par_iter()
            .map(|cell| {
                let mut l_tokens = Vec::new();
                if let Some(c_text) = cell {
                    visit_tokens(c_text.as_ref(), options.rule_tokenize, |token| {
                        if !options.stopwords.is_stopword(token) {
                            l_tokens.push(token.to_string());
                        }
                    });
                }
                l_tokens
            })
            .collect::<Vec<_>>()
    });
    for token in l_tokens_by_cell.iter().flatten() {
        f(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::EnumTokenizeMode;
    use crate::stopwords::StopwordFilter;
    use crate::tokenizer::tokenize;

    fn options_with(stopwords: &[&str], top_n: Option<usize>) -> SpecFreqOptions {
        SpecFreqOptions {
            stopwords: StopwordFilter::from_list(stopwords),
            top_n,
            ..Default::default()
        }
    }

    fn sample_column() -> Vec<Option<&'static str>> {
        vec![Some("가 나다 가"), Some("나다"), None, Some("가")]
    }

    #[test]
    fn stopwords_are_excluded_and_survivors_ranked() {
        let ranked = aggregate_frequencies(&sample_column(), &options_with(&["가"], None));

        assert_eq!(ranked.iter().collect::<Vec<_>>(), vec![("나다", 2)]);
        assert_eq!(ranked.count_of("가"), 0);
    }

    #[test]
    fn no_stopwords_counts_everything() {
        let ranked = aggregate_frequencies(&sample_column(), &options_with(&[], None));

        assert_eq!(
            ranked.iter().collect::<Vec<_>>(),
            vec![("가", 3), ("나다", 2)]
        );
    }

    #[test]
    fn strip_mode_counts_fused_tokens() {
        let options = SpecFreqOptions {
            rule_tokenize: EnumTokenizeMode::StripWhitespace,
            ..options_with(&["가"], None)
        };
        let ranked = aggregate_frequencies(&sample_column(), &options);

        assert_eq!(
            ranked.iter().collect::<Vec<_>>(),
            vec![("가나다가", 1), ("나다", 1)]
        );
    }

    #[test]
    fn all_missing_column_yields_empty_result() {
        let cells: Vec<Option<String>> = vec![None, None, None];
        let ranked = aggregate_frequencies(&cells, &options_with(&[], Some(20)));

        assert!(ranked.is_empty());
        assert_eq!(ranked.top_n(20).len(), 0);
    }

    #[test]
    fn stopword_only_column_yields_empty_result() {
        let cells = vec![Some("은 는"), Some("는, 은!")];
        let ranked = aggregate_frequencies(&cells, &SpecFreqOptions::default());

        assert!(ranked.is_empty());
        assert_eq!(join_tokens(&cells, &SpecFreqOptions::default()), "");
    }

    #[test]
    fn ties_keep_first_occurrence_order() {
        let cells = vec![Some("zeta alpha"), Some("beta zeta alpha beta")];
        let ranked = aggregate_frequencies(&cells, &options_with(&[], None));

        assert_eq!(
            ranked.iter().collect::<Vec<_>>(),
            vec![("zeta", 2), ("alpha", 2), ("beta", 2)]
        );
    }

    #[test]
    fn sum_of_counts_equals_non_stopword_token_total() {
        let cells = vec![
            Some("the cat and the hat"),
            None,
            Some("a cat, a bat; the end"),
            Some(""),
        ];
        let options = options_with(&["the", "a", "and"], None);
        let ranked = aggregate_frequencies(&cells, &options);

        let n_expected = cells
            .iter()
            .flatten()
            .flat_map(|c| tokenize(c, EnumTokenizeMode::Split))
            .filter(|t| !options.stopwords.is_stopword(t))
            .count() as u64;
        assert_eq!(ranked.total_count(), n_expected);
        for stopword in ["the", "a", "and"] {
            assert_eq!(ranked.count_of(stopword), 0);
        }
    }

    #[test]
    fn top_n_truncates_after_ranking() {
        let cells = vec![Some("a b b c c c d d d d")];
        let ranked = aggregate_frequencies(&cells, &options_with(&[], Some(2)));

        assert_eq!(ranked.iter().collect::<Vec<_>>(), vec![("d", 4), ("c", 3)]);
    }

    #[test]
    fn parallel_tokenization_matches_serial() {
        let cells: Vec<Option<String>> = (0..200)
            .map(|n| {
                if n % 7 == 0 {
                    None
                } else {
                    Some(format!("tok{} shared tok{} 은", n % 13, n % 5))
                }
            })
            .collect();

        let options_serial = options_with(&["은"], None);
        let options_parallel = SpecFreqOptions {
            num_workers_max: Some(4),
            ..options_with(&["은"], None)
        };

        assert_eq!(
            aggregate_frequencies(&cells, &options_serial),
            aggregate_frequencies(&cells, &options_parallel)
        );
        assert_eq!(
            join_tokens(&cells, &options_serial),
            join_tokens(&cells, &options_parallel)
        );
    }

    #[test]
    fn join_tokens_keeps_column_order_and_filters() {
        let cells = vec![Some("데이터 는 좋다"), None, Some("데이터!")];
        let c_text = join_tokens(&cells, &SpecFreqOptions::default());

        assert_eq!(c_text, "데이터 좋다 데이터");
    }

    #[test]
    fn cloud_weights_are_relative_to_top_count() {
        let cells = vec![Some("a a a a b b c")];
        let ranked = aggregate_frequencies(&cells, &options_with(&[], None));
        let l_weights = derive_cloud_weights(&ranked);

        assert_eq!(l_weights[0], ("a".to_string(), 1.0));
        assert_eq!(l_weights[1], ("b".to_string(), 0.5));
        assert_eq!(l_weights[2], ("c".to_string(), 0.25));
        assert!(derive_cloud_weights(&RankedFrequencies::default()).is_empty());
    }
}
