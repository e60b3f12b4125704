//! Raw value distributions for the histogram view.
//!
//! Unlike [`crate::freq`], nothing here tokenizes or filters: categorical
//! columns are counted by whole cell text, numeric columns are binned.

use crate::conf::N_BINS_MAX;
use crate::spec::{RankedFrequencies, SpecHistogramBin, WordFreqError};
use crate::util::FrequencyCounter;

/// Count whole cell texts over non-missing `cells`, ranked like word frequencies.
pub fn compute_value_counts<S>(cells: &[Option<S>], top_n: Option<usize>) -> RankedFrequencies
where
    S: AsRef<str>,
{
    let mut counter = FrequencyCounter::default();
    for c_text in cells.iter().flatten() {
        counter.add(c_text.as_ref());
    }
    counter.into_ranked(top_n)
}

/// Sturges' rule: `ceil(log2(n)) + 1`, at least one bin.
pub fn calculate_bin_count(n_values: usize) -> usize {
    if n_values <= 1 {
        return 1;
    }
    (n_values as f64).log2().ceil() as usize + 1
}

/// Equal-width histogram over the finite entries of `values`.
///
/// - `n_bins == None` derives the count with [`calculate_bin_count`].
/// - `n_bins` must lie in `1..=N_BINS_MAX`.
/// - Non-finite values (NaN, +/-Inf) are skipped.
/// - The last bin is closed on the right so the maximum is counted.
/// - A constant series collapses into one zero-width bin.
/// - No finite values -> empty result.
pub fn compute_numeric_bins(
    values: &[f64],
    n_bins: Option<usize>,
) -> Result<Vec<SpecHistogramBin>, WordFreqError> {
    if let Some(n_bins_req) = n_bins.filter(|n| !(1..=N_BINS_MAX).contains(n)) {
        return Err(WordFreqError::InvalidOption(format!(
            "Arg `n_bins` must be in 1..={N_BINS_MAX} or None, got {n_bins_req}."
        )));
    }

    let l_values_finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if l_values_finite.is_empty() {
        return Ok(vec![]);
    }

    let n_min = l_values_finite.iter().copied().fold(f64::INFINITY, f64::min);
    let n_max = l_values_finite
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);

    if n_min == n_max {
        return Ok(vec![SpecHistogramBin {
            lower: n_min,
            upper: n_max,
            count: l_values_finite.len() as u64,
        }]);
    }

    let n_bins = n_bins
        .unwrap_or_else(|| calculate_bin_count(l_values_finite.len()))
        .min(N_BINS_MAX);
    // Halved span stays finite even when `n_max - n_min` overflows.
    let n_span_half = n_max * 0.5 - n_min * 0.5;

    let mut l_bins: Vec<SpecHistogramBin> = (0..n_bins)
        .map(|n_idx| SpecHistogramBin {
            lower: interpolate_edge(n_min, n_max, n_idx, n_bins),
            upper: interpolate_edge(n_min, n_max, n_idx + 1, n_bins),
            count: 0,
        })
        .collect();

    for value in l_values_finite {
        let n_frac = (value * 0.5 - n_min * 0.5) / n_span_half;
        let n_idx = ((n_frac * n_bins as f64) as usize).min(n_bins - 1);
        l_bins[n_idx].count += 1;
    }

    Ok(l_bins)
}

/// Edge `n_idx` of `n_bins` equal-width bins; exact at both ends, never overflows.
fn interpolate_edge(n_min: f64, n_max: f64, n_idx: usize, n_bins: usize) -> f64 {
    if n_idx == 0 {
        return n_min;
    }
    if n_idx >= n_bins {
        return n_max;
    }
    let n_t = n_idx as f64 / n_bins as f64;
    n_min * (1.0 - n_t) + n_max * n_t
}
