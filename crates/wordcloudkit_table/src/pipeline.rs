//! Text kernel applied to one named column of a table.

use log::debug;
use polars::prelude::DataFrame;
use wordcloudkit_text::{
    RankedFrequencies, SpecFreqOptions, aggregate_frequencies, compute_numeric_bins,
    compute_value_counts, join_tokens,
};

use crate::spec::{EnumDistribution, TableError};
use crate::table::{extract_column_cells, extract_column_numbers, select_column};

/// Ranked word counts of `column`.
///
/// Fails only with [`TableError::InvalidColumn`]; an empty result means
/// nothing survived filtering.
pub fn compute_frequencies(
    table: &DataFrame,
    column: &str,
    options: &SpecFreqOptions,
) -> Result<RankedFrequencies, TableError> {
    let l_cells = extract_column_cells(table, column)?;
    Ok(aggregate_frequencies(&l_cells, options))
}

/// Space-joined filtered tokens of `column`, the word-cloud renderer input.
pub fn derive_cloud_text(
    table: &DataFrame,
    column: &str,
    options: &SpecFreqOptions,
) -> Result<String, TableError> {
    let l_cells = extract_column_cells(table, column)?;
    Ok(join_tokens(&l_cells, options))
}

/// Raw value distribution of `column`.
///
/// Numeric columns are binned (`n_bins`, Sturges' rule when `None`); other
/// columns are counted by whole cell text and truncated to `top_n`.
pub fn compute_distribution(
    table: &DataFrame,
    column: &str,
    top_n: Option<usize>,
    n_bins: Option<usize>,
) -> Result<EnumDistribution, TableError> {
    let col = select_column(table, column)?;
    if col.dtype().is_numeric() {
        let l_values = extract_column_numbers(table, column)?;
        let l_bins = compute_numeric_bins(&l_values, n_bins)?;
        debug!("[DIST] column={column:?} numeric values={} bins={}", l_values.len(), l_bins.len());
        return Ok(EnumDistribution::Numeric(l_bins));
    }

    let l_cells = extract_column_cells(table, column)?;
    let ranked = compute_value_counts(&l_cells, top_n);
    debug!("[DIST] column={column:?} categorical distinct_kept={}", ranked.len());
    Ok(EnumDistribution::Categorical(ranked))
}
