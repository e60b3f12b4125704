//! Table-side option models, render outcomes and top-level error types.

use std::path::PathBuf;

use polars::prelude::PolarsError;
use rust_xlsxwriter::XlsxError;
use thiserror::Error;
use wordcloudkit_text::{RankedFrequencies, SpecHistogramBin, WordFreqError};

use crate::conf::derive_default_chart_options;

////////////////////////////////////////////////////////////////////////////////
// #region EnumsInit

/// Input file format, derived from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumTableFormat {
    /// Comma-separated text with a header row.
    Csv,
    /// Tab-separated text with a header row.
    Tsv,
    /// Polars IPC snapshot.
    Ipc,
    /// Spreadsheet workbook; the first sheet is read, first row as header.
    Excel,
}

/// Result of handing data to a renderer adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumRenderOutcome {
    /// Output was written to this path.
    Written(PathBuf),
    /// Input was empty; nothing was written.
    NothingToDisplay,
}

/// Distribution of one column's raw values.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumDistribution {
    /// Non-numeric column: ranked whole-cell counts.
    Categorical(RankedFrequencies),
    /// Numeric column: equal-width bins.
    Numeric(Vec<SpecHistogramBin>),
}

impl EnumDistribution {
    /// True when there is nothing to plot.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Categorical(ranked) => ranked.is_empty(),
            Self::Numeric(l_bins) => l_bins.is_empty(),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Options

/// Chart workbook options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecChartOptions {
    /// Chart title; derived from the column name when `None`.
    pub title: Option<String>,
    /// Chart width in pixels.
    pub width: u32,
    /// Chart height in pixels.
    pub height: u32,
    /// Insert a native chart next to the data (data-only workbook when false).
    pub if_insert_chart: bool,
}

impl Default for SpecChartOptions {
    fn default() -> Self {
        derive_default_chart_options()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Table loading, pipeline and output failures.
#[derive(Debug, Error)]
pub enum TableError {
    /// Requested column is not in the table.
    #[error("Column not found: {column:?} (available: {available:?})")]
    InvalidColumn {
        /// Requested column name.
        column: String,
        /// Columns present in the table.
        available: Vec<String>,
    },
    /// File extension is not a supported table format.
    #[error("Unsupported table format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    /// Spreadsheet has no worksheet to read.
    #[error("Workbook has no sheets: {}", .0.display())]
    EmptyWorkbook(PathBuf),
    /// Session has no table yet.
    #[error("No table loaded.")]
    NoTableLoaded,
    /// Option value outside its accepted range.
    #[error("Invalid option: {0}")]
    InvalidOption(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Polars(#[from] PolarsError),
    #[error("spreadsheet read error: {0}")]
    Spreadsheet(#[from] calamine::Error),
    #[error("xlsx write error: {0}")]
    Xlsx(#[from] XlsxError),
    #[error(transparent)]
    Text(#[from] WordFreqError),
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
