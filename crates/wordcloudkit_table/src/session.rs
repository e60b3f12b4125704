//! Explicit request context: the currently loaded table and where it came from.

use std::path::{Path, PathBuf};

use log::info;
use polars::prelude::DataFrame;
use wordcloudkit_text::{RankedFrequencies, SpecFreqOptions};

use crate::pipeline::{compute_distribution, compute_frequencies, derive_cloud_text};
use crate::spec::{EnumDistribution, TableError};
use crate::table::{list_columns, load_table, preview_table, save_snapshot};

/// Loaded table plus its source path.
///
/// A load replaces the table wholesale; a failed load keeps the previous one.
/// Requests only read the table.
#[derive(Debug, Default, Clone)]
pub struct SpecSession {
    table: Option<DataFrame>,
    path_source: Option<PathBuf>,
}

impl SpecSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `path` and make it the current table.
    pub fn load(&mut self, path: &Path) -> Result<&DataFrame, TableError> {
        let df = load_table(path)?;
        info!(
            "Loaded {} ({} rows x {} columns)",
            path.display(),
            df.height(),
            df.width()
        );
        self.path_source = Some(path.to_path_buf());
        let df_current: &DataFrame = self.table.insert(df);
        Ok(df_current)
    }

    /// Replace the current table with an in-memory one.
    pub fn set_table(&mut self, table: DataFrame, path_source: Option<PathBuf>) {
        self.table = Some(table);
        self.path_source = path_source;
    }

    pub fn table(&self) -> Result<&DataFrame, TableError> {
        self.table.as_ref().ok_or(TableError::NoTableLoaded)
    }

    pub fn path_source(&self) -> Option<&Path> {
        self.path_source.as_deref()
    }

    pub fn list_columns(&self) -> Result<Vec<String>, TableError> {
        Ok(list_columns(self.table()?))
    }

    pub fn preview(&self, n_rows: Option<usize>) -> Result<String, TableError> {
        Ok(preview_table(self.table()?, n_rows))
    }

    pub fn compute_frequencies(
        &self,
        column: &str,
        options: &SpecFreqOptions,
    ) -> Result<RankedFrequencies, TableError> {
        compute_frequencies(self.table()?, column, options)
    }

    pub fn derive_cloud_text(
        &self,
        column: &str,
        options: &SpecFreqOptions,
    ) -> Result<String, TableError> {
        derive_cloud_text(self.table()?, column, options)
    }

    pub fn compute_distribution(
        &self,
        column: &str,
        top_n: Option<usize>,
        n_bins: Option<usize>,
    ) -> Result<EnumDistribution, TableError> {
        compute_distribution(self.table()?, column, top_n, n_bins)
    }

    pub fn save_snapshot(&self, path: &Path) -> Result<(), TableError> {
        save_snapshot(self.table()?, path)
    }
}
