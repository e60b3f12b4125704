//! `wordcloudkit_table` v1:
//! DataFrame-side collaborators of the text kernel.
//!
//! Module layout:
//! - `conf`     : constants and default presets
//! - `spec`     : options/models/errors
//! - `util`     : pure helpers (cell text, file formats, sheet names)
//! - `table`    : load/preview/snapshot of polars DataFrames
//! - `pipeline` : run the text kernel against one named column
//! - `session`  : loaded-table context passed to each request
//! - `writer`   : chart workbook and word-cloud text outputs
pub mod conf;
pub mod pipeline;
pub mod session;
pub mod spec;
pub mod table;
pub mod util;
pub mod writer;

pub use conf::{
    N_CHART_HEIGHT_DEFAULT, N_CHART_WIDTH_DEFAULT, N_LEN_EXCEL_SHEET_NAME_MAX, N_ROWS_PREVIEW,
    TUP_EXCEL_ILLEGAL,
};
pub use pipeline::{compute_distribution, compute_frequencies, derive_cloud_text};
pub use session::SpecSession;
pub use spec::{
    EnumDistribution, EnumRenderOutcome, EnumTableFormat, SpecChartOptions, TableError,
};
pub use table::{
    extract_column_cells, extract_column_numbers, list_columns, load_table, preview_table,
    save_snapshot,
};
pub use util::{derive_cell_text_from_any_value, derive_table_format, sanitize_sheet_name};
pub use writer::{
    write_cloud_text, write_cloud_weights, write_frequency_chart, write_histogram_chart,
};
