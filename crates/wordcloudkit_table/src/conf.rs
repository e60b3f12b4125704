//! Table/output constants and default preset factories.

use crate::spec::SpecChartOptions;

/// Rows shown by the table preview.
pub const N_ROWS_PREVIEW: usize = 8;
/// Chart width in pixels.
pub const N_CHART_WIDTH_DEFAULT: u32 = 800;
/// Chart height in pixels.
pub const N_CHART_HEIGHT_DEFAULT: u32 = 400;
/// Excel worksheet maximum row count.
pub const N_NROWS_EXCEL_MAX: usize = 1_048_576;
/// Excel sheet name maximum length.
pub const N_LEN_EXCEL_SHEET_NAME_MAX: usize = 31;
/// Characters not allowed in sheet names.
pub const TUP_EXCEL_ILLEGAL: [&str; 7] = ["*", ":", "?", "/", "\\", "[", "]"];
/// File extensions read as comma-separated text.
pub const TUP_EXT_CSV: [&str; 1] = ["csv"];
/// File extensions read as tab-separated text.
pub const TUP_EXT_TSV: [&str; 2] = ["tsv", "tab"];
/// File extensions read as polars IPC snapshots.
pub const TUP_EXT_IPC: [&str; 3] = ["ipc", "arrow", "feather"];
/// File extensions read as spreadsheets (first sheet, header row).
pub const TUP_EXT_EXCEL: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];
/// Header prefix for spreadsheet columns with a blank header cell.
pub const C_PREFIX_UNNAMED_COLUMN: &str = "Unnamed: ";

/// Build default chart options.
pub fn derive_default_chart_options() -> SpecChartOptions {
    SpecChartOptions {
        title: None,
        width: N_CHART_WIDTH_DEFAULT,
        height: N_CHART_HEIGHT_DEFAULT,
        if_insert_chart: true,
    }
}
