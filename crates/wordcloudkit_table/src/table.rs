//! Loading, previewing and persisting tables.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use log::debug;
use polars::prelude::{
    AnyValue, Column, CsvReadOptions, DataFrame, IpcReader, IpcWriter, NamedFrom, SerReader,
    SerWriter, Series,
};

use crate::conf::{C_PREFIX_UNNAMED_COLUMN, N_ROWS_PREVIEW};
use crate::spec::{EnumTableFormat, TableError};
use crate::util::{derive_cell_text_from_any_value, derive_f64_from_any_value, derive_table_format};

/// Load a table from `path`; the format follows the file extension.
///
/// Delimited text requires a header row. Empty fields become missing cells.
pub fn load_table(path: &Path) -> Result<DataFrame, TableError> {
    let enum_format = derive_table_format(path)?;
    let df = match enum_format {
        EnumTableFormat::Csv => read_delimited(path, b',')?,
        EnumTableFormat::Tsv => read_delimited(path, b'\t')?,
        EnumTableFormat::Ipc => IpcReader::new(File::open(path)?).finish()?,
        EnumTableFormat::Excel => read_excel(path)?,
    };
    debug!(
        "[LOAD] {} format={enum_format:?} shape=({}, {})",
        path.display(),
        df.height(),
        df.width()
    );
    Ok(df)
}

fn read_delimited(path: &Path, separator: u8) -> Result<DataFrame, TableError> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .map_parse_options(|opts| opts.with_separator(separator))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    Ok(df)
}

////////////////////////////////////////////////////////////////////////////////
// #region Spreadsheet

/// Read the first sheet of a workbook; the first row names the columns.
///
/// Column dtypes follow the cells: all-boolean -> Boolean, all-integral
/// numbers -> Int64, other numbers -> Float64, anything mixed -> String.
/// Blank and error cells are missing.
fn read_excel(path: &Path) -> Result<DataFrame, TableError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| TableError::EmptyWorkbook(path.to_path_buf()))??;

    let mut rows = range.rows();
    let Some(l_header) = rows.next() else {
        return Ok(DataFrame::empty());
    };
    let l_rows: Vec<&[Data]> = rows.collect();

    let l_columns: Vec<Column> = derive_excel_column_names(l_header)
        .iter()
        .enumerate()
        .map(|(n_idx_col, name)| {
            let l_cells: Vec<Option<&Data>> = l_rows
                .iter()
                .map(|row| row.get(n_idx_col).filter(|cell| !is_excel_cell_missing(cell)))
                .collect();
            derive_column_from_excel_cells(name, &l_cells)
        })
        .collect();
    Ok(DataFrame::new(l_columns)?)
}

fn is_excel_cell_missing(cell: &Data) -> bool {
    matches!(cell, Data::Empty | Data::Error(_))
}

/// Header texts; blanks become `Unnamed: <idx>`, repeats get a `.<k>` suffix.
fn derive_excel_column_names(l_header: &[Data]) -> Vec<String> {
    let mut dict_seen: HashMap<String, usize> = HashMap::new();
    l_header
        .iter()
        .enumerate()
        .map(|(n_idx_col, cell)| {
            let c_name = derive_excel_cell_text(cell)
                .filter(|c_text| !c_text.trim().is_empty())
                .unwrap_or_else(|| format!("{C_PREFIX_UNNAMED_COLUMN}{n_idx_col}"));
            let n_seen = dict_seen.entry(c_name.clone()).or_insert(0);
            *n_seen += 1;
            if *n_seen == 1 {
                c_name
            } else {
                format!("{c_name}.{}", *n_seen - 1)
            }
        })
        .collect()
}

fn derive_excel_cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(val) => Some(val.clone()),
        Data::Int(val) => derive_cell_text_from_any_value(AnyValue::Int64(*val)),
        Data::Float(val) => derive_cell_text_from_any_value(AnyValue::Float64(*val)),
        Data::Bool(val) => derive_cell_text_from_any_value(AnyValue::Boolean(*val)),
        other => Some(other.to_string()),
    }
}

fn derive_column_from_excel_cells(name: &str, l_cells: &[Option<&Data>]) -> Column {
    let l_present: Vec<&Data> = l_cells.iter().flatten().copied().collect();

    let series = if !l_present.is_empty()
        && l_present.iter().all(|cell| matches!(cell, Data::Bool(_)))
    {
        let l_values: Vec<Option<bool>> = l_cells
            .iter()
            .map(|cell| match cell {
                Some(Data::Bool(val)) => Some(*val),
                _ => None,
            })
            .collect();
        Series::new(name.into(), l_values)
    } else if !l_present.is_empty()
        && l_present
            .iter()
            .all(|cell| matches!(cell, Data::Int(_) | Data::Float(_)))
    {
        let if_integral = l_present.iter().all(|cell| match cell {
            Data::Float(val) => val.fract() == 0.0 && val.abs() < 9.0e15,
            _ => true,
        });
        if if_integral {
            let l_values: Vec<Option<i64>> = l_cells
                .iter()
                .map(|cell| match cell {
                    Some(Data::Int(val)) => Some(*val),
                    Some(Data::Float(val)) => Some(*val as i64),
                    _ => None,
                })
                .collect();
            Series::new(name.into(), l_values)
        } else {
            let l_values: Vec<Option<f64>> = l_cells
                .iter()
                .map(|cell| match cell {
                    Some(Data::Int(val)) => Some(*val as f64),
                    Some(Data::Float(val)) => Some(*val),
                    _ => None,
                })
                .collect();
            Series::new(name.into(), l_values)
        }
    } else {
        let l_values: Vec<Option<String>> = l_cells
            .iter()
            .map(|cell| cell.and_then(derive_excel_cell_text))
            .collect();
        Series::new(name.into(), l_values)
    };
    Column::from(series)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

/// Persist `table` as a polars IPC snapshot. Round-trips through [`load_table`].
pub fn save_snapshot(table: &DataFrame, path: &Path) -> Result<(), TableError> {
    let mut file = File::create(path)?;
    let mut df = table.clone();
    IpcWriter::new(&mut file).finish(&mut df)?;
    debug!("[SNAPSHOT] {} shape=({}, {})", path.display(), df.height(), df.width());
    Ok(())
}

/// Text rendering of the first `n_rows` rows (default [`N_ROWS_PREVIEW`]).
pub fn preview_table(table: &DataFrame, n_rows: Option<usize>) -> String {
    table
        .head(Some(n_rows.unwrap_or(N_ROWS_PREVIEW)))
        .to_string()
}

/// Column names in table order.
pub fn list_columns(table: &DataFrame) -> Vec<String> {
    table
        .get_column_names_str()
        .into_iter()
        .map(ToString::to_string)
        .collect()
}

/// Resolve `column` or fail with [`TableError::InvalidColumn`].
pub(crate) fn select_column<'a>(
    table: &'a DataFrame,
    column: &str,
) -> Result<&'a Column, TableError> {
    if !table.get_column_names_str().contains(&column) {
        return Err(TableError::InvalidColumn {
            column: column.to_string(),
            available: list_columns(table),
        });
    }
    Ok(table.column(column)?)
}

/// Cell texts of `column`; missing cells (null, NaN) are `None`.
pub fn extract_column_cells(
    table: &DataFrame,
    column: &str,
) -> Result<Vec<Option<String>>, TableError> {
    let col = select_column(table, column)?;
    let mut l_cells = Vec::with_capacity(col.len());
    for n_idx_row in 0..col.len() {
        l_cells.push(derive_cell_text_from_any_value(col.get(n_idx_row)?));
    }
    Ok(l_cells)
}

/// Numeric values of `column`, skipping missing and non-numeric cells.
pub fn extract_column_numbers(table: &DataFrame, column: &str) -> Result<Vec<f64>, TableError> {
    let col = select_column(table, column)?;
    let mut l_values = Vec::with_capacity(col.len());
    for n_idx_row in 0..col.len() {
        if let Some(value) = derive_f64_from_any_value(col.get(n_idx_row)?) {
            l_values.push(value);
        }
    }
    Ok(l_values)
}
