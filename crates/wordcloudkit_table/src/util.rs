//! Stateless helpers shared by table loading, pipeline and writers.

use std::path::Path;

use polars::prelude::AnyValue;

use crate::conf::{
    N_LEN_EXCEL_SHEET_NAME_MAX, TUP_EXCEL_ILLEGAL, TUP_EXT_CSV, TUP_EXT_EXCEL, TUP_EXT_IPC,
    TUP_EXT_TSV,
};
use crate::spec::{EnumTableFormat, TableError};

////////////////////////////////////////////////////////////////////////////////
// #region CellText

/// String representation of one cell; `None` for missing values.
///
/// Floating-point NaN counts as missing. Integral floats keep one fractional
/// digit (`3.0`), booleans render as `True`/`False`.
pub fn derive_cell_text_from_any_value(value: AnyValue<'_>) -> Option<String> {
    match value {
        AnyValue::Null => None,
        AnyValue::String(val) => Some(val.to_string()),
        AnyValue::StringOwned(val) => Some(val.to_string()),
        AnyValue::Boolean(val) => Some(if val { "True" } else { "False" }.to_string()),
        AnyValue::UInt8(val) => Some(val.to_string()),
        AnyValue::UInt16(val) => Some(val.to_string()),
        AnyValue::UInt32(val) => Some(val.to_string()),
        AnyValue::UInt64(val) => Some(val.to_string()),
        AnyValue::Int8(val) => Some(val.to_string()),
        AnyValue::Int16(val) => Some(val.to_string()),
        AnyValue::Int32(val) => Some(val.to_string()),
        AnyValue::Int64(val) => Some(val.to_string()),
        AnyValue::Int128(val) => Some(val.to_string()),
        AnyValue::Float32(val) => {
            if val.is_nan() {
                None
            } else if val.is_finite() && val.fract() == 0.0 {
                Some(format!("{val:.1}"))
            } else {
                Some(derive_non_finite_text(val as f64).unwrap_or_else(|| val.to_string()))
            }
        }
        AnyValue::Float64(val) => {
            if val.is_nan() {
                None
            } else if val.is_finite() && val.fract() == 0.0 && val.abs() < 1e16 {
                Some(format!("{val:.1}"))
            } else {
                Some(derive_non_finite_text(val).unwrap_or_else(|| val.to_string()))
            }
        }
        _ => Some(value.to_string()),
    }
}

fn derive_non_finite_text(value: f64) -> Option<String> {
    if value.is_infinite() {
        return Some(if value.is_sign_positive() { "inf" } else { "-inf" }.to_string());
    }
    None
}

/// Numeric view of one cell; `None` for missing or non-numeric values.
pub fn derive_f64_from_any_value(value: AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::UInt8(val) => Some(val as f64),
        AnyValue::UInt16(val) => Some(val as f64),
        AnyValue::UInt32(val) => Some(val as f64),
        AnyValue::UInt64(val) => Some(val as f64),
        AnyValue::Int8(val) => Some(val as f64),
        AnyValue::Int16(val) => Some(val as f64),
        AnyValue::Int32(val) => Some(val as f64),
        AnyValue::Int64(val) => Some(val as f64),
        AnyValue::Int128(val) => Some(val as f64),
        AnyValue::Float32(val) => Some(val as f64),
        AnyValue::Float64(val) => Some(val),
        _ => None,
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region FileFormats

/// Derive the table format from the file extension (case-insensitive).
pub fn derive_table_format(path: &Path) -> Result<EnumTableFormat, TableError> {
    let c_ext = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    if TUP_EXT_CSV.contains(&c_ext.as_str()) {
        return Ok(EnumTableFormat::Csv);
    }
    if TUP_EXT_TSV.contains(&c_ext.as_str()) {
        return Ok(EnumTableFormat::Tsv);
    }
    if TUP_EXT_IPC.contains(&c_ext.as_str()) {
        return Ok(EnumTableFormat::Ipc);
    }
    if TUP_EXT_EXCEL.contains(&c_ext.as_str()) {
        return Ok(EnumTableFormat::Excel);
    }
    Err(TableError::UnsupportedFormat(path.to_path_buf()))
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetNormalization

/// Replace invalid chars and trim to valid Excel sheet name.
pub fn sanitize_sheet_name(name: &str, replace_to: &str) -> String {
    let mut c_name = name.to_string();
    for c_illegal in TUP_EXCEL_ILLEGAL {
        c_name = c_name.replace(c_illegal, replace_to);
    }
    let c_name_cut: String = c_name.chars().take(N_LEN_EXCEL_SHEET_NAME_MAX).collect();
    let c_name_trimmed = c_name_cut.trim().trim_matches('\'');
    if c_name_trimmed.is_empty() {
        return "Sheet".to_string();
    }
    c_name_trimmed.to_string()
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
