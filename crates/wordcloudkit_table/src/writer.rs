//! Renderer adapters: chart workbooks (rust_xlsxwriter) and word-cloud text files.
//!
//! Every writer returns [`EnumRenderOutcome::NothingToDisplay`] for empty input
//! and leaves the filesystem untouched in that case.

use std::fs;
use std::path::Path;

use log::{debug, info};
use rust_xlsxwriter::{Chart, ChartType, Format, Workbook};
use wordcloudkit_text::{RankedFrequencies, SpecHistogramBin};

use crate::conf::N_NROWS_EXCEL_MAX;
use crate::spec::{EnumDistribution, EnumRenderOutcome, SpecChartOptions, TableError};
use crate::util::sanitize_sheet_name;

/// Label/count rows plus chart captions for one workbook.
struct SpecBarSheet<'a> {
    sheet_name: String,
    header_label: &'a str,
    l_rows: Vec<(String, u64)>,
    title: String,
    axis_x_name: &'a str,
}

////////////////////////////////////////////////////////////////////////////////
// #region ChartWorkbooks

/// Write ranked word counts and a column chart of them to an XLSX workbook.
pub fn write_frequency_chart(
    path: &Path,
    column: &str,
    frequencies: &RankedFrequencies,
    options: &SpecChartOptions,
) -> Result<EnumRenderOutcome, TableError> {
    if frequencies.is_empty() {
        return Ok(EnumRenderOutcome::NothingToDisplay);
    }

    let spec_sheet = SpecBarSheet {
        sheet_name: sanitize_sheet_name(column, "_"),
        header_label: "token",
        l_rows: frequencies
            .iter()
            .map(|(token, n_count)| (token.to_string(), n_count))
            .collect(),
        title: options
            .title
            .clone()
            .unwrap_or_else(|| format!("Top {} words in {column}", frequencies.len())),
        axis_x_name: column,
    };
    write_bar_workbook(path, &spec_sheet, options)
}

/// Write a value distribution (categorical counts or numeric bins) and its chart.
pub fn write_histogram_chart(
    path: &Path,
    column: &str,
    distribution: &EnumDistribution,
    options: &SpecChartOptions,
) -> Result<EnumRenderOutcome, TableError> {
    if distribution.is_empty() {
        return Ok(EnumRenderOutcome::NothingToDisplay);
    }

    let (header_label, l_rows) = match distribution {
        EnumDistribution::Categorical(ranked) => (
            "value",
            ranked
                .iter()
                .map(|(value, n_count)| (value.to_string(), n_count))
                .collect::<Vec<_>>(),
        ),
        EnumDistribution::Numeric(l_bins) => (
            "bin",
            l_bins
                .iter()
                .enumerate()
                .map(|(n_idx, spec_bin)| {
                    (
                        derive_bin_label(spec_bin, n_idx + 1 == l_bins.len()),
                        spec_bin.count,
                    )
                })
                .collect::<Vec<_>>(),
        ),
    };

    let spec_sheet = SpecBarSheet {
        sheet_name: sanitize_sheet_name(column, "_"),
        header_label,
        l_rows,
        title: options
            .title
            .clone()
            .unwrap_or_else(|| format!("Distribution of {column}")),
        axis_x_name: column,
    };
    write_bar_workbook(path, &spec_sheet, options)
}

fn write_bar_workbook(
    path: &Path,
    spec_sheet: &SpecBarSheet<'_>,
    options: &SpecChartOptions,
) -> Result<EnumRenderOutcome, TableError> {
    let n_rows_data = spec_sheet.l_rows.len();
    if n_rows_data + 1 > N_NROWS_EXCEL_MAX {
        return Err(TableError::InvalidOption(format!(
            "{n_rows_data} rows exceed the worksheet limit; request a smaller top_n."
        )));
    }
    let n_row_last = cast_row_num(n_rows_data)?;

    let mut workbook = Workbook::new();
    let fmt_header = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(&spec_sheet.sheet_name)?;

    worksheet.write_string_with_format(0, 0, spec_sheet.header_label, &fmt_header)?;
    worksheet.write_string_with_format(0, 1, "count", &fmt_header)?;
    let mut n_width_label = spec_sheet.header_label.chars().count();
    for (n_idx, (label, n_count)) in spec_sheet.l_rows.iter().enumerate() {
        let n_row = cast_row_num(n_idx + 1)?;
        worksheet.write_string(n_row, 0, label.as_str())?;
        worksheet.write_number(n_row, 1, *n_count as f64)?;
        n_width_label = usize::max(n_width_label, label.chars().count());
    }
    worksheet.set_column_width(0, (n_width_label.min(60) + 2) as f64)?;
    worksheet.set_freeze_panes(1, 0)?;

    if options.if_insert_chart {
        let c_sheet = spec_sheet.sheet_name.as_str();
        let mut chart = Chart::new(ChartType::Column);
        chart
            .add_series()
            .set_name("count")
            .set_categories((c_sheet, 1, 0, n_row_last, 0))
            .set_values((c_sheet, 1, 1, n_row_last, 1));
        chart.title().set_name(spec_sheet.title.as_str());
        chart.x_axis().set_name(spec_sheet.axis_x_name);
        chart.y_axis().set_name("Frequency");
        chart.legend().set_hidden();
        chart.set_width(options.width).set_height(options.height);
        worksheet.insert_chart(1, 3, &chart)?;
    }

    workbook.save(path)?;
    info!("Chart workbook saved to {}", path.display());
    debug!(
        "[CHART] sheet={:?} rows={n_rows_data} chart={}",
        spec_sheet.sheet_name, options.if_insert_chart
    );
    Ok(EnumRenderOutcome::Written(path.to_path_buf()))
}

fn derive_bin_label(spec_bin: &SpecHistogramBin, if_last: bool) -> String {
    let c_close = if if_last { "]" } else { ")" };
    format!(
        "[{}, {}{c_close}",
        format_bin_edge(spec_bin.lower),
        format_bin_edge(spec_bin.upper)
    )
}

fn format_bin_edge(value: f64) -> String {
    if value.fract() == 0.0 {
        return format!("{value:.0}");
    }
    let c_value = format!("{value:.3}");
    c_value.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn cast_row_num(value: usize) -> Result<u32, TableError> {
    u32::try_from(value).map_err(|_| TableError::InvalidOption(format!("row index overflow: {value}")))
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region CloudText

/// Write the space-joined token stream for an external word-cloud renderer.
pub fn write_cloud_text(path: &Path, text: &str) -> Result<EnumRenderOutcome, TableError> {
    if text.is_empty() {
        return Ok(EnumRenderOutcome::NothingToDisplay);
    }
    fs::write(path, text)?;
    info!("Word-cloud text saved to {}", path.display());
    Ok(EnumRenderOutcome::Written(path.to_path_buf()))
}

/// Write `token<TAB>weight` lines for renderers that take explicit weights.
pub fn write_cloud_weights(
    path: &Path,
    weights: &[(String, f64)],
) -> Result<EnumRenderOutcome, TableError> {
    if weights.is_empty() {
        return Ok(EnumRenderOutcome::NothingToDisplay);
    }
    let c_text: String = weights
        .iter()
        .map(|(token, n_weight)| format!("{token}\t{n_weight:.6}\n"))
        .collect();
    fs::write(path, c_text)?;
    info!("Word-cloud weights saved to {}", path.display());
    Ok(EnumRenderOutcome::Written(path.to_path_buf()))
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use wordcloudkit_text::{SpecFreqOptions, StopwordFilter, aggregate_frequencies};

    use super::*;

    fn sample_frequencies() -> RankedFrequencies {
        let cells = vec![Some("rust polars rust"), None, Some("xlsx rust")];
        let options = SpecFreqOptions {
            stopwords: StopwordFilter::empty(),
            ..Default::default()
        };
        aggregate_frequencies(&cells, &options)
    }

    fn assert_is_xlsx(path: &Path) {
        let v_bytes = fs::read(path).expect("read workbook");
        assert!(v_bytes.starts_with(b"PK"), "xlsx is a zip container");
    }

    #[test]
    fn frequency_chart_is_written() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("freq.xlsx");

        let outcome = write_frequency_chart(
            &path,
            "review text",
            &sample_frequencies(),
            &SpecChartOptions::default(),
        )
        .expect("write chart");

        assert_eq!(outcome, EnumRenderOutcome::Written(path.clone()));
        assert_is_xlsx(&path);
    }

    #[test]
    fn empty_frequencies_write_nothing() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("freq.xlsx");

        let outcome = write_frequency_chart(
            &path,
            "review",
            &RankedFrequencies::default(),
            &SpecChartOptions::default(),
        )
        .expect("write chart");

        assert_eq!(outcome, EnumRenderOutcome::NothingToDisplay);
        assert!(!path.exists());
    }

    #[test]
    fn numeric_histogram_is_written_without_chart() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("hist.xlsx");
        let distribution = EnumDistribution::Numeric(vec![
            SpecHistogramBin {
                lower: 0.0,
                upper: 0.5,
                count: 2,
            },
            SpecHistogramBin {
                lower: 0.5,
                upper: 1.0,
                count: 1,
            },
        ]);
        let options = SpecChartOptions {
            if_insert_chart: false,
            ..Default::default()
        };

        let outcome =
            write_histogram_chart(&path, "score", &distribution, &options).expect("write hist");

        assert_eq!(outcome, EnumRenderOutcome::Written(path.clone()));
        assert_is_xlsx(&path);
    }

    #[test]
    fn bin_labels_close_last_edge() {
        let spec_bin = SpecHistogramBin {
            lower: 1.0,
            upper: 2.125,
            count: 0,
        };
        assert_eq!(derive_bin_label(&spec_bin, false), "[1, 2.125)");
        assert_eq!(derive_bin_label(&spec_bin, true), "[1, 2.125]");
        assert_eq!(format_bin_edge(0.5), "0.5");
        assert_eq!(format_bin_edge(1.0 / 3.0), "0.333");
    }

    #[test]
    fn cloud_text_and_weights() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path_text = tmp.path().join("cloud.txt");
        let path_weights = tmp.path().join("cloud.tsv");

        assert_eq!(
            write_cloud_text(&path_text, "").expect("empty"),
            EnumRenderOutcome::NothingToDisplay
        );
        assert!(!path_text.exists());

        write_cloud_text(&path_text, "rust polars rust").expect("write text");
        assert_eq!(
            fs::read_to_string(&path_text).expect("read text"),
            "rust polars rust"
        );

        let l_weights = vec![("rust".to_string(), 1.0), ("xlsx".to_string(), 0.5)];
        write_cloud_weights(&path_weights, &l_weights).expect("write weights");
        assert_eq!(
            fs::read_to_string(&path_weights).expect("read weights"),
            "rust\t1.000000\nxlsx\t0.500000\n"
        );
    }
}
