//! Subcommand execution.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, info};
use wordcloudkit_table::{
    EnumRenderOutcome, SpecChartOptions, SpecSession, TableError, write_cloud_text,
    write_cloud_weights, write_frequency_chart, write_histogram_chart,
};
use wordcloudkit_text::{
    RankedFrequencies, SpecFreqConfig, SpecFreqOptions, StopwordFilter, WordFreqError,
    derive_cloud_weights,
};

use crate::args::{ChartArgs, Cli, EnumCommand, EnumOutputFormat, FreqArgs};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 1;
pub const EXIT_USAGE: i32 = 2;

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        EnumCommand::Columns { path } => {
            let session = load_session(&path)?;
            for column in session.list_columns()? {
                println!("{column}");
            }
        }
        EnumCommand::Preview { path, rows } => {
            let session = load_session(&path)?;
            println!("{}", session.preview(Some(rows))?);
        }
        EnumCommand::Freq {
            input,
            freq,
            format,
        } => {
            let session = load_session(&input.path)?;
            let options = derive_freq_options(&freq)?;
            let ranked = session.compute_frequencies(&input.column, &options)?;
            if ranked.is_empty() && format == EnumOutputFormat::Text {
                println!("{}", derive_nothing_message(&input.column));
            } else {
                print!("{}", render_frequencies(&ranked, format)?);
            }
        }
        EnumCommand::Cloud {
            input,
            freq,
            out,
            weights,
        } => {
            let session = load_session(&input.path)?;
            let options = derive_freq_options(&freq)?;
            let c_text = session.derive_cloud_text(&input.column, &options)?;
            report_outcome(&input.column, write_cloud_text(&out, &c_text)?);
            if let Some(path_weights) = weights {
                let ranked = session.compute_frequencies(&input.column, &options)?;
                let l_weights = derive_cloud_weights(&ranked);
                report_outcome(&input.column, write_cloud_weights(&path_weights, &l_weights)?);
            }
        }
        EnumCommand::Chart { input, freq, chart } => {
            let session = load_session(&input.path)?;
            let options = derive_freq_options(&freq)?;
            let ranked = session.compute_frequencies(&input.column, &options)?;
            let outcome = write_frequency_chart(
                &chart.out,
                &input.column,
                &ranked,
                &derive_chart_options(&chart),
            )?;
            report_outcome(&input.column, outcome);
        }
        EnumCommand::Histogram {
            input,
            top_n,
            bins,
            chart,
        } => {
            let session = load_session(&input.path)?;
            let distribution = session.compute_distribution(&input.column, Some(top_n), bins)?;
            let outcome = write_histogram_chart(
                &chart.out,
                &input.column,
                &distribution,
                &derive_chart_options(&chart),
            )?;
            report_outcome(&input.column, outcome);
        }
        EnumCommand::Snapshot { path, out } => {
            let session = load_session(&path)?;
            session
                .save_snapshot(&out)
                .with_context(|| format!("Failed to write snapshot: {}", out.display()))?;
            println!("Wrote {}", out.display());
        }
    }
    Ok(())
}

/// Map a failure to the process exit code: bad input is a usage error.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    if let Some(err_table) = err.downcast_ref::<TableError>() {
        return match err_table {
            TableError::InvalidColumn { .. }
            | TableError::UnsupportedFormat(_)
            | TableError::EmptyWorkbook(_)
            | TableError::InvalidOption(_)
            | TableError::Text(_) => EXIT_USAGE,
            _ => EXIT_ERROR,
        };
    }
    if err.downcast_ref::<WordFreqError>().is_some() {
        return EXIT_USAGE;
    }
    EXIT_ERROR
}

fn load_session(path: &Path) -> Result<SpecSession> {
    let mut session = SpecSession::new();
    session
        .load(path)
        .with_context(|| format!("Failed to load table: {}", path.display()))?;
    Ok(session)
}

/// Resolve options: defaults, then the JSON config file, then flags.
pub(crate) fn derive_freq_options(args: &FreqArgs) -> Result<SpecFreqOptions> {
    let mut options = SpecFreqOptions::default();
    if args.no_default_stopwords {
        options.stopwords = StopwordFilter::empty();
    }

    if let Some(path_config) = &args.config {
        let c_config = fs::read_to_string(path_config)
            .with_context(|| format!("Failed to read config: {}", path_config.display()))?;
        let cfg: SpecFreqConfig = serde_json::from_str(&c_config)
            .map_err(|e| WordFreqError::InvalidConfig(e.to_string()))
            .with_context(|| format!("Failed to parse config: {}", path_config.display()))?;
        cfg.validate()?;
        cfg.apply_to(&mut options);
        debug!("[CONFIG] applied {}", path_config.display());
    }

    if let Some(path_stopwords) = &args.stopwords_file {
        let c_stopwords = fs::read_to_string(path_stopwords)
            .with_context(|| format!("Failed to read stopwords: {}", path_stopwords.display()))?;
        let l_words = StopwordFilter::from_text(&c_stopwords).to_sorted_vec();
        options.stopwords.add_stopwords(&l_words);
    }

    let cfg_flags = SpecFreqConfig {
        stopwords_extra: (!args.stopwords.is_empty()).then(|| args.stopwords.clone()),
        rule_tokenize: args.tokenize.map(Into::into),
        top_n: args.top_n,
        num_workers_max: args.workers,
        ..Default::default()
    };
    cfg_flags.validate()?;
    cfg_flags.apply_to(&mut options);
    if args.all {
        options.top_n = None;
    }

    info!(
        "Options: stopwords={} tokenize={:?} top_n={:?} workers={:?}",
        options.stopwords.len(),
        options.rule_tokenize,
        options.top_n,
        options.num_workers_max
    );
    Ok(options)
}

fn derive_chart_options(args: &ChartArgs) -> SpecChartOptions {
    SpecChartOptions {
        title: args.title.clone(),
        width: args.width,
        height: args.height,
        if_insert_chart: !args.no_chart,
    }
}

pub(crate) fn render_frequencies(
    ranked: &RankedFrequencies,
    format: EnumOutputFormat,
) -> Result<String> {
    match format {
        EnumOutputFormat::Text => Ok(ranked
            .iter()
            .map(|(token, n_count)| format!("{token}\t{n_count}\n"))
            .collect()),
        EnumOutputFormat::Json => {
            let mut c_json = serde_json::to_string_pretty(ranked.entries())?;
            c_json.push('\n');
            Ok(c_json)
        }
    }
}

fn derive_nothing_message(column: &str) -> String {
    format!("Nothing to display: no words remain in column {column:?} after filtering.")
}

fn report_outcome(column: &str, outcome: EnumRenderOutcome) {
    match outcome {
        EnumRenderOutcome::Written(path) => println!("Wrote {}", path.display()),
        EnumRenderOutcome::NothingToDisplay => println!("{}", derive_nothing_message(column)),
    }
}
