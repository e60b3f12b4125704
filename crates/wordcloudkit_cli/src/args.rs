//! CLI argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use wordcloudkit_table::{N_CHART_HEIGHT_DEFAULT, N_CHART_WIDTH_DEFAULT, N_ROWS_PREVIEW};
use wordcloudkit_text::{EnumTokenizeMode, N_TOP_DEFAULT};

#[derive(Parser)]
#[command(
    name = "wordcloudkit",
    about = "Word frequencies, word-cloud input and charts for one table column",
    after_help = "\
EXAMPLES:
    wordcloudkit columns reviews.csv
    wordcloudkit freq reviews.csv -c review --top-n 10
    wordcloudkit chart reviews.csv -c review -o review.xlsx
    wordcloudkit cloud reviews.csv -c review -o cloud.txt --weights cloud.tsv
    wordcloudkit histogram reviews.csv -c score --bins 10 -o score.xlsx"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: EnumCommand,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum EnumCommand {
    /// List the column names of a table
    Columns {
        /// Table file (.csv, .tsv, .ipc, .xlsx/.xls/.ods)
        #[arg(value_name = "TABLE")]
        path: PathBuf,
    },
    /// Print the first rows of a table
    Preview {
        #[arg(value_name = "TABLE")]
        path: PathBuf,

        /// Number of rows to show
        #[arg(long, default_value_t = N_ROWS_PREVIEW)]
        rows: usize,
    },
    /// Print ranked word counts of a column
    Freq {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        freq: FreqArgs,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: EnumOutputFormat,
    },
    /// Write the filtered token stream for a word-cloud renderer
    Cloud {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        freq: FreqArgs,

        /// Token stream output file
        #[arg(short, long, value_name = "FILE")]
        out: PathBuf,

        /// Also write `token<TAB>weight` lines for the ranked words
        #[arg(long, value_name = "FILE")]
        weights: Option<PathBuf>,
    },
    /// Write a top-N word frequency bar chart workbook (.xlsx)
    Chart {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        freq: FreqArgs,

        #[command(flatten)]
        chart: ChartArgs,
    },
    /// Write the raw value distribution of a column (.xlsx)
    Histogram {
        #[command(flatten)]
        input: InputArgs,

        /// Distinct values kept for non-numeric columns
        #[arg(long, default_value_t = N_TOP_DEFAULT)]
        top_n: usize,

        /// Bin count for numeric columns (Sturges' rule when omitted)
        #[arg(long)]
        bins: Option<usize>,

        #[command(flatten)]
        chart: ChartArgs,
    },
    /// Save a loaded table as an IPC snapshot
    Snapshot {
        #[arg(value_name = "TABLE")]
        path: PathBuf,

        /// Snapshot output file
        #[arg(short, long, value_name = "FILE")]
        out: PathBuf,
    },
}

#[derive(clap::Args)]
pub struct InputArgs {
    /// Table file (.csv, .tsv, .ipc, .xlsx/.xls/.ods)
    #[arg(value_name = "TABLE")]
    pub path: PathBuf,

    /// Column to analyze
    #[arg(short, long)]
    pub column: String,
}

#[derive(clap::Args)]
pub struct FreqArgs {
    /// Ranked entries to keep [default: 20]
    #[arg(long, conflicts_with = "all")]
    pub top_n: Option<usize>,

    /// Keep every ranked entry
    #[arg(long)]
    pub all: bool,

    /// Extra stopword (repeatable)
    #[arg(long = "stopword", value_name = "WORD")]
    pub stopwords: Vec<String>,

    /// Stopword list file, one token per line (`#` comments allowed)
    #[arg(long, value_name = "FILE")]
    pub stopwords_file: Option<PathBuf>,

    /// Start from an empty stopword set
    #[arg(long)]
    pub no_default_stopwords: bool,

    /// Token extraction strategy
    #[arg(long, value_enum)]
    pub tokenize: Option<EnumTokenizeArg>,

    /// Worker threads for tokenization
    #[arg(long)]
    pub workers: Option<usize>,

    /// JSON options file, applied before the flags above
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct ChartArgs {
    /// Workbook output file
    #[arg(short, long, value_name = "FILE")]
    pub out: PathBuf,

    /// Chart title
    #[arg(long)]
    pub title: Option<String>,

    /// Chart width in pixels
    #[arg(long, default_value_t = N_CHART_WIDTH_DEFAULT)]
    pub width: u32,

    /// Chart height in pixels
    #[arg(long, default_value_t = N_CHART_HEIGHT_DEFAULT)]
    pub height: u32,

    /// Write the data sheet only
    #[arg(long)]
    pub no_chart: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum EnumOutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum EnumTokenizeArg {
    /// Whitespace and punctuation both separate words
    Split,
    /// Delete whitespace first; only punctuation separates words
    StripWhitespace,
}

impl From<EnumTokenizeArg> for EnumTokenizeMode {
    fn from(value: EnumTokenizeArg) -> Self {
        match value {
            EnumTokenizeArg::Split => EnumTokenizeMode::Split,
            EnumTokenizeArg::StripWhitespace => EnumTokenizeMode::StripWhitespace,
        }
    }
}
