use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use wordcloudkit_text::{
    EnumTokenizeMode, N_TOP_DEFAULT, N_WORKERS_DEFAULT, RankedFrequencies, SpecFreqOptions,
    SpecHistogramBin, StopwordFilter, WordFreqError, aggregate_frequencies, compute_numeric_bins,
    compute_value_counts, join_tokens, tokenize,
};

const N_BRIDGE_ABI_VERSION: u64 = 1;
const C_BRIDGE_CONTRACT_VERSION: &str = "wordcloudkit.text.freq.v1";
const C_BRIDGE_TRANSPORT: &str = "rust_native";

#[pyclass(name = "RankedFrequencies")]
#[derive(Debug, Clone)]
struct PyRankedFrequencies {
    #[pyo3(get)]
    entries: Vec<(String, u64)>,
}

impl From<RankedFrequencies> for PyRankedFrequencies {
    fn from(ranked: RankedFrequencies) -> Self {
        Self {
            entries: ranked
                .into_entries()
                .into_iter()
                .map(|spec_wc| (spec_wc.token, spec_wc.count))
                .collect(),
        }
    }
}

#[pymethods]
impl PyRankedFrequencies {
    #[getter]
    fn total_count(&self) -> u64 {
        self.entries.iter().map(|(_, n_count)| n_count).sum()
    }

    #[getter]
    fn tokens(&self) -> Vec<String> {
        self.entries.iter().map(|(token, _)| token.clone()).collect()
    }

    fn count_of(&self, token: &str) -> u64 {
        self.entries
            .iter()
            .find(|(c_token, _)| c_token == token)
            .map_or(0, |(_, n_count)| *n_count)
    }

    fn top_n(&self, n: usize) -> Self {
        Self {
            entries: self.entries.iter().take(n).cloned().collect(),
        }
    }

    fn __len__(&self) -> usize {
        self.entries.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "RankedFrequencies(n_entries={}, total_count={})",
            self.entries.len(),
            self.total_count()
        )
    }
}

fn parse_rule_tokenize(value: &str) -> PyResult<EnumTokenizeMode> {
    match value {
        "split" => Ok(EnumTokenizeMode::Split),
        "strip_whitespace" => Ok(EnumTokenizeMode::StripWhitespace),
        _ => Err(PyValueError::new_err(format!(
            "Invalid tokenize strategy: `{value}`. Expected one of: ['split', 'strip_whitespace']"
        ))),
    }
}

fn map_word_freq_error(exception: WordFreqError) -> PyErr {
    PyValueError::new_err(exception.to_string())
}

fn derive_freq_options(
    stopwords: Option<Vec<String>>,
    stopwords_extra: Option<Vec<String>>,
    rule_tokenize: &str,
    top_n: Option<usize>,
    num_workers_max: Option<usize>,
) -> PyResult<SpecFreqOptions> {
    if num_workers_max == Some(0) {
        return Err(PyValueError::new_err("num_workers_max must be >= 1"));
    }
    let mut filter_stopwords = match stopwords {
        Some(l_words) => StopwordFilter::from_list(&l_words),
        None => StopwordFilter::default(),
    };
    if let Some(l_words) = stopwords_extra {
        filter_stopwords.add_stopwords(&l_words);
    }
    Ok(SpecFreqOptions {
        stopwords: filter_stopwords,
        rule_tokenize: parse_rule_tokenize(rule_tokenize)?,
        top_n,
        num_workers_max,
    })
}

#[pyfunction(name = "tokenize")]
#[pyo3(signature = (text, rule_tokenize = "split"))]
fn tokenize_py(text: &str, rule_tokenize: &str) -> PyResult<Vec<String>> {
    Ok(tokenize(text, parse_rule_tokenize(rule_tokenize)?))
}

#[pyfunction(name = "compute_frequencies")]
#[pyo3(signature = (
    cells,
    stopwords = None,
    stopwords_extra = None,
    rule_tokenize = "split",
    top_n = Some(N_TOP_DEFAULT),
    num_workers_max = Some(N_WORKERS_DEFAULT)
))]
fn compute_frequencies_py(
    py: Python<'_>,
    cells: Vec<Option<String>>,
    stopwords: Option<Vec<String>>,
    stopwords_extra: Option<Vec<String>>,
    rule_tokenize: &str,
    top_n: Option<usize>,
    num_workers_max: Option<usize>,
) -> PyResult<PyRankedFrequencies> {
    let spec_options = derive_freq_options(
        stopwords,
        stopwords_extra,
        rule_tokenize,
        top_n,
        num_workers_max,
    )?;
    let ranked = py.allow_threads(|| aggregate_frequencies(&cells, &spec_options));
    Ok(PyRankedFrequencies::from(ranked))
}

#[pyfunction(name = "join_tokens")]
#[pyo3(signature = (
    cells,
    stopwords = None,
    stopwords_extra = None,
    rule_tokenize = "split",
    num_workers_max = Some(N_WORKERS_DEFAULT)
))]
fn join_tokens_py(
    py: Python<'_>,
    cells: Vec<Option<String>>,
    stopwords: Option<Vec<String>>,
    stopwords_extra: Option<Vec<String>>,
    rule_tokenize: &str,
    num_workers_max: Option<usize>,
) -> PyResult<String> {
    let spec_options = derive_freq_options(
        stopwords,
        stopwords_extra,
        rule_tokenize,
        None,
        num_workers_max,
    )?;
    Ok(py.allow_threads(|| join_tokens(&cells, &spec_options)))
}

#[pyfunction(name = "compute_value_counts")]
#[pyo3(signature = (cells, top_n = Some(N_TOP_DEFAULT)))]
fn compute_value_counts_py(cells: Vec<Option<String>>, top_n: Option<usize>) -> PyRankedFrequencies {
    PyRankedFrequencies::from(compute_value_counts(&cells, top_n))
}

/// Returns `(lower, upper, count)` tuples.
#[pyfunction(name = "compute_numeric_bins")]
#[pyo3(signature = (values, n_bins = None))]
fn compute_numeric_bins_py(values: Vec<f64>, n_bins: Option<usize>) -> PyResult<Vec<(f64, f64, u64)>> {
    let l_bins = compute_numeric_bins(&values, n_bins).map_err(map_word_freq_error)?;
    Ok(l_bins
        .into_iter()
        .map(|SpecHistogramBin { lower, upper, count }| (lower, upper, count))
        .collect())
}

#[pyfunction(name = "default_stopwords")]
fn default_stopwords_py() -> Vec<String> {
    StopwordFilter::default().to_sorted_vec()
}

#[pymodule]
fn _wordcloudkit_rs(module: &Bound<'_, PyModule>) -> PyResult<()> {
    module.add_class::<PyRankedFrequencies>()?;
    module.add_function(wrap_pyfunction!(tokenize_py, module)?)?;
    module.add_function(wrap_pyfunction!(compute_frequencies_py, module)?)?;
    module.add_function(wrap_pyfunction!(join_tokens_py, module)?)?;
    module.add_function(wrap_pyfunction!(compute_value_counts_py, module)?)?;
    module.add_function(wrap_pyfunction!(compute_numeric_bins_py, module)?)?;
    module.add_function(wrap_pyfunction!(default_stopwords_py, module)?)?;
    module.add("__bridge_abi__", N_BRIDGE_ABI_VERSION)?;
    module.add("__bridge_contract__", C_BRIDGE_CONTRACT_VERSION)?;
    module.add("__bridge_transport__", C_BRIDGE_TRANSPORT)?;
    Ok(())
}
