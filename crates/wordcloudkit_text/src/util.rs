use std::collections::HashMap;

use crate::conf::N_WORKERS_AUTO_MAX;
use crate::spec::{RankedFrequencies, SpecWordCount};

////////////////////////////////////////////////////////////////////////////////
// #region Counting

/// Insertion-ordered counter. Ranking is a stable sort, so ties keep first-seen order.
#[derive(Debug, Default)]
pub(crate) struct FrequencyCounter {
    dict_pos: HashMap<String, usize>,
    l_counts: Vec<SpecWordCount>,
}

impl FrequencyCounter {
    pub(crate) fn add(&mut self, token: &str) {
        if let Some(&n_pos) = self.dict_pos.get(token) {
            self.l_counts[n_pos].count += 1;
            return;
        }
        self.dict_pos.insert(token.to_string(), self.l_counts.len());
        self.l_counts.push(SpecWordCount {
            token: token.to_string(),
            count: 1,
        });
    }

    pub(crate) fn into_ranked(self, top_n: Option<usize>) -> RankedFrequencies {
        let mut l_counts = self.l_counts;
        l_counts.sort_by(|a, b| b.count.cmp(&a.count));
        if let Some(n_top) = top_n {
            l_counts.truncate(n_top);
        }
        RankedFrequencies::from_ranked(l_counts)
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Workers

pub(crate) fn calculate_worker_limit(num_workers_max: Option<usize>) -> usize {
    let n_cpu = std::thread::available_parallelism()
        .map(|v| v.get())
        .unwrap_or(1);

    match num_workers_max {
        Some(n) => n.clamp(1, n_cpu),
        None => n_cpu.clamp(1, N_WORKERS_AUTO_MAX),
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
