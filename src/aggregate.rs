//! Aggregation of measurements into the views the figure and report consume.
//!
//! Every view is a pure function of the dataset. Keys are collected in
//! ordered maps so iteration order, and therefore every byte of the report,
//! is deterministic.

use crate::dataset::{Dataset, Measurement};
use crate::stats::{pearson, Summary};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Independent variable a grouping is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKey {
    /// Number of query variables
    Interest,
    /// Number of evidence variables
    Conditioned,
}

impl GroupKey {
    /// Extract this key from a measurement.
    pub fn of(self, record: &Measurement) -> u32 {
        match self {
            Self::Interest => record.interest_var_count,
            Self::Conditioned => record.conditioned_var_count,
        }
    }
}

/// Summary of execution time for one key value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedStat {
    /// Key value shared by every record in the group
    pub key: u32,
    /// Execution time summary
    #[serde(flatten)]
    pub summary: Summary,
}

/// Summary of execution time for one (interest, conditioned) configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigurationStat {
    /// Interest-variable count
    pub interest: u32,
    /// Conditioned-variable count
    pub conditioned: u32,
    /// Marginalized-variable count, when every record in the group agrees on it
    pub marginalized: Option<u32>,
    /// Execution time summary
    #[serde(flatten)]
    pub summary: Summary,
}

/// Mean execution time cross-tabulated by interest (rows) and conditioned
/// (columns) counts. Combinations without records are `None`, never zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PivotTable {
    /// Distinct interest counts, ascending
    pub row_keys: Vec<u32>,
    /// Distinct conditioned counts, ascending
    pub column_keys: Vec<u32>,
    /// Row-major cells
    cells: Vec<Option<f64>>,
}

impl PivotTable {
    /// Build the pivot from configuration groups.
    pub fn from_configurations(configurations: &[ConfigurationStat]) -> Self {
        let row_keys: Vec<u32> =
            configurations.iter().map(|c| c.interest).collect::<BTreeSet<_>>().into_iter().collect();
        let column_keys: Vec<u32> =
            configurations.iter().map(|c| c.conditioned).collect::<BTreeSet<_>>().into_iter().collect();

        let mut cells = vec![None; row_keys.len() * column_keys.len()];
        for config in configurations {
            if let (Ok(row), Ok(col)) =
                (row_keys.binary_search(&config.interest), column_keys.binary_search(&config.conditioned))
            {
                cells[row * column_keys.len() + col] = Some(config.summary.mean);
            }
        }

        Self { row_keys, column_keys, cells }
    }

    /// Cell by row and column index.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.row_keys.len() || col >= self.column_keys.len() {
            return None;
        }
        self.cells[row * self.column_keys.len() + col]
    }

    /// Cell by key values.
    pub fn lookup(&self, interest: u32, conditioned: u32) -> Option<f64> {
        let row = self.row_keys.binary_search(&interest).ok()?;
        let col = self.column_keys.binary_search(&conditioned).ok()?;
        self.get(row, col)
    }

    /// Total number of cells, filled or not.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of cells backed by at least one record.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Smallest and largest filled value.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.cells.iter().flatten().fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}

/// One point of the states-vs-time scatter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScatterPoint {
    /// x: search-space size
    pub states_evaluated: u64,
    /// y: execution time in microseconds
    pub execution_time_us: f64,
    /// color: interest-variable count
    pub interest_var_count: u32,
}

impl ScatterPoint {
    /// Whether both coordinates can be placed on log axes.
    pub fn is_log_plottable(&self) -> bool {
        self.states_evaluated > 0 && self.execution_time_us > 0.0
    }
}

/// Every derived view of one dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    /// Number of measurements
    pub record_count: usize,
    /// Execution time over all measurements
    pub overall: Summary,
    /// Execution time by interest count
    pub by_interest: Vec<GroupedStat>,
    /// Execution time by conditioned count
    pub by_conditioned: Vec<GroupedStat>,
    /// Execution time by (interest, conditioned) configuration
    pub by_configuration: Vec<ConfigurationStat>,
    /// Mean time cross-tabulation for the heatmap
    pub pivot: PivotTable,
    /// One point per measurement, in record order
    #[serde(skip)]
    pub scatter: Vec<ScatterPoint>,
    /// Pearson correlation of ln(states) and ln(time)
    pub log_log_correlation: Option<f64>,
}

impl Analysis {
    /// Compute all views.
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let by_configuration = group_by_configuration(dataset);
        let pivot = PivotTable::from_configurations(&by_configuration);
        let scatter = scatter_projection(dataset);

        Self {
            record_count: dataset.len(),
            overall: Summary::describe(&dataset.times()).unwrap_or_default(),
            by_interest: group_by(dataset, GroupKey::Interest),
            by_conditioned: group_by(dataset, GroupKey::Conditioned),
            by_configuration,
            pivot,
            log_log_correlation: log_log_correlation(&scatter),
            scatter,
        }
    }
}

/// Summarize execution time per distinct key value, keys ascending.
pub fn group_by(dataset: &Dataset, key: GroupKey) -> Vec<GroupedStat> {
    let mut groups: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    for record in dataset.records() {
        groups.entry(key.of(record)).or_default().push(record.execution_time_us);
    }

    groups
        .into_iter()
        .filter_map(|(key, times)| Summary::describe(&times).map(|summary| GroupedStat { key, summary }))
        .collect()
}

/// Summarize execution time per (interest, conditioned) pair.
pub fn group_by_configuration(dataset: &Dataset) -> Vec<ConfigurationStat> {
    let mut groups: BTreeMap<(u32, u32), Vec<&Measurement>> = BTreeMap::new();
    for record in dataset.records() {
        groups.entry((record.interest_var_count, record.conditioned_var_count)).or_default().push(record);
    }

    groups
        .into_iter()
        .filter_map(|((interest, conditioned), records)| {
            let times: Vec<f64> = records.iter().map(|r| r.execution_time_us).collect();
            Summary::describe(&times).map(|summary| ConfigurationStat {
                interest,
                conditioned,
                marginalized: shared_marginalized(&records),
                summary,
            })
        })
        .collect()
}

fn shared_marginalized(records: &[&Measurement]) -> Option<u32> {
    let first = records.first()?.marginalized_var_count?;
    records.iter().all(|r| r.marginalized_var_count == Some(first)).then_some(first)
}

/// One scatter point per record, in record order.
pub fn scatter_projection(dataset: &Dataset) -> Vec<ScatterPoint> {
    dataset
        .records()
        .iter()
        .map(|r| ScatterPoint {
            states_evaluated: r.states_evaluated,
            execution_time_us: r.execution_time_us,
            interest_var_count: r.interest_var_count,
        })
        .collect()
}

/// Correlation of log cost against log problem size over plottable points.
pub fn log_log_correlation(points: &[ScatterPoint]) -> Option<f64> {
    let (xs, ys): (Vec<f64>, Vec<f64>) = points
        .iter()
        .filter(|p| p.is_log_plottable())
        .map(|p| ((p.states_evaluated as f64).ln(), p.execution_time_us.ln()))
        .unzip();
    pearson(&xs, &ys)
}
