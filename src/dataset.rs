//! Measurement dataset loading.
//!
//! The benchmark program exports one row per inference query. Loading is
//! all-or-nothing: a single bad row rejects the whole file, and nothing is
//! returned that downstream stages would have to re-validate.

use probcond_common::{ProbcondError, Result};
use serde::{Deserialize, Serialize};
use std::io::{self, Read};
use std::path::Path;

/// Header of the interest-variable count column.
pub const INTEREST_COLUMN: &str = "VariablesInteres";
/// Header of the conditioned-variable count column.
pub const CONDITIONED_COLUMN: &str = "VariablesCondicionadas";
/// Header of the optional marginalized-variable count column.
pub const MARGINALIZED_COLUMN: &str = "VariablesMarginalizadas";
/// Header of the execution time column, in microseconds.
pub const TIME_COLUMN: &str = "TiempoEjecucion(us)";
/// Header of the states-evaluated column.
pub const STATES_COLUMN: &str = "EstadosEvaluados";

/// Columns every input file must carry.
pub const REQUIRED_COLUMNS: [&str; 4] =
    [INTEREST_COLUMN, CONDITIONED_COLUMN, TIME_COLUMN, STATES_COLUMN];

/// One benchmark measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Number of query variables
    #[serde(rename = "VariablesInteres")]
    pub interest_var_count: u32,
    /// Number of evidence variables
    #[serde(rename = "VariablesCondicionadas")]
    pub conditioned_var_count: u32,
    /// Number of summed-out variables, when the producer wrote it
    #[serde(rename = "VariablesMarginalizadas", default)]
    pub marginalized_var_count: Option<u32>,
    /// Wall time of the query in microseconds
    #[serde(rename = "TiempoEjecucion(us)")]
    pub execution_time_us: f64,
    /// Joint states visited by the engine
    #[serde(rename = "EstadosEvaluados")]
    pub states_evaluated: u64,
}

impl Measurement {
    /// Build a measurement without a marginalized count.
    pub fn new(interest: u32, conditioned: u32, execution_time_us: f64, states_evaluated: u64) -> Self {
        Self {
            interest_var_count: interest,
            conditioned_var_count: conditioned,
            marginalized_var_count: None,
            execution_time_us,
            states_evaluated,
        }
    }

    /// Attach a marginalized-variable count.
    pub fn with_marginalized(mut self, marginalized: u32) -> Self {
        self.marginalized_var_count = Some(marginalized);
        self
    }
}

/// A validated, non-empty, immutable collection of measurements.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<Measurement>,
}

impl Dataset {
    /// Wrap already-validated records. Returns `None` for an empty collection.
    pub fn from_records(records: Vec<Measurement>) -> Option<Self> {
        if records.is_empty() {
            None
        } else {
            Some(Self { records })
        }
    }

    /// All records, in file order.
    pub fn records(&self) -> &[Measurement] {
        &self.records
    }

    /// Number of records (always at least one).
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false; kept for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether any record carries a marginalized-variable count.
    pub fn has_marginalized(&self) -> bool {
        self.records.iter().any(|r| r.marginalized_var_count.is_some())
    }

    /// Execution times in record order.
    pub fn times(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.execution_time_us).collect()
    }
}

/// Load a dataset from a CSV file.
///
/// The file is read fully and closed before parsing starts.
pub fn load(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ProbcondError::DatasetNotFound { path: path.to_path_buf() },
        _ => ProbcondError::unparseable(path, format!("cannot read file: {e}")),
    })?;
    parse(bytes.as_slice(), path)
}

/// Parse a dataset from any CSV source; `origin` names it in diagnostics.
pub fn parse<R: Read>(reader: R, origin: &Path) -> Result<Dataset> {
    parse_records(reader)
        .and_then(|records| {
            Dataset::from_records(records).ok_or_else(|| "file has a header but no measurements".to_string())
        })
        .map_err(|message| ProbcondError::unparseable(origin, message))
}

fn parse_records<R: Read>(reader: R) -> std::result::Result<Vec<Measurement>, String> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).trim(csv::Trim::All).from_reader(reader);

    let headers = rdr.headers().map_err(|e| format!("cannot read header row: {e}"))?.clone();
    if headers.iter().all(str::is_empty) {
        return Err("file is empty or has no header row".to_string());
    }
    let missing = missing_columns(&headers);
    if !missing.is_empty() {
        return Err(format!("missing required column(s): {}", missing.join(", ")));
    }

    let mut records = Vec::new();
    for (i, row) in rdr.deserialize::<Measurement>().enumerate() {
        let row_number = i + 1;
        let record = row.map_err(|e| format!("data row {row_number}: {e}"))?;
        validate(&record).map_err(|reason| format!("data row {row_number}: {reason}"))?;
        records.push(record);
    }
    Ok(records)
}

fn missing_columns(headers: &csv::StringRecord) -> Vec<&'static str> {
    REQUIRED_COLUMNS.iter().copied().filter(|column| !headers.iter().any(|h| h == *column)).collect()
}

fn validate(record: &Measurement) -> std::result::Result<(), String> {
    let time = record.execution_time_us;
    if !time.is_finite() || time < 0.0 {
        return Err(format!("{TIME_COLUMN} must be a non-negative number, got {time}"));
    }
    Ok(())
}
