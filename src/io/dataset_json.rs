//! JSON representation of a `ProfileDataset`.
//!
//! Missing samples are written as `null` (JSON has no NaN) and read back as `NaN`:
//!
//! ```json
//! {
//!   "time": ["2021-06-01T00:00:00Z", "2021-06-01T00:01:00Z"],
//!   "range": [0.0, 50.0, 100.0],
//!   "variables": {
//!     "NAV_DEPTH": { "dims": "time", "values": [20.0, null] },
//!     "SerEAAcnt": { "dims": "time_range", "values": [[1, 2, 10], [3, null, 4]] }
//!   }
//! }
//! ```
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use chrono::{DateTime, Utc};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::dataset::{ProfileDataset, Variable};
use crate::error::{Error, Result};

#[derive(Debug, Serialize, Deserialize)]
struct DatasetRecord {
    time: Vec<DateTime<Utc>>,
    range: Vec<f64>,
    #[serde(default)]
    variables: BTreeMap<String, VariableRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "dims", content = "values", rename_all = "snake_case")]
enum VariableRecord {
    Time(Vec<Option<f64>>),
    TimeRange(Vec<Vec<Option<f64>>>),
}

fn to_optional(v: f64) -> Option<f64> {
    if v.is_nan() { None } else { Some(v) }
}

fn from_optional(v: Option<f64>) -> f64 {
    v.unwrap_or(f64::NAN)
}

impl From<&Variable> for VariableRecord {
    fn from(variable: &Variable) -> Self {
        match variable {
            Variable::Time(values) => {
                VariableRecord::Time(values.iter().copied().map(to_optional).collect())
            }
            Variable::TimeRange(values) => VariableRecord::TimeRange(
                values
                    .outer_iter()
                    .map(|row| row.iter().copied().map(to_optional).collect())
                    .collect(),
            ),
        }
    }
}

impl VariableRecord {
    fn into_variable(self, name: &str, nrange: usize) -> Result<Variable> {
        match self {
            VariableRecord::Time(values) => Ok(Variable::Time(
                values.into_iter().map(from_optional).collect(),
            )),
            VariableRecord::TimeRange(rows) => {
                let ntime = rows.len();
                let mut flat = Vec::with_capacity(ntime * nrange);
                for row in rows {
                    if row.len() != nrange {
                        return Err(Error::shape_mismatch(
                            format!("row of {}", name),
                            "range coordinate",
                            nrange,
                            row.len(),
                        ));
                    }
                    flat.extend(row.into_iter().map(from_optional));
                }
                let values = Array2::from_shape_vec((ntime, nrange), flat).map_err(Error::external)?;
                Ok(Variable::TimeRange(values))
            }
        }
    }
}

/// Parse a dataset from its JSON text.
pub fn dataset_from_json(json: &str) -> Result<ProfileDataset> {
    let record: DatasetRecord = serde_json::from_str(json)?;
    from_record(record)
}

/// Serialize a dataset to pretty-printed JSON text.
pub fn dataset_to_json(data: &ProfileDataset) -> Result<String> {
    Ok(serde_json::to_string_pretty(&to_record(data))?)
}

pub fn read_dataset(path: &Path) -> Result<ProfileDataset> {
    let reader = BufReader::new(File::open(path)?);
    let record: DatasetRecord = serde_json::from_reader(reader)?;
    let data = from_record(record)?;
    info!(
        "Loaded dataset {:?}: {} time samples x {} range cells, {} variables",
        path,
        data.ntime(),
        data.nrange(),
        data.variable_names().count()
    );
    Ok(data)
}

pub fn write_dataset(data: &ProfileDataset, path: &Path) -> Result<()> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, &to_record(data))?;
    info!("Wrote dataset: {:?}", path);
    Ok(())
}

fn to_record(data: &ProfileDataset) -> DatasetRecord {
    DatasetRecord {
        time: data.time().to_vec(),
        range: data.range().to_vec(),
        variables: data
            .variables()
            .map(|(name, v)| (name.to_string(), VariableRecord::from(v)))
            .collect(),
    }
}

fn from_record(record: DatasetRecord) -> Result<ProfileDataset> {
    let nrange = record.range.len();
    let mut data = ProfileDataset::new(record.time, Array1::from(record.range));
    for (name, var) in record.variables {
        let variable = var.into_variable(&name, nrange)?;
        data.insert(name, variable)?;
    }
    Ok(data)
}
