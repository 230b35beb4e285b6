//! Labeled profile dataset: `time` and `range` coordinates plus named variables
//! indexed by `time` or by `(time, range)`. Missing samples are stored as `NaN`.
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::error::{Error, Result};

/// Name of the derived per-cell depth field.
pub const BIN_DEPTH: &str = "bin_depth";
/// Name of the derived per-time surface z-coordinate.
pub const SURFACE_LEVEL: &str = "surface_level";
/// Name of the derived per-time distance from the instrument to the surface.
pub const DISTANCE_TO_SURFACE: &str = "distance_to_surface";

/// A data variable together with the coordinate axes it is indexed by.
#[derive(Debug, Clone, PartialEq)]
pub enum Variable {
    /// One value per time sample.
    Time(Array1<f64>),
    /// One value per `(time, range)` cell, shape `(ntime, nrange)`.
    TimeRange(Array2<f64>),
}

impl Variable {
    pub fn dims(&self) -> &'static str {
        match self {
            Variable::Time(_) => "time",
            Variable::TimeRange(_) => "time, range",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileDataset {
    time: Vec<DateTime<Utc>>,
    range: Array1<f64>,
    variables: BTreeMap<String, Variable>,
}

impl ProfileDataset {
    /// Create an empty dataset over the given coordinates.
    pub fn new(time: Vec<DateTime<Utc>>, range: Array1<f64>) -> Self {
        Self {
            time,
            range,
            variables: BTreeMap::new(),
        }
    }

    pub fn time(&self) -> &[DateTime<Utc>] {
        &self.time
    }

    pub fn range(&self) -> ArrayView1<'_, f64> {
        self.range.view()
    }

    pub fn ntime(&self) -> usize {
        self.time.len()
    }

    pub fn nrange(&self) -> usize {
        self.range.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn variable_names(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(String::as_str)
    }

    pub fn variables(&self) -> impl Iterator<Item = (&str, &Variable)> {
        self.variables.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn get(&self, name: &str) -> Result<&Variable> {
        self.variables.get(name).ok_or_else(|| Error::Lookup {
            name: name.to_string(),
        })
    }

    /// Borrow a variable indexed by `time` alone.
    pub fn time_series(&self, name: &str) -> Result<ArrayView1<'_, f64>> {
        match self.get(name)? {
            Variable::Time(values) => Ok(values.view()),
            Variable::TimeRange(_) => Err(Error::Dimension {
                name: name.to_string(),
                expected: "time",
            }),
        }
    }

    /// Borrow a variable indexed by `(time, range)`.
    pub fn profile(&self, name: &str) -> Result<ArrayView2<'_, f64>> {
        match self.get(name)? {
            Variable::TimeRange(values) => Ok(values.view()),
            Variable::Time(_) => Err(Error::Dimension {
                name: name.to_string(),
                expected: "time, range",
            }),
        }
    }

    /// Add or replace a variable in place after checking it against the coordinates.
    pub fn insert(&mut self, name: impl Into<String>, variable: Variable) -> Result<()> {
        let name = name.into();
        self.check_shape(&name, &variable)?;
        self.variables.insert(name, variable);
        Ok(())
    }

    /// Builder-style `insert`.
    pub fn with_variable(mut self, name: impl Into<String>, variable: Variable) -> Result<Self> {
        self.insert(name, variable)?;
        Ok(self)
    }

    /// Return a copy of the dataset with `name` set to `variable`; `self` is left untouched.
    pub fn assign(&self, name: impl Into<String>, variable: Variable) -> Result<Self> {
        self.clone().with_variable(name, variable)
    }

    fn check_shape(&self, name: &str, variable: &Variable) -> Result<()> {
        match variable {
            Variable::Time(values) => {
                if values.len() != self.ntime() {
                    return Err(Error::shape_mismatch(
                        name,
                        "time coordinate",
                        self.ntime(),
                        values.len(),
                    ));
                }
            }
            Variable::TimeRange(values) => {
                let (nt, nr) = values.dim();
                if nt != self.ntime() {
                    return Err(Error::shape_mismatch(
                        format!("first dimension of {}", name),
                        "time coordinate",
                        self.ntime(),
                        nt,
                    ));
                }
                if nr != self.nrange() {
                    return Err(Error::shape_mismatch(
                        format!("second dimension of {}", name),
                        "range coordinate",
                        self.nrange(),
                        nr,
                    ));
                }
            }
        }
        Ok(())
    }
}
