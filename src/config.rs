// File: src/config.rs
//
// Benchmark plans loaded from TOML.
//
// A plan names the sample suite to run, the repeat count, and one `[[axis]]`
// table per condition axis. Each axis is either a stepped range
// (`start`, `stop`, optional `step`) or an explicit `values` list.

use crate::conditions::{stepped, Inputs};
use crate::errors::ConfigError;
use crate::samples::Suite;
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_step() -> i64 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AxisConfig {
    Range {
        start: i64,
        stop: i64,
        #[serde(default = "default_step")]
        step: i64,
    },
    Values {
        values: Vec<i64>,
    },
}

impl AxisConfig {
    pub fn values(&self) -> Result<Vec<i64>, ConfigError> {
        match self {
            AxisConfig::Range { start, stop, step } => Ok(stepped(*start, *stop, *step)?),
            AxisConfig::Values { values } => Ok(values.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanConfig {
    #[serde(default)]
    pub suite: Suite,
    /// Repetitions per condition; the harness default when absent
    pub number: Option<usize>,
    #[serde(default)]
    pub print_conditions: bool,
    #[serde(default, rename = "axis")]
    pub axes: Vec<AxisConfig>,
}

impl PlanConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let plan: PlanConfig = toml::from_str(text)?;
        if plan.axes.is_empty() {
            return Err(ConfigError::Invalid("a plan needs at least one [[axis]]".to_string()));
        }
        if plan.number == Some(0) {
            return Err(ConfigError::Invalid("number must be at least 1".to_string()));
        }
        Ok(plan)
    }

    /// The plan a suite runs when no plan file is given
    pub fn for_suite(suite: Suite) -> Self {
        let (number, axes) = match suite {
            Suite::Ngrams => (
                1_000,
                vec![
                    AxisConfig::Range { start: 10, stop: 101, step: 10 },
                    AxisConfig::Values { values: vec![2, 3, 4] },
                ],
            ),
            Suite::Fibonacci => (10, vec![AxisConfig::Range { start: 5, stop: 26, step: 5 }]),
        };
        Self { suite, number: Some(number), print_conditions: false, axes }
    }

    /// One axis is a flat input; several are expanded as a cross-product
    pub fn inputs(&self) -> Result<Inputs, ConfigError> {
        let mut axes = self.axes.iter().map(AxisConfig::values).collect::<Result<Vec<_>, _>>()?;
        match axes.len() {
            0 => Err(ConfigError::Invalid("a plan needs at least one [[axis]]".to_string())),
            1 => Ok(Inputs::flat(axes.remove(0))),
            _ => Ok(Inputs::Axes(axes)),
        }
    }
}
