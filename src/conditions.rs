// File: src/conditions.rs
//
// Condition expansion: turns per-axis value ranges into the exhaustive list of
// input conditions a comparison is run over.

use crate::errors::{ConditionError, HarnessError};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One concrete combination of input values, one per axis
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Condition(Vec<i64>);

impl Condition {
    pub fn new(values: Vec<i64>) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[i64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value at `index`, or an arity error if the condition is too short
    pub fn get(&self, index: usize) -> Result<i64, HarnessError> {
        self.0.get(index).copied().ok_or_else(|| HarnessError::ArityMismatch {
            condition: self.to_string(),
            index,
            arity: self.0.len(),
        })
    }

    /// Value at `index` as a size or count
    pub fn usize(&self, index: usize) -> Result<usize, HarnessError> {
        let value = self.get(index)?;
        usize::try_from(value).map_err(|_| HarnessError::ValueOutOfRange { index, value })
    }

    pub fn u64(&self, index: usize) -> Result<u64, HarnessError> {
        let value = self.get(index)?;
        u64::try_from(value).map_err(|_| HarnessError::ValueOutOfRange { index, value })
    }
}

impl From<Vec<i64>> for Condition {
    fn from(values: Vec<i64>) -> Self {
        Self(values)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({})", self.0.iter().join(", "))
    }
}

/// One entry of a flat (single-axis) input list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlatValue {
    Scalar(i64),
    /// An already-formed condition, passed through unchanged
    Tuple(Vec<i64>),
}

impl From<i64> for FlatValue {
    fn from(value: i64) -> Self {
        FlatValue::Scalar(value)
    }
}

impl From<Vec<i64>> for FlatValue {
    fn from(values: Vec<i64>) -> Self {
        FlatValue::Tuple(values)
    }
}

/// What a comparison is run over
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inputs {
    /// Several axes, expanded to their full cross-product
    Axes(Vec<Vec<i64>>),
    /// A single flat axis; every scalar becomes a one-element condition
    Flat(Vec<FlatValue>),
}

impl Inputs {
    pub fn axes<A, I>(axes: A) -> Self
    where
        A: IntoIterator<Item = I>,
        I: IntoIterator<Item = i64>,
    {
        Inputs::Axes(axes.into_iter().map(|axis| axis.into_iter().collect()).collect())
    }

    /// A flat axis of scalars
    pub fn flat<I>(values: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        Inputs::Flat(values.into_iter().map(FlatValue::Scalar).collect())
    }

    pub fn expand(&self) -> Vec<Condition> {
        expand(self)
    }
}

/// Expand inputs into an ordered list of conditions.
///
/// For `Inputs::Axes` the result is the cross-product in lexicographic order,
/// last axis varying fastest. An axis with no values (or no axes at all)
/// gives an empty list.
pub fn expand(inputs: &Inputs) -> Vec<Condition> {
    match inputs {
        Inputs::Axes(axes) => {
            if axes.is_empty() || axes.iter().any(|axis| axis.is_empty()) {
                return Vec::new();
            }
            axes.iter()
                .map(|axis| axis.iter().copied())
                .multi_cartesian_product()
                .map(Condition::new)
                .collect()
        }
        Inputs::Flat(values) => values
            .iter()
            .map(|value| match value {
                FlatValue::Scalar(v) => Condition::new(vec![*v]),
                FlatValue::Tuple(vs) => Condition::new(vs.clone()),
            })
            .collect(),
    }
}

/// Values of `range(start, stop, step)`: `stop` is exclusive and `step` may be
/// negative.
pub fn stepped(start: i64, stop: i64, step: i64) -> Result<Vec<i64>, ConditionError> {
    if step == 0 {
        return Err(ConditionError::ZeroStep { start, stop });
    }

    let mut values = Vec::new();
    let mut current = start;
    while (step > 0 && current < stop) || (step < 0 && current > stop) {
        values.push(current);
        current = match current.checked_add(step) {
            Some(next) => next,
            None => break,
        };
    }
    Ok(values)
}
