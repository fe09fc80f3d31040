// Benchmarking module for comparing alternative implementations
//
// This module provides the timing side of gridbench:
// - Labelled candidate closures and their setups
// - A harness that times every candidate under every condition
// - Terminal reporting of the collected results
//
// Usage:
//   let harness = Harness::new().with_number(1000);
//   let results = harness.compare(&mut candidates, &inputs, SetupPolicy::None)?;

pub mod reporter;
pub mod runner;
pub mod summary;
pub mod timer;

pub use reporter::Reporter;
pub use runner::{Candidate, Harness, SetupPolicy};
pub use timer::Timer;

use crate::conditions::Condition;
use indexmap::IndexMap;
use std::time::Duration;

/// Results keyed by candidate label, in the order candidates were run
pub type ResultCollection = IndexMap<String, Vec<ResultRow>>;

/// A condition together with the total time its batch of repetitions took
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub condition: Condition,
    pub elapsed: Duration,
}

impl ResultRow {
    pub fn new(condition: Condition, elapsed: Duration) -> Self {
        Self { condition, elapsed }
    }

    pub fn seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// The row as `[condition..., seconds]`
    pub fn values(&self) -> Vec<f64> {
        self.condition
            .values()
            .iter()
            .map(|&v| v as f64)
            .chain(std::iter::once(self.seconds()))
            .collect()
    }
}
