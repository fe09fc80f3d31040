// File: src/lib.rs
//
// Library interface for gridbench.
// Exposes condition expansion, the timing harness, grid reshaping and chart
// data for the CLI and for integration testing.

pub mod benchmarks;
pub mod chart;
pub mod conditions;
pub mod config;
pub mod errors;
pub mod export;
pub mod grid;
pub mod samples;

pub use benchmarks::{Candidate, Harness, ResultCollection, ResultRow, SetupPolicy};
pub use conditions::{expand, Condition, Inputs};
pub use grid::Grid;
