// File: src/export.rs
//
// CSV and JSON export of result collections, so external plotting tools can
// render them. JSON exports can be read back for the `grid` and `chart`
// commands.

use crate::benchmarks::{ResultCollection, ResultRow};
use crate::conditions::Condition;
use crate::errors::ExportError;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedRow {
    pub condition: Condition,
    pub seconds: f64,
}

/// A serialised comparison run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedRun {
    pub recorded_at: DateTime<Utc>,
    /// Repetitions per condition
    pub number: usize,
    pub results: IndexMap<String, Vec<ExportedRow>>,
}

impl ExportedRun {
    pub fn new(results: &ResultCollection, number: usize) -> Self {
        let results = results
            .iter()
            .map(|(label, rows)| {
                let rows = rows
                    .iter()
                    .map(|row| ExportedRow { condition: row.condition.clone(), seconds: row.seconds() })
                    .collect();
                (label.clone(), rows)
            })
            .collect();
        Self { recorded_at: Utc::now(), number, results }
    }

    pub fn into_collection(self) -> Result<ResultCollection, ExportError> {
        let mut collection = ResultCollection::with_capacity(self.results.len());
        for (label, rows) in self.results {
            let mut converted = Vec::with_capacity(rows.len());
            for row in rows {
                let elapsed = Duration::try_from_secs_f64(row.seconds)
                    .map_err(|_| ExportError::InvalidTime { label: label.clone(), seconds: row.seconds })?;
                converted.push(ResultRow::new(row.condition, elapsed));
            }
            collection.insert(label, converted);
        }
        Ok(collection)
    }
}

pub fn to_json(results: &ResultCollection, number: usize) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(&ExportedRun::new(results, number))?)
}

pub fn write_json(path: &Path, results: &ResultCollection, number: usize) -> Result<(), ExportError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &ExportedRun::new(results, number))?;
    writer.flush()?;
    Ok(())
}

pub fn read_json(path: &Path) -> Result<ExportedRun, ExportError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Write one line per result row: `label, c0, c1, ..., seconds`.
///
/// Rows with fewer condition values than the widest row are padded with empty
/// fields.
pub fn write_csv<W: Write>(writer: W, results: &ResultCollection) -> Result<(), ExportError> {
    let arity = results
        .values()
        .flat_map(|rows| rows.iter().map(|row| row.condition.len()))
        .max()
        .unwrap_or(0);

    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut header = vec!["label".to_string()];
    header.extend((0..arity).map(|i| format!("c{}", i)));
    header.push("seconds".to_string());
    csv_writer.write_record(&header)?;

    for (label, rows) in results {
        for row in rows {
            let mut record = Vec::with_capacity(arity + 2);
            record.push(label.clone());
            let values = row.condition.values();
            record.extend((0..arity).map(|i| values.get(i).map(|v| v.to_string()).unwrap_or_default()));
            record.push(row.seconds().to_string());
            csv_writer.write_record(&record)?;
        }
    }

    csv_writer.flush()?;
    Ok(())
}

pub fn write_csv_file(path: &Path, results: &ResultCollection) -> Result<(), ExportError> {
    write_csv(BufWriter::new(File::create(path)?), results)
}
