// Integration tests for gridbench
//
// These tests drive the public API end to end:
// - Condition expansion feeding the harness
// - Result collections reshaped into grids and chart data
// - Export and re-import of results

use gridbench::benchmarks::runner::setup;
use gridbench::chart::{self, ChartOptions, SeriesAxes};
use gridbench::errors::{GridError, HarnessError};
use gridbench::export;
use gridbench::{expand, Candidate, Condition, Grid, Harness, Inputs, SetupPolicy};
use std::cell::RefCell;
use std::hint::black_box;

fn sum_candidate() -> Candidate<'static> {
    Candidate::new("sum(range({0}))", |c: &Condition| {
        let n = c.u64(0)?;
        black_box((0..black_box(n)).sum::<u64>());
        Ok(())
    })
}

fn sleepless_pair(label: &str) -> Candidate<'static> {
    Candidate::new(label.to_string(), |c: &Condition| {
        let (a, b) = (c.u64(0)?, c.u64(1)?);
        black_box((0..black_box(a * b)).fold(0u64, |acc, v| acc.wrapping_add(v)));
        Ok(())
    })
}

#[test]
fn test_expand_example() {
    let conditions = expand(&Inputs::axes(vec![vec![1, 2], vec![10, 20]]));
    let raw: Vec<&[i64]> = conditions.iter().map(Condition::values).collect();
    assert_eq!(raw, vec![&[1, 10][..], &[1, 20], &[2, 10], &[2, 20]]);
}

#[test]
fn test_sum_range_example() {
    let harness = Harness::new().with_number(1_000);
    let mut candidates = vec![sum_candidate()];
    let results = harness.compare(&mut candidates, &Inputs::flat(1..4), SetupPolicy::None).unwrap();

    assert_eq!(results.len(), 1);
    let rows = &results["sum(range({0}))"];
    assert_eq!(rows.len(), 3);
    for (row, n) in rows.iter().zip(1..4) {
        let values = row.values();
        assert_eq!(values.len(), 2);
        assert_eq!(values[0], n as f64);
        assert!(values[1] > 0.0);
    }
}

#[test]
fn test_rows_per_candidate_match_conditions() {
    let inputs = Inputs::axes(vec![vec![1, 2, 3], vec![10, 20]]);
    let harness = Harness::new().with_number(2);
    let mut candidates = vec![sleepless_pair("a({0}, {1})"), sleepless_pair("b({0}, {1})")];
    let results = harness.compare(&mut candidates, &inputs, SetupPolicy::None).unwrap();

    let conditions = inputs.expand();
    for rows in results.values() {
        let recorded: Vec<&Condition> = rows.iter().map(|row| &row.condition).collect();
        assert_eq!(recorded, conditions.iter().collect::<Vec<_>>());
    }
}

#[test]
fn test_setups_see_each_condition_in_order() {
    let seen = RefCell::new(Vec::new());
    let harness = Harness::new().with_number(1);
    let mut candidates = vec![sum_candidate()];
    let setups = vec![setup(|c: &Condition| {
        seen.borrow_mut().push(c.get(0)?);
        Ok(())
    })];
    harness
        .compare(&mut candidates, &Inputs::flat(vec![3, 1, 2]), SetupPolicy::Aligned(setups))
        .unwrap();
    assert_eq!(*seen.borrow(), vec![3, 1, 2]);
}

#[test]
fn test_candidate_error_propagates() {
    let harness = Harness::new().with_number(3);
    let mut candidates = vec![Candidate::new("fails", |c: &Condition| {
        if c.get(0)? > 1 {
            return Err(HarnessError::Candidate { label: "fails".to_string(), message: "too big".to_string() });
        }
        Ok(())
    })];
    let err = harness.compare(&mut candidates, &Inputs::flat(vec![1, 2, 3]), SetupPolicy::None).unwrap_err();
    assert_eq!(err.to_string(), "candidate 'fails' failed: too big");
}

#[test]
fn test_results_reshape_into_grid_and_charts() {
    let harness = Harness::new().with_number(2);
    let mut candidates = vec![sleepless_pair("pair({0}, {1})")];
    let results = harness
        .compare(&mut candidates, &Inputs::axes(vec![vec![1, 2, 3], vec![10, 20]]), SetupPolicy::None)
        .unwrap();

    let rows = &results["pair({0}, {1})"];
    let grid = Grid::from_rows(rows, (0, 1)).unwrap();
    assert_eq!((grid.width(), grid.height()), (3, 2));
    for (index, row) in rows.iter().enumerate() {
        assert_eq!(grid.get(index / 2, index % 2), Some(row.seconds()));
    }

    let heatmaps = chart::heatmaps(&results, (0, 1), &ChartOptions::default()).unwrap();
    assert_eq!(heatmaps[0].title, "pair(x, y)");
    assert_eq!(heatmaps[0].heatmap.rows[1][0], rows[0].seconds());

    let line = chart::chart_2d(&results, SeriesAxes::One(0), ChartOptions::default()).unwrap();
    assert_eq!(line.series[0].x, vec![1, 1, 2, 2, 3, 3]);
}

#[test]
fn test_single_valued_axis_grid() {
    let harness = Harness::new().with_number(1);
    let mut candidates = vec![sleepless_pair("pair({0}, {1})")];
    let results = harness
        .compare(&mut candidates, &Inputs::axes(vec![vec![5], vec![1, 2]]), SetupPolicy::None)
        .unwrap();
    let grid = Grid::from_rows(&results["pair({0}, {1})"], (0, 1)).unwrap();
    assert_eq!((grid.width(), grid.height()), (1, 2));
}

#[test]
fn test_uneven_axis_is_not_reshaped() {
    let harness = Harness::new().with_number(1);
    let mut candidates = vec![sleepless_pair("pair({0}, {1})")];
    let results = harness
        .compare(&mut candidates, &Inputs::axes(vec![vec![1, 2, 4], vec![1, 2]]), SetupPolicy::None)
        .unwrap();
    let err = Grid::from_rows(&results["pair({0}, {1})"], (0, 1)).unwrap_err();
    assert!(matches!(err, GridError::NonUniformAxis { axis: 0, .. }));
}

#[test]
fn test_export_and_reload() {
    let harness = Harness::new().with_number(1);
    let mut candidates = vec![sum_candidate()];
    let results = harness.compare(&mut candidates, &Inputs::flat(vec![4, 8]), SetupPolicy::None).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let json_path = dir.path().join("run.json");
    export::write_json(&json_path, &results, harness.number()).unwrap();
    let reloaded = export::read_json(&json_path).unwrap().into_collection().unwrap();
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded["sum(range({0}))"].len(), 2);
    assert_eq!(reloaded["sum(range({0}))"][1].condition, Condition::new(vec![8]));

    let csv_path = dir.path().join("run.csv");
    export::write_csv_file(&csv_path, &results).unwrap();
    let text = std::fs::read_to_string(&csv_path).unwrap();
    assert_eq!(text.lines().count(), 3);
    assert!(text.starts_with("label,c0,seconds"));
}
