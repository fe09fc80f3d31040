// File: src/grid.rs
//
// Reshapes flat result rows into the layouts chart builders need:
// per-axis columns, 2D series, and rectangular time grids for surface and
// heatmap charts.
//
// A grid can only be built from two axes that were sampled as a complete,
// evenly spaced cross-product. Anything else is reported as an error rather
// than reshaped into a wrong-looking grid.

use crate::benchmarks::ResultRow;
use crate::errors::GridError;
use serde::Serialize;
use tracing::debug;

/// Result rows transposed into one column per condition axis plus the time
/// column
#[derive(Debug, Clone, PartialEq)]
pub struct Columns {
    pub axes: Vec<Vec<i64>>,
    pub times: Vec<f64>,
}

impl Columns {
    pub fn from_rows(rows: &[ResultRow]) -> Result<Self, GridError> {
        let first = rows.first().ok_or(GridError::Empty)?;
        let arity = first.condition.len();

        let mut axes = vec![Vec::with_capacity(rows.len()); arity];
        let mut times = Vec::with_capacity(rows.len());
        for row in rows {
            let values = row.condition.values();
            if values.len() < arity {
                return Err(GridError::RaggedRows { expected: arity, found: values.len() });
            }
            for (column, &value) in axes.iter_mut().zip(values) {
                column.push(value);
            }
            times.push(row.seconds());
        }

        Ok(Self { axes, times })
    }

    pub fn arity(&self) -> usize {
        self.axes.len()
    }

    pub fn axis(&self, axis: usize) -> Result<&[i64], GridError> {
        self.axes
            .get(axis)
            .map(Vec::as_slice)
            .ok_or(GridError::AxisOutOfRange { axis, arity: self.axes.len() })
    }
}

/// One axis against time, in row order
pub fn series(rows: &[ResultRow], axis: usize) -> Result<(Vec<i64>, Vec<f64>), GridError> {
    let columns = Columns::from_rows(rows)?;
    let xs = columns.axis(axis)?.to_vec();
    Ok((xs, columns.times))
}

/// Distinct values of an axis, sorted ascending, after checking they are
/// evenly spaced.
///
/// The spacing is taken from the two largest distinct values and the extent
/// is `(max - min) / gap + 1`. A single distinct value has extent 1.
pub fn infer_extent(axis: usize, values: &[i64]) -> Result<Vec<i64>, GridError> {
    let mut distinct = values.to_vec();
    distinct.sort_unstable();
    distinct.dedup();

    if distinct.len() < 2 {
        return Ok(distinct);
    }

    let min = distinct[0];
    let max = distinct[distinct.len() - 1];
    let overflow = || GridError::NonUniformAxis {
        axis,
        reason: format!("span from {} to {} does not fit in an i64", min, max),
    };
    let gap = max.checked_sub(distinct[distinct.len() - 2]).ok_or_else(overflow)?;
    let span = max.checked_sub(min).ok_or_else(overflow)?;

    if span % gap != 0 {
        return Err(GridError::NonUniformAxis {
            axis,
            reason: format!("span {} is not a multiple of the spacing {}", span, gap),
        });
    }
    let extent = (span / gap).checked_add(1).ok_or_else(overflow)? as usize;
    // span fits, so no difference between neighbours can overflow
    if extent != distinct.len() || distinct.windows(2).any(|w| w[1] - w[0] != gap) {
        return Err(GridError::NonUniformAxis {
            axis,
            reason: format!(
                "{} distinct values but spacing {} implies {}",
                distinct.len(),
                gap,
                extent
            ),
        });
    }

    debug!(axis, extent, gap, "inferred axis extent");
    Ok(distinct)
}

/// Times laid out as `width x height`, row-major: row `i` is the i-th value of
/// the outer axis, column `j` the j-th value of the inner axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    axes: (usize, usize),
    xs: Vec<i64>,
    ys: Vec<i64>,
    cells: Vec<f64>,
}

impl Grid {
    pub fn from_rows(rows: &[ResultRow], axes: (usize, usize)) -> Result<Self, GridError> {
        let columns = Columns::from_rows(rows)?;
        let x_column = columns.axis(axes.0)?;
        let y_column = columns.axis(axes.1)?;

        let xs = infer_extent(axes.0, x_column)?;
        let ys = infer_extent(axes.1, y_column)?;
        let (width, height) = (xs.len(), ys.len());
        if width * height != rows.len() {
            return Err(GridError::ShapeMismatch { width, height, rows: rows.len() });
        }

        let mut cells: Vec<Option<f64>> = vec![None; width * height];
        for ((&x, &y), &time) in x_column.iter().zip(y_column).zip(&columns.times) {
            // xs and ys hold every value of these columns
            let i = xs.binary_search(&x).map_err(|_| GridError::DuplicateCell { x, y })?;
            let j = ys.binary_search(&y).map_err(|_| GridError::DuplicateCell { x, y })?;
            let cell = &mut cells[i * height + j];
            if cell.is_some() {
                return Err(GridError::DuplicateCell { x, y });
            }
            *cell = Some(time);
        }

        let cells = cells.into_iter().map(|cell| cell.unwrap_or(f64::NAN)).collect();
        Ok(Self { axes, xs, ys, cells })
    }

    /// Condition positions the grid was built from
    pub fn axes(&self) -> (usize, usize) {
        self.axes
    }

    pub fn width(&self) -> usize {
        self.xs.len()
    }

    pub fn height(&self) -> usize {
        self.ys.len()
    }

    pub fn xs(&self) -> &[i64] {
        &self.xs
    }

    pub fn ys(&self) -> &[i64] {
        &self.ys
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.width() && j < self.height() {
            Some(self.cells[i * self.height() + j])
        } else {
            None
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.cells.chunks(self.height().max(1))
    }

    /// X, Y and Z meshes of identical shape for a 3D surface
    pub fn surface(&self) -> Surface {
        let x = self.xs.iter().map(|&x| vec![x; self.height()]).collect();
        let y = self.xs.iter().map(|_| self.ys.clone()).collect();
        let z = self.rows().map(<[f64]>::to_vec).collect();
        Surface { x, y, z }
    }

    /// The grid reoriented for a top-left-origin image: one row per Y value
    /// from largest to smallest, one column per X value from smallest to
    /// largest.
    pub fn heatmap(&self) -> Heatmap {
        let (width, height) = (self.width(), self.height());
        let rows = (0..height)
            .rev()
            .map(|j| (0..width).map(|i| self.cells[i * height + j]).collect())
            .collect();

        let left = self.xs.first().copied().unwrap_or_default();
        let right = self.xs.last().copied().unwrap_or_default();
        let bottom = self.ys.first().copied().unwrap_or_default();
        let top = self.ys.last().copied().unwrap_or_default();
        Heatmap { extent: [left, right, bottom, top], rows }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Surface {
    pub x: Vec<Vec<i64>>,
    pub y: Vec<Vec<i64>>,
    pub z: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heatmap {
    /// `[left, right, bottom, top]` in axis units
    pub extent: [i64; 4],
    pub rows: Vec<Vec<f64>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditions::{Condition, Inputs};
    use std::time::Duration;

    /// Rows for every condition, with time `x * 100 + y` milliseconds
    fn rows_for(inputs: &Inputs) -> Vec<ResultRow> {
        inputs
            .expand()
            .into_iter()
            .map(|c| {
                let millis = (c.values()[0] * 100 + c.values().get(1).copied().unwrap_or(0)) as u64;
                ResultRow::new(c, Duration::from_millis(millis))
            })
            .collect()
    }

    fn secs(x: i64, y: i64) -> f64 {
        Duration::from_millis((x * 100 + y) as u64).as_secs_f64()
    }

    #[test]
    fn test_columns_transpose_rows() {
        let rows = rows_for(&Inputs::axes(vec![vec![1, 2], vec![10, 20]]));
        let columns = Columns::from_rows(&rows).unwrap();
        assert_eq!(columns.arity(), 2);
        assert_eq!(columns.axis(0).unwrap(), &[1, 1, 2, 2]);
        assert_eq!(columns.axis(1).unwrap(), &[10, 20, 10, 20]);
        assert_eq!(columns.times.len(), 4);
        assert_eq!(columns.axis(2), Err(GridError::AxisOutOfRange { axis: 2, arity: 2 }));
    }

    #[test]
    fn test_series_keeps_row_order() {
        let rows = rows_for(&Inputs::flat(vec![3, 1, 2]));
        let (xs, times) = series(&rows, 0).unwrap();
        assert_eq!(xs, vec![3, 1, 2]);
        assert_eq!(times[0], secs(3, 0));
    }

    #[test]
    fn test_infer_extent() {
        assert_eq!(infer_extent(0, &[1, 2, 3, 1, 2, 3]).unwrap(), vec![1, 2, 3]);
        assert_eq!(infer_extent(0, &[20, 10, 20, 10]).unwrap(), vec![10, 20]);
        assert_eq!(infer_extent(0, &[5, 5, 5]).unwrap(), vec![5]);
    }

    #[test]
    fn test_infer_extent_rejects_uneven_spacing() {
        assert!(matches!(infer_extent(1, &[0, 1, 3, 4]), Err(GridError::NonUniformAxis { axis: 1, .. })));
        assert!(matches!(infer_extent(0, &[0, 3, 4, 6]), Err(GridError::NonUniformAxis { axis: 0, .. })));
        assert!(matches!(infer_extent(0, &[0, 2, 3]), Err(GridError::NonUniformAxis { .. })));
    }

    #[test]
    fn test_infer_extent_span_overflow() {
        assert!(matches!(infer_extent(0, &[i64::MIN, i64::MAX]), Err(GridError::NonUniformAxis { axis: 0, .. })));
        assert!(matches!(
            infer_extent(2, &[i64::MIN, 0, i64::MAX - 1]),
            Err(GridError::NonUniformAxis { axis: 2, .. })
        ));
        assert_eq!(infer_extent(0, &[i64::MAX - 2, i64::MAX - 1, i64::MAX]).unwrap().len(), 3);
    }

    #[test]
    fn test_columns_reject_ragged_rows() {
        let rows = vec![
            ResultRow::new(Condition::new(vec![1, 2]), Duration::from_millis(1)),
            ResultRow::new(Condition::new(vec![3]), Duration::from_millis(1)),
        ];
        assert_eq!(Columns::from_rows(&rows), Err(GridError::RaggedRows { expected: 2, found: 1 }));
    }

    #[test]
    fn test_three_by_two_grid() {
        let rows = rows_for(&Inputs::axes(vec![vec![1, 2, 3], vec![10, 20]]));
        let grid = Grid::from_rows(&rows, (0, 1)).unwrap();

        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        for (i, &x) in [1, 2, 3].iter().enumerate() {
            for (j, &y) in [10, 20].iter().enumerate() {
                assert_eq!(grid.get(i, j), Some(secs(x, y)));
            }
        }
        assert_eq!(grid.get(3, 0), None);
        assert_eq!(grid.rows().count(), 3);
    }

    #[test]
    fn test_grid_with_swapped_axes() {
        let rows = rows_for(&Inputs::axes(vec![vec![1, 2, 3], vec![10, 20]]));
        let grid = Grid::from_rows(&rows, (1, 0)).unwrap();
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.get(1, 0), Some(secs(1, 20)));
    }

    #[test]
    fn test_single_valued_axis_has_extent_one() {
        let rows = rows_for(&Inputs::axes(vec![vec![4], vec![1, 2, 3]]));
        let grid = Grid::from_rows(&rows, (0, 1)).unwrap();
        assert_eq!(grid.width(), 1);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.get(0, 2), Some(secs(4, 3)));
    }

    #[test]
    fn test_incomplete_grid_is_rejected() {
        let mut rows = rows_for(&Inputs::axes(vec![vec![1, 2, 3], vec![10, 20]]));
        rows.pop();
        assert_eq!(
            Grid::from_rows(&rows, (0, 1)),
            Err(GridError::ShapeMismatch { width: 3, height: 2, rows: 5 })
        );
    }

    #[test]
    fn test_duplicate_cell_is_rejected() {
        let mut rows = rows_for(&Inputs::axes(vec![vec![1, 2], vec![10, 20]]));
        rows[3] = ResultRow::new(Condition::new(vec![1, 10]), Duration::from_millis(1));
        assert_eq!(Grid::from_rows(&rows, (0, 1)), Err(GridError::DuplicateCell { x: 1, y: 10 }));
    }

    #[test]
    fn test_empty_rows_are_rejected() {
        assert_eq!(Grid::from_rows(&[], (0, 1)), Err(GridError::Empty));
    }

    #[test]
    fn test_axis_out_of_range() {
        let rows = rows_for(&Inputs::flat(vec![1, 2]));
        assert_eq!(Grid::from_rows(&rows, (0, 1)), Err(GridError::AxisOutOfRange { axis: 1, arity: 1 }));
    }

    #[test]
    fn test_surface_meshes() {
        let rows = rows_for(&Inputs::axes(vec![vec![1, 2, 3], vec![10, 20]]));
        let surface = Grid::from_rows(&rows, (0, 1)).unwrap().surface();
        assert_eq!(surface.x, vec![vec![1, 1], vec![2, 2], vec![3, 3]]);
        assert_eq!(surface.y, vec![vec![10, 20], vec![10, 20], vec![10, 20]]);
        assert_eq!(surface.z[2][1], secs(3, 20));
    }

    #[test]
    fn test_heatmap_orientation() {
        let rows = rows_for(&Inputs::axes(vec![vec![1, 2, 3], vec![10, 20]]));
        let heatmap = Grid::from_rows(&rows, (0, 1)).unwrap().heatmap();

        assert_eq!(heatmap.extent, [1, 3, 10, 20]);
        assert_eq!(heatmap.rows.len(), 2);
        assert_eq!(heatmap.rows[0].len(), 3);
        // top row is the largest Y, bottom-left is (min X, min Y)
        assert_eq!(heatmap.rows[0], vec![secs(1, 20), secs(2, 20), secs(3, 20)]);
        assert_eq!(heatmap.rows[1][0], secs(1, 10));
    }
}
