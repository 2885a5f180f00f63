//! Occupancy grid aggregation
//!
//! Bins a sequence of normalized samples into a fixed-resolution 2D
//! histogram over the unit square. The grid is a derived value: it is
//! recomputed fresh from its source dataset on every change and never
//! updated incrementally.

use crate::sample::SamplePoint;

/// Grid resolution per axis (the grid is GRID_RESOLUTION × GRID_RESOLUTION)
pub const GRID_RESOLUTION: usize = 100;

/// A fixed R×R matrix of non-negative sample counts, row-major storage
///
/// Cell `(row, col)` accumulates one count per sample with
/// `floor(y·R) = row`, `floor(x·R) = col`. The sum of all cells equals the
/// length of the source dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    cells: Vec<u32>,
}

impl OccupancyGrid {
    /// Create an all-zero grid
    pub fn zeros() -> Self {
        OccupancyGrid {
            cells: vec![0; GRID_RESOLUTION * GRID_RESOLUTION],
        }
    }

    /// Reshape a row-major flat sequence back into a grid
    ///
    /// Returns None unless the sequence has exactly R·R entries. Inverse of
    /// [`flatten`](Self::flatten).
    pub fn from_flat(cells: Vec<u32>) -> Option<Self> {
        if cells.len() == GRID_RESOLUTION * GRID_RESOLUTION {
            Some(OccupancyGrid { cells })
        } else {
            None
        }
    }

    /// Count at `(row, col)`, both in `[0, R)`
    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.cells[row * GRID_RESOLUTION + col]
    }

    fn increment(&mut self, row: usize, col: usize) {
        self.cells[row * GRID_RESOLUTION + col] += 1;
    }

    /// Row-major flat view, length always R·R
    pub fn flatten(&self) -> &[u32] {
        &self.cells
    }

    /// Total count across all cells
    pub fn total(&self) -> u64 {
        self.cells.iter().map(|&c| c as u64).sum()
    }

    /// Largest single-cell count (0 for the empty grid)
    pub fn max_count(&self) -> u32 {
        self.cells.iter().copied().max().unwrap_or(0)
    }
}

/// Map a normalized coordinate to a grid index
///
/// Coordinates land in `[0, R)` via `floor(v·R)`. A coordinate of exactly
/// 1.0 would produce index R, one past the grid edge; it clamps to R-1 so
/// edge samples stay on the grid and the cell-sum invariant holds for every
/// input in `[0,1]`. Out-of-range coordinates clamp the same way.
fn cell_index(v: f64) -> usize {
    let idx = (v * GRID_RESOLUTION as f64).floor();
    (idx as isize).clamp(0, GRID_RESOLUTION as isize - 1) as usize
}

/// Bin a sequence of samples into a fresh occupancy grid
///
/// The empty sequence yields an all-zero grid. Output depends only on the
/// multiset of input points; order never affects the result.
pub fn build_grid(points: &[SamplePoint]) -> OccupancyGrid {
    let mut grid = OccupancyGrid::zeros();
    for p in points {
        grid.increment(cell_index(p.y), cell_index(p.x));
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::Scope;

    fn pt(x: f64, y: f64) -> SamplePoint {
        SamplePoint {
            x,
            y,
            scope: Scope::Local,
        }
    }

    #[test]
    fn test_empty_input_yields_zero_grid() {
        let grid = build_grid(&[]);
        assert_eq!(grid.total(), 0);
        assert_eq!(grid.flatten().len(), GRID_RESOLUTION * GRID_RESOLUTION);
        assert!(grid.flatten().iter().all(|&c| c == 0));
    }

    #[test]
    fn test_cell_sum_equals_input_length() {
        // Deterministic scatter across the unit square
        let points: Vec<SamplePoint> = (0..500)
            .map(|i| {
                let t = i as f64 / 500.0;
                pt((t * 7.3).fract(), (t * 3.1).fract())
            })
            .collect();

        let grid = build_grid(&points);
        assert_eq!(grid.total(), points.len() as u64);
    }

    #[test]
    fn test_known_cell_placement() {
        // Worked example: a single sample at (0.95, 0.95) lands in cell [95][95]
        let grid = build_grid(&[pt(0.95, 0.95)]);
        assert_eq!(grid.get(95, 95), 1);
        assert_eq!(grid.total(), 1);
    }

    #[test]
    fn test_order_invariance() {
        let points: Vec<SamplePoint> = (0..200)
            .map(|i| {
                let t = i as f64 / 200.0;
                pt((t * 5.7).fract(), (t * 2.9).fract())
            })
            .collect();
        let mut reversed = points.clone();
        reversed.reverse();

        assert_eq!(build_grid(&points), build_grid(&reversed));
    }

    #[test]
    fn test_fresh_grid_each_call() {
        let points = vec![pt(0.5, 0.5)];
        let first = build_grid(&points);
        let second = build_grid(&points);
        assert_eq!(first, second);
        assert_eq!(first.get(50, 50), 1);
    }

    #[test]
    fn test_boundary_coordinate_clamps_to_last_cell() {
        // Exactly 1.0 would index one past the edge; it must clamp to 99
        let grid = build_grid(&[pt(1.0, 1.0), pt(1.0, 0.0), pt(0.0, 1.0)]);
        assert_eq!(grid.get(99, 99), 1);
        assert_eq!(grid.get(0, 99), 1);
        assert_eq!(grid.get(99, 0), 1);
        assert_eq!(grid.total(), 3);
    }

    #[test]
    fn test_out_of_range_coordinates_clamp() {
        let grid = build_grid(&[pt(-0.5, 2.0), pt(1.7, -3.0)]);
        assert_eq!(grid.get(99, 0), 1);
        assert_eq!(grid.get(0, 99), 1);
    }

    #[test]
    fn test_flatten_reshape_round_trip() {
        let points = vec![pt(0.1, 0.2), pt(0.1, 0.2), pt(0.9, 0.4)];
        let grid = build_grid(&points);
        let flat = grid.flatten().to_vec();
        assert_eq!(flat.len(), GRID_RESOLUTION * GRID_RESOLUTION);

        let reshaped = OccupancyGrid::from_flat(flat).unwrap();
        assert_eq!(reshaped, grid);
    }

    #[test]
    fn test_from_flat_rejects_wrong_length() {
        assert!(OccupancyGrid::from_flat(vec![0; 99]).is_none());
        assert!(OccupancyGrid::from_flat(Vec::new()).is_none());
    }

    #[test]
    fn test_max_count() {
        let grid = build_grid(&[pt(0.5, 0.5), pt(0.5, 0.5), pt(0.2, 0.2)]);
        assert_eq!(grid.max_count(), 2);
        assert_eq!(OccupancyGrid::zeros().max_count(), 0);
    }
}
