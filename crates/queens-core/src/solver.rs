//! Placement solver.
//!
//! Depth-first backtracking over rows: each row gets exactly one marker,
//! subject to the column, region, and adjacent-diagonal rules.

use log::debug;

use crate::grid::{Placement, Position, RegionGrid};

/// Stateless solver; all search state is per-call.
pub struct Solver;

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver {
    /// Create a new solver.
    pub fn new() -> Self {
        Self
    }

    /// Find a marker placement for the region map, if one exists.
    ///
    /// Rows are filled top to bottom and columns tried left to right, so
    /// the same map always yields the same placement. `None` means the
    /// map admits no placement at all.
    pub fn solve(&self, regions: &RegionGrid) -> Option<Placement> {
        let mut columns = Vec::with_capacity(regions.rows());
        if place_rows(regions, &mut columns) {
            debug!(
                "placed {} markers on {}x{} map",
                columns.len(),
                regions.rows(),
                regions.cols()
            );
            Some(Placement::new(regions.cols(), columns))
        } else {
            debug!(
                "{}x{} region map admits no placement",
                regions.rows(),
                regions.cols()
            );
            None
        }
    }
}

/// Place markers for row `columns.len()` onward, backtracking on dead ends.
fn place_rows(regions: &RegionGrid, columns: &mut Vec<usize>) -> bool {
    let row = columns.len();
    if row == regions.rows() {
        return true;
    }
    for col in 0..regions.cols() {
        if admissible(regions, columns, row, col) {
            columns.push(col);
            if place_rows(regions, columns) {
                return true;
            }
            columns.pop();
        }
    }
    false
}

/// Whether a marker at `(row, col)` coexists with the markers already
/// placed in earlier rows.
fn admissible(regions: &RegionGrid, columns: &[usize], row: usize, col: usize) -> bool {
    let region = regions.region(Position::new(row, col));
    for (placed_row, &placed_col) in columns.iter().enumerate() {
        if placed_col == col {
            return false;
        }
        if regions.region(Position::new(placed_row, placed_col)) == region {
            return false;
        }
    }
    // only the row directly above constrains diagonals
    if let Some(&above) = columns.last() {
        if above.abs_diff(col) == 1 {
            return false;
        }
    }
    true
}
