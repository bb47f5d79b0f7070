use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of a board region. Only equality matters; callers encode
/// regions as small integers.
pub type RegionId = u32;

/// Zero-based cell coordinate on a puzzle board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// Create a position from row and column indices.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Rejected shapes for a region map handed to the solver.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedRegionMap {
    /// The map has no rows, or its rows have no cells.
    #[error("region map has no cells")]
    Empty,
    /// A row is shorter or longer than the first row.
    #[error("region map row {row} has {len} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },
    /// The number of distinct region ids must equal the number of rows,
    /// since a solution places exactly one marker per row and per region.
    #[error("region map uses {found} distinct regions, expected {expected}")]
    RegionCountMismatch { found: usize, expected: usize },
}

/// A rectangular labeling of board cells into regions.
///
/// Validated on construction: the grid must be non-empty and rectangular,
/// and must use exactly as many distinct region ids as it has rows. The
/// serde form is the nested-array shape exchanged with board editors,
/// `[[id, ...], ...]`, and deserializing re-runs the same validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<RegionId>>", into = "Vec<Vec<RegionId>>")]
pub struct RegionGrid {
    rows: usize,
    cols: usize,
    cells: Vec<RegionId>,
}

impl RegionGrid {
    /// Build a region grid from rows of region ids, validating shape and
    /// region count.
    pub fn from_rows(rows: Vec<Vec<RegionId>>) -> Result<Self, MalformedRegionMap> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(MalformedRegionMap::Empty);
        }
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != width {
                return Err(MalformedRegionMap::RaggedRow {
                    row,
                    len: cells.len(),
                    expected: width,
                });
            }
        }

        let cells: Vec<RegionId> = rows.into_iter().flatten().collect();
        let mut distinct = cells.clone();
        distinct.sort_unstable();
        distinct.dedup();
        if distinct.len() != height {
            return Err(MalformedRegionMap::RegionCountMismatch {
                found: distinct.len(),
                expected: height,
            });
        }

        Ok(Self {
            rows: height,
            cols: width,
            cells,
        })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Region id of the cell at `pos`.
    pub fn region(&self, pos: Position) -> RegionId {
        self.cells[pos.row * self.cols + pos.col]
    }

    /// Number of distinct region ids (equal to `rows()` after validation).
    pub fn region_count(&self) -> usize {
        let mut distinct = self.cells.clone();
        distinct.sort_unstable();
        distinct.dedup();
        distinct.len()
    }
}

impl From<RegionGrid> for Vec<Vec<RegionId>> {
    fn from(grid: RegionGrid) -> Self {
        grid.cells.chunks(grid.cols).map(<[RegionId]>::to_vec).collect()
    }
}

impl TryFrom<Vec<Vec<RegionId>>> for RegionGrid {
    type Error = MalformedRegionMap;

    fn try_from(rows: Vec<Vec<RegionId>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

/// A marker placement with exactly one marker per row.
///
/// Stored as the marker's column index for each row; expands to the
/// `rows x cols` boolean grid callers exchange, which is also the serde
/// form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "Vec<Vec<bool>>")]
pub struct Placement {
    cols: usize,
    columns: Vec<usize>,
}

impl Placement {
    pub(crate) fn new(cols: usize, columns: Vec<usize>) -> Self {
        Self { cols, columns }
    }

    /// Number of rows (one marker each).
    pub fn rows(&self) -> usize {
        self.columns.len()
    }

    /// Number of columns of the underlying board.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Column of the marker placed in `row`.
    pub fn column_in_row(&self, row: usize) -> usize {
        self.columns[row]
    }

    /// Whether the cell at `pos` holds a marker.
    pub fn is_marked(&self, pos: Position) -> bool {
        self.columns.get(pos.row) == Some(&pos.col)
    }

    /// All marker coordinates, in row order.
    pub fn marked_positions(&self) -> Vec<Position> {
        self.columns
            .iter()
            .enumerate()
            .map(|(row, &col)| Position::new(row, col))
            .collect()
    }

    /// Expand to the boolean grid shape: exactly one `true` per row.
    pub fn to_bool_rows(&self) -> Vec<Vec<bool>> {
        self.columns
            .iter()
            .map(|&marked| (0..self.cols).map(|col| col == marked).collect())
            .collect()
    }
}

impl From<Placement> for Vec<Vec<bool>> {
    fn from(placement: Placement) -> Self {
        placement.to_bool_rows()
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &marked in &self.columns {
            for col in 0..self.cols {
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", if col == marked { 'Q' } else { '.' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_valid() {
        let grid = RegionGrid::from_rows(vec![vec![0, 1], vec![1, 0]]).unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 2);
        assert_eq!(grid.region(Position::new(0, 1)), 1);
        assert_eq!(grid.region(Position::new(1, 0)), 1);
        assert_eq!(grid.region_count(), 2);
    }

    #[test]
    fn test_region_ids_need_not_be_contiguous() {
        let grid = RegionGrid::from_rows(vec![vec![7, 42], vec![42, 7]]).unwrap();
        assert_eq!(grid.region_count(), 2);
    }

    #[test]
    fn test_empty_grids_rejected() {
        assert_eq!(
            RegionGrid::from_rows(vec![]),
            Err(MalformedRegionMap::Empty)
        );
        assert_eq!(
            RegionGrid::from_rows(vec![vec![], vec![]]),
            Err(MalformedRegionMap::Empty)
        );
    }

    #[test]
    fn test_ragged_rows_rejected() {
        assert_eq!(
            RegionGrid::from_rows(vec![vec![0, 1], vec![0]]),
            Err(MalformedRegionMap::RaggedRow {
                row: 1,
                len: 1,
                expected: 2,
            })
        );
    }

    #[test]
    fn test_region_count_must_match_rows() {
        assert_eq!(
            RegionGrid::from_rows(vec![vec![0, 0], vec![0, 0]]),
            Err(MalformedRegionMap::RegionCountMismatch {
                found: 1,
                expected: 2,
            })
        );
        assert_eq!(
            RegionGrid::from_rows(vec![vec![0, 1], vec![2, 0]]),
            Err(MalformedRegionMap::RegionCountMismatch {
                found: 3,
                expected: 2,
            })
        );
    }

    #[test]
    fn test_serde_roundtrip() {
        let grid = RegionGrid::from_rows(vec![vec![0, 0, 1], vec![2, 1, 1], vec![2, 2, 1]]).unwrap();
        let json = serde_json::to_string(&grid).unwrap();
        assert_eq!(json, "[[0,0,1],[2,1,1],[2,2,1]]");

        let back: RegionGrid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grid);
    }

    #[test]
    fn test_serde_rejects_malformed() {
        let err = serde_json::from_str::<RegionGrid>("[[0,1],[0]]").unwrap_err();
        assert!(err.to_string().contains("expected 2"));
    }

    #[test]
    fn test_placement_shape() {
        let placement = Placement::new(3, vec![1, 0, 2]);
        assert_eq!(placement.rows(), 3);
        assert_eq!(placement.cols(), 3);
        assert_eq!(placement.column_in_row(0), 1);
        assert!(placement.is_marked(Position::new(0, 1)));
        assert!(!placement.is_marked(Position::new(0, 0)));
        assert_eq!(
            placement.marked_positions(),
            vec![
                Position::new(0, 1),
                Position::new(1, 0),
                Position::new(2, 2),
            ]
        );

        let rows = placement.to_bool_rows();
        assert_eq!(
            rows,
            vec![
                vec![false, true, false],
                vec![true, false, false],
                vec![false, false, true],
            ]
        );
        for row in &rows {
            assert_eq!(row.iter().filter(|&&m| m).count(), 1);
        }
    }

    #[test]
    fn test_placement_serializes_as_bool_grid() {
        let placement = Placement::new(2, vec![1, 0]);
        let json = serde_json::to_string(&placement).unwrap();
        assert_eq!(json, "[[false,true],[true,false]]");
    }

    #[test]
    fn test_placement_display() {
        let placement = Placement::new(2, vec![1, 0]);
        assert_eq!(placement.to_string(), ". Q\nQ .\n");
    }
}
