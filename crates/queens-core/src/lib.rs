//! Core engine for region-queens puzzles.
//!
//! A board is a rectangular grid whose cells are colored into regions. A
//! solution places one marker per row so that no column, no region, and no
//! pair of diagonally touching cells holds two markers. Two entry points:
//!
//! - [`Solver`] finds a marker placement for a [`RegionGrid`].
//! - [`Extractor`] recovers the region coloring from a board screenshot.
//!
//! ```
//! use queens_core::{RegionGrid, Solver};
//!
//! let map = RegionGrid::from_rows(vec![
//!     vec![0, 0, 1, 1],
//!     vec![0, 0, 1, 1],
//!     vec![2, 2, 3, 3],
//!     vec![2, 2, 3, 3],
//! ])?;
//! let placement = Solver::new().solve(&map).expect("map is solvable");
//! assert!(placement.is_marked(queens_core::Position::new(0, 1)));
//! # Ok::<(), queens_core::MalformedRegionMap>(())
//! ```

pub mod cluster;
pub mod color;
pub mod extractor;
pub mod grid;
pub mod solver;

pub use cluster::{ClusterModel, KMeans, KMeansConfig};
pub use color::{Color, ParseColorError};
pub use extractor::{ColorGrid, ExtractError, Extractor, ExtractorConfig};
pub use grid::{MalformedRegionMap, Placement, Position, RegionGrid, RegionId};
pub use solver::Solver;
