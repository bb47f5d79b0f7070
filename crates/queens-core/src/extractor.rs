use log::debug;
use serde::Serialize;
use thiserror::Error;

use crate::cluster::{KMeans, KMeansConfig};
use crate::color::Color;
use crate::grid::{MalformedRegionMap, Position, RegionGrid, RegionId};

/// Errors from reading a board screenshot
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The bytes are not a decodable image
    #[error("could not decode board image: {0}")]
    ImageDecode(#[from] image::ImageError),
    /// The requested grid has zero extent or does not fit the image
    #[error("{rows}x{cols} grid does not fit a {width}x{height} pixel image")]
    Dimensions {
        rows: usize,
        cols: usize,
        width: u32,
        height: u32,
    },
}

/// Configuration for region extraction
#[derive(Debug, Clone, Default)]
pub struct ExtractorConfig {
    /// Clustering parameters used to group the sampled cell colors
    pub kmeans: KMeansConfig,
}

/// Reads the region coloring of a puzzle board out of a screenshot.
///
/// The screenshot is divided into a `rows x cols` lattice, the pixel at
/// the center of each cell is sampled, and the samples are clustered into
/// one color per row. Cells sharing a cluster share a region.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractorConfig,
}

impl Extractor {
    /// Create an extractor with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with a specific configuration
    pub fn with_config(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Create an extractor with a specific clustering seed
    pub fn with_seed(seed: u64) -> Self {
        Self::with_config(ExtractorConfig {
            kmeans: KMeansConfig {
                seed,
                ..KMeansConfig::default()
            },
        })
    }

    /// Extract the cell coloring of a `rows x cols` board from encoded
    /// image bytes.
    ///
    /// The same bytes, grid size, and seed always produce the same grid.
    pub fn extract(
        &self,
        bytes: &[u8],
        rows: usize,
        cols: usize,
    ) -> Result<ColorGrid, ExtractError> {
        let img = image::load_from_memory(bytes)?.to_rgb8();
        let (width, height) = img.dimensions();
        debug!("decoded {width}x{height} board image");

        if rows == 0 || cols == 0 || (height as usize) < rows || (width as usize) < cols {
            return Err(ExtractError::Dimensions {
                rows,
                cols,
                width,
                height,
            });
        }

        let cell_h = f64::from(height) / rows as f64;
        let cell_w = f64::from(width) / cols as f64;
        let mut samples = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                let y = ((row as f64 * cell_h + cell_h / 2.0) as u32).min(height - 1);
                let x = ((col as f64 * cell_w + cell_w / 2.0) as u32).min(width - 1);
                let pixel = img.get_pixel(x, y);
                samples.push([
                    f64::from(pixel[0]),
                    f64::from(pixel[1]),
                    f64::from(pixel[2]),
                ]);
            }
        }

        let model = KMeans::with_config(rows, self.config.kmeans.clone()).fit(&samples);
        debug!(
            "clustered {} cells into {} colors, distortion {:.2}",
            samples.len(),
            model.centroids.len(),
            model.distortion
        );

        let palette = model
            .centroids
            .iter()
            .map(|c| Color::new(c[0] as u8, c[1] as u8, c[2] as u8))
            .collect();
        Ok(ColorGrid {
            rows,
            cols,
            labels: model.labels,
            palette,
        })
    }
}

/// A board coloring produced by [`Extractor::extract`].
///
/// Each cell carries a palette label; cells with the same label belong to
/// the same region. Serializes as rows of hex color strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "Vec<Vec<Color>>")]
pub struct ColorGrid {
    rows: usize,
    cols: usize,
    labels: Vec<usize>,
    palette: Vec<Color>,
}

impl ColorGrid {
    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Palette index of the cell at `pos`
    pub fn label(&self, pos: Position) -> usize {
        self.labels[pos.row * self.cols + pos.col]
    }

    /// Color of the cell at `pos`
    pub fn color(&self, pos: Position) -> Color {
        self.palette[self.label(pos)]
    }

    /// The clustered colors, indexed by cell label
    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    /// Cell colors as rows
    pub fn color_rows(&self) -> Vec<Vec<Color>> {
        self.labels
            .chunks(self.cols)
            .map(|row| row.iter().map(|&label| self.palette[label]).collect())
            .collect()
    }

    /// Cell colors as rows of `#rrggbb` strings
    pub fn hex_rows(&self) -> Vec<Vec<String>> {
        self.labels
            .chunks(self.cols)
            .map(|row| row.iter().map(|&label| self.palette[label].to_hex()).collect())
            .collect()
    }

    /// Cell labels as rows of region ids
    pub fn label_rows(&self) -> Vec<Vec<RegionId>> {
        self.labels
            .chunks(self.cols)
            .map(|row| row.iter().map(|&label| label as RegionId).collect())
            .collect()
    }

    /// Interpret the coloring as a region map for the solver.
    ///
    /// Fails when the image did not yield one region per row, for example
    /// when two regions clustered onto the same color.
    pub fn to_region_grid(&self) -> Result<RegionGrid, MalformedRegionMap> {
        RegionGrid::from_rows(self.label_rows())
    }
}

impl From<ColorGrid> for Vec<Vec<Color>> {
    fn from(grid: ColorGrid) -> Self {
        grid.color_rows()
    }
}
