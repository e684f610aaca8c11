use serde::{Deserialize, Serialize};

use crate::core::{CellSize, CellTimeScale, HorizonGeometry, Pollutant, SortOrder, Viewport};
use crate::error::{HorizonError, HorizonResult};
use crate::render::{LinePrimitive, TextPrimitive};

/// Grid position of a cell; also the scoping key of its clip regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellKey {
    pub row: usize,
    pub col: usize,
}

impl CellKey {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Deterministic id for the cell's band clip region.
    #[must_use]
    pub fn clip_id(self) -> String {
        format!("cell-{}-{}-clip", self.row, self.col)
    }
}

/// Axis primitives of one cell, in cell-local coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisPrimitives {
    pub lines: Vec<LinePrimitive>,
    pub texts: Vec<TextPrimitive>,
}

/// One (area, pollutant) chart. Geometry is cell-local; `origin_*` places
/// the cell on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellScene {
    pub key: CellKey,
    pub area: String,
    pub pollutant: Pollutant,
    pub origin_x: f64,
    pub origin_y: f64,
    pub size: CellSize,
    /// `None` when the cell has no series for the selected year.
    pub time_scale: Option<CellTimeScale>,
    pub horizon: HorizonGeometry,
    pub axis: AxisPrimitives,
}

impl CellScene {
    /// Whether a canvas point falls inside the cell's plotting area.
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let local_x = x - self.origin_x;
        let local_y = y - self.origin_y;
        (0.0..=self.size.width).contains(&local_x) && (0.0..=self.size.height).contains(&local_y)
    }
}

/// Backend-agnostic scene for one full grid render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridScene {
    pub viewport: Viewport,
    pub year: String,
    pub sort_order: SortOrder,
    pub band_count: u32,
    pub rows: usize,
    pub columns: usize,
    pub cells: Vec<CellScene>,
    /// Area names, one per row, in canvas coordinates.
    pub row_labels: Vec<TextPrimitive>,
    /// Pollutant names, one per column, in canvas coordinates.
    pub column_labels: Vec<TextPrimitive>,
}

impl GridScene {
    #[must_use]
    pub fn cell(&self, key: CellKey) -> Option<&CellScene> {
        self.cells.iter().find(|cell| cell.key == key)
    }

    #[must_use]
    pub fn cell_at(&self, x: f64, y: f64) -> Option<&CellScene> {
        self.cells.iter().find(|cell| cell.contains(x, y))
    }

    /// Total number of band layers across all cells.
    #[must_use]
    pub fn band_drawable_count(&self) -> usize {
        self.cells.iter().map(|cell| cell.horizon.bands.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty() && self.row_labels.is_empty() && self.column_labels.is_empty()
    }

    pub fn validate(&self) -> HorizonResult<()> {
        if !self.viewport.is_valid() {
            return Err(HorizonError::InvalidViewport {
                width: f64::from(self.viewport.width),
                height: f64::from(self.viewport.height),
            });
        }

        for cell in &self.cells {
            cell.size.validate()?;
            for band in &cell.horizon.bands {
                band.fill.validate()?;
            }
            for line in &cell.axis.lines {
                line.validate()?;
            }
            for text in &cell.axis.texts {
                text.validate()?;
            }
        }
        for text in self.row_labels.iter().chain(&self.column_labels) {
            text.validate()?;
        }

        Ok(())
    }

    /// Serializes the scene as pretty JSON for fixture-based regression checks.
    pub fn to_json_pretty(&self) -> HorizonResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| HorizonError::InvalidData(format!("failed to serialize scene: {e}")))
    }
}
