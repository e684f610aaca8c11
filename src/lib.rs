//! horizon-grid: horizon chart grids for pollutant time series.
//!
//! The crate turns a tabular pollutant dataset into an immutable series
//! index once, then builds a deterministic scene graph of folded,
//! color-banded area charts (one per area × pollutant cell) for any
//! selection of pollutants, year, sort order and band count.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{GridConfig, HorizonGridEngine, RenderSelection, build_grid_scene};
pub use error::{HorizonError, HorizonResult};
