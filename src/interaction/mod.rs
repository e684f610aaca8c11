use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{CellTimeScale, Measurement, Pollutant, SeriesIndex};
use crate::render::{CellKey, CellScene, GridScene};

/// Data point under the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverHit {
    pub cell: CellKey,
    pub date: NaiveDate,
    pub area: String,
    pub pollutant: Pollutant,
    pub value: Decimal,
    /// Cell-local x of the vertical crosshair (the pointer x).
    pub crosshair_x: f64,
}

impl HoverHit {
    /// Three-line tooltip: date, area, then `<pollutant>: <value>`.
    #[must_use]
    pub fn tooltip_text(&self) -> String {
        format!(
            "Date: {}\nAddress: {}\n{}: {}",
            self.date.format("%Y-%m-%d"),
            self.area,
            self.pollutant,
            self.value
        )
    }
}

/// Pointer lookup for one grid cell.
///
/// Holds the cell's time scale and a shared handle to its series; never
/// touches the index itself.
#[derive(Debug, Clone)]
pub struct CellOverlay {
    cell: CellKey,
    area: String,
    pollutant: Pollutant,
    width: f64,
    time_scale: Option<CellTimeScale>,
    series: Arc<[Measurement]>,
}

impl CellOverlay {
    #[must_use]
    pub fn new(cell: &CellScene, series: Option<Arc<[Measurement]>>) -> Self {
        Self {
            cell: cell.key,
            area: cell.area.clone(),
            pollutant: cell.pollutant,
            width: cell.size.width,
            time_scale: cell.time_scale,
            series: series.unwrap_or_else(|| Arc::from(Vec::new())),
        }
    }

    #[must_use]
    pub fn cell(&self) -> CellKey {
        self.cell
    }

    /// Exact-date lookup under a cell-local pointer x.
    ///
    /// Returns `None` outside `[0, W]`, for a cell without data, or when the
    /// series has no measurement on the hovered calendar day.
    #[must_use]
    pub fn on_hover(&self, pointer_x: f64) -> Option<HoverHit> {
        if !pointer_x.is_finite() || !(0.0..=self.width).contains(&pointer_x) {
            return None;
        }
        let date = self.time_scale?.pixel_to_date(pointer_x)?;
        let position = self
            .series
            .binary_search_by_key(&date, |measurement| measurement.date)
            .ok()?;
        let measurement = &self.series[position];

        Some(HoverHit {
            cell: self.cell,
            date,
            area: self.area.clone(),
            pollutant: self.pollutant,
            value: measurement.value,
            crosshair_x: pointer_x,
        })
    }
}

/// One overlay per scene cell, in scene cell order.
#[must_use]
pub fn overlays_for_scene(scene: &GridScene, index: &SeriesIndex) -> Vec<CellOverlay> {
    scene
        .cells
        .iter()
        .map(|cell| {
            let series = index.series(cell.pollutant, &scene.year, &cell.area);
            CellOverlay::new(cell, series)
        })
        .collect()
}

/// Public crosshair state exposed to host applications.
///
/// The crosshair follows the pointer inside any cell, with or without data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrosshairState {
    pub visible: bool,
    pub cell: Option<CellKey>,
    /// Canvas x of the vertical guide line.
    pub x: f64,
    /// Cell-local x, as passed to `CellOverlay::on_hover`.
    pub local_x: f64,
}

impl Default for CrosshairState {
    fn default() -> Self {
        Self {
            visible: false,
            cell: None,
            x: 0.0,
            local_x: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionState {
    crosshair: CrosshairState,
    hover: Option<HoverHit>,
}

impl InteractionState {
    #[must_use]
    pub fn crosshair(&self) -> CrosshairState {
        self.crosshair
    }

    #[must_use]
    pub fn hover(&self) -> Option<&HoverHit> {
        self.hover.as_ref()
    }

    pub fn on_pointer_move(&mut self, crosshair: CrosshairState, hover: Option<HoverHit>) {
        self.crosshair = crosshair;
        self.hover = hover;
    }

    pub fn on_pointer_leave(&mut self) {
        self.crosshair = CrosshairState::default();
        self.hover = None;
    }
}
