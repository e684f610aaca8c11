use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::CellSize;
use crate::error::{HorizonError, HorizonResult};

/// Vertical scale of a horizon cell.
///
/// Maps `[vmin, vmax]` onto `[H, H - B·(H - p)]`, stretching the whole value
/// domain over `B` cell heights before folding. `vmin` is clamped at zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandScale {
    value_min: f64,
    value_max: f64,
    pixel_bottom: f64,
    pixel_top: f64,
    cell_height: f64,
    band_count: u32,
}

impl BandScale {
    pub fn new(
        value_min: f64,
        value_max: f64,
        cell: CellSize,
        band_count: u32,
        band_inset_px: f64,
    ) -> HorizonResult<Self> {
        let cell = cell.validate()?;
        if band_count == 0 {
            return Err(HorizonError::InvalidData(
                "band count must be >= 1".to_owned(),
            ));
        }
        if !band_inset_px.is_finite() || band_inset_px < 0.0 || band_inset_px >= cell.height {
            return Err(HorizonError::InvalidData(
                "band inset must be finite, >= 0 and smaller than the cell height".to_owned(),
            ));
        }
        if !value_min.is_finite() || !value_max.is_finite() {
            return Err(HorizonError::InvalidData(
                "band scale domain must be finite".to_owned(),
            ));
        }

        let stretched = f64::from(band_count) * (cell.height - band_inset_px);
        Ok(Self {
            value_min,
            value_max,
            pixel_bottom: cell.height,
            pixel_top: cell.height - stretched,
            cell_height: cell.height,
            band_count,
        })
    }

    /// Fits the domain to defined values: `vmin = max(0, min)`, `vmax = max`.
    ///
    /// Returns `None` when no value is defined.
    pub fn from_values<I>(
        values: I,
        cell: CellSize,
        band_count: u32,
        band_inset_px: f64,
    ) -> HorizonResult<Option<Self>>
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        match value_extent(values) {
            Some((min, max)) => {
                Self::new(min.max(0.0), max, cell, band_count, band_inset_px).map(Some)
            }
            None => Ok(None),
        }
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.value_min, self.value_max)
    }

    /// Pixel range `(bottom, top)`; `top` is negative once `B > 1`.
    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.pixel_bottom, self.pixel_top)
    }

    #[must_use]
    pub fn band_count(self) -> u32 {
        self.band_count
    }

    #[must_use]
    pub fn cell_height(self) -> f64 {
        self.cell_height
    }

    /// Unfolded pixel y of a value. A zero-width domain maps every value to
    /// the middle of the range.
    #[must_use]
    pub fn value_to_pixel(self, value: f64) -> f64 {
        let span = self.value_max - self.value_min;
        if span == 0.0 {
            return (self.pixel_bottom + self.pixel_top) / 2.0;
        }
        let normalized = (value - self.value_min) / span;
        self.pixel_bottom + normalized * (self.pixel_top - self.pixel_bottom)
    }

    #[must_use]
    pub fn pixel_to_value(self, pixel: f64) -> f64 {
        let pixel_span = self.pixel_top - self.pixel_bottom;
        let normalized = (pixel - self.pixel_bottom) / pixel_span;
        self.value_min + normalized * (self.value_max - self.value_min)
    }
}

/// `(min, max)` over the defined, finite values.
#[must_use]
pub fn value_extent<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let finite: Vec<OrderedFloat<f64>> = values
        .into_iter()
        .flatten()
        .filter(|value| value.is_finite())
        .map(OrderedFloat)
        .collect();
    let min = finite.iter().min()?;
    let max = finite.iter().max()?;
    Some((min.0, max.0))
}
