use serde::{Deserialize, Serialize};

use crate::core::{Pollutant, SortOrder};
use crate::error::{HorizonError, HorizonResult};

use super::GridConfig;

pub const DEFAULT_BAND_COUNT: u32 = 5;
pub const DEFAULT_YEAR: &str = "2019";

/// What the grid shows: the control inputs of one render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderSelection {
    /// Column order; duplicates are dropped by [`RenderSelection::columns`].
    pub pollutants: Vec<Pollutant>,
    #[serde(default)]
    pub sort_order: SortOrder,
    pub year: String,
    pub band_count: u32,
}

impl Default for RenderSelection {
    fn default() -> Self {
        Self {
            pollutants: Pollutant::ALL.to_vec(),
            sort_order: SortOrder::Ascending,
            year: DEFAULT_YEAR.to_owned(),
            band_count: DEFAULT_BAND_COUNT,
        }
    }
}

impl RenderSelection {
    #[must_use]
    pub fn new(year: impl Into<String>) -> Self {
        Self {
            year: year.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_pollutants(mut self, pollutants: impl IntoIterator<Item = Pollutant>) -> Self {
        self.pollutants = pollutants.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_sort_order(mut self, sort_order: SortOrder) -> Self {
        self.sort_order = sort_order;
        self
    }

    #[must_use]
    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = year.into();
        self
    }

    #[must_use]
    pub fn with_band_count(mut self, band_count: u32) -> Self {
        self.band_count = band_count;
        self
    }

    /// Selected pollutants in selection order, first occurrence kept.
    #[must_use]
    pub fn columns(&self) -> Vec<Pollutant> {
        let mut columns = Vec::with_capacity(self.pollutants.len());
        for pollutant in &self.pollutants {
            if !columns.contains(pollutant) {
                columns.push(*pollutant);
            }
        }
        columns
    }

    pub fn validate(&self, config: &GridConfig) -> HorizonResult<()> {
        if self.band_count == 0 {
            return Err(HorizonError::InvalidData(
                "band count must be >= 1".to_owned(),
            ));
        }
        if self.band_count > config.max_band_count {
            return Err(HorizonError::InvalidData(format!(
                "band count {} exceeds the configured maximum of {}",
                self.band_count, config.max_band_count
            )));
        }
        Ok(())
    }
}
