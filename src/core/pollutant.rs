use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{HorizonError, HorizonResult};
use crate::render::Color;

/// Measured pollutant, one dataset column each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Pollutant {
    #[serde(rename = "SO2")]
    So2,
    #[serde(rename = "NO2")]
    No2,
    #[serde(rename = "O3")]
    O3,
    #[serde(rename = "CO")]
    Co,
    #[serde(rename = "PM10")]
    Pm10,
    #[serde(rename = "PM2.5")]
    Pm25,
}

impl Pollutant {
    /// Canonical column order.
    pub const ALL: [Pollutant; 6] = [
        Pollutant::So2,
        Pollutant::No2,
        Pollutant::O3,
        Pollutant::Co,
        Pollutant::Pm10,
        Pollutant::Pm25,
    ];

    /// Dataset column header, also used as the display label.
    #[must_use]
    pub const fn column_name(self) -> &'static str {
        match self {
            Self::So2 => "SO2",
            Self::No2 => "NO2",
            Self::O3 => "O3",
            Self::Co => "CO",
            Self::Pm10 => "PM10",
            Self::Pm25 => "PM2.5",
        }
    }

    /// Number of decimal places every measurement of this pollutant carries.
    #[must_use]
    pub const fn decimal_places(self) -> u32 {
        match self {
            Self::So2 | Self::No2 | Self::O3 => 3,
            Self::Co | Self::Pm10 | Self::Pm25 => 1,
        }
    }

    /// Base hue, assigned from the ten-color categorical palette in
    /// canonical order.
    #[must_use]
    pub fn base_color(self) -> Color {
        let hex = match self {
            Self::So2 => 0x1f77b4,
            Self::No2 => 0xff7f0e,
            Self::O3 => 0x2ca02c,
            Self::Co => 0xd62728,
            Self::Pm10 => 0x9467bd,
            Self::Pm25 => 0x8c564b,
        };
        Color::from_rgb_hex(hex)
    }
}

/// Precision for an arbitrary column header: the pollutant's own precision,
/// two places for anything unrecognised.
#[must_use]
pub fn precision_for_column(column: &str) -> u32 {
    column
        .parse::<Pollutant>()
        .map_or(DEFAULT_DECIMAL_PLACES, Pollutant::decimal_places)
}

pub const DEFAULT_DECIMAL_PLACES: u32 = 2;

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

impl FromStr for Pollutant {
    type Err = HorizonError;

    fn from_str(input: &str) -> HorizonResult<Self> {
        let trimmed = input.trim();
        Self::ALL
            .into_iter()
            .find(|pollutant| pollutant.column_name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| HorizonError::InvalidData(format!("unknown pollutant `{trimmed}`")))
    }
}
