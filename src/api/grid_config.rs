use serde::{Deserialize, Serialize};

use crate::core::{CellSize, DEFAULT_COLOR_LEVELS, Viewport};
use crate::error::{HorizonError, HorizonResult};

/// Canvas margins around the plot area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridMargins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for GridMargins {
    fn default() -> Self {
        Self {
            top: 50.0,
            right: 200.0,
            bottom: 50.0,
            left: 200.0,
        }
    }
}

impl GridMargins {
    fn validate(self) -> HorizonResult<()> {
        for (side, value) in [
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
            ("left", self.left),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(HorizonError::InvalidData(format!(
                    "margin `{side}` must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }
}

/// How cell sizes are derived.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum CellSizing {
    /// Divide the plot area between the rows and the selected columns.
    #[default]
    FitCanvas,
    /// Same size for every cell regardless of grid shape.
    Fixed { width: f64, height: f64 },
}

/// Public grid configuration.
///
/// Serializable so hosts can persist and reload a layout; missing fields
/// fall back to the defaults below.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_viewport")]
    pub viewport: Viewport,
    #[serde(default)]
    pub margins: GridMargins,
    #[serde(default = "default_padding_px")]
    pub padding_px: f64,
    /// Band separator inset `p` used by the vertical scale.
    #[serde(default = "default_band_inset_px")]
    pub band_inset_px: f64,
    #[serde(default = "default_label_font_px")]
    pub label_font_px: f64,
    #[serde(default = "default_color_levels")]
    pub color_levels: u32,
    #[serde(default = "default_max_band_count")]
    pub max_band_count: u32,
    #[serde(default)]
    pub cell_sizing: CellSizing,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            viewport: default_viewport(),
            margins: GridMargins::default(),
            padding_px: default_padding_px(),
            band_inset_px: default_band_inset_px(),
            label_font_px: default_label_font_px(),
            color_levels: default_color_levels(),
            max_band_count: default_max_band_count(),
            cell_sizing: CellSizing::default(),
        }
    }
}

impl GridConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_margins(mut self, margins: GridMargins) -> Self {
        self.margins = margins;
        self
    }

    #[must_use]
    pub fn with_padding_px(mut self, padding_px: f64) -> Self {
        self.padding_px = padding_px;
        self
    }

    #[must_use]
    pub fn with_band_inset_px(mut self, band_inset_px: f64) -> Self {
        self.band_inset_px = band_inset_px;
        self
    }

    #[must_use]
    pub fn with_label_font_px(mut self, label_font_px: f64) -> Self {
        self.label_font_px = label_font_px;
        self
    }

    /// Sets the number of palette steps, independent of the band count.
    #[must_use]
    pub fn with_color_levels(mut self, color_levels: u32) -> Self {
        self.color_levels = color_levels;
        self
    }

    #[must_use]
    pub fn with_max_band_count(mut self, max_band_count: u32) -> Self {
        self.max_band_count = max_band_count;
        self
    }

    #[must_use]
    pub fn with_cell_sizing(mut self, cell_sizing: CellSizing) -> Self {
        self.cell_sizing = cell_sizing;
        self
    }

    pub fn validate(&self) -> HorizonResult<()> {
        if !self.viewport.is_valid() {
            return Err(HorizonError::InvalidViewport {
                width: f64::from(self.viewport.width),
                height: f64::from(self.viewport.height),
            });
        }
        self.margins.validate()?;
        if !self.padding_px.is_finite() || self.padding_px < 0.0 {
            return Err(HorizonError::InvalidData(
                "padding must be finite and >= 0".to_owned(),
            ));
        }
        if !self.band_inset_px.is_finite() || self.band_inset_px < 0.0 {
            return Err(HorizonError::InvalidData(
                "band inset must be finite and >= 0".to_owned(),
            ));
        }
        if !self.label_font_px.is_finite() || self.label_font_px <= 0.0 {
            return Err(HorizonError::InvalidData(
                "label font size must be finite and > 0".to_owned(),
            ));
        }
        if self.color_levels == 0 {
            return Err(HorizonError::InvalidData(
                "color levels must be >= 1".to_owned(),
            ));
        }
        if self.max_band_count == 0 {
            return Err(HorizonError::InvalidData(
                "max band count must be >= 1".to_owned(),
            ));
        }
        if let CellSizing::Fixed { width, height } = self.cell_sizing {
            CellSize::new(width, height).validate()?;
        }
        Ok(())
    }

    /// Plot area: the canvas minus margins.
    #[must_use]
    pub fn plot_size(&self) -> (f64, f64) {
        (
            f64::from(self.viewport.width) - self.margins.left - self.margins.right,
            f64::from(self.viewport.height) - self.margins.top - self.margins.bottom,
        )
    }

    pub fn to_json_pretty(&self) -> HorizonResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| HorizonError::InvalidData(format!("failed to serialize config: {e}")))
    }

    pub fn from_json_str(input: &str) -> HorizonResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| HorizonError::InvalidData(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

fn default_viewport() -> Viewport {
    Viewport::new(4000, 4000)
}

fn default_padding_px() -> f64 {
    50.0
}

fn default_band_inset_px() -> f64 {
    1.0
}

fn default_label_font_px() -> f64 {
    12.0
}

fn default_color_levels() -> u32 {
    DEFAULT_COLOR_LEVELS
}

fn default_max_band_count() -> u32 {
    10
}
