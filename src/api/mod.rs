mod engine;
mod grid_config;
mod grid_layout;
mod selection;

pub use engine::HorizonGridEngine;
pub use grid_config::{CellSizing, GridConfig, GridMargins};
pub use grid_layout::{
    AXIS_TICK_LABEL_ROTATION_DEG, AXIS_TICK_SIZE_PX, GridLayout, PLOT_LEFT_GUTTER_PX,
    PLOT_TOP_GUTTER_PX, ROW_LABEL_OFFSET_PX, build_grid_scene,
};
pub use selection::{DEFAULT_BAND_COUNT, DEFAULT_YEAR, RenderSelection};
