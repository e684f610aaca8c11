pub mod band_scale;
pub mod dataset;
pub mod horizon;
pub mod measurement;
pub mod pollutant;
pub mod primitives;
pub mod scale;
pub mod series_index;
pub mod time_axis;
pub mod time_scale;
pub mod types;

pub use band_scale::{BandScale, value_extent};
pub use dataset::{load_series_index, load_series_index_from_path, read_raw_rows};
pub use horizon::{
    AreaSegment, AreaVertex, BandPalette, ClipRect, DEFAULT_COLOR_LEVELS, FoldedValue,
    HorizonBand, HorizonGeometry, HorizonParams, HorizonSample, project_horizon,
};
pub use measurement::{
    Measurement, NormalizedRow, RawRow, area_name_from_address, normalize_row,
    parse_measurement_day, parse_pollutant_value,
};
pub use pollutant::{Pollutant, precision_for_column};
pub use scale::LinearScale;
pub use series_index::{IndexBuildReport, SeriesIndex, SeriesKey};
pub use time_axis::{TickInterval, TimeTick, time_tick_target_count, time_ticks};
pub use time_scale::CellTimeScale;
pub use types::{CellSize, SortOrder, Viewport};
