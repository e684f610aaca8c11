use tracing::{debug, warn};

use crate::core::{
    BandPalette, BandScale, CellSize, CellTimeScale, HorizonGeometry, HorizonParams, HorizonSample,
    Pollutant, SeriesIndex, project_horizon, time_tick_target_count, time_ticks,
};
use crate::error::{HorizonError, HorizonResult};
use crate::render::{
    AxisPrimitives, CellKey, CellScene, Color, GridScene, LinePrimitive, TextHAlign,
    TextPrimitive,
};

use super::{CellSizing, GridConfig, RenderSelection};

/// Horizontal room reserved left of the first column.
pub const PLOT_LEFT_GUTTER_PX: f64 = 50.0;
/// Vertical room reserved above the first row.
pub const PLOT_TOP_GUTTER_PX: f64 = 10.0;
/// Row labels sit this far left of the row's first cell.
pub const ROW_LABEL_OFFSET_PX: f64 = 120.0;
pub const AXIS_TICK_SIZE_PX: f64 = 3.0;
pub const AXIS_TICK_LABEL_ROTATION_DEG: f64 = -45.0;

const AXIS_TICK_LABEL_GAP_PX: f64 = 3.0;
const AXIS_STROKE_WIDTH_PX: f64 = 1.0;

/// Cell geometry shared by every cell of one grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub rows: usize,
    pub columns: usize,
    pub cell: CellSize,
    pub padding_px: f64,
    pub left: f64,
    pub top: f64,
}

impl GridLayout {
    /// Derives the cell size for `rows × columns`.
    ///
    /// Returns `None` for an empty grid; a non-positive cell size is an
    /// `InvalidViewport` error.
    pub fn resolve(config: &GridConfig, rows: usize, columns: usize) -> HorizonResult<Option<Self>> {
        if rows == 0 || columns == 0 {
            return Ok(None);
        }

        let cell = match config.cell_sizing {
            CellSizing::FitCanvas => {
                let (plot_width, plot_height) = config.plot_size();
                let padding = 2.0 * config.padding_px;
                CellSize::new(
                    (plot_width - PLOT_LEFT_GUTTER_PX) / columns as f64 - padding,
                    (plot_height - PLOT_TOP_GUTTER_PX) / rows as f64 - padding,
                )
            }
            CellSizing::Fixed { width, height } => CellSize::new(width, height),
        };
        let cell = cell.validate()?;

        Ok(Some(Self {
            rows,
            columns,
            cell,
            padding_px: config.padding_px,
            left: config.margins.left + PLOT_LEFT_GUTTER_PX,
            top: config.margins.top + PLOT_TOP_GUTTER_PX,
        }))
    }

    /// Canvas position of a cell's top-left corner.
    #[must_use]
    pub fn cell_origin(&self, key: CellKey) -> (f64, f64) {
        (
            self.left + key.col as f64 * (self.cell.width + self.padding_px),
            self.top + key.row as f64 * (self.cell.height + self.padding_px),
        )
    }
}

/// Builds the full grid scene for one selection.
///
/// Rows are every area of the index in first-seen order; columns are the
/// selected pollutants. The index is only read. Equal inputs give an equal
/// scene.
pub fn build_grid_scene(
    index: &SeriesIndex,
    selection: &RenderSelection,
    config: &GridConfig,
) -> HorizonResult<GridScene> {
    config.validate()?;
    selection.validate(config)?;

    let columns = selection.columns();
    let areas = index.areas();
    let mut scene = GridScene {
        viewport: config.viewport,
        year: selection.year.clone(),
        sort_order: selection.sort_order,
        band_count: selection.band_count,
        rows: areas.len(),
        columns: columns.len(),
        cells: Vec::with_capacity(areas.len() * columns.len()),
        row_labels: Vec::new(),
        column_labels: Vec::new(),
    };

    let Some(layout) = GridLayout::resolve(config, areas.len(), columns.len())? else {
        debug!(
            rows = scene.rows,
            columns = scene.columns,
            "empty grid selection"
        );
        return Ok(scene);
    };
    if config.band_inset_px >= layout.cell.height {
        return Err(HorizonError::InvalidData(format!(
            "band inset {} must be smaller than the cell height {}",
            config.band_inset_px, layout.cell.height
        )));
    }

    let tick_target = time_tick_target_count(columns.len());
    for (row, area) in areas.iter().enumerate() {
        for (col, pollutant) in columns.iter().copied().enumerate() {
            let key = CellKey::new(row, col);
            let (origin_x, origin_y) = layout.cell_origin(key);
            let cell = build_cell(
                index,
                selection,
                config,
                CellPlacement {
                    key,
                    area,
                    pollutant,
                    origin_x,
                    origin_y,
                    size: layout.cell,
                    tick_target,
                },
            )?;
            scene.cells.push(cell);

            if col == 0 {
                scene.row_labels.push(
                    TextPrimitive::new(
                        area.clone(),
                        origin_x - ROW_LABEL_OFFSET_PX,
                        origin_y + layout.cell.height / 2.0,
                        config.label_font_px,
                        Color::BLACK,
                        TextHAlign::Left,
                    )
                    .with_bold(true),
                );
            }
            if row == 0 {
                scene.column_labels.push(
                    TextPrimitive::new(
                        pollutant.column_name(),
                        origin_x + layout.cell.width / 2.0,
                        origin_y - config.margins.top,
                        config.label_font_px,
                        Color::BLACK,
                        TextHAlign::Center,
                    )
                    .with_bold(true),
                );
            }
        }
    }

    debug!(
        rows = scene.rows,
        columns = scene.columns,
        cells = scene.cells.len(),
        bands = scene.band_drawable_count(),
        year = %scene.year,
        "built grid scene"
    );
    Ok(scene)
}

struct CellPlacement<'a> {
    key: CellKey,
    area: &'a str,
    pollutant: Pollutant,
    origin_x: f64,
    origin_y: f64,
    size: CellSize,
    tick_target: usize,
}

fn build_cell(
    index: &SeriesIndex,
    selection: &RenderSelection,
    config: &GridConfig,
    placement: CellPlacement<'_>,
) -> HorizonResult<CellScene> {
    let size = placement.size;
    let series = index.lookup(placement.pollutant, &selection.year, placement.area);

    let time_scale = CellTimeScale::from_dates(
        series.iter().map(|measurement| measurement.date),
        size,
        selection.sort_order,
    )?;
    let samples: Vec<HorizonSample> = series.iter().map(HorizonSample::from_measurement).collect();
    let band_scale = BandScale::from_values(
        samples.iter().map(|sample| sample.value),
        size,
        selection.band_count,
        config.band_inset_px,
    )?;

    let horizon = match time_scale {
        Some(time_scale) => {
            if band_scale.is_none() {
                warn!(
                    area = placement.area,
                    pollutant = %placement.pollutant,
                    "series has no defined value; cell left unfilled"
                );
            }
            let params = HorizonParams {
                cell: size,
                palette: BandPalette::from_base(
                    placement.pollutant.base_color(),
                    config.color_levels,
                ),
            };
            project_horizon(&samples, time_scale, band_scale, &params)?
        }
        None => HorizonGeometry::empty(size),
    };

    Ok(CellScene {
        key: placement.key,
        area: placement.area.to_owned(),
        pollutant: placement.pollutant,
        origin_x: placement.origin_x,
        origin_y: placement.origin_y,
        size,
        time_scale,
        horizon,
        axis: build_time_axis(time_scale, size, placement.tick_target, config.label_font_px),
    })
}

/// Baseline at `y = H`, plus tick marks and rotated `%m/%d` labels when the
/// cell has a time scale.
fn build_time_axis(
    time_scale: Option<CellTimeScale>,
    size: CellSize,
    tick_target: usize,
    font_size_px: f64,
) -> AxisPrimitives {
    let mut axis = AxisPrimitives::default();
    axis.lines.push(LinePrimitive::new(
        0.0,
        size.height,
        size.width,
        size.height,
        AXIS_STROKE_WIDTH_PX,
        Color::BLACK,
    ));

    let Some(time_scale) = time_scale else {
        return axis;
    };
    for tick in time_ticks(time_scale, tick_target) {
        axis.lines.push(LinePrimitive::new(
            tick.x,
            size.height,
            tick.x,
            size.height + AXIS_TICK_SIZE_PX,
            AXIS_STROKE_WIDTH_PX,
            Color::BLACK,
        ));
        axis.texts.push(
            TextPrimitive::new(
                tick.label,
                tick.x,
                size.height + AXIS_TICK_SIZE_PX + AXIS_TICK_LABEL_GAP_PX,
                font_size_px,
                Color::BLACK,
                TextHAlign::Right,
            )
            .with_rotation(AXIS_TICK_LABEL_ROTATION_DEG),
        );
    }
    axis
}
