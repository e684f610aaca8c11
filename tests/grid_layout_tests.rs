use approx::assert_relative_eq;
use horizon_grid::api::{
    AXIS_TICK_LABEL_ROTATION_DEG, CellSizing, GridConfig, RenderSelection, build_grid_scene,
};
use horizon_grid::core::{Pollutant, RawRow, SeriesIndex, SortOrder, Viewport};
use horizon_grid::render::CellKey;
use horizon_grid::HorizonError;

const JONGNO: &str = "19, Jong-ro 35ga-gil, Jongno-gu, Seoul, Republic of Korea";
const JUNG: &str = "15, Deoksugung-gil, Jung-gu, Seoul, Republic of Korea";

fn fixture_index() -> SeriesIndex {
    let mut rows = Vec::new();
    for day in 1..=20u32 {
        let date = format!("2019-01-{day:02} 00:00");
        rows.push(
            RawRow::new(JONGNO, date.as_str())
                .with_value(Pollutant::So2, format!("0.00{}", day % 7))
                .with_value(Pollutant::No2, format!("0.0{}", 10 + day))
                .with_value(Pollutant::Co, format!("{}.5", day % 3)),
        );
        rows.push(
            RawRow::new(JUNG, date.as_str())
                .with_value(Pollutant::So2, format!("0.00{}", (day + 3) % 7))
                .with_value(Pollutant::No2, format!("0.0{}", 30 - day)),
        );
    }
    SeriesIndex::build(&rows)
}

fn config() -> GridConfig {
    GridConfig::new(Viewport::new(1400, 900))
}

fn selection(pollutants: &[Pollutant]) -> RenderSelection {
    RenderSelection::new("2019").with_pollutants(pollutants.iter().copied())
}

#[test]
fn empty_selection_renders_nothing_without_error() {
    let index = fixture_index();
    let scene = build_grid_scene(&index, &selection(&[]), &config()).expect("empty selection");

    assert_eq!(scene.columns, 0);
    assert_eq!(scene.rows, 2);
    assert!(scene.cells.is_empty());
    assert_eq!(scene.band_drawable_count(), 0);
    assert!(scene.row_labels.is_empty());
    assert!(scene.column_labels.is_empty());
    assert!(scene.is_empty());
}

#[test]
fn grid_has_one_cell_per_area_and_selected_pollutant() {
    let index = fixture_index();
    let pollutants = [Pollutant::No2, Pollutant::So2, Pollutant::Co];
    let scene = build_grid_scene(&index, &selection(&pollutants), &config()).expect("scene");

    assert_eq!(scene.rows, 2);
    assert_eq!(scene.columns, 3);
    assert_eq!(scene.cells.len(), 6);
    for (position, cell) in scene.cells.iter().enumerate() {
        assert_eq!(cell.key, CellKey::new(position / 3, position % 3));
        assert_eq!(cell.pollutant, pollutants[position % 3]);
    }
    assert_eq!(scene.cell(CellKey::new(1, 0)).expect("cell").area, "Jung-gu");

    let row_labels: Vec<&str> = scene.row_labels.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(row_labels, vec!["Jongno-gu", "Jung-gu"]);
    let column_labels: Vec<&str> = scene.column_labels.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(column_labels, vec!["NO2", "SO2", "CO"]);
    assert!(scene.row_labels.iter().chain(&scene.column_labels).all(|t| t.bold));
}

#[test]
fn duplicate_pollutants_are_dropped_from_columns() {
    let index = fixture_index();
    let pollutants = [Pollutant::So2, Pollutant::No2, Pollutant::So2];
    let scene = build_grid_scene(&index, &selection(&pollutants), &config()).expect("scene");

    assert_eq!(scene.columns, 2);
    assert_eq!(scene.cells.len(), 4);
}

#[test]
fn fit_canvas_sizes_and_places_cells() {
    let index = fixture_index();
    let config = config();
    let scene = build_grid_scene(&index, &selection(&[Pollutant::So2, Pollutant::No2]), &config)
        .expect("scene");

    // plot area 1000 x 800
    let width = (1000.0 - 50.0) / 2.0 - 100.0;
    let height = (800.0 - 10.0) / 2.0 - 100.0;
    let cell = scene.cell(CellKey::new(1, 1)).expect("cell");
    assert_relative_eq!(cell.size.width, width);
    assert_relative_eq!(cell.size.height, height);
    assert_relative_eq!(cell.origin_x, 200.0 + 50.0 + (width + 50.0));
    assert_relative_eq!(cell.origin_y, 50.0 + 10.0 + (height + 50.0));

    let row_label = &scene.row_labels[1];
    assert_relative_eq!(row_label.x, 250.0 - 120.0);
    assert_relative_eq!(row_label.y, cell.origin_y + height / 2.0);

    let column_label = &scene.column_labels[1];
    assert_relative_eq!(column_label.x, cell.origin_x + width / 2.0);
    assert_relative_eq!(column_label.y, 10.0);
}

#[test]
fn fixed_sizing_pins_cell_size() {
    let index = fixture_index();
    let config = config().with_cell_sizing(CellSizing::Fixed {
        width: 120.0,
        height: 40.0,
    });
    let scene = build_grid_scene(&index, &selection(&Pollutant::ALL), &config).expect("scene");

    assert!(scene.cells.iter().all(|cell| cell.size.width == 120.0));
    assert!(scene.cells.iter().all(|cell| cell.size.height == 40.0));
    let last = scene.cells.last().expect("cells");
    assert_relative_eq!(last.origin_x, 250.0 + 5.0 * 170.0);
}

#[test]
fn each_cell_with_data_gets_band_count_layers() {
    let index = fixture_index();
    let selection = selection(&[Pollutant::So2, Pollutant::Co]).with_band_count(4);
    let scene = build_grid_scene(&index, &selection, &config()).expect("scene");

    // Jung-gu has no CO readings.
    let empty = scene.cell(CellKey::new(1, 1)).expect("cell");
    assert!(empty.horizon.is_empty());
    assert!(empty.time_scale.is_none());
    assert_eq!(empty.axis.lines.len(), 1);
    assert!(empty.axis.texts.is_empty());

    assert_eq!(scene.band_drawable_count(), 3 * 4);
}

#[test]
fn axis_ticks_are_rotated_day_labels() {
    let index = fixture_index();
    let scene = build_grid_scene(&index, &selection(&[Pollutant::So2]), &config()).expect("scene");
    let cell = &scene.cells[0];

    assert!(!cell.axis.texts.is_empty());
    assert_eq!(cell.axis.lines.len(), cell.axis.texts.len() + 1);
    for text in &cell.axis.texts {
        assert_eq!(text.rotation_deg, AXIS_TICK_LABEL_ROTATION_DEG);
        assert_eq!(text.text.len(), 5);
        assert!(text.text.starts_with("01/"));
    }
}

#[test]
fn descending_order_mirrors_axis_positions() {
    let index = fixture_index();
    let ascending = build_grid_scene(&index, &selection(&[Pollutant::No2]), &config())
        .expect("scene");
    let descending = build_grid_scene(
        &index,
        &selection(&[Pollutant::No2]).with_sort_order(SortOrder::Descending),
        &config(),
    )
    .expect("scene");

    let up = &ascending.cells[0];
    let down = &descending.cells[0];
    assert_eq!(up.axis.texts.len(), down.axis.texts.len());
    for (left, right) in up.axis.texts.iter().zip(&down.axis.texts) {
        assert_eq!(left.text, right.text);
        assert_relative_eq!(left.x, up.size.width - right.x, epsilon = 1e-6);
    }
}

#[test]
fn rebuilding_is_idempotent() {
    let index = fixture_index();
    let selection = selection(&[Pollutant::So2, Pollutant::No2, Pollutant::Co]);

    let first = build_grid_scene(&index, &selection, &config()).expect("scene");
    let second = build_grid_scene(&index, &selection, &config()).expect("scene");

    assert_eq!(first, second);
    assert_eq!(
        first.to_json_pretty().expect("json"),
        second.to_json_pretty().expect("json")
    );
}

#[test]
fn band_count_is_bounded_by_config() {
    let index = fixture_index();
    let config = config().with_max_band_count(6);

    let err = build_grid_scene(&index, &selection(&[Pollutant::So2]).with_band_count(7), &config)
        .expect_err("above max");
    assert!(matches!(err, HorizonError::InvalidData(_)));

    let err = build_grid_scene(&index, &selection(&[Pollutant::So2]).with_band_count(0), &config)
        .expect_err("zero bands");
    assert!(matches!(err, HorizonError::InvalidData(_)));
}

#[test]
fn canvas_too_small_for_grid_is_invalid_viewport() {
    let index = fixture_index();
    let config = GridConfig::new(Viewport::new(500, 300));
    let err = build_grid_scene(&index, &selection(&Pollutant::ALL), &config)
        .expect_err("negative cell size");
    assert!(matches!(err, HorizonError::InvalidViewport { .. }));
}

#[test]
fn unknown_year_keeps_grid_shape_without_fill() {
    let index = fixture_index();
    let selection = selection(&[Pollutant::So2]).with_year("2030");
    let scene = build_grid_scene(&index, &selection, &config()).expect("scene");

    assert_eq!(scene.cells.len(), 2);
    assert_eq!(scene.band_drawable_count(), 0);
    assert_eq!(scene.row_labels.len(), 2);
}
