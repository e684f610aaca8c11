use horizon_grid::HorizonError;
use horizon_grid::api::{CellSizing, GridConfig, GridMargins, RenderSelection};
use horizon_grid::core::{Pollutant, SortOrder, Viewport};

#[test]
fn defaults_match_reference_page() {
    let config = GridConfig::default();

    assert_eq!(config.viewport, Viewport::new(4000, 4000));
    assert_eq!(config.margins, GridMargins::default());
    assert_eq!(config.margins.left, 200.0);
    assert_eq!(config.margins.top, 50.0);
    assert_eq!(config.padding_px, 50.0);
    assert_eq!(config.band_inset_px, 1.0);
    assert_eq!(config.label_font_px, 12.0);
    assert_eq!(config.color_levels, 5);
    assert_eq!(config.max_band_count, 10);
    assert_eq!(config.cell_sizing, CellSizing::FitCanvas);
    assert_eq!(config.plot_size(), (3600.0, 3900.0));
}

#[test]
fn config_json_round_trip_preserves_builders() {
    let config = GridConfig::new(Viewport::new(1200, 800))
        .with_padding_px(20.0)
        .with_color_levels(7)
        .with_cell_sizing(CellSizing::Fixed {
            width: 150.0,
            height: 60.0,
        });

    let json = config.to_json_pretty().expect("serialize");
    let restored = GridConfig::from_json_str(&json).expect("parse");
    assert_eq!(restored, config);
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let config = GridConfig::from_json_str(r#"{ "viewport": { "width": 800, "height": 600 } }"#)
        .expect("parse");

    assert_eq!(config.viewport, Viewport::new(800, 600));
    assert_eq!(config.padding_px, 50.0);
    assert_eq!(config.max_band_count, 10);
}

#[test]
fn invalid_config_is_rejected() {
    let err = GridConfig::from_json_str("{ not json").expect_err("malformed json");
    assert!(matches!(err, HorizonError::InvalidData(_)));

    let err = GridConfig::new(Viewport::new(0, 600))
        .validate()
        .expect_err("zero width");
    assert!(matches!(err, HorizonError::InvalidViewport { .. }));

    let err = GridConfig::default()
        .with_color_levels(0)
        .validate()
        .expect_err("no color levels");
    assert!(matches!(err, HorizonError::InvalidData(_)));

    let err = GridConfig::default()
        .with_cell_sizing(CellSizing::Fixed {
            width: -1.0,
            height: 10.0,
        })
        .validate()
        .expect_err("negative fixed width");
    assert!(matches!(err, HorizonError::InvalidViewport { .. }));
}

#[test]
fn selection_defaults_and_columns() {
    let selection = RenderSelection::default();
    assert_eq!(selection.pollutants, Pollutant::ALL.to_vec());
    assert_eq!(selection.sort_order, SortOrder::Ascending);
    assert_eq!(selection.year, "2019");
    assert_eq!(selection.band_count, 5);

    let selection = RenderSelection::new("2018").with_pollutants([
        Pollutant::Pm25,
        Pollutant::Co,
        Pollutant::Pm25,
    ]);
    assert_eq!(selection.columns(), vec![Pollutant::Pm25, Pollutant::Co]);
}

#[test]
fn selection_round_trips_through_json() {
    let selection = RenderSelection::new("2017")
        .with_pollutants([Pollutant::Pm10, Pollutant::So2])
        .with_sort_order(SortOrder::Descending)
        .with_band_count(8);

    let json = serde_json::to_string(&selection).expect("serialize");
    assert!(json.contains("\"PM10\""));
    let restored: RenderSelection = serde_json::from_str(&json).expect("parse");
    assert_eq!(restored, selection);
}
