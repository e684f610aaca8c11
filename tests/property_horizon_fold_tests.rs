use chrono::NaiveDate;
use horizon_grid::core::primitives::date_to_days;
use horizon_grid::core::{
    AreaVertex, BandPalette, BandScale, CellSize, CellTimeScale, HorizonGeometry, HorizonParams,
    HorizonSample, Pollutant, SortOrder, project_horizon,
};
use proptest::prelude::*;

const EPS: f64 = 1e-6;

fn first_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2019, 1, 1).expect("valid date")
}

/// Topmost y of the polygons' vertical slice at `x`, if any polygon reaches `x`.
fn top_at(polygons: &[Vec<AreaVertex>], x: f64) -> Option<f64> {
    let mut top: Option<f64> = None;
    let mut push = |y: f64| top = Some(top.map_or(y, |current: f64| current.min(y)));
    for polygon in polygons {
        for edge in polygon.windows(2) {
            let (from, to) = (edge[0], edge[1]);
            if (from.x - to.x).abs() <= EPS {
                if (from.x - x).abs() <= EPS {
                    push(from.y.min(to.y));
                }
                continue;
            }
            let (left, right) = if from.x < to.x { (from, to) } else { (to, from) };
            if x >= left.x - EPS && x <= right.x + EPS {
                let t = ((x - left.x) / (right.x - left.x)).clamp(0.0, 1.0);
                push(left.y + t * (right.y - left.y));
            }
        }
    }
    top
}

/// Highest band whose composited fill rises above the baseline at `x`, with
/// the fill's top y there. `(0, H)` when no band shows any fill.
fn composited_top(geometry: &HorizonGeometry, x: f64) -> (u32, f64) {
    let height = geometry.cell.height;
    geometry
        .composited()
        .iter()
        .filter_map(|(band, polygons)| {
            top_at(polygons, x)
                .filter(|top| *top < height - EPS)
                .map(|top| (band.index, top))
        })
        .max_by_key(|(band, _)| *band)
        .unwrap_or((0, height))
}

proptest! {
    #[test]
    fn folding_preserves_magnitude_order(
        values in prop::collection::vec(0.0f64..300.0, 2..40),
        band_count in 1u32..11,
        height in 20.0f64..200.0,
        inset in 0.0f64..5.0
    ) {
        let cell = CellSize::new(400.0, height);
        let band_scale = BandScale::from_values(values.iter().copied().map(Some), cell, band_count, inset)
            .expect("no error")
            .expect("defined values");
        let last_day = first_day() + chrono::Days::new(values.len() as u64 - 1);
        let time_scale = CellTimeScale::new(first_day(), last_day, cell.width, SortOrder::Ascending)
            .expect("valid time scale");
        let samples: Vec<HorizonSample> = values
            .iter()
            .enumerate()
            .map(|(offset, value)| {
                HorizonSample::new(date_to_days(first_day()) + offset as f64, Some(*value))
            })
            .collect();
        let params = HorizonParams {
            cell,
            palette: BandPalette::from_base(Pollutant::Pm10.base_color(), 5),
        };
        let geometry = project_horizon(&samples, time_scale, Some(band_scale), &params)
            .expect("projection");

        let mut by_value: Vec<(f64, (u32, f64))> = values
            .iter()
            .enumerate()
            .map(|(offset, value)| {
                let x = time_scale.date_to_pixel(first_day() + chrono::Days::new(offset as u64));
                (*value, composited_top(&geometry, x))
            })
            .collect();
        by_value.sort_by(|left, right| left.0.total_cmp(&right.0));

        let mut previous: Option<(u32, f64)> = None;
        for (value, (band, top)) in by_value {
            let folded = geometry.fold(value).expect("folded");
            prop_assert!(folded.band < band_count);
            prop_assert!((0.0..=height).contains(&folded.y));

            let fold_depth = f64::from(folded.band) * height + (height - folded.y);
            let unfolded = height - band_scale.value_to_pixel(value);
            prop_assert!((fold_depth - unfolded.max(0.0)).abs() <= EPS);

            let composite_depth = f64::from(band) * height + (height - top);
            prop_assert!((composite_depth - fold_depth).abs() <= EPS);
            if folded.y > EPS && folded.y < height - EPS {
                prop_assert_eq!(band, folded.band);
                prop_assert!((top - folded.y).abs() <= EPS);
            }

            if let Some((previous_band, previous_top)) = previous {
                prop_assert!(
                    band > previous_band
                        || (band == previous_band && height - top + EPS >= height - previous_top)
                );
            }
            previous = Some((band, top));
        }
    }

    #[test]
    fn every_band_shares_the_cell_clip(
        values in prop::collection::vec(prop::option::of(0.0f64..50.0), 1..30),
        band_count in 1u32..11
    ) {
        let cell = CellSize::new(240.0, 60.0);
        let band_scale = BandScale::from_values(values.iter().copied(), cell, band_count, 1.0)
            .expect("no error");
        let last_day = first_day() + chrono::Days::new(values.len() as u64);
        let time_scale = CellTimeScale::new(first_day(), last_day, cell.width, SortOrder::Descending)
            .expect("valid time scale");
        let samples: Vec<HorizonSample> = values
            .iter()
            .enumerate()
            .map(|(offset, value)| {
                HorizonSample::new(date_to_days(first_day()) + offset as f64, *value)
            })
            .collect();
        let params = HorizonParams {
            cell,
            palette: BandPalette::from_base(Pollutant::No2.base_color(), 5),
        };
        let geometry = project_horizon(&samples, time_scale, band_scale, &params)
            .expect("projection");

        if geometry.is_empty() {
            prop_assert!(geometry.bands.is_empty());
        } else {
            prop_assert_eq!(geometry.bands.len(), band_count as usize);
        }
        for (band, polygons) in geometry.composited() {
            for polygon in polygons {
                prop_assert!(polygon.iter().all(|vertex| {
                    vertex.x >= band.clip.x - 1e-9
                        && vertex.x <= band.clip.x + band.clip.width + 1e-9
                        && vertex.y >= band.clip.y - 1e-9
                        && vertex.y <= band.clip.y + band.clip.height + 1e-9
                }), "polygon vertex outside band clip");
            }
        }
    }
}
