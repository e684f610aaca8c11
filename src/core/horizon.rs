use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::primitives::{date_to_days, decimal_to_f64};
use crate::core::{BandScale, CellSize, CellTimeScale, Measurement};
use crate::error::HorizonResult;
use crate::render::Color;

/// Number of palette steps between the light and dark band colors.
pub const DEFAULT_COLOR_LEVELS: u32 = 5;

const BAND_COLOR_CONTRAST: f64 = 2.0;

/// One series sample in scale coordinates. `value: None` breaks the area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizonSample {
    pub days: f64,
    pub value: Option<f64>,
}

impl HorizonSample {
    #[must_use]
    pub fn new(days: f64, value: Option<f64>) -> Self {
        Self { days, value }
    }

    #[must_use]
    pub fn from_measurement(measurement: &Measurement) -> Self {
        Self {
            days: date_to_days(measurement.date),
            value: decimal_to_f64(measurement.value, "measurement value").ok(),
        }
    }
}

/// Vertex in cell-local pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AreaVertex {
    pub x: f64,
    pub y: f64,
}

impl AreaVertex {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One continuous run of the area path.
///
/// `polygon` is explicitly closed against the baseline:
/// `[baseline-start, top edge..., baseline-end, baseline-start]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaSegment {
    pub polygon: Vec<AreaVertex>,
}

/// Axis-aligned clip region in cell-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Light-to-dark color ramp for a pollutant's bands.
///
/// The ramp spans `[0, color_levels - 1]` independently of the band count;
/// band indices past the end extrapolate the same line and clamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandPalette {
    light: Color,
    dark: Color,
    color_levels: u32,
}

impl BandPalette {
    #[must_use]
    pub fn from_base(base: Color, color_levels: u32) -> Self {
        Self {
            light: base.brighter(BAND_COLOR_CONTRAST),
            dark: base.darker(BAND_COLOR_CONTRAST),
            color_levels,
        }
    }

    #[must_use]
    pub fn color_levels(self) -> u32 {
        self.color_levels
    }

    #[must_use]
    pub fn color(self, band: u32) -> Color {
        if self.color_levels <= 1 {
            return self.light.clamped();
        }
        let t = f64::from(band) / f64::from(self.color_levels - 1);
        self.light.lerp(self.dark, t).clamped()
    }
}

/// Parameters shared by every band of one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizonParams {
    pub cell: CellSize,
    pub palette: BandPalette,
}

/// One folded layer: the shared area path shifted by `translate_y` and
/// restricted to `clip`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizonBand {
    pub index: u32,
    pub translate_y: f64,
    pub clip: ClipRect,
    pub fill: Color,
}

impl HorizonBand {
    /// Composites this band on the CPU: shifts every segment and clips it to
    /// the band's clip rect. Empty polygons are dropped.
    #[must_use]
    pub fn clipped_polygons(&self, segments: &[AreaSegment]) -> Vec<Vec<AreaVertex>> {
        segments
            .iter()
            .filter_map(|segment| {
                let ring: SmallVec<[AreaVertex; 32]> = open_ring(&segment.polygon)
                    .iter()
                    .map(|vertex| AreaVertex::new(vertex.x, vertex.y + self.translate_y))
                    .collect();
                let mut clipped = clip_polygon_to_rect(&ring, self.clip);
                if clipped.len() < 3 {
                    return None;
                }
                clipped.push(clipped[0]);
                Some(clipped)
            })
            .collect()
    }
}

/// Where a value ends up after folding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FoldedValue {
    pub band: u32,
    /// Cell-local y of the value's top edge inside `band`, in `[0, H]`.
    pub y: f64,
}

/// Folded drawing of one cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorizonGeometry {
    pub cell: CellSize,
    pub segments: Vec<AreaSegment>,
    pub bands: Vec<HorizonBand>,
    pub band_scale: Option<BandScale>,
}

impl HorizonGeometry {
    #[must_use]
    pub fn empty(cell: CellSize) -> Self {
        Self {
            cell,
            segments: Vec::new(),
            bands: Vec::new(),
            band_scale: None,
        }
    }

    /// No fill at all (missing series, or every value undefined).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Band and in-band y a value lands on once folded.
    ///
    /// Band `i` shows values whose unfolded y lies in `[-i·H, H - i·H]`;
    /// values below the domain floor fold onto the baseline of band 0.
    #[must_use]
    pub fn fold(&self, value: f64) -> Option<FoldedValue> {
        let scale = self.band_scale?;
        let height = self.cell.height;
        let depth = height - scale.value_to_pixel(value);
        if !depth.is_finite() {
            return None;
        }
        if depth <= 0.0 {
            return Some(FoldedValue {
                band: 0,
                y: height,
            });
        }

        let top_band = scale.band_count().saturating_sub(1);
        let band = ((depth / height).floor() as u32).min(top_band);
        let y = (height - (depth - f64::from(band) * height)).clamp(0.0, height);
        Some(FoldedValue { band, y })
    }

    /// Every band composited on the CPU, band order preserved.
    #[must_use]
    pub fn composited(&self) -> Vec<(HorizonBand, Vec<Vec<AreaVertex>>)> {
        self.bands
            .iter()
            .map(|band| (*band, band.clipped_polygons(&self.segments)))
            .collect()
    }
}

/// Builds the folded horizon drawing for one cell.
///
/// The area path is built once (baseline at `H`, gaps at undefined values)
/// and shared by the band scale's `B` layers; layer `i` is shifted by `i·H` toward
/// the baseline and clipped to `[0, W] × [0, H]`. Without a band scale (no
/// defined value) the geometry is empty.
pub fn project_horizon(
    samples: &[HorizonSample],
    time_scale: CellTimeScale,
    band_scale: Option<BandScale>,
    params: &HorizonParams,
) -> HorizonResult<HorizonGeometry> {
    let cell = params.cell.validate()?;
    let Some(band_scale) = band_scale else {
        return Ok(HorizonGeometry::empty(cell));
    };

    let segments = build_area_segments(samples, time_scale, band_scale, cell.height);
    if segments.is_empty() {
        return Ok(HorizonGeometry::empty(cell));
    }

    let clip = ClipRect {
        x: 0.0,
        y: 0.0,
        width: cell.width,
        height: cell.height,
    };
    let bands = (0..band_scale.band_count())
        .map(|index| HorizonBand {
            index,
            translate_y: f64::from(index) * cell.height,
            clip,
            fill: params.palette.color(index),
        })
        .collect();

    Ok(HorizonGeometry {
        cell,
        segments,
        bands,
        band_scale: Some(band_scale),
    })
}

fn build_area_segments(
    samples: &[HorizonSample],
    time_scale: CellTimeScale,
    band_scale: BandScale,
    baseline_y: f64,
) -> Vec<AreaSegment> {
    let mut segments = Vec::new();
    let mut top_edge: Vec<AreaVertex> = Vec::new();

    for sample in samples {
        match sample.value.filter(|value| value.is_finite()) {
            Some(value) => top_edge.push(AreaVertex::new(
                time_scale.days_to_pixel(sample.days),
                band_scale.value_to_pixel(value),
            )),
            None => {
                if let Some(segment) = close_segment(&top_edge, baseline_y) {
                    segments.push(segment);
                }
                top_edge.clear();
            }
        }
    }
    if let Some(segment) = close_segment(&top_edge, baseline_y) {
        segments.push(segment);
    }

    segments
}

fn close_segment(top_edge: &[AreaVertex], baseline_y: f64) -> Option<AreaSegment> {
    let first_x = top_edge.first()?.x;
    let last_x = top_edge.last()?.x;

    let mut polygon = Vec::with_capacity(top_edge.len() + 3);
    polygon.push(AreaVertex::new(first_x, baseline_y));
    polygon.extend_from_slice(top_edge);
    polygon.push(AreaVertex::new(last_x, baseline_y));
    polygon.push(AreaVertex::new(first_x, baseline_y));
    Some(AreaSegment { polygon })
}

/// Drops the explicit closing vertex so the ring can be clipped.
fn open_ring(polygon: &[AreaVertex]) -> &[AreaVertex] {
    match polygon {
        [first, .., last] if first == last => &polygon[..polygon.len() - 1],
        _ => polygon,
    }
}

#[derive(Debug, Clone, Copy)]
enum ClipEdge {
    Left(f64),
    Right(f64),
    Top(f64),
    Bottom(f64),
}

impl ClipEdge {
    fn contains(self, vertex: AreaVertex) -> bool {
        match self {
            Self::Left(x) => vertex.x >= x,
            Self::Right(x) => vertex.x <= x,
            Self::Top(y) => vertex.y >= y,
            Self::Bottom(y) => vertex.y <= y,
        }
    }

    // Only called for edges crossing the boundary, so the divisor is non-zero.
    fn intersect(self, from: AreaVertex, to: AreaVertex) -> AreaVertex {
        match self {
            Self::Left(x) | Self::Right(x) => {
                let t = (x - from.x) / (to.x - from.x);
                AreaVertex::new(x, from.y + t * (to.y - from.y))
            }
            Self::Top(y) | Self::Bottom(y) => {
                let t = (y - from.y) / (to.y - from.y);
                AreaVertex::new(from.x + t * (to.x - from.x), y)
            }
        }
    }
}

/// Sutherland–Hodgman clipping of an open ring against a rectangle.
fn clip_polygon_to_rect(ring: &[AreaVertex], rect: ClipRect) -> Vec<AreaVertex> {
    let edges = [
        ClipEdge::Left(rect.x),
        ClipEdge::Right(rect.x + rect.width),
        ClipEdge::Top(rect.y),
        ClipEdge::Bottom(rect.y + rect.height),
    ];

    let mut output = ring.to_vec();
    for edge in edges {
        let Some(&last) = output.last() else {
            break;
        };
        let input = std::mem::take(&mut output);
        let mut previous = last;
        for &current in &input {
            let current_inside = edge.contains(current);
            if current_inside != edge.contains(previous) {
                output.push(edge.intersect(previous, current));
            }
            if current_inside {
                output.push(current);
            }
            previous = current;
        }
    }
    output
}
