use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{date_to_days, days_to_date};
use crate::core::{CellSize, LinearScale, SortOrder};
use crate::error::{HorizonError, HorizonResult};

/// Pixel width a single-date series collapses to.
pub const DEGENERATE_RANGE_PX: f64 = 1.0;

/// Horizontal scale of one cell: calendar days onto `[0, W]` (ascending) or
/// `[W, 0]` (descending).
///
/// Sort order only mirrors the range; the series it was fitted from keeps its
/// ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellTimeScale {
    linear: LinearScale,
    sort_order: SortOrder,
    degenerate: bool,
}

impl CellTimeScale {
    /// Fits the scale to `[min date, max date]`.
    ///
    /// When both ends are the same day the domain is widened to one day and
    /// the range collapses to a single pixel.
    pub fn new(
        first: NaiveDate,
        last: NaiveDate,
        width: f64,
        sort_order: SortOrder,
    ) -> HorizonResult<Self> {
        if !width.is_finite() || width <= 0.0 {
            return Err(HorizonError::InvalidData(
                "time scale width must be finite and > 0".to_owned(),
            ));
        }

        let start = date_to_days(first.min(last));
        let end = date_to_days(first.max(last));
        let degenerate = start == end;
        let (domain_end, span_px) = if degenerate {
            (start + 1.0, DEGENERATE_RANGE_PX.min(width))
        } else {
            (end, width)
        };
        let range = match sort_order {
            SortOrder::Ascending => (0.0, span_px),
            SortOrder::Descending => (span_px, 0.0),
        };

        Ok(Self {
            linear: LinearScale::new((start, domain_end), range)?,
            sort_order,
            degenerate,
        })
    }

    /// Fits the scale to the extent of an already ordered set of dates.
    ///
    /// Returns `None` for an empty set.
    pub fn from_dates<I>(dates: I, cell: CellSize, sort_order: SortOrder) -> HorizonResult<Option<Self>>
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let mut extent: Option<(NaiveDate, NaiveDate)> = None;
        for date in dates {
            extent = Some(match extent {
                Some((min, max)) => (min.min(date), max.max(date)),
                None => (date, date),
            });
        }

        extent
            .map(|(first, last)| Self::new(first, last, cell.width, sort_order))
            .transpose()
    }

    /// Domain in continuous days.
    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        self.linear.domain()
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        self.linear.range()
    }

    #[must_use]
    pub fn sort_order(self) -> SortOrder {
        self.sort_order
    }

    /// Whether the fitted series covered a single day.
    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.degenerate
    }

    #[must_use]
    pub fn days_to_pixel(self, days: f64) -> f64 {
        self.linear.map(days)
    }

    #[must_use]
    pub fn date_to_pixel(self, date: NaiveDate) -> f64 {
        self.days_to_pixel(date_to_days(date))
    }

    #[must_use]
    pub fn pixel_to_days(self, pixel: f64) -> f64 {
        self.linear.invert(pixel)
    }

    /// Calendar day under a pixel (the inverted instant floored to its day).
    #[must_use]
    pub fn pixel_to_date(self, pixel: f64) -> Option<NaiveDate> {
        days_to_date(self.pixel_to_days(pixel))
    }
}
