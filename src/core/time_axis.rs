use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::core::CellTimeScale;
use crate::core::primitives::days_to_date;

pub const TIME_TICK_LABEL_FORMAT: &str = "%m/%d";

const TICKS_PER_FREE_COLUMN: usize = 12;
const MAX_POLLUTANT_COLUMNS: usize = 6;

/// Calendar-aligned tick interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickInterval {
    Days(u32),
    Week,
    Months(u32),
    Year,
}

impl TickInterval {
    const CANDIDATES: [TickInterval; 6] = [
        TickInterval::Days(1),
        TickInterval::Days(2),
        TickInterval::Week,
        TickInterval::Months(1),
        TickInterval::Months(3),
        TickInterval::Year,
    ];

    /// Approximate length used to pick an interval for a target tick count.
    #[must_use]
    pub fn approx_days(self) -> f64 {
        match self {
            Self::Days(step) => f64::from(step),
            Self::Week => 7.0,
            Self::Months(step) => 30.0 * f64::from(step),
            Self::Year => 365.0,
        }
    }

    /// Interval whose length is geometrically closest to `span / target`.
    #[must_use]
    pub fn for_span(span_days: f64, target_count: usize) -> Self {
        if !span_days.is_finite() || span_days <= 0.0 {
            return Self::Days(1);
        }
        let wanted = span_days / target_count.max(1) as f64;
        Self::CANDIDATES
            .into_iter()
            .min_by(|left, right| {
                let distance = |interval: &TickInterval| (interval.approx_days() / wanted).ln().abs();
                distance(left).total_cmp(&distance(right))
            })
            .unwrap_or(Self::Days(1))
    }

    #[must_use]
    pub fn is_boundary(self, date: NaiveDate) -> bool {
        match self {
            Self::Days(step) => (date.day() - 1) % step.max(1) == 0,
            Self::Week => date.weekday() == Weekday::Sun,
            Self::Months(step) => date.day() == 1 && date.month0() % step.max(1) == 0,
            Self::Year => date.ordinal() == 1,
        }
    }
}

/// One tick of a cell's time axis, in cell-local x.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeTick {
    pub date: NaiveDate,
    pub x: f64,
    pub label: String,
}

/// Tick target for one cell: denser axes when fewer pollutant columns share
/// the canvas (`12 × (7 - columns)`).
#[must_use]
pub fn time_tick_target_count(visible_columns: usize) -> usize {
    let columns = visible_columns.clamp(1, MAX_POLLUTANT_COLUMNS);
    TICKS_PER_FREE_COLUMN * (MAX_POLLUTANT_COLUMNS + 1 - columns)
}

/// Calendar-aligned ticks over the scale's domain, in ascending date order.
///
/// Descending scales produce the same dates at mirrored positions.
#[must_use]
pub fn time_ticks(scale: CellTimeScale, target_count: usize) -> Vec<TimeTick> {
    let (start_days, end_days) = scale.domain();
    let (Some(first), Some(last)) = (days_to_date(start_days), days_to_date(end_days)) else {
        return Vec::new();
    };
    let last = if scale.is_degenerate() { first } else { last };
    let interval = TickInterval::for_span(end_days - start_days, target_count);

    let mut ticks = Vec::new();
    let mut date = first;
    while date <= last {
        if interval.is_boundary(date) {
            ticks.push(TimeTick {
                date,
                x: scale.date_to_pixel(date),
                label: date.format(TIME_TICK_LABEL_FORMAT).to_string(),
            });
        }
        let Some(next) = date.succ_opt() else {
            break;
        };
        date = next;
    }
    ticks
}
