use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{HorizonError, HorizonResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> HorizonResult<f64> {
    value.to_f64().ok_or_else(|| {
        HorizonError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

/// Continuous day coordinate used by time scales (days since 0001-01-01).
#[must_use]
pub fn date_to_days(date: NaiveDate) -> f64 {
    f64::from(date.num_days_from_ce())
}

/// Tolerance absorbing round-off when a day coordinate went through a
/// pixel mapping and back.
const DAY_EPSILON: f64 = 1e-6;

/// Calendar day containing a continuous day coordinate.
#[must_use]
pub fn days_to_date(days: f64) -> Option<NaiveDate> {
    let floored = (days + DAY_EPSILON).floor();
    if !floored.is_finite() || floored < f64::from(i32::MIN) || floored > f64::from(i32::MAX) {
        return None;
    }
    NaiveDate::from_num_days_from_ce_opt(floored as i32)
}
