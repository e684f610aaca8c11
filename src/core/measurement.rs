use std::str::FromStr;

use chrono::NaiveDate;
use indexmap::IndexMap;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::core::Pollutant;
use crate::error::{HorizonError, HorizonResult};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One untyped dataset row as read from the source table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    pub address: Option<String>,
    pub measurement_date: Option<String>,
    pub values: IndexMap<Pollutant, String>,
}

impl RawRow {
    #[must_use]
    pub fn new(address: impl Into<String>, measurement_date: impl Into<String>) -> Self {
        Self {
            address: Some(address.into()),
            measurement_date: Some(measurement_date.into()),
            values: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_value(mut self, pollutant: Pollutant, raw: impl Into<String>) -> Self {
        self.values.insert(pollutant, raw.into());
        self
    }
}

/// Typed, precision-normalized sample for one pollutant on one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Measurement {
    pub date: NaiveDate,
    pub area: String,
    pub pollutant: Pollutant,
    pub value: Decimal,
}

/// Result of normalizing one well-formed row.
#[derive(Debug)]
pub struct NormalizedRow {
    pub area: String,
    pub year: String,
    pub measurements: Vec<Measurement>,
    /// `NonNumericValue` errors for the pollutant fields that were omitted.
    pub rejected: Vec<HorizonError>,
}

/// Derives the area name from a hierarchical address: the third-from-last
/// comma-separated segment.
pub fn area_name_from_address(address: &str) -> HorizonResult<String> {
    let segments: Vec<&str> = address.split(',').map(str::trim).collect();
    if segments.len() < 3 {
        return Err(HorizonError::malformed(format!(
            "address `{address}` has fewer than three segments"
        )));
    }

    let area = segments[segments.len() - 3];
    if area.is_empty() {
        return Err(HorizonError::malformed(format!(
            "address `{address}` has an empty area segment"
        )));
    }
    Ok(area.to_owned())
}

/// Parses the date-first measurement timestamp (`2019-03-01 09:00`) into its
/// calendar day and year segment.
pub fn parse_measurement_day(raw: &str) -> HorizonResult<(NaiveDate, String)> {
    let day = raw
        .split_whitespace()
        .next()
        .ok_or_else(|| HorizonError::malformed("measurement date is blank"))?;
    let date = NaiveDate::parse_from_str(day, DATE_FORMAT).map_err(|err| {
        HorizonError::malformed(format!("measurement date `{raw}` is not a day: {err}"))
    })?;
    let year = day.split('-').next().unwrap_or(day).to_owned();
    Ok((date, year))
}

/// Parses a raw pollutant reading and rounds it to the pollutant's precision.
///
/// The returned decimal always carries exactly `decimal_places()` places;
/// magnitudes too large to hold that many places are non-numeric.
pub fn parse_pollutant_value(pollutant: Pollutant, raw: &str) -> HorizonResult<Decimal> {
    let trimmed = raw.trim();
    let non_numeric = || HorizonError::NonNumericValue {
        pollutant,
        raw: raw.to_owned(),
    };
    if trimmed.is_empty() {
        return Err(non_numeric());
    }

    let parsed = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| non_numeric())?;

    let places = pollutant.decimal_places();
    let mut rounded = parsed.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(places);
    if rounded.scale() != places {
        return Err(non_numeric());
    }
    Ok(rounded)
}

/// Normalizes one raw row.
///
/// A missing or unparseable address/date rejects the whole row with
/// `MalformedRow`. Individual non-numeric pollutant fields are reported in
/// `NormalizedRow::rejected` and do not affect the rest of the row.
pub fn normalize_row(row: &RawRow) -> HorizonResult<NormalizedRow> {
    let address = row
        .address
        .as_deref()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| HorizonError::malformed("missing `Address`"))?;
    let raw_date = row
        .measurement_date
        .as_deref()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| HorizonError::malformed("missing `Measurement date`"))?;

    let area = area_name_from_address(address)?;
    let (date, year) = parse_measurement_day(raw_date)?;

    let mut measurements = Vec::with_capacity(row.values.len());
    let mut rejected = Vec::new();
    for (&pollutant, raw) in &row.values {
        match parse_pollutant_value(pollutant, raw) {
            Ok(value) => measurements.push(Measurement {
                date,
                area: area.clone(),
                pollutant,
                value,
            }),
            Err(err) => rejected.push(err),
        }
    }

    Ok(NormalizedRow {
        area,
        year,
        measurements,
        rejected,
    })
}
