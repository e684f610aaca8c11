use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;
use indexmap::{IndexMap, IndexSet};
use tracing::{debug, trace};

use crate::core::{Measurement, Pollutant, RawRow, normalize_row};

/// Identity of one orderable time series.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeriesKey {
    pub pollutant: Pollutant,
    pub year: String,
    pub area: String,
}

impl SeriesKey {
    #[must_use]
    pub fn new(pollutant: Pollutant, year: impl Into<String>, area: impl Into<String>) -> Self {
        Self {
            pollutant,
            year: year.into(),
            area: area.into(),
        }
    }
}

/// Counters collected during the single aggregation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndexBuildReport {
    pub rows_seen: usize,
    pub rows_dropped: usize,
    pub values_omitted: usize,
    pub duplicates_discarded: usize,
}

/// Immutable lookup from `(pollutant, year, area)` to an ordered series.
///
/// Built once from the full dataset; every stored series is sorted by date
/// and holds at most one measurement per date (first occurrence wins).
#[derive(Debug, Clone, Default)]
pub struct SeriesIndex {
    series: IndexMap<SeriesKey, Arc<[Measurement]>>,
    areas: IndexSet<String>,
    years: BTreeSet<String>,
    report: IndexBuildReport,
}

/// Series under construction: samples in insertion order plus the dates
/// already taken.
#[derive(Default)]
struct SeriesBuilder {
    measurements: Vec<Measurement>,
    dates: BTreeSet<NaiveDate>,
}

impl SeriesIndex {
    /// Normalizes and aggregates `rows` in one pass.
    ///
    /// Malformed rows and non-numeric fields are skipped; nothing aborts the
    /// pass.
    pub fn build<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a RawRow>,
    {
        let mut builders: IndexMap<SeriesKey, SeriesBuilder> = IndexMap::new();
        let mut areas = IndexSet::new();
        let mut years = BTreeSet::new();
        let mut report = IndexBuildReport::default();

        for (row_number, row) in rows.into_iter().enumerate() {
            report.rows_seen += 1;
            let normalized = match normalize_row(row) {
                Ok(normalized) => normalized,
                Err(err) => {
                    report.rows_dropped += 1;
                    trace!(row_number, error = %err, "dropping row");
                    continue;
                }
            };

            for err in &normalized.rejected {
                trace!(row_number, error = %err, "omitting value");
            }
            report.values_omitted += normalized.rejected.len();

            if !areas.contains(normalized.area.as_str()) {
                areas.insert(normalized.area.clone());
            }
            if !years.contains(normalized.year.as_str()) {
                years.insert(normalized.year.clone());
            }

            for measurement in normalized.measurements {
                let key = SeriesKey::new(
                    measurement.pollutant,
                    normalized.year.as_str(),
                    normalized.area.as_str(),
                );
                let builder = builders.entry(key).or_default();
                if builder.dates.insert(measurement.date) {
                    builder.measurements.push(measurement);
                } else {
                    report.duplicates_discarded += 1;
                }
            }
        }

        let series: IndexMap<SeriesKey, Arc<[Measurement]>> = builders
            .into_iter()
            .map(|(key, builder)| {
                let mut measurements = builder.measurements;
                // Dates are unique at this point, so a stable sort keeps the
                // first-seen sample for every day.
                measurements.sort_by_key(|measurement| measurement.date);
                (key, Arc::from(measurements))
            })
            .collect();

        debug!(
            rows_seen = report.rows_seen,
            rows_dropped = report.rows_dropped,
            values_omitted = report.values_omitted,
            duplicates_discarded = report.duplicates_discarded,
            series = series.len(),
            areas = areas.len(),
            "built series index"
        );

        Self {
            series,
            areas,
            years,
            report,
        }
    }

    /// Ordered series for a key; empty when the key has no data.
    #[must_use]
    pub fn lookup(&self, pollutant: Pollutant, year: &str, area: &str) -> &[Measurement] {
        self.get(pollutant, year, area)
            .map(|series| &**series)
            .unwrap_or(&[])
    }

    /// Shared handle to a key's series, for consumers that outlive a borrow.
    #[must_use]
    pub fn series(&self, pollutant: Pollutant, year: &str, area: &str) -> Option<Arc<[Measurement]>> {
        self.get(pollutant, year, area).cloned()
    }

    fn get(&self, pollutant: Pollutant, year: &str, area: &str) -> Option<&Arc<[Measurement]>> {
        self.series.get(&SeriesKey::new(pollutant, year, area))
    }

    /// Distinct areas in first-seen order.
    #[must_use]
    pub fn areas(&self) -> &IndexSet<String> {
        &self.areas
    }

    /// Distinct years, ascending.
    pub fn years(&self) -> impl Iterator<Item = &str> {
        self.years.iter().map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &SeriesKey> {
        self.series.keys()
    }

    #[must_use]
    pub fn report(&self) -> IndexBuildReport {
        self.report
    }

    /// Number of non-empty series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}
