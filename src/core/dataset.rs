use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use crate::core::{Pollutant, RawRow, SeriesIndex};
use crate::error::{HorizonError, HorizonResult};

pub const ADDRESS_COLUMN: &str = "Address";
pub const MEASUREMENT_DATE_COLUMN: &str = "Measurement date";

/// Header positions of the columns the normalizer consumes.
#[derive(Debug, Clone)]
struct ColumnLayout {
    address: usize,
    measurement_date: usize,
    pollutants: Vec<(Pollutant, usize)>,
}

impl ColumnLayout {
    fn from_headers(headers: &StringRecord) -> HorizonResult<Self> {
        let position = |name: &str| headers.iter().position(|header| header.trim() == name);

        let address = position(ADDRESS_COLUMN).ok_or_else(|| {
            HorizonError::LoadFailure(format!("missing `{ADDRESS_COLUMN}` column"))
        })?;
        let measurement_date = position(MEASUREMENT_DATE_COLUMN).ok_or_else(|| {
            HorizonError::LoadFailure(format!("missing `{MEASUREMENT_DATE_COLUMN}` column"))
        })?;
        let pollutants = Pollutant::ALL
            .into_iter()
            .filter_map(|pollutant| position(pollutant.column_name()).map(|idx| (pollutant, idx)))
            .collect();

        Ok(Self {
            address,
            measurement_date,
            pollutants,
        })
    }

    fn raw_row(&self, record: &StringRecord) -> RawRow {
        let field = |idx: usize| record.get(idx).map(str::to_owned);
        let mut row = RawRow {
            address: field(self.address),
            measurement_date: field(self.measurement_date),
            ..RawRow::default()
        };
        for &(pollutant, idx) in &self.pollutants {
            if let Some(raw) = record.get(idx) {
                row.values.insert(pollutant, raw.to_owned());
            }
        }
        row
    }
}

/// Reads every row of a headed CSV table.
///
/// Any I/O or CSV framing error aborts the load with `LoadFailure`; the
/// caller never sees a partial row set.
pub fn read_raw_rows<R: Read>(reader: R) -> HorizonResult<Vec<RawRow>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|err| HorizonError::LoadFailure(format!("failed to read CSV headers: {err}")))?
        .clone();
    let layout = ColumnLayout::from_headers(&headers)?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result
            .map_err(|err| HorizonError::LoadFailure(format!("failed to read CSV record: {err}")))?;
        rows.push(layout.raw_row(&record));
    }

    debug!(rows = rows.len(), "read dataset rows");
    Ok(rows)
}

/// Reads the dataset and builds the series index in one step.
pub fn load_series_index<R: Read>(reader: R) -> HorizonResult<SeriesIndex> {
    let rows = read_raw_rows(reader)?;
    Ok(SeriesIndex::build(&rows))
}

pub fn load_series_index_from_path(path: impl AsRef<Path>) -> HorizonResult<SeriesIndex> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|err| {
        HorizonError::LoadFailure(format!("failed to open {}: {err}", path.display()))
    })?;
    load_series_index(file)
}
