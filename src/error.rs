use thiserror::Error;

use crate::core::Pollutant;

pub type HorizonResult<T> = Result<T, HorizonError>;

#[derive(Debug, Error)]
pub enum HorizonError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: f64, height: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Row is missing a required field or carries an unparseable address/date.
    #[error("malformed row: {reason}")]
    MalformedRow { reason: String },

    /// One pollutant field of an otherwise valid row is not a number.
    #[error("non-numeric {pollutant} value: {raw:?}")]
    NonNumericValue { pollutant: Pollutant, raw: String },

    /// The dataset could not be read; no index is built.
    #[error("failed to load dataset: {0}")]
    LoadFailure(String),
}

impl HorizonError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedRow {
            reason: reason.into(),
        }
    }
}
