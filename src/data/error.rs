use thiserror::Error;

/// Errors that can occur while fetching or parsing a dataset.
///
/// Filtering itself never fails; everything past loading degrades
/// silently (unparseable coercions fall back to text, empty selections
/// are valid states).
#[derive(Error, Debug)]
pub enum DataError {
    #[error("fetching {url}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("source is empty")]
    EmptyFile,

    #[error("header row has no columns")]
    NoColumns,
}

pub type DataResult<T> = Result<T, DataError>;
