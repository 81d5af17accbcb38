use thiserror::Error;

/// Error type shared by every tabrs module.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error")]
    Io(#[source] std::io::Error),

    #[error("CSV error")]
    Csv(#[source] csv::Error),

    #[error("schema mismatch in dataset '{dataset}': {field}")]
    SchemaMismatch { dataset: String, field: String },

    #[error("column not found: {0}")]
    ColumnNotFound(String),

    #[error("type conversion error: {0}")]
    Cast(String),

    #[error("data consistency error: {0}")]
    Consistency(String),

    #[error("no data: {0}")]
    EmptyData(String),

    #[error("visualization error: {0}")]
    Visualization(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err)
    }
}

#[cfg(feature = "visualization")]
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for Error
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        Error::Visualization(format!("plot rendering failed: {}", err))
    }
}
