use std::path::PathBuf;

use courtbench_core::Source;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{record_set} source not found: {}", path.display())]
    SourceNotFound { record_set: Source, path: PathBuf },

    #[error("failed to parse {record_set} source {}: {error}", path.display())]
    Json {
        record_set: Source,
        path: PathBuf,
        #[source]
        error: serde_json::Error,
    },

    #[error("malformed hearing_date {value} for hearing {webcast_id} in {record_set}")]
    MalformedDate {
        record_set: Source,
        webcast_id: String,
        value: String,
    },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json encode error: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
}
