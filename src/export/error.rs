use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write CSV row: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write listing: {0}")]
    Io(#[from] std::io::Error),
    #[error("listing is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("failed to flush CSV writer: {0}")]
    CsvFlush(#[from] csv::IntoInnerError<csv::Writer<Vec<u8>>>),
    #[error("failed to encode listing as JSON: {0}")]
    Json(#[from] serde_json::Error),
}
