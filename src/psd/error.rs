/// Errors that can occur while resolving or ingesting PSD data
#[derive(Debug, thiserror::Error)]
pub enum PsdError {
    /// I/O error reading an uploaded PSD table
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV parsing error from the underlying reader
    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    /// The referenced template id is not in the library
    #[error("Unknown PSD template: {0}")]
    UnknownTemplate(String),

    /// A CSV upload contained no usable rows
    #[error("CSV contained no valid PSD rows: {0}")]
    EmptyCsv(String),

    /// Template scale factor outside (0, inf)
    #[error("Invalid template scale factor: {0}")]
    InvalidScale(f64),
}
