use thiserror::Error;

/// Main error type for widget operations
#[derive(Error, Debug)]
pub enum WidgetError {
    /// A `data-*` attribute did not hold the expected JSON
    #[error("Failed to parse attribute `{attribute}`: {source}")]
    AttributeJson {
        attribute: String,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to write CSV
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    /// CSV writer produced bytes that are not UTF-8
    #[error("CSV output is not valid UTF-8: {0}")]
    CsvEncoding(#[from] std::string::FromUtf8Error),

    /// Search request or response failed
    #[error("Search failed: {0}")]
    Search(String),

    /// Widget configuration could not be parsed
    #[error("Invalid widget configuration: {0}")]
    Config(#[source] serde_json::Error),
}

/// Result type alias for widget operations
pub type Result<T> = std::result::Result<T, WidgetError>;
