use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeoError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("Dataset download failed: {0}")]
    DownloadError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Chart config error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid value for `{field}`: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("{field} out of range: {value} ({reason})")]
    DomainError {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Chart rendering failed: {message}")]
    RenderError { message: String },
}

impl GeoError {
    /// Wrap a plotters backend error, which is generic over the backend type.
    pub fn render<E: std::fmt::Display>(err: E) -> Self {
        GeoError::RenderError {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GeoError>;
