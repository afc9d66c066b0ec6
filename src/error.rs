use crate::types::ExportErrorType;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CsvExportError {
    #[error("Validation error: {0}")]
    Validation(ExportErrorType),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Source error: {0}")]
    SourceError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl CsvExportError {
    pub fn error_type(&self) -> ExportErrorType {
        match self {
            CsvExportError::Validation(t) => *t,
            CsvExportError::IoError(_) => ExportErrorType::Write,
            CsvExportError::CsvError(_) => ExportErrorType::Write,
            CsvExportError::JsonError(_) => ExportErrorType::Source,
            CsvExportError::SourceError(_) => ExportErrorType::Source,
            CsvExportError::ConfigError(_) => ExportErrorType::Process,
        }
    }

    /// Whether the user can fix the error by editing the form
    pub fn is_user_input(&self) -> bool {
        matches!(self, CsvExportError::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, CsvExportError>;
