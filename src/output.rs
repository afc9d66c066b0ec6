use crate::exporter::ExportOutcome;
use crate::types::{ExportErrorType, ExportScope};
use serde::Serialize;

/// Success response JSON structure
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SuccessResponse {
    pub path: String,
    pub file_name: String,
    pub scope: ExportScope,
    pub row_count: usize,
    pub columns: Vec<String>,
    pub field_separator: String,
    pub quote_character: String,
    pub decimal_separator: String,
}

impl SuccessResponse {
    pub fn from_outcome(outcome: &ExportOutcome) -> Self {
        SuccessResponse {
            path: outcome.path.display().to_string(),
            file_name: outcome.config.file_name(),
            scope: outcome.scope,
            row_count: outcome.row_count,
            columns: outcome.columns.clone(),
            field_separator: hex_byte(outcome.config.field_separator),
            quote_character: hex_byte(outcome.config.quote_character),
            decimal_separator: hex_str(&outcome.config.decimal_separator),
        }
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Error response JSON structure
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ErrorResponse {
    pub error: u8,
    pub error_msg_user: String,
    pub error_msg_internal: String,
    pub field_separator: String,
    pub quote_character: String,
    pub decimal_separator: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

impl ErrorResponse {
    pub fn new(error_type: ExportErrorType) -> Self {
        ErrorResponse {
            error: error_type as u8,
            error_msg_user: error_type.message().to_string(),
            error_msg_internal: String::new(),
            field_separator: String::new(),
            quote_character: String::new(),
            decimal_separator: String::new(),
            file_name: None,
        }
    }

    /// Set internal error message
    pub fn with_internal_message(mut self, msg: String) -> Self {
        self.error_msg_internal = msg;
        self
    }

    /// Set the separators as hex strings
    pub fn with_separators(mut self, field: &str, quote: &str, decimal: &str) -> Self {
        self.field_separator = hex_str(field);
        self.quote_character = hex_str(quote);
        self.decimal_separator = hex_str(decimal);
        self
    }

    pub fn with_file_name(mut self, file_name: String) -> Self {
        self.file_name = Some(file_name);
        self
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

fn hex_byte(b: u8) -> String {
    format!("{:02X}", b)
}

/// Hex code of the first character, empty for an empty value
fn hex_str(value: &str) -> String {
    value
        .chars()
        .next()
        .map(|c| format!("{:02X}", c as u32))
        .unwrap_or_default()
}
