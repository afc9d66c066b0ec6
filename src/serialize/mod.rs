pub mod download;
pub mod format;
pub mod writer;

pub use download::{Downloader, FileDownloader};
pub use format::{format_field, format_value, quote_text};
pub use writer::generate_csv;

use crate::error::{CsvExportError, Result};
use crate::types::constants::{BOOL_FALSE, BOOL_TRUE, FILE_EXTENSION};

/// Settings for turning export records into a CSV file
#[derive(Debug, Clone, PartialEq)]
pub struct CsvConfig {
    /// Write a header row built from the record keys
    pub use_keys_as_headers: bool,
    pub field_separator: u8,
    pub quote_character: u8,
    pub decimal_separator: String,
    /// Wrap every text field (and the headers) in the quote character
    pub quote_strings: bool,
    pub filename: String,
    pub file_extension: String,
    /// Prefix the payload with a UTF-8 byte order mark
    pub use_bom: bool,
    pub bool_display: (String, String),
    /// Text written for null and missing values
    pub replace_undefined_with: String,
}

impl CsvConfig {
    /// Build a config from the form values. Separators are expected to have
    /// passed validation already.
    pub fn new(
        filename: &str,
        field_separator: &str,
        quote_character: &str,
        decimal_separator: &str,
    ) -> Result<Self> {
        Ok(CsvConfig {
            use_keys_as_headers: true,
            field_separator: single_byte(field_separator, "field separator")?,
            quote_character: single_byte(quote_character, "quote character")?,
            decimal_separator: decimal_separator.to_string(),
            quote_strings: true,
            filename: filename.to_string(),
            file_extension: FILE_EXTENSION.to_string(),
            use_bom: true,
            bool_display: (BOOL_TRUE.to_string(), BOOL_FALSE.to_string()),
            replace_undefined_with: String::new(),
        })
    }

    pub fn with_bom(mut self, use_bom: bool) -> Self {
        self.use_bom = use_bom;
        self
    }

    /// File name including the extension
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.filename, self.file_extension)
    }
}

/// The CSV writer works on single bytes
fn single_byte(value: &str, what: &str) -> Result<u8> {
    match value.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => Err(CsvExportError::ConfigError(format!(
            "The {} must be a single ASCII character, got {:?}",
            what, value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_form_values() {
        let config = CsvConfig::new("people_2024-05-01", ";", "'", ",").unwrap();
        assert_eq!(config.field_separator, b';');
        assert_eq!(config.quote_character, b'\'');
        assert_eq!(config.decimal_separator, ",");
        assert!(config.use_keys_as_headers);
        assert!(config.use_bom);
        assert!(config.quote_strings);
        assert_eq!(config.file_name(), "people_2024-05-01.csv");
    }

    #[test]
    fn test_config_rejects_multibyte_separator() {
        assert!(CsvConfig::new("out", "§", "\"", ".").is_err());
        assert!(CsvConfig::new("out", ",,", "\"", ".").is_err());
        assert!(CsvConfig::new("out", ",", "", ".").is_err());
    }
}
