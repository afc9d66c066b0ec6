use crate::error::{CsvExportError, Result};
use crate::types::constants::{
    DEFAULT_DECIMAL_SEPARATOR, DEFAULT_FIELD_SEPARATOR, DEFAULT_QUOTE_CHARACTER,
};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Export defaults
#[derive(Debug, Clone, PartialEq)]
pub struct ExportConfig {
    pub field_separator: String,
    pub quote_character: String,
    pub decimal_separator: String,
    pub output_dir: PathBuf,
    pub use_bom: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            field_separator: DEFAULT_FIELD_SEPARATOR.to_string(),
            quote_character: DEFAULT_QUOTE_CHARACTER.to_string(),
            decimal_separator: DEFAULT_DECIMAL_SEPARATOR.to_string(),
            output_dir: PathBuf::from("."),
            use_bom: true,
        }
    }
}

impl ExportConfig {
    /// Built-in defaults overridden by environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Built-in defaults overridden by the variables `lookup` knows about
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ExportConfig::default();

        if let Some(v) = lookup("CSVEXPORT_FIELD_SEPARATOR") {
            config.field_separator = unescape_separator(&v);
        }
        if let Some(v) = lookup("CSVEXPORT_QUOTE_CHARACTER") {
            config.quote_character = unescape_separator(&v);
        }
        if let Some(v) = lookup("CSVEXPORT_DECIMAL_SEPARATOR") {
            config.decimal_separator = v;
        }
        if let Some(v) = lookup("CSVEXPORT_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("CSVEXPORT_USE_BOM") {
            config.use_bom = parse_bool(&v).ok_or_else(|| {
                CsvExportError::ConfigError(format!("CSVEXPORT_USE_BOM must be a boolean, got {}", v))
            })?;
        }

        Ok(config)
    }

    /// Override values from a config file.
    /// Reads the [EXPORT] section; keys that are not present keep their value.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            CsvExportError::ConfigError(format!("Failed to read config file: {}", e))
        })?;

        let sections = parse_sections(&content);
        let export = sections.get("EXPORT").ok_or_else(|| {
            CsvExportError::ConfigError("Missing [EXPORT] section in config file".to_string())
        })?;

        if let Some(v) = export.get("FIELDSEPARATOR") {
            self.field_separator = unescape_separator(v);
        }
        if let Some(v) = export.get("QUOTECHARACTER") {
            self.quote_character = unescape_separator(v);
        }
        if let Some(v) = export.get("DECIMALSEPARATOR") {
            self.decimal_separator = v.clone();
        }
        if let Some(v) = export.get("OUTPUTDIR").filter(|v| !v.is_empty()) {
            self.output_dir = PathBuf::from(v);
        }
        if let Some(v) = export.get("USEBOM") {
            self.use_bom = parse_bool(v).ok_or_else(|| {
                CsvExportError::ConfigError(format!("USEBOM must be a boolean, got {}", v))
            })?;
        }

        Ok(self)
    }
}

/// Parse an ini style file into upper-cased sections and keys
fn parse_sections(content: &str) -> HashMap<String, HashMap<String, String>> {
    let mut sections: HashMap<String, HashMap<String, String>> = HashMap::new();
    let mut current_section = String::new();

    for line in content.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            current_section = line[1..line.len() - 1].trim().to_uppercase();
            sections.entry(current_section.clone()).or_default();
            continue;
        }

        if let Some((key, value)) = line.split_once('=') {
            if let Some(section) = sections.get_mut(&current_section) {
                section.insert(key.trim().to_uppercase(), unquote(value.trim()));
            }
        }
    }

    sections
}

/// Strip one pair of matching surrounding quotes, so `'"'` reads as `"`
fn unquote(value: &str) -> String {
    let bytes = value.as_bytes();
    if bytes.len() >= 2
        && (bytes[0] == b'"' || bytes[0] == b'\'')
        && bytes[bytes.len() - 1] == bytes[0]
    {
        value[1..value.len() - 1].to_string()
    } else {
        value.to_string()
    }
}

/// Accept `\t` and `tab` for a tab separator
pub fn unescape_separator(value: &str) -> String {
    match value {
        "\\t" | "tab" | "TAB" => "\t".to_string(),
        _ => value.to_string(),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
