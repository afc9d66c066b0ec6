use crate::error::{CsvExportError, Result};
use crate::types::constants::DECIMAL_SEPARATORS;
use crate::types::ExportErrorType;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Letters are never accepted as field separator or quote character
static ALPHABETIC_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-zA-Z]").unwrap());

/// Check that the three formatting characters form an unambiguous CSV dialect.
/// Duplicates are reported before empty values.
pub fn validate_separators(
    field_separator: &str,
    quote_character: &str,
    decimal_separator: &str,
) -> Result<()> {
    let separators = [field_separator, quote_character, decimal_separator];

    let distinct: HashSet<&str> = separators.iter().copied().collect();
    if distinct.len() != separators.len() {
        return Err(CsvExportError::Validation(
            ExportErrorType::DuplicateSeparators,
        ));
    }

    if separators.iter().any(|s| s.is_empty()) {
        return Err(CsvExportError::Validation(ExportErrorType::EmptySeparator));
    }

    Ok(())
}

/// Apply an edit to the field separator or quote character input.
/// Input is cut to one character; letters and non-ASCII input are ignored
/// and the current value is kept. Non-ASCII is excluded because the CSV
/// writer takes its delimiter and quote as single bytes.
pub fn filter_separator_input(current: &str, typed: &str) -> String {
    let value: String = typed.chars().take(1).collect();

    if ALPHABETIC_REGEX.is_match(&value) || !value.is_ascii() {
        return current.to_string();
    }

    value
}

/// Apply an edit to the decimal separator input. Only "." and "," (or
/// clearing the field) are accepted.
pub fn filter_decimal_input(current: &str, typed: &str) -> String {
    let value: String = typed.chars().take(1).collect();

    if DECIMAL_SEPARATORS.contains(&value.as_str()) {
        value
    } else {
        current.to_string()
    }
}
