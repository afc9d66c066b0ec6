use crate::error::{CsvExportError, Result};
use crate::projection::ExportRecord;
use crate::serialize::{format_field, quote_text, CsvConfig};
use csv::{QuoteStyle, Terminator, WriterBuilder};

const UTF8_BOM: &str = "\u{feff}";

/// Serialize records to CSV text.
/// The header row comes from the keys of the first record. With
/// `quote_strings` every text field and header is quoted; otherwise fields
/// are quoted only when they contain the separator, the quote character or a
/// line break. No records (or no columns) gives an empty payload.
pub fn generate_csv(config: &CsvConfig, records: &[ExportRecord]) -> Result<String> {
    let mut payload = String::new();
    if config.use_bom {
        payload.push_str(UTF8_BOM);
    }

    let headers: Vec<&str> = match records.first() {
        Some(first) => first.keys().collect(),
        None => return Ok(payload),
    };
    if headers.is_empty() {
        return Ok(payload);
    }

    // Quoted text arrives already escaped, the writer must not touch it
    let quote_style = if config.quote_strings {
        QuoteStyle::Never
    } else {
        QuoteStyle::Necessary
    };

    let mut writer = WriterBuilder::new()
        .delimiter(config.field_separator)
        .quote(config.quote_character)
        .quote_style(quote_style)
        .double_quote(true)
        .terminator(Terminator::CRLF)
        .from_writer(Vec::new());

    if config.use_keys_as_headers {
        if config.quote_strings {
            let quoted: Vec<String> = headers.iter().map(|h| quote_text(config, h)).collect();
            writer.write_record(&quoted)?;
        } else {
            writer.write_record(&headers)?;
        }
    }

    for record in records {
        let fields: Vec<String> = headers
            .iter()
            .map(|key| {
                record
                    .get(key)
                    .map(|value| format_field(config, value))
                    .unwrap_or_else(|| config.replace_undefined_with.clone())
            })
            .collect();
        writer.write_record(&fields)?;
    }

    writer.flush()?;
    let bytes = writer.into_inner().map_err(|e| {
        CsvExportError::IoError(std::io::Error::new(e.error().kind(), e.error().to_string()))
    })?;
    let body = String::from_utf8(bytes)
        .map_err(|e| CsvExportError::ConfigError(format!("CSV output is not UTF-8: {}", e)))?;

    payload.push_str(&body);
    Ok(payload)
}
