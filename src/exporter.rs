use crate::config::ExportConfig;
use crate::error::Result;
use crate::notify::Notifier;
use crate::projection::{project, select_rows, ColumnSelection};
use crate::serialize::{generate_csv, CsvConfig, Downloader};
use crate::source::TabularSource;
use crate::types::constants::{
    DEFAULT_DECIMAL_SEPARATOR, DEFAULT_FIELD_SEPARATOR, DEFAULT_QUOTE_CHARACTER,
};
use crate::types::ExportScope;
use crate::validation::{filter_decimal_input, filter_separator_input, validate_separators};
use chrono::NaiveDate;
use std::path::PathBuf;

/// Values of the export form, created each time the form opens
#[derive(Debug, Clone, PartialEq)]
pub struct ExportForm {
    filename: String,
    field_separator: String,
    quote_character: String,
    decimal_separator: String,
    columns: ColumnSelection,
}

impl ExportForm {
    /// Fresh form with the built-in defaults
    pub fn open<S: TabularSource>(source: &S, subject: &str, today: NaiveDate) -> Self {
        ExportForm {
            filename: default_filename(subject, today),
            field_separator: DEFAULT_FIELD_SEPARATOR.to_string(),
            quote_character: DEFAULT_QUOTE_CHARACTER.to_string(),
            decimal_separator: DEFAULT_DECIMAL_SEPARATOR.to_string(),
            columns: ColumnSelection::from_columns(source.columns()),
        }
    }

    /// Fresh form using configured separators. Configured values go through
    /// the same input filters as typed ones.
    pub fn open_with<S: TabularSource>(
        source: &S,
        subject: &str,
        today: NaiveDate,
        config: &ExportConfig,
    ) -> Self {
        let mut form = Self::open(source, subject, today);
        form.set_field_separator(&config.field_separator);
        form.set_quote_character(&config.quote_character);
        form.set_decimal_separator(&config.decimal_separator);
        form
    }

    pub fn set_filename(&mut self, filename: &str) {
        self.filename = filename.to_string();
    }

    pub fn set_field_separator(&mut self, typed: &str) {
        self.field_separator = filter_separator_input(&self.field_separator, typed);
    }

    pub fn set_quote_character(&mut self, typed: &str) {
        self.quote_character = filter_separator_input(&self.quote_character, typed);
    }

    pub fn set_decimal_separator(&mut self, typed: &str) {
        self.decimal_separator = filter_decimal_input(&self.decimal_separator, typed);
    }

    /// Returns false when the column is not offered for export
    pub fn toggle_column(&mut self, column_id: &str, checked: bool) -> bool {
        self.columns.toggle(column_id, checked)
    }

    pub fn select_only(&mut self, column_ids: &[String]) {
        self.columns.select_only(column_ids);
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn field_separator(&self) -> &str {
        &self.field_separator
    }

    pub fn quote_character(&self) -> &str {
        &self.quote_character
    }

    pub fn decimal_separator(&self) -> &str {
        &self.decimal_separator
    }

    pub fn columns(&self) -> &ColumnSelection {
        &self.columns
    }

    pub fn selected_columns(&self) -> &[String] {
        self.columns.ids()
    }

    /// Check the separators and build the serializer settings
    pub fn csv_config(&self) -> Result<CsvConfig> {
        validate_separators(
            &self.field_separator,
            &self.quote_character,
            &self.decimal_separator,
        )?;
        CsvConfig::new(
            &self.filename,
            &self.field_separator,
            &self.quote_character,
            &self.decimal_separator,
        )
    }
}

/// `<subject>_<date>`
pub fn default_filename(subject: &str, today: NaiveDate) -> String {
    format!("{}_{}", subject, today.format("%Y-%m-%d"))
}

/// Result of a completed export
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    pub path: PathBuf,
    pub scope: ExportScope,
    pub row_count: usize,
    pub columns: Vec<String>,
    pub config: CsvConfig,
}

/// Runs an export from a form against a grid
pub struct CsvExporter<'a, N: Notifier, D: Downloader> {
    notifier: &'a N,
    downloader: &'a D,
    use_bom: bool,
}

impl<'a, N: Notifier, D: Downloader> CsvExporter<'a, N, D> {
    pub fn new(notifier: &'a N, downloader: &'a D) -> Self {
        CsvExporter {
            notifier,
            downloader,
            use_bom: true,
        }
    }

    pub fn with_bom(mut self, use_bom: bool) -> Self {
        self.use_bom = use_bom;
        self
    }

    /// Validate the form, project the rows and download the CSV file.
    /// Invalid separators are reported through the notifier and nothing is
    /// written. Rows and selection are read from the source at call time.
    pub fn export<S: TabularSource>(&self, form: &ExportForm, source: &S) -> Result<ExportOutcome> {
        let config = match form.csv_config() {
            Ok(config) => config.with_bom(self.use_bom),
            Err(e) => {
                if e.is_user_input() {
                    self.notifier.error(e.error_type().message());
                }
                return Err(e);
            }
        };

        let (scope, rows) = select_rows(source);
        let records = project(&rows, form.selected_columns());
        tracing::debug!(
            scope = %scope,
            rows = records.len(),
            columns = form.selected_columns().len(),
            "Projected export records"
        );

        let payload = generate_csv(&config, &records)?;
        let path = self.downloader.download(&config, &payload)?;

        Ok(ExportOutcome {
            path,
            scope,
            row_count: records.len(),
            columns: form.selected_columns().to_vec(),
            config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::CollectingNotifier;
    use crate::serialize::FileDownloader;
    use crate::source::{GridRow, GridSnapshot};
    use crate::types::{ColumnDescriptor, ExportErrorType};
    use std::fs;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn grid() -> GridSnapshot {
        GridSnapshot::new(
            vec![
                ColumnDescriptor::new("name").with_label("Name"),
                ColumnDescriptor::new("amt"),
                ColumnDescriptor::new("secret").exportable(false),
                ColumnDescriptor::new("note").visible(false),
            ],
            vec![
                GridRow::new().with("name", "Ann").with("amt", 3.5).with("secret", "x"),
                GridRow::new().with("name", "Bob").with("amt", 2.0).with("note", "vip"),
            ],
        )
    }

    #[test]
    fn test_open_defaults() {
        let form = ExportForm::open(&grid(), "payments", today());

        assert_eq!(form.filename(), "payments_2024-05-01");
        assert_eq!(form.field_separator(), ",");
        assert_eq!(form.quote_character(), "\"");
        assert_eq!(form.decimal_separator(), ".");
        assert_eq!(form.selected_columns(), &["name".to_string(), "amt".to_string()]);
    }

    #[test]
    fn test_open_with_config() {
        let config = ExportConfig {
            field_separator: ";".to_string(),
            quote_character: "q".to_string(),
            decimal_separator: ",".to_string(),
            ..ExportConfig::default()
        };
        let form = ExportForm::open_with(&grid(), "payments", today(), &config);

        assert_eq!(form.field_separator(), ";");
        assert_eq!(form.quote_character(), "\"");
        assert_eq!(form.decimal_separator(), ",");
    }

    #[test]
    fn test_setters_filter_input() {
        let mut form = ExportForm::open(&grid(), "payments", today());

        form.set_field_separator("a");
        form.set_quote_character("'");
        form.set_decimal_separator("x");
        assert_eq!(form.field_separator(), ",");
        assert_eq!(form.quote_character(), "'");
        assert_eq!(form.decimal_separator(), ".");
    }

    #[test]
    fn test_export_all_rows() {
        let dir = tempfile::tempdir().unwrap();
        let notifier = CollectingNotifier::new();
        let downloader = FileDownloader::new(dir.path());
        let exporter = CsvExporter::new(&notifier, &downloader).with_bom(false);

        let source = grid();
        let mut form = ExportForm::open(&source, "payments", today());
        form.set_field_separator(";");
        form.set_quote_character("'");
        form.set_decimal_separator(",");

        let outcome = exporter.export(&form, &source).unwrap();

        assert_eq!(outcome.scope, ExportScope::AllRows);
        assert_eq!(outcome.row_count, 2);
        assert_eq!(outcome.path, dir.path().join("payments_2024-05-01.csv"));
        assert_eq!(
            fs::read_to_string(&outcome.path).unwrap(),
            "'name';'amt'\r\n'Ann';3,5\r\n'Bob';2\r\n"
        );
        assert!(notifier.messages().is_empty());
    }

    #[test]
    fn test_export_reads_selection_at_confirm_time() {
        let dir = tempfile::tempdir().unwrap();
        let notifier = CollectingNotifier::new();
        let downloader = FileDownloader::new(dir.path());
        let exporter = CsvExporter::new(&notifier, &downloader).with_bom(false);

        let mut source = grid();
        let mut form = ExportForm::open(&source, "payments", today());
        form.toggle_column("note", true);
        source.set_selected(1, true);

        let outcome = exporter.export(&form, &source).unwrap();

        assert_eq!(outcome.scope, ExportScope::SelectedRows);
        assert_eq!(outcome.columns, vec!["name", "amt", "note"]);
        assert_eq!(
            fs::read_to_string(&outcome.path).unwrap(),
            "\"name\",\"amt\",\"note\"\r\n\"Bob\",2,\"vip\"\r\n"
        );
    }

    #[test]
    fn test_duplicate_separators_abort_export() {
        let dir = tempfile::tempdir().unwrap();
        let notifier = CollectingNotifier::new();
        let downloader = FileDownloader::new(dir.path().join("out"));
        let exporter = CsvExporter::new(&notifier, &downloader);

        let source = grid();
        let mut form = ExportForm::open(&source, "payments", today());
        form.set_quote_character(",");

        let err = exporter.export(&form, &source).unwrap_err();

        assert_eq!(err.error_type(), ExportErrorType::DuplicateSeparators);
        assert_eq!(
            notifier.messages(),
            vec!["Field separator, quote character and decimal separator must be different"]
        );
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_empty_separator_aborts_export() {
        let dir = tempfile::tempdir().unwrap();
        let notifier = CollectingNotifier::new();
        let downloader = FileDownloader::new(dir.path().join("out"));
        let exporter = CsvExporter::new(&notifier, &downloader);

        let source = grid();
        let mut form = ExportForm::open(&source, "payments", today());
        form.set_field_separator("");

        let err = exporter.export(&form, &source).unwrap_err();

        assert_eq!(err.error_type(), ExportErrorType::EmptySeparator);
        assert_eq!(
            notifier.last().as_deref(),
            Some("Field separator, quote character and decimal separator cannot be empty")
        );
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_export_without_columns_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let notifier = CollectingNotifier::new();
        let downloader = FileDownloader::new(dir.path());
        let exporter = CsvExporter::new(&notifier, &downloader).with_bom(false);

        let source = grid();
        let mut form = ExportForm::open(&source, "payments", today());
        form.toggle_column("name", false);
        form.toggle_column("amt", false);

        let outcome = exporter.export(&form, &source).unwrap();
        assert_eq!(fs::read_to_string(&outcome.path).unwrap(), "");
    }
}
