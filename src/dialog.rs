use crate::config::ExportConfig;
use crate::error::{CsvExportError, Result};
use crate::exporter::{CsvExporter, ExportForm, ExportOutcome};
use crate::notify::Notifier;
use crate::projection::exportable_columns;
use crate::serialize::Downloader;
use crate::source::TabularSource;
use crate::types::constants::{DESKTOP_MIN_WIDTH, DIALOG_DESCRIPTION, DIALOG_HEADER};
use chrono::NaiveDate;

/// Chrome the export form is rendered in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    /// Modal dialog on wide viewports
    Dialog,
    /// Bottom drawer on narrow viewports
    Drawer,
}

impl ContainerKind {
    pub fn for_viewport(width: u32) -> Self {
        if width >= DESKTOP_MIN_WIDTH {
            ContainerKind::Dialog
        } else {
            ContainerKind::Drawer
        }
    }
}

/// Label of the button that opens the export form
pub fn trigger_label<S: TabularSource>(source: &S) -> String {
    match source.selected_count() {
        0 => "Export".to_string(),
        1 => "Export 1 row".to_string(),
        n => format!("Export {} rows", n),
    }
}

/// Entry of the column checklist
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnOption {
    pub id: String,
    pub label: String,
    pub checked: bool,
}

/// Open/closed state of the export form for one grid
#[derive(Debug)]
pub struct ExportDialog {
    subject: String,
    kind: ContainerKind,
    defaults: ExportConfig,
    form: Option<ExportForm>,
}

impl ExportDialog {
    pub fn new(subject: &str, viewport_width: u32) -> Self {
        ExportDialog {
            subject: subject.to_string(),
            kind: ContainerKind::for_viewport(viewport_width),
            defaults: ExportConfig::default(),
            form: None,
        }
    }

    pub fn with_defaults(mut self, defaults: ExportConfig) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn resize(&mut self, viewport_width: u32) {
        self.kind = ContainerKind::for_viewport(viewport_width);
    }

    pub fn kind(&self) -> ContainerKind {
        self.kind
    }

    pub fn header(&self) -> &'static str {
        DIALOG_HEADER
    }

    pub fn description(&self) -> &'static str {
        DIALOG_DESCRIPTION
    }

    pub fn is_open(&self) -> bool {
        self.form.is_some()
    }

    /// Open with a fresh form built from the current column visibility
    pub fn open<S: TabularSource>(&mut self, source: &S, today: NaiveDate) -> &mut ExportForm {
        self.form
            .insert(ExportForm::open_with(source, &self.subject, today, &self.defaults))
    }

    /// Close and discard the form
    pub fn close(&mut self) {
        self.form = None;
    }

    pub fn form(&self) -> Option<&ExportForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut ExportForm> {
        self.form.as_mut()
    }

    /// Checklist for the column popover: exportable columns only
    pub fn column_options<S: TabularSource>(&self, source: &S) -> Vec<ColumnOption> {
        exportable_columns(source.columns())
            .into_iter()
            .map(|c| ColumnOption {
                id: c.id.clone(),
                label: c.display_label.clone(),
                checked: self
                    .form
                    .as_ref()
                    .map(|f| f.columns().contains(&c.id))
                    .unwrap_or(false),
            })
            .collect()
    }

    /// Run the export. The form is consumed when the export succeeds; on a
    /// validation error it stays open for correction.
    pub fn confirm<S, N, D>(
        &mut self,
        exporter: &CsvExporter<'_, N, D>,
        source: &S,
    ) -> Result<ExportOutcome>
    where
        S: TabularSource,
        N: Notifier,
        D: Downloader,
    {
        let form = self
            .form
            .as_ref()
            .ok_or_else(|| CsvExportError::ConfigError("Export form is not open".to_string()))?;

        let outcome = exporter.export(form, source)?;
        self.form = None;
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::CollectingNotifier;
    use crate::serialize::FileDownloader;
    use crate::source::{GridRow, GridSnapshot};
    use crate::types::{ColumnDescriptor, ExportErrorType};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn grid() -> GridSnapshot {
        GridSnapshot::new(
            vec![
                ColumnDescriptor::new("name").with_label("Name"),
                ColumnDescriptor::new("secret").exportable(false),
                ColumnDescriptor::new("city").visible(false),
            ],
            vec![
                GridRow::new().with("name", "Ann").with("city", "Oslo"),
                GridRow::new().with("name", "Bob").with("city", "Rome"),
            ],
        )
    }

    #[test]
    fn test_container_breakpoint() {
        assert_eq!(ContainerKind::for_viewport(768), ContainerKind::Dialog);
        assert_eq!(ContainerKind::for_viewport(1280), ContainerKind::Dialog);
        assert_eq!(ContainerKind::for_viewport(767), ContainerKind::Drawer);

        let mut dialog = ExportDialog::new("people", 375);
        assert_eq!(dialog.kind(), ContainerKind::Drawer);
        dialog.resize(1024);
        assert_eq!(dialog.kind(), ContainerKind::Dialog);
    }

    #[test]
    fn test_trigger_label() {
        let mut source = grid();
        assert_eq!(trigger_label(&source), "Export");

        source.set_selected(0, true);
        assert_eq!(trigger_label(&source), "Export 1 row");

        source.set_selected(1, true);
        assert_eq!(trigger_label(&source), "Export 2 rows");
    }

    #[test]
    fn test_column_options() {
        let source = grid();
        let mut dialog = ExportDialog::new("people", 1024);
        dialog.open(&source, today());

        let options = dialog.column_options(&source);
        assert_eq!(
            options,
            vec![
                ColumnOption {
                    id: "name".to_string(),
                    label: "Name".to_string(),
                    checked: true,
                },
                ColumnOption {
                    id: "city".to_string(),
                    label: "city".to_string(),
                    checked: false,
                },
            ]
        );
    }

    #[test]
    fn test_reopen_recomputes_defaults() {
        let mut source = grid();
        let mut dialog = ExportDialog::new("people", 1024);

        let form = dialog.open(&source, today());
        form.toggle_column("name", false);
        dialog.close();
        assert!(!dialog.is_open());

        source.set_visible("city", true);
        let form = dialog.open(&source, today());
        assert_eq!(form.selected_columns(), &["name".to_string(), "city".to_string()]);
    }

    #[test]
    fn test_confirm_consumes_form() {
        let dir = tempfile::tempdir().unwrap();
        let notifier = CollectingNotifier::new();
        let downloader = FileDownloader::new(dir.path());
        let exporter = CsvExporter::new(&notifier, &downloader);

        let source = grid();
        let mut dialog = ExportDialog::new("people", 1024);
        dialog.open(&source, today());

        let outcome = dialog.confirm(&exporter, &source).unwrap();
        assert_eq!(outcome.row_count, 2);
        assert!(!dialog.is_open());
        assert!(dialog.confirm(&exporter, &source).is_err());
    }

    #[test]
    fn test_confirm_keeps_form_on_validation_error() {
        let dir = tempfile::tempdir().unwrap();
        let notifier = CollectingNotifier::new();
        let downloader = FileDownloader::new(dir.path());
        let exporter = CsvExporter::new(&notifier, &downloader);

        let source = grid();
        let mut dialog = ExportDialog::new("people", 1024);
        dialog.open(&source, today()).set_decimal_separator(",");

        let err = dialog.confirm(&exporter, &source).unwrap_err();
        assert_eq!(err.error_type(), ExportErrorType::DuplicateSeparators);
        assert!(dialog.is_open());
        assert_eq!(notifier.messages().len(), 1);

        if let Some(form) = dialog.form_mut() {
            form.set_field_separator(";");
        }
        assert!(dialog.confirm(&exporter, &source).is_ok());
    }
}
