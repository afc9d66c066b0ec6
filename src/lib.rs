pub mod config;
pub mod dialog;
pub mod error;
pub mod exporter;
pub mod notify;
pub mod output;
pub mod projection;
pub mod serialize;
pub mod source;
pub mod types;
pub mod validation;

pub use config::ExportConfig;
pub use dialog::{trigger_label, ContainerKind, ExportDialog};
pub use error::{CsvExportError, Result};
pub use exporter::{CsvExporter, ExportForm, ExportOutcome};
pub use notify::{LogNotifier, Notifier};
pub use projection::{project, select_rows, ColumnSelection, ExportRecord};
pub use serialize::{CsvConfig, Downloader, FileDownloader};
pub use source::{GridSnapshot, Row, TabularSource};
pub use types::{ColumnDescriptor, ExportErrorType, ExportScope, ScalarValue};
pub use validation::validate_separators;
