use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use std::fmt;

/// Error type codes reported in the JSON response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum ExportErrorType {
    Process = 0,             // Unhandled exception
    DuplicateSeparators = 1, // Separators are not pairwise distinct
    EmptySeparator = 2,      // One of the separators is empty
    Source = 3,              // Grid source could not be loaded
    Write = 4,               // CSV payload could not be written
}

impl fmt::Display for ExportErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl ExportErrorType {
    pub fn message(&self) -> &'static str {
        match self {
            ExportErrorType::Process => "Unhandled exception",
            ExportErrorType::DuplicateSeparators => {
                "Field separator, quote character and decimal separator must be different"
            }
            ExportErrorType::EmptySeparator => {
                "Field separator, quote character and decimal separator cannot be empty"
            }
            ExportErrorType::Source => "Could not read the data grid",
            ExportErrorType::Write => "Could not write the CSV file",
        }
    }
}

/// A single cell value as read from a grid row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum ScalarValue {
    Number(f64),
    String(String),
    Bool(bool),
    Null,
    #[default]
    #[serde(skip)]
    Undefined,
}

impl From<f64> for ScalarValue {
    fn from(v: f64) -> Self {
        ScalarValue::Number(v)
    }
}

impl From<i32> for ScalarValue {
    fn from(v: i32) -> Self {
        ScalarValue::Number(f64::from(v))
    }
}

impl From<i64> for ScalarValue {
    fn from(v: i64) -> Self {
        ScalarValue::Number(v as f64)
    }
}

impl From<&str> for ScalarValue {
    fn from(v: &str) -> Self {
        ScalarValue::String(v.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(v: String) -> Self {
        ScalarValue::String(v)
    }
}

impl From<bool> for ScalarValue {
    fn from(v: bool) -> Self {
        ScalarValue::Bool(v)
    }
}

/// Column metadata owned by the grid
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDescriptor {
    pub id: String,
    pub display_label: String,
    pub is_exportable: bool,
    pub is_visible: bool,
}

impl ColumnDescriptor {
    /// Exportable, visible column labelled with its id
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        ColumnDescriptor {
            display_label: id.clone(),
            id,
            is_exportable: true,
            is_visible: true,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.display_label = label.into();
        self
    }

    pub fn exportable(mut self, exportable: bool) -> Self {
        self.is_exportable = exportable;
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.is_visible = visible;
        self
    }
}

/// Which rows an export covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportScope {
    SelectedRows,
    AllRows,
}

impl fmt::Display for ExportScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportScope::SelectedRows => write!(f, "selected-rows"),
            ExportScope::AllRows => write!(f, "all-rows"),
        }
    }
}

/// Constants
pub mod constants {
    pub const DEFAULT_FIELD_SEPARATOR: &str = ",";
    pub const DEFAULT_QUOTE_CHARACTER: &str = "\"";
    pub const DEFAULT_DECIMAL_SEPARATOR: &str = ".";
    pub const FILE_EXTENSION: &str = "csv";

    /// Accepted decimal separator inputs, the empty string clears the field
    pub const DECIMAL_SEPARATORS: [&str; 3] = [".", ",", ""];

    /// Viewport width (logical pixels) from which the form renders as a dialog
    pub const DESKTOP_MIN_WIDTH: u32 = 768;

    pub const DIALOG_HEADER: &str = "Export Options";
    pub const DIALOG_DESCRIPTION: &str =
        "Choose the columns you want to export and the file format.";

    pub const BOOL_TRUE: &str = "TRUE";
    pub const BOOL_FALSE: &str = "FALSE";
}
