use crate::error::{CsvExportError, Result};
use crate::types::{ColumnDescriptor, ScalarValue};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// A grid row that can be read by column id
pub trait Row {
    fn value(&self, column_id: &str) -> ScalarValue;
}

/// The data grid an export reads from.
/// Implementations report their state at call time, so an export queries
/// them again when the user confirms.
pub trait TabularSource {
    type Row: Row;

    /// The column universe in display order
    fn columns(&self) -> &[ColumnDescriptor];

    /// Every row currently materialized by the grid
    fn rows(&self) -> Vec<&Self::Row>;

    /// Rows in the selected state
    fn selected_rows(&self) -> Vec<&Self::Row>;

    fn selected_count(&self) -> usize {
        self.selected_rows().len()
    }
}

/// Column as it appears in a grid snapshot file
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ColumnDef {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    dont_export: bool,
    #[serde(default = "default_visible")]
    visible: bool,
}

fn default_visible() -> bool {
    true
}

impl From<ColumnDef> for ColumnDescriptor {
    fn from(def: ColumnDef) -> Self {
        ColumnDescriptor {
            display_label: def.name.unwrap_or_else(|| def.id.clone()),
            id: def.id,
            is_exportable: !def.dont_export,
            is_visible: def.visible,
        }
    }
}

/// Row of a grid snapshot
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GridRow {
    #[serde(default)]
    pub values: HashMap<String, ScalarValue>,
    #[serde(default)]
    pub selected: bool,
}

impl GridRow {
    pub fn new() -> Self {
        GridRow::default()
    }

    pub fn with(mut self, column_id: &str, value: impl Into<ScalarValue>) -> Self {
        self.values.insert(column_id.to_string(), value.into());
        self
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

impl Row for GridRow {
    fn value(&self, column_id: &str) -> ScalarValue {
        self.values.get(column_id).cloned().unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct SnapshotFile {
    columns: Vec<ColumnDef>,
    #[serde(default)]
    rows: Vec<GridRow>,
}

/// In-memory grid state, loaded from JSON
#[derive(Debug, Clone, Default)]
pub struct GridSnapshot {
    columns: Vec<ColumnDescriptor>,
    rows: Vec<GridRow>,
}

impl GridSnapshot {
    pub fn new(columns: Vec<ColumnDescriptor>, rows: Vec<GridRow>) -> Self {
        GridSnapshot { columns, rows }
    }

    /// Parse a snapshot of the form
    /// `{"columns": [{"id": .., "name": .., "dontExport": .., "visible": ..}],
    ///   "rows": [{"values": {..}, "selected": ..}]}`
    pub fn from_json(json: &str) -> Result<Self> {
        let file: SnapshotFile = serde_json::from_str(json)?;

        let mut seen = std::collections::HashSet::new();
        for column in &file.columns {
            if !seen.insert(column.id.as_str()) {
                return Err(CsvExportError::SourceError(format!(
                    "Duplicate column id \"{}\"",
                    column.id
                )));
            }
        }

        Ok(GridSnapshot {
            columns: file.columns.into_iter().map(ColumnDescriptor::from).collect(),
            rows: file.rows,
        })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            CsvExportError::SourceError(format!(
                "Failed to read grid file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_json(&content)
    }

    /// Change the selection state of the row at `index`
    pub fn set_selected(&mut self, index: usize, selected: bool) {
        if let Some(row) = self.rows.get_mut(index) {
            row.selected = selected;
        }
    }

    pub fn set_visible(&mut self, column_id: &str, visible: bool) {
        if let Some(column) = self.columns.iter_mut().find(|c| c.id == column_id) {
            column.is_visible = visible;
        }
    }
}

impl TabularSource for GridSnapshot {
    type Row = GridRow;

    fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    fn rows(&self) -> Vec<&GridRow> {
        self.rows.iter().collect()
    }

    fn selected_rows(&self) -> Vec<&GridRow> {
        self.rows.iter().filter(|r| r.selected).collect()
    }
}
