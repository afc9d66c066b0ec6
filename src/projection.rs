use crate::source::{Row, TabularSource};
use crate::types::{ColumnDescriptor, ExportScope, ScalarValue};

/// One exported row: column id to value, in selected column order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExportRecord {
    fields: Vec<(String, ScalarValue)>,
}

impl ExportRecord {
    pub fn new() -> Self {
        ExportRecord::default()
    }

    /// Set a field; an existing key keeps its position
    pub fn insert(&mut self, key: &str, value: ScalarValue) {
        match self.fields.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value,
            None => self.fields.push((key.to_string(), value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ScalarValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Columns offered for export, in display order
pub fn exportable_columns(columns: &[ColumnDescriptor]) -> Vec<&ColumnDescriptor> {
    columns.iter().filter(|c| c.is_exportable).collect()
}

/// Column ids selected when the export form opens
pub fn default_selection(columns: &[ColumnDescriptor]) -> Vec<String> {
    columns
        .iter()
        .filter(|c| c.is_exportable && c.is_visible)
        .map(|c| c.id.clone())
        .collect()
}

/// Pick the rows to export: the selected rows if there are any, all rows otherwise
pub fn select_rows<S: TabularSource>(source: &S) -> (ExportScope, Vec<&S::Row>) {
    if source.selected_count() > 0 {
        (ExportScope::SelectedRows, source.selected_rows())
    } else {
        (ExportScope::AllRows, source.rows())
    }
}

/// Build one record per row holding the selected columns
pub fn project<R: Row>(rows: &[&R], selected_column_ids: &[String]) -> Vec<ExportRecord> {
    rows.iter()
        .map(|row| {
            let mut record = ExportRecord::new();
            for column_id in selected_column_ids {
                record.insert(column_id, row.value(column_id));
            }
            record
        })
        .collect()
}

/// Ordered set of column ids chosen for export.
/// Membership follows the column universe: non-exportable or unknown ids are
/// never added, and ids keep their display order.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSelection {
    universe: Vec<String>,
    selected: Vec<String>,
}

impl ColumnSelection {
    /// Selection preset to the default columns
    pub fn from_columns(columns: &[ColumnDescriptor]) -> Self {
        ColumnSelection {
            universe: exportable_columns(columns)
                .into_iter()
                .map(|c| c.id.clone())
                .collect(),
            selected: default_selection(columns),
        }
    }

    /// Check or uncheck a column. Returns false when the column cannot be selected.
    pub fn toggle(&mut self, column_id: &str, checked: bool) -> bool {
        if !self.universe.iter().any(|id| id == column_id) {
            return false;
        }

        if checked {
            if !self.contains(column_id) {
                self.selected.push(column_id.to_string());
                let universe = &self.universe;
                self.selected
                    .sort_by_key(|id| universe.iter().position(|u| u == id));
            }
        } else {
            self.selected.retain(|id| id != column_id);
        }
        true
    }

    /// Replace the selection with the given ids, dropping those outside the universe
    pub fn select_only(&mut self, column_ids: &[String]) {
        self.selected = self
            .universe
            .iter()
            .filter(|id| column_ids.contains(id))
            .cloned()
            .collect();
    }

    pub fn contains(&self, column_id: &str) -> bool {
        self.selected.iter().any(|id| id == column_id)
    }

    pub fn ids(&self) -> &[String] {
        &self.selected
    }

    pub fn universe(&self) -> &[String] {
        &self.universe
    }
}
