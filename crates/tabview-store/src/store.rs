//! The authoritative table.

use std::collections::{BTreeSet, HashSet};

use tabview_model::{CellValue, ColumnNames, Row, RowId, Table};

use crate::error::{PersistError, Result};
use crate::query::{self, Query, QueryResult};
use crate::selection::Selection;
use crate::session::SessionStore;

/// Outcome of mirroring a table to the session backend.
#[derive(Debug)]
pub enum PersistStatus {
    Saved,
    /// The table is installed in memory but was not saved.
    Failed(PersistError),
}

impl PersistStatus {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved)
    }

    pub fn error(&self) -> Option<&PersistError> {
        match self {
            Self::Saved => None,
            Self::Failed(err) => Some(err),
        }
    }
}

/// Summary returned by [`TableStore::load`].
#[derive(Debug)]
pub struct LoadReport {
    pub rows: usize,
    pub columns: usize,
    pub persist: PersistStatus,
}

/// Owns the current rows and column list and applies every mutation.
///
/// Rows are addressed by their current position. Deleting rows renumbers
/// the survivors; [`Selection`] tracks rows by id for callers that need
/// stable references.
#[derive(Debug)]
pub struct TableStore<S> {
    table: Table,
    ids: Vec<RowId>,
    next_id: RowId,
    generation: u64,
    source_name: Option<String>,
    session: S,
}

impl<S: SessionStore> TableStore<S> {
    /// Empty store backed by `session`.
    pub fn new(session: S) -> Self {
        Self {
            table: Table::empty(),
            ids: Vec::new(),
            next_id: RowId::new(0),
            generation: 0,
            source_name: None,
            session,
        }
    }

    /// Replaces the current table and mirrors it to the session backend.
    ///
    /// The table is normalised so every row key is a known column. A failed
    /// save does not undo the load; it is reported in the returned
    /// [`LoadReport`].
    pub fn load(&mut self, table: Table, source_name: impl Into<String>) -> LoadReport {
        let source_name = source_name.into();
        self.install(table, Some(source_name.clone()));

        tracing::info!(
            source = %source_name,
            rows = self.table.len(),
            columns = self.table.width(),
            "loaded table"
        );

        let persist = match self.session.save(&self.table, &source_name) {
            Ok(()) => PersistStatus::Saved,
            Err(err) => {
                tracing::warn!(error = %err, "failed to save session");
                PersistStatus::Failed(err)
            }
        };

        LoadReport {
            rows: self.table.len(),
            columns: self.table.width(),
            persist,
        }
    }

    /// Reinstalls the saved session, if any, without saving it again.
    ///
    /// Returns `true` when a session was restored.
    pub fn restore(&mut self) -> Result<bool> {
        match self.session.load()? {
            Some(stored) => {
                self.install(stored.table, Some(stored.source_name));
                tracing::debug!(rows = self.table.len(), "restored session");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Saves the current table to the session backend.
    pub fn persist(&mut self) -> Result<()> {
        let source_name = self.source_name.as_deref().unwrap_or_default();
        self.session.save(&self.table, source_name)
    }

    /// Empties the table and removes the saved session.
    pub fn clear(&mut self) -> Result<()> {
        self.install(Table::empty(), None);
        self.session.clear()
    }

    /// Replaces exactly one cell.
    ///
    /// An out-of-range row or a column outside the column list is a logged
    /// no-op and returns `false`.
    pub fn update_cell(&mut self, row_index: usize, column: &str, value: CellValue) -> bool {
        if !self.table.columns.contains(column) {
            tracing::warn!(row_index, column, "ignoring edit of unknown column");
            return false;
        }
        let Some(row) = self.table.rows.get_mut(row_index) else {
            tracing::warn!(
                row_index,
                rows = self.table.rows.len(),
                "ignoring edit of out-of-range row"
            );
            return false;
        };
        row.set(column, value);
        true
    }

    /// Removes the rows at the given positions in one step.
    ///
    /// Out-of-range positions are ignored. Returns the number of rows removed.
    pub fn delete_rows(&mut self, indices: impl IntoIterator<Item = usize>) -> usize {
        let len = self.table.rows.len();
        let (doomed, out_of_range): (BTreeSet<usize>, BTreeSet<usize>) =
            indices.into_iter().partition(|&index| index < len);

        if !out_of_range.is_empty() {
            tracing::warn!(
                ignored = out_of_range.len(),
                rows = len,
                "ignoring out-of-range row indices"
            );
        }
        if doomed.is_empty() {
            return 0;
        }

        let mut position = 0usize;
        self.retain_rows(|_| {
            let keep = !doomed.contains(&position);
            position += 1;
            keep
        });

        let removed = len - self.table.rows.len();
        tracing::info!(removed, rows = self.table.rows.len(), "deleted rows");
        removed
    }

    /// Removes every row identical to an earlier one, keeping first
    /// occurrences in order. Returns the number of rows removed.
    pub fn deduplicate(&mut self) -> usize {
        let before = self.table.rows.len();
        let mut seen: HashSet<String> = HashSet::with_capacity(before);
        self.retain_rows(|row| seen.insert(row.canonical_form()));

        let removed = before - self.table.rows.len();
        tracing::info!(removed, rows = self.table.rows.len(), "removed duplicate rows");
        removed
    }

    /// Computes one page of a filtered, sorted view.
    pub fn query(&self, query: &Query) -> QueryResult<'_> {
        let result = query::run(&self.table, query);
        tracing::debug!(
            matched = result.matched,
            page = result.page.index,
            "ran query"
        );
        result
    }

    /// Starts an empty selection for the current table.
    pub fn selection(&self) -> Selection {
        Selection::new(self)
    }

    /// The selected rows in table order.
    pub fn selected_rows(&self, selection: &Selection) -> Vec<&Row> {
        selection
            .indices(self)
            .into_iter()
            .map(|index| &self.table.rows[index])
            .collect()
    }

    /// Deletes the selected rows and clears the selection.
    pub fn delete_selected(&mut self, selection: &mut Selection) -> usize {
        let indices = selection.indices(self);
        selection.clear();
        self.delete_rows(indices)
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn rows(&self) -> &[Row] {
        &self.table.rows
    }

    pub fn columns(&self) -> &ColumnNames {
        &self.table.columns
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.table.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.table.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.rows.is_empty()
    }

    /// Name of the source the current table was loaded from.
    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    /// Incremented every time a table is installed.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub(crate) fn row_id(&self, index: usize) -> Option<RowId> {
        self.ids.get(index).copied()
    }

    pub(crate) fn row_ids(&self) -> &[RowId] {
        &self.ids
    }

    fn install(&mut self, table: Table, source_name: Option<String>) {
        let table = Table::new(table.columns, table.rows);
        self.ids = (0..table.rows.len())
            .map(|_| {
                let id = self.next_id;
                self.next_id = id.next();
                id
            })
            .collect();
        self.table = table;
        self.source_name = source_name;
        self.generation += 1;
    }

    /// Keeps rows (and their ids) accepted by `keep`, preserving order.
    fn retain_rows(&mut self, mut keep: impl FnMut(&Row) -> bool) {
        let rows = std::mem::take(&mut self.table.rows);
        let ids = std::mem::take(&mut self.ids);
        for (row, id) in rows.into_iter().zip(ids) {
            if keep(&row) {
                self.table.rows.push(row);
                self.ids.push(id);
            }
        }
    }
}

impl<S: SessionStore + Default> Default for TableStore<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}
