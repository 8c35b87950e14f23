//! Row selection that survives deletions.

use std::collections::BTreeSet;

use tabview_model::RowId;

use crate::{SessionStore, TableStore};

/// A set of rows marked for a bulk action.
///
/// Rows are remembered by their [`RowId`], so deleting other rows does not
/// shift the selection. Loading a new table starts a new generation; a
/// selection made against an older generation resolves to no rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    generation: u64,
    ids: BTreeSet<RowId>,
}

impl Selection {
    /// Empty selection bound to the store's current table.
    pub fn new<S: SessionStore>(store: &TableStore<S>) -> Self {
        Self {
            generation: store.generation(),
            ids: BTreeSet::new(),
        }
    }

    /// Marks the row at `index`. Returns `false` when the index is out of range.
    pub fn select<S: SessionStore>(&mut self, store: &TableStore<S>, index: usize) -> bool {
        self.rebind(store);
        match store.row_id(index) {
            Some(id) => {
                self.ids.insert(id);
                true
            }
            None => false,
        }
    }

    /// Flips the row at `index`. Returns whether it is selected afterwards.
    pub fn toggle<S: SessionStore>(&mut self, store: &TableStore<S>, index: usize) -> bool {
        self.rebind(store);
        let Some(id) = store.row_id(index) else {
            return false;
        };
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    /// Marks every row at the given positions, skipping out-of-range ones.
    pub fn select_all<S: SessionStore>(
        &mut self,
        store: &TableStore<S>,
        indices: impl IntoIterator<Item = usize>,
    ) -> usize {
        indices
            .into_iter()
            .filter(|&index| self.select(store, index))
            .count()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Current positions of the selected rows, ascending.
    ///
    /// Rows that were deleted since they were selected are left out.
    pub fn indices<S: SessionStore>(&self, store: &TableStore<S>) -> Vec<usize> {
        if self.generation != store.generation() || self.ids.is_empty() {
            return Vec::new();
        }
        store
            .row_ids()
            .iter()
            .enumerate()
            .filter(|(_, id)| self.ids.contains(id))
            .map(|(index, _)| index)
            .collect()
    }

    pub fn is_selected<S: SessionStore>(&self, store: &TableStore<S>, index: usize) -> bool {
        self.generation == store.generation()
            && store.row_id(index).is_some_and(|id| self.ids.contains(&id))
    }

    /// Number of remembered ids; may include rows deleted since.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    fn rebind<S: SessionStore>(&mut self, store: &TableStore<S>) {
        if self.generation != store.generation() {
            self.generation = store.generation();
            self.ids.clear();
        }
    }
}
