use crate::error::GridError;
use crate::key::CellKey;
use crate::options::BlankPolicy;
use crate::selection::Selection;
use evalgrid_protocol::ScoreEntry;
use fnv::{FnvHashMap, FnvHashSet};
use itertools::Itertools;
use tracing::debug;

/// One pending cell write, ready to be posted for the grid's selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellWrite {
    pub key: CellKey,
    pub score: f64,
}

/// Editable sparse view of the scores for one (reviewer, year, quarter)
/// selection.
///
/// The grid holds two independent maps: `scores` is what the user sees and
/// edits, `baseline` is the state as of the last load or the last persisted
/// write. `dirty` tracks which cells were touched since then; only those are
/// written back. A cell edited back to its baseline value stays dirty:
/// dirtiness records touches, not value deltas.
#[derive(Debug)]
pub struct ScoreGrid {
    selection: Selection,
    scores: FnvHashMap<CellKey, f64>,
    baseline: FnvHashMap<CellKey, f64>,
    dirty: FnvHashSet<CellKey>,
    editing: bool,
}

impl ScoreGrid {
    /// Build a fresh grid from server records. Later records win on
    /// duplicate keys, but the result is otherwise independent of record
    /// order.
    pub fn load(selection: Selection, records: &[ScoreEntry]) -> Self {
        let mut scores =
            FnvHashMap::with_capacity_and_hasher(records.len(), Default::default());
        for record in records {
            scores.insert(
                CellKey::new(record.department.id, record.metric.id),
                record.score,
            );
        }
        debug!(
            "loaded {} scored cell(s) for {}",
            scores.len(),
            selection
        );
        Self {
            baseline: scores.clone(),
            scores,
            dirty: FnvHashSet::default(),
            selection,
            editing: false,
        }
    }

    /// Replace this grid with a freshly loaded one. Refuses to drop unsaved
    /// edits unless `discard` is set; switching selections never loses work
    /// silently.
    pub fn reload(
        self,
        selection: Selection,
        records: &[ScoreEntry],
        discard: bool,
    ) -> Result<Self, GridError> {
        if self.has_unsaved_edits() && !discard {
            return Err(GridError::UnsavedEdits {
                selection: self.selection,
                count: self.dirty.len(),
            });
        }
        Ok(Self::load(selection, records))
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Toggle edit mode. Locking the grid while dirty edits exist discards
    /// them by restoring the baseline.
    pub fn set_editing(&mut self, on: bool) {
        if !on && self.has_unsaved_edits() {
            debug!(
                "edit mode off with {} dirty cell(s); restoring baseline",
                self.dirty.len()
            );
            self.scores = self.baseline.clone();
            self.dirty.clear();
        }
        self.editing = on;
    }

    pub fn score(&self, key: CellKey) -> Option<f64> {
        self.scores.get(&key).copied()
    }

    pub fn is_dirty(&self, key: CellKey) -> bool {
        self.dirty.contains(&key)
    }

    pub fn has_unsaved_edits(&self) -> bool {
        !self.dirty.is_empty()
    }

    pub fn dirty_count(&self) -> usize {
        self.dirty.len()
    }

    /// Number of cells currently holding a score.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Set one cell. Requires edit mode; rejects NaN and infinities.
    pub fn set_score(&mut self, key: CellKey, value: f64) -> Result<(), GridError> {
        if !self.editing {
            return Err(GridError::EditLocked);
        }
        if !value.is_finite() {
            return Err(GridError::NonFiniteScore(key, value));
        }
        self.scores.insert(key, value);
        self.dirty.insert(key);
        Ok(())
    }

    /// Blank one cell according to the configured policy: `zero` writes 0.0
    /// and marks the cell dirty, `remove` drops the local entry and any
    /// dirty mark so no write is issued for it.
    pub fn blank_score(&mut self, key: CellKey, policy: BlankPolicy) -> Result<(), GridError> {
        match policy {
            BlankPolicy::Zero => self.set_score(key, 0.0),
            BlankPolicy::Remove => {
                if !self.editing {
                    return Err(GridError::EditLocked);
                }
                self.scores.remove(&key);
                self.dirty.remove(&key);
                Ok(())
            }
        }
    }

    /// Throw away all unsaved edits: scores become a fresh copy of the
    /// baseline and the dirty set empties. No network involved.
    pub fn reset(&mut self) -> Result<(), GridError> {
        if !self.editing {
            return Err(GridError::EditLocked);
        }
        self.scores = self.baseline.clone();
        self.dirty.clear();
        Ok(())
    }

    /// The minimal diff to persist: one write per dirty cell, in stable key
    /// order. Fails when nothing is dirty.
    pub fn pending_writes(&self) -> Result<Vec<CellWrite>, GridError> {
        if self.dirty.is_empty() {
            return Err(GridError::NothingToSave);
        }
        Ok(self
            .dirty
            .iter()
            .sorted()
            .map(|&key| CellWrite {
                key,
                // dirty keys always have a current value
                score: self.scores[&key],
            })
            .collect())
    }

    /// Record which writes the server accepted. Persisted cells move into
    /// the baseline and drop their dirty mark; everything else keeps its
    /// edited value and stays dirty for a retry.
    pub fn mark_persisted(&mut self, keys: &[CellKey]) {
        for key in keys {
            if let Some(&value) = self.scores.get(key) {
                self.baseline.insert(*key, value);
                self.dirty.remove(key);
            }
        }
    }

    /// Keys currently holding a score, in stable order. Used by renderers.
    pub fn scored_keys(&self) -> Vec<CellKey> {
        self.scores.keys().copied().sorted().collect()
    }
}
