use crate::key::CellKey;
use crate::selection::Selection;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GridError {
    #[error("editing is disabled; enable edit mode before changing cells")]
    EditLocked,

    #[error("score for cell {0} must be a finite number, got {1}")]
    NonFiniteScore(CellKey, f64),

    #[error("{count} unsaved edit(s) for {selection}; reload with discard to drop them")]
    UnsavedEdits { selection: Selection, count: usize },

    #[error("nothing to save; no cells have been edited")]
    NothingToSave,

    #[error("invalid cell reference '{0}', expected <department>-<metric>")]
    BadCellRef(String),

    #[error("invalid quarter {0}, expected 1-4")]
    BadQuarter(u8),
}
