pub mod error;
pub mod grid;
pub mod key;
pub mod metrics;
pub mod options;
pub mod report;
pub mod selection;

pub use error::GridError;
pub use grid::{CellWrite, ScoreGrid};
pub use key::CellKey;
pub use options::{BlankPolicy, PageArgs, PeriodArgs, SelectionArgs};
pub use report::{ReportTable, RowEntity, ValueLookup};
pub use selection::{Quarter, Selection};
