use crate::error::GridError;
use crate::selection::{Quarter, Selection};
use chrono::Datelike;
use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};
use strum::Display;

/// Paging window for the plain list endpoints.
#[derive(Args, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageArgs {
    #[arg(long, default_value_t = 0)]
    pub skip: u32,

    #[arg(long, default_value_t = 100)]
    pub limit: u32,
}

impl Default for PageArgs {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: 100,
        }
    }
}

/// What blanking a cell means: `zero` records an explicit 0.0, `remove`
/// treats the blank as "no score" and drops the local entry without issuing
/// a write.
#[derive(ValueEnum, Display, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
pub enum BlankPolicy {
    #[default]
    Zero,
    Remove,
}

/// Year/quarter scope for the report and export commands. Defaults to the
/// current quarter.
#[derive(Args, Debug, Clone, Copy)]
pub struct PeriodArgs {
    #[arg(long, default_value_t = chrono::Local::now().year())]
    pub year: i32,

    #[arg(long, default_value_t = Quarter::current().number())]
    pub quarter: u8,
}

impl PeriodArgs {
    pub fn quarter(&self) -> Result<Quarter, GridError> {
        Quarter::from_number(self.quarter)
    }
}

/// The reviewer/period scope of a score grid.
#[derive(Args, Debug, Clone, Copy)]
pub struct SelectionArgs {
    /// Reviewer (employee) id
    #[arg(long)]
    pub expert: i64,

    #[command(flatten)]
    pub period: PeriodArgs,
}

impl SelectionArgs {
    pub fn selection(&self) -> Result<Selection, GridError> {
        Ok(Selection::new(
            self.expert,
            self.period.year,
            self.period.quarter()?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_args_validate_quarter() {
        let args = SelectionArgs {
            expert: 3,
            period: PeriodArgs {
                year: 2025,
                quarter: 5,
            },
        };
        assert!(matches!(args.selection(), Err(GridError::BadQuarter(5))));

        let args = SelectionArgs {
            expert: 3,
            period: PeriodArgs {
                year: 2025,
                quarter: 2,
            },
        };
        let sel = args.selection().unwrap();
        assert_eq!(sel.quarter, Quarter::Q2);
    }

    #[test]
    fn blank_policy_labels() {
        assert_eq!(BlankPolicy::Zero.to_string(), "zero");
        assert_eq!(BlankPolicy::Remove.to_string(), "remove");
    }
}
