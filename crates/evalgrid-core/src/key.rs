use crate::error::GridError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identity of one grid cell: a (department, metric) id pair. The textual
/// form is `<department>-<metric>`, accepted back on the command line.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct CellKey {
    pub department_id: i64,
    pub metric_id: i64,
}

impl CellKey {
    pub fn new(department_id: i64, metric_id: i64) -> Self {
        Self {
            department_id,
            metric_id,
        }
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.department_id, self.metric_id)
    }
}

impl FromStr for CellKey {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (dept, metric) = s
            .split_once('-')
            .ok_or_else(|| GridError::BadCellRef(s.to_string()))?;
        let department_id = dept
            .trim()
            .parse()
            .map_err(|_| GridError::BadCellRef(s.to_string()))?;
        let metric_id = metric
            .trim()
            .parse()
            .map_err(|_| GridError::BadCellRef(s.to_string()))?;
        Ok(Self {
            department_id,
            metric_id,
        })
    }
}
