use crate::error::GridError;
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::Display;

/// Calendar quarter, 1-4.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Debug, Display)]
pub enum Quarter {
    #[strum(serialize = "Q1")]
    Q1,
    #[strum(serialize = "Q2")]
    Q2,
    #[strum(serialize = "Q3")]
    Q3,
    #[strum(serialize = "Q4")]
    Q4,
}

impl Quarter {
    pub fn from_number(n: u8) -> Result<Self, GridError> {
        match n {
            1 => Ok(Quarter::Q1),
            2 => Ok(Quarter::Q2),
            3 => Ok(Quarter::Q3),
            4 => Ok(Quarter::Q4),
            other => Err(GridError::BadQuarter(other)),
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Quarter::Q1 => 1,
            Quarter::Q2 => 2,
            Quarter::Q3 => 3,
            Quarter::Q4 => 4,
        }
    }

    /// Quarter containing today's date.
    pub fn current() -> Self {
        let month0 = chrono::Local::now().month0() as u8;
        // month0 / 3 is always 0-3
        Self::from_number(month0 / 3 + 1).expect("month0 / 3 + 1 is in 1..=4")
    }

    /// First month of the quarter, 1-12.
    pub fn first_month(self) -> u32 {
        (self.number() as u32 - 1) * 3 + 1
    }

    /// Inclusive calendar bounds of the quarter in `year`, midnight UTC.
    pub fn date_range(self, year: i32) -> (DateTime<Utc>, DateTime<Utc>) {
        let start = NaiveDate::from_ymd_opt(year, self.first_month(), 1)
            .expect("quarter start is a valid date");
        let (next_year, next_month) = match self {
            Quarter::Q4 => (year + 1, 1),
            _ => (year, self.first_month() + 3),
        };
        let end = NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .expect("month after quarter end is a valid date")
            .pred_opt()
            .expect("day before the first of a month exists");
        (
            start.and_time(NaiveTime::MIN).and_utc(),
            end.and_time(NaiveTime::MIN).and_utc(),
        )
    }
}

/// The tuple that scopes which scores are loaded and edited: one reviewer,
/// one year, one quarter.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub struct Selection {
    pub employee_id: i64,
    pub year: i32,
    pub quarter: Quarter,
}

impl Selection {
    pub fn new(employee_id: i64, year: i32, quarter: Quarter) -> Self {
        Self {
            employee_id,
            year,
            quarter,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "expert {} / {} {}",
            self.employee_id, self.year, self.quarter
        )
    }
}
