use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Bare `{"id": n}` reference used inside score rows. Reads tolerate the
/// backend embedding full entity bodies next to the id.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntityRef {
    pub id: i64,
}

impl EntityRef {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

/// One scored cell for a (reviewer, year, quarter) selection. The same shape
/// is read from `GET /kpi/table` and posted back for single-cell writes.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ScoreEntry {
    pub department: EntityRef,
    pub metric: EntityRef,
    pub score: f64,
}

impl ScoreEntry {
    pub fn new(department_id: i64, metric_id: i64, score: f64) -> Self {
        Self {
            department: EntityRef::new(department_id),
            metric: EntityRef::new(metric_id),
            score,
        }
    }
}

/// An expert's metric assignment for a year/quarter.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Assignment {
    pub employee_id: i64,
    pub metrics_id: Vec<i64>,
    pub quarter: u8,
    pub date_start: DateTime<Utc>,
    pub date_end: DateTime<Utc>,
    pub year: i32,
}

/// A persisted department/metric value, the datum behind the report views.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DepartmentMetric {
    pub id: i64,
    pub department_id: i64,
    pub value: f64,
    pub year: i32,
    pub quarter: u8,
    #[serde(default)]
    pub period_date: String,
    pub metrics_id: i64,
    #[serde(default)]
    pub author_id: i64,
    #[serde(default)]
    pub status: i64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MetricScore {
    pub metrics_id: i64,
    pub score: f64,
}

/// Per-expert score rollup from `GET /employees_metrics/all`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EmployeeMetrics {
    pub employee_id: i64,
    pub year: i32,
    pub quarter: u8,
    pub metrics: Vec<MetricScore>,
}
