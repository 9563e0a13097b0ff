pub mod entities;
pub mod records;

pub use entities::{Department, Employee, Metric, Section};
pub use records::{
    Assignment, DepartmentMetric, EmployeeMetrics, EntityRef, MetricScore, ScoreEntry,
};
