use crate::grid::ScoreGrid;
use evalgrid_protocol::{Department, DepartmentMetric, Employee, EmployeeMetrics, Metric};
use fnv::FnvHashMap;

/// Sparse (row entity, metric) → value lookup feeding a report.
#[derive(Debug, Clone, Default)]
pub struct ValueLookup {
    values: FnvHashMap<(i64, i64), f64>,
}

impl ValueLookup {
    pub fn insert(&mut self, row_id: i64, metric_id: i64, value: f64) {
        self.values.insert((row_id, metric_id), value);
    }

    pub fn get(&self, row_id: i64, metric_id: i64) -> Option<f64> {
        self.values.get(&(row_id, metric_id)).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Department rows for one year/quarter out of the full record set.
    pub fn from_department_metrics(
        records: &[DepartmentMetric],
        year: i32,
        quarter: u8,
    ) -> Self {
        let mut lookup = Self::default();
        for record in records {
            if record.year == year && record.quarter == quarter {
                lookup.insert(record.department_id, record.metrics_id, record.value);
            }
        }
        lookup
    }

    /// Expert rows for one year/quarter.
    pub fn from_employee_metrics(records: &[EmployeeMetrics], year: i32, quarter: u8) -> Self {
        let mut lookup = Self::default();
        for record in records {
            if record.year == year && record.quarter == quarter {
                for score in &record.metrics {
                    lookup.insert(record.employee_id, score.metrics_id, score.score);
                }
            }
        }
        lookup
    }

    /// The current (possibly edited) state of a score grid.
    pub fn from_grid(grid: &ScoreGrid) -> Self {
        let mut lookup = Self::default();
        for key in grid.scored_keys() {
            if let Some(value) = grid.score(key) {
                lookup.insert(key.department_id, key.metric_id, value);
            }
        }
        lookup
    }
}

/// One report row source: a department or an employee.
#[derive(Debug, Clone, PartialEq)]
pub struct RowEntity {
    pub id: i64,
    pub name: String,
}

impl RowEntity {
    pub fn from_departments(departments: &[Department]) -> Vec<Self> {
        departments
            .iter()
            .map(|d| Self {
                id: d.id,
                name: d.name.clone(),
            })
            .collect()
    }

    pub fn from_employees(employees: &[Employee]) -> Vec<Self> {
        employees
            .iter()
            .map(|e| Self {
                id: e.employee_id,
                name: e.full_name(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportColumn {
    pub metric_id: i64,
    pub label: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub entity_id: i64,
    pub name: String,
    /// One slot per column; absent cells stay `None` and render empty.
    pub cells: Vec<Option<f64>>,
    pub total: f64,
}

/// A fully aggregated rows × metrics table: per-row totals, per-column
/// totals, grand total. Absent cells contribute nothing to any total.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportTable {
    pub columns: Vec<ReportColumn>,
    pub rows: Vec<ReportRow>,
    pub column_totals: Vec<f64>,
    pub grand_total: f64,
}

impl ReportTable {
    pub fn build(entities: &[RowEntity], metrics: &[Metric], values: &ValueLookup) -> Self {
        let columns: Vec<ReportColumn> = metrics
            .iter()
            .map(|m| ReportColumn {
                metric_id: m.metric_id,
                label: m.label(),
                description: m.description.clone().unwrap_or_default(),
            })
            .collect();

        let mut column_totals = vec![0.0; columns.len()];
        let mut grand_total = 0.0;

        let rows = entities
            .iter()
            .map(|entity| {
                let mut total = 0.0;
                let cells: Vec<Option<f64>> = columns
                    .iter()
                    .enumerate()
                    .map(|(i, column)| {
                        let value = values.get(entity.id, column.metric_id);
                        if let Some(v) = value {
                            total += v;
                            column_totals[i] += v;
                        }
                        value
                    })
                    .collect();
                grand_total += total;
                ReportRow {
                    entity_id: entity.id,
                    name: entity.name.clone(),
                    cells,
                    total,
                }
            })
            .collect();

        Self {
            columns,
            rows,
            column_totals,
            grand_total,
        }
    }
}
