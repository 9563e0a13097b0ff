use crate::selection::Quarter;
use evalgrid_protocol::{Assignment, Employee, Metric};
use fnv::FnvHashMap;
use itertools::Itertools;
use std::cmp::Ordering;

/// Compare strings treating digit runs as numbers, so "10" sorts after "9"
/// and "2a" before "2b".
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(lc), Some(rc)) => {
                if lc.is_ascii_digit() && rc.is_ascii_digit() {
                    let lnum = take_number(&mut left);
                    let rnum = take_number(&mut right);
                    match lnum.cmp(&rnum) {
                        Ordering::Equal => continue,
                        other => return other,
                    }
                }
                match lc
                    .to_ascii_lowercase()
                    .cmp(&rc.to_ascii_lowercase())
                {
                    Ordering::Equal => {
                        left.next();
                        right.next();
                    }
                    other => return other,
                }
            }
        }
    }
}

fn take_number(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> u64 {
    let mut value: u64 = 0;
    while let Some(c) = chars.peek() {
        match c.to_digit(10) {
            Some(d) => {
                value = value.saturating_mul(10).saturating_add(d as u64);
                chars.next();
            }
            None => break,
        }
    }
    value
}

/// Metrics in display order: by number, then by subnumber with numeric-aware
/// comparison. Metrics without a number sort last.
pub fn sort_metrics(metrics: &mut [Metric]) {
    metrics.sort_by(|a, b| {
        match (a.metric_number, b.metric_number) {
            (Some(x), Some(y)) if x != y => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            _ => natural_cmp(a.subnumber(), b.subnumber()),
        }
    });
}

/// Employees alphabetically by "last first patronymic", case-insensitive.
pub fn sort_employees(employees: &mut [Employee]) {
    employees.sort_by_key(|e| e.full_name().to_lowercase());
}

/// Case-insensitive substring search over the full name. An empty term
/// matches everyone.
pub fn search_employees<'a>(employees: &'a [Employee], term: &str) -> Vec<&'a Employee> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return employees.iter().collect();
    }
    employees
        .iter()
        .filter(|e| e.full_name().to_lowercase().contains(&needle))
        .collect()
}

/// A requested metric that already belongs to a different expert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignmentConflict {
    pub metric_id: i64,
    pub employee_id: i64,
}

/// Metrics in `metric_ids` already assigned to someone other than `expert`.
/// Conflicts warn; they do not block the assignment.
pub fn find_conflicts(
    assignments: &[Assignment],
    expert: i64,
    metric_ids: &[i64],
) -> Vec<AssignmentConflict> {
    metric_ids
        .iter()
        .filter_map(|&metric_id| {
            assignments
                .iter()
                .find(|a| a.employee_id != expert && a.metrics_id.contains(&metric_id))
                .map(|a| AssignmentConflict {
                    metric_id,
                    employee_id: a.employee_id,
                })
        })
        .collect()
}

/// Which metric ids are reported in which quarter. The schedule is data; the
/// defaults mirror the evaluation plan the backend operates on.
#[derive(Debug, Clone)]
pub struct QuarterSchedule {
    by_quarter: FnvHashMap<u8, Vec<i64>>,
}

impl Default for QuarterSchedule {
    fn default() -> Self {
        let mut by_quarter = FnvHashMap::default();
        by_quarter.insert(1, vec![2, 3, 4, 5, 6, 7, 8, 10, 11, 12, 13]);
        by_quarter.insert(2, vec![9, 14, 15, 17]);
        by_quarter.insert(3, vec![6, 7, 10, 11, 12, 13]);
        by_quarter.insert(4, vec![9, 14, 15, 16, 17]);
        Self { by_quarter }
    }
}

impl QuarterSchedule {
    /// The metrics scheduled for `quarter`, in their incoming order. A
    /// quarter missing from the schedule exposes every metric.
    pub fn metrics_for_quarter(&self, quarter: Quarter, metrics: &[Metric]) -> Vec<Metric> {
        match self.by_quarter.get(&quarter.number()) {
            Some(ids) => metrics
                .iter()
                .filter(|m| ids.contains(&m.metric_id))
                .cloned()
                .collect_vec(),
            None => metrics.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn metric(id: i64, number: Option<i64>, sub: Option<&str>) -> Metric {
        Metric {
            metric_id: id,
            metric_number: number,
            metric_subnumber: sub.map(String::from),
            ..Metric::default()
        }
    }

    #[rstest]
    #[case("9", "10", Ordering::Less)]
    #[case("a", "b", Ordering::Less)]
    #[case("2a", "2b", Ordering::Less)]
    #[case("b1", "B1", Ordering::Equal)]
    #[case("10", "10", Ordering::Equal)]
    fn natural_ordering(#[case] a: &str, #[case] b: &str, #[case] expected: Ordering) {
        assert_eq!(natural_cmp(a, b), expected);
    }

    #[test]
    fn metrics_sort_by_number_then_subnumber() {
        let mut metrics = vec![
            metric(1, Some(10), None),
            metric(2, Some(2), Some("b")),
            metric(3, Some(2), Some("a")),
            metric(4, None, None),
            metric(5, Some(9), None),
        ];
        sort_metrics(&mut metrics);
        let ids: Vec<i64> = metrics.iter().map(|m| m.metric_id).collect();
        assert_eq!(ids, vec![3, 2, 5, 1, 4]);
    }

    #[test]
    fn quarter_schedule_filters_metric_ids() {
        let metrics: Vec<Metric> = (1..=17).map(|id| metric(id, Some(id), None)).collect();
        let schedule = QuarterSchedule::default();

        let q2 = schedule.metrics_for_quarter(Quarter::Q2, &metrics);
        let ids: Vec<i64> = q2.iter().map(|m| m.metric_id).collect();
        assert_eq!(ids, vec![9, 14, 15, 17]);

        let q1 = schedule.metrics_for_quarter(Quarter::Q1, &metrics);
        assert_eq!(q1.len(), 11);
        assert!(q1.iter().all(|m| m.metric_id != 9));
    }

    fn employee(id: i64, last: &str, first: &str) -> Employee {
        Employee {
            employee_id: id,
            first_name: first.into(),
            last_name: last.into(),
            surname: String::new(),
            mail_box: String::new(),
            number_phone: String::new(),
            role_id: 0,
        }
    }

    #[test]
    fn employees_sort_and_search_by_full_name() {
        let mut employees = vec![
            employee(1, "Smirnov", "Boris"),
            employee(2, "Ivanov", "Alexei"),
            employee(3, "ivanov", "Andrei"),
        ];
        sort_employees(&mut employees);
        let ids: Vec<i64> = employees.iter().map(|e| e.employee_id).collect();
        assert_eq!(ids, vec![2, 3, 1]);

        let hits = search_employees(&employees, "IVAN");
        assert_eq!(hits.len(), 2);
        assert!(search_employees(&employees, "").len() == 3);
    }

    #[test]
    fn conflicts_name_the_other_expert() {
        let assignments = vec![
            Assignment {
                employee_id: 5,
                metrics_id: vec![1, 2],
                quarter: 1,
                date_start: chrono::Utc::now(),
                date_end: chrono::Utc::now(),
                year: 2025,
            },
            Assignment {
                employee_id: 6,
                metrics_id: vec![3],
                quarter: 1,
                date_start: chrono::Utc::now(),
                date_end: chrono::Utc::now(),
                year: 2025,
            },
        ];

        // metric 2 belongs to expert 5; metric 3 to the requester themselves
        let conflicts = find_conflicts(&assignments, 6, &[2, 3, 4]);
        assert_eq!(
            conflicts,
            vec![AssignmentConflict {
                metric_id: 2,
                employee_id: 5
            }]
        );
    }
}
