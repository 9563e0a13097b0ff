use evalgrid_client::{ApiClient, ListCache};
use evalgrid_core::metrics::{sort_employees, sort_metrics, QuarterSchedule};
use evalgrid_core::report::{ReportTable, RowEntity, ValueLookup};
use evalgrid_core::Quarter;

/// Departments × scheduled metrics for one year/quarter.
pub async fn department_report(
    client: &ApiClient,
    cache: &mut ListCache,
    year: i32,
    quarter: Quarter,
    all_metrics: bool,
) -> anyhow::Result<ReportTable> {
    let departments = cache.departments(client).await?.to_vec();

    let mut metrics = cache.metrics(client).await?.to_vec();
    sort_metrics(&mut metrics);
    let metrics = if all_metrics {
        metrics
    } else {
        QuarterSchedule::default().metrics_for_quarter(quarter, &metrics)
    };

    let records = client.department_metrics().await?;
    let lookup = ValueLookup::from_department_metrics(&records, year, quarter.number());

    Ok(ReportTable::build(
        &RowEntity::from_departments(&departments),
        &metrics,
        &lookup,
    ))
}

/// Experts × all metrics for one year/quarter.
pub async fn expert_report(
    client: &ApiClient,
    cache: &mut ListCache,
    year: i32,
    quarter: Quarter,
) -> anyhow::Result<ReportTable> {
    let mut employees = cache.employees(client).await?.to_vec();
    sort_employees(&mut employees);

    let mut metrics = cache.metrics(client).await?.to_vec();
    sort_metrics(&mut metrics);

    let records = client.employee_scores().await?;
    let lookup = ValueLookup::from_employee_metrics(&records, year, quarter.number());

    Ok(ReportTable::build(
        &RowEntity::from_employees(&employees),
        &metrics,
        &lookup,
    ))
}
