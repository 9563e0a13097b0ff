use super::data;
use crate::reports;
use clap::{Args, ValueEnum};
use evalgrid_client::{ApiClient, ListCache};
use evalgrid_core::PeriodArgs;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportView {
    /// Departments × the quarter's scheduled metrics, with totals
    Departments,
    /// Experts × all metrics
    Experts,
}

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    #[command(flatten)]
    pub period: PeriodArgs,

    #[arg(long, value_enum, default_value = "departments")]
    pub view: ReportView,

    /// Ignore the quarter schedule and show every metric
    #[arg(long, default_value_t = false)]
    pub all_metrics: bool,
}

pub async fn run(args: ReportArgs, client: &ApiClient, cache: &mut ListCache) -> anyhow::Result<()> {
    let quarter = args.period.quarter()?;

    match args.view {
        ReportView::Departments => {
            let table =
                data::department_report(client, cache, args.period.year, quarter, args.all_metrics)
                    .await?;
            println!("\nDepartment metrics, {} {}", args.period.year, quarter);
            reports::tables::report(&table, "Department", true);
        }
        ReportView::Experts => {
            let table = data::expert_report(client, cache, args.period.year, quarter).await?;
            println!("\nExpert scores, {} {}", args.period.year, quarter);
            reports::tables::report(&table, "Expert", false);
        }
    }
    Ok(())
}
