use anyhow::Context;
use clap::Args;
use evalgrid_client::{ApiClient, ListCache};
use evalgrid_core::metrics::find_conflicts;
use evalgrid_core::PeriodArgs;
use evalgrid_protocol::Assignment;
use tracing::{info, warn};

#[derive(Args, Debug, Clone)]
pub struct AssignArgs {
    /// Expert (employee) id receiving the assignment
    #[arg(long)]
    pub expert: i64,

    #[command(flatten)]
    pub period: PeriodArgs,

    /// Metric ids to assign
    #[arg(long, value_delimiter = ',', required = true)]
    pub metrics: Vec<i64>,
}

pub async fn run(args: AssignArgs, client: &ApiClient, cache: &mut ListCache) -> anyhow::Result<()> {
    let quarter = args.period.quarter()?;

    let employees = cache.employees(client).await?.to_vec();
    let expert = employees
        .iter()
        .find(|e| e.employee_id == args.expert)
        .with_context(|| format!("no employee with id {}", args.expert))?
        .clone();

    let metric_defs = cache.metrics(client).await?.to_vec();
    for id in &args.metrics {
        if !metric_defs.iter().any(|m| m.metric_id == *id) {
            warn!("⚠️  Metric id {} is not a known metric definition", id);
        }
    }

    // warn about metrics already held by another expert; the write still
    // goes through, matching the form this replaces
    let assignments = cache.assignments(client).await?.to_vec();
    for conflict in find_conflicts(&assignments, args.expert, &args.metrics) {
        let label = metric_defs
            .iter()
            .find(|m| m.metric_id == conflict.metric_id)
            .map(|m| m.label())
            .unwrap_or_else(|| conflict.metric_id.to_string());
        let holder = employees
            .iter()
            .find(|e| e.employee_id == conflict.employee_id)
            .map(|e| e.full_name())
            .unwrap_or_else(|| format!("employee {}", conflict.employee_id));
        warn!("⚠️  Metric {} is already assigned to {}", label, holder);
    }

    let (date_start, date_end) = quarter.date_range(args.period.year);
    let assignment = Assignment {
        employee_id: args.expert,
        metrics_id: args.metrics.clone(),
        quarter: quarter.number(),
        date_start,
        date_end,
        year: args.period.year,
    };

    client.create_assignment(&assignment).await?;
    cache.invalidate_assignments();
    info!(
        "✅ Assigned {} metric(s) to {} for {} {}",
        args.metrics.len(),
        expert.full_name(),
        args.period.year,
        quarter
    );
    Ok(())
}
