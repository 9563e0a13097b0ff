use crate::reports;
use anyhow::Context;
use clap::Args;
use evalgrid_client::{ApiClient, ListCache};
use evalgrid_core::metrics::sort_metrics;
use evalgrid_protocol::Metric;
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct MetricsArgs {
    /// Push a JSON array of metric definitions to the backend (bulk replace)
    #[arg(long, value_name = "FILE")]
    pub push: Option<PathBuf>,
}

pub async fn run(
    args: MetricsArgs,
    client: &ApiClient,
    cache: &mut ListCache,
) -> anyhow::Result<()> {
    if let Some(path) = args.push {
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        let updated: Vec<Metric> = serde_json::from_str(&raw)
            .with_context(|| format!("parsing {} as a metric array", path.display()))?;

        client.update_metrics(&updated).await?;
        cache.invalidate_metrics();
        info!("✅ Pushed {} metric definition(s)", updated.len());
        return Ok(());
    }

    let mut metrics = cache.metrics(client).await?.to_vec();
    sort_metrics(&mut metrics);
    reports::tables::metrics(&metrics);
    Ok(())
}
