use super::data;
use crate::sheets;
use clap::{Args, ValueEnum};
use evalgrid_client::{ApiClient, ListCache};
use evalgrid_core::PeriodArgs;
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Xlsx,
    Csv,
}

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub period: PeriodArgs,

    #[arg(long, value_enum, default_value = "xlsx")]
    pub format: ExportFormat,

    /// Target file; defaults to department_metrics_<year>_Q<quarter>.<ext>
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Ignore the quarter schedule and export every metric
    #[arg(long, default_value_t = false)]
    pub all_metrics: bool,

    /// Download the server-generated expert workbook instead
    #[arg(long, default_value_t = false)]
    pub experts: bool,
}

pub async fn run(args: ExportArgs, client: &ApiClient, cache: &mut ListCache) -> anyhow::Result<()> {
    if args.experts {
        let path = args
            .output
            .unwrap_or_else(|| PathBuf::from("experts.xlsx"));
        let bytes = client.expert_workbook().await?;
        fs::write(&path, &bytes)?;
        info!("✅ Expert workbook saved to {}", path.display());
        return Ok(());
    }

    let quarter = args.period.quarter()?;
    let table =
        data::department_report(client, cache, args.period.year, quarter, args.all_metrics).await?;

    let path = args.output.unwrap_or_else(|| {
        let ext = match args.format {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
        };
        PathBuf::from(format!(
            "department_metrics_{}_{}.{}",
            args.period.year, quarter, ext
        ))
    });

    match args.format {
        ExportFormat::Xlsx => sheets::write_report_xlsx(&path, &table, "Department")?,
        ExportFormat::Csv => sheets::write_report_csv(&path, &table, "Department")?,
    }
    info!(
        "✅ Report for {} {} saved to {}",
        args.period.year,
        quarter,
        path.display()
    );
    Ok(())
}
