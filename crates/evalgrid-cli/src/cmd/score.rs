use crate::reports;
use anyhow::{bail, Context};
use clap::Args;
use evalgrid_client::{save_grid, ApiClient, ListCache};
use evalgrid_core::metrics::sort_metrics;
use evalgrid_core::{BlankPolicy, CellKey, ScoreGrid, SelectionArgs};
use std::collections::BTreeSet;
use tracing::{info, warn};

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Cell edits as <department>-<metric>=<score>, repeatable
    #[arg(long = "set", value_name = "CELL=SCORE")]
    pub sets: Vec<String>,

    /// Cells to blank as <department>-<metric>, repeatable
    #[arg(long = "blank", value_name = "CELL")]
    pub blanks: Vec<String>,

    /// What blanking a cell means
    #[arg(long, value_enum, default_value_t)]
    pub blank_policy: BlankPolicy,

    /// Show the edited grid without saving
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

fn parse_edit(raw: &str) -> anyhow::Result<(CellKey, f64)> {
    let (cell, score) = raw
        .split_once('=')
        .with_context(|| format!("'{raw}' is not <department>-<metric>=<score>"))?;
    let key: CellKey = cell.parse()?;
    let value: f64 = score
        .trim()
        .parse()
        .with_context(|| format!("'{score}' is not a number"))?;
    Ok((key, value))
}

pub async fn run(args: ScoreArgs, client: &ApiClient, cache: &mut ListCache) -> anyhow::Result<()> {
    let selection = args.selection.selection()?;

    // validate every edit before any request goes out
    let edits = args
        .sets
        .iter()
        .map(|raw| parse_edit(raw))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let blanks = args
        .blanks
        .iter()
        .map(|raw| raw.parse::<CellKey>())
        .collect::<Result<Vec<_>, _>>()?;

    let employees = cache.employees(client).await?.to_vec();
    match employees
        .iter()
        .find(|e| e.employee_id == selection.employee_id)
    {
        Some(expert) => info!("🧑‍🔬 Scoring as {}", expert.full_name()),
        None => warn!(
            "⚠️  Employee {} is not in the expert list",
            selection.employee_id
        ),
    }

    let records = client.selection_scores(selection).await?;
    info!("📥 {} scored cell(s) for {}", records.len(), selection);

    let mut grid = ScoreGrid::load(selection, &records);
    grid.set_editing(true);

    for (key, value) in edits {
        grid.set_score(key, value)?;
    }
    for key in blanks {
        grid.blank_score(key, args.blank_policy)?;
    }

    // columns: metrics present in the fetched rows or touched by an edit
    let mut metric_ids: BTreeSet<i64> = records.iter().map(|r| r.metric.id).collect();
    for key in grid.scored_keys() {
        metric_ids.insert(key.metric_id);
    }
    let mut metrics: Vec<_> = cache
        .metrics(client)
        .await?
        .iter()
        .filter(|m| metric_ids.contains(&m.metric_id))
        .cloned()
        .collect();
    sort_metrics(&mut metrics);

    let departments = cache.departments(client).await?.to_vec();
    reports::grid::score_grid(&grid, &departments, &metrics);

    if !grid.has_unsaved_edits() {
        info!("Nothing to save.");
        return Ok(());
    }
    if args.dry_run {
        info!(
            "💡 Dry run: {} change(s) not saved",
            grid.dirty_count()
        );
        return Ok(());
    }

    let report = save_grid(client, &mut grid).await?;
    reports::tables::save_outcomes(&report, &departments, &metrics);

    if report.is_complete() {
        grid.set_editing(false);
    } else {
        bail!(
            "{} of {} cell write(s) failed; failed cells are still dirty",
            report.failed.len(),
            report.total()
        );
    }
    Ok(())
}
