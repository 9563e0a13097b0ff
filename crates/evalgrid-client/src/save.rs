use crate::client::ApiClient;
use crate::error::ClientError;
use evalgrid_core::{CellKey, ScoreGrid};
use evalgrid_protocol::ScoreEntry;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// Per-cell outcome of one batched save.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveReport {
    pub persisted: Vec<CellKey>,
    pub failed: Vec<(CellKey, String)>,
}

impl SaveReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total(&self) -> usize {
        self.persisted.len() + self.failed.len()
    }
}

/// Persist the grid's dirty cells: one concurrent write per cell, all
/// settled before returning. Cells whose write succeeded move into the
/// grid's baseline; failed cells keep their edit and dirty mark so the user
/// can retry, and the report says exactly which is which.
pub async fn save_grid(
    client: &ApiClient,
    grid: &mut ScoreGrid,
) -> Result<SaveReport, ClientError> {
    let writes = grid.pending_writes()?;
    let selection = *grid.selection();
    info!("💾 Saving {} cell(s) for {}", writes.len(), selection);

    let mut tasks = JoinSet::new();
    for write in writes {
        let client = client.clone();
        tasks.spawn(async move {
            let entry = ScoreEntry::new(write.key.department_id, write.key.metric_id, write.score);
            let outcome = client.write_score(selection, &entry).await;
            (write.key, outcome.err().map(|e| e.to_string()))
        });
    }

    let mut persisted = Vec::new();
    let mut failed = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((key, None)) => persisted.push(key),
            Ok((key, Some(message))) => {
                warn!("❌ Cell {} failed: {}", key, message);
                failed.push((key, message));
            }
            // a panicked write task counts as a failed cell of unknown key;
            // should not happen, but never abort the siblings over it
            Err(join_err) => warn!("write task aborted: {}", join_err),
        }
    }

    persisted.sort();
    failed.sort_by_key(|(key, _)| *key);
    grid.mark_persisted(&persisted);

    if failed.is_empty() {
        info!("✅ All {} change(s) saved", persisted.len());
    } else {
        warn!(
            "⚠️  {} of {} change(s) failed; failed cells stay dirty for retry",
            failed.len(),
            persisted.len() + failed.len()
        );
    }

    Ok(SaveReport { persisted, failed })
}
