//! JSON dump of the per-article metric records.
//!
//! # Output Structure
//!
//! ```text
//! json_output_dir/
//! └── metrics.json    # [{ "url_id": ..., "positive_score": ..., ... }, ...]
//! ```

use crate::models::ArticleMetrics;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

pub const METRICS_FILE_NAME: &str = "metrics.json";

/// Write every analyzed article's metrics to `{json_output_dir}/metrics.json`.
///
/// The records keep the order of the results table. Returns the written path.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir.display()))]
pub async fn write_metrics(
    records: &[ArticleMetrics],
    json_output_dir: &Path,
) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(records)?;

    if let Err(e) = fs::create_dir_all(json_output_dir).await {
        error!(error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let path = json_output_dir.join(METRICS_FILE_NAME);
    fs::write(&path, json).await?;
    info!(path = %path.display(), count = records.len(), "Wrote metrics JSON");
    Ok(path)
}
