//! Analysis phase: fill the results table from the extracted-text cache.
//!
//! The column layout is checked before any article is analyzed, so a
//! template missing a metric column fails the run immediately instead of
//! producing a half-filled table. After that, failures are per article: the
//! row's metric cells are cleared, the failure is logged with the `URL_ID`,
//! and the next row is processed.

use crate::analysis::complexity::WordComplexity;
use crate::analysis::{MetricRecord, analyze, column_name};
use crate::error::SinkError;
use crate::lexicon::Lexicon;
use crate::models::ArticleMetrics;
use crate::outputs::table::{Table, URL_ID_COLUMN};
use crate::store::ArticleStore;
use tracing::{error, info, instrument, warn};

/// Column indexes of `URL_ID` and of every metric present in the table.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricColumns {
    pub url_id: usize,
    pub metrics: Vec<(&'static str, usize)>,
}

impl MetricColumns {
    /// Map metric names to table columns.
    ///
    /// # Errors
    ///
    /// [`SinkError::MissingColumn`] if `URL_ID` or any required metric has no column.
    pub fn resolve(table: &Table) -> Result<Self, SinkError> {
        let url_id = table.require_column(URL_ID_COLUMN)?;
        let mut metrics = Vec::with_capacity(MetricRecord::REQUIRED.len() + MetricRecord::OPTIONAL.len());
        for name in MetricRecord::REQUIRED {
            metrics.push((name, table.require_column(&column_name(name))?));
        }
        for name in MetricRecord::OPTIONAL {
            if let Some(col) = table.column(&column_name(name)) {
                metrics.push((name, col));
            }
        }
        Ok(Self { url_id, metrics })
    }

    fn fill(&self, table: &mut Table, row: usize, record: &MetricRecord) {
        for (name, value) in record.values() {
            if let Some((_, col)) = self.metrics.iter().find(|(metric, _)| *metric == name) {
                table.set(row, *col, value.to_string());
            }
        }
    }

    fn clear(&self, table: &mut Table, row: usize) {
        for (_, col) in &self.metrics {
            table.set(row, *col, String::new());
        }
    }
}

/// Analyze the cached text of every row of `table` and write the metrics into it.
///
/// Returns the records of the successfully analyzed articles, in row order.
#[instrument(level = "info", skip_all, fields(rows = table.len()))]
pub async fn analyze_articles(
    table: &mut Table,
    store: &ArticleStore,
    lexicon: &Lexicon,
    complexity: &dyn WordComplexity,
) -> Result<Vec<ArticleMetrics>, SinkError> {
    let columns = MetricColumns::resolve(table)?;
    if table.is_empty() {
        warn!(path = %table.path().display(), "Output template has no article rows");
    }

    let mut results = Vec::with_capacity(table.len());
    let mut failed = 0usize;
    for row in 0..table.len() {
        let url_id = table.cell(row, columns.url_id).trim().to_string();
        if url_id.is_empty() {
            warn!(row = row + 2, "Row without URL_ID; skipping");
            columns.clear(table, row);
            continue;
        }

        info!(%url_id, "Analysing article");
        let text = match store.load(&url_id).await {
            Ok(text) => text,
            Err(e) => {
                error!(%url_id, path = %store.path_for(&url_id).display(), error = %e, "Extracted text unavailable");
                columns.clear(table, row);
                failed += 1;
                continue;
            }
        };

        match analyze(&text, lexicon, complexity) {
            Ok(metrics) => {
                columns.fill(table, row, &metrics);
                results.push(ArticleMetrics { url_id, metrics });
            }
            Err(e) => {
                error!(%url_id, error = %e, "Analysis failed");
                columns.clear(table, row);
                failed += 1;
            }
        }
    }

    info!(analyzed = results.len(), failed, "Completed article analysis");
    Ok(results)
}
