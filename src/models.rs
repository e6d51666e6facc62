//! Data models shared by the fetch and analysis phases.
//!
//! - [`ManifestEntry`]: one article to fetch, as listed in the input manifest
//! - [`ExtractedArticle`]: title and body text pulled out of a fetched page
//! - [`ArticleMetrics`]: the metric record of one article, keyed by its id

use crate::analysis::MetricRecord;
use serde::{Deserialize, Serialize};

/// An article listed in the input manifest.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ManifestEntry {
    /// Unique identifier, used as cache file name and output row key.
    pub url_id: String,
    /// The page to fetch.
    pub url: String,
}

/// Text extracted from an article page.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ExtractedArticle {
    pub title: String,
    pub content: String,
}

impl ExtractedArticle {
    /// Render the cache file body: a title line followed by the content block.
    pub fn to_cache_text(&self) -> String {
        format!("Title: {}\n\nContent:\n{}", self.title, self.content)
    }
}

/// Metrics of one analyzed article.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ArticleMetrics {
    pub url_id: String,
    #[serde(flatten)]
    pub metrics: MetricRecord,
}
