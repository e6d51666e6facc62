//! Fetch phase: download each manifest article and cache its text.
//!
//! Articles are processed one after another in manifest order. Every failure
//! is confined to its article: an unreachable or malformed page is logged with
//! its `URL_ID` and cached as the placeholder article, so the analysis phase
//! still finds a file for every row.
//!
//! # Submodules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`tagdiv`] | Title/body extraction strategies for tagDiv themed pages |

pub mod tagdiv;

use crate::fetch::FetchPage;
use crate::models::{ExtractedArticle, ManifestEntry};
use crate::store::ArticleStore;
use crate::utils::truncate_for_log;
use futures::stream::{self, StreamExt};
use std::error::Error;
use tagdiv::PageExtractor;
use tracing::{error, info, instrument, warn};
use url::Url;

/// Outcome counts of a fetch phase.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FetchSummary {
    /// Articles fetched and extracted.
    pub fetched: usize,
    /// Articles cached as the placeholder after a fetch failure.
    pub placeholders: usize,
    /// Articles whose cache file could not be written.
    pub unsaved: usize,
}

/// Fetch and extract a single article.
#[instrument(level = "info", skip_all, fields(url_id = %entry.url_id, url = %entry.url))]
pub async fn fetch_article<F: FetchPage>(
    fetcher: &F,
    extractor: &PageExtractor,
    entry: &ManifestEntry,
) -> Result<ExtractedArticle, Box<dyn Error>> {
    let url = Url::parse(entry.url.trim())?;
    let html = fetcher.fetch(url.as_str()).await?;
    let article = extractor.extract(url.as_str(), &html);
    info!(
        title = %article.title,
        bytes = article.content.len(),
        preview = %truncate_for_log(article.content.trim(), 80),
        "Parsed article"
    );
    Ok(article)
}

/// Fetch every manifest entry and write its cache file.
#[instrument(level = "info", skip_all, fields(count = entries.len()))]
pub async fn fetch_articles<F: FetchPage>(
    fetcher: &F,
    extractor: &PageExtractor,
    store: &ArticleStore,
    entries: &[ManifestEntry],
) -> FetchSummary {
    let summary = stream::iter(entries)
        .then(|entry| async move {
            let mut outcome = FetchSummary::default();
            let article = match fetch_article(fetcher, extractor, entry).await {
                Ok(article) => {
                    outcome.fetched = 1;
                    article
                }
                Err(e) => {
                    error!(url_id = %entry.url_id, url = %entry.url, error = %e, "Fetch failed; caching placeholder");
                    outcome.placeholders = 1;
                    extractor.placeholder()
                }
            };
            if let Err(e) = store.save(&entry.url_id, &article).await {
                warn!(url_id = %entry.url_id, error = %e, "Failed to write extracted text");
                outcome.unsaved = 1;
            }
            outcome
        })
        .fold(FetchSummary::default(), |acc, outcome| async move {
            FetchSummary {
                fetched: acc.fetched + outcome.fetched,
                placeholders: acc.placeholders + outcome.placeholders,
                unsaved: acc.unsaved + outcome.unsaved,
            }
        })
        .await;

    info!(
        fetched = summary.fetched,
        placeholders = summary.placeholders,
        unsaved = summary.unsaved,
        "Fetched article contents"
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExtractionConfig;
    use std::collections::HashMap;
    use tempfile::TempDir;

    /// Serves canned pages; any other URL fails.
    struct CannedFetcher {
        pages: HashMap<String, String>,
    }

    impl FetchPage for CannedFetcher {
        async fn fetch(&self, url: &str) -> Result<String, Box<dyn Error>> {
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| format!("404 for {url}").into())
        }
    }

    fn entry(url_id: &str, url: &str) -> ManifestEntry {
        ManifestEntry {
            url_id: url_id.to_string(),
            url: url.to_string(),
        }
    }

    #[tokio::test]
    async fn test_fetch_articles_isolates_failures() {
        let dir = TempDir::new().unwrap();
        let store = ArticleStore::new(dir.path());
        let extractor = PageExtractor::from_config(&ExtractionConfig::default()).unwrap();
        let fetcher = CannedFetcher {
            pages: HashMap::from([(
                "https://example.com/good".to_string(),
                r#"<h1 class="entry-title">Good</h1><div class="td-post-content tagdiv-type">Fine text.</div>"#
                    .to_string(),
            )]),
        };
        let entries = vec![
            entry("a1", "https://example.com/good"),
            entry("a2", "https://example.com/missing"),
            entry("a3", "not a url"),
        ];

        let summary = fetch_articles(&fetcher, &extractor, &store, &entries).await;

        assert_eq!(
            summary,
            FetchSummary {
                fetched: 1,
                placeholders: 2,
                unsaved: 0
            }
        );
        assert_eq!(store.load("a1").await.unwrap(), "Title: Good\n\nContent:\nFine text.");
        assert_eq!(store.load("a2").await.unwrap(), "Title: No Title\n\nContent:\n");
        assert_eq!(store.load("a3").await.unwrap(), "Title: No Title\n\nContent:\n");
    }
}
