//! Extracted-text cache: one `<URL_ID>.txt` file per article.
//!
//! The fetch phase writes here and the analysis phase reads from here, so the
//! analysis can be re-run without fetching the pages again.

use crate::models::ExtractedArticle;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, instrument};

#[derive(Debug, Clone)]
pub struct ArticleStore {
    dir: PathBuf,
}

impl ArticleStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Cache file of an article.
    pub fn path_for(&self, url_id: &str) -> PathBuf {
        self.dir.join(format!("{url_id}.txt"))
    }

    /// Write (or overwrite) the cache file of an article.
    #[instrument(level = "debug", skip(self, article))]
    pub async fn save(&self, url_id: &str, article: &ExtractedArticle) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(url_id);
        fs::write(&path, article.to_cache_text()).await?;
        debug!(path = %path.display(), "Saved article");
        Ok(path)
    }

    /// Full text of a cached article, title line included.
    pub async fn load(&self, url_id: &str) -> io::Result<String> {
        fs::read_to_string(self.path_for(url_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = ArticleStore::new(dir.path().join("extracted_text"));
        let article = ExtractedArticle {
            title: "Markets".to_string(),
            content: "Stocks rose.".to_string(),
        };

        let path = store.save("blackassign0001", &article).await.unwrap();
        assert_eq!(path, dir.path().join("extracted_text/blackassign0001.txt"));

        let text = store.load("blackassign0001").await.unwrap();
        assert_eq!(text, "Title: Markets\n\nContent:\nStocks rose.");
    }

    #[tokio::test]
    async fn test_load_missing_article() {
        let dir = TempDir::new().unwrap();
        let store = ArticleStore::new(dir.path());

        let err = store.load("nope").await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
