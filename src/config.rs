//! YAML configuration with defaults matching the conventional data layout.
//!
//! Every section is optional. Relative paths are resolved against the data
//! directory given on the command line, so the default configuration reads:
//!
//! ```text
//! data/
//! ├── StopWords/                      # one or more stop-word lists
//! ├── MasterDictionary/
//! │   ├── positive-words.txt
//! │   └── negative-words.txt
//! ├── Input.xlsx                      # URL_ID, URL
//! ├── Output Data Structure.xlsx      # URL_ID + metric columns
//! ├── extracted_text/                 # <URL_ID>.txt cache
//! └── wordnet/                        # WordNet dict files
//! ```

use crate::analysis::complexity::ComplexitySource;
use crate::error::ConfigError;
use crate::lexicon::TextEncoding;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub lexicon: LexiconConfig,
    /// Manifest listing the articles to fetch (`URL_ID`, `URL`).
    pub manifest: PathBuf,
    pub output: OutputConfig,
    /// Directory of the per-article extracted text cache.
    pub extracted_text_dir: PathBuf,
    /// How complex words are detected.
    pub complexity: ComplexitySource,
    /// WordNet `dict` directory used when `complexity` is `wordnet`.
    pub wordnet_dir: PathBuf,
    pub fetch: FetchConfig,
    pub extraction: ExtractionConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            lexicon: LexiconConfig::default(),
            manifest: PathBuf::from("Input.xlsx"),
            output: OutputConfig::default(),
            extracted_text_dir: PathBuf::from("extracted_text"),
            complexity: ComplexitySource::Wordnet,
            wordnet_dir: PathBuf::from("wordnet"),
            fetch: FetchConfig::default(),
            extraction: ExtractionConfig::default(),
        }
    }
}

/// Locations and encoding of the word lists.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LexiconConfig {
    /// Every regular file in this directory is a stop-word list.
    pub stop_words_dir: PathBuf,
    pub positive_words: PathBuf,
    pub negative_words: PathBuf,
    pub encoding: TextEncoding,
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self {
            stop_words_dir: PathBuf::from("StopWords"),
            positive_words: PathBuf::from("MasterDictionary/positive-words.txt"),
            negative_words: PathBuf::from("MasterDictionary/negative-words.txt"),
            encoding: TextEncoding::Latin1,
        }
    }
}

/// Output template and where the filled table is written.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Table whose header already holds `URL_ID` and the metric columns.
    pub template: PathBuf,
    /// Destination of the filled table (`.xlsx` or `.csv`). Defaults to the
    /// template itself, which is rewritten in place.
    pub results_path: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            template: PathBuf::from("Output Data Structure.xlsx"),
            results_path: None,
        }
    }
}

impl OutputConfig {
    /// Path the filled result table is written to.
    pub fn results_path(&self) -> PathBuf {
        self.results_path.clone().unwrap_or_else(|| self.template.clone())
    }
}

/// HTTP client and retry settings for the fetch phase.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Retries after the first failed attempt.
    pub max_retries: usize,
    pub base_delay_ms: u64,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 1000,
            timeout_secs: 30,
            user_agent: concat!("article_metrics/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// One content extraction strategy: a CSS selector and which match to use.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ContentSelector {
    pub selector: String,
    /// Zero-based index into the matches; the first match when absent.
    #[serde(default)]
    pub index: Option<usize>,
}

/// Title and content extraction strategies, tried in order.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub title_selectors: Vec<String>,
    pub placeholder_title: String,
    pub content_selectors: Vec<ContentSelector>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            title_selectors: vec!["h1.entry-title".to_string(), "h1.tdb-title-text".to_string()],
            placeholder_title: "No Title".to_string(),
            content_selectors: vec![
                ContentSelector {
                    selector: "div.td-post-content.tagdiv-type".to_string(),
                    index: None,
                },
                // Some pages only render the body inside the 15th page-builder block.
                ContentSelector {
                    selector: "div.tdb-block-inner.td-fix-index".to_string(),
                    index: Some(14),
                },
            ],
        }
    }
}

impl AppConfig {
    /// Resolve every relative path against `data_dir`.
    pub fn resolve_paths(mut self, data_dir: &Path) -> Self {
        self.lexicon.stop_words_dir = data_dir.join(&self.lexicon.stop_words_dir);
        self.lexicon.positive_words = data_dir.join(&self.lexicon.positive_words);
        self.lexicon.negative_words = data_dir.join(&self.lexicon.negative_words);
        self.manifest = data_dir.join(&self.manifest);
        self.output.template = data_dir.join(&self.output.template);
        self.output.results_path = self.output.results_path.map(|p| data_dir.join(p));
        self.extracted_text_dir = data_dir.join(&self.extracted_text_dir);
        self.wordnet_dir = data_dir.join(&self.wordnet_dir);
        self
    }
}

/// Load the configuration file (if any) and resolve its paths.
#[instrument(level = "info")]
pub fn load_config(config_path: Option<&str>, data_dir: &str) -> Result<AppConfig, ConfigError> {
    let config = match config_path {
        Some(path) => {
            let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: PathBuf::from(path),
                source,
            })?;
            let parsed: AppConfig = serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: PathBuf::from(path),
                source,
            })?;
            info!(path, "Loaded configuration file");
            parsed
        }
        None => AppConfig::default(),
    };
    Ok(config.resolve_paths(Path::new(data_dir)))
}

/// Case-insensitive extension check.
pub fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}
