//! # Article Metrics
//!
//! A batch pipeline that scrapes a fixed list of article URLs, caches their
//! extracted text, and computes sentiment and readability metrics for each
//! article into a results table.
//!
//! ## Metrics
//!
//! Positive/negative score, polarity, subjectivity, average sentence length,
//! percentage of complex words, fog index, average words per sentence, word
//! count, syllables per word, personal pronouns and average word length.
//!
//! ## Usage
//!
//! ```sh
//! article_metrics                       # fetch + analyze using ./data
//! article_metrics --skip-fetch          # analyze the cached text only
//! article_metrics -c metrics.yaml -j ./json
//! ```
//!
//! ## Architecture
//!
//! 1. **Lexicon**: Load stop words and the sentiment dictionary (fatal on error)
//! 2. **Fetching**: Download every manifest URL and cache `<URL_ID>.txt`
//! 3. **Analysis**: Compute the metrics of every template row from the cache
//! 4. **Output**: Rewrite the results table, optionally dump JSON

use clap::Parser;
use std::error::Error;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod analysis;
mod batch;
mod cli;
mod config;
mod error;
mod fetch;
mod lexicon;
mod models;
mod outputs;
mod scrapers;
mod store;
mod utils;

use analysis::complexity::load as load_complexity;
use cli::Cli;
use config::AppConfig;
use fetch::{HttpFetcher, RetryFetch};
use lexicon::Lexicon;
use outputs::json;
use outputs::table::{Table, manifest_entries};
use scrapers::tagdiv::PageExtractor;
use store::ArticleStore;
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("article_metrics starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.config, %args.data_dir, args.skip_fetch, "Parsed CLI arguments");

    let config = config::load_config(args.config.as_deref(), &args.data_dir)?;
    debug!(?config, "Resolved configuration");

    // ---- Lexicon: a partial dictionary would silently skew every score ----
    let lexicon = match Lexicon::load(&config.lexicon) {
        Ok(lexicon) => lexicon,
        Err(e) => {
            error!(error = %e, "Failed to load word lists; aborting");
            return Err(e.into());
        }
    };

    let complexity = match load_complexity(config.complexity, &config.wordnet_dir) {
        Ok(complexity) => complexity,
        Err(e) => {
            error!(error = %e, "Failed to load complex-word detection; aborting");
            return Err(e.into());
        }
    };
    let store = ArticleStore::new(&config.extracted_text_dir);

    // ---- Fetch phase ----
    if args.skip_fetch {
        info!(dir = %store.dir().display(), "Skipping fetch; using extracted text cache");
    } else {
        fetch_phase(&config, &store).await?;
    }

    // ---- Analysis phase ----
    let mut table = Table::read(&config.output.template)?;
    let results = batch::analyze_articles(&mut table, &store, &lexicon, complexity.as_ref()).await?;

    let results_path = config.output.results_path();
    if let Err(e) = table.write(&results_path) {
        error!(path = %results_path.display(), error = %e, "Failed to write results table");
        return Err(e.into());
    }
    info!(path = %results_path.display(), articles = results.len(), "Saved results");

    // ---- Optional JSON output ----
    if let Some(dir) = &args.json_output_dir {
        if let Err(e) = json::write_metrics(&results, Path::new(dir)).await {
            error!(error = %e, "Failed to write metrics JSON");
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}

/// Fetch every manifest article into the extracted text cache.
#[instrument(level = "info", skip_all)]
async fn fetch_phase(config: &AppConfig, store: &ArticleStore) -> Result<(), Box<dyn Error>> {
    // Early check: ensure the cache dir is writable
    if let Err(e) = ensure_writable_dir(store.dir()).await {
        error!(
            path = %store.dir().display(),
            error = %e,
            "Extracted text directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let manifest = Table::read(&config.manifest)?;
    let entries = manifest_entries(&manifest)?;
    let extractor = PageExtractor::from_config(&config.extraction)?;
    let fetcher = RetryFetch::new(
        HttpFetcher::new(&config.fetch)?,
        config.fetch.max_retries,
        Duration::from_millis(config.fetch.base_delay_ms),
    );
    debug!(?fetcher, "Built HTTP fetcher");

    info!(count = entries.len(), "Fetching articles");
    let summary = scrapers::fetch_articles(&fetcher, &extractor, store, &entries).await;
    info!(
        fetched = summary.fetched,
        placeholders = summary.placeholders,
        unsaved = summary.unsaved,
        "Fetched all articles"
    );
    Ok(())
}
