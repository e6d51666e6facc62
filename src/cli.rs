//! Command-line interface definitions for Article Metrics.
//!
//! Every option is optional: running the binary with no arguments executes
//! the whole pipeline against the default `./data` layout.

use clap::Parser;

/// Command-line arguments for the Article Metrics application.
///
/// # Examples
///
/// ```sh
/// # Fetch every article in ./data/Input.xlsx, then analyze them
/// article_metrics
///
/// # Re-run the analysis only, reusing the extracted text cache
/// article_metrics --skip-fetch
///
/// # Use a custom YAML configuration and also dump the records as JSON
/// article_metrics -c ./metrics.yaml -j ./json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a config.yaml file
    #[arg(short, long, env = "ARTICLE_METRICS_CONFIG")]
    pub config: Option<String>,

    /// Base directory holding word lists, the manifest and the output template
    #[arg(short, long, default_value = "./data")]
    pub data_dir: String,

    /// Skip the fetch phase and analyze the already extracted text files
    #[arg(long)]
    pub skip_fetch: bool,

    /// Optional output directory for a JSON dump of the metric records
    #[arg(short, long)]
    pub json_output_dir: Option<String>,
}
