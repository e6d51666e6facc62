//! Typed errors for the parts of the pipeline whose failures callers match on.
//!
//! Orchestration code in `main` and the phase drivers propagates
//! `Box<dyn Error>`; the enums here are the conditions that decide whether a
//! run aborts (lexicon, configuration, output columns) or only a single
//! article is skipped (analysis).

use std::path::PathBuf;
use thiserror::Error;

/// Failures while building the [`Lexicon`](crate::lexicon::Lexicon). Always fatal.
#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("failed to read word list {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("word list {path} is not valid UTF-8")]
    Encoding { path: PathBuf },

    #[error("no word list files found in {0}")]
    EmptyDirectory(PathBuf),
}

/// Failures of a single article's analysis.
#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    /// Nothing survived tokenization and stop-word filtering.
    #[error("article has no words left after stop-word filtering")]
    EmptyArticle,
}

/// Failures reading or filling the tabular input/output files.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("table {path} has no column named {column:?}")]
    MissingColumn { path: PathBuf, column: String },

    #[error("table {0} has no header row")]
    NoHeader(PathBuf),

    #[error("workbook {0} contains no worksheet")]
    NoWorksheet(PathBuf),

    #[error("unsupported table format for {0} (expected .xlsx or .csv)")]
    UnsupportedFormat(PathBuf),

    #[error("failed to read workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    #[error("failed to write workbook: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Invalid configuration detected at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid CSS selector {selector:?}: {message}")]
    Selector { selector: String, message: String },
}

/// Failures opening the WordNet database files.
#[derive(Debug, Error)]
pub enum WordNetError {
    #[error("failed to read WordNet file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed WordNet file {path} at line {line}")]
    Malformed { path: PathBuf, line: usize },

    #[error("WordNet database not found in {0} (install it or set `complexity: syllables`)")]
    MissingDatabase(PathBuf),
}
