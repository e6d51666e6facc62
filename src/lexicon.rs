//! Word lists used by the analyzer: stop words and the sentiment dictionary.
//!
//! The [`Lexicon`] is built once at startup and handed to the analyzer by
//! reference. Every entry is lower-cased at load time so membership tests
//! against lower-cased tokens are case-insensitive.

use crate::config::LexiconConfig;
use crate::error::LexiconError;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Encoding of the word list files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    /// ISO-8859-1: every byte maps to the code point of the same value.
    #[default]
    Latin1,
    Utf8,
}

impl TextEncoding {
    fn decode(self, bytes: Vec<u8>, path: &Path) -> Result<String, LexiconError> {
        match self {
            TextEncoding::Latin1 => Ok(bytes.into_iter().map(char::from).collect()),
            TextEncoding::Utf8 => String::from_utf8(bytes).map_err(|_| LexiconError::Encoding {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Stop words and positive/negative sentiment words, all lower-cased.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    pub stop_words: HashSet<String>,
    pub positive_words: HashSet<String>,
    pub negative_words: HashSet<String>,
}

impl Lexicon {
    /// Build a lexicon from in-memory lists, lower-casing every entry.
    pub fn from_lists(stop_words: &[&str], positive_words: &[&str], negative_words: &[&str]) -> Self {
        let fold = |words: &[&str]| words.iter().map(|w| w.to_lowercase()).collect();
        Self {
            stop_words: fold(stop_words),
            positive_words: fold(positive_words),
            negative_words: fold(negative_words),
        }
    }

    /// Load all three word sets as described by `config`.
    ///
    /// Any unreadable file is an error: sentiment scores computed against a
    /// partial dictionary would be silently wrong.
    #[instrument(level = "info", skip_all)]
    pub fn load(config: &LexiconConfig) -> Result<Self, LexiconError> {
        let stop_files = list_word_files(&config.stop_words_dir)?;
        for path in &stop_files {
            debug!(path = %path.display(), "Stop word list");
        }
        let stop_words = load_word_set(&stop_files, config.encoding)?;
        info!(count = stop_words.len(), files = stop_files.len(), "Loaded stop words");

        let positive_words = load_word_set(&[&config.positive_words], config.encoding)?;
        let negative_words = load_word_set(&[&config.negative_words], config.encoding)?;
        info!(
            positive = positive_words.len(),
            negative = negative_words.len(),
            "Loaded sentiment dictionary"
        );

        Ok(Self {
            stop_words,
            positive_words,
            negative_words,
        })
    }

    pub fn is_stop_word(&self, lowered: &str) -> bool {
        self.stop_words.contains(lowered)
    }

    pub fn is_positive(&self, lowered: &str) -> bool {
        self.positive_words.contains(lowered)
    }

    pub fn is_negative(&self, lowered: &str) -> bool {
        self.negative_words.contains(lowered)
    }
}

/// Read whitespace-delimited words from every file and union them, lower-cased.
pub fn load_word_set<P: AsRef<Path>>(
    paths: &[P],
    encoding: TextEncoding,
) -> Result<HashSet<String>, LexiconError> {
    let mut words = HashSet::new();
    for path in paths {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| LexiconError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let text = encoding.decode(bytes, path)?;
        words.extend(text.split_whitespace().map(str::to_lowercase));
    }
    Ok(words)
}

/// Regular files of a directory, sorted by name.
fn list_word_files(dir: &Path) -> Result<Vec<PathBuf>, LexiconError> {
    let read_err = |source| LexiconError::Read {
        path: dir.to_path_buf(),
        source,
    };
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    if files.is_empty() {
        return Err(LexiconError::EmptyDirectory(dir.to_path_buf()));
    }
    Ok(files.into_iter().sorted().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_word_set_lowercases_and_unions() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        fs::write(&a, "Good\nGREAT   fine\n").unwrap();
        fs::write(&b, "good excellent").unwrap();

        let words = load_word_set(&[&a, &b], TextEncoding::Utf8).unwrap();

        assert_eq!(words.len(), 4);
        assert!(words.contains("good"));
        assert!(words.contains("great"));
        assert!(words.contains("excellent"));
    }

    #[test]
    fn test_latin1_decoding() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("latin.txt");
        // "CAFÉ" in ISO-8859-1, which is not valid UTF-8
        fs::write(&path, [b'C', b'A', b'F', 0xC9]).unwrap();

        let words = load_word_set(&[&path], TextEncoding::Latin1).unwrap();
        assert!(words.contains("café"));

        let err = load_word_set(&[&path], TextEncoding::Utf8).unwrap_err();
        assert!(matches!(err, LexiconError::Encoding { .. }));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = load_word_set(&["/no/such/list.txt"], TextEncoding::Latin1).unwrap_err();
        assert!(matches!(err, LexiconError::Read { .. }));
    }

    #[test]
    fn test_lexicon_load_from_layout() {
        let dir = TempDir::new().unwrap();
        let stop_dir = dir.path().join("StopWords");
        let dict_dir = dir.path().join("MasterDictionary");
        fs::create_dir_all(&stop_dir).unwrap();
        fs::create_dir_all(&dict_dir).unwrap();
        fs::write(stop_dir.join("StopWords_Generic.txt"), "THE\nA\nIS").unwrap();
        fs::write(stop_dir.join("StopWords_Names.txt"), "SMITH | Surnames").unwrap();
        fs::write(dict_dir.join("positive-words.txt"), "good\nhappy").unwrap();
        fs::write(dict_dir.join("negative-words.txt"), "bad").unwrap();

        let config = LexiconConfig {
            stop_words_dir: stop_dir,
            positive_words: dict_dir.join("positive-words.txt"),
            negative_words: dict_dir.join("negative-words.txt"),
            encoding: TextEncoding::Latin1,
        };
        let lexicon = Lexicon::load(&config).unwrap();

        assert!(lexicon.is_stop_word("the"));
        assert!(lexicon.is_stop_word("smith"));
        assert!(lexicon.is_positive("happy"));
        assert!(lexicon.is_negative("bad"));
        assert!(!lexicon.is_negative("good"));
    }

    #[test]
    fn test_lexicon_load_aborts_on_missing_dictionary() {
        let dir = TempDir::new().unwrap();
        let stop_dir = dir.path().join("StopWords");
        fs::create_dir_all(&stop_dir).unwrap();
        fs::write(stop_dir.join("generic.txt"), "the").unwrap();

        let config = LexiconConfig {
            stop_words_dir: stop_dir,
            positive_words: dir.path().join("missing-positive.txt"),
            negative_words: dir.path().join("missing-negative.txt"),
            encoding: TextEncoding::Latin1,
        };

        assert!(Lexicon::load(&config).is_err());
    }

    #[test]
    fn test_empty_stop_word_directory() {
        let dir = TempDir::new().unwrap();
        let err = list_word_files(dir.path()).unwrap_err();
        assert!(matches!(err, LexiconError::EmptyDirectory(_)));
    }
}
