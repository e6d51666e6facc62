//! Complex-word detection.
//!
//! The analyzer only asks whether a token is complex; the answer comes from a
//! [`WordComplexity`] implementation chosen at startup from the configured
//! [`ComplexitySource`]. Tests pass plain closures.

use super::syllables::count_syllables;
use super::wordnet::WordNet;
use crate::error::WordNetError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Where complex-word decisions come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplexitySource {
    /// First WordNet synset with more than two lemma names.
    #[default]
    Wordnet,
    /// More than two syllables.
    Syllables,
}

/// Build the configured complexity oracle.
///
/// A missing WordNet database is an error rather than a silent switch to
/// syllables, since the two give different complex-word percentages.
pub fn load(source: ComplexitySource, wordnet_dir: &Path) -> Result<Box<dyn WordComplexity>, WordNetError> {
    match source {
        ComplexitySource::Wordnet if !wordnet_dir.is_dir() => {
            Err(WordNetError::MissingDatabase(wordnet_dir.to_path_buf()))
        }
        ComplexitySource::Wordnet => Ok(Box::new(WordNet::open(wordnet_dir)?)),
        ComplexitySource::Syllables => {
            info!("Complex words are those with more than two syllables");
            Ok(Box::new(SyllableComplexity))
        }
    }
}

/// Decides whether a word counts as complex.
pub trait WordComplexity {
    fn is_complex(&self, word: &str) -> bool;
}

impl<F> WordComplexity for F
where
    F: Fn(&str) -> bool,
{
    fn is_complex(&self, word: &str) -> bool {
        self(word)
    }
}

/// Gunning's original rule: a word with more than two syllables.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyllableComplexity;

impl WordComplexity for SyllableComplexity {
    fn is_complex(&self, word: &str) -> bool {
        count_syllables(word) > 2
    }
}
