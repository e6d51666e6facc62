//! Sentiment and readability metrics for a single article.
//!
//! [`analyze`] is the core of the pipeline. Given the raw article text, the
//! [`Lexicon`] and a [`WordComplexity`] oracle it computes every metric of a
//! [`MetricRecord`] or fails as a whole; partial records are never produced.
//!
//! # Pipeline
//!
//! 1. Split the text into sentences and each sentence into `\w+` tokens
//! 2. Drop stop words; sentences left empty no longer count as sentences
//! 3. Score sentiment, complexity, syllables and word length over the
//!    surviving tokens
//! 4. Count personal pronouns over the raw, unfiltered text
//!
//! # Submodules
//!
//! - [`tokenize`]: sentence splitting, tokenization, stop-word filtering
//! - [`syllables`]: vowel-based syllable estimate
//! - [`pronouns`]: personal pronoun matcher
//! - [`complexity`]: the [`WordComplexity`] capability
//! - [`wordnet`]: WordNet-backed [`WordComplexity`]

pub mod complexity;
pub mod pronouns;
pub mod syllables;
pub mod tokenize;
pub mod wordnet;

use crate::error::AnalysisError;
use crate::lexicon::Lexicon;
use complexity::WordComplexity;
use pronouns::count_personal_pronouns;
use serde::{Deserialize, Serialize};
use std::fmt;
use syllables::count_syllables;
use tokenize::FilteredText;
use tracing::debug;

/// Added to denominators of the sentiment ratios so that an article without
/// sentiment words scores 0 instead of dividing by zero.
pub const EPSILON: f64 = 0.000001;

/// Metrics computed for one article.
///
/// Field names are the metric names; the output column of a metric is its
/// name upper-cased with spaces instead of underscores (see [`column_name`]).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MetricRecord {
    pub positive_score: usize,
    pub negative_score: usize,
    pub polarity_score: f64,
    pub subjectivity_score: f64,
    pub avg_sentence_length: f64,
    pub percentage_of_complex_words: f64,
    pub fog_index: f64,
    /// Same value as `avg_sentence_length`: both divide the filtered token
    /// count by the filtered sentence count. Kept as its own column.
    pub avg_number_of_words_per_sentence: f64,
    pub complex_word_count: usize,
    pub word_count: usize,
    pub syllable_per_word: f64,
    pub personal_pronouns: usize,
    pub avg_word_length: f64,
}

/// A single metric value as written to a table cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Count(usize),
    Ratio(f64),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Count(n) => write!(f, "{n}"),
            MetricValue::Ratio(x) => write!(f, "{x}"),
        }
    }
}

impl MetricRecord {
    /// Metrics every output table must have a column for.
    pub const REQUIRED: [&'static str; 12] = [
        "positive_score",
        "negative_score",
        "polarity_score",
        "subjectivity_score",
        "avg_sentence_length",
        "percentage_of_complex_words",
        "fog_index",
        "avg_number_of_words_per_sentence",
        "word_count",
        "syllable_per_word",
        "personal_pronouns",
        "avg_word_length",
    ];

    /// Metrics written only when the table happens to have the column.
    pub const OPTIONAL: [&'static str; 1] = ["complex_word_count"];

    /// All metrics as `(name, value)` in output order.
    pub fn values(&self) -> [(&'static str, MetricValue); 13] {
        use MetricValue::{Count, Ratio};
        [
            ("positive_score", Count(self.positive_score)),
            ("negative_score", Count(self.negative_score)),
            ("polarity_score", Ratio(self.polarity_score)),
            ("subjectivity_score", Ratio(self.subjectivity_score)),
            ("avg_sentence_length", Ratio(self.avg_sentence_length)),
            ("percentage_of_complex_words", Ratio(self.percentage_of_complex_words)),
            ("fog_index", Ratio(self.fog_index)),
            ("avg_number_of_words_per_sentence", Ratio(self.avg_number_of_words_per_sentence)),
            ("complex_word_count", Count(self.complex_word_count)),
            ("word_count", Count(self.word_count)),
            ("syllable_per_word", Ratio(self.syllable_per_word)),
            ("personal_pronouns", Count(self.personal_pronouns)),
            ("avg_word_length", Ratio(self.avg_word_length)),
        ]
    }
}

/// Output column name of a metric: `fog_index` -> `FOG INDEX`.
pub fn column_name(metric: &str) -> String {
    metric.to_uppercase().replace('_', " ")
}

/// Compute every metric for `text`.
///
/// # Errors
///
/// [`AnalysisError::EmptyArticle`] when no token survives stop-word
/// filtering, since every average would divide by zero.
pub fn analyze(
    text: &str,
    lexicon: &Lexicon,
    complexity: &dyn WordComplexity,
) -> Result<MetricRecord, AnalysisError> {
    let filtered = FilteredText::new(text, lexicon);
    let word_count = filtered.token_count();
    let sentence_count = filtered.sentence_count();
    if word_count == 0 {
        return Err(AnalysisError::EmptyArticle);
    }

    let mut positive_score = 0usize;
    let mut negative_score = 0usize;
    let mut complex_word_count = 0usize;
    let mut syllables = 0usize;
    let mut chars = 0usize;
    for token in filtered.tokens() {
        if lexicon.is_positive(&token.lowered) {
            positive_score += 1;
        }
        if lexicon.is_negative(&token.lowered) {
            negative_score += 1;
        }
        if complexity.is_complex(token.text) {
            complex_word_count += 1;
        }
        syllables += count_syllables(token.text);
        chars += token.text.chars().count();
    }

    let words = word_count as f64;
    let sentiment = (positive_score + negative_score) as f64;
    let polarity_score = (positive_score as f64 - negative_score as f64) / (sentiment + EPSILON);
    let subjectivity_score = sentiment / (words + EPSILON);

    let avg_sentence_length = words / sentence_count as f64;
    let percentage_of_complex_words = complex_word_count as f64 / words;
    let fog_index = 0.4 * (avg_sentence_length + percentage_of_complex_words);

    debug!(
        words = word_count,
        sentences = sentence_count,
        positive_score,
        negative_score,
        complex_word_count,
        "Analyzed article"
    );

    Ok(MetricRecord {
        positive_score,
        negative_score,
        polarity_score,
        subjectivity_score,
        avg_sentence_length,
        percentage_of_complex_words,
        fog_index,
        avg_number_of_words_per_sentence: avg_sentence_length,
        complex_word_count,
        word_count,
        syllable_per_word: syllables as f64 / words,
        personal_pronouns: count_personal_pronouns(text),
        avg_word_length: chars as f64 / words,
    })
}
