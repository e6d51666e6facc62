//! Sentence splitting, word tokenization and stop-word filtering.

use crate::lexicon::Lexicon;
use once_cell::sync::Lazy;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").unwrap());

/// Lower-cased abbreviations (without their final period) that do not end a sentence.
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "mt", "vs", "etc", "e.g", "i.e", "cf",
    "inc", "ltd", "co", "corp", "dept", "nos", "fig", "figs", "vol", "approx", "est",
    "gen", "gov", "sen", "rep", "rev", "hon", "capt", "col", "lt", "sgt", "jan", "feb", "mar",
    "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec", "u.s", "u.k", "u.n", "a.m",
    "p.m", "ph.d", "a.k.a",
];

/// Characters that may trail a sentence terminator, e.g. `."` or `?)`.
const CLOSERS: &[char] = &['"', '\'', ')', ']', '}', '\u{201d}', '\u{2019}', '\u{bb}'];

/// Split text into sentences.
///
/// Candidate boundaries come from Unicode sentence segmentation (UAX #29),
/// which already keeps decimals such as `3.5` together. A candidate is then
/// rejected, and the fragment joined with the next one, when:
///
/// - it does not end in terminal punctuation (headings, line breaks);
/// - it ends in a period after a known abbreviation or a capital initial
///   (`I` excluded, it is a pronoun);
/// - it ends in `?`, `!` or `…` (possibly quoted) and the next fragment
///   starts in lower case, as in `"Why?" he asked.`
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut pending: Option<usize> = None;
    let mut fragments = text.split_sentence_bound_indices().peekable();

    while let Some((offset, fragment)) = fragments.next() {
        let start = pending.unwrap_or(offset);
        let end = offset + fragment.len();
        if let Some((_, next)) = fragments.peek() {
            if continues_sentence(&text[start..end], next) {
                pending = Some(start);
                continue;
            }
        }
        pending = None;
        let sentence = text[start..end].trim();
        if !sentence.is_empty() {
            sentences.push(sentence);
        }
    }
    sentences
}

fn continues_sentence(fragment: &str, next: &str) -> bool {
    let trimmed = fragment.trim_end().trim_end_matches(CLOSERS);
    let Some(last) = trimmed.chars().last() else {
        return false;
    };
    match last {
        '.' => ends_in_abbreviation(trimmed),
        '!' | '?' | '\u{2026}' => next.trim_start().chars().next().is_some_and(char::is_lowercase),
        _ => true,
    }
}

fn ends_in_abbreviation(fragment: &str) -> bool {
    let word = fragment
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or_default()
        .trim_start_matches(|c: char| !c.is_alphanumeric())
        .trim_end_matches('.');
    let mut chars = word.chars();
    let is_initial = matches!((chars.next(), chars.next()), (Some(c), None) if c.is_uppercase() && c != 'I');
    is_initial || ABBREVIATIONS.contains(&word.to_lowercase().as_str())
}

/// Word tokens of a sentence: runs of Unicode word characters.
pub fn words(sentence: &str) -> impl Iterator<Item = &str> {
    WORD_RE.find_iter(sentence).map(|m| m.as_str())
}

/// A token that survived stop-word filtering, with its case-folded form.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub lowered: String,
}

/// Filtered tokens grouped by sentence, in document order.
///
/// Sentences left without any token after filtering are dropped, so
/// `sentences.len()` is the filtered sentence count.
#[derive(Debug, Clone, Default)]
pub struct FilteredText<'a> {
    pub sentences: Vec<Vec<Token<'a>>>,
}

impl<'a> FilteredText<'a> {
    pub fn new(text: &'a str, lexicon: &Lexicon) -> Self {
        let sentences = split_sentences(text)
            .into_iter()
            .map(|sentence| {
                words(sentence)
                    .map(|word| Token {
                        text: word,
                        lowered: word.to_lowercase(),
                    })
                    .filter(|token| !lexicon.is_stop_word(&token.lowered))
                    .collect::<Vec<_>>()
            })
            .filter(|tokens| !tokens.is_empty())
            .collect();
        Self { sentences }
    }

    pub fn tokens(&self) -> impl Iterator<Item = &Token<'a>> {
        self.sentences.iter().flatten()
    }

    pub fn token_count(&self) -> usize {
        self.sentences.iter().map(Vec::len).sum()
    }

    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_simple_sentences() {
        let sentences = split_sentences("This is good. This is bad! Is this good?");
        assert_eq!(sentences, vec!["This is good.", "This is bad!", "Is this good?"]);
    }

    #[test]
    fn test_abbreviations_and_initials_do_not_split() {
        let sentences = split_sentences("Mr. Smith met J. Doe in the U.S. Army. They talked.");
        assert_eq!(sentences, vec!["Mr. Smith met J. Doe in the U.S. Army.", "They talked."]);
    }

    #[test]
    fn test_decimals_do_not_split() {
        let sentences = split_sentences("Revenue grew 3.5 percent. Costs fell.");
        assert_eq!(sentences, vec!["Revenue grew 3.5 percent.", "Costs fell."]);
    }

    #[test]
    fn test_heading_lines_join_the_next_sentence() {
        let sentences = split_sentences("Title: Rising Costs\n\nContent:\nPrices rose. Wages did not.");
        assert_eq!(sentences.len(), 2);
        assert!(sentences[0].starts_with("Title: Rising Costs"));
        assert!(sentences[0].ends_with("Prices rose."));
    }

    #[test]
    fn test_unterminated_tail_is_kept() {
        assert_eq!(split_sentences("One. Two without a stop"), vec!["One.", "Two without a stop"]);
        assert!(split_sentences("   ").is_empty());
    }

    #[test]
    fn test_sentence_final_words_still_split() {
        assert_eq!(
            split_sentences("The answer is no. We left early."),
            vec!["The answer is no.", "We left early."]
        );
        assert_eq!(split_sentences("So do I. We agree."), vec!["So do I.", "We agree."]);
    }

    #[test]
    fn test_quoted_question_followed_by_lowercase_does_not_split() {
        assert_eq!(split_sentences("\"Why?\" he asked. Nobody knew."), vec!["\"Why?\" he asked.", "Nobody knew."]);
        assert_eq!(split_sentences("\"Stop!\" She ran."), vec!["\"Stop!\"", "She ran."]);
    }

    #[test]
    fn test_words_drop_punctuation() {
        let tokens: Vec<&str> = words("Hello, world -- it's 2024!").collect();
        assert_eq!(tokens, vec!["Hello", "world", "it", "s", "2024"]);
    }

    #[test]
    fn test_filtering_drops_emptied_sentences() {
        let lexicon = Lexicon::from_lists(&["it", "is", "so"], &[], &[]);
        let filtered = FilteredText::new("It is so. Markets rallied today. It is.", &lexicon);

        assert_eq!(filtered.sentence_count(), 1);
        assert_eq!(filtered.token_count(), 3);
        let texts: Vec<&str> = filtered.tokens().map(|t| t.text).collect();
        assert_eq!(texts, vec!["Markets", "rallied", "today"]);
    }

    #[test]
    fn test_stop_words_match_case_insensitively() {
        let lexicon = Lexicon::from_lists(&["The"], &[], &[]);
        let filtered = FilteredText::new("THE end. the End.", &lexicon);

        assert_eq!(filtered.token_count(), 2);
        assert!(filtered.tokens().all(|t| t.lowered == "end"));
    }
}
