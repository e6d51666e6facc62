//! Personal pronoun counting over the raw article text.

use once_cell::sync::Lazy;
use regex::Regex;

/// `I`, `we`, `ours`, `my`, `mine` in any case; `us` only with a lower-case
/// `s`, so the country abbreviation `US` is not counted.
static PRONOUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i:\b(?:i|we|ours|my|mine)\b)|\b[uU]s\b").unwrap());

/// Count whole-word personal pronouns in `text`.
///
/// Runs on the unfiltered text: most of these pronouns are stop words and
/// would otherwise never be seen.
pub fn count_personal_pronouns(text: &str) -> usize {
    PRONOUN_RE.find_iter(text).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_abbreviation_is_excluded() {
        assert_eq!(count_personal_pronouns("Us went to the US."), 1);
        assert_eq!(count_personal_pronouns("Give it to us, not the US"), 1);
    }

    #[test]
    fn test_other_pronouns_ignore_case() {
        assert_eq!(count_personal_pronouns("I think WE said My and mine and Ours."), 5);
        assert_eq!(count_personal_pronouns("i am"), 1);
    }

    #[test]
    fn test_whole_words_only() {
        assert_eq!(count_personal_pronouns("myth, mines, bus, weird, It"), 0);
        assert_eq!(count_personal_pronouns(""), 0);
    }
}
