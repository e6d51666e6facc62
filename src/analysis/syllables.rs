//! Syllable estimate used for the syllables-per-word metric.

/// Count the vowels of `word`, ignoring the vowel that opens a final `e`,
/// `es` or `ed` suffix. Case-insensitive.
///
/// This is a rough English heuristic, not a phonetic count: every vowel
/// letter counts on its own, so `"book"` counts 2 and `"code"` counts 1.
pub fn count_syllables(word: &str) -> usize {
    let lowered = word.to_lowercase();
    lowered
        .char_indices()
        .filter(|&(i, c)| {
            matches!(c, 'a' | 'e' | 'i' | 'o' | 'u') && !matches!(&lowered[i..], "e" | "es" | "ed")
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_e_is_silent() {
        assert_eq!(count_syllables("code"), 1);
        assert_eq!(count_syllables("CODE"), 1);
        assert_eq!(count_syllables("the"), 0);
    }

    #[test]
    fn test_es_and_ed_suffixes() {
        assert_eq!(count_syllables("codes"), 1);
        assert_eq!(count_syllables("coded"), 1);
        assert_eq!(count_syllables("Rated"), 1);
    }

    #[test]
    fn test_every_vowel_counts() {
        assert_eq!(count_syllables("book"), 2);
        assert_eq!(count_syllables("analysis"), 3);
        assert_eq!(count_syllables("beautiful"), 5);
        assert_eq!(count_syllables("rhythm"), 0);
    }

    #[test]
    fn test_non_final_e_counts() {
        assert_eq!(count_syllables("eel"), 2);
        assert_eq!(count_syllables("needed"), 2);
        assert_eq!(count_syllables("2024"), 0);
    }
}
