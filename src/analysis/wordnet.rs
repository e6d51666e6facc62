//! Minimal reader for the WordNet 3.x database (`dict/` directory).
//!
//! Only what complex-word detection needs is loaded: for every lemma of each
//! part of speech, the number of lemma names in its first synset, plus the
//! morphological exception lists. Lookups follow WordNet's `morphy`: the word
//! itself, then its exception base forms or its suffix-detached forms, keeping
//! only forms present in the index.

use super::complexity::WordComplexity;
use crate::error::WordNetError;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Parts of speech in WordNet's lookup order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
}

impl PartOfSpeech {
    pub const ALL: [PartOfSpeech; 4] = [
        PartOfSpeech::Noun,
        PartOfSpeech::Verb,
        PartOfSpeech::Adjective,
        PartOfSpeech::Adverb,
    ];

    fn file_stem(self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "noun",
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Adjective => "adj",
            PartOfSpeech::Adverb => "adv",
        }
    }

    /// Suffix detachment rules as `(inflected ending, base ending)`.
    fn substitutions(self) -> &'static [(&'static str, &'static str)] {
        match self {
            PartOfSpeech::Noun => &[
                ("s", ""),
                ("ses", "s"),
                ("ves", "f"),
                ("xes", "x"),
                ("zes", "z"),
                ("ches", "ch"),
                ("shes", "sh"),
                ("men", "man"),
                ("ies", "y"),
            ],
            PartOfSpeech::Verb => &[
                ("s", ""),
                ("ies", "y"),
                ("es", "e"),
                ("es", ""),
                ("ed", "e"),
                ("ed", ""),
                ("ing", "e"),
                ("ing", ""),
            ],
            PartOfSpeech::Adjective => &[("er", ""), ("est", ""), ("er", "e"), ("est", "e")],
            PartOfSpeech::Adverb => &[],
        }
    }
}

#[derive(Debug, Default)]
struct PosIndex {
    /// Lemma -> lemma-name count of its first synset.
    first_sense_names: HashMap<String, usize>,
    /// Inflected form -> base forms.
    exceptions: HashMap<String, Vec<String>>,
}

impl PosIndex {
    fn morphy(&self, form: &str, pos: PartOfSpeech) -> Vec<String> {
        let candidates: Vec<String> = match self.exceptions.get(form) {
            Some(bases) => std::iter::once(form.to_string()).chain(bases.iter().cloned()).collect(),
            None => std::iter::once(form.to_string())
                .chain(
                    pos.substitutions()
                        .iter()
                        .filter_map(|(old, new)| form.strip_suffix(old).map(|stem| format!("{stem}{new}"))),
                )
                .collect(),
        };

        let mut seen = HashSet::new();
        candidates
            .into_iter()
            .filter(|c| self.first_sense_names.contains_key(c) && seen.insert(c.clone()))
            .collect()
    }
}

/// In-memory WordNet index sufficient for first-sense synonym counts.
#[derive(Debug, Default)]
pub struct WordNet {
    indexes: Vec<(PartOfSpeech, PosIndex)>,
}

impl WordNet {
    /// Load `index.*`, `data.*` and (when present) `*.exc` from a WordNet `dict` directory.
    #[instrument(level = "info", skip_all, fields(dir = %dir.display()))]
    pub fn open(dir: &Path) -> Result<Self, WordNetError> {
        let mut indexes = Vec::with_capacity(PartOfSpeech::ALL.len());
        for pos in PartOfSpeech::ALL {
            let stem = pos.file_stem();
            let names_by_offset = parse_data(&dir.join(format!("data.{stem}")))?;
            let first_sense_names = parse_index(&dir.join(format!("index.{stem}")), &names_by_offset)?;
            let exc_path = dir.join(format!("{stem}.exc"));
            let exceptions = if exc_path.exists() {
                parse_exceptions(&exc_path)?
            } else {
                HashMap::new()
            };
            info!(pos = stem, lemmas = first_sense_names.len(), exceptions = exceptions.len(), "Loaded WordNet index");
            indexes.push((
                pos,
                PosIndex {
                    first_sense_names,
                    exceptions,
                },
            ));
        }
        Ok(Self { indexes })
    }

    /// Number of lemma names in the first synset WordNet returns for `word`.
    pub fn first_sense_lemma_count(&self, word: &str) -> Option<usize> {
        let lowered = word.to_lowercase();
        self.indexes.iter().find_map(|(pos, index)| {
            index
                .morphy(&lowered, *pos)
                .first()
                .and_then(|form| index.first_sense_names.get(form).copied())
        })
    }

    #[cfg(test)]
    fn from_parts(parts: Vec<(PartOfSpeech, Vec<(&str, usize)>, Vec<(&str, &[&str])>)>) -> Self {
        let indexes = parts
            .into_iter()
            .map(|(pos, lemmas, exceptions)| {
                let index = PosIndex {
                    first_sense_names: lemmas.into_iter().map(|(l, n)| (l.to_string(), n)).collect(),
                    exceptions: exceptions
                        .into_iter()
                        .map(|(form, bases)| (form.to_string(), bases.iter().map(|b| b.to_string()).collect()))
                        .collect(),
                };
                (pos, index)
            })
            .collect();
        Self { indexes }
    }
}

impl WordComplexity for WordNet {
    fn is_complex(&self, word: &str) -> bool {
        self.first_sense_lemma_count(word).is_some_and(|n| n > 2)
    }
}

fn read(path: &Path) -> Result<String, WordNetError> {
    fs::read_to_string(path).map_err(|source| WordNetError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn malformed(path: &Path, line: usize) -> WordNetError {
    WordNetError::Malformed {
        path: PathBuf::from(path),
        line: line + 1,
    }
}

/// Lines starting with whitespace are the license header.
fn content_lines(raw: &str) -> impl Iterator<Item = (usize, &str)> {
    raw.lines()
        .enumerate()
        .filter(|(_, line)| !line.is_empty() && !line.starts_with(' '))
}

/// `synset_offset lex_filenum ss_type w_cnt word lex_id ...`, `w_cnt` in hex.
fn parse_data(path: &Path) -> Result<HashMap<u64, usize>, WordNetError> {
    let raw = read(path)?;
    let mut names = HashMap::new();
    for (n, line) in content_lines(&raw) {
        let mut fields = line.split_whitespace();
        let offset = fields.next().and_then(|f| f.parse::<u64>().ok());
        let w_cnt = fields
            .nth(2)
            .and_then(|f| usize::from_str_radix(f, 16).ok());
        match (offset, w_cnt) {
            (Some(offset), Some(w_cnt)) => {
                names.insert(offset, w_cnt);
            }
            _ => return Err(malformed(path, n)),
        }
    }
    Ok(names)
}

/// `lemma pos synset_cnt p_cnt [ptr_symbol...] sense_cnt tagsense_cnt synset_offset...`
fn parse_index(path: &Path, names_by_offset: &HashMap<u64, usize>) -> Result<HashMap<String, usize>, WordNetError> {
    let raw = read(path)?;
    let mut first_sense = HashMap::new();
    for (n, line) in content_lines(&raw) {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let p_cnt = fields
            .get(3)
            .and_then(|f| f.parse::<usize>().ok())
            .ok_or_else(|| malformed(path, n))?;
        let first_offset = fields
            .get(4 + p_cnt + 2)
            .and_then(|f| f.parse::<u64>().ok())
            .ok_or_else(|| malformed(path, n))?;
        let count = names_by_offset
            .get(&first_offset)
            .copied()
            .ok_or_else(|| malformed(path, n))?;
        first_sense.insert(fields[0].to_string(), count);
    }
    Ok(first_sense)
}

/// `inflected base [base...]`
fn parse_exceptions(path: &Path) -> Result<HashMap<String, Vec<String>>, WordNetError> {
    let raw = read(path)?;
    let mut exceptions = HashMap::new();
    for (n, line) in content_lines(&raw) {
        let mut fields = line.split_whitespace();
        let form = fields.next().ok_or_else(|| malformed(path, n))?;
        exceptions.insert(form.to_string(), fields.map(str::to_string).collect());
    }
    Ok(exceptions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> WordNet {
        WordNet::from_parts(vec![
            (
                PartOfSpeech::Noun,
                vec![("dog", 3), ("market", 2), ("box", 1), ("child", 1)],
                vec![("children", &["child"][..])],
            ),
            (PartOfSpeech::Verb, vec![("run", 5), ("market", 4)], vec![("ran", &["run"][..])]),
            (PartOfSpeech::Adjective, vec![("big", 4)], vec![]),
            (PartOfSpeech::Adverb, vec![], vec![]),
        ])
    }

    #[test]
    fn test_first_sense_prefers_nouns() {
        let wn = sample();
        assert_eq!(wn.first_sense_lemma_count("market"), Some(2));
        assert!(!wn.is_complex("market"));
        assert!(wn.is_complex("Dog"));
    }

    #[test]
    fn test_morphological_forms() {
        let wn = sample();
        assert_eq!(wn.first_sense_lemma_count("dogs"), Some(3));
        assert_eq!(wn.first_sense_lemma_count("boxes"), Some(1));
        assert_eq!(wn.first_sense_lemma_count("children"), Some(1));
        assert_eq!(wn.first_sense_lemma_count("running"), None);
        assert_eq!(wn.first_sense_lemma_count("ran"), Some(5));
        assert_eq!(wn.first_sense_lemma_count("bigger"), None);
    }

    #[test]
    fn test_unknown_word_is_not_complex() {
        let wn = sample();
        assert_eq!(wn.first_sense_lemma_count("xyzzy"), None);
        assert!(!wn.is_complex("xyzzy"));
    }

    #[test]
    fn test_open_dict_directory() {
        let dir = TempDir::new().unwrap();
        let license = "  1 This software and database is being provided to you\n";
        fs::write(
            dir.path().join("data.noun"),
            format!(
                "{license}00001740 03 n 01 entity 0 003 ~ 00001930 n 0000 | that which exists\n\
                 00002137 03 n 03 abstraction 0 abstract_entity 0 abstractedness 0 000 | a general concept\n"
            ),
        )
        .unwrap();
        fs::write(
            dir.path().join("index.noun"),
            format!("{license}abstraction n 1 1 @ 1 0 00002137\nentity n 1 1 ~ 1 0 00001740\n"),
        )
        .unwrap();
        fs::write(dir.path().join("noun.exc"), "abstractions abstraction\n").unwrap();
        for stem in ["verb", "adj", "adv"] {
            fs::write(dir.path().join(format!("data.{stem}")), license).unwrap();
            fs::write(dir.path().join(format!("index.{stem}")), license).unwrap();
        }

        let wn = WordNet::open(dir.path()).unwrap();

        assert_eq!(wn.first_sense_lemma_count("entity"), Some(1));
        assert_eq!(wn.first_sense_lemma_count("Abstractions"), Some(3));
        assert!(wn.is_complex("abstraction"));
    }

    #[test]
    fn test_open_missing_directory() {
        let err = WordNet::open(Path::new("/no/such/wordnet")).unwrap_err();
        assert!(matches!(err, WordNetError::Read { .. }));
    }
}
