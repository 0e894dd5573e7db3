//! Loading and cleaning word lists into length buckets.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use crate::config::BucketOrder;
use crate::error::DictionaryError;
use crate::letters::LetterMultiset;

/// Inclusive bounds on the number of letters per word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LetterLimits {
    pub min: usize,
    pub max: usize,
}

impl LetterLimits {
    pub fn admits(&self, letters: usize) -> bool {
        letters >= self.min && letters <= self.max
    }
}

impl Default for LetterLimits {
    fn default() -> Self {
        LetterLimits {
            min: 0,
            max: usize::MAX,
        }
    }
}

const VOWELISH: &[char] = &['a', 'e', 'i', 'o', 'u', 'y'];

/// Trims a raw line and strips a possessive suffix. Returns `None` for
/// blank lines, multi-word entries and words without a vowel-ish letter.
/// Case is left alone; [`WordSource`] lowercases what it keeps.
pub fn clean_word(line: &str) -> Option<&str> {
    let mut word = line.trim();
    for suffix in ["'s", "'S", "\u{2019}s", "\u{2019}S"] {
        if let Some(stripped) = word.strip_suffix(suffix) {
            word = stripped;
            break;
        }
    }

    if word.is_empty() || word.contains(char::is_whitespace) {
        return None;
    }
    if !word.chars().any(|c| VOWELISH.contains(&c.to_ascii_lowercase())) {
        return None;
    }
    Some(word)
}

/// A cleaned, lowercased word list, bucketed by letter count. Words keep
/// their list order inside a bucket. Digests are taken over these lowercase
/// forms, so target tokens must be hashed from lowercase phrases too.
#[derive(Debug, Clone, Default)]
pub struct WordSource {
    buckets: BTreeMap<usize, Vec<Box<str>>>,
    first_seen: Vec<usize>,
    len: usize,
}

impl WordSource {
    pub fn from_path<P: AsRef<Path>>(path: P, limits: LetterLimits) -> Result<Self, DictionaryError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| DictionaryError::Io {
            path: path.to_owned(),
            source,
        })?;

        Ok(WordSource::from_words(contents.lines(), limits))
    }

    pub fn from_words<I, S>(lines: I, limits: LetterLimits) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut source = WordSource::default();
        let mut seen: HashSet<Box<str>> = HashSet::new();

        for line in lines {
            let word = match clean_word(line.as_ref()) {
                Some(word) => word.to_lowercase(),
                None => continue,
            };

            let letters = LetterMultiset::from_word(&word).len();
            if letters == 0 || !limits.admits(letters) {
                continue;
            }
            if !seen.insert(word.as_str().into()) {
                continue;
            }

            let bucket = source.buckets.entry(letters).or_insert_with(|| {
                source.first_seen.push(letters);
                vec![]
            });
            bucket.push(word.into_boxed_str());
            source.len += 1;
        }

        source
    }

    /// `(letter count, words)` pairs in the requested order.
    pub fn buckets(&self, order: BucketOrder) -> Vec<(usize, &[Box<str>])> {
        let sizes: Vec<usize> = match order {
            BucketOrder::LongestFirst => self.buckets.keys().rev().copied().collect(),
            BucketOrder::ShortestFirst => self.buckets.keys().copied().collect(),
            BucketOrder::AsLoaded => self.first_seen.clone(),
        };

        sizes
            .into_iter()
            .filter_map(|size| self.buckets.get(&size).map(|words| (size, words.as_slice())))
            .collect()
    }

    /// Number of distinct cleaned words.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
