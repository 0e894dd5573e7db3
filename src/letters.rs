//! Sorted-letter keys ("alphagrams") and the letter arithmetic over them.

use std::cmp::Ordering;
use std::fmt;

/// A normalized (i.e., lowercased, alphabetic-only) and sorted run of letters.
///
/// Two words are anagrams of each other exactly when their keys are equal, so
/// equality and hashing go through the sorted form. Keys are never mutated;
/// `subtract` and `concat` build new ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LetterMultiset(Box<str>);

impl LetterMultiset {
    pub fn from_word(word: &str) -> Self {
        let mut bs: Vec<char> = vec![];

        // Take only the alphabetic characters
        for c in word.chars() {
            if c.is_alphabetic() {
                bs.extend(c.to_lowercase());
            }
        }

        bs.sort_unstable();
        LetterMultiset(bs.into_iter().collect::<String>().into_boxed_str())
    }

    /// Removes one occurrence of each of `other`'s letters from `self`.
    ///
    /// Returns `None` when `other` is not a sub-multiset of `self`; the caller
    /// must treat that as "this combination is impossible", never as empty.
    pub fn subtract(&self, other: &LetterMultiset) -> Option<LetterMultiset> {
        let mut result = String::with_capacity(self.0.len());

        let mut other_chars = other.0.chars().peekable();
        for c in self.0.chars() {
            if other_chars.peek() == Some(&c) {
                other_chars.next();
            } else {
                result.push(c);
            }
        }

        if other_chars.peek().is_none() {
            return Some(LetterMultiset(result.into_boxed_str()));
        }
        None
    }

    /// The multiset sum of both keys.
    pub fn concat(&self, other: &LetterMultiset) -> LetterMultiset {
        let mut result = String::with_capacity(self.0.len() + other.0.len());

        let mut left = self.0.chars().peekable();
        let mut right = other.0.chars().peekable();
        loop {
            let next = match (left.peek(), right.peek()) {
                (Some(l), Some(r)) if l <= r => left.next(),
                (Some(_), Some(_)) => right.next(),
                (Some(_), None) => left.next(),
                (None, Some(_)) => right.next(),
                (None, None) => break,
            };
            result.extend(next);
        }

        LetterMultiset(result.into_boxed_str())
    }

    pub fn same_letters(&self, other: &LetterMultiset) -> bool {
        self == other
    }

    /// Total letter count.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Ord for LetterMultiset {
    fn cmp(&self, other: &Self) -> Ordering {
        self.len()
            .cmp(&other.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for LetterMultiset {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for LetterMultiset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> LetterMultiset {
        LetterMultiset::from_word(s)
    }

    #[test]
    fn from_word_sorts_lowercases_and_strips() {
        assert_eq!(key("Poultry outwits ants!").as_str(), "ailnooprssttttuuwy");
        assert_eq!(key("Poultry outwits ants!").len(), 18);
        assert_eq!(key("don't").as_str(), "dnot");
        assert_eq!(key("").as_str(), "");
    }

    #[test]
    fn shuffled_words_share_a_key() {
        assert_eq!(key("listen"), key("silent"));
        assert_eq!(key("listen"), key("TINSEL"));
        assert_eq!(key("stop"), key("pots"));
        assert_ne!(key("stop"), key("stoop"));
    }

    #[test]
    fn subtract_removes_one_occurrence_per_letter() {
        assert_eq!(key("banana").subtract(&key("nab")), Some(key("naa")));
        assert_eq!(key("aab").subtract(&key("b")), Some(key("aa")));
        assert_eq!(key("abc").subtract(&key("abc")), Some(key("")));
    }

    #[test]
    fn subtract_rejects_missing_or_excess_letters() {
        assert_eq!(key("ab").subtract(&key("c")), None);
        assert_eq!(key("b").subtract(&key("ab")), None);
        assert_eq!(key("ab").subtract(&key("aab")), None);
        assert_eq!(key("").subtract(&key("a")), None);
    }

    #[test]
    fn subtract_then_concat_restores_the_minuend() {
        let target = key("poultry outwits ants");
        for part in ["outlaws", "turnip", "toy", "stout", "pointy", "printout"] {
            let part = key(part);
            let rest = target.subtract(&part).unwrap();
            assert_eq!(part.concat(&rest), target);
            assert_eq!(rest.concat(&part), target);
        }
    }

    #[test]
    fn ordering_is_by_size_then_letters() {
        let mut keys = vec![key("zz"), key("abc"), key("b"), key("ab")];
        keys.sort();
        let sorted: Vec<&str> = keys.iter().map(LetterMultiset::as_str).collect();
        assert_eq!(sorted, vec!["b", "ab", "zz", "abc"]);
    }
}
