//! Checking candidate word bags against the target digest.

use itertools::Itertools;
use md5::{Digest, Md5};
use rayon::prelude::*;

/// The hash the target token was produced with.
pub trait PhraseDigest: Sync {
    fn digest(&self, text: &str) -> String;
}

/// Lowercase hex MD5.
#[derive(Debug, Clone, Copy, Default)]
pub struct Md5Digest;

impl PhraseDigest for Md5Digest {
    fn digest(&self, text: &str) -> String {
        hex::encode(Md5::digest(text.as_bytes()))
    }
}

/// Tries every word order of a phrase against one target token.
pub struct Verifier<'d> {
    digest: &'d dyn PhraseDigest,
    target: String,
    parallel: bool,
}

impl<'d> Verifier<'d> {
    pub fn new(digest: &'d dyn PhraseDigest, target: &str) -> Self {
        Verifier {
            digest,
            target: target.trim().to_owned(),
            parallel: false,
        }
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn matches(&self, phrase: &str) -> bool {
        self.digest.digest(phrase).eq_ignore_ascii_case(&self.target)
    }

    /// Returns the first ordering of `words`, joined by single spaces, whose
    /// digest equals the target. Orderings are tried in lexicographic order
    /// of word positions; the parallel path reports the same one.
    pub fn verify(&self, words: &[&str]) -> Option<String> {
        let orderings = words
            .iter()
            .copied()
            .permutations(words.len())
            .map(|ordering| ordering.join(" "))
            .unique();

        if self.parallel {
            let orderings: Vec<String> = orderings.collect();
            orderings.into_par_iter().find_first(|phrase| self.matches(phrase))
        } else {
            orderings.into_iter().find(|phrase| self.matches(phrase))
        }
    }
}
