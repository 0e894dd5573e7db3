//! The incremental decomposition search.
//!
//! Words are fed one at a time. Each new word either joins an existing
//! alphagram, completes the target together with a node already indexed
//! (a *candidate*), or is combined with every indexed node that still fits
//! inside the target's remaining letters. After every length bucket the
//! candidates found so far are expanded into phrases and checked against
//! the digest.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use log::{debug, info, log_enabled, trace, Level};

use crate::config::{CandidateDedup, SearchConfig};
use crate::dictionary::{LetterLimits, WordSource};
use crate::error::{MergeError, SolveError};
use crate::index::DecompositionIndex;
use crate::letters::LetterMultiset;
use crate::node::{AlphagramNode, Fingerprint, NodeId};
use crate::verify::{Md5Digest, PhraseDigest, Verifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchStats {
    /// Keys registered in the index.
    pub nodes: usize,
    pub candidates: usize,
    /// Candidates whose phrases have been checked.
    pub verified: usize,
}

pub struct SearchEngine {
    target: LetterMultiset,
    config: SearchConfig,
    index: DecompositionIndex,
    candidates: Vec<NodeId>,
    seen: HashSet<Fingerprint>,
    verified: usize,
}

impl SearchEngine {
    pub fn new(phrase: &str, config: SearchConfig) -> Self {
        SearchEngine {
            target: LetterMultiset::from_word(phrase),
            config,
            index: DecompositionIndex::new(),
            candidates: vec![],
            seen: HashSet::new(),
            verified: 0,
        }
    }

    pub fn target(&self) -> &LetterMultiset {
        &self.target
    }

    pub fn index(&self) -> &DecompositionIndex {
        &self.index
    }

    /// Candidates in discovery order.
    pub fn candidates(&self) -> impl Iterator<Item = &AlphagramNode> + '_ {
        self.candidates.iter().map(move |&id| self.index.node(id))
    }

    pub fn stats(&self) -> SearchStats {
        SearchStats {
            nodes: self.index.len(),
            candidates: self.candidates.len(),
            verified: self.verified,
        }
    }

    pub fn add_word(&mut self, word: &str) -> Result<(), MergeError> {
        // Phrases are split on spaces, so an entry must be a single token.
        let word_key = LetterMultiset::from_word(word);
        if word_key.is_empty() || word.contains(char::is_whitespace) {
            return Ok(());
        }

        if let Some(existing) = self.index.lookup(&word_key) {
            self.index.node_mut(existing).add_word(word);
            return Ok(());
        }

        // A letter the target lacks, or too many of one.
        let complement = match self.target.subtract(&word_key) {
            Some(complement) => complement,
            None => return Ok(()),
        };

        let word_node = self.index.alloc_detached(AlphagramNode::for_word(word));

        if let Some(rest) = self.index.lookup(&complement) {
            let candidate = self
                .index
                .node(word_node)
                .sum_with(word_node, self.index.node(rest), rest);
            let candidate = self.index.alloc_detached(candidate);
            self.candidates.push(candidate);
            return Ok(());
        }

        // The snapshot is taken before anything derived from this word is
        // inserted, so the word never combines with its own sums.
        for sub in self.index.each_node() {
            if complement.subtract(self.index.node(sub).key()).is_none() {
                continue;
            }
            let combined = self
                .index
                .node(sub)
                .sum_with(sub, self.index.node(word_node), word_node);
            self.index.insert_or_merge(combined)?;
        }

        self.index.adopt(word_node)?;
        Ok(())
    }

    /// Expands candidates and checks their phrases. With structural dedup a
    /// candidate is skipped while its fingerprint is unchanged; otherwise
    /// every candidate is expanded on every call, since its children may
    /// have grown since the last one.
    pub fn find_and_verify(&mut self, verifier: &Verifier<'_>) -> Option<String> {
        let pending = self.candidates.clone();

        let mut fingerprints: HashMap<NodeId, Fingerprint> = HashMap::new();
        for id in pending {
            if self.config.dedup == CandidateDedup::Structural {
                let fingerprint = self.index.arena().fingerprint_of(id, &mut fingerprints);
                if !self.seen.insert(fingerprint) {
                    trace!("skipping candidate {} ({})", id, fingerprint);
                    continue;
                }
            }
            self.verified += 1;

            let candidate = self.index.node(id);
            if log_enabled!(Level::Trace) {
                trace!(
                    "candidate {}: {} words, {} combinations",
                    id,
                    candidate.word_count(self.index.arena()),
                    candidate.combination_count(self.index.arena())
                );
            }

            let phrases = candidate.enumerate_phrases(self.index.arena());
            let mut bags: HashSet<Vec<&str>> = HashSet::new();
            for phrase in &phrases {
                let words: Vec<&str> = phrase.split(' ').collect();
                let mut bag = words.clone();
                bag.sort_unstable();
                if !bags.insert(bag) {
                    continue;
                }
                if let Some(found) = verifier.verify(&words) {
                    return Some(found);
                }
            }
        }

        None
    }

    /// Feeds `dictionary` bucket by bucket, verifying after each one, and
    /// stops at the first match.
    pub fn search(
        &mut self,
        dictionary: &WordSource,
        verifier: &Verifier<'_>,
    ) -> Result<Option<String>, MergeError> {
        for (letters, words) in dictionary.buckets(self.config.bucket_order) {
            info!("adding {} words of {} letters", words.len(), letters);
            for word in words {
                self.add_word(word)?;
            }

            let stats = self.stats();
            debug!(
                "{} alphagrams indexed, {} candidates ({} verified)",
                stats.nodes, stats.candidates, stats.verified
            );

            if let Some(found) = self.find_and_verify(verifier) {
                info!("match found after verifying {} candidates", self.verified);
                return Ok(Some(found));
            }
        }

        info!("dictionary exhausted after {} candidates", self.candidates.len());
        Ok(None)
    }
}

/// Finds an anagram of `phrase` drawn from `dictionary` whose MD5 is
/// `target_digest`. `Ok(None)` means no such anagram exists in the list.
pub fn solve(
    phrase: &str,
    target_digest: &str,
    dictionary: &WordSource,
) -> Result<Option<String>, SolveError> {
    solve_with(phrase, target_digest, dictionary, &SearchConfig::default(), &Md5Digest)
}

pub fn solve_with(
    phrase: &str,
    target_digest: &str,
    dictionary: &WordSource,
    config: &SearchConfig,
    digest: &dyn PhraseDigest,
) -> Result<Option<String>, SolveError> {
    let verifier = Verifier::new(digest, target_digest).parallel(config.parallel_verify);
    let mut engine = SearchEngine::new(phrase, config.clone());
    info!(
        "searching {} words for anagrams of `{}` ({} letters)",
        dictionary.len(),
        engine.target(),
        engine.target().len()
    );
    Ok(engine.search(dictionary, &verifier)?)
}

/// [`solve_with`] over a word list read from `path`.
pub fn solve_from_path<P: AsRef<Path>>(
    phrase: &str,
    target_digest: &str,
    path: P,
    limits: LetterLimits,
    config: &SearchConfig,
) -> Result<Option<String>, SolveError> {
    let dictionary = WordSource::from_path(path, limits)?;
    solve_with(phrase, target_digest, &dictionary, config, &Md5Digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(phrase: &str, words: &[&str]) -> SearchEngine {
        engine_with(phrase, words, SearchConfig::default())
    }

    fn engine_with(phrase: &str, words: &[&str], config: SearchConfig) -> SearchEngine {
        let mut engine = SearchEngine::new(phrase, config);
        for word in words {
            engine.add_word(word).unwrap();
        }
        engine
    }

    fn phrases(engine: &SearchEngine) -> Vec<String> {
        engine
            .candidates()
            .flat_map(|c| c.enumerate_phrases(engine.index().arena()))
            .collect()
    }

    #[test]
    fn anagram_words_share_one_node() {
        let engine = engine("stop toy", &["stop", "pots", "spot"]);
        let key = LetterMultiset::from_word("stop");

        assert_eq!(engine.index().len(), 1);
        let id = engine.index().lookup(&key).unwrap();
        assert_eq!(
            engine.index().node(id).words().collect::<Vec<_>>(),
            vec!["pots", "spot", "stop"]
        );
    }

    #[test]
    fn words_outside_the_target_are_discarded() {
        let engine = engine("stop toy", &["zoo", "pops", "yummy", "toy"]);
        assert_eq!(engine.index().len(), 1);
        assert_eq!(engine.stats().candidates, 0);
    }

    #[test]
    fn completing_word_yields_a_candidate() {
        let engine = engine("stop toy", &["stop", "pots", "toy"]);

        assert_eq!(engine.stats().candidates, 1);
        for candidate in engine.candidates() {
            assert_eq!(candidate.key(), engine.target());
        }
        assert_eq!(phrases(&engine), vec!["pots toy", "stop toy"]);
    }

    #[test]
    fn partial_sums_are_indexed_but_never_the_target() {
        let engine = engine("an toy stout", &["an", "toy", "stout"]);

        // an, toy, an+toy
        assert_eq!(engine.index().len(), 3);
        assert!(engine.index().lookup(engine.target()).is_none());
        assert_eq!(phrases(&engine), vec!["an toy stout"]);
    }

    #[test]
    fn word_does_not_combine_with_its_own_sums() {
        // "ab" fits three times, so ab+cd would itself fit into ab's
        // complement; it must not be combined with ab again in the same pass.
        let engine = engine("cd ab ab ab", &["cd", "ab"]);
        let arena = engine.index().arena();

        assert_eq!(engine.index().len(), 3);
        let abcd = engine.index().lookup(&LetterMultiset::from_word("abcd")).unwrap();
        assert_eq!(engine.index().node(abcd).combinations().count(), 1);
        assert_eq!(engine.index().lookup(&LetterMultiset::from_word("aabbcd")), None);
        assert_eq!(
            engine.index().node(abcd).enumerate_phrases(arena).into_iter().collect::<Vec<_>>(),
            vec!["cd ab"]
        );
    }

    #[test]
    fn every_candidate_phrase_spells_the_target() {
        let engine = engine(
            "poultry outwits ants",
            &["printout", "outlaws", "pointy", "turnip", "stout", "yawls", "toy", "wits", "snout"],
        );

        assert!(engine.stats().candidates > 0);
        for candidate in engine.candidates() {
            assert_eq!(candidate.key(), engine.target());
        }
        for phrase in phrases(&engine) {
            assert_eq!(&LetterMultiset::from_word(&phrase), engine.target());
        }
    }

    #[test]
    fn find_and_verify_returns_the_matching_order() {
        let mut engine = engine("an toy stout", &["an", "toy", "stout"]);
        let token = Md5Digest.digest("stout an toy");
        let verifier = Verifier::new(&Md5Digest, &token);

        assert_eq!(engine.find_and_verify(&verifier), Some("stout an toy".to_owned()));
    }

    #[test]
    fn structural_dedup_rechecks_grown_candidates() {
        let mut engine = engine("an toy stout", &["an", "toy", "stout"]);
        let verifier = Verifier::new(&Md5Digest, "00000000000000000000000000000000");

        assert_eq!(engine.find_and_verify(&verifier), None);
        assert_eq!(engine.find_and_verify(&verifier), None);
        assert_eq!(engine.stats().verified, 1);

        engine.add_word("na").unwrap();
        assert_eq!(engine.find_and_verify(&verifier), None);
        assert_eq!(engine.stats().verified, 2);
    }

    #[test]
    fn dedup_off_rechecks_every_candidate() {
        let config = SearchConfig {
            dedup: CandidateDedup::Off,
            ..SearchConfig::default()
        };
        let mut engine = engine_with("an toy stout", &["an", "toy", "stout"], config);
        let verifier = Verifier::new(&Md5Digest, "00000000000000000000000000000000");

        assert_eq!(engine.find_and_verify(&verifier), None);
        assert_eq!(engine.find_and_verify(&verifier), None);
        assert_eq!(engine.stats().verified, 2);
    }

    #[test]
    fn dedup_policies_agree_after_a_complement_grows() {
        // "ef" completes the target against "abcd" before "a" arrives; "a"
        // then merges a bcd+a pair into that same complement node.
        let token = Md5Digest.digest("a bcd ef");
        let mut results = vec![];
        for dedup in [CandidateDedup::Structural, CandidateDedup::Off] {
            let config = SearchConfig {
                dedup,
                ..SearchConfig::default()
            };
            let mut engine = SearchEngine::new("a bcd ef", config);
            let verifier = Verifier::new(&Md5Digest, &token);
            let mut found = None;
            for word in ["abcd", "bcd", "ef", "a"] {
                engine.add_word(word).unwrap();
                found = engine.find_and_verify(&verifier);
                if found.is_some() {
                    break;
                }
            }
            results.push(found);
        }

        assert_eq!(results[0].as_deref(), Some("a bcd ef"));
        assert_eq!(results[0], results[1]);
    }

    #[test]
    fn entries_with_inner_whitespace_are_ignored() {
        let engine = engine("ice cream an", &["ice cream", "an"]);
        assert_eq!(engine.index().len(), 1);
        assert!(engine.index().lookup(&LetterMultiset::from_word("icecream")).is_none());
    }
}
