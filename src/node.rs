//! Alphagram nodes and the arena that owns them.
//!
//! A node is keyed by a [`LetterMultiset`] and records two things: the
//! dictionary words spelled by exactly those letters, and the pairs of
//! smaller nodes whose keys add up to it. Pairs hold [`NodeId`] handles into
//! the [`NodeArena`] rather than owning their children, because one child is
//! shared by many parents.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::ops::{Index, IndexMut};
use std::rc::Rc;

use sha2::{Digest, Sha256};

use crate::error::MergeError;
use crate::letters::LetterMultiset;

/// Stable handle of a node inside a [`NodeArena`]. Ordered by allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Unordered pair of child handles, stored smallest first.
pub type Combination = (NodeId, NodeId);

fn combination(a: NodeId, b: NodeId) -> Combination {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlphagramNode {
    key: LetterMultiset,
    words: BTreeSet<Box<str>>,
    combinations: BTreeSet<Combination>,
}

impl AlphagramNode {
    /// An empty node: no words, no combinations.
    pub fn new(key: LetterMultiset) -> Self {
        AlphagramNode {
            key,
            words: BTreeSet::new(),
            combinations: BTreeSet::new(),
        }
    }

    pub fn for_word(word: &str) -> Self {
        let mut node = AlphagramNode::new(LetterMultiset::from_word(word));
        node.add_word(word);
        node
    }

    pub fn key(&self) -> &LetterMultiset {
        &self.key
    }

    pub fn words(&self) -> impl Iterator<Item = &str> + '_ {
        self.words.iter().map(|w| &**w)
    }

    pub fn combinations(&self) -> impl Iterator<Item = Combination> + '_ {
        self.combinations.iter().copied()
    }

    /// Returns `false` if the word was already present.
    pub fn add_word(&mut self, word: &str) -> bool {
        debug_assert_eq!(LetterMultiset::from_word(word), self.key);
        self.words.insert(word.into())
    }

    /// Folds `other` into `self`. Both must carry the same key.
    pub fn merge(&mut self, other: AlphagramNode) -> Result<(), MergeError> {
        if !self.key.same_letters(&other.key) {
            return Err(MergeError::IncompatibleMerge {
                left: self.key.clone(),
                right: other.key,
            });
        }

        self.words.extend(other.words);
        self.combinations.extend(other.combinations);
        Ok(())
    }

    /// A composite node for `self + other`, carrying no words of its own.
    pub fn sum_with(&self, id: NodeId, other: &AlphagramNode, other_id: NodeId) -> AlphagramNode {
        let mut node = AlphagramNode::new(self.key.concat(&other.key));
        node.combinations.insert(combination(id, other_id));
        node
    }

    /// Every space-separated phrase this node spells.
    ///
    /// That is the node's own words, plus, for every combination pair, each
    /// phrase of the left child followed by each phrase of the right child.
    /// Children always have strictly fewer letters than their parent, so the
    /// recursion bottoms out at word-only nodes.
    pub fn enumerate_phrases(&self, arena: &NodeArena) -> BTreeSet<String> {
        let mut memo = HashMap::new();
        self.phrases(arena, &mut memo)
    }

    fn phrases(
        &self,
        arena: &NodeArena,
        memo: &mut HashMap<NodeId, Rc<BTreeSet<String>>>,
    ) -> BTreeSet<String> {
        let mut phrases: BTreeSet<String> = self.words().map(str::to_owned).collect();

        for (a, b) in self.combinations() {
            let left = arena.phrases_of(a, memo);
            let right = arena.phrases_of(b, memo);
            for first in left.iter() {
                for second in right.iter() {
                    phrases.insert(format!("{} {}", first, second));
                }
            }
        }

        phrases
    }

    /// Words reachable through this node, counted once per path.
    pub fn word_count(&self, arena: &NodeArena) -> usize {
        let mut memo = HashMap::new();
        self.count(arena, &mut memo, &|node: &AlphagramNode| node.words.len())
    }

    /// Combination pairs reachable through this node, counted once per path.
    pub fn combination_count(&self, arena: &NodeArena) -> usize {
        let mut memo = HashMap::new();
        self.count(arena, &mut memo, &|node: &AlphagramNode| node.combinations.len())
    }

    fn count(
        &self,
        arena: &NodeArena,
        memo: &mut HashMap<NodeId, usize>,
        own: &dyn Fn(&AlphagramNode) -> usize,
    ) -> usize {
        let mut total = own(self);
        for (a, b) in self.combinations() {
            for child in [a, b] {
                let n = match memo.get(&child) {
                    Some(&n) => n,
                    None => {
                        let n = arena[child].count(arena, memo, own);
                        memo.insert(child, n);
                        n
                    }
                };
                total += n;
            }
        }
        total
    }

    /// Structural identity over the node's words and, recursively, over
    /// everything its combinations reach. Two nodes with the same key but a
    /// different word/combination content get different fingerprints.
    pub fn fingerprint(
        &self,
        arena: &NodeArena,
        memo: &mut HashMap<NodeId, Fingerprint>,
    ) -> Fingerprint {
        let mut hasher = Sha256::new();
        hasher.update(b"alphagram:v1");
        update_len_prefixed(&mut hasher, self.key.as_str().as_bytes());

        hasher.update((self.words.len() as u64).to_le_bytes());
        for word in &self.words {
            update_len_prefixed(&mut hasher, word.as_bytes());
        }

        // Children are hashed by content, never by handle, so that the same
        // structure reached through different arena slots hashes alike.
        let mut pairs: Vec<(Fingerprint, Fingerprint)> = Vec::with_capacity(self.combinations.len());
        for (a, b) in self.combinations() {
            let fa = arena.fingerprint_of(a, memo);
            let fb = arena.fingerprint_of(b, memo);
            pairs.push(if fa <= fb { (fa, fb) } else { (fb, fa) });
        }
        pairs.sort_unstable();
        pairs.dedup();

        hasher.update((pairs.len() as u64).to_le_bytes());
        for (fa, fb) in &pairs {
            hasher.update(fa.0);
            hasher.update(fb.0);
        }

        Fingerprint(hasher.finalize().into())
    }
}

fn update_len_prefixed(hasher: &mut Sha256, data: &[u8]) {
    hasher.update((data.len() as u64).to_le_bytes());
    hasher.update(data);
}

/// SHA-256 over a node's nested structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fingerprint([u8; 32]);

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// Owns every node; nodes are never freed during a search.
#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<AlphagramNode>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, node: AlphagramNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&AlphagramNode> {
        self.nodes.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn phrases_of(
        &self,
        id: NodeId,
        memo: &mut HashMap<NodeId, Rc<BTreeSet<String>>>,
    ) -> Rc<BTreeSet<String>> {
        if let Some(phrases) = memo.get(&id) {
            return Rc::clone(phrases);
        }
        let phrases = Rc::new(self[id].phrases(self, memo));
        memo.insert(id, Rc::clone(&phrases));
        phrases
    }

    pub fn fingerprint_of(&self, id: NodeId, memo: &mut HashMap<NodeId, Fingerprint>) -> Fingerprint {
        if let Some(&fp) = memo.get(&id) {
            return fp;
        }
        let fp = self[id].fingerprint(self, memo);
        memo.insert(id, fp);
        fp
    }
}

impl Index<NodeId> for NodeArena {
    type Output = AlphagramNode;

    fn index(&self, id: NodeId) -> &AlphagramNode {
        &self.nodes[id.index()]
    }
}

impl IndexMut<NodeId> for NodeArena {
    fn index_mut(&mut self, id: NodeId) -> &mut AlphagramNode {
        &mut self.nodes[id.index()]
    }
}
