//! Registry of every alphagram discovered so far, one node per key.

use std::collections::HashMap;

use crate::error::MergeError;
use crate::letters::LetterMultiset;
use crate::node::{AlphagramNode, NodeArena, NodeId};

/// Maps each key to its canonical node. Inserting a node whose key is
/// already present merges it into the existing one instead.
///
/// The arena may also hold *detached* nodes that are owned here but not
/// reachable by key: candidates, and a word's own node while its combine
/// pass is still running.
#[derive(Debug, Default)]
pub struct DecompositionIndex {
    arena: NodeArena,
    by_key: HashMap<LetterMultiset, NodeId>,
    order: Vec<NodeId>,
}

impl DecompositionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn node(&self, id: NodeId) -> &AlphagramNode {
        &self.arena[id]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut AlphagramNode {
        &mut self.arena[id]
    }

    pub fn lookup(&self, key: &LetterMultiset) -> Option<NodeId> {
        self.by_key.get(key).copied()
    }

    /// Stores `node` without registering its key.
    pub fn alloc_detached(&mut self, node: AlphagramNode) -> NodeId {
        self.arena.alloc(node)
    }

    /// Returns the canonical handle for `node`'s key. Callers must link
    /// against the returned handle from then on.
    pub fn insert_or_merge(&mut self, node: AlphagramNode) -> Result<NodeId, MergeError> {
        match self.lookup(node.key()) {
            Some(existing) => {
                self.arena[existing].merge(node)?;
                Ok(existing)
            }
            None => {
                let key = node.key().clone();
                let id = self.arena.alloc(node);
                self.register(key, id);
                Ok(id)
            }
        }
    }

    /// Registers a node previously stored with [`alloc_detached`], merging
    /// it if its key has been registered in the meantime.
    ///
    /// [`alloc_detached`]: DecompositionIndex::alloc_detached
    pub fn adopt(&mut self, id: NodeId) -> Result<NodeId, MergeError> {
        let key = self.arena[id].key().clone();
        match self.lookup(&key) {
            Some(existing) if existing == id => Ok(id),
            Some(existing) => {
                let node = self.arena[id].clone();
                self.arena[existing].merge(node)?;
                Ok(existing)
            }
            None => {
                self.register(key, id);
                Ok(id)
            }
        }
    }

    fn register(&mut self, key: LetterMultiset, id: NodeId) {
        self.by_key.insert(key, id);
        self.order.push(id);
    }

    /// Registered nodes in insertion order, as of this call. Nodes inserted
    /// afterwards are not part of the returned snapshot.
    pub fn each_node(&self) -> Vec<NodeId> {
        self.order.clone()
    }

    /// Number of registered keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
