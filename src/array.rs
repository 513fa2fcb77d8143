//! Growable stack of node references, used both as the hit list and as
//! each per-depth mile frontier.
//!
//! Mirrors `narray_t`/`new_narray`/`push` from `trie.c`: initial capacity
//! 32, doubling growth, `pos`/`lim` tracked explicitly rather than
//! delegated entirely to `Vec`'s own amortized growth, so that a growth
//! failure is observable through the same error channel as every other
//! failure mode instead of aborting the process.

use crate::error::{report, TrieError};
use crate::node::NodeId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const INITIAL_CAPACITY: usize = 32;

/// A growable, order-preserving, non-deduplicating stack of [`NodeId`]s.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeArray {
    nodes: Vec<NodeId>,
}

impl NodeArray {
    /// Creates an array with the same initial capacity as the original's
    /// `new_narray`.
    pub fn new() -> Self {
        NodeArray {
            nodes: Vec::with_capacity(INITIAL_CAPACITY),
        }
    }

    /// Number of elements currently stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Resets the array to empty without releasing its backing storage,
    /// mirroring `stack->pos = 0` in the original.
    #[inline]
    pub fn reset(&mut self) {
        self.nodes.clear();
    }

    /// Appends `node`. On allocation failure, reports
    /// [`TrieError::ArrayAllocationFailed`] and silently drops the push,
    /// matching the original's "errors are reported via the module error
    /// channel; the push is silently dropped" contract.
    pub fn push(&mut self, node: NodeId) {
        if self.nodes.len() == self.nodes.capacity() {
            let additional = self.nodes.capacity().max(1);
            if self.nodes.try_reserve(additional).is_err() {
                report(TrieError::ArrayAllocationFailed);
                return;
            }
        }
        self.nodes.push(node);
    }

    /// Iterates elements in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }

    pub fn as_slice(&self) -> &[NodeId] {
        &self.nodes
    }
}
