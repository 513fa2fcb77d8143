//! The trie itself: arena of nodes, global parameters, construction and
//! destruction.
//!
//! Grounded on `new_trie`/`insert_string`/`insert`/`destroy_trie`/
//! `destroy_nodes_downstream_of` in `trie.c`. The original links nodes by
//! pointer and stores the root/`Info` pair as a single allocation with a
//! `void *data` that points to either an `Info` block (root) or a
//! payload (leaf). This crate instead keeps every node in one arena
//! (`Vec<Node<P>>`) addressed by [`NodeId`], and moves `maxtau`/`bottom`/
//! `miles` onto `Trie<P>` itself rather than behind a root-node pointer
//! cast — the same arena-of-indices idiom `meta/mod.rs`'s trie
//! (`TrieNodes`/`NodeID`) uses, generalized here to a mutable,
//! payload-bearing trie instead of an immutable sorted one.

use crate::alphabet::{is_valid_construction_byte, translate, L_MAX};
use crate::array::NodeArray;
use crate::error::{report, TrieError};
use crate::node::{Node, NodeId, MAXTAU_LIMIT};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A bounded edit-distance trie over short fixed-alphabet strings.
///
/// `P` is the opaque leaf payload type; the trie does not interpret it.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Trie<P> {
    pub(crate) arena: Vec<Node<P>>,
    maxtau: u8,
    bottom: u8,
    /// Per-depth frontier cache, lazily allocated on first search
    /// (mirrors `init_miles`/`*info->miles == NULL` in the original).
    pub(crate) miles: Option<Vec<NodeArray>>,
}

impl<P> Trie<P> {
    /// Creates a trie with construction-time bound `maxtau` (1..=8) and
    /// target leaf depth `bottom`.
    pub fn new(maxtau: u8, bottom: u8) -> Result<Self, TrieError> {
        if maxtau == 0 || maxtau > MAXTAU_LIMIT {
            // DETAIL: there is an absolute limit at tau = 8 because the
            // path is packed into a 32-bit word, 4 bits per symbol.
            return Err(report(TrieError::MaxtauTooLarge));
        }
        Ok(Trie {
            arena: vec![Node::new_root(maxtau)],
            maxtau,
            bottom,
            miles: None,
        })
    }

    #[inline]
    pub fn maxtau(&self) -> u8 {
        self.maxtau
    }

    #[inline]
    pub fn bottom(&self) -> u8 {
        self.bottom
    }

    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &Node<P> {
        &self.arena[id.index()]
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<P> {
        &mut self.arena[id.index()]
    }

    /// Returns the payload attached to `node`, if any.
    pub fn payload(&self, node: NodeId) -> Option<&P> {
        self.arena[node.index()].payload.as_ref()
    }

    /// Attaches (or replaces) the payload at `node`. Callers are
    /// expected to do this immediately after [`Trie::insert_string`]
    /// returns the leaf, once the leaf reaches depth `bottom`.
    pub fn set_payload(&mut self, node: NodeId, payload: P) {
        self.arena[node.index()].payload = Some(payload);
    }

    /// Inserts `s`, following existing children and creating new nodes
    /// for the first unmatched suffix. Returns the leaf node so the
    /// caller can attach a payload.
    ///
    /// Rejects the empty string (it would alias the root), strings
    /// longer than [`L_MAX`], and strings containing a byte that is not
    /// A/C/G/T/N (either case) — `N` alone is folded into the ambiguity
    /// code, everything else is invalid and the whole insertion fails
    /// before any node is created.
    pub fn insert_string(&mut self, s: &[u8]) -> Result<NodeId, TrieError> {
        if s.is_empty() {
            return Err(report(TrieError::EmptyString));
        }
        if s.len() > L_MAX {
            return Err(report(TrieError::InsertStringTooLong));
        }
        if s.iter().any(|&b| !is_valid_construction_byte(b)) {
            return Err(report(TrieError::InvalidConstructionByte));
        }

        let mut node = NodeId::ROOT;
        let mut i = 0;
        // Follow the existing path as far as it goes.
        while i < s.len() {
            let symbol = translate(s[i]);
            match self.node(node).children[symbol as usize] {
                Some(child) => {
                    node = child;
                    i += 1;
                }
                None => {
                    node = self.insert(node, symbol);
                    i += 1;
                    break;
                }
            }
        }
        // Every subsequent symbol is guaranteed to need a new node.
        while i < s.len() {
            let symbol = translate(s[i]);
            node = self.insert(node, symbol);
            i += 1;
        }
        Ok(node)
    }

    /// Appends a single new child at `symbol` below `parent`. Does not
    /// check whether a child already occupies that slot — callers rely
    /// on [`Trie::insert_string`] only calling this after confirming the
    /// slot is empty, exactly as the original's `insert` documents.
    fn insert(&mut self, parent: NodeId, symbol: u8) -> NodeId {
        let parent_path = self.node(parent).path;
        let child = Node::new_child(parent_path, symbol, self.maxtau);
        let child_id = NodeId(self.arena.len() as u32);
        self.arena.push(child);
        self.node_mut(parent).children[symbol as usize] = Some(child_id);
        child_id
    }

    /// Lazily allocates the mile cache and seeds `miles[0]` with the
    /// root, mirroring `init_miles`. Left as a no-return side effect
    /// (rather than handing back `&mut self.miles`) so that callers can
    /// still take disjoint borrows of `self.arena` and `self.miles`
    /// afterwards.
    pub(crate) fn ensure_miles(&mut self) {
        if self.miles.is_none() {
            let mut miles: Vec<NodeArray> =
                (0..crate::alphabet::M).map(|_| NodeArray::new()).collect();
            miles[0].push(NodeId::ROOT);
            self.miles = Some(miles);
        }
    }

    /// Consumes the trie, invoking `payload_destructor` on every
    /// non-null payload exactly once, in the same post-order the
    /// original's `destroy_nodes_downstream_of` uses (children 0..4,
    /// child 5 never exists). With `payload_destructor = None`, this is
    /// equivalent to ordinary drop except that payloads are still
    /// visited depth-first rather than in arena order.
    pub fn destroy<F>(mut self, mut payload_destructor: Option<F>)
    where
        F: FnMut(P),
    {
        destroy_subtree(&mut self.arena, NodeId::ROOT, &mut payload_destructor);
    }
}

fn destroy_subtree<P, F: FnMut(P)>(
    arena: &mut [Node<P>],
    id: NodeId,
    destruct: &mut Option<F>,
) {
    let children = arena[id.index()].children;
    for child in children.iter().take(5).flatten() {
        destroy_subtree(arena, *child, destruct);
    }
    if let Some(payload) = arena[id.index()].payload.take() {
        if let Some(f) = destruct {
            f(payload);
        }
    }
}
