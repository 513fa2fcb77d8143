//! The recursive DP-bounded descent: angle reuse across siblings, the
//! mile-cache frontier, and the dash shortcut.
//!
//! Grounded on `search`/`recursive_search`/`dash`/`push` in `trie.c`.
//! The original threads a file-scope `narray_t *HITS` and a file-scope
//! `char COMMON[9]` through the recursion; this crate passes `hits`
//! explicitly through the call chain instead of reaching for a global,
//! and makes `COMMON` a true local of each [`recursive_search`] call
//! rather than a global.
//!
//! The local-vs-global distinction for `COMMON` is not cosmetic: in the
//! original, the global is filled once per parent and then `memcpy`'d
//! into each child in turn *before* recursing into that child — but
//! since `recursive_search` always recurses into a non-dashed child
//! before moving to the next sibling, a deep recursive call clobbers the
//! global with values computed for some descendant before the parent's
//! loop reaches its remaining siblings. Declaring `COMMON` as a local
//! gives every call its own copy via ordinary stack-frame isolation, so
//! a sibling always sees the row this parent computed for it. The
//! values being reinstated are a pure function of the index (the
//! untouched band edge equals its own offset, same as a node's initial
//! cache row), so recomputing them fresh per call reproduces the
//! original's intent without its cross-sibling aliasing.
//!
//! One further departure from the C source: where `recursive_search`
//! does `if (mindist > tau) return;` — aborting the *entire* call,
//! skipping every remaining sibling — this crate treats the overshoot as
//! pruning only the current child's subtree (`continue` to the next
//! sibling), so that a later sibling still within budget is never
//! skipped just because an earlier one overshot.

use crate::alphabet::{altranslate, AMBIGUOUS, EOS, L_MAX, M};
use crate::array::NodeArray;
use crate::error::{report, TrieError};
use crate::node::{cache_index, Node, NodeId, MAX_CACHE_LEN};
use crate::trie::Trie;

impl<P> Trie<P> {
    /// Appends to `hits` every node at depth `bottom` within edit
    /// distance `tau` of `query`, starting descent from `miles[start]`
    /// and refreshing `miles[start+1..=trail]` along the way.
    ///
    /// Preconditions: `tau <= maxtau`, `query.len() <= L_MAX`, and
    /// `0 <= start <= trail <= query.len()` (the last one is not
    /// validated here, same as the original — caller responsibility).
    pub fn search(
        &mut self,
        query: &[u8],
        tau: u8,
        hits: &mut NodeArray,
        start: usize,
        trail: usize,
    ) -> Result<(), TrieError> {
        if tau > self.maxtau() {
            return Err(report(TrieError::TauExceedsMaxtau));
        }
        if query.len() > L_MAX {
            return Err(report(TrieError::QueryTooLong));
        }

        self.ensure_miles();
        let maxtau = self.maxtau();
        let bottom = self.bottom() as usize;

        // Translate the query into a fixed-size buffer, one position
        // shifted so index 0 can hold the length, mirroring `translated`
        // in the original. Positions below `start - maxtau` are never
        // read by the kernel and are left untranslated.
        let length = query.len();
        let mut translated = [0u8; M];
        translated[0] = length as u8;
        translated[length + 1] = EOS;
        for i in start.saturating_sub(maxtau as usize)..length {
            translated[i + 1] = altranslate(query[i]);
        }

        {
            let miles = self.miles.as_mut().expect("ensure_miles just ran");
            for slot in miles.iter_mut().take(trail + 1).skip(start + 1) {
                slot.reset();
            }
        }

        let start_nodes: Vec<NodeId> = self
            .miles
            .as_ref()
            .expect("ensure_miles just ran")
            .get(start)
            .map(|frontier| frontier.iter().collect())
            .unwrap_or_default();

        let arena = &mut self.arena;
        let miles = self.miles.as_mut().expect("ensure_miles just ran");
        for node in start_nodes {
            recursive_search(
                arena,
                miles,
                hits,
                node,
                &translated,
                tau,
                start + 1,
                maxtau,
                trail,
                bottom,
            );
        }
        Ok(())
    }
}

/// Fills the DP row for every child of `node` (the node at depth
/// `depth - 1`), prunes subtrees whose band minimum exceeds `tau`, dashes
/// once no mismatch budget remains, and recurses otherwise.
#[allow(clippy::too_many_arguments)]
fn recursive_search<P>(
    arena: &mut [Node<P>],
    miles: &mut [NodeArray],
    hits: &mut NodeArray,
    node: NodeId,
    query: &[u8; M],
    tau: u8,
    depth: usize,
    maxtau: u8,
    trail: usize,
    bottom: usize,
) {
    let children = arena[node.index()].children;
    let maxa = depth.saturating_sub(1).min(tau as usize);

    // Right side of the angle: identical for every child of THIS node,
    // so computed once here into a call-local scratch row and copied
    // into each child's cache below. Untouched slots keep the free-
    // boundary value (index == offset), recomputed fresh every call
    // rather than inherited from a shared/global buffer (see module
    // docs).
    let mut common = [0u8; MAX_CACHE_LEN];
    for (i, cell) in common.iter_mut().enumerate() {
        *cell = i as u8;
    }
    let mut cmindist = u8::MAX;
    for a in (1..=maxa).rev() {
        let ancestor = arena[node.index()].ancestor_symbol(a as u32 - 1);
        let mismatch = u8::from(ancestor as u8 != query[depth]);
        let mmatch = arena[node.index()].cache_at(maxtau, a as i32) + mismatch;
        let shift = arena[node.index()].cache_at(maxtau, a as i32 - 1).min(common[a + 1]) + 1;
        let value = mmatch.min(shift);
        common[a] = value;
        cmindist = cmindist.min(value);
    }

    for i in 0..6usize {
        let child = match children[i] {
            Some(child) => child,
            None => continue,
        };

        for (off, &value) in common.iter().enumerate().take(maxtau as usize) {
            arena[child.index()].cache_set(maxtau, off as i32, value);
        }

        let mut mindist = cmindist;
        for a in (1..=maxa).rev() {
            let mismatch = u8::from(i as u8 != query[depth - a]);
            let mmatch = arena[node.index()].cache_at(maxtau, -(a as i32)) + mismatch;
            let shift = arena[node.index()]
                .cache_at(maxtau, 1 - a as i32)
                .min(arena[child.index()].cache_at(maxtau, -(a as i32) - 1))
                + 1;
            let value = mmatch.min(shift);
            arena[child.index()].cache_set(maxtau, -(a as i32), value);
            mindist = mindist.min(value);
        }

        let mismatch = u8::from(i as u8 != query[depth]);
        let mmatch = arena[node.index()].cache_at(maxtau, 0) + mismatch;
        let shift = arena[child.index()]
            .cache_at(maxtau, -1)
            .min(arena[child.index()].cache_at(maxtau, 1))
            + 1;
        let center = mmatch.min(shift);
        arena[child.index()].cache_set(maxtau, 0, center);
        mindist = mindist.min(center);

        if mindist > tau {
            continue;
        }

        if depth <= trail {
            miles[depth].push(child);
        }

        if mindist == tau && depth > trail {
            dash(arena, hits, child, &query[depth + 1..]);
            continue;
        }

        if depth == bottom && center <= tau {
            hits.push(child);
        }

        recursive_search(
            arena,
            miles,
            hits,
            child,
            query,
            tau,
            depth + 1,
            maxtau,
            trail,
            bottom,
        );
    }
}

/// Exact-match descent once `mindist == tau`: any further mismatch or
/// indel would exceed the budget, so only a perfect match of the
/// remaining query tail can still be a hit.
fn dash<P>(arena: &[Node<P>], hits: &mut NodeArray, node: NodeId, tail: &[u8]) {
    let mut current = node;
    for &symbol in tail {
        if symbol == EOS {
            break;
        }
        if symbol > AMBIGUOUS {
            return;
        }
        match arena[current.index()].children[symbol as usize] {
            Some(child) => current = child,
            None => return,
        }
    }
    if arena[current.index()].payload.is_some() {
        hits.push(current);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trie::Trie;

    fn hits_for<P>(trie: &mut Trie<P>, query: &[u8], tau: u8) -> Vec<NodeId> {
        let mut hits = NodeArray::new();
        trie.search(query, tau, &mut hits, 0, 0).unwrap();
        hits.as_slice().to_vec()
    }

    #[test]
    fn exact_roundtrip_single_insert() {
        let mut trie = Trie::<u32>::new(2, 4).unwrap();
        let leaf = trie.insert_string(b"AAAA").unwrap();
        trie.set_payload(leaf, 1);
        assert_eq!(hits_for(&mut trie, b"AAAA", 0), vec![leaf]);
    }

    #[test]
    fn one_mismatch_within_tau_one() {
        let mut trie = Trie::<u32>::new(2, 4).unwrap();
        let aaaa = trie.insert_string(b"AAAA").unwrap();
        trie.set_payload(aaaa, 1);
        let aaca = trie.insert_string(b"AACA").unwrap();
        trie.set_payload(aaca, 2);

        let mut got = hits_for(&mut trie, b"AAAA", 1);
        got.sort();
        let mut want = vec![aaaa, aaca];
        want.sort();
        assert_eq!(got, want);

        assert_eq!(hits_for(&mut trie, b"AAAA", 0), vec![aaaa]);
    }

    #[test]
    fn substitution_within_and_outside_tau() {
        let mut trie = Trie::<u32>::new(2, 4).unwrap();
        let acgt = trie.insert_string(b"ACGT").unwrap();
        trie.set_payload(acgt, 1);

        assert_eq!(hits_for(&mut trie, b"ACGA", 1), vec![acgt]);
        assert_eq!(hits_for(&mut trie, b"ACGA", 0), Vec::<NodeId>::new());
    }

    #[test]
    fn deletion_and_insertion_within_tau_one() {
        let mut trie = Trie::<u32>::new(2, 4).unwrap();
        let acgt = trie.insert_string(b"ACGT").unwrap();
        trie.set_payload(acgt, 1);

        // one deletion relative to "ACGT"
        assert_eq!(hits_for(&mut trie, b"CGT", 1), vec![acgt]);
        // one insertion relative to "ACGT"
        assert_eq!(hits_for(&mut trie, b"AACGT", 1), vec![acgt]);
    }

    #[test]
    fn ambiguous_query_byte_consumes_tolerance() {
        let mut trie = Trie::<u32>::new(2, 4).unwrap();
        let acgt = trie.insert_string(b"ACGT").unwrap();
        trie.set_payload(acgt, 1);

        assert_eq!(hits_for(&mut trie, b"ANGT", 1), vec![acgt]);
        assert_eq!(hits_for(&mut trie, b"ANGT", 0), Vec::<NodeId>::new());
    }

    #[test]
    fn search_rejects_tau_above_maxtau() {
        let mut trie = Trie::<u32>::new(2, 4).unwrap();
        let mut hits = NodeArray::new();
        assert_eq!(
            trie.search(b"AAAA", 3, &mut hits, 0, 0).unwrap_err(),
            TrieError::TauExceedsMaxtau
        );
    }

    #[test]
    fn search_accepts_tau_equal_maxtau() {
        let mut trie = Trie::<u32>::new(2, 4).unwrap();
        let leaf = trie.insert_string(b"AAAA").unwrap();
        trie.set_payload(leaf, 1);
        let mut hits = NodeArray::new();
        assert!(trie.search(b"AAAA", 2, &mut hits, 0, 0).is_ok());
        assert_eq!(hits.as_slice().to_vec(), vec![leaf]);
    }

    #[test]
    fn query_length_at_l_max_is_accepted() {
        let bottom = L_MAX as u8;
        let mut trie = Trie::<u32>::new(1, bottom).unwrap();
        let s = vec![b'A'; L_MAX];
        let leaf = trie.insert_string(&s).unwrap();
        trie.set_payload(leaf, 1);
        assert_eq!(hits_for(&mut trie, &s, 0), vec![leaf]);
    }

    #[test]
    fn query_length_one_is_accepted() {
        let mut trie = Trie::<u32>::new(1, 1).unwrap();
        let leaf = trie.insert_string(b"A").unwrap();
        trie.set_payload(leaf, 1);
        assert_eq!(hits_for(&mut trie, b"A", 0), vec![leaf]);
    }

    #[test]
    fn bottom_equal_one_round_trips() {
        let mut trie = Trie::<u32>::new(1, 1).unwrap();
        let a = trie.insert_string(b"A").unwrap();
        trie.set_payload(a, 1);
        let c = trie.insert_string(b"C").unwrap();
        trie.set_payload(c, 2);

        assert_eq!(hits_for(&mut trie, b"A", 0), vec![a]);

        let mut got = hits_for(&mut trie, b"A", 1);
        got.sort();
        let mut want = vec![a, c];
        want.sort();
        assert_eq!(got, want);
    }

    #[test]
    fn no_duplicate_hits_for_a_single_leaf() {
        let mut trie = Trie::<u32>::new(2, 4).unwrap();
        let leaf = trie.insert_string(b"AAAA").unwrap();
        trie.set_payload(leaf, 1);
        let got = hits_for(&mut trie, b"AAAA", 2);
        let mut seen = std::collections::HashSet::new();
        for h in &got {
            assert!(seen.insert(*h), "duplicate hit for {h:?}");
        }
    }

    #[test]
    fn mile_reuse_matches_cold_search() {
        let mut trie = Trie::<u32>::new(2, 4).unwrap();
        for s in [b"AAAA", b"AACC", b"AGGG"] {
            let leaf = trie.insert_string(s).unwrap();
            trie.set_payload(leaf, 0);
        }

        let mut warm = NodeArray::new();
        trie.search(b"AAAA", 1, &mut warm, 0, 4).unwrap();
        let mut reused = NodeArray::new();
        trie.search(b"AACC", 1, &mut reused, 2, 4).unwrap();
        let mut reused_sorted = reused.as_slice().to_vec();
        reused_sorted.sort();

        let mut cold = NodeArray::new();
        trie.search(b"AACC", 1, &mut cold, 0, 0).unwrap();
        let mut cold_sorted = cold.as_slice().to_vec();
        cold_sorted.sort();

        assert_eq!(reused_sorted, cold_sorted);
    }
}
