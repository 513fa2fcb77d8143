//! Property tests for the trie's core invariants: round-trip membership,
//! distance soundness/completeness, mile-cache equivalence, no-duplicate-
//! hits, and path consistency.
//!
//! Shaped after `grid/equivalence_tests.rs` in `ethrex`'s trie crate: a
//! reference computation (`edit_distance` below, a plain Levenshtein DP
//! over translated symbols) checked against the trie's actual output via
//! `proptest!`, rather than hand-picked fixtures alone.
