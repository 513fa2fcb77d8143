//! Typed errors and the sticky error channel.
//!
//! The original C library reports failures through a single global
//! `ERROR` integer, last-write-wins, cleared by
//! `check_trie_error_and_reset`. [`TrieError`] replaces the bare integer
//! with a typed enum while keeping each variant's original call-site
//! number as a documented discriminant, and [`check_trie_error_and_reset`]
//! preserves the batch-check-and-reset contract via a `thread_local`
//! cell rather than a process-wide global.

use std::cell::Cell;

use debug_print::debug_eprintln;
use thiserror::Error;

/// Failure modes reported by [`crate::Trie`] operations.
///
/// The parenthetical numbers match the call-site codes used by the
/// original `trie.c` (kept for anyone cross-referencing it); they carry
/// no behavioral meaning in this crate beyond identifying the variant.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TrieError {
    /// `maxtau` passed to [`crate::Trie::new`] exceeds the hard limit of
    /// 8 imposed by the 32-bit packed path (code 396).
    #[error("maxtau exceeds the hard limit of 8")]
    MaxtauTooLarge,
    /// Requested `tau` exceeds the trie's `maxtau` (code 44).
    #[error("requested tau greater than maxtau")]
    TauExceedsMaxtau,
    /// Query longer than [`crate::alphabet::L_MAX`] (code 55).
    #[error("query longer than allowed max")]
    QueryTooLong,
    /// String passed to [`crate::Trie::insert_string`] longer than
    /// [`crate::alphabet::L_MAX`] (code 347).
    #[error("inserted string longer than allowed max")]
    InsertStringTooLong,
    /// Inserting the empty string would alias the root's `Info` block
    /// (no call-site code in the original; it simply returned the root).
    #[error("cannot insert the empty string")]
    EmptyString,
    /// String passed to [`crate::Trie::insert_string`] contains a byte
    /// that is not A/C/G/T/N, either case (no call-site code in the
    /// original; this validation is added on top of it).
    #[error("inserted string contains a byte outside A/C/G/T/N")]
    InvalidConstructionByte,
    /// Insertion attempted to walk past a node that should exist but
    /// does not (code 228); indicates caller/programmer error. Kept for
    /// parity with the original's error taxonomy; unreachable here since
    /// `Trie::insert_string` always creates the missing node itself
    /// rather than assuming one is already there.
    #[error("insertion walked past a null node")]
    #[allow(dead_code)]
    InsertWalkedPastNull,
    /// A [`crate::array::NodeArray`] failed to grow its backing storage
    /// (code 175). The only allocation-failure variant reachable under
    /// Rust's default (aborting) global allocator, since it is the only
    /// growth path routed through `Vec::try_reserve` rather than a plain
    /// `push`/`Box::new`.
    #[error("failed to grow a node array")]
    ArrayAllocationFailed,
}

thread_local! {
    static LAST_ERROR: Cell<Option<TrieError>> = Cell::new(None);
}

/// Sets the sticky error slot and logs a diagnostic line, mirroring the
/// original's `ERROR = <code>; fprintf(stderr, ...)` pattern. Last write
/// wins.
pub(crate) fn report(err: TrieError) -> TrieError {
    debug_eprintln!("dnatrie: {err}");
    LAST_ERROR.with(|cell| cell.set(Some(err)));
    err
}

/// Returns and clears the sticky error slot.
///
/// Equivalent to the original's `check_trie_error_and_reset`: returns
/// `None` (analogous to `0`) if no error is pending.
pub fn check_trie_error_and_reset() -> Option<TrieError> {
    LAST_ERROR.with(|cell| cell.take())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sticky_last_write_wins() {
        let _ = check_trie_error_and_reset();
        report(TrieError::TauExceedsMaxtau);
        report(TrieError::QueryTooLong);
        assert_eq!(check_trie_error_and_reset(), Some(TrieError::QueryTooLong));
        assert_eq!(check_trie_error_and_reset(), None);
    }
}
