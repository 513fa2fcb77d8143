//! Byte-to-symbol translation tables.
//!
//! Mirrors `translate[]`/`altranslate[]` from the original `trie.c`: two
//! fixed 256-entry tables mapping raw bytes to the trie's 6-symbol
//! alphabet (0..=3 for A/C/G/T, 4 for ambiguity/N, 5 for "never matches").

/// A translated alphabet symbol. `0..=3` are A/C/G/T, `4` is the
/// ambiguity code (`N`), `5` is the query-only "no match" code, and
/// [`EOS`] terminates a translated query buffer.
pub type Symbol = u8;

/// Ambiguity code (`N`), usable both at construction and in dash tails.
pub const AMBIGUOUS: Symbol = 4;

/// Query-only code meaning "matches no child" (never produced during
/// construction, never a valid slot to allocate).
pub const NO_MATCH: Symbol = 5;

/// Terminates a translated query buffer.
pub const EOS: Symbol = 6;

/// Upper bound on indexed/query string length (`MAXBRCDLEN` in `trie.c`).
pub const L_MAX: usize = 127;

/// Mile-array size: room for the length prefix and the `EOS` terminator.
pub const M: usize = L_MAX + 2;

const fn build_translate() -> [Symbol; 256] {
    let mut table = [AMBIGUOUS; 256];
    table[b'A' as usize] = 0;
    table[b'a' as usize] = 0;
    table[b'C' as usize] = 1;
    table[b'c' as usize] = 1;
    table[b'G' as usize] = 2;
    table[b'g' as usize] = 2;
    table[b'T' as usize] = 3;
    table[b't' as usize] = 3;
    table
}

const fn build_altranslate() -> [Symbol; 256] {
    let mut table = [NO_MATCH; 256];
    table[b'A' as usize] = 0;
    table[b'a' as usize] = 0;
    table[b'C' as usize] = 1;
    table[b'c' as usize] = 1;
    table[b'G' as usize] = 2;
    table[b'g' as usize] = 2;
    table[b'T' as usize] = 3;
    table[b't' as usize] = 3;
    table
}

/// Construction-time table: A/C/G/T (either case) -> 0..=3, `N` (either
/// case) -> [`AMBIGUOUS`]. Only meaningful for bytes that pass
/// [`is_valid_construction_byte`]; anything else is rejected by the
/// caller (`Trie::insert_string`) before this table is ever consulted.
pub static TRANSLATE: [Symbol; 256] = build_translate();

/// Query-time table: A/C/G/T (either case) -> 0..=3, everything else ->
/// [`NO_MATCH`], so ambiguous query bytes can never spuriously match a
/// child (they force a mandatory mismatch cost instead).
pub static ALTRANSLATE: [Symbol; 256] = build_altranslate();

/// Translates a byte for insertion. Only meaningful for bytes that pass
/// [`is_valid_construction_byte`] — callers are expected to reject
/// anything else before translating it.
#[inline]
pub fn translate(byte: u8) -> Symbol {
    TRANSLATE[byte as usize]
}

/// Translates a byte for a query.
#[inline]
pub fn altranslate(byte: u8) -> Symbol {
    ALTRANSLATE[byte as usize]
}

/// A byte is valid at construction time iff it is A/C/G/T/N, either case.
/// Anything else is not part of the alphabet and must be rejected by the
/// caller rather than silently folded into the ambiguity code.
#[inline]
pub fn is_valid_construction_byte(byte: u8) -> bool {
    matches!(byte.to_ascii_uppercase(), b'A' | b'C' | b'G' | b'T' | b'N')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_known_bases_either_case() {
        assert_eq!(translate(b'A'), 0);
        assert_eq!(translate(b'a'), 0);
        assert_eq!(translate(b'C'), 1);
        assert_eq!(translate(b'G'), 2);
        assert_eq!(translate(b'T'), 3);
    }

    #[test]
    fn translate_n_is_ambiguous() {
        assert_eq!(translate(b'N'), AMBIGUOUS);
        assert_eq!(translate(b'n'), AMBIGUOUS);
    }

    #[test]
    fn construction_bytes_outside_acgtn_are_invalid() {
        assert!(!is_valid_construction_byte(b'?'));
        assert!(!is_valid_construction_byte(0));
        assert!(is_valid_construction_byte(b'N'));
        assert!(is_valid_construction_byte(b'a'));
    }

    #[test]
    fn altranslate_unknown_never_matches() {
        assert_eq!(altranslate(b'N'), NO_MATCH);
        assert_eq!(altranslate(b'?'), NO_MATCH);
        assert_eq!(altranslate(b'A'), 0);
    }
}
