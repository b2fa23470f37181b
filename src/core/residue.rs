//! Residue equivalence and tag hashing.
//!
//! Isoleucine and Leucine have identical masses and cannot be told apart by
//! a mass spectrometer, so every comparison in this crate treats `I` and `L`
//! as the same residue. The fold is always `I -> L`.

/// Number of symbols in the residue alphabet used as the hash base.
pub const ALPHABET_SIZE: u64 = 26;

/// Fold a residue to its equivalence class representative.
#[inline]
#[must_use]
pub fn fold(residue: u8) -> u8 {
    match residue {
        b'I' => b'L',
        other => other,
    }
}

/// Compare two residues with I/L equivalence.
#[inline]
#[must_use]
pub fn residues_equal(a: u8, b: u8) -> bool {
    fold(a) == fold(b)
}

/// Compare two residue slices of equal length with I/L equivalence.
/// Slices of different lengths are never equal.
#[must_use]
pub fn slices_equal(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(&x, &y)| residues_equal(x, y))
}

/// Find the first offset of `needle` in `haystack` with I/L equivalence.
#[must_use]
pub fn find_folded(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    if needle.len() > haystack.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| slices_equal(window, needle))
}

/// Hash the residues `start..end` of `seq` into an integer.
///
/// The range is clamped to the sequence length. Residues are folded before
/// hashing and combined positionally in base 26. The hash is lossy for windows
/// longer than 13 residues (the accumulator wraps) and for symbols outside
/// `A..=Z`; callers must re-verify every candidate against the sequence.
#[must_use]
pub fn tag_hash(seq: &[u8], start: usize, end: usize) -> u64 {
    let end = end.min(seq.len());
    if start >= end {
        return 0;
    }
    seq[start..end].iter().fold(0u64, |hash, &residue| {
        let value = u64::from(fold(residue).wrapping_sub(b'A'));
        hash.wrapping_mul(ALPHABET_SIZE).wrapping_add(value)
    })
}

/// Normalize a peptide for use as a lookup key: uppercase, `I` folded to `L`.
#[must_use]
pub fn normalize_peptide(peptide: &str) -> String {
    peptide
        .bytes()
        .map(|b| char::from(fold(b.to_ascii_uppercase())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold() {
        assert_eq!(fold(b'I'), b'L');
        assert_eq!(fold(b'L'), b'L');
        assert_eq!(fold(b'K'), b'K');
    }

    #[test]
    fn test_tag_hash_il_equivalent() {
        assert_eq!(tag_hash(b"PIKP", 0, 4), tag_hash(b"PLKP", 0, 4));
        assert_ne!(tag_hash(b"PIKP", 0, 4), tag_hash(b"PVKP", 0, 4));
    }

    #[test]
    fn test_tag_hash_base26() {
        // B=1, C=2 -> 1*26 + 2
        assert_eq!(tag_hash(b"BC", 0, 2), 28);
        assert_eq!(tag_hash(b"ABC", 1, 3), 28);
    }

    #[test]
    fn test_tag_hash_clamps_end() {
        assert_eq!(tag_hash(b"ABC", 0, 10), tag_hash(b"ABC", 0, 3));
        assert_eq!(tag_hash(b"ABC", 5, 10), 0);
    }

    #[test]
    fn test_find_folded() {
        assert_eq!(find_folded(b"MKYILVTGG", b"YLIV"), Some(2));
        assert_eq!(find_folded(b"MKYILVTGG", b"YLIA"), None);
        assert_eq!(find_folded(b"MK", b"MKY"), None);
    }

    #[test]
    fn test_normalize_peptide() {
        assert_eq!(normalize_peptide("pepIdE"), "PEPLDE");
    }
}
