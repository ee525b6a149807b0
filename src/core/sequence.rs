//! Nucleotide sequence helpers.

/// Padding symbol used when a window runs off either end of a contig
pub const PAD_BASE: u8 = b'N';

/// Complement a single IUPAC base, preserving case.
///
/// `A`/`T` and `C`/`G` are swapped, `N` maps to itself. Ambiguity codes are
/// complemented as well (e.g. `R` <-> `Y`); any other byte is returned unchanged.
#[must_use]
pub fn complement(base: u8) -> u8 {
    match base {
        b'A' => b'T',
        b'T' => b'A',
        b'C' => b'G',
        b'G' => b'C',
        b'a' => b't',
        b't' => b'a',
        b'c' => b'g',
        b'g' => b'c',
        b'R' => b'Y',
        b'Y' => b'R',
        b'r' => b'y',
        b'y' => b'r',
        b'K' => b'M',
        b'M' => b'K',
        b'k' => b'm',
        b'm' => b'k',
        b'B' => b'V',
        b'V' => b'B',
        b'b' => b'v',
        b'v' => b'b',
        b'D' => b'H',
        b'H' => b'D',
        b'd' => b'h',
        b'h' => b'd',
        other => other,
    }
}

/// Reverse-complement a sequence.
///
/// ```
/// use splice_flank::core::sequence::reverse_complement;
///
/// assert_eq!(reverse_complement(b"AACGTn"), b"nACGTT".to_vec());
/// ```
#[must_use]
pub fn reverse_complement(seq: &[u8]) -> Vec<u8> {
    seq.iter().rev().map(|&b| complement(b)).collect()
}
