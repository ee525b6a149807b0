//! Chromosome-name reconciliation between junction tables and references.
//!
//! Annotation sources and FASTA files rarely agree on naming: UCSC uses `chr1`,
//! Ensembl and NCBI use `1`, and some junction callers emit merged names such as
//! `chrX|Y`. Resolution is a pure function of the requested name and the contig
//! table, tried in a fixed order:
//!
//! 1. Drop everything from the first `|`
//! 2. The name as given
//! 3. The name with a leading `chr` removed
//! 4. The name with a leading `chr` added
//!
//! Trying the name as given first means already-correct names never get
//! rewritten, even when a reference carries both `chr1` and `1`.

use crate::core::contig::ContigTable;
use crate::reference::ReferenceError;

/// Separator used by some junction callers to merge contig names (e.g. `chrX|Y`)
pub const CONTIG_SEPARATOR: char = '|';

const CHR_PREFIX: &str = "chr";

/// The three names tried for `name`, in order: as given, without `chr`, with `chr`.
///
/// Duplicates are kept so that error messages show every attempt.
#[must_use]
pub fn candidate_names(name: &str) -> [String; 3] {
    let base = name
        .split_once(CONTIG_SEPARATOR)
        .map_or(name, |(first, _)| first);

    let without_chr = base.strip_prefix(CHR_PREFIX).unwrap_or(base);
    let with_chr = if base.starts_with(CHR_PREFIX) {
        base.to_string()
    } else {
        format!("{CHR_PREFIX}{base}")
    };

    [base.to_string(), without_chr.to_string(), with_chr]
}

/// Resolve `name` to a contig present in `contigs`.
///
/// # Errors
///
/// Returns `ReferenceError::ContigNotFound` listing every attempted name if no
/// candidate is present.
pub fn resolve_contig_name(name: &str, contigs: &ContigTable) -> Result<String, ReferenceError> {
    let candidates = candidate_names(name);

    if let Some(found) = candidates.iter().find(|c| contigs.contains(c)) {
        return Ok(found.clone());
    }

    Err(ReferenceError::ContigNotFound {
        name: name.to_string(),
        attempted: candidates.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::contig::Contig;

    fn table(names: &[&str]) -> ContigTable {
        names.iter().map(|n| Contig::new(*n, 1000)).collect()
    }

    #[test]
    fn test_candidate_names() {
        assert_eq!(candidate_names("chr1"), ["chr1", "1", "chr1"]);
        assert_eq!(candidate_names("1"), ["1", "1", "chr1"]);
        assert_eq!(candidate_names("chrX|Y"), ["chrX", "X", "chrX"]);
        assert_eq!(candidate_names("MT|a|b"), ["MT", "MT", "chrMT"]);
    }

    #[test]
    fn test_resolve_ucsc_reference() {
        let contigs = table(&["chr1", "chr2"]);
        assert_eq!(resolve_contig_name("chr1", &contigs).unwrap(), "chr1");
        assert_eq!(resolve_contig_name("1", &contigs).unwrap(), "chr1");
        assert_eq!(resolve_contig_name("chr1|Y", &contigs).unwrap(), "chr1");
    }

    #[test]
    fn test_resolve_ensembl_reference() {
        let contigs = table(&["1", "X", "MT"]);
        assert_eq!(resolve_contig_name("chr1", &contigs).unwrap(), "1");
        assert_eq!(resolve_contig_name("chrX|Y", &contigs).unwrap(), "X");
        assert_eq!(resolve_contig_name("MT", &contigs).unwrap(), "MT");
    }

    #[test]
    fn test_resolve_prefers_exact_name() {
        let contigs = table(&["1", "chr1"]);
        assert_eq!(resolve_contig_name("1", &contigs).unwrap(), "1");
        assert_eq!(resolve_contig_name("chr1", &contigs).unwrap(), "chr1");
    }

    #[test]
    fn test_resolve_not_found_lists_attempts() {
        let contigs = table(&["chr1"]);
        match resolve_contig_name("chrZZ", &contigs) {
            Err(ReferenceError::ContigNotFound { name, attempted }) => {
                assert_eq!(name, "chrZZ");
                assert_eq!(attempted, vec!["chrZZ", "ZZ", "chrZZ"]);
            }
            other => panic!("expected ContigNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_not_found_message() {
        let contigs = table(&["chr1"]);
        let err = resolve_contig_name("7", &contigs).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Contig '7' not found in reference (tried 7, 7, chr7)"
        );
    }
}
