use crate::core::junction::Junction;
use crate::core::sequence::reverse_complement;
use crate::core::types::Strand;
use crate::extraction::ExtractError;
use crate::reference::provider::ReferenceProvider;

/// Builds the oriented donor/acceptor sequence for single junctions.
///
/// Holds no per-junction state; one extractor can serve any number of records.
#[derive(Debug, Clone, Copy)]
pub struct JunctionExtractor<'a> {
    reference: &'a ReferenceProvider,
    flank: u64,
}

impl<'a> JunctionExtractor<'a> {
    #[must_use]
    pub fn new(reference: &'a ReferenceProvider, flank: u64) -> Self {
        Self { reference, flank }
    }

    /// Extract the oriented, upper-cased sequence for one junction.
    ///
    /// # Errors
    ///
    /// Returns `ExtractError::UnstrandedJunction` if `strand` is unknown, or
    /// `ExtractError::Reference` if either window cannot be fetched.
    pub fn extract(&self, junction: &Junction, strand: Strand) -> Result<String, ExtractError> {
        if !strand.is_known() {
            return Err(ExtractError::UnstrandedJunction(junction.to_string()));
        }

        let donor = self
            .reference
            .fetch(&junction.chrom, junction.donor, self.flank)?;
        let acceptor = self
            .reference
            .fetch(&junction.chrom, junction.acceptor, self.flank)?;

        let mut sequence = if strand == Strand::Reverse {
            let mut joined = reverse_complement(&acceptor);
            joined.extend(reverse_complement(&donor));
            joined
        } else {
            let mut joined = donor;
            joined.extend(acceptor);
            joined
        };
        sequence.make_ascii_uppercase();

        Ok(String::from_utf8_lossy(&sequence).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::{sequence_length, DEFAULT_FLANK};
    use crate::reference::ReferenceError;

    /// chr1 is `AAAACCCCGGGGTTTT` repeated to 1024 bases
    fn synthetic_reference() -> ReferenceProvider {
        let chr1 = b"AAAACCCCGGGGTTTT".repeat(64);
        ReferenceProvider::from_sequences([("chr1", chr1)])
    }

    fn junction(text: &str) -> Junction {
        text.parse().unwrap()
    }

    #[test]
    fn test_forward_strand() {
        let reference = synthetic_reference();
        let extractor = JunctionExtractor::new(&reference, 3);

        let sequence = extractor
            .extract(&junction("chr1:500-600"), Strand::Forward)
            .unwrap();
        assert_eq!(sequence, "AAAACCCCCCCGGG");

        let donor = reference.fetch("chr1", 500, 3).unwrap();
        let acceptor = reference.fetch("chr1", 600, 3).unwrap();
        assert_eq!(sequence.as_bytes(), [donor, acceptor].concat());
    }

    #[test]
    fn test_reverse_strand_swaps_and_complements() {
        let reference = synthetic_reference();
        let extractor = JunctionExtractor::new(&reference, 3);

        let sequence = extractor
            .extract(&junction("chr1:500-600"), Strand::Reverse)
            .unwrap();
        assert_eq!(sequence, "CCCGGGGGGGTTTT");

        let donor = reference.fetch("chr1", 500, 3).unwrap();
        let acceptor = reference.fetch("chr1", 600, 3).unwrap();
        let expected = [reverse_complement(&acceptor), reverse_complement(&donor)].concat();
        assert_eq!(sequence.as_bytes(), expected);
    }

    #[test]
    fn test_default_flank_length() {
        let reference = synthetic_reference();
        let extractor = JunctionExtractor::new(&reference, DEFAULT_FLANK);
        assert_eq!(sequence_length(DEFAULT_FLANK), 1002);

        for strand in [Strand::Forward, Strand::Reverse] {
            // Donor near the start and acceptor near the end both need padding
            let sequence = extractor
                .extract(&junction("chr1:10-1020"), strand)
                .unwrap();
            assert_eq!(sequence.len(), 1002);
            assert!(sequence.bytes().all(|b| b"ACGTN".contains(&b)));
        }
    }

    #[test]
    fn test_padding_orientation_on_reverse_strand() {
        let reference = ReferenceProvider::from_sequences([("chr1", b"ACGTACGTAC".to_vec())]);
        let extractor = JunctionExtractor::new(&reference, 3);

        // donor window NNNACGT, acceptor window GTACNNN
        let forward = extractor
            .extract(&junction("chr1:1-10"), Strand::Forward)
            .unwrap();
        assert_eq!(forward, "NNNACGTGTACNNN");

        let reverse = extractor
            .extract(&junction("chr1:1-10"), Strand::Reverse)
            .unwrap();
        assert_eq!(reverse, "NNNGTACACGTNNN");
    }

    #[test]
    fn test_soft_masked_output_is_uppercase() {
        let reference = ReferenceProvider::from_sequences([("1", b"aaaaccccggggtttt".to_vec())]);
        let extractor = JunctionExtractor::new(&reference, 1);

        let forward = extractor
            .extract(&junction("chr1:5-9"), Strand::Forward)
            .unwrap();
        assert_eq!(forward, "ACCCGG");

        let reverse = extractor
            .extract(&junction("chr1:5-9"), Strand::Reverse)
            .unwrap();
        assert_eq!(reverse, "CCGGGT");
    }

    #[test]
    fn test_unknown_strand_rejected() {
        let reference = synthetic_reference();
        let extractor = JunctionExtractor::new(&reference, 3);
        let result = extractor.extract(&junction("chr1:500-600"), Strand::Unknown);
        assert!(matches!(result, Err(ExtractError::UnstrandedJunction(_))));
    }

    #[test]
    fn test_missing_contig_propagates() {
        let reference = synthetic_reference();
        let extractor = JunctionExtractor::new(&reference, 3);
        let result = extractor.extract(&junction("chrZZ:500-600"), Strand::Forward);
        assert!(matches!(
            result,
            Err(ExtractError::Reference(ReferenceError::ContigNotFound { .. }))
        ));
    }
}
