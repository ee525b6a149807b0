//! # splice-flank
//!
//! A library for preparing splice-junction tables for sequence-based models.
//!
//! Junction callers report junctions as `chrom:donor-acceptor` with an identifier
//! that starts with the gene symbol, but say nothing about strand. Models that
//! read sequence need both the strand and a window of reference sequence around
//! each splice site, oriented the way the transcript reads.
//!
//! `splice-flank` provides both steps:
//!
//! - **Strand annotation**: gene symbol -> strand lookup from a GTF
//! - **Contig reconciliation**: `chr1`, `1` and `chr1|Y` all find `chr1`
//! - **Boundary padding**: windows past contig ends are filled with `N`
//! - **Strand-aware assembly**: minus-strand junctions are reverse-complemented
//!   and emitted acceptor first, so every sequence reads 5' to 3'
//!
//! ## Example
//!
//! ```rust
//! use splice_flank::core::types::Strand;
//! use splice_flank::extraction::extractor::JunctionExtractor;
//! use splice_flank::reference::provider::ReferenceProvider;
//!
//! let reference = ReferenceProvider::from_sequences([("chr1", b"AAAACCCCGGGGTTTT".repeat(64))]);
//! let extractor = JunctionExtractor::new(&reference, 3);
//!
//! let junction = "1:500-600".parse().unwrap();
//! assert_eq!(extractor.extract(&junction, Strand::Forward).unwrap(), "AAAACCCCCCCGGG");
//! assert_eq!(extractor.extract(&junction, Strand::Reverse).unwrap(), "CCCGGGGGGGTTTT");
//! ```
//!
//! ## Modules
//!
//! - [`annotation`]: Gene-strand index and junction annotator
//! - [`core`]: Core data types for strands, junctions, contigs and sequences
//! - [`extraction`]: Junction sequence extraction, single and batch
//! - [`parsing`]: Parsers for GTF, FASTA, FAI and delimited tables
//! - [`reference`]: Reference sequence provider with name reconciliation
//! - [`cli`]: Command-line interface implementation

pub mod annotation;
pub mod cli;
pub mod core;
pub mod extraction;
pub mod parsing;
pub mod reference;
pub mod utils;

// Re-export commonly used types for convenience
pub use annotation::index::GeneStrandIndex;
pub use core::junction::{Junction, JunctionRecord};
pub use core::types::Strand;
pub use extraction::extractor::JunctionExtractor;
pub use reference::provider::ReferenceProvider;
