//! Core data types for junction annotation and sequence extraction.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`Strand`](types::Strand): Orientation of a gene or junction (`+`, `-`, or unknown)
//! - [`Junction`](junction::Junction): A parsed `chrom:donor-acceptor` coordinate pair
//! - [`JunctionRecord`](junction::JunctionRecord): An identified junction with its strand
//! - [`Contig`](contig::Contig) / [`ContigTable`](contig::ContigTable): Named reference sequences and their lengths
//! - [`sequence`]: Nucleotide helpers (complement, reverse complement)
//!
//! ## Coordinates
//!
//! Junction positions are 1-based, matching the convention used by annotation
//! files and junction callers. Offsets into reference contigs are 0-based and
//! ranges are half-open.
//!
//! | Site     | Input position | Window (0-based, half-open)          |
//! |----------|----------------|--------------------------------------|
//! | donor    | `d`            | `[d - 1 - flank, d + flank)`         |
//! | acceptor | `a`            | `[a - 1 - flank, a + flank)`         |

pub mod contig;
pub mod junction;
pub mod sequence;
pub mod types;
