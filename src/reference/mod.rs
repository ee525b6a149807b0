//! Random-access reference sequence retrieval.
//!
//! A [`ReferenceProvider`](provider::ReferenceProvider) wraps a FASTA file and
//! answers "give me `flank` bases either side of this 1-based position on this
//! contig". It handles:
//!
//! - **Name reconciliation**: junction callers and references disagree on `chr`
//!   prefixes; see [`names::resolve_contig_name`]
//! - **Boundary padding**: windows that run off either end of a contig are
//!   filled with `N` so the result always has exactly `2 * flank + 1` bases
//!
//! ## Example
//!
//! ```rust,no_run
//! use splice_flank::reference::provider::ReferenceProvider;
//! use std::path::Path;
//!
//! let reference = ReferenceProvider::open(Path::new("GRCh38.fa")).unwrap();
//!
//! // "1" resolves to "chr1" if that is how the FASTA names it
//! let window = reference.fetch("1", 1_000_000, 250).unwrap();
//! assert_eq!(window.len(), 501);
//! ```

use thiserror::Error;

use crate::parsing::ParseError;

pub mod names;
pub mod provider;
pub mod store;

#[derive(Error, Debug)]
pub enum ReferenceError {
    #[error("Contig '{name}' not found in reference (tried {})", .attempted.join(", "))]
    ContigNotFound {
        name: String,
        attempted: Vec<String>,
    },

    #[error("Invalid position {position} on contig '{contig}': positions are 1-based")]
    InvalidPosition { contig: String, position: u64 },

    #[error("Invalid range {start}..{end} on contig '{contig}'")]
    InvalidRange { contig: String, start: u64, end: u64 },

    #[error("Flank {0} is too large")]
    FlankTooLarge(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error(transparent)]
    Parse(#[from] ParseError),
}
