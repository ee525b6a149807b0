//! Strand-aware junction sequence extraction.
//!
//! For every junction with a known strand, the flanking windows around the
//! donor and acceptor are fetched from the reference and joined in
//! transcript (5' to 3') order:
//!
//! | Strand | Output                                            |
//! |--------|---------------------------------------------------|
//! | `+`    | `donor window` + `acceptor window`                |
//! | `-`    | `rc(acceptor window)` + `rc(donor window)`        |
//!
//! The result is upper-cased and always `2 * (2 * flank + 1)` bases long.
//!
//! - [`extractor::JunctionExtractor`]: one junction at a time
//! - [`batch`]: whole tables, with strand filtering and a failure policy

use thiserror::Error;

use crate::core::junction::JunctionError;
use crate::parsing::ParseError;
use crate::reference::ReferenceError;

pub mod batch;
pub mod extractor;

/// Default number of bases taken either side of each splice site
pub const DEFAULT_FLANK: u64 = 250;

/// Length of every extracted sequence: two windows of `2 * flank + 1` bases
#[must_use]
pub const fn sequence_length(flank: u64) -> u64 {
    2 * (2 * flank + 1)
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error(transparent)]
    MalformedJunction(#[from] JunctionError),

    #[error(transparent)]
    Reference(#[from] ReferenceError),

    #[error(transparent)]
    Table(#[from] ParseError),

    #[error("Junction {0} has no known strand")]
    UnstrandedJunction(String),

    #[error("Junction record '{identifier}': {source}")]
    Record {
        identifier: String,
        #[source]
        source: Box<ExtractError>,
    },
}
