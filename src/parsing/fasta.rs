//! Parser for FASTA files using noodles.
//!
//! Used for gzip-compressed references, which cannot be read at random: every
//! record is read into memory. Uncompressed files are read the same way.
//!
//! Supported extensions:
//! - `.fa`, `.fasta`, `.fna` (uncompressed)
//! - `.fa.gz`, `.fasta.gz`, `.fna.gz` (gzip compressed)
//! - `.fa.bgz`, `.fasta.bgz`, `.fna.bgz` (bgzip compressed)

use std::io::BufRead;
use std::path::Path;

use noodles::fasta;

use crate::parsing::{open_text, ParseError};

/// Maximum number of sequences accepted from a single FASTA file
pub const MAX_SEQUENCES: usize = 1_000_000;

/// Recognised FASTA extensions, optionally followed by `.gz` or `.bgz`
const FASTA_EXTENSIONS: [&str; 3] = [".fa", ".fasta", ".fna"];

/// Check if the path has a FASTA extension (case-insensitive, compressed or not)
#[must_use]
pub fn is_fasta_file(path: &Path) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    let name = name.to_string_lossy().to_lowercase();
    let stem = name
        .strip_suffix(".gz")
        .or_else(|| name.strip_suffix(".bgz"))
        .unwrap_or(name.as_str());

    FASTA_EXTENSIONS.iter().any(|ext| stem.ends_with(ext))
}

/// Read every sequence from a FASTA file as `(name, bases)` pairs in file order.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::Noodles` if
/// parsing fails, or `ParseError::InvalidFormat` if no sequences are found or the
/// sequence limit is exceeded.
pub fn read_fasta_sequences(path: &Path) -> Result<Vec<(String, Vec<u8>)>, ParseError> {
    let mut reader = fasta::io::Reader::new(open_text(path)?);
    read_sequences(&mut reader)
}

/// Read sequences from a noodles FASTA reader
fn read_sequences<R: BufRead>(
    reader: &mut fasta::io::Reader<R>,
) -> Result<Vec<(String, Vec<u8>)>, ParseError> {
    let mut sequences = Vec::new();

    for result in reader.records() {
        let record = result
            .map_err(|e| ParseError::Noodles(format!("Failed to parse FASTA record: {e}")))?;

        if sequences.len() >= MAX_SEQUENCES {
            return Err(ParseError::InvalidFormat(format!(
                "FASTA file has more than {MAX_SEQUENCES} sequences"
            )));
        }

        let name = String::from_utf8_lossy(record.name()).to_string();
        let bases = record.sequence().as_ref().to_vec();
        sequences.push((name, bases));
    }

    if sequences.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No sequences found in FASTA file".to_string(),
        ));
    }

    Ok(sequences)
}
