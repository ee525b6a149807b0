//! Parser for FASTA index (.fai) files using noodles.
//!
//! FAI format provides name, length and byte layout for each contig.
//! Format: `name\tlength\toffset\tline_bases\tline_width`
//!
//! An uncompressed FASTA without an index can be indexed on the fly, in the
//! same way as `samtools faidx`.

use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use noodles::fasta;

use crate::core::contig::{Contig, ContigTable};
use crate::parsing::ParseError;

/// Path of the `.fai` index expected next to a FASTA file (`ref.fa` -> `ref.fa.fai`)
#[must_use]
pub fn fai_path_for(fasta_path: &Path) -> PathBuf {
    let mut path = fasta_path.as_os_str().to_owned();
    path.push(".fai");
    PathBuf::from(path)
}

/// Read a FASTA index (.fai) file using noodles
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::Noodles` if
/// parsing fails, or `ParseError::InvalidFormat` if no contigs are found.
pub fn read_fai_file(path: &Path) -> Result<fasta::fai::Index, ParseError> {
    let reader = std::fs::File::open(path).map(BufReader::new)?;

    let index = fasta::fai::io::Reader::new(reader)
        .read_index()
        .map_err(|e| ParseError::Noodles(format!("Failed to parse FAI file: {e}")))?;

    if index.as_ref().is_empty() {
        return Err(ParseError::InvalidFormat(
            "No contigs found in FAI file".to_string(),
        ));
    }

    Ok(index)
}

/// Build a `.fai` index by scanning an uncompressed FASTA file.
///
/// # Errors
///
/// Returns `ParseError::Noodles` if the FASTA cannot be indexed (for example,
/// uneven line lengths within a record), or `ParseError::InvalidFormat` if it
/// holds no sequences.
pub fn index_fasta(fasta_path: &Path) -> Result<fasta::fai::Index, ParseError> {
    let index = fasta::io::index(fasta_path).map_err(|e| {
        ParseError::Noodles(format!(
            "Failed to index FASTA {}: {e}",
            fasta_path.display()
        ))
    })?;

    if index.as_ref().is_empty() {
        return Err(ParseError::InvalidFormat(
            "No sequences found in FASTA file".to_string(),
        ));
    }

    Ok(index)
}

/// Write a FASTA index (.fai) file
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be created or written.
pub fn write_fai_file(path: &Path, index: &fasta::fai::Index) -> Result<(), ParseError> {
    let mut writer = std::fs::File::create(path)
        .map(BufWriter::new)
        .map(fasta::fai::io::Writer::new)?;
    writer.write_index(index)?;
    writer.get_mut().flush()?;
    Ok(())
}

/// Contig names and lengths from a noodles FAI index
#[must_use]
pub fn index_to_contigs(index: &fasta::fai::Index) -> ContigTable {
    index
        .as_ref()
        .iter()
        .map(|record| {
            let name = String::from_utf8_lossy(record.name()).to_string();
            Contig::new(name, record.length())
        })
        .collect()
}
