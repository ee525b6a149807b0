//! Parsers for the files this tool reads and writes.
//!
//! This module provides parsers for:
//!
//! - **GTF gene annotations**: gene-level rows with `gene_id`, `gene_name`, and strand
//! - **FASTA files**: full sequences for references without an index
//! - **FASTA index (.fai) files**: contig names and lengths for indexed access
//! - **Delimited tables**: junction tables (CSV or TSV) with a header row
//!
//! Plain and gzip/bgzip-compressed inputs are both accepted for GTF and FASTA.

use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use thiserror::Error;

pub mod fai;
pub mod fasta;
pub mod gtf;
pub mod table;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Required column '{column}' not found (available: {})", .available.join(", "))]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    #[error("Column '{column}' has {values} values but the table has {rows} rows")]
    ColumnLength {
        column: String,
        values: usize,
        rows: usize,
    },
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
pub fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Open a plain or gzip-compressed file for buffered line reading.
///
/// bgzip files are a series of gzip members, so a multi-member decoder is used.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be opened.
pub fn open_text(path: &Path) -> Result<Box<dyn BufRead>, ParseError> {
    let file = std::fs::File::open(path)?;
    if is_gzipped(path) {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_gzipped() {
        assert!(is_gzipped(Path::new("genes.gtf.gz")));
        assert!(is_gzipped(Path::new("ref.fa.bgz")));
        assert!(is_gzipped(Path::new("/data/REF.FA.GZ")));
        assert!(!is_gzipped(Path::new("genes.gtf")));
        assert!(!is_gzipped(Path::new("ref.fa")));
    }
}
