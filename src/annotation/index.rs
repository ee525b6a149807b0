use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use tracing::info;

use crate::core::types::Strand;
use crate::parsing::gtf::{read_gene_records, read_gtf_file, GeneRecord};
use crate::parsing::ParseError;

/// Lookup from gene identifier or gene name to strand.
///
/// Keys are case-sensitive. When the same key appears on several genes the
/// last one read wins.
#[derive(Debug, Clone, Default)]
pub struct GeneStrandIndex {
    strands: HashMap<String, Strand>,
}

impl GeneStrandIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from a plain or gzip-compressed GTF file
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Io` if the file cannot be read.
    pub fn from_gtf(path: &Path) -> Result<Self, ParseError> {
        info!("Parsing GTF file: {}", path.display());
        let index: Self = read_gtf_file(path)?.into_iter().collect();
        info!("Found {} gene strand mappings", index.len());
        Ok(index)
    }

    /// Build an index from GTF text
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Io` if a line cannot be read.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, ParseError> {
        Ok(read_gene_records(reader)?.into_iter().collect())
    }

    /// Record a gene under both its id and its name
    pub fn insert(&mut self, gene: GeneRecord) {
        for key in [gene.gene_id, gene.gene_name].into_iter().flatten() {
            self.strands.insert(key, gene.strand);
        }
    }

    #[must_use]
    pub fn lookup(&self, gene_key: &str) -> Option<Strand> {
        self.strands.get(gene_key).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.strands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strands.is_empty()
    }
}

impl FromIterator<GeneRecord> for GeneStrandIndex {
    fn from_iter<I: IntoIterator<Item = GeneRecord>>(iter: I) -> Self {
        let mut index = Self::new();
        for gene in iter {
            index.insert(gene);
        }
        index
    }
}
