//! Gene-level record extraction from GTF annotation files.
//!
//! Only `gene` rows are of interest. From each one we keep the `gene_id` and
//! `gene_name` attributes and the strand column. Attribute values may be
//! double-quoted (`gene_id "ENSG00000223972";`) or bare (`gene_id ENSG00000223972;`).

use std::io::BufRead;
use std::path::Path;

use tracing::debug;

use crate::core::types::Strand;
use crate::parsing::{open_text, ParseError};

const GENE_FEATURE: &str = "gene";
const STRAND_COLUMN: usize = 6;
const FEATURE_COLUMN: usize = 2;
const ATTRIBUTE_COLUMN: usize = 8;

/// The strand-relevant parts of a GTF `gene` row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneRecord {
    pub gene_id: Option<String>,
    pub gene_name: Option<String>,
    pub strand: Strand,
}

/// Parse one GTF line. Returns `None` for comments, short lines, and non-gene features.
#[must_use]
pub fn parse_gene_line(line: &str) -> Option<GeneRecord> {
    if line.starts_with('#') {
        return None;
    }

    let fields: Vec<&str> = line.trim_end_matches(['\r', '\n']).split('\t').collect();
    if fields.len() <= ATTRIBUTE_COLUMN || fields[FEATURE_COLUMN] != GENE_FEATURE {
        return None;
    }

    let mut gene_id = None;
    let mut gene_name = None;
    for (key, value) in attributes(fields[ATTRIBUTE_COLUMN]) {
        match key {
            "gene_id" => gene_id = Some(value.to_string()),
            "gene_name" => gene_name = Some(value.to_string()),
            _ => {}
        }
    }

    Some(GeneRecord {
        gene_id,
        gene_name,
        strand: Strand::parse(fields[STRAND_COLUMN]),
    })
}

/// Split a GTF attribute column into `(key, value)` pairs with quotes removed.
fn attributes(column: &str) -> impl Iterator<Item = (&str, &str)> {
    column.split(';').filter_map(|attr| {
        let (key, value) = attr.trim().split_once(char::is_whitespace)?;
        let value = value.trim();
        let value = value
            .strip_prefix('"')
            .and_then(|v| v.split_once('"').map(|(inner, _)| inner))
            .unwrap_or(value);
        (!value.is_empty()).then_some((key, value))
    })
}

/// Read all gene records from a GTF stream
///
/// # Errors
///
/// Returns `ParseError::Io` if a line cannot be read.
pub fn read_gene_records<R: BufRead>(reader: R) -> Result<Vec<GeneRecord>, ParseError> {
    let mut genes = Vec::new();
    let mut lines = 0usize;

    for line in reader.lines() {
        let line = line?;
        lines += 1;
        if let Some(gene) = parse_gene_line(&line) {
            genes.push(gene);
        }
    }

    debug!("Scanned {lines} GTF lines, {} gene records", genes.len());
    Ok(genes)
}

/// Read all gene records from a plain or gzip-compressed GTF file
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be opened or read.
pub fn read_gtf_file(path: &Path) -> Result<Vec<GeneRecord>, ParseError> {
    read_gene_records(open_text(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GTF: &str = "#!genome-build GRCh38.p14
1\thavana\tgene\t11869\t14409\t.\t+\t.\tgene_id \"ENSG00000290825\"; gene_version \"1\"; gene_name \"DDX11L2\"; gene_source \"havana\";
1\thavana\ttranscript\t11869\t14409\t.\t+\t.\tgene_id \"ENSG00000290825\"; transcript_id \"ENST00000456328\";
1\thavana\tgene\t14404\t29570\t.\t-\t.\tgene_id \"ENSG00000227232\"; gene_name \"WASH7P\";
";

    #[test]
    fn test_parse_gene_line_quoted() {
        let line = "chr1\tHAVANA\tgene\t100\t200\t.\t-\t.\tgene_id \"ENSG1\"; gene_name \"FOO\";";
        let gene = parse_gene_line(line).unwrap();
        assert_eq!(gene.gene_id.as_deref(), Some("ENSG1"));
        assert_eq!(gene.gene_name.as_deref(), Some("FOO"));
        assert_eq!(gene.strand, Strand::Reverse);
    }

    #[test]
    fn test_parse_gene_line_unquoted() {
        let line = "chr2\tsrc\tgene\t1\t50\t.\t+\t.\tgene_id ENSG2; gene_name BAR";
        let gene = parse_gene_line(line).unwrap();
        assert_eq!(gene.gene_id.as_deref(), Some("ENSG2"));
        assert_eq!(gene.gene_name.as_deref(), Some("BAR"));
        assert_eq!(gene.strand, Strand::Forward);
    }

    #[test]
    fn test_similar_attribute_keys_not_confused() {
        let line = "1\tsrc\tgene\t1\t50\t.\t+\t.\tgene_id_version \"X.1\"; gene_id \"X\"; gene_name_source \"HGNC\";";
        let gene = parse_gene_line(line).unwrap();
        assert_eq!(gene.gene_id.as_deref(), Some("X"));
        assert_eq!(gene.gene_name, None);
    }

    #[test]
    fn test_parse_gene_line_skips() {
        assert!(parse_gene_line("#comment").is_none());
        assert!(parse_gene_line("").is_none());
        assert!(parse_gene_line("1\tsrc\tgene\t1\t50").is_none());
        assert!(parse_gene_line("1\tsrc\texon\t1\t50\t.\t+\t.\tgene_id \"X\";").is_none());
    }

    #[test]
    fn test_unstranded_gene() {
        let line = "1\tsrc\tgene\t1\t50\t.\t.\t.\tgene_id \"X\";";
        assert_eq!(parse_gene_line(line).unwrap().strand, Strand::Unknown);
    }

    #[test]
    fn test_read_gene_records() {
        let genes = read_gene_records(GTF.as_bytes()).unwrap();
        assert_eq!(genes.len(), 2);
        assert_eq!(genes[0].gene_name.as_deref(), Some("DDX11L2"));
        assert_eq!(genes[1].gene_id.as_deref(), Some("ENSG00000227232"));
        assert_eq!(genes[1].strand, Strand::Reverse);
    }
}
