use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use tracing::{debug, info};

use crate::annotation::index::GeneStrandIndex;
use crate::core::types::{fraction, Strand};
use crate::extraction::batch::JUNCTION_COLUMN;
use crate::parsing::table::Table;
use crate::parsing::ParseError;

/// Separator between the gene symbol and the rest of a junction identifier
pub const GENE_KEY_SEPARATOR: char = ':';

/// Name of the column written by the annotator
pub const STRAND_COLUMN: &str = "strand";

const MAX_MISSING_EXAMPLES: usize = 10;

/// Extract the gene key from an identifier such as `FOO:s:1000:2000`.
///
/// Returns `None` if the identifier has no separator or nothing before it.
#[must_use]
pub fn gene_key(identifier: &str) -> Option<&str> {
    identifier
        .split_once(GENE_KEY_SEPARATOR)
        .map(|(key, _)| key.trim())
        .filter(|key| !key.is_empty())
}

/// A row whose gene key had no strand in the index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingExample {
    pub identifier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gene_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub junction: Option<String>,
}

/// Counts from annotating one table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnnotationSummary {
    /// Rows in the input table
    pub total: usize,
    /// Rows whose gene key was found in the index
    pub matched: usize,
    /// Rows with no gene key or a key absent from the index
    pub missing: usize,
    /// Distinct gene keys seen across all rows
    pub unique_gene_keys: usize,
    /// Matched rows by strand symbol
    pub strand_counts: BTreeMap<String, usize>,
    /// The first few unmatched rows
    pub missing_examples: Vec<MissingExample>,
}

impl AnnotationSummary {
    /// Fraction of rows with a strand, 0.0 for an empty table
    #[must_use]
    pub fn success_rate(&self) -> f64 {
        fraction(self.matched, self.total)
    }
}

/// Write a `strand` column derived from each row's identifier.
///
/// The identifier is read from `id_column` if given, else from the first
/// column. Rows whose gene key is not in `index` get `.`. An existing `strand`
/// column is overwritten; otherwise one is appended.
///
/// # Errors
///
/// Returns `ParseError::MissingColumn` if `id_column` is not in the table or
/// the table has no columns.
pub fn annotate_table(
    table: &mut Table,
    index: &GeneStrandIndex,
    id_column: Option<&str>,
) -> Result<AnnotationSummary, ParseError> {
    let id_index = match id_column {
        Some(name) => table.require_column(name)?,
        None if table.headers.is_empty() => {
            return Err(ParseError::MissingColumn {
                column: "identifier".to_string(),
                available: Vec::new(),
            })
        }
        None => 0,
    };
    let junction_index = table.find_column(JUNCTION_COLUMN);

    let mut summary = AnnotationSummary {
        total: table.len(),
        ..AnnotationSummary::default()
    };
    let mut keys = HashSet::new();
    let mut strands = Vec::with_capacity(table.len());

    for row in 0..table.len() {
        let identifier = table.value(row, id_index);
        let key = gene_key(identifier);
        if let Some(key) = key {
            keys.insert(key.to_string());
        }

        match key.and_then(|k| index.lookup(k)) {
            Some(strand) => {
                summary.matched += 1;
                *summary
                    .strand_counts
                    .entry(strand.symbol().to_string())
                    .or_default() += 1;
                strands.push(strand.symbol().to_string());
            }
            None => {
                summary.missing += 1;
                if summary.missing_examples.len() < MAX_MISSING_EXAMPLES {
                    summary.missing_examples.push(MissingExample {
                        identifier: identifier.to_string(),
                        gene_key: key.map(str::to_string),
                        junction: junction_index.map(|j| table.value(row, j).to_string()),
                    });
                }
                strands.push(Strand::Unknown.symbol().to_string());
            }
        }
    }
    summary.unique_gene_keys = keys.len();

    table.set_column(STRAND_COLUMN, strands)?;

    info!(
        "Annotated {} junctions: {} with strand, {} missing",
        summary.total, summary.matched, summary.missing
    );
    for example in &summary.missing_examples {
        debug!("No strand for {}", example.identifier);
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::table::read_table_from;

    fn index() -> GeneStrandIndex {
        let gtf = "\
1\tsrc\tgene\t1\t10\t.\t+\t.\tgene_id \"ENSG1\"; gene_name \"FOO\";
1\tsrc\tgene\t50\t90\t.\t-\t.\tgene_id \"ENSG2\"; gene_name \"BAR\";
";
        GeneStrandIndex::from_reader(gtf.as_bytes()).unwrap()
    }

    #[test]
    fn test_gene_key() {
        assert_eq!(gene_key("FOO:s:1000:2000"), Some("FOO"));
        assert_eq!(gene_key("ENSG1:t:1-2"), Some("ENSG1"));
        assert_eq!(gene_key("NOSEPARATOR"), None);
        assert_eq!(gene_key(":s:1"), None);
    }

    #[test]
    fn test_annotate_table() {
        let csv = "\
lsv_id,junction,psi
FOO:s:1:2,chr1:10-20,0.5
BAR:t:3:4,chr1:60-80,0.2
BAZ:s:5:6,chr2:1-9,0.9
FOO:t:7:8,chr1:3-7,0.1
nokey,chr3:1-2,0.0
";
        let mut table = read_table_from(csv.as_bytes(), b',').unwrap();
        let summary = annotate_table(&mut table, &index(), None).unwrap();

        assert_eq!(table.headers, vec!["lsv_id", "junction", "psi", "strand"]);
        let strands: Vec<&str> = (0..table.len()).map(|r| table.value(r, 3)).collect();
        assert_eq!(strands, vec!["+", "-", ".", "+", "."]);

        assert_eq!(summary.total, 5);
        assert_eq!(summary.matched, 3);
        assert_eq!(summary.missing, 2);
        assert_eq!(summary.unique_gene_keys, 3);
        assert_eq!(summary.strand_counts.get("+"), Some(&2));
        assert_eq!(summary.strand_counts.get("-"), Some(&1));
        assert!((summary.success_rate() - 0.6).abs() < 1e-9);

        assert_eq!(summary.missing_examples.len(), 2);
        assert_eq!(summary.missing_examples[0].gene_key.as_deref(), Some("BAZ"));
        assert_eq!(summary.missing_examples[0].junction.as_deref(), Some("chr2:1-9"));
        assert_eq!(summary.missing_examples[1].gene_key, None);
    }

    #[test]
    fn test_annotate_overwrites_existing_strand() {
        let csv = "strand,id\n-,FOO:s:1:2\n";
        let mut table = read_table_from(csv.as_bytes(), b',').unwrap();
        annotate_table(&mut table, &index(), Some("id")).unwrap();

        assert_eq!(table.headers, vec!["strand", "id"]);
        assert_eq!(table.value(0, 0), "+");
    }

    #[test]
    fn test_annotate_missing_id_column() {
        let mut table = read_table_from("a,b\n1,2\n".as_bytes(), b',').unwrap();
        let result = annotate_table(&mut table, &index(), Some("lsv_id"));
        assert!(matches!(result, Err(ParseError::MissingColumn { .. })));
    }

    #[test]
    fn test_annotate_empty_table() {
        let mut table = read_table_from("lsv_id\n".as_bytes(), b',').unwrap();
        let summary = annotate_table(&mut table, &index(), None).unwrap();
        assert_eq!(summary.total, 0);
        assert!(summary.success_rate().abs() < f64::EPSILON);
        assert_eq!(table.headers, vec!["lsv_id", "strand"]);
    }
}
