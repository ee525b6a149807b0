//! Gene-strand annotation of junction tables.
//!
//! - [`index::GeneStrandIndex`]: gene id / gene name -> strand, built from a GTF
//! - [`annotator`]: derives a gene key from each junction identifier and writes
//!   a `strand` column
//!
//! ## Example
//!
//! ```rust
//! use splice_flank::annotation::annotator::annotate_table;
//! use splice_flank::annotation::index::GeneStrandIndex;
//! use splice_flank::parsing::table::read_table_from;
//!
//! let gtf = "1\tsrc\tgene\t1\t100\t.\t-\t.\tgene_id \"ENSG1\"; gene_name \"FOO\";\n";
//! let index = GeneStrandIndex::from_reader(gtf.as_bytes()).unwrap();
//!
//! let mut table = read_table_from("lsv_id,junction\nFOO:s:1:2,1:10-20\n".as_bytes(), b',').unwrap();
//! let summary = annotate_table(&mut table, &index, None).unwrap();
//!
//! assert_eq!(summary.matched, 1);
//! assert_eq!(table.value(0, 2), "-");
//! ```

pub mod annotator;
pub mod index;
