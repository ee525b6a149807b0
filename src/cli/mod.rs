//! Command-line interface for splice-flank.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **annotate**: Add a `strand` column to a junction table from a GTF
//! - **extract**: Add a strand-aware flanking `sequence` column from a reference FASTA
//! - **pipeline**: Run both stages in one go
//!
//! ## Usage
//!
//! ```text
//! # Look up gene strands
//! splice-flank annotate -i junctions.csv -g Homo_sapiens.GRCh38.113.gtf -o with_strand.csv
//!
//! # Extract 1002 bp of donor + acceptor context per junction
//! splice-flank extract -i with_strand.csv -r GRCh38.primary_assembly.fa -o with_sequences.csv
//!
//! # Both at once, keeping bad junctions aside instead of aborting
//! splice-flank pipeline -i junctions.csv -g genes.gtf.gz -r GRCh38.fa -o out.csv \
//!     --on-error skip --failed failed.csv
//!
//! # Machine-readable summary
//! splice-flank extract -i with_strand.csv -r GRCh38.fa -o out.csv --format json
//! ```

use clap::{Parser, Subcommand};

use crate::utils::validation::parse_delimiter;

pub mod annotate;
pub mod extract;
pub mod pipeline;
pub mod report;

#[derive(Parser)]
#[command(name = "splice-flank")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Annotate splice junctions with gene strand and extract flanking sequence")]
#[command(
    long_about = "splice-flank prepares splice-junction tables for sequence models.\n\nIt looks up the strand of each junction's gene in a GTF annotation, then pulls a fixed-length window around the donor and acceptor sites from a reference FASTA:\n- Windows are reverse-complemented and swapped for minus-strand genes\n- Contig names are reconciled (chr1 / 1 / chr1|Y)\n- Windows running off contig ends are padded with N"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Summary output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Table delimiter (default: tab for .tsv/.txt, comma otherwise)
    #[arg(short, long, global = true, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add gene strand to each junction
    Annotate(annotate::AnnotateArgs),

    /// Extract strand-aware donor/acceptor sequence for each junction
    Extract(extract::ExtractArgs),

    /// Annotate strand, then extract sequence
    Pipeline(pipeline::PipelineArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
