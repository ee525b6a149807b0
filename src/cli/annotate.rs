use std::path::PathBuf;

use clap::Args;
use tracing::{info, warn};

use crate::annotation::annotator::{annotate_table, AnnotationSummary};
use crate::annotation::index::GeneStrandIndex;
use crate::cli::{report, OutputFormat};
use crate::parsing::table::{delimiter_for_path, read_table, write_table, Table};
use crate::utils::validation::ensure_distinct;

#[derive(Args)]
pub struct AnnotateArgs {
    /// Junction table (CSV or TSV) whose first column is a `GENE:...` identifier
    #[arg(short, long, required = true)]
    pub input: PathBuf,

    /// Gene annotation GTF (plain or gzipped)
    #[arg(short, long, required = true)]
    pub gtf: PathBuf,

    /// Output table with a `strand` column added
    #[arg(short, long, required = true)]
    pub output: PathBuf,

    /// Column holding the junction identifier (default: first column)
    #[arg(long)]
    pub id_column: Option<String>,
}

/// Execute annotate subcommand
///
/// # Errors
///
/// Returns an error if the GTF or junction table cannot be read, the identifier
/// column is missing, or the output cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: AnnotateArgs, format: OutputFormat, delimiter: Option<u8>) -> anyhow::Result<()> {
    ensure_distinct(&args.input, &args.output)?;

    let index = GeneStrandIndex::from_gtf(&args.gtf)?;
    let mut table = load_junctions(&args.input, delimiter)?;
    let summary = annotate(&mut table, &index, args.id_column.as_deref())?;

    info!("Saving output to: {}", args.output.display());
    write_table(
        &args.output,
        &table,
        delimiter.unwrap_or_else(|| delimiter_for_path(&args.output)),
    )?;

    report::print_annotation_summary(&summary, format)
}

/// Read a junction table, picking the delimiter from the path unless one is given
pub(crate) fn load_junctions(
    path: &std::path::Path,
    delimiter: Option<u8>,
) -> anyhow::Result<Table> {
    info!("Reading junction table: {}", path.display());
    let table = read_table(path, delimiter.unwrap_or_else(|| delimiter_for_path(path)))
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;
    info!(
        "Loaded {} junctions with {} columns",
        table.len(),
        table.headers.len()
    );
    Ok(table)
}

pub(crate) fn annotate(
    table: &mut Table,
    index: &GeneStrandIndex,
    id_column: Option<&str>,
) -> anyhow::Result<AnnotationSummary> {
    if index.is_empty() {
        warn!("Gene index is empty; every junction will be unstranded");
    }
    Ok(annotate_table(table, index, id_column)?)
}
