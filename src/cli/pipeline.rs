use std::path::PathBuf;

use clap::Args;
use tracing::info;

use crate::annotation::index::GeneStrandIndex;
use crate::cli::annotate::{annotate, load_junctions};
use crate::cli::extract::{extract_stage, write_outcome, ExtractOptions};
use crate::cli::{report, OutputFormat};
use crate::parsing::table::{delimiter_for_path, write_table};
use crate::utils::validation::ensure_distinct;

#[derive(Args)]
pub struct PipelineArgs {
    /// Junction table (CSV or TSV) whose first column is a `GENE:...` identifier
    #[arg(short, long, required = true)]
    pub input: PathBuf,

    /// Gene annotation GTF (plain or gzipped)
    #[arg(short, long, required = true)]
    pub gtf: PathBuf,

    /// Output table with `strand` and `sequence` columns
    #[arg(short, long, required = true)]
    pub output: PathBuf,

    /// Also write the annotated table (all rows, before strand filtering)
    #[arg(long)]
    pub annotated: Option<PathBuf>,

    /// Column holding the junction identifier (default: first column)
    #[arg(long)]
    pub id_column: Option<String>,

    #[command(flatten)]
    pub options: ExtractOptions,
}

/// Execute pipeline subcommand
///
/// # Errors
///
/// Returns an error under the same conditions as `annotate` and `extract`.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: PipelineArgs, format: OutputFormat, delimiter: Option<u8>) -> anyhow::Result<()> {
    ensure_distinct(&args.input, &args.output)?;
    args.options.ensure_failed_distinct(&args.input)?;
    if let Some(annotated) = &args.annotated {
        ensure_distinct(&args.input, annotated)?;
    }

    let index = GeneStrandIndex::from_gtf(&args.gtf)?;
    let mut table = load_junctions(&args.input, delimiter)?;
    let annotation = annotate(&mut table, &index, args.id_column.as_deref())?;

    if let Some(path) = &args.annotated {
        info!("Saving annotated table to: {}", path.display());
        write_table(
            path,
            &table,
            delimiter.unwrap_or_else(|| delimiter_for_path(path)),
        )?;
    }

    let outcome = extract_stage(table, &args.options)?;
    write_outcome(&outcome, &args.output, &args.options, delimiter)?;

    report::print_pipeline_summary(&annotation, &outcome.summary, format)
}
