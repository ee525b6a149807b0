use std::path::{Path, PathBuf};

use clap::Args;
use tracing::{info, warn};

use crate::cli::annotate::load_junctions;
use crate::cli::{report, OutputFormat};
use crate::core::types::FailurePolicy;
use crate::extraction::batch::{ExtractionOutcome, JunctionBatch};
use crate::extraction::extractor::JunctionExtractor;
use crate::extraction::DEFAULT_FLANK;
use crate::parsing::table::{delimiter_for_path, write_table, Table};
use crate::reference::provider::ReferenceProvider;
use crate::utils::validation::{ensure_distinct, parse_flank, ValidationError};

/// Options shared by `extract` and `pipeline`
#[derive(Args, Clone)]
pub struct ExtractOptions {
    /// Reference genome FASTA (indexed with a .fai for random access)
    #[arg(short, long, required = true)]
    pub reference: PathBuf,

    /// Bases of context taken either side of each splice site
    #[arg(long, default_value_t = DEFAULT_FLANK, value_parser = parse_flank)]
    pub flank: u64,

    /// What to do with a junction whose sequence cannot be extracted
    #[arg(long, value_enum, default_value = "abort")]
    pub on_error: FailurePolicy,

    /// Write junctions that failed extraction here, with an `error` column
    #[arg(long)]
    pub failed: Option<PathBuf>,
}

impl ExtractOptions {
    /// Refuse a `--failed` path that would overwrite the input table
    pub(crate) fn ensure_failed_distinct(&self, input: &Path) -> Result<(), ValidationError> {
        match &self.failed {
            Some(failed) => ensure_distinct(input, failed),
            None => Ok(()),
        }
    }
}

#[derive(Args)]
pub struct ExtractArgs {
    /// Junction table with `junction` and `strand` columns
    #[arg(short, long, required = true)]
    pub input: PathBuf,

    /// Output table with a `sequence` column after `strand`
    #[arg(short, long, required = true)]
    pub output: PathBuf,

    #[command(flatten)]
    pub options: ExtractOptions,
}

/// Execute extract subcommand
///
/// # Errors
///
/// Returns an error if the table lacks `junction` or `strand` columns, the
/// reference cannot be opened, a junction fails under `--on-error abort`, or an
/// output cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ExtractArgs, format: OutputFormat, delimiter: Option<u8>) -> anyhow::Result<()> {
    ensure_distinct(&args.input, &args.output)?;
    args.options.ensure_failed_distinct(&args.input)?;

    let table = load_junctions(&args.input, delimiter)?;
    let outcome = extract_stage(table, &args.options)?;
    write_outcome(&outcome, &args.output, &args.options, delimiter)?;

    report::print_extraction_summary(&outcome.summary, format)
}

/// Filter, open the reference if there is anything to extract, and extract.
pub(crate) fn extract_stage(
    table: Table,
    options: &ExtractOptions,
) -> anyhow::Result<ExtractionOutcome> {
    let batch = JunctionBatch::from_table(table, options.flank)?;

    if batch.is_empty() {
        warn!("No junctions with strand information found");
        return Ok(batch.into_empty_outcome()?);
    }

    info!("Loading reference genome: {}", options.reference.display());
    let reference = ReferenceProvider::open(&options.reference)?;
    let extractor = JunctionExtractor::new(&reference, options.flank);

    info!(
        "Extracting {} sequences with strand-aware orientation (flank {})",
        batch.len(),
        options.flank
    );
    Ok(batch.extract(&extractor, options.on_error)?)
}

pub(crate) fn write_outcome(
    outcome: &ExtractionOutcome,
    output: &Path,
    options: &ExtractOptions,
    delimiter: Option<u8>,
) -> anyhow::Result<()> {
    info!(
        "Writing {} junctions with sequences to {}",
        outcome.table.len(),
        output.display()
    );
    write_table(
        output,
        &outcome.table,
        delimiter.unwrap_or_else(|| delimiter_for_path(output)),
    )?;

    match &options.failed {
        Some(path) => {
            info!(
                "Writing {} failed junctions to {}",
                outcome.failures.len(),
                path.display()
            );
            write_table(
                path,
                &outcome.failures,
                delimiter.unwrap_or_else(|| delimiter_for_path(path)),
            )?;
        }
        None if !outcome.failures.is_empty() => {
            warn!(
                "{} junctions failed extraction and were dropped (use --failed to keep them)",
                outcome.failures.len()
            );
        }
        None => {}
    }

    Ok(())
}
