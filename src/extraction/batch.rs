use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::annotation::annotator::STRAND_COLUMN;
use crate::core::junction::{JunctionError, JunctionRecord};
use crate::core::types::{fraction, FailurePolicy, Strand};
use crate::extraction::extractor::JunctionExtractor;
use crate::extraction::{sequence_length, ExtractError};
use crate::parsing::table::Table;
use crate::parsing::ParseError;

/// Column holding `chrom:donor-acceptor`
pub const JUNCTION_COLUMN: &str = "junction";

/// Column inserted right after `strand`
pub const SEQUENCE_COLUMN: &str = "sequence";

/// Column appended to the failures table
pub const ERROR_COLUMN: &str = "error";

/// Counts from one extraction run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractionSummary {
    /// Rows in the input table
    pub total: usize,
    /// Rows dropped because their strand was `.`, empty, or missing
    pub unstranded: usize,
    /// Rows written with a sequence
    pub extracted: usize,
    /// Rows that could not be extracted (only non-zero when skipping failures)
    pub failed: usize,
    /// Bases either side of each site
    pub flank: u64,
    /// Length of every written sequence
    pub sequence_length: u64,
    /// Written rows by strand symbol
    pub strand_counts: BTreeMap<String, usize>,
}

impl ExtractionSummary {
    /// Fraction of input rows written with a sequence, 0.0 for an empty table
    #[must_use]
    pub fn success_rate(&self) -> f64 {
        fraction(self.extracted, self.total)
    }
}

/// Result of extracting a whole table
#[derive(Debug, Clone)]
pub struct ExtractionOutcome {
    /// Input rows with a known strand and a sequence, `sequence` placed after `strand`
    pub table: Table,
    /// Rows that failed, with an `error` column
    pub failures: Table,
    pub summary: ExtractionSummary,
}

/// A junction table with unstranded rows removed, ready for extraction
#[derive(Debug, Clone)]
pub struct JunctionBatch {
    table: Table,
    junction_column: usize,
    strand_column: usize,
    summary: ExtractionSummary,
}

impl JunctionBatch {
    /// Check for the `junction` and `strand` columns and drop rows without a known strand.
    ///
    /// Any existing `sequence` column is removed; it is recomputed.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::MissingColumn` if either required column is absent.
    pub fn from_table(mut table: Table, flank: u64) -> Result<Self, ParseError> {
        table.require_column(JUNCTION_COLUMN)?;
        table.require_column(STRAND_COLUMN)?;
        table.remove_column(SEQUENCE_COLUMN);

        let junction_column = table.require_column(JUNCTION_COLUMN)?;
        let strand_column = table.require_column(STRAND_COLUMN)?;

        let total = table.len();
        table
            .rows
            .retain(|row| row.get(strand_column).is_some_and(|s| Strand::parse(s).is_known()));
        let unstranded = total - table.len();

        info!("Dropped {unstranded} junctions with missing strand information");
        info!("Remaining junctions: {}", table.len());

        Ok(Self {
            table,
            junction_column,
            strand_column,
            summary: ExtractionSummary {
                total,
                unstranded,
                flank,
                sequence_length: sequence_length(flank),
                ..ExtractionSummary::default()
            },
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    #[must_use]
    pub fn summary(&self) -> &ExtractionSummary {
        &self.summary
    }

    /// Finish without touching a reference when there is nothing to extract.
    ///
    /// # Errors
    ///
    /// Returns `ExtractError::Table` if the batch still has rows, since they
    /// would be left without a sequence.
    pub fn into_empty_outcome(self) -> Result<ExtractionOutcome, ExtractError> {
        let failures = self.failures_table();
        self.finish(Vec::new(), failures)
    }

    /// Extract a sequence for every row.
    ///
    /// Every junction is parsed before any sequence is fetched, so malformed
    /// coordinates stop an aborting run before the reference is read.
    ///
    /// # Errors
    ///
    /// With `FailurePolicy::Abort`, returns the first per-record failure wrapped in
    /// `ExtractError::Record`. With `FailurePolicy::Skip`, never fails; failed rows
    /// are moved to the failures table.
    pub fn extract(
        mut self,
        extractor: &JunctionExtractor<'_>,
        policy: FailurePolicy,
    ) -> Result<ExtractionOutcome, ExtractError> {
        let rows = std::mem::take(&mut self.table.rows);

        let parsed: Vec<Result<JunctionRecord, JunctionError>> = rows
            .iter()
            .map(|row| {
                JunctionRecord::from_fields(
                    field(row, 0),
                    field(row, self.junction_column),
                    field(row, self.strand_column),
                )
            })
            .collect();

        if policy == FailurePolicy::Abort {
            for (row, record) in rows.iter().zip(&parsed) {
                if let Err(err) = record {
                    return Err(record_error(row, err.clone().into()));
                }
            }
        }

        let mut failures = self.failures_table();
        let mut kept = Vec::with_capacity(rows.len());
        let mut sequences = Vec::with_capacity(rows.len());

        for (row, record) in rows.into_iter().zip(parsed) {
            let result = record
                .map_err(ExtractError::from)
                .and_then(|r| extractor.extract(&r.junction, r.strand));
            match result {
                Ok(sequence) => {
                    debug!("Extracted {} ({} bases)", field(&row, 0), sequence.len());
                    sequences.push(sequence);
                    kept.push(row);
                }
                Err(err) if policy == FailurePolicy::Skip => {
                    warn!("Skipping {}: {err}", field(&row, 0));
                    let mut failed = row;
                    failed.push(err.to_string());
                    failures.rows.push(failed);
                }
                Err(err) => return Err(record_error(&row, err)),
            }
        }

        self.table.rows = kept;
        self.finish(sequences, failures)
    }

    fn failures_table(&self) -> Table {
        let mut headers = self.table.headers.clone();
        headers.push(ERROR_COLUMN.to_string());
        Table::new(headers)
    }

    fn finish(
        mut self,
        sequences: Vec<String>,
        failures: Table,
    ) -> Result<ExtractionOutcome, ExtractError> {
        for row in &self.table.rows {
            let symbol = Strand::parse(field(row, self.strand_column)).symbol();
            *self
                .summary
                .strand_counts
                .entry(symbol.to_string())
                .or_default() += 1;
        }
        self.summary.extracted = sequences.len();
        self.summary.failed = failures.len();

        self.table
            .insert_column(self.strand_column + 1, SEQUENCE_COLUMN, sequences)?;

        info!(
            "Extracted {} sequences ({} failed)",
            self.summary.extracted, self.summary.failed
        );

        Ok(ExtractionOutcome {
            table: self.table,
            failures,
            summary: self.summary,
        })
    }
}

fn field(row: &[String], index: usize) -> &str {
    row.get(index).map_or("", String::as_str)
}

fn record_error(row: &[String], source: ExtractError) -> ExtractError {
    ExtractError::Record {
        identifier: field(row, 0).to_string(),
        source: Box::new(source),
    }
}
