//! Run summaries printed to stdout after each command.

use crate::annotation::annotator::AnnotationSummary;
use crate::cli::OutputFormat;
use crate::extraction::batch::ExtractionSummary;

/// Print the annotate summary
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn print_annotation_summary(
    summary: &AnnotationSummary,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => print_annotation_text(summary),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&annotation_json(summary)?)?);
        }
        OutputFormat::Tsv => {
            println!("metric\tvalue");
            print_annotation_tsv(summary);
        }
    }
    Ok(())
}

/// Print the extract summary
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn print_extraction_summary(
    summary: &ExtractionSummary,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => print_extraction_text(summary),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&extraction_json(summary)?)?);
        }
        OutputFormat::Tsv => {
            println!("metric\tvalue");
            print_extraction_tsv(summary);
        }
    }
    Ok(())
}

/// Print both summaries of a pipeline run; JSON output is a single object
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn print_pipeline_summary(
    annotation: &AnnotationSummary,
    extraction: &ExtractionSummary,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            print_annotation_text(annotation);
            println!();
            print_extraction_text(extraction);
        }
        OutputFormat::Json => {
            let json = serde_json::json!({
                "annotation": annotation_json(annotation)?,
                "extraction": extraction_json(extraction)?,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Tsv => {
            println!("metric\tvalue");
            print_annotation_tsv(annotation);
            print_extraction_tsv(extraction);
        }
    }
    Ok(())
}

fn annotation_json(summary: &AnnotationSummary) -> anyhow::Result<serde_json::Value> {
    let mut json = serde_json::to_value(summary)?;
    json["success_rate"] = serde_json::json!(summary.success_rate());
    Ok(json)
}

fn extraction_json(summary: &ExtractionSummary) -> anyhow::Result<serde_json::Value> {
    let mut json = serde_json::to_value(summary)?;
    json["success_rate"] = serde_json::json!(summary.success_rate());
    Ok(json)
}

fn print_annotation_text(summary: &AnnotationSummary) {
    println!("Strand Annotation");
    println!("{}", "=".repeat(60));
    println!("Total junctions:              {}", summary.total);
    println!("Unique gene symbols:          {}", summary.unique_gene_keys);
    println!("With strand information:      {}", summary.matched);
    println!("Missing strand information:   {}", summary.missing);
    println!(
        "Success rate:                 {:.1}%",
        summary.success_rate() * 100.0
    );

    if !summary.strand_counts.is_empty() {
        println!("\nStrand distribution:");
        for (strand, count) in &summary.strand_counts {
            println!("  {strand}: {count} junctions");
        }
    }

    if !summary.missing_examples.is_empty() {
        println!("\nSample junctions with missing strand information:");
        for example in &summary.missing_examples {
            println!("  Identifier: {}", example.identifier);
            println!(
                "  Gene:       {}",
                example.gene_key.as_deref().unwrap_or("(none)")
            );
            if let Some(junction) = &example.junction {
                println!("  Junction:   {junction}");
            }
        }
    }
}

fn print_extraction_text(summary: &ExtractionSummary) {
    println!("Sequence Extraction");
    println!("{}", "=".repeat(60));
    println!("Total junctions:              {}", summary.total);
    println!("Dropped (no strand):          {}", summary.unstranded);
    println!("Failed extraction:            {}", summary.failed);
    println!("Written with sequence:        {}", summary.extracted);
    println!(
        "Sequence length:              {} bp (flank {})",
        summary.sequence_length, summary.flank
    );
    println!(
        "Success rate:                 {:.1}%",
        summary.success_rate() * 100.0
    );

    if !summary.strand_counts.is_empty() {
        println!("\nStrand distribution in output:");
        for (strand, count) in &summary.strand_counts {
            println!("  {strand}: {count} junctions");
        }
    }
}

fn print_annotation_tsv(summary: &AnnotationSummary) {
    println!("annotation_total\t{}", summary.total);
    println!("annotation_unique_gene_keys\t{}", summary.unique_gene_keys);
    println!("annotation_matched\t{}", summary.matched);
    println!("annotation_missing\t{}", summary.missing);
    println!("annotation_success_rate\t{:.4}", summary.success_rate());
    for (strand, count) in &summary.strand_counts {
        println!("annotation_strand_{strand}\t{count}");
    }
}

fn print_extraction_tsv(summary: &ExtractionSummary) {
    println!("extraction_total\t{}", summary.total);
    println!("extraction_unstranded\t{}", summary.unstranded);
    println!("extraction_failed\t{}", summary.failed);
    println!("extraction_written\t{}", summary.extracted);
    println!("extraction_sequence_length\t{}", summary.sequence_length);
    println!("extraction_success_rate\t{:.4}", summary.success_rate());
    for (strand, count) in &summary.strand_counts {
        println!("extraction_strand_{strand}\t{count}");
    }
}
