//! Batch processing command for multiple OCR text files.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use docfield_core::models::config::DocfieldConfig;
use docfield_core::{DocumentType, ExtractedRecord, FieldExtractor};

use super::config::load_config;
use super::extract::{build_request, format_record, write_debug_dump, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files glob pattern (e.g. "scans/*.txt")
    #[arg(required = true)]
    input: String,

    /// Document type applied to every file (driving_license, passport)
    #[arg(short = 't', long)]
    document_type: Option<String>,

    /// Treat every input as a JSON request: {"text": ..., "documentType": ...}
    #[arg(long)]
    request: bool,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    record: Option<ExtractedRecord>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let default_type = args
        .document_type
        .as_deref()
        .map(DocumentType::from_tag)
        .unwrap_or_else(|| config.extraction.default_document_type());

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "txt" | "json")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let extractor = FieldExtractor::new();
    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let result = process_single_file(&path, &extractor, &args, &config, &default_type);
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match result {
            Ok(record) => {
                results.push(ProcessResult {
                    path: path.clone(),
                    record: Some(record),
                    error: None,
                    processing_time_ms,
                });
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(ProcessResult {
                        path: path.clone(),
                        record: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed for {}: {}", path.display(), error_msg);
                }
            }
        }

        overall_pb.inc(1);
    }

    overall_pb.finish_with_message("Complete");

    let successful: Vec<_> = results.iter().filter(|r| r.record.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    if let Some(output_dir) = &args.output_dir {
        let paths: Vec<&Path> = successful.iter().map(|r| r.path.as_path()).collect();
        let names = output_names(&paths, args.format.extension());

        for (result, output_name) in successful.iter().zip(names) {
            if let Some(record) = &result.record {
                let output_path = output_dir.join(output_name);

                let content = format_record(record, args.format, config.output.pretty)?;
                fs::write(&output_path, content)?;
                debug!("Wrote output to {}", output_path.display());
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn process_single_file(
    path: &Path,
    extractor: &FieldExtractor,
    args: &BatchArgs,
    config: &DocfieldConfig,
    default_type: &DocumentType,
) -> anyhow::Result<ExtractedRecord> {
    let raw = fs::read_to_string(path)?;
    write_debug_dump(config, &raw)?;

    let request = build_request(raw, args.request, default_type)?;
    if !request.document_type.is_supported() {
        warn!(
            "{}: unrecognized document type '{}'",
            path.display(),
            request.document_type
        );
    }

    Ok(extractor.process_request(&request).record)
}

/// Output file name for each input.
///
/// Inputs are named `<stem>.<ext>`. When two inputs share a stem (e.g.
/// `scan.txt` and `scan.json`) they keep their source extension instead,
/// `scan.txt.<ext>` and `scan.json.<ext>`, so neither overwrites the other.
fn output_names(paths: &[&Path], extension: &str) -> Vec<String> {
    let stem = |path: &Path| {
        path.file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("record")
            .to_string()
    };

    let mut stem_counts: HashMap<String, usize> = HashMap::new();
    for path in paths {
        *stem_counts.entry(stem(*path)).or_default() += 1;
    }

    paths
        .iter()
        .map(|path| {
            let stem = stem(*path);
            if stem_counts[&stem] > 1 {
                let file_name = path.file_name().and_then(|s| s.to_str()).unwrap_or(&stem);
                warn!(
                    "Several inputs share the name '{}', keeping the source extension for {}",
                    stem,
                    path.display()
                );
                format!("{}.{}", file_name, extension)
            } else {
                format!("{}.{}", stem, extension)
            }
        })
        .collect()
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "name",
        "documentNumber",
        "expirationDate",
        "dateOfBirth",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        if let Some(record) = &result.record {
            wtr.write_record([
                filename,
                "success",
                &record.name,
                &record.document_number,
                &record.expiration_date,
                &record.date_of_birth,
                &result.processing_time_ms.to_string(),
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                "",
                &result.processing_time_ms.to_string(),
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
