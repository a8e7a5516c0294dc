//! Extract command - pull identity fields from a single OCR text file.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info, warn};

use docfield_core::models::config::DocfieldConfig;
use docfield_core::normalize::WRAPPED_TEXT_KEY;
use docfield_core::{DocumentType, ExtractedRecord, ExtractionRequest, FieldExtractor};

use super::config::load_config;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input text file (plain or JSON-wrapped OCR output), or `-` for stdin
    #[arg(required = true)]
    input: String,

    /// Document type (driving_license, passport)
    #[arg(short = 't', long)]
    document_type: Option<String>,

    /// Treat the input as a JSON request: {"text": ..., "documentType": ...}
    #[arg(long)]
    request: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Show normalized text and timing
    #[arg(long)]
    show_details: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// File extension for outputs in this format.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let raw = read_input(&args.input)?;
    info!("Read {} bytes from {}", raw.len(), args.input);

    write_debug_dump(&config, &raw)?;

    let default_type = args
        .document_type
        .as_deref()
        .map(DocumentType::from_tag)
        .unwrap_or_else(|| config.extraction.default_document_type());
    let request = build_request(raw, args.request, &default_type)?;

    if !request.document_type.is_supported() {
        warn!(
            "Unrecognized document type '{}', no fields will be extracted",
            request.document_type
        );
    }

    let extractor = FieldExtractor::new();
    let result = extractor.process_request(&request);

    let output = format_record(&result.record, args.format, config.output.pretty)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_details {
        eprintln!();
        eprintln!(
            "{} Document type: {}",
            style("ℹ").blue(),
            result.document_type
        );
        eprintln!(
            "{} Fields found: {}/4",
            style("ℹ").blue(),
            result.record.found_count()
        );
        eprintln!(
            "{} Normalized text: {}",
            style("ℹ").blue(),
            result.normalized_text
        );
        eprintln!(
            "{} Processing time: {}ms",
            style("ℹ").blue(),
            start.elapsed().as_millis()
        );
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        return Ok(buffer);
    }

    let path = Path::new(input);
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    Ok(fs::read_to_string(path)?)
}

/// Build an extraction request from raw input.
pub fn build_request(
    raw: String,
    is_request: bool,
    default_type: &DocumentType,
) -> anyhow::Result<ExtractionRequest> {
    if is_request {
        Ok(ExtractionRequest::from_json_str(&raw, default_type)?)
    } else {
        Ok(ExtractionRequest::new(raw, default_type.clone()))
    }
}

/// Save the raw OCR text as `{"extractedText": ...}` when a dump path is configured.
pub fn write_debug_dump(config: &DocfieldConfig, raw: &str) -> anyhow::Result<()> {
    if let Some(path) = &config.output.debug_dump {
        let mut payload = serde_json::Map::new();
        payload.insert(
            WRAPPED_TEXT_KEY.to_string(),
            serde_json::Value::String(raw.to_string()),
        );
        fs::write(path, serde_json::to_string_pretty(&payload)?)?;
        debug!("Wrote debug dump to {}", path.display());
    }
    Ok(())
}

pub fn format_record(
    record: &ExtractedRecord,
    format: OutputFormat,
    pretty: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if pretty => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Json => Ok(serde_json::to_string(record)?),
        OutputFormat::Csv => format_csv(record),
        OutputFormat::Text => Ok(format_text(record)),
    }
}

fn format_csv(record: &ExtractedRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(record.iter().map(|(field, _)| field.key()))?;
    wtr.write_record(record.iter().map(|(_, value)| value))?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(record: &ExtractedRecord) -> String {
    let mut output = String::new();

    for (field, value) in record.iter() {
        output.push_str(&format!("{}: {}\n", field.label(), value));
    }

    output
}
