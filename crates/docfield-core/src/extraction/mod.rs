//! Identity document field extraction.
//!
//! Pipeline: raw text → [`normalize`](crate::normalize::normalize) →
//! per-type [`DocumentExtractor`] → [`postprocess::finalize`].

mod driving_license;
pub mod mrz;
mod passport;
pub mod postprocess;
pub mod rules;

pub use driving_license::DrivingLicenseExtractor;
pub use mrz::{CapitalizedNameResolver, MrzMatch, MrzNameResolver, NameResolver};
pub use passport::PassportExtractor;

use lazy_static::lazy_static;
use serde::Serialize;
use tracing::debug;

use crate::models::record::{DocumentType, ExtractedRecord};
use crate::models::request::ExtractionRequest;
use crate::normalize::normalize;

/// Extraction strategy for one document type.
pub trait DocumentExtractor: Send + Sync {
    /// The document type this strategy handles.
    fn document_type(&self) -> DocumentType;

    /// Extract fields from normalized text.
    fn extract(&self, text: &str) -> ExtractedRecord;
}

/// Result of running the full pipeline on one input.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    /// Finalized record.
    pub record: ExtractedRecord,
    /// Text the rules ran against.
    pub normalized_text: String,
    /// Declared document type.
    pub document_type: DocumentType,
}

/// Dispatches extraction to the strategy registered for a document type.
pub struct FieldExtractor {
    strategies: Vec<Box<dyn DocumentExtractor>>,
}

impl FieldExtractor {
    /// Create an extractor with the built-in driving license and passport
    /// strategies.
    pub fn new() -> Self {
        Self::empty()
            .with_strategy(DrivingLicenseExtractor::new())
            .with_strategy(PassportExtractor::new())
    }

    /// Create an extractor with no strategies.
    pub fn empty() -> Self {
        Self {
            strategies: Vec::new(),
        }
    }

    /// Register a strategy, replacing any existing one for the same type.
    pub fn with_strategy(mut self, strategy: impl DocumentExtractor + 'static) -> Self {
        let document_type = strategy.document_type();
        self.strategies
            .retain(|existing| existing.document_type() != document_type);
        self.strategies.push(Box::new(strategy));
        self
    }

    /// The strategy for a document type, if any.
    pub fn strategy_for(&self, document_type: &DocumentType) -> Option<&dyn DocumentExtractor> {
        self.strategies
            .iter()
            .find(|s| &s.document_type() == document_type)
            .map(|s| &**s)
    }

    /// Document types with a registered strategy.
    pub fn document_types(&self) -> Vec<DocumentType> {
        self.strategies.iter().map(|s| s.document_type()).collect()
    }

    /// Extract fields from already-normalized text.
    ///
    /// Unrecognized document types yield an all-default record.
    pub fn extract(&self, text: &str, document_type: &DocumentType) -> ExtractedRecord {
        match self.strategy_for(document_type) {
            Some(strategy) => strategy.extract(text),
            None => {
                debug!("No extraction strategy for document type '{}'", document_type);
                ExtractedRecord::default()
            }
        }
    }

    /// Run the full pipeline on raw (plain or JSON-wrapped) OCR text.
    pub fn process(&self, raw: &str, document_type: &DocumentType) -> ExtractionResult {
        let normalized_text = normalize(raw);
        let record = postprocess::finalize(self.extract(&normalized_text, document_type));

        debug!(
            "Extracted {}/4 fields from {} chars of {} text",
            record.found_count(),
            normalized_text.chars().count(),
            document_type
        );

        ExtractionResult {
            record,
            normalized_text,
            document_type: document_type.clone(),
        }
    }

    /// Run the full pipeline on a request.
    pub fn process_request(&self, request: &ExtractionRequest) -> ExtractionResult {
        self.process(&request.text, &request.document_type)
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

lazy_static! {
    static ref DEFAULT_EXTRACTOR: FieldExtractor = FieldExtractor::new();
}

/// Extract identity fields from raw OCR text for a document type tag.
pub fn extract_document_fields(text: &str, document_type: &str) -> ExtractedRecord {
    DEFAULT_EXTRACTOR
        .process(text, &DocumentType::from_tag(document_type))
        .record
}
