//! Core library for identity document field extraction.
//!
//! This crate provides:
//! - OCR text normalization (whitespace collapse, JSON payload unwrapping)
//! - A static per-document-type pattern catalog
//! - Driving license and passport extraction strategies
//! - MRZ-first passport name resolution with a capitalized-word fallback

pub mod error;
pub mod extraction;
pub mod models;
pub mod normalize;

pub use error::{DocfieldError, Result};
pub use extraction::{
    extract_document_fields, DocumentExtractor, ExtractionResult, FieldExtractor,
};
pub use models::config::DocfieldConfig;
pub use models::record::{DocumentType, ExtractedRecord, Field, NOT_FOUND};
pub use models::request::ExtractionRequest;
pub use normalize::normalize;
