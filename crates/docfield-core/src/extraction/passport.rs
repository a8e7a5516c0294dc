//! Passport extraction.

use std::fmt;

use crate::models::record::{DocumentType, ExtractedRecord};

use super::mrz::{default_resolvers, resolve_name, NameResolver};
use super::rules::{apply_rules, PatternCatalog};
use super::DocumentExtractor;

/// Number and dates come from the catalog; the name from a resolver chain.
pub struct PassportExtractor {
    name_resolvers: Vec<Box<dyn NameResolver>>,
}

impl PassportExtractor {
    /// Create an extractor with the MRZ-then-heuristic name chain.
    pub fn new() -> Self {
        Self {
            name_resolvers: default_resolvers(),
        }
    }

    /// Replace the name resolver chain.
    pub fn with_name_resolvers(mut self, resolvers: Vec<Box<dyn NameResolver>>) -> Self {
        self.name_resolvers = resolvers;
        self
    }
}

impl Default for PassportExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PassportExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.name_resolvers.iter().map(|r| r.name()).collect();
        f.debug_struct("PassportExtractor")
            .field("name_resolvers", &names)
            .finish()
    }
}

impl DocumentExtractor for PassportExtractor {
    fn document_type(&self) -> DocumentType {
        DocumentType::Passport
    }

    fn extract(&self, text: &str) -> ExtractedRecord {
        let mut record = ExtractedRecord::default();
        apply_rules(
            PatternCatalog::rules_for(&DocumentType::Passport),
            text,
            &mut record,
        );

        if let Some(name) = resolve_name(&self.name_resolvers, text) {
            record.name = name;
        }

        record
    }
}
