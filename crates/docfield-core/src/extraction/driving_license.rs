//! Driving license extraction.

use crate::models::record::{DocumentType, ExtractedRecord};

use super::rules::{apply_rules, PatternCatalog};
use super::DocumentExtractor;

/// Label-driven extraction: every field comes from its catalog rule.
#[derive(Debug, Default, Clone, Copy)]
pub struct DrivingLicenseExtractor;

impl DrivingLicenseExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentExtractor for DrivingLicenseExtractor {
    fn document_type(&self) -> DocumentType {
        DocumentType::DrivingLicense
    }

    fn extract(&self, text: &str) -> ExtractedRecord {
        let mut record = ExtractedRecord::default();
        apply_rules(
            PatternCatalog::rules_for(&DocumentType::DrivingLicense),
            text,
            &mut record,
        );
        record
    }
}
