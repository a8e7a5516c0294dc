//! Per-document-type rule sets.

use lazy_static::lazy_static;

use crate::models::record::{DocumentType, Field};

use super::patterns::{
    DL_DATE_OF_BIRTH, DL_EXPIRY, DL_NAME, DL_NUMBER, PASSPORT_DATE, PASSPORT_NUMBER,
};
use super::{Capture, Cleanup, PatternRule, Position};

lazy_static! {
    static ref DRIVING_LICENSE_RULES: Vec<PatternRule> = vec![
        PatternRule::new(Field::Name, &DL_NAME, Capture::Group(1), &[Cleanup::Trim]),
        PatternRule::new(Field::DocumentNumber, &DL_NUMBER, Capture::Group(1), &[Cleanup::Trim]),
        PatternRule::new(
            Field::ExpirationDate,
            &DL_EXPIRY,
            Capture::Group(1),
            &[Cleanup::Trim, Cleanup::StripWhitespace],
        ),
        PatternRule::new(Field::DateOfBirth, &DL_DATE_OF_BIRTH, Capture::Group(1), &[Cleanup::Trim]),
    ];

    // The passport name is not pattern-driven; see `extraction::mrz`.
    static ref PASSPORT_RULES: Vec<PatternRule> = vec![
        PatternRule::new(
            Field::DocumentNumber,
            &PASSPORT_NUMBER,
            Capture::WholeMatch,
            &[Cleanup::Uppercase],
        ),
        // Passports carry no usable date labels after OCR: the first date in
        // the text is taken as birth, the last as expiry.
        PatternRule::new(
            Field::DateOfBirth,
            &PASSPORT_DATE,
            Capture::Positional { position: Position::First, min_matches: 2 },
            &[],
        ),
        PatternRule::new(
            Field::ExpirationDate,
            &PASSPORT_DATE,
            Capture::Positional { position: Position::Last, min_matches: 2 },
            &[],
        ),
    ];
}

/// Static, read-only catalog of extraction rules.
pub struct PatternCatalog;

impl PatternCatalog {
    /// Ordered rules for a document type. Empty for unrecognized types.
    pub fn rules_for(document_type: &DocumentType) -> &'static [PatternRule] {
        match document_type {
            DocumentType::DrivingLicense => DRIVING_LICENSE_RULES.as_slice(),
            DocumentType::Passport => PASSPORT_RULES.as_slice(),
            DocumentType::Other(_) => &[],
        }
    }

    /// Rules for one field of a document type, in order.
    pub fn rules_for_field(
        document_type: &DocumentType,
        field: Field,
    ) -> impl Iterator<Item = &'static PatternRule> + use<> {
        Self::rules_for(document_type)
            .iter()
            .filter(move |rule| rule.field == field)
    }
}
