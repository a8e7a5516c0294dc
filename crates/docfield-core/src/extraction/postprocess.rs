//! Final record cleanup.

use crate::models::record::{ExtractedRecord, Field};
use crate::normalize::collapse_whitespace;

/// Collapse whitespace and trim every field, whatever produced it.
///
/// Runs last in the pipeline. The sentinel is whitespace-stable, so
/// unresolved fields pass through unchanged.
pub fn finalize(mut record: ExtractedRecord) -> ExtractedRecord {
    for field in Field::ALL {
        let value = collapse_whitespace(record.get(field));
        record.set(field, value);
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::NOT_FOUND;

    #[test]
    fn test_finalize_collapses_every_field() {
        let record = ExtractedRecord {
            name: "  John \n Smith ".to_string(),
            document_number: "ABC\t123".to_string(),
            expiration_date: NOT_FOUND.to_string(),
            date_of_birth: "05-05-1990".to_string(),
        };

        let finalized = finalize(record);
        assert_eq!(finalized.name, "John Smith");
        assert_eq!(finalized.document_number, "ABC 123");
        assert_eq!(finalized.expiration_date, NOT_FOUND);
        assert_eq!(finalized.date_of_birth, "05-05-1990");
    }

    #[test]
    fn test_finalize_keeps_clean_record() {
        let record = ExtractedRecord {
            name: "SMITH JOHN".to_string(),
            ..ExtractedRecord::default()
        };
        assert_eq!(finalize(record.clone()), record);
    }
}
