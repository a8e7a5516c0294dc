//! Rule-based field extraction.
//!
//! A [`PatternRule`] binds a record field to a regex, a capture strategy and
//! a list of cleanup steps. Rules are plain data; the [`catalog`] groups them
//! per document type.

pub mod catalog;
pub mod patterns;

pub use catalog::PatternCatalog;

use regex::Regex;

use crate::models::record::{ExtractedRecord, Field};

/// Which part of the pattern's matches becomes the field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    /// A capture group of the first match.
    Group(usize),
    /// The whole first match.
    WholeMatch,
    /// One of all matches in text order, only when at least `min_matches`
    /// matches exist.
    Positional { position: Position, min_matches: usize },
}

/// Positional selection among all matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    First,
    Last,
}

/// Post-match cleanup step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cleanup {
    /// Trim leading and trailing whitespace.
    Trim,
    /// Remove every whitespace character.
    StripWhitespace,
    /// Uppercase the value.
    Uppercase,
}

impl Cleanup {
    pub fn apply(self, value: &str) -> String {
        match self {
            Cleanup::Trim => value.trim().to_string(),
            Cleanup::StripWhitespace => value.chars().filter(|c| !c.is_whitespace()).collect(),
            Cleanup::Uppercase => value.to_uppercase(),
        }
    }
}

/// A matched field value with its location in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch {
    /// Cleaned value.
    pub value: String,
    /// Byte span of the raw match in the source text.
    pub position: (usize, usize),
    /// Raw matched text before cleanup.
    pub source: String,
}

/// One extraction rule for one field.
#[derive(Debug, Clone)]
pub struct PatternRule {
    pub field: Field,
    pub pattern: &'static Regex,
    pub capture: Capture,
    pub cleanup: &'static [Cleanup],
}

impl PatternRule {
    pub const fn new(
        field: Field,
        pattern: &'static Regex,
        capture: Capture,
        cleanup: &'static [Cleanup],
    ) -> Self {
        Self {
            field,
            pattern,
            capture,
            cleanup,
        }
    }

    /// Run the rule against normalized text.
    pub fn find(&self, text: &str) -> Option<ExtractionMatch> {
        let raw = match self.capture {
            Capture::Group(index) => self.pattern.captures(text)?.get(index)?,
            Capture::WholeMatch => self.pattern.find(text)?,
            Capture::Positional {
                position,
                min_matches,
            } => {
                let matches: Vec<_> = self.pattern.find_iter(text).collect();
                if matches.len() < min_matches.max(1) {
                    return None;
                }
                match position {
                    Position::First => matches[0],
                    Position::Last => matches[matches.len() - 1],
                }
            }
        };

        let value = self
            .cleanup
            .iter()
            .fold(raw.as_str().to_string(), |value, step| step.apply(&value));

        Some(ExtractionMatch {
            value,
            position: (raw.start(), raw.end()),
            source: raw.as_str().to_string(),
        })
    }

    /// Extract just the cleaned value.
    pub fn extract(&self, text: &str) -> Option<String> {
        self.find(text).map(|m| m.value)
    }
}

/// Apply rules in order, filling each field from the first rule that matches.
///
/// Fields already resolved in `record` are left alone, so several rules for
/// the same field act as ordered fallbacks.
pub fn apply_rules(rules: &[PatternRule], text: &str, record: &mut ExtractedRecord) {
    for rule in rules {
        if !record.is_missing(rule.field) {
            continue;
        }
        if let Some(m) = rule.find(text) {
            if m.value.is_empty() {
                continue;
            }
            tracing::trace!(
                field = rule.field.key(),
                start = m.position.0,
                end = m.position.1,
                "rule matched"
            );
            record.set(rule.field, m.value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::patterns::{PASSPORT_DATE, PASSPORT_NUMBER};

    #[test]
    fn test_cleanup_steps() {
        assert_eq!(Cleanup::Trim.apply("  a b  "), "a b");
        assert_eq!(Cleanup::StripWhitespace.apply("01-01 -2030"), "01-01-2030");
        assert_eq!(Cleanup::Uppercase.apply("k1234567"), "K1234567");
    }

    #[test]
    fn test_whole_match_with_position() {
        let rule = PatternRule::new(
            Field::DocumentNumber,
            &PASSPORT_NUMBER,
            Capture::WholeMatch,
            &[Cleanup::Uppercase],
        );

        let m = rule.find("No. k1234567 issued").unwrap();
        assert_eq!(m.value, "K1234567");
        assert_eq!(m.source, "k1234567");
        assert_eq!(m.position, (4, 12));
    }

    #[test]
    fn test_positional_requires_min_matches() {
        let last = PatternRule::new(
            Field::ExpirationDate,
            &PASSPORT_DATE,
            Capture::Positional {
                position: Position::Last,
                min_matches: 2,
            },
            &[],
        );

        assert_eq!(last.extract("01/01/1990"), None);
        assert_eq!(
            last.extract("01/01/1990 15/06/2015 01/01/2030"),
            Some("01/01/2030".to_string())
        );
    }

    #[test]
    fn test_apply_rules_keeps_first_hit() {
        let rules = [
            PatternRule::new(Field::DocumentNumber, &PASSPORT_NUMBER, Capture::WholeMatch, &[]),
            PatternRule::new(
                Field::DocumentNumber,
                &PASSPORT_DATE,
                Capture::WholeMatch,
                &[],
            ),
        ];
        let mut record = ExtractedRecord::default();
        apply_rules(&rules, "A1234567 01/01/1990", &mut record);

        assert_eq!(record.document_number, "A1234567");
        assert!(record.is_missing(Field::Name));
    }
}
