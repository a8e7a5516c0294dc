//! Extracted record and document type models.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder value for any field no rule could resolve.
pub const NOT_FOUND: &str = "Not found";

/// Caller-declared document type selecting the extraction rule set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DocumentType {
    /// Driving license (`driving_license`).
    DrivingLicense,
    /// Passport (`passport`).
    Passport,
    /// Any other tag. Accepted, but nothing is extracted for it.
    Other(String),
}

impl DocumentType {
    /// Map a wire tag to a document type. Never fails.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "driving_license" => Self::DrivingLicense,
            "passport" => Self::Passport,
            other => Self::Other(other.to_string()),
        }
    }

    /// Wire tag for this document type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::DrivingLicense => "driving_license",
            Self::Passport => "passport",
            Self::Other(tag) => tag,
        }
    }

    /// Whether a rule set exists for this type.
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// All document types with a rule set.
    pub fn supported() -> [DocumentType; 2] {
        [Self::DrivingLicense, Self::Passport]
    }
}

impl From<String> for DocumentType {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl From<DocumentType> for String {
    fn from(document_type: DocumentType) -> Self {
        document_type.as_str().to_string()
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the four record fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    DocumentNumber,
    ExpirationDate,
    DateOfBirth,
}

impl Field {
    /// All fields in record order.
    pub const ALL: [Field; 4] = [
        Field::Name,
        Field::DocumentNumber,
        Field::ExpirationDate,
        Field::DateOfBirth,
    ];

    /// Key used in the serialized record.
    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::DocumentNumber => "documentNumber",
            Field::ExpirationDate => "expirationDate",
            Field::DateOfBirth => "dateOfBirth",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::DocumentNumber => "Document number",
            Field::ExpirationDate => "Expiration date",
            Field::DateOfBirth => "Date of birth",
        }
    }
}

/// Structured identity fields extracted from a document.
///
/// Serializes with exactly four keys in fixed order:
/// `name`, `documentNumber`, `expirationDate`, `dateOfBirth`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedRecord {
    /// Holder name.
    pub name: String,

    /// License or passport number.
    pub document_number: String,

    /// Expiration date as printed on the document.
    pub expiration_date: String,

    /// Date of birth as printed on the document.
    pub date_of_birth: String,
}

impl Default for ExtractedRecord {
    fn default() -> Self {
        Self {
            name: NOT_FOUND.to_string(),
            document_number: NOT_FOUND.to_string(),
            expiration_date: NOT_FOUND.to_string(),
            date_of_birth: NOT_FOUND.to_string(),
        }
    }
}

impl ExtractedRecord {
    /// Get a field value.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::DocumentNumber => &self.document_number,
            Field::ExpirationDate => &self.expiration_date,
            Field::DateOfBirth => &self.date_of_birth,
        }
    }

    /// Set a field value.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::DocumentNumber => self.document_number = value,
            Field::ExpirationDate => self.expiration_date = value,
            Field::DateOfBirth => self.date_of_birth = value,
        }
    }

    /// Whether a field still holds the sentinel.
    pub fn is_missing(&self, field: Field) -> bool {
        self.get(field) == NOT_FOUND
    }

    /// Number of fields resolved to a real value.
    pub fn found_count(&self) -> usize {
        Field::ALL.iter().filter(|f| !self.is_missing(**f)).count()
    }

    /// Iterate `(field, value)` pairs in record order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        Field::ALL.into_iter().map(move |f| (f, self.get(f)))
    }
}
