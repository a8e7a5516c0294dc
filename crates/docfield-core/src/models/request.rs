//! Extraction request as received from the upload/OCR layer.

use serde::Serialize;
use serde_json::Value;

use crate::error::{DocfieldError, Result};

use super::record::DocumentType;

/// OCR text plus the declared document type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionRequest {
    /// Raw OCR text, plain or JSON-wrapped.
    pub text: String,

    /// Declared document type.
    pub document_type: DocumentType,
}

impl ExtractionRequest {
    pub fn new(text: impl Into<String>, document_type: DocumentType) -> Self {
        Self {
            text: text.into(),
            document_type,
        }
    }

    /// Build a request from a JSON object `{"text": ..., "documentType": ...}`.
    ///
    /// A non-string `text` is a contract violation and is reported, not
    /// defaulted. A missing or non-string `documentType` uses `default_type`.
    pub fn from_json(value: &Value, default_type: &DocumentType) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| {
            DocfieldError::InvalidInput("request must be a JSON object".to_string())
        })?;

        let text = match object.get("text") {
            Some(Value::String(text)) => text.clone(),
            Some(other) => {
                return Err(DocfieldError::InvalidInput(format!(
                    "`text` must be a string, got {}",
                    json_kind(other)
                )));
            }
            None => {
                return Err(DocfieldError::InvalidInput("missing `text`".to_string()));
            }
        };

        let document_type = object
            .get("documentType")
            .and_then(Value::as_str)
            .map(DocumentType::from_tag)
            .unwrap_or_else(|| default_type.clone());

        Ok(Self::new(text, document_type))
    }

    /// Parse a request from a JSON string.
    pub fn from_json_str(input: &str, default_type: &DocumentType) -> Result<Self> {
        let value: Value = serde_json::from_str(input)?;
        Self::from_json(&value, default_type)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
