//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{DocfieldError, Result};

use super::record::DocumentType;

/// Main configuration for docfield.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocfieldConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Document type tag used when a request does not declare one.
    pub default_document_type: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            default_document_type: DocumentType::DrivingLicense.as_str().to_string(),
        }
    }
}

impl ExtractionConfig {
    /// The default document type as a typed value.
    pub fn default_document_type(&self) -> DocumentType {
        DocumentType::from_tag(&self.default_document_type)
    }
}

/// Output configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output.
    pub pretty: bool,

    /// Where to write the raw OCR text as `{"extractedText": ...}` before
    /// extraction. Disabled when unset.
    pub debug_dump: Option<PathBuf>,
}

impl DocfieldConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| DocfieldError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
