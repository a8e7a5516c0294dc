//! WASM bindings for identity document field extraction.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.

use wasm_bindgen::prelude::*;

use docfield_core::{DocumentType, ExtractedRecord, FieldExtractor};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Normalize raw OCR text: unwrap `{"extractedText": ...}` and collapse
/// whitespace.
#[wasm_bindgen]
pub fn normalize_text(text: &str) -> String {
    docfield_core::normalize(text)
}

/// Extract identity fields from OCR text.
///
/// Returns `{name, documentNumber, expirationDate, dateOfBirth}`; fields that
/// could not be found hold `"Not found"`.
#[wasm_bindgen]
pub fn extract_fields(text: &str, document_type: &str) -> Result<JsValue, JsValue> {
    to_js(&docfield_core::extract_document_fields(text, document_type))
}

/// Document type tags with a registered extraction strategy.
#[wasm_bindgen]
pub fn supported_document_types() -> js_sys::Array {
    DocumentType::supported()
        .iter()
        .map(|t| JsValue::from_str(t.as_str()))
        .collect()
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Field extractor class for browser use.
#[wasm_bindgen]
pub struct DocumentFieldExtractor {
    extractor: FieldExtractor,
}

#[wasm_bindgen]
impl DocumentFieldExtractor {
    /// Create a new extractor with the built-in document types.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            extractor: FieldExtractor::new(),
        }
    }

    /// Extract fields from text.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str, document_type: &str) -> Result<JsValue, JsValue> {
        let result = self
            .extractor
            .process(text, &DocumentType::from_tag(document_type));
        to_js(&result.record)
    }

    /// Get extraction result with metadata.
    #[wasm_bindgen]
    pub fn extract_with_metadata(&self, text: &str, document_type: &str) -> Result<JsValue, JsValue> {
        let start = js_sys::Date::now();
        let result = self
            .extractor
            .process(text, &DocumentType::from_tag(document_type));

        #[derive(serde::Serialize)]
        #[serde(rename_all = "camelCase")]
        struct ExtractResult {
            record: ExtractedRecord,
            normalized_text: String,
            document_type: String,
            fields_found: usize,
            processing_time_ms: f64,
        }

        let output = ExtractResult {
            fields_found: result.record.found_count(),
            record: result.record,
            normalized_text: result.normalized_text,
            document_type: result.document_type.as_str().to_string(),
            processing_time_ms: js_sys::Date::now() - start,
        };

        to_js(&output)
    }
}

impl Default for DocumentFieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}
