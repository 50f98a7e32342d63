//! UniFFI bindings for cross-platform support (iOS, Android).
//!
//! This module provides FFI-safe types and functions for use with UniFFI.
//! The fragment tree does not cross the boundary: mobile hosts feed their
//! webview renderer with the HTML string target instead, so the surface
//! here is string-in/string-out plus a document handle for repeated calls.

use crate::extract::extract_plain_text as extract_internal;
use crate::model::{DocumentError, Source};
use crate::normalize::normalize;
use crate::render::{render, to_html, RenderOptions};
use std::sync::Arc;

/// FFI-safe error type that wraps all possible errors.
#[derive(Debug, uniffi::Error, thiserror::Error)]
pub enum RichTextError {
    #[error("Invalid document: {message}")]
    InvalidDocument { message: String },

    #[error("Serialization error: {message}")]
    SerializationError { message: String },
}

impl From<DocumentError> for RichTextError {
    fn from(e: DocumentError) -> Self {
        RichTextError::InvalidDocument {
            message: e.to_string(),
        }
    }
}

/// FFI-safe rendering configuration.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRenderOptions {
    /// Text color as a CSS color string (e.g. "#333")
    pub text_color: String,
    /// Base font size in logical pixels
    pub base_font_size: u32,
}

impl From<FfiRenderOptions> for RenderOptions {
    fn from(options: FfiRenderOptions) -> Self {
        RenderOptions {
            text_color: options.text_color,
            base_font_size: options.base_font_size,
            ..RenderOptions::default()
        }
    }
}

/// FFI-safe handle to a parsed rich-text source.
///
/// Parsing once and rendering repeatedly (theme changes, font-size
/// changes) avoids re-reading the JSON on every call.
#[derive(uniffi::Object)]
pub struct FfiDocument {
    inner: Source,
}

#[uniffi::export]
impl FfiDocument {
    /// Renders the document to an HTML string after normalization.
    pub fn to_html(&self, options: FfiRenderOptions) -> String {
        to_html(&render(&normalize(&self.inner), &options.into()))
    }

    /// Returns the document flattened to plain text.
    pub fn plain_text(&self) -> String {
        extract_internal(&self.inner)
    }

    /// Returns the normalized document as JSON.
    pub fn normalized_json(&self) -> Result<String, RichTextError> {
        serde_json::to_string(&normalize(&self.inner)).map_err(|e| {
            RichTextError::SerializationError {
                message: e.to_string(),
            }
        })
    }

    /// True if the source was a bare string rather than a structured
    /// document.
    pub fn is_plain(&self) -> bool {
        matches!(self.inner, Source::Plain(_))
    }
}

impl FfiDocument {
    fn new(inner: Source) -> Self {
        FfiDocument { inner }
    }
}

/// Parses a rich-text source from CMS JSON.
///
/// Accepts either a structured document or a bare JSON string (the
/// dual-mode input contract).
#[uniffi::export]
pub fn document_from_json(json: String) -> Result<Arc<FfiDocument>, RichTextError> {
    let source = Source::from_json_str(&json)?;
    Ok(Arc::new(FfiDocument::new(source)))
}

/// One-shot convenience: parse, normalize, and render to HTML.
#[uniffi::export]
pub fn render_html(json: String, options: FfiRenderOptions) -> Result<String, RichTextError> {
    let source = Source::from_json_str(&json)?;
    Ok(to_html(&render(&normalize(&source), &options.into())))
}

/// One-shot convenience: parse and flatten to plain text.
#[uniffi::export]
pub fn extract_plain_text(json: String) -> Result<String, RichTextError> {
    let source = Source::from_json_str(&json)?;
    Ok(extract_internal(&source))
}
