//! Diagnostic reporting for normalization and rendering.
//!
//! The engine itself never logs: anomalies are handed to an injected sink
//! so the core stays side-effect-free and testable. Hosts that just want
//! log lines use [`LogSink`]; tests and host-side error surfacing use
//! [`CollectingSink`].

use std::fmt;
use std::sync::Mutex;

/// A non-fatal anomaly found while processing a document.
///
/// None of these abort processing: one bad CMS entry must never blank an
/// entire recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A node tag outside the canonical vocabulary, before or after
    /// normalization.
    UnknownNodeType { tag: String },
    /// A mark tag outside the canonical vocabulary.
    UnknownMarkType { tag: String },
    /// An embedded-asset target without a usable URL.
    MalformedAsset { detail: String },
    /// An embedded-entry target without a content-type discriminator.
    MalformedEntry { detail: String },
    /// A hyperlink node without a `data.uri`.
    MissingUri,
    /// An embedded entry whose content type has no registered resolver.
    MissingResolver { content_type_id: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnknownNodeType { tag } => write!(f, "unhandled node type: {tag}"),
            Diagnostic::UnknownMarkType { tag } => write!(f, "unhandled mark type: {tag}"),
            Diagnostic::MalformedAsset { detail } => write!(f, "malformed asset target: {detail}"),
            Diagnostic::MalformedEntry { detail } => write!(f, "malformed entry target: {detail}"),
            Diagnostic::MissingUri => write!(f, "hyperlink without uri"),
            Diagnostic::MissingResolver { content_type_id } => {
                write!(f, "no resolver registered for entry type: {content_type_id}")
            }
        }
    }
}

/// Receiver for diagnostics emitted during normalization and rendering.
///
/// Implementations must be safe to share between concurrent render calls;
/// the engine itself holds no state across calls.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: Diagnostic);
}

/// Default sink: forwards every diagnostic to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, diagnostic: Diagnostic) {
        log::warn!("{diagnostic}");
    }
}

/// Sink that accumulates diagnostics for later inspection.
#[derive(Debug, Default)]
pub struct CollectingSink {
    entries: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns and clears everything collected so far.
    pub fn drain(&self) -> Vec<Diagnostic> {
        match self.entries.lock() {
            Ok(mut entries) => std::mem::take(&mut *entries),
            Err(_) => Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().map(|e| e.is_empty()).unwrap_or(true)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, diagnostic: Diagnostic) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(diagnostic);
        }
    }
}
