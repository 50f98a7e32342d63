//! Node-type normalization.
//!
//! Recipes authored at different times carry different spellings for the
//! same structure: `b` vs `bold` vs `strong`, `h2` vs `heading-2`, raw
//! HTML-ish tags next to canonical ones. Normalization rewrites every tag
//! to the canonical vocabulary in one deep-copying pass so the converter
//! only ever dispatches on one spelling.
//!
//! Normalization never fails and never mutates its input. Tags it does not
//! recognize are preserved verbatim and reported to the diagnostic sink;
//! the converter's unknown handler keeps them visible downstream.

use crate::diagnostics::{Diagnostic, DiagnosticSink, LogSink};
use crate::model::{Document, Mark, Node, NodeKind, Source};
use once_cell::sync::Lazy;
use regex::Regex;

static HEADING_ALIAS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^h([1-6])$").expect("heading alias pattern"));

/// Normalize a source, reporting unmapped tags to the `log` facade.
pub fn normalize(source: &Source) -> Source {
    normalize_with(source, &LogSink)
}

/// Normalize a source, reporting unmapped tags to the given sink.
pub fn normalize_with(source: &Source, sink: &dyn DiagnosticSink) -> Source {
    match source {
        Source::Plain(text) => Source::Plain(text.clone()),
        Source::Document(doc) => Source::Document(normalize_document_with(doc, sink)),
    }
}

/// Normalize a structured document, reporting to the `log` facade.
pub fn normalize_document(doc: &Document) -> Document {
    normalize_document_with(doc, &LogSink)
}

/// Normalize a structured document, reporting to the given sink.
pub fn normalize_document_with(doc: &Document, sink: &dyn DiagnosticSink) -> Document {
    Document {
        node_type: canonical_node_tag(&doc.node_type, sink),
        content: doc
            .content
            .iter()
            .map(|node| normalize_node(node, sink))
            .collect(),
    }
}

fn normalize_node(node: &Node, sink: &dyn DiagnosticSink) -> Node {
    Node {
        node_type: canonical_node_tag(&node.node_type, sink),
        content: node
            .content
            .iter()
            .map(|child| normalize_node(child, sink))
            .collect(),
        value: node.value.clone(),
        marks: node
            .marks
            .iter()
            .map(|mark| canonical_mark(mark, sink))
            .collect(),
        data: node.data.clone(),
    }
}

/// Map a node tag to its canonical spelling.
///
/// Matching is case-folded. Canonical tags pass through silently so the
/// pass is idempotent; anything unmatched comes back unchanged after a
/// diagnostic.
fn canonical_node_tag(tag: &str, sink: &dyn DiagnosticSink) -> String {
    let folded = tag.to_ascii_lowercase();

    if !matches!(NodeKind::from_tag(&folded), NodeKind::Unknown(_)) {
        return folded;
    }

    match folded.as_str() {
        // Mark-like node tags emitted by the oldest authoring tooling.
        // Canonical spelling only; the converter still has no arm for
        // them, so they stay visible through the unknown handler.
        "b" | "strong" => "strong".to_string(),
        "i" | "em" => "em".to_string(),
        "p" => "paragraph".to_string(),
        "ul" => "unordered-list".to_string(),
        "ol" => "ordered-list".to_string(),
        "li" => "list-item".to_string(),
        // Delivery-API block tags
        "embedded-asset-block" => "embedded-asset".to_string(),
        "embedded-entry-block" | "embedded-entry-inline" => "embedded-entry".to_string(),
        _ => {
            if let Some(caps) = HEADING_ALIAS.captures(&folded) {
                return format!("heading-{}", &caps[1]);
            }
            sink.report(Diagnostic::UnknownNodeType {
                tag: tag.to_string(),
            });
            tag.to_string()
        }
    }
}

fn canonical_mark(mark: &Mark, sink: &dyn DiagnosticSink) -> Mark {
    let folded = mark.mark_type.to_ascii_lowercase();
    let mark_type = match folded.as_str() {
        "b" | "bold" | "strong" => "strong".to_string(),
        "i" | "italic" | "em" => "em".to_string(),
        _ => {
            sink.report(Diagnostic::UnknownMarkType {
                tag: mark.mark_type.clone(),
            });
            mark.mark_type.clone()
        }
    };
    Mark { mark_type }
}
