use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

mod kind;

pub use kind::{MarkKind, NodeKind};

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to parse document JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Root container of a CMS rich-text tree.
///
/// Documents arrive fully materialized from the content-delivery client and
/// are read-only inputs: nothing in this crate mutates one in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "nodeType", default = "document_tag")]
    pub node_type: String,
    #[serde(default)]
    pub content: Vec<Node>,
}

fn document_tag() -> String {
    "document".to_string()
}

impl Document {
    /// Parse a document from raw CMS JSON.
    pub fn from_json_str(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_value(value: Value) -> Result<Self, DocumentError> {
        Ok(serde_json::from_value(value)?)
    }
}

/// A single element of the tree: block, inline, text, or embed.
///
/// The tag is kept as a string rather than an enum because pre-normalization
/// content carries legacy spellings; `NodeKind::from_tag` gives the typed
/// view once tags are canonical.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "nodeType")]
    pub node_type: String,
    /// Children; empty for text and embed nodes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<Node>,
    /// Text payload; present only on text nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Inline style annotations; present only on text nodes. Array order is
    /// significant: it determines style nesting during rendering.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<Mark>,
    /// Link and embed payloads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<NodeData>,
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        NodeKind::from_tag(&self.node_type)
    }
}

/// An inline style annotation attached to a text node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mark {
    #[serde(rename = "type")]
    pub mark_type: String,
}

impl Mark {
    pub fn kind(&self) -> MarkKind {
        MarkKind::from_tag(&self.mark_type)
    }
}

/// Payload attached to hyperlink, embedded-asset, and embedded-entry nodes.
///
/// `target` stays an opaque JSON value: recipes authored in different years
/// carry different target shapes, and the typed views below absorb that
/// drift instead of the deserializer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Value>,
}

/// A media reference extracted from an embedded-asset target.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetRef {
    /// As stored by the CMS; may be protocol-relative (`//host/...`).
    pub url: String,
    pub title: Option<String>,
}

impl AssetRef {
    /// Extract an asset reference from a target value.
    ///
    /// Accepts both the flat shape `{url, title}` and the delivery-API
    /// shape `{fields: {file: {url}, title}}`. Returns `None` when no URL
    /// can be found, which callers treat as skip-and-log.
    pub fn from_target(target: &Value) -> Option<AssetRef> {
        if let Some(url) = target.get("url").and_then(Value::as_str) {
            return Some(AssetRef {
                url: url.to_string(),
                title: string_field(target, "title"),
            });
        }

        let fields = target.get("fields")?;
        let url = fields.get("file")?.get("url")?.as_str()?;
        Some(AssetRef {
            url: url.to_string(),
            title: string_field(fields, "title"),
        })
    }

    /// The URL with a protocol: delivery URLs are protocol-relative and
    /// must be prefixed with `https:` before use.
    pub fn resolved_url(&self) -> String {
        if self.url.starts_with("//") {
            format!("https:{}", self.url)
        } else {
            self.url.clone()
        }
    }
}

/// A reference to another structured CMS record, inlined in the document.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryRef {
    /// Discriminator used by the embedded-entry dispatcher (e.g. "timer").
    pub content_type_id: String,
    /// Opaque payload, interpreted only by the registered resolver.
    pub fields: Map<String, Value>,
}

impl EntryRef {
    /// Extract an entry reference from a target value.
    ///
    /// Accepts both the flat shape `{contentTypeId, fields}` and the
    /// delivery-API shape `{sys: {contentType: {sys: {id}}}, fields}`.
    pub fn from_target(target: &Value) -> Option<EntryRef> {
        let content_type_id = target
            .get("contentTypeId")
            .and_then(Value::as_str)
            .or_else(|| {
                target
                    .get("sys")?
                    .get("contentType")?
                    .get("sys")?
                    .get("id")?
                    .as_str()
            })?
            .to_string();

        let fields = match target.get("fields") {
            Some(Value::Object(map)) => map.clone(),
            _ => Map::new(),
        };

        Some(EntryRef {
            content_type_id,
            fields,
        })
    }
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Input accepted by the rendering entry points.
///
/// The CMS returns most description fields as structured documents, but
/// some older entries store a bare string. Both render through the same
/// call: strings short-circuit to a single text fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Source {
    Plain(String),
    Document(Document),
}

impl Source {
    pub fn from_json_str(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_value(value: Value) -> Result<Self, DocumentError> {
        Ok(serde_json::from_value(value)?)
    }
}

impl From<Document> for Source {
    fn from(doc: Document) -> Self {
        Source::Document(doc)
    }
}

impl From<String> for Source {
    fn from(text: String) -> Self {
        Source::Plain(text)
    }
}

impl From<&str> for Source {
    fn from(text: &str) -> Self {
        Source::Plain(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use serde_json::json;

    #[test]
    fn test_parse_document() {
        let doc = Document::from_json_str(indoc! {r#"
            {
              "nodeType": "document",
              "content": [
                {
                  "nodeType": "paragraph",
                  "content": [
                    {"nodeType": "text", "value": "Step 1", "marks": [{"type": "bold"}]}
                  ]
                }
              ]
            }"#})
        .unwrap();

        assert_eq!(doc.node_type, "document");
        assert_eq!(doc.content.len(), 1);
        let paragraph = &doc.content[0];
        assert_eq!(paragraph.kind(), NodeKind::Paragraph);
        let text = &paragraph.content[0];
        assert_eq!(text.value.as_deref(), Some("Step 1"));
        assert_eq!(text.marks[0].mark_type, "bold");
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = Document::from_json_str("{not json");
        assert!(matches!(result, Err(DocumentError::InvalidJson(_))));
    }

    #[test]
    fn test_source_dual_mode() {
        let plain = Source::from_json_str(r#""just a string""#).unwrap();
        assert_eq!(plain, Source::Plain("just a string".to_string()));

        let doc = Source::from_json_str(r#"{"nodeType": "document", "content": []}"#).unwrap();
        assert!(matches!(doc, Source::Document(_)));
    }

    #[test]
    fn test_asset_ref_flat_shape() {
        let target = json!({"url": "//images.example.com/a.jpg", "title": "Dish"});
        let asset = AssetRef::from_target(&target).unwrap();
        assert_eq!(asset.url, "//images.example.com/a.jpg");
        assert_eq!(asset.title.as_deref(), Some("Dish"));
        assert_eq!(asset.resolved_url(), "https://images.example.com/a.jpg");
    }

    #[test]
    fn test_asset_ref_delivery_shape() {
        let target = json!({
            "fields": {
                "title": "Schnitzel",
                "file": {"url": "//images.example.com/schnitzel.jpg"}
            }
        });
        let asset = AssetRef::from_target(&target).unwrap();
        assert_eq!(
            asset.resolved_url(),
            "https://images.example.com/schnitzel.jpg"
        );
        assert_eq!(asset.title.as_deref(), Some("Schnitzel"));
    }

    #[test]
    fn test_asset_ref_absolute_url_unchanged() {
        let target = json!({"url": "https://images.example.com/a.jpg"});
        let asset = AssetRef::from_target(&target).unwrap();
        assert_eq!(asset.resolved_url(), "https://images.example.com/a.jpg");
    }

    #[test]
    fn test_asset_ref_missing_url() {
        assert!(AssetRef::from_target(&json!({"title": "no file"})).is_none());
        assert!(AssetRef::from_target(&json!({"fields": {"title": "x"}})).is_none());
    }

    #[test]
    fn test_entry_ref_flat_shape() {
        let target = json!({
            "contentTypeId": "timer",
            "fields": {"duration": 300, "stepNumber": 2}
        });
        let entry = EntryRef::from_target(&target).unwrap();
        assert_eq!(entry.content_type_id, "timer");
        assert_eq!(entry.fields.get("duration"), Some(&json!(300)));
    }

    #[test]
    fn test_entry_ref_delivery_shape() {
        let target = json!({
            "sys": {"contentType": {"sys": {"id": "timer"}}},
            "fields": {"duration": 120}
        });
        let entry = EntryRef::from_target(&target).unwrap();
        assert_eq!(entry.content_type_id, "timer");
        assert_eq!(entry.fields.get("duration"), Some(&json!(120)));
    }

    #[test]
    fn test_entry_ref_missing_discriminator() {
        assert!(EntryRef::from_target(&json!({"fields": {}})).is_none());
    }

    #[test]
    fn test_entry_ref_fields_optional() {
        let entry = EntryRef::from_target(&json!({"contentTypeId": "note"})).unwrap();
        assert!(entry.fields.is_empty());
    }

    #[test]
    fn test_node_defaults() {
        let node: Node = serde_json::from_value(json!({"nodeType": "hr"})).unwrap();
        assert!(node.content.is_empty());
        assert!(node.value.is_none());
        assert!(node.marks.is_empty());
        assert!(node.data.is_none());
        assert_eq!(node.kind(), NodeKind::Rule);
    }
}
