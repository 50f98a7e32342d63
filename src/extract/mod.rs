//! Plain-text extraction.
//!
//! Flattens a document to the text a reader would hear: marks and links
//! reduce to their visible text, assets and embeds contribute nothing.
//! The app feeds the result to search indexing and to speech synthesis.
//!
//! Total and pure: any tree shape, including malformed ones, yields a
//! string; missing content at any level yields the empty string for that
//! subtree.

use crate::model::{Node, NodeKind, Source};

/// Extract the plain text of a source.
///
/// Inline runs concatenate with no separator; block-level siblings
/// (paragraphs, headings, list items) are joined with a single space.
pub fn extract_plain_text(source: &Source) -> String {
    match source {
        Source::Plain(text) => text.clone(),
        Source::Document(doc) => join_blocks(&doc.content),
    }
}

fn node_text(node: &Node) -> String {
    match node.kind() {
        NodeKind::Text => node.value.clone().unwrap_or_default(),
        // Media and embeds have no spoken text
        NodeKind::EmbeddedAsset | NodeKind::EmbeddedEntry | NodeKind::Rule => String::new(),
        // Containers of blocks: space-separate the pieces
        NodeKind::Document
        | NodeKind::UnorderedList
        | NodeKind::OrderedList
        | NodeKind::ListItem
        | NodeKind::Blockquote => join_blocks(&node.content),
        // Inline containers: concatenate runs directly
        NodeKind::Paragraph
        | NodeKind::Heading(_)
        | NodeKind::Hyperlink
        | NodeKind::Unknown(_) => concat_inline(&node.content),
    }
}

fn concat_inline(nodes: &[Node]) -> String {
    nodes.iter().map(node_text).collect()
}

fn join_blocks(nodes: &[Node]) -> String {
    let mut parts = Vec::new();
    for node in nodes {
        let text = node_text(node);
        if !text.is_empty() {
            parts.push(text);
        }
    }
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn source(json: &str) -> Source {
        Source::from_json_str(json).unwrap()
    }

    #[test]
    fn test_single_paragraph() {
        let input = source(indoc! {r#"
            {
              "nodeType": "document",
              "content": [
                {"nodeType": "paragraph", "content": [{"nodeType": "text", "value": "Hello"}]}
              ]
            }"#});
        assert_eq!(extract_plain_text(&input), "Hello");
    }

    #[test]
    fn test_inline_runs_not_separated() {
        let input = source(indoc! {r#"
            {
              "nodeType": "document",
              "content": [
                {"nodeType": "paragraph", "content": [
                  {"nodeType": "text", "value": "Stir "},
                  {"nodeType": "text", "value": "well", "marks": [{"type": "strong"}]},
                  {"nodeType": "text", "value": "."}
                ]}
              ]
            }"#});
        assert_eq!(extract_plain_text(&input), "Stir well.");
    }

    #[test]
    fn test_blocks_space_separated() {
        let input = source(indoc! {r#"
            {
              "nodeType": "document",
              "content": [
                {"nodeType": "heading-2", "content": [{"nodeType": "text", "value": "Zubereitung"}]},
                {"nodeType": "paragraph", "content": [{"nodeType": "text", "value": "Erst schneiden."}]},
                {"nodeType": "unordered-list", "content": [
                  {"nodeType": "list-item", "content": [
                    {"nodeType": "paragraph", "content": [{"nodeType": "text", "value": "Zwiebeln"}]}
                  ]},
                  {"nodeType": "list-item", "content": [
                    {"nodeType": "paragraph", "content": [{"nodeType": "text", "value": "Knoblauch"}]}
                  ]}
                ]}
              ]
            }"#});
        assert_eq!(
            extract_plain_text(&input),
            "Zubereitung Erst schneiden. Zwiebeln Knoblauch"
        );
    }

    #[test]
    fn test_links_flatten_to_text() {
        let input = source(indoc! {r#"
            {
              "nodeType": "document",
              "content": [
                {"nodeType": "paragraph", "content": [
                  {"nodeType": "text", "value": "See "},
                  {"nodeType": "hyperlink", "data": {"uri": "https://example.com"},
                   "content": [{"nodeType": "text", "value": "the video"}]}
                ]}
              ]
            }"#});
        assert_eq!(extract_plain_text(&input), "See the video");
    }

    #[test]
    fn test_assets_and_embeds_silent() {
        let input = source(indoc! {r#"
            {
              "nodeType": "document",
              "content": [
                {"nodeType": "paragraph", "content": [{"nodeType": "text", "value": "before"}]},
                {"nodeType": "embedded-asset", "data": {"target": {"url": "//x.com/a.jpg"}}},
                {"nodeType": "embedded-entry", "data": {"target": {"contentTypeId": "timer"}}},
                {"nodeType": "paragraph", "content": [{"nodeType": "text", "value": "after"}]}
              ]
            }"#});
        assert_eq!(extract_plain_text(&input), "before after");
    }

    #[test]
    fn test_empty_and_malformed_total() {
        assert_eq!(
            extract_plain_text(&source(r#"{"nodeType": "document", "content": []}"#)),
            ""
        );
        // Text node without a value, unknown nodes, empty containers
        let input = source(indoc! {r#"
            {
              "nodeType": "document",
              "content": [
                {"nodeType": "text"},
                {"nodeType": "xyz-unknown", "content": [{"nodeType": "text", "value": "kept"}]},
                {"nodeType": "paragraph"}
              ]
            }"#});
        assert_eq!(extract_plain_text(&input), "kept");
    }

    #[test]
    fn test_plain_source() {
        assert_eq!(
            extract_plain_text(&Source::from("Guten Appetit")),
            "Guten Appetit"
        );
    }
}
