/// Canonical node-type vocabulary understood by the converter.
///
/// Parsing a tag never fails: anything outside the canonical set lands in
/// the `Unknown` arm, which the converter turns into a visible fragment so
/// authoring mistakes stay discoverable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Document,
    Text,
    Paragraph,
    /// Heading level 1 through 6.
    Heading(u8),
    UnorderedList,
    OrderedList,
    ListItem,
    Hyperlink,
    EmbeddedAsset,
    EmbeddedEntry,
    Blockquote,
    Rule,
    Unknown(String),
}

impl NodeKind {
    /// Parse a canonical node-type tag.
    ///
    /// Aliased spellings (`p`, `h2`, `bold`, ...) are the normalizer's
    /// business; this only recognizes the canonical vocabulary.
    pub fn from_tag(tag: &str) -> NodeKind {
        match tag {
            "document" => NodeKind::Document,
            "text" => NodeKind::Text,
            "paragraph" => NodeKind::Paragraph,
            "unordered-list" => NodeKind::UnorderedList,
            "ordered-list" => NodeKind::OrderedList,
            "list-item" => NodeKind::ListItem,
            "hyperlink" => NodeKind::Hyperlink,
            "embedded-asset" => NodeKind::EmbeddedAsset,
            "embedded-entry" => NodeKind::EmbeddedEntry,
            "blockquote" => NodeKind::Blockquote,
            "hr" => NodeKind::Rule,
            _ => {
                if let Some(level) = tag
                    .strip_prefix("heading-")
                    .and_then(|s| s.parse::<u8>().ok())
                {
                    if (1..=6).contains(&level) {
                        return NodeKind::Heading(level);
                    }
                }
                NodeKind::Unknown(tag.to_string())
            }
        }
    }

    /// Canonical tag for this kind.
    pub fn tag(&self) -> String {
        match self {
            NodeKind::Document => "document".to_string(),
            NodeKind::Text => "text".to_string(),
            NodeKind::Paragraph => "paragraph".to_string(),
            NodeKind::Heading(level) => format!("heading-{level}"),
            NodeKind::UnorderedList => "unordered-list".to_string(),
            NodeKind::OrderedList => "ordered-list".to_string(),
            NodeKind::ListItem => "list-item".to_string(),
            NodeKind::Hyperlink => "hyperlink".to_string(),
            NodeKind::EmbeddedAsset => "embedded-asset".to_string(),
            NodeKind::EmbeddedEntry => "embedded-entry".to_string(),
            NodeKind::Blockquote => "blockquote".to_string(),
            NodeKind::Rule => "hr".to_string(),
            NodeKind::Unknown(tag) => tag.clone(),
        }
    }

    /// True for kinds rendered as their own block in document flow.
    ///
    /// Text extraction uses this to decide where word-separating spaces go.
    pub fn is_block(&self) -> bool {
        matches!(
            self,
            NodeKind::Document
                | NodeKind::Paragraph
                | NodeKind::Heading(_)
                | NodeKind::UnorderedList
                | NodeKind::OrderedList
                | NodeKind::ListItem
                | NodeKind::Blockquote
                | NodeKind::Rule
        )
    }
}

/// Canonical inline mark vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MarkKind {
    Strong,
    Em,
    Unknown(String),
}

impl MarkKind {
    pub fn from_tag(tag: &str) -> MarkKind {
        match tag {
            "strong" => MarkKind::Strong,
            "em" => MarkKind::Em,
            _ => MarkKind::Unknown(tag.to_string()),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            MarkKind::Strong => "strong",
            MarkKind::Em => "em",
            MarkKind::Unknown(tag) => tag,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_tags_round_trip() {
        let tags = [
            "document",
            "text",
            "paragraph",
            "heading-1",
            "heading-6",
            "unordered-list",
            "ordered-list",
            "list-item",
            "hyperlink",
            "embedded-asset",
            "embedded-entry",
            "blockquote",
            "hr",
        ];
        for tag in tags {
            let kind = NodeKind::from_tag(tag);
            assert!(!matches!(kind, NodeKind::Unknown(_)), "{tag} not canonical");
            assert_eq!(kind.tag(), tag);
        }
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(NodeKind::from_tag("heading-3"), NodeKind::Heading(3));
        // Out-of-range levels are not part of the vocabulary
        assert!(matches!(
            NodeKind::from_tag("heading-7"),
            NodeKind::Unknown(_)
        ));
        assert!(matches!(
            NodeKind::from_tag("heading-0"),
            NodeKind::Unknown(_)
        ));
    }

    #[test]
    fn test_aliases_are_not_canonical() {
        // Aliases only become canonical after normalization
        assert!(matches!(NodeKind::from_tag("p"), NodeKind::Unknown(_)));
        assert!(matches!(NodeKind::from_tag("h2"), NodeKind::Unknown(_)));
        assert!(matches!(MarkKind::from_tag("bold"), MarkKind::Unknown(_)));
    }

    #[test]
    fn test_mark_kinds() {
        assert_eq!(MarkKind::from_tag("strong"), MarkKind::Strong);
        assert_eq!(MarkKind::from_tag("em"), MarkKind::Em);
        assert_eq!(MarkKind::from_tag("strong").tag(), "strong");
    }
}
