use crate::model::MarkKind;

/// Computed text styling for a block fragment.
///
/// The fragment tree is UI-framework-agnostic; hosts map this onto native
/// text attributes, CSS, or terminal styling as they see fit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextStyle {
    pub color: String,
    pub font_size: u32,
}

/// Role of a block fragment in document flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockRole {
    Document,
    Paragraph,
    /// Heading level 1 through 6.
    Heading(u8),
    Blockquote,
}

/// One item of a rendered list, with its display prefix precomputed from
/// document position (`•` for unordered, `1.`/`2.`/... for ordered).
#[derive(Debug, Clone, PartialEq)]
pub struct ListItemFragment {
    pub prefix: String,
    pub children: Vec<Fragment>,
}

/// Output representation produced by the converter.
///
/// A fragment tree carries everything the presentation layer needs and
/// nothing it does not: no CMS tags, no alias spellings, no raw targets.
/// Anomalies surface as [`Fragment::Unknown`] or placeholder fragments so
/// a broken node is visible instead of silently missing.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    /// Nothing to render; produced for skipped malformed nodes. Container
    /// handlers filter these out of their children.
    Empty,
    /// A run of text.
    Text { value: String },
    /// An inline style wrapper produced by a text mark. Wrappers nest in
    /// mark array order: the first mark is the outermost wrapper.
    Styled {
        mark: MarkKind,
        child: Box<Fragment>,
    },
    /// A transparent grouping with no styling of its own.
    Sequence { children: Vec<Fragment> },
    /// A text block: document root, paragraph, heading, or quote.
    Block {
        role: BlockRole,
        style: TextStyle,
        children: Vec<Fragment>,
    },
    /// An ordered or unordered list with per-item prefixes.
    List {
        ordered: bool,
        items: Vec<ListItemFragment>,
    },
    /// A pressable link. Rendering never navigates; the host invokes
    /// `RenderOptions::press_link` on interaction.
    Link { uri: String, children: Vec<Fragment> },
    /// An inlined image, URL already protocol-resolved.
    Image { url: String, title: Option<String> },
    /// An embedded entry resolved by a registered resolver.
    Embed {
        content_type_id: String,
        body: Box<Fragment>,
    },
    /// Fallback for an embedded entry with no registered resolver.
    EmbedPlaceholder { content_type_id: String },
    /// Horizontal rule.
    Rule,
    /// Visible stand-in for a node type the converter does not understand.
    Unknown { node_type: String },
    /// Explicit empty state rendered when a recipe has no content at all.
    NoContent,
}

impl Fragment {
    pub fn text(value: impl Into<String>) -> Fragment {
        Fragment::Text {
            value: value.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Fragment::Empty)
    }
}
