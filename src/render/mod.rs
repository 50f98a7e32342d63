//! Document-to-fragment conversion.
//!
//! One recursive pass over a normalized document, dispatching on each
//! node's canonical kind and producing a [`Fragment`] tree for the
//! presentation layer. The converter is total: unknown tags become visible
//! [`Fragment::Unknown`] stand-ins, malformed embeds are skipped with a
//! diagnostic, and a bare-string input short-circuits to a single text
//! fragment. Rendering never fails and never performs I/O.

use crate::diagnostics::{Diagnostic, DiagnosticSink, LogSink};
use crate::embed::EntryRegistry;
use crate::model::{AssetRef, EntryRef, MarkKind, Node, NodeKind, Source};
use std::sync::Arc;

mod html;
mod model;

pub use html::to_html;
pub use model::{BlockRole, Fragment, ListItemFragment, TextStyle};

/// Callback invoked when the host reports a link interaction.
pub type LinkCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Per-heading-level additions to the base font size, largest first.
/// Levels 1 and 2 match the production stylesheet; the rest extend the
/// scale monotonically so deeper headings never outgrow shallower ones.
const HEADING_OFFSETS: [u32; 6] = [8, 4, 3, 2, 1, 0];

/// Recognized rendering configuration.
///
/// Concurrent render calls may share one `RenderOptions`; the engine keeps
/// no state in it. Caller-supplied callbacks and resolvers are required to
/// be `Send + Sync`, but whether they are stateless or internally
/// synchronized is the caller's contract.
#[derive(Clone)]
pub struct RenderOptions {
    pub text_color: String,
    pub base_font_size: u32,
    /// Invoked by [`RenderOptions::press_link`]; never during render.
    pub on_link_press: Option<LinkCallback>,
    /// Resolvers for embedded entries, keyed by content type.
    pub entries: EntryRegistry,
    /// Receiver for non-fatal anomalies.
    pub sink: Arc<dyn DiagnosticSink>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            text_color: "#000".to_string(),
            base_font_size: 16,
            on_link_press: None,
            entries: EntryRegistry::new(),
            sink: Arc::new(LogSink),
        }
    }
}

impl RenderOptions {
    /// Forward a link interaction to the configured callback.
    ///
    /// Called by the host when the user activates a link fragment; calls
    /// the callback exactly once per invocation.
    pub fn press_link(&self, uri: &str) {
        if let Some(callback) = &self.on_link_press {
            callback(uri);
        }
    }

    fn style(&self, font_size: u32) -> TextStyle {
        TextStyle {
            color: self.text_color.clone(),
            font_size,
        }
    }
}

/// Render a source to a fragment tree.
///
/// Structured documents get the full tree walk; a bare string becomes a
/// single text fragment. Inputs are expected to be normalized first —
/// un-normalized alias tags fall through to the unknown handler.
pub fn render(source: &Source, options: &RenderOptions) -> Fragment {
    match source {
        Source::Plain(text) => Fragment::text(text.clone()),
        Source::Document(doc) => Fragment::Block {
            role: BlockRole::Document,
            style: options.style(options.base_font_size),
            children: render_children(&doc.content, options),
        },
    }
}

/// Render an optional source, producing an explicit empty state when the
/// recipe has no content at all.
pub fn render_or_empty(source: Option<&Source>, options: &RenderOptions) -> Fragment {
    match source {
        Some(source) => render(source, options),
        None => Fragment::NoContent,
    }
}

fn render_children(nodes: &[Node], options: &RenderOptions) -> Vec<Fragment> {
    nodes
        .iter()
        .map(|node| render_node(node, options))
        .filter(|fragment| !fragment.is_empty())
        .collect()
}

fn render_node(node: &Node, options: &RenderOptions) -> Fragment {
    match node.kind() {
        NodeKind::Document => Fragment::Block {
            role: BlockRole::Document,
            style: options.style(options.base_font_size),
            children: render_children(&node.content, options),
        },
        NodeKind::Text => render_text(node, options),
        NodeKind::Paragraph => Fragment::Block {
            role: BlockRole::Paragraph,
            style: options.style(options.base_font_size),
            children: render_children(&node.content, options),
        },
        NodeKind::Heading(level) => Fragment::Block {
            role: BlockRole::Heading(level),
            style: options.style(options.base_font_size + heading_offset(level)),
            children: render_children(&node.content, options),
        },
        NodeKind::UnorderedList => render_list(node, false, options),
        NodeKind::OrderedList => render_list(node, true, options),
        // A list item outside a list: keep its content in document flow
        NodeKind::ListItem => Fragment::Block {
            role: BlockRole::Paragraph,
            style: options.style(options.base_font_size),
            children: render_children(&node.content, options),
        },
        NodeKind::Hyperlink => render_hyperlink(node, options),
        NodeKind::EmbeddedAsset => render_asset(node, options),
        NodeKind::EmbeddedEntry => render_entry(node, options),
        NodeKind::Blockquote => Fragment::Block {
            role: BlockRole::Blockquote,
            style: options.style(options.base_font_size),
            children: render_children(&node.content, options),
        },
        NodeKind::Rule => Fragment::Rule,
        NodeKind::Unknown(tag) => {
            options.sink.report(Diagnostic::UnknownNodeType {
                tag: tag.clone(),
            });
            Fragment::Unknown { node_type: tag }
        }
    }
}

fn heading_offset(level: u8) -> u32 {
    HEADING_OFFSETS[usize::from(level.clamp(1, 6)) - 1]
}

fn render_text(node: &Node, options: &RenderOptions) -> Fragment {
    let value = node.value.clone().unwrap_or_default();
    let mut fragment = Fragment::Text { value };

    // Wrap in reverse so the first mark in the array ends up outermost:
    // [strong, em] is bold wrapping italic.
    for mark in node.marks.iter().rev() {
        match mark.kind() {
            MarkKind::Unknown(tag) => {
                options.sink.report(Diagnostic::UnknownMarkType { tag });
            }
            kind => {
                fragment = Fragment::Styled {
                    mark: kind,
                    child: Box::new(fragment),
                };
            }
        }
    }
    fragment
}

fn render_list(node: &Node, ordered: bool, options: &RenderOptions) -> Fragment {
    let mut items = Vec::new();
    let mut position = 0usize;

    for child in &node.content {
        if child.kind() == NodeKind::ListItem {
            position += 1;
            let prefix = if ordered {
                format!("{position}.")
            } else {
                "•".to_string()
            };
            items.push(ListItemFragment {
                prefix,
                children: render_children(&child.content, options),
            });
        } else {
            // Stray non-item child: keep the content, no prefix
            let fragment = render_node(child, options);
            if !fragment.is_empty() {
                items.push(ListItemFragment {
                    prefix: String::new(),
                    children: vec![fragment],
                });
            }
        }
    }

    Fragment::List { ordered, items }
}

fn render_hyperlink(node: &Node, options: &RenderOptions) -> Fragment {
    let uri = node.data.as_ref().and_then(|data| data.uri.clone());
    let children = render_children(&node.content, options);

    match uri {
        Some(uri) => Fragment::Link { uri, children },
        None => {
            options.sink.report(Diagnostic::MissingUri);
            Fragment::Sequence { children }
        }
    }
}

fn render_asset(node: &Node, options: &RenderOptions) -> Fragment {
    let target = node.data.as_ref().and_then(|data| data.target.as_ref());
    match target.and_then(AssetRef::from_target) {
        Some(asset) => Fragment::Image {
            url: asset.resolved_url(),
            title: asset.title,
        },
        None => {
            options.sink.report(Diagnostic::MalformedAsset {
                detail: "no usable file url".to_string(),
            });
            Fragment::Empty
        }
    }
}

fn render_entry(node: &Node, options: &RenderOptions) -> Fragment {
    let target = node.data.as_ref().and_then(|data| data.target.as_ref());
    let entry = match target.and_then(EntryRef::from_target) {
        Some(entry) => entry,
        None => {
            options.sink.report(Diagnostic::MalformedEntry {
                detail: "no content type discriminator".to_string(),
            });
            return Fragment::Empty;
        }
    };

    match options.entries.resolve(&entry.content_type_id, &entry.fields) {
        Some(body) => Fragment::Embed {
            content_type_id: entry.content_type_id,
            body: Box::new(body),
        },
        None => {
            options.sink.report(Diagnostic::MissingResolver {
                content_type_id: entry.content_type_id.clone(),
            });
            Fragment::EmbedPlaceholder {
                content_type_id: entry.content_type_id,
            }
        }
    }
}
