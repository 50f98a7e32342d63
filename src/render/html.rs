//! Fragment-to-HTML serialization.
//!
//! The webview-based screens consume the document as a markup string
//! rather than a native fragment tree. Tags stay semantic (`<p>`, `<h2>`,
//! `<ol>`, ...) and carry no inline styling; the host applies its theme to
//! the tags, which keeps one writer valid for light and dark mode alike.

use super::model::{BlockRole, Fragment};
use crate::model::MarkKind;

/// Serialize a fragment tree to an HTML string.
pub fn to_html(fragment: &Fragment) -> String {
    let mut out = String::new();
    write_fragment(fragment, &mut out);
    out
}

fn write_fragment(fragment: &Fragment, out: &mut String) {
    match fragment {
        Fragment::Empty => {}
        Fragment::NoContent => out.push_str("<p>No content available</p>"),
        Fragment::Text { value } => out.push_str(&escape_text(value)),
        Fragment::Styled { mark, child } => {
            let tag = match mark {
                MarkKind::Strong => "strong",
                MarkKind::Em => "em",
                // Unknown marks never survive rendering, but the writer is
                // total over the fragment type
                MarkKind::Unknown(_) => "span",
            };
            out.push('<');
            out.push_str(tag);
            out.push('>');
            write_fragment(child, out);
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
        Fragment::Sequence { children } => write_children(children, out),
        Fragment::Block {
            role, children, ..
        } => match role {
            // The document root has no wrapper of its own
            BlockRole::Document => write_children(children, out),
            BlockRole::Paragraph => wrap(out, "p", children),
            BlockRole::Heading(level) => {
                let tag = format!("h{}", (*level).clamp(1, 6));
                out.push('<');
                out.push_str(&tag);
                out.push('>');
                write_children(children, out);
                out.push_str("</");
                out.push_str(&tag);
                out.push('>');
            }
            BlockRole::Blockquote => wrap(out, "blockquote", children),
        },
        Fragment::List { ordered, items } => {
            let tag = if *ordered { "ol" } else { "ul" };
            out.push('<');
            out.push_str(tag);
            out.push('>');
            for item in items {
                out.push_str("<li>");
                write_children(&item.children, out);
                out.push_str("</li>");
            }
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
        Fragment::Link { uri, children } => {
            out.push_str("<a href=\"");
            out.push_str(&escape_attr(uri));
            out.push_str("\">");
            write_children(children, out);
            out.push_str("</a>");
        }
        Fragment::Image { url, title } => {
            out.push_str("<img src=\"");
            out.push_str(&escape_attr(url));
            out.push_str("\" alt=\"");
            out.push_str(&escape_attr(title.as_deref().unwrap_or("")));
            out.push_str("\" />");
        }
        Fragment::Embed {
            content_type_id,
            body,
        } => {
            out.push_str("<div data-entry-type=\"");
            out.push_str(&escape_attr(content_type_id));
            out.push_str("\">");
            write_fragment(body, out);
            out.push_str("</div>");
        }
        Fragment::EmbedPlaceholder { content_type_id } => {
            out.push_str("<span class=\"embed-placeholder\">[");
            out.push_str(&escape_text(content_type_id));
            out.push_str("]</span>");
        }
        Fragment::Rule => out.push_str("<hr />"),
        Fragment::Unknown { node_type } => {
            out.push_str("<span class=\"unsupported\">[unsupported: ");
            out.push_str(&escape_text(node_type));
            out.push_str("]</span>");
        }
    }
}

fn write_children(children: &[Fragment], out: &mut String) {
    for child in children {
        write_fragment(child, out);
    }
}

fn wrap(out: &mut String, tag: &str, children: &[Fragment]) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
    write_children(children, out);
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn escape_text(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(input: &str) -> String {
    escape_text(input).replace('"', "&quot;")
}
