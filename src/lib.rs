pub mod diagnostics;
pub mod embed;
pub mod extract;
pub mod ffi;
pub mod model;
pub mod normalize;
pub mod render;

pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticSink, LogSink};
pub use embed::{EntryRegistry, EntryResolver};
pub use extract::extract_plain_text;
pub use model::*;
pub use normalize::{normalize, normalize_document, normalize_with};
pub use render::{
    render, render_or_empty, to_html, BlockRole, Fragment, LinkCallback, ListItemFragment,
    RenderOptions, TextStyle,
};

uniffi::setup_scaffolding!();
