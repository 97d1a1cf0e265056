//! livemark-core: cursor-aware live-preview decorations for Markdown.
//!
//! This crate provides:
//! - `Extractor` - pure Markdown → `DecorationRange` extraction (pulldown-cmark)
//! - `latex` - LaTeX → Unicode substitutions for math spans
//! - `filter_decorations` - selection-aware suppression of marker decorations
//! - `PreviewSession` - last-writer-wins wrapper for off-thread hosts
//!
//! All offsets are char offsets into the source text.

pub mod decoration;
pub mod extract;
pub mod filter;
pub mod latex;
pub mod session;
pub mod text;
pub mod types;

pub use decoration::{DecorationRange, DecorationType, RevealScope, is_marker_decoration_type};
pub use extract::{ExtractOptions, Extractor, extract_decorations};
pub use filter::{DecorationMap, filter_decorations, filter_decorations_indexed};
pub use latex::{Substitution, find_latex_commands, render_unicode};
pub use session::{PreviewSession, Revision, decorate};
pub use smol_str::SmolStr;
pub use text::SourceText;
pub use types::Selection;
