//! `gdts_core` holds the two pieces of text logic every generated TypeScript
//! declaration for the Godot class reference depends on: a transpiler from the
//! engine's documentation markup to `/** ... */` comment blocks, and a
//! normalizer that turns engine names into legal, correctly scoped
//! identifiers.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Documentation lines
//!   → $DOCS_URL substitution
//!   → Lexer (tokenizes markup into Tags)
//!   → Walker (renders Tags to markdown, keeping fences and inline code literal)
//!   → Line normalization (trims outside fences, inserts paragraph breaks)
//!   → Comment framing (/** * */, with `*/` escaped)
//!
//! Raw engine name
//!   → Visibility (magic hook | allow-listed | stripped | unchanged)
//!   → Sanitization (camel-casing, illegal characters, leading digit, keywords)
//! ```
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading from `gdts.toml`: the public
//!   underscore allow-list and documentation settings.
//! - [`comment`]: Comment framing and terminator escaping.
//!
//! ## Key Types
//!
//! - [`MarkupTranspiler`]: Converts documentation markup into a comment
//!   block.
//! - [`IdentifierNormalizer`]: Decides visibility and produces legal
//!   identifiers.
//! - [`PublicNames`]: Names that keep their leading underscore and stay
//!   public.
//! - [`GdtsConfig`]: Configuration loaded from `gdts.toml`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gdts_core::GdtsConfig;
//! use gdts_core::IdentifierNormalizer;
//! use gdts_core::MarkupOptions;
//! use gdts_core::MarkupTranspiler;
//! use std::path::Path;
//!
//! let root = Path::new(".");
//! let config = GdtsConfig::load_or_default(root);
//! let normalizer = IdentifierNormalizer::from_config(&config.naming, root).unwrap();
//! let transpiler = MarkupTranspiler::new(MarkupOptions::from(&config.docs));
//!
//! let method = normalizer.normalize("get_child_count");
//! let docs = transpiler.transpile(&["Returns the number of children of this node."]);
//!
//! println!("{docs}\n{}(): number;", method.name);
//! ```

pub use config::*;
pub use error::*;
pub use identifier::*;
pub use markup::*;
pub use tokens::*;

pub mod comment;
pub mod config;
#[allow(unused_assignments)]
mod error;
mod identifier;
pub(crate) mod lexer;
mod markup;
mod tokens;

#[cfg(test)]
mod __fixtures;
