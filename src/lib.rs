//! # dfm
//!
//! A rule-based parsing engine for DFM-flavored Markdown.
//!
//! The engine is the conceptual-content front end of a documentation build
//! pipeline: it turns raw markdown text into a tree of tokens that a renderer
//! (out of scope here) consumes. The design is a small extensible compiler
//! front end: an ordered chain of named rules tokenizes the source in two
//! phases (block, then inline), and a chain of rewriters transforms the
//! resulting tree so format extensions can specialize generic tokens without
//! touching the core loop.
//!
//! See the [dfm] module for the full pipeline documentation.

pub mod dfm;
