//! Caissa is a chess rules engine: it models positions, enumerates legal
//! moves, applies them and speaks [FEN]. It is a correctness-first rules
//! oracle for UIs, search engines and test harnesses, not a search or
//! evaluation engine.
//!
//! The entry point is [`chess::position::Position`]: parse or build one, ask
//! it for legal moves and derive successor positions.
//!
//! [FEN]: https://www.chessprogramming.org/Forsyth-Edwards_Notation

#![warn(missing_docs, variant_size_differences)]
// Rustc lints.
#![warn(
    absolute_paths_not_starting_with_crate,
    keyword_idents,
    macro_use_extern_crate,
    unused_extern_crates,
    unused_import_braces,
    unused_lifetimes,
    unused_qualifications
)]
// Rustdoc lints.
#![warn(
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::invalid_codeblock_attributes,
    rustdoc::invalid_html_tags,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::bare_urls
)]
// Clippy lints.
#![warn(
    clippy::correctness,
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::pedantic
)]

pub mod chess;
