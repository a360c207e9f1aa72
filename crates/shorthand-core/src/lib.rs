//! Shorthand Core - diagnostics for CSS shorthand value grammars
//!
//! Takes a grammar in the CSS value-definition syntax (`&&`, `||`, `|`,
//! `[ ]`, `?`, `!` and juxtaposition), enumerates every way a value can be
//! written, and reports ambiguities: distinct expansions that become the
//! same text once each longhand is replaced by sample values.
//!
//! # Architecture
//!
//! ```text
//! Grammar text → Tokenizer → Parser → AST
//!                                      ↓
//!                               Expansion Engine → unique expansions
//!                                      ↓
//!                               Ambiguity Search → colliding renderings
//! ```
//!
//! # Guarantees
//!
//! - **Deterministic**: Same input always produces an identical report
//! - **Stateless**: No state survives between analyses; the vocabulary and
//!   sample tables are read-only statics
//! - **Bounded**: Expansion counts are capped by [`AnalysisOptions`]

pub mod ambiguity;
pub mod analysis;
pub mod error;
pub mod expansion;
pub mod parser;
pub mod vocabulary;

pub use analysis::{analyze, analyze_with, AnalysisOptions, AnalysisReport};
pub use error::{GrammarError, Result};
pub use expansion::{render, Expansion};
pub use parser::ast::Node;
pub use parser::parse;
pub use vocabulary::{Token, TokenKind};
