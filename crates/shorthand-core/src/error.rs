//! Error types for shorthand grammar analysis
//!
//! All fallible operations return `Result<T, GrammarError>`.
//! Tokenizer and parser variants carry the unconsumed input so the
//! caller can point at the offending text. The analysis-level variants
//! (`AcceptsEmpty`, `Ambiguous`) are produced from a complete report; the
//! two limit variants stop an analysis before it exhausts memory.

use thiserror::Error;

/// Grammar analysis error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    /// No vocabulary entry matches the input at `offset`
    #[error("Unknown token at \"{remaining}\"")]
    UnknownToken { offset: usize, remaining: String },

    /// A `[` group was not closed
    #[error("Expected ] at \"{remaining}\"")]
    UnmatchedBracket { remaining: String },

    /// `!` or `?` with no term of its own to apply to, e.g. `<angle>?!`
    #[error("Unexpected {postfix} at \"{remaining}\"")]
    MisplacedPostfix { postfix: String, remaining: String },

    /// Input ended where a term was required
    #[error("Unexpected end of input")]
    UnexpectedEnd,

    /// A token that cannot start a term
    #[error("Unexpected token at \"{remaining}\"")]
    UnexpectedToken { remaining: String },

    /// Tokens left over after a complete parse, e.g. the second `]` in `[ / ] ]`
    #[error("Unexpected input at \"{remaining}\"")]
    TrailingInput { remaining: String },

    /// The grammar accepts writing nothing at all
    #[error("Empty string should not be accepted.")]
    AcceptsEmpty,

    /// Distinct expansions render to the same concrete text
    #[error("Ambiguities: {}", .ambiguities.join("; "))]
    Ambiguous { ambiguities: Vec<String> },

    /// The grammar produces more expansions than the configured ceiling,
    /// counting duplicates
    #[error("Grammar produces more than {limit} expansions")]
    ExpansionLimit { limit: usize },

    /// The expansions render to more sample strings than the configured ceiling
    #[error("Grammar produces more than {limit} sample renderings")]
    RenderingLimit { limit: usize },
}

impl GrammarError {
    /// True for failures that describe the grammar's language rather than
    /// malformed grammar text.
    pub fn is_rejection(&self) -> bool {
        matches!(self, GrammarError::AcceptsEmpty | GrammarError::Ambiguous { .. })
    }
}

/// Result type alias for grammar operations
pub type Result<T> = std::result::Result<T, GrammarError>;
