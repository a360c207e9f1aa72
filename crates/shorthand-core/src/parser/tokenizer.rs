//! Grammar tokenizer — converts grammar text into a token stream
//!
//! Scans left to right, skipping whitespace. At each position the
//! vocabulary is tried in priority order and the first entry whose text
//! is a prefix of the remaining input is taken. There is no backtracking.
//!
//! Guarantees:
//! - Deterministic: same input always produces same token stream
//! - Fail fast: the first unrecognised position is reported with the
//!   rest of the input

use crate::vocabulary::Token;
use crate::{GrammarError, Result};

/// Tokenizer for grammar text
pub struct Tokenizer<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Tokenizer<'a> {
    /// Create a new tokenizer for the given input text
    pub fn new(text: &'a str) -> Self {
        Tokenizer {
            input: text,
            position: 0,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();
            if self.is_at_end() {
                break;
            }
            tokens.push(self.next_token()?);
        }

        tracing::trace!(count = tokens.len(), "tokenized grammar");
        Ok(tokens)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        let trimmed = rest.trim_start();
        self.position += rest.len() - trimmed.len();
    }

    fn next_token(&mut self) -> Result<Token> {
        let rest = self.rest();
        match Token::all().find(|token| rest.starts_with(token.as_str())) {
            Some(token) => {
                self.position += token.as_str().len();
                Ok(token)
            }
            None => Err(GrammarError::UnknownToken {
                offset: self.position,
                remaining: rest.to_string(),
            }),
        }
    }
}
