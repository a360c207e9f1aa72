//! Grammar parser — tokenizer, AST types, and recursive descent parser
//!
//! Converts value-definition text into a combinator tree. Precedence from
//! loosest to tightest binding:
//!
//! ```text
//! SingleBar     := DoubleBar ( '|' DoubleBar )*
//! DoubleBar     := DoubleAnd ( '||' DoubleAnd )*
//! DoubleAnd     := Juxtaposition ( '&&' Juxtaposition )*
//! Juxtaposition := Single Single*
//! Single        := '[' SingleBar ']' Postfix?
//!                | Atom Postfix?
//! Postfix       := '!' | '?'
//! ```
//!
//! A level with a single element collapses to that element. A term takes
//! at most one postfix; a second one, or a postfix with no term before it,
//! is an error.

pub mod ast;
pub mod tokenizer;

use crate::vocabulary::Token;
use crate::{GrammarError, Result};
use ast::Node;
use tokenizer::Tokenizer;

/// Tokenize and parse grammar text into a tree
///
/// # Errors
/// Returns the first tokenizer or parser error; there is no recovery.
pub fn parse(text: &str) -> Result<Node> {
    let tokens = Tokenizer::new(text).tokenize()?;
    parse_tokens(&tokens)
}

/// Parse an already tokenized grammar
pub fn parse_tokens(tokens: &[Token]) -> Result<Node> {
    let mut parser = Parser::new(tokens);
    let root = parser.parse_single_bar()?;
    if !parser.is_at_end() {
        return Err(GrammarError::TrailingInput {
            remaining: parser.remaining(),
        });
    }
    tracing::trace!(depth = root.depth(), "parsed grammar");
    Ok(root)
}

/// Recursive descent parser over a token slice
///
/// Running off the end of the slice plays the part of the end-of-input
/// sentinel.
struct Parser<'t> {
    tokens: &'t [Token],
    position: usize,
}

impl<'t> Parser<'t> {
    fn new(tokens: &'t [Token]) -> Self {
        Parser {
            tokens,
            position: 0,
        }
    }

    // ── Token helpers ──────────────────────────────────────

    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.position).copied()
    }

    fn peek_is(&self, text: &str) -> bool {
        self.peek().is_some_and(|token| token.is(text))
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    /// Unconsumed tokens joined by spaces, for error messages
    fn remaining(&self) -> String {
        self.tokens[self.position.min(self.tokens.len())..]
            .iter()
            .map(|token| token.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Whether the next token ends a juxtaposition
    fn at_juxtaposition_boundary(&self) -> bool {
        match self.peek() {
            None => true,
            Some(token) => ["]", "&&", "||", "|"].iter().any(|text| token.is(text)),
        }
    }

    // ── Combinator levels ──────────────────────────────────

    fn parse_single_bar(&mut self) -> Result<Node> {
        let mut items = vec![self.parse_double_bar()?];
        while self.peek_is("|") {
            self.advance();
            items.push(self.parse_double_bar()?);
        }
        Ok(collapse(items, Node::SingleBar))
    }

    fn parse_double_bar(&mut self) -> Result<Node> {
        let mut items = vec![self.parse_double_and()?];
        while self.peek_is("||") {
            self.advance();
            items.push(self.parse_double_and()?);
        }
        Ok(collapse(items, Node::DoubleBar))
    }

    fn parse_double_and(&mut self) -> Result<Node> {
        let mut items = vec![self.parse_juxtaposition()?];
        while self.peek_is("&&") {
            self.advance();
            items.push(self.parse_juxtaposition()?);
        }
        Ok(collapse(items, Node::DoubleAnd))
    }

    fn parse_juxtaposition(&mut self) -> Result<Node> {
        let mut items = vec![self.parse_single()?];
        while !self.at_juxtaposition_boundary() {
            items.push(self.parse_single()?);
        }
        Ok(collapse(items, Node::Juxtaposition))
    }

    // ── Terms ──────────────────────────────────────────────

    fn parse_single(&mut self) -> Result<Node> {
        let body = match self.peek() {
            None => return Err(GrammarError::UnexpectedEnd),
            Some(token) if token.is("[") => {
                self.advance();
                let inner = self.parse_single_bar()?;
                if !self.peek_is("]") {
                    return Err(GrammarError::UnmatchedBracket {
                        remaining: self.remaining(),
                    });
                }
                self.advance();
                Node::Bracketed(Box::new(inner))
            }
            Some(token) if token.is_atom() => {
                self.advance();
                Node::Atom(token)
            }
            Some(token) if is_postfix(token) => return Err(self.misplaced_postfix(token)),
            Some(_) => {
                return Err(GrammarError::UnexpectedToken {
                    remaining: self.remaining(),
                })
            }
        };

        let node = match self.peek() {
            Some(token) if token.is("!") => Node::Exclamation(Box::new(body)),
            Some(token) if token.is("?") => Node::Question(Box::new(body)),
            _ => return Ok(body),
        };
        self.advance();

        match self.peek() {
            Some(token) if is_postfix(token) => Err(self.misplaced_postfix(token)),
            _ => Ok(node),
        }
    }

    fn misplaced_postfix(&self, postfix: Token) -> GrammarError {
        GrammarError::MisplacedPostfix {
            postfix: postfix.to_string(),
            remaining: self.remaining(),
        }
    }
}

fn is_postfix(token: Token) -> bool {
    token.is("!") || token.is("?")
}

/// One item stays as itself; more become a combinator node
fn collapse(mut items: Vec<Node>, combine: fn(Vec<Node>) -> Node) -> Node {
    if items.len() == 1 {
        items.remove(0)
    } else {
        combine(items)
    }
}
