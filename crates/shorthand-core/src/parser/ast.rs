//! Grammar AST — the parsed combinator tree
//!
//! A closed set of node variants. Each node owns its children; trees are
//! built once by the parser and never mutated afterwards.
//!
//! `Display` renders canonical grammar text which parses back to an equal
//! tree.

use std::fmt;

use crate::vocabulary::Token;

/// A node of the combinator tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A single longhand placeholder or literal
    Atom(Token),
    /// `[ child ]`, grouping only
    Bracketed(Box<Node>),
    /// `child!`, must produce at least one atom
    Exclamation(Box<Node>),
    /// `child?`, optional
    Question(Box<Node>),
    /// `a b c`, all children in the given order
    Juxtaposition(Vec<Node>),
    /// `a && b`, all children in any order
    DoubleAnd(Vec<Node>),
    /// `a || b`, one or more children in any order
    DoubleBar(Vec<Node>),
    /// `a | b`, exactly one child
    SingleBar(Vec<Node>),
}

impl Node {
    /// Short variant name, used in logs and tree dumps
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Atom(_) => "atom",
            Node::Bracketed(_) => "bracketed",
            Node::Exclamation(_) => "exclamation",
            Node::Question(_) => "question",
            Node::Juxtaposition(_) => "juxtaposition",
            Node::DoubleAnd(_) => "double-and",
            Node::DoubleBar(_) => "double-bar",
            Node::SingleBar(_) => "single-bar",
        }
    }

    /// Direct children, in grammar order
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Atom(_) => &[],
            Node::Bracketed(body) | Node::Exclamation(body) | Node::Question(body) => {
                std::slice::from_ref(body.as_ref())
            }
            Node::Juxtaposition(children)
            | Node::DoubleAnd(children)
            | Node::DoubleBar(children)
            | Node::SingleBar(children) => children,
        }
    }

    /// Nesting depth; an atom has depth 1
    pub fn depth(&self) -> usize {
        1 + self.children().iter().map(Node::depth).max().unwrap_or(0)
    }
}

fn write_joined(f: &mut fmt::Formatter, children: &[Node], separator: &str) -> fmt::Result {
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{}", child)?;
    }
    Ok(())
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Node::Atom(token) => write!(f, "{}", token),
            Node::Bracketed(body) => write!(f, "[ {} ]", body),
            Node::Exclamation(body) => write!(f, "{}!", body),
            Node::Question(body) => write!(f, "{}?", body),
            Node::Juxtaposition(children) => write_joined(f, children, " "),
            Node::DoubleAnd(children) => write_joined(f, children, " && "),
            Node::DoubleBar(children) => write_joined(f, children, " || "),
            Node::SingleBar(children) => write_joined(f, children, " | "),
        }
    }
}
