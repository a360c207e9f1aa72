//! Expansion engine — every atom sequence a grammar node can produce
//!
//! Expansions are produced lazily. `Node::expansions` returns a boxed
//! iterator that pulls from its children on demand, so a caller that stops
//! early (e.g. on hitting an expansion ceiling) never materialises the rest.
//! Calling `expansions` again restarts enumeration from the beginning.
//!
//! # Ordering
//!
//! - Juxtaposition: cartesian product, last child varying fastest
//! - `&&` / `||`: child orders in lexicographic order of child index;
//!   `||` runs subset sizes from 1 up to N
//! - `?`: the empty expansion comes first
//!
//! Duplicates are kept here; de-duplication is the caller's concern.
//!
//! `&&` over N children yields N! orderings and `||` sums that over every
//! subset size, so expansion counts grow factorially with N.

use std::collections::BTreeSet;
use std::iter;

use crate::parser::ast::Node;
use crate::vocabulary::Token;

/// An ordered sequence of atoms
pub type Expansion = Vec<Token>;

/// Lazy stream of expansions borrowed from a tree
pub type Expansions<'a> = Box<dyn Iterator<Item = Expansion> + 'a>;

impl Node {
    /// Every atom appearing anywhere beneath this node
    pub fn atoms(&self) -> BTreeSet<Token> {
        let mut atoms = BTreeSet::new();
        self.collect_atoms(&mut atoms);
        atoms
    }

    fn collect_atoms(&self, atoms: &mut BTreeSet<Token>) {
        if let Node::Atom(token) = self {
            atoms.insert(*token);
        }
        for child in self.children() {
            child.collect_atoms(atoms);
        }
    }

    /// Lazily enumerate every expansion of this node
    pub fn expansions(&self) -> Expansions<'_> {
        match self {
            Node::Atom(token) => Box::new(iter::once(vec![*token])),
            Node::Bracketed(body) => body.expansions(),
            Node::Exclamation(body) => {
                Box::new(body.expansions().filter(|expansion| !expansion.is_empty()))
            }
            Node::Question(body) => Box::new(iter::once(Vec::new()).chain(body.expansions())),
            Node::Juxtaposition(children) => concatenations(children.iter().collect()),
            Node::DoubleAnd(children) => {
                let n = children.len();
                Box::new(
                    permutations(n, n)
                        .into_iter()
                        .flat_map(move |order| concatenations(select(children, order))),
                )
            }
            Node::DoubleBar(children) => {
                let n = children.len();
                Box::new(
                    (1..=n)
                        .flat_map(move |r| permutations(n, r))
                        .flat_map(move |order| concatenations(select(children, order))),
                )
            }
            Node::SingleBar(children) => Box::new(children.iter().flat_map(Node::expansions)),
        }
    }
}

/// Render an expansion as grammar text, tokens joined by single spaces
pub fn render(expansion: &[Token]) -> String {
    expansion
        .iter()
        .map(|token| token.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Keep the first occurrence of every expansion, preserving order
pub fn unique<I>(expansions: I) -> Vec<Expansion>
where
    I: IntoIterator<Item = Expansion>,
{
    let mut seen = BTreeSet::new();
    expansions
        .into_iter()
        .filter(|expansion| seen.insert(expansion.clone()))
        .collect()
}

fn select(children: &[Node], order: Vec<usize>) -> Vec<&Node> {
    order.into_iter().map(|index| &children[index]).collect()
}

/// Cartesian product of the nodes' expansions, concatenated positionally
fn concatenations(nodes: Vec<&Node>) -> Expansions<'_> {
    let Some((&first, rest)) = nodes.split_first() else {
        return Box::new(iter::once(Vec::new()));
    };
    let rest = rest.to_vec();

    Box::new(first.expansions().flat_map(move |head| {
        concatenations(rest.clone()).map(move |tail| {
            let mut expansion = head.clone();
            expansion.extend(tail);
            expansion
        })
    }))
}

/// All r-length orderings of `0..n`, in lexicographic order
fn permutations(n: usize, r: usize) -> Vec<Vec<usize>> {
    fn extend(n: usize, r: usize, used: &mut [bool], current: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
        if current.len() == r {
            out.push(current.clone());
            return;
        }
        for index in 0..n {
            if used[index] {
                continue;
            }
            used[index] = true;
            current.push(index);
            extend(n, r, used, current, out);
            current.pop();
            used[index] = false;
        }
    }

    let mut out = Vec::new();
    extend(n, r, &mut vec![false; n], &mut Vec::with_capacity(r), &mut out);
    out
}
