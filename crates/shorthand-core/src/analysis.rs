//! Grammar analysis — the full pipeline behind `analyze`
//!
//! `text → tokenize → parse → expand → de-duplicate → ambiguity search`
//!
//! The report is always complete: the empty-expansion check and the
//! ambiguity search both run, and `AnalysisReport::check` decides which
//! failure the caller sees first.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::ambiguity::{AmbiguitySearch, Collision};
use crate::expansion::{render, unique, Expansion};
use crate::parser::{self, ast::Node};
use crate::vocabulary::Token;
use crate::{GrammarError, Result};

/// Default ceiling per analysis, applied both to expansions enumerated
/// (duplicates included) and to sample renderings searched
pub const DEFAULT_EXPANSION_LIMIT: usize = 100_000;

/// Knobs for a single analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Maximum number of expansions to enumerate and of renderings to
    /// search; `None` disables both ceilings
    pub expansion_limit: Option<usize>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        AnalysisOptions {
            expansion_limit: Some(DEFAULT_EXPANSION_LIMIT),
        }
    }
}

impl AnalysisOptions {
    pub fn unlimited() -> Self {
        AnalysisOptions {
            expansion_limit: None,
        }
    }

    pub fn with_expansion_limit(limit: usize) -> Self {
        AnalysisOptions {
            expansion_limit: Some(limit),
        }
    }
}

/// Outcome of analysing one grammar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisReport {
    /// Atoms used by the grammar, excluding the `/` separator
    pub atoms_used: BTreeSet<Token>,
    /// Unique expansions in first-seen order
    pub expansions: Vec<Expansion>,
    /// True when the grammar accepts writing nothing
    pub rejects_empty: bool,
    /// Sorted concrete strings reachable from more than one expansion
    pub ambiguities: Vec<String>,
    /// The expansions behind each entry of `ambiguities`, in the same order
    #[serde(skip)]
    pub collisions: Vec<Collision>,
}

impl AnalysisReport {
    /// Fail if the grammar is unusable: empty acceptance first, then
    /// ambiguities.
    pub fn check(&self) -> Result<()> {
        if self.rejects_empty {
            return Err(GrammarError::AcceptsEmpty);
        }
        if !self.ambiguities.is_empty() {
            return Err(GrammarError::Ambiguous {
                ambiguities: self.ambiguities.clone(),
            });
        }
        Ok(())
    }

    /// Expansions rendered as grammar text and sorted
    pub fn rendered_expansions(&self) -> Vec<String> {
        let mut rendered: Vec<String> = self.expansions.iter().map(|e| render(e)).collect();
        rendered.sort();
        rendered
    }
}

/// Analyse grammar text with default options
///
/// # Errors
/// Returns tokenizer and parser errors, or `ExpansionLimit` /
/// `RenderingLimit` when the grammar is too large. An ambiguous or empty-accepting grammar is not an
/// error here; see [`AnalysisReport::check`].
pub fn analyze(text: &str) -> Result<AnalysisReport> {
    analyze_with(text, &AnalysisOptions::default())
}

/// Analyse grammar text
pub fn analyze_with(text: &str, options: &AnalysisOptions) -> Result<AnalysisReport> {
    let root = parser::parse(text)?;
    analyze_tree(&root, options)
}

/// Analyse an already parsed tree
pub fn analyze_tree(root: &Node, options: &AnalysisOptions) -> Result<AnalysisReport> {
    let expansions = collect_expansions(root, options.expansion_limit)?;

    let mut atoms_used = root.atoms();
    atoms_used.retain(|token| !token.is("/"));

    let rejects_empty = expansions.iter().any(|expansion| expansion.is_empty());
    let collisions = AmbiguitySearch::new(&expansions)
        .with_rendering_limit(options.expansion_limit)
        .collisions()?;
    let ambiguities: Vec<String> = collisions
        .iter()
        .map(|collision| collision.rendering.clone())
        .collect();

    tracing::debug!(
        expansions = expansions.len(),
        atoms = atoms_used.len(),
        rejects_empty,
        ambiguities = ambiguities.len(),
        "analyzed grammar"
    );

    Ok(AnalysisReport {
        atoms_used,
        expansions,
        rejects_empty,
        ambiguities,
        collisions,
    })
}

fn collect_expansions(root: &Node, limit: Option<usize>) -> Result<Vec<Expansion>> {
    let Some(limit) = limit else {
        return Ok(unique(root.expansions()));
    };

    // Every expansion pulled counts against the limit, duplicates included
    let mut seen = BTreeSet::new();
    let mut expansions = Vec::new();
    for (pulled, expansion) in root.expansions().enumerate() {
        if pulled == limit {
            tracing::warn!(limit, "expansion limit exceeded");
            return Err(GrammarError::ExpansionLimit { limit });
        }
        if seen.insert(expansion.clone()) {
            expansions.push(expansion);
        }
    }
    Ok(expansions)
}
