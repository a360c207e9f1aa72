//! Ambiguity search — finds concrete text reachable from two expansions
//!
//! Every atom of every expansion is replaced by each of its sample values
//! in turn (a cartesian product per expansion) and the results are joined
//! with single spaces. A rendered string owned by more than one distinct
//! expansion is an ambiguity: a parser reading that text could not tell
//! which expansion the author meant.
//!
//! Expansions must already be unique; identity is the expansion's index.
//!
//! The number of renderings grows as the product of sample counts, so a
//! search can be given a ceiling which is checked before anything is
//! rendered.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::expansion::Expansion;
use crate::vocabulary::Token;
use crate::{GrammarError, Result};

/// One rendered string and the expansions that produce it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    pub rendering: String,
    /// Indices into the searched expansion list, ascending
    pub expansions: Vec<usize>,
}

/// Searches a de-duplicated expansion list for colliding renderings
pub struct AmbiguitySearch<'e> {
    expansions: &'e [Expansion],
    rendering_limit: Option<usize>,
}

impl<'e> AmbiguitySearch<'e> {
    pub fn new(expansions: &'e [Expansion]) -> Self {
        AmbiguitySearch {
            expansions,
            rendering_limit: None,
        }
    }

    /// Refuse to search when the expansions render to more than `limit`
    /// strings in total; `None` searches everything.
    pub fn with_rendering_limit(mut self, limit: Option<usize>) -> Self {
        self.rendering_limit = limit;
        self
    }

    /// Every collision, sorted by rendering
    ///
    /// # Errors
    /// `RenderingLimit` when the total rendering count exceeds the ceiling.
    pub fn collisions(&self) -> Result<Vec<Collision>> {
        self.check_rendering_budget()?;

        let mut owners: BTreeMap<String, Vec<usize>> = BTreeMap::new();

        for (index, expansion) in self.expansions.iter().enumerate() {
            for rendering in renderings(expansion) {
                match owners.entry(rendering) {
                    Entry::Vacant(entry) => {
                        entry.insert(vec![index]);
                    }
                    Entry::Occupied(mut entry) => {
                        let indices = entry.get_mut();
                        if indices.last() != Some(&index) {
                            indices.push(index);
                        }
                    }
                }
            }
        }

        let collisions: Vec<Collision> = owners
            .into_iter()
            .filter(|(_, indices)| indices.len() > 1)
            .map(|(rendering, expansions)| Collision {
                rendering,
                expansions,
            })
            .collect();

        tracing::debug!(
            expansions = self.expansions.len(),
            collisions = collisions.len(),
            "ambiguity search finished"
        );
        Ok(collisions)
    }

    fn check_rendering_budget(&self) -> Result<()> {
        let Some(limit) = self.rendering_limit else {
            return Ok(());
        };
        let total = self
            .expansions
            .iter()
            .map(|expansion| rendering_count(expansion))
            .fold(0usize, usize::saturating_add);
        if total > limit {
            tracing::warn!(limit, total, "rendering limit exceeded");
            return Err(GrammarError::RenderingLimit { limit });
        }
        Ok(())
    }
}

/// Number of strings [`renderings`] would produce, saturating at `usize::MAX`
pub fn rendering_count(expansion: &[Token]) -> usize {
    expansion
        .iter()
        .map(|token| token.samples().len())
        .fold(1usize, usize::saturating_mul)
}

/// Every concrete text an expansion can be written as
///
/// The first atom's samples vary slowest.
pub fn renderings(expansion: &[Token]) -> Vec<String> {
    let mut partials: Vec<Vec<&'static str>> = vec![Vec::new()];
    for token in expansion {
        let samples = token.samples();
        partials = partials
            .into_iter()
            .flat_map(|prefix| {
                samples.iter().map(move |&sample| {
                    let mut next = prefix.clone();
                    next.push(sample);
                    next
                })
            })
            .collect();
    }
    partials.into_iter().map(|parts| parts.join(" ")).collect()
}
