//! Lowest-common-ancestor search over the is-a hierarchy.

use std::collections::BTreeSet;

use crate::hierarchy::{DiseaseHierarchy, ROOT_TERM_ID};

/// Upper bound on upward frontier generations before falling back to the
/// universal root.
const MAX_GENERATIONS: usize = 100;

impl DiseaseHierarchy {
    /// The most specific term that every input equals or descends from.
    ///
    /// Expands one generation of parents at a time instead of
    /// materializing full ancestor closures. Inputs without a recorded
    /// parent (including unknown ids) cannot narrow the search and are
    /// dropped up front; if nothing remains, the universal root is
    /// returned. When several inputs are themselves valid common
    /// ancestors, the first in input order wins. Always returns an id,
    /// degrading to [`ROOT_TERM_ID`].
    pub fn lowest_common_ancestor(&self, ids: &[String]) -> String {
        let workable: Vec<&str> = ids
            .iter()
            .map(String::as_str)
            .filter(|id| !self.parents(id).is_empty())
            .collect();
        if workable.is_empty() {
            return ROOT_TERM_ID.to_string();
        }

        // One of the inputs may already subsume the rest.
        if let Some(found) = self.first_common_ancestor(&workable, workable.iter().copied()) {
            return found;
        }

        // First frontier: direct parents of every workable id, duplicates
        // and input order preserved.
        let mut frontier: Vec<String> = workable
            .iter()
            .flat_map(|id| self.parents(id))
            .cloned()
            .collect();

        for _ in 0..MAX_GENERATIONS {
            if frontier.is_empty() {
                break;
            }
            if let Some(found) =
                self.first_common_ancestor(&workable, frontier.iter().map(String::as_str))
            {
                return found;
            }

            let mut next: BTreeSet<String> = frontier
                .iter()
                .flat_map(|id| self.parents(id))
                .cloned()
                .collect();
            // Keep searching above the root only while something more
            // specific is still in play.
            if next.len() > 1 {
                next.remove(ROOT_TERM_ID);
            }
            // BTreeSet iteration is sorted, which keeps frontier order
            // (and therefore first-match results) reproducible.
            frontier = next.into_iter().collect();
        }

        ROOT_TERM_ID.to_string()
    }

    /// First candidate, in candidate order, that every workable id equals
    /// or descends from.
    fn first_common_ancestor<'a>(
        &self,
        workable: &[&str],
        candidates: impl Iterator<Item = &'a str>,
    ) -> Option<String> {
        for candidate in candidates {
            let subsumes_all = workable
                .iter()
                .all(|&id| id == candidate || self.is_descendant_of(id, candidate));
            if subsumes_all {
                return Some(candidate.to_string());
            }
        }
        None
    }
}

// ============================================================================
// Tests
// ============================================================================
