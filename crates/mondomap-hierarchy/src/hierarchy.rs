//! Term store and ancestry engine.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Universal root of the MONDO hierarchy (`disease`).
///
/// Fallback result of [`DiseaseHierarchy::lowest_common_ancestor`] when no
/// more specific common ancestor exists.
pub const ROOT_TERM_ID: &str = "MONDO:0000001";

// ============================================================================
// Term
// ============================================================================

/// One node of the is-a hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Term {
    /// Canonical CURIE, e.g. `MONDO:0005071`.
    pub id: String,
    /// Preferred human-readable label.
    pub name: String,
    /// Direct parents in source declaration order. Duplicates are kept and
    /// entries may reference ids absent from the store (dangling edges in
    /// the source are tolerated, not repaired). Empty marks a root.
    pub parent_ids: Vec<String>,
}

// ============================================================================
// Builder
// ============================================================================

/// Mutable construction stage for [`DiseaseHierarchy`].
///
/// All lookup tables are fields of the builder, never shared: two
/// hierarchies built independently cannot observe each other's indices.
#[derive(Debug, Default)]
pub struct HierarchyBuilder {
    terms: AHashMap<String, Term>,
    xref_to_id: AHashMap<String, String>,
    name_to_id: AHashMap<String, String>,
}

impl HierarchyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a term and index its preferred label (lowercased). On a
    /// label collision the last writer wins. Re-adding an id replaces the
    /// previous record.
    pub fn add_term(&mut self, id: &str, name: &str) {
        self.name_to_id.insert(name.to_lowercase(), id.to_string());
        self.terms.insert(
            id.to_string(),
            Term {
                id: id.to_string(),
                name: name.to_string(),
                parent_ids: Vec::new(),
            },
        );
    }

    /// Map an external vocabulary code to `id`. Codes are stored
    /// uppercased; on collision the last writer wins.
    pub fn add_xref(&mut self, id: &str, code: &str) {
        self.xref_to_id.insert(code.to_uppercase(), id.to_string());
    }

    /// Map an exact synonym to `id`. Synonyms share the name index with
    /// preferred labels; last writer wins.
    pub fn add_synonym(&mut self, id: &str, synonym: &str) {
        self.name_to_id.insert(synonym.to_lowercase(), id.to_string());
    }

    /// Declare a parent edge for a previously added term. The parent id
    /// itself does not have to exist in the store. Ignored for ids never
    /// passed to [`add_term`](Self::add_term).
    pub fn add_parent(&mut self, id: &str, parent_id: &str) {
        if let Some(term) = self.terms.get_mut(id) {
            term.parent_ids.push(parent_id.to_string());
        }
    }

    /// Freeze the builder into a queryable hierarchy.
    pub fn finish(self) -> DiseaseHierarchy {
        DiseaseHierarchy {
            terms: self.terms,
            xref_to_id: self.xref_to_id,
            name_to_id: self.name_to_id,
        }
    }
}

// ============================================================================
// DiseaseHierarchy
// ============================================================================

/// The loaded hierarchy: term store plus the two lookup indices.
///
/// Immutable once [`HierarchyBuilder::finish`] returns; every query takes
/// `&self` and is safe to run from concurrent readers.
#[derive(Debug, Clone)]
pub struct DiseaseHierarchy {
    pub(crate) terms: AHashMap<String, Term>,
    pub(crate) xref_to_id: AHashMap<String, String>,
    pub(crate) name_to_id: AHashMap<String, String>,
}

/// Index sizes, mostly for load-time reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HierarchyStats {
    pub terms: usize,
    pub xrefs: usize,
    pub names: usize,
}

impl DiseaseHierarchy {
    /// Number of terms in the store.
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.terms.contains_key(id)
    }

    /// Preferred label of `id`, if the term exists.
    pub fn label(&self, id: &str) -> Option<&str> {
        self.terms.get(id).map(|term| term.name.as_str())
    }

    /// Direct parents of `id` in source order. Empty for root terms and
    /// for ids not in the store.
    pub fn parents(&self, id: &str) -> &[String] {
        self.terms
            .get(id)
            .map(|term| term.parent_ids.as_slice())
            .unwrap_or(&[])
    }

    /// Term an external vocabulary code resolves to. Case-insensitive.
    pub fn term_for_xref(&self, code: &str) -> Option<&str> {
        self.xref_to_id.get(&code.to_uppercase()).map(String::as_str)
    }

    /// Term a label or exact synonym resolves to. Case-insensitive.
    pub fn term_for_name(&self, name: &str) -> Option<&str> {
        self.name_to_id.get(&name.to_lowercase()).map(String::as_str)
    }

    pub fn stats(&self) -> HierarchyStats {
        HierarchyStats {
            terms: self.terms.len(),
            xrefs: self.xref_to_id.len(),
            names: self.name_to_id.len(),
        }
    }

    // ========================================================================
    // Ancestry engine
    // ========================================================================

    /// Transitive closure of the parent relation starting at `id`.
    ///
    /// The term itself is excluded; its parents and all of their ancestors
    /// are included. Iterative worklist with a visited set: a cyclic parent
    /// chain in malformed data truncates at the repeated node instead of
    /// looping. Unknown ids yield the empty set.
    pub fn ancestors(&self, id: &str) -> HashSet<String> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut stack: Vec<&str> = self.parents(id).iter().map(String::as_str).collect();
        while let Some(current) = stack.pop() {
            if !seen.insert(current) {
                continue;
            }
            stack.extend(self.parents(current).iter().map(String::as_str));
        }
        seen.into_iter().map(str::to_owned).collect()
    }

    /// True iff `ancestor` is reachable from `descendant` over one or more
    /// parent edges.
    ///
    /// A term with no recorded parents (including unknown ids) is never a
    /// descendant of anything. Cycle-guarded like
    /// [`ancestors`](Self::ancestors).
    pub fn is_descendant_of(&self, descendant: &str, ancestor: &str) -> bool {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut stack: Vec<&str> = self.parents(descendant).iter().map(String::as_str).collect();
        while let Some(current) = stack.pop() {
            if current == ancestor {
                return true;
            }
            if !seen.insert(current) {
                continue;
            }
            stack.extend(self.parents(current).iter().map(String::as_str));
        }
        false
    }
}

// ============================================================================
// Tests
// ============================================================================
