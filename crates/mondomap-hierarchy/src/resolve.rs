//! Match resolution: candidate lookup and specificity filtering.

use std::collections::HashSet;

use crate::hierarchy::DiseaseHierarchy;

impl DiseaseHierarchy {
    /// Candidate terms for a condition: the union of xref-index hits for
    /// every code in `xrefs` and the name-index hit for `condition_name`.
    ///
    /// Both lookups are case-insensitive. Unknown codes and names
    /// contribute nothing; the result may be empty.
    pub fn matches<S: AsRef<str>>(&self, condition_name: &str, xrefs: &[S]) -> HashSet<String> {
        let mut out = HashSet::new();
        for code in xrefs {
            if let Some(id) = self.term_for_xref(code.as_ref()) {
                out.insert(id.to_string());
            }
        }
        if let Some(id) = self.term_for_name(condition_name) {
            out.insert(id.to_string());
        }
        out
    }

    /// The deepest candidates: drops every candidate that is an ancestor of
    /// some other candidate. Incomparable siblings all survive, so the
    /// result is the antichain of most specific matching terms.
    pub fn most_specific_matches(&self, candidates: &HashSet<String>) -> HashSet<String> {
        candidates
            .iter()
            .filter(|c| {
                !candidates
                    .iter()
                    .any(|d| d != *c && self.is_descendant_of(d, *c))
            })
            .cloned()
            .collect()
    }

    /// The shallowest candidates: drops every candidate that is itself a
    /// descendant of some other candidate.
    pub fn least_specific_matches(&self, candidates: &HashSet<String>) -> HashSet<String> {
        candidates
            .iter()
            .filter(|c| {
                !candidates
                    .iter()
                    .any(|d| d != *c && self.is_descendant_of(*c, d))
            })
            .cloned()
            .collect()
    }

    /// Overwrite every entry that descends from another entry with that
    /// ancestor's id, in one pairwise pass.
    ///
    /// Length-preserving; duplicates produced by replacement are kept.
    /// Later comparisons observe earlier in-place replacements, so with
    /// three or more entries whose terms are related through shared
    /// ancestors the result depends on entry order. That single-pass
    /// behavior is intentional and pinned by tests.
    pub fn normalize_to_set_ancestors(&self, ids: &[String]) -> Vec<String> {
        let mut out = ids.to_vec();
        for i in 0..out.len() {
            for j in (i + 1)..out.len() {
                if self.is_descendant_of(&out[i], &out[j]) {
                    out[i] = out[j].clone();
                } else if self.is_descendant_of(&out[j], &out[i]) {
                    out[j] = out[i].clone();
                }
            }
        }
        out
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::HierarchyBuilder;

    fn set(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    /// disease ← group a ← {foo, bar}; foo carries xref X1.
    fn mini() -> DiseaseHierarchy {
        let mut builder = HierarchyBuilder::new();
        builder.add_term("MONDO:0000001", "disease");
        builder.add_term("MONDO:0000002", "group a");
        builder.add_term("MONDO:0000003", "foo");
        builder.add_term("MONDO:0000004", "bar");
        builder.add_parent("MONDO:0000002", "MONDO:0000001");
        builder.add_parent("MONDO:0000003", "MONDO:0000002");
        builder.add_parent("MONDO:0000004", "MONDO:0000002");
        builder.add_xref("MONDO:0000003", "X1");
        builder.finish()
    }

    #[test]
    fn matches_unions_name_and_xref_hits() {
        let hierarchy = mini();
        assert_eq!(hierarchy.matches("foo", &["X1"]), set(&["MONDO:0000003"]));
        assert_eq!(
            hierarchy.matches("bar", &["X1"]),
            set(&["MONDO:0000003", "MONDO:0000004"])
        );
    }

    #[test]
    fn unknown_names_and_codes_match_nothing() {
        let hierarchy = mini();
        assert!(hierarchy
            .matches("nonexistent condition", &["ZZZ:000"])
            .is_empty());
        assert!(hierarchy.matches::<&str>("still nothing", &[]).is_empty());
    }

    #[test]
    fn match_lookups_are_case_insensitive() {
        let hierarchy = mini();
        assert_eq!(hierarchy.matches("FOO", &["x1"]), set(&["MONDO:0000003"]));
    }

    #[test]
    fn most_specific_drops_ancestors_of_other_candidates() {
        let hierarchy = mini();
        let candidates = set(&["MONDO:0000002", "MONDO:0000003"]);
        assert_eq!(
            hierarchy.most_specific_matches(&candidates),
            set(&["MONDO:0000003"])
        );
    }

    #[test]
    fn least_specific_drops_descendants_of_other_candidates() {
        let hierarchy = mini();
        let candidates = set(&["MONDO:0000002", "MONDO:0000003"]);
        assert_eq!(
            hierarchy.least_specific_matches(&candidates),
            set(&["MONDO:0000002"])
        );
    }

    #[test]
    fn incomparable_siblings_all_survive_both_filters() {
        let hierarchy = mini();
        let siblings = set(&["MONDO:0000003", "MONDO:0000004"]);
        assert_eq!(hierarchy.most_specific_matches(&siblings), siblings);
        assert_eq!(hierarchy.least_specific_matches(&siblings), siblings);
    }

    #[test]
    fn filters_agree_exactly_on_antichains() {
        let hierarchy = mini();

        // flat antichain: intersection is the whole set
        let flat = set(&["MONDO:0000003", "MONDO:0000004"]);
        let both: HashSet<String> = hierarchy
            .most_specific_matches(&flat)
            .intersection(&hierarchy.least_specific_matches(&flat))
            .cloned()
            .collect();
        assert_eq!(both, flat);

        // related candidates: the chain endpoints part ways
        let chain = set(&["MONDO:0000001", "MONDO:0000003"]);
        let both: HashSet<String> = hierarchy
            .most_specific_matches(&chain)
            .intersection(&hierarchy.least_specific_matches(&chain))
            .cloned()
            .collect();
        assert!(both.is_empty());
    }

    #[test]
    fn normalize_replaces_descendants_with_in_set_ancestors() {
        let hierarchy = mini();
        let input = vec!["MONDO:0000003".to_string(), "MONDO:0000002".to_string()];
        assert_eq!(
            hierarchy.normalize_to_set_ancestors(&input),
            vec!["MONDO:0000002".to_string(), "MONDO:0000002".to_string()]
        );
        // unrelated entries are untouched
        let siblings = vec!["MONDO:0000003".to_string(), "MONDO:0000004".to_string()];
        assert_eq!(hierarchy.normalize_to_set_ancestors(&siblings), siblings);
        // and the empty input stays empty
        assert!(hierarchy.normalize_to_set_ancestors(&[]).is_empty());
    }

    #[test]
    fn normalize_is_a_single_order_dependent_pass() {
        // diamond: both foo and bar subsume the leaf
        let mut builder = HierarchyBuilder::new();
        builder.add_term("MONDO:0000002", "group a");
        builder.add_term("MONDO:0000003", "foo");
        builder.add_term("MONDO:0000004", "bar");
        builder.add_term("MONDO:0000005", "leaf");
        builder.add_parent("MONDO:0000003", "MONDO:0000002");
        builder.add_parent("MONDO:0000004", "MONDO:0000002");
        builder.add_parent("MONDO:0000005", "MONDO:0000003");
        builder.add_parent("MONDO:0000005", "MONDO:0000004");
        let hierarchy = builder.finish();

        // the first comparison the leaf takes part in decides its replacement
        let foo_first = vec![
            "MONDO:0000005".to_string(),
            "MONDO:0000003".to_string(),
            "MONDO:0000004".to_string(),
        ];
        assert_eq!(
            hierarchy.normalize_to_set_ancestors(&foo_first),
            vec![
                "MONDO:0000003".to_string(),
                "MONDO:0000003".to_string(),
                "MONDO:0000004".to_string(),
            ]
        );

        let bar_first = vec![
            "MONDO:0000005".to_string(),
            "MONDO:0000004".to_string(),
            "MONDO:0000003".to_string(),
        ];
        assert_eq!(
            hierarchy.normalize_to_set_ancestors(&bar_first),
            vec![
                "MONDO:0000004".to_string(),
                "MONDO:0000004".to_string(),
                "MONDO:0000003".to_string(),
            ]
        );
    }
}
