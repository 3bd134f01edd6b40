//! In-memory MONDO disease-ontology hierarchy.
//!
//! Resolves condition names and external vocabulary codes (xrefs) to
//! canonical MONDO terms and answers ancestry and specificity questions
//! over the is-a hierarchy:
//!
//! - [`DiseaseHierarchy::matches`]: name/xref lookup into a candidate set
//! - [`DiseaseHierarchy::most_specific_matches`] /
//!   [`DiseaseHierarchy::least_specific_matches`]: specificity filtering
//! - [`DiseaseHierarchy::ancestors`] /
//!   [`DiseaseHierarchy::is_descendant_of`]: transitive parent-edge queries
//! - [`DiseaseHierarchy::normalize_to_set_ancestors`]: collapse descendants
//!   onto ancestors already present in a set
//! - [`DiseaseHierarchy::lowest_common_ancestor`]: most specific term
//!   subsuming a whole set
//!
//! The hierarchy is built exactly once through [`HierarchyBuilder`]
//! (normally by `mondomap-ingest-owl`) and is immutable afterwards. Every
//! query takes `&self`, so a published instance can be shared across
//! threads without locking.
//!
//! ## Module Organization
//!
//! - `hierarchy`: term store, builder, ancestry engine
//! - `resolve`: match resolution and specificity filtering
//! - `lca`: lowest-common-ancestor search

pub mod hierarchy;
mod lca;
mod resolve;

pub use hierarchy::{DiseaseHierarchy, HierarchyBuilder, HierarchyStats, Term, ROOT_TERM_ID};
