//! MONDO OWL ingestion (boundary adapter).
//!
//! Parses the MONDO disease ontology as published in RDF/XML (`mondo.owl`)
//! and builds an immutable [`DiseaseHierarchy`]. This crate sits at the
//! untrusted-input boundary: it is the only part of mondomap that performs
//! I/O, and everything downstream queries the in-memory hierarchy.
//!
//! Ingestion is deliberately permissive at the entry level. Classes outside
//! the MONDO namespace, classes without a label, parent references outside
//! the namespace (including OWL restriction blank nodes), and empty
//! xref/synonym text are all skipped without error. Only document-level
//! failures abort the load: an unreadable file ([`IngestError::Io`]) or
//! malformed RDF/XML ([`IngestError::Parse`]).

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use mondomap_hierarchy::{DiseaseHierarchy, HierarchyBuilder};
use sophia::api::prelude::*;

/// IRI prefix of canonical MONDO classes; identities and parent references
/// outside this namespace are ignored.
pub const MONDO_IRI_PREFIX: &str = "http://purl.obolibrary.org/obo/MONDO_";

const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
const OWL_CLASS: &str = "http://www.w3.org/2002/07/owl#Class";
const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
const RDFS_SUBCLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";
const HAS_DB_XREF: &str = "http://www.geneontology.org/formats/oboInOwl#hasDbXref";
const HAS_EXACT_SYNONYM: &str = "http://www.geneontology.org/formats/oboInOwl#hasExactSynonym";

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RDF/XML parse error: {0}")]
    Parse(String),
}

/// Convert a MONDO class IRI to its CURIE form
/// (`http://purl.obolibrary.org/obo/MONDO_0005071` → `MONDO:0005071`).
/// `None` outside the canonical namespace.
pub fn mondo_id_from_iri(iri: &str) -> Option<String> {
    iri.strip_prefix(MONDO_IRI_PREFIX)
        .map(|suffix| format!("MONDO:{suffix}"))
}

// ============================================================================
// RDF term display forms
// ============================================================================

/// An RDF term in the two shapes this loader consumes. Blank nodes (OWL
/// restrictions, axiom annotations) and other forms parse to `None` and
/// are dropped.
#[derive(Debug)]
enum RdfTerm {
    Iri(String),
    Literal(String),
}

fn unescape_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Parse sophia's N-Triples-style term display form. Language tags and
/// datatype suffixes on literals are discarded; only the lexical value
/// matters here.
fn parse_term_display(term: &str) -> Option<RdfTerm> {
    let s = term.trim();

    if let Some(iri) = s.strip_prefix('<').and_then(|t| t.strip_suffix('>')) {
        return Some(RdfTerm::Iri(iri.to_string()));
    }

    if s.starts_with('"') {
        let mut end_quote = None;
        let mut prev_was_escape = false;
        for (i, ch) in s.char_indices().skip(1) {
            if ch == '"' && !prev_was_escape {
                end_quote = Some(i);
                break;
            }
            prev_was_escape = ch == '\\' && !prev_was_escape;
        }
        let end = end_quote?;
        return Some(RdfTerm::Literal(unescape_literal(&s[1..end])));
    }

    None
}

// ============================================================================
// Class accumulation
// ============================================================================

#[derive(Debug, Default)]
struct ClassRecord {
    is_class: bool,
    label: Option<String>,
    xrefs: Vec<String>,
    synonyms: Vec<String>,
    parents: Vec<String>,
}

/// Folds the triple stream into one record per MONDO subject.
#[derive(Debug, Default)]
struct ClassAccumulator {
    records: HashMap<String, ClassRecord>,
    /// First-seen subject order, so index collisions resolve in document
    /// order (last writer wins).
    order: Vec<String>,
}

impl ClassAccumulator {
    fn record_mut(&mut self, id: &str) -> &mut ClassRecord {
        if !self.records.contains_key(id) {
            self.order.push(id.to_string());
        }
        self.records.entry(id.to_string()).or_default()
    }

    fn observe(&mut self, subject_iri: &str, predicate_iri: &str, object: RdfTerm) {
        let Some(id) = mondo_id_from_iri(subject_iri) else {
            return;
        };
        match predicate_iri {
            RDF_TYPE => {
                if matches!(&object, RdfTerm::Iri(ty) if ty == OWL_CLASS) {
                    self.record_mut(&id).is_class = true;
                }
            }
            RDFS_LABEL => {
                if let RdfTerm::Literal(text) = object {
                    if !text.is_empty() {
                        self.record_mut(&id).label = Some(text);
                    }
                }
            }
            HAS_DB_XREF => {
                if let RdfTerm::Literal(text) = object {
                    if !text.is_empty() {
                        self.record_mut(&id).xrefs.push(text);
                    }
                }
            }
            HAS_EXACT_SYNONYM => {
                if let RdfTerm::Literal(text) = object {
                    if !text.is_empty() {
                        self.record_mut(&id).synonyms.push(text);
                    }
                }
            }
            RDFS_SUBCLASS_OF => {
                if let RdfTerm::Iri(parent_iri) = object {
                    // Parents outside the MONDO namespace are dropped, not
                    // stored as dangling non-canonical edges.
                    if let Some(parent_id) = mondo_id_from_iri(&parent_iri) {
                        self.record_mut(&id).parents.push(parent_id);
                    }
                }
            }
            _ => {}
        }
    }

    fn into_hierarchy(self) -> DiseaseHierarchy {
        let mut builder = HierarchyBuilder::new();
        let mut skipped_untyped = 0usize;
        let mut skipped_unlabeled = 0usize;
        for id in &self.order {
            let record = &self.records[id];
            if !record.is_class {
                skipped_untyped += 1;
                continue;
            }
            let Some(label) = record.label.as_deref() else {
                skipped_unlabeled += 1;
                continue;
            };
            builder.add_term(id, label);
            for xref in &record.xrefs {
                builder.add_xref(id, xref);
            }
            for synonym in &record.synonyms {
                builder.add_synonym(id, synonym);
            }
            for parent in &record.parents {
                builder.add_parent(id, parent);
            }
        }
        if skipped_untyped > 0 || skipped_unlabeled > 0 {
            tracing::debug!(
                skipped_untyped,
                skipped_unlabeled,
                "skipped MONDO subjects without owl:Class typing or a label"
            );
        }
        builder.finish()
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Load a hierarchy from an OWL (RDF/XML) file on disk.
///
/// Document-level failures are fatal; per-entry data-quality issues only
/// skip the affected entry or edge.
pub fn load_path(path: impl AsRef<Path>) -> Result<DiseaseHierarchy, IngestError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let hierarchy = load_reader(BufReader::new(file))?;
    let stats = hierarchy.stats();
    tracing::info!(
        path = %path.display(),
        terms = stats.terms,
        xrefs = stats.xrefs,
        names = stats.names,
        "loaded MONDO hierarchy"
    );
    Ok(hierarchy)
}

/// Load a hierarchy from any buffered RDF/XML source.
pub fn load_reader<R: BufRead>(reader: R) -> Result<DiseaseHierarchy, IngestError> {
    let mut accumulator = ClassAccumulator::default();
    let mut parser = sophia::xml::parser::parse_bufread(reader);
    parser
        .try_for_each_triple(|t| -> Result<(), std::convert::Infallible> {
            let (Some(RdfTerm::Iri(subject)), Some(RdfTerm::Iri(predicate))) = (
                parse_term_display(&t.s().to_string()),
                parse_term_display(&t.p().to_string()),
            ) else {
                return Ok(());
            };
            if let Some(object) = parse_term_display(&t.o().to_string()) {
                accumulator.observe(&subject, &predicate, object);
            }
            Ok(())
        })
        .map_err(|e| IngestError::Parse(e.to_string()))?;
    Ok(accumulator.into_hierarchy())
}

// ============================================================================
// Tests
// ============================================================================
