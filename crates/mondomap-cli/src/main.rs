//! mondomap CLI
//!
//! Thin wrapper over the resolution engine:
//! - `resolve`: condition name + xref codes → matching MONDO terms
//! - `ancestors`: transitive ancestors of a term
//! - `lca`: lowest common ancestor of a set of terms
//! - `stats`: index sizes after load

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use mondomap_hierarchy::DiseaseHierarchy;
use serde::Serialize;

#[derive(Parser)]
#[command(name = "mondomap")]
#[command(
    author,
    version,
    about = "Resolve condition names and xrefs against the MONDO disease ontology"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a condition name and/or xref codes to MONDO terms.
    Resolve {
        /// Path to mondo.owl (RDF/XML)
        owl: PathBuf,
        /// Condition name (label or exact synonym, case-insensitive)
        #[arg(short, long, default_value = "")]
        name: String,
        /// External vocabulary code, e.g. `OMIM:143100` (repeatable)
        #[arg(short, long = "xref")]
        xrefs: Vec<String>,
        /// Keep only the deepest matching terms
        #[arg(long, conflicts_with = "least_specific")]
        most_specific: bool,
        /// Keep only the shallowest matching terms
        #[arg(long)]
        least_specific: bool,
        /// Emit JSON instead of human-readable output
        #[arg(long)]
        json: bool,
    },
    /// Print all ancestors of a term.
    Ancestors {
        /// Path to mondo.owl (RDF/XML)
        owl: PathBuf,
        /// Term id, e.g. `MONDO:0007739`
        id: String,
        /// Emit JSON instead of human-readable output
        #[arg(long)]
        json: bool,
    },
    /// Find the lowest common ancestor of a set of terms.
    Lca {
        /// Path to mondo.owl (RDF/XML)
        owl: PathBuf,
        /// Term ids
        #[arg(required = true)]
        ids: Vec<String>,
        /// Emit JSON instead of human-readable output
        #[arg(long)]
        json: bool,
    },
    /// Print index sizes for a loaded ontology.
    Stats {
        /// Path to mondo.owl (RDF/XML)
        owl: PathBuf,
        /// Emit JSON instead of human-readable output
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct ResolvedTerm<'a> {
    id: &'a str,
    label: Option<&'a str>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Resolve {
            owl,
            name,
            xrefs,
            most_specific,
            least_specific,
            json,
        } => cmd_resolve(&owl, &name, &xrefs, most_specific, least_specific, json),
        Commands::Ancestors { owl, id, json } => cmd_ancestors(&owl, &id, json),
        Commands::Lca { owl, ids, json } => cmd_lca(&owl, &ids, json),
        Commands::Stats { owl, json } => cmd_stats(&owl, json),
    }
}

fn sorted_terms<'a>(hierarchy: &'a DiseaseHierarchy, ids: &'a [String]) -> Vec<ResolvedTerm<'a>> {
    let mut terms: Vec<ResolvedTerm> = ids
        .iter()
        .map(|id| ResolvedTerm {
            id: id.as_str(),
            label: hierarchy.label(id),
        })
        .collect();
    terms.sort_by(|a, b| a.id.cmp(b.id));
    terms
}

fn print_terms(terms: &[ResolvedTerm], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(terms)?);
    } else if terms.is_empty() {
        println!("{}", "no matches".yellow());
    } else {
        for term in terms {
            println!("{}  {}", term.id.green().bold(), term.label.unwrap_or(""));
        }
    }
    Ok(())
}

fn cmd_resolve(
    owl: &Path,
    name: &str,
    xrefs: &[String],
    most_specific: bool,
    least_specific: bool,
    json: bool,
) -> Result<()> {
    let hierarchy = mondomap_ingest_owl::load_path(owl)?;
    let mut matched = hierarchy.matches(name, xrefs);
    if most_specific {
        matched = hierarchy.most_specific_matches(&matched);
    } else if least_specific {
        matched = hierarchy.least_specific_matches(&matched);
    }
    let matched: Vec<String> = matched.into_iter().collect();
    print_terms(&sorted_terms(&hierarchy, &matched), json)
}

fn cmd_ancestors(owl: &Path, id: &str, json: bool) -> Result<()> {
    let hierarchy = mondomap_ingest_owl::load_path(owl)?;
    let ancestors: Vec<String> = hierarchy.ancestors(id).into_iter().collect();
    print_terms(&sorted_terms(&hierarchy, &ancestors), json)
}

fn cmd_lca(owl: &Path, ids: &[String], json: bool) -> Result<()> {
    let hierarchy = mondomap_ingest_owl::load_path(owl)?;
    let lca = hierarchy.lowest_common_ancestor(ids);
    let term = ResolvedTerm {
        id: lca.as_str(),
        label: hierarchy.label(&lca),
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&term)?);
    } else {
        println!("{}  {}", term.id.green().bold(), term.label.unwrap_or(""));
    }
    Ok(())
}

fn cmd_stats(owl: &Path, json: bool) -> Result<()> {
    let hierarchy = mondomap_ingest_owl::load_path(owl)?;
    let stats = hierarchy.stats();
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("{}    {}", "terms".cyan(), stats.terms);
        println!("{}    {}", "xrefs".cyan(), stats.xrefs);
        println!("{}    {}", "names".cyan(), stats.names);
    }
    Ok(())
}
