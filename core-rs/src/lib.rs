//! # OSMT Skills Graph
//!
//! Builds a skills ontology from Open Skills Management Tool (OSMT) Rich
//! Skill Descriptor records and projects it for downstream consumers.
//!
//! ## Pipeline
//!
//! ```text
//!   *.json records
//!        │  SkillMapper (one record -> one Turtle fragment)
//!        ▼
//!   .partials/*.ttl
//!        │  merge_fragments (union, partial-failure tolerant)
//!        ▼
//!   skills.ttl ──────────────┬──────────────────────────┐
//!                            ▼                          ▼
//!            generate_reports (label .txt)   export_property_graph (CSV)
//! ```
//!
//! Every entity IRI is minted from content (UUID, code or label slug), so
//! rebuilding from unchanged input yields the same graph, and satellite
//! entities shared across records collapse to one node.

pub mod errors;
pub mod iri;
pub mod record;
pub mod ontology;
pub mod mapper;
pub mod assemble;
pub mod reports;
pub mod export;
pub mod project;

pub use errors::{OsmtError, Result};
pub use iri::{local_name_of, mint_local_name, slug, EntityKind, LocalName, BASE_IRI, ONTOLOGY_IRI};
pub use record::{decode_record, SkillRecord};
pub use ontology::{SkillGraph, SparqlQuery, TurtleDocument};
pub use mapper::{CreatorPolicy, Fragment, SkillMapper};
pub use assemble::{find_json_files, merge_fragments, Assembler, BuildReport, MergeReport};
pub use reports::{generate_reports, LabelExtractor, ReportKind, ReportOptions};
pub use export::{export_property_graph, ProjectionSummary, PropertyGraphExporter};
pub use project::BuilderConfig;

/// Crate version, as reported by the CLI.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
