/**
 * export module
 * Property-graph projection of the merged ontology
 *
 * - tables: node and relationship file layouts for bulk import
 * - projector: PropertyGraphExporter (rows per entity kind and relationship)
 */

mod projector;
mod tables;

pub use projector::{node_header, PropertyGraphExporter};
pub use tables::{NodeTable, NODE_TABLES, REL_HEADER};

use std::path::Path;

use tracing::{info, info_span};

use crate::errors::Result;
use crate::iri::EntityKind;
use crate::ontology::SkillGraph;

/// Row counts written by one projection, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectionSummary {
    pub nodes: Vec<(EntityKind, usize)>,
    pub relationships: Vec<(&'static str, usize)>,
}

impl ProjectionSummary {
    pub fn total_nodes(&self) -> usize {
        self.nodes.iter().map(|(_, n)| n).sum()
    }

    pub fn total_relationships(&self) -> usize {
        self.relationships.iter().map(|(_, n)| n).sum()
    }

    pub fn nodes_of(&self, kind: EntityKind) -> usize {
        self.nodes.iter().find(|(k, _)| *k == kind).map(|(_, n)| *n).unwrap_or(0)
    }

    pub fn relationships_of(&self, rel_type: &str) -> usize {
        self.relationships
            .iter()
            .find(|(t, _)| *t == rel_type)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }
}

/// Load `ttl_path` and write the fourteen CSV files into `out_dir`.
pub fn export_property_graph(ttl_path: &Path, out_dir: &Path, lang: &str) -> Result<ProjectionSummary> {
    let _span = info_span!("graph", ttl = %ttl_path.display()).entered();
    let graph = SkillGraph::open(ttl_path)?;
    let summary = PropertyGraphExporter::new(&graph, lang).write_all(out_dir)?;
    info!(
        nodes = summary.total_nodes(),
        relationships = summary.total_relationships(),
        dst = %out_dir.display(),
        "projection written"
    );
    Ok(summary)
}
