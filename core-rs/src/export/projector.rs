/**
 * projector.rs
 * Skills graph -> node and relationship rows
 */

use std::fs;
use std::path::Path;

use oxigraph::model::{NamedNode, NamedNodeRef};
use tracing::info;

use crate::errors::Result;
use crate::export::tables::{NodeTable, NODE_TABLES, REL_HEADER};
use crate::export::ProjectionSummary;
use crate::iri::{local_name_of, EntityKind};
use crate::ontology::vocab::*;
use crate::ontology::SkillGraph;

pub struct PropertyGraphExporter<'g> {
    graph: &'g SkillGraph,
    lang: String,
}

impl<'g> PropertyGraphExporter<'g> {
    pub fn new(graph: &'g SkillGraph, lang: impl Into<String>) -> Self {
        Self {
            graph,
            lang: lang.into(),
        }
    }

    /// One row per instance of `kind`, sorted by id.
    pub fn node_rows(&self, kind: EntityKind) -> Result<Vec<Vec<String>>> {
        let mut rows = Vec::new();
        for node in self.graph.instances_of(class_of(kind))? {
            rows.push(self.node_row(kind, &node)?);
        }
        rows.sort();
        Ok(rows)
    }

    fn node_row(&self, kind: EntityKind, node: &NamedNode) -> Result<Vec<String>> {
        let id = local_name_of(node.as_str()).to_string();
        let subject = node.as_ref();
        let label = |p: NamedNodeRef<'static>| -> Result<String> {
            Ok(self.graph.preferred_label(subject, p, &self.lang)?.unwrap_or_default())
        };
        let literal = |p: NamedNodeRef<'static>| -> Result<String> { Ok(self.graph.first_literal(subject, p)?.unwrap_or_default()) };

        let mut row = vec![id.clone(), kind.class_name().to_string()];
        match kind {
            EntityKind::SkillDescriptor => {
                row.push(label(P_PREF_LABEL)?);
                row.push(literal(P_IDENTIFIER)?);
                row.push(literal(P_STATUS)?);
                row.push(literal(P_CREATED)?);
                row.push(literal(P_ISSUED)?);
                row.push(literal(P_MODIFIED)?);
            }
            EntityKind::Keyword | EntityKind::Category => {
                row.push(label(P_PREF_LABEL)?);
            }
            EntityKind::Standard => {
                row.push(label(P_PREF_LABEL)?);
                row.push(literal(P_NOTATION)?);
            }
            EntityKind::Occupation => {
                row.push(label(P_PREF_LABEL)?);
                let code = literal(P_IDENTIFIER)?;
                if code.is_empty() {
                    row.push(id.strip_prefix("bls-").unwrap_or(&id).to_string());
                } else {
                    row.push(code);
                }
            }
            EntityKind::Collection => {
                row.push(literal(P_TITLE)?);
                row.push(literal(P_IDENTIFIER)?);
            }
            EntityKind::Alignment => {
                row.push(label(P_PREF_LABEL)?);
                row.push(literal(P_IDENTIFIER)?);
            }
        }
        Ok(row)
    }

    /// `(start, end, type)` rows for one relationship, sorted. Subjects
    /// without the expected source type are left out.
    pub fn relationship_rows(&self, spec: &RelSpec) -> Result<Vec<[String; 3]>> {
        let source_class = class_of(spec.source);
        let mut rows = Vec::new();
        for (start, end) in self.graph.resource_pairs(spec.predicate)? {
            if !self.graph.has_type(start.as_ref(), source_class)? {
                continue;
            }
            rows.push([
                local_name_of(start.as_str()).to_string(),
                local_name_of(end.as_str()).to_string(),
                spec.rel_type.to_string(),
            ]);
        }
        rows.sort();
        Ok(rows)
    }

    /// Write all seven node files and seven relationship files.
    pub fn write_all(&self, out_dir: &Path) -> Result<ProjectionSummary> {
        fs::create_dir_all(out_dir)?;
        let mut summary = ProjectionSummary::default();

        for table in NODE_TABLES {
            let rows = self.node_rows(table.kind)?;
            write_csv(&out_dir.join(table.file_name), table.header, &rows)?;
            summary.nodes.push((table.kind, rows.len()));
        }

        for spec in REL_SPECS {
            let rows = self.relationship_rows(&spec)?;
            write_csv(&out_dir.join(spec.file_name), &REL_HEADER, &rows)?;
            summary.relationships.push((spec.rel_type, rows.len()));
        }

        Ok(summary)
    }
}

fn write_csv<R: AsRef<[String]>>(path: &Path, header: &[&str], rows: &[R]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(header)?;
    for row in rows {
        writer.write_record(row.as_ref())?;
    }
    writer.flush()?;
    info!(dst = %path.display(), rows = rows.len(), "wrote table");
    Ok(())
}

/// Header for a node table, by kind.
pub fn node_header(kind: EntityKind) -> &'static [&'static str] {
    NODE_TABLES
        .iter()
        .find(|t: &&NodeTable| t.kind == kind)
        .map(|t| t.header)
        .unwrap_or(&[])
}
