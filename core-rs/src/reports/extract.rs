/**
 * extract.rs
 * Distinct preferred labels per entity type
 */

use std::fs;
use std::path::Path;

use oxigraph::model::NamedNodeRef;
use tracing::info;

use crate::errors::Result;
use crate::iri::BASE_IRI;
use crate::ontology::query::SparqlQuery;
use crate::ontology::vocab::{P_ALT_LABEL, P_PREF_LABEL};
use crate::ontology::SkillGraph;
use crate::reports::clean::{clean_label, valid_label};

/// Which instances to read labels from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelQuery {
    pub class: NamedNodeRef<'static>,
    /// Keep only instances whose local name starts with this.
    pub local_prefix: Option<&'static str>,
    /// Also collect `skos:altLabel`.
    pub include_alt: bool,
}

impl LabelQuery {
    pub fn of(class: NamedNodeRef<'static>) -> Self {
        Self {
            class,
            local_prefix: None,
            include_alt: false,
        }
    }

    pub fn with_local_prefix(mut self, prefix: &'static str) -> Self {
        self.local_prefix = Some(prefix);
        self
    }

    pub fn with_alt(mut self, include_alt: bool) -> Self {
        self.include_alt = include_alt;
        self
    }
}

pub struct LabelExtractor<'g> {
    graph: &'g SkillGraph,
    lang: String,
}

impl<'g> LabelExtractor<'g> {
    pub fn new(graph: &'g SkillGraph, lang: impl Into<String>) -> Self {
        Self {
            graph,
            lang: lang.into(),
        }
    }

    /// Sorted, distinct preferred labels of the matching instances. Each
    /// instance contributes at most one label per label property.
    pub fn labels(&self, query: &LabelQuery) -> Result<Vec<String>> {
        let iri_prefix = query.local_prefix.map(|p| format!("{}{}", BASE_IRI, p));

        let mut predicates = vec![P_PREF_LABEL];
        if query.include_alt {
            predicates.push(P_ALT_LABEL);
        }

        let mut labels = Vec::new();
        for predicate in predicates {
            let sparql = SparqlQuery::labels_of(query.class, predicate, iri_prefix.as_deref());
            labels.extend(self.graph.preferred_labels(&sparql, &self.lang)?);
        }

        labels.sort();
        labels.dedup();
        Ok(labels)
    }

    /// [`Self::labels`] passed through [`clean_label`] and [`valid_label`].
    pub fn cleaned_labels(&self, query: &LabelQuery) -> Result<Vec<String>> {
        let mut labels: Vec<String> = self
            .labels(query)?
            .iter()
            .map(|l| clean_label(l))
            .filter(|l| valid_label(l))
            .collect();
        labels.sort();
        labels.dedup();
        Ok(labels)
    }
}

/// Write one label per line, newline-terminated. An empty list still
/// creates an empty file.
pub fn write_label_report(path: &Path, labels: &[String]) -> Result<usize> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut body = labels.join("\n");
    if !labels.is_empty() {
        body.push('\n');
    }
    fs::write(path, body)?;

    info!(dst = %path.display(), labels = labels.len(), "wrote label report");
    Ok(labels.len())
}
