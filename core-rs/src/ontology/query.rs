/**
 * query.rs
 * Query types and builders for SPARQL
 */

use std::collections::HashMap;

use oxigraph::model::{NamedNodeRef, Term};

use crate::ontology::vocab::{RDF, SKOS};

pub type QueryResult = HashMap<String, Term>;

pub struct SparqlQuery {
    query: String,
}

impl SparqlQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.query
    }

    /// Every literal value of `predicate` on instances of `class`, one row per
    /// (?s, ?lab) pair. With `iri_prefix`, only subjects whose IRI starts with
    /// it are kept.
    pub fn labels_of(class: NamedNodeRef<'_>, predicate: NamedNodeRef<'_>, iri_prefix: Option<&str>) -> Self {
        let prefix_filter = match iri_prefix {
            Some(prefix) => format!("FILTER(STRSTARTS(STR(?s), \"{}\"))", escape_string(prefix)),
            None => String::new(),
        };

        Self::new(format!(
            r#"
            PREFIX rdf: <{rdf}>
            PREFIX skos: <{skos}>

            SELECT ?s ?lab
            WHERE {{
                ?s rdf:type <{class}> ;
                   <{predicate}> ?lab .
                FILTER(isLiteral(?lab))
                {prefix_filter}
            }}
            ORDER BY ?s ?lab
            "#,
            rdf = RDF,
            skos = SKOS,
            class = class.as_str(),
            predicate = predicate.as_str(),
            prefix_filter = prefix_filter,
        ))
    }
}

/// Escape text for a SPARQL double-quoted string.
fn escape_string(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
