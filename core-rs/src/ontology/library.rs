/**
 * library.rs
 * In-memory skills graph
 *
 * Statements live in an `oxigraph::model::Graph`, which keeps every literal
 * exactly as parsed (timestamps included). An Oxigraph `Store` is built from
 * it on the first SPARQL query only.
 *
 * Fragments are parsed completely before any triple reaches the graph, so a
 * fragment with a syntax error contributes nothing to the union.
 */

use once_cell::unsync::OnceCell;
use oxigraph::io::{RdfFormat, RdfParser};
use oxigraph::model::{Graph, GraphName, Literal, NamedNode, NamedNodeRef, Quad, Subject, Term, TermRef, Triple};
use oxigraph::store::Store;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use crate::errors::{OsmtError, Result};
use crate::iri::{BASE_IRI, ONTOLOGY_IRI};
use crate::ontology::query::{QueryResult, SparqlQuery};
use crate::ontology::turtle::TurtleDocument;
use crate::ontology::vocab::RDF_TYPE;

pub struct SkillGraph {
    graph: Graph,
    store: OnceCell<Store>,
}

impl SkillGraph {
    /// Empty graph.
    pub fn new() -> Result<Self> {
        Ok(Self {
            graph: Graph::new(),
            store: OnceCell::new(),
        })
    }

    /// Load a merged ontology file.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(OsmtError::FileNotFound(format!("TTL not found: {}", path.display())));
        }
        let mut graph = Self::new()?;
        graph.load_file(path)?;
        Ok(graph)
    }

    /// Parse a Turtle file into the graph. Returns the number of statements
    /// the file held.
    pub fn load_file(&mut self, path: &Path) -> Result<usize> {
        let content = fs::read_to_string(path)?;
        self.load_turtle(&content, path)
    }

    /// Parse Turtle text into the graph; `origin` only labels errors.
    pub fn load_turtle(&mut self, text: &str, origin: &Path) -> Result<usize> {
        let quads = RdfParser::from_format(RdfFormat::Turtle)
            .for_reader(text.as_bytes())
            .collect::<std::result::Result<Vec<Quad>, _>>()
            .map_err(|e| OsmtError::FragmentParse {
                path: origin.to_path_buf(),
                message: e.to_string(),
            })?;

        let count = quads.len();
        self.graph
            .extend(quads.into_iter().map(|q| Triple::new(q.subject, q.predicate, q.object)));
        self.store.take();
        Ok(count)
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.graph.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.graph.is_empty())
    }

    /// All statements, in graph order.
    pub fn triples(&self) -> Result<Vec<Triple>> {
        Ok(self.graph.iter().map(|t| t.into_owned()).collect())
    }

    pub fn contains(&self, triple: &Triple) -> Result<bool> {
        Ok(self.graph.contains(triple))
    }

    /// Serialize the whole graph as Turtle.
    ///
    /// Statements are sorted (ontology header first, then by subject, with
    /// `rdf:type` leading each block) so the same set of triples always
    /// produces the same bytes.
    pub fn to_turtle(&self) -> Result<String> {
        let header = format!("<{}>", ONTOLOGY_IRI);
        let mut triples = self.triples()?;
        triples.sort_by_cached_key(|t| {
            let subject = t.subject.to_string();
            (
                subject != header,
                subject,
                t.predicate.as_ref() != RDF_TYPE,
                t.predicate.as_str().to_string(),
                t.object.to_string(),
            )
        });

        let mut doc = TurtleDocument::new().with_base(BASE_IRI);
        doc.body().extend(triples);
        Ok(doc.to_turtle())
    }

    /// Write [`Self::to_turtle`] to `path`, creating parent directories.
    pub fn write_turtle(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_turtle()?)?;
        Ok(())
    }

    fn store(&self) -> Result<&Store> {
        self.store.get_or_try_init(|| {
            let store = Store::new()?;
            store.extend(self.graph.iter().map(|t| t.into_owned().in_graph(GraphName::DefaultGraph)))?;
            Ok(store)
        })
    }

    /// Execute SPARQL query
    pub fn query_sparql(&self, query: &SparqlQuery) -> Result<Vec<QueryResult>> {
        use oxigraph::sparql::QueryResults;

        let results = self
            .store()?
            .query(query.as_str())
            .map_err(|e| OsmtError::Query(e.to_string()))?;

        match results {
            QueryResults::Solutions(solutions) => {
                let mut rows = Vec::new();

                for solution in solutions {
                    let solution = solution.map_err(|e| OsmtError::Query(e.to_string()))?;

                    let mut row = HashMap::new();
                    for (var, term) in solution.iter() {
                        row.insert(var.as_str().to_string(), term.clone());
                    }
                    rows.push(row);
                }

                Ok(rows)
            }
            QueryResults::Boolean(result) => {
                let mut row = HashMap::new();
                row.insert("result".to_string(), Term::from(Literal::from(result)));
                Ok(vec![row])
            }
            QueryResults::Graph(_) => Err(OsmtError::Query("Graph queries not supported".to_string())),
        }
    }

    /// Named-node instances of `class`, sorted by IRI.
    pub fn instances_of(&self, class: NamedNodeRef<'_>) -> Result<Vec<NamedNode>> {
        let mut out: Vec<NamedNode> = self
            .graph
            .subjects_for_predicate_object(RDF_TYPE, class)
            .filter_map(|subject| match subject.into_owned() {
                Subject::NamedNode(node) => Some(node),
                _ => None,
            })
            .collect();
        out.sort();
        out.dedup();
        Ok(out)
    }

    pub fn has_type(&self, subject: NamedNodeRef<'_>, class: NamedNodeRef<'_>) -> Result<bool> {
        Ok(self
            .graph
            .objects_for_subject_predicate(subject, RDF_TYPE)
            .any(|object| object == TermRef::from(class)))
    }

    /// Objects of `subject predicate ?o`, sorted by their N-Triples text.
    pub fn objects(&self, subject: NamedNodeRef<'_>, predicate: NamedNodeRef<'_>) -> Result<Vec<Term>> {
        let mut out: Vec<Term> = self
            .graph
            .objects_for_subject_predicate(subject, predicate)
            .map(|object| object.into_owned())
            .collect();
        out.sort_by_cached_key(|t| t.to_string());
        out.dedup();
        Ok(out)
    }

    /// Literal objects of `subject predicate ?o`, sorted.
    pub fn literals(&self, subject: NamedNodeRef<'_>, predicate: NamedNodeRef<'_>) -> Result<Vec<Literal>> {
        Ok(self
            .objects(subject, predicate)?
            .into_iter()
            .filter_map(|t| match t {
                Term::Literal(literal) => Some(literal),
                _ => None,
            })
            .collect())
    }

    /// Lexical value of the first literal of `subject predicate ?o`.
    pub fn first_literal(&self, subject: NamedNodeRef<'_>, predicate: NamedNodeRef<'_>) -> Result<Option<String>> {
        Ok(self
            .literals(subject, predicate)?
            .into_iter()
            .next()
            .map(|l| l.value().to_string()))
    }

    /// Label of `subject` under `predicate`, preferring `lang`.
    pub fn preferred_label(
        &self,
        subject: NamedNodeRef<'_>,
        predicate: NamedNodeRef<'_>,
        lang: &str,
    ) -> Result<Option<String>> {
        let literals = self.literals(subject, predicate)?;
        Ok(preferred_literal(&literals, lang).map(|l| l.value().to_string()))
    }

    /// `(subject, object)` pairs of `predicate` where both ends are IRIs,
    /// sorted.
    pub fn resource_pairs(&self, predicate: NamedNodeRef<'_>) -> Result<Vec<(NamedNode, NamedNode)>> {
        let mut out = Vec::new();
        for triple in self.graph.triples_for_predicate(predicate) {
            let triple = triple.into_owned();
            if let (Subject::NamedNode(s), Term::NamedNode(o)) = (triple.subject, triple.object) {
                out.push((s, o));
            }
        }
        out.sort();
        out.dedup();
        Ok(out)
    }

    /// Run a `?s ?lab` query and keep one preferred label per subject.
    pub fn preferred_labels(&self, query: &SparqlQuery, lang: &str) -> Result<Vec<String>> {
        let mut by_subject: BTreeMap<String, Vec<Literal>> = BTreeMap::new();
        for row in self.query_sparql(query)? {
            let (Some(subject), Some(Term::Literal(label))) = (row.get("s"), row.get("lab")) else {
                continue;
            };
            by_subject.entry(subject.to_string()).or_default().push(label.clone());
        }

        let mut labels = Vec::new();
        for literals in by_subject.values_mut() {
            literals.sort_by_cached_key(|l| l.to_string());
            if let Some(label) = preferred_literal(literals, lang) {
                labels.push(label.value().to_string());
            }
        }
        Ok(labels)
    }
}

/// Literal whose language tag matches `lang` (case-insensitively); failing
/// that, the first one with no language tag.
pub fn preferred_literal<'a>(candidates: &'a [Literal], lang: &str) -> Option<&'a Literal> {
    candidates
        .iter()
        .find(|l| l.language().is_some_and(|tag| tag.eq_ignore_ascii_case(lang)))
        .or_else(|| candidates.iter().find(|l| l.language().is_none()))
}
