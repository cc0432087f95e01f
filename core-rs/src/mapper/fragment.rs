/**
 * fragment.rs
 * SkillRecord -> per-record Turtle fragment
 *
 * A fragment is self-contained: the ontology header, the class and property
 * declarations, then one block per entity the record references, in the
 * order RSD, keywords, category, standards, collections, alignments,
 * occupations.
 */

use std::collections::HashSet;

use chrono::{DateTime, NaiveDateTime};
use oxigraph::model::{Literal, NamedNode, NamedNodeRef, Term, Triple};
use tracing::{debug, warn};

use crate::errors::{OsmtError, Result};
use crate::iri::{mint_local_name, EntityKind, LocalName, BASE_IRI, ONTOLOGY_IRI};
use crate::mapper::policy::CreatorPolicy;
use crate::ontology::turtle::{Section, TurtleDocument};
use crate::ontology::vocab::*;
use crate::record::{decode_record, Attribution, SkillRecord};

/// The mapped form of one record.
#[derive(Debug, Clone)]
pub struct Fragment {
    pub subject: LocalName,
    document: TurtleDocument,
}

impl Fragment {
    pub fn document(&self) -> &TurtleDocument {
        &self.document
    }

    pub fn triples(&self) -> impl Iterator<Item = &Triple> {
        self.document.triples()
    }

    pub fn to_turtle(&self) -> String {
        self.document.to_turtle()
    }
}

/// Stateless record mapper. One instance can map any number of records.
#[derive(Debug, Clone)]
pub struct SkillMapper {
    policy: CreatorPolicy,
    lang: String,
}

impl Default for SkillMapper {
    fn default() -> Self {
        Self {
            policy: CreatorPolicy::default(),
            lang: "en".to_string(),
        }
    }
}

impl SkillMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(mut self, policy: CreatorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Language tag put on labels and definitions.
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// Decode and map one JSON document.
    pub fn map_json(&self, json: &str) -> Result<Fragment> {
        let record = decode_record(json)?;
        self.map(&record)
    }

    pub fn map(&self, record: &SkillRecord) -> Result<Fragment> {
        let subject = mint_local_name(EntityKind::SkillDescriptor, &record.key);
        let rsd = subject.to_named_node()?;

        let categories = unique(EntityKind::Category, record.category.as_slice(), |c| c)?;
        let keywords = unique(EntityKind::Keyword, &record.keywords, |k| k)?;
        let standards = unique(EntityKind::Standard, &record.standards, |s| s)?;
        let occupations = unique(EntityKind::Occupation, &record.occupations, |o| &o.code)?;
        let collections = unique(EntityKind::Collection, &record.collections, |c| &c.uuid)?;
        let alignments = unique(EntityKind::Alignment, &record.alignments, |a| &a.id)?;

        let mut doc = TurtleDocument::new().with_base(BASE_IRI);
        write_preamble(&mut doc)?;

        // RSD
        let section = doc.section("RSD");
        section.push(statement(&rsd, RDF_TYPE, CLS_RSD.into_owned()));
        if let Some(name) = non_empty(record.name.as_deref()) {
            section.push(statement(&rsd, P_TITLE, Literal::new_simple_literal(name.clone())));
            section.push(statement(&rsd, P_PREF_LABEL, self.tagged(&name)?));
        }
        section.push(statement(&rsd, P_IDENTIFIER, Literal::new_simple_literal(fold(&record.key))));
        if let Some(source) = record.source_id.as_deref().and_then(|id| self.policy.link_for(id)) {
            section.push(statement(&rsd, P_SOURCE, source));
        }
        match &record.attribution {
            Some(Attribution::Creator(creator)) => {
                let object: Term = match self.policy.link_for(creator) {
                    Some(link) => link.into(),
                    None => Literal::new_simple_literal(fold(creator)).into(),
                };
                section.push(statement(&rsd, P_CREATOR, object));
            }
            Some(Attribution::Author(author)) => {
                section.push(statement(&rsd, P_CREATOR, Literal::new_simple_literal(fold(author))));
            }
            None => {}
        }
        for (predicate, field, value) in [
            (P_CREATED, "creationDate", &record.created),
            (P_ISSUED, "publishDate", &record.issued),
            (P_MODIFIED, "updateDate", &record.modified),
        ] {
            if let Some(value) = non_empty(value.as_deref()) {
                section.push(statement(&rsd, predicate, timestamp(&subject, field, &value)));
            }
        }
        if let Some(status) = non_empty(record.status.as_deref()) {
            section.push(statement(&rsd, P_STATUS, Literal::new_simple_literal(status)));
        }
        if let Some(definition) = non_empty(record.statement.as_deref()) {
            section.push(statement(&rsd, P_DEFINITION, self.tagged(&definition)?));
        }
        link_all(section, &rsd, P_HAS_CATEGORY, &categories);
        link_all(section, &rsd, P_HAS_KEYWORD, &keywords);
        link_all(section, &rsd, P_HAS_STANDARD, &standards);
        link_all(section, &rsd, P_HAS_OCCUPATION, &occupations);
        link_all(section, &rsd, P_IN_COLLECTION, &collections);
        link_all(section, &rsd, P_HAS_ALIGNMENT, &alignments);

        let section = doc.section("Keywords");
        for (node, keyword) in &keywords {
            section.push(statement(node, RDF_TYPE, CLS_KEYWORD.into_owned()));
            if let Some(label) = non_empty(Some(&keyword.replace('_', " "))) {
                section.push(statement(node, P_PREF_LABEL, self.tagged(&label)?));
            }
        }

        let section = doc.section("Category");
        for (node, category) in &categories {
            section.push(statement(node, RDF_TYPE, CLS_CATEGORY.into_owned()));
            if let Some(label) = non_empty(Some(&category.replace('_', " "))) {
                section.push(statement(node, P_PREF_LABEL, self.tagged(&label)?));
            }
        }

        let section = doc.section("Standards");
        for (node, code) in &standards {
            let code = fold(code);
            section.push(statement(node, RDF_TYPE, CLS_STANDARD.into_owned()));
            section.push(statement(node, P_PREF_LABEL, self.tagged(&code)?));
            section.push(statement(node, P_NOTATION, Literal::new_simple_literal(code)));
            section.push(statement(node, P_SOURCE, NICE_FRAMEWORK.into_owned()));
        }

        let section = doc.section("Collections");
        for (node, collection) in &collections {
            section.push(statement(node, RDF_TYPE, CLS_COLLECTION.into_owned()));
            section.push(statement(node, P_IDENTIFIER, Literal::new_simple_literal(fold(&collection.uuid))));
            if let Some(title) = non_empty(Some(&collection.name)) {
                section.push(statement(node, P_TITLE, Literal::new_simple_literal(title)));
            }
        }

        let section = doc.section("Alignments");
        for (node, alignment) in &alignments {
            section.push(statement(node, RDF_TYPE, CLS_ALIGNMENT.into_owned()));
            section.push(statement(node, P_IDENTIFIER, Literal::new_simple_literal(fold(&alignment.id))));
            if let Some(label) = non_empty(Some(&alignment.label)) {
                section.push(statement(node, P_PREF_LABEL, self.tagged(&label)?));
            }
        }

        let section = doc.section("Occupations");
        for (node, occupation) in &occupations {
            section.push(statement(node, RDF_TYPE, CLS_OCCUPATION.into_owned()));
            section.push(statement(node, P_IDENTIFIER, Literal::new_simple_literal(fold(&occupation.code))));
            if let Some(label) = non_empty(Some(&occupation.name)) {
                section.push(statement(node, P_PREF_LABEL, self.tagged(&label)?));
            }
            for parent in &occupation.parents {
                let parent = mint_local_name(EntityKind::Occupation, parent).to_named_node()?;
                if parent != *node {
                    section.push(statement(node, P_PART_OF, parent));
                }
            }
        }

        debug!(rsd = %subject, triples = doc.len(), "mapped record");
        Ok(Fragment { subject, document: doc })
    }

    fn tagged(&self, text: &str) -> Result<Literal> {
        Literal::new_language_tagged_literal(text, &self.lang)
            .map_err(|e| OsmtError::Config(format!("invalid language tag {:?}: {}", self.lang, e)))
    }
}

/// Ontology header plus the class and property declarations.
fn write_preamble(doc: &mut TurtleDocument) -> Result<()> {
    let ontology = NamedNode::new(ONTOLOGY_IRI).map_err(|e| OsmtError::InvalidIri(e.to_string()))?;
    doc.body().push(Triple::new(ontology, RDF_TYPE.into_owned(), OWL_ONTOLOGY.into_owned()));

    let section = doc.section("Structural classes");
    for kind in EntityKind::ALL {
        section.push(Triple::new(class_of(kind).into_owned(), RDF_TYPE.into_owned(), OWL_CLASS.into_owned()));
    }

    let section = doc.section("Structural properties");
    for spec in REL_SPECS {
        section.push(Triple::new(
            spec.predicate.into_owned(),
            RDF_TYPE.into_owned(),
            OWL_OBJECT_PROPERTY.into_owned(),
        ));
    }
    Ok(())
}

fn statement(subject: &NamedNode, predicate: NamedNodeRef<'static>, object: impl Into<Term>) -> Triple {
    Triple::new(subject.clone(), predicate.into_owned(), object)
}

/// One `subject predicate o1 , o2 ...` statement; nothing when `targets` is
/// empty.
fn link_all<T>(section: &mut Section, subject: &NamedNode, predicate: NamedNodeRef<'static>, targets: &[(NamedNode, &T)]) {
    for (node, _) in targets {
        section.push(statement(subject, predicate, node.clone()));
    }
}

/// Mint every item's node, keeping the first item per local name.
fn unique<'a, T: ?Sized, I>(
    kind: EntityKind,
    items: &'a [I],
    key: impl Fn(&'a I) -> &'a T,
) -> Result<Vec<(NamedNode, &'a I)>>
where
    T: AsRef<str> + 'a,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for item in items {
        let name = mint_local_name(kind, key(item).as_ref());
        if seen.insert(name.clone()) {
            out.push((name.to_named_node()?, item));
        }
    }
    Ok(out)
}

/// Fold line breaks and tabs to spaces and trim.
fn fold(text: &str) -> String {
    text.replace(['\r', '\n', '\t'], " ").trim().to_string()
}

fn non_empty<S: AsRef<str>>(text: Option<S>) -> Option<String> {
    text.map(|t| fold(t.as_ref())).filter(|s| !s.is_empty())
}

fn timestamp(subject: &LocalName, field: &str, value: &str) -> Literal {
    let parses = DateTime::parse_from_rfc3339(value).is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").is_ok();
    if !parses {
        warn!(rsd = %subject, field, value, "timestamp is not an xsd:dateTime; writing it unchanged");
    }
    Literal::new_typed_literal(value, XSD_DATE_TIME.into_owned())
}
