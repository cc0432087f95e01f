/**
 * vocab.rs
 * Namespaces, classes and properties of the skills ontology
 *
 * Shared by the mapper (which writes these terms), the label extractor and
 * the property-graph projector (which read them back).
 */

use oxigraph::model::NamedNodeRef;

use crate::iri::EntityKind;

pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const OWL: &str = "http://www.w3.org/2002/07/owl#";
pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
pub const SKOS: &str = "http://www.w3.org/2004/02/skos/core#";
pub const DCT: &str = "http://purl.org/dc/terms/";

/// Prefixes declared at the top of every Turtle document we write.
/// The empty prefix is the skills namespace.
pub const PREFIXES: [(&str, &str); 7] = [
    ("", crate::iri::BASE_IRI),
    ("owl", OWL),
    ("rdf", RDF),
    ("rdfs", RDFS),
    ("xsd", XSD),
    ("skos", SKOS),
    ("dct", DCT),
];

pub const RDF_TYPE: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("http://www.w3.org/1999/02/22-rdf-syntax-ns#type");
pub const OWL_ONTOLOGY: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#Ontology");
pub const OWL_CLASS: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#Class");
pub const OWL_OBJECT_PROPERTY: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#ObjectProperty");
pub const XSD_DATE_TIME: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#dateTime");
pub const XSD_STRING: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#string");

// Classes
pub const CLS_RSD: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("https://w3id.org/wgu/osmt/skills#RichSkillDescriptor");
pub const CLS_KEYWORD: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("https://w3id.org/wgu/osmt/skills#Keyword");
pub const CLS_CATEGORY: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("https://w3id.org/wgu/osmt/skills#Category");
pub const CLS_STANDARD: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("https://w3id.org/wgu/osmt/skills#Standard");
pub const CLS_OCCUPATION: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("https://w3id.org/wgu/osmt/skills#Occupation");
pub const CLS_COLLECTION: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("https://w3id.org/wgu/osmt/skills#Collection");
pub const CLS_ALIGNMENT: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("https://w3id.org/wgu/osmt/skills#Alignment");

// Object properties
pub const P_HAS_KEYWORD: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("https://w3id.org/wgu/osmt/skills#hasKeyword");
pub const P_HAS_CATEGORY: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("https://w3id.org/wgu/osmt/skills#hasCategory");
pub const P_HAS_STANDARD: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("https://w3id.org/wgu/osmt/skills#hasStandard");
pub const P_HAS_OCCUPATION: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("https://w3id.org/wgu/osmt/skills#hasOccupation");
pub const P_IN_COLLECTION: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("https://w3id.org/wgu/osmt/skills#inCollection");
pub const P_HAS_ALIGNMENT: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("https://w3id.org/wgu/osmt/skills#hasAlignment");
pub const P_PART_OF: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("https://w3id.org/wgu/osmt/skills#partOf");

// Data properties
pub const P_STATUS: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("https://w3id.org/wgu/osmt/skills#status");
pub const P_PREF_LABEL: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#prefLabel");
pub const P_ALT_LABEL: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#altLabel");
pub const P_NOTATION: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#notation");
pub const P_DEFINITION: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#definition");
pub const P_IDENTIFIER: NamedNodeRef<'static> = NamedNodeRef::new_unchecked("http://purl.org/dc/terms/identifier");
pub const P_TITLE: NamedNodeRef<'static> = NamedNodeRef::new_unchecked("http://purl.org/dc/terms/title");
pub const P_SOURCE: NamedNodeRef<'static> = NamedNodeRef::new_unchecked("http://purl.org/dc/terms/source");
pub const P_CREATOR: NamedNodeRef<'static> = NamedNodeRef::new_unchecked("http://purl.org/dc/terms/creator");
pub const P_CREATED: NamedNodeRef<'static> = NamedNodeRef::new_unchecked("http://purl.org/dc/terms/created");
pub const P_ISSUED: NamedNodeRef<'static> = NamedNodeRef::new_unchecked("http://purl.org/dc/terms/issued");
pub const P_MODIFIED: NamedNodeRef<'static> = NamedNodeRef::new_unchecked("http://purl.org/dc/terms/modified");

/// Provenance attached to every standard node.
pub const NICE_FRAMEWORK: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("https://niccs.cisa.gov/workforce-development/nice-framework");

/// Class IRI for an entity kind.
pub fn class_of(kind: EntityKind) -> NamedNodeRef<'static> {
    match kind {
        EntityKind::SkillDescriptor => CLS_RSD,
        EntityKind::Keyword => CLS_KEYWORD,
        EntityKind::Category => CLS_CATEGORY,
        EntityKind::Standard => CLS_STANDARD,
        EntityKind::Occupation => CLS_OCCUPATION,
        EntityKind::Collection => CLS_COLLECTION,
        EntityKind::Alignment => CLS_ALIGNMENT,
    }
}

/// One typed relationship: `source` instances linked through `predicate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelSpec {
    pub source: EntityKind,
    pub predicate: NamedNodeRef<'static>,
    pub rel_type: &'static str,
    pub file_name: &'static str,
}

/// Every relationship the graph declares, in declaration order.
pub const REL_SPECS: [RelSpec; 7] = [
    RelSpec {
        source: EntityKind::SkillDescriptor,
        predicate: P_HAS_KEYWORD,
        rel_type: "HAS_KEYWORD",
        file_name: "rels_rsd_hasKeyword.csv",
    },
    RelSpec {
        source: EntityKind::SkillDescriptor,
        predicate: P_HAS_CATEGORY,
        rel_type: "HAS_CATEGORY",
        file_name: "rels_rsd_hasCategory.csv",
    },
    RelSpec {
        source: EntityKind::SkillDescriptor,
        predicate: P_HAS_STANDARD,
        rel_type: "HAS_STANDARD",
        file_name: "rels_rsd_hasStandard.csv",
    },
    RelSpec {
        source: EntityKind::SkillDescriptor,
        predicate: P_HAS_OCCUPATION,
        rel_type: "HAS_OCCUPATION",
        file_name: "rels_rsd_hasOccupation.csv",
    },
    RelSpec {
        source: EntityKind::SkillDescriptor,
        predicate: P_IN_COLLECTION,
        rel_type: "IN_COLLECTION",
        file_name: "rels_rsd_inCollection.csv",
    },
    RelSpec {
        source: EntityKind::SkillDescriptor,
        predicate: P_HAS_ALIGNMENT,
        rel_type: "HAS_ALIGNMENT",
        file_name: "rels_rsd_hasAlignment.csv",
    },
    // occupation hierarchy
    RelSpec {
        source: EntityKind::Occupation,
        predicate: P_PART_OF,
        rel_type: "PART_OF",
        file_name: "rels_occupation_partOf.csv",
    },
];
