/**
 * ontology module
 *
 * - vocab: namespaces, classes, properties and relationship specs
 * - turtle: statement document and deterministic Turtle writer
 * - library: Oxigraph-backed skills graph (load, serialize, query)
 * - query: SPARQL query builders
 */

pub mod library;
pub mod query;
pub mod turtle;
pub mod vocab;

pub use library::{preferred_literal, SkillGraph};
pub use query::{QueryResult, SparqlQuery};
pub use turtle::{escape_literal, Section, TurtleDocument};
pub use vocab::{class_of, RelSpec, REL_SPECS};
