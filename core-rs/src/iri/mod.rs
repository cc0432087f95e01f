//! IRI minting for skill graph entities
//!
//! Every entity in the graph lives under one namespace and is named by a
//! short type tag followed by a key:
//!
//! ```text
//! https://w3id.org/wgu/osmt/skills#rsd-<uuid>
//! https://w3id.org/wgu/osmt/skills#kw-<slug of keyword text>
//! https://w3id.org/wgu/osmt/skills#bls-<occupation code>
//! ```
//!
//! Names are content addressed: the same label, code or UUID always mints
//! the same local name. That is the whole identity strategy for satellite
//! entities; a keyword shared by two records collapses to one node because
//! both records mint the same IRI for it.

mod minter;

pub use minter::{local_name_of, mint_local_name, slug, EntityKind, LocalName, BASE_IRI, ONTOLOGY_IRI};
