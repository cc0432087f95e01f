//! Local-name minting: slugs, type tags and fallbacks.

use std::fmt;

use oxigraph::model::NamedNode;
use url::Url;

use crate::errors::{OsmtError, Result};

/// Namespace every minted local name is appended to.
pub const BASE_IRI: &str = "https://w3id.org/wgu/osmt/skills#";

/// IRI of the ontology header itself.
pub const ONTOLOGY_IRI: &str = "https://w3id.org/wgu/osmt/skills";

/// The seven entity kinds of the skills graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    SkillDescriptor,
    Keyword,
    Category,
    Standard,
    Occupation,
    Collection,
    Alignment,
}

impl EntityKind {
    pub const ALL: [EntityKind; 7] = [
        EntityKind::SkillDescriptor,
        EntityKind::Keyword,
        EntityKind::Category,
        EntityKind::Standard,
        EntityKind::Occupation,
        EntityKind::Collection,
        EntityKind::Alignment,
    ];

    /// Local-name prefix, without the trailing hyphen.
    pub fn tag(&self) -> &'static str {
        match self {
            EntityKind::SkillDescriptor => "rsd",
            EntityKind::Keyword => "kw",
            EntityKind::Category => "cat",
            EntityKind::Standard => "std",
            EntityKind::Occupation => "bls",
            EntityKind::Collection => "col",
            EntityKind::Alignment => "align",
        }
    }

    /// RDF class local name (also the property-graph node label).
    pub fn class_name(&self) -> &'static str {
        match self {
            EntityKind::SkillDescriptor => "RichSkillDescriptor",
            EntityKind::Keyword => "Keyword",
            EntityKind::Category => "Category",
            EntityKind::Standard => "Standard",
            EntityKind::Occupation => "Occupation",
            EntityKind::Collection => "Collection",
            EntityKind::Alignment => "Alignment",
        }
    }

    /// Raw-keyed kinds keep the external identifier verbatim.
    pub fn is_raw_keyed(&self) -> bool {
        matches!(
            self,
            EntityKind::SkillDescriptor | EntityKind::Occupation | EntityKind::Collection
        )
    }

    /// Token substituted when the key slugs to nothing.
    fn fallback(&self) -> &'static str {
        match self {
            EntityKind::Alignment => "alignment",
            EntityKind::Standard => "std",
            _ => "unnamed",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

/// A minted local name such as `kw-data-analysis`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocalName(String);

impl LocalName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Full IRI text under [`BASE_IRI`].
    pub fn iri_string(&self) -> String {
        format!("{}{}", BASE_IRI, self.0)
    }

    pub fn to_named_node(&self) -> Result<NamedNode> {
        NamedNode::new(self.iri_string()).map_err(|e| OsmtError::InvalidIri(format!("{}: {}", self.0, e)))
    }
}

impl fmt::Display for LocalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fold free text into an ASCII token.
///
/// Lower-cases, spells `&` as "and", collapses every run of non-alphanumeric
/// characters into one hyphen and trims hyphens from both ends. Empty input
/// gives an empty token; callers substitute the kind's fallback.
pub fn slug(text: &str) -> String {
    let lowered = text.trim().to_lowercase().replace('&', "and");
    let mut out = String::with_capacity(lowered.len());
    let mut pending_hyphen = false;

    for c in lowered.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    out
}

/// Mint the local name for `key` as an entity of `kind`.
pub fn mint_local_name(kind: EntityKind, key: &str) -> LocalName {
    let body = if kind.is_raw_keyed() {
        iri_safe(key.trim())
    } else if kind == EntityKind::Alignment {
        slug(&alignment_key(key))
    } else {
        slug(key)
    };

    let body = if body.is_empty() { kind.fallback().to_string() } else { body };
    LocalName(format!("{}-{}", kind.tag(), body))
}

/// Last path segment when the alignment id is a URL, the whole id otherwise.
fn alignment_key(raw: &str) -> String {
    let Ok(url) = Url::parse(raw) else {
        return raw.to_string();
    };

    if url.cannot_be_a_base() {
        // urn:isbn:123 and friends: the whole path is the last segment
        return url.path().to_string();
    }

    if url.path().trim_end_matches('/').is_empty() {
        return raw.to_string();
    }

    // Take the segment from the raw text; `Url` would percent-encode it.
    let without_suffix = raw.split(&['?', '#'][..]).next().unwrap_or(raw);
    without_suffix
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(raw)
        .to_string()
}

/// Percent-encode what an IRI cannot carry verbatim, plus the `/` and `:`
/// separators that [`local_name_of`] splits on; everything else is kept.
fn iri_safe(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        let forbidden = c.is_whitespace()
            || c.is_control()
            || matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\' | '#' | '%' | '/' | ':');
        if forbidden {
            let mut buf = [0u8; 4];
            for byte in c.encode_utf8(&mut buf).bytes() {
                out.push_str(&format!("%{:02X}", byte));
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Local name of an IRI: the text after [`BASE_IRI`] for minted nodes;
/// otherwise the text after the last `#`, then after the last `/`, then after
/// the last `:`.
pub fn local_name_of(iri: &str) -> &str {
    if let Some(local) = iri.strip_prefix(BASE_IRI) {
        return local;
    }
    let mut s = iri;
    for sep in ['#', '/', ':'] {
        if let Some(idx) = s.rfind(sep) {
            s = &s[idx + sep.len_utf8()..];
        }
    }
    s
}
