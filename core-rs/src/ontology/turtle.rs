/**
 * turtle.rs
 * Statement document and Turtle writer
 *
 * Fragments and the merged ontology are built as lists of triples and
 * rendered in one pass. Escaping and prefix compaction live here and nowhere
 * else, so mapping code never interpolates text into Turtle by hand.
 */

use once_cell::sync::Lazy;
use oxigraph::model::{Literal, NamedNodeRef, Subject, Term, Triple};
use regex::Regex;
use std::collections::HashMap;

use crate::ontology::vocab::{PREFIXES, XSD_STRING};

/// Local part that is safe to write as a prefixed name.
static PN_LOCAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_](?:[A-Za-z0-9_.\-]*[A-Za-z0-9_\-])?$").expect("static regex"));

const BANNER: &str = "#################################################################";

/// A titled group of statements, rendered under a comment banner.
#[derive(Debug, Clone, Default)]
pub struct Section {
    title: Option<String>,
    triples: Vec<Triple>,
}

impl Section {
    pub fn push(&mut self, triple: Triple) {
        self.triples.push(triple);
    }

    pub fn extend(&mut self, triples: impl IntoIterator<Item = Triple>) {
        self.triples.extend(triples);
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }
}

/// An ordered set of sections plus the prefix header.
#[derive(Debug, Clone, Default)]
pub struct TurtleDocument {
    base: Option<String>,
    sections: Vec<Section>,
}

impl TurtleDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit an `@base` directive after the prefixes.
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    /// Start a new titled section and return it for filling.
    pub fn section(&mut self, title: impl Into<String>) -> &mut Section {
        self.sections.push(Section { title: Some(title.into()), triples: Vec::new() });
        let last = self.sections.len() - 1;
        &mut self.sections[last]
    }

    /// Start a new section without a banner.
    pub fn body(&mut self) -> &mut Section {
        self.sections.push(Section::default());
        let last = self.sections.len() - 1;
        &mut self.sections[last]
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn triples(&self) -> impl Iterator<Item = &Triple> {
        self.sections.iter().flat_map(|s| s.triples.iter())
    }

    pub fn len(&self) -> usize {
        self.sections.iter().map(|s| s.triples.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render the whole document.
    pub fn to_turtle(&self) -> String {
        let mut out = String::new();

        for (name, iri) in PREFIXES {
            let label = format!("{}:", name);
            out.push_str(&format!("@prefix {:<6} <{}> .\n", label, iri));
        }
        if let Some(base) = &self.base {
            out.push_str(&format!("@base {:<7}<{}> .\n", "", base));
        }

        for section in &self.sections {
            out.push('\n');
            if let Some(title) = &section.title {
                out.push_str(BANNER);
                out.push_str("\n#    ");
                out.push_str(title);
                out.push('\n');
                out.push_str(BANNER);
                out.push_str("\n\n");
            }
            write_section(&mut out, &section.triples);
        }

        out
    }
}

struct Block<'a> {
    subject: &'a Subject,
    predicates: Vec<(NamedNodeRef<'a>, Vec<&'a Term>)>,
}

fn write_section(out: &mut String, triples: &[Triple]) {
    let mut blocks: Vec<Block<'_>> = Vec::new();
    let mut index: HashMap<&Subject, usize> = HashMap::new();

    for triple in triples {
        let idx = *index.entry(&triple.subject).or_insert_with(|| {
            blocks.push(Block { subject: &triple.subject, predicates: Vec::new() });
            blocks.len() - 1
        });
        let block = &mut blocks[idx];
        let predicate = triple.predicate.as_ref();
        match block.predicates.iter_mut().find(|(p, _)| *p == predicate) {
            Some((_, objects)) => {
                if !objects.contains(&&triple.object) {
                    objects.push(&triple.object);
                }
            }
            None => block.predicates.push((predicate, vec![&triple.object])),
        }
    }

    for block in &blocks {
        write_block(out, block);
    }
}

fn write_block(out: &mut String, block: &Block<'_>) {
    let subject = render_subject(block.subject);

    if let [(predicate, objects)] = block.predicates.as_slice() {
        if objects.len() == 1 {
            out.push_str(&format!("{} {} {} .\n", subject, render_iri(*predicate), render_term(objects[0])));
            return;
        }
    }

    let rendered: Vec<(String, String)> = block
        .predicates
        .iter()
        .map(|(p, objects)| {
            let objects: Vec<String> = objects.iter().map(|o| render_term(o)).collect();
            (render_iri(*p), objects.join(" , "))
        })
        .collect();
    let width = rendered.iter().map(|(p, _)| p.len()).max().unwrap_or(0);

    out.push_str(&subject);
    out.push('\n');
    let last = rendered.len().saturating_sub(1);
    for (i, (predicate, objects)) in rendered.iter().enumerate() {
        let end = if i == last { " ." } else { " ;" };
        out.push_str(&format!("    {:<width$} {}{}\n", predicate, objects, end, width = width));
    }
}

fn render_subject(subject: &Subject) -> String {
    match subject {
        Subject::NamedNode(node) => render_iri(node.as_ref()),
        Subject::BlankNode(node) => format!("_:{}", node.as_str()),
        #[allow(unreachable_patterns)]
        other => other.to_string(),
    }
}

fn render_term(term: &Term) -> String {
    match term {
        Term::NamedNode(node) => render_iri(node.as_ref()),
        Term::BlankNode(node) => format!("_:{}", node.as_str()),
        Term::Literal(literal) => render_literal(literal),
        #[allow(unreachable_patterns)]
        other => other.to_string(),
    }
}

/// Prefixed name when a declared prefix covers the IRI and the remainder is
/// a legal local part, `<iri>` otherwise.
pub fn render_iri(node: NamedNodeRef<'_>) -> String {
    let iri = node.as_str();
    for (name, namespace) in PREFIXES {
        if let Some(local) = iri.strip_prefix(namespace) {
            if PN_LOCAL.is_match(local) {
                return format!("{}:{}", name, local);
            }
        }
    }
    format!("<{}>", iri)
}

fn render_literal(literal: &Literal) -> String {
    let value = escape_literal(literal.value());
    if let Some(lang) = literal.language() {
        format!("\"{}\"@{}", value, lang)
    } else if literal.datatype() == XSD_STRING {
        format!("\"{}\"", value)
    } else {
        format!("\"{}\"^^{}", value, render_iri(literal.datatype()))
    }
}

/// Escape text for a double-quoted Turtle string.
pub fn escape_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out
}
