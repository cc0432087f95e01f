// Projection Contract Tests
//
// The CSV layout is consumed by a bulk importer that matches headers
// byte for byte.

use osmt_graph::export::{node_header, NODE_TABLES, REL_HEADER};
use osmt_graph::ontology::REL_SPECS;
use osmt_graph::{export_property_graph, EntityKind};
use std::fs;
use tempfile::TempDir;

/// WHY: Node headers are fixed per label
/// REASON: `:ID`, `:LABEL` and the `:datetime` suffixes are importer syntax
/// BREAKS: Import rejects the file or loads timestamps as strings
#[test]
fn node_headers_are_exact() {
    assert_eq!(
        node_header(EntityKind::SkillDescriptor),
        &[
            ":ID",
            ":LABEL",
            "prefLabel",
            "identifier",
            "status",
            "created:datetime",
            "issued:datetime",
            "modified:datetime"
        ]
    );
    assert_eq!(node_header(EntityKind::Keyword), &[":ID", ":LABEL", "prefLabel"]);
    assert_eq!(node_header(EntityKind::Category), &[":ID", ":LABEL", "prefLabel"]);
    assert_eq!(node_header(EntityKind::Standard), &[":ID", ":LABEL", "prefLabel", "notation"]);
    assert_eq!(node_header(EntityKind::Occupation), &[":ID", ":LABEL", "prefLabel", "code"]);
    assert_eq!(node_header(EntityKind::Collection), &[":ID", ":LABEL", "title", "identifier"]);
    assert_eq!(node_header(EntityKind::Alignment), &[":ID", ":LABEL", "prefLabel", "identifier"]);
    assert_eq!(REL_HEADER, [":START_ID", ":END_ID", ":TYPE"]);
}

/// WHY: Seven node files and seven relationship files, always
/// REASON: The import script lists every file explicitly
/// BREAKS: Import aborts on a missing file even when it would be empty
#[test]
fn every_file_is_written_even_when_empty() {
    let temp = TempDir::new().unwrap();
    let ttl = temp.path().join("skills.ttl");
    fs::write(&ttl, "@prefix : <https://w3id.org/wgu/osmt/skills#> .\n").unwrap();
    let out = temp.path().join("graph");

    let summary = export_property_graph(&ttl, &out, "en").unwrap();
    assert_eq!(summary.total_nodes(), 0);

    for table in NODE_TABLES {
        let body = fs::read_to_string(out.join(table.file_name)).unwrap();
        assert_eq!(body, format!("{}\n", table.header.join(",")));
    }
    for spec in REL_SPECS {
        let body = fs::read_to_string(out.join(spec.file_name)).unwrap();
        assert_eq!(body, ":START_ID,:END_ID,:TYPE\n");
    }
}

/// WHY: Relationship rows only come from correctly typed sources
/// REASON: A stray predicate on an untyped node has no node row to attach to
/// BREAKS: Import fails on unknown start ids
#[test]
fn relationships_require_typed_source() {
    let temp = TempDir::new().unwrap();
    let ttl = temp.path().join("skills.ttl");
    fs::write(
        &ttl,
        "@prefix : <https://w3id.org/wgu/osmt/skills#> .\n\
         :rsd-1 a :RichSkillDescriptor ; :hasKeyword :kw-a .\n\
         :kw-a a :Keyword .\n\
         :stray :hasKeyword :kw-a .\n",
    )
    .unwrap();
    let out = temp.path().join("graph");

    export_property_graph(&ttl, &out, "en").unwrap();
    let rels = fs::read_to_string(out.join("rels_rsd_hasKeyword.csv")).unwrap();
    assert_eq!(rels, ":START_ID,:END_ID,:TYPE\nrsd-1,kw-a,HAS_KEYWORD\n");
}
