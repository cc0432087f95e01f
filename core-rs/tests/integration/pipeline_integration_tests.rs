//! Integration tests for the full skills pipeline
//!
//! JSON records -> build (convert + merge) -> label reports -> property graph.
//! Every test works inside its own TempDir.

use osmt_graph::assemble::STAGING_DIR;
use osmt_graph::ontology::vocab::{CLS_KEYWORD, CLS_RSD, P_HAS_KEYWORD, P_PREF_LABEL};
use osmt_graph::{
    export_property_graph, generate_reports, merge_fragments, Assembler, EntityKind, ReportOptions, SkillGraph,
    SkillMapper,
};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const UUID_0: &str = "00000000-0000-0000-0000-000000000000";
const UUID_1: &str = "00000000-0000-0000-0000-000000000001";

fn shared_refs() -> serde_json::Value {
    json!({
        "collections": [{ "uuid": "col-1", "name": "Shared Collection" }],
        "alignments": [{ "id": "https://example.org/align/foo-bar", "skillName": "Foo Bar" }],
        "occupations": [{
            "code": "15-1252",
            "targetNodeName": "Software Developers",
            "parents": [{ "code": "15-1250" }, { "code": "15-1252" }]
        }]
    })
}

fn record(uuid: &str, name: &str, keywords: &[&str]) -> serde_json::Value {
    let mut value = json!({
        "type": "RichSkillDescriptor",
        "uuid": uuid,
        "id": format!("https://osmt.example.org/api/skills/{}", uuid),
        "skillName": name,
        "skillStatement": format!("Applies {}", name.to_lowercase()),
        "status": "published",
        "creationDate": "2023-01-18T14:02:23Z",
        "keywords": keywords,
    });
    for (k, v) in shared_refs().as_object().unwrap() {
        value[k] = v.clone();
    }
    value
}

fn write_json(dir: &Path, name: &str, value: &serde_json::Value) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

/// Two records sharing satellites, one foreign JSON and one broken file.
fn seed_records(json_root: &Path) {
    fs::create_dir_all(json_root.join("batch")).unwrap();

    for (dir, uuid, name) in [(json_root.to_path_buf(), UUID_0, "Skill 0"), (json_root.join("batch"), UUID_1, "Skill 1")] {
        let mut value = record(uuid, name, &["alpha", "beta"]);
        value["category"] = json!("demo_category");
        value["standards"] = json!(["NICE-ABC-123"]);
        write_json(&dir, &format!("skill-{}.json", &name[6..]), &value);
    }

    write_json(json_root, "collection.json", &json!({ "type": "Collection", "uuid": "col-1" }));
    fs::write(json_root.join("broken.json"), "{ \"type\": ").unwrap();
}

#[test]
fn test_end_to_end_pipeline() {
    let temp = TempDir::new().unwrap();
    let json_root = temp.path().join("raw");
    let ttl_out = temp.path().join("ttl");
    let merged = ttl_out.join("skills.ttl");
    seed_records(&json_root);

    // 1. Build
    let report = Assembler::new(SkillMapper::new())
        .process_directory(&json_root, &ttl_out, &merged)
        .unwrap();

    assert_eq!(report.converted.len(), 2);
    assert_eq!(report.skipped, vec![json_root.join("collection.json")]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, json_root.join("broken.json"));
    assert_eq!(report.merge.merged.len(), 2);
    assert!(report.merge.failed.is_empty());
    assert_eq!(report.merge.output.as_deref(), Some(merged.as_path()));
    assert!(!ttl_out.join(STAGING_DIR).exists(), "staging dir is removed after merge");

    // 2. Merged graph
    let graph = SkillGraph::open(&merged).unwrap();
    assert_eq!(report.merge.triples, graph.len().unwrap());
    assert_eq!(graph.instances_of(CLS_RSD).unwrap().len(), 2);

    let keywords = graph.instances_of(CLS_KEYWORD).unwrap();
    let names: Vec<&str> = keywords.iter().map(|k| osmt_graph::local_name_of(k.as_str())).collect();
    assert_eq!(names, vec!["kw-alpha", "kw-beta"]);
    assert_eq!(graph.resource_pairs(P_HAS_KEYWORD).unwrap().len(), 4);
    for rsd in graph.instances_of(CLS_RSD).unwrap() {
        let label = graph.preferred_label(rsd.as_ref(), P_PREF_LABEL, "en").unwrap().unwrap();
        assert!(label.starts_with("Skill"));
    }

    let merged_text = fs::read_to_string(&merged).unwrap();
    assert!(merged_text.starts_with("@prefix"));
    assert!(merged_text.contains(&format!(":rsd-{}", UUID_0)));

    // 3. Label reports
    let reports = temp.path().join("reports");
    let totals = generate_reports(&merged, &reports, &ReportOptions::default()).unwrap();
    assert_eq!(totals.iter().map(|(_, n)| n).sum::<usize>(), 2 + 1 + 2 + 1);

    assert_eq!(fs::read_to_string(reports.join("rsd-pref-labels.txt")).unwrap(), "Skill 0\nSkill 1\n");
    assert_eq!(fs::read_to_string(reports.join("keyword-labels.txt")).unwrap(), "alpha\nbeta\n");
    assert_eq!(fs::read_to_string(reports.join("bls-labels.txt")).unwrap(), "Software Developers\n");
    assert_eq!(fs::read_to_string(reports.join("alignment-labels.txt")).unwrap(), "Foo Bar\n");

    // 4. Property graph
    let graph_dir = temp.path().join("graph");
    let summary = export_property_graph(&merged, &graph_dir, "en").unwrap();
    assert_eq!(summary.nodes_of(EntityKind::SkillDescriptor), 2);
    assert_eq!(summary.nodes_of(EntityKind::Keyword), 2);
    assert_eq!(summary.nodes_of(EntityKind::Category), 1);
    assert_eq!(summary.nodes_of(EntityKind::Standard), 1);
    assert_eq!(summary.nodes_of(EntityKind::Collection), 1);
    assert_eq!(summary.nodes_of(EntityKind::Alignment), 1);
    assert_eq!(summary.nodes_of(EntityKind::Occupation), 1);
    assert_eq!(summary.relationships_of("HAS_KEYWORD"), 4);
    assert_eq!(summary.relationships_of("HAS_CATEGORY"), 2);
    assert_eq!(summary.relationships_of("HAS_STANDARD"), 2);
    assert_eq!(summary.relationships_of("IN_COLLECTION"), 2);
    assert_eq!(summary.relationships_of("PART_OF"), 1);

    let rsd = fs::read_to_string(graph_dir.join("nodes_rsd.csv")).unwrap();
    let mut lines = rsd.lines();
    assert_eq!(
        lines.next(),
        Some(":ID,:LABEL,prefLabel,identifier,status,created:datetime,issued:datetime,modified:datetime")
    );
    assert_eq!(
        lines.next(),
        Some(format!("rsd-{},RichSkillDescriptor,Skill 0,{},published,2023-01-18T14:02:23Z,,", UUID_0, UUID_0).as_str())
    );

    let part_of = fs::read_to_string(graph_dir.join("rels_occupation_partOf.csv")).unwrap();
    assert_eq!(part_of, ":START_ID,:END_ID,:TYPE\nbls-15-1252,bls-15-1250,PART_OF\n");

    let occupations = fs::read_to_string(graph_dir.join("nodes_occupation.csv")).unwrap();
    assert_eq!(occupations, ":ID,:LABEL,prefLabel,code\nbls-15-1252,Occupation,Software Developers,15-1252\n");
}

#[test]
fn test_rebuild_is_byte_identical() {
    let temp = TempDir::new().unwrap();
    let json_root = temp.path().join("raw");
    seed_records(&json_root);

    let assembler = Assembler::new(SkillMapper::new());
    let first = temp.path().join("a").join("skills.ttl");
    let second = temp.path().join("b").join("skills.ttl");
    assembler.process_directory(&json_root, &temp.path().join("a"), &first).unwrap();
    assembler.process_directory(&json_root, &temp.path().join("b"), &second).unwrap();

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn test_shared_keyword_collapses_to_one_node() {
    let temp = TempDir::new().unwrap();
    let json_root = temp.path().join("raw");
    fs::create_dir_all(&json_root).unwrap();

    let n = 5;
    for i in 0..n {
        let uuid = format!("00000000-0000-0000-0000-00000000001{}", i);
        write_json(&json_root, &format!("r{}.json", i), &record(&uuid, &format!("Skill {}", i), &["shared"]));
    }

    let merged = temp.path().join("ttl").join("skills.ttl");
    let report = Assembler::new(SkillMapper::new())
        .process_directory(&json_root, &temp.path().join("ttl"), &merged)
        .unwrap();
    assert_eq!(report.converted.len(), n);

    let graph_dir = temp.path().join("graph");
    let summary = export_property_graph(&merged, &graph_dir, "en").unwrap();
    assert_eq!(summary.nodes_of(EntityKind::SkillDescriptor), n);
    assert_eq!(summary.nodes_of(EntityKind::Keyword), 1);
    assert_eq!(summary.relationships_of("HAS_KEYWORD"), n);

    let rels = fs::read_to_string(graph_dir.join("rels_rsd_hasKeyword.csv")).unwrap();
    assert_eq!(rels.lines().count(), n + 1);
    assert!(rels.lines().skip(1).all(|l| l.ends_with(",kw-shared,HAS_KEYWORD")));
}

#[test]
fn test_keep_fragments_leaves_staging() {
    let temp = TempDir::new().unwrap();
    let json_root = temp.path().join("raw");
    seed_records(&json_root);
    let ttl_out = temp.path().join("ttl");

    let report = Assembler::new(SkillMapper::new())
        .keep_fragments(true)
        .process_directory(&json_root, &ttl_out, &ttl_out.join("skills.ttl"))
        .unwrap();

    let staged: Vec<_> = fs::read_dir(ttl_out.join(STAGING_DIR)).unwrap().collect();
    assert_eq!(staged.len(), report.converted.len());
}

#[test]
fn test_empty_merge_writes_nothing() {
    let temp = TempDir::new().unwrap();
    let merged = temp.path().join("skills.ttl");

    let report = merge_fragments(&[], &merged).unwrap();
    assert!(!report.wrote_output());
    assert_eq!(report.triples, 0);
    assert!(!merged.exists());
}

#[test]
fn test_directory_without_records() {
    let temp = TempDir::new().unwrap();
    let json_root = temp.path().join("raw");
    fs::create_dir_all(&json_root).unwrap();
    let merged = temp.path().join("ttl").join("skills.ttl");

    let report = Assembler::new(SkillMapper::new())
        .process_directory(&json_root, &temp.path().join("ttl"), &merged)
        .unwrap();
    assert!(report.converted.is_empty());
    assert!(!report.merge.wrote_output());
    assert!(!merged.exists());
}

#[test]
fn test_timestamp_text_survives_merge_and_projection() {
    let temp = TempDir::new().unwrap();
    let json_root = temp.path().join("raw");
    fs::create_dir_all(&json_root).unwrap();
    let stamp = "2022-08-09T19:05:36.510930+00:00";
    let mut value = record(UUID_0, "Skill 0", &["alpha"]);
    value["creationDate"] = json!(stamp);
    write_json(&json_root, "skill.json", &value);

    let merged = temp.path().join("ttl").join("skills.ttl");
    Assembler::new(SkillMapper::new())
        .process_directory(&json_root, &temp.path().join("ttl"), &merged)
        .unwrap();
    assert!(fs::read_to_string(&merged).unwrap().contains(&format!("\"{}\"^^xsd:dateTime", stamp)));

    let graph_dir = temp.path().join("graph");
    export_property_graph(&merged, &graph_dir, "en").unwrap();
    let rsd = fs::read_to_string(graph_dir.join("nodes_rsd.csv")).unwrap();
    assert!(rsd.lines().nth(1).unwrap().contains(&format!(",{},", stamp)), "{}", rsd);
}

#[test]
fn test_rebuild_without_records_removes_merged_ontology() {
    let temp = TempDir::new().unwrap();
    let json_root = temp.path().join("raw");
    let ttl_out = temp.path().join("ttl");
    let merged = ttl_out.join("skills.ttl");
    seed_records(&json_root);

    let assembler = Assembler::new(SkillMapper::new());
    assert!(assembler.process_directory(&json_root, &ttl_out, &merged).unwrap().merge.wrote_output());
    assert!(merged.is_file());

    // Only foreign and broken JSON remain
    fs::remove_file(json_root.join("skill-0.json")).unwrap();
    fs::remove_dir_all(json_root.join("batch")).unwrap();

    let report = assembler.process_directory(&json_root, &ttl_out, &merged).unwrap();
    assert!(report.converted.is_empty());
    assert!(!report.merge.wrote_output());
    assert!(!merged.exists());
    assert!(export_property_graph(&merged, &temp.path().join("graph"), "en").is_err());
}
