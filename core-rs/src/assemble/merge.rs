//! Fragment merge: many per-record Turtle files into one ontology.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{error, info, info_span};

use crate::errors::Result;
use crate::ontology::SkillGraph;

/// Outcome of one merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Fragments that parsed and joined the union.
    pub merged: Vec<PathBuf>,
    /// Fragments left out, with the reason.
    pub failed: Vec<(PathBuf, String)>,
    /// Distinct statements in the union.
    pub triples: usize,
    /// Where the union was written; `None` when nothing parsed.
    pub output: Option<PathBuf>,
}

impl MergeReport {
    pub fn wrote_output(&self) -> bool {
        self.output.is_some()
    }
}

/// `*.ttl` files directly inside `dir`, sorted. A missing directory has no
/// fragments.
pub fn find_fragments(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut out = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "ttl") {
            out.push(path);
        }
    }
    out.sort();
    Ok(out)
}

/// Parse every fragment into one graph and write it to `merged_path`.
///
/// A fragment that fails to parse is reported and left out; the rest still
/// merge. When no fragment parses, nothing is written and a merged file left
/// by an earlier build is removed. Only a failure to write (or remove) the
/// destination is returned as an error.
pub fn merge_fragments(fragments: &[PathBuf], merged_path: &Path) -> Result<MergeReport> {
    let _span = info_span!("merge", dst = %merged_path.display()).entered();
    let mut graph = SkillGraph::new()?;
    let mut report = MergeReport::default();

    for path in fragments {
        match graph.load_file(path) {
            Ok(statements) => {
                info!(src = %path.display(), statements, "merged fragment");
                report.merged.push(path.clone());
            }
            Err(e) => {
                error!(src = %path.display(), error = %e, "failed to parse fragment");
                report.failed.push((path.clone(), e.to_string()));
            }
        }
    }

    if report.merged.is_empty() {
        info!(fragments = fragments.len(), "no fragments to merge; nothing written");
        if merged_path.is_file() {
            fs::remove_file(merged_path)?;
            info!(path = %merged_path.display(), "removed stale merged ontology");
        }
        return Ok(report);
    }

    graph.write_turtle(merged_path)?;
    report.triples = graph.len()?;
    report.output = Some(merged_path.to_path_buf());
    info!(
        merged = report.merged.len(),
        failed = report.failed.len(),
        triples = report.triples,
        "wrote merged ontology"
    );
    Ok(report)
}
