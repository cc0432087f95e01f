/**
 * assemble module
 * JSON records -> staged fragments -> merged ontology
 *
 * - find_json_files: recursive, sorted discovery of record files
 * - Assembler::convert_file: one record to one fragment
 * - Assembler::process_directory: batch build with staging and merge
 * - merge: fragment union (partial-failure tolerant)
 */

mod merge;

pub use merge::{find_fragments, merge_fragments, MergeReport};

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, info_span, warn};
use walkdir::WalkDir;

use crate::errors::{OsmtError, Result};
use crate::iri::LocalName;
use crate::mapper::SkillMapper;

/// Staging directory name, created under the TTL output directory.
pub const STAGING_DIR: &str = ".partials";

/// Outcome of a batch build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Staged fragment per converted record.
    pub converted: Vec<PathBuf>,
    /// JSON files that are not skill records.
    pub skipped: Vec<PathBuf>,
    /// Records that could not be decoded or written, with the reason.
    pub failed: Vec<(PathBuf, String)>,
    pub merge: MergeReport,
}

/// All `*.json` files below `root`, sorted by path.
pub fn find_json_files(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(OsmtError::FileNotFound(format!("Root directory not found: {}", root.display())));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().map(|p| p.display().to_string()).unwrap_or_default();
                warn!(path = %path, error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if entry.file_type().is_file() && entry.path().extension().is_some_and(|ext| ext == "json") {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

pub struct Assembler {
    mapper: SkillMapper,
    keep_fragments: bool,
}

impl Assembler {
    pub fn new(mapper: SkillMapper) -> Self {
        Self {
            mapper,
            keep_fragments: false,
        }
    }

    /// Keep the staging directory after a successful merge.
    pub fn keep_fragments(mut self, keep: bool) -> Self {
        self.keep_fragments = keep;
        self
    }

    /// Convert one JSON record file into one Turtle fragment.
    pub fn convert_file(&self, src: &Path, dst: &Path) -> Result<LocalName> {
        let json = fs::read_to_string(src)?;
        let fragment = self.mapper.map_json(&json)?;

        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(dst, fragment.to_turtle())?;

        info!(src = %src.display(), dst = %dst.display(), rsd = %fragment.subject, "converted record");
        Ok(fragment.subject)
    }

    /// Convert every record under `json_root`, merge the fragments into
    /// `merged_path`, then drop the staging directory.
    pub fn process_directory(&self, json_root: &Path, ttl_out: &Path, merged_path: &Path) -> Result<BuildReport> {
        let _span = info_span!("build", root = %json_root.display()).entered();
        let mut report = BuildReport::default();

        let json_files = find_json_files(json_root)?;
        if json_files.is_empty() {
            info!("no JSON files found");
            report.merge = merge_fragments(&[], merged_path)?;
            return Ok(report);
        }
        info!(count = json_files.len(), "found JSON files");

        fs::create_dir_all(ttl_out)?;
        let stage_dir = ttl_out.join(STAGING_DIR);
        if stage_dir.exists() {
            fs::remove_dir_all(&stage_dir)?;
        }
        fs::create_dir_all(&stage_dir)?;

        for json_path in &json_files {
            let dst = staging_path(&stage_dir, json_path);
            match self.convert_file(json_path, &dst) {
                Ok(_) => report.converted.push(dst),
                Err(e) if e.is_not_a_record() => {
                    info!(src = %json_path.display(), "skip non-RSD JSON");
                    report.skipped.push(json_path.clone());
                }
                Err(e) => {
                    warn!(src = %json_path.display(), error = %e, "failed to convert record");
                    report.failed.push((json_path.clone(), e.to_string()));
                }
            }
        }

        report.merge = merge_fragments(&find_fragments(&stage_dir)?, merged_path)?;

        if self.keep_fragments {
            info!(dir = %stage_dir.display(), "keeping staged fragments");
        } else if let Err(e) = fs::remove_dir_all(&stage_dir) {
            warn!(dir = %stage_dir.display(), error = %e, "could not remove staging dir");
        }

        Ok(report)
    }
}

/// `<stage>/<stem>.ttl`, with a numeric suffix when two records share a stem.
fn staging_path(stage_dir: &Path, json_path: &Path) -> PathBuf {
    let stem = json_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "record".to_string());

    let mut candidate = stage_dir.join(format!("{}.ttl", stem));
    let mut n = 2;
    while candidate.exists() {
        candidate = stage_dir.join(format!("{}-{}.ttl", stem, n));
        n += 1;
    }
    if n > 2 {
        warn!(src = %json_path.display(), dst = %candidate.display(), "fragment name already taken");
    }
    candidate
}
