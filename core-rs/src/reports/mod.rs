/**
 * reports module
 * Label reports read back from the merged ontology
 *
 * - extract: LabelExtractor (preferred label per instance, distinct, sorted)
 * - clean: keyword label normalization and validity filter
 */

mod clean;
mod extract;

pub use clean::{clean_label, valid_label};
pub use extract::{write_label_report, LabelExtractor, LabelQuery};

use std::fmt;
use std::path::Path;

use tracing::info_span;

use crate::errors::Result;
use crate::ontology::vocab::{CLS_ALIGNMENT, CLS_KEYWORD, CLS_OCCUPATION, CLS_RSD};
use crate::ontology::SkillGraph;

/// The label reports the `validate` stage can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReportKind {
    Alignments,
    Bls,
    Keywords,
    Rsd,
}

impl ReportKind {
    pub const ALL: [ReportKind; 4] = [ReportKind::Alignments, ReportKind::Bls, ReportKind::Keywords, ReportKind::Rsd];

    pub fn file_name(&self) -> &'static str {
        match self {
            ReportKind::Alignments => "alignment-labels.txt",
            ReportKind::Bls => "bls-labels.txt",
            ReportKind::Keywords => "keyword-labels.txt",
            ReportKind::Rsd => "rsd-pref-labels.txt",
        }
    }

    fn query(&self, include_alt: bool) -> LabelQuery {
        match self {
            ReportKind::Alignments => LabelQuery::of(CLS_ALIGNMENT).with_alt(include_alt),
            ReportKind::Bls => LabelQuery::of(CLS_OCCUPATION).with_local_prefix("bls-"),
            ReportKind::Keywords => LabelQuery::of(CLS_KEYWORD),
            ReportKind::Rsd => LabelQuery::of(CLS_RSD),
        }
    }

    /// Extract this report's labels and write them under `out_dir`.
    pub fn generate(&self, extractor: &LabelExtractor<'_>, out_dir: &Path, include_alt: bool) -> Result<usize> {
        let query = self.query(include_alt);
        let labels = match self {
            ReportKind::Keywords => extractor.cleaned_labels(&query)?,
            _ => extractor.labels(&query)?,
        };
        write_label_report(&out_dir.join(self.file_name()), &labels)
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReportKind::Alignments => "alignments",
            ReportKind::Bls => "bls",
            ReportKind::Keywords => "keywords",
            ReportKind::Rsd => "rsd",
        };
        f.write_str(name)
    }
}

/// Options for [`generate_reports`].
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub lang: String,
    pub include_alt: bool,
    /// Empty means every report.
    pub kinds: Vec<ReportKind>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            lang: "en".to_string(),
            include_alt: false,
            kinds: Vec::new(),
        }
    }
}

/// Load `ttl_path` and write the selected reports into `out_dir`. Returns
/// the label count per report, in catalogue order.
pub fn generate_reports(ttl_path: &Path, out_dir: &Path, options: &ReportOptions) -> Result<Vec<(ReportKind, usize)>> {
    let _span = info_span!("validate", ttl = %ttl_path.display()).entered();
    let graph = SkillGraph::open(ttl_path)?;
    let extractor = LabelExtractor::new(&graph, options.lang.clone());

    let mut kinds = if options.kinds.is_empty() {
        ReportKind::ALL.to_vec()
    } else {
        options.kinds.clone()
    };
    kinds.sort();
    kinds.dedup();

    let mut totals = Vec::new();
    for kind in kinds {
        let count = kind.generate(&extractor, out_dir, options.include_alt)?;
        totals.push((kind, count));
    }
    Ok(totals)
}
