//! Bulk-import table layouts.

use crate::iri::EntityKind;

/// Header shared by every relationship file.
pub const REL_HEADER: [&str; 3] = [":START_ID", ":END_ID", ":TYPE"];

/// One node file: which entities go in it and its column header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeTable {
    pub kind: EntityKind,
    pub file_name: &'static str,
    pub header: &'static [&'static str],
}

pub const NODE_TABLES: [NodeTable; 7] = [
    NodeTable {
        kind: EntityKind::SkillDescriptor,
        file_name: "nodes_rsd.csv",
        header: &[
            ":ID",
            ":LABEL",
            "prefLabel",
            "identifier",
            "status",
            "created:datetime",
            "issued:datetime",
            "modified:datetime",
        ],
    },
    NodeTable {
        kind: EntityKind::Keyword,
        file_name: "nodes_keyword.csv",
        header: &[":ID", ":LABEL", "prefLabel"],
    },
    NodeTable {
        kind: EntityKind::Category,
        file_name: "nodes_category.csv",
        header: &[":ID", ":LABEL", "prefLabel"],
    },
    NodeTable {
        kind: EntityKind::Standard,
        file_name: "nodes_standard.csv",
        header: &[":ID", ":LABEL", "prefLabel", "notation"],
    },
    NodeTable {
        kind: EntityKind::Occupation,
        file_name: "nodes_occupation.csv",
        header: &[":ID", ":LABEL", "prefLabel", "code"],
    },
    NodeTable {
        kind: EntityKind::Collection,
        file_name: "nodes_collection.csv",
        header: &[":ID", ":LABEL", "title", "identifier"],
    },
    NodeTable {
        kind: EntityKind::Alignment,
        file_name: "nodes_alignment.csv",
        header: &[":ID", ":LABEL", "prefLabel", "identifier"],
    },
];
