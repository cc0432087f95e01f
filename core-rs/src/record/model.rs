// record/model.rs - raw OSMT JSON shape and its normalized form
//
// The raw structs mirror the JSON the OSMT API serves (camelCase, every field
// optional). `SkillRecord` is what the rest of the crate works with: trimmed
// strings, blank entries dropped, ambiguous members resolved.

use serde::Deserialize;
use serde_json::Value;

use crate::errors::{OsmtError, Result};

/// Discriminator value carried in the `type` field of every skill record.
pub const SKILL_RECORD_TYPE: &str = "RichSkillDescriptor";

/// A JSON scalar that is read as text regardless of its JSON type.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
}

impl Scalar {
    fn to_text(&self) -> String {
        match self {
            Scalar::Text(s) => s.clone(),
            Scalar::Number(n) => n.to_string(),
            Scalar::Flag(b) => b.to_string(),
        }
    }
}

/// A standard is either a bare code or an object exposing the code as `skillName`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawStandard {
    Code(Scalar),
    Object {
        #[serde(rename = "skillName")]
        skill_name: Option<Scalar>,
    },
}

#[derive(Debug, Clone, Deserialize)]
struct RawCollection {
    uuid: Option<Scalar>,
    name: Option<Scalar>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAlignment {
    id: Option<Scalar>,
    skill_name: Option<Scalar>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawParent {
    code: Option<Scalar>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOccupation {
    code: Option<Scalar>,
    target_node_name: Option<Scalar>,
    parents: Option<Vec<Option<RawParent>>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecord {
    uuid: Option<Scalar>,
    id: Option<Scalar>,
    skill_name: Option<Scalar>,
    skill_statement: Option<Scalar>,
    keywords: Option<Vec<Option<Scalar>>>,
    category: Option<Scalar>,
    standards: Option<Vec<Option<RawStandard>>>,
    collections: Option<Vec<Option<RawCollection>>>,
    alignments: Option<Vec<Option<RawAlignment>>>,
    occupations: Option<Vec<Option<RawOccupation>>>,
    creator: Option<Scalar>,
    author: Option<Scalar>,
    status: Option<Scalar>,
    creation_date: Option<Scalar>,
    publish_date: Option<Scalar>,
    update_date: Option<Scalar>,
}

/// Who made the skill. `creator` wins over `author` when both are present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attribution {
    Creator(String),
    Author(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionRef {
    pub uuid: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentRef {
    /// `id`, or `skillName` when the alignment has no id
    pub id: String,
    /// `skillName`, or the id when the alignment has no name
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupationRef {
    pub code: String,
    pub name: String,
    /// Parent codes; never contains `code` itself.
    pub parents: Vec<String>,
}

/// Normalized skill record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SkillRecord {
    /// Primary key: the uuid, or the trailing segment of the source URL.
    pub key: String,
    /// The record's `id` when it was given as a string.
    pub source_id: Option<String>,
    pub name: Option<String>,
    pub statement: Option<String>,
    pub attribution: Option<Attribution>,
    pub status: Option<String>,
    pub created: Option<String>,
    pub issued: Option<String>,
    pub modified: Option<String>,
    pub keywords: Vec<String>,
    pub category: Option<String>,
    pub standards: Vec<String>,
    pub collections: Vec<CollectionRef>,
    pub alignments: Vec<AlignmentRef>,
    pub occupations: Vec<OccupationRef>,
}

/// Decode one record.
///
/// Returns [`OsmtError::Json`] for text that is not JSON or whose fields have
/// impossible shapes, and [`OsmtError::NotASkillRecord`] for well-formed JSON
/// with a missing or foreign `type` discriminator.
pub fn decode_record(json: &str) -> Result<SkillRecord> {
    let value: Value = serde_json::from_str(json)?;

    let found = value.get("type").and_then(Value::as_str);
    if found != Some(SKILL_RECORD_TYPE) {
        return Err(OsmtError::NotASkillRecord { found: found.map(str::to_string) });
    }

    let raw: RawRecord = serde_json::from_value(value)?;
    SkillRecord::from_raw(raw)
}

fn text(field: Option<&Scalar>) -> Option<String> {
    field
        .map(|s| s.to_text().trim().to_string())
        .filter(|s| !s.is_empty())
}

fn flatten<T>(list: Option<Vec<Option<T>>>) -> impl Iterator<Item = T> {
    list.unwrap_or_default().into_iter().flatten()
}

fn trailing_segment(url: &str) -> &str {
    url.trim_end_matches('/').rsplit('/').next().unwrap_or(url)
}

impl SkillRecord {
    fn from_raw(raw: RawRecord) -> Result<Self> {
        let key = text(raw.uuid.as_ref())
            .or_else(|| text(raw.id.as_ref()))
            .map(|k| {
                if k.starts_with("https://") || k.starts_with("http://") {
                    trailing_segment(&k).to_string()
                } else {
                    k
                }
            })
            .filter(|k| !k.is_empty())
            .ok_or(OsmtError::MissingIdentifier)?;

        let source_id = match &raw.id {
            Some(Scalar::Text(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
            _ => None,
        };

        let attribution = text(raw.creator.as_ref())
            .map(Attribution::Creator)
            .or_else(|| text(raw.author.as_ref()).map(Attribution::Author));

        let keywords = flatten(raw.keywords)
            .filter_map(|k| text(Some(&k)))
            .collect();

        let standards = flatten(raw.standards)
            .filter_map(|s| match s {
                RawStandard::Code(code) => text(Some(&code)),
                RawStandard::Object { skill_name } => text(skill_name.as_ref()),
            })
            .collect();

        let collections = flatten(raw.collections)
            .filter_map(|c| {
                let uuid = text(c.uuid.as_ref())?;
                let name = text(c.name.as_ref()).unwrap_or_default();
                Some(CollectionRef { uuid, name })
            })
            .collect();

        let alignments = flatten(raw.alignments)
            .filter_map(|a| {
                let name = text(a.skill_name.as_ref());
                let id = text(a.id.as_ref()).or_else(|| name.clone())?;
                let label = name.unwrap_or_else(|| id.clone());
                Some(AlignmentRef { id, label })
            })
            .collect();

        let occupations = flatten(raw.occupations)
            .filter_map(|o| {
                let code = text(o.code.as_ref())?;
                let name = text(o.target_node_name.as_ref()).unwrap_or_default();
                let mut parents: Vec<String> = Vec::new();
                for parent in flatten(o.parents) {
                    let Some(pcode) = text(parent.code.as_ref()) else {
                        continue;
                    };
                    // a parent equal to the child would be a partOf self-loop
                    if pcode != code && !parents.contains(&pcode) {
                        parents.push(pcode);
                    }
                }
                Some(OccupationRef { code, name, parents })
            })
            .collect();

        Ok(SkillRecord {
            key,
            source_id,
            name: text(raw.skill_name.as_ref()),
            statement: text(raw.skill_statement.as_ref()),
            attribution,
            status: text(raw.status.as_ref()),
            created: text(raw.creation_date.as_ref()),
            issued: text(raw.publish_date.as_ref()),
            modified: text(raw.update_date.as_ref()),
            keywords,
            category: text(raw.category.as_ref()),
            standards,
            collections,
            alignments,
            occupations,
        })
    }
}
