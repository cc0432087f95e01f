//! OSMT skill record decoding
//!
//! Records arrive as loosely typed JSON: every field is optional, list members
//! may be bare strings or objects, and scalars are sometimes numbers. The raw
//! shape is decoded once here and normalized into [`SkillRecord`]; the mapper
//! only ever sees the normalized form.

mod model;

pub use model::{
    decode_record, AlignmentRef, Attribution, CollectionRef, OccupationRef, SkillRecord, SKILL_RECORD_TYPE,
};
