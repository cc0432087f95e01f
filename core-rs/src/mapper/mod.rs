//! Record-to-triples mapping
//!
//! [`SkillMapper`] turns one normalized [`crate::record::SkillRecord`] into a
//! self-contained Turtle [`Fragment`]. Mapping is pure: the same record always
//! yields byte-identical output, and satellite entities shared between
//! records mint the same IRIs, which is how they merge later.

mod fragment;
mod policy;

pub use fragment::{Fragment, SkillMapper};
pub use policy::CreatorPolicy;
