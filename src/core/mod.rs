// Core algorithm exports
pub mod category;
pub mod filters;
pub mod matcher;
pub mod normalize;
pub mod scoring;

pub use category::{classify_skill, SkillCategory};
pub use filters::{matched_skills, skill_keys};
pub use matcher::{Matcher, MatchReport};
pub use normalize::{clean_skill_name, same_skill, skill_key};
pub use scoring::match_percentage;
