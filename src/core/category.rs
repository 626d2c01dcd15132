use serde::{Deserialize, Serialize};

/// Coarse grouping used to label skills that arrive without a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    Web,
    Database,
    General,
}

impl SkillCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillCategory::Web => "web",
            SkillCategory::Database => "database",
            SkillCategory::General => "general",
        }
    }
}

const WEB_MARKERS: &[&str] = &["react", "vue", "angular"];
const DATABASE_MARKERS: &[&str] = &["sql", "database", "mongo"];

/// Infer a category from substrings of the skill name. Web markers win
/// over database markers.
pub fn classify_skill(name: &str) -> SkillCategory {
    let lower = name.to_lowercase();

    if WEB_MARKERS.iter().any(|m| lower.contains(m)) {
        return SkillCategory::Web;
    }
    if DATABASE_MARKERS.iter().any(|m| lower.contains(m)) {
        return SkillCategory::Database;
    }

    SkillCategory::General
}
