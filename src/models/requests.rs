use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to add a skill to the caller's profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddSkillRequest {
    #[validate(length(min = 1, max = 64))]
    pub name: String,
}

/// Request to match an explicit skill list against the active catalog
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchSkillsRequest {
    #[validate(length(max = 100))]
    #[serde(default)]
    pub skills: Vec<String>,
}

/// Query for the navigation descriptor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationQuery {
    #[serde(default = "default_path")]
    pub path: String,
}

fn default_path() -> String {
    "/".to_string()
}
