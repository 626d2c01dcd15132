use serde::{Deserialize, Serialize};
use crate::models::domain::{MatchResult, Skill};

/// Response for the job matches endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobMatchesResponse {
    pub skills: Vec<String>,
    pub matches: Vec<MatchResult>,
    pub total_postings: usize,
}

/// Response listing a user's skills
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillListResponse {
    pub skills: Vec<Skill>,
    pub count: usize,
}

/// Response for add/remove skill calls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillEditResponse {
    pub outcome: String,
    pub skill: Option<Skill>,
    pub skills: Vec<Skill>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl ErrorResponse {
    pub fn new(error: &str, message: impl Into<String>, status_code: u16) -> Self {
        Self {
            error: error.to_string(),
            message: message.into(),
            status_code,
        }
    }
}
