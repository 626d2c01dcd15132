//! SkillMatch - skill tracking and job matching service
//!
//! This library provides the skill-to-job matching engine, the skill editor
//! and the store backends behind the SkillMatch HTTP API.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;
pub mod session;

// Re-export commonly used types
pub use crate::core::{Matcher, MatchReport, skill_key};
pub use models::{JobPosting, MatchResult, PercentageBasis, Skill, UserSkillSet};
pub use session::{SessionContext, SkillEdit, SkillEditor};
