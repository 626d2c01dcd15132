// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{AuthenticatedUser, JobPosting, MatchResult, PercentageBasis, Profile, Skill, UserSkillSet};
pub use requests::{AddSkillRequest, MatchSkillsRequest, NavigationQuery};
pub use responses::{ErrorResponse, HealthResponse, JobMatchesResponse, SkillEditResponse, SkillListResponse};
