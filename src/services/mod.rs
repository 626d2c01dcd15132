// Service exports
pub mod auth;
pub mod cache;
pub mod memory;
pub mod postgres;
pub mod supabase;

pub use auth::{AuthError, JwtVerifier};
pub use cache::CatalogCache;
pub use memory::{demo_catalog, MemoryStore};
pub use postgres::PostgresStore;
pub use supabase::SupabaseClient;

use async_trait::async_trait;
use thiserror::Error;

use crate::core::{classify_skill, skill_key};
use crate::models::{JobPosting, Profile, Skill};

/// Errors that can occur when talking to a backing store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("API returned error: {0}")]
    Api(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: store rejected credentials")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Persistence of skills and user-skill associations
///
/// Skill entities are shared between users; a user's skill list is the set
/// of entities linked to them. Name lookups ignore case so that "java" and
/// "Java" resolve to one entity.
#[async_trait]
pub trait SkillStore: Send + Sync {
    /// Skills linked to a user
    async fn list_skills(&self, user_id: &str) -> Result<Vec<Skill>, StoreError>;

    /// Case-insensitive lookup of a skill entity by name
    async fn find_skill_by_name(&self, name: &str) -> Result<Option<Skill>, StoreError>;

    /// Create a new skill entity. Fails with `Conflict` if the name exists.
    async fn create_skill(&self, name: &str, category: Option<&str>) -> Result<Skill, StoreError>;

    /// Link a skill to a user. Linking twice is not an error.
    async fn link_skill(&self, user_id: &str, skill_id: &str) -> Result<(), StoreError>;

    /// Unlink a skill from a user, returning whether a link was removed
    async fn unlink_skill(&self, user_id: &str, skill_id: &str) -> Result<bool, StoreError>;

    async fn health_check(&self) -> Result<bool, StoreError>;

    /// Resolve the canonical skill for `name` (creating it if needed) and
    /// link it to the user
    async fn add_skill(&self, user_id: &str, name: &str) -> Result<Skill, StoreError> {
        let skill = match self.find_skill_by_name(name).await? {
            Some(existing) => existing,
            None => {
                let category = classify_skill(name);
                match self.create_skill(name, Some(category.as_str())).await {
                    Ok(created) => created,
                    // Another writer created it between lookup and insert
                    Err(StoreError::Conflict(_)) => self
                        .find_skill_by_name(name)
                        .await?
                        .ok_or_else(|| StoreError::NotFound(format!("skill {}", skill_key(name))))?,
                    Err(e) => return Err(e),
                }
            }
        };

        self.link_skill(user_id, &skill.id).await?;

        tracing::debug!("Linked skill {} ({}) to user {}", skill.name, skill.id, user_id);

        Ok(skill)
    }

    async fn remove_skill(&self, user_id: &str, skill_id: &str) -> Result<(), StoreError> {
        if !self.unlink_skill(user_id, skill_id).await? {
            tracing::debug!("Skill {} was not linked to user {}", skill_id, user_id);
        }
        Ok(())
    }
}

/// Read-only source of job postings
#[async_trait]
pub trait JobCatalog: Send + Sync {
    /// Active postings in stable catalog order
    async fn list_active_jobs(&self) -> Result<Vec<JobPosting>, StoreError>;
}

/// Lookup of user profile rows
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>, StoreError>;
}

/// A backend implementing every store concern
pub trait Backend: SkillStore + JobCatalog + ProfileStore {}

impl<T: SkillStore + JobCatalog + ProfileStore> Backend for T {}

/// One backend viewed through each store trait
#[derive(Clone)]
pub struct Stores {
    pub skills: std::sync::Arc<dyn SkillStore>,
    pub catalog: std::sync::Arc<dyn JobCatalog>,
    pub profiles: std::sync::Arc<dyn ProfileStore>,
}

impl Stores {
    pub fn from_backend<T: Backend + 'static>(backend: std::sync::Arc<T>) -> Self {
        Self {
            skills: backend.clone(),
            catalog: backend.clone(),
            profiles: backend,
        }
    }
}
