use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;

use super::{JobCatalog, ProfileStore, SkillStore, StoreError};
use crate::models::{JobPosting, Profile, Skill};

/// Unique-violation SQLSTATE
const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL-backed store for deployments that own their database
///
/// Uses the same tables as the hosted backend (`skills`, `user_skills`,
/// `jobs`, `profiles`). Schema comes from the bundled migrations.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new store from a connection string and run migrations
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new store from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }
}

fn skill_from_row(row: &PgRow) -> Skill {
    Skill {
        id: row.get("id"),
        name: row.get("name"),
        category: row.get("category"),
        created_at: row.get("created_at"),
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.code().as_deref() == Some(UNIQUE_VIOLATION),
        _ => false,
    }
}

#[async_trait]
impl SkillStore for PostgresStore {
    async fn list_skills(&self, user_id: &str) -> Result<Vec<Skill>, StoreError> {
        let query = r#"
            SELECT s.id::text AS id, s.name, s.category, s.created_at
            FROM user_skills us
            JOIN skills s ON s.id = us.skill_id
            WHERE us.user_id = $1
            ORDER BY us.created_at ASC, s.name ASC
        "#;

        let rows = sqlx::query(query).bind(user_id).fetch_all(&self.pool).await?;

        tracing::debug!("User {} has {} skills", user_id, rows.len());

        Ok(rows.iter().map(skill_from_row).collect())
    }

    async fn find_skill_by_name(&self, name: &str) -> Result<Option<Skill>, StoreError> {
        let query = r#"
            SELECT id::text AS id, name, category, created_at
            FROM skills
            WHERE lower(name) = lower($1)
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(name.trim())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(skill_from_row))
    }

    async fn create_skill(&self, name: &str, category: Option<&str>) -> Result<Skill, StoreError> {
        let query = r#"
            INSERT INTO skills (name, category)
            VALUES ($1, $2)
            RETURNING id::text AS id, name, category, created_at
        "#;

        let result = sqlx::query(query)
            .bind(name)
            .bind(category)
            .fetch_one(&self.pool)
            .await;

        match result {
            Ok(row) => Ok(skill_from_row(&row)),
            Err(e) if is_unique_violation(&e) => {
                Err(StoreError::Conflict(format!("skill '{}' already exists", name)))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Uses ON CONFLICT DO NOTHING so relinking is harmless
    async fn link_skill(&self, user_id: &str, skill_id: &str) -> Result<(), StoreError> {
        let query = r#"
            INSERT INTO user_skills (user_id, skill_id)
            VALUES ($1, $2::uuid)
            ON CONFLICT (user_id, skill_id) DO NOTHING
        "#;

        sqlx::query(query)
            .bind(user_id)
            .bind(skill_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn unlink_skill(&self, user_id: &str, skill_id: &str) -> Result<bool, StoreError> {
        let query = r#"
            DELETE FROM user_skills
            WHERE user_id = $1 AND skill_id = $2::uuid
        "#;

        let result = sqlx::query(query)
            .bind(user_id)
            .bind(skill_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

#[async_trait]
impl JobCatalog for PostgresStore {
    async fn list_active_jobs(&self) -> Result<Vec<JobPosting>, StoreError> {
        let query = r#"
            SELECT id::text AS id, title, company, location, salary_range, job_type,
                   description, required_skills, is_active, created_at
            FROM jobs
            WHERE is_active
            ORDER BY created_at ASC, id ASC
        "#;

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;

        Ok(rows
            .iter()
            .map(|row| JobPosting {
                id: row.get("id"),
                title: row.get("title"),
                company: row.get("company"),
                location: row.get("location"),
                salary_range: row.get("salary_range"),
                job_type: row.get("job_type"),
                description: row.get("description"),
                required_skills: row.get("required_skills"),
                is_active: row.get("is_active"),
                created_at: row.get("created_at"),
            })
            .collect())
    }
}

#[async_trait]
impl ProfileStore for PostgresStore {
    async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>, StoreError> {
        let query = r#"
            SELECT id, full_name, job_title, created_at, updated_at
            FROM profiles
            WHERE id = $1
        "#;

        let row = sqlx::query(query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| Profile {
            id: row.get("id"),
            full_name: row.get("full_name"),
            job_title: row.get("job_title"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }))
    }
}
