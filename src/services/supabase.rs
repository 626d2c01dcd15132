use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

use super::{JobCatalog, ProfileStore, SkillStore, StoreError};
use crate::core::skill_key;
use crate::models::{JobPosting, Profile, Skill};

/// Supabase REST (PostgREST) client
///
/// Handles all communication with the hosted database including:
/// - Listing and linking a user's skills
/// - Case-insensitive skill entity lookup
/// - Reading the active job catalog
/// - Reading profile rows
pub struct SupabaseClient {
    base_url: String,
    api_key: String,
    client: Client,
}

/// Row of `user_skills` with the embedded `skills` relation
#[derive(Debug, Deserialize)]
struct UserSkillRow {
    skills: Option<Skill>,
}

impl SupabaseClient {
    /// Create a new Supabase client
    pub fn new(base_url: String, api_key: String, timeout_secs: u64) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            base_url,
            api_key,
            client,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url.trim_end_matches('/'), table)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    /// Map non-success statuses to store errors
    async fn check(response: Response, action: &str) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read body".to_string());

        match status {
            StatusCode::CONFLICT => Err(StoreError::Conflict(format!("{}: {}", action, body))),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(StoreError::Unauthorized),
            StatusCode::NOT_FOUND => Err(StoreError::NotFound(format!("{}: {}", action, body))),
            _ => {
                tracing::error!("Supabase {} failed: {} - {}", action, status, body);
                Err(StoreError::Api(format!("Failed to {}: {}", action, status)))
            }
        }
    }

    async fn fetch_rows<T>(&self, url: &str, action: &str) -> Result<Vec<T>, StoreError>
    where
        T: for<'de> Deserialize<'de>,
    {
        tracing::debug!("Supabase GET {}", url);

        let response = self.authorized(self.client.get(url)).send().await?;
        let response = Self::check(response, action).await?;
        let json: Value = response.json().await?;

        serde_json::from_value(json)
            .map_err(|e| StoreError::InvalidResponse(format!("Failed to parse {}: {}", action, e)))
    }
}

/// Build a narrow PostgREST `ilike` pattern for `value`
///
/// `%`, `_` and `\` are escaped. PostgREST reads `*` as `%` with no way to
/// escape it, so each `*` becomes a one-character `_`. Callers re-check the
/// candidates by exact key.
fn like_pattern(value: &str) -> String {
    let mut pattern = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '*' => pattern.push('_'),
            '\\' | '%' | '_' => {
                pattern.push('\\');
                pattern.push(c);
            }
            _ => pattern.push(c),
        }
    }
    pattern
}

#[async_trait]
impl SkillStore for SupabaseClient {
    async fn list_skills(&self, user_id: &str) -> Result<Vec<Skill>, StoreError> {
        let url = format!(
            "{}?select=skill_id,skills(id,name,category,created_at)&user_id=eq.{}&order=created_at.asc",
            self.table_url("user_skills"),
            urlencoding::encode(user_id)
        );

        let rows: Vec<UserSkillRow> = self.fetch_rows(&url, "list skills").await?;

        Ok(rows.into_iter().filter_map(|row| row.skills).collect())
    }

    async fn find_skill_by_name(&self, name: &str) -> Result<Option<Skill>, StoreError> {
        let key = skill_key(name);
        let url = format!(
            "{}?select=id,name,category,created_at&name=ilike.{}",
            self.table_url("skills"),
            urlencoding::encode(&like_pattern(name.trim()))
        );

        let candidates: Vec<Skill> = self.fetch_rows(&url, "look up skill").await?;

        Ok(candidates.into_iter().find(|s| skill_key(&s.name) == key))
    }

    async fn create_skill(&self, name: &str, category: Option<&str>) -> Result<Skill, StoreError> {
        let response = self
            .authorized(self.client.post(self.table_url("skills")))
            .header("Prefer", "return=representation")
            .json(&json!({ "name": name, "category": category }))
            .send()
            .await?;
        let response = Self::check(response, "create skill").await?;

        let mut created: Vec<Skill> = response.json().await?;
        if created.is_empty() {
            return Err(StoreError::InvalidResponse("Empty representation for created skill".into()));
        }

        tracing::debug!("Created skill entity: {}", name);

        Ok(created.swap_remove(0))
    }

    async fn link_skill(&self, user_id: &str, skill_id: &str) -> Result<(), StoreError> {
        let response = self
            .authorized(self.client.post(self.table_url("user_skills")))
            .header("Prefer", "return=minimal")
            .json(&json!({ "user_id": user_id, "skill_id": skill_id }))
            .send()
            .await?;

        match Self::check(response, "link skill").await {
            Ok(_) => Ok(()),
            Err(StoreError::Conflict(_)) => Ok(()),
            Err(e) => Err(e),
        }
    }

    async fn unlink_skill(&self, user_id: &str, skill_id: &str) -> Result<bool, StoreError> {
        let url = format!(
            "{}?user_id=eq.{}&skill_id=eq.{}",
            self.table_url("user_skills"),
            urlencoding::encode(user_id),
            urlencoding::encode(skill_id)
        );

        let response = self
            .authorized(self.client.delete(&url))
            .header("Prefer", "return=representation")
            .send()
            .await?;
        let response = Self::check(response, "unlink skill").await?;

        let deleted: Vec<Value> = response.json().await?;
        Ok(!deleted.is_empty())
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        let url = format!("{}?select=id&limit=1", self.table_url("jobs"));
        let response = self.authorized(self.client.get(&url)).send().await?;
        Ok(response.status().is_success())
    }
}

#[async_trait]
impl JobCatalog for SupabaseClient {
    async fn list_active_jobs(&self) -> Result<Vec<JobPosting>, StoreError> {
        let url = format!(
            "{}?select=*&is_active=eq.true&order=created_at.asc,id.asc",
            self.table_url("jobs")
        );

        let jobs: Vec<JobPosting> = self.fetch_rows(&url, "list jobs").await?;

        tracing::debug!("Fetched {} active jobs", jobs.len());

        Ok(jobs)
    }
}

#[async_trait]
impl ProfileStore for SupabaseClient {
    async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>, StoreError> {
        let url = format!(
            "{}?select=*&id=eq.{}&limit=1",
            self.table_url("profiles"),
            urlencoding::encode(user_id)
        );

        let mut profiles: Vec<Profile> = self.fetch_rows(&url, "fetch profile").await?;
        Ok(profiles.pop())
    }
}
