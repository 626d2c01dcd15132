use serde::{Deserialize, Serialize};
use crate::core::normalize::skill_key;

/// A named technical competency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Skills held by one user, unique under case-insensitive name comparison.
///
/// Insertion order is preserved so listings come back the way the user
/// built them up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UserSkillSet {
    skills: Vec<Skill>,
}

impl UserSkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from a store listing, keeping the first of any duplicates
    pub fn from_skills<I>(skills: I) -> Self
    where
        I: IntoIterator<Item = Skill>,
    {
        let mut set = Self::new();
        for skill in skills {
            set.insert(skill);
        }
        set
    }

    /// Insert a skill. Returns false if an entry with the same name
    /// (ignoring case) is already present or the name is blank.
    pub fn insert(&mut self, skill: Skill) -> bool {
        if skill_key(&skill.name).is_empty() || self.contains(&skill.name) {
            return false;
        }
        self.skills.push(skill);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&Skill> {
        let key = skill_key(name);
        self.skills.iter().find(|s| skill_key(&s.name) == key)
    }

    /// Remove the entry matching `name`, returning it if present
    pub fn remove(&mut self, name: &str) -> Option<Skill> {
        let key = skill_key(name);
        let index = self.skills.iter().position(|s| skill_key(&s.name) == key)?;
        Some(self.skills.remove(index))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().map(|s| s.name.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Skill> {
        self.skills.iter()
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn into_vec(self) -> Vec<Skill> {
        self.skills
    }
}

/// A job opening from the read-only catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(default)]
    pub salary_range: Option<String>,
    pub job_type: String,
    pub description: String,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

fn default_true() -> bool { true }

/// A posting paired with the required skills the user satisfies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub job: JobPosting,
    #[serde(rename = "matchedSkills")]
    pub matched_skills: Vec<String>,
    #[serde(rename = "matchPercentage")]
    pub match_percentage: u8,
}

impl MatchResult {
    pub fn match_count(&self) -> usize {
        self.matched_skills.len()
    }
}

/// User profile row kept alongside the identity provider's account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Verified identity extracted from a bearer token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// How the match percentage denominator is chosen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PercentageBasis {
    /// Each posting's own required-skill count
    #[default]
    RequiredSkills,
    /// The same constant for every posting
    Fixed(u32),
}
