use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{JobCatalog, ProfileStore, SkillStore, StoreError};
use crate::core::skill_key;
use crate::models::{JobPosting, Profile, Skill};

/// In-process store for local development and tests
///
/// Mirrors the relational layout of the hosted backend: shared skill
/// entities, per-user links, a job table and profile rows.
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    skills: Vec<Skill>,
    links: HashMap<String, Vec<String>>,
    jobs: Vec<JobPosting>,
    profiles: HashMap<String, Profile>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_jobs(Vec::new())
    }

    pub fn with_jobs(jobs: Vec<JobPosting>) -> Self {
        Self {
            state: RwLock::new(MemoryState {
                jobs,
                ..MemoryState::default()
            }),
        }
    }

    /// Store seeded with the demo job catalog
    pub fn with_demo_catalog() -> Self {
        Self::with_jobs(demo_catalog())
    }

    pub async fn put_profile(&self, profile: Profile) {
        let mut state = self.state.write().await;
        state.profiles.insert(profile.id.clone(), profile);
    }

    /// Number of distinct skill entities across all users
    pub async fn skill_entity_count(&self) -> usize {
        self.state.read().await.skills.len()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SkillStore for MemoryStore {
    async fn list_skills(&self, user_id: &str) -> Result<Vec<Skill>, StoreError> {
        let state = self.state.read().await;
        let linked = match state.links.get(user_id) {
            Some(ids) => ids,
            None => return Ok(Vec::new()),
        };

        Ok(linked
            .iter()
            .filter_map(|id| state.skills.iter().find(|s| &s.id == id).cloned())
            .collect())
    }

    async fn find_skill_by_name(&self, name: &str) -> Result<Option<Skill>, StoreError> {
        let key = skill_key(name);
        let state = self.state.read().await;
        Ok(state.skills.iter().find(|s| skill_key(&s.name) == key).cloned())
    }

    async fn create_skill(&self, name: &str, category: Option<&str>) -> Result<Skill, StoreError> {
        let key = skill_key(name);
        let mut state = self.state.write().await;

        if state.skills.iter().any(|s| skill_key(&s.name) == key) {
            return Err(StoreError::Conflict(format!("skill '{}' already exists", name)));
        }

        let skill = Skill {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            category: category.map(str::to_string),
            created_at: Some(chrono::Utc::now()),
        };
        state.skills.push(skill.clone());

        Ok(skill)
    }

    async fn link_skill(&self, user_id: &str, skill_id: &str) -> Result<(), StoreError> {
        let mut state = self.state.write().await;

        if !state.skills.iter().any(|s| s.id == skill_id) {
            return Err(StoreError::NotFound(format!("skill {}", skill_id)));
        }

        let links = state.links.entry(user_id.to_string()).or_default();
        if !links.iter().any(|id| id == skill_id) {
            links.push(skill_id.to_string());
        }

        Ok(())
    }

    async fn unlink_skill(&self, user_id: &str, skill_id: &str) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;
        let Some(links) = state.links.get_mut(user_id) else {
            return Ok(false);
        };

        let before = links.len();
        links.retain(|id| id != skill_id);
        Ok(links.len() < before)
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}

#[async_trait]
impl JobCatalog for MemoryStore {
    async fn list_active_jobs(&self) -> Result<Vec<JobPosting>, StoreError> {
        let state = self.state.read().await;
        Ok(state.jobs.iter().filter(|j| j.is_active).cloned().collect())
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>, StoreError> {
        Ok(self.state.read().await.profiles.get(user_id).cloned())
    }
}

struct JobTemplate {
    title: &'static str,
    company: &'static str,
    skills: [&'static str; 4],
    salary: &'static str,
    job_type: &'static str,
}

const JOB_TEMPLATES: &[JobTemplate] = &[
    JobTemplate {
        title: "Frontend Developer",
        company: "TechCorp",
        skills: ["React", "JavaScript", "CSS", "HTML"],
        salary: "$70,000 - $90,000",
        job_type: "Full-time",
    },
    JobTemplate {
        title: "Full Stack Developer",
        company: "StartupXYZ",
        skills: ["React", "Node.js", "SQL", "JavaScript"],
        salary: "$80,000 - $110,000",
        job_type: "Full-time",
    },
    JobTemplate {
        title: "Java Developer",
        company: "Enterprise Solutions",
        skills: ["Java", "SQL", "Spring", "Maven"],
        salary: "$85,000 - $120,000",
        job_type: "Full-time",
    },
    JobTemplate {
        title: "Database Administrator",
        company: "DataFlow Inc",
        skills: ["SQL", "PostgreSQL", "MySQL", "Python"],
        salary: "$75,000 - $100,000",
        job_type: "Full-time",
    },
    JobTemplate {
        title: "React Developer",
        company: "Modern Web Co",
        skills: ["React", "TypeScript", "Redux", "GraphQL"],
        salary: "$65,000 - $85,000",
        job_type: "Contract",
    },
    JobTemplate {
        title: "Software Engineer",
        company: "Tech Innovators",
        skills: ["Java", "Python", "SQL", "Docker"],
        salary: "$90,000 - $130,000",
        job_type: "Full-time",
    },
];

const LOCATIONS: &[&str] = &[
    "San Francisco, CA",
    "New York, NY",
    "Austin, TX",
    "Seattle, WA",
    "Remote",
    "Boston, MA",
];

/// The demo job catalog used when no hosted store is configured
pub fn demo_catalog() -> Vec<JobPosting> {
    JOB_TEMPLATES
        .iter()
        .enumerate()
        .map(|(index, template)| JobPosting {
            id: (index + 1).to_string(),
            title: template.title.to_string(),
            company: template.company.to_string(),
            location: LOCATIONS[index % LOCATIONS.len()].to_string(),
            salary_range: Some(template.salary.to_string()),
            job_type: template.job_type.to_string(),
            description: format!(
                "Join {} as a {}. We're looking for someone with experience in {}. \
                 This is a great opportunity to work with cutting-edge technologies and grow your career.",
                template.company,
                template.title,
                template.skills[..3].join(", ")
            ),
            required_skills: template.skills.iter().map(|s| s.to_string()).collect(),
            is_active: true,
            created_at: None,
        })
        .collect()
}
