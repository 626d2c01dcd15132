use dashmap::DashMap;
use std::sync::{Arc, Weak};
use tokio::sync::Mutex;

use super::SessionContext;
use crate::core::clean_skill_name;
use crate::models::Skill;
use crate::services::{SkillStore, StoreError};

/// Outcome of an editor call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkillEdit {
    Added(Skill),
    Removed(Skill),
    Unchanged,
}

impl SkillEdit {
    pub fn label(&self) -> &'static str {
        match self {
            SkillEdit::Added(_) => "added",
            SkillEdit::Removed(_) => "removed",
            SkillEdit::Unchanged => "unchanged",
        }
    }

    pub fn skill(&self) -> Option<&Skill> {
        match self {
            SkillEdit::Added(skill) | SkillEdit::Removed(skill) => Some(skill),
            SkillEdit::Unchanged => None,
        }
    }
}

/// Adds and removes skills on a user's profile
///
/// Mutations for the same user are serialized through a per-user lock.
/// Under the lock the session is refreshed from the store before deciding,
/// so two racing adds of "Java" and "java" produce one link.
///
/// The registry holds weak handles: a lock stays registered for as long as
/// any caller holds or waits on it, and released entries are pruned once the
/// registry grows past `prune_threshold`.
pub struct SkillEditor {
    store: Arc<dyn SkillStore>,
    locks: DashMap<String, Weak<Mutex<()>>>,
    prune_threshold: usize,
}

impl SkillEditor {
    pub fn new(store: Arc<dyn SkillStore>, prune_threshold: usize) -> Self {
        Self {
            store,
            locks: DashMap::new(),
            prune_threshold: prune_threshold.max(1),
        }
    }

    pub fn store(&self) -> &Arc<dyn SkillStore> {
        &self.store
    }

    fn user_lock(&self, user_id: &str) -> Arc<Mutex<()>> {
        if self.locks.len() > self.prune_threshold {
            self.locks.retain(|_, lock| lock.strong_count() > 0);
            tracing::trace!("Pruned editor locks, {} still in use", self.locks.len());
        }

        let mut entry = self.locks.entry(user_id.to_string()).or_default();
        if let Some(lock) = entry.upgrade() {
            return lock;
        }

        let lock = Arc::new(Mutex::new(()));
        *entry = Arc::downgrade(&lock);
        lock
    }

    /// Number of registered per-user locks, including released ones not yet pruned
    pub fn registered_locks(&self) -> usize {
        self.locks.len()
    }

    /// Add a skill by name
    ///
    /// No-op when the trimmed name is empty or the user already has the
    /// skill under any casing. Otherwise the store resolves the canonical
    /// skill entity before linking it.
    pub async fn add_skill(
        &self,
        session: &mut SessionContext,
        name: &str,
    ) -> Result<SkillEdit, StoreError> {
        let Some(name) = clean_skill_name(name) else {
            return Ok(SkillEdit::Unchanged);
        };

        let lock = self.user_lock(session.user_id());
        let _guard = lock.lock().await;

        session.refresh(self.store.as_ref()).await?;

        if session.skills.contains(name) {
            tracing::debug!("User {} already has skill {}", session.user_id(), name);
            return Ok(SkillEdit::Unchanged);
        }

        let skill = self.store.add_skill(session.user_id(), name).await?;
        session.skills.insert(skill.clone());

        tracing::info!("Added skill {} for user {}", skill.name, session.user_id());

        Ok(SkillEdit::Added(skill))
    }

    /// Remove a skill by name. No-op when the user does not have it.
    pub async fn remove_skill(
        &self,
        session: &mut SessionContext,
        name: &str,
    ) -> Result<SkillEdit, StoreError> {
        let lock = self.user_lock(session.user_id());
        let _guard = lock.lock().await;

        session.refresh(self.store.as_ref()).await?;

        let Some(skill) = session.skills.get(name).cloned() else {
            return Ok(SkillEdit::Unchanged);
        };

        self.store.remove_skill(session.user_id(), &skill.id).await?;
        session.skills.remove(&skill.name);

        tracing::info!("Removed skill {} for user {}", skill.name, session.user_id());

        Ok(SkillEdit::Removed(skill))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AuthenticatedUser;
    use crate::services::MemoryStore;

    fn session(user_id: &str) -> SessionContext {
        SessionContext::new(AuthenticatedUser {
            id: user_id.to_string(),
            email: None,
            role: None,
        })
    }

    fn editor(store: Arc<MemoryStore>) -> SkillEditor {
        SkillEditor::new(store, 100)
    }

    #[tokio::test]
    async fn test_add_then_duplicate_casing_is_unchanged() {
        let store = Arc::new(MemoryStore::new());
        let editor = editor(store.clone());
        let mut session = session("u1");

        let first = editor.add_skill(&mut session, "Java").await.unwrap();
        assert!(matches!(first, SkillEdit::Added(_)));

        let second = editor.add_skill(&mut session, "java").await.unwrap();
        assert_eq!(second, SkillEdit::Unchanged);
        assert_eq!(session.skills.len(), 1);
        assert_eq!(store.skill_entity_count().await, 1);
    }

    #[tokio::test]
    async fn test_blank_name_is_ignored() {
        let store = Arc::new(MemoryStore::new());
        let editor = editor(store.clone());
        let mut session = session("u1");

        assert_eq!(editor.add_skill(&mut session, "   ").await.unwrap(), SkillEdit::Unchanged);
        assert_eq!(store.skill_entity_count().await, 0);
    }

    #[tokio::test]
    async fn test_added_name_is_trimmed_and_categorized() {
        let store = Arc::new(MemoryStore::new());
        let editor = editor(store);
        let mut session = session("u1");

        let edit = editor.add_skill(&mut session, "  PostgreSQL ").await.unwrap();
        let skill = edit.skill().cloned().unwrap();
        assert_eq!(skill.name, "PostgreSQL");
        assert_eq!(skill.category.as_deref(), Some("database"));
    }

    #[tokio::test]
    async fn test_entities_are_shared_between_users() {
        let store = Arc::new(MemoryStore::new());
        let editor = editor(store.clone());
        let mut alice = session("alice");
        let mut bob = session("bob");

        let a = editor.add_skill(&mut alice, "Docker").await.unwrap();
        let b = editor.add_skill(&mut bob, "docker").await.unwrap();

        assert_eq!(a.skill().map(|s| &s.id), b.skill().map(|s| &s.id));
        assert_eq!(store.skill_entity_count().await, 1);
        assert_eq!(bob.skills.names().collect::<Vec<_>>(), vec!["Docker"]);
    }

    #[tokio::test]
    async fn test_remove_absent_is_unchanged() {
        let store = Arc::new(MemoryStore::new());
        let editor = editor(store);
        let mut session = session("u1");

        assert_eq!(editor.remove_skill(&mut session, "Java").await.unwrap(), SkillEdit::Unchanged);
    }

    #[tokio::test]
    async fn test_remove_keeps_entity_for_other_users() {
        let store = Arc::new(MemoryStore::new());
        let editor = editor(store.clone());
        let mut alice = session("alice");
        let mut bob = session("bob");

        editor.add_skill(&mut alice, "Rust").await.unwrap();
        editor.add_skill(&mut bob, "Rust").await.unwrap();

        let edit = editor.remove_skill(&mut alice, "RUST").await.unwrap();
        assert_eq!(edit.label(), "removed");
        assert!(alice.skills.is_empty());

        bob.refresh(store.as_ref()).await.unwrap();
        assert!(bob.skills.contains("rust"));
        assert_eq!(store.skill_entity_count().await, 1);
    }

    #[tokio::test]
    async fn test_concurrent_adds_for_one_user_link_once() {
        let store = Arc::new(MemoryStore::new());
        let editor = Arc::new(editor(store.clone()));

        let tasks: Vec<_> = ["Kotlin", "kotlin", "KOTLIN", " Kotlin "]
            .into_iter()
            .map(|name| {
                let editor = editor.clone();
                tokio::spawn(async move {
                    let mut session = session("u1");
                    editor.add_skill(&mut session, name).await.unwrap()
                })
            })
            .collect();

        let mut added = 0;
        for task in tasks {
            if matches!(task.await.unwrap(), SkillEdit::Added(_)) {
                added += 1;
            }
        }

        assert_eq!(added, 1);
        assert_eq!(store.list_skills("u1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_adds_stay_serialized_past_prune_threshold() {
        let store = Arc::new(MemoryStore::new());
        let editor = Arc::new(SkillEditor::new(store.clone(), 2));

        for i in 0..50 {
            let mut other = session(&format!("other-{}", i));
            editor.add_skill(&mut other, "Go").await.unwrap();
        }

        let tasks: Vec<_> = (0..8)
            .map(|i| {
                let editor = editor.clone();
                let name = if i % 2 == 0 { "Elixir" } else { "elixir" };
                tokio::spawn(async move {
                    let mut session = session("u1");
                    editor.add_skill(&mut session, name).await.unwrap()
                })
            })
            .collect();

        let mut added = 0;
        for task in tasks {
            if matches!(task.await.unwrap(), SkillEdit::Added(_)) {
                added += 1;
            }
        }

        assert_eq!(added, 1);
        assert_eq!(store.list_skills("u1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_released_locks_are_pruned() {
        let store = Arc::new(MemoryStore::new());
        let editor = SkillEditor::new(store, 4);

        for i in 0..20 {
            let mut session = session(&format!("user-{}", i));
            editor.add_skill(&mut session, "Rust").await.unwrap();
        }

        assert!(editor.registered_locks() <= 5);
    }

    #[test]
    fn test_held_lock_is_shared() {
        let editor = SkillEditor::new(Arc::new(MemoryStore::new()), 1);

        let held = editor.user_lock("u1");
        for i in 0..10 {
            editor.user_lock(&format!("other-{}", i));
        }

        assert!(Arc::ptr_eq(&held, &editor.user_lock("u1")));
    }
}
