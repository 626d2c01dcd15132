//! Explicit per-request session state.
//!
//! Nothing here is global: handlers build a [`SessionContext`] for the
//! authenticated caller and pass it to the editor and matcher.

pub mod editor;
pub mod view;

pub use editor::{SkillEdit, SkillEditor};
pub use view::{navigation, AccountArea, NavDescriptor, NavLink};

use crate::models::{AuthenticatedUser, Profile, UserSkillSet};
use crate::services::{SkillStore, StoreError};

/// The authenticated user and their current skill set
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub user: AuthenticatedUser,
    pub skills: UserSkillSet,
}

impl SessionContext {
    /// Session with an empty skill set
    pub fn new(user: AuthenticatedUser) -> Self {
        Self {
            user,
            skills: UserSkillSet::new(),
        }
    }

    /// Session with the user's skills loaded from the store
    pub async fn load(user: AuthenticatedUser, store: &dyn SkillStore) -> Result<Self, StoreError> {
        let mut session = Self::new(user);
        session.refresh(store).await?;
        Ok(session)
    }

    /// Replace the cached skill set with the store's current listing
    pub async fn refresh(&mut self, store: &dyn SkillStore) -> Result<(), StoreError> {
        let skills = store.list_skills(&self.user.id).await?;
        self.skills = UserSkillSet::from_skills(skills);
        Ok(())
    }

    pub fn user_id(&self) -> &str {
        &self.user.id
    }
}

/// Whether a request carries a verified identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated {
        user_id: String,
        display_name: String,
    },
}

impl SessionState {
    /// Authenticated state, naming the user by profile name, then email,
    /// then id
    pub fn authenticated(user: &AuthenticatedUser, profile: Option<&Profile>) -> Self {
        let display_name = profile
            .map(|p| p.full_name.trim())
            .filter(|name| !name.is_empty())
            .or_else(|| user.email.as_deref().map(str::trim).filter(|e| !e.is_empty()))
            .unwrap_or(&user.id)
            .to_string();

        SessionState::Authenticated {
            user_id: user.id.clone(),
            display_name,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated { .. })
    }
}
