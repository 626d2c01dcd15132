use serde::{Deserialize, Serialize};

use super::SessionState;

pub const BRAND: &str = "SkillMatch AI";

const PUBLIC_LINKS: &[(&str, &str)] = &[("/", "Home"), ("/skills", "Skills"), ("/jobs", "Jobs")];
const MEMBER_LINKS: &[(&str, &str)] = &[("/profile", "Profile")];
const GUEST_ACTIONS: &[(&str, &str)] = &[("/login", "Login"), ("/signup", "Sign Up")];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    pub path: String,
    pub label: String,
    pub active: bool,
}

/// Right-hand side of the navigation bar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AccountArea {
    Guest { actions: Vec<NavLink> },
    Member { display_name: String, logout_path: String },
}

/// What the navigation bar should show for a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavDescriptor {
    pub brand: String,
    pub links: Vec<NavLink>,
    pub account: AccountArea,
}

fn links<'a>(entries: &'a [(&'a str, &'a str)], current_path: &str) -> impl Iterator<Item = NavLink> + 'a {
    let current_path = current_path.to_string();
    entries.iter().map(move |(path, label)| NavLink {
        path: path.to_string(),
        label: label.to_string(),
        active: *path == current_path,
    })
}

/// Build the navigation descriptor for a session state and current path
pub fn navigation(state: &SessionState, current_path: &str) -> NavDescriptor {
    let mut nav_links: Vec<NavLink> = links(PUBLIC_LINKS, current_path).collect();

    let account = match state {
        SessionState::Anonymous => AccountArea::Guest {
            actions: links(GUEST_ACTIONS, current_path).collect(),
        },
        SessionState::Authenticated { display_name, .. } => {
            nav_links.extend(links(MEMBER_LINKS, current_path));
            AccountArea::Member {
                display_name: display_name.clone(),
                logout_path: "/logout".to_string(),
            }
        }
    };

    NavDescriptor {
        brand: BRAND.to_string(),
        links: nav_links,
        account,
    }
}
