use std::collections::HashSet;
use crate::core::normalize::skill_key;

/// Build the lookup set of comparison keys for a user's skills.
/// Blank names are dropped.
pub fn skill_keys<I, S>(skills: I) -> HashSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    skills
        .into_iter()
        .map(|s| skill_key(s.as_ref()))
        .filter(|k| !k.is_empty())
        .collect()
}

/// Required skills present in the user's key set, in the posting's order
#[inline]
pub fn matched_skills(user_keys: &HashSet<String>, required: &[String]) -> Vec<String> {
    if user_keys.is_empty() {
        return Vec::new();
    }

    required
        .iter()
        .filter(|skill| user_keys.contains(&skill_key(skill)))
        .cloned()
        .collect()
}
