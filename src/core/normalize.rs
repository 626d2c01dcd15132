/// Comparison key for a skill name.
///
/// Two names refer to the same skill when their keys are equal: surrounding
/// whitespace is ignored and case is folded with Unicode lowercasing.
#[inline]
pub fn skill_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Case-insensitive skill name equality
#[inline]
pub fn same_skill(a: &str, b: &str) -> bool {
    skill_key(a) == skill_key(b)
}

/// Trim a user-supplied skill name, returning None if nothing is left
pub fn clean_skill_name(name: &str) -> Option<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
