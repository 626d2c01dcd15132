use crate::models::{JobPosting, MatchResult, PercentageBasis};
use crate::core::{
    filters::{matched_skills, skill_keys},
    scoring::match_percentage,
};

/// Output of one matching pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchReport {
    pub matches: Vec<MatchResult>,
    pub total_postings: usize,
}

/// Skill-to-job matcher
///
/// # Pipeline Stages
/// 1. Intersect each posting's required skills with the user's skills
/// 2. Drop postings with no overlap
/// 3. Rank by overlap size, keeping catalog order for ties
///
/// The matcher is pure: no I/O and no shared state, so it is cheap to clone
/// into request handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Matcher {
    basis: PercentageBasis,
}

impl Matcher {
    pub fn new(basis: PercentageBasis) -> Self {
        Self { basis }
    }

    pub fn basis(&self) -> PercentageBasis {
        self.basis
    }

    /// Match a user's skills against a catalog snapshot
    ///
    /// # Arguments
    /// * `user_skills` - The user's skill names, compared case-insensitively
    /// * `postings` - The catalog, in the order ties should be broken
    ///
    /// # Returns
    /// MatchReport with postings sharing at least one skill, most matches first
    pub fn find_matches<I, S>(&self, user_skills: I, postings: &[JobPosting]) -> MatchReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let total_postings = postings.len();
        let user_keys = skill_keys(user_skills);

        let mut matches: Vec<MatchResult> = postings
            .iter()
            .filter_map(|job| {
                let matched = matched_skills(&user_keys, &job.required_skills);
                if matched.is_empty() {
                    return None;
                }

                let match_percentage =
                    match_percentage(matched.len(), job.required_skills.len(), self.basis);

                Some(MatchResult {
                    job: job.clone(),
                    matched_skills: matched,
                    match_percentage,
                })
            })
            .collect();

        // sort_by is stable, so equal counts keep catalog order
        matches.sort_by(|a, b| b.match_count().cmp(&a.match_count()));

        MatchReport {
            matches,
            total_postings,
        }
    }
}
