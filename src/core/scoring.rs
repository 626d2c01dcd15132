use crate::models::PercentageBasis;

/// Calculate the match percentage (0-100) for a posting
///
/// percentage = round(matched / denominator * 100)
///
/// The denominator is the posting's required-skill count or a fixed
/// constant, depending on `basis`. A zero denominator scores 0.
#[inline]
pub fn match_percentage(matched: usize, required: usize, basis: PercentageBasis) -> u8 {
    let denominator = match basis {
        PercentageBasis::RequiredSkills => required as f64,
        PercentageBasis::Fixed(n) => n as f64,
    };

    if denominator <= 0.0 {
        return 0;
    }

    let percentage = (matched as f64 / denominator * 100.0).round();
    percentage.clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_skills_basis() {
        assert_eq!(match_percentage(2, 4, PercentageBasis::RequiredSkills), 50);
        assert_eq!(match_percentage(1, 3, PercentageBasis::RequiredSkills), 33);
        assert_eq!(match_percentage(2, 3, PercentageBasis::RequiredSkills), 67);
        assert_eq!(match_percentage(3, 3, PercentageBasis::RequiredSkills), 100);
    }

    #[test]
    fn test_fixed_basis_ignores_required_count() {
        assert_eq!(match_percentage(3, 3, PercentageBasis::Fixed(4)), 75);
        assert_eq!(match_percentage(1, 10, PercentageBasis::Fixed(4)), 25);
    }

    #[test]
    fn test_zero_denominator() {
        assert_eq!(match_percentage(0, 0, PercentageBasis::RequiredSkills), 0);
        assert_eq!(match_percentage(2, 4, PercentageBasis::Fixed(0)), 0);
    }

    #[test]
    fn test_clamped_to_hundred() {
        assert_eq!(match_percentage(6, 6, PercentageBasis::Fixed(4)), 100);
    }
}
