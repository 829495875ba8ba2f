use serde::Serialize;

use crate::roster::{CompetencyLevel, Member};

/// Aggregate competency for one skill across the members that scored it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillStats {
    pub skill: String,
    pub min: u8,
    pub max: u8,
    /// Unrounded arithmetic mean
    pub average: f64,
    /// Number of members with a recorded level
    pub contributors: usize,
}

/// Compute per-skill statistics for a category.
///
/// Members without a recorded level for a skill are left out of that skill's
/// statistics. Skills nobody scored are dropped; the rest keep their order.
pub fn aggregate_category(skills: &[String], members: &[Member]) -> Vec<SkillStats> {
    skills
        .iter()
        .filter_map(|skill| {
            let levels: Vec<u8> = members
                .iter()
                .filter_map(|m| m.level(skill))
                .map(CompetencyLevel::value)
                .collect();
            skill_stats(skill, &levels)
        })
        .collect()
}

fn skill_stats(skill: &str, levels: &[u8]) -> Option<SkillStats> {
    let min = *levels.iter().min()?;
    let max = *levels.iter().max()?;
    let sum: u32 = levels.iter().map(|&l| u32::from(l)).sum();
    Some(SkillStats {
        skill: skill.to_string(),
        min,
        max,
        average: f64::from(sum) / levels.len() as f64,
        contributors: levels.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(name: &str, scores: &[(&str, u8)]) -> Member {
        let mut m = Member::new(name);
        for (skill, level) in scores {
            m.set_level(skill, CompetencyLevel::new(*level).unwrap());
        }
        m
    }

    fn skills(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_unscored_member_excluded() {
        let members = vec![member("A", &[("X", 4)]), member("B", &[])];
        let stats = aggregate_category(&skills(&["X"]), &members);

        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].min, 4);
        assert_eq!(stats[0].max, 4);
        assert_eq!(stats[0].average, 4.0);
        assert_eq!(stats[0].contributors, 1);
    }

    #[test]
    fn test_zero_is_a_score() {
        let members = vec![member("A", &[("X", 0)]), member("B", &[("X", 10)])];
        let stats = aggregate_category(&skills(&["X"]), &members);
        assert_eq!(stats[0].min, 0);
        assert_eq!(stats[0].max, 10);
        assert_eq!(stats[0].average, 5.0);
    }

    #[test]
    fn test_min_max_average() {
        let members = vec![
            member("Ana", &[("Python", 7)]),
            member("Ben", &[("Python", 3)]),
        ];
        let stats = aggregate_category(&skills(&["Python"]), &members);
        assert_eq!(stats[0].min, 3);
        assert_eq!(stats[0].max, 7);
        assert_eq!(stats[0].average, 5.0);
    }

    #[test]
    fn test_average_is_unrounded() {
        let members = vec![
            member("A", &[("X", 1)]),
            member("B", &[("X", 2)]),
            member("C", &[("X", 2)]),
        ];
        let stats = aggregate_category(&skills(&["X"]), &members);
        assert_eq!(stats[0].average, 5.0 / 3.0);
    }

    #[test]
    fn test_unscored_skills_dropped_order_kept() {
        let members = vec![member("A", &[("C", 1), ("A", 2)])];
        let stats = aggregate_category(&skills(&["A", "B", "C"]), &members);
        let names: Vec<&str> = stats.iter().map(|s| s.skill.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn test_scores_outside_category_ignored() {
        let members = vec![member("A", &[("Other", 9)])];
        assert!(aggregate_category(&skills(&["X"]), &members).is_empty());
    }

    #[test]
    fn test_empty_inputs() {
        assert!(aggregate_category(&[], &[member("A", &[("X", 1)])]).is_empty());
        assert!(aggregate_category(&skills(&["X"]), &[]).is_empty());
    }
}
