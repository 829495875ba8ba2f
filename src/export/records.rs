use serde::{Deserialize, Serialize};

use crate::roster::{CompetencyLevel, Roster, ScoreIndex};

/// One exported row: a recorded (member, skill) level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRecord {
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "Member")]
    pub member: String,
    #[serde(rename = "Skill")]
    pub skill: String,
    #[serde(rename = "Competency Level")]
    pub competency_level: CompetencyLevel,
}

/// Flatten every recorded score into rows.
///
/// Order follows teams, then members, then each member's scores as they were
/// first recorded. Unscored pairs produce no row.
pub fn flatten(roster: &Roster) -> Vec<ExportRecord> {
    roster
        .teams()
        .iter()
        .flat_map(|team| {
            team.members.iter().flat_map(move |member| {
                member.scores().iter().map(move |score| ExportRecord {
                    team: team.name.clone(),
                    member: member.name.clone(),
                    skill: score.skill.clone(),
                    competency_level: score.level,
                })
            })
        })
        .collect()
}

/// Group rows back into the nested score mapping
pub fn regroup(records: &[ExportRecord]) -> ScoreIndex {
    let mut index = ScoreIndex::new();
    for record in records {
        index
            .entry(record.team.clone())
            .or_default()
            .entry(record.member.clone())
            .or_default()
            .insert(record.skill.clone(), record.competency_level);
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::SkillCategories;

    fn level(n: u8) -> CompetencyLevel {
        CompetencyLevel::new(n).unwrap()
    }

    fn sample_roster() -> Roster {
        let mut roster = Roster::new();
        let defaults = SkillCategories::defaults();
        roster.add_team("Alpha", &defaults).unwrap();
        roster.add_team("Beta", &defaults).unwrap();
        roster.add_members("Alpha", "Ana, Ben, Cleo").unwrap();
        roster.add_members("Beta", "Dev").unwrap();
        roster.set_competency("Alpha", "Ben", "SQL", level(2)).unwrap();
        roster.set_competency("Alpha", "Ana", "Python", level(7)).unwrap();
        roster.set_competency("Alpha", "Ana", "LM", level(0)).unwrap();
        roster.set_competency("Beta", "Dev", "SAFe", level(9)).unwrap();
        roster
    }

    #[test]
    fn test_flatten_order() {
        let rows = flatten(&sample_roster());
        let keys: Vec<(&str, &str, &str)> = rows
            .iter()
            .map(|r| (r.team.as_str(), r.member.as_str(), r.skill.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("Alpha", "Ana", "Python"),
                ("Alpha", "Ana", "LM"),
                ("Alpha", "Ben", "SQL"),
                ("Beta", "Dev", "SAFe"),
            ]
        );
    }

    #[test]
    fn test_flatten_skips_unscored() {
        let rows = flatten(&sample_roster());
        assert!(rows.iter().all(|r| r.member != "Cleo"));
    }

    #[test]
    fn test_flatten_empty() {
        let mut roster = Roster::new();
        roster.add_team("Alpha", &SkillCategories::defaults()).unwrap();
        roster.add_members("Alpha", "Ana").unwrap();
        assert!(flatten(&roster).is_empty());
    }

    #[test]
    fn test_regroup_recovers_scores() {
        let roster = sample_roster();
        assert_eq!(regroup(&flatten(&roster)), roster.score_index());
    }

    #[test]
    fn test_deleted_team_not_exported() {
        let mut roster = sample_roster();
        roster.delete_team("Alpha").unwrap();
        let rows = flatten(&roster);
        assert_eq!(rows.len(), 1);
        assert!(rows.iter().all(|r| r.team != "Alpha"));
    }
}
