use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::error::RosterError;
use super::names::parse_name_list;
use super::types::{Category, CompetencyLevel, Member, SkillCategories, Team};

/// Nested team -> member -> skill -> level view of every recorded score
pub type ScoreIndex = BTreeMap<String, BTreeMap<String, BTreeMap<String, CompetencyLevel>>>;

/// Result of a bulk add: which names were new and which already existed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddOutcome {
    pub added: Vec<String>,
    pub skipped: Vec<String>,
}

impl SkillCategories {
    /// Skill lists every new team starts with unless configured otherwise
    pub fn defaults() -> Self {
        let owned = |names: &[&str]| names.iter().map(|s| s.to_string()).collect();
        Self {
            technical: owned(&["Databricks", "Python", "NodeJS", "SQL", "Gitlab"]),
            domain: owned(&["LM", "SM", "in vitro", "in vivo", "target"]),
            operational: owned(&["SAFe", "Collab", "Comms", "SNOW", "Monitoring and Tracking"]),
        }
    }
}

/// All teams of one session.
///
/// Every operation validates before it mutates: an `Err` means the roster
/// was left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default)]
    teams: Vec<Team>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Teams in creation order
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    /// Look up a team; surrounding whitespace is ignored as in `add_team`
    pub fn team(&self, name: &str) -> Option<&Team> {
        let name = name.trim();
        self.teams.iter().find(|t| t.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    fn team_mut(&mut self, name: &str) -> Result<&mut Team, RosterError> {
        let name = name.trim();
        self.teams
            .iter_mut()
            .find(|t| t.name == name)
            .ok_or_else(|| RosterError::TeamNotFound(name.to_string()))
    }

    /// Create a team pre-populated with a copy of `defaults`
    pub fn add_team(&mut self, name: &str, defaults: &SkillCategories) -> Result<(), RosterError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RosterError::EmptyName("team"));
        }
        if self.team(name).is_some() {
            return Err(RosterError::DuplicateTeam(name.to_string()));
        }

        self.teams.push(Team::new(name, defaults.clone()));
        tracing::debug!(team = name, "team added");
        Ok(())
    }

    /// Add members from a comma- or newline-separated list
    pub fn add_members(&mut self, team: &str, input: &str) -> Result<AddOutcome, RosterError> {
        let names = parse_name_list(input);
        let team_ref = self.team_mut(team)?;
        if names.is_empty() {
            return Err(RosterError::EmptyName("member"));
        }

        let mut outcome = AddOutcome::default();
        for name in names {
            if team_ref.member(&name).is_some() {
                outcome.skipped.push(name);
            } else {
                team_ref.members.push(Member::new(name.clone()));
                outcome.added.push(name);
            }
        }

        tracing::debug!(team, added = outcome.added.len(), skipped = outcome.skipped.len(), "members added");
        Ok(outcome)
    }

    /// Append skills to one category of a team
    pub fn add_skills(
        &mut self,
        team: &str,
        category: Category,
        input: &str,
    ) -> Result<AddOutcome, RosterError> {
        let names = parse_name_list(input);
        let team_ref = self.team_mut(team)?;
        if names.is_empty() {
            return Err(RosterError::EmptyName("skill"));
        }

        let skills = team_ref.skills.get_mut(category);
        let mut outcome = AddOutcome::default();
        for name in names {
            if skills.contains(&name) {
                outcome.skipped.push(name);
            } else {
                skills.push(name.clone());
                outcome.added.push(name);
            }
        }

        tracing::debug!(team, %category, added = outcome.added.len(), "skills added");
        Ok(outcome)
    }

    /// Record a member's level for a skill, returning the level it replaced
    pub fn set_competency(
        &mut self,
        team: &str,
        member: &str,
        skill: &str,
        level: CompetencyLevel,
    ) -> Result<Option<CompetencyLevel>, RosterError> {
        let team_ref = self.team_mut(team)?;
        if team_ref.skills.is_empty() {
            tracing::warn!(team, "competency assignment skipped: team has no skills");
            return Err(RosterError::NoSkills(team.to_string()));
        }
        if !team_ref.skills.contains(skill) {
            return Err(RosterError::SkillNotFound {
                team: team.to_string(),
                skill: skill.to_string(),
            });
        }
        let member_ref = team_ref
            .member_mut(member)
            .ok_or_else(|| RosterError::MemberNotFound {
                team: team.to_string(),
                member: member.to_string(),
            })?;

        let previous = member_ref.set_level(skill, level);
        tracing::debug!(team, member, skill, level = level.value(), "competency set");
        Ok(previous)
    }

    /// Return a (member, skill) pair to the unscored state
    pub fn clear_competency(
        &mut self,
        team: &str,
        member: &str,
        skill: &str,
    ) -> Result<Option<CompetencyLevel>, RosterError> {
        let team_ref = self.team_mut(team)?;
        let member_ref = team_ref
            .member_mut(member)
            .ok_or_else(|| RosterError::MemberNotFound {
                team: team.to_string(),
                member: member.to_string(),
            })?;

        let removed = member_ref.clear_level(skill);
        tracing::debug!(team, member, skill, removed = removed.is_some(), "competency cleared");
        Ok(removed)
    }

    /// Remove a team together with its members, skills and scores
    pub fn delete_team(&mut self, name: &str) -> Result<Team, RosterError> {
        let name = name.trim();
        let pos = self
            .teams
            .iter()
            .position(|t| t.name == name)
            .ok_or_else(|| RosterError::TeamNotFound(name.to_string()))?;

        let removed = self.teams.remove(pos);
        tracing::debug!(team = name, "team deleted");
        Ok(removed)
    }

    /// Every recorded score, keyed by team, member and skill
    pub fn score_index(&self) -> ScoreIndex {
        let mut index = ScoreIndex::new();
        for team in &self.teams {
            for member in &team.members {
                if member.scores().is_empty() {
                    continue;
                }
                let skills = index
                    .entry(team.name.clone())
                    .or_default()
                    .entry(member.name.clone())
                    .or_default();
                for score in member.scores() {
                    skills.insert(score.skill.clone(), score.level);
                }
            }
        }
        index
    }
}
