use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::{ParseCategoryError, RosterError};

/// Highest competency level a member can hold in a skill
pub const MAX_LEVEL: u8 = 10;

/// One of the three fixed skill groupings every team carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Technical,
    Domain,
    Operational,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 3] = [Category::Technical, Category::Domain, Category::Operational];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Technical => "Technical",
            Category::Domain => "Domain",
            Category::Operational => "Operational",
        }
    }

    /// Next category in display order, wrapping around
    pub fn next(self) -> Self {
        match self {
            Category::Technical => Category::Domain,
            Category::Domain => Category::Operational,
            Category::Operational => Category::Technical,
        }
    }

    /// Previous category in display order, wrapping around
    pub fn previous(self) -> Self {
        match self {
            Category::Technical => Category::Operational,
            Category::Domain => Category::Technical,
            Category::Operational => Category::Domain,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

/// Integer competency rating, always within `0..=10`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct CompetencyLevel(u8);

impl CompetencyLevel {
    pub const MIN: CompetencyLevel = CompetencyLevel(0);
    pub const MAX: CompetencyLevel = CompetencyLevel(MAX_LEVEL);

    pub fn new(value: u8) -> Result<Self, RosterError> {
        if value > MAX_LEVEL {
            return Err(RosterError::LevelOutOfRange(i64::from(value)));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Shift the level by `delta`, clamping to the valid range
    pub fn saturating_add(self, delta: i8) -> Self {
        let shifted = (i16::from(self.0) + i16::from(delta)).clamp(0, i16::from(MAX_LEVEL));
        Self(shifted as u8)
    }
}

impl TryFrom<u8> for CompetencyLevel {
    type Error = RosterError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CompetencyLevel> for u8 {
    fn from(level: CompetencyLevel) -> Self {
        level.0
    }
}

impl FromStr for CompetencyLevel {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s
            .trim()
            .parse()
            .map_err(|_| RosterError::InvalidLevel(s.to_string()))?;
        if !(0..=i64::from(MAX_LEVEL)).contains(&value) {
            return Err(RosterError::LevelOutOfRange(value));
        }
        Ok(Self(value as u8))
    }
}

impl fmt::Display for CompetencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A recorded (skill, level) pair on a member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub skill: String,
    pub level: CompetencyLevel,
}

/// A team member and their sparse skill scores.
///
/// A skill with no entry is unscored, which is different from a level of 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    #[serde(default)]
    scores: Vec<Score>,
}

impl Member {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scores: Vec::new(),
        }
    }

    /// Recorded level for a skill, `None` when unscored
    pub fn level(&self, skill: &str) -> Option<CompetencyLevel> {
        self.scores.iter().find(|s| s.skill == skill).map(|s| s.level)
    }

    /// Record a level, overwriting any previous one. Returns the previous level.
    pub fn set_level(&mut self, skill: &str, level: CompetencyLevel) -> Option<CompetencyLevel> {
        match self.scores.iter_mut().find(|s| s.skill == skill) {
            Some(existing) => Some(std::mem::replace(&mut existing.level, level)),
            None => {
                self.scores.push(Score {
                    skill: skill.to_string(),
                    level,
                });
                None
            }
        }
    }

    /// Remove a recorded level. Returns it if there was one.
    pub fn clear_level(&mut self, skill: &str) -> Option<CompetencyLevel> {
        let pos = self.scores.iter().position(|s| s.skill == skill)?;
        Some(self.scores.remove(pos).level)
    }

    /// Recorded scores in the order they were first set
    pub fn scores(&self) -> &[Score] {
        &self.scores
    }
}

/// Ordered skill lists for each category of a team
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SkillCategories {
    #[serde(default)]
    pub technical: Vec<String>,
    #[serde(default)]
    pub domain: Vec<String>,
    #[serde(default)]
    pub operational: Vec<String>,
}

impl SkillCategories {
    pub fn get(&self, category: Category) -> &[String] {
        match category {
            Category::Technical => &self.technical,
            Category::Domain => &self.domain,
            Category::Operational => &self.operational,
        }
    }

    pub fn get_mut(&mut self, category: Category) -> &mut Vec<String> {
        match category {
            Category::Technical => &mut self.technical,
            Category::Domain => &mut self.domain,
            Category::Operational => &mut self.operational,
        }
    }

    /// True when no category holds any skill
    pub fn is_empty(&self) -> bool {
        Category::ALL.iter().all(|c| self.get(*c).is_empty())
    }

    /// True when `skill` is listed under any category
    pub fn contains(&self, skill: &str) -> bool {
        Category::ALL
            .iter()
            .any(|c| self.get(*c).iter().any(|s| s == skill))
    }

    pub fn total(&self) -> usize {
        Category::ALL.iter().map(|c| self.get(*c).len()).sum()
    }
}

/// A named team with its members and categorized skills
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub skills: SkillCategories,
}

impl Team {
    pub fn new(name: impl Into<String>, skills: SkillCategories) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
            skills,
        }
    }

    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.name == name)
    }

    pub fn member_mut(&mut self, name: &str) -> Option<&mut Member> {
        self.members.iter_mut().find(|m| m.name == name)
    }

    /// Number of recorded (member, skill) scores
    pub fn scored_pairs(&self) -> usize {
        self.members.iter().map(|m| m.scores().len()).sum()
    }
}
