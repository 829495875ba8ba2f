use thiserror::Error;

/// How an operation failure should be surfaced to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The request was understood but skipped; nothing changed
    Warning,
    /// The request was invalid; nothing changed
    Error,
}

/// Validation failures for roster operations.
///
/// Every failure is detected before mutation, so the roster is unchanged
/// whenever one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    #[error("Please enter a valid {0} name.")]
    EmptyName(&'static str),

    #[error("Team '{0}' already exists.")]
    DuplicateTeam(String),

    #[error("Team '{0}' not found.")]
    TeamNotFound(String),

    #[error("Member '{member}' not found in team '{team}'.")]
    MemberNotFound { team: String, member: String },

    #[error("Skill '{skill}' not found in team '{team}'.")]
    SkillNotFound { team: String, skill: String },

    #[error("No skills added to team '{0}'. Please add skills first.")]
    NoSkills(String),

    #[error("Invalid competency level '{0}': expected a whole number")]
    InvalidLevel(String),

    #[error("Competency level {0} is out of range (0-10)")]
    LevelOutOfRange(i64),
}

impl RosterError {
    pub fn severity(&self) -> Severity {
        match self {
            RosterError::DuplicateTeam(_) | RosterError::NoSkills(_) => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown category '{0}': expected Technical, Domain or Operational")]
pub struct ParseCategoryError(pub String);
