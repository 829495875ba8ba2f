use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use crate::roster::{Category, Roster};

/// Current on-disk session format version
pub const SESSION_VERSION: u32 = 1;

/// On-disk wrapper around a session's roster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionFile {
    pub version: u32,
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub roster: Roster,
}

/// Get the default session file path (~/.config/skill-radar/session.json)
pub fn get_session_path() -> Result<PathBuf> {
    Ok(crate::config::get_config_dir()?.join("session.json"))
}

/// Load a session's roster from a JSON file
///
/// A missing file is an empty session. An unsupported version is an error.
pub fn load_session(path: &Path) -> Result<Roster> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no session file, starting empty");
        return Ok(Roster::new());
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open session file at {}", path.display()))?;

    let session: SessionFile = serde_json::from_reader(file)
        .with_context(|| format!("Failed to load session from {}", path.display()))?;

    if session.version != SESSION_VERSION {
        anyhow::bail!("Unsupported session file version: {}", session.version);
    }

    check_unique_names(&session.roster)
        .with_context(|| format!("Invalid session file at {}", path.display()))?;

    Ok(session.roster)
}

/// Reject rosters that repeat a team, a member within a team, or a skill
/// within a category. Lookups resolve by name, so repeats would be shadowed.
fn check_unique_names(roster: &Roster) -> Result<()> {
    let mut teams = HashSet::new();
    for team in roster.teams() {
        if !teams.insert(team.name.as_str()) {
            anyhow::bail!("Duplicate team '{}'", team.name);
        }

        let mut members = HashSet::new();
        for member in &team.members {
            if !members.insert(member.name.as_str()) {
                anyhow::bail!("Duplicate member '{}' in team '{}'", member.name, team.name);
            }
        }

        for category in Category::ALL {
            let mut skills = HashSet::new();
            for skill in team.skills.get(category) {
                if !skills.insert(skill.as_str()) {
                    anyhow::bail!(
                        "Duplicate {} skill '{}' in team '{}'",
                        category,
                        skill,
                        team.name
                    );
                }
            }
        }
    }
    Ok(())
}

/// Save a session's roster to a JSON file atomically
///
/// The file is never left half-written. Parent directories are created.
pub fn save_session(path: &Path, roster: &Roster) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let session = SessionFile {
        version: SESSION_VERSION,
        saved_at: Some(Utc::now()),
        roster: roster.clone(),
    };

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, &session).context("Failed to serialize session")?;

    file.commit().context("Failed to save session")?;

    tracing::info!(path = %path.display(), teams = roster.teams().len(), "session saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{CompetencyLevel, SkillCategories};

    #[test]
    fn test_load_missing_file_returns_empty() {
        let dir = tempfile::tempdir().unwrap();
        let roster = load_session(&dir.path().join("missing.json")).unwrap();
        assert!(roster.is_empty());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let mut roster = Roster::new();
        roster.add_team("Alpha", &SkillCategories::defaults()).unwrap();
        roster.add_members("Alpha", "Ana").unwrap();
        roster
            .set_competency("Alpha", "Ana", "SQL", CompetencyLevel::new(6).unwrap())
            .unwrap();

        save_session(&path, &roster).unwrap();
        let loaded = load_session(&path).unwrap();
        assert_eq!(loaded, roster);
    }

    #[test]
    fn test_unsupported_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, r#"{"version": 2, "roster": {"teams": []}}"#).unwrap();

        let err = load_session(&path).unwrap_err();
        assert!(err.to_string().contains("Unsupported session file version: 2"));
    }

    #[test]
    fn test_corrupt_level_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let json = r#"{
            "version": 1,
            "roster": {"teams": [{
                "name": "Alpha",
                "members": [{"name": "Ana", "scores": [{"skill": "SQL", "level": 42}]}],
                "skills": {"technical": ["SQL"]}
            }]}
        }"#;
        fs::write(&path, json).unwrap();

        assert!(load_session(&path).is_err());
    }

    #[test]
    fn test_duplicate_team_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let json = r#"{
            "version": 1,
            "roster": {"teams": [
                {"name": "Alpha", "members": [], "skills": {}},
                {"name": "Alpha", "members": [], "skills": {}}
            ]}
        }"#;
        fs::write(&path, json).unwrap();

        let err = load_session(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Duplicate team 'Alpha'"));
    }

    #[test]
    fn test_duplicate_member_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let json = r#"{
            "version": 1,
            "roster": {"teams": [{
                "name": "Alpha",
                "members": [{"name": "Ana", "scores": []}, {"name": "Ana", "scores": []}],
                "skills": {"technical": ["SQL"]}
            }]}
        }"#;
        fs::write(&path, json).unwrap();

        let err = load_session(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Duplicate member 'Ana' in team 'Alpha'"));
    }
}
