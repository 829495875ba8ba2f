use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::export::DEFAULT_EXPORT_FILE;
use crate::roster::SkillCategories;

/// Application configuration.
///
/// Example YAML:
/// ```yaml
/// export_path: exports/team_data.csv
/// theme: dark
/// default_skills:
///   technical: [Rust, Python, SQL]
///   domain: [Pricing, Risk]
///   operational: [On-call, Comms]
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Skill lists copied into every new team
    #[serde(default = "SkillCategories::defaults")]
    pub default_skills: SkillCategories,

    /// Session file location (default: ~/.config/skill-radar/session.json)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_path: Option<PathBuf>,

    /// Where `export` writes the CSV file when no path is given
    #[serde(default = "default_export_path")]
    pub export_path: PathBuf,

    /// TUI color theme
    #[serde(default)]
    pub theme: ThemeMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_skills: SkillCategories::defaults(),
            session_path: None,
            export_path: default_export_path(),
            theme: ThemeMode::default(),
        }
    }
}

fn default_export_path() -> PathBuf {
    PathBuf::from(DEFAULT_EXPORT_FILE)
}

/// Theme selection; `auto` probes the terminal background
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Auto,
    Dark,
    Light,
}
