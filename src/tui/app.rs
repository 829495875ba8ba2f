use crate::config::Config;
use crate::roster::{Category, CompetencyLevel, Roster, RosterError, Severity, Team};
use crate::tui::theme::ThemeColors;
use std::path::PathBuf;
use std::time::Instant;

const FLASH_SECS: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTarget {
    Team,
    Members,
    Skills,
}

impl InputTarget {
    pub fn title(&self, category: Category) -> String {
        match self {
            InputTarget::Team => " New Team ".to_string(),
            InputTarget::Members => " Add Members ".to_string(),
            InputTarget::Skills => format!(" Add {} Skills ", category),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    TextInput(InputTarget),
    ConfirmDelete,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Warning,
    Error,
}

impl From<Severity> for FlashKind {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Warning => FlashKind::Warning,
            Severity::Error => FlashKind::Error,
        }
    }
}

pub struct App {
    pub roster: Roster,
    pub session_path: PathBuf,
    pub config: Config,
    pub theme: ThemeColors,
    pub selected_team: usize,
    pub category: Category,
    pub table_state: ratatui::widgets::TableState,
    pub selected_member: usize,
    pub input_mode: InputMode,
    pub input: String,
    pub flash_message: Option<(String, FlashKind, Instant)>,
    pub should_quit: bool,
}

impl App {
    pub fn new(roster: Roster, session_path: PathBuf, config: Config, theme: ThemeColors) -> Self {
        let mut app = Self {
            roster,
            session_path,
            config,
            theme,
            selected_team: 0,
            category: Category::Technical,
            table_state: ratatui::widgets::TableState::default(),
            selected_member: 0,
            input_mode: InputMode::Normal,
            input: String::new(),
            flash_message: None,
            should_quit: false,
        };
        app.reset_selection();
        app
    }

    pub fn current_team(&self) -> Option<&Team> {
        self.roster.teams().get(self.selected_team)
    }

    pub fn current_skills(&self) -> &[String] {
        self.current_team()
            .map(|t| t.skills.get(self.category))
            .unwrap_or(&[])
    }

    pub fn selected_skill(&self) -> Option<&str> {
        let skills = self.current_skills();
        self.table_state
            .selected()
            .and_then(|i| skills.get(i))
            .map(String::as_str)
    }

    pub fn selected_member_name(&self) -> Option<&str> {
        self.current_team()
            .and_then(|t| t.members.get(self.selected_member))
            .map(|m| m.name.as_str())
    }

    /// Level recorded for the selected cell, if any
    pub fn selected_level(&self) -> Option<CompetencyLevel> {
        let team = self.current_team()?;
        let member = team.members.get(self.selected_member)?;
        member.level(self.selected_skill()?)
    }

    /// Point the row and column selection at valid entries after a change
    fn reset_selection(&mut self) {
        if self.selected_team >= self.roster.teams().len() {
            self.selected_team = self.roster.teams().len().saturating_sub(1);
        }
        let skill_count = self.current_skills().len();
        match self.table_state.selected() {
            _ if skill_count == 0 => self.table_state.select(None),
            Some(i) if i >= skill_count => self.table_state.select(Some(skill_count - 1)),
            None => self.table_state.select(Some(0)),
            Some(_) => {}
        }
        let member_count = self.current_team().map(|t| t.members.len()).unwrap_or(0);
        if self.selected_member >= member_count {
            self.selected_member = member_count.saturating_sub(1);
        }
    }

    pub fn next_team(&mut self) {
        let count = self.roster.teams().len();
        if count == 0 {
            return;
        }
        self.selected_team = (self.selected_team + 1) % count;
        self.table_state.select(Some(0));
        self.selected_member = 0;
        self.reset_selection();
    }

    pub fn previous_team(&mut self) {
        let count = self.roster.teams().len();
        if count == 0 {
            return;
        }
        self.selected_team = (self.selected_team + count - 1) % count;
        self.table_state.select(Some(0));
        self.selected_member = 0;
        self.reset_selection();
    }

    pub fn next_category(&mut self) {
        self.category = self.category.next();
        self.table_state.select(Some(0));
        self.reset_selection();
    }

    pub fn previous_category(&mut self) {
        self.category = self.category.previous();
        self.table_state.select(Some(0));
        self.reset_selection();
    }

    pub fn next_row(&mut self) {
        let count = self.current_skills().len();
        if count == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if i + 1 < count => i + 1,
            _ => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn previous_row(&mut self) {
        let count = self.current_skills().len();
        if count == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(0) | None => count - 1,
            Some(i) => i - 1,
        };
        self.table_state.select(Some(i));
    }

    pub fn next_member(&mut self) {
        let count = self.current_team().map(|t| t.members.len()).unwrap_or(0);
        if count > 0 {
            self.selected_member = (self.selected_member + 1) % count;
        }
    }

    pub fn previous_member(&mut self) {
        let count = self.current_team().map(|t| t.members.len()).unwrap_or(0);
        if count > 0 {
            self.selected_member = (self.selected_member + count - 1) % count;
        }
    }

    pub fn update_flash(&mut self) {
        if let Some((_, _, timestamp)) = self.flash_message {
            if timestamp.elapsed().as_secs() >= FLASH_SECS {
                self.flash_message = None;
            }
        }
    }

    pub fn show_flash(&mut self, msg: String, kind: FlashKind) {
        self.flash_message = Some((msg, kind, Instant::now()));
    }

    /// Apply a roster operation to a copy, persist it, then swap it in.
    ///
    /// The in-memory roster only changes once the session file is written.
    fn commit<T>(
        &mut self,
        op: impl FnOnce(&mut Roster) -> Result<T, RosterError>,
    ) -> Option<T> {
        let mut next = self.roster.clone();
        let value = match op(&mut next) {
            Ok(value) => value,
            Err(e) => {
                self.show_flash(e.to_string(), e.severity().into());
                return None;
            }
        };

        if let Err(e) = crate::storage::save_session(&self.session_path, &next) {
            self.show_flash(format!("Failed to save session: {}", e), FlashKind::Error);
            return None;
        }

        self.roster = next;
        self.reset_selection();
        Some(value)
    }

    pub fn start_input(&mut self, target: InputTarget) {
        if target != InputTarget::Team && self.current_team().is_none() {
            self.show_flash(
                "No teams added yet. Please add a team first.".to_string(),
                FlashKind::Warning,
            );
            return;
        }
        self.input_mode = InputMode::TextInput(target);
        self.input.clear();
    }

    pub fn cancel_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input.clear();
    }

    /// Submit the text popup to the matching roster operation
    pub fn confirm_input(&mut self) {
        let target = match self.input_mode {
            InputMode::TextInput(target) => target,
            _ => return,
        };
        let input = std::mem::take(&mut self.input);
        self.input_mode = InputMode::Normal;

        match target {
            InputTarget::Team => {
                let defaults = self.config.default_skills.clone();
                let name = input.trim().to_string();
                if self.commit(|r| r.add_team(&name, &defaults)).is_some() {
                    self.selected_team = self.roster.teams().len() - 1;
                    self.selected_member = 0;
                    self.table_state.select(Some(0));
                    self.reset_selection();
                    self.show_flash(
                        format!("Team '{}' added with default skills.", name),
                        FlashKind::Success,
                    );
                }
            }
            InputTarget::Members => {
                let Some(team) = self.current_team().map(|t| t.name.clone()) else {
                    return;
                };
                if let Some(outcome) = self.commit(|r| r.add_members(&team, &input)) {
                    let msg = crate::output::format_add_outcome("Members", &team, &outcome);
                    self.show_flash(msg, FlashKind::Success);
                }
            }
            InputTarget::Skills => {
                let Some(team) = self.current_team().map(|t| t.name.clone()) else {
                    return;
                };
                let category = self.category;
                if let Some(outcome) = self.commit(|r| r.add_skills(&team, category, &input)) {
                    let what = format!("{} skills", category);
                    let msg = crate::output::format_add_outcome(&what, &team, &outcome);
                    self.show_flash(msg, FlashKind::Success);
                }
            }
        }
    }

    /// Record `level` for the selected (member, skill) cell
    pub fn set_selected_level(&mut self, level: CompetencyLevel) {
        let Some(team) = self.current_team().map(|t| t.name.clone()) else {
            return;
        };
        let Some(member) = self.selected_member_name().map(str::to_string) else {
            self.show_flash(
                format!("No members in team '{}'. Add members first.", team),
                FlashKind::Warning,
            );
            return;
        };
        let Some(skill) = self.selected_skill().map(str::to_string) else {
            let has_skills = self.current_team().is_some_and(|t| !t.skills.is_empty());
            let msg = if has_skills {
                format!("No {} skills in team '{}'.", self.category, team)
            } else {
                RosterError::NoSkills(team).to_string()
            };
            self.show_flash(msg, FlashKind::Warning);
            return;
        };

        if self
            .commit(|r| r.set_competency(&team, &member, &skill, level))
            .is_some()
        {
            self.show_flash(format!("{}: {} = {}", member, skill, level), FlashKind::Success);
        }
    }

    /// Shift the selected cell's level by `delta`; an unscored cell starts at 0
    pub fn adjust_selected_level(&mut self, delta: i8) {
        let next = match self.selected_level() {
            Some(level) => level.saturating_add(delta),
            None => CompetencyLevel::MIN,
        };
        self.set_selected_level(next);
    }

    /// Return the selected cell to unscored
    pub fn clear_selected_level(&mut self) {
        let (Some(team), Some(member), Some(skill)) = (
            self.current_team().map(|t| t.name.clone()),
            self.selected_member_name().map(str::to_string),
            self.selected_skill().map(str::to_string),
        ) else {
            return;
        };

        if let Some(removed) = self.commit(|r| r.clear_competency(&team, &member, &skill)) {
            if removed.is_some() {
                self.show_flash(format!("{}: {} cleared", member, skill), FlashKind::Success);
            }
        }
    }

    pub fn start_delete(&mut self) {
        if self.current_team().is_some() {
            self.input_mode = InputMode::ConfirmDelete;
        }
    }

    pub fn cancel_delete(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn confirm_delete(&mut self) {
        self.input_mode = InputMode::Normal;
        let Some(team) = self.current_team().map(|t| t.name.clone()) else {
            return;
        };
        if self.commit(|r| r.delete_team(&team)).is_some() {
            self.selected_member = 0;
            self.table_state.select(Some(0));
            self.reset_selection();
            self.show_flash(format!("Team '{}' deleted.", team), FlashKind::Success);
        }
    }

    /// Export every recorded level to the configured CSV path
    pub fn export(&mut self) {
        let path = self.config.export_path.clone();
        match crate::export::export_to_path(&self.roster, &path) {
            Ok(rows) => self.show_flash(
                format!("Exported {} rows to {}", rows, path.display()),
                FlashKind::Success,
            ),
            Err(e) => {
                let kind = match e.downcast_ref::<crate::export::ExportError>() {
                    Some(crate::export::ExportError::Empty) => FlashKind::Warning,
                    _ => FlashKind::Error,
                };
                self.show_flash(format!("{:#}", e), kind);
            }
        }
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }
}
